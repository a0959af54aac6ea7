//! Path construction.
//!
//! Carries the full 6-variant segment set from `spec.md` §3 rather than the
//! teacher's simplified `PathElement` (which collapses `v`/`y` into a single
//! `CurveTo`): keeping the initial/final-point-replication distinction
//! visible lets a `Device` reproduce the exact control points pdfminer's
//! `curpath` tuples (`"v"`, `"y"`) carry, instead of re-deriving them.
//! Builder semantics (auto-move on dangling `LineTo`, `begin`/clear-on-paint)
//! follow the teacher's `rendering::path::Path`.

#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PathSegment {
    Move(f64, f64),
    Line(f64, f64),
    /// Full cubic Bézier: both control points given explicitly (`c`).
    Curve3(f64, f64, f64, f64, f64, f64),
    /// `v`: first control point equals the current point.
    CurveV(f64, f64, f64, f64),
    /// `y`: second control point equals the final point.
    CurveY(f64, f64, f64, f64),
    Close,
}

#[derive(Debug, Clone, Default)]
pub struct PathBuilder {
    segments: Vec<PathSegment>,
    current_point: Option<(f64, f64)>,
    subpath_start: Option<(f64, f64)>,
}

impl PathBuilder {
    pub fn new() -> Self {
        PathBuilder::default()
    }

    pub fn segments(&self) -> &[PathSegment] {
        &self.segments
    }

    pub fn is_empty(&self) -> bool {
        self.segments.is_empty()
    }

    pub fn current_point(&self) -> Option<(f64, f64)> {
        self.current_point
    }

    /// Clears the path after a paint operator (`S`, `f`, `n`, ...), per
    /// `spec.md` §3's invariant that `curpath` is cleared on paint.
    pub fn clear(&mut self) {
        self.segments.clear();
        self.current_point = None;
        self.subpath_start = None;
    }

    pub fn move_to(&mut self, x: f64, y: f64) {
        self.segments.push(PathSegment::Move(x, y));
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
    }

    pub fn line_to(&mut self, x: f64, y: f64) {
        if self.current_point.is_none() {
            self.move_to(x, y);
            return;
        }
        self.segments.push(PathSegment::Line(x, y));
        self.current_point = Some((x, y));
    }

    pub fn curve_to(&mut self, x1: f64, y1: f64, x2: f64, y2: f64, x3: f64, y3: f64) {
        if self.current_point.is_none() {
            self.move_to(x1, y1);
        }
        self.segments.push(PathSegment::Curve3(x1, y1, x2, y2, x3, y3));
        self.current_point = Some((x3, y3));
    }

    pub fn curve_to_v(&mut self, x2: f64, y2: f64, x3: f64, y3: f64) {
        if self.current_point.is_none() {
            self.move_to(x2, y2);
        }
        self.segments.push(PathSegment::CurveV(x2, y2, x3, y3));
        self.current_point = Some((x3, y3));
    }

    pub fn curve_to_y(&mut self, x1: f64, y1: f64, x3: f64, y3: f64) {
        if self.current_point.is_none() {
            self.move_to(x1, y1);
        }
        self.segments.push(PathSegment::CurveY(x1, y1, x3, y3));
        self.current_point = Some((x3, y3));
    }

    pub fn close(&mut self) {
        self.segments.push(PathSegment::Close);
        self.current_point = self.subpath_start;
    }

    /// `re`: appends a complete rectangular subpath as move+3 lines+close,
    /// then repositions `current_point` back to `(x, y)` as the spec
    /// requires (a `re` is immediately followed by an implicit moveto back
    /// to its origin for any further path construction).
    pub fn rectangle(&mut self, x: f64, y: f64, w: f64, h: f64) {
        self.move_to(x, y);
        self.line_to(x + w, y);
        self.line_to(x + w, y + h);
        self.line_to(x, y + h);
        self.close();
        self.current_point = Some((x, y));
        self.subpath_start = Some((x, y));
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_to_without_move_implies_move() {
        let mut p = PathBuilder::new();
        p.line_to(1.0, 1.0);
        assert_eq!(p.segments(), &[PathSegment::Move(1.0, 1.0)]);
    }

    #[test]
    fn rectangle_expands_to_closed_subpath() {
        let mut p = PathBuilder::new();
        p.rectangle(0.0, 0.0, 10.0, 20.0);
        assert_eq!(
            p.segments(),
            &[
                PathSegment::Move(0.0, 0.0),
                PathSegment::Line(10.0, 0.0),
                PathSegment::Line(10.0, 20.0),
                PathSegment::Line(0.0, 20.0),
                PathSegment::Close,
            ]
        );
        assert_eq!(p.current_point(), Some((0.0, 0.0)));
    }

    #[test]
    fn clear_resets_for_next_path() {
        let mut p = PathBuilder::new();
        p.move_to(1.0, 1.0);
        p.clear();
        assert!(p.is_empty());
        assert_eq!(p.current_point(), None);
    }

    #[test]
    fn curve_v_and_y_keep_distinct_variants() {
        let mut p = PathBuilder::new();
        p.move_to(0.0, 0.0);
        p.curve_to_v(1.0, 1.0, 2.0, 2.0);
        p.curve_to_y(3.0, 3.0, 4.0, 4.0);
        assert_eq!(
            p.segments()[1..],
            [
                PathSegment::CurveV(1.0, 1.0, 2.0, 2.0),
                PathSegment::CurveY(3.0, 3.0, 4.0, 4.0),
            ]
        );
    }
}
