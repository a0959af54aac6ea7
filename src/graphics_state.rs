//! Graphics state: everything `q`/`Q` save and restore except the CTM and
//! text state, which the interpreter and `TextState` track separately per
//! `spec.md` §3. Line style fields are grounded on the teacher's
//! `rendering::graphics_state::StrokeProps`/`LineCap`/`LineJoin`.

use crate::color::{Color, ColorSpace};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineCap {
    Butt = 0,
    Round = 1,
    ProjectingSquare = 2,
}

impl Default for LineCap {
    fn default() -> Self {
        LineCap::Butt
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LineJoin {
    Miter = 0,
    Round = 1,
    Bevel = 2,
}

impl Default for LineJoin {
    fn default() -> Self {
        LineJoin::Miter
    }
}

#[derive(Debug, Clone)]
pub struct GraphicState {
    pub line_width: f64,
    pub line_cap: LineCap,
    pub line_join: LineJoin,
    pub miter_limit: f64,
    pub dash_pattern: Vec<f64>,
    pub dash_phase: f64,
    pub rendering_intent: String,
    pub flatness: f64,

    pub stroke_colorspace: ColorSpace,
    pub stroke_color: Color,
    pub fill_colorspace: ColorSpace,
    pub fill_color: Color,
}

impl Default for GraphicState {
    fn default() -> Self {
        GraphicState {
            line_width: 1.0,
            line_cap: LineCap::default(),
            line_join: LineJoin::default(),
            miter_limit: 10.0,
            dash_pattern: Vec::new(),
            dash_phase: 0.0,
            rendering_intent: "RelativeColorimetric".to_string(),
            flatness: 1.0,
            stroke_colorspace: ColorSpace::DeviceGray,
            stroke_color: Color::black(),
            fill_colorspace: ColorSpace::DeviceGray,
            fill_color: Color::black(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_state_is_black_device_gray() {
        let gs = GraphicState::default();
        assert_eq!(gs.stroke_color, Color::black());
        assert_eq!(gs.fill_color, Color::black());
        assert_eq!(gs.line_width, 1.0);
    }
}
