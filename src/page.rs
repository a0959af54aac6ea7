//! Page description and the initial-CTM computation of `spec.md` §4.10.
//!
//! Trimmed from the teacher's `core::page::Page` (which also carries
//! `/Annots`, `/Group`, inherited attributes resolution, and lazy content
//! decompression — all out of scope here since this crate receives already
//! decompressed content-stream bytes and an already-resolved resource
//! dictionary).

use crate::device::Rect;
use crate::matrix::Matrix;
use crate::object::Object;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone)]
pub struct Page {
    pub index: usize,
    pub mediabox: Rect,
    /// 0, 90, 180, or 270.
    pub rotate: i32,
    pub resources: FxHashMap<String, Object>,
    pub contents: Vec<Vec<u8>>,
}

/// Computes the initial CTM from a page's mediabox and rotation, per the
/// table in `spec.md` §4.10.
pub fn initial_ctm(mediabox: Rect, rotate: i32) -> Matrix {
    let Rect { x0, y0, x1, y1 } = mediabox;
    match ((rotate % 360) + 360) % 360 {
        90 => Matrix::new(0.0, -1.0, 1.0, 0.0, -y0, x1),
        180 => Matrix::new(-1.0, 0.0, 0.0, -1.0, x1, y1),
        270 => Matrix::new(0.0, 1.0, -1.0, 0.0, y1, -x0),
        _ => Matrix::new(1.0, 0.0, 0.0, 1.0, -x0, -y0),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rotate_0_translates_origin() {
        let mb = Rect { x0: 10.0, y0: 20.0, x1: 100.0, y1: 200.0 };
        assert_eq!(initial_ctm(mb, 0), Matrix::new(1.0, 0.0, 0.0, 1.0, -10.0, -20.0));
    }

    #[test]
    fn rotate_90_matches_spec_table() {
        let mb = Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 };
        assert_eq!(initial_ctm(mb, 90), Matrix::new(0.0, -1.0, 1.0, 0.0, 0.0, 612.0));
    }

    #[test]
    fn rotate_180_and_270() {
        let mb = Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 };
        assert_eq!(initial_ctm(mb, 180), Matrix::new(-1.0, 0.0, 0.0, -1.0, 612.0, 792.0));
        assert_eq!(initial_ctm(mb, 270), Matrix::new(0.0, 1.0, -1.0, 0.0, 792.0, 0.0));
    }

    #[test]
    fn negative_rotate_normalizes() {
        let mb = Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 };
        assert_eq!(initial_ctm(mb, -270), initial_ctm(mb, 90));
    }
}
