//! The rendering-sink contract and a recording test double.
//!
//! Method names and signatures follow `spec.md` §6 exactly (`begin_page`,
//! `paint_path`, `render_string`, ...), which is pdfminer's `PDFDevice`
//! surface rather than the teacher's own `Device` trait (`begin_path`/
//! `draw_path`/`draw_text`). The *shape* of the abstraction — a trait facing
//! an external sink, plus a recording double for tests — is grounded on the
//! teacher's `rendering::device::{Device, TestDevice}`; only the call
//! signatures differ, because unlike the teacher this crate hands the
//! device whole text runs and path segment lists rather than issuing one
//! call per segment.

use crate::color::ColorSpace;
use crate::error::InterpResult;
use crate::graphics_state::GraphicState;
use crate::matrix::Matrix;
use crate::object::Object;
use crate::path::PathSegment;
use crate::text_state::TextState;
use rustc_hash::FxHashMap;

/// One element of a `TJ` operand array: either a byte string to show or a
/// numeric displacement (thousandths of an em) to apply first.
#[derive(Debug, Clone, PartialEq)]
pub enum TextSeqItem {
    Bytes(Vec<u8>),
    Delta(f64),
}

pub type TextSeq = Vec<TextSeqItem>;

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Rect {
    pub x0: f64,
    pub y0: f64,
    pub x1: f64,
    pub y1: f64,
}

/// A resolved page, as handed to `begin_page`/`end_page`. Only the fields the
/// device contract needs (see `spec.md` §4.10) — the full page dictionary is
/// the host's concern.
#[derive(Debug, Clone)]
pub struct PageHandle {
    pub index: usize,
    pub mediabox: Rect,
    pub rotate: i32,
}

pub trait Device {
    fn set_ctm(&mut self, ctm: Matrix);

    fn begin_page(&mut self, page: &PageHandle, ctm: Matrix);
    fn end_page(&mut self, page: &PageHandle);

    fn begin_figure(&mut self, name: &str, bbox: Rect, matrix: Matrix);
    fn end_figure(&mut self, name: &str);

    fn paint_path(
        &mut self,
        gstate: &GraphicState,
        stroke: bool,
        fill: bool,
        evenodd: bool,
        path: &[PathSegment],
    ) -> InterpResult<()>;

    fn render_string(
        &mut self,
        tstate: &TextState,
        seq: &TextSeq,
        ncs: &ColorSpace,
        gstate: &GraphicState,
        instruction_index: usize,
    ) -> InterpResult<()>;

    fn render_image(&mut self, name: &str, dict: &FxHashMap<String, Object>, data: &[u8]);

    fn do_tag(&mut self, tag: &str, props: Option<&FxHashMap<String, Object>>);
    fn begin_tag(&mut self, tag: &str, props: Option<&FxHashMap<String, Object>>);
    fn end_tag(&mut self);
}

/// Records every call for assertions in tests, grounded on the teacher's
/// `TestDevice` (a CTM-tracking no-op sink).
#[derive(Debug, Default)]
pub struct RecordingDevice {
    pub ctm_history: Vec<Matrix>,
    pub pages: Vec<(usize, Matrix)>,
    pub figures: Vec<(String, Rect, Matrix)>,
    pub paths: Vec<(bool, bool, bool, Vec<PathSegment>)>,
    pub strings: Vec<(TextState, TextSeq, usize)>,
    pub images: Vec<String>,
    pub tags: Vec<String>,
}

impl Device for RecordingDevice {
    fn set_ctm(&mut self, ctm: Matrix) {
        self.ctm_history.push(ctm);
    }

    fn begin_page(&mut self, page: &PageHandle, ctm: Matrix) {
        self.pages.push((page.index, ctm));
    }

    fn end_page(&mut self, _page: &PageHandle) {}

    fn begin_figure(&mut self, name: &str, bbox: Rect, matrix: Matrix) {
        self.figures.push((name.to_string(), bbox, matrix));
    }

    fn end_figure(&mut self, _name: &str) {}

    fn paint_path(
        &mut self,
        _gstate: &GraphicState,
        stroke: bool,
        fill: bool,
        evenodd: bool,
        path: &[PathSegment],
    ) -> InterpResult<()> {
        self.paths.push((stroke, fill, evenodd, path.to_vec()));
        Ok(())
    }

    fn render_string(
        &mut self,
        tstate: &TextState,
        seq: &TextSeq,
        _ncs: &ColorSpace,
        _gstate: &GraphicState,
        instruction_index: usize,
    ) -> InterpResult<()> {
        self.strings
            .push((tstate.clone(), seq.clone(), instruction_index));
        Ok(())
    }

    fn render_image(&mut self, name: &str, _dict: &FxHashMap<String, Object>, _data: &[u8]) {
        self.images.push(name.to_string());
    }

    fn do_tag(&mut self, tag: &str, _props: Option<&FxHashMap<String, Object>>) {
        self.tags.push(format!("do:{tag}"));
    }

    fn begin_tag(&mut self, tag: &str, _props: Option<&FxHashMap<String, Object>>) {
        self.tags.push(format!("begin:{tag}"));
    }

    fn end_tag(&mut self) {
        self.tags.push("end".to_string());
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn recording_device_tracks_ctm_history() {
        let mut dev = RecordingDevice::default();
        dev.set_ctm(Matrix::IDENTITY);
        dev.set_ctm(Matrix::translation(1.0, 2.0));
        assert_eq!(dev.ctm_history.len(), 2);
    }

    #[test]
    fn recording_device_records_paint_path() {
        let mut dev = RecordingDevice::default();
        let gs = GraphicState::default();
        dev.paint_path(&gs, true, false, false, &[PathSegment::Move(0.0, 0.0)])
            .unwrap();
        assert_eq!(dev.paths.len(), 1);
        assert!(dev.paths[0].0);
    }
}
