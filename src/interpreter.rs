//! The content-stream interpreter: dispatch table, graphics/text state
//! machines, path painting, color, XObject recursion, and marked content.
//!
//! Grounded on the teacher's `rendering::context::RenderingContext`
//! dispatch loop (`match op.op { ... }` over every operator), generalized
//! from the teacher's text-extraction-only semantics to the full operator
//! set `spec.md` §4 requires. Unlike the teacher's `RenderingContext<D:
//! Device>`, which owns its device generically, this interpreter takes
//! `device`/`resource_manager` as `&mut dyn Device`/`&dyn ResourceManager`
//! trait-object parameters on each entry point: Form XObject recursion
//! (§4.8) builds a fresh child `Interpreter` per invocation, and threading
//! trait objects through that recursion is simpler than propagating a
//! generic type parameter through every recursive call site.

use crate::color::ColorSpace;
use crate::content_stream::{ContentStreamReader, OpCode, Operation};
use crate::device::{Device, PageHandle, Rect, TextSeq, TextSeqItem};
use crate::error::{InterpError, InterpResult};
use crate::graphics_state::GraphicState;
use crate::matrix::Matrix;
use crate::object::Object;
use crate::page::{initial_ctm, Page};
use crate::resources::{ResourceBinder, ResourceManager};
use crate::text_state::TextState;
use rustc_hash::FxHashMap;

#[derive(Debug, Clone, Copy)]
pub struct InterpreterConfig {
    pub strict: bool,
    /// Bounds pathological Form XObject self-reference cycles; `spec.md` §9
    /// notes recursion-depth detection is not this layer's job but that an
    /// implementer should guard the call site.
    pub max_xobject_depth: usize,
}

impl Default for InterpreterConfig {
    fn default() -> Self {
        InterpreterConfig {
            strict: false,
            max_xobject_depth: 16,
        }
    }
}

pub struct Interpreter {
    ctm: Matrix,
    textstate: TextState,
    graphicstate: GraphicState,
    gstack: Vec<(Matrix, TextState, GraphicState)>,
    curpath: crate::path::PathBuilder,
    scs: Option<ColorSpace>,
    ncs: Option<ColorSpace>,
    resources: ResourceBinder,
    config: InterpreterConfig,
    in_text_object: bool,
    depth: usize,
}

impl Interpreter {
    fn new(ctm: Matrix, resources: ResourceBinder, config: InterpreterConfig, depth: usize) -> Self {
        let default_cs = resources.csmap.values().next().cloned();
        Interpreter {
            ctm,
            textstate: TextState::default(),
            graphicstate: GraphicState::default(),
            gstack: Vec::new(),
            curpath: crate::path::PathBuilder::new(),
            // pdfminer.pdfinterp.PDFPageInterpreter.init_state seeds scs/ncs
            // to the first csmap entry rather than leaving them unset.
            scs: default_cs.clone(),
            ncs: default_cs,
            resources,
            config,
            in_text_object: false,
            depth,
        }
    }

    /// Entry point for a whole page: binds page resources, computes the
    /// initial CTM, and drives `begin_page`/`render_contents`/`end_page`.
    pub fn process_page(
        page: &Page,
        device: &mut dyn Device,
        rm: &dyn ResourceManager,
        config: InterpreterConfig,
    ) -> InterpResult<()> {
        let ctm = initial_ctm(page.mediabox, page.rotate);
        let mut binder = ResourceBinder::with_predefined_colorspaces();
        binder.bind(&page.resources, rm, config.strict)?;
        let mut interp = Interpreter::new(ctm, binder, config, 0);

        let handle = PageHandle {
            index: page.index,
            mediabox: page.mediabox,
            rotate: page.rotate,
        };
        device.begin_page(&handle, ctm);
        interp.render_contents(page.contents.clone(), device, rm)?;
        device.end_page(&handle);
        Ok(())
    }

    /// Tokenizes and dispatches a sequence of content streams against the
    /// currently bound resources.
    pub fn render_contents(
        &mut self,
        streams: Vec<Vec<u8>>,
        device: &mut dyn Device,
        rm: &dyn ResourceManager,
    ) -> InterpResult<()> {
        let mut reader = ContentStreamReader::new(streams, self.config.strict);
        while let Some(operation) = reader.next_operation()? {
            self.dispatch(operation, device, rm)?;
        }
        Ok(())
    }

    fn dispatch(
        &mut self,
        operation: Operation,
        device: &mut dyn Device,
        rm: &dyn ResourceManager,
    ) -> InterpResult<()> {
        let Operation { op, args, index } = operation;

        if let Some(n) = op.arity() {
            if args.len() < n {
                if self.config.strict {
                    return Err(InterpError::StackUnderflow {
                        op: op.to_command().to_string(),
                        needed: n,
                        found: args.len(),
                    });
                }
                return Ok(());
            }
        }
        let args: &[Object] = match op.arity() {
            Some(n) => &args[args.len() - n..],
            None => &args[..],
        };

        match op {
            OpCode::Save => self.op_save(),
            OpCode::Restore => self.op_restore(device),
            OpCode::Transform => self.op_transform(args, device)?,

            OpCode::SetLineWidth => self.graphicstate.line_width = num(args, 0)?,
            OpCode::SetLineCap => self.graphicstate.line_cap = line_cap(num(args, 0)? as i32),
            OpCode::SetLineJoin => self.graphicstate.line_join = line_join(num(args, 0)? as i32),
            OpCode::SetMiterLimit => self.graphicstate.miter_limit = num(args, 0)?,
            OpCode::SetDash => {
                let pattern = args[0]
                    .as_array()
                    .map(|a| a.iter().filter_map(|o| o.as_number()).collect())
                    .unwrap_or_default();
                self.graphicstate.dash_pattern = pattern;
                self.graphicstate.dash_phase = num(args, 1)?;
            }
            OpCode::SetRenderingIntent => {
                self.graphicstate.rendering_intent =
                    args[0].as_name().unwrap_or("RelativeColorimetric").to_string();
            }
            OpCode::SetFlatness => self.graphicstate.flatness = num(args, 0)?,
            OpCode::SetGState => {} // stub: parameter dictionaries are out of scope

            OpCode::MoveTo => self.curpath.move_to(num(args, 0)?, num(args, 1)?),
            OpCode::LineTo => self.curpath.line_to(num(args, 0)?, num(args, 1)?),
            OpCode::CurveTo => self.curpath.curve_to(
                num(args, 0)?,
                num(args, 1)?,
                num(args, 2)?,
                num(args, 3)?,
                num(args, 4)?,
                num(args, 5)?,
            ),
            OpCode::CurveTo2 => {
                self.curpath
                    .curve_to_v(num(args, 0)?, num(args, 1)?, num(args, 2)?, num(args, 3)?)
            }
            OpCode::CurveTo3 => {
                self.curpath
                    .curve_to_y(num(args, 0)?, num(args, 1)?, num(args, 2)?, num(args, 3)?)
            }
            OpCode::ClosePath => self.curpath.close(),
            OpCode::Rectangle => self.curpath.rectangle(
                num(args, 0)?,
                num(args, 1)?,
                num(args, 2)?,
                num(args, 3)?,
            ),

            OpCode::Stroke => self.paint(device, true, false, false, false)?,
            OpCode::CloseStroke => self.paint(device, true, false, false, true)?,
            OpCode::Fill => self.paint(device, false, true, false, false)?,
            OpCode::EOFill => self.paint(device, false, true, true, false)?,
            OpCode::FillStroke => self.paint(device, true, true, false, false)?,
            OpCode::EOFillStroke => self.paint(device, true, true, true, false)?,
            OpCode::CloseFillStroke => self.paint(device, true, true, false, true)?,
            OpCode::CloseEOFillStroke => self.paint(device, true, true, true, true)?,
            OpCode::EndPath => self.paint(device, false, false, false, false)?,

            OpCode::Clip | OpCode::EOClip => {} // accepted, no effect in this core

            OpCode::BeginText => {
                if self.in_text_object && self.config.strict {
                    return Err(InterpError::Parse("nested BT".into()));
                }
                if self.in_text_object {
                    tracing::warn!("nested BT encountered; ignoring in lenient mode");
                }
                self.in_text_object = true;
                self.textstate.begin_text_object();
            }
            OpCode::EndText => self.in_text_object = false,

            OpCode::SetCharSpacing => self.textstate.char_space = num(args, 0)?,
            OpCode::SetWordSpacing => self.textstate.word_space = num(args, 0)?,
            OpCode::SetHScale => self.textstate.scaling = num(args, 0)?,
            // Stored negated so T*'s `leading·c+e` formula needs no
            // further sign flip; TD below relies on this convention too.
            OpCode::SetLeading => self.textstate.leading = -num(args, 0)?,
            OpCode::SetFont => self.op_set_font(args, rm)?,
            OpCode::SetTextRenderingMode => self.textstate.render_mode = num(args, 0)? as i32,
            OpCode::SetTextRise => self.textstate.rise = num(args, 0)?,

            OpCode::MoveText => self.op_move_text(num(args, 0)?, num(args, 1)?),
            OpCode::SetLeadingMoveText => {
                let (tx, ty) = (num(args, 0)?, num(args, 1)?);
                self.op_move_text(tx, ty);
                self.textstate.leading = ty;
            }
            OpCode::SetTextMatrix => {
                self.textstate.matrix = Matrix::new(
                    num(args, 0)?,
                    num(args, 1)?,
                    num(args, 2)?,
                    num(args, 3)?,
                    num(args, 4)?,
                    num(args, 5)?,
                );
                self.textstate.line_matrix = (0.0, 0.0);
            }
            OpCode::NextLine => self.op_next_line(),

            OpCode::ShowText => {
                let bytes = args[0].as_string_bytes().unwrap_or(&[]).to_vec();
                self.show_text(vec![TextSeqItem::Bytes(bytes)], index, device)?;
            }
            OpCode::ShowSpacedText => {
                let seq = text_seq_from_array(&args[0]);
                self.show_text(seq, index, device)?;
            }
            OpCode::NextLineShowText => {
                self.op_next_line();
                let bytes = args[0].as_string_bytes().unwrap_or(&[]).to_vec();
                self.show_text(vec![TextSeqItem::Bytes(bytes)], index, device)?;
            }
            OpCode::NextLineSetSpacingShowText => {
                self.textstate.word_space = num(args, 0)?;
                self.textstate.char_space = num(args, 1)?;
                self.op_next_line();
                let bytes = args[2].as_string_bytes().unwrap_or(&[]).to_vec();
                self.show_text(vec![TextSeqItem::Bytes(bytes)], index, device)?;
            }

            OpCode::SetCharWidth | OpCode::SetCharWidthAndBounds => {} // Type3 glyph metrics: out of scope

            OpCode::SetStrokeColorSpace => self.scs = self.resolve_colorspace_name(args[0].as_name()),
            OpCode::SetFillColorSpace => self.ncs = self.resolve_colorspace_name(args[0].as_name()),
            OpCode::SetStrokeColor | OpCode::SetStrokeColorN => {
                self.graphicstate.stroke_color = self.color_from_variadic(args, self.scs.as_ref());
            }
            OpCode::SetFillColor | OpCode::SetFillColorN => {
                self.graphicstate.fill_color = self.color_from_variadic(args, self.ncs.as_ref());
            }
            OpCode::SetStrokeGray => {
                self.graphicstate.stroke_colorspace = ColorSpace::DeviceGray;
                self.graphicstate.stroke_color = crate::color::Color::Gray(num(args, 0)?);
            }
            OpCode::SetFillGray => {
                self.graphicstate.fill_colorspace = ColorSpace::DeviceGray;
                self.graphicstate.fill_color = crate::color::Color::Gray(num(args, 0)?);
            }
            OpCode::SetStrokeRGBColor => {
                self.graphicstate.stroke_colorspace = ColorSpace::DeviceRGB;
                self.graphicstate.stroke_color =
                    crate::color::Color::RGB(num(args, 0)?, num(args, 1)?, num(args, 2)?);
            }
            OpCode::SetFillRGBColor => {
                self.graphicstate.fill_colorspace = ColorSpace::DeviceRGB;
                self.graphicstate.fill_color =
                    crate::color::Color::RGB(num(args, 0)?, num(args, 1)?, num(args, 2)?);
            }
            OpCode::SetStrokeCMYKColor => {
                self.graphicstate.stroke_colorspace = ColorSpace::DeviceCMYK;
                self.graphicstate.stroke_color = crate::color::Color::CMYK(
                    num(args, 0)?,
                    num(args, 1)?,
                    num(args, 2)?,
                    num(args, 3)?,
                );
            }
            OpCode::SetFillCMYKColor => {
                self.graphicstate.fill_colorspace = ColorSpace::DeviceCMYK;
                self.graphicstate.fill_color = crate::color::Color::CMYK(
                    num(args, 0)?,
                    num(args, 1)?,
                    num(args, 2)?,
                    num(args, 3)?,
                );
            }

            OpCode::ShadingFill => {} // shading patterns: out of scope, accepted no-op

            OpCode::BeginInlineImage => {
                if let Object::Stream { dict, data } = &args[0] {
                    device.render_image("<inline>", dict, data);
                }
            }

            OpCode::PaintXObject => self.op_do(args[0].as_name().unwrap_or(""), device, rm)?,

            OpCode::MarkPoint => device.do_tag(args[0].as_name().unwrap_or(""), None),
            OpCode::MarkPointProps => {
                device.do_tag(args[0].as_name().unwrap_or(""), args[1].as_dictionary())
            }
            OpCode::BeginMarkedContent => device.begin_tag(args[0].as_name().unwrap_or(""), None),
            OpCode::BeginMarkedContentProps => {
                device.begin_tag(args[0].as_name().unwrap_or(""), args[1].as_dictionary())
            }
            OpCode::EndMarkedContent => device.end_tag(),

            OpCode::BeginCompat | OpCode::EndCompat => {}
        }
        Ok(())
    }

    fn op_save(&mut self) {
        self.gstack.push((
            self.ctm,
            self.textstate.clone(),
            self.graphicstate.clone(),
        ));
    }

    fn op_restore(&mut self, device: &mut dyn Device) {
        let Some((ctm, textstate, graphicstate)) = self.gstack.pop() else {
            tracing::debug!("Q with empty graphics state stack; ignoring");
            return;
        };
        self.ctm = ctm;
        self.textstate = textstate;
        self.graphicstate = graphicstate;
        device.set_ctm(self.ctm);
    }

    fn op_transform(&mut self, args: &[Object], device: &mut dyn Device) -> InterpResult<()> {
        let m = Matrix::new(
            num(args, 0)?,
            num(args, 1)?,
            num(args, 2)?,
            num(args, 3)?,
            num(args, 4)?,
            num(args, 5)?,
        );
        self.ctm = m.mult(&self.ctm);
        device.set_ctm(self.ctm);
        Ok(())
    }

    fn paint(
        &mut self,
        device: &mut dyn Device,
        stroke: bool,
        fill: bool,
        evenodd: bool,
        close_first: bool,
    ) -> InterpResult<()> {
        if close_first {
            self.curpath.close();
        }
        device.paint_path(&self.graphicstate, stroke, fill, evenodd, self.curpath.segments())?;
        self.curpath.clear();
        Ok(())
    }

    fn op_set_font(&mut self, args: &[Object], rm: &dyn ResourceManager) -> InterpResult<()> {
        let name = args[0].as_name().unwrap_or("");
        let size = num(args, 1)?;
        match self.resources.fontmap.get(name) {
            Some(font) => self.textstate.font = Some(font.clone()),
            None if self.config.strict => {
                return Err(InterpError::Resource(format!("font {name:?} not in fontmap")))
            }
            None => {
                tracing::warn!(font = name, "font not found, substituting default");
                let default = rm.get_font(None, &FxHashMap::default(), false)?;
                self.textstate.font = Some(default);
            }
        }
        self.textstate.font_size = size;
        Ok(())
    }

    /// `Tm := translate(tx,ty) · Tm`, i.e. `e' = tx·a+ty·c+e`, `f'=tx·b+ty·d+f`.
    fn op_move_text(&mut self, tx: f64, ty: f64) {
        let m = self.textstate.matrix;
        self.textstate.matrix = Matrix::new(
            m.a,
            m.b,
            m.c,
            m.d,
            tx * m.a + ty * m.c + m.e,
            tx * m.b + ty * m.d + m.f,
        );
        self.textstate.line_matrix = (0.0, 0.0);
    }

    fn op_next_line(&mut self) {
        let m = self.textstate.matrix;
        let leading = self.textstate.leading;
        self.textstate.matrix = Matrix::new(
            m.a,
            m.b,
            m.c,
            m.d,
            leading * m.c + m.e,
            leading * m.d + m.f,
        );
    }

    fn show_text(
        &mut self,
        seq: TextSeq,
        instruction_index: usize,
        device: &mut dyn Device,
    ) -> InterpResult<()> {
        let ncs = self.ncs.clone().unwrap_or(ColorSpace::DeviceGray);
        device.render_string(&self.textstate, &seq, &ncs, &self.graphicstate, instruction_index)
    }

    fn resolve_colorspace_name(&self, name: Option<&str>) -> Option<ColorSpace> {
        name.and_then(|n| self.resources.csmap.get(n).cloned())
            .or_else(|| {
                if self.config.strict {
                    None
                } else {
                    self.resources.csmap.values().next().cloned()
                }
            })
    }

    fn color_from_variadic(&self, args: &[Object], cs: Option<&ColorSpace>) -> crate::color::Color {
        let n = cs.map(|c| c.ncomponents().max(1)).unwrap_or(1);
        let components: Vec<f64> = args
            .iter()
            .filter_map(|o| o.as_number())
            .take(n)
            .collect();
        crate::color::Color::from_components(&components)
    }

    fn op_do(&mut self, name: &str, device: &mut dyn Device, rm: &dyn ResourceManager) -> InterpResult<()> {
        let Some(xobj) = self.resources.xobjmap.get(name).cloned() else {
            if self.config.strict {
                return Err(InterpError::Resource(format!("XObject {name:?} not found")));
            }
            return Ok(());
        };
        let Object::Stream { dict, data } = &xobj else {
            return Ok(());
        };
        let subtype = dict.get("Subtype").and_then(|o| o.as_name()).unwrap_or("");

        match subtype {
            "Form" => {
                if self.depth + 1 >= self.config.max_xobject_depth {
                    return Err(InterpError::Resource(format!(
                        "XObject recursion depth exceeded at {name:?}"
                    )));
                }
                let bbox = dict
                    .get("BBox")
                    .and_then(|o| o.as_array())
                    .map(|a| Rect {
                        x0: a.first().and_then(|o| o.as_number()).unwrap_or(0.0),
                        y0: a.get(1).and_then(|o| o.as_number()).unwrap_or(0.0),
                        x1: a.get(2).and_then(|o| o.as_number()).unwrap_or(0.0),
                        y1: a.get(3).and_then(|o| o.as_number()).unwrap_or(0.0),
                    })
                    .unwrap_or(Rect { x0: 0.0, y0: 0.0, x1: 0.0, y1: 0.0 });
                let matrix = dict
                    .get("Matrix")
                    .and_then(|o| o.as_array())
                    .map(|a| Matrix::new(
                        a.first().and_then(|o| o.as_number()).unwrap_or(1.0),
                        a.get(1).and_then(|o| o.as_number()).unwrap_or(0.0),
                        a.get(2).and_then(|o| o.as_number()).unwrap_or(0.0),
                        a.get(3).and_then(|o| o.as_number()).unwrap_or(1.0),
                        a.get(4).and_then(|o| o.as_number()).unwrap_or(0.0),
                        a.get(5).and_then(|o| o.as_number()).unwrap_or(0.0),
                    ))
                    .unwrap_or(Matrix::IDENTITY);

                let mut binder = ResourceBinder::with_predefined_colorspaces();
                match dict.get("Resources").and_then(|o| o.as_dictionary()) {
                    Some(res) => binder.bind(res, rm, self.config.strict)?,
                    // PDF 1.1 legacy: a Form without its own /Resources
                    // inherits the invoking page's/form's resources.
                    None => binder = self.resources.clone(),
                }

                let child_ctm = matrix.mult(&self.ctm);
                device.begin_figure(name, bbox, matrix);
                let mut child = Interpreter::new(child_ctm, binder, self.config, self.depth + 1);
                device.set_ctm(child_ctm);
                child.render_contents(vec![data.clone()], device, rm)?;
                device.end_figure(name);
            }
            "Image" => {
                let has_dims = dict.contains_key("Width") && dict.contains_key("Height");
                if has_dims {
                    let bbox = Rect { x0: 0.0, y0: 0.0, x1: 1.0, y1: 1.0 };
                    device.begin_figure(name, bbox, Matrix::IDENTITY);
                    device.render_image(name, dict, data);
                    device.end_figure(name);
                }
            }
            _ => {}
        }
        Ok(())
    }
}

fn num(args: &[Object], i: usize) -> InterpResult<f64> {
    args.get(i)
        .and_then(|o| o.as_number())
        .ok_or_else(|| InterpError::Type(format!("expected numeric operand at position {i}")))
}

fn line_cap(n: i32) -> crate::graphics_state::LineCap {
    match n {
        1 => crate::graphics_state::LineCap::Round,
        2 => crate::graphics_state::LineCap::ProjectingSquare,
        _ => crate::graphics_state::LineCap::Butt,
    }
}

fn line_join(n: i32) -> crate::graphics_state::LineJoin {
    match n {
        1 => crate::graphics_state::LineJoin::Round,
        2 => crate::graphics_state::LineJoin::Bevel,
        _ => crate::graphics_state::LineJoin::Miter,
    }
}

fn text_seq_from_array(arr_obj: &Object) -> TextSeq {
    let Some(items) = arr_obj.as_array() else {
        return Vec::new();
    };
    items
        .iter()
        .filter_map(|o| match o.as_ref() {
            Object::Number(n) => Some(TextSeqItem::Delta(*n)),
            Object::String(s) => Some(TextSeqItem::Bytes(s.clone())),
            _ => None,
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device::RecordingDevice;
    use crate::path::PathSegment;
    use crate::resources::{DefaultResourceManager, ResourceManagerConfig};

    fn run(src: &str) -> (RecordingDevice, Interpreter) {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let binder = ResourceBinder::with_predefined_colorspaces();
        let mut interp = Interpreter::new(Matrix::IDENTITY, binder, InterpreterConfig::default(), 0);
        let mut device = RecordingDevice::default();
        interp
            .render_contents(vec![src.as_bytes().to_vec()], &mut device, &rm)
            .unwrap();
        (device, interp)
    }

    #[test]
    fn s1_rectangle_stroke() {
        let (device, _) = run("1 w 10 20 30 40 re S");
        assert_eq!(device.paths.len(), 1);
        let (stroke, fill, evenodd, path) = &device.paths[0];
        assert!(*stroke);
        assert!(!*fill);
        assert!(!*evenodd);
        assert_eq!(
            path,
            &vec![
                PathSegment::Move(10.0, 20.0),
                PathSegment::Line(40.0, 20.0),
                PathSegment::Line(40.0, 60.0),
                PathSegment::Line(10.0, 60.0),
                PathSegment::Close,
            ]
        );
    }

    #[test]
    fn s2_nested_save_restore() {
        let (device, interp) = run("q 2 0 0 2 0 0 cm q 0.5 w 0 0 m 1 1 l Q S");
        assert_eq!(device.paths.len(), 1);
        assert_eq!(interp.graphicstate.line_width, 1.0);
    }

    #[test]
    fn s3_text_positioning() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let mut binder = ResourceBinder::with_predefined_colorspaces();
        binder
            .fontmap
            .insert("F1".to_string(), rm.get_font(None, &FxHashMap::default(), false).unwrap());
        let mut interp = Interpreter::new(Matrix::IDENTITY, binder, InterpreterConfig::default(), 0);
        let mut device = RecordingDevice::default();
        interp
            .render_contents(
                vec![b"BT /F1 12 Tf 72 720 Td (Hi) Tj ET".to_vec()],
                &mut device,
                &rm,
            )
            .unwrap();
        assert_eq!(device.strings.len(), 1);
        let (tstate, _, _) = &device.strings[0];
        assert_eq!(tstate.matrix, Matrix::new(1.0, 0.0, 0.0, 1.0, 72.0, 720.0));
        assert_eq!(tstate.font_size, 12.0);
    }

    #[test]
    fn s4_tj_mixed_sequence() {
        let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
        let mut binder = ResourceBinder::with_predefined_colorspaces();
        binder
            .fontmap
            .insert("F1".to_string(), rm.get_font(None, &FxHashMap::default(), false).unwrap());
        let mut interp = Interpreter::new(Matrix::IDENTITY, binder, InterpreterConfig::default(), 0);
        let mut device = RecordingDevice::default();
        interp
            .render_contents(
                vec![br#"BT /F1 10 Tf [(A) -120 (B)] TJ ET"#.to_vec()],
                &mut device,
                &rm,
            )
            .unwrap();
        let (_, seq, _) = &device.strings[0];
        assert_eq!(
            seq,
            &vec![
                TextSeqItem::Bytes(b"A".to_vec()),
                TextSeqItem::Delta(-120.0),
                TextSeqItem::Bytes(b"B".to_vec()),
            ]
        );
    }

    #[test]
    fn td_sets_leading() {
        let (_, interp) = run("BT 5 -12 TD ET");
        assert_eq!(interp.textstate.leading, -12.0);
    }

    #[test]
    fn color_space_arity_rgb_and_cmyk() {
        let (device, interp) = run("/DeviceRGB cs 1 0 0 scn /DeviceCMYK CS 0 0 0 1 SCN 0 0 1 1 re f");
        assert_eq!(interp.graphicstate.fill_color, crate::color::Color::RGB(1.0, 0.0, 0.0));
        assert_eq!(
            interp.graphicstate.stroke_color,
            crate::color::Color::CMYK(0.0, 0.0, 0.0, 1.0)
        );
        assert_eq!(device.paths.len(), 1);
    }

    #[test]
    fn q_with_empty_stack_is_noop() {
        let (_device, interp) = run("Q Q 1 0 0 1 0 0 cm");
        assert_eq!(interp.ctm, Matrix::IDENTITY);
    }

    #[test]
    fn balanced_stacks_after_page() {
        let (_device, interp) = run("q 1 w Q q q Q Q 0 0 m 1 1 l S");
        assert!(interp.gstack.is_empty());
        assert!(interp.curpath.is_empty());
    }
}
