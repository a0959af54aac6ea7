//! Tokenizes content-stream bytes into a stream of `Operation`s.
//!
//! Combines the byte-level `Lexer` with an operand accumulator: operands
//! (numbers, strings, names, arrays, dicts) are pushed onto a scratch buffer
//! as they're read, and an operator keyword flushes the buffer into an
//! `Operation` carrying its own operand list plus a monotonically increasing
//! instruction index (`spec.md` §4.1's requirement that later stages can
//! refer back to "the Nth operation" for diagnostics). Inline images (`BI
//! ... ID ... EI`) are captured whole as a single `Operation` with
//! `OpCode::BeginInlineImage` carrying the parsed dictionary and raw bytes,
//! grounded on the teacher's `OpCode` table (`core/content_stream.rs`) for
//! everything but inline-image scanning, which the teacher doesn't
//! implement — that part follows `pdfminer.pdfinterp.PDFContentParser`.

use crate::error::{InterpError, InterpResult};
use crate::lexer::{Lexer, Token};
use crate::object::Object;
use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[repr(u8)]
pub enum OpCode {
    SetLineWidth,
    SetLineCap,
    SetLineJoin,
    SetMiterLimit,
    SetDash,
    SetRenderingIntent,
    SetFlatness,
    SetGState,
    Save,
    Restore,
    Transform,

    MoveTo,
    LineTo,
    CurveTo,
    CurveTo2,
    CurveTo3,
    ClosePath,
    Rectangle,

    Stroke,
    CloseStroke,
    Fill,
    EOFill,
    FillStroke,
    EOFillStroke,
    CloseFillStroke,
    CloseEOFillStroke,
    EndPath,

    Clip,
    EOClip,

    BeginText,
    EndText,

    SetCharSpacing,
    SetWordSpacing,
    SetHScale,
    SetLeading,
    SetFont,
    SetTextRenderingMode,
    SetTextRise,

    MoveText,
    SetLeadingMoveText,
    SetTextMatrix,
    NextLine,

    ShowText,
    ShowSpacedText,
    NextLineShowText,
    NextLineSetSpacingShowText,

    SetCharWidth,
    SetCharWidthAndBounds,

    SetStrokeColorSpace,
    SetFillColorSpace,
    SetStrokeColor,
    SetStrokeColorN,
    SetFillColor,
    SetFillColorN,
    SetStrokeGray,
    SetFillGray,
    SetStrokeRGBColor,
    SetFillRGBColor,
    SetStrokeCMYKColor,
    SetFillCMYKColor,

    ShadingFill,

    BeginInlineImage,

    PaintXObject,

    MarkPoint,
    MarkPointProps,
    BeginMarkedContent,
    BeginMarkedContentProps,
    EndMarkedContent,

    BeginCompat,
    EndCompat,
}

impl OpCode {
    pub fn from_command(cmd: &str) -> Option<OpCode> {
        Some(match cmd {
            "w" => OpCode::SetLineWidth,
            "J" => OpCode::SetLineCap,
            "j" => OpCode::SetLineJoin,
            "M" => OpCode::SetMiterLimit,
            "d" => OpCode::SetDash,
            "ri" => OpCode::SetRenderingIntent,
            "i" => OpCode::SetFlatness,
            "gs" => OpCode::SetGState,
            "q" => OpCode::Save,
            "Q" => OpCode::Restore,
            "cm" => OpCode::Transform,

            "m" => OpCode::MoveTo,
            "l" => OpCode::LineTo,
            "c" => OpCode::CurveTo,
            "v" => OpCode::CurveTo2,
            "y" => OpCode::CurveTo3,
            "h" => OpCode::ClosePath,
            "re" => OpCode::Rectangle,

            "S" => OpCode::Stroke,
            "s" => OpCode::CloseStroke,
            // `F` is the obsolete synonym for `f`; pdfminer and the teacher
            // both unify them at dispatch time.
            "f" | "F" => OpCode::Fill,
            "f*" => OpCode::EOFill,
            "B" => OpCode::FillStroke,
            "B*" => OpCode::EOFillStroke,
            "b" => OpCode::CloseFillStroke,
            "b*" => OpCode::CloseEOFillStroke,
            "n" => OpCode::EndPath,

            "W" => OpCode::Clip,
            "W*" => OpCode::EOClip,

            "BT" => OpCode::BeginText,
            "ET" => OpCode::EndText,

            "Tc" => OpCode::SetCharSpacing,
            "Tw" => OpCode::SetWordSpacing,
            "Tz" => OpCode::SetHScale,
            "TL" => OpCode::SetLeading,
            "Tf" => OpCode::SetFont,
            "Tr" => OpCode::SetTextRenderingMode,
            "Ts" => OpCode::SetTextRise,

            "Td" => OpCode::MoveText,
            "TD" => OpCode::SetLeadingMoveText,
            "Tm" => OpCode::SetTextMatrix,
            "T*" => OpCode::NextLine,

            "Tj" => OpCode::ShowText,
            "TJ" => OpCode::ShowSpacedText,
            "'" => OpCode::NextLineShowText,
            "\"" => OpCode::NextLineSetSpacingShowText,

            "d0" => OpCode::SetCharWidth,
            "d1" => OpCode::SetCharWidthAndBounds,

            "CS" => OpCode::SetStrokeColorSpace,
            "cs" => OpCode::SetFillColorSpace,
            "SC" => OpCode::SetStrokeColor,
            "SCN" => OpCode::SetStrokeColorN,
            "sc" => OpCode::SetFillColor,
            "scn" => OpCode::SetFillColorN,
            "G" => OpCode::SetStrokeGray,
            "g" => OpCode::SetFillGray,
            "RG" => OpCode::SetStrokeRGBColor,
            "rg" => OpCode::SetFillRGBColor,
            "K" => OpCode::SetStrokeCMYKColor,
            "k" => OpCode::SetFillCMYKColor,

            "sh" => OpCode::ShadingFill,

            "BI" => OpCode::BeginInlineImage,

            "Do" => OpCode::PaintXObject,

            "MP" => OpCode::MarkPoint,
            "DP" => OpCode::MarkPointProps,
            "BMC" => OpCode::BeginMarkedContent,
            "BDC" => OpCode::BeginMarkedContentProps,
            "EMC" => OpCode::EndMarkedContent,

            "BX" => OpCode::BeginCompat,
            "EX" => OpCode::EndCompat,

            _ => return None,
        })
    }

    pub fn to_command(&self) -> &'static str {
        match self {
            OpCode::SetLineWidth => "w",
            OpCode::SetLineCap => "J",
            OpCode::SetLineJoin => "j",
            OpCode::SetMiterLimit => "M",
            OpCode::SetDash => "d",
            OpCode::SetRenderingIntent => "ri",
            OpCode::SetFlatness => "i",
            OpCode::SetGState => "gs",
            OpCode::Save => "q",
            OpCode::Restore => "Q",
            OpCode::Transform => "cm",
            OpCode::MoveTo => "m",
            OpCode::LineTo => "l",
            OpCode::CurveTo => "c",
            OpCode::CurveTo2 => "v",
            OpCode::CurveTo3 => "y",
            OpCode::ClosePath => "h",
            OpCode::Rectangle => "re",
            OpCode::Stroke => "S",
            OpCode::CloseStroke => "s",
            OpCode::Fill => "f",
            OpCode::EOFill => "f*",
            OpCode::FillStroke => "B",
            OpCode::EOFillStroke => "B*",
            OpCode::CloseFillStroke => "b",
            OpCode::CloseEOFillStroke => "b*",
            OpCode::EndPath => "n",
            OpCode::Clip => "W",
            OpCode::EOClip => "W*",
            OpCode::BeginText => "BT",
            OpCode::EndText => "ET",
            OpCode::SetCharSpacing => "Tc",
            OpCode::SetWordSpacing => "Tw",
            OpCode::SetHScale => "Tz",
            OpCode::SetLeading => "TL",
            OpCode::SetFont => "Tf",
            OpCode::SetTextRenderingMode => "Tr",
            OpCode::SetTextRise => "Ts",
            OpCode::MoveText => "Td",
            OpCode::SetLeadingMoveText => "TD",
            OpCode::SetTextMatrix => "Tm",
            OpCode::NextLine => "T*",
            OpCode::ShowText => "Tj",
            OpCode::ShowSpacedText => "TJ",
            OpCode::NextLineShowText => "'",
            OpCode::NextLineSetSpacingShowText => "\"",
            OpCode::SetCharWidth => "d0",
            OpCode::SetCharWidthAndBounds => "d1",
            OpCode::SetStrokeColorSpace => "CS",
            OpCode::SetFillColorSpace => "cs",
            OpCode::SetStrokeColor => "SC",
            OpCode::SetStrokeColorN => "SCN",
            OpCode::SetFillColor => "sc",
            OpCode::SetFillColorN => "scn",
            OpCode::SetStrokeGray => "G",
            OpCode::SetFillGray => "g",
            OpCode::SetStrokeRGBColor => "RG",
            OpCode::SetFillRGBColor => "rg",
            OpCode::SetStrokeCMYKColor => "K",
            OpCode::SetFillCMYKColor => "k",
            OpCode::ShadingFill => "sh",
            OpCode::BeginInlineImage => "BI",
            OpCode::PaintXObject => "Do",
            OpCode::MarkPoint => "MP",
            OpCode::MarkPointProps => "DP",
            OpCode::BeginMarkedContent => "BMC",
            OpCode::BeginMarkedContentProps => "BDC",
            OpCode::EndMarkedContent => "EMC",
            OpCode::BeginCompat => "BX",
            OpCode::EndCompat => "EX",
        }
    }

    /// Fixed operand counts the dispatcher uses for generic stack-underflow
    /// detection. `None` means variable arity (only `TJ`'s array operand and
    /// the marked-content operators, which take 1 or 2 depending on whether
    /// a properties operand is present).
    ///
    /// `'`/`"`/`TJ`/`Tj` are hard-coded exactly as pdfminer's `do_keyword`
    /// dispatch table has them — `"` takes 3 operands (aw, ac, string) even
    /// though semantically it performs the work of four single-argument
    /// operators in sequence.
    pub fn arity(&self) -> Option<usize> {
        use OpCode::*;
        Some(match self {
            Save | Restore | ClosePath | Stroke | CloseStroke | Fill | EOFill | FillStroke
            | EOFillStroke | CloseFillStroke | CloseEOFillStroke | EndPath | Clip | EOClip
            | BeginText | EndText | NextLine | BeginCompat | EndCompat | EndMarkedContent => 0,

            SetLineWidth | SetLineCap | SetLineJoin | SetMiterLimit | SetRenderingIntent
            | SetFlatness | SetGState | SetCharSpacing | SetWordSpacing | SetHScale
            | SetLeading | SetTextRenderingMode | SetTextRise | ShowText | NextLineShowText
            | SetStrokeColorSpace | SetFillColorSpace | SetStrokeGray | SetFillGray
            | ShadingFill | PaintXObject | MarkPoint | BeginMarkedContent | ShowSpacedText
            | BeginInlineImage => 1,

            MoveTo | LineTo | SetDash | SetFont | MoveText | SetLeadingMoveText | SetCharWidth
            | MarkPointProps | BeginMarkedContentProps => 2,

            SetStrokeRGBColor | SetFillRGBColor | NextLineSetSpacingShowText => 3,

            Rectangle | CurveTo2 | CurveTo3 | SetStrokeCMYKColor | SetFillCMYKColor => 4,

            CurveTo | Transform | SetTextMatrix | SetCharWidthAndBounds => 6,

            // Variable-arity color operators: the handler validates shape
            // itself instead of a fixed count.
            SetStrokeColor | SetStrokeColorN | SetFillColor | SetFillColorN => return None,
        })
    }
}

impl fmt::Display for OpCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_command())
    }
}

/// One parsed operator application: the operands that preceded it and its
/// position in the stream (for diagnostics).
#[derive(Debug, Clone)]
pub struct Operation {
    pub op: OpCode,
    pub args: SmallVec<[Object; 6]>,
    pub index: usize,
}

/// Combines the byte lexer with operand accumulation into a stream of
/// `Operation`s, including whole-object inline-image capture.
pub struct ContentStreamReader {
    lexer: Lexer,
    index: usize,
    strict: bool,
}

impl ContentStreamReader {
    pub fn new(streams: Vec<Vec<u8>>, strict: bool) -> Self {
        ContentStreamReader {
            lexer: Lexer::new(streams, strict),
            index: 0,
            strict,
        }
    }

    /// Reads the next operation, or `None` at end of stream. Unknown
    /// operators are surfaced as `InterpError::UnknownOperator` in strict
    /// mode and silently skipped (operands discarded) in lenient mode;
    /// malformed operands are recovered by the lexer itself (skip to next
    /// whitespace and resume), matching `spec.md` §7's described
    /// degradation.
    pub fn next_operation(&mut self) -> InterpResult<Option<Operation>> {
        let mut args: SmallVec<[Object; 6]> = SmallVec::new();
        loop {
            let token = self.lexer.next_token()?;
            match token {
                Token::Eof => return Ok(None),
                Token::Number(n) => args.push(Object::Number(n)),
                Token::String(s) | Token::HexString(s) => args.push(Object::String(s)),
                Token::Name(n) => args.push(Object::Name(n)),
                Token::Boolean(b) => args.push(Object::Boolean(b)),
                Token::Null => args.push(Object::Null),
                Token::ArrayStart => args.push(self.read_array()?),
                Token::DictStart => args.push(self.read_dict()?),
                Token::ArrayEnd | Token::DictEnd => {
                    return Err(InterpError::Parse(
                        "unbalanced array/dictionary close".into(),
                    ))
                }
                Token::Keyword(kw) if kw == "BI" => {
                    let op = self.read_inline_image()?;
                    self.index += 1;
                    return Ok(Some(op));
                }
                Token::Keyword(kw) => {
                    let Some(op) = OpCode::from_command(&kw) else {
                        if self.strict {
                            return Err(InterpError::UnknownOperator(kw));
                        }
                        args.clear();
                        continue;
                    };
                    let operation = Operation {
                        op,
                        args,
                        index: self.index,
                    };
                    self.index += 1;
                    return Ok(Some(operation));
                }
            }
        }
    }

    fn read_array(&mut self) -> InterpResult<Object> {
        let mut items: SmallVec<[Box<Object>; 4]> = SmallVec::new();
        loop {
            let token = self.lexer.next_token()?;
            match token {
                Token::ArrayEnd => return Ok(Object::Array(items)),
                Token::Eof => return Err(InterpError::Parse("unterminated array".into())),
                Token::Number(n) => items.push(Box::new(Object::Number(n))),
                Token::String(s) | Token::HexString(s) => items.push(Box::new(Object::String(s))),
                Token::Name(n) => items.push(Box::new(Object::Name(n))),
                Token::Boolean(b) => items.push(Box::new(Object::Boolean(b))),
                Token::Null => items.push(Box::new(Object::Null)),
                Token::ArrayStart => items.push(Box::new(self.read_array()?)),
                Token::DictStart => items.push(Box::new(self.read_dict()?)),
                Token::DictEnd => {
                    return Err(InterpError::Parse("unbalanced dictionary close in array".into()))
                }
                Token::Keyword(kw) => {
                    return Err(InterpError::Parse(format!(
                        "unexpected operator {kw:?} inside array"
                    )))
                }
            }
        }
    }

    fn read_dict(&mut self) -> InterpResult<Object> {
        let mut map = FxHashMap::default();
        loop {
            let key_token = self.lexer.next_token()?;
            let key = match key_token {
                Token::DictEnd => return Ok(Object::Dictionary(map)),
                Token::Name(n) => n,
                Token::Eof => return Err(InterpError::Parse("unterminated dictionary".into())),
                other => {
                    return Err(InterpError::Parse(format!(
                        "expected dictionary key, found {other:?}"
                    )))
                }
            };
            let value_token = self.lexer.next_token()?;
            let value = match value_token {
                Token::Number(n) => Object::Number(n),
                Token::String(s) | Token::HexString(s) => Object::String(s),
                Token::Name(n) => Object::Name(n),
                Token::Boolean(b) => Object::Boolean(b),
                Token::Null => Object::Null,
                Token::ArrayStart => self.read_array()?,
                Token::DictStart => self.read_dict()?,
                other => {
                    return Err(InterpError::Parse(format!(
                        "expected dictionary value, found {other:?}"
                    )))
                }
            };
            map.insert(key, value);
        }
    }

    /// Captures `BI <dict-pairs> ID <raw bytes> EI` as one operation.
    ///
    /// Grounded on `pdfminer.pdfinterp.PDFContentParser.get_inline_data`: the
    /// raw data starts one whitespace byte after the `ID` keyword and runs
    /// until a whitespace-preceded `EI` token (or, when the dictionary names
    /// an ASCII85 filter via `/F`, the `~>` EOD marker instead — ASCII85 data
    /// can itself contain the literal bytes "EI" as part of a 5-tuple). A
    /// single trailing EOL (CRLF, CR, or LF) immediately before the
    /// terminator is stripped, since it is the delimiter that separates data
    /// from keyword rather than part of the image.
    fn read_inline_image(&mut self) -> InterpResult<Operation> {
        let mut dict = FxHashMap::default();
        loop {
            let token = self.lexer.next_token()?;
            match token {
                Token::Keyword(kw) if kw == "ID" => break,
                Token::Eof => {
                    return Err(InterpError::Parse(
                        "unterminated inline image: missing ID".into(),
                    ))
                }
                Token::Name(key) => {
                    let value_token = self.lexer.next_token()?;
                    let value = match value_token {
                        Token::Number(n) => Object::Number(n),
                        Token::String(s) | Token::HexString(s) => Object::String(s),
                        Token::Name(n) => Object::Name(n),
                        Token::Boolean(b) => Object::Boolean(b),
                        Token::Null => Object::Null,
                        Token::ArrayStart => self.read_array()?,
                        Token::DictStart => self.read_dict()?,
                        other => {
                            return Err(InterpError::Type(format!(
                                "inline image dict: expected value for /{key}, found {other:?}"
                            )))
                        }
                    };
                    dict.insert(key, value);
                }
                other => {
                    return Err(InterpError::Parse(format!(
                        "inline image dict: expected /Name key or ID, found {other:?}"
                    )))
                }
            }
        }

        let uses_ascii85 = matches!(
            dict.get("F").or_else(|| dict.get("Filter")),
            Some(Object::Name(f)) if f == "A85" || f == "ASCII85Decode"
        ) || matches!(
            dict.get("F").or_else(|| dict.get("Filter")),
            Some(Object::Array(arr)) if arr.iter().any(|o| matches!(o.as_ref(), Object::Name(f) if f == "A85" || f == "ASCII85Decode"))
        );

        // One whitespace byte separates `ID` from the raw data.
        self.lexer_skip_one_ws_byte();

        let data = if uses_ascii85 {
            self.scan_until_ascii85_eod()?
        } else {
            self.scan_until_ei()?
        };

        Ok(Operation {
            op: OpCode::BeginInlineImage,
            args: SmallVec::new(),
            index: {
                let i = self.index;
                self.index += 1;
                i
            },
        }
        .with_inline_data(dict, data))
    }

    fn lexer_skip_one_ws_byte(&mut self) {
        self.lexer.skip_single_whitespace_byte();
    }

    fn scan_until_ei(&mut self) -> InterpResult<Vec<u8>> {
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.lexer.raw_next_byte() else {
                return Err(InterpError::Parse(
                    "unterminated inline image: missing EI".into(),
                ));
            };
            buf.push(b);
            if buf.len() >= 2 && buf[buf.len() - 2..] == *b"EI" {
                let before = if buf.len() >= 3 { buf[buf.len() - 3] } else { 0 };
                let is_boundary = before.is_ascii_whitespace() || buf.len() == 2;
                let next_ok = match self.lexer.raw_peek_byte() {
                    None => true,
                    Some(n) => n.is_ascii_whitespace() || n == b'Q' || n == b'q',
                };
                if is_boundary && next_ok {
                    buf.truncate(buf.len() - 2);
                    strip_trailing_eol(&mut buf);
                    return Ok(buf);
                }
            }
        }
    }

    fn scan_until_ascii85_eod(&mut self) -> InterpResult<Vec<u8>> {
        let mut buf = Vec::new();
        loop {
            let Some(b) = self.lexer.raw_next_byte() else {
                return Err(InterpError::Parse(
                    "unterminated inline image: missing ~> EOD".into(),
                ));
            };
            buf.push(b);
            if buf.len() >= 2 && buf[buf.len() - 2..] == *b"~>" {
                // consume the trailing EI keyword that follows the EOD marker
                self.skip_whitespace_then_keyword("EI")?;
                return Ok(buf);
            }
        }
    }

    fn skip_whitespace_then_keyword(&mut self, expected: &str) -> InterpResult<()> {
        loop {
            match self.lexer.raw_peek_byte() {
                Some(b) if b.is_ascii_whitespace() => {
                    self.lexer.raw_next_byte();
                }
                _ => break,
            }
        }
        let token = self.lexer.next_token()?;
        match token {
            Token::Keyword(kw) if kw == expected => Ok(()),
            other => Err(InterpError::Parse(format!(
                "expected {expected:?} after inline image data, found {other:?}"
            ))),
        }
    }
}

fn strip_trailing_eol(buf: &mut Vec<u8>) {
    if buf.ends_with(b"\r\n") {
        buf.truncate(buf.len() - 2);
    } else if buf.ends_with(b"\r") || buf.ends_with(b"\n") {
        buf.truncate(buf.len() - 1);
    }
}

impl Operation {
    fn with_inline_data(mut self, dict: FxHashMap<String, Object>, data: Vec<u8>) -> Operation {
        self.args = SmallVec::from_vec(vec![Object::Stream { dict, data }]);
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ops(src: &str) -> Vec<Operation> {
        let mut r = ContentStreamReader::new(vec![src.as_bytes().to_vec()], true);
        let mut out = Vec::new();
        while let Some(op) = r.next_operation().unwrap() {
            out.push(op);
        }
        out
    }

    #[test]
    fn simple_path_and_paint() {
        let parsed = ops("1 0 0 RG 10 10 100 100 re f");
        assert_eq!(parsed.len(), 2);
        assert_eq!(parsed[0].op, OpCode::SetStrokeRGBColor);
        assert_eq!(parsed[0].args.len(), 3);
        assert_eq!(parsed[1].op, OpCode::Rectangle);
        assert_eq!(parsed[1].index, 1);
    }

    #[test]
    fn show_text_string_operand() {
        let parsed = ops("(Hello) Tj");
        assert_eq!(parsed[0].op, OpCode::ShowText);
        assert_eq!(parsed[0].args[0], Object::String(b"Hello".to_vec()));
    }

    #[test]
    fn spaced_text_array_operand() {
        let parsed = ops("[(A) -250 (B)] TJ");
        assert_eq!(parsed[0].op, OpCode::ShowSpacedText);
        assert!(matches!(parsed[0].args[0], Object::Array(_)));
    }

    #[test]
    fn unknown_operator_lenient_mode_skipped() {
        let mut r = ContentStreamReader::new(vec![b"1 2 ZZ q".to_vec()], false);
        let first = r.next_operation().unwrap().unwrap();
        assert_eq!(first.op, OpCode::Save);
        assert!(first.args.is_empty());
    }

    #[test]
    fn unknown_operator_strict_mode_errors() {
        let mut r = ContentStreamReader::new(vec![b"1 2 ZZ".to_vec()], true);
        assert!(r.next_operation().is_err());
    }

    #[test]
    fn inline_image_capture() {
        let parsed = ops("BI /W 1 /H 1 /BPC 8 /CS /G ID \x00 EI");
        assert_eq!(parsed.len(), 1);
        assert_eq!(parsed[0].op, OpCode::BeginInlineImage);
        match &parsed[0].args[0] {
            Object::Stream { dict, data } => {
                assert_eq!(dict.get("W"), Some(&Object::Number(1.0)));
                assert_eq!(data, b"\x00");
            }
            other => panic!("expected Stream operand, got {other:?}"),
        }
    }
}
