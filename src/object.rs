//! Operand objects produced by the tokenizer.
//!
//! Content streams carry a strict subset of PDF's object model: numbers,
//! names, strings, arrays, dictionaries, booleans, null, and — uniquely to
//! content streams — bare operator keywords and the inline-image `Stream`
//! object built by `BI ... ID ... EI`. Indirect references never appear
//! inside a content stream (they are resolved by the upstream PDF object
//! parser before a page's bytes ever reach this crate), so unlike the
//! teacher's general-purpose `PDFObject` this type carries no `Ref` variant.

use rustc_hash::FxHashMap;
use smallvec::SmallVec;
use std::fmt;

/// A content-stream operand or bare keyword.
#[derive(Debug, Clone, PartialEq)]
pub enum Object {
    Null,
    Boolean(bool),
    /// Integers and reals are not distinguished once parsed; operators that
    /// care (none in this spec) can inspect the source text themselves.
    Number(f64),
    /// Literal `(...)` or hex `<...>` string, already unescaped/undecoded.
    String(Vec<u8>),
    /// `/Name`, already hex-unescaped.
    Name(String),
    Array(SmallVec<[Box<Object>; 4]>),
    Dictionary(FxHashMap<String, Object>),
    /// The dictionary + raw bytes captured between `BI`'s operand list and
    /// the `ID ... EI`/`ID ... ~>` terminator.
    Stream {
        dict: FxHashMap<String, Object>,
        data: Vec<u8>,
    },
    /// A bare operator keyword (`q`, `Tj`, `BT`, ...). Only ever produced by
    /// the lexer when it lands on a token that pattern-matches no operand
    /// syntax; the tokenizer is responsible for converting recognized
    /// keywords into `OpCode`s and erroring (or skipping, in lenient mode)
    /// otherwise.
    Operator(String),
}

impl Object {
    pub fn as_number(&self) -> Option<f64> {
        match self {
            Object::Number(n) => Some(*n),
            _ => None,
        }
    }

    pub fn as_name(&self) -> Option<&str> {
        match self {
            Object::Name(n) => Some(n),
            _ => None,
        }
    }

    pub fn as_string_bytes(&self) -> Option<&[u8]> {
        match self {
            Object::String(b) => Some(b),
            _ => None,
        }
    }

    pub fn as_array(&self) -> Option<&[Box<Object>]> {
        match self {
            Object::Array(a) => Some(a),
            _ => None,
        }
    }

    pub fn as_dictionary(&self) -> Option<&FxHashMap<String, Object>> {
        match self {
            Object::Dictionary(d) => Some(d),
            Object::Stream { dict, .. } => Some(dict),
            _ => None,
        }
    }

    pub fn is_operator(&self) -> bool {
        matches!(self, Object::Operator(_))
    }
}

impl fmt::Display for Object {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Object::Null => write!(f, "null"),
            Object::Boolean(b) => write!(f, "{b}"),
            Object::Number(n) => write!(f, "{n}"),
            Object::String(s) => write!(f, "({})", String::from_utf8_lossy(s)),
            Object::Name(n) => write!(f, "/{n}"),
            Object::Array(a) => {
                write!(f, "[")?;
                for (i, o) in a.iter().enumerate() {
                    if i > 0 {
                        write!(f, " ")?;
                    }
                    write!(f, "{o}")?;
                }
                write!(f, "]")
            }
            Object::Dictionary(_) => write!(f, "<<dict>>"),
            Object::Stream { data, .. } => write!(f, "<<stream:{} bytes>>", data.len()),
            Object::Operator(op) => write!(f, "{op}"),
        }
    }
}
