//! Error types for content-stream interpretation.
//!
//! Mirrors the error kinds enumerated in the interpreter's error-handling
//! design: parse errors, stack underflow, unknown operators, missing
//! resources, font errors, and type errors. See `Interpreter::strict` for
//! how these are turned into either hard failures or logged, lenient
//! degradations.

use thiserror::Error;

/// Errors raised while tokenizing or interpreting a content stream.
#[derive(Debug, Error, Clone)]
pub enum InterpError {
    /// The tokenizer could not decode an operand at the current position.
    #[error("parse error: {0}")]
    Parse(String),

    /// An operator needed more operands than were on the argument stack.
    #[error("stack underflow: operator {op:?} needs {needed} operand(s), found {found}")]
    StackUnderflow {
        op: String,
        needed: usize,
        found: usize,
    },

    /// An operator keyword has no registered handler.
    #[error("unknown operator: {0:?}")]
    UnknownOperator(String),

    /// A font, color space, or XObject name could not be resolved.
    #[error("resource error: {0}")]
    Resource(String),

    /// A font dictionary could not be turned into a usable font.
    #[error("font error: {0}")]
    Font(String),

    /// A CMap resource could not be found.
    #[error("cmap not found: {0}")]
    CMapNotFound(String),

    /// An operand had an unexpected shape (e.g. an odd-length inline-image
    /// dictionary, or a non-numeric matrix component).
    #[error("type error: {0}")]
    Type(String),
}

pub type InterpResult<T> = Result<T, InterpError>;
