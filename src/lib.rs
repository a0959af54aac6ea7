//! A PDF content-stream interpreter.
//!
//! Tokenizes and executes the page-description operators of the PDF
//! content-stream mini-language (text, path, color, and XObject
//! operators), driving a caller-supplied [`Device`] sink. Does not parse
//! PDF file structure, decompress streams, or rasterize; callers hand in
//! already-decoded content-stream bytes and a resolved resource
//! dictionary (see `SPEC_FULL.md` for the full module breakdown).
//!
//! ```no_run
//! use pdf_content_interp::{
//!     DefaultResourceManager, Device, Interpreter, InterpreterConfig, Page, Rect,
//!     RecordingDevice, ResourceManagerConfig,
//! };
//! use rustc_hash::FxHashMap;
//!
//! let page = Page {
//!     index: 0,
//!     mediabox: Rect { x0: 0.0, y0: 0.0, x1: 612.0, y1: 792.0 },
//!     rotate: 0,
//!     resources: FxHashMap::default(),
//!     contents: vec![b"1 0 0 1 72 720 cm".to_vec()],
//! };
//! let rm = DefaultResourceManager::new(ResourceManagerConfig::default());
//! let mut device = RecordingDevice::default();
//! Interpreter::process_page(&page, &mut device, &rm, InterpreterConfig::default()).unwrap();
//! ```

pub mod cmap;
pub mod color;
pub mod content_stream;
pub mod device;
pub mod error;
pub mod font;
pub mod graphics_state;
pub mod interpreter;
pub mod lexer;
pub mod matrix;
pub mod object;
pub mod page;
pub mod path;
pub mod resources;
pub mod text_state;

pub use cmap::CMap;
pub use color::{Color, ColorSpace};
pub use content_stream::{ContentStreamReader, OpCode, Operation};
pub use device::{Device, PageHandle, Rect, RecordingDevice, TextSeq, TextSeqItem};
pub use error::{InterpError, InterpResult};
pub use font::{Font, FontRef, FontType, Glyph};
pub use graphics_state::{GraphicState, LineCap, LineJoin};
pub use interpreter::{Interpreter, InterpreterConfig};
pub use lexer::{Lexer, MultiStreamCursor, Token};
pub use matrix::Matrix;
pub use object::Object;
pub use page::{initial_ctm, Page};
pub use path::{PathBuilder, PathSegment};
pub use resources::{
    DefaultResourceManager, ObjId, ResourceBinder, ResourceManager, ResourceManagerConfig,
    SimpleFont,
};
pub use text_state::TextState;
