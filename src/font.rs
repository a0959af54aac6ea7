//! The font contract the interpreter needs, with font-program parsing and
//! glyph rendering left to the host. Font programs, embedded CFF/TrueType
//! data, and encoding tables are out of scope for this crate (per `spec.md`'s
//! Non-goals); this module only defines what `Tj`/`TJ`/`'`/`"` need to turn a
//! show-text string into positioned glyph codes.
//!
//! Grounded on the teacher's `core::font::{FontType, FontDict}` for the type
//! taxonomy, trimmed to the subset the interpreter itself consults (CID vs.
//! simple fonts change how a show-text string is chunked into codes).

use std::fmt;
use std::sync::Arc;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FontType {
    Type1,
    Type1C,
    TrueType,
    Type3,
    CIDFontType0,
    CIDFontType2,
    Unknown,
}

impl FontType {
    pub fn from_subtype(subtype: &str) -> Self {
        match subtype {
            "Type1" | "MMType1" => FontType::Type1,
            "Type1C" => FontType::Type1C,
            "TrueType" => FontType::TrueType,
            "Type3" => FontType::Type3,
            "CIDFontType0" => FontType::CIDFontType0,
            "CIDFontType2" => FontType::CIDFontType2,
            _ => FontType::Unknown,
        }
    }

    pub fn is_cid_font(&self) -> bool {
        matches!(self, FontType::CIDFontType0 | FontType::CIDFontType2)
    }
}

/// One decoded character code with its glyph displacement, in text-space
/// units (1/1000 em, matching PDF's `/Widths` convention).
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Glyph {
    pub code: u32,
    pub width: f64,
    pub is_space: bool,
}

/// What the interpreter needs from a bound font resource. Implementations
/// live on the host side (decoding embedded font programs, consulting
/// `/Widths`/`/W`, applying `/Encoding`) — this crate only calls through the
/// trait while walking a show-text string.
pub trait Font: fmt::Debug + Send + Sync {
    fn font_type(&self) -> FontType;

    /// Splits a show-text string into glyph codes, one or two bytes at a
    /// time depending on whether this is a CID font, and looks up each
    /// glyph's width and single-byte-0x20 "is this a word-space" status.
    fn decode_string(&self, bytes: &[u8]) -> Vec<Glyph>;

    /// For Type3 fonts only: the font-matrix mapping glyph space to text
    /// space. `None` for all other font types (identity is assumed).
    fn type3_matrix(&self) -> Option<crate::matrix::Matrix> {
        None
    }
}

pub type FontRef = Arc<dyn Font>;

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Debug)]
    struct StubFont;

    impl Font for StubFont {
        fn font_type(&self) -> FontType {
            FontType::Type1
        }

        fn decode_string(&self, bytes: &[u8]) -> Vec<Glyph> {
            bytes
                .iter()
                .map(|&b| Glyph {
                    code: b as u32,
                    width: 500.0,
                    is_space: b == b' ',
                })
                .collect()
        }
    }

    #[test]
    fn cid_font_type_detection() {
        assert!(FontType::CIDFontType0.is_cid_font());
        assert!(!FontType::TrueType.is_cid_font());
    }

    #[test]
    fn mmtype1_resolves_to_type1() {
        assert_eq!(FontType::from_subtype("MMType1"), FontType::Type1);
    }

    #[test]
    fn stub_font_decodes_one_byte_per_glyph() {
        let font: FontRef = Arc::new(StubFont);
        let glyphs = font.decode_string(b"Hi ");
        assert_eq!(glyphs.len(), 3);
        assert!(glyphs[2].is_space);
    }
}
