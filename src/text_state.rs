//! Text object state: font, sizing, spacing, and the text/line matrices.
//!
//! Split out of the teacher's single `GraphicsState` per `spec.md` §3's
//! strict `GraphicState`/`TextState` separation; `matrix` and `line_matrix`
//! are reset to identity/origin by `BT`, exactly like pdfminer's
//! `PDFTextState.reset`.

use crate::font::FontRef;
use crate::matrix::Matrix;

#[derive(Debug, Clone)]
pub struct TextState {
    pub font: Option<FontRef>,
    pub font_size: f64,
    pub char_space: f64,
    pub word_space: f64,
    pub scaling: f64,
    pub leading: f64,
    pub render_mode: i32,
    pub rise: f64,
    pub matrix: Matrix,
    pub line_matrix: (f64, f64),
}

impl Default for TextState {
    fn default() -> Self {
        TextState {
            font: None,
            font_size: 0.0,
            char_space: 0.0,
            word_space: 0.0,
            scaling: 100.0,
            leading: 0.0,
            render_mode: 0,
            rise: 0.0,
            matrix: Matrix::IDENTITY,
            line_matrix: (0.0, 0.0),
        }
    }
}

impl TextState {
    /// Resets the text/line matrices to identity/origin, as `BT` does. Font,
    /// sizing, and spacing persist across text objects.
    pub fn begin_text_object(&mut self) {
        self.matrix = Matrix::IDENTITY;
        self.line_matrix = (0.0, 0.0);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn defaults_match_pdf_initial_values() {
        let ts = TextState::default();
        assert_eq!(ts.scaling, 100.0);
        assert_eq!(ts.render_mode, 0);
        assert_eq!(ts.matrix, Matrix::IDENTITY);
    }

    #[test]
    fn begin_text_object_resets_matrices_only() {
        let mut ts = TextState::default();
        ts.font_size = 12.0;
        ts.matrix = Matrix::translation(5.0, 5.0);
        ts.line_matrix = (1.0, 1.0);
        ts.begin_text_object();
        assert_eq!(ts.matrix, Matrix::IDENTITY);
        assert_eq!(ts.line_matrix, (0.0, 0.0));
        assert_eq!(ts.font_size, 12.0);
    }
}
