//! Glyph advance widths used to wrap PDF text.
//!
//! The built-in faces are measured with the Helvetica and Helvetica-Bold
//! AFM widths for the Windows-1252 repertoire. Embedded TrueType fonts are
//! measured from their `hmtx` table.

use std::path::{Path, PathBuf};

use owned_ttf_parser::{AsFaceRef, GlyphId, OwnedFace};

use super::pdf_renderer::TextStyle;
use crate::ports::ExportError;

/// Advance assumed for characters a font has no width for, in em.
const UNKNOWN_GLYPH_EM: f32 = 1.0;

/// Helvetica widths for `' '..='~'`, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_ASCII: [u16; 95] = [
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    278, 278, 584, 584, 584, 556, 1015,
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    278, 278, 278, 469, 556, 333,
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    334, 260, 334, 584,
];

/// Helvetica-Bold widths for `' '..='~'`, in 1/1000 em.
#[rustfmt::skip]
const HELVETICA_BOLD_ASCII: [u16; 95] = [
    278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    333, 333, 584, 584, 584, 611, 975,
    722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    333, 278, 333, 584, 556, 333,
    556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
    611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
    389, 280, 389, 584,
];

/// Widths of the non-ASCII Windows-1252 characters as (regular, bold).
fn helvetica_extended(c: char) -> Option<(u16, u16)> {
    let widths = match c {
        '\u{A0}' | '·' => (278, 278),
        '¡' | '¨' | '\u{AD}' | '¯' | '²' | '³' | '´' | '¸' | '¹' => (333, 333),
        '¢' | '£' | '¤' | '¥' | '§' | '«' | '»' => (556, 556),
        '¦' => (260, 280),
        '©' | '®' => (737, 737),
        'ª' => (370, 370),
        'º' => (365, 365),
        '¬' | '±' | '×' | '÷' => (584, 584),
        '°' => (400, 400),
        'µ' => (556, 611),
        '¶' => (537, 556),
        '¼' | '½' | '¾' => (834, 834),
        '¿' | 'ß' | 'ø' => (611, 611),
        'À'..='Å' => (667, 722),
        'Æ' | 'Œ' => (1000, 1000),
        'Ç' | 'Ð' | 'Ñ' | 'Ù'..='Ü' => (722, 722),
        'È'..='Ë' | 'Ý' | 'Þ' | 'Š' | 'Ÿ' => (667, 667),
        'Ì'..='Ï' => (278, 278),
        'Ò'..='Ö' | 'Ø' => (778, 778),
        'à'..='å' | 'è'..='ë' => (556, 556),
        'æ' => (889, 889),
        'ç' | 'ý' | 'ÿ' | 'š' => (500, 556),
        'ì'..='ï' => (278, 278),
        'ð' | 'ñ' | 'ò'..='ö' | 'ù'..='ü' | 'þ' => (556, 611),
        '€' | 'ƒ' | '†' | '‡' | '–' => (556, 556),
        '‚' | '‘' | '’' => (222, 278),
        '„' | '“' | '”' => (333, 500),
        '…' | '‰' | '—' | '™' => (1000, 1000),
        'ˆ' | '‹' | '›' | '˜' => (333, 333),
        'Ž' => (611, 611),
        '•' => (350, 350),
        'œ' => (944, 944),
        'ž' => (500, 500),
        _ => return None,
    };
    Some(widths)
}

fn helvetica_em(c: char, bold: bool) -> f32 {
    let units = match c {
        ' '..='~' => {
            let table = if bold { &HELVETICA_BOLD_ASCII } else { &HELVETICA_ASCII };
            table[c as usize - 0x20]
        }
        _ => match helvetica_extended(c) {
            Some((regular, bold_width)) => {
                if bold {
                    bold_width
                } else {
                    regular
                }
            }
            None => return UNKNOWN_GLYPH_EM,
        },
    };
    f32::from(units) / 1000.0
}

/// A TrueType font read from disk. The same bytes are measured and embedded.
#[derive(Debug)]
pub struct LoadedFont {
    path: PathBuf,
    face: OwnedFace,
}

impl LoadedFont {
    pub fn load(path: &Path) -> Result<Self, ExportError> {
        let unavailable =
            |reason: String| ExportError::font_unavailable(format!("{}: {}", path.display(), reason));

        let data = std::fs::read(path).map_err(|e| unavailable(e.to_string()))?;
        let face = OwnedFace::from_vec(data, 0).map_err(|e| unavailable(e.to_string()))?;

        Ok(Self {
            path: path.to_path_buf(),
            face,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Raw font file.
    pub fn bytes(&self) -> &[u8] {
        self.face.as_slice()
    }

    /// Horizontal advance of `c` in em. Unmapped characters use the
    /// `.notdef` glyph, which is what the viewer draws for them.
    fn advance_em(&self, c: char) -> f32 {
        let face = self.face.as_face_ref();
        let units_per_em = f32::from(face.units_per_em().max(1));

        let glyph = face.glyph_index(c).unwrap_or(GlyphId(0));
        face.glyph_hor_advance(glyph)
            .map(|advance| f32::from(advance) / units_per_em)
            .unwrap_or(UNKNOWN_GLYPH_EM)
    }
}

/// Source of glyph widths for the fonts a PDF is drawn with.
#[derive(Debug, Clone, Copy)]
pub enum FontMetrics<'a> {
    /// Built-in Helvetica and Helvetica-Bold.
    Helvetica,
    /// Embedded TrueType faces.
    Embedded {
        regular: &'a LoadedFont,
        bold: &'a LoadedFont,
    },
}

impl FontMetrics<'_> {
    /// Advance of one character in points.
    pub fn char_width(&self, c: char, style: TextStyle) -> f32 {
        let em = match self {
            FontMetrics::Helvetica => helvetica_em(c, style.is_bold()),
            FontMetrics::Embedded { regular, bold } => {
                let font = if style.is_bold() { bold } else { regular };
                font.advance_em(c)
            }
        };
        em * style.font_size()
    }

    /// Width of `text` in points.
    pub fn text_width(&self, text: &str, style: TextStyle) -> f32 {
        text.chars().map(|c| self.char_width(c, style)).sum()
    }
}

// ════════════════════════════════════════════════════════════════════════════════
// Tests
// ════════════════════════════════════════════════════════════════════════════════
