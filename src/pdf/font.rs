//! Embedded TrueType fonts, glyph encoding and text metrics.
//!
//! Text is drawn with DejaVu Sans as Type0 fonts with `Identity-H` encoding:
//! every character becomes its two-byte glyph id, so any script the font
//! covers prints as written.

use std::collections::{BTreeMap, BTreeSet};

use ttf_parser::{Face, GlyphId};

use crate::core::InvoiceError;

const REGULAR_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans.ttf");
const BOLD_DATA: &[u8] = include_bytes!("../../assets/fonts/DejaVuSans-Bold.ttf");

/// The two faces used on an invoice.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum Font {
    Regular,
    Bold,
}

impl Font {
    pub const ALL: [Font; 2] = [Font::Regular, Font::Bold];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Self::Regular => "F1",
            Self::Bold => "F2",
        }
    }

    /// PostScript name written as `BaseFont`.
    pub fn base_font(self) -> &'static str {
        match self {
            Self::Regular => "DejaVuSans",
            Self::Bold => "DejaVuSans-Bold",
        }
    }

    /// The TrueType program embedded for this face.
    pub fn data(self) -> &'static [u8] {
        match self {
            Self::Regular => REGULAR_DATA,
            Self::Bold => BOLD_DATA,
        }
    }
}

/// Characters drawn per font, collected while laying out pages.
pub type GlyphUsage = BTreeMap<Font, BTreeSet<char>>;

/// A parsed font face.
pub struct FontFace {
    font: Font,
    face: Face<'static>,
    /// Font units to 1/1000 em.
    scale: f32,
}

impl std::fmt::Debug for FontFace {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FontFace").field("font", &self.font).finish()
    }
}

impl FontFace {
    pub fn load(font: Font) -> Result<Self, InvoiceError> {
        let face = Face::parse(font.data(), 0).map_err(|e| {
            InvoiceError::Pdf(format!("failed to parse font {}: {e}", font.base_font()))
        })?;
        let scale = 1000.0 / f32::from(face.units_per_em().max(1));
        Ok(Self { font, face, scale })
    }

    pub fn font(&self) -> Font {
        self.font
    }

    /// Glyph id for `c`, or `None` when the font has no glyph for it.
    pub fn glyph(&self, c: char) -> Option<u16> {
        self.face.glyph_index(c).map(|id| id.0)
    }

    /// Advance width of a glyph in 1/1000 em.
    pub fn advance(&self, glyph: u16) -> u32 {
        let units = self.face.glyph_hor_advance(GlyphId(glyph)).unwrap_or(0);
        (f32::from(units) * self.scale).round() as u32
    }

    /// Width of `text` in points at `size`.
    pub fn text_width(&self, text: &str, size: f32) -> f32 {
        let units: u32 = text
            .chars()
            .map(|c| self.advance(self.glyph(c).unwrap_or(0)))
            .sum();
        units as f32 * size / 1000.0
    }

    /// Encode `text` as big-endian two-byte glyph ids.
    ///
    /// Characters the font cannot draw are logged and drawn as the
    /// `.notdef` glyph.
    pub fn encode(&self, text: &str) -> Vec<u8> {
        let mut bytes = Vec::with_capacity(text.len() * 2);
        for c in text.chars() {
            let glyph = self.glyph(c).unwrap_or_else(|| {
                log::warn!(
                    "{} has no glyph for {c:?} (U+{:04X})",
                    self.font.base_font(),
                    u32::from(c)
                );
                0
            });
            bytes.extend_from_slice(&glyph.to_be_bytes());
        }
        bytes
    }

    /// Font-wide metrics in 1/1000 em: ascent, descent, cap height, bbox.
    pub fn metrics(&self) -> FontMetrics {
        let scaled = |v: i16| (f32::from(v) * self.scale).round() as i64;
        let bbox = self.face.global_bounding_box();
        FontMetrics {
            ascent: scaled(self.face.ascender()),
            descent: scaled(self.face.descender()),
            cap_height: scaled(self.face.capital_height().unwrap_or(self.face.ascender())),
            bbox: [
                scaled(bbox.x_min),
                scaled(bbox.y_min),
                scaled(bbox.x_max),
                scaled(bbox.y_max),
            ],
        }
    }
}

/// Values for the PDF font descriptor.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FontMetrics {
    pub ascent: i64,
    pub descent: i64,
    pub cap_height: i64,
    pub bbox: [i64; 4],
}

/// Both faces, parsed once per render.
#[derive(Debug)]
pub struct FontSet {
    regular: FontFace,
    bold: FontFace,
}

impl FontSet {
    pub fn load() -> Result<Self, InvoiceError> {
        Ok(Self {
            regular: FontFace::load(Font::Regular)?,
            bold: FontFace::load(Font::Bold)?,
        })
    }

    pub fn get(&self, font: Font) -> &FontFace {
        match font {
            Font::Regular => &self.regular,
            Font::Bold => &self.bold,
        }
    }
}

/// Break `text` into lines no wider than `max_width` points.
///
/// Breaks only at ASCII spaces so no-break spaces stay intact. Words wider
/// than the line are kept whole on their own line.
pub fn wrap(text: &str, face: &FontFace, size: f32, max_width: f32) -> Vec<String> {
    let mut lines = Vec::new();
    for paragraph in text.lines() {
        let mut current = String::new();
        for word in paragraph.split(' ').filter(|w| !w.is_empty()) {
            let candidate = if current.is_empty() {
                word.to_string()
            } else {
                format!("{current} {word}")
            };
            if current.is_empty() || face.text_width(&candidate, size) <= max_width {
                current = candidate;
            } else {
                lines.push(std::mem::replace(&mut current, word.to_string()));
            }
        }
        lines.push(current);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn covers_names_beyond_latin1() {
        let fonts = FontSet::load().unwrap();
        for font in Font::ALL {
            let face = fonts.get(font);
            for c in "Odalović Łódź Grüße € • 12\u{a0}345".chars() {
                assert!(face.glyph(c).is_some(), "{font:?} lacks {c:?}");
            }
        }
    }

    #[test]
    fn encodes_two_bytes_per_char() {
        let fonts = FontSet::load().unwrap();
        let face = fonts.get(Font::Regular);
        let bytes = face.encode("ić");
        assert_eq!(bytes.len(), 4);
        let first = u16::from_be_bytes([bytes[0], bytes[1]]);
        assert_eq!(Some(first), face.glyph('i'));
        // no CJK coverage: falls back to .notdef
        assert_eq!(face.glyph('中'), None);
        assert_eq!(face.encode("中"), vec![0, 0]);
    }

    #[test]
    fn widths() {
        let fonts = FontSet::load().unwrap();
        let regular = fonts.get(Font::Regular);
        let bold = fonts.get(Font::Bold);
        assert!(regular.text_width("0", 10.0) > 0.0);
        assert!(
            (regular.text_width("00", 10.0) - 2.0 * regular.text_width("0", 10.0)).abs() < 1e-4
        );
        assert!(bold.text_width("Total", 12.0) > regular.text_width("Total", 12.0));
    }

    #[test]
    fn wraps_on_words() {
        let fonts = FontSet::load().unwrap();
        let face = fonts.get(Font::Regular);
        let lines = wrap("one two three four", face, 10.0, 40.0);
        assert!(lines.len() > 1);
        assert!(
            lines
                .iter()
                .all(|l| face.text_width(l, 10.0) <= 40.0 || !l.contains(' '))
        );
        assert_eq!(lines.join(" "), "one two three four");
    }

    #[test]
    fn empty_text_is_one_empty_line() {
        let fonts = FontSet::load().unwrap();
        assert_eq!(
            wrap("", fonts.get(Font::Regular), 10.0, 100.0),
            vec![String::new()]
        );
    }
}
