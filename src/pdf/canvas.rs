use lopdf::content::{Content, Operation};
use lopdf::{Object, StringFormat};

use super::font::{Font, FontSet, GlyphUsage};
use crate::core::InvoiceError;

/// RGB color with components in 0.0..=1.0.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Color(pub f32, pub f32, pub f32);

impl Color {
    pub const BLACK: Self = Self(0.0, 0.0, 0.0);

    pub fn rgb8(r: u8, g: u8, b: u8) -> Self {
        Self(f32::from(r) / 255.0, f32::from(g) / 255.0, f32::from(b) / 255.0)
    }

    fn operands(self) -> Vec<Object> {
        vec![Object::Real(self.0), Object::Real(self.1), Object::Real(self.2)]
    }
}

/// A run of text pieces drawn left to right from one starting point, each
/// piece in its own font.
pub type Spans<'a> = &'a [(Font, &'a str)];

/// One page content stream plus the characters it draws.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageContent {
    pub content: Vec<u8>,
    pub usage: GlyphUsage,
}

/// Collects drawing operations for one page.
#[derive(Debug)]
pub struct Canvas<'f> {
    fonts: &'f FontSet,
    operations: Vec<Operation>,
    usage: GlyphUsage,
}

impl<'f> Canvas<'f> {
    pub fn new(fonts: &'f FontSet) -> Self {
        Self {
            fonts,
            operations: Vec::new(),
            usage: GlyphUsage::new(),
        }
    }

    fn op(&mut self, operator: &str, operands: Vec<Object>) {
        self.operations.push(Operation::new(operator, operands));
    }

    fn set_font(&mut self, font: Font, size: f32) {
        self.op(
            "Tf",
            vec![
                Object::Name(font.resource_name().as_bytes().to_vec()),
                Object::Real(size),
            ],
        );
    }

    fn show(&mut self, font: Font, text: &str) {
        self.usage.entry(font).or_default().extend(text.chars());
        let glyphs = self.fonts.get(font).encode(text);
        self.op(
            "Tj",
            vec![Object::String(glyphs, StringFormat::Hexadecimal)],
        );
    }

    /// Draw one line of text with its baseline starting at (x, y).
    pub fn text(&mut self, x: f32, y: f32, font: Font, size: f32, text: &str) {
        self.spans(x, y, size, &[(font, text)]);
    }

    /// Draw one line of text ending at `right`.
    pub fn text_right(&mut self, right: f32, y: f32, font: Font, size: f32, text: &str) {
        let x = right - self.fonts.get(font).text_width(text, size);
        self.text(x, y, font, size, text);
    }

    /// Draw text pieces on one line; each piece continues where the previous
    /// one ended.
    pub fn spans(&mut self, x: f32, y: f32, size: f32, spans: Spans<'_>) {
        self.op("BT", vec![]);
        self.op("Td", vec![Object::Real(x), Object::Real(y)]);
        for (font, text) in spans {
            self.set_font(*font, size);
            self.show(*font, text);
        }
        self.op("ET", vec![]);
    }

    /// Draw consecutive lines starting at (x, y), moving down by `leading`.
    /// Each line is a list of spans; an empty list leaves a blank line.
    /// Returns the baseline below the last line.
    pub fn lines(
        &mut self,
        x: f32,
        y: f32,
        size: f32,
        leading: f32,
        lines: &[Vec<(Font, &str)>],
    ) -> f32 {
        self.op("BT", vec![]);
        self.op("TL", vec![Object::Real(leading)]);
        self.op("Td", vec![Object::Real(x), Object::Real(y)]);
        for (i, line) in lines.iter().enumerate() {
            if i > 0 {
                self.op("T*", vec![]);
            }
            for (font, text) in line {
                self.set_font(*font, size);
                self.show(*font, text);
            }
        }
        self.op("ET", vec![]);
        y - leading * lines.len() as f32
    }

    /// Stroke a rectangle with its lower-left corner at (x, y).
    pub fn stroke_rect(&mut self, x: f32, y: f32, width: f32, height: f32) {
        self.op("re", rect(x, y, width, height));
        self.op("S", vec![]);
    }

    /// Fill a rectangle, restoring the fill color afterwards.
    pub fn fill_rect(&mut self, x: f32, y: f32, width: f32, height: f32, color: Color) {
        self.op("q", vec![]);
        self.op("rg", color.operands());
        self.op("re", rect(x, y, width, height));
        self.op("f", vec![]);
        self.op("Q", vec![]);
    }

    pub fn line_width(&mut self, width: f32) {
        self.op("w", vec![Object::Real(width)]);
    }

    pub fn stroke_color(&mut self, color: Color) {
        self.op("RG", color.operands());
    }

    /// Serialize the collected operations into content stream bytes.
    pub fn finish(self) -> Result<PageContent, InvoiceError> {
        let content = Content {
            operations: self.operations,
        }
        .encode()
        .map_err(|e| InvoiceError::Pdf(format!("failed to encode page content: {e}")))?;
        Ok(PageContent {
            content,
            usage: self.usage,
        })
    }
}

fn rect(x: f32, y: f32, width: f32, height: f32) -> Vec<Object> {
    vec![
        Object::Real(x),
        Object::Real(y),
        Object::Real(width),
        Object::Real(height),
    ]
}
