//! PDF rendering of one invoice in one language.
//!
//! Pages are drawn directly as content stream operations. Text uses the
//! bundled DejaVu Sans faces, embedded as Type0 fonts with a `ToUnicode`
//! map so the documents stay searchable and copyable.

mod canvas;
mod font;
mod layout;

use std::collections::{BTreeMap, BTreeSet};

use lopdf::{Dictionary, Document, Object, ObjectId, Stream, StringFormat, dictionary};

pub use canvas::{Canvas, Color, PageContent};
pub use font::{Font, FontFace, FontMetrics, FontSet, GlyphUsage, wrap};
pub use layout::{BOTTOM_MARGIN, PAGE_HEIGHT, PAGE_WIDTH, layout};

use crate::core::{Invoice, InvoiceError, Locale, keys};

/// A rendered invoice document for one language.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RenderedInvoice {
    /// Language code the document was rendered in.
    pub language: String,
    /// Number of pages in the document.
    pub pages: usize,
    /// Complete PDF file contents.
    pub bytes: Vec<u8>,
}

/// Output file name: `<base>-<language>.pdf`.
pub fn file_name(base: &str, language: &str) -> String {
    format!("{base}-{language}.pdf")
}

/// Render `invoice` in `language`.
///
/// Fails if the translation table lacks the language or any label the
/// layout uses, or if an item has no description in that language.
pub fn render(invoice: &Invoice<'_>, language: &str) -> Result<RenderedInvoice, InvoiceError> {
    let labels = invoice.data.translations.labels(language)?;
    let locale = Locale::for_language(language);
    let fonts = FontSet::load()?;
    let pages = layout(invoice, &labels, &locale, &fonts)?
        .into_iter()
        .map(Canvas::finish)
        .collect::<Result<Vec<_>, _>>()?;
    let page_count = pages.len();

    let title = format!("{} {}", labels.get(keys::INVOICE)?, invoice.number);
    let bytes = assemble(&pages, &fonts, &title, &invoice.data.issuer.name)?;
    log::debug!(
        "Rendered invoice {} in {language}: {page_count} page(s), {} bytes",
        invoice.number,
        bytes.len()
    );
    Ok(RenderedInvoice {
        language: language.to_string(),
        pages: page_count,
        bytes,
    })
}

/// Wrap the page contents into a complete PDF document.
fn assemble(
    pages: &[PageContent],
    fonts: &FontSet,
    title: &str,
    author: &str,
) -> Result<Vec<u8>, InvoiceError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut usage = GlyphUsage::new();
    for page in pages {
        for (font, chars) in &page.usage {
            usage.entry(*font).or_default().extend(chars.iter().copied());
        }
    }

    let mut font_resources = Dictionary::new();
    for font in Font::ALL {
        let used = usage.get(&font).cloned().unwrap_or_default();
        let font_id = embed_font(&mut doc, fonts.get(font), &used);
        font_resources.set(font.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => font_resources,
    });

    let mut kids = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Stream::new(dictionary! {}, page.content.clone()).with_compression(false);
        let content_id = doc.add_object(content);
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
        });
        kids.push(Object::from(page_id));
    }
    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "MediaBox" => vec![
            Object::Integer(0),
            Object::Integer(0),
            Object::Real(PAGE_WIDTH),
            Object::Real(PAGE_HEIGHT),
        ],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    let info_id = doc.add_object(dictionary! {
        "Title" => text_string(title),
        "Author" => text_string(author),
        "Producer" => text_string(concat!("invoicegen ", env!("CARGO_PKG_VERSION"))),
    });
    doc.trailer.set("Root", catalog_id);
    doc.trailer.set("Info", info_id);
    // Only the font programs allow compression.
    doc.compress();

    let mut output = Vec::new();
    doc.save_to(&mut output)
        .map_err(|e| InvoiceError::Pdf(format!("failed to save PDF: {e}")))?;
    Ok(output)
}

/// Embed `face` as a Type0 font with `Identity-H` encoding. Widths and the
/// `ToUnicode` map cover the characters in `used`.
fn embed_font(doc: &mut Document, face: &FontFace, used: &BTreeSet<char>) -> ObjectId {
    let font = face.font();
    let data = font.data();
    let program = Stream::new(
        dictionary! { "Length1" => data.len() as i64 },
        data.to_vec(),
    );
    let program_id = doc.add_object(program);

    let metrics = face.metrics();
    let descriptor_id = doc.add_object(dictionary! {
        "Type" => "FontDescriptor",
        "FontName" => font.base_font(),
        "Flags" => 32_i64,
        "FontBBox" => metrics.bbox.iter().map(|v| Object::Integer(*v)).collect::<Vec<_>>(),
        "ItalicAngle" => 0_i64,
        "Ascent" => metrics.ascent,
        "Descent" => metrics.descent,
        "CapHeight" => metrics.cap_height,
        "StemV" => 80_i64,
        "FontFile2" => program_id,
    });

    let glyphs = glyph_map(face, used);
    let widths: Vec<Object> = glyphs
        .keys()
        .flat_map(|glyph| {
            [
                Object::Integer(i64::from(*glyph)),
                Object::Array(vec![Object::Integer(i64::from(face.advance(*glyph)))]),
            ]
        })
        .collect();
    let cid_font_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "CIDFontType2",
        "BaseFont" => font.base_font(),
        "CIDSystemInfo" => dictionary! {
            "Registry" => Object::string_literal("Adobe"),
            "Ordering" => Object::string_literal("Identity"),
            "Supplement" => 0_i64,
        },
        "FontDescriptor" => descriptor_id,
        "DW" => i64::from(face.advance(0)),
        "W" => widths,
        "CIDToGIDMap" => "Identity",
    });

    let cmap = Stream::new(dictionary! {}, to_unicode_cmap(&glyphs)).with_compression(false);
    let cmap_id = doc.add_object(cmap);

    doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type0",
        "BaseFont" => font.base_font(),
        "Encoding" => "Identity-H",
        "DescendantFonts" => vec![Object::from(cid_font_id)],
        "ToUnicode" => cmap_id,
    })
}

/// Glyph id to the first character drawn with it.
fn glyph_map(face: &FontFace, used: &BTreeSet<char>) -> BTreeMap<u16, char> {
    let mut glyphs = BTreeMap::new();
    for c in used {
        if let Some(glyph) = face.glyph(*c) {
            glyphs.entry(glyph).or_insert(*c);
        }
    }
    glyphs
}

/// A `ToUnicode` CMap mapping two-byte glyph ids back to characters.
fn to_unicode_cmap(glyphs: &BTreeMap<u16, char>) -> Vec<u8> {
    let mut cmap = String::from(
        "/CIDInit /ProcSet findresource begin\n\
         12 dict begin\n\
         begincmap\n\
         /CIDSystemInfo << /Registry (Adobe) /Ordering (UCS) /Supplement 0 >> def\n\
         /CMapName /Adobe-Identity-UCS def\n\
         /CMapType 2 def\n\
         1 begincodespacerange\n\
         <0000> <FFFF>\n\
         endcodespacerange\n",
    );
    let entries: Vec<(&u16, &char)> = glyphs.iter().collect();
    // at most 100 entries per bfchar block
    for chunk in entries.chunks(100) {
        cmap.push_str(&format!("{} beginbfchar\n", chunk.len()));
        for (glyph, c) in chunk {
            let mut units = [0u16; 2];
            let unicode: String = c
                .encode_utf16(&mut units)
                .iter()
                .map(|unit| format!("{unit:04X}"))
                .collect();
            cmap.push_str(&format!("<{glyph:04X}> <{unicode}>\n"));
        }
        cmap.push_str("endbfchar\n");
    }
    cmap.push_str(
        "endcmap\n\
         CMapName currentdict /defineresource pop\n\
         end\n\
         end\n",
    );
    cmap.into_bytes()
}

/// A PDF text string: literal for ASCII, UTF-16BE with byte order mark
/// otherwise.
fn text_string(text: &str) -> Object {
    if text.is_ascii() {
        return Object::string_literal(text);
    }
    let mut bytes = vec![0xFE, 0xFF];
    for unit in text.encode_utf16() {
        bytes.extend_from_slice(&unit.to_be_bytes());
    }
    Object::String(bytes, StringFormat::Hexadecimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn text_strings() {
        assert_eq!(text_string("Invoice 1"), Object::string_literal("Invoice 1"));
        match text_string("Odalović") {
            Object::String(bytes, _) => {
                assert_eq!(&bytes[..2], &[0xFE, 0xFF]);
                assert_eq!(&bytes[bytes.len() - 2..], &[0x01, 0x07]);
            }
            other => panic!("unexpected {other:?}"),
        }
    }

    #[test]
    fn cmap_maps_glyphs_to_utf16() {
        let glyphs = BTreeMap::from([(0x0024, 'A'), (0x01F3, 'ć')]);
        let cmap = String::from_utf8(to_unicode_cmap(&glyphs)).unwrap();
        assert!(cmap.contains("2 beginbfchar"));
        assert!(cmap.contains("<0024> <0041>"));
        assert!(cmap.contains("<01F3> <0107>"));
    }

    #[test]
    fn cmap_blocks_hold_at_most_100_entries() {
        let glyphs: BTreeMap<u16, char> = ('a'..='z')
            .chain('A'..='Z')
            .chain('À'..='ÿ')
            .enumerate()
            .map(|(i, c)| (i as u16, c))
            .collect();
        let cmap = String::from_utf8(to_unicode_cmap(&glyphs)).unwrap();
        assert!(cmap.contains("100 beginbfchar"));
        assert_eq!(cmap.matches("beginbfchar").count(), 2);
    }
}
