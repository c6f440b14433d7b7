//! Single-page PDF rendering for the shopping list report.
//!
//! A deliberately small writer: catalog, page tree, one page, one Type1
//! font carrying the custom encoding from [`crate::codepage`], and one
//! content stream of `Tj` text operators. Enough structure for any
//! conforming viewer, nothing more.

use thiserror::Error;

use crate::aggregation::{format_amount, AggregatedLine};
use crate::codepage::{encode, HIGH_GLYPHS};

#[derive(Debug, Error, PartialEq, Eq)]
pub enum PdfError {
    #[error("character {0:?} is outside the report code page")]
    Unencodable(char),
}

/// Fixed document title, drawn above the numbered lines.
pub const TITLE: &str = "Список покупок:";

const FONT_SIZE: i32 = 20;
const LEFT_MARGIN: i32 = 25;
const TITLE_Y: i32 = 800;
const LIST_START_Y: i32 = 780;
const LINE_PITCH: i32 = 30;

/// Render the aggregated cart as a complete PDF document.
///
/// Emits the title line, then `"<n>. <name> - <total> <unit>"` per
/// aggregated line in order, with a fixed 30-unit vertical pitch. An
/// empty slice yields a title-only page.
pub fn render_report(lines: &[AggregatedLine]) -> Result<Vec<u8>, PdfError> {
    let content = content_stream(lines)?;
    Ok(assemble_document(&content))
}

fn content_stream(lines: &[AggregatedLine]) -> Result<Vec<u8>, PdfError> {
    let mut ops = Vec::new();
    draw_string(&mut ops, LEFT_MARGIN, TITLE_Y, TITLE)?;

    // No page break: y keeps marching down, off the media box if the
    // cart is long enough, and the single page is finalized regardless.
    let mut y = LIST_START_Y;
    for (n, line) in lines.iter().enumerate() {
        y -= LINE_PITCH;
        let text = format!(
            "{}. {} - {} {}",
            n + 1,
            line.name,
            format_amount(line.total),
            line.unit
        );
        draw_string(&mut ops, LEFT_MARGIN, y, &text)?;
    }

    Ok(ops)
}

fn draw_string(out: &mut Vec<u8>, x: i32, y: i32, text: &str) -> Result<(), PdfError> {
    out.extend_from_slice(format!("BT\n/F1 {FONT_SIZE} Tf\n{x} {y} Td\n").as_bytes());
    out.push(b'(');
    for byte in encode(text)? {
        if matches!(byte, b'(' | b')' | b'\\') {
            out.push(b'\\');
        }
        out.push(byte);
    }
    out.extend_from_slice(b") Tj\nET\n");
    Ok(())
}

/// Wrap the content stream in the fixed object skeleton.
///
/// Object ids: 1 catalog, 2 page tree, 3 page, 4 font, 5 encoding,
/// 6 content stream.
fn assemble_document(content: &[u8]) -> Vec<u8> {
    let mut doc = DocWriter::new();

    doc.object(b"<< /Type /Catalog /Pages 2 0 R >>");
    doc.object(b"<< /Type /Pages /Kids [3 0 R] /Count 1 >>");
    doc.object(
        b"<< /Type /Page /Parent 2 0 R /MediaBox [0 0 595 842] \
          /Resources << /Font << /F1 4 0 R >> >> /Contents 6 0 R >>",
    );
    doc.object(
        b"<< /Type /Font /Subtype /Type1 /BaseFont /Helvetica /Encoding 5 0 R >>",
    );
    doc.object(encoding_dictionary().as_bytes());

    let mut stream = format!("<< /Length {} >>\nstream\n", content.len()).into_bytes();
    stream.extend_from_slice(content);
    stream.extend_from_slice(b"\nendstream");
    doc.object(&stream);

    doc.finish()
}

/// The document encoding table as a PDF `/Differences` array: bytes
/// 128..=255 remapped onto the code-page glyph names.
fn encoding_dictionary() -> String {
    let mut dict = String::from("<< /Type /Encoding /BaseEncoding /WinAnsiEncoding /Differences [128");
    for glyph in HIGH_GLYPHS {
        dict.push_str(" /");
        dict.push_str(glyph);
    }
    dict.push_str("] >>");
    dict
}

/// Sequential object writer that records byte offsets for the xref table.
struct DocWriter {
    buf: Vec<u8>,
    offsets: Vec<usize>,
}

impl DocWriter {
    fn new() -> Self {
        Self {
            buf: b"%PDF-1.4\n".to_vec(),
            offsets: Vec::new(),
        }
    }

    fn object(&mut self, body: &[u8]) {
        let id = self.offsets.len() + 1;
        self.offsets.push(self.buf.len());
        self.buf.extend_from_slice(format!("{id} 0 obj\n").as_bytes());
        self.buf.extend_from_slice(body);
        self.buf.extend_from_slice(b"\nendobj\n");
    }

    fn finish(mut self) -> Vec<u8> {
        let xref_at = self.buf.len();
        let count = self.offsets.len() + 1;
        self.buf
            .extend_from_slice(format!("xref\n0 {count}\n").as_bytes());
        self.buf.extend_from_slice(b"0000000000 65535 f \n");
        for offset in &self.offsets {
            self.buf
                .extend_from_slice(format!("{offset:010} 00000 n \n").as_bytes());
        }
        self.buf.extend_from_slice(
            format!("trailer\n<< /Size {count} /Root 1 0 R >>\nstartxref\n{xref_at}\n%%EOF\n")
                .as_bytes(),
        );
        self.buf
    }
}
