use crate::tool_error::ExtractError;
use crate::types::{DocumentKind, ExtractedDocument};
use lopdf::content::Operation;
use lopdf::{Document, Encoding, Object, ObjectId};
use std::collections::BTreeMap;
use std::path::Path;

/// Join the text layer of every page, in page order, with newlines.
///
/// A page whose text layer cannot be decoded contributes an empty string.
/// A file that cannot be parsed as a PDF at all is an error.
pub fn extract_pdf_text(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let document = Document::load(path)?;
    Ok(pages_to_text(&document))
}

/// Same as [`extract_pdf_text`] for an in-memory PDF
pub fn extract_pdf_text_from_bytes(bytes: &[u8]) -> Result<ExtractedDocument, ExtractError> {
    let document = Document::load_mem(bytes)?;
    Ok(pages_to_text(&document))
}

fn pages_to_text(document: &Document) -> ExtractedDocument {
    // BTreeMap keyed by page number, so iteration is page order
    let pages = document.get_pages();

    let texts: Vec<String> = pages
        .iter()
        .map(|(page_number, page_id)| match page_text(document, *page_id) {
            Ok(text) => text.trim_end_matches(&['\n', '\r'][..]).to_string(),
            Err(e) => {
                tracing::warn!(page = page_number, error = %e, "No extractable text layer on page");
                String::new()
            }
        })
        .collect();

    ExtractedDocument {
        kind: DocumentKind::Pdf,
        units: texts.len(),
        text: texts.join("\n"),
    }
}

/// Walk one page's content stream, starting a new line whenever the text
/// position moves vertically between two shown strings, and at every `ET`.
fn page_text(document: &Document, page_id: ObjectId) -> lopdf::Result<String> {
    let encodings = document
        .get_page_fonts(page_id)?
        .into_iter()
        .map(|(name, font)| font.get_font_encoding(document).map(|encoding| (name, encoding)))
        .collect::<lopdf::Result<BTreeMap<Vec<u8>, Encoding>>>()?;
    let content = document.get_and_decode_page_content(page_id)?;

    let mut walker = TextWalker::default();
    for operation in &content.operations {
        walker.apply(operation, &encodings)?;
    }
    Ok(walker.text)
}

#[derive(Default)]
struct TextWalker<'a> {
    text: String,
    encoding: Option<&'a Encoding<'a>>,
    /// Vertical position of the current text line
    line_y: f32,
    leading: f32,
    /// Line on which the last string was shown
    shown_y: Option<f32>,
}

impl<'a> TextWalker<'a> {
    fn apply(
        &mut self,
        operation: &Operation,
        encodings: &'a BTreeMap<Vec<u8>, Encoding<'a>>,
    ) -> lopdf::Result<()> {
        let operands = &operation.operands;
        match operation.operator.as_str() {
            "BT" => self.line_y = 0.0,
            "ET" => self.end_line(),
            "Tf" => {
                self.encoding = operands
                    .first()
                    .and_then(|name| name.as_name().ok())
                    .and_then(|name| encodings.get(name));
            }
            "TL" => self.leading = number(operands, 0),
            "Td" => self.line_y += number(operands, 1),
            "TD" => {
                let ty = number(operands, 1);
                self.leading = -ty;
                self.line_y += ty;
            }
            "Tm" => self.line_y = number(operands, 5),
            "T*" => self.line_y -= self.leading,
            "Tj" | "TJ" => self.show(operands)?,
            "'" => {
                self.line_y -= self.leading;
                self.show(operands)?;
            }
            "\"" => {
                self.line_y -= self.leading;
                self.show(operands.get(2..).unwrap_or_default())?;
            }
            _ => {}
        }
        Ok(())
    }

    fn show(&mut self, operands: &[Object]) -> lopdf::Result<()> {
        let Some(encoding) = self.encoding else {
            tracing::debug!("Text shown without a decodable font");
            return Ok(());
        };

        if self
            .shown_y
            .is_some_and(|y| (y - self.line_y).abs() > f32::EPSILON)
        {
            self.end_line();
        }
        self.shown_y = Some(self.line_y);

        collect_strings(&mut self.text, encoding, operands)
    }

    fn end_line(&mut self) {
        if !self.text.is_empty() && !self.text.ends_with('\n') {
            self.text.push('\n');
        }
    }
}

fn collect_strings(text: &mut String, encoding: &Encoding, operands: &[Object]) -> lopdf::Result<()> {
    for operand in operands {
        match operand {
            Object::String(bytes, _) => text.push_str(&Document::decode_text(encoding, bytes)?),
            Object::Array(items) => collect_strings(text, encoding, items)?,
            // Large negative kerning inside TJ is a word gap
            Object::Integer(offset) if *offset < -100 => text.push(' '),
            Object::Real(offset) if *offset < -100.0 => text.push(' '),
            _ => {}
        }
    }
    Ok(())
}

fn number(operands: &[Object], index: usize) -> f32 {
    operands
        .get(index)
        .and_then(|operand| operand.as_float().ok())
        .unwrap_or(0.0)
}
