//! Plain-text extraction from uploaded documents.
//!
//! Structure (headings, tables, layout) is not preserved: a PDF becomes its
//! pages' text layers joined by newlines, a slide deck becomes the text of its
//! text-bearing shapes joined by newlines.

pub mod pdf;
pub mod pptx;

use crate::tool_error::ExtractError;
use crate::types::{DocumentKind, ExtractedDocument};
use std::path::Path;
use std::time::Instant;

/// Extract text from the document at `path`, dispatching on `kind`
pub fn extract_text(path: &Path, kind: DocumentKind) -> Result<ExtractedDocument, ExtractError> {
    let started = Instant::now();

    let document = match kind {
        DocumentKind::Pdf => pdf::extract_pdf_text(path)?,
        DocumentKind::Pptx => pptx::extract_pptx_text(path)?,
    };

    tracing::debug!(
        kind = %kind,
        units = document.units,
        chars = document.char_count(),
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extracted document text"
    );

    Ok(document)
}

/// Extract text, inferring the format from the path's extension
pub fn extract_text_from_path(path: &Path) -> Result<ExtractedDocument, ExtractError> {
    let file_name = path.to_string_lossy();
    let kind = DocumentKind::from_file_name(&file_name)
        .ok_or_else(|| ExtractError::UnsupportedExtension(file_name.to_string()))?;
    extract_text(path, kind)
}
