//! Upload → temporary file → extraction → completion → PDF.
//!
//! Extraction and rendering run on actix-web's blocking pool. The completion
//! call is awaited. Nothing outlives the request: the upload's temporary file
//! is removed when the extraction closure returns, on every path.

use crate::error::PipelineError;
use crate::profiles::{FailurePolicy, ToolProfile, FALLBACK_TEXT};
use actix_web::web::{self, Bytes};
use std::io::Write;
use std::time::Instant;
use studynotes_llm_sdk::client::LlmClient;
use studynotes_llm_sdk::types::CompletionRequest;
use studynotes_tools::text::chunk_text;
use studynotes_tools::{extract_text, render_pdf, DocumentKind, ExtractedDocument};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

/// An uploaded document as received
#[derive(Debug, Clone)]
pub struct Upload {
    pub file_name: String,
    pub bytes: Bytes,
}

impl Upload {
    pub fn new(file_name: impl Into<String>, bytes: impl Into<Bytes>) -> Self {
        Self {
            file_name: file_name.into(),
            bytes: bytes.into(),
        }
    }
}

/// Text produced by the completion step
#[derive(Debug, Clone, PartialEq)]
pub struct Generation {
    pub text: String,
    /// Completion requests issued
    pub requests: usize,
    /// Whether [`FALLBACK_TEXT`] replaced a failed completion
    pub fell_back: bool,
}

/// Everything one full run produced
#[derive(Debug)]
pub struct RunOutput {
    pub extracted: ExtractedDocument,
    pub generation: Generation,
    pub pdf: Vec<u8>,
}

/// Resolve the upload's format, rejecting anything the profile does not take
pub fn document_kind(profile: &ToolProfile, file_name: &str) -> Result<DocumentKind, PipelineError> {
    DocumentKind::from_file_name(file_name)
        .filter(|kind| profile.accepts(*kind))
        .ok_or_else(|| PipelineError::unsupported(file_name))
}

/// Write the upload to a temporary file named with the format's extension.
///
/// The file is deleted when the returned handle is dropped.
pub fn persist_upload(bytes: &[u8], kind: DocumentKind) -> Result<NamedTempFile, PipelineError> {
    let mut file = tempfile::Builder::new()
        .prefix("studynotes-upload-")
        .suffix(&format!(".{}", kind.extension()))
        .tempfile()
        .map_err(PipelineError::TempFile)?;
    file.write_all(bytes).map_err(PipelineError::TempFile)?;
    file.flush().map_err(PipelineError::TempFile)?;
    Ok(file)
}

pub async fn extract_upload(
    profile: &ToolProfile,
    upload: Upload,
) -> Result<ExtractedDocument, PipelineError> {
    let kind = document_kind(profile, &upload.file_name)?;
    if upload.bytes.is_empty() {
        return Err(PipelineError::EmptyUpload);
    }

    let started = Instant::now();
    let document = web::block(move || {
        let file = persist_upload(&upload.bytes, kind)?;
        let document = extract_text(file.path(), kind)?;
        drop(file);
        Ok::<_, PipelineError>(document)
    })
    .await
    .map_err(|e| PipelineError::Blocking(e.to_string()))??;

    info!(
        tool = %profile.id,
        kind = %kind,
        units = document.units,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "Extracted upload"
    );
    debug!(chars = document.char_count(), "Extracted text size");

    Ok(document)
}

/// Run the completion step for `text` under the profile's parameters.
///
/// Empty text still issues exactly one request. With `max_input_chars` set,
/// longer text is completed chunk by chunk and the outputs are joined with a
/// blank line.
pub async fn generate(
    profile: &ToolProfile,
    client: &dyn LlmClient,
    text: &str,
) -> Result<Generation, PipelineError> {
    let chunks = match profile.max_input_chars {
        Some(max_chars) if text.chars().count() > max_chars => chunk_text(text, max_chars),
        _ => vec![text.to_string()],
    };

    let mut outputs = Vec::with_capacity(chunks.len());
    for (index, chunk) in chunks.iter().enumerate() {
        let request = CompletionRequest::new(profile.model.clone(), profile.prompt_for(chunk))
            .with_max_tokens(profile.max_tokens)
            .with_temperature(profile.temperature);

        let started = Instant::now();
        match client.complete(request).await {
            Ok(response) => {
                info!(
                    tool = %profile.id,
                    provider = client.provider_name(),
                    model = %profile.model,
                    chunk = index + 1,
                    chunks = chunks.len(),
                    finish_reason = ?response.finish_reason,
                    elapsed_ms = started.elapsed().as_millis() as u64,
                    "Completion received"
                );
                outputs.push(response.text.trim().to_string());
            }
            Err(e) => match profile.failure_policy {
                FailurePolicy::Propagate => {
                    warn!(tool = %profile.id, error = %e, "Completion failed");
                    return Err(PipelineError::Completion(e));
                }
                FailurePolicy::Fallback => {
                    warn!(tool = %profile.id, error = %e, "Completion failed, using fallback text");
                    return Ok(Generation {
                        text: FALLBACK_TEXT.to_string(),
                        requests: index + 1,
                        fell_back: true,
                    });
                }
            },
        }
    }

    Ok(Generation {
        text: outputs.join("\n\n"),
        requests: chunks.len(),
        fell_back: false,
    })
}

pub async fn render(profile: &ToolProfile, text: String) -> Result<Vec<u8>, PipelineError> {
    let options = profile.render.clone();
    let pdf = web::block(move || render_pdf(&text, &options))
        .await
        .map_err(|e| PipelineError::Blocking(e.to_string()))??;

    debug!(tool = %profile.id, bytes = pdf.len(), "Rendered PDF");
    Ok(pdf)
}

/// The whole pipeline for one upload
pub async fn run(
    profile: &ToolProfile,
    client: &dyn LlmClient,
    upload: Upload,
) -> Result<RunOutput, PipelineError> {
    let extracted = extract_upload(profile, upload).await?;
    let generation = generate(profile, client, &extracted.text).await?;
    let pdf = render(profile, generation.text.clone()).await?;

    Ok(RunOutput {
        extracted,
        generation,
        pdf,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::profiles::ToolProfile;

    #[test]
    fn test_document_kind_respects_profile() {
        let summarizer = ToolProfile::summarizer();
        let notes = ToolProfile::study_notes();

        assert_eq!(document_kind(&summarizer, "a.pdf").unwrap(), DocumentKind::Pdf);
        assert!(matches!(
            document_kind(&summarizer, "deck.pptx"),
            Err(PipelineError::UnsupportedFileType { .. })
        ));
        assert_eq!(document_kind(&notes, "deck.PPTX").unwrap(), DocumentKind::Pptx);
        assert!(document_kind(&notes, "notes.docx").is_err());
        assert!(document_kind(&notes, "no_extension").is_err());
    }

    #[test]
    fn test_persisted_upload_is_removed_on_drop() {
        let file = persist_upload(b"%PDF-1.5", DocumentKind::Pdf).unwrap();
        let path = file.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().and_then(|e| e.to_str()), Some("pdf"));
        assert_eq!(std::fs::read(&path).unwrap(), b"%PDF-1.5");

        drop(file);
        assert!(!path.exists());
    }
}
