use crate::models::ErrorResponse;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use studynotes_llm_sdk::error::LlmError;
use studynotes_tools::{ExtractError, RenderError};
use thiserror::Error;

pub const UNSUPPORTED_FILE_TYPE: &str = "Unsupported file type.";

#[derive(Error, Debug)]
pub enum PipelineError {
    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Unsupported file type.")]
    UnsupportedFileType { file_name: String },

    #[error("Uploaded file is empty")]
    EmptyUpload,

    #[error("Could not read document: {0}")]
    Extract(#[from] ExtractError),

    #[error("Completion request failed: {0}")]
    Completion(#[from] LlmError),

    #[error("Could not render PDF: {0}")]
    Render(#[from] RenderError),

    #[error("Temporary file error: {0}")]
    TempFile(#[source] std::io::Error),

    #[error("Blocking task failed: {0}")]
    Blocking(String),
}

impl PipelineError {
    pub fn unsupported(file_name: impl Into<String>) -> Self {
        Self::UnsupportedFileType {
            file_name: file_name.into(),
        }
    }
}

impl ResponseError for PipelineError {
    fn status_code(&self) -> StatusCode {
        match self {
            PipelineError::UnknownTool(_) => StatusCode::NOT_FOUND,
            PipelineError::UnsupportedFileType { .. }
            | PipelineError::Extract(ExtractError::UnsupportedExtension(_)) => {
                StatusCode::UNSUPPORTED_MEDIA_TYPE
            }
            PipelineError::EmptyUpload => StatusCode::BAD_REQUEST,
            PipelineError::Extract(ExtractError::Io(_)) => StatusCode::INTERNAL_SERVER_ERROR,
            PipelineError::Extract(_) => StatusCode::UNPROCESSABLE_ENTITY,
            PipelineError::Completion(_) => StatusCode::BAD_GATEWAY,
            PipelineError::Render(_) | PipelineError::TempFile(_) | PipelineError::Blocking(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        let error = match self {
            PipelineError::Extract(ExtractError::UnsupportedExtension(_)) => {
                UNSUPPORTED_FILE_TYPE.to_string()
            }
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_codes() {
        assert_eq!(
            PipelineError::UnknownTool("x".into()).status_code(),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            PipelineError::unsupported("a.docx").status_code(),
            StatusCode::UNSUPPORTED_MEDIA_TYPE
        );
        assert_eq!(PipelineError::EmptyUpload.status_code(), StatusCode::BAD_REQUEST);
        assert_eq!(
            PipelineError::from(ExtractError::MissingPart("ppt/presentation.xml".into()))
                .status_code(),
            StatusCode::UNPROCESSABLE_ENTITY
        );
        assert_eq!(
            PipelineError::from(LlmError::rate_limit("slow down", None)).status_code(),
            StatusCode::BAD_GATEWAY
        );
    }

    #[test]
    fn test_unsupported_message_is_fixed() {
        assert_eq!(
            PipelineError::unsupported("notes.docx").to_string(),
            UNSUPPORTED_FILE_TYPE
        );
    }
}
