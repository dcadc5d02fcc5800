/// Document extraction error
#[derive(Debug, thiserror::Error)]
pub enum ExtractError {
    #[error("Unsupported file type: {0}")]
    UnsupportedExtension(String),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
    #[error("Unreadable PDF: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("Unreadable slide deck archive: {0}")]
    Zip(#[from] zip::result::ZipError),
    #[error("XML parsing error in {part}: {message}")]
    Xml { part: String, message: String },
    #[error("Slide deck is missing {0}")]
    MissingPart(String),
}

impl ExtractError {
    pub fn xml(part: impl Into<String>, message: impl ToString) -> Self {
        ExtractError::Xml {
            part: part.into(),
            message: message.to_string(),
        }
    }
}

/// PDF rendering error
#[derive(Debug, thiserror::Error)]
pub enum RenderError {
    #[error("PDF generation failed: {0}")]
    Pdf(#[from] lopdf::Error),
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}
