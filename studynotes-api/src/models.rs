use serde::{Deserialize, Serialize};
use studynotes_tools::DocumentKind;

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
}

/// Query string of the upload endpoints
#[derive(Debug, Deserialize)]
pub struct UploadQuery {
    pub file_name: Option<String>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolInfo {
    pub id: String,
    pub title: String,
    pub accepts: Vec<DocumentKind>,
    pub download_name: String,
    pub model: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ToolsResponse {
    pub tools: Vec<ToolInfo>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ExtractResponse {
    pub file_name: String,
    pub kind: DocumentKind,
    /// Pages or slides read
    pub units: usize,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct GenerateResponse {
    pub file_name: String,
    pub extracted_chars: usize,
    /// Completion requests issued
    pub requests: usize,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct RenderRequest {
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}
