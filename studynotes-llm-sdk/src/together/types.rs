use serde::{Deserialize, Serialize};

/// Together completion request (`POST /v1/completions`)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherCompletionRequest {
    /// The model to use for generation
    pub model: String,
    /// Raw prompt text
    pub prompt: String,
    /// Maximum number of tokens to generate
    #[serde(skip_serializing_if = "Option::is_none")]
    pub max_tokens: Option<u32>,
    /// Temperature for randomness
    #[serde(skip_serializing_if = "Option::is_none")]
    pub temperature: Option<f32>,
    /// Custom stop sequences
    #[serde(skip_serializing_if = "Option::is_none")]
    pub stop: Option<Vec<String>>,
}

/// Together completion response
///
/// Every field is lenient so that a structurally wrong body can be reported as
/// an invalid response instead of a parse failure.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TogetherCompletionResponse {
    /// Unique identifier for the response
    #[serde(default)]
    pub id: Option<String>,
    /// Model used for generation
    #[serde(default)]
    pub model: Option<String>,
    /// Completion choices
    #[serde(default)]
    pub choices: Vec<TogetherChoice>,
    /// Token usage information
    #[serde(default)]
    pub usage: Option<TogetherUsage>,
}

impl TogetherCompletionResponse {
    /// Text of the first choice, if the provider returned one
    pub fn first_text(&self) -> Option<&str> {
        self.choices.first()?.text.as_deref()
    }
}

/// A completion choice
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TogetherChoice {
    #[serde(default)]
    pub index: Option<u32>,
    /// Generated text
    #[serde(default)]
    pub text: Option<String>,
    /// Reason why generation stopped
    #[serde(default)]
    pub finish_reason: Option<String>,
}

/// Token usage information
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherUsage {
    pub prompt_tokens: u32,
    pub completion_tokens: u32,
    #[serde(default)]
    pub total_tokens: Option<u32>,
}

/// Error body returned by the Together API
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherErrorResponse {
    pub error: TogetherErrorDetail,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TogetherErrorDetail {
    pub message: String,
    #[serde(rename = "type", default)]
    pub error_type: Option<String>,
    #[serde(default)]
    pub code: Option<serde_json::Value>,
}
