//! Model constants for the Together AI serverless models used by the study tools
//!
//! Model IDs are the identifiers accepted by the Together completions endpoint.

/// Together AI model constants
pub mod together {
    /// Mistral 7B Instruct v0.1 - used by the note summarizer
    pub const MISTRAL_7B_INSTRUCT_ID: &str = "mistralai/Mistral-7B-Instruct-v0.1";

    /// Llama 2 13B Chat - used by the study notes generator
    pub const LLAMA_2_13B_CHAT_ID: &str = "meta-llama/Llama-2-13b-chat-hf";

    /// Default model for a freshly constructed client
    pub const DEFAULT_MODEL: &str = MISTRAL_7B_INSTRUCT_ID;
}
