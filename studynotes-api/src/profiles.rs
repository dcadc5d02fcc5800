//! The two tools served by this crate and the parameters that tell them apart.

use crate::config::{ApiConfig, ProfileOverride};
use config::ConfigError;
use serde::Serialize;
use studynotes_llm_sdk::models::together;
use studynotes_tools::{DocumentKind, FontMode, PageLayout, RenderOptions};

pub const TEXT_PLACEHOLDER: &str = "{text}";

/// Rendered in place of the notes when the study-notes completion fails
pub const FALLBACK_TEXT: &str = "Error: Unable to generate summary.";

pub const SUMMARIZER_ID: &str = "summarizer";
pub const STUDY_NOTES_ID: &str = "study-notes";

const SUMMARIZER_PROMPT: &str = r#"
Summarize the following study notes **strictly** based on the provided material.

### **Guidelines:**
1. **Do not** add any external examples, explanations, or interpretations beyond what is explicitly stated in the text.
2. **Ensure the summary contains only essential details** while preserving the original meaning and structure.
3. **Do not introduce new concepts, paraphrase inaccurately, or infer missing information.**
4. If the tokens to be used exceed the max tokens provided, which is 5000, you are allowed to summarize it even further.

{text}"#;

const STUDY_NOTES_PROMPT: &str = r#"
You are an AI that creates well-structured and concise study notes from academic materials.
Summarize the text below into **clear, structured, and well-organized** study notes.
**Instructions:**
- Use **headings** for different sections.
- Provide **bullet points** for key concepts.
- Use **examples** when needed.
- Summarize concisely without losing important details.

**Text:**
{text}

The study notes should include:
- A **brief summary** of key ideas.
- **Bullet points** for important concepts.
- **Definitions** of technical terms.
- **Examples** where relevant.
- Logical **organization** for better readability.

**Study Notes Output:**
"#;

/// What happens when the completion call fails
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FailurePolicy {
    /// The error reaches the caller
    Propagate,
    /// [`FALLBACK_TEXT`] is rendered instead
    Fallback,
}

#[derive(Debug, Clone)]
pub struct ToolProfile {
    pub id: String,
    pub title: String,
    pub accepts: Vec<DocumentKind>,
    pub download_name: String,
    pub model: String,
    pub max_tokens: u32,
    pub temperature: f32,
    pub prompt_template: String,
    /// Split longer inputs into sequential requests; one request when unset
    pub max_input_chars: Option<usize>,
    pub failure_policy: FailurePolicy,
    pub render: RenderOptions,
}

impl ToolProfile {
    pub fn summarizer() -> Self {
        Self {
            id: SUMMARIZER_ID.to_string(),
            title: "Study Note Summarizer".to_string(),
            accepts: vec![DocumentKind::Pdf],
            download_name: "summary.pdf".to_string(),
            model: together::MISTRAL_7B_INSTRUCT_ID.to_string(),
            max_tokens: 5000,
            temperature: 0.7,
            prompt_template: SUMMARIZER_PROMPT.to_string(),
            max_input_chars: None,
            failure_policy: FailurePolicy::Propagate,
            render: RenderOptions::new(FontMode::AsciiFold, PageLayout::a4())
                .with_title("Summary"),
        }
    }

    pub fn study_notes() -> Self {
        Self {
            id: STUDY_NOTES_ID.to_string(),
            title: "AI-Powered Personalized Study Notes Generator".to_string(),
            accepts: vec![DocumentKind::Pdf, DocumentKind::Pptx],
            download_name: "study_notes.pdf".to_string(),
            model: together::LLAMA_2_13B_CHAT_ID.to_string(),
            max_tokens: 1000,
            temperature: 0.3,
            prompt_template: STUDY_NOTES_PROMPT.to_string(),
            max_input_chars: None,
            failure_policy: FailurePolicy::Fallback,
            render: RenderOptions::new(FontMode::WinAnsi, PageLayout::letter())
                .with_wrapping(false)
                .with_title("Study Notes"),
        }
    }

    pub fn accepts(&self, kind: DocumentKind) -> bool {
        self.accepts.contains(&kind)
    }

    /// The template with the extracted text in place of `{text}`
    pub fn prompt_for(&self, text: &str) -> String {
        self.prompt_template.replace(TEXT_PLACEHOLDER, text)
    }

    fn apply(&mut self, overrides: &ProfileOverride) {
        if let Some(model) = &overrides.model {
            self.model = model.clone();
        }
        if let Some(max_tokens) = overrides.max_tokens {
            self.max_tokens = max_tokens;
        }
        if let Some(temperature) = overrides.temperature {
            self.temperature = temperature;
        }
        if let Some(max_input_chars) = overrides.max_input_chars {
            self.max_input_chars = Some(max_input_chars);
        }
        if let Some(template) = &overrides.prompt_template {
            self.prompt_template = template.clone();
        }
    }
}

/// The fixed set of tools, with configuration overrides applied
#[derive(Debug, Clone)]
pub struct ProfileRegistry {
    profiles: Vec<ToolProfile>,
}

impl ProfileRegistry {
    pub fn new(profiles: Vec<ToolProfile>) -> Self {
        Self { profiles }
    }

    pub fn from_config(config: &ApiConfig) -> Result<Self, ConfigError> {
        let mut registry = Self::default();

        for (id, overrides) in &config.tools {
            let profile = registry
                .profiles
                .iter_mut()
                .find(|p| &p.id == id)
                .ok_or_else(|| ConfigError::Message(format!("tools.{id}: unknown tool")))?;
            profile.apply(overrides);
        }

        Ok(registry)
    }

    pub fn get(&self, id: &str) -> Option<&ToolProfile> {
        self.profiles.iter().find(|p| p.id == id)
    }

    pub fn iter(&self) -> impl Iterator<Item = &ToolProfile> {
        self.profiles.iter()
    }

    pub fn ids(&self) -> Vec<&str> {
        self.profiles.iter().map(|p| p.id.as_str()).collect()
    }
}

impl Default for ProfileRegistry {
    fn default() -> Self {
        Self::new(vec![ToolProfile::summarizer(), ToolProfile::study_notes()])
    }
}
