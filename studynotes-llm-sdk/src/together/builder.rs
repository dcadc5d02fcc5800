use crate::{
    error::LlmError,
    together::{
        client::TogetherClient,
        types::{TogetherCompletionRequest, TogetherCompletionResponse},
    },
};

/// Builder for creating Together completion requests
pub struct TogetherCompletionBuilder<'a> {
    client: &'a TogetherClient,
    model: Option<String>,
    prompt: Option<String>,
    max_tokens: Option<u32>,
    temperature: Option<f32>,
    stop: Option<Vec<String>>,
}

impl<'a> TogetherCompletionBuilder<'a> {
    /// Create a new completion builder
    pub fn new(client: &'a TogetherClient) -> Self {
        Self {
            client,
            model: None,
            prompt: None,
            max_tokens: None,
            temperature: None,
            stop: None,
        }
    }

    /// Set the model to use
    pub fn model(mut self, model: impl Into<String>) -> Self {
        self.model = Some(model.into());
        self
    }

    /// Set the prompt text
    pub fn prompt(mut self, prompt: impl Into<String>) -> Self {
        self.prompt = Some(prompt.into());
        self
    }

    /// Set the maximum number of tokens to generate
    pub fn max_tokens(mut self, max_tokens: u32) -> Self {
        self.max_tokens = Some(max_tokens);
        self
    }

    /// Set the temperature for randomness
    pub fn temperature(mut self, temperature: f32) -> Self {
        self.temperature = Some(temperature);
        self
    }

    /// Set custom stop sequences
    pub fn stop_sequences(mut self, stop_sequences: Vec<String>) -> Self {
        self.stop = Some(stop_sequences);
        self
    }

    /// Send the request and get the response
    pub async fn send(self) -> Result<TogetherCompletionResponse, LlmError> {
        let request = TogetherCompletionRequest {
            model: self
                .model
                .ok_or_else(|| LlmError::invalid_request("Model must be specified"))?,
            prompt: self
                .prompt
                .ok_or_else(|| LlmError::invalid_request("Prompt must be specified"))?,
            max_tokens: self.max_tokens,
            temperature: self.temperature,
            stop: self.stop,
        };

        self.client.create_completion(request).await
    }
}

impl TogetherClient {
    /// Start building a completion request
    pub fn completion_builder(&self) -> TogetherCompletionBuilder<'_> {
        TogetherCompletionBuilder::new(self)
    }
}
