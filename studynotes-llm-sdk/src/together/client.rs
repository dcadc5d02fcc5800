use async_trait::async_trait;
use reqwest::header::{HeaderMap, HeaderValue, AUTHORIZATION, CONTENT_TYPE, RETRY_AFTER};
use std::time::Duration;

use crate::{
    client::LlmClient,
    error::LlmError,
    models, providers,
    together::types::{
        TogetherCompletionRequest, TogetherCompletionResponse, TogetherErrorResponse,
    },
    types::{CompletionRequest, CompletionResponse, Usage},
};

const DEFAULT_BASE_URL: &str = "https://api.together.xyz";
const DEFAULT_TIMEOUT_SECS: u64 = 300;

/// Client for the Together AI completions API
pub struct TogetherClient {
    api_key: String,
    base_url: String,
    model: String,
    http_client: reqwest::Client,
}

impl TogetherClient {
    /// Create a new Together client with the given API key
    pub fn new(api_key: impl Into<String>) -> Result<Self, LlmError> {
        Self::with_timeout(api_key, Duration::from_secs(DEFAULT_TIMEOUT_SECS))
    }

    /// Create a client whose requests give up after `timeout`
    pub fn with_timeout(api_key: impl Into<String>, timeout: Duration) -> Result<Self, LlmError> {
        let api_key = api_key.into();
        if api_key.trim().is_empty() {
            return Err(LlmError::authentication("API key cannot be empty"));
        }

        let http_client = reqwest::Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| LlmError::Network { source: e })?;

        Ok(Self {
            api_key,
            base_url: DEFAULT_BASE_URL.to_string(),
            model: models::together::DEFAULT_MODEL.to_string(),
            http_client,
        })
    }

    /// Set a custom base URL for the API
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into().trim_end_matches('/').to_string();
        self
    }

    /// Set the model reported by [`LlmClient::model_name`]
    pub fn with_default_model(mut self, model: impl Into<String>) -> Self {
        self.model = model.into();
        self
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Create a completion using the Together completions API
    pub async fn create_completion(
        &self,
        request: TogetherCompletionRequest,
    ) -> Result<TogetherCompletionResponse, LlmError> {
        let url = format!("{}/v1/completions", self.base_url);

        let mut headers = HeaderMap::new();
        headers.insert(
            AUTHORIZATION,
            HeaderValue::from_str(&format!("Bearer {}", self.api_key))
                .map_err(|_| LlmError::authentication("Invalid API key format"))?,
        );
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        tracing::debug!(
            model = %request.model,
            prompt_chars = request.prompt.chars().count(),
            max_tokens = ?request.max_tokens,
            temperature = ?request.temperature,
            "Sending Together completion request"
        );

        let response = self
            .http_client
            .post(&url)
            .headers(headers)
            .json(&request)
            .send()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        let status = response.status();
        let retry_after = response
            .headers()
            .get(RETRY_AFTER)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.trim().parse::<u64>().ok());

        let body = response
            .text()
            .await
            .map_err(|e| LlmError::Network { source: e })?;

        if status.is_success() {
            return serde_json::from_str::<TogetherCompletionResponse>(&body)
                .map_err(|e| LlmError::invalid_response(format!("Failed to parse response: {}", e)));
        }

        let message = match serde_json::from_str::<TogetherErrorResponse>(&body) {
            Ok(error_response) => error_response.error.message,
            Err(_) if body.trim().is_empty() => "Unknown error".to_string(),
            Err(_) => body,
        };

        tracing::warn!(status = status.as_u16(), error = %message, "Together API request failed");

        match status {
            reqwest::StatusCode::UNAUTHORIZED | reqwest::StatusCode::FORBIDDEN => {
                Err(LlmError::authentication(message))
            }
            reqwest::StatusCode::BAD_REQUEST => Err(LlmError::invalid_request(message)),
            reqwest::StatusCode::PAYLOAD_TOO_LARGE => {
                Err(LlmError::invalid_request("Request too large"))
            }
            reqwest::StatusCode::TOO_MANY_REQUESTS => Err(LlmError::rate_limit(message, retry_after)),
            _ => Err(LlmError::api_error(status.as_u16(), message)),
        }
    }
}

#[async_trait]
impl LlmClient for TogetherClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let together_request = TogetherCompletionRequest {
            model: request.model,
            prompt: request.prompt,
            max_tokens: Some(request.max_tokens),
            temperature: request.temperature,
            stop: request.stop_sequences,
        };

        let response = self.create_completion(together_request).await?;

        let choice = response
            .choices
            .first()
            .ok_or_else(|| LlmError::invalid_response("Response contained no choices"))?;
        let text = choice
            .text
            .clone()
            .ok_or_else(|| LlmError::invalid_response("First choice has no text"))?;

        Ok(CompletionResponse {
            text,
            model: response.model.clone(),
            usage: response.usage.as_ref().map(|usage| Usage {
                input_tokens: usage.prompt_tokens,
                output_tokens: usage.completion_tokens,
            }),
            finish_reason: choice.finish_reason.clone(),
        })
    }

    fn provider_name(&self) -> &str {
        providers::TOGETHER
    }

    fn model_name(&self) -> &str {
        &self.model
    }
}
