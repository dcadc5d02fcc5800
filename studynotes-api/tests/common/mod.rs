#![allow(dead_code)]

use actix_web::{test, web, App};
use std::sync::{Arc, Mutex};
use studynotes_api::handlers;
use studynotes_api::profiles::ProfileRegistry;
use studynotes_llm_sdk::client::LlmClient;
use studynotes_llm_sdk::error::LlmError;
use studynotes_llm_sdk::types::{CompletionRequest, CompletionResponse, Usage};

#[path = "../../../studynotes-tools/tests/common/mod.rs"]
mod documents;

pub use documents::{pdf_with_pages, pptx_with_slides, SlideShape};

pub struct MockLlmClient {
    pub responses: Arc<Mutex<Vec<Result<CompletionResponse, LlmError>>>>,
    pub requests: Arc<Mutex<Vec<CompletionRequest>>>,
    pub call_count: Arc<Mutex<usize>>,
}

impl MockLlmClient {
    pub fn new() -> Self {
        MockLlmClient {
            responses: Arc::new(Mutex::new(Vec::new())),
            requests: Arc::new(Mutex::new(Vec::new())),
            call_count: Arc::new(Mutex::new(0)),
        }
    }

    pub fn with_responses(responses: Vec<Result<CompletionResponse, LlmError>>) -> Self {
        let client = MockLlmClient::new();
        *client.responses.lock().unwrap() = responses;
        client
    }

    pub fn push_response(&self, response: Result<CompletionResponse, LlmError>) {
        let mut responses = self.responses.lock().unwrap();
        responses.push(response);
    }

    pub fn get_call_count(&self) -> usize {
        *self.call_count.lock().unwrap()
    }

    pub fn recorded_requests(&self) -> Vec<CompletionRequest> {
        self.requests.lock().unwrap().clone()
    }
}

impl Default for MockLlmClient {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl LlmClient for MockLlmClient {
    async fn complete(&self, request: CompletionRequest) -> Result<CompletionResponse, LlmError> {
        let mut call_count = self.call_count.lock().unwrap();
        *call_count += 1;
        drop(call_count);

        self.requests.lock().unwrap().push(request);

        let mut responses = self.responses.lock().unwrap();
        if responses.is_empty() {
            Ok(create_completion_response_with_text("Mock study notes."))
        } else {
            responses.remove(0)
        }
    }

    fn provider_name(&self) -> &str {
        "mock"
    }

    fn model_name(&self) -> &str {
        "mock-model"
    }
}

pub fn create_completion_response_with_text(text: &str) -> CompletionResponse {
    CompletionResponse {
        text: text.to_string(),
        model: Some("mock-model".to_string()),
        usage: Some(Usage {
            input_tokens: 10,
            output_tokens: 20,
        }),
        finish_reason: Some("stop".to_string()),
    }
}

pub async fn setup_test_app(
    mock_llm_client: Arc<MockLlmClient>,
    profiles: ProfileRegistry,
) -> impl actix_web::dev::Service<
    actix_http::Request,
    Response = actix_web::dev::ServiceResponse,
    Error = actix_web::Error,
> {
    let llm_client = mock_llm_client as Arc<dyn LlmClient>;

    test::init_service(
        App::new()
            .app_data(web::Data::new(llm_client))
            .app_data(web::Data::new(profiles))
            .app_data(web::PayloadConfig::new(1024 * 1024))
            .configure(handlers::configure),
    )
    .await
}

/// A single-slide deck, one text shape per entry
pub fn pptx_with_shapes(shapes: &[&str]) -> Vec<u8> {
    let shapes = shapes
        .iter()
        .map(|text| SlideShape::Text(std::slice::from_ref(text)))
        .collect();
    pptx_with_slides(&[shapes])
}

/// Text layer of a PDF, page by page
pub fn pdf_text(bytes: &[u8]) -> String {
    studynotes_tools::extract::pdf::extract_pdf_text_from_bytes(bytes)
        .unwrap()
        .text
}
