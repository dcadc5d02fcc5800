use crate::config::{ApiConfig, API_KEY_ENV};
use anyhow::anyhow;
use std::sync::Arc;
use std::time::Duration;
use studynotes_llm_sdk::client::LlmClient;
use studynotes_llm_sdk::together::TogetherClient;

/// Build the completion client, failing when no API key is configured
pub fn create_llm_client(config: &ApiConfig) -> anyhow::Result<Arc<dyn LlmClient>> {
    let api_key = config.api_key().ok_or_else(|| {
        anyhow!("No API key found. Set llm.api_key in the config file or {API_KEY_ENV}.")
    })?;

    let client = TogetherClient::with_timeout(api_key, Duration::from_secs(config.llm.timeout_secs))?
        .with_base_url(config.llm.base_url.clone());

    Ok(Arc::new(client))
}
