//! # studynotes LLM SDK
//!
//! A small completion SDK: a provider-agnostic [`client::LlmClient`] trait and a
//! client for the Together AI completions endpoint.
//!
//! ## Example
//!
//! ```rust,no_run
//! use studynotes_llm_sdk::together::TogetherClient;
//!
//! #[tokio::main]
//! async fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let client = TogetherClient::new("your-together-api-key")?;
//!     let response = client
//!         .completion_builder()
//!         .model("mistralai/Mistral-7B-Instruct-v0.1")
//!         .max_tokens(256)
//!         .temperature(0.7)
//!         .prompt("Summarize: Rust is a systems programming language.")
//!         .send()
//!         .await?;
//!
//!     println!("Response: {}", response.first_text().unwrap_or_default());
//!     Ok(())
//! }
//! ```

pub mod client;
pub mod error;
pub mod models;
pub mod providers;
pub mod together;
pub mod types;
