pub mod builder;
pub mod client;
pub mod types;

pub use builder::TogetherCompletionBuilder;
pub use client::TogetherClient;
pub use types::*;
