use studynotes_llm_sdk::models::together::MISTRAL_7B_INSTRUCT_ID;
use studynotes_llm_sdk::together::TogetherClient;

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let api_key = std::env::var("TOGETHER_API_KEY")
        .map_err(|_| "TOGETHER_API_KEY environment variable must be set")?;

    let client = TogetherClient::new(api_key)?;

    let response = client
        .completion_builder()
        .model(MISTRAL_7B_INSTRUCT_ID)
        .max_tokens(256)
        .temperature(0.7)
        .prompt("Summarize in two sentences: photosynthesis converts light energy into chemical energy stored in glucose.")
        .send()
        .await?;

    println!("Completion: {}", response.first_text().unwrap_or_default().trim());
    if let Some(usage) = &response.usage {
        println!(
            "Usage: {} prompt tokens, {} completion tokens",
            usage.prompt_tokens, usage.completion_tokens
        );
    }

    Ok(())
}
