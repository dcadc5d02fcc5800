use anyhow::Context;
use clap::Parser;
use std::path::PathBuf;
use studynotes_api::config::ApiConfig;
use studynotes_api::error::PipelineError;
use studynotes_api::helpers::llm::create_llm_client;
use studynotes_api::helpers::logging::init_tracing;
use studynotes_api::pipeline::{self, Upload};
use studynotes_api::profiles::ProfileRegistry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "studynotes-runner")]
#[command(about = "Turn a local PDF or PPTX file into a study-note PDF")]
struct Args {
    /// Tool to run (summarizer or study-notes)
    #[arg(short, long)]
    tool: String,

    /// Document to read
    #[arg(short, long)]
    input: PathBuf,

    /// Where to write the generated PDF
    #[arg(short, long)]
    output: PathBuf,

    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let (config, _) = ApiConfig::load(args.config.as_deref())?;
    let _log_guard = init_tracing(&config.logging)?;
    config.validate()?;

    let profiles = ProfileRegistry::from_config(&config)?;
    let profile = profiles
        .get(&args.tool)
        .ok_or_else(|| PipelineError::UnknownTool(args.tool.clone()))
        .with_context(|| format!("available tools: {}", profiles.ids().join(", ")))?;
    let llm_client = create_llm_client(&config)?;

    let file_name = args
        .input
        .file_name()
        .map(|name| name.to_string_lossy().to_string())
        .unwrap_or_default();
    let bytes = std::fs::read(&args.input)
        .with_context(|| format!("failed to read {}", args.input.display()))?;

    info!(tool = %profile.id, input = %args.input.display(), "Running pipeline");

    let output = pipeline::run(profile, llm_client.as_ref(), Upload::new(file_name, bytes)).await?;

    std::fs::write(&args.output, &output.pdf)
        .with_context(|| format!("failed to write {}", args.output.display()))?;

    info!(
        units = output.extracted.units,
        requests = output.generation.requests,
        fell_back = output.generation.fell_back,
        output = %args.output.display(),
        "Wrote study-note PDF"
    );
    println!("{}", output.generation.text);

    Ok(())
}
