use actix_web::{web, App, HttpServer};
use clap::Parser;
use std::path::PathBuf;
use studynotes_api::config::ApiConfig;
use studynotes_api::handlers;
use studynotes_api::helpers::llm::create_llm_client;
use studynotes_api::helpers::logging::init_tracing;
use studynotes_api::profiles::ProfileRegistry;
use tracing::info;

#[derive(Parser, Debug)]
#[command(name = "studynotes-api")]
#[command(about = "Serve the study-note tools over HTTP")]
struct Args {
    /// Path to the TOML config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[actix_web::main]
async fn main() -> anyhow::Result<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    let (config, config_path) = ApiConfig::load(args.config.as_deref())?;
    let _log_guard = init_tracing(&config.logging)?;
    info!(path = %config_path.display(), "Loaded configuration");

    config.validate()?;
    let profiles = ProfileRegistry::from_config(&config)?;
    let llm_client = create_llm_client(&config)?;

    let bind_addr = format!("{}:{}", config.server.host, config.server.port);
    let max_upload_bytes = config.server.max_upload_bytes;
    info!(
        tools = ?profiles.ids(),
        max_upload_bytes,
        "Starting studynotes-api server at http://{}",
        bind_addr
    );

    let profiles = web::Data::new(profiles);
    let llm_client = web::Data::new(llm_client);

    HttpServer::new(move || {
        App::new()
            .app_data(profiles.clone())
            .app_data(llm_client.clone())
            .app_data(web::PayloadConfig::new(max_upload_bytes))
            .app_data(web::JsonConfig::default().limit(max_upload_bytes))
            .configure(handlers::configure)
    })
    .bind(bind_addr)?
    .run()
    .await?;

    Ok(())
}
