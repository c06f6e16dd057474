use clap::Parser;
use eyre::Result;
use log::{info, warn};

mod cli;

use cli::Cli;
use ytdigest::config::{self, Config, Settings};
use ytdigest::gemini::GeminiClient;
use ytdigest::pipeline::Pipeline;
use ytdigest::youtube::YouTubeCaptions;

fn setup_logging(level: &str) {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for shutdown signal: {e}");
    }
    info!("Shutdown signal received");
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let config_path = cli.config.clone().unwrap_or_else(config::config_path);
    // Missing or invalid config file is non-fatal
    let (config, config_err) = match Config::load(&config_path) {
        Ok(config) => (config, None),
        Err(e) => (Config::default(), Some(e)),
    };
    let settings = Settings::resolve(cli.overrides(), config);

    setup_logging(&settings.log_level);
    if let Some(e) = config_err {
        warn!("Ignoring config file {}: {e}", config_path.display());
    }

    let client = settings.http_client()?;
    let transcripts = YouTubeCaptions::new(client.clone(), settings.caption_lang.as_str());
    let generator = GeminiClient::new(client, settings.model.as_str()).with_base_url(settings.gemini_base_url.as_str());
    let app = ytdigest::server::router(Pipeline::new(transcripts, generator));

    let listener = tokio::net::TcpListener::bind(&settings.bind).await?;
    info!(
        "{} {} listening on {} (model {})",
        ytdigest::server::SERVICE_NAME,
        env!("CARGO_PKG_VERSION"),
        listener.local_addr()?,
        settings.model
    );

    axum::serve(listener, app).with_graceful_shutdown(shutdown_signal()).await?;
    Ok(())
}
