use clap::Parser;
use std::path::PathBuf;

use ytdigest::config::Overrides;

#[derive(Parser)]
#[command(
    name = "ytdigest",
    about = "YouTube video summarizer service",
    version = env!("CARGO_PKG_VERSION"),
)]
pub struct Cli {
    /// Config file (default: ~/.config/ytdigest/config.toml)
    #[arg(short, long, env = "YTDIGEST_CONFIG")]
    pub config: Option<PathBuf>,

    /// Address to listen on
    #[arg(short, long, env = "YTDIGEST_BIND")]
    pub bind: Option<String>,

    /// Log level filter, overridden by RUST_LOG
    #[arg(long, env = "YTDIGEST_LOG_LEVEL")]
    pub log_level: Option<String>,

    /// Gemini model used for summaries
    #[arg(short, long, env = "YTDIGEST_MODEL")]
    pub model: Option<String>,

    /// Gemini API base URL
    #[arg(long, env = "YTDIGEST_GEMINI_BASE_URL")]
    pub gemini_base_url: Option<String>,

    /// Preferred caption language
    #[arg(short, long, env = "YTDIGEST_CAPTION_LANG")]
    pub lang: Option<String>,

    /// Timeout for outbound HTTP calls, in seconds
    #[arg(long, env = "YTDIGEST_HTTP_TIMEOUT_SECS")]
    pub http_timeout_secs: Option<u64>,
}

impl Cli {
    pub fn overrides(&self) -> Overrides {
        Overrides {
            bind: self.bind.clone(),
            log_level: self.log_level.clone(),
            model: self.model.clone(),
            gemini_base_url: self.gemini_base_url.clone(),
            caption_lang: self.lang.clone(),
            http_timeout_secs: self.http_timeout_secs,
        }
    }
}
