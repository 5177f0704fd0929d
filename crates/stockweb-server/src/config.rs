use std::fmt::{Debug, Formatter};
use std::net::SocketAddr;
use std::path::PathBuf;
use std::time::Duration;

use clap::Parser;
use stockweb_core::adapters::alphavantage::DEFAULT_BASE_URL;
use stockweb_core::{AlphaVantageConfig, OutputSize};

/// Runtime configuration, read from flags with environment fallbacks.
#[derive(Clone, Parser)]
#[command(
    name = "stockweb",
    version,
    about = "HTTP API computing statistics over Alpha Vantage daily closing prices"
)]
pub struct ServerConfig {
    /// Socket address to listen on.
    #[arg(long, env = "STOCKWEB_BIND", default_value = "127.0.0.1:8080")]
    pub bind: SocketAddr,

    /// Alpha Vantage API key.
    #[arg(
        long,
        env = "STOCKWEB_ALPHAVANTAGE_API_KEY",
        default_value = "demo",
        hide_env_values = true
    )]
    pub alphavantage_api_key: String,

    /// Alpha Vantage query endpoint.
    #[arg(long, env = "STOCKWEB_ALPHAVANTAGE_BASE_URL", default_value = DEFAULT_BASE_URL)]
    pub alphavantage_base_url: String,

    /// History depth requested upstream: compact (100 sessions) or full.
    #[arg(long, env = "STOCKWEB_OUTPUT_SIZE", default_value = "compact")]
    pub output_size: OutputSize,

    /// Upstream request timeout in milliseconds.
    #[arg(long, env = "STOCKWEB_REQUEST_TIMEOUT_MS", default_value_t = 5_000)]
    pub request_timeout_ms: u64,

    /// Upstream calls allowed per minute.
    #[arg(
        long,
        env = "STOCKWEB_QUOTA_PER_MINUTE",
        default_value_t = 5,
        value_parser = clap::value_parser!(u32).range(1..)
    )]
    pub quota_per_minute: u32,

    /// Directory of browser assets served for unmatched GET paths.
    #[arg(long, env = "STOCKWEB_STATIC_DIR")]
    pub static_dir: Option<PathBuf>,
}

impl ServerConfig {
    pub fn alphavantage(&self) -> AlphaVantageConfig {
        AlphaVantageConfig {
            api_key: self.alphavantage_api_key.clone(),
            base_url: self.alphavantage_base_url.clone(),
            output_size: self.output_size,
            timeout_ms: self.request_timeout_ms,
            quota_limit: self.quota_per_minute,
            quota_window: Duration::from_secs(60),
        }
    }
}

impl Debug for ServerConfig {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("ServerConfig")
            .field("bind", &self.bind)
            .field("alphavantage_api_key", &"<redacted>")
            .field("alphavantage_base_url", &self.alphavantage_base_url)
            .field("output_size", &self.output_size)
            .field("request_timeout_ms", &self.request_timeout_ms)
            .field("quota_per_minute", &self.quota_per_minute)
            .field("static_dir", &self.static_dir)
            .finish()
    }
}
