use crate::infrastructure::mock::MockBehavior;
use clap::{Args, ValueEnum};
use std::path::PathBuf;
use std::time::Duration;

pub const DEFAULT_ORDER_API_URL: &str = "http://localhost:3002";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum LogFormat {
    #[default]
    Text,
    Json,
}

/// Runtime configuration. Every option can also be set through the
/// environment (or a `.env` file).
#[derive(Debug, Clone, Args)]
pub struct AppConfig {
    /// Path to persistent database (optional). If provided, uses RocksDB.
    #[arg(long, env = "PAYMENTS_DB_PATH", global = true)]
    pub db_path: Option<PathBuf>,

    /// Base URL of the payment provider. Without it a mock provider is used.
    #[arg(long, env = "MOCK_PAYMENT_SERVICE_URL", global = true)]
    pub provider_url: Option<String>,

    /// Answer given by the mock provider.
    #[arg(
        long,
        env = "MOCK_PROVIDER_BEHAVIOR",
        value_enum,
        default_value_t = MockBehavior::Approve,
        global = true
    )]
    pub mock_provider: MockBehavior,

    /// Base URL of the order service used to confirm approved orders.
    #[arg(long, env = "ORDER_API_URL", default_value = DEFAULT_ORDER_API_URL, global = true)]
    pub order_api_url: String,

    /// Timeout applied to every outgoing HTTP request, in milliseconds.
    #[arg(long, env = "HTTP_TIMEOUT_MS", default_value_t = 5000, global = true)]
    pub http_timeout_ms: u64,

    #[arg(
        long,
        env = "LOG_FORMAT",
        value_enum,
        default_value_t = LogFormat::Text,
        global = true
    )]
    pub log_format: LogFormat,
}

impl AppConfig {
    pub fn http_timeout(&self) -> Duration {
        Duration::from_millis(self.http_timeout_ms)
    }
}
