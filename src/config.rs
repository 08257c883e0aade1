//! Configuration management

use rust_decimal::Decimal;
use serde::Deserialize;
use std::path::Path;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub news: NewsFeedConfig,
    #[serde(default)]
    pub market: MarketDataConfig,
    #[serde(default)]
    pub engine: EngineConfig,
    #[serde(default)]
    pub session: SessionConfig,
    pub telegram: Option<TelegramConfig>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct NewsFeedConfig {
    /// News API endpoint
    #[serde(default = "default_news_url")]
    pub api_url: String,
    /// News API token
    pub api_key: String,
    /// Channel/category filter
    #[serde(default = "default_news_channel")]
    pub channel: String,
    /// Page size for the polled news cycle
    #[serde(default = "default_page_size")]
    pub page_size: usize,
    /// Page size for per-ticker news queries
    #[serde(default = "default_ticker_page_size")]
    pub ticker_page_size: usize,
    /// Per-request timeout in seconds
    #[serde(default = "default_http_timeout")]
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MarketDataConfig {
    /// Market data endpoint (Yahoo-chart style)
    pub api_url: String,
    /// Intraday bar granularity, e.g. "5m"
    pub bar_interval: String,
    /// Per-request timeout in seconds
    pub timeout_secs: u64,
}

#[derive(Debug, Clone, Deserialize)]
pub struct EngineConfig {
    /// News poll interval in seconds
    pub news_poll_interval_secs: u64,
    /// Gainer summary interval in seconds
    pub summary_interval_secs: u64,
    /// How long a gainer detection stays in the registry (minutes)
    pub gainer_retention_mins: i64,
    /// Intraday gain threshold in percent
    pub gain_threshold_pct: Decimal,
    /// Lower bound of the alertable price band (inclusive)
    pub min_price: Decimal,
    /// Upper bound of the alertable price band (inclusive)
    pub max_price: Decimal,
}

/// Market timezone and session boundaries.
///
/// Boundaries are fixed configuration, not exchange calendars: no holiday
/// or weekend awareness. Times are "HH:MM" in the market's local timezone.
#[derive(Debug, Clone, Deserialize)]
pub struct SessionConfig {
    /// Market timezone as a fixed UTC offset in hours (Eastern = -5)
    pub utc_offset_hours: i32,
    pub premarket_open: String,
    pub regular_open: String,
    pub regular_close: String,
    pub postmarket_close: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct TelegramConfig {
    /// Bot token
    pub bot_token: String,
    /// Destination chat ID
    pub chat_id: String,
}

fn default_news_url() -> String {
    "https://api.benzinga.com/api/v2".to_string()
}

fn default_news_channel() -> String {
    "stock".to_string()
}

fn default_page_size() -> usize {
    30
}

fn default_ticker_page_size() -> usize {
    5
}

fn default_http_timeout() -> u64 {
    10
}

impl Config {
    /// Load configuration from file, with environment overrides
    pub fn load<P: AsRef<Path>>(path: P) -> anyhow::Result<Self> {
        let path = path.as_ref().to_str().ok_or_else(|| {
            anyhow::anyhow!("config path is not valid UTF-8")
        })?;
        let settings = config::Config::builder()
            .add_source(config::File::with_name(path))
            .add_source(config::Environment::with_prefix("STOCKNEWS").separator("__"))
            .build()?;

        let config: Config = settings.try_deserialize()?;
        Ok(config)
    }

    /// Load from default locations
    pub fn load_default() -> anyhow::Result<Self> {
        let paths = ["config.toml", "~/.config/stocknews-bot/config.toml"];

        for path in paths {
            let expanded = shellexpand::tilde(path);
            if Path::new(expanded.as_ref()).exists() {
                return Self::load(expanded.as_ref());
            }
        }

        anyhow::bail!("No configuration file found")
    }
}

impl Default for MarketDataConfig {
    fn default() -> Self {
        Self {
            api_url: "https://query1.finance.yahoo.com".to_string(),
            bar_interval: "5m".to_string(),
            timeout_secs: default_http_timeout(),
        }
    }
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            news_poll_interval_secs: 120,
            summary_interval_secs: 600,
            gainer_retention_mins: 30,
            gain_threshold_pct: Decimal::new(10, 0),  // 10%
            min_price: Decimal::new(10, 2),           // $0.10
            max_price: Decimal::new(1000, 2),         // $10.00
        }
    }
}

impl Default for SessionConfig {
    fn default() -> Self {
        Self {
            utc_offset_hours: -5, // US Eastern, DST ignored
            premarket_open: "04:00".to_string(),
            regular_open: "09:30".to_string(),
            regular_close: "16:00".to_string(),
            postmarket_close: "20:00".to_string(),
        }
    }
}
