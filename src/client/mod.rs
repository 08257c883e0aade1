//! External data provider adapters
//!
//! - News feed: Benzinga-style headline API
//! - Market data: Yahoo-chart-style price and intraday history API
//!
//! The engine depends on the [`NewsFeed`] and [`MarketData`] traits so
//! tests can substitute the mock adapters.

mod market;
pub mod mock;
mod news;

pub use market::YahooClient;
pub use news::BenzingaClient;

use crate::error::Result;
use crate::types::{Headline, IntradayBar, PriceQuote, Ticker};
use async_trait::async_trait;

/// News provider seam.
#[async_trait]
pub trait NewsFeed: Send + Sync {
    /// One page of the latest headlines for the configured channel.
    async fn latest_headlines(&self) -> Result<Vec<Headline>>;

    /// Recent headlines mentioning a single ticker.
    async fn headlines_for(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Headline>>;
}

/// Market data provider seam.
#[async_trait]
pub trait MarketData: Send + Sync {
    /// Current price: live regular-market price preferred, most recent
    /// close as fallback, `price: None` when neither is obtainable.
    async fn quote(&self, ticker: &Ticker) -> Result<PriceQuote>;

    /// The current trading day's intraday bars at fixed granularity.
    async fn intraday(&self, ticker: &Ticker) -> Result<Vec<IntradayBar>>;
}
