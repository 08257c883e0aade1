//! Mock adapters for testing
//!
//! Builder-style doubles for the news feed, market data provider, and
//! notification sink, so engine tests run without network calls and can
//! assert on exactly what was emitted.

use crate::client::{MarketData, NewsFeed};
use crate::error::{BotError, Result};
use crate::notify::NotificationSink;
use crate::types::{Headline, IntradayBar, PriceQuote, Ticker};
use async_trait::async_trait;
use chrono::Utc;
use parking_lot::{Mutex, RwLock};
use rust_decimal::Decimal;
use std::collections::HashMap;
use std::sync::Arc;

/// Mock news feed serving a fixed (but swappable) page of headlines.
/// Clones share the same page, so a test can keep a handle after the
/// engine takes ownership.
#[derive(Clone, Default)]
pub struct MockNewsFeed {
    headlines: Arc<RwLock<Vec<Headline>>>,
    simulate_failures: bool,
}

impl MockNewsFeed {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_headlines(self, headlines: Vec<Headline>) -> Self {
        *self.headlines.write() = headlines;
        self
    }

    pub fn with_failures(mut self) -> Self {
        self.simulate_failures = true;
        self
    }

    /// Replace the served page, e.g. between simulated cycles.
    pub fn set_headlines(&self, headlines: Vec<Headline>) {
        *self.headlines.write() = headlines;
    }
}

#[async_trait]
impl NewsFeed for MockNewsFeed {
    async fn latest_headlines(&self) -> Result<Vec<Headline>> {
        if self.simulate_failures {
            return Err(BotError::Api("mock news failure".into()));
        }
        Ok(self.headlines.read().clone())
    }

    async fn headlines_for(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Headline>> {
        if self.simulate_failures {
            return Err(BotError::Api("mock news failure".into()));
        }
        Ok(self
            .headlines
            .read()
            .iter()
            .filter(|h| h.tickers.contains(ticker))
            .take(limit)
            .cloned()
            .collect())
    }
}

/// Mock market data provider with per-ticker quotes and bar series.
#[derive(Default)]
pub struct MockMarketData {
    quotes: HashMap<Ticker, Option<Decimal>>,
    bars: HashMap<Ticker, Vec<IntradayBar>>,
    simulate_failures: bool,
}

impl MockMarketData {
    pub fn new() -> Self {
        Self::default()
    }

    /// `None` models a ticker whose price is unavailable.
    pub fn with_quote(mut self, ticker: &Ticker, price: Option<Decimal>) -> Self {
        self.quotes.insert(ticker.clone(), price);
        self
    }

    pub fn with_bars(mut self, ticker: &Ticker, bars: Vec<IntradayBar>) -> Self {
        self.bars.insert(ticker.clone(), bars);
        self
    }

    pub fn with_failures(mut self) -> Self {
        self.simulate_failures = true;
        self
    }
}

#[async_trait]
impl MarketData for MockMarketData {
    async fn quote(&self, ticker: &Ticker) -> Result<PriceQuote> {
        if self.simulate_failures {
            return Err(BotError::Api("mock market failure".into()));
        }
        Ok(PriceQuote {
            ticker: ticker.clone(),
            price: self.quotes.get(ticker).copied().flatten(),
            observed_at: Utc::now(),
        })
    }

    async fn intraday(&self, ticker: &Ticker) -> Result<Vec<IntradayBar>> {
        if self.simulate_failures {
            return Err(BotError::Api("mock market failure".into()));
        }
        Ok(self.bars.get(ticker).cloned().unwrap_or_default())
    }
}

/// Sink that records every delivered message.
#[derive(Clone, Default)]
pub struct RecordingSink {
    messages: Arc<Mutex<Vec<String>>>,
    simulate_failures: bool,
}

impl RecordingSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record the attempt but report delivery as failed.
    pub fn with_failures(mut self) -> Self {
        self.simulate_failures = true;
        self
    }

    pub fn messages(&self) -> Vec<String> {
        self.messages.lock().clone()
    }
}

#[async_trait]
impl NotificationSink for RecordingSink {
    async fn deliver(&self, text: &str) -> Result<()> {
        self.messages.lock().push(text.to_string());
        if self.simulate_failures {
            return Err(BotError::Notify("mock delivery failure".into()));
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn ticker(sym: &str) -> Ticker {
        Ticker::parse(sym).unwrap()
    }

    fn headline(title: &str, symbols: &[&str]) -> Headline {
        Headline {
            title: title.to_string(),
            url: format!("http://example.com/{}", title.len()),
            tickers: symbols.iter().filter_map(|s| Ticker::parse(s)).collect(),
            published_at: Some(Utc::now()),
        }
    }

    #[tokio::test]
    async fn mock_feed_serves_and_swaps_pages() {
        let feed = MockNewsFeed::new().with_headlines(vec![headline("one", &["AAA"])]);
        assert_eq!(feed.latest_headlines().await.unwrap().len(), 1);

        feed.set_headlines(vec![]);
        assert!(feed.latest_headlines().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn mock_feed_filters_per_ticker() {
        let feed = MockNewsFeed::new().with_headlines(vec![
            headline("one", &["AAA"]),
            headline("two", &["BBB"]),
        ]);
        let hits = feed.headlines_for(&ticker("BBB"), 5).await.unwrap();
        assert_eq!(hits.len(), 1);
        assert_eq!(hits[0].title, "two");
    }

    #[tokio::test]
    async fn mock_market_unknown_ticker_has_no_price() {
        let market = MockMarketData::new().with_quote(&ticker("AAA"), Some(dec!(3.5)));
        assert_eq!(
            market.quote(&ticker("AAA")).await.unwrap().price,
            Some(dec!(3.5))
        );
        assert_eq!(market.quote(&ticker("ZZZ")).await.unwrap().price, None);
    }

    #[tokio::test]
    async fn failure_simulation_errors_out() {
        let feed = MockNewsFeed::new().with_failures();
        assert!(feed.latest_headlines().await.is_err());

        let market = MockMarketData::new().with_failures();
        assert!(market.intraday(&ticker("AAA")).await.is_err());
    }

    #[tokio::test]
    async fn recording_sink_captures_failed_attempts_too() {
        let sink = RecordingSink::new().with_failures();
        assert!(sink.deliver("hello").await.is_err());
        assert_eq!(sink.messages(), vec!["hello".to_string()]);
    }
}
