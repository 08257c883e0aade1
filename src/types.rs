//! Core domain types shared across the engine and adapters

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A normalized (upper-cased) stock symbol.
///
/// This is the key identity used throughout the engine: two tickers are
/// equal iff their normalized strings are equal.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct Ticker(String);

impl Ticker {
    /// Normalize a raw symbol. Returns `None` for empty/whitespace input.
    pub fn parse(raw: &str) -> Option<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            None
        } else {
            Some(Self(trimmed.to_uppercase()))
        }
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Ticker {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry of a headline's `stocks` list as the feed delivers it.
///
/// The provider mixes bare symbol strings and `{"symbol": ...}` objects in
/// the same array, so this is an untagged union normalized to [`Ticker`]
/// at the adapter boundary.
#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum StockRef {
    Tagged { symbol: String },
    Bare(String),
}

impl StockRef {
    pub fn ticker(&self) -> Option<Ticker> {
        match self {
            StockRef::Tagged { symbol } => Ticker::parse(symbol),
            StockRef::Bare(symbol) => Ticker::parse(symbol),
        }
    }
}

/// One news item, immutable once fetched.
#[derive(Debug, Clone)]
pub struct Headline {
    pub title: String,
    pub url: String,
    /// Tickers mentioned by the headline, normalized, deduplicated,
    /// in feed order. May be empty.
    pub tickers: Vec<Ticker>,
    /// Source timestamp, when the feed provides a parseable one.
    pub published_at: Option<DateTime<Utc>>,
}

/// A point-in-time price observation. Transient, never persisted.
///
/// `price: None` signals "unavailable" (provider had neither a live price
/// nor a daily close); the eligibility filter fails closed on it.
#[derive(Debug, Clone)]
pub struct PriceQuote {
    pub ticker: Ticker,
    pub price: Option<Decimal>,
    pub observed_at: DateTime<Utc>,
}

/// One fixed-granularity intraday bar (5-minute by default).
#[derive(Debug, Clone)]
pub struct IntradayBar {
    pub timestamp: DateTime<Utc>,
    pub open: Decimal,
    pub close: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn ticker_normalizes_case_and_whitespace() {
        assert_eq!(Ticker::parse(" acme ").unwrap().as_str(), "ACME");
        assert_eq!(Ticker::parse("AAPL").unwrap().as_str(), "AAPL");
    }

    #[test]
    fn ticker_rejects_empty() {
        assert!(Ticker::parse("").is_none());
        assert!(Ticker::parse("   ").is_none());
    }

    #[test]
    fn ticker_equality_is_normalized() {
        assert_eq!(Ticker::parse("tsla"), Ticker::parse("TSLA"));
    }

    #[test]
    fn stock_ref_accepts_both_shapes() {
        let bare: StockRef = serde_json::from_str("\"nvda\"").unwrap();
        assert_eq!(bare.ticker().unwrap().as_str(), "NVDA");

        let tagged: StockRef = serde_json::from_str(r#"{"symbol": "amd"}"#).unwrap();
        assert_eq!(tagged.ticker().unwrap().as_str(), "AMD");
    }

    #[test]
    fn stock_ref_empty_symbol_yields_none() {
        let tagged: StockRef = serde_json::from_str(r#"{"symbol": ""}"#).unwrap();
        assert!(tagged.ticker().is_none());
    }
}
