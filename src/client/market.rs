//! Yahoo chart API client for market data
//!
//! A single chart request per ticker serves both query forms: the current
//! price (live regular-market price, falling back to the most recent
//! close) and the intraday bar series for the current trading day.

use crate::client::MarketData;
use crate::config::MarketDataConfig;
use crate::error::{BotError, Result};
use crate::types::{IntradayBar, PriceQuote, Ticker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use rust_decimal::prelude::FromPrimitive;
use rust_decimal::Decimal;
use serde::Deserialize;

pub struct YahooClient {
    http: Client,
    base_url: String,
    bar_interval: String,
}

#[derive(Debug, Deserialize)]
struct ChartResponse {
    chart: Chart,
}

#[derive(Debug, Deserialize)]
struct Chart {
    result: Option<Vec<ChartResult>>,
}

#[derive(Debug, Deserialize)]
struct ChartResult {
    meta: ChartMeta,
    timestamp: Option<Vec<i64>>,
    indicators: Indicators,
}

#[derive(Debug, Deserialize)]
struct ChartMeta {
    #[serde(rename = "regularMarketPrice")]
    regular_market_price: Option<f64>,
}

#[derive(Debug, Deserialize)]
struct Indicators {
    quote: Vec<QuoteBlock>,
}

/// Parallel arrays aligned with `timestamp`; null slots mark bars the
/// provider has no data for.
#[derive(Debug, Deserialize, Default)]
struct QuoteBlock {
    open: Option<Vec<Option<f64>>>,
    close: Option<Vec<Option<f64>>>,
}

impl YahooClient {
    pub fn from_config(cfg: &MarketDataConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            bar_interval: cfg.bar_interval.clone(),
        })
    }

    async fn fetch_chart(&self, ticker: &Ticker) -> Result<ChartResult> {
        let url = format!("{}/v8/finance/chart/{}", self.base_url, ticker);
        let resp: ChartResponse = self
            .http
            .get(&url)
            .query(&[("interval", self.bar_interval.as_str()), ("range", "1d")])
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        resp.chart
            .result
            .and_then(|mut r| if r.is_empty() { None } else { Some(r.remove(0)) })
            .ok_or_else(|| BotError::Api(format!("no chart data for {}", ticker)))
    }
}

#[async_trait]
impl MarketData for YahooClient {
    async fn quote(&self, ticker: &Ticker) -> Result<PriceQuote> {
        let chart = self.fetch_chart(ticker).await?;
        Ok(PriceQuote {
            ticker: ticker.clone(),
            price: current_price(&chart),
            observed_at: Utc::now(),
        })
    }

    async fn intraday(&self, ticker: &Ticker) -> Result<Vec<IntradayBar>> {
        let chart = self.fetch_chart(ticker).await?;
        Ok(bars_of(&chart))
    }
}

/// Live regular-market price when present, otherwise the most recent
/// non-null close. `None` when neither is obtainable.
fn current_price(chart: &ChartResult) -> Option<Decimal> {
    if let Some(live) = chart.meta.regular_market_price {
        if let Some(price) = Decimal::from_f64(live) {
            return Some(price);
        }
    }

    chart
        .indicators
        .quote
        .first()
        .and_then(|q| q.close.as_ref())
        .and_then(|closes| closes.iter().rev().find_map(|c| *c))
        .and_then(Decimal::from_f64)
}

/// Zip the timestamp/open/close arrays into bars, skipping null slots.
fn bars_of(chart: &ChartResult) -> Vec<IntradayBar> {
    let Some(timestamps) = chart.timestamp.as_ref() else {
        return Vec::new();
    };
    let Some(block) = chart.indicators.quote.first() else {
        return Vec::new();
    };
    let (Some(opens), Some(closes)) = (block.open.as_ref(), block.close.as_ref()) else {
        return Vec::new();
    };

    timestamps
        .iter()
        .enumerate()
        .filter_map(|(i, ts)| {
            let open = Decimal::from_f64(opens.get(i).copied().flatten()?)?;
            let close = Decimal::from_f64(closes.get(i).copied().flatten()?)?;
            let timestamp = DateTime::<Utc>::from_timestamp(*ts, 0)?;
            Some(IntradayBar {
                timestamp,
                open,
                close,
            })
        })
        .collect()
}
