//! Benzinga news API client
//!
//! Fetches pages of recent headlines, each tagged with zero or more
//! ticker symbols. The feed mixes bare strings and `{"symbol": ...}`
//! objects in the `stocks` array; both are normalized here.

use crate::client::NewsFeed;
use crate::config::NewsFeedConfig;
use crate::error::Result;
use crate::types::{Headline, StockRef, Ticker};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use reqwest::Client;
use serde::Deserialize;

pub struct BenzingaClient {
    http: Client,
    base_url: String,
    api_key: String,
    channel: String,
    page_size: usize,
}

#[derive(Debug, Deserialize)]
struct RawHeadline {
    #[serde(default)]
    title: String,
    #[serde(default)]
    url: String,
    created: Option<String>,
    #[serde(default)]
    stocks: Vec<StockRef>,
}

impl BenzingaClient {
    pub fn from_config(cfg: &NewsFeedConfig) -> Result<Self> {
        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(cfg.timeout_secs))
            .build()?;

        Ok(Self {
            http,
            base_url: cfg.api_url.trim_end_matches('/').to_string(),
            api_key: cfg.api_key.clone(),
            channel: cfg.channel.clone(),
            page_size: cfg.page_size,
        })
    }

    async fn fetch(&self, extra: &[(&str, String)]) -> Result<Vec<Headline>> {
        let url = format!("{}/news", self.base_url);
        let mut query: Vec<(&str, String)> = vec![
            ("token", self.api_key.clone()),
            ("channels", self.channel.clone()),
        ];
        query.extend(extra.iter().cloned());

        let resp: Vec<RawHeadline> = self
            .http
            .get(&url)
            .header("Accept", "application/json")
            .query(&query)
            .send()
            .await?
            .error_for_status()?
            .json()
            .await?;

        Ok(resp.into_iter().map(parse_headline).collect())
    }
}

#[async_trait]
impl NewsFeed for BenzingaClient {
    async fn latest_headlines(&self) -> Result<Vec<Headline>> {
        self.fetch(&[("pagesize", self.page_size.to_string())]).await
    }

    async fn headlines_for(&self, ticker: &Ticker, limit: usize) -> Result<Vec<Headline>> {
        self.fetch(&[
            ("tickers", ticker.to_string()),
            ("pagesize", limit.to_string()),
        ])
        .await
    }
}

fn parse_headline(raw: RawHeadline) -> Headline {
    let mut tickers: Vec<Ticker> = Vec::new();
    for entry in &raw.stocks {
        if let Some(ticker) = entry.ticker() {
            if !tickers.contains(&ticker) {
                tickers.push(ticker);
            }
        }
    }

    let published_at = raw
        .created
        .as_deref()
        .and_then(|s| DateTime::parse_from_rfc2822(s).ok())
        .map(|dt| dt.with_timezone(&Utc));

    Headline {
        title: raw.title,
        url: raw.url,
        tickers,
        published_at,
    }
}
