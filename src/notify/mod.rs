//! Notification channel
//!
//! Sends news alerts and gainer summaries to Telegram. Delivery failures
//! are logged and swallowed: the channel is best-effort and must never
//! fail an engine cycle.

#[cfg(test)]
mod tests;

use crate::error::Result;
use crate::sentiment::Sentiment;
use crate::session::SessionWindow;
use crate::types::Ticker;
use async_trait::async_trait;
use reqwest::Client;
use serde::Serialize;

/// The engine's outbound seam. Implementations must treat delivery as
/// best-effort; a returned error is logged by the caller, never retried.
#[async_trait]
pub trait NotificationSink: Send + Sync {
    async fn deliver(&self, text: &str) -> Result<()>;
}

/// Telegram notifier
#[derive(Clone)]
pub struct Notifier {
    http: Client,
    bot_token: String,
    chat_id: String,
    enabled: bool,
}

#[derive(Debug, Serialize)]
struct TelegramMessage {
    chat_id: String,
    text: String,
}

impl Notifier {
    pub fn new(bot_token: String, chat_id: String) -> Self {
        Self {
            http: Client::new(),
            bot_token,
            chat_id,
            enabled: true,
        }
    }

    /// A notifier that accepts every message and sends nothing. For tests
    /// and unconfigured point-query runs.
    pub fn disabled() -> Self {
        Self {
            http: Client::new(),
            bot_token: String::new(),
            chat_id: String::new(),
            enabled: false,
        }
    }

    /// Send a plain-text message. Failures are logged, not returned.
    pub async fn send(&self, text: &str) -> Result<()> {
        if !self.enabled {
            return Ok(());
        }

        let url = format!("https://api.telegram.org/bot{}/sendMessage", self.bot_token);
        let msg = TelegramMessage {
            chat_id: self.chat_id.clone(),
            text: text.to_string(),
        };

        match self.http.post(&url).json(&msg).send().await {
            Ok(response) if !response.status().is_success() => {
                let error_text = response.text().await.unwrap_or_default();
                tracing::warn!("Telegram send failed: {}", error_text);
            }
            Err(e) => {
                tracing::warn!("Telegram send failed: {}", e);
            }
            Ok(_) => {}
        }

        Ok(())
    }
}

#[async_trait]
impl NotificationSink for Notifier {
    async fn deliver(&self, text: &str) -> Result<()> {
        self.send(text).await
    }
}

/// One news alert: sentiment label, ticker, title, URL.
pub fn format_headline_alert(
    sentiment: Sentiment,
    ticker: &Ticker,
    title: &str,
    url: &str,
) -> String {
    format!(
        "{} ${} ({}): {}\n{}",
        sentiment.emoji(),
        ticker,
        sentiment,
        title,
        url
    )
}

/// One summary line per session group, tickers pre-sorted by the caller.
pub fn format_gainer_summary(session: SessionWindow, tickers: &[Ticker]) -> String {
    let list = tickers
        .iter()
        .map(|t| format!("${}", t))
        .collect::<Vec<_>>()
        .join(", ");
    format!("📈 {} gainers: {}", session, list)
}
