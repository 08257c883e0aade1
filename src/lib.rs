//! Stock News Alerting Bot
//!
//! Polls a news feed for breaking stock headlines, cross-references each
//! mentioned ticker against live price and intraday-movement data, and
//! emits deduplicated, sentiment-annotated, session-aware alerts to a
//! notification channel.

pub mod client;
pub mod config;
pub mod engine;
pub mod error;
pub mod notify;
pub mod sentiment;
pub mod session;
pub mod types;
