//! Tests for notify module

use super::{format_gainer_summary, format_headline_alert, NotificationSink, Notifier};
use crate::sentiment::Sentiment;
use crate::session::SessionWindow;
use crate::types::Ticker;

fn ticker(sym: &str) -> Ticker {
    Ticker::parse(sym).unwrap()
}

#[test]
fn headline_alert_contains_all_parts() {
    let text = format_headline_alert(
        Sentiment::Positive,
        &ticker("ACME"),
        "Acme Corp announces record profit",
        "http://x",
    );
    assert!(text.contains("$ACME"));
    assert!(text.contains("Positive"));
    assert!(text.contains("Acme Corp announces record profit"));
    assert!(text.contains("http://x"));
}

#[test]
fn headline_alert_carries_sentiment_emoji() {
    let positive = format_headline_alert(Sentiment::Positive, &ticker("A"), "t", "u");
    let negative = format_headline_alert(Sentiment::Negative, &ticker("A"), "t", "u");
    assert!(positive.starts_with(Sentiment::Positive.emoji()));
    assert!(negative.starts_with(Sentiment::Negative.emoji()));
}

#[test]
fn gainer_summary_is_worded_per_session() {
    let text = format_gainer_summary(SessionWindow::Regular, &[ticker("ACME")]);
    assert!(text.contains("Regular gainers: $ACME"));
}

#[test]
fn gainer_summary_joins_multiple_tickers() {
    let text = format_gainer_summary(
        SessionWindow::PreMarket,
        &[ticker("AA"), ticker("ZZ")],
    );
    assert!(text.contains("Pre-market gainers: $AA, $ZZ"));
}

#[test]
fn notifier_clone() {
    let notifier = Notifier::new("token".to_string(), "chat".to_string());
    let _ = notifier.clone();
}

#[tokio::test]
async fn disabled_notifier_send_is_ok() {
    let notifier = Notifier::disabled();
    assert!(notifier.send("test message").await.is_ok());
}

#[tokio::test]
async fn disabled_notifier_deliver_is_ok() {
    let notifier = Notifier::disabled();
    assert!(notifier.deliver("test message").await.is_ok());
}
