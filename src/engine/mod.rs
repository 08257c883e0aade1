//! Alert engine
//!
//! The orchestrator: runs the periodic news cycle and the periodic gainer
//! summary cycle, owns all engine state (sent set, gainer registry, the
//! news-cycle mutex), and serves the command surface the chat glue calls.

pub mod filter;
pub mod gainer;


use crate::client::{MarketData, NewsFeed};
use crate::config::{EngineConfig, SessionConfig};
use crate::error::Result;
use crate::notify::{format_gainer_summary, format_headline_alert, NotificationSink};
use crate::sentiment::SentimentAnalyzer;
use crate::session::{SessionClock, SessionWindow};
use crate::types::{Headline, Ticker};
use chrono::{DateTime, Duration as ChronoDuration, Utc};
use filter::PriceBand;
use gainer::GainerDetector;
use parking_lot::RwLock;
use std::collections::{BTreeMap, HashMap, HashSet};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;
use tokio::time::interval;
use tracing::{debug, info, warn};

/// When and in which session a ticker crossed the gain threshold.
#[derive(Debug, Clone)]
pub struct GainerRecord {
    pub detected_at: DateTime<Utc>,
    pub session: SessionWindow,
}

/// Commands the external chat collaborator forwards to the engine.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Refresh,
    Price(Ticker),
    News(Ticker),
    Gainers,
}

/// Outcome of an on-demand refresh request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RefreshOutcome {
    Completed,
    AlreadyRunning,
}

pub struct AlertEngine<N, M, S> {
    config: EngineConfig,
    ticker_news_limit: usize,
    news: N,
    market: M,
    sink: S,
    analyzer: SentimentAnalyzer,
    band: PriceBand,
    detector: GainerDetector,
    /// Tickers already alerted on. Permanent for the process lifetime:
    /// deliberately no TTL, so follow-up news about an alerted ticker
    /// stays suppressed until restart.
    sent: RwLock<HashSet<Ticker>>,
    /// Gainer registry, pruned lazily at flush and query time.
    gainers: RwLock<HashMap<Ticker, GainerRecord>>,
    /// Serializes entry into the news cycle body, for the scheduled and
    /// the on-demand trigger alike.
    news_lock: Mutex<()>,
}

impl<N, M, S> AlertEngine<N, M, S>
where
    N: NewsFeed,
    M: MarketData,
    S: NotificationSink,
{
    pub fn new(
        config: EngineConfig,
        session: &SessionConfig,
        ticker_news_limit: usize,
        news: N,
        market: M,
        sink: S,
    ) -> Result<Self> {
        let clock = SessionClock::from_config(session)?;
        let detector = GainerDetector::new(clock, config.gain_threshold_pct);
        let band = PriceBand::new(config.min_price, config.max_price);

        Ok(Self {
            config,
            ticker_news_limit,
            news,
            market,
            sink,
            analyzer: SentimentAnalyzer::new(),
            band,
            detector,
            sent: RwLock::new(HashSet::new()),
            gainers: RwLock::new(HashMap::new()),
            news_lock: Mutex::new(()),
        })
    }

    /// Run both cycles until the process is stopped.
    pub async fn run(self: Arc<Self>)
    where
        N: 'static,
        M: 'static,
        S: 'static,
    {
        info!(
            "Engine started: news every {}s, summaries every {}s",
            self.config.news_poll_interval_secs, self.config.summary_interval_secs
        );
        self.emit("🤖 Stock news bot is online").await;

        let engine = Arc::clone(&self);
        let news_task = tokio::spawn(async move { engine.news_loop().await });

        let engine = Arc::clone(&self);
        let summary_task = tokio::spawn(async move { engine.summary_loop().await });

        let _ = tokio::join!(news_task, summary_task);
    }

    async fn news_loop(&self) {
        let mut ticker = interval(Duration::from_secs(self.config.news_poll_interval_secs));
        loop {
            ticker.tick().await;
            let _guard = self.news_lock.lock().await;
            self.news_cycle(Utc::now()).await;
        }
    }

    async fn summary_loop(&self) {
        let mut ticker = interval(Duration::from_secs(self.config.summary_interval_secs));
        loop {
            ticker.tick().await;
            self.summary_cycle(Utc::now()).await;
        }
    }

    /// Trigger an immediate news cycle. Reports `AlreadyRunning` without
    /// doing any work when a cycle already holds the lock; deferred runs
    /// are never queued.
    pub async fn refresh_now(&self) -> RefreshOutcome {
        match self.news_lock.try_lock() {
            Ok(_guard) => {
                self.news_cycle(Utc::now()).await;
                RefreshOutcome::Completed
            }
            Err(_) => RefreshOutcome::AlreadyRunning,
        }
    }

    /// One news cycle. Caller must hold `news_lock`.
    async fn news_cycle(&self, now: DateTime<Utc>) {
        let headlines = match self.news.latest_headlines().await {
            Ok(headlines) => headlines,
            Err(e) => {
                // Degrade to an empty page; the next scheduled cycle retries.
                warn!("News fetch failed: {}", e);
                Vec::new()
            }
        };
        debug!("News cycle: {} headlines", headlines.len());

        for headline in &headlines {
            self.alert_first_eligible(headline).await;

            // Independent of alerting: every mentioned ticker gets a
            // gainer check.
            for ticker in &headline.tickers {
                self.check_gainer(ticker, now).await;
            }
        }
    }

    /// Scan a headline's tickers in feed order and alert on the first one
    /// that is both unsent and eligible. At most one alert per headline.
    async fn alert_first_eligible(&self, headline: &Headline) {
        for ticker in &headline.tickers {
            if self.sent.read().contains(ticker) {
                continue;
            }

            let quote = match self.market.quote(ticker).await {
                Ok(quote) => quote,
                Err(e) => {
                    warn!("Price fetch failed for {}: {}", ticker, e);
                    continue;
                }
            };
            if !self.band.is_eligible(&quote) {
                continue;
            }

            let sentiment = self.analyzer.classify(&headline.title);
            info!("Alerting on {} ({}): {}", ticker, sentiment, headline.title);
            self.emit(&format_headline_alert(
                sentiment,
                ticker,
                &headline.title,
                &headline.url,
            ))
            .await;

            // Marked sent even when delivery failed, so a flaky channel
            // does not get flooded with repeated attempts.
            self.sent.write().insert(ticker.clone());

            // Pace consecutive alerts.
            tokio::time::sleep(Duration::from_secs(1)).await;
            break;
        }
    }

    async fn check_gainer(&self, ticker: &Ticker, now: DateTime<Utc>) {
        let check = self.detector.detect(&self.market, ticker, now).await;
        let Some(session) = check.session else {
            return;
        };
        if check.is_gainer && session != SessionWindow::Closed {
            debug!("Gainer detected: {} in {} session", ticker, session);
            // Most recent detection wins.
            self.gainers.write().insert(
                ticker.clone(),
                GainerRecord {
                    detected_at: now,
                    session,
                },
            );
        }
    }

    /// One summary cycle: prune, then emit one message per session group.
    /// Silent when nothing survives pruning.
    async fn summary_cycle(&self, now: DateTime<Utc>) {
        for (session, tickers) in self.gainer_groups(now) {
            self.emit(&format_gainer_summary(session, &tickers)).await;
        }
    }

    /// Prune records older than the retention window, then group the
    /// survivors by the session recorded at detection, tickers sorted.
    fn gainer_groups(&self, now: DateTime<Utc>) -> BTreeMap<SessionWindow, Vec<Ticker>> {
        let cutoff = now - ChronoDuration::minutes(self.config.gainer_retention_mins);

        let mut groups: BTreeMap<SessionWindow, Vec<Ticker>> = BTreeMap::new();
        {
            let mut registry = self.gainers.write();
            registry.retain(|_, record| record.detected_at >= cutoff);
            for (ticker, record) in registry.iter() {
                groups.entry(record.session).or_default().push(ticker.clone());
            }
        }
        for tickers in groups.values_mut() {
            tickers.sort();
        }
        groups
    }

    /// Serve one command from the chat collaborator, returning the reply.
    pub async fn handle(&self, command: Command) -> String {
        match command {
            Command::Status => "✅ Bot is online and running".to_string(),
            Command::Refresh => match self.refresh_now().await {
                RefreshOutcome::Completed => "✅ News refresh completed".to_string(),
                RefreshOutcome::AlreadyRunning => {
                    "⏳ News refresh is already in progress, please wait".to_string()
                }
            },
            Command::Price(ticker) => match self.market.quote(&ticker).await {
                Ok(quote) => match quote.price {
                    Some(price) => format!("${}: ${:.2}", ticker, price),
                    None => format!("${}: price unavailable", ticker),
                },
                Err(e) => {
                    warn!("Price query failed for {}: {}", ticker, e);
                    format!("${}: price unavailable", ticker)
                }
            },
            Command::News(ticker) => {
                match self.news.headlines_for(&ticker, self.ticker_news_limit).await {
                    Ok(headlines) if headlines.is_empty() => {
                        format!("No recent news for ${}", ticker)
                    }
                    Ok(headlines) => headlines
                        .iter()
                        .map(|h| {
                            let sentiment = self.analyzer.classify(&h.title);
                            format!("{} {}\n{}", sentiment.emoji(), h.title, h.url)
                        })
                        .collect::<Vec<_>>()
                        .join("\n\n"),
                    Err(e) => {
                        warn!("News query failed for {}: {}", ticker, e);
                        format!("Could not fetch news for ${}", ticker)
                    }
                }
            }
            Command::Gainers => {
                let groups = self.gainer_groups(Utc::now());
                if groups.is_empty() {
                    "No session gainers tracked right now".to_string()
                } else {
                    groups
                        .into_iter()
                        .map(|(session, tickers)| format_gainer_summary(session, &tickers))
                        .collect::<Vec<_>>()
                        .join("\n")
                }
            }
        }
    }

    /// Deliver through the sink; delivery failure never fails a cycle.
    async fn emit(&self, text: &str) {
        if let Err(e) = self.sink.deliver(text).await {
            warn!("Notification delivery failed: {}", e);
        }
    }
}
