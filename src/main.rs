//! Stock News Alerting Bot
//!
//! Watches a stock news feed and a market data provider, and pushes
//! deduplicated, sentiment-annotated alerts to a notification channel.

use anyhow::Context;
use clap::{Parser, Subcommand};
use std::sync::Arc;
use stocknews_bot::{
    client::{BenzingaClient, MarketData, NewsFeed, YahooClient},
    config::Config,
    engine::AlertEngine,
    notify::Notifier,
    sentiment::SentimentAnalyzer,
    types::Ticker,
};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

#[derive(Parser)]
#[command(name = "stocknews-bot")]
#[command(about = "Stock news alerting bot with session-aware gainer detection")]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Config file path
    #[arg(short, long, default_value = "config.toml")]
    config: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the alerting engine
    Run,
    /// Show the current price for a ticker
    Price { ticker: String },
    /// Show recent news for a ticker, sentiment-annotated
    News { ticker: String },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    // Initialize logging
    tracing_subscriber::registry()
        .with(tracing_subscriber::fmt::layer())
        .with(tracing_subscriber::EnvFilter::from_default_env())
        .init();

    let cli = Cli::parse();

    // Load configuration
    let config = Config::load(&cli.config)?;

    match cli.command {
        Commands::Run => run_bot(config).await,
        Commands::Price { ticker } => show_price(config, &ticker).await,
        Commands::News { ticker } => show_news(config, &ticker).await,
    }
}

async fn run_bot(config: Config) -> anyhow::Result<()> {
    tracing::info!("Starting stock news alerting bot");

    let telegram = config
        .telegram
        .as_ref()
        .context("telegram.bot_token and telegram.chat_id are required to run the engine")?;

    let news = BenzingaClient::from_config(&config.news)?;
    let market = YahooClient::from_config(&config.market)?;
    let notifier = Notifier::new(telegram.bot_token.clone(), telegram.chat_id.clone());

    let engine = Arc::new(AlertEngine::new(
        config.engine.clone(),
        &config.session,
        config.news.ticker_page_size,
        news,
        market,
        notifier,
    )?);

    engine.run().await;
    Ok(())
}

async fn show_price(config: Config, raw: &str) -> anyhow::Result<()> {
    let ticker = parse_ticker(raw)?;
    let market = YahooClient::from_config(&config.market)?;

    let quote = market.quote(&ticker).await?;
    match quote.price {
        Some(price) => println!("${}: ${:.2}", ticker, price),
        None => println!("${}: price unavailable", ticker),
    }

    Ok(())
}

async fn show_news(config: Config, raw: &str) -> anyhow::Result<()> {
    let ticker = parse_ticker(raw)?;
    let news = BenzingaClient::from_config(&config.news)?;
    let analyzer = SentimentAnalyzer::new();

    let headlines = news
        .headlines_for(&ticker, config.news.ticker_page_size)
        .await?;
    if headlines.is_empty() {
        println!("No recent news for ${}", ticker);
        return Ok(());
    }

    for headline in &headlines {
        let sentiment = analyzer.classify(&headline.title);
        println!("{} [{}] {}", sentiment.emoji(), sentiment, headline.title);
        println!("   {}", headline.url);
    }

    Ok(())
}

fn parse_ticker(raw: &str) -> anyhow::Result<Ticker> {
    Ticker::parse(raw).ok_or_else(|| anyhow::anyhow!("invalid ticker symbol: {:?}", raw))
}
