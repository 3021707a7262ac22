//! Wallet balance growth alert job.
//!
//! Checks one wallet's token balances across several chains against a
//! short historical window and pushes a Telegram message for every token
//! whose USD value rose past the configured percentage. Runs a single pass
//! by default so an external scheduler owns the cadence; set
//! `RUN_INTERVAL_SECS` to keep it running in a loop instead.

mod config;
mod job;

use std::sync::Arc;

use anyhow::Result;
use clients_covalent::{CovalentClient, CovalentClientConfig};
use clients_telegrambot::{TelegramBot, TelegramBotConfig};
use tracing::error;
use tracing_subscriber::EnvFilter;

use config::JobConfig;

fn init_logging() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_target(false)
        .compact()
        .init();
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();
    init_logging();

    let config = match JobConfig::from_env() {
        Ok(config) => config,
        Err(err) => {
            // Nothing to report to the scheduler; log and end the run.
            error!("bad config: {:#}", err);
            return Ok(());
        }
    };

    let http = Arc::new(reqwest::Client::builder().build()?);
    let covalent = CovalentClient::new(
        Arc::clone(&http),
        CovalentClientConfig::new(config.api_token.clone()),
    );
    let telegram = TelegramBot::new(
        http,
        TelegramBotConfig::new(config.bot_token.clone(), config.bot_chat.clone()),
    );

    match config.run_interval {
        Some(interval) => loop {
            job::run_job(&config, &covalent, &telegram).await;
            tokio::time::sleep(interval).await;
        },
        None => {
            job::run_job(&config, &covalent, &telegram).await;
        }
    }

    Ok(())
}
