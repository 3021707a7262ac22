//! Job configuration from environment variables.

use std::collections::HashMap;
use std::str::FromStr;
use std::time::Duration;

use anyhow::{bail, Context, Result};
use clients_covalent::Chain;
use growth::DEFAULT_MIN_BALANCE;

/// Default lookback window in days.
const DEFAULT_DAYS: u32 = 3;

/// Everything the job needs, read once at startup and immutable for the
/// run. A missing or empty required variable aborts the run before any
/// network call.
#[derive(Debug, Clone)]
pub struct JobConfig {
    /// Covalent API key (`API_TOKEN`)
    pub api_token: String,
    /// Wallet address to monitor (`ADDRESS`)
    pub address: String,
    /// Minimum percentage increase that triggers an alert (`MIN_DIFFERENCE`)
    pub min_difference: u32,
    /// Telegram bot token (`BOT_TOKEN`)
    pub bot_token: String,
    /// Telegram chat to notify (`BOT_CHAT`)
    pub bot_chat: String,
    /// Dust threshold in quote currency (`MIN_BALANCE`, default 60)
    pub min_balance: f64,
    /// Lookback window in days (`DAYS`, default 3)
    pub days: u32,
    /// Chains to scan, in order (`CHAINS`, comma-separated slugs)
    pub chains: Vec<Chain>,
    /// Re-run cadence (`RUN_INTERVAL_SECS`); absent means a single pass
    pub run_interval: Option<Duration>,
}

impl JobConfig {
    pub fn from_env() -> Result<Self> {
        Self::from_vars(&std::env::vars().collect())
    }

    pub(crate) fn from_vars(vars: &HashMap<String, String>) -> Result<Self> {
        let mut missing = Vec::new();
        let mut required = |name: &'static str| -> String {
            match vars.get(name) {
                Some(value) if !value.trim().is_empty() => value.trim().to_string(),
                _ => {
                    missing.push(name);
                    String::new()
                }
            }
        };

        let api_token = required("API_TOKEN");
        let address = required("ADDRESS");
        let min_difference = required("MIN_DIFFERENCE");
        let bot_token = required("BOT_TOKEN");
        let bot_chat = required("BOT_CHAT");

        if !missing.is_empty() {
            bail!("missing required configuration: {}", missing.join(", "));
        }

        let min_difference = min_difference
            .parse::<u32>()
            .context("MIN_DIFFERENCE must be a non-negative integer percentage")?;

        let min_balance = match optional(vars, "MIN_BALANCE") {
            Some(raw) => raw
                .parse::<f64>()
                .context("MIN_BALANCE must be a number")?,
            None => DEFAULT_MIN_BALANCE,
        };

        let days = match optional(vars, "DAYS") {
            Some(raw) => raw
                .parse::<u32>()
                .context("DAYS must be a positive integer")?,
            None => DEFAULT_DAYS,
        };

        let chains = match optional(vars, "CHAINS") {
            Some(raw) => parse_chains(&raw)?,
            None => default_chains(),
        };

        let run_interval = match optional(vars, "RUN_INTERVAL_SECS") {
            Some(raw) => {
                let secs = raw
                    .parse::<u64>()
                    .context("RUN_INTERVAL_SECS must be an integer number of seconds")?;
                Some(Duration::from_secs(secs))
            }
            None => None,
        };

        Ok(Self {
            api_token,
            address,
            min_difference,
            bot_token,
            bot_chat,
            min_balance,
            days,
            chains,
            run_interval,
        })
    }
}

fn optional(vars: &HashMap<String, String>, name: &str) -> Option<String> {
    vars.get(name)
        .map(|value| value.trim().to_string())
        .filter(|value| !value.is_empty())
}

/// Comma-separated chain slugs, order preserved.
fn parse_chains(raw: &str) -> Result<Vec<Chain>> {
    let chains = raw
        .split(',')
        .filter(|part| !part.trim().is_empty())
        .map(Chain::from_str)
        .collect::<Result<Vec<_>>>()?;
    if chains.is_empty() {
        bail!("CHAINS must name at least one chain");
    }
    Ok(chains)
}

fn default_chains() -> Vec<Chain> {
    vec![
        Chain::EthMainnet,
        Chain::BaseMainnet,
        Chain::AvalancheMainnet,
        Chain::ArbitrumMainnet,
        Chain::ZksyncMainnet,
        Chain::GnosisMainnet,
        Chain::MaticMainnet,
        Chain::PolygonZkevmMainnet,
        Chain::OptimismMainnet,
        Chain::LineaMainnet,
    ]
}
