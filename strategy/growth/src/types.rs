//! Shared types for growth detection.

use serde::{Deserialize, Serialize};

/// A qualifying balance increase, ready to be formatted and sent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AlertEvent {
    /// Token contract name
    pub contract_name: String,
    /// Token ticker symbol
    pub ticker_symbol: String,
    /// Token contract address
    pub contract_address: String,
    /// Signed percentage change from baseline to current value
    pub difference: f64,
}

impl AlertEvent {
    /// Renders the notification text. The percentage is rounded
    /// half-away-from-zero to a whole number.
    pub fn to_message(&self) -> String {
        format!(
            "{} ({}) increased {}%",
            self.contract_name,
            self.ticker_symbol,
            self.difference.round()
        )
    }
}

/// Outcome of evaluating one token.
#[derive(Debug, Clone, PartialEq)]
pub enum Evaluation {
    /// The token qualifies for a notification.
    Alert(AlertEvent),
    /// The token was filtered out.
    Skip(SkipReason),
}

/// Why a token was filtered out.
#[derive(Debug, Clone, PartialEq)]
pub enum SkipReason {
    /// The API returned no holdings for the token.
    NoHoldings,
    /// No price data for the most recent day.
    NoQuoteRate,
    /// Current balance is zero.
    ZeroBalance,
    /// Current balance is below the dust threshold.
    LowBalance { value: f64 },
    /// Every close value in the window is zero.
    NoBaseline,
    /// The change did not reach the configured threshold.
    BelowThreshold { difference: f64 },
}
