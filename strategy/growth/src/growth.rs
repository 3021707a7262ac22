//! Growth detector implementation.
//!
//! Works on one token at a time: filters out tokens without usable data,
//! resolves a comparison baseline over the holdings window, and checks the
//! percentage change against the configured threshold.

use covalent::{Holding, TokenPortfolio};

use crate::config::GrowthDetectorConfig;
use crate::types::{AlertEvent, Evaluation, SkipReason};

/// Detects tokens whose quote value rose past a configured percentage.
pub struct GrowthDetector {
    min_difference: u32,
    min_balance: f64,
}

impl GrowthDetector {
    pub fn new(config: GrowthDetectorConfig) -> Self {
        Self {
            min_difference: config.min_difference,
            min_balance: config.min_balance,
        }
    }

    /// Evaluates one token's holdings (newest-first).
    ///
    /// The comparison is `to` (most recent close value) against `from` (the
    /// close value at the far end of the window, walked forward past zero
    /// entries). Only increases can qualify: the threshold is non-negative
    /// and the comparison is inclusive.
    pub fn evaluate(&self, token: &TokenPortfolio) -> Evaluation {
        let newest = match token.holdings.first() {
            Some(holding) => holding,
            None => return Evaluation::Skip(SkipReason::NoHoldings),
        };

        if !newest.has_quote_rate() {
            return Evaluation::Skip(SkipReason::NoQuoteRate);
        }

        let to = newest.close_quote();
        if to == 0.0 {
            return Evaluation::Skip(SkipReason::ZeroBalance);
        }
        if to < self.min_balance {
            return Evaluation::Skip(SkipReason::LowBalance { value: to });
        }

        let from = match resolve_baseline(&token.holdings) {
            Some(value) => value,
            None => return Evaluation::Skip(SkipReason::NoBaseline),
        };

        let difference = percentage_change(from, to);
        if difference >= self.min_difference as f64 {
            Evaluation::Alert(AlertEvent {
                contract_name: token.display_name().to_string(),
                ticker_symbol: token.display_ticker().to_string(),
                contract_address: token.contract_address.clone(),
                difference,
            })
        } else {
            Evaluation::Skip(SkipReason::BelowThreshold { difference })
        }
    }
}

/// Signed percentage change from `from` to `to`. Asymmetric: 100 -> 50 is
/// -50%, 50 -> 100 is +100%.
fn percentage_change(from: f64, to: f64) -> f64 {
    (to / from - 1.0) * 100.0
}

/// Picks the baseline close value from a newest-first holdings window.
///
/// Normally the oldest entry. The wallet may not have held the token at the
/// window's far end; in that case the scan moves toward the present (most
/// recent day included) and takes the first non-zero close value.
fn resolve_baseline(holdings: &[Holding]) -> Option<f64> {
    let from = holdings.last()?.close_quote();
    if from != 0.0 {
        return Some(from);
    }
    holdings[..holdings.len() - 1]
        .iter()
        .rev()
        .map(Holding::close_quote)
        .find(|&quote| quote != 0.0)
}
