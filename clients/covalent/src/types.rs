use chrono::{DateTime, Utc};
use serde::Deserialize;

/// One token's historical holdings for a wallet on a single chain.
///
/// `contract_name` and `contract_ticker_symbol` are nullable on the wire;
/// unnamed contracts usually also lack a quote rate and get filtered out
/// downstream.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenPortfolio {
    pub contract_name: Option<String>,
    pub contract_ticker_symbol: Option<String>,
    pub contract_address: String,
    /// Per-day snapshots, newest-first once normalized by the client.
    pub holdings: Vec<Holding>,
}

impl TokenPortfolio {
    pub fn display_name(&self) -> &str {
        self.contract_name.as_deref().unwrap_or("unknown")
    }

    pub fn display_ticker(&self) -> &str {
        self.contract_ticker_symbol.as_deref().unwrap_or("?")
    }
}

/// A single day's snapshot for one token.
#[derive(Debug, Clone, Deserialize)]
pub struct Holding {
    pub timestamp: DateTime<Utc>,
    /// Quote-currency price for that day; absent for untracked or
    /// illiquid tokens.
    pub quote_rate: Option<f64>,
    pub open: HoldingQuote,
    pub close: HoldingQuote,
}

impl Holding {
    /// Whether a usable price was recorded for this day.
    pub fn has_quote_rate(&self) -> bool {
        self.quote_rate.map_or(false, |rate| rate != 0.0)
    }

    pub fn close_quote(&self) -> f64 {
        self.close.quote.unwrap_or(0.0)
    }
}

/// Raw balance plus its quote-currency valuation.
#[derive(Debug, Clone, Deserialize)]
pub struct HoldingQuote {
    pub balance: Option<String>,
    pub quote: Option<f64>,
}

/// Response envelope shared by Covalent endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct PortfolioResponse {
    pub data: Option<PortfolioData>,
    pub error: bool,
    pub error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PortfolioData {
    pub items: Vec<TokenPortfolio>,
}
