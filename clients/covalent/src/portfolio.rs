use std::sync::Arc;

use anyhow::{anyhow, bail, Context, Result};
use url::form_urlencoded;

use crate::config::CovalentClientConfig;
use crate::types::{PortfolioResponse, TokenPortfolio};
use crate::Chain;

/// Covalent production API base URL.
pub const COVALENT_API_BASE: &str = "https://api.covalenthq.com";

/// Quote currency for all portfolio valuations.
const QUOTE_CURRENCY: &str = "USD";

/// Client for the Covalent historical portfolio API.
pub struct CovalentClient {
    client: Arc<reqwest::Client>,
    config: CovalentClientConfig,
}

impl CovalentClient {
    pub fn new(client: Arc<reqwest::Client>, config: CovalentClientConfig) -> Self {
        Self { client, config }
    }

    /// Fetches the last `days` days of per-token holdings for `address` on
    /// `chain`, valued in USD.
    ///
    /// Holdings come back newest-first regardless of the order the API
    /// returned them in.
    pub async fn get_historical_portfolio(
        &self,
        chain: Chain,
        address: &str,
        days: u32,
    ) -> Result<Vec<TokenPortfolio>> {
        let query = build_query(&[
            ("quote-currency", QUOTE_CURRENCY.to_string()),
            ("days", days.to_string()),
        ]);
        let url = format!(
            "{}/v1/{}/address/{}/portfolio_v2/?{}",
            self.config.base_url, chain, address, query
        );

        let resp = self
            .client
            .get(&url)
            .bearer_auth(&self.config.api_key)
            .send()
            .await
            .with_context(|| format!("portfolio request failed for {}", chain))?;

        let status = resp.status();
        if !status.is_success() {
            let body = resp.text().await.unwrap_or_default();
            bail!("portfolio request for {} returned {}: {}", chain, status, body);
        }

        let envelope: PortfolioResponse = resp
            .json()
            .await
            .with_context(|| format!("failed to decode portfolio response for {}", chain))?;

        if envelope.error {
            bail!(
                "covalent error for {}: {}",
                chain,
                envelope.error_message.as_deref().unwrap_or("unknown error")
            );
        }

        let mut items = envelope
            .data
            .ok_or_else(|| anyhow!("covalent response for {} has no data", chain))?
            .items;

        // Canonical holding order is newest-first; the API is not trusted
        // to guarantee it.
        for item in &mut items {
            item.holdings
                .sort_by(|a, b| b.timestamp.cmp(&a.timestamp));
        }

        Ok(items)
    }
}

/// Encode params as a URL-encoded query string.
fn build_query(params: &[(&str, String)]) -> String {
    let mut ser = form_urlencoded::Serializer::new(String::new());
    for (k, v) in params {
        ser.append_pair(k, v);
    }
    ser.finish()
}
