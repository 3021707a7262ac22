//! One pass of the alert job: fetch, filter, notify.

use std::time::Instant;

use clients_covalent::{CovalentClient, TokenPortfolio};
use clients_telegrambot::TelegramBot;
use growth::{Evaluation, GrowthDetector, GrowthDetectorConfig, SkipReason};
use tracing::{debug, error, info};

use crate::config::JobConfig;

/// Scans every configured chain in order and sends one message per
/// qualifying token. Returns the number of alerts delivered.
///
/// Fetch and send failures are logged and never abort the pass: a chain
/// that cannot be fetched is skipped, a message that cannot be delivered is
/// dropped, and processing moves on.
pub async fn run_job(
    config: &JobConfig,
    covalent: &CovalentClient,
    telegram: &TelegramBot,
) -> usize {
    let started = Instant::now();
    let detector = GrowthDetector::new(GrowthDetectorConfig {
        min_difference: config.min_difference,
        min_balance: config.min_balance,
    });

    let mut alerts_sent = 0;
    for &chain in &config.chains {
        debug!("starting chain {}", chain);
        let chain_started = Instant::now();

        let tokens = match covalent
            .get_historical_portfolio(chain, &config.address, config.days)
            .await
        {
            Ok(tokens) => tokens,
            Err(err) => {
                error!("portfolio fetch failed for {}: {:#}", chain, err);
                continue;
            }
        };
        debug!("loaded {} tokens from api", tokens.len());

        for token in &tokens {
            match detector.evaluate(token) {
                Evaluation::Alert(alert) => {
                    debug!(
                        "triggered: {} ({}) {}%",
                        alert.contract_name,
                        alert.ticker_symbol,
                        alert.difference.round()
                    );
                    match telegram.push_message(&alert.to_message()).await {
                        Ok(()) => alerts_sent += 1,
                        Err(err) => {
                            error!("alert send failed for {}: {:#}", alert.contract_name, err)
                        }
                    }
                }
                Evaluation::Skip(reason) => log_skip(token, &reason),
            }
        }

        debug!("chain {} done in {:?}", chain, chain_started.elapsed());
    }

    info!(
        "job finished in {:?}, {} alerts sent",
        started.elapsed(),
        alerts_sent
    );
    alerts_sent
}

fn log_skip(token: &TokenPortfolio, reason: &SkipReason) {
    match reason {
        SkipReason::NoHoldings => debug!(
            "ignoring token without holdings {} {}",
            token.display_name(),
            token.contract_address
        ),
        SkipReason::NoQuoteRate => debug!(
            "ignoring token without quote {} {}",
            token.display_name(),
            token.contract_address
        ),
        SkipReason::ZeroBalance => debug!("ignoring zero balance token {}", token.display_name()),
        SkipReason::LowBalance { value } => debug!(
            "ignoring low balance token {} ({} USD)",
            token.display_name(),
            value
        ),
        SkipReason::NoBaseline => debug!(
            "ignoring token without usable baseline {}",
            token.display_name()
        ),
        SkipReason::BelowThreshold { difference } => debug!(
            "{} changed {:.2}%, below threshold",
            token.display_name(),
            difference
        ),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clients_covalent::{Chain, CovalentClientConfig};
    use clients_telegrambot::TelegramBotConfig;
    use pretty_assertions::assert_eq;
    use std::sync::Arc;
    use wiremock::matchers::{body_partial_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_config(chains: Vec<Chain>) -> JobConfig {
        JobConfig {
            api_token: "cqt_test".to_string(),
            address: "0xabc".to_string(),
            min_difference: 5,
            bot_token: "123:abc".to_string(),
            bot_chat: "42".to_string(),
            min_balance: 60.0,
            days: 3,
            chains,
            run_interval: None,
        }
    }

    fn clients(
        covalent_url: String,
        telegram_url: String,
    ) -> (CovalentClient, TelegramBot) {
        let http = Arc::new(reqwest::Client::new());
        let covalent = CovalentClient::new(
            Arc::clone(&http),
            CovalentClientConfig {
                api_key: "cqt_test".to_string(),
                base_url: covalent_url,
            },
        );
        let telegram = TelegramBot::new(
            http,
            TelegramBotConfig {
                bot_token: "123:abc".to_string(),
                chat_id: "42".to_string(),
                base_url: telegram_url,
            },
        );
        (covalent, telegram)
    }

    fn token_json(name: &str, ticker: &str, closes: &[f64]) -> serde_json::Value {
        let holdings: Vec<serde_json::Value> = closes
            .iter()
            .enumerate()
            .map(|(i, close)| {
                serde_json::json!({
                    "timestamp": format!("2024-05-{:02}T00:00:00Z", closes.len() - i),
                    "quote_rate": 1.0,
                    "open": { "balance": "0", "quote": close },
                    "close": { "balance": "0", "quote": close }
                })
            })
            .collect();
        serde_json::json!({
            "contract_name": name,
            "contract_ticker_symbol": ticker,
            "contract_address": "0x01",
            "holdings": holdings
        })
    }

    fn portfolio_body(items: Vec<serde_json::Value>) -> serde_json::Value {
        serde_json::json!({ "data": { "items": items }, "error": false, "error_message": null })
    }

    fn telegram_ok() -> ResponseTemplate {
        ResponseTemplate::new(200).set_body_json(serde_json::json!({ "ok": true }))
    }

    #[tokio::test]
    async fn sends_one_alert_per_qualifying_token() {
        let covalent_server = MockServer::start().await;
        let telegram_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/eth-mainnet/address/0xabc/portfolio_v2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body(vec![
                token_json("Pepe", "PEPE", &[106.0, 100.0]),
                token_json("Stable", "USDC", &[104.0, 100.0]),
            ])))
            .expect(1)
            .mount(&covalent_server)
            .await;

        Mock::given(method("POST"))
            .and(path("/bot123:abc/sendMessage"))
            .and(body_partial_json(serde_json::json!({
                "chat_id": "42",
                "text": "Pepe (PEPE) increased 6%"
            })))
            .respond_with(telegram_ok())
            .expect(1)
            .mount(&telegram_server)
            .await;

        let config = test_config(vec![Chain::EthMainnet]);
        let (covalent, telegram) = clients(covalent_server.uri(), telegram_server.uri());

        let sent = run_job(&config, &covalent, &telegram).await;
        assert_eq!(sent, 1);
    }

    #[tokio::test]
    async fn send_failure_does_not_stop_processing() {
        let covalent_server = MockServer::start().await;
        let telegram_server = MockServer::start().await;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body(vec![
                token_json("First", "ONE", &[200.0, 100.0]),
                token_json("Second", "TWO", &[300.0, 100.0]),
            ])))
            .mount(&covalent_server)
            .await;

        // Every send fails; both tokens must still be attempted.
        Mock::given(method("POST"))
            .respond_with(ResponseTemplate::new(500).set_body_string("boom"))
            .expect(2)
            .mount(&telegram_server)
            .await;

        let config = test_config(vec![Chain::EthMainnet]);
        let (covalent, telegram) = clients(covalent_server.uri(), telegram_server.uri());

        let sent = run_job(&config, &covalent, &telegram).await;
        assert_eq!(sent, 0);
    }

    #[tokio::test]
    async fn fetch_failure_skips_to_next_chain() {
        let covalent_server = MockServer::start().await;
        let telegram_server = MockServer::start().await;

        Mock::given(method("GET"))
            .and(path("/v1/eth-mainnet/address/0xabc/portfolio_v2/"))
            .respond_with(ResponseTemplate::new(500).set_body_string("upstream down"))
            .mount(&covalent_server)
            .await;
        Mock::given(method("GET"))
            .and(path("/v1/base-mainnet/address/0xabc/portfolio_v2/"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body(vec![
                token_json("Pepe", "PEPE", &[200.0, 100.0]),
            ])))
            .mount(&covalent_server)
            .await;

        Mock::given(method("POST"))
            .and(body_partial_json(serde_json::json!({
                "text": "Pepe (PEPE) increased 100%"
            })))
            .respond_with(telegram_ok())
            .expect(1)
            .mount(&telegram_server)
            .await;

        let config = test_config(vec![Chain::EthMainnet, Chain::BaseMainnet]);
        let (covalent, telegram) = clients(covalent_server.uri(), telegram_server.uri());

        let sent = run_job(&config, &covalent, &telegram).await;
        assert_eq!(sent, 1);
    }

    #[tokio::test]
    async fn filtered_tokens_produce_no_sends() {
        let covalent_server = MockServer::start().await;
        let telegram_server = MockServer::start().await;

        let mut no_quote = token_json("Junk", "JNK", &[500.0, 100.0]);
        no_quote["holdings"][0]["quote_rate"] = serde_json::Value::Null;

        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(portfolio_body(vec![
                no_quote,
                token_json("Empty", "EMP", &[0.0, 100.0]),
                token_json("Dust", "DST", &[59.0, 10.0]),
            ])))
            .mount(&covalent_server)
            .await;

        // No sends expected at all.
        Mock::given(method("POST"))
            .respond_with(telegram_ok())
            .expect(0)
            .mount(&telegram_server)
            .await;

        let config = test_config(vec![Chain::EthMainnet]);
        let (covalent, telegram) = clients(covalent_server.uri(), telegram_server.uri());

        let sent = run_job(&config, &covalent, &telegram).await;
        assert_eq!(sent, 0);
    }
}
