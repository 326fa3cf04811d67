//! DexScreener market-data client (upstream B, best-effort).

use std::time::Duration;

use serde_json::Value;
use tracing::{debug, warn};

use crate::error::{AppError, Result};
use crate::models::{ChainSpec, MarketData, PriceWindows};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the DexScreener token-pairs API.
///
/// Market data is supplementary: every failure mode here (non-success
/// status, transport error, no pair on the requested chain) folds into
/// `None` so it can never block the primary response.
pub struct DexScreenerClient {
    base_url: String,
    client: reqwest::Client,
}

impl DexScreenerClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { base_url, client })
    }

    /// Fetch market data for `address`, filtered to `chain`.
    pub async fn fetch_market_data(
        &self,
        chain: &ChainSpec,
        address: &str,
    ) -> Option<MarketData> {
        let url = format!("{}/latest/dex/tokens/{}", self.base_url, address);
        debug!(chain = chain.key, address, "fetching dexscreener data");

        let response = match self.client.get(&url).send().await {
            Ok(r) => r,
            Err(e) => {
                warn!("DexScreener request failed: {}", e);
                return None;
            }
        };

        if !response.status().is_success() {
            warn!("DexScreener returned status {}", response.status());
            return None;
        }

        let body: Value = match response.json().await {
            Ok(v) => v,
            Err(e) => {
                warn!("DexScreener response unreadable: {}", e);
                return None;
            }
        };

        let pairs = body["pairs"].as_array().cloned().unwrap_or_default();
        extract_market_data(&pairs, chain.dexscreener)
    }
}

/// Pick the qualifying pair and pull its fields into [`MarketData`].
///
/// Pairs are matched by exact `chainId` equality (no fuzzy matching, by
/// contract with the chain registry) and the one with the highest
/// `liquidity.usd` wins, first-encountered on ties.
fn extract_market_data(pairs: &[Value], chain_id: &str) -> Option<MarketData> {
    let mut best: Option<&Value> = None;
    let mut best_liquidity = f64::MIN;

    for pair in pairs {
        if pair["chainId"].as_str() != Some(chain_id) {
            continue;
        }
        let liquidity = num(&pair["liquidity"]["usd"]);
        if best.is_none() || liquidity > best_liquidity {
            best = Some(pair);
            best_liquidity = liquidity;
        }
    }

    let pair = best?;
    Some(MarketData {
        price: num(&pair["priceUsd"]),
        price_change: windows(&pair["priceChange"]),
        volume: windows(&pair["volume"]),
        liquidity: num(&pair["liquidity"]["usd"]),
        dex: pair["dexId"].as_str().unwrap_or("unknown").to_string(),
        pair_address: pair["pairAddress"].as_str().unwrap_or_default().to_string(),
        fdv: num(&pair["fdv"]),
        market_cap: num(&pair["marketCap"]),
    })
}

fn windows(value: &Value) -> PriceWindows {
    PriceWindows {
        m5: num(&value["m5"]),
        h1: num(&value["h1"]),
        h6: num(&value["h6"]),
        h24: num(&value["h24"]),
    }
}

/// DexScreener reports some numerics (notably `priceUsd`) as strings;
/// accept either, defaulting anything else to 0.
fn num(value: &Value) -> f64 {
    match value {
        Value::Number(n) => n.as_f64().unwrap_or(0.0),
        Value::String(s) => s.parse().unwrap_or(0.0),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn pair(chain_id: &str, liquidity: f64) -> Value {
        json!({
            "chainId": chain_id,
            "priceUsd": "0.5",
            "priceChange": {"m5": 0.1, "h1": 1.5, "h6": -2.0, "h24": 3.0},
            "volume": {"m5": 10.0, "h1": 100.0, "h6": 600.0, "h24": 2400.0},
            "liquidity": {"usd": liquidity},
            "dexId": "uniswap",
            "pairAddress": "0xpair",
            "fdv": 1000000.0,
            "marketCap": 900000.0
        })
    }

    #[test]
    fn no_matching_chain_yields_none() {
        let pairs = vec![pair("bsc", 100.0), pair("solana", 200.0)];
        assert_eq!(extract_market_data(&pairs, "ethereum"), None);
    }

    #[test]
    fn highest_liquidity_pair_wins() {
        let pairs = vec![
            pair("ethereum", 100.0),
            pair("ethereum", 5000.0),
            pair("ethereum", 300.0),
        ];
        let data = extract_market_data(&pairs, "ethereum").unwrap();
        assert_eq!(data.liquidity, 5000.0);
    }

    #[test]
    fn ties_keep_first_encountered() {
        let mut first = pair("ethereum", 100.0);
        first["dexId"] = json!("first");
        let mut second = pair("ethereum", 100.0);
        second["dexId"] = json!("second");

        let data = extract_market_data(&[first, second], "ethereum").unwrap();
        assert_eq!(data.dex, "first");
    }

    #[test]
    fn string_price_is_parsed() {
        let pairs = vec![pair("ethereum", 100.0)];
        let data = extract_market_data(&pairs, "ethereum").unwrap();
        assert_eq!(data.price, 0.5);
        assert_eq!(data.price_change.h1, 1.5);
        assert_eq!(data.volume.h24, 2400.0);
    }

    #[test]
    fn missing_numeric_fields_default_to_zero() {
        let pairs = vec![json!({"chainId": "ethereum"})];
        let data = extract_market_data(&pairs, "ethereum").unwrap();
        assert_eq!(data.price, 0.0);
        assert_eq!(data.market_cap, 0.0);
        assert_eq!(data.price_change, PriceWindows::default());
        assert_eq!(data.dex, "unknown");
    }

    #[test]
    fn empty_pair_list_yields_none() {
        assert_eq!(extract_market_data(&[], "ethereum"), None);
    }
}
