//! Bubblemaps map-data client (upstream A, holder distribution).

use std::time::Duration;

use reqwest::StatusCode;
use tracing::debug;

use crate::error::{AppError, Result};
use crate::models::TokenData;

const REQUEST_TIMEOUT: Duration = Duration::from_secs(15);

/// Client for the Bubblemaps legacy map-data API.
///
/// Exactly one call per request and no retries; a flaky upstream is
/// surfaced to the caller, who may re-issue the command. Safe to share
/// across concurrent requests (the only shared state is the reqwest
/// connection pool).
pub struct BubblemapsClient {
    base_url: String,
    client: reqwest::Client,
}

impl BubblemapsClient {
    pub fn new(base_url: impl Into<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self { base_url, client })
    }

    /// Fetch the holder distribution for `(chain, address)`.
    ///
    /// A 401 from the upstream means the map has not been computed for
    /// this address and maps to [`AppError::NotFound`]; any other
    /// non-success status or transport failure is [`AppError::Upstream`].
    pub async fn fetch_token_data(&self, chain: &str, address: &str) -> Result<TokenData> {
        let url = format!("{}/map-data", self.base_url);
        debug!(chain, address, "fetching bubblemaps data");

        let response = self
            .client
            .get(&url)
            .query(&[("token", address), ("chain", chain)])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("Bubblemaps request failed: {}", e)))?;

        match response.status() {
            StatusCode::UNAUTHORIZED => {
                return Err(AppError::NotFound(format!(
                    "no computed map for {} on {}",
                    address, chain
                )));
            }
            status if !status.is_success() => {
                return Err(AppError::Upstream(format!(
                    "Bubblemaps returned status {}",
                    status
                )));
            }
            _ => {}
        }

        let data: TokenData = response
            .json()
            .await
            .map_err(|e| AppError::Upstream(format!("Bubblemaps response unreadable: {}", e)))?;

        debug!(
            token = %data.full_name,
            holders = data.nodes.len(),
            "bubblemaps data fetched"
        );
        Ok(data)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn trailing_slash_is_stripped() {
        let client = BubblemapsClient::new("http://localhost:9/").unwrap();
        assert_eq!(client.base_url, "http://localhost:9");
    }

    #[tokio::test]
    #[ignore] // Requires network access
    async fn fetch_live_token() {
        let client = BubblemapsClient::new(crate::constants::BUBBLEMAPS_API_URL).unwrap();
        let data = client
            .fetch_token_data("eth", "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984")
            .await
            .unwrap();
        assert!(!data.nodes.is_empty());
    }
}
