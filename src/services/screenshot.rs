//! Screenshot rendering client (upstream C).

use std::time::Duration;

use tracing::debug;

use crate::constants;
use crate::error::{AppError, Result};

const REQUEST_TIMEOUT: Duration = Duration::from_secs(30);

/// Client for the screenshot rendering service.
///
/// Opaque collaborator: given the bubble-map page URL it either returns
/// raw JPEG bytes or fails. Render parameters are fixed in `constants`.
pub struct ScreenshotClient {
    base_url: String,
    api_key: Option<String>,
    client: reqwest::Client,
}

impl ScreenshotClient {
    pub fn new(base_url: impl Into<String>, api_key: Option<String>) -> Result<Self> {
        let base_url = base_url.into().trim_end_matches('/').to_string();
        let client = reqwest::Client::builder()
            .timeout(REQUEST_TIMEOUT)
            .build()
            .map_err(|e| AppError::Upstream(format!("failed to create HTTP client: {}", e)))?;
        Ok(Self {
            base_url,
            api_key,
            client,
        })
    }

    /// Capture the token's bubble-map page.
    pub async fn capture(&self, chain: &str, address: &str) -> Result<Vec<u8>> {
        let api_key = self
            .api_key
            .as_deref()
            .ok_or_else(|| AppError::Config("screenshot API key not configured".to_string()))?;

        let target = format!(
            "{}/{}/token/{}",
            constants::BUBBLEMAPS_UI_URL,
            chain,
            address
        );
        debug!(%target, "capturing screenshot");

        let response = self
            .client
            .get(&self.base_url)
            .query(&[
                ("key", api_key),
                ("url", target.as_str()),
                ("dimension", constants::SCREENSHOT_DIMENSION),
                ("device", constants::SCREENSHOT_DEVICE),
                ("format", constants::SCREENSHOT_FORMAT),
                ("cacheLimit", constants::SCREENSHOT_CACHE_LIMIT),
                ("delay", constants::SCREENSHOT_DELAY_MS),
            ])
            .send()
            .await
            .map_err(|e| AppError::Upstream(format!("screenshot request failed: {}", e)))?;

        if !response.status().is_success() {
            return Err(AppError::Upstream(format!(
                "screenshot service returned status {}",
                response.status()
            )));
        }

        let bytes = response
            .bytes()
            .await
            .map_err(|e| AppError::Upstream(format!("screenshot body unreadable: {}", e)))?;
        Ok(bytes.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn missing_api_key_is_a_config_error() {
        let client = ScreenshotClient::new("http://localhost:9", None).unwrap();
        let err = client.capture("eth", "0xabc").await.unwrap_err();
        assert!(matches!(err, AppError::Config(_)));
    }
}
