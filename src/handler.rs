//! Request orchestration: parse, validate, rate-check, fetch, format,
//! deliver.

use async_trait::async_trait;
use tracing::{error, info, warn};

use crate::constants;
use crate::error::{AppError, Result};
use crate::format;
use crate::input;
use crate::models::{self, ChainSpec};
use crate::services::{
    compute_decentralization, BubblemapsClient, DexScreenerClient, RateLimiter, ScreenshotClient,
};

/// Outbound side of one request: the chat surface the reply goes to.
///
/// Implementations own the "processing" acknowledgment they post and
/// remove it on `clear_ack`. Ack removal is best-effort: the handler logs
/// a failed removal and moves on.
#[async_trait]
pub trait ReplySink: Send {
    /// Send a plain text reply.
    async fn send_text(&mut self, text: &str) -> Result<()>;

    /// Send a photo with a caption.
    async fn send_photo(&mut self, image: &[u8], caption: &str) -> Result<()>;

    /// Post the transient "processing" acknowledgment.
    async fn post_ack(&mut self, text: &str) -> Result<()>;

    /// Remove the acknowledgment posted by `post_ack`, if any.
    async fn clear_ack(&mut self) -> Result<()>;
}

/// Orchestrates one token-info request end to end.
///
/// Holds the three upstream clients and the rate limiter; all are
/// injected so many requests can share one handler instance. Each request
/// runs: empty-check, parse, validate, rate-check, concurrent fetch of
/// holder and market data, metric derivation, caption formatting,
/// screenshot, delivery. Holder-data and screenshot failures abort the
/// request; market-data failure degrades to a caption without the market
/// block.
pub struct TokenInfoHandler {
    bubblemaps: BubblemapsClient,
    dexscreener: DexScreenerClient,
    screenshot: ScreenshotClient,
    limiter: RateLimiter,
}

impl TokenInfoHandler {
    pub fn new(
        bubblemaps: BubblemapsClient,
        dexscreener: DexScreenerClient,
        screenshot: ScreenshotClient,
        limiter: RateLimiter,
    ) -> Self {
        Self {
            bubblemaps,
            dexscreener,
            screenshot,
            limiter,
        }
    }

    /// Handle one command invocation. Every outcome, success or failure,
    /// is reported to the user through `sink`; the returned error is only
    /// for sink delivery failures.
    pub async fn handle(&self, user_id: u64, text: &str, sink: &mut dyn ReplySink) -> Result<()> {
        if text.trim().is_empty() {
            return sink.send_text(constants::MSG_USAGE).await;
        }

        let request = match input::parse(text) {
            Ok(r) => r,
            Err(e) => return sink.send_text(&e.user_message()).await,
        };

        let chain = match models::validate_address(&request.chain, &request.address) {
            Ok(spec) => spec,
            Err(e) => return sink.send_text(&e.user_message()).await,
        };

        if !self.limiter.allow(user_id).await {
            info!(user_id, "request rejected by rate limiter");
            return sink.send_text(&AppError::RateLimit.user_message()).await;
        }

        sink.post_ack(constants::MSG_PROCESSING).await?;

        let outcome = self.fetch_and_reply(chain, &request.address, sink).await;

        if let Err(e) = sink.clear_ack().await {
            warn!("failed to remove processing message: {}", e);
        }

        match outcome {
            Ok(()) => Ok(()),
            Err(e) => {
                error!(user_id, chain = chain.key, address = %request.address, "request failed: {}", e);
                sink.send_text(&e.user_message()).await
            }
        }
    }

    async fn fetch_and_reply(
        &self,
        chain: &ChainSpec,
        address: &str,
        sink: &mut dyn ReplySink,
    ) -> Result<()> {
        // fork-join: market data settles alongside holder data and its
        // failure never blocks the reply
        let (token, market) = tokio::join!(
            self.bubblemaps.fetch_token_data(chain.key, address),
            self.dexscreener.fetch_market_data(chain, address),
        );
        let token = token?;

        let metric = compute_decentralization(&token.nodes);
        let caption = format::format_token_info(&token, market.as_ref(), chain, address, &metric);

        let image = self.screenshot.capture(chain.key, address).await?;

        match sink.send_photo(&image, &caption).await {
            Ok(()) => {
                info!(chain = chain.key, address, "reply delivered");
                Ok(())
            }
            Err(e) => {
                // token data succeeded; degrade to a text-only reply
                warn!("photo delivery failed, falling back to text: {}", e);
                sink.send_text(&caption).await
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use std::time::Duration;

    use axum::extract::Path;
    use axum::http::StatusCode;
    use axum::response::IntoResponse;
    use axum::routing::get;
    use axum::{Json, Router};
    use serde_json::json;

    const UNI: &str = "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984";

    /// Records every outbound call instead of talking to a chat surface.
    #[derive(Default)]
    struct RecordingSink {
        texts: Vec<String>,
        photos: Vec<(Vec<u8>, String)>,
        ack_posted: bool,
        ack_cleared: bool,
        fail_photo: bool,
    }

    #[async_trait]
    impl ReplySink for RecordingSink {
        async fn send_text(&mut self, text: &str) -> Result<()> {
            self.texts.push(text.to_string());
            Ok(())
        }

        async fn send_photo(&mut self, image: &[u8], caption: &str) -> Result<()> {
            if self.fail_photo {
                return Err(AppError::Upstream("photo rejected".to_string()));
            }
            self.photos.push((image.to_vec(), caption.to_string()));
            Ok(())
        }

        async fn post_ack(&mut self, _text: &str) -> Result<()> {
            self.ack_posted = true;
            Ok(())
        }

        async fn clear_ack(&mut self) -> Result<()> {
            self.ack_cleared = true;
            Ok(())
        }
    }

    async fn spawn_server(app: Router) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });
        format!("http://{}", addr)
    }

    fn map_data_ok() -> Json<serde_json::Value> {
        let nodes: Vec<_> = (0..20)
            .map(|i| {
                json!({
                    "percentage": 2.0,
                    "transaction_count": i * 10,
                    "is_contract": i == 0
                })
            })
            .collect();
        Json(json!({
            "full_name": "Uniswap",
            "symbol": "UNI",
            "nodes": nodes
        }))
    }

    async fn token_pairs(Path(_address): Path<String>) -> Json<serde_json::Value> {
        Json(json!({
            "pairs": [{
                "chainId": "ethereum",
                "priceUsd": "6.50",
                "priceChange": {"m5": 0.0, "h1": 1.5, "h6": 2.0, "h24": -3.0},
                "volume": {"m5": 1.0, "h1": 2.0, "h6": 3.0, "h24": 4.0},
                "liquidity": {"usd": 100000.0},
                "dexId": "uniswap",
                "pairAddress": "0xpair",
                "fdv": 5000000000.0,
                "marketCap": 4000000000.0
            }]
        }))
    }

    async fn screenshot_bytes() -> impl IntoResponse {
        vec![0xffu8, 0xd8, 0xff, 0xe0]
    }

    async fn handler_with_mocks(map_data: Router) -> TokenInfoHandler {
        let bubblemaps_url = spawn_server(map_data).await;
        let dexscreener_url = spawn_server(
            Router::new().route("/latest/dex/tokens/:address", get(token_pairs)),
        )
        .await;
        let screenshot_url =
            spawn_server(Router::new().route("/", get(screenshot_bytes))).await;

        TokenInfoHandler::new(
            BubblemapsClient::new(bubblemaps_url).unwrap(),
            DexScreenerClient::new(dexscreener_url).unwrap(),
            ScreenshotClient::new(screenshot_url, Some("test-key".to_string())).unwrap(),
            RateLimiter::new(10, Duration::from_secs(60)),
        )
    }

    #[tokio::test]
    async fn successful_request_delivers_photo_with_market_block() {
        let handler = handler_with_mocks(
            Router::new().route("/map-data", get(|| async { map_data_ok() })),
        )
        .await;
        let mut sink = RecordingSink::default();

        handler.handle(1, UNI, &mut sink).await.unwrap();

        assert!(sink.ack_posted);
        assert!(sink.ack_cleared);
        assert!(sink.texts.is_empty(), "unexpected texts: {:?}", sink.texts);
        assert_eq!(sink.photos.len(), 1);

        let (image, caption) = &sink.photos[0];
        assert_eq!(image, &[0xff, 0xd8, 0xff, 0xe0]);
        assert!(caption.contains("*Uniswap (UNI)*"));
        assert!(caption.contains("\u{1f4b0} P: $6.50 MC: $4.00B L: $100.00K"));
        // top20 = 40 -> score 80
        assert!(caption.contains("Decentralization Score: \u{1f7e2}80.0% Top20: 40.0%"));
    }

    #[tokio::test]
    async fn uncomputed_map_yields_not_found_and_no_photo() {
        let handler = handler_with_mocks(
            Router::new()
                .route("/map-data", get(|| async { StatusCode::UNAUTHORIZED })),
        )
        .await;
        let mut sink = RecordingSink::default();

        handler.handle(1, UNI, &mut sink).await.unwrap();

        assert!(sink.photos.is_empty());
        assert_eq!(sink.texts, vec![constants::MSG_NOT_FOUND.to_string()]);
        assert!(sink.ack_cleared);
    }

    #[tokio::test]
    async fn upstream_failure_yields_generic_message() {
        let handler = handler_with_mocks(
            Router::new()
                .route("/map-data", get(|| async { StatusCode::INTERNAL_SERVER_ERROR })),
        )
        .await;
        let mut sink = RecordingSink::default();

        handler.handle(1, UNI, &mut sink).await.unwrap();

        assert_eq!(sink.texts, vec![constants::MSG_UPSTREAM_ERROR.to_string()]);
    }

    #[tokio::test]
    async fn photo_failure_falls_back_to_text() {
        let handler = handler_with_mocks(
            Router::new().route("/map-data", get(|| async { map_data_ok() })),
        )
        .await;
        let mut sink = RecordingSink {
            fail_photo: true,
            ..RecordingSink::default()
        };

        handler.handle(1, UNI, &mut sink).await.unwrap();

        assert!(sink.photos.is_empty());
        assert_eq!(sink.texts.len(), 1);
        assert!(sink.texts[0].contains("*Uniswap (UNI)*"));
    }

    #[tokio::test]
    async fn empty_input_gets_usage_without_fetching() {
        let handler = handler_with_mocks(Router::new()).await;
        let mut sink = RecordingSink::default();

        handler.handle(1, "   ", &mut sink).await.unwrap();

        assert_eq!(sink.texts, vec![constants::MSG_USAGE.to_string()]);
        assert!(!sink.ack_posted);
    }

    #[tokio::test]
    async fn invalid_address_is_rejected_before_fetching() {
        let handler = handler_with_mocks(Router::new()).await;
        let mut sink = RecordingSink::default();

        handler.handle(1, "0xnothex", &mut sink).await.unwrap();

        assert_eq!(sink.texts.len(), 1);
        assert!(sink.texts[0].contains("42 characters"));
        assert!(!sink.ack_posted);
    }

    #[tokio::test]
    async fn rate_limited_user_gets_distinct_message() {
        let bubblemaps_url = spawn_server(Router::new()).await;
        let handler = TokenInfoHandler::new(
            BubblemapsClient::new(bubblemaps_url.clone()).unwrap(),
            DexScreenerClient::new(bubblemaps_url.clone()).unwrap(),
            ScreenshotClient::new(bubblemaps_url, None).unwrap(),
            RateLimiter::new(0, Duration::from_secs(60)),
        );
        let mut sink = RecordingSink::default();

        handler.handle(1, UNI, &mut sink).await.unwrap();

        assert_eq!(sink.texts, vec![constants::MSG_RATE_LIMITED.to_string()]);
        assert!(!sink.ack_posted);
    }
}
