use std::path::PathBuf;

use async_trait::async_trait;
use tracing::{error, info};

use crate::config;
use crate::error::Result;
use crate::handler::{ReplySink, TokenInfoHandler};
use crate::services::{BubblemapsClient, DexScreenerClient, RateLimiter, ScreenshotClient};

/// Reply sink backed by the terminal: captions go to stdout, the
/// screenshot goes to a file.
struct TerminalSink {
    output: PathBuf,
}

#[async_trait]
impl ReplySink for TerminalSink {
    async fn send_text(&mut self, text: &str) -> Result<()> {
        println!("{}", text);
        Ok(())
    }

    async fn send_photo(&mut self, image: &[u8], caption: &str) -> Result<()> {
        tokio::fs::write(&self.output, image).await?;
        println!("{}", caption);
        println!("\n[screenshot written to {}]", self.output.display());
        Ok(())
    }

    async fn post_ack(&mut self, text: &str) -> Result<()> {
        eprintln!("{}", text);
        Ok(())
    }

    async fn clear_ack(&mut self) -> Result<()> {
        // nothing to retract on a terminal
        Ok(())
    }
}

/// Run one lookup end to end, exactly as the chat command would.
pub async fn run(text: &str, user: u64, output: PathBuf) {
    let handler = match build_handler() {
        Ok(h) => h,
        Err(e) => {
            error!("failed to build handler: {}", e);
            eprintln!("{}", e.user_message());
            return;
        }
    };

    info!(user, text, "running lookup");
    let mut sink = TerminalSink { output };
    if let Err(e) = handler.handle(user, text, &mut sink).await {
        error!("reply delivery failed: {}", e);
        eprintln!("{}", e.user_message());
    }
}

fn build_handler() -> Result<TokenInfoHandler> {
    Ok(TokenInfoHandler::new(
        BubblemapsClient::new(config::bubblemaps_api_url())?,
        DexScreenerClient::new(config::dexscreener_api_url())?,
        ScreenshotClient::new(config::screenshot_api_url(), config::screenshot_api_key())?,
        RateLimiter::new(config::rate_limit_per_user(), config::rate_limit_window()),
    ))
}
