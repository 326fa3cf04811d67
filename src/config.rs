//! Environment-sourced configuration with sensible defaults.

use std::time::Duration;

use crate::constants;

/// API key for the screenshot service. No default: captures fail without it.
pub fn screenshot_api_key() -> Option<String> {
    std::env::var("SCREENSHOT_API_TOKEN").ok()
}

pub fn bubblemaps_api_url() -> String {
    std::env::var("BUBBLEMAPS_API_URL")
        .unwrap_or_else(|_| constants::BUBBLEMAPS_API_URL.to_string())
}

pub fn dexscreener_api_url() -> String {
    std::env::var("DEXSCREENER_API_URL")
        .unwrap_or_else(|_| constants::DEXSCREENER_API_URL.to_string())
}

pub fn screenshot_api_url() -> String {
    std::env::var("SCREENSHOT_API_URL")
        .unwrap_or_else(|_| constants::SCREENSHOT_API_URL.to_string())
}

pub fn rate_limit_per_user() -> usize {
    std::env::var("RATE_LIMIT_PER_USER")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(constants::RATE_LIMIT_PER_USER)
}

pub fn rate_limit_window() -> Duration {
    let secs = std::env::var("RATE_LIMIT_WINDOW_SECS")
        .ok()
        .and_then(|v| v.parse().ok())
        .unwrap_or(constants::RATE_LIMIT_WINDOW_SECS);
    Duration::from_secs(secs)
}
