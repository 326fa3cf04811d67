pub mod bubblemaps;
pub mod dexscreener;
pub mod metrics;
pub mod rate_limit;
pub mod screenshot;

pub use bubblemaps::BubblemapsClient;
pub use dexscreener::DexScreenerClient;
pub use metrics::{compute_decentralization, DecentralizationMetric};
pub use rate_limit::RateLimiter;
pub use screenshot::ScreenshotClient;
