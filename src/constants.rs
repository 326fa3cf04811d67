//! Upstream endpoints, rate-limit defaults and user-facing message strings.

/// Bubblemaps legacy map-data API (holder distribution). The `/map-data`
/// path is appended by the client so tests can point the base elsewhere.
pub const BUBBLEMAPS_API_URL: &str = "https://api-legacy.bubblemaps.io";

/// Bubblemaps web UI, used for the reply link and the screenshot target.
pub const BUBBLEMAPS_UI_URL: &str = "https://app.bubblemaps.io";

/// DexScreener public API (market data, best-effort).
pub const DEXSCREENER_API_URL: &str = "https://api.dexscreener.com";

/// screenshotmachine.com rendering service.
pub const SCREENSHOT_API_URL: &str = "https://api.screenshotmachine.com";

/// Requests admitted per user within one sliding window.
pub const RATE_LIMIT_PER_USER: usize = 10;

/// Sliding-window length in seconds.
pub const RATE_LIMIT_WINDOW_SECS: u64 = 60;

/// Screenshot viewport and render hints, matched to the bubble-map page
/// (the delay gives the visualization time to lay out before capture).
pub const SCREENSHOT_DIMENSION: &str = "1024x768";
pub const SCREENSHOT_DEVICE: &str = "desktop";
pub const SCREENSHOT_FORMAT: &str = "jpg";
pub const SCREENSHOT_CACHE_LIMIT: &str = "0";
pub const SCREENSHOT_DELAY_MS: &str = "3000";

/// Shown when the command is invoked with no arguments at all.
pub const MSG_USAGE: &str = "Please provide a contract address.\n\
    Format: [chain] [address] or just [address] for Ethereum\n\
    Example: eth 0x123...abc or 0x123...abc";

/// Shown while the request is being fetched; removed before the reply.
pub const MSG_PROCESSING: &str = "\u{1f504} Processing your request...";

pub const MSG_RATE_LIMITED: &str =
    "\u{26a0}\u{fe0f} Too many requests. Please wait a moment before trying again.";

pub const MSG_NOT_FOUND: &str =
    "\u{274c} Token not found or its bubble map has not been computed yet.";

pub const MSG_UPSTREAM_ERROR: &str =
    "\u{274c} Error fetching data. Please try again later.";
