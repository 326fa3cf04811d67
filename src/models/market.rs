/// Values over DexScreener's four reporting windows.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PriceWindows {
    pub m5: f64,
    pub h1: f64,
    pub h6: f64,
    pub h24: f64,
}

/// Market snapshot for the most liquid trading pair on the requested
/// chain. Absent as a whole when no qualifying pair exists; individual
/// numeric fields default to 0 when the upstream omits them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct MarketData {
    pub price: f64,
    pub price_change: PriceWindows,
    pub volume: PriceWindows,
    pub liquidity: f64,
    pub dex: String,
    pub pair_address: String,
    pub fdv: f64,
    pub market_cap: f64,
}
