//! Decentralization scoring from the holder distribution.

use crate::models::HolderNode;

/// Derived concentration metric. Computed per request, never stored.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DecentralizationMetric {
    /// Summed holding share of the first 20 holders, in percent.
    pub top20_concentration: f64,
    /// 0-100, higher means more decentralized.
    pub score: f64,
}

/// Score the distribution from its top-20 concentration.
///
/// `score = max(0, 100 - top20/2)` — a deliberately simple linear proxy,
/// not a statistically rigorous measure. Holders are taken in the order
/// given (the upstream sorts by descending share; we do not re-sort).
pub fn compute_decentralization(holders: &[HolderNode]) -> DecentralizationMetric {
    let top20_concentration: f64 = holders.iter().take(20).map(|h| h.percentage).sum();
    let score = (100.0 - top20_concentration / 2.0).max(0.0);
    DecentralizationMetric {
        top20_concentration,
        score,
    }
}
