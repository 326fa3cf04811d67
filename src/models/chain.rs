//! Supported chain registry and chain-specific address validation.

use once_cell::sync::Lazy;
use regex::Regex;

use crate::error::{AppError, Result};

/// Format rules and display metadata for one supported chain.
///
/// Every chain key used anywhere in the pipeline must resolve here; the
/// registry is fixed at process start and iteration order is the order
/// chains are listed to users.
#[derive(Debug)]
pub struct ChainSpec {
    /// Short key accepted in commands (e.g. "eth").
    pub key: &'static str,
    /// Human-readable chain name.
    pub name: &'static str,
    /// Full-match pattern for a well-formed address.
    pub pattern: Regex,
    /// Exact address length, where the chain has one.
    pub length: Option<usize>,
    /// Required address prefix, where the chain has one.
    pub prefix: Option<&'static str>,
    /// Chain id used by the DexScreener API for pair filtering.
    pub dexscreener: &'static str,
}

const EVM_ADDRESS_PATTERN: &str = r"^0x[a-fA-F0-9]{40}$";

fn evm(key: &'static str, name: &'static str, dexscreener: &'static str) -> ChainSpec {
    ChainSpec {
        key,
        name,
        pattern: Regex::new(EVM_ADDRESS_PATTERN).expect("valid EVM address pattern"),
        length: Some(42),
        prefix: Some("0x"),
        dexscreener,
    }
}

static CHAINS: Lazy<Vec<ChainSpec>> = Lazy::new(|| {
    vec![
        evm("eth", "Ethereum", "ethereum"),
        evm("bsc", "Binance Smart Chain", "bsc"),
        evm("ftm", "Fantom", "fantom"),
        evm("avax", "Avalanche", "avalanche"),
        evm("cro", "Cronos", "cronos"),
        evm("arbi", "Arbitrum", "arbitrum"),
        evm("poly", "Polygon", "polygon"),
        evm("base", "Base", "base"),
        ChainSpec {
            key: "sol",
            name: "Solana",
            pattern: Regex::new(r"^[1-9A-HJ-NP-Za-km-z]{32,44}$")
                .expect("valid Solana address pattern"),
            length: None, // base58, variable length
            prefix: None,
            dexscreener: "solana",
        },
        evm("sonic", "Sonic", "sonic"),
    ]
});

/// All supported chains, in listing order.
pub fn all() -> &'static [ChainSpec] {
    &CHAINS
}

/// Look up a chain by its command key.
pub fn get(key: &str) -> Option<&'static ChainSpec> {
    CHAINS.iter().find(|c| c.key == key)
}

/// Comma-joined chain keys in registry order, for error messages.
pub fn supported_keys() -> String {
    CHAINS
        .iter()
        .map(|c| c.key)
        .collect::<Vec<_>>()
        .join(", ")
}

/// Validate an address against a chain's format rules, resolving the
/// chain spec on success.
///
/// Rules run in order and stop at the first failure: chain known, prefix,
/// exact length, full pattern. Pure string checks, no network.
pub fn validate_address(chain: &str, address: &str) -> Result<&'static ChainSpec> {
    let address = address.trim();

    let spec = get(chain)
        .ok_or_else(|| AppError::Validation(format!("Unsupported chain: {}", chain)))?;

    if let Some(prefix) = spec.prefix {
        if !address.starts_with(prefix) {
            return Err(AppError::Validation(format!(
                "Address must start with {} for {}",
                prefix, spec.name
            )));
        }
    }

    if let Some(length) = spec.length {
        if address.len() != length {
            return Err(AppError::Validation(format!(
                "Address must be {} characters long for {}",
                length, spec.name
            )));
        }
    }

    if !spec.pattern.is_match(address) {
        return Err(AppError::Validation(format!(
            "Invalid address format for {}",
            spec.name
        )));
    }

    Ok(spec)
}
