//! Free-text command argument parsing.

use crate::error::{AppError, Result};
use crate::models;

/// Parsed `[chain] address` arguments. Immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedRequest {
    pub chain: String,
    pub address: String,
}

/// Split raw command text into a chain key and an address.
///
/// One token means the address alone with the chain defaulting to "eth";
/// two tokens mean `(chain, address)` with the chain key lowercased. Any
/// other token count is rejected. This exact branching is inherited from
/// the command's original shape: addresses containing whitespace are not
/// supported.
///
/// An unknown chain key in the two-token shape is rejected here with the
/// full list of supported keys; format validation of the address itself
/// is [`models::validate_address`]'s job.
pub fn parse(text: &str) -> Result<ParsedRequest> {
    let parts: Vec<&str> = text.split_whitespace().collect();

    match parts.as_slice() {
        [address] => Ok(ParsedRequest {
            chain: "eth".to_string(),
            address: (*address).to_string(),
        }),
        [chain, address] => {
            let chain = chain.to_lowercase();
            if models::get_chain(&chain).is_none() {
                return Err(AppError::InvalidInput(format!(
                    "Unsupported chain. Supported chains are: {}",
                    models::supported_keys()
                )));
            }
            Ok(ParsedRequest {
                chain,
                address: (*address).to_string(),
            })
        }
        _ => Err(AppError::InvalidInput(
            "Invalid format. Use: [chain] [address] or just [address]".to_string(),
        )),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn single_token_defaults_to_eth() {
        let req = parse("0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984").unwrap();
        assert_eq!(req.chain, "eth");
        assert_eq!(req.address, "0x1f9840a85d5aF5bf1D1762F925BDADdC4201F984");
    }

    #[test]
    fn two_tokens_name_the_chain() {
        let req = parse("sol ABC123").unwrap();
        assert_eq!(req.chain, "sol");
        assert_eq!(req.address, "ABC123");
    }

    #[test]
    fn chain_key_is_lowercased() {
        let req = parse("SOL ABC123").unwrap();
        assert_eq!(req.chain, "sol");
    }

    #[test]
    fn unknown_chain_lists_supported_keys() {
        let err = parse("dot ABC123").unwrap_err();
        let msg = err.user_message();
        assert!(msg.contains("Supported chains are:"));
        assert!(msg.contains("eth, bsc, ftm, avax, cro, arbi, poly, base, sol, sonic"));
    }

    #[test]
    fn three_tokens_are_rejected() {
        assert!(parse("a b c").is_err());
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(parse("").is_err());
        assert!(parse("   ").is_err());
    }
}
