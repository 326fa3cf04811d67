use serde::Deserialize;

/// One wallet or contract in the token's distribution graph.
///
/// Order is whatever the upstream returns (descending holding share);
/// nothing downstream re-sorts it.
#[derive(Debug, Clone, Deserialize)]
pub struct HolderNode {
    #[serde(default)]
    pub percentage: f64,
    #[serde(default)]
    pub transaction_count: u64,
    #[serde(default)]
    pub is_contract: bool,
}

/// Holder-distribution snapshot for one token. Fetched per request,
/// never cached.
#[derive(Debug, Clone, Deserialize)]
pub struct TokenData {
    #[serde(default = "default_full_name")]
    pub full_name: String,
    #[serde(default = "default_symbol")]
    pub symbol: String,
    #[serde(default)]
    pub nodes: Vec<HolderNode>,
}

fn default_full_name() -> String {
    "Unknown Token".to_string()
}

fn default_symbol() -> String {
    "UNKNOWN".to_string()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_full_payload() {
        let json = r#"{
            "full_name": "Shiba Inu",
            "symbol": "SHIB",
            "nodes": [
                {"percentage": 41.0, "transaction_count": 12, "is_contract": true},
                {"percentage": 3.5}
            ]
        }"#;
        let data: TokenData = serde_json::from_str(json).unwrap();
        assert_eq!(data.full_name, "Shiba Inu");
        assert_eq!(data.nodes.len(), 2);
        assert!(data.nodes[0].is_contract);
        assert_eq!(data.nodes[1].transaction_count, 0);
    }

    #[test]
    fn missing_fields_take_defaults() {
        let data: TokenData = serde_json::from_str("{}").unwrap();
        assert_eq!(data.full_name, "Unknown Token");
        assert_eq!(data.symbol, "UNKNOWN");
        assert!(data.nodes.is_empty());
    }
}
