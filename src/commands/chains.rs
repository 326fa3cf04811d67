use crate::models;

/// Print the supported chain registry.
pub fn run() {
    println!("Supported chains:");
    for chain in models::all_chains() {
        let format_hint = match (chain.prefix, chain.length) {
            (Some(prefix), Some(length)) => {
                format!("{}... ({} characters)", prefix, length)
            }
            _ => "base58 (32-44 characters)".to_string(),
        };
        println!("  {:6} {} ({})", chain.key, chain.name, format_hint);
    }
}
