//! Reply caption composition and numeric formatting policies.
//!
//! Field order and formatting here are part of the command's contract:
//! downstream parity tests pin the exact output, so changes to precision
//! or ordering are breaking.

use std::fmt::Write;

use crate::constants;
use crate::models::{ChainSpec, MarketData, TokenData};
use crate::services::DecentralizationMetric;

/// How many holders the caption lists.
const MAX_LISTED_HOLDERS: usize = 15;

/// Dollar amount with magnitude suffix: $1.50B / $2.50M / $2.50K / $0.50.
pub fn format_currency(value: f64) -> String {
    if value >= 1_000_000_000.0 {
        format!("${:.2}B", value / 1_000_000_000.0)
    } else if value >= 1_000_000.0 {
        format!("${:.2}M", value / 1_000_000.0)
    } else if value >= 1_000.0 {
        format!("${:.2}K", value / 1_000.0)
    } else {
        format!("${:.2}", value)
    }
}

/// Token price with precision scaled to magnitude, so sub-cent tokens
/// keep their significant digits.
pub fn format_price(value: f64) -> String {
    if value < 0.000_000_01 {
        format!("${:.12}", value)
    } else if value < 0.01 {
        format!("${:.8}", value)
    } else if value < 1.0 {
        format!("${:.4}", value)
    } else {
        format!("${:.2}", value)
    }
}

/// Signed percentage delta with a direction marker.
pub fn format_price_change(value: f64) -> String {
    let marker = if value > 0.0 {
        "\u{1f7e2}"
    } else if value < 0.0 {
        "\u{1f534}"
    } else {
        "\u{26aa}"
    };
    format!("{}{:+.1}%", marker, value)
}

/// Plain percentage, one decimal.
pub fn format_percentage(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Integer with thousands separators (12345 -> "12,345").
fn group_thousands(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn rank_marker(rank: usize) -> &'static str {
    match rank {
        1 => "\u{1f451}",
        2 => "\u{1f948}",
        3 => "\u{1f949}",
        _ => "\u{2022}",
    }
}

fn score_marker(score: f64) -> &'static str {
    if score >= 70.0 {
        "\u{1f7e2}"
    } else if score >= 40.0 {
        "\u{1f7e1}"
    } else {
        "\u{1f534}"
    }
}

/// Compose the full reply caption.
///
/// Fixed order: title, address, chain, optional market block,
/// decentralization line, holder count, top holders, bubble-map link.
/// The market block is emitted only when market data is present.
pub fn format_token_info(
    token: &TokenData,
    market: Option<&MarketData>,
    chain: &ChainSpec,
    address: &str,
    metric: &DecentralizationMetric,
) -> String {
    let mut message = format!(
        "\u{1f50d} *{} ({})*\n`{}`\n{}\n",
        token.full_name, token.symbol, address, chain.name
    );

    if let Some(market) = market {
        let _ = write!(
            message,
            "\u{1f4b0} P: {} MC: {} L: {}\n\u{1f4ca} 1H: {} 24H: {}\n",
            format_price(market.price),
            format_currency(market.market_cap),
            format_currency(market.liquidity),
            format_price_change(market.price_change.h1),
            format_price_change(market.price_change.h24),
        );
    }

    let _ = write!(
        message,
        "Decentralization Score: {}{} Top20: {}\n\u{1f465} Holders: {}\n\nTop Holders:\n",
        score_marker(metric.score),
        format_percentage(metric.score),
        format_percentage(metric.top20_concentration),
        group_thousands(token.nodes.len() as u64),
    );

    for (i, holder) in token.nodes.iter().take(MAX_LISTED_HOLDERS).enumerate() {
        let _ = write!(
            message,
            "{}{}",
            rank_marker(i + 1),
            format_percentage(holder.percentage)
        );
        if holder.transaction_count > 0 {
            let _ = write!(
                message,
                " | \u{1f504} {} txns",
                group_thousands(holder.transaction_count)
            );
        }
        if holder.is_contract {
            message.push_str(" | \u{1f4dc} Contract");
        }
        message.push('\n');
    }

    let _ = write!(
        message,
        "\n\u{1f50d} View on Bubblemaps:\n{}/{}/token/{}",
        constants::BUBBLEMAPS_UI_URL,
        chain.key,
        address
    );

    message
}
