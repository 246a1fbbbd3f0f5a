//! Pure field-coercion helpers.
//!
//! Each helper takes raw cell text and either produces a normalized value or
//! degrades to a default. Only the price reports failure to the caller
//! (`None`), because a missing price invalidates the whole row; every other
//! field falls back silently.

use std::str::FromStr;
use std::sync::OnceLock;

use itertools::Itertools;
use regex::Regex;
use rust_decimal::Decimal;

/// Upper bound on pictures kept per offer.
pub const MAX_PICTURES: usize = 10;

/// Free-text tokens that mark an offer as available, matched after
/// trimming and lowercasing.
const AVAILABLE_TOKENS: &[&str] = &["true", "1", "yes", "в наявності", "наявний", "+"];

/// Numeric ISO 4217 codes that appear in the source sheets. Non-numeric
/// currency cells pass through upper-cased.
const NUMERIC_CURRENCIES: &[(&str, &str)] = &[
    ("30", "UAH"),
    ("980", "UAH"),
    ("840", "USD"),
    ("978", "EUR"),
];

fn price_marker() -> &'static Regex {
    static MARKER: OnceLock<Regex> = OnceLock::new();
    MARKER.get_or_init(|| Regex::new(r"(?i)грн\.?").expect("valid price-marker regex"))
}

/// Parses a price cell into a positive decimal.
///
/// Strips `грн`/`грн.` markers, no-break and thousands spaces, then treats a
/// comma as the decimal separator. Empty, unparseable, zero, and negative
/// values all yield `None`.
pub fn parse_price(raw: &str) -> Option<Decimal> {
    let cleaned: String = price_marker()
        .replace_all(raw.trim(), "")
        .chars()
        .filter(|c| !matches!(c, ' ' | '\u{a0}'))
        .map(|c| if c == ',' { '.' } else { c })
        .collect();
    if cleaned.is_empty() {
        return None;
    }
    Decimal::from_str(&cleaned)
        .ok()
        .filter(|price| price.is_sign_positive() && !price.is_zero())
}

/// Parses a quantity cell into a non-negative count.
///
/// Numeric-like text is accepted with fractional parts truncated; anything
/// else (including negatives) coerces to zero.
pub fn parse_quantity(raw: &str) -> u32 {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return 0;
    }
    match trimmed.parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => value.trunc() as u32,
        _ => 0,
    }
}

/// True when the presence cell matches a recognized "available" token.
pub fn parse_presence(raw: &str) -> bool {
    let lowered = raw.trim().to_lowercase();
    AVAILABLE_TOKENS.contains(&lowered.as_str())
}

/// Normalizes a currency cell to a three-letter code.
///
/// Blank cells fall back to the base currency; numeric ISO codes resolve
/// through [`NUMERIC_CURRENCIES`]; three-ASCII-letter values pass through
/// upper-cased. Anything else is unrecognized and falls back to the base
/// currency.
pub fn normalize_currency(raw: &str, base: &str) -> String {
    let trimmed = raw.trim();
    if let Some((_, alpha)) = NUMERIC_CURRENCIES.iter().find(|(code, _)| *code == trimmed) {
        return (*alpha).to_string();
    }
    if trimmed.len() == 3 && trimmed.chars().all(|c| c.is_ascii_alphabetic()) {
        trimmed.to_uppercase()
    } else {
        base.to_uppercase()
    }
}

/// Splits a picture cell on commas, pipes, and newlines.
///
/// Entries are trimmed, blanks dropped, duplicates removed while preserving
/// first-seen order, and the list capped at [`MAX_PICTURES`].
pub fn split_pictures(raw: &str) -> Vec<String> {
    raw.split(|c| matches!(c, ',' | '|' | '\n' | '\r'))
        .map(str::trim)
        .filter(|url| !url.is_empty())
        .map(str::to_string)
        .unique()
        .take(MAX_PICTURES)
        .collect()
}
