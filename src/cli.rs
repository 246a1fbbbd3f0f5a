use std::path::PathBuf;
use std::str::FromStr;

use clap::{Args, Parser, Subcommand, ValueEnum};
use rust_decimal::Decimal;

#[derive(Debug, Parser)]
#[command(author, version, about = "Convert spreadsheet product feeds to YML catalogs", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,
}

#[derive(Debug, Subcommand)]
pub enum Commands {
    /// Fetch the feed, normalize it, and write the YML catalog
    Build(BuildArgs),
    /// Load the feed and report row counts without writing output
    Check(CheckArgs),
}

/// How offers are assigned to catalog categories.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
#[value(rename_all = "kebab-case")]
pub enum CategoryPolicy {
    /// Every offer gets the same fixed category
    Constant,
    /// Match the row's category text against seeded category names
    TextMatch,
    /// Match the row's vendor against a seeded vendor table
    VendorMatch,
}

#[derive(Debug, Args)]
pub struct SourceArgs {
    /// Fetch the feed CSV from this URL
    #[arg(long, conflicts_with = "input")]
    pub url: Option<String>,
    /// Read the feed CSV from this file ('-' for stdin)
    #[arg(short = 'i', long = "input")]
    pub input: Option<PathBuf>,
    /// CSV delimiter character (supports ',', 'tab', ';', '|')
    #[arg(long, value_parser = parse_delimiter, default_value = ",")]
    pub delimiter: u8,
    /// Character encoding of the source text (defaults to utf-8)
    #[arg(long = "input-encoding")]
    pub input_encoding: Option<String>,
}

#[derive(Debug, Args)]
pub struct FeedArgs {
    /// Category resolution policy
    #[arg(long = "policy", value_enum, default_value = "constant")]
    pub policy: CategoryPolicy,
    /// JSON seed file with categories and vendor mappings
    #[arg(long)]
    pub seed: Option<PathBuf>,
    /// Category display name used by the constant policy
    #[arg(long = "category-name", default_value = "Автозапчастини та комплектуючі")]
    pub category_name: String,
    /// Currency assigned when a row leaves the currency cell blank
    #[arg(long = "base-currency", default_value = "UAH")]
    pub base_currency: String,
    /// Vendor name assigned when a row leaves the vendor cell blank
    #[arg(long = "fallback-vendor", default_value = "NoName")]
    pub fallback_vendor: String,
    /// Prefix prepended to the part code to form the offer id
    #[arg(long = "id-prefix", default_value = "f0_")]
    pub id_prefix: String,
}

#[derive(Debug, Args)]
pub struct BuildArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub feed: FeedArgs,
    /// Output YML file ('-' for stdout)
    #[arg(short = 'o', long = "output", default_value = "catalog.yml")]
    pub output: PathBuf,
    /// Shop display name for the catalog header
    #[arg(long = "shop-name", default_value = "My Shop")]
    pub shop_name: String,
    /// Legal company name for the catalog header
    #[arg(long, default_value = "My Shop")]
    pub company: String,
    /// Shop homepage URL for the catalog header
    #[arg(long, default_value = "https://example.com")]
    pub homepage: String,
    /// Secondary currency rates of the form `CODE:RATE` (repeatable)
    #[arg(long = "rate", value_parser = parse_rate, action = clap::ArgAction::Append)]
    pub rates: Vec<CurrencyRate>,
    /// Omit marketplace param elements from offers
    #[arg(long = "skip-params")]
    pub skip_params: bool,
}

#[derive(Debug, Args)]
pub struct CheckArgs {
    #[command(flatten)]
    pub source: SourceArgs,
    #[command(flatten)]
    pub feed: FeedArgs,
}

/// Static conversion rate for a secondary currency.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CurrencyRate {
    pub code: String,
    pub rate: String,
}

pub fn parse_rate(value: &str) -> Result<CurrencyRate, String> {
    let (code, rate) = value
        .split_once(':')
        .ok_or_else(|| format!("Expected CODE:RATE, got '{value}'"))?;
    let code = code.trim();
    let rate = rate.trim();
    if code.is_empty() {
        return Err("Currency code cannot be empty".to_string());
    }
    Decimal::from_str(rate).map_err(|_| format!("'{rate}' is not a valid rate"))?;
    Ok(CurrencyRate {
        code: code.to_uppercase(),
        rate: rate.to_string(),
    })
}

pub fn parse_delimiter(value: &str) -> Result<u8, String> {
    match value {
        "tab" | "\t" => Ok(b'\t'),
        "comma" | "," => Ok(b','),
        "|" | "pipe" => Ok(b'|'),
        ";" | "semicolon" => Ok(b';'),
        other => {
            let mut chars = other.chars();
            let first = chars
                .next()
                .ok_or_else(|| "Delimiter cannot be empty".to_string())?;
            if chars.next().is_some() {
                return Err("Delimiter must be a single character".to_string());
            }
            if !first.is_ascii() {
                return Err("Delimiter must be ASCII".to_string());
            }
            Ok(first as u8)
        }
    }
}
