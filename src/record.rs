use rust_decimal::Decimal;

/// A normalized, validated product ready for serialization.
///
/// Built by the loader exclusively; a record exists only if the source row
/// carried a non-empty code, a non-empty name, and a positive price.
#[derive(Debug, Clone, PartialEq)]
pub struct ProductRecord {
    /// Offer identifier, derived as `{prefix}{code}`.
    pub id: String,
    /// Display name; prefixed with the code unless the name already
    /// contains it (case-insensitive).
    pub name: String,
    pub price: Decimal,
    /// Three-letter currency code, upper-cased.
    pub currency: String,
    pub available: bool,
    /// Stock count; always 0 when `available` is false.
    pub quantity: u32,
    /// Trimmed, deduplicated picture URLs, at most ten.
    pub pictures: Vec<String>,
    /// Key into the category catalog.
    pub category_id: String,
    pub vendor: String,
    /// Raw source code, kept separately from `id`.
    pub vendor_code: String,
}

impl ProductRecord {
    /// Offer description mirrors the display name.
    pub fn description(&self) -> &str {
        &self.name
    }
}
