//! Header-alias resolution for feed columns.
//!
//! Spreadsheet exports name their columns inconsistently (Ukrainian and
//! English variants both occur in the wild), so every logical field carries
//! an ordered list of accepted aliases plus a hard-coded default position.
//! Resolution degrades gracefully: a header row with no recognizable label
//! for a field simply yields that field's default index instead of failing
//! the run.

use std::fmt;

/// Logical feed fields, in default column order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Field {
    Code,
    Vendor,
    Name,
    Photos,
    Quantity,
    Price,
    Currency,
    Availability,
    Category,
}

impl Field {
    pub const ALL: [Field; 9] = [
        Field::Code,
        Field::Vendor,
        Field::Name,
        Field::Photos,
        Field::Quantity,
        Field::Price,
        Field::Currency,
        Field::Availability,
        Field::Category,
    ];

    /// Accepted header labels, matched case-insensitively after trimming.
    pub fn aliases(self) -> &'static [&'static str] {
        match self {
            Field::Code => &["номер частини", "код", "артикул", "code", "vendor_code"],
            Field::Vendor => &["виробник", "бренд", "vendor", "manufacturer"],
            Field::Name => &["назва частини", "назва", "name", "title"],
            Field::Photos => &["фото", "photos", "pictures", "images"],
            Field::Quantity => &["к-ть", "кількість", "quantity", "qty"],
            Field::Price => &["ціна", "ціна в uah", "price", "price_uah"],
            Field::Currency => &["код валюти", "валюта", "currency"],
            Field::Availability => &["наявність", "availability", "available", "is_available"],
            Field::Category => &["категорія", "category", "тип", "type", "група", "group"],
        }
    }

    /// Fallback column position used when no alias matches the header row.
    pub fn default_index(self) -> usize {
        match self {
            Field::Code => 0,
            Field::Vendor => 1,
            Field::Name => 2,
            Field::Photos => 3,
            Field::Quantity => 4,
            Field::Price => 5,
            Field::Currency => 6,
            Field::Availability => 7,
            Field::Category => 8,
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            Field::Code => "code",
            Field::Vendor => "vendor",
            Field::Name => "name",
            Field::Photos => "photos",
            Field::Quantity => "quantity",
            Field::Price => "price",
            Field::Currency => "currency",
            Field::Availability => "availability",
            Field::Category => "category",
        };
        f.write_str(name)
    }
}

/// Resolved column positions for one input, one per logical field.
#[derive(Debug, Clone)]
pub struct ColumnMap {
    indexes: [usize; Field::ALL.len()],
}

impl ColumnMap {
    /// Resolves every field against a trimmed, lowercased header row.
    pub fn resolve(headers: &[String]) -> Self {
        let mut indexes = [0usize; Field::ALL.len()];
        for (slot, field) in Field::ALL.into_iter().enumerate() {
            indexes[slot] = field
                .aliases()
                .iter()
                .find_map(|alias| headers.iter().position(|h| h == alias))
                .unwrap_or_else(|| field.default_index());
        }
        ColumnMap { indexes }
    }

    pub fn index(&self, field: Field) -> usize {
        let slot = Field::ALL
            .iter()
            .position(|f| *f == field)
            .expect("field present in Field::ALL");
        self.indexes[slot]
    }

    /// Minimum row width required to address every resolved column.
    pub fn min_width(&self) -> usize {
        self.indexes.iter().copied().max().unwrap_or(0) + 1
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lower(headers: &[&str]) -> Vec<String> {
        headers.iter().map(|h| h.trim().to_lowercase()).collect()
    }

    #[test]
    fn resolve_matches_aliases_case_insensitively() {
        let headers = lower(&["Артикул", "Бренд", "Назва", "Фото", "Qty", "Price"]);
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.index(Field::Code), 0);
        assert_eq!(map.index(Field::Vendor), 1);
        assert_eq!(map.index(Field::Name), 2);
        assert_eq!(map.index(Field::Photos), 3);
        assert_eq!(map.index(Field::Quantity), 4);
        assert_eq!(map.index(Field::Price), 5);
    }

    #[test]
    fn alias_order_decides_between_competing_headers() {
        // "назва частини" precedes "name" in the alias list, so it wins even
        // though "name" appears earlier in the row.
        let headers = lower(&["code", "name", "назва частини"]);
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.index(Field::Name), 2);
    }

    #[test]
    fn missing_alias_falls_back_to_default_index() {
        let headers = lower(&["code", "vendor", "name"]);
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.index(Field::Price), Field::Price.default_index());
        assert_eq!(map.index(Field::Category), Field::Category.default_index());
    }

    #[test]
    fn min_width_covers_largest_resolved_index() {
        let headers = lower(&["code"]);
        let map = ColumnMap::resolve(&headers);
        assert_eq!(map.min_width(), 9);
    }
}
