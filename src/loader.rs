//! Row-to-record normalization.
//!
//! Takes the raw delimited feed text and produces validated
//! [`ProductRecord`]s plus skip accounting. Per-row problems are recovered
//! locally: malformed numeric cells degrade to defaults, and rows missing a
//! code, a name, or a parseable positive price are dropped and counted,
//! never surfaced as errors. Only a feed with no rows at all fails the run.

use csv::ReaderBuilder;
use log::debug;

use crate::category::CategoryCatalog;
use crate::coerce;
use crate::columns::{ColumnMap, Field};
use crate::error::{FeedError, FeedResult};
use crate::record::ProductRecord;

/// Per-run normalization settings, resolved from the CLI.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    pub delimiter: u8,
    pub base_currency: String,
    pub fallback_vendor: String,
    pub id_prefix: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        LoadOptions {
            delimiter: b',',
            base_currency: "UAH".to_string(),
            fallback_vendor: "NoName".to_string(),
            id_prefix: "f0_".to_string(),
        }
    }
}

/// Accepted records plus counters for the run summary.
#[derive(Debug)]
pub struct LoadOutcome {
    /// Valid records in source row order.
    pub records: Vec<ProductRecord>,
    pub loaded: usize,
    pub skipped: usize,
}

impl LoadOutcome {
    pub fn available(&self) -> usize {
        self.records.iter().filter(|r| r.available).count()
    }
}

/// Normalizes raw feed text into product records.
///
/// The first row is treated as headers and drives column resolution; data
/// rows shorter than the widest resolved column are right-padded with empty
/// cells rather than rejected.
pub fn load(
    raw: &str,
    catalog: &CategoryCatalog,
    options: &LoadOptions,
) -> FeedResult<LoadOutcome> {
    let mut reader = ReaderBuilder::new()
        .has_headers(false)
        .delimiter(options.delimiter)
        .flexible(true)
        .from_reader(raw.as_bytes());

    let mut rows = reader.records();
    let header_row = match rows.next() {
        Some(record) => record?,
        None => return Err(FeedError::EmptyInput),
    };
    let headers: Vec<String> = header_row
        .iter()
        .map(|cell| cell.trim().to_lowercase())
        .collect();
    let columns = ColumnMap::resolve(&headers);
    let width = columns.min_width();
    debug!("Resolved columns over {} header cell(s): {columns:?}", headers.len());

    let mut records = Vec::new();
    let mut skipped = 0usize;
    for row in rows {
        let row = row?;
        let mut cells: Vec<&str> = row.iter().collect();
        if cells.len() < width {
            cells.resize(width, "");
        }
        let cell = |field: Field| cells[columns.index(field)].trim();

        let code = cell(Field::Code);
        let name = cell(Field::Name);
        let price = coerce::parse_price(cell(Field::Price));
        let (code, name, price) = match (code, name, price) {
            (code, name, Some(price)) if !code.is_empty() && !name.is_empty() => {
                (code, name, price)
            }
            _ => {
                skipped += 1;
                continue;
            }
        };

        let vendor = match cell(Field::Vendor) {
            "" => options.fallback_vendor.clone(),
            vendor => vendor.to_string(),
        };
        let quantity = coerce::parse_quantity(cell(Field::Quantity));
        let available = coerce::parse_presence(cell(Field::Availability)) || quantity > 0;

        records.push(ProductRecord {
            id: format!("{}{code}", options.id_prefix),
            name: display_name(code, name),
            price,
            currency: coerce::normalize_currency(cell(Field::Currency), &options.base_currency),
            available,
            quantity: if available { quantity } else { 0 },
            pictures: coerce::split_pictures(cell(Field::Photos)),
            category_id: catalog.resolve(cell(Field::Category), &vendor).to_string(),
            vendor,
            vendor_code: code.to_string(),
        });
    }

    Ok(LoadOutcome {
        loaded: records.len(),
        records,
        skipped,
    })
}

/// Prepends the code to the name unless the name already contains it
/// (case-insensitive).
fn display_name(code: &str, name: &str) -> String {
    if name.to_lowercase().contains(&code.to_lowercase()) {
        name.to_string()
    } else {
        format!("{code} {name}")
    }
}
