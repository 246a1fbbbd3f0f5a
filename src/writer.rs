//! YML catalog serialization.
//!
//! Builds the fixed document shape consumed by marketplace importers:
//! `yml_catalog` (with a generation `date` attribute) → `shop` → identity
//! fields, `currencies`, `categories`, `offers`. Output is deterministic
//! for identical input except for the injected date string; reserved XML
//! characters in text content are escaped by quick-xml.

use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

use chrono::Local;
use log::debug;
use quick_xml::Writer;
use quick_xml::events::{BytesDecl, BytesText, Event};

use crate::category::CategoryCatalog;
use crate::cli::CurrencyRate;
use crate::error::FeedResult;
use crate::record::ProductRecord;
use crate::source::is_dash;

/// Fixed per-deployment identity and currency configuration.
#[derive(Debug, Clone)]
pub struct ShopConfig {
    pub name: String,
    pub company: String,
    pub homepage: String,
    pub base_currency: String,
    /// Secondary currencies with static conversion rates.
    pub rates: Vec<CurrencyRate>,
    /// Emit marketplace `param` elements on each offer.
    pub include_params: bool,
}

/// Generation timestamp for the catalog `date` attribute.
pub fn timestamp() -> String {
    Local::now().format("%Y-%m-%d %H:%M").to_string()
}

/// Serializes the catalog to `path`, with `-` routing to stdout.
pub fn write_to_path(
    path: &Path,
    records: &[ProductRecord],
    catalog: &CategoryCatalog,
    shop: &ShopConfig,
    date: &str,
) -> FeedResult<()> {
    if is_dash(path) {
        let stdout = std::io::stdout();
        write_catalog(stdout.lock(), records, catalog, shop, date)
    } else {
        let file = BufWriter::new(File::create(path)?);
        write_catalog(file, records, catalog, shop, date)
    }
}

/// Serializes the catalog document to any writer.
pub fn write_catalog<W: Write>(
    out: W,
    records: &[ProductRecord],
    catalog: &CategoryCatalog,
    shop: &ShopConfig,
    date: &str,
) -> FeedResult<()> {
    debug!("Serializing {} offer(s)", records.len());
    let mut writer = Writer::new_with_indent(out, b' ', 2);
    writer.write_event(Event::Decl(BytesDecl::new("1.0", Some("UTF-8"), None)))?;
    writer
        .create_element("yml_catalog")
        .with_attribute(("date", date))
        .write_inner_content(|w| -> quick_xml::Result<()> {
            w.create_element("shop")
                .write_inner_content(|w| -> quick_xml::Result<()> {
                    text_element(w, "name", &shop.name)?;
                    text_element(w, "company", &shop.company)?;
                    text_element(w, "url", &shop.homepage)?;
                    write_currencies(w, shop)?;
                    write_categories(w, catalog)?;
                    w.create_element("offers")
                        .write_inner_content(|w| -> quick_xml::Result<()> {
                            for record in records {
                                write_offer(w, record, shop)?;
                            }
                            Ok(())
                        })?;
                    Ok(())
                })?;
            Ok(())
        })?;
    Ok(())
}

fn write_currencies<W: Write>(w: &mut Writer<W>, shop: &ShopConfig) -> quick_xml::Result<()> {
    w.create_element("currencies")
        .write_inner_content(|w| -> quick_xml::Result<()> {
            // Base currency always leads at rate 1.
            w.create_element("currency")
                .with_attribute(("id", shop.base_currency.as_str()))
                .with_attribute(("rate", "1"))
                .write_empty()?;
            for rate in &shop.rates {
                // A configured rate for the base currency would duplicate
                // the leading entry.
                if rate.code.eq_ignore_ascii_case(&shop.base_currency) {
                    continue;
                }
                w.create_element("currency")
                    .with_attribute(("id", rate.code.as_str()))
                    .with_attribute(("rate", rate.rate.as_str()))
                    .write_empty()?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_categories<W: Write>(
    w: &mut Writer<W>,
    catalog: &CategoryCatalog,
) -> quick_xml::Result<()> {
    w.create_element("categories")
        .write_inner_content(|w| -> quick_xml::Result<()> {
            for entry in catalog.entries() {
                w.create_element("category")
                    .with_attribute(("id", entry.id.as_str()))
                    .write_text_content(BytesText::new(&entry.name))?;
            }
            Ok(())
        })?;
    Ok(())
}

fn write_offer<W: Write>(
    w: &mut Writer<W>,
    record: &ProductRecord,
    shop: &ShopConfig,
) -> quick_xml::Result<()> {
    let price = record.price.to_string();
    let quantity = record.quantity.to_string();
    w.create_element("offer")
        .with_attribute(("id", record.id.as_str()))
        .with_attribute(("available", if record.available { "true" } else { "false" }))
        .write_inner_content(|w| -> quick_xml::Result<()> {
            text_element(w, "name", &record.name)?;
            text_element(w, "price", &price)?;
            text_element(w, "currencyId", &record.currency)?;
            text_element(w, "categoryId", &record.category_id)?;
            text_element(w, "vendor", &record.vendor)?;
            text_element(w, "vendorCode", &record.vendor_code)?;
            if shop.include_params {
                param_element(w, "Виробник", &record.vendor)?;
                param_element(w, "Код запчастини", &record.vendor_code)?;
            }
            text_element(w, "stock_quantity", &quantity)?;
            text_element(w, "description", record.description())?;
            for picture in &record.pictures {
                text_element(w, "picture", picture)?;
            }
            Ok(())
        })?;
    Ok(())
}

fn text_element<W: Write>(w: &mut Writer<W>, tag: &str, text: &str) -> quick_xml::Result<()> {
    w.create_element(tag)
        .write_text_content(BytesText::new(text))?;
    Ok(())
}

fn param_element<W: Write>(w: &mut Writer<W>, name: &str, value: &str) -> quick_xml::Result<()> {
    w.create_element("param")
        .with_attribute(("name", name))
        .write_text_content(BytesText::new(value))?;
    Ok(())
}
