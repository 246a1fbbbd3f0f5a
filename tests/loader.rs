mod common;

use proptest::prelude::*;
use rust_decimal::Decimal;
use sheet2yml::category::{CategoryCatalog, CategoryEntry, CategorySeed, FALLBACK_CATEGORY_ID};
use sheet2yml::cli::CategoryPolicy;
use sheet2yml::loader::{self, LoadOptions};
use sheet2yml::writer::{self, ShopConfig};

use common::SAMPLE_FEED;

fn constant_catalog() -> CategoryCatalog {
    CategoryCatalog::build(CategoryPolicy::Constant, None, "Автозапчастини").expect("catalog")
}

#[test]
fn sample_feed_loads_three_of_four_rows() {
    let outcome = loader::load(SAMPLE_FEED, &constant_catalog(), &LoadOptions::default())
        .expect("load sample feed");
    assert_eq!(outcome.loaded, 3);
    assert_eq!(outcome.skipped, 1);
    assert_eq!(outcome.loaded + outcome.skipped, 4);

    let first = &outcome.records[0];
    assert_eq!(first.id, "f0_AB123");
    assert_eq!(first.name, "AB123 Фільтр оливи");
    assert_eq!(first.price, Decimal::new(1_234_50, 2));
    assert_eq!(first.currency, "UAH");
    assert!(first.available);
    assert_eq!(first.quantity, 2);
    assert_eq!(first.pictures, vec!["a.jpg", "b.jpg"]);

    let second = &outcome.records[1];
    assert_eq!(second.currency, "USD");
    assert!(!second.available);
    assert_eq!(second.quantity, 0);

    let third = &outcome.records[2];
    assert_eq!(third.vendor, "NoName");
    assert!(third.available);
    assert_eq!(third.quantity, 5);
}

#[test]
fn vendor_match_policy_routes_offers_by_vendor() {
    let seed = CategorySeed {
        categories: vec![
            CategoryEntry {
                id: "TOYOTA".to_string(),
                name: "Toyota".to_string(),
            },
            CategoryEntry {
                id: "HONDA".to_string(),
                name: "Honda".to_string(),
            },
        ],
        vendors: [
            ("Toyota".to_string(), "TOYOTA".to_string()),
            ("Honda".to_string(), "HONDA".to_string()),
        ]
        .into_iter()
        .collect(),
    };
    let catalog = CategoryCatalog::build(CategoryPolicy::VendorMatch, Some(seed), "")
        .expect("vendor catalog");
    let outcome =
        loader::load(SAMPLE_FEED, &catalog, &LoadOptions::default()).expect("load sample feed");

    assert_eq!(outcome.records[0].category_id, "TOYOTA");
    assert_eq!(outcome.records[1].category_id, "HONDA");
    // Blank vendor fell back to the default vendor name, which is unseeded.
    assert_eq!(outcome.records[2].category_id, FALLBACK_CATEGORY_ID);
}

#[test]
fn custom_id_prefix_and_base_currency_apply() {
    let options = LoadOptions {
        id_prefix: "shop1_".to_string(),
        base_currency: "eur".to_string(),
        ..LoadOptions::default()
    };
    let outcome =
        loader::load(SAMPLE_FEED, &constant_catalog(), &options).expect("load sample feed");
    assert_eq!(outcome.records[0].id, "shop1_AB123");
    assert_eq!(outcome.records[0].currency, "EUR");
}

#[test]
fn pipeline_output_is_stable_for_fixed_date() {
    let catalog = constant_catalog();
    let outcome =
        loader::load(SAMPLE_FEED, &catalog, &LoadOptions::default()).expect("load sample feed");
    assert_eq!(outcome.loaded, 3);
    assert_eq!(outcome.skipped, 1);

    let shop = ShopConfig {
        name: "My Shop".to_string(),
        company: "My Shop".to_string(),
        homepage: "https://example.com".to_string(),
        base_currency: "UAH".to_string(),
        rates: Vec::new(),
        include_params: true,
    };
    let mut first = Vec::new();
    writer::write_catalog(&mut first, &outcome.records, &catalog, &shop, "2024-01-01 00:00")
        .expect("serialize catalog");
    let mut second = Vec::new();
    writer::write_catalog(&mut second, &outcome.records, &catalog, &shop, "2024-01-01 00:00")
        .expect("serialize catalog again");
    assert_eq!(first, second);

    let xml = String::from_utf8(first).expect("utf-8 catalog");
    assert!(xml.contains("<price>1234.50</price>"));
    assert!(xml.contains("<offer id=\"f0_CD456\" available=\"false\">"));
    assert!(xml.contains("<stock_quantity>0</stock_quantity>"));
}

fn price_cell() -> impl Strategy<Value = String> {
    prop_oneof![
        Just(String::new()),
        Just("n/a".to_string()),
        Just("0".to_string()),
        (1u32..100_000, 0u32..100).prop_map(|(whole, cents)| format!("{whole}.{cents:02}")),
    ]
}

proptest! {
    #[test]
    fn loaded_plus_skipped_accounts_for_every_data_row(
        rows in proptest::collection::vec(
            ("[A-Z][A-Z0-9]{0,5}|", "[a-z]{0,8}", price_cell()),
            0..40,
        )
    ) {
        let mut raw = String::from("код,виробник,назва,фото,к-ть,ціна\n");
        let mut expected_loaded = 0usize;
        for (code, name, price) in &rows {
            if !code.is_empty() && !name.is_empty() && sheet2yml::coerce::parse_price(price).is_some() {
                expected_loaded += 1;
            }
            raw.push_str(&format!("{code},Bosch,{name},,1,{price}\n"));
        }
        match loader::load(&raw, &constant_catalog(), &LoadOptions::default()) {
            Ok(outcome) => {
                prop_assert_eq!(outcome.loaded + outcome.skipped, rows.len());
                prop_assert_eq!(outcome.loaded, expected_loaded);
                prop_assert_eq!(outcome.records.len(), outcome.loaded);
            }
            Err(err) => prop_assert!(false, "load failed: {err}"),
        }
    }
}
