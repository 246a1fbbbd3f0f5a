//! Category catalog and per-record category resolution.
//!
//! Three resolution policies exist in deployments of this tool:
//!
//! - `constant` — every offer lands in one fixed category;
//! - `text-match` — the row's free-text category cell is matched against
//!   seeded category names (case-insensitive substring, first match wins);
//! - `vendor-match` — the row's vendor is looked up in a seeded
//!   vendor→category table (exact case-insensitive match).
//!
//! The seed file is JSON:
//!
//! ```json
//! {
//!   "categories": [{ "id": "TOYOTA", "name": "Toyota" }],
//!   "vendors": { "Toyota": "TOYOTA" }
//! }
//! ```
//!
//! Whatever the policy, the catalog always holds at least one entry (the
//! policy's default), so the serialized `categories` section is never empty.

use std::collections::{BTreeMap, HashMap};
use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use serde::Deserialize;

use crate::cli::CategoryPolicy;
use crate::error::{FeedError, FeedResult};

pub const CONSTANT_CATEGORY_ID: &str = "1";
pub const FALLBACK_CATEGORY_ID: &str = "0";
pub const UNCATEGORIZED_NAME: &str = "Без категорії";
pub const OTHER_VENDORS_NAME: &str = "Інші виробники";

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct CategoryEntry {
    pub id: String,
    pub name: String,
}

/// Deserialized seed file contents.
#[derive(Debug, Default, Deserialize)]
pub struct CategorySeed {
    #[serde(default)]
    pub categories: Vec<CategoryEntry>,
    #[serde(default)]
    pub vendors: BTreeMap<String, String>,
}

impl CategorySeed {
    pub fn load(path: &Path) -> FeedResult<Self> {
        let file = File::open(path)?;
        let reader = BufReader::new(file);
        serde_json::from_reader(reader)
            .map_err(|err| FeedError::Seed(format!("{}: {err}", path.display())))
    }
}

/// Immutable category table plus the lookup strategy for one run.
#[derive(Debug)]
pub struct CategoryCatalog {
    policy: CategoryPolicy,
    entries: Vec<CategoryEntry>,
    vendors: HashMap<String, String>,
    default_id: String,
}

impl CategoryCatalog {
    pub fn build(
        policy: CategoryPolicy,
        seed: Option<CategorySeed>,
        constant_name: &str,
    ) -> FeedResult<Self> {
        let seed = seed.unwrap_or_default();
        match policy {
            CategoryPolicy::Constant => Ok(CategoryCatalog {
                policy,
                entries: vec![CategoryEntry {
                    id: CONSTANT_CATEGORY_ID.to_string(),
                    name: constant_name.to_string(),
                }],
                vendors: HashMap::new(),
                default_id: CONSTANT_CATEGORY_ID.to_string(),
            }),
            CategoryPolicy::TextMatch => {
                let entries = with_fallback(seed.categories, UNCATEGORIZED_NAME);
                Ok(CategoryCatalog {
                    policy,
                    entries,
                    vendors: HashMap::new(),
                    default_id: FALLBACK_CATEGORY_ID.to_string(),
                })
            }
            CategoryPolicy::VendorMatch => {
                let entries = with_fallback(seed.categories, OTHER_VENDORS_NAME);
                let mut vendors = HashMap::new();
                for (vendor, category_id) in seed.vendors {
                    if !entries.iter().any(|entry| entry.id == category_id) {
                        return Err(FeedError::Seed(format!(
                            "vendor '{vendor}' points at unknown category '{category_id}'"
                        )));
                    }
                    vendors.insert(vendor.to_lowercase(), category_id);
                }
                Ok(CategoryCatalog {
                    policy,
                    entries,
                    vendors,
                    default_id: FALLBACK_CATEGORY_ID.to_string(),
                })
            }
        }
    }

    /// Category rows in seed order, fallback entry last.
    pub fn entries(&self) -> &[CategoryEntry] {
        &self.entries
    }

    /// Resolves one row to a category id according to the active policy.
    pub fn resolve(&self, category_text: &str, vendor: &str) -> &str {
        match self.policy {
            CategoryPolicy::Constant => &self.default_id,
            CategoryPolicy::TextMatch => {
                let needle = category_text.trim().to_lowercase();
                if needle.is_empty() {
                    return &self.default_id;
                }
                self.entries
                    .iter()
                    .filter(|entry| entry.id != FALLBACK_CATEGORY_ID)
                    .find(|entry| entry.name.to_lowercase().contains(&needle))
                    .map(|entry| entry.id.as_str())
                    .unwrap_or(&self.default_id)
            }
            CategoryPolicy::VendorMatch => {
                let key = vendor.trim().to_lowercase();
                self.vendors
                    .get(&key)
                    .map(String::as_str)
                    .unwrap_or(&self.default_id)
            }
        }
    }
}

fn with_fallback(mut entries: Vec<CategoryEntry>, fallback_name: &str) -> Vec<CategoryEntry> {
    if !entries.iter().any(|entry| entry.id == FALLBACK_CATEGORY_ID) {
        entries.push(CategoryEntry {
            id: FALLBACK_CATEGORY_ID.to_string(),
            name: fallback_name.to_string(),
        });
    }
    entries
}
