use anyhow::{anyhow, Context, Result};
use lazy_static::lazy_static;
use log::{debug, warn};
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::sync::Arc;

mod bundled;
mod file;
mod remote;

pub use bundled::BundledCatalog;
pub use file::FileCatalog;
pub use remote::RemoteCatalog;


lazy_static! {
    static ref COUNTRY_ID_REGEX: Regex = Regex::new("^[A-Z]{2}$").unwrap();
    static ref FLAG_REF_REGEX: Regex = Regex::new("^(https?://\\S+|data:image/\\S+)$").unwrap();
}

#[derive(Clone, Debug, Deserialize, Eq, Hash, PartialEq, Serialize)]
pub struct CountryRecord {
    pub id: String,
    #[serde(rename = "name")]
    pub display_name: String,
    #[serde(rename = "flag")]
    pub flag_ref: String,
}

impl CountryRecord {
    pub fn new(id: &str, display_name: &str, flag_ref: &str) -> Self {
        CountryRecord {
            id: id.to_owned(),
            display_name: display_name.to_owned(),
            flag_ref: flag_ref.to_owned(),
        }
    }
}

pub type CatalogHandle = Arc<Vec<CountryRecord>>;

pub trait CatalogSupplier {
    fn name(&self) -> &str;
    fn fetch(&self) -> Result<Vec<CountryRecord>>;
}

// Normalizes records and drops the ones a quiz cannot be built from.
pub fn validate(records: Vec<CountryRecord>) -> Vec<CountryRecord> {
    let mut seen_ids = HashSet::new();
    records
        .into_iter()
        .filter_map(|record| {
            let record = CountryRecord {
                id: record.id.trim().to_uppercase(),
                display_name: record.display_name.trim().to_owned(),
                flag_ref: record.flag_ref.trim().to_owned(),
            };
            if record.display_name.is_empty() {
                debug!("Dropping country `{}`: empty name", record.id);
                return None;
            }
            if !COUNTRY_ID_REGEX.is_match(&record.id) {
                debug!("Dropping country `{}`: invalid id", record.display_name);
                return None;
            }
            if !FLAG_REF_REGEX.is_match(&record.flag_ref) {
                debug!("Dropping country `{}`: invalid flag", record.id);
                return None;
            }
            if !seen_ids.insert(record.id.clone()) {
                debug!("Dropping country `{}`: duplicate id", record.id);
                return None;
            }
            Some(record)
        })
        .collect()
}

pub struct SuppliedCatalog {
    pub catalog: CatalogHandle,
    pub used_fallback: bool,
}

pub struct FallbackCatalog {
    primary: Box<dyn CatalogSupplier>,
    fallbacks: Vec<Box<dyn CatalogSupplier>>,
}

impl FallbackCatalog {
    pub fn new(primary: Box<dyn CatalogSupplier>) -> Self {
        FallbackCatalog {
            primary,
            fallbacks: Vec::new(),
        }
    }

    pub fn or_else(mut self, fallback: Box<dyn CatalogSupplier>) -> Self {
        self.fallbacks.push(fallback);
        self
    }

    pub fn supply(&self) -> Result<SuppliedCatalog> {
        let mut last_error = match fetch_valid(self.primary.as_ref()) {
            Ok(records) => {
                return Ok(SuppliedCatalog {
                    catalog: Arc::new(records),
                    used_fallback: false,
                })
            }
            Err(e) => e,
        };

        for fallback in &self.fallbacks {
            warn!("{:#}, trying {} instead", last_error, fallback.name());
            match fetch_valid(fallback.as_ref()) {
                Ok(records) => {
                    return Ok(SuppliedCatalog {
                        catalog: Arc::new(records),
                        used_fallback: true,
                    })
                }
                Err(e) => last_error = e,
            }
        }

        Err(last_error)
    }
}

fn fetch_valid(supplier: &dyn CatalogSupplier) -> Result<Vec<CountryRecord>> {
    let records = supplier
        .fetch()
        .with_context(|| format!("Could not load {}", supplier.name()))?;
    let records = validate(records);
    if records.is_empty() {
        return Err(anyhow!("{} contains no usable countries", supplier.name()));
    }
    debug!("Loaded {} countries from {}", records.len(), supplier.name());
    Ok(records)
}
