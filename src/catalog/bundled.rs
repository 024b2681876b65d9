use anyhow::Result;

use super::{CatalogSupplier, CountryRecord};

const COUNTRIES: &'static [(&'static str, &'static str)] = &[
    ("US", "United States"),
    ("CA", "Canada"),
    ("GB", "United Kingdom"),
    ("FR", "France"),
    ("DE", "Germany"),
    ("JP", "Japan"),
    ("AU", "Australia"),
    ("BR", "Brazil"),
    ("IN", "India"),
    ("CN", "China"),
    ("MX", "Mexico"),
    ("IT", "Italy"),
    ("ES", "Spain"),
    ("RU", "Russia"),
    ("KR", "South Korea"),
];

fn flag_url(id: &str) -> String {
    format!("https://flagcdn.com/{}.svg", id.to_lowercase())
}

#[derive(Default)]
pub struct BundledCatalog;

impl CatalogSupplier for BundledCatalog {
    fn name(&self) -> &str {
        "bundled country list"
    }

    fn fetch(&self) -> Result<Vec<CountryRecord>> {
        Ok(COUNTRIES
            .iter()
            .map(|(id, name)| CountryRecord::new(id, name, &flag_url(id)))
            .collect())
    }
}
