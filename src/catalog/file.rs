use anyhow::{Context, Result};
use directories_next::BaseDirs;
use log::debug;
use std::fs::{self, File};
use std::path::{Path, PathBuf};

use super::{CatalogSupplier, CountryRecord};

pub fn get_cache_path() -> Result<PathBuf> {
    let mut path = BaseDirs::new()
        .context("could not locate system directories")?
        .cache_dir()
        .to_path_buf();
    path.push("flag-quiz");
    path.push("countries.csv");
    Ok(path)
}

pub struct FileCatalog {
    path: PathBuf,
    name: String,
}

impl FileCatalog {
    pub fn new(path: &Path) -> Self {
        FileCatalog {
            path: path.to_path_buf(),
            name: format!("country list `{}`", path.to_string_lossy()),
        }
    }

    pub fn cached() -> Result<Self> {
        let path = get_cache_path()?;
        Ok(FileCatalog {
            name: format!("cached country list `{}`", path.to_string_lossy()),
            path,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    pub fn save(&self, records: &[CountryRecord]) -> Result<()> {
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Could not create `{}`", parent.to_string_lossy()))?;
        }
        let file = File::create(&self.path)?;
        let mut csv_writer = csv::Writer::from_writer(file);
        for record in records {
            csv_writer.serialize(record)?;
        }
        csv_writer.flush()?;
        debug!("Saved {} countries to {}", records.len(), self.name);
        Ok(())
    }
}

impl CatalogSupplier for FileCatalog {
    fn name(&self) -> &str {
        &self.name
    }

    fn fetch(&self) -> Result<Vec<CountryRecord>> {
        let mut records = Vec::new();

        let file = File::open(&self.path)?;
        let mut csv_reader = csv::Reader::from_reader(file);
        for record in csv_reader.deserialize() {
            let record: CountryRecord = record?;
            records.push(record);
        }

        Ok(records)
    }
}
