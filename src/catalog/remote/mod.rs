use anyhow::{anyhow, Context, Result};
use log::{debug, warn};
use serde::Deserialize;
use std::thread;
use std::time::Duration;

use super::file::FileCatalog;
use super::{validate, CatalogSupplier, CountryRecord};
use crate::game::settings::Settings;


#[derive(Debug, Deserialize)]
struct RawName {
    common: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawFlags {
    svg: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawCountry {
    name: Option<RawName>,
    flags: Option<RawFlags>,
    cca2: Option<String>,
}

impl RawCountry {
    fn into_record(self) -> Option<CountryRecord> {
        let name = self.name?.common?;
        let flag = self.flags?.svg?;
        let id = self.cca2?;
        Some(CountryRecord {
            id,
            display_name: name,
            flag_ref: flag,
        })
    }
}

fn into_records(raw_countries: Vec<RawCountry>) -> Vec<CountryRecord> {
    let total = raw_countries.len();
    let records: Vec<CountryRecord> = raw_countries
        .into_iter()
        .filter_map(RawCountry::into_record)
        .collect();
    if records.len() < total {
        debug!(
            "Ignored {} countries with missing name, flag or code",
            total - records.len()
        );
    }
    records
}

pub fn parse_countries(json: &str) -> Result<Vec<CountryRecord>> {
    let raw_countries: Vec<RawCountry> =
        serde_json::from_str(json).context("Malformed country list")?;
    Ok(into_records(raw_countries))
}

fn is_timeout(error: &anyhow::Error) -> bool {
    error
        .downcast_ref::<reqwest::Error>()
        .map(|e| e.is_timeout())
        .unwrap_or(false)
}

pub fn with_retries<T, F>(retries: u32, delay: Duration, mut attempt: F) -> Result<T>
where
    F: FnMut() -> Result<T>,
{
    let mut retry_count = 0;
    loop {
        let error = match attempt() {
            Ok(value) => return Ok(value),
            Err(e) => e,
        };
        if retry_count >= retries || is_timeout(&error) {
            return Err(error);
        }
        retry_count += 1;
        warn!(
            "Failed to fetch countries (retry {}/{}): {:#}",
            retry_count, retries, error
        );
        thread::sleep(delay);
    }
}

pub struct RemoteCatalog {
    url: String,
    timeout: Duration,
    retries: u32,
    retry_delay: Duration,
    cache: Option<FileCatalog>,
}

impl RemoteCatalog {
    pub fn new(settings: &Settings) -> Self {
        RemoteCatalog {
            url: settings.catalog_url.clone(),
            timeout: settings.fetch_timeout,
            retries: settings.fetch_retries,
            retry_delay: settings.retry_delay,
            cache: None,
        }
    }

    pub fn with_cache(mut self, cache: FileCatalog) -> Self {
        self.cache = Some(cache);
        self
    }

    fn request(&self, client: &reqwest::blocking::Client) -> Result<Vec<CountryRecord>> {
        let response = client.get(&self.url).send()?;
        let status = response.status();
        if !status.is_success() {
            return Err(anyhow!("HTTP error! status: {}", status));
        }
        let body = response.text()?;
        parse_countries(&body)
    }
}

impl CatalogSupplier for RemoteCatalog {
    fn name(&self) -> &str {
        &self.url
    }

    fn fetch(&self) -> Result<Vec<CountryRecord>> {
        let client = reqwest::blocking::Client::builder()
            .timeout(self.timeout)
            .build()?;
        let records = with_retries(self.retries, self.retry_delay, || self.request(&client))?;

        let records = validate(records);

        if let Some(cache) = &self.cache {
            if records.is_empty() {
                warn!("Not caching empty country list from {}", self.url);
            } else if let Err(e) = cache.save(&records) {
                warn!("Could not cache country list: {:#}", e);
            }
        }

        Ok(records)
    }
}
