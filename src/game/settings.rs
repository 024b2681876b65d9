use anyhow::{anyhow, Context, Result};
use std::env;
use std::path::PathBuf;
use std::time::Duration;

const ENV_QUESTIONS: &'static str = "FLAG_QUIZ_QUESTIONS";
const ENV_CATALOG: &'static str = "FLAG_QUIZ_CATALOG";
const ENV_OFFLINE: &'static str = "FLAG_QUIZ_OFFLINE";
const ENV_SEED: &'static str = "FLAG_QUIZ_SEED";
const ENV_URL: &'static str = "FLAG_QUIZ_URL";

pub const MAX_QUESTION_COUNT: usize = 10;

#[derive(Clone, Debug)]
pub struct Settings {
    pub question_count: usize,
    pub options_count: usize,
    pub catalog_url: String,
    pub catalog_path: Option<PathBuf>,
    pub offline: bool,
    pub seed: Option<u64>,
    pub fetch_timeout: Duration,
    pub fetch_retries: u32,
    pub retry_delay: Duration,
}

impl Default for Settings {
    fn default() -> Self {
        Settings {
            question_count: MAX_QUESTION_COUNT,
            options_count: 4,
            catalog_url: "https://restcountries.com/v3.1/all?fields=name,flags,cca2".to_owned(),
            catalog_path: None,
            offline: false,
            seed: None,
            fetch_timeout: Duration::from_secs(15),
            fetch_retries: 3,
            retry_delay: Duration::from_secs(2),
        }
    }
}

impl Settings {
    pub fn from_env() -> Result<Self> {
        Settings::from_vars(|key| env::var(key).ok())
    }

    pub fn from_vars<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let mut settings = Settings::default();

        if let Some(count) = lookup(ENV_QUESTIONS) {
            let count: usize = count
                .trim()
                .parse()
                .with_context(|| format!("{} must be a positive number", ENV_QUESTIONS))?;
            if count == 0 || count > MAX_QUESTION_COUNT {
                return Err(anyhow!(
                    "{} must be between 1 and {}",
                    ENV_QUESTIONS,
                    MAX_QUESTION_COUNT
                ));
            }
            settings.question_count = count;
        }

        if let Some(path) = lookup(ENV_CATALOG) {
            if !path.trim().is_empty() {
                settings.catalog_path = Some(PathBuf::from(path.trim()));
            }
        }

        if let Some(offline) = lookup(ENV_OFFLINE) {
            settings.offline = match offline.trim().to_lowercase().as_ref() {
                "1" | "true" | "yes" => true,
                "0" | "false" | "no" | "" => false,
                other => return Err(anyhow!("Invalid value for {}: {}", ENV_OFFLINE, other)),
            };
        }

        if let Some(seed) = lookup(ENV_SEED) {
            let seed: u64 = seed
                .trim()
                .parse()
                .with_context(|| format!("{} must be an unsigned integer", ENV_SEED))?;
            settings.seed = Some(seed);
        }

        if let Some(url) = lookup(ENV_URL) {
            if !url.trim().is_empty() {
                settings.catalog_url = url.trim().to_owned();
            }
        }

        Ok(settings)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn settings_from(vars: &[(&str, &str)]) -> Result<Settings> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        Settings::from_vars(|key| vars.get(key).cloned())
    }

    #[test]
    fn defaults_without_overrides() {
        let settings = settings_from(&[]).unwrap();
        assert_eq!(settings.question_count, 10);
        assert_eq!(settings.options_count, 4);
        assert_eq!(settings.fetch_retries, 3);
        assert!(!settings.offline);
        assert!(settings.catalog_path.is_none());
        assert!(settings.seed.is_none());
    }

    #[test]
    fn reads_overrides() {
        let settings = settings_from(&[
            (ENV_QUESTIONS, "5"),
            (ENV_CATALOG, "countries.csv"),
            (ENV_OFFLINE, "true"),
            (ENV_SEED, "42"),
        ])
        .unwrap();
        assert_eq!(settings.question_count, 5);
        assert_eq!(settings.catalog_path, Some(PathBuf::from("countries.csv")));
        assert!(settings.offline);
        assert_eq!(settings.seed, Some(42));
    }

    #[test]
    fn accepts_question_count_bounds() {
        assert_eq!(settings_from(&[(ENV_QUESTIONS, "1")]).unwrap().question_count, 1);
        assert_eq!(settings_from(&[(ENV_QUESTIONS, "10")]).unwrap().question_count, 10);
    }

    #[test]
    fn rejects_invalid_values() {
        assert!(settings_from(&[(ENV_QUESTIONS, "0")]).is_err());
        assert!(settings_from(&[(ENV_QUESTIONS, "ten")]).is_err());
        assert!(settings_from(&[(ENV_QUESTIONS, "11")]).is_err());
        assert!(settings_from(&[(ENV_QUESTIONS, "250")]).is_err());
        assert!(settings_from(&[(ENV_OFFLINE, "maybe")]).is_err());
        assert!(settings_from(&[(ENV_SEED, "-1")]).is_err());
    }
}
