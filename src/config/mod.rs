// src/config/mod.rs
use anyhow::{anyhow, Context, Result};
use std::env;
use std::time::Duration;
use url::Url;

pub const DEFAULT_BASE_URL: &str = "https://wttr.in";
pub const DEFAULT_TIMEOUT_SECS: u64 = 10;
pub const DEFAULT_LANG: &str = "ru";

pub const ENV_BASE_URL: &str = "WTTR_BASE_URL";
pub const ENV_TIMEOUT_SECS: &str = "WTTR_TIMEOUT_SECS";
pub const ENV_LANG: &str = "WTTR_LANG";

#[derive(Debug, Clone)]
pub struct Config {
    pub base_url: Url,
    pub timeout: Duration,
    // Language tag sent with forecast requests
    pub lang: String,
}

impl Config {
    // 1. Load from the process environment (.env first, if present)
    pub fn from_env() -> Result<Self> {
        dotenv::dotenv().ok();
        Self::from_lookup(|key| env::var(key).ok())
    }

    // 2. The parsing logic, independent of where values come from
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let raw_url = non_empty(lookup(ENV_BASE_URL)).unwrap_or_else(|| DEFAULT_BASE_URL.to_string());
        let base_url =
            Url::parse(&raw_url).with_context(|| format!("Invalid {}: {}", ENV_BASE_URL, raw_url))?;
        if base_url.cannot_be_a_base() {
            return Err(anyhow!("Invalid {}: {} cannot be a base URL", ENV_BASE_URL, raw_url));
        }

        let mut config = Self {
            base_url,
            timeout: Duration::from_secs(DEFAULT_TIMEOUT_SECS),
            lang: DEFAULT_LANG.to_string(),
        };

        if let Some(raw) = non_empty(lookup(ENV_TIMEOUT_SECS)) {
            let secs: u64 = raw
                .parse()
                .with_context(|| format!("Invalid {}: {}", ENV_TIMEOUT_SECS, raw))?;
            if secs == 0 {
                return Err(anyhow!("Invalid {}: must be at least 1 second", ENV_TIMEOUT_SECS));
            }
            config.timeout = Duration::from_secs(secs);
        }

        if let Some(lang) = non_empty(lookup(ENV_LANG)) {
            config.lang = lang;
        }

        Ok(config)
    }
}

fn non_empty(value: Option<String>) -> Option<String> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}
