// src/weather.rs
use anyhow::{Context, Result};
use async_trait::async_trait;
use thiserror::Error;
use url::Url;

use crate::config::Config;

pub const USER_AGENT: &str = "wttr-weather-mcp/1.0";

// Query strings for the three response shapes wttr.in offers.
const CURRENT_FORMAT_QUERY: &str = "format=%l:+%c+%t+(%f)+%h+%w";
const DETAILED_FORMAT_QUERY: &str = "format=j1";

/// Why an upstream lookup failed. Rendered into the in-band tool error text.
#[derive(Debug, Error)]
pub enum WeatherError {
    // Only reachable with a hand-built Config; Config::from_lookup rejects such URLs.
    #[error("building request URL: {0}")]
    Url(String),
    #[error("fetching weather: {0}")]
    Request(#[source] reqwest::Error),
    #[error("reading response: {0}")]
    Body(#[source] reqwest::Error),
    #[error("wttr.in returned status {status}: {body}")]
    Status { status: u16, body: String },
}

/// The three lookups the dispatcher needs. Swapped for a stub in tests.
#[async_trait]
pub trait WeatherGateway: Send + Sync {
    /// One-line summary of current conditions.
    async fn current(&self, location: &str) -> Result<String, WeatherError>;
    /// Text forecast (with ASCII art) for `days` days.
    async fn forecast(&self, location: &str, days: u8) -> Result<String, WeatherError>;
    /// Raw wttr.in JSON document, passed through as a string.
    async fn detailed(&self, location: &str) -> Result<String, WeatherError>;
}

// --- THE CLIENT ---

pub struct WeatherClient {
    client: reqwest::Client,
    base_url: Url,
    lang: String,
}

impl WeatherClient {
    pub fn new(config: &Config) -> Result<Self> {
        let client = reqwest::Client::builder()
            .timeout(config.timeout)
            .user_agent(USER_AGENT)
            .build()
            .context("Failed to build HTTP client")?;

        Ok(Self {
            client,
            base_url: config.base_url.clone(),
            lang: config.lang.clone(),
        })
    }

    // {base}/{location}?{query}, location as one percent-encoded segment
    fn build_url(&self, location: &str, query: &str) -> Result<Url, WeatherError> {
        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| WeatherError::Url(format!("{} cannot be a base", self.base_url)))?
            .pop_if_empty()
            .push(location);
        url.set_query(Some(query));
        Ok(url)
    }

    async fn fetch(&self, url: Url) -> Result<String, WeatherError> {
        tracing::debug!(%url, "GET");

        let res = self
            .client
            .get(url)
            .send()
            .await
            .map_err(WeatherError::Request)?;

        let status = res.status();
        let body = res.text().await.map_err(WeatherError::Body)?;

        if !status.is_success() {
            return Err(WeatherError::Status {
                status: status.as_u16(),
                body,
            });
        }

        Ok(body)
    }
}

#[async_trait]
impl WeatherGateway for WeatherClient {
    async fn current(&self, location: &str) -> Result<String, WeatherError> {
        let url = self.build_url(location, CURRENT_FORMAT_QUERY)?;
        self.fetch(url).await
    }

    async fn forecast(&self, location: &str, days: u8) -> Result<String, WeatherError> {
        let query = format!("{}&lang={}", days, self.lang);
        let url = self.build_url(location, &query)?;
        self.fetch(url).await
    }

    async fn detailed(&self, location: &str) -> Result<String, WeatherError> {
        let url = self.build_url(location, DETAILED_FORMAT_QUERY)?;
        self.fetch(url).await
    }
}
