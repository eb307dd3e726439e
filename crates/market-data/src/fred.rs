//! FRED (Federal Reserve Economic Data) client.
//!
//! Only the `series/observations` endpoint is needed: the macro pipeline
//! reads a monthly series and compares the latest, previous, and
//! year-ago observations.

use crate::error::{MarketDataError, Result};
use crate::types::SeriesObservation;
use chrono::NaiveDate;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::str::FromStr;

/// FRED API base URL.
pub const FRED_URL: &str = "https://api.stlouisfed.org/fred";

/// Configuration for the FRED client.
#[derive(Debug, Clone)]
pub struct FredClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// API key appended to every request.
    pub api_key: String,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for FredClientConfig {
    fn default() -> Self {
        Self {
            base_url: FRED_URL.to_string(),
            api_key: String::new(),
            timeout_secs: 10,
        }
    }
}

impl FredClientConfig {
    /// Creates a configuration with the given API key.
    #[must_use]
    pub fn new(api_key: impl Into<String>) -> Self {
        Self {
            api_key: api_key.into(),
            ..Default::default()
        }
    }

    /// Sets the base URL.
    #[must_use]
    pub fn with_base_url(mut self, url: impl Into<String>) -> Self {
        self.base_url = url.into();
        self
    }
}

impl From<&stock_insight_core::FredConfig> for FredClientConfig {
    fn from(cfg: &stock_insight_core::FredConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            timeout_secs: cfg.timeout_secs,
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawObservationsResponse {
    observations: Option<Vec<RawObservation>>,
    error_message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RawObservation {
    date: String,
    value: String,
}

/// FRED REST API client.
pub struct FredClient {
    config: FredClientConfig,
    http: Client,
}

impl std::fmt::Debug for FredClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FredClient")
            .field("base_url", &self.config.base_url)
            .finish_non_exhaustive()
    }
}

impl FredClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the API key is empty or the HTTP client cannot
    /// be built.
    pub fn new(config: FredClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(MarketDataError::Configuration(
                "FRED API key is not set".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketDataError::Network(format!("failed to build HTTP client: {e}")))?;

        Ok(Self { config, http })
    }

    /// Fetches every observation of a series, dates ascending. Missing
    /// values (`"."`) are skipped.
    ///
    /// # Errors
    /// Returns `MissingData` when the series has no parseable observations.
    pub async fn series_observations(&self, series_id: &str) -> Result<Vec<SeriesObservation>> {
        tracing::debug!(series_id, "FRED observations request");

        let url = format!("{}/series/observations", self.config.base_url);
        let response = self
            .http
            .get(&url)
            .query(&[
                ("series_id", series_id),
                ("api_key", self.config.api_key.as_str()),
                ("file_type", "json"),
                ("sort_order", "asc"),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::api(status.as_u16(), body));
        }

        let raw: RawObservationsResponse = response.json().await?;
        if let Some(message) = raw.error_message {
            return Err(MarketDataError::api(status.as_u16(), message));
        }

        let observations = raw.observations.unwrap_or_default();
        let mut out = Vec::with_capacity(observations.len());
        for obs in observations {
            let Ok(date) = NaiveDate::parse_from_str(obs.date.trim(), "%Y-%m-%d") else {
                continue;
            };
            // FRED encodes a missing value as ".".
            let Ok(value) = Decimal::from_str(obs.value.trim()) else {
                continue;
            };
            out.push(SeriesObservation { date, value });
        }

        if out.is_empty() {
            return Err(MarketDataError::MissingData(format!(
                "series {series_id} has no observations"
            )));
        }

        Ok(out)
    }
}
