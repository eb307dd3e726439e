//! Alpha Vantage REST client with rate limiting.
//!
//! Wraps the handful of endpoints the analytics pipelines consume: global
//! quote, daily adjusted closes, company overview, quarterly earnings and
//! revenue, and the earnings calendar. Requests share a single query URL
//! with a `function` parameter, and are throttled client-side with the
//! governor crate (the free tier throttles hard server-side too; those
//! responses carry a `Note`/`Information` body and surface as
//! `MarketDataError::RateLimited`).

use crate::error::{MarketDataError, Result};
use crate::types::{CompanyOverview, DailyClose, QuarterlyEps, QuarterlyRevenue, Quote};
use chrono::NaiveDate;
use governor::{Quota, RateLimiter};
use nonzero_ext::nonzero;
use reqwest::Client;
use rust_decimal::Decimal;
use serde::Deserialize;
use std::collections::BTreeMap;
use std::num::NonZeroU32;
use std::str::FromStr;
use std::sync::Arc;

/// Alpha Vantage query URL.
pub const ALPHA_VANTAGE_URL: &str = "https://www.alphavantage.co/query";

// =============================================================================
// Configuration
// =============================================================================

/// Configuration for the Alpha Vantage client.
#[derive(Debug, Clone)]
pub struct AlphaVantageClientConfig {
    /// Base URL for the API.
    pub base_url: String,

    /// API key appended to every request.
    pub api_key: String,

    /// Requests per minute limit (premium tier default).
    pub requests_per_minute: NonZeroU32,

    /// Request timeout in seconds.
    pub timeout_secs: u64,
}

impl Default for AlphaVantageClientConfig {
    fn default() -> Self {
        Self {
            base_url: ALPHA_VANTAGE_URL.to_string(),
            api_key: String::new(),
            requests_per_minute: nonzero!(75u32),
            timeout_secs: 10,
        }
    }
}

impl AlphaVantageClientConfig {
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

    /// Sets the rate limit.
    #[must_use]
    pub fn with_rate_limit(mut self, requests_per_minute: NonZeroU32) -> Self {
        self.requests_per_minute = requests_per_minute;
        self
    }

    /// Sets the request timeout.
    #[must_use]
    pub fn with_timeout_secs(mut self, secs: u64) -> Self {
        self.timeout_secs = secs;
        self
    }
}

impl From<&stock_insight_core::AlphaVantageConfig> for AlphaVantageClientConfig {
    fn from(cfg: &stock_insight_core::AlphaVantageConfig) -> Self {
        Self {
            base_url: cfg.base_url.clone(),
            api_key: cfg.api_key.clone(),
            requests_per_minute: NonZeroU32::new(cfg.requests_per_minute)
                .unwrap_or(nonzero!(75u32)),
            timeout_secs: cfg.timeout_secs,
        }
    }
}

// =============================================================================
// API Response Types
// =============================================================================

#[derive(Debug, Clone, Deserialize)]
struct RawGlobalQuoteResponse {
    #[serde(rename = "Global Quote")]
    global_quote: Option<RawGlobalQuote>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawGlobalQuote {
    #[serde(rename = "01. symbol")]
    symbol: Option<String>,
    #[serde(rename = "05. price")]
    price: Option<String>,
    #[serde(rename = "07. latest trading day")]
    latest_trading_day: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDailySeriesResponse {
    #[serde(rename = "Time Series (Daily)")]
    series: Option<BTreeMap<String, RawDailyBar>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawDailyBar {
    #[serde(rename = "5. adjusted close")]
    adjusted_close: Option<String>,
    #[serde(rename = "4. close")]
    close: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawOverview {
    #[serde(rename = "Symbol")]
    symbol: Option<String>,
    #[serde(rename = "Name")]
    name: Option<String>,
    #[serde(rename = "Sector")]
    sector: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawEarningsResponse {
    #[serde(rename = "quarterlyEarnings")]
    quarterly_earnings: Option<Vec<RawQuarterlyEarning>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuarterlyEarning {
    #[serde(rename = "fiscalDateEnding")]
    fiscal_date_ending: String,
    #[serde(rename = "reportedEPS")]
    reported_eps: Option<String>,
    #[serde(rename = "estimatedEPS")]
    estimated_eps: Option<String>,
    #[serde(rename = "surprisePercentage")]
    surprise_percentage: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawIncomeStatementResponse {
    #[serde(rename = "quarterlyReports")]
    quarterly_reports: Option<Vec<RawQuarterlyReport>>,
}

#[derive(Debug, Clone, Deserialize)]
struct RawQuarterlyReport {
    #[serde(rename = "fiscalDateEnding")]
    fiscal_date_ending: String,
    #[serde(rename = "totalRevenue")]
    total_revenue: Option<String>,
}

/// Parses Alpha Vantage's stringly-typed numbers; `"None"` and empty
/// strings mean absent.
fn parse_decimal(raw: Option<&str>) -> Option<Decimal> {
    let s = raw?.trim();
    if s.is_empty() || s.eq_ignore_ascii_case("none") {
        return None;
    }
    Decimal::from_str(s).ok()
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s.trim(), "%Y-%m-%d").ok()
}

// =============================================================================
// AlphaVantageClient
// =============================================================================

/// Alpha Vantage REST API client.
///
/// All requests are rate-limited client-side and carry the configured
/// API key.
pub struct AlphaVantageClient {
    config: AlphaVantageClientConfig,
    http: Client,
    rate_limiter: Arc<
        RateLimiter<
            governor::state::NotKeyed,
            governor::state::InMemoryState,
            governor::clock::DefaultClock,
        >,
    >,
}

impl std::fmt::Debug for AlphaVantageClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AlphaVantageClient")
            .field("base_url", &self.config.base_url)
            .field("requests_per_minute", &self.config.requests_per_minute)
            .finish_non_exhaustive()
    }
}

impl AlphaVantageClient {
    /// Creates a new client with the given configuration.
    ///
    /// # Errors
    /// Returns an error if the API key is empty or the HTTP client cannot
    /// be built.
    pub fn new(config: AlphaVantageClientConfig) -> Result<Self> {
        if config.api_key.is_empty() {
            return Err(MarketDataError::Configuration(
                "Alpha Vantage API key is not set".to_string(),
            ));
        }

        let http = Client::builder()
            .timeout(std::time::Duration::from_secs(config.timeout_secs))
            .build()
            .map_err(|e| MarketDataError::Network(format!("failed to build HTTP client: {e}")))?;

        let quota = Quota::per_minute(config.requests_per_minute);
        let rate_limiter = Arc::new(RateLimiter::direct(quota));

        Ok(Self {
            config,
            http,
            rate_limiter,
        })
    }

    /// Returns the base URL.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.config.base_url
    }

    /// Validates a symbol before it goes into a query string.
    fn validate_symbol(symbol: &str) -> Result<&str> {
        if symbol.is_empty() {
            return Err(MarketDataError::Configuration(
                "symbol cannot be empty".to_string(),
            ));
        }
        if symbol.len() > 10
            || !symbol
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '.' || c == '-')
        {
            return Err(MarketDataError::Configuration(format!(
                "invalid symbol: {symbol}"
            )));
        }
        Ok(symbol)
    }

    /// Issues one JSON request for the given `function`, after waiting for
    /// rate-limit clearance. Alpha Vantage signals throttling and bad
    /// symbols inside a 200 body, so those are inspected here.
    async fn get_json(&self, function: &str, symbol: &str) -> Result<serde_json::Value> {
        self.rate_limiter.until_ready().await;

        tracing::debug!(function, symbol, "Alpha Vantage request");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("function", function),
                ("symbol", symbol),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::api(status.as_u16(), body));
        }

        let value: serde_json::Value = response.json().await?;

        if let Some(note) = value
            .get("Note")
            .or_else(|| value.get("Information"))
            .and_then(serde_json::Value::as_str)
        {
            return Err(MarketDataError::RateLimited(note.to_string()));
        }
        if let Some(message) = value.get("Error Message").and_then(serde_json::Value::as_str) {
            return Err(MarketDataError::api(status.as_u16(), message.to_string()));
        }

        Ok(value)
    }

    /// Fetches the live quote for a symbol (`GLOBAL_QUOTE`).
    ///
    /// # Errors
    /// Returns `SymbolNotFound` when the provider returns an empty quote.
    pub async fn quote(&self, symbol: &str) -> Result<Quote> {
        let symbol = Self::validate_symbol(symbol)?;
        let value = self.get_json("GLOBAL_QUOTE", symbol).await?;
        let raw: RawGlobalQuoteResponse = serde_json::from_value(value)?;

        let quote = raw
            .global_quote
            .ok_or_else(|| MarketDataError::symbol_not_found(symbol))?;

        let price = parse_decimal(quote.price.as_deref())
            .ok_or_else(|| MarketDataError::symbol_not_found(symbol))?;
        let as_of = quote
            .latest_trading_day
            .as_deref()
            .and_then(parse_date)
            .ok_or_else(|| {
                MarketDataError::MissingData(format!("no trading day in quote for {symbol}"))
            })?;

        Ok(Quote {
            symbol: quote.symbol.unwrap_or_else(|| symbol.to_string()),
            price,
            as_of,
        })
    }

    /// Fetches the most recent `count` daily adjusted closes, newest first
    /// (`TIME_SERIES_DAILY_ADJUSTED`, compact output).
    ///
    /// # Errors
    /// Returns `SymbolNotFound` when the provider returns no series, or
    /// `MissingData` when fewer than `count` closes are available.
    pub async fn latest_closes(&self, symbol: &str, count: usize) -> Result<Vec<DailyClose>> {
        let symbol = Self::validate_symbol(symbol)?;
        let value = self.get_json("TIME_SERIES_DAILY_ADJUSTED", symbol).await?;
        let raw: RawDailySeriesResponse = serde_json::from_value(value)?;

        let series = raw
            .series
            .ok_or_else(|| MarketDataError::symbol_not_found(symbol))?;

        // BTreeMap iterates dates ascending; walk backwards for newest first.
        let mut closes = Vec::with_capacity(count);
        for (date_str, bar) in series.iter().rev() {
            let Some(date) = parse_date(date_str) else {
                continue;
            };
            let close = parse_decimal(bar.adjusted_close.as_deref())
                .or_else(|| parse_decimal(bar.close.as_deref()));
            if let Some(close) = close {
                closes.push(DailyClose { date, close });
                if closes.len() == count {
                    break;
                }
            }
        }

        if closes.len() < count {
            return Err(MarketDataError::MissingData(format!(
                "only {} daily closes available for {symbol}, needed {count}",
                closes.len()
            )));
        }

        Ok(closes)
    }

    /// Fetches company metadata (`OVERVIEW`).
    ///
    /// # Errors
    /// Returns `SymbolNotFound` when the provider returns an empty object,
    /// which is how Alpha Vantage answers unknown symbols.
    pub async fn overview(&self, symbol: &str) -> Result<CompanyOverview> {
        let symbol = Self::validate_symbol(symbol)?;
        let value = self.get_json("OVERVIEW", symbol).await?;
        let raw: RawOverview = serde_json::from_value(value)?;

        let Some(name) = raw.name else {
            return Err(MarketDataError::symbol_not_found(symbol));
        };

        Ok(CompanyOverview {
            symbol: raw.symbol.unwrap_or_else(|| symbol.to_string()),
            name,
            sector: raw.sector.unwrap_or_default(),
        })
    }

    /// Fetches quarterly EPS against estimates, newest first (`EARNINGS`).
    ///
    /// # Errors
    /// Returns `SymbolNotFound` when no quarterly earnings are present.
    pub async fn quarterly_earnings(&self, symbol: &str) -> Result<Vec<QuarterlyEps>> {
        let symbol = Self::validate_symbol(symbol)?;
        let value = self.get_json("EARNINGS", symbol).await?;
        let raw: RawEarningsResponse = serde_json::from_value(value)?;

        let quarters = raw
            .quarterly_earnings
            .ok_or_else(|| MarketDataError::symbol_not_found(symbol))?;

        let mut out = Vec::with_capacity(quarters.len());
        for q in quarters {
            let Some(fiscal_date_ending) = parse_date(&q.fiscal_date_ending) else {
                continue;
            };
            let Some(reported) = parse_decimal(q.reported_eps.as_deref()) else {
                continue;
            };
            out.push(QuarterlyEps {
                fiscal_date_ending,
                reported,
                estimated: parse_decimal(q.estimated_eps.as_deref()),
                surprise_pct: parse_decimal(q.surprise_percentage.as_deref()),
            });
        }
        out.sort_by(|a, b| b.fiscal_date_ending.cmp(&a.fiscal_date_ending));

        Ok(out)
    }

    /// Fetches quarterly revenue, newest first (`INCOME_STATEMENT`).
    ///
    /// # Errors
    /// Returns `SymbolNotFound` when no quarterly reports are present.
    pub async fn quarterly_revenue(&self, symbol: &str) -> Result<Vec<QuarterlyRevenue>> {
        let symbol = Self::validate_symbol(symbol)?;
        let value = self.get_json("INCOME_STATEMENT", symbol).await?;
        let raw: RawIncomeStatementResponse = serde_json::from_value(value)?;

        let reports = raw
            .quarterly_reports
            .ok_or_else(|| MarketDataError::symbol_not_found(symbol))?;

        let mut out = Vec::with_capacity(reports.len());
        for report in reports {
            let Some(fiscal_date_ending) = parse_date(&report.fiscal_date_ending) else {
                continue;
            };
            let Some(total_revenue) = parse_decimal(report.total_revenue.as_deref()) else {
                continue;
            };
            out.push(QuarterlyRevenue {
                fiscal_date_ending,
                total_revenue,
            });
        }
        out.sort_by(|a, b| b.fiscal_date_ending.cmp(&a.fiscal_date_ending));

        Ok(out)
    }

    /// Fetches the next scheduled earnings report date, if any
    /// (`EARNINGS_CALENDAR`, which answers in CSV rather than JSON).
    ///
    /// # Errors
    /// Returns an error on network failure or a malformed calendar.
    pub async fn next_report_date(&self, symbol: &str) -> Result<Option<NaiveDate>> {
        let symbol = Self::validate_symbol(symbol)?;
        self.rate_limiter.until_ready().await;

        tracing::debug!(symbol, "Alpha Vantage earnings calendar request");

        let response = self
            .http
            .get(&self.config.base_url)
            .query(&[
                ("function", "EARNINGS_CALENDAR"),
                ("symbol", symbol),
                ("horizon", "3month"),
                ("apikey", self.config.api_key.as_str()),
            ])
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(MarketDataError::api(status.as_u16(), body));
        }

        let body = response.text().await?;
        let mut reader = csv::Reader::from_reader(body.as_bytes());
        let headers = reader
            .headers()
            .map_err(|e| MarketDataError::Serialization(e.to_string()))?
            .clone();
        let report_date_idx = headers
            .iter()
            .position(|h| h.trim() == "reportDate")
            .ok_or_else(|| {
                MarketDataError::MissingData(
                    "earnings calendar has no reportDate column".to_string(),
                )
            })?;

        let mut next: Option<NaiveDate> = None;
        for record in reader.records() {
            let record = record.map_err(|e| MarketDataError::Serialization(e.to_string()))?;
            if let Some(date) = record.get(report_date_idx).and_then(parse_date) {
                next = Some(next.map_or(date, |d| d.min(date)));
            }
        }

        Ok(next)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;
    use wiremock::matchers::{method, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn test_client(base_url: &str) -> AlphaVantageClient {
        AlphaVantageClient::new(
            AlphaVantageClientConfig::new("test-key")
                .with_base_url(base_url)
                .with_rate_limit(nonzero!(6000u32)),
        )
        .unwrap()
    }

    // ==================== Config Tests ====================

    #[test]
    fn config_defaults() {
        let config = AlphaVantageClientConfig::default();
        assert_eq!(config.base_url, ALPHA_VANTAGE_URL);
        assert_eq!(config.requests_per_minute.get(), 75);
    }

    #[test]
    fn config_builder() {
        let config = AlphaVantageClientConfig::new("key")
            .with_base_url("https://custom.url")
            .with_rate_limit(nonzero!(5u32))
            .with_timeout_secs(30);
        assert_eq!(config.base_url, "https://custom.url");
        assert_eq!(config.requests_per_minute.get(), 5);
        assert_eq!(config.timeout_secs, 30);
    }

    #[test]
    fn empty_api_key_rejected() {
        let result = AlphaVantageClient::new(AlphaVantageClientConfig::default());
        assert!(matches!(result, Err(MarketDataError::Configuration(_))));
    }

    // ==================== Symbol Validation Tests ====================

    #[test]
    fn valid_symbols_accepted() {
        assert!(AlphaVantageClient::validate_symbol("GOOGL").is_ok());
        assert!(AlphaVantageClient::validate_symbol("BRK-B").is_ok());
        assert!(AlphaVantageClient::validate_symbol("RDS.A").is_ok());
    }

    #[test]
    fn bad_symbols_rejected() {
        assert!(AlphaVantageClient::validate_symbol("").is_err());
        assert!(AlphaVantageClient::validate_symbol("A/B").is_err());
        assert!(AlphaVantageClient::validate_symbol("TOOLONGSYMBOL").is_err());
        assert!(AlphaVantageClient::validate_symbol("GO OGL").is_err());
    }

    // ==================== Parse Helpers ====================

    #[test]
    fn parse_decimal_handles_none_marker() {
        assert_eq!(parse_decimal(Some("1.25")), Some(dec!(1.25)));
        assert_eq!(parse_decimal(Some("None")), None);
        assert_eq!(parse_decimal(Some("")), None);
        assert_eq!(parse_decimal(None), None);
    }

    // ==================== Endpoint Tests ====================

    #[tokio::test]
    async fn quote_parses_global_quote() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "GLOBAL_QUOTE"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Global Quote": {
                    "01. symbol": "GOOGL",
                    "05. price": "182.5000",
                    "07. latest trading day": "2025-08-25"
                }
            })))
            .mount(&server)
            .await;

        let quote = test_client(&server.uri()).quote("GOOGL").await.unwrap();
        assert_eq!(quote.symbol, "GOOGL");
        assert_eq!(quote.price, dec!(182.5000));
        assert_eq!(quote.as_of, NaiveDate::from_ymd_opt(2025, 8, 25).unwrap());
    }

    #[tokio::test]
    async fn quote_unknown_symbol_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(serde_json::json!({"Global Quote": {}})),
            )
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).quote("ZZZZ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound { .. }));
    }

    #[tokio::test]
    async fn throttle_note_surfaces_as_rate_limited() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Note": "Thank you for using Alpha Vantage! Our standard API rate limit is 25 requests per day."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).quote("GOOGL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::RateLimited(_)));
    }

    #[tokio::test]
    async fn error_message_surfaces_as_api_error() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Error Message": "Invalid API call."
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).quote("GOOGL").await.unwrap_err();
        assert!(matches!(err, MarketDataError::Api { .. }));
    }

    #[tokio::test]
    async fn latest_closes_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "TIME_SERIES_DAILY_ADJUSTED"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Time Series (Daily)": {
                    "2025-08-22": {"4. close": "180.00", "5. adjusted close": "180.00"},
                    "2025-08-25": {"4. close": "182.50", "5. adjusted close": "182.50"},
                    "2025-08-21": {"4. close": "179.10", "5. adjusted close": "179.10"}
                }
            })))
            .mount(&server)
            .await;

        let closes = test_client(&server.uri())
            .latest_closes("GOOGL", 2)
            .await
            .unwrap();
        assert_eq!(closes.len(), 2);
        assert_eq!(closes[0].date, NaiveDate::from_ymd_opt(2025, 8, 25).unwrap());
        assert_eq!(closes[0].close, dec!(182.50));
        assert_eq!(closes[1].date, NaiveDate::from_ymd_opt(2025, 8, 22).unwrap());
    }

    #[tokio::test]
    async fn latest_closes_too_few_is_missing_data() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Time Series (Daily)": {
                    "2025-08-25": {"5. adjusted close": "182.50"}
                }
            })))
            .mount(&server)
            .await;

        let err = test_client(&server.uri())
            .latest_closes("GOOGL", 2)
            .await
            .unwrap_err();
        assert!(matches!(err, MarketDataError::MissingData(_)));
    }

    #[tokio::test]
    async fn overview_parses_sector() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "OVERVIEW"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "Symbol": "GOOGL",
                "Name": "Alphabet Inc",
                "Sector": "TECHNOLOGY"
            })))
            .mount(&server)
            .await;

        let overview = test_client(&server.uri()).overview("GOOGL").await.unwrap();
        assert_eq!(overview.name, "Alphabet Inc");
        assert_eq!(overview.sector, "TECHNOLOGY");
    }

    #[tokio::test]
    async fn overview_empty_object_is_not_found() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({})))
            .mount(&server)
            .await;

        let err = test_client(&server.uri()).overview("ZZZZ").await.unwrap_err();
        assert!(matches!(err, MarketDataError::SymbolNotFound { .. }));
    }

    #[tokio::test]
    async fn quarterly_earnings_skips_unparseable_rows() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "EARNINGS"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quarterlyEarnings": [
                    {
                        "fiscalDateEnding": "2025-06-30",
                        "reportedEPS": "2.31",
                        "estimatedEPS": "2.18",
                        "surprisePercentage": "5.96"
                    },
                    {
                        "fiscalDateEnding": "2025-03-31",
                        "reportedEPS": "None",
                        "estimatedEPS": "2.01"
                    }
                ]
            })))
            .mount(&server)
            .await;

        let quarters = test_client(&server.uri())
            .quarterly_earnings("GOOGL")
            .await
            .unwrap();
        assert_eq!(quarters.len(), 1);
        assert_eq!(quarters[0].reported, dec!(2.31));
        assert_eq!(quarters[0].estimated, Some(dec!(2.18)));
        assert!(quarters[0].is_beat());
    }

    #[tokio::test]
    async fn quarterly_revenue_sorted_newest_first() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "INCOME_STATEMENT"))
            .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!({
                "quarterlyReports": [
                    {"fiscalDateEnding": "2025-03-31", "totalRevenue": "90234000000"},
                    {"fiscalDateEnding": "2025-06-30", "totalRevenue": "96428000000"}
                ]
            })))
            .mount(&server)
            .await;

        let revenue = test_client(&server.uri())
            .quarterly_revenue("GOOGL")
            .await
            .unwrap();
        assert_eq!(revenue.len(), 2);
        assert!(revenue[0].fiscal_date_ending > revenue[1].fiscal_date_ending);
        assert_eq!(revenue[0].total_revenue, dec!(96428000000));
    }

    #[tokio::test]
    async fn next_report_date_takes_earliest() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(query_param("function", "EARNINGS_CALENDAR"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n\
                 GOOGL,Alphabet Inc,2025-10-28,2025-09-30,2.25,USD\n\
                 GOOGL,Alphabet Inc,2026-01-27,2025-12-31,2.40,USD\n",
            ))
            .mount(&server)
            .await;

        let date = test_client(&server.uri())
            .next_report_date("GOOGL")
            .await
            .unwrap();
        assert_eq!(date, Some(NaiveDate::from_ymd_opt(2025, 10, 28).unwrap()));
    }

    #[tokio::test]
    async fn next_report_date_empty_calendar_is_none() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_string(
                "symbol,name,reportDate,fiscalDateEnding,estimate,currency\n",
            ))
            .mount(&server)
            .await;

        let date = test_client(&server.uri())
            .next_report_date("GOOGL")
            .await
            .unwrap();
        assert_eq!(date, None);
    }
}
