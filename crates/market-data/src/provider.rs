//! Provider seam between the HTTP clients and the analytics pipelines.
//!
//! Pipelines consume this trait instead of a concrete client so their
//! tests can feed canned fixtures.

use crate::error::Result;
use crate::types::{
    CompanyOverview, DailyClose, QuarterlyEps, QuarterlyRevenue, Quote, SeriesObservation,
};
use crate::{AlphaVantageClient, FredClient};
use async_trait::async_trait;
use chrono::NaiveDate;

/// Equity market data needed by the analytics pipelines.
#[async_trait]
pub trait MarketDataProvider: Send + Sync {
    /// Live quote for a symbol.
    async fn quote(&self, symbol: &str) -> Result<Quote>;

    /// Most recent `count` daily closes, newest first.
    async fn latest_closes(&self, symbol: &str, count: usize) -> Result<Vec<DailyClose>>;

    /// Company metadata including the provider's sector string.
    async fn overview(&self, symbol: &str) -> Result<CompanyOverview>;

    /// Quarterly EPS against estimates, newest first.
    async fn quarterly_earnings(&self, symbol: &str) -> Result<Vec<QuarterlyEps>>;

    /// Quarterly revenue, newest first.
    async fn quarterly_revenue(&self, symbol: &str) -> Result<Vec<QuarterlyRevenue>>;

    /// Next scheduled earnings report date, if the provider knows one.
    async fn next_report_date(&self, symbol: &str) -> Result<Option<NaiveDate>>;
}

/// Macro-economic series needed by the macro pipeline.
#[async_trait]
pub trait MacroDataProvider: Send + Sync {
    /// Every observation of a series, dates ascending.
    async fn series_observations(&self, series_id: &str) -> Result<Vec<SeriesObservation>>;
}

#[async_trait]
impl MacroDataProvider for FredClient {
    async fn series_observations(&self, series_id: &str) -> Result<Vec<SeriesObservation>> {
        Self::series_observations(self, series_id).await
    }
}

#[async_trait]
impl MarketDataProvider for AlphaVantageClient {
    async fn quote(&self, symbol: &str) -> Result<Quote> {
        Self::quote(self, symbol).await
    }

    async fn latest_closes(&self, symbol: &str, count: usize) -> Result<Vec<DailyClose>> {
        Self::latest_closes(self, symbol, count).await
    }

    async fn overview(&self, symbol: &str) -> Result<CompanyOverview> {
        Self::overview(self, symbol).await
    }

    async fn quarterly_earnings(&self, symbol: &str) -> Result<Vec<QuarterlyEps>> {
        Self::quarterly_earnings(self, symbol).await
    }

    async fn quarterly_revenue(&self, symbol: &str) -> Result<Vec<QuarterlyRevenue>> {
        Self::quarterly_revenue(self, symbol).await
    }

    async fn next_report_date(&self, symbol: &str) -> Result<Option<NaiveDate>> {
        Self::next_report_date(self, symbol).await
    }
}
