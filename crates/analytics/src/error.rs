//! Error types for the analytics pipelines.

use stock_insight_market_data::MarketDataError;
use thiserror::Error;

/// Errors raised while building an analysis report section.
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// Upstream data fetch failed.
    #[error(transparent)]
    MarketData(#[from] MarketDataError),

    /// Data arrived but was too short for the computation.
    #[error("insufficient history: {0}")]
    InsufficientHistory(String),
}

/// Result type alias for analytics operations.
pub type Result<T> = std::result::Result<T, AnalyticsError>;
