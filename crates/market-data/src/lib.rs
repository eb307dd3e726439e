//! Market data providers: Alpha Vantage (quotes, closes, fundamentals) and
//! FRED (macro-economic series).
//!
//! Clients are plain REST wrappers with client-side rate limiting. All
//! responses are parsed into the typed model in [`types`]; upstream
//! failures become [`MarketDataError`] and are reported to the caller,
//! never retried into the analytics layer.

pub mod alphavantage;
pub mod error;
pub mod fred;
pub mod provider;
pub mod types;

pub use alphavantage::{AlphaVantageClient, AlphaVantageClientConfig};
pub use error::{MarketDataError, Result};
pub use fred::{FredClient, FredClientConfig};
pub use provider::{MacroDataProvider, MarketDataProvider};
pub use types::{
    CompanyOverview, DailyClose, QuarterlyEps, QuarterlyRevenue, Quote, SeriesObservation,
};
