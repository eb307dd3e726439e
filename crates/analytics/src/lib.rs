//! Analysis pipelines for the stock insight dashboard.
//!
//! Three pipelines feed one report per ticker:
//! - `earnings`: quarterly revenue growth and EPS surprise scoring
//! - `sector`: 1-day performance against curated sector peers
//! - `macro_data`: FRED indicator momentum for covered sectors
//!
//! [`AnalysisService`] orchestrates them over the provider traits, so tests
//! and callers can swap in canned data sources.

pub mod earnings;
pub mod error;
pub mod macro_data;
pub mod report;
pub mod sector;
pub mod service;

pub use earnings::{EarningsReport, EpsSurpriseTable, RevenueGrowthTable};
pub use error::{AnalyticsError, Result};
pub use macro_data::{MacroReport, MarketExpectation};
pub use report::{AnalysisReport, Section};
pub use sector::{SectorReport, SectorStanding};
pub use service::AnalysisService;
