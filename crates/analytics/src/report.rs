//! Composed analysis report with per-section degradation.
//!
//! A ticker analysis runs three independent pipelines. One pipeline failing
//! should not void the others, so each section carries either its data or
//! the error that sank it.

use crate::earnings::EarningsReport;
use crate::macro_data::MacroReport;
use crate::sector::SectorReport;
use serde::Serialize;
use stock_insight_market_data::CompanyOverview;

/// One section of the report: data on success, error text on failure.
#[derive(Debug, Clone, Serialize)]
pub struct Section<T> {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> Section<T> {
    #[must_use]
    pub fn ok(data: T) -> Self {
        Self {
            data: Some(data),
            error: None,
        }
    }

    #[must_use]
    pub fn err(message: impl Into<String>) -> Self {
        Self {
            data: None,
            error: Some(message.into()),
        }
    }

    #[must_use]
    pub fn is_ok(&self) -> bool {
        self.data.is_some()
    }
}

impl<T, E: std::fmt::Display> From<Result<T, E>> for Section<T> {
    fn from(result: Result<T, E>) -> Self {
        match result {
            Ok(data) => Self::ok(data),
            Err(e) => Self::err(e.to_string()),
        }
    }
}

/// Full analysis for one ticker.
#[derive(Debug, Clone, Serialize)]
pub struct AnalysisReport {
    pub ticker: String,
    pub company_name: Option<String>,
    pub earnings: Section<EarningsReport>,
    pub sector: Section<SectorReport>,
    pub macro_data: Section<MacroReport>,
}

impl AnalysisReport {
    /// True when at least one section produced data.
    #[must_use]
    pub fn has_any_data(&self) -> bool {
        self.earnings.is_ok() || self.sector.is_ok() || self.macro_data.is_ok()
    }
}

/// Company name out of an overview fetch that may itself have failed.
pub(crate) fn company_name(overview: Option<&CompanyOverview>) -> Option<String> {
    overview.map(|o| o.name.clone())
}
