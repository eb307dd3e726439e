//! Ticker analysis orchestration.

use crate::earnings::earnings_report;
use crate::macro_data::macro_analysis;
use crate::report::{company_name, AnalysisReport, Section};
use crate::sector::sector_comparison;
use std::sync::Arc;
use stock_insight_core::Sector;
use stock_insight_market_data::{MacroDataProvider, MarketDataProvider};
use tracing::{info, warn};

/// Runs the earnings, sector, and macro pipelines for a ticker and folds
/// the results into one report. A failed pipeline degrades its own section
/// only; the rest of the report still renders.
pub struct AnalysisService {
    market: Arc<dyn MarketDataProvider>,
    macro_data: Arc<dyn MacroDataProvider>,
}

impl AnalysisService {
    #[must_use]
    pub fn new(
        market: Arc<dyn MarketDataProvider>,
        macro_data: Arc<dyn MacroDataProvider>,
    ) -> Self {
        Self { market, macro_data }
    }

    /// Full analysis for one ticker. Infallible at the top level; failures
    /// surface as per-section errors.
    pub async fn analyze(&self, ticker: &str) -> AnalysisReport {
        let ticker = ticker.trim().to_uppercase();
        info!(%ticker, "running ticker analysis");

        // The overview drives both the sector and macro pipelines, so it is
        // fetched once up front.
        let overview = match self.market.overview(&ticker).await {
            Ok(overview) => Some(overview),
            Err(err) => {
                warn!(%ticker, error = %err, "company overview unavailable");
                None
            }
        };

        let earnings = section("earnings", earnings_report(self.market.as_ref(), &ticker).await);

        let (sector, macro_data) = match &overview {
            Some(overview) => {
                let classified = Sector::classify(&overview.sector);
                let sector = section(
                    "sector",
                    sector_comparison(self.market.as_ref(), &ticker, classified).await,
                );
                let macro_data = section(
                    "macro",
                    macro_analysis(self.macro_data.as_ref(), classified).await,
                );
                (sector, macro_data)
            }
            None => {
                let msg = "company overview unavailable; sector could not be determined";
                (Section::err(msg), Section::err(msg))
            }
        };

        AnalysisReport {
            ticker,
            company_name: company_name(overview.as_ref()),
            earnings,
            sector,
            macro_data,
        }
    }
}

impl std::fmt::Debug for AnalysisService {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("AnalysisService").finish_non_exhaustive()
    }
}

fn section<T>(name: &str, result: crate::error::Result<T>) -> Section<T> {
    if let Err(err) = &result {
        warn!(section = name, error = %err, "analysis section failed");
    }
    result.into()
}
