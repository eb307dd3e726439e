//! Earnings report pipeline: revenue growth, EPS surprise, and outlook.
//!
//! Quarterly revenue yields a QoQ/YoY growth table, quarterly EPS a
//! beat/miss table; each carries a small signed score, and the two scores
//! feed a plain-language outlook.

use crate::error::Result;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stock_insight_market_data::{MarketDataProvider, QuarterlyEps, QuarterlyRevenue};

/// Quarters shown in the report tables, and scored.
pub const SCORED_QUARTERS: usize = 4;

/// One quarter of revenue with growth against the prior and year-ago quarter.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueGrowthRow {
    pub fiscal_date_ending: NaiveDate,
    pub revenue: Decimal,
    /// Absent when the prior quarter is unknown or zero.
    pub qoq_pct: Option<Decimal>,
    /// Absent when the year-ago quarter is unknown or zero.
    pub yoy_pct: Option<Decimal>,
}

/// Revenue growth table, newest quarter first.
#[derive(Debug, Clone, Serialize)]
pub struct RevenueGrowthTable {
    pub rows: Vec<RevenueGrowthRow>,
    /// +1 per scored quarter with positive YoY growth, -1 per negative.
    pub score: i32,
}

/// One quarter of reported EPS against the estimate.
#[derive(Debug, Clone, Serialize)]
pub struct EpsSurpriseRow {
    pub fiscal_date_ending: NaiveDate,
    pub reported: Decimal,
    pub estimated: Option<Decimal>,
    pub surprise_pct: Option<Decimal>,
    /// Absent when no estimate existed.
    pub beat: Option<bool>,
}

/// EPS surprise table, newest quarter first.
#[derive(Debug, Clone, Serialize)]
pub struct EpsSurpriseTable {
    pub rows: Vec<EpsSurpriseRow>,
    /// +1 per scored beat, -1 per miss.
    pub score: i32,
}

/// The full earnings report section.
#[derive(Debug, Clone, Serialize)]
pub struct EarningsReport {
    pub symbol: String,
    pub revenue: RevenueGrowthTable,
    pub eps: EpsSurpriseTable,
    pub next_report_date: Option<NaiveDate>,
    pub outlook: String,
}

fn pct_change(current: Decimal, previous: Decimal) -> Option<Decimal> {
    if previous.is_zero() {
        return None;
    }
    Some((current - previous) / previous * Decimal::ONE_HUNDRED)
}

/// Builds the QoQ/YoY revenue growth table from quarters sorted newest first.
#[must_use]
pub fn revenue_growth_table(quarters: &[QuarterlyRevenue]) -> RevenueGrowthTable {
    let rows: Vec<RevenueGrowthRow> = quarters
        .iter()
        .enumerate()
        .take(SCORED_QUARTERS)
        .map(|(i, q)| RevenueGrowthRow {
            fiscal_date_ending: q.fiscal_date_ending,
            revenue: q.total_revenue,
            qoq_pct: quarters
                .get(i + 1)
                .and_then(|prev| pct_change(q.total_revenue, prev.total_revenue)),
            yoy_pct: quarters
                .get(i + 4)
                .and_then(|prev| pct_change(q.total_revenue, prev.total_revenue)),
        })
        .collect();

    let score = rows
        .iter()
        .filter_map(|row| row.yoy_pct)
        .map(|pct| match pct.cmp(&Decimal::ZERO) {
            std::cmp::Ordering::Greater => 1,
            std::cmp::Ordering::Less => -1,
            std::cmp::Ordering::Equal => 0,
        })
        .sum();

    RevenueGrowthTable { rows, score }
}

/// Builds the EPS surprise table from quarters sorted newest first.
#[must_use]
pub fn eps_surprise_table(quarters: &[QuarterlyEps]) -> EpsSurpriseTable {
    let rows: Vec<EpsSurpriseRow> = quarters
        .iter()
        .take(SCORED_QUARTERS)
        .map(|q| EpsSurpriseRow {
            fiscal_date_ending: q.fiscal_date_ending,
            reported: q.reported,
            estimated: q.estimated,
            surprise_pct: q.surprise_pct,
            beat: q.estimated.map(|est| q.reported > est),
        })
        .collect();

    let score = rows
        .iter()
        .filter_map(|row| row.beat)
        .map(|beat| if beat { 1 } else { -1 })
        .sum();

    EpsSurpriseTable { rows, score }
}

/// Narrates the combined revenue and EPS scores.
#[must_use]
pub fn earnings_outlook(revenue_score: i32, eps_score: i32) -> String {
    let combined = revenue_score + eps_score;
    if combined >= 5 {
        "Earnings momentum is strong: revenue is growing year-over-year and results \
         keep beating estimates. Fundamentals support a constructive view."
            .to_string()
    } else if combined >= 2 {
        "Earnings trends are healthy, with growing revenue or consistent beats. \
         The backdrop remains constructive, though not uniformly strong."
            .to_string()
    } else if combined >= -1 {
        "Earnings signals are mixed. Growth and surprises are offsetting each other; \
         wait for the next report before drawing conclusions."
            .to_string()
    } else if combined >= -4 {
        "Earnings trends are softening, with shrinking revenue or repeated misses. \
         Expect pressure on the shares until results stabilize."
            .to_string()
    } else {
        "Earnings are deteriorating on both revenue and EPS. The fundamental picture \
         argues for caution."
            .to_string()
    }
}

/// Fetches everything the earnings section needs and assembles it.
///
/// # Errors
/// Propagates provider failures; the caller decides how to surface them.
pub async fn earnings_report(
    provider: &dyn MarketDataProvider,
    symbol: &str,
) -> Result<EarningsReport> {
    let revenue_quarters = provider.quarterly_revenue(symbol).await?;
    let eps_quarters = provider.quarterly_earnings(symbol).await?;

    // The calendar is a nice-to-have; a failure there should not sink the
    // whole section.
    let next_report_date = match provider.next_report_date(symbol).await {
        Ok(date) => date,
        Err(err) => {
            tracing::warn!(symbol, error = %err, "earnings calendar unavailable");
            None
        }
    };

    let revenue = revenue_growth_table(&revenue_quarters);
    let eps = eps_surprise_table(&eps_quarters);
    let outlook = earnings_outlook(revenue.score, eps.score);

    Ok(EarningsReport {
        symbol: symbol.to_string(),
        revenue,
        eps,
        next_report_date,
        outlook,
    })
}
