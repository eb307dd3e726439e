//! Sector-specific macro-economic indicators.
//!
//! Each covered sector maps to a set of FRED series. For every series the
//! pipeline compares the latest monthly observation against the previous
//! month and the same month a year ago, scores the momentum, and narrates
//! it. The summed score maps to a market-expectation band.
//!
//! Currently the Industrials sector is covered (Industrial Production and
//! Durable Goods new orders); other sectors report as not yet covered.

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::Serialize;
use stock_insight_core::Sector;
use stock_insight_market_data::{MacroDataProvider, SeriesObservation};

/// FRED series id for Industrial Production.
pub const INDPRO_SERIES: &str = "INDPRO";

/// FRED series id for Durable Goods new orders (millions of dollars).
pub const DURABLE_GOODS_SERIES: &str = "DGORDER";

/// Latest/previous/year-ago comparison for one monthly series.
#[derive(Debug, Clone, Serialize)]
pub struct IndicatorSnapshot {
    pub latest: Decimal,
    pub latest_date: NaiveDate,
    pub mom_change: Decimal,
    pub mom_pct: Decimal,
    pub yoy_change: Decimal,
    pub yoy_pct: Decimal,
}

/// One scored indicator within the macro report.
#[derive(Debug, Clone, Serialize)]
pub struct MacroIndicatorRow {
    pub indicator: String,
    pub snapshot: IndicatorSnapshot,
    pub narrative: String,
    pub signal: i32,
}

/// Overall macro stance derived from the summed indicator signals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum MarketExpectation {
    VeryGood,
    Good,
    Neutral,
    Bad,
    VeryBad,
}

impl MarketExpectation {
    /// Maps a summed signal (two indicators, each in -5..=5) to a band.
    #[must_use]
    pub const fn from_signal(total: i32) -> Self {
        if total >= 8 {
            Self::VeryGood
        } else if total >= 4 {
            Self::Good
        } else if total >= -3 {
            Self::Neutral
        } else if total >= -6 {
            Self::Bad
        } else {
            Self::VeryBad
        }
    }

    /// Narrative for the band, prefixed with the market expectation.
    #[must_use]
    pub fn narrative(self) -> String {
        let body = match self {
            Self::VeryGood => {
                "Macro indicators are firing on all cylinders. Robust order books and rising \
                 output point to continued revenue tailwinds and margin support across the sector."
            }
            Self::Good => {
                "Key macro metrics show healthy, though moderating, growth. The backdrop remains \
                 constructive, but monitor upcoming releases for signs of cooling demand."
            }
            Self::Neutral => {
                "Signals are mixed. A stabilisation phase could be forming, but confirmation is \
                 needed from next month's prints."
            }
            Self::Bad => {
                "Macro momentum has soured, with contracting orders and production flagging \
                 near-term headwinds. A more defensive stance is prudent."
            }
            Self::VeryBad => {
                "Leading indicators flash recessionary warnings. Expect broad demand weakness \
                 and potential earnings downgrades sector-wide."
            }
        };
        format!("Market Expectation: {}. {body}", self.label())
    }

    fn label(self) -> &'static str {
        match self {
            Self::VeryGood => "Very Good",
            Self::Good => "Good",
            Self::Neutral => "Give It Some Time",
            Self::Bad => "Bad",
            Self::VeryBad => "Very Bad",
        }
    }
}

/// The macro data report section.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "snake_case", tag = "coverage")]
pub enum MacroReport {
    /// Sector has mapped indicators.
    Covered {
        sector: Sector,
        rows: Vec<MacroIndicatorRow>,
        total_signal: i32,
        expectation: MarketExpectation,
        expectation_text: String,
    },
    /// No indicator mapping for this sector yet.
    NotCovered { sector: Sector },
}

/// Builds the latest/previous/year-ago snapshot from observations sorted
/// ascending by date. Monthly cadence assumed: the year-ago observation is
/// twelve steps back from the latest.
///
/// # Errors
/// Returns `InsufficientHistory` with fewer than 13 observations.
pub fn indicator_snapshot(
    series_id: &str,
    observations: &[SeriesObservation],
) -> Result<IndicatorSnapshot> {
    if observations.len() < 13 {
        return Err(AnalyticsError::InsufficientHistory(format!(
            "{series_id} has {} observations, need 13 for a YoY comparison",
            observations.len()
        )));
    }

    let latest = observations[observations.len() - 1];
    let previous = observations[observations.len() - 2];
    let year_ago = observations[observations.len() - 13];

    if previous.value.is_zero() || year_ago.value.is_zero() {
        return Err(AnalyticsError::InsufficientHistory(format!(
            "{series_id} has zero-valued reference observations"
        )));
    }

    let mom_change = latest.value - previous.value;
    let yoy_change = latest.value - year_ago.value;

    Ok(IndicatorSnapshot {
        latest: latest.value,
        latest_date: latest.date,
        mom_change,
        mom_pct: mom_change / previous.value * Decimal::ONE_HUNDRED,
        yoy_change,
        yoy_pct: yoy_change / year_ago.value * Decimal::ONE_HUNDRED,
    })
}

/// Scores and narrates one indicator's MoM/YoY momentum.
///
/// Strong MoM growth (>3%) scores +5 with positive YoY, +3 as a rebound;
/// modest MoM growth +1 or 0; MoM decline -1 with YoY still positive, -3
/// with both negative; a perfectly flat month reads as stagnation, -5.
#[must_use]
pub fn momentum_assessment(indicator: &str, mom_pct: Decimal, yoy_pct: Decimal) -> (String, i32) {
    let mom = mom_pct.round_dp(2);
    let yoy = yoy_pct.round_dp(2);
    let strong_mom = Decimal::from(3);

    if mom_pct > strong_mom {
        if yoy_pct > Decimal::ZERO {
            (
                format!(
                    "{indicator} is showing strong momentum, with robust MoM growth of {mom}% \
                     and a positive YoY change of {yoy}%. This suggests sustained expansion \
                     and healthy demand."
                ),
                5,
            )
        } else {
            (
                format!(
                    "Despite a YoY decline of {yoy}%, the sharp MoM growth of {mom}% indicates \
                     a near-term rebound in {indicator}. This could signal the beginning of a \
                     recovery phase."
                ),
                3,
            )
        }
    } else if mom_pct > Decimal::ZERO {
        if yoy_pct > Decimal::ZERO {
            (
                format!(
                    "{indicator} rose modestly MoM (+{mom}%) and remains up YoY (+{yoy}%), \
                     indicating stable and steady growth. Conditions remain constructive."
                ),
                1,
            )
        } else {
            (
                format!(
                    "MoM {indicator} increased by {mom}%, but remains down YoY ({yoy}%). \
                     This suggests tentative recovery after a longer-term slowdown."
                ),
                0,
            )
        }
    } else if mom_pct < Decimal::ZERO {
        if yoy_pct > Decimal::ZERO {
            (
                format!(
                    "{indicator} declined MoM by {mom}%, though YoY growth remains positive \
                     at +{yoy}%. This may reflect short-term volatility within an otherwise \
                     improving trend."
                ),
                -1,
            )
        } else {
            (
                format!(
                    "{indicator} is weakening both MoM ({mom}%) and YoY ({yoy}%). This double \
                     decline suggests broader headwinds and reduced demand."
                ),
                -3,
            )
        }
    } else {
        (
            format!(
                "{indicator} was flat MoM ({mom}%), with a YoY change of {yoy}%. The series \
                 appears to be stalling; further data is needed to assess direction."
            ),
            -5,
        )
    }
}

/// Indicator set for a sector, or `None` when not covered.
fn sector_series(sector: Sector) -> Option<&'static [(&'static str, &'static str)]> {
    match sector {
        Sector::Industrials => Some(&[
            ("Industrial Production (INDPRO)", INDPRO_SERIES),
            ("Durable Goods New Orders", DURABLE_GOODS_SERIES),
        ]),
        _ => None,
    }
}

/// Runs the macro pipeline for a sector.
///
/// # Errors
/// Fails when a mapped series cannot be fetched or is too short; sectors
/// without mapped indicators return `MacroReport::NotCovered` instead.
pub async fn macro_analysis(
    provider: &dyn MacroDataProvider,
    sector: Sector,
) -> Result<MacroReport> {
    let Some(series) = sector_series(sector) else {
        return Ok(MacroReport::NotCovered { sector });
    };

    let mut rows = Vec::with_capacity(series.len());
    let mut total_signal = 0;
    for (indicator, series_id) in series {
        let observations = provider.series_observations(series_id).await?;
        let snapshot = indicator_snapshot(series_id, &observations)?;
        let (narrative, signal) =
            momentum_assessment(indicator, snapshot.mom_pct, snapshot.yoy_pct);
        total_signal += signal;
        rows.push(MacroIndicatorRow {
            indicator: (*indicator).to_string(),
            snapshot,
            narrative,
            signal,
        });
    }

    let expectation = MarketExpectation::from_signal(total_signal);
    Ok(MacroReport::Covered {
        sector,
        rows,
        total_signal,
        expectation,
        expectation_text: expectation.narrative(),
    })
}
