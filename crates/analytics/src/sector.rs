//! Same-sector performance comparison.
//!
//! The target ticker's 1-day return is ranked against a curated set of
//! sector leaders: top quartile is "leading", bottom quartile is
//! "underperforming", anything between is "in line".

use crate::error::{AnalyticsError, Result};
use chrono::NaiveDate;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use serde::Serialize;
use stock_insight_core::Sector;
use stock_insight_market_data::MarketDataProvider;

/// Peers compared against the target.
pub const PEER_COUNT: usize = 4;

/// Whether a row is the analyzed ticker or one of its sector peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum PeerGroup {
    Target,
    SameSector,
}

/// How the target ranks against its peers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SectorStanding {
    Leading,
    InLine,
    Underperforming,
}

impl SectorStanding {
    /// Signed contribution to the overall report signal.
    #[must_use]
    pub const fn signal(self) -> i32 {
        match self {
            Self::Leading => 3,
            Self::InLine => 0,
            Self::Underperforming => -3,
        }
    }
}

/// One symbol's last two closes and 1-day change.
#[derive(Debug, Clone, Serialize)]
pub struct SectorRow {
    pub group: PeerGroup,
    pub symbol: String,
    pub prev_date: NaiveDate,
    pub prev_close: Decimal,
    pub last_date: NaiveDate,
    pub last_close: Decimal,
    pub change_pct: Decimal,
}

/// The sector performance report section.
#[derive(Debug, Clone, Serialize)]
pub struct SectorReport {
    pub symbol: String,
    pub sector: Sector,
    /// Target first, then peers sorted by 1-day change descending.
    pub rows: Vec<SectorRow>,
    pub standing: SectorStanding,
    pub signal: i32,
    pub summary: String,
}

fn one_day_change(prev: Decimal, last: Decimal) -> Option<Decimal> {
    if prev.is_zero() {
        return None;
    }
    Some((last - prev) / prev * Decimal::ONE_HUNDRED)
}

/// Linear-interpolation percentile over an unsorted sample, `q` in [0, 1].
fn percentile(values: &[Decimal], q: Decimal) -> Decimal {
    let mut sorted = values.to_vec();
    sorted.sort();
    if sorted.len() == 1 {
        return sorted[0];
    }
    let pos = q * Decimal::from(sorted.len() - 1);
    let lower = pos.floor();
    let frac = pos - lower;
    let i = lower.to_usize().unwrap_or(0);
    let low = sorted[i.min(sorted.len() - 1)];
    let high = sorted[(i + 1).min(sorted.len() - 1)];
    low + (high - low) * frac
}

fn standing_summary(symbol: &str, standing: SectorStanding, change_pct: Decimal) -> String {
    let pct = change_pct.round_dp(2);
    match standing {
        SectorStanding::Leading => format!(
            "{symbol} is outperforming its same-sector peers with a 1-day return of {pct}%, \
             placing it in the top quartile of sector performance."
        ),
        SectorStanding::Underperforming => format!(
            "{symbol} is underperforming its same-sector peers with a 1-day return of {pct}%, \
             ranking in the bottom quartile."
        ),
        SectorStanding::InLine => format!(
            "{symbol} is moving in line with its same-sector peers, with a 1-day return of \
             {pct}% (between the 25th and 75th percentile)."
        ),
    }
}

async fn fetch_row(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    group: PeerGroup,
) -> Result<SectorRow> {
    let closes = provider.latest_closes(symbol, 2).await?;
    // latest_closes guarantees two entries, newest first.
    let last = closes[0];
    let prev = closes[1];
    let change_pct = one_day_change(prev.close, last.close).ok_or_else(|| {
        AnalyticsError::InsufficientHistory(format!("{symbol} has a zero prior close"))
    })?;

    Ok(SectorRow {
        group,
        symbol: symbol.to_string(),
        prev_date: prev.date,
        prev_close: prev.close,
        last_date: last.date,
        last_close: last.close,
        change_pct,
    })
}

/// Compares the target's 1-day performance against its sector leaders.
///
/// Peers that fail to fetch are skipped with a warning; the comparison
/// degrades to the peers that answered. A target with no usable peers is
/// reported in line rather than ranked against itself.
///
/// # Errors
/// Fails when the target's own price history fails.
pub async fn sector_comparison(
    provider: &dyn MarketDataProvider,
    symbol: &str,
    sector: Sector,
) -> Result<SectorReport> {
    let target = fetch_row(provider, symbol, PeerGroup::Target).await?;
    let target_pct = target.change_pct;

    let mut peer_rows = Vec::new();
    for peer in sector
        .leaders()
        .iter()
        .filter(|p| !p.eq_ignore_ascii_case(symbol))
        .take(PEER_COUNT)
    {
        match fetch_row(provider, peer, PeerGroup::SameSector).await {
            Ok(row) => peer_rows.push(row),
            Err(err) => {
                tracing::warn!(peer, error = %err, "skipping peer with failed fetch");
            }
        }
    }

    let (standing, signal) = if peer_rows.is_empty() {
        (SectorStanding::InLine, 0)
    } else {
        let peer_pcts: Vec<Decimal> = peer_rows.iter().map(|r| r.change_pct).collect();
        let q75 = percentile(&peer_pcts, Decimal::new(75, 2));
        let q25 = percentile(&peer_pcts, Decimal::new(25, 2));
        let standing = if target_pct >= q75 {
            SectorStanding::Leading
        } else if target_pct <= q25 {
            SectorStanding::Underperforming
        } else {
            SectorStanding::InLine
        };
        (standing, standing.signal())
    };

    let summary = if peer_rows.is_empty() {
        format!("{symbol} has no tracked sector peers ({sector}); no relative ranking available.")
    } else {
        standing_summary(symbol, standing, target_pct)
    };

    peer_rows.sort_by(|a, b| b.change_pct.cmp(&a.change_pct));
    let mut rows = vec![target];
    rows.extend(peer_rows);

    Ok(SectorReport {
        symbol: symbol.to_string(),
        sector,
        rows,
        standing,
        signal,
        summary,
    })
}
