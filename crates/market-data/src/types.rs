//! Typed market data model shared by providers and analytics.

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// A live quote for one symbol.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Quote {
    pub symbol: String,
    pub price: Decimal,
    /// Latest trading day the price refers to.
    pub as_of: NaiveDate,
}

/// One daily closing price.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DailyClose {
    pub date: NaiveDate,
    /// Adjusted close when the provider supplies one.
    pub close: Decimal,
}

/// Company metadata relevant to sector comparison.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompanyOverview {
    pub symbol: String,
    pub name: String,
    /// Raw provider sector string; classification happens downstream.
    pub sector: String,
}

/// One quarter of reported EPS against the analyst estimate.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyEps {
    pub fiscal_date_ending: NaiveDate,
    pub reported: Decimal,
    /// Absent when no consensus estimate existed for the quarter.
    pub estimated: Option<Decimal>,
    pub surprise_pct: Option<Decimal>,
}

impl QuarterlyEps {
    /// True when the reported EPS beat the estimate.
    #[must_use]
    pub fn is_beat(&self) -> bool {
        self.estimated.is_some_and(|est| self.reported > est)
    }
}

/// One quarter of top-line revenue.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuarterlyRevenue {
    pub fiscal_date_ending: NaiveDate,
    pub total_revenue: Decimal,
}

/// One observation of a FRED series.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SeriesObservation {
    pub date: NaiveDate,
    pub value: Decimal,
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn quarter(reported: Decimal, estimated: Option<Decimal>) -> QuarterlyEps {
        QuarterlyEps {
            fiscal_date_ending: NaiveDate::from_ymd_opt(2025, 6, 30).unwrap(),
            reported,
            estimated,
            surprise_pct: None,
        }
    }

    #[test]
    fn beat_detected() {
        assert!(quarter(dec!(2.10), Some(dec!(2.00))).is_beat());
    }

    #[test]
    fn miss_and_meet_are_not_beats() {
        assert!(!quarter(dec!(1.90), Some(dec!(2.00))).is_beat());
        assert!(!quarter(dec!(2.00), Some(dec!(2.00))).is_beat());
    }

    #[test]
    fn no_estimate_is_not_a_beat() {
        assert!(!quarter(dec!(2.10), None).is_beat());
    }
}
