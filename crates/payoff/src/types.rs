//! Position and option leg types for payoff computation.

use crate::error::{PayoffError, Result};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Option contract type (call or put).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionType {
    Call,
    Put,
}

impl std::fmt::Display for OptionType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Call => write!(f, "C"),
            Self::Put => write!(f, "P"),
        }
    }
}

/// Which side of the contract the position holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OptionSide {
    Long,
    Short,
}

/// One option leg within a strategy.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OptionLeg {
    pub option_type: OptionType,
    pub side: OptionSide,
    /// Strike price; must be positive.
    pub strike: Decimal,
    /// Premium paid (long) or received (short) per contract, per share.
    pub premium: Decimal,
    /// Shares represented by one contract (100 for standard US equity options).
    #[serde(default = "default_contract_size")]
    pub contract_size: u32,
    /// Number of contracts; must be positive.
    pub quantity: u32,
}

const fn default_contract_size() -> u32 {
    100
}

impl OptionLeg {
    /// Checks the leg invariants, returning a description of the first violation.
    ///
    /// # Errors
    /// Returns `PayoffError::InvalidPosition` if any invariant is violated.
    pub fn validate(&self) -> Result<()> {
        if self.strike <= Decimal::ZERO {
            return Err(PayoffError::InvalidPosition(format!(
                "leg strike must be positive, got {}",
                self.strike
            )));
        }
        if self.premium < Decimal::ZERO {
            return Err(PayoffError::InvalidPosition(format!(
                "leg premium must be non-negative, got {}",
                self.premium
            )));
        }
        if self.contract_size == 0 {
            return Err(PayoffError::InvalidPosition(
                "leg contract size must be positive".to_string(),
            ));
        }
        if self.quantity == 0 {
            return Err(PayoffError::InvalidPosition(
                "leg quantity must be positive".to_string(),
            ));
        }
        Ok(())
    }
}

/// A user-entered position: shares plus zero or more option legs.
///
/// Built fresh from input on every analysis run and discarded after
/// rendering; nothing here is mutated once constructed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Position {
    /// Underlying symbol. Informational only; never used in the math.
    pub ticker: String,
    /// Shares held; zero is valid, negative models a short stock position.
    #[serde(default)]
    pub shares_held: i64,
    /// Cost basis per share; must be non-negative.
    #[serde(default)]
    pub average_cost: Decimal,
    /// Option legs, possibly empty. Order never affects the result.
    #[serde(default)]
    pub legs: Vec<OptionLeg>,
}

impl Position {
    /// Validates the position and every leg in a single pass.
    ///
    /// # Errors
    /// Returns `PayoffError::InvalidPosition` on the first violation found.
    pub fn validate(&self) -> Result<()> {
        if self.average_cost < Decimal::ZERO {
            return Err(PayoffError::InvalidPosition(format!(
                "average cost must be non-negative, got {}",
                self.average_cost
            )));
        }
        for leg in &self.legs {
            leg.validate()?;
        }
        Ok(())
    }

    /// True when the position has no exposure at all.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.shares_held == 0 && self.legs.is_empty()
    }
}

/// A closed price interval `[low, high]` with `0 <= low < high`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PriceRange {
    pub low: Decimal,
    pub high: Decimal,
}

impl PriceRange {
    /// Creates a validated range.
    ///
    /// # Errors
    /// Returns `PayoffError::InvalidRange` unless `0 <= low < high`.
    pub fn new(low: Decimal, high: Decimal) -> Result<Self> {
        let range = Self { low, high };
        range.validate()?;
        Ok(range)
    }

    /// Re-checks the range invariant. Fields are public (and the type
    /// deserializes), so the engine operations call this rather than
    /// trusting that the value came through [`PriceRange::new`].
    ///
    /// # Errors
    /// Returns `PayoffError::InvalidRange` unless `0 <= low < high`.
    pub fn validate(&self) -> Result<()> {
        if self.low < Decimal::ZERO {
            return Err(PayoffError::InvalidRange(format!(
                "low bound must be non-negative, got {}",
                self.low
            )));
        }
        if self.low >= self.high {
            return Err(PayoffError::InvalidRange(format!(
                "low bound {} must be below high bound {}",
                self.low, self.high
            )));
        }
        Ok(())
    }

    /// True if `price` lies within the closed interval.
    #[must_use]
    pub fn contains(&self, price: Decimal) -> bool {
        price >= self.low && price <= self.high
    }
}

/// One sampled point on a payoff curve.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct CurvePoint {
    pub price: Decimal,
    pub payoff: Decimal,
}
