//! Profit/loss payoff curves for stock and option positions.
//!
//! Given a position (shares held at an average cost, plus zero or more
//! option legs), this crate computes expiration P/L as a function of the
//! underlying price, samples a curve for charting, and finds break-even
//! prices exactly from the piecewise-linear structure of the payoff.
//!
//! The engine is purely functional: no I/O, no shared state. Inputs are
//! validated once at the boundary and never silently corrected.

pub mod engine;
pub mod error;
pub mod types;

pub use engine::{
    break_even_points, default_price_range, generate_curve, option_leg_payoff, share_leg_payoff,
    total_payoff, MAX_CURVE_SAMPLES,
};
pub use error::{PayoffError, Result};
pub use types::{CurvePoint, OptionLeg, OptionSide, OptionType, Position, PriceRange};
