//! Payoff computation: single-point P/L, sampled curves, exact break-evens.
//!
//! The aggregate payoff is piecewise linear in the underlying price, with
//! kinks only at the option strikes. Break-evens are therefore solved
//! exactly on each linear segment instead of relying on sampling
//! resolution.

use crate::error::{PayoffError, Result};
use crate::types::{CurvePoint, OptionLeg, OptionSide, OptionType, Position, PriceRange};
use rust_decimal::Decimal;

/// Most samples a single curve may carry. Far beyond any charting need;
/// bounds the allocation for caller-supplied counts.
pub const MAX_CURVE_SAMPLES: usize = 100_000;

/// P/L of the share leg at a hypothetical price: `shares * (price - cost)`.
#[must_use]
pub fn share_leg_payoff(shares_held: i64, average_cost: Decimal, price: Decimal) -> Decimal {
    Decimal::from(shares_held) * (price - average_cost)
}

/// P/L of one option leg at expiration for a hypothetical underlying price.
///
/// Intrinsic value is `max(price - strike, 0)` for calls and
/// `max(strike - price, 0)` for puts. Long legs earn `intrinsic - premium`
/// per share, short legs the negation; both scale by contract size and
/// quantity. Profit is positive, loss negative, for every combination.
#[must_use]
pub fn option_leg_payoff(leg: &OptionLeg, price: Decimal) -> Decimal {
    let intrinsic = match leg.option_type {
        OptionType::Call => (price - leg.strike).max(Decimal::ZERO),
        OptionType::Put => (leg.strike - price).max(Decimal::ZERO),
    };

    let per_share = match leg.side {
        OptionSide::Long => intrinsic - leg.premium,
        OptionSide::Short => leg.premium - intrinsic,
    };

    per_share * Decimal::from(leg.contract_size) * Decimal::from(leg.quantity)
}

/// Aggregate P/L of the whole position at one hypothetical price.
///
/// Sums the share leg (when shares are held) and every option leg. Legs are
/// independent, so the result does not depend on their order.
#[must_use]
pub fn total_payoff(position: &Position, price: Decimal) -> Decimal {
    let mut total = Decimal::ZERO;

    if position.shares_held != 0 {
        total += share_leg_payoff(position.shares_held, position.average_cost, price);
    }
    for leg in &position.legs {
        total += option_leg_payoff(leg, price);
    }

    total
}

/// Samples the payoff curve at `sample_count` evenly spaced prices across
/// `range`, inclusive of both endpoints.
///
/// The caller's range is used as given, never clamped or widened.
///
/// # Errors
/// Returns `PayoffError::InvalidPosition` if the position fails validation,
/// or `PayoffError::InvalidRange` if the range is malformed or
/// `sample_count` is below 2 or above [`MAX_CURVE_SAMPLES`].
pub fn generate_curve(
    position: &Position,
    range: PriceRange,
    sample_count: usize,
) -> Result<Vec<CurvePoint>> {
    position.validate()?;
    range.validate()?;
    if sample_count < 2 {
        return Err(PayoffError::InvalidRange(format!(
            "sample count must be at least 2, got {sample_count}"
        )));
    }
    if sample_count > MAX_CURVE_SAMPLES {
        return Err(PayoffError::InvalidRange(format!(
            "sample count must be at most {MAX_CURVE_SAMPLES}, got {sample_count}"
        )));
    }

    let span = range.high - range.low;
    let steps = Decimal::from(sample_count as u64 - 1);

    let mut curve = Vec::with_capacity(sample_count);
    for i in 0..sample_count {
        // Last sample pinned to the high bound so the endpoint is exact.
        let price = if i + 1 == sample_count {
            range.high
        } else {
            range.low + span * Decimal::from(i as u64) / steps
        };
        curve.push(CurvePoint {
            price,
            payoff: total_payoff(position, price),
        });
    }

    Ok(curve)
}

/// Finds every price in `range` where the aggregate payoff crosses zero,
/// ascending and deduplicated.
///
/// The payoff is piecewise linear with kinks only at leg strikes, so the
/// zeros are solved exactly: evaluate the payoff at the range endpoints and
/// at every strike inside the range, then interpolate the crossing on each
/// segment whose endpoint values have opposite signs. A kink whose payoff
/// is exactly zero counts as a break-even unless the payoff is identically
/// zero on both adjacent segments (a position with no exposure has no
/// meaningful break-even).
///
/// # Errors
/// Returns `PayoffError::InvalidPosition` if the position fails validation,
/// or `PayoffError::InvalidRange` if the range is malformed.
pub fn break_even_points(position: &Position, range: PriceRange) -> Result<Vec<Decimal>> {
    position.validate()?;
    range.validate()?;

    let mut kinks = vec![range.low, range.high];
    for leg in &position.legs {
        if range.contains(leg.strike) {
            kinks.push(leg.strike);
        }
    }
    kinks.sort();
    kinks.dedup();

    let values: Vec<Decimal> = kinks.iter().map(|p| total_payoff(position, *p)).collect();

    let mut roots = Vec::new();
    for i in 0..kinks.len() {
        let v = values[i];
        if v.is_zero() {
            // Zero at a kink is a break-even only if the payoff actually
            // leaves zero on a neighboring segment.
            let left_nonzero = i > 0 && !values[i - 1].is_zero();
            let right_nonzero = i + 1 < values.len() && !values[i + 1].is_zero();
            if left_nonzero || right_nonzero {
                roots.push(kinks[i]);
            }
            continue;
        }
        if i + 1 < kinks.len() {
            let next = values[i + 1];
            if (v > Decimal::ZERO) != (next > Decimal::ZERO) && !next.is_zero() {
                // Strict sign change on a linear segment: solve exactly.
                let p0 = kinks[i];
                let p1 = kinks[i + 1];
                roots.push(p0 + (p1 - p0) * v / (v - next));
            }
        }
    }

    roots.dedup();
    Ok(roots)
}

/// Derives a default charting range around a reference price.
///
/// Prefers the live spot price; falls back to the average cost when shares
/// are held, then to the position's lowest strike. `range_pct` is the
/// symmetric offset in percent (e.g. 50 for +/-50%). This is a presentation
/// default; callers supply explicit ranges for anything else.
///
/// # Errors
/// Returns `PayoffError::InvalidRange` if no reference price can be derived
/// or the offset produces an empty interval.
pub fn default_price_range(
    position: &Position,
    spot: Option<Decimal>,
    range_pct: Decimal,
) -> Result<PriceRange> {
    let center = spot
        .filter(|s| *s > Decimal::ZERO)
        .or_else(|| {
            (position.shares_held != 0 && position.average_cost > Decimal::ZERO)
                .then_some(position.average_cost)
        })
        .or_else(|| position.legs.iter().map(|leg| leg.strike).min())
        .ok_or_else(|| {
            PayoffError::InvalidRange(
                "no spot price, cost basis, or strike to derive a range from".to_string(),
            )
        })?;

    let offset = center * range_pct / Decimal::ONE_HUNDRED;
    PriceRange::new((center - offset).max(Decimal::ZERO), center + offset)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn shares_only(shares: i64, cost: Decimal) -> Position {
        Position {
            ticker: "GOOGL".to_string(),
            shares_held: shares,
            average_cost: cost,
            legs: vec![],
        }
    }

    fn leg(
        option_type: OptionType,
        side: OptionSide,
        strike: Decimal,
        premium: Decimal,
    ) -> OptionLeg {
        OptionLeg {
            option_type,
            side,
            strike,
            premium,
            contract_size: 100,
            quantity: 1,
        }
    }

    fn legs_only(legs: Vec<OptionLeg>) -> Position {
        Position {
            ticker: "GOOGL".to_string(),
            shares_held: 0,
            average_cost: Decimal::ZERO,
            legs,
        }
    }

    // ==================== Share Leg ====================

    #[test]
    fn shares_gain_above_cost() {
        let position = shares_only(100, dec!(50));
        assert_eq!(total_payoff(&position, dec!(60)), dec!(1000));
    }

    #[test]
    fn shares_lose_below_cost() {
        let position = shares_only(100, dec!(50));
        assert_eq!(total_payoff(&position, dec!(40)), dec!(-1000));
    }

    #[test]
    fn shares_flat_at_cost() {
        let position = shares_only(100, dec!(50));
        assert_eq!(total_payoff(&position, dec!(50)), dec!(0));
    }

    #[test]
    fn short_shares_profit_on_decline() {
        let position = shares_only(-100, dec!(50));
        assert_eq!(total_payoff(&position, dec!(40)), dec!(1000));
    }

    // ==================== Option Legs ====================

    #[test]
    fn long_call_at_strike_loses_premium() {
        let call = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        assert_eq!(option_leg_payoff(&call, dec!(100)), dec!(-500));
    }

    #[test]
    fn long_call_deep_in_the_money() {
        let call = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        assert_eq!(option_leg_payoff(&call, dec!(120)), dec!(1500));
    }

    #[test]
    fn long_call_out_of_the_money_loses_premium() {
        let call = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        assert_eq!(option_leg_payoff(&call, dec!(90)), dec!(-500));
    }

    #[test]
    fn short_put_keeps_premium_out_of_the_money() {
        let put = leg(OptionType::Put, OptionSide::Short, dec!(50), dec!(2));
        assert_eq!(option_leg_payoff(&put, dec!(60)), dec!(200));
    }

    #[test]
    fn short_put_loses_in_the_money() {
        let put = leg(OptionType::Put, OptionSide::Short, dec!(50), dec!(2));
        assert_eq!(option_leg_payoff(&put, dec!(40)), dec!(-800));
    }

    #[test]
    fn long_put_profits_on_decline() {
        let put = leg(OptionType::Put, OptionSide::Long, dec!(50), dec!(2));
        assert_eq!(option_leg_payoff(&put, dec!(40)), dec!(800));
        assert_eq!(option_leg_payoff(&put, dec!(60)), dec!(-200));
    }

    #[test]
    fn short_call_mirror_of_long_call() {
        let long = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        let short = leg(OptionType::Call, OptionSide::Short, dec!(100), dec!(5));
        for price in [dec!(80), dec!(100), dec!(130)] {
            assert_eq!(
                option_leg_payoff(&long, price),
                -option_leg_payoff(&short, price)
            );
        }
    }

    #[test]
    fn quantity_scales_leg_payoff() {
        let mut call = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        call.quantity = 3;
        assert_eq!(option_leg_payoff(&call, dec!(120)), dec!(4500));
    }

    // ==================== Total Payoff ====================

    #[test]
    fn empty_position_is_flat_zero() {
        let position = legs_only(vec![]);
        for price in [dec!(1), dec!(50), dec!(500)] {
            assert_eq!(total_payoff(&position, price), dec!(0));
        }
    }

    #[test]
    fn covered_call_combines_legs() {
        // 100 shares at 50 plus a short 60 call for 2.
        let mut position = shares_only(100, dec!(50));
        position.legs = vec![leg(OptionType::Call, OptionSide::Short, dec!(60), dec!(2))];
        // Above the strike the upside is capped: 1000 share gain + 200
        // premium - 1000 intrinsic given back.
        assert_eq!(total_payoff(&position, dec!(70)), dec!(1200));
        assert_eq!(total_payoff(&position, dec!(60)), dec!(1200));
        assert_eq!(total_payoff(&position, dec!(50)), dec!(200));
    }

    #[test]
    fn leg_order_does_not_change_payoff() {
        let a = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
        let b = leg(OptionType::Put, OptionSide::Short, dec!(90), dec!(3));
        let c = leg(OptionType::Put, OptionSide::Long, dec!(80), dec!(1));

        let forward = legs_only(vec![a.clone(), b.clone(), c.clone()]);
        let reversed = legs_only(vec![c, b, a]);

        for price in [dec!(70), dec!(85), dec!(95), dec!(110), dec!(140)] {
            assert_eq!(
                total_payoff(&forward, price),
                total_payoff(&reversed, price)
            );
        }
    }

    // ==================== Curve Generation ====================

    #[test]
    fn curve_samples_evenly_spaced_inclusive() {
        let position = shares_only(100, dec!(50));
        let range = PriceRange::new(dec!(0), dec!(100)).unwrap();
        let curve = generate_curve(&position, range, 5).unwrap();

        let prices: Vec<Decimal> = curve.iter().map(|p| p.price).collect();
        assert_eq!(prices, vec![dec!(0), dec!(25), dec!(50), dec!(75), dec!(100)]);

        for point in &curve {
            assert_eq!(point.payoff, total_payoff(&position, point.price));
        }
    }

    #[test]
    fn curve_two_samples_are_the_endpoints() {
        let position = shares_only(100, dec!(50));
        let range = PriceRange::new(dec!(40), dec!(60)).unwrap();
        let curve = generate_curve(&position, range, 2).unwrap();
        assert_eq!(curve.len(), 2);
        assert_eq!(curve[0].price, dec!(40));
        assert_eq!(curve[1].price, dec!(60));
    }

    #[test]
    fn curve_rejects_single_sample() {
        let position = shares_only(100, dec!(50));
        let range = PriceRange::new(dec!(40), dec!(60)).unwrap();
        assert!(matches!(
            generate_curve(&position, range, 1),
            Err(PayoffError::InvalidRange(_))
        ));
    }

    #[test]
    fn curve_rejects_invalid_leg() {
        let mut position = shares_only(100, dec!(50));
        position.legs = vec![leg(OptionType::Call, OptionSide::Long, dec!(0), dec!(5))];
        let range = PriceRange::new(dec!(40), dec!(60)).unwrap();
        assert!(matches!(
            generate_curve(&position, range, 10),
            Err(PayoffError::InvalidPosition(_))
        ));
    }

    #[test]
    fn curve_rejects_absurd_sample_count_instead_of_allocating() {
        // Counts come straight from callers, so the cap must hold all the
        // way up to usize::MAX without attempting the allocation.
        let position = shares_only(100, dec!(50));
        let range = PriceRange::new(dec!(40), dec!(60)).unwrap();
        for count in [MAX_CURVE_SAMPLES + 1, usize::MAX] {
            assert!(matches!(
                generate_curve(&position, range, count),
                Err(PayoffError::InvalidRange(_))
            ));
        }
        assert!(generate_curve(&position, range, MAX_CURVE_SAMPLES).is_ok());
    }

    #[test]
    fn curve_rejects_descending_literal_range() {
        // A struct-literal (or deserialized) range bypasses PriceRange::new;
        // the engine still refuses it.
        let position = shares_only(100, dec!(50));
        let range = PriceRange {
            low: dec!(60),
            high: dec!(40),
        };
        assert!(matches!(
            generate_curve(&position, range, 10),
            Err(PayoffError::InvalidRange(_))
        ));
        assert!(matches!(
            break_even_points(&position, range),
            Err(PayoffError::InvalidRange(_))
        ));
    }

    // ==================== Break-Evens ====================

    #[test]
    fn long_call_break_even_is_strike_plus_premium() {
        let position = legs_only(vec![leg(
            OptionType::Call,
            OptionSide::Long,
            dec!(100),
            dec!(5),
        )]);
        let range = PriceRange::new(dec!(50), dec!(150)).unwrap();
        assert_eq!(break_even_points(&position, range).unwrap(), vec![dec!(105)]);
    }

    #[test]
    fn shares_break_even_at_cost_basis() {
        let position = shares_only(100, dec!(50));
        let range = PriceRange::new(dec!(10), dec!(90)).unwrap();
        assert_eq!(break_even_points(&position, range).unwrap(), vec![dec!(50)]);
    }

    #[test]
    fn straddle_has_two_break_evens() {
        // Long 100 call for 5 and long 100 put for 5: break-evens 90 and 110.
        let position = legs_only(vec![
            leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5)),
            leg(OptionType::Put, OptionSide::Long, dec!(100), dec!(5)),
        ]);
        let range = PriceRange::new(dec!(50), dec!(150)).unwrap();
        assert_eq!(
            break_even_points(&position, range).unwrap(),
            vec![dec!(90), dec!(110)]
        );
    }

    #[test]
    fn break_even_at_kink_detected_exactly() {
        // Long 100 call with zero premium: payoff touches zero at the strike
        // and rises to the right. The strike itself is the break-even.
        let position = legs_only(vec![leg(
            OptionType::Call,
            OptionSide::Long,
            dec!(100),
            dec!(0),
        )]);
        let range = PriceRange::new(dec!(50), dec!(150)).unwrap();
        assert_eq!(break_even_points(&position, range).unwrap(), vec![dec!(100)]);
    }

    #[test]
    fn flat_zero_position_has_no_break_evens() {
        let position = legs_only(vec![]);
        let range = PriceRange::new(dec!(50), dec!(150)).unwrap();
        assert!(break_even_points(&position, range).unwrap().is_empty());
    }

    #[test]
    fn break_evens_outside_range_are_not_reported() {
        let position = legs_only(vec![leg(
            OptionType::Call,
            OptionSide::Long,
            dec!(100),
            dec!(5),
        )]);
        // Break-even is 105; the range stops below it.
        let range = PriceRange::new(dec!(50), dec!(100)).unwrap();
        assert!(break_even_points(&position, range).unwrap().is_empty());
    }

    #[test]
    fn break_evens_returned_ascending() {
        // Short 80 put for 3 and long 120 call for 4.
        let position = legs_only(vec![
            leg(OptionType::Put, OptionSide::Short, dec!(80), dec!(3)),
            leg(OptionType::Call, OptionSide::Long, dec!(120), dec!(4)),
        ]);
        let range = PriceRange::new(dec!(40), dec!(160)).unwrap();
        let roots = break_even_points(&position, range).unwrap();
        assert!(roots.windows(2).all(|w| w[0] < w[1]), "roots: {roots:?}");
    }

    #[test]
    fn break_even_rejects_invalid_position() {
        let mut position = shares_only(100, dec!(50));
        position.legs = vec![{
            let mut bad = leg(OptionType::Call, OptionSide::Long, dec!(100), dec!(5));
            bad.quantity = 0;
            bad
        }];
        let range = PriceRange::new(dec!(50), dec!(150)).unwrap();
        assert!(matches!(
            break_even_points(&position, range),
            Err(PayoffError::InvalidPosition(_))
        ));
    }

    // ==================== Default Range ====================

    #[test]
    fn default_range_centers_on_spot() {
        let position = shares_only(100, dec!(50));
        let range = default_price_range(&position, Some(dec!(80)), dec!(50)).unwrap();
        assert_eq!(range.low, dec!(40));
        assert_eq!(range.high, dec!(120));
    }

    #[test]
    fn default_range_falls_back_to_average_cost() {
        let position = shares_only(100, dec!(60));
        let range = default_price_range(&position, None, dec!(50)).unwrap();
        assert_eq!(range.low, dec!(30));
        assert_eq!(range.high, dec!(90));
    }

    #[test]
    fn default_range_falls_back_to_strike() {
        let position = legs_only(vec![leg(
            OptionType::Call,
            OptionSide::Long,
            dec!(200),
            dec!(5),
        )]);
        let range = default_price_range(&position, None, dec!(50)).unwrap();
        assert_eq!(range.low, dec!(100));
        assert_eq!(range.high, dec!(300));
    }

    #[test]
    fn default_range_fails_with_no_reference() {
        let position = legs_only(vec![]);
        assert!(default_price_range(&position, None, dec!(50)).is_err());
    }
}
