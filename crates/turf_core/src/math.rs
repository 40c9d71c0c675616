//! Scaled-integer math for deterministic economy calculations.
//!
//! All engine arithmetic uses a decimal fixed-point representation with
//! [`PRECISION`] (`10^18`) as the unit scale. Floating-point is never used:
//! it can produce different results on different CPUs and would break the
//! same-inputs-same-outputs contract every caller depends on.
//!
//! Overflow is never silent. Every scaled multiplication is checked and
//! failures surface as [`EngineError::Overflow`] so the caller can abandon
//! the whole calculation without applying a partial result.

use crate::error::{EngineError, Result};

/// Unit scale for fixed-point values: `1.0` is represented as `10^18`.
pub const PRECISION: u128 = 1_000_000_000_000_000_000;

/// Denominator for basis-point values (10000 bp = 100.00%).
pub const BPS_DENOMINATOR: u64 = 10_000;

/// Seconds in a (non-leap) year, the reference period for annual rates.
pub const SECONDS_PER_YEAR: u64 = 365 * 24 * 60 * 60;

/// Decay exponents below `-41.0` evaluate to zero at this precision.
///
/// In practice [`exp_decay`] hits its 1-unit floor long before this point;
/// the constant marks where the true value itself underflows the scale.
pub const DECAY_EXPONENT_LIMIT: u128 = 41 * PRECISION;

/// Number of Taylor terms (beyond the constant term) used by [`exp_decay`].
///
/// The term count is part of the engine contract: results must stay
/// bit-identical across implementations, so a general-purpose transcendental
/// library with different rounding is not a valid substitute.
const EXP_TAYLOR_TERMS: i128 = 7;

/// Exponent magnitude beyond which the series is not evaluated.
///
/// The alternating 7-term partial sum sits strictly below `e^-x` (odd
/// partial sums underestimate), is already negative at `x = 3.0`, and only
/// decreases from there, so for every magnitude past this bound the 1-unit
/// floor applies. Returning the floor directly gives the same result as
/// evaluating the series and keeps every intermediate term product inside
/// `i128`.
const SERIES_FLOOR_BOUND: u128 = 3 * PRECISION;

/// Smaller of two scaled values.
#[must_use]
pub const fn min(a: u128, b: u128) -> u128 {
    if a < b {
        a
    } else {
        b
    }
}

/// Larger of two scaled values.
#[must_use]
pub const fn max(a: u128, b: u128) -> u128 {
    if a > b {
        a
    } else {
        b
    }
}

/// Checked `a * b / denominator` on scaled integers.
///
/// The multiplication happens first so no precision is lost; overflow and a
/// zero denominator are reported as errors tagged with `context`.
pub fn mul_div(a: u128, b: u128, denominator: u128, context: &'static str) -> Result<u128> {
    if denominator == 0 {
        return Err(EngineError::DivisionByZero(context));
    }
    let product = a
        .checked_mul(b)
        .ok_or(EngineError::Overflow(context))?;
    Ok(product / denominator)
}

/// Integer square root via Newton's method (Babylonian iteration).
///
/// Converges by iterating `z = (x/z + z) / 2` from an initial guess above
/// the root; the loop exit leaves `y` as the floor of the true root.
#[must_use]
pub fn sqrt(x: u128) -> u128 {
    if x == 0 {
        return 0;
    }
    let mut z = (x / 2) + 1;
    let mut y = x;
    while z < y {
        y = z;
        z = (x / z + z) / 2;
    }
    y
}

/// Exponential decay factor `e^(-rate * elapsed / year)` in scaled form.
///
/// `rate_scaled` is a [`PRECISION`]-scaled annual decay rate. For exponent
/// magnitudes `x = rate * elapsed / year` up to 3.0 the factor is a fixed
/// 7-term Taylor expansion of `e^-x`, floored at one smallest unit. Past
/// 3.0 that partial sum is always below the floor, so the floor is returned
/// directly for every deeper exponent, all the way through
/// [`DECAY_EXPONENT_LIMIT`] and beyond. The result is monotone
/// nonincreasing in the exponent and never zero, which avoids the
/// degenerate all-rewards-zero case downstream.
pub fn exp_decay(rate_scaled: u128, elapsed_secs: u64) -> Result<u128> {
    if rate_scaled == 0 || elapsed_secs == 0 {
        return Ok(PRECISION);
    }

    let magnitude = mul_div(
        rate_scaled,
        u128::from(elapsed_secs),
        u128::from(SECONDS_PER_YEAR),
        "exp_decay exponent",
    )?;

    if magnitude > SERIES_FLOOR_BOUND {
        return Ok(1);
    }

    let x = -i128::try_from(magnitude).map_err(|_| EngineError::Overflow("exp_decay exponent"))?;
    let precision = PRECISION as i128;

    // sum = 1 + x + x^2/2! + ... + x^7/7!, all PRECISION-scaled.
    let mut term = precision;
    let mut sum = precision;
    for i in 1..=EXP_TAYLOR_TERMS {
        term = term
            .checked_mul(x)
            .ok_or(EngineError::Overflow("exp_decay term"))?
            / (precision * i);
        sum = sum
            .checked_add(term)
            .ok_or(EngineError::Overflow("exp_decay sum"))?;
    }

    // Floor at one smallest unit: decay may round to or below zero, but a
    // zero factor would zero out every downstream reward.
    if sum < 1 {
        Ok(1)
    } else {
        Ok(sum as u128)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_sqrt_exact_squares() {
        assert_eq!(sqrt(0), 0);
        assert_eq!(sqrt(1), 1);
        assert_eq!(sqrt(4), 2);
        assert_eq!(sqrt(144), 12);
        assert_eq!(sqrt(1_000_000), 1000);
        assert_eq!(sqrt(u128::from(u64::MAX)) + 1, 1u128 << 32);
    }

    #[test]
    fn test_sqrt_floors() {
        assert_eq!(sqrt(2), 1);
        assert_eq!(sqrt(3), 1);
        assert_eq!(sqrt(8), 2);
        assert_eq!(sqrt(99), 9);
    }

    #[test]
    fn test_mul_div_basic() {
        assert_eq!(mul_div(6, 7, 2, "test").unwrap(), 21);
        assert_eq!(mul_div(10_000, 250, 10_000, "test").unwrap(), 250);
    }

    #[test]
    fn test_mul_div_rejects_zero_denominator() {
        assert_eq!(
            mul_div(1, 1, 0, "test"),
            Err(EngineError::DivisionByZero("test"))
        );
    }

    #[test]
    fn test_mul_div_rejects_overflow() {
        assert_eq!(
            mul_div(u128::MAX, 2, 1, "test"),
            Err(EngineError::Overflow("test"))
        );
    }

    #[test]
    fn test_exp_decay_identity_at_zero() {
        assert_eq!(exp_decay(0, 1000).unwrap(), PRECISION);
        assert_eq!(exp_decay(PRECISION, 0).unwrap(), PRECISION);
    }

    #[test]
    fn test_exp_decay_one_year_unit_rate() {
        // e^-1 = 0.36787944...; the 7-term series gives 0.3678571...
        let factor = exp_decay(PRECISION, SECONDS_PER_YEAR).unwrap();
        assert!(factor > 367 * PRECISION / 1000);
        assert!(factor < 369 * PRECISION / 1000);
    }

    #[test]
    fn test_exp_decay_monotone_in_elapsed() {
        let half_year = exp_decay(PRECISION, SECONDS_PER_YEAR / 2).unwrap();
        let full_year = exp_decay(PRECISION, SECONDS_PER_YEAR).unwrap();
        assert!(half_year > full_year);
        assert!(half_year < PRECISION);
    }

    #[test]
    fn test_exp_decay_clamps_deep_exponents() {
        // rate * elapsed / year = 42, past the -41 underflow limit.
        let factor = exp_decay(42 * PRECISION, SECONDS_PER_YEAR).unwrap();
        assert_eq!(factor, 1);
    }

    #[test]
    fn test_exp_decay_midrange_hits_floor() {
        // Exponents between the series bound and the deep underflow limit
        // must still succeed at the floor, never abort.
        for rate in [4u128, 10, 25, 41] {
            assert_eq!(exp_decay(rate * PRECISION, SECONDS_PER_YEAR), Ok(1));
        }
    }

    #[test]
    fn test_exp_decay_monotone_across_series_bound() {
        let rates = [
            PRECISION / 2,
            PRECISION,
            2 * PRECISION,
            3 * PRECISION,
            5 * PRECISION,
            50 * PRECISION,
        ];
        let mut previous = u128::MAX;
        for rate in rates {
            let factor = exp_decay(rate, SECONDS_PER_YEAR).unwrap();
            assert!(factor <= previous, "decay must not increase with rate");
            assert!(factor >= 1);
            previous = factor;
        }
    }

    #[test]
    fn test_exp_decay_never_zero() {
        for years in 1..=5u64 {
            let factor = exp_decay(PRECISION, years * SECONDS_PER_YEAR).unwrap();
            assert!(factor >= 1, "decay factor must stay nonzero");
        }
    }

    #[test]
    fn test_exp_decay_determinism() {
        let a = exp_decay(PRECISION / 4, 7_776_000).unwrap();
        let b = exp_decay(PRECISION / 4, 7_776_000).unwrap();
        assert_eq!(a, b);
    }

    mod properties {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn prop_sqrt_is_integer_floor(x in any::<u64>()) {
                let x = u128::from(x);
                let root = sqrt(x);
                prop_assert!(root * root <= x);
                prop_assert!((root + 1) * (root + 1) > x);
            }

            #[test]
            fn prop_mul_div_full_denominator_is_identity(
                a in 0u128..=u128::from(u64::MAX),
            ) {
                prop_assert_eq!(mul_div(a, PRECISION, PRECISION, "prop").unwrap(), a);
            }
        }
    }
}
