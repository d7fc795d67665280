//! Rounding modes and exact rounding of rational values
//!
//! All rounding in the workspace funnels through [`round_to_scale`], which
//! rounds an exact fraction to a fixed-scale decimal under an explicit
//! [`RoundingMode`]. There is no floating-point anywhere on this path.

use std::cmp::Ordering;

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;

use crate::error::MoneyError;

/// How to resolve a remainder that cannot be represented at the target
/// scale.
///
/// The meanings follow the conventional vocabulary: `Up` rounds away from
/// zero, `Down` towards zero, `Ceiling` towards positive infinity, `Floor`
/// towards negative infinity; the `Half*` modes round to the nearest
/// representable value and break ties away from zero, towards zero, or to
/// the even neighbour. `Unnecessary` asserts that no rounding is required
/// and fails with [`MoneyError::RoundingNecessary`] otherwise.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum RoundingMode {
    Up,
    Down,
    Ceiling,
    Floor,
    HalfUp,
    HalfDown,
    HalfEven,
    #[default]
    Unnecessary,
}

/// Returns 10^exp as a big integer.
pub(crate) fn pow10(exp: u32) -> BigInt {
    num_traits::pow(BigInt::from(10), exp as usize)
}

/// Builds a decimal from an unscaled big integer and a scale.
///
/// Fails with [`MoneyError::Overflow`] when the value does not fit the
/// 96-bit mantissa.
pub(crate) fn decimal_from_unscaled(unscaled: &BigInt, scale: u32) -> Result<Decimal, MoneyError> {
    let mantissa = unscaled.to_i128().ok_or(MoneyError::Overflow)?;
    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| MoneyError::Overflow)
}

/// Rounds the exact fraction `numer / denom` to a decimal with exactly
/// `scale` fraction digits under `mode`.
///
/// `denom` must be positive; amount normalisation keeps the sign in the
/// numerator.
pub(crate) fn round_to_scale(
    numer: &BigInt,
    denom: &BigInt,
    scale: u32,
    mode: RoundingMode,
) -> Result<Decimal, MoneyError> {
    debug_assert!(denom.is_positive(), "denominator must be normalised positive");

    let scaled = numer * pow10(scale);
    let (quotient, remainder) = scaled.div_rem(denom);
    if remainder.is_zero() {
        return decimal_from_unscaled(&quotient, scale);
    }

    // The truncated quotient is the towards-zero candidate; decide whether
    // to step one unit away from zero.
    let negative = remainder.is_negative();
    let round_away = match mode {
        RoundingMode::Unnecessary => return Err(MoneyError::RoundingNecessary),
        RoundingMode::Up => true,
        RoundingMode::Down => false,
        RoundingMode::Ceiling => !negative,
        RoundingMode::Floor => negative,
        RoundingMode::HalfUp | RoundingMode::HalfDown | RoundingMode::HalfEven => {
            let doubled = remainder.abs() * 2u8;
            match doubled.cmp(denom) {
                Ordering::Less => false,
                Ordering::Greater => true,
                Ordering::Equal => match mode {
                    RoundingMode::HalfUp => true,
                    RoundingMode::HalfDown => false,
                    _ => quotient.is_odd(),
                },
            }
        }
    };

    let rounded = if round_away {
        if negative {
            quotient - 1
        } else {
            quotient + 1
        }
    } else {
        quotient
    };
    decimal_from_unscaled(&rounded, scale)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    fn round(numer: i64, denom: i64, scale: u32, mode: RoundingMode) -> Result<Decimal, MoneyError> {
        round_to_scale(&BigInt::from(numer), &BigInt::from(denom), scale, mode)
    }

    #[test]
    fn test_exact_value_is_untouched_by_every_mode() {
        for mode in [
            RoundingMode::Up,
            RoundingMode::Down,
            RoundingMode::Ceiling,
            RoundingMode::Floor,
            RoundingMode::HalfUp,
            RoundingMode::HalfDown,
            RoundingMode::HalfEven,
            RoundingMode::Unnecessary,
        ] {
            assert_eq!(round(550, 100, 2, mode).unwrap(), dec!(5.50));
        }
    }

    #[test]
    fn test_rounding_table_to_integer_scale() {
        // (value_tenths, Up, Down, Ceiling, Floor, HalfUp, HalfDown, HalfEven)
        let table: [(i64, i64, i64, i64, i64, i64, i64, i64); 10] = [
            (55, 6, 5, 6, 5, 6, 5, 6),
            (25, 3, 2, 3, 2, 3, 2, 2),
            (16, 2, 1, 2, 1, 2, 2, 2),
            (11, 2, 1, 2, 1, 1, 1, 1),
            (10, 1, 1, 1, 1, 1, 1, 1),
            (-10, -1, -1, -1, -1, -1, -1, -1),
            (-11, -2, -1, -1, -2, -1, -1, -1),
            (-16, -2, -1, -1, -2, -2, -2, -2),
            (-25, -3, -2, -2, -3, -3, -2, -2),
            (-55, -6, -5, -5, -6, -6, -5, -6),
        ];
        for (tenths, up, down, ceil, floor, half_up, half_down, half_even) in table {
            assert_eq!(round(tenths, 10, 0, RoundingMode::Up).unwrap(), Decimal::from(up));
            assert_eq!(round(tenths, 10, 0, RoundingMode::Down).unwrap(), Decimal::from(down));
            assert_eq!(round(tenths, 10, 0, RoundingMode::Ceiling).unwrap(), Decimal::from(ceil));
            assert_eq!(round(tenths, 10, 0, RoundingMode::Floor).unwrap(), Decimal::from(floor));
            assert_eq!(round(tenths, 10, 0, RoundingMode::HalfUp).unwrap(), Decimal::from(half_up));
            assert_eq!(
                round(tenths, 10, 0, RoundingMode::HalfDown).unwrap(),
                Decimal::from(half_down)
            );
            assert_eq!(
                round(tenths, 10, 0, RoundingMode::HalfEven).unwrap(),
                Decimal::from(half_even)
            );
        }
    }

    #[test]
    fn test_unnecessary_fails_on_any_remainder() {
        let result = round(1, 3, 2, RoundingMode::Unnecessary);
        assert_eq!(result, Err(MoneyError::RoundingNecessary));
    }

    #[test]
    fn test_widening_scale_is_exact() {
        assert_eq!(round(5, 2, 4, RoundingMode::Unnecessary).unwrap(), dec!(2.5000));
    }

    #[test]
    fn test_result_preserves_target_scale() {
        let rounded = round(100, 1, 2, RoundingMode::Unnecessary).unwrap();
        assert_eq!(rounded.scale(), 2);
        assert_eq!(rounded.to_string(), "100.00");
    }

    #[test]
    fn test_overflow_is_reported() {
        let huge = pow10(40);
        let result = round_to_scale(&huge, &BigInt::from(1), 2, RoundingMode::Unnecessary);
        assert_eq!(result, Err(MoneyError::Overflow));
    }
}
