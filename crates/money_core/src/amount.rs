//! Polymorphic amount coercion
//!
//! Construction and arithmetic entry points accept "a number" loosely: a
//! decimal, an integer, a float, a string, or an exact rational. [`Amount`]
//! carries the value unvalidated; conversion happens inside the operation
//! so that malformed input surfaces as a typed error, not a panic.

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{FromPrimitive, Zero};
use rust_decimal::Decimal;

use crate::error::MoneyError;
use crate::money::Money;
use crate::rational::RationalMoney;
use crate::rounding::pow10;

/// A number accepted by monetary constructors and arithmetic.
#[derive(Debug, Clone)]
pub enum Amount {
    Decimal(Decimal),
    Int(i128),
    Float(f64),
    Text(String),
    Rational(BigRational),
}

impl Amount {
    /// Converts to an exact ratio.
    ///
    /// Fails with [`MoneyError::NumberFormat`] for malformed text or a
    /// non-finite float.
    pub fn to_rational(&self) -> Result<BigRational, MoneyError> {
        let (numer, denom) = self.to_raw_rational()?;
        Ok(BigRational::new(numer, denom))
    }

    /// Converts to an exact fraction `(numerator, denominator)` with a
    /// positive denominator.
    ///
    /// Fails with [`MoneyError::NumberFormat`] for malformed text or a
    /// non-finite float.
    pub(crate) fn to_raw_rational(&self) -> Result<(BigInt, BigInt), MoneyError> {
        match self {
            Amount::Decimal(value) => Ok(decimal_to_raw(value)),
            Amount::Int(value) => Ok((BigInt::from(*value), BigInt::from(1))),
            Amount::Float(value) => {
                let decimal = Decimal::from_f64(*value)
                    .ok_or_else(|| MoneyError::NumberFormat(value.to_string()))?;
                Ok(decimal_to_raw(&decimal))
            }
            Amount::Text(text) => {
                let decimal = Decimal::from_str_exact(text)
                    .map_err(|_| MoneyError::NumberFormat(text.clone()))?;
                Ok(decimal_to_raw(&decimal))
            }
            Amount::Rational(ratio) => Ok((ratio.numer().clone(), ratio.denom().clone())),
        }
    }

    /// Coerces to an exact big integer.
    ///
    /// A value with any fractional part fails with
    /// [`MoneyError::RoundingNecessary`].
    pub(crate) fn to_integer(&self) -> Result<BigInt, MoneyError> {
        let (numer, denom) = self.to_raw_rational()?;
        let (quotient, remainder) = numer.div_rem(&denom);
        if remainder.is_zero() {
            Ok(quotient)
        } else {
            Err(MoneyError::RoundingNecessary)
        }
    }
}

/// Splits a decimal into `(unscaled value, 10^scale)`.
pub(crate) fn decimal_to_raw(value: &Decimal) -> (BigInt, BigInt) {
    (BigInt::from(value.mantissa()), pow10(value.scale()))
}

impl From<Decimal> for Amount {
    fn from(value: Decimal) -> Self {
        Amount::Decimal(value)
    }
}

impl From<f64> for Amount {
    fn from(value: f64) -> Self {
        Amount::Float(value)
    }
}

impl From<&str> for Amount {
    fn from(value: &str) -> Self {
        Amount::Text(value.to_string())
    }
}

impl From<String> for Amount {
    fn from(value: String) -> Self {
        Amount::Text(value)
    }
}

impl From<BigRational> for Amount {
    fn from(value: BigRational) -> Self {
        Amount::Rational(value)
    }
}

impl From<BigInt> for Amount {
    fn from(value: BigInt) -> Self {
        Amount::Rational(BigRational::from_integer(value))
    }
}

macro_rules! amount_from_int {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Amount {
            fn from(value: $ty) -> Self {
                Amount::Int(value as i128)
            }
        }
    )*};
}

amount_from_int!(i8, i16, i32, i64, i128, u8, u16, u32, u64);

/// The right-hand side of a monetary operation: another money value or a
/// plain number.
#[derive(Debug, Clone)]
pub enum Operand {
    Money(Money),
    Rational(RationalMoney),
    Amount(Amount),
}

impl From<Money> for Operand {
    fn from(value: Money) -> Self {
        Operand::Money(value)
    }
}

impl From<&Money> for Operand {
    fn from(value: &Money) -> Self {
        Operand::Money(value.clone())
    }
}

impl From<RationalMoney> for Operand {
    fn from(value: RationalMoney) -> Self {
        Operand::Rational(value)
    }
}

impl From<&RationalMoney> for Operand {
    fn from(value: &RationalMoney) -> Self {
        Operand::Rational(value.clone())
    }
}

macro_rules! operand_from_amount {
    ($($ty:ty),* $(,)?) => {$(
        impl From<$ty> for Operand {
            fn from(value: $ty) -> Self {
                Operand::Amount(Amount::from(value))
            }
        }
    )*};
}

operand_from_amount!(
    Decimal, f64, &str, String, BigRational, BigInt, i8, i16, i32, i64, i128, u8, u16, u32, u64,
);

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn test_text_preserves_trailing_zeros() {
        let (numer, denom) = Amount::from("1.10").to_raw_rational().unwrap();
        assert_eq!(numer, BigInt::from(110));
        assert_eq!(denom, BigInt::from(100));
    }

    #[test]
    fn test_malformed_text_is_a_number_format_error() {
        let result = Amount::from("1.2.3").to_raw_rational();
        assert_eq!(result, Err(MoneyError::NumberFormat("1.2.3".to_string())));
    }

    #[test]
    fn test_non_finite_float_is_rejected() {
        assert!(Amount::from(f64::NAN).to_raw_rational().is_err());
        assert!(Amount::from(f64::INFINITY).to_raw_rational().is_err());
    }

    #[test]
    fn test_decimal_keeps_scale() {
        let (numer, denom) = Amount::from(dec!(3.50)).to_raw_rational().unwrap();
        assert_eq!(numer, BigInt::from(350));
        assert_eq!(denom, BigInt::from(100));
    }

    #[test]
    fn test_to_integer_accepts_integral_values() {
        assert_eq!(Amount::from(9i64).to_integer().unwrap(), BigInt::from(9));
        assert_eq!(Amount::from("4.00").to_integer().unwrap(), BigInt::from(4));
    }

    #[test]
    fn test_to_integer_rejects_fractions() {
        let result = Amount::from(dec!(1.5)).to_integer();
        assert_eq!(result, Err(MoneyError::RoundingNecessary));
    }
}
