//! Exact fractional monetary values
//!
//! A [`RationalMoney`] keeps its amount as a raw fraction of big integers
//! and never rounds. The fraction is also never reduced behind the
//! caller's back: `3.50` stays `350/100` until [`RationalMoney::simplified`]
//! divides out the GCD. Rounding happens only on explicit projection to a
//! fixed-scale [`Money`] via [`RationalMoney::to`].

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_integer::Integer;
use num_rational::BigRational;
use num_traits::{Signed, Zero};
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::{decimal_to_raw, Amount, Operand};
use crate::context::Context;
use crate::currency::Currency;
use crate::error::MoneyError;
use crate::money::Money;
use crate::rounding::RoundingMode;
use crate::value::{MonetaryValue, MoneyContainer};

/// An immutable monetary value whose amount is an exact fraction.
#[derive(Debug, Clone)]
pub struct RationalMoney {
    numerator: BigInt,
    denominator: BigInt,
    currency: Currency,
}

impl RationalMoney {
    /// Builds a rational money from any accepted amount; a decimal string
    /// `"3.5"` becomes the fraction `35/10`.
    pub fn of(amount: impl Into<Amount>, currency: Currency) -> Result<RationalMoney, MoneyError> {
        let (numerator, denominator) = amount.into().to_raw_rational()?;
        Ok(RationalMoney::from_raw(numerator, denominator, currency))
    }

    /// Builds a rational money from an explicit fraction.
    pub fn from_fraction(
        numerator: impl Into<BigInt>,
        denominator: impl Into<BigInt>,
        currency: Currency,
    ) -> Result<RationalMoney, MoneyError> {
        let denominator = denominator.into();
        if denominator.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(RationalMoney::from_raw(
            numerator.into(),
            denominator,
            currency,
        ))
    }

    /// Builds from a raw pair, normalising the sign into the numerator.
    pub(crate) fn from_raw(
        numerator: BigInt,
        denominator: BigInt,
        currency: Currency,
    ) -> RationalMoney {
        debug_assert!(!denominator.is_zero());
        if denominator.is_negative() {
            RationalMoney {
                numerator: -numerator,
                denominator: -denominator,
                currency,
            }
        } else {
            RationalMoney {
                numerator,
                denominator,
                currency,
            }
        }
    }

    /// The raw numerator; carries the sign.
    pub fn numerator(&self) -> &BigInt {
        &self.numerator
    }

    /// The raw denominator; always positive.
    pub fn denominator(&self) -> &BigInt {
        &self.denominator
    }

    /// Adds a money or a number exactly.
    pub fn plus(&self, that: impl Into<Operand>) -> Result<RationalMoney, MoneyError> {
        self.add_signed(that.into(), false)
    }

    /// Subtracts a money or a number exactly.
    pub fn minus(&self, that: impl Into<Operand>) -> Result<RationalMoney, MoneyError> {
        self.add_signed(that.into(), true)
    }

    fn add_signed(&self, that: Operand, negate: bool) -> Result<RationalMoney, MoneyError> {
        let (rhs_numer, rhs_denom) = self.operand_fraction(that)?;
        let rhs_numer = if negate { -rhs_numer } else { rhs_numer };
        Ok(RationalMoney::from_raw(
            &self.numerator * &rhs_denom + rhs_numer * &self.denominator,
            &self.denominator * rhs_denom,
            self.currency.clone(),
        ))
    }

    /// Multiplies by a number exactly.
    pub fn multiplied_by(&self, factor: impl Into<Amount>) -> Result<RationalMoney, MoneyError> {
        let (factor_numer, factor_denom) = factor.into().to_raw_rational()?;
        Ok(RationalMoney::from_raw(
            &self.numerator * factor_numer,
            &self.denominator * factor_denom,
            self.currency.clone(),
        ))
    }

    /// Divides by a number exactly; a zero divisor fails with
    /// [`MoneyError::DivisionByZero`].
    pub fn divided_by(&self, divisor: impl Into<Amount>) -> Result<RationalMoney, MoneyError> {
        let (divisor_numer, divisor_denom) = divisor.into().to_raw_rational()?;
        if divisor_numer.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(RationalMoney::from_raw(
            &self.numerator * divisor_denom,
            &self.denominator * divisor_numer,
            self.currency.clone(),
        ))
    }

    /// Reduces the fraction to lowest terms.
    pub fn simplified(&self) -> RationalMoney {
        if self.numerator.is_zero() {
            return RationalMoney {
                numerator: BigInt::from(0),
                denominator: BigInt::from(1),
                currency: self.currency.clone(),
            };
        }
        let gcd = self.numerator.gcd(&self.denominator);
        RationalMoney {
            numerator: &self.numerator / &gcd,
            denominator: &self.denominator / &gcd,
            currency: self.currency.clone(),
        }
    }

    /// Projects to a fixed-scale money under `context` and `rounding`.
    pub fn to(&self, context: Context, rounding: RoundingMode) -> Result<Money, MoneyError> {
        Money::of_with(
            BigRational::new(self.numerator.clone(), self.denominator.clone()),
            self.currency.clone(),
            context,
            rounding,
        )
    }

    /// The absolute value.
    pub fn abs(&self) -> RationalMoney {
        RationalMoney {
            numerator: self.numerator.abs(),
            denominator: self.denominator.clone(),
            currency: self.currency.clone(),
        }
    }

    /// The negated value.
    pub fn negated(&self) -> RationalMoney {
        RationalMoney {
            numerator: -&self.numerator,
            denominator: self.denominator.clone(),
            currency: self.currency.clone(),
        }
    }

    fn operand_fraction(&self, that: Operand) -> Result<(BigInt, BigInt), MoneyError> {
        match that {
            Operand::Money(other) => {
                self.check_same_currency(other.currency())?;
                Ok(decimal_to_raw(&other.amount()))
            }
            Operand::Rational(other) => {
                self.check_same_currency(&other.currency)?;
                Ok((other.numerator, other.denominator))
            }
            Operand::Amount(amount) => amount.to_raw_rational(),
        }
    }

    fn check_same_currency(&self, other: &Currency) -> Result<(), MoneyError> {
        if &self.currency == other {
            Ok(())
        } else {
            Err(MoneyError::MismatchedCurrency {
                expected: self.currency.clone(),
                actual: other.clone(),
            })
        }
    }
}

impl MonetaryValue for RationalMoney {
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn rational_amount(&self) -> BigRational {
        BigRational::new(self.numerator.clone(), self.denominator.clone())
    }
}

impl MoneyContainer for RationalMoney {
    fn amounts(&self) -> Vec<(String, BigRational)> {
        vec![(self.currency.code().to_string(), self.rational_amount())]
    }
}

impl PartialEq for RationalMoney {
    fn eq(&self, other: &Self) -> bool {
        // Numeric equality: 35/10 equals 7/2.
        self.currency == other.currency
            && &self.numerator * &other.denominator == &other.numerator * &self.denominator
    }
}

impl Eq for RationalMoney {}

impl PartialOrd for RationalMoney {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        if self.currency != other.currency {
            return None;
        }
        Some((&self.numerator * &other.denominator).cmp(&(&other.numerator * &self.denominator)))
    }
}

impl fmt::Display for RationalMoney {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} {}/{}",
            self.currency, self.numerator, self.denominator
        )
    }
}

impl Serialize for RationalMoney {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("RationalMoney", 2)?;
        state.serialize_field("amount", &format!("{}/{}", self.numerator, self.denominator))?;
        state.serialize_field("currency", self.currency.code())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for RationalMoney {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            amount: String,
            currency: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let currency = Currency::of(&raw.currency).map_err(D::Error::custom)?;
        let (numerator, denominator) = match raw.amount.split_once('/') {
            Some((numer, denom)) => (
                numer
                    .parse::<BigInt>()
                    .map_err(|_| D::Error::custom(format!("invalid fraction: {}", raw.amount)))?,
                denom
                    .parse::<BigInt>()
                    .map_err(|_| D::Error::custom(format!("invalid fraction: {}", raw.amount)))?,
            ),
            None => (
                raw.amount
                    .parse::<BigInt>()
                    .map_err(|_| D::Error::custom(format!("invalid fraction: {}", raw.amount)))?,
                BigInt::from(1),
            ),
        };
        RationalMoney::from_fraction(numerator, denominator, currency).map_err(D::Error::custom)
    }
}
