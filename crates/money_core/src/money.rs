//! Fixed-scale monetary values
//!
//! A [`Money`] is an immutable amount at the scale its [`Context`]
//! prescribes for its [`Currency`]. Every constructor and every operation
//! that can change the amount re-enters the `create` gate, so an
//! off-scale or off-step amount can never be observed.

use std::cmp::Ordering;
use std::fmt;

use num_bigint::BigInt;
use num_rational::BigRational;
use num_traits::{Signed, ToPrimitive, Zero};
use rust_decimal::Decimal;
use serde::de::Error as _;
use serde::ser::SerializeStruct;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::amount::{decimal_to_raw, Amount, Operand};
use crate::context::Context;
use crate::currency::Currency;
use crate::error::MoneyError;
use crate::rational::RationalMoney;
use crate::rounding::{pow10, RoundingMode};
use crate::value::{MonetaryValue, MoneyContainer};

/// An immutable monetary value with a fixed-scale decimal amount.
///
/// Invariants: the amount's scale equals the context's prescribed scale
/// (for fixed-scale contexts) and the unscaled amount is a multiple of the
/// context's step.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct Money {
    amount: Decimal,
    currency: Currency,
    context: Context,
}

impl Money {
    /// The single construction gate: applies the amount to the currency
    /// under the context and stores the validated result.
    fn create(
        amount: &Amount,
        currency: Currency,
        context: Context,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (numer, denom) = amount.to_raw_rational()?;
        let value = context.apply_to(&numer, &denom, &currency, rounding)?;
        Ok(Money {
            amount: value,
            currency,
            context,
        })
    }

    /// Builds a money in the default context, refusing to round.
    pub fn of(amount: impl Into<Amount>, currency: Currency) -> Result<Money, MoneyError> {
        Money::of_with(amount, currency, Context::DEFAULT, RoundingMode::Unnecessary)
    }

    /// Builds a money in an explicit context and rounding mode.
    pub fn of_with(
        amount: impl Into<Amount>,
        currency: Currency,
        context: Context,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        Money::create(&amount.into(), currency, context, rounding)
    }

    /// Builds a money from an amount in minor units (cents for USD, yen
    /// for JPY) in the default context.
    pub fn of_minor(minor: impl Into<Amount>, currency: Currency) -> Result<Money, MoneyError> {
        Money::of_minor_with(minor, currency, Context::DEFAULT, RoundingMode::Unnecessary)
    }

    /// Builds a money from an amount in minor units in an explicit context
    /// and rounding mode.
    pub fn of_minor_with(
        minor: impl Into<Amount>,
        currency: Currency,
        context: Context,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (numer, denom) = minor.into().to_raw_rational()?;
        let denom = denom * pow10(currency.fraction_digits());
        let value = context.apply_to(&numer, &denom, &currency, rounding)?;
        Ok(Money {
            amount: value,
            currency,
            context,
        })
    }

    /// A zero amount in the default context.
    pub fn zero(currency: Currency) -> Money {
        Money::zero_in(currency, Context::DEFAULT)
    }

    /// A zero amount in an explicit context.
    pub fn zero_in(currency: Currency, context: Context) -> Money {
        let scale = context.scale_for(&currency).unwrap_or(0);
        Money {
            amount: Decimal::new(0, scale),
            currency,
            context,
        }
    }

    /// The fixed-scale amount.
    pub fn amount(&self) -> Decimal {
        self.amount
    }

    /// The currency.
    pub fn currency(&self) -> &Currency {
        &self.currency
    }

    /// The context this money was created under.
    pub fn context(&self) -> Context {
        self.context
    }

    /// The amount expressed in minor units, keeping any extra scale
    /// (e.g. `USD 1.2345` has minor amount `123.45`).
    pub fn minor_amount(&self) -> Result<Decimal, MoneyError> {
        let digits = self.currency.fraction_digits();
        let scale = self.amount.scale();
        if scale >= digits {
            Decimal::try_from_i128_with_scale(self.amount.mantissa(), scale - digits)
                .map_err(|_| MoneyError::Overflow)
        } else {
            let shift = pow10(digits - scale)
                .to_i128()
                .ok_or(MoneyError::Overflow)?;
            let mantissa = self
                .amount
                .mantissa()
                .checked_mul(shift)
                .ok_or(MoneyError::Overflow)?;
            Decimal::try_from_i128_with_scale(mantissa, 0).map_err(|_| MoneyError::Overflow)
        }
    }

    /// The amount's unscaled integer value (`USD 1.23` yields `123`).
    pub fn unscaled_amount(&self) -> i128 {
        self.amount.mantissa()
    }

    /// Promotes to an exact rational money; never loses precision.
    pub fn to_rational(&self) -> RationalMoney {
        let (numer, denom) = decimal_to_raw(&self.amount);
        RationalMoney::from_raw(numer, denom, self.currency.clone())
    }

    /// Adds a money or a number, refusing to round.
    pub fn plus(&self, that: impl Into<Operand>) -> Result<Money, MoneyError> {
        self.add_signed(that.into(), "plus", false, RoundingMode::Unnecessary)
    }

    /// Adds a money or a number under an explicit rounding mode.
    pub fn plus_with(
        &self,
        that: impl Into<Operand>,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        self.add_signed(that.into(), "plus", false, rounding)
    }

    /// Subtracts a money or a number, refusing to round.
    pub fn minus(&self, that: impl Into<Operand>) -> Result<Money, MoneyError> {
        self.add_signed(that.into(), "minus", true, RoundingMode::Unnecessary)
    }

    /// Subtracts a money or a number under an explicit rounding mode.
    pub fn minus_with(
        &self,
        that: impl Into<Operand>,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        self.add_signed(that.into(), "minus", true, rounding)
    }

    fn add_signed(
        &self,
        that: Operand,
        operation: &'static str,
        negate: bool,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        match that {
            Operand::Money(other) => {
                self.check_same_currency(other.currency())?;
                if self.context != other.context {
                    return Err(MoneyError::MismatchedContext { operation });
                }
                if self.context.has_fixed_scale() {
                    // Same context means same scale and step; the sum stays
                    // on both, so plain decimal addition suffices.
                    let rhs = if negate { -other.amount } else { other.amount };
                    let sum = self.amount.checked_add(rhs).ok_or(MoneyError::Overflow)?;
                    return Ok(Money {
                        amount: sum,
                        currency: self.currency.clone(),
                        context: self.context,
                    });
                }
                self.combine(decimal_to_raw(&other.amount), negate, rounding)
            }
            Operand::Rational(other) => {
                self.check_same_currency(other.currency())?;
                self.combine(
                    (other.numerator().clone(), other.denominator().clone()),
                    negate,
                    rounding,
                )
            }
            Operand::Amount(amount) => self.combine(amount.to_raw_rational()?, negate, rounding),
        }
    }

    /// Exact rational addition, re-applied through the context.
    fn combine(
        &self,
        (rhs_numer, rhs_denom): (BigInt, BigInt),
        negate: bool,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (numer, denom) = decimal_to_raw(&self.amount);
        let rhs_numer = if negate { -rhs_numer } else { rhs_numer };
        let combined_numer = &numer * &rhs_denom + &rhs_numer * &denom;
        let combined_denom = denom * rhs_denom;
        let value =
            self.context
                .apply_to(&combined_numer, &combined_denom, &self.currency, rounding)?;
        Ok(Money {
            amount: value,
            currency: self.currency.clone(),
            context: self.context,
        })
    }

    /// Multiplies by a number; the exact product is re-applied through the
    /// context under `rounding`.
    pub fn multiplied_by(
        &self,
        factor: impl Into<Amount>,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (factor_numer, factor_denom) = factor.into().to_raw_rational()?;
        let (numer, denom) = decimal_to_raw(&self.amount);
        let value = self.context.apply_to(
            &(numer * factor_numer),
            &(denom * factor_denom),
            &self.currency,
            rounding,
        )?;
        Ok(Money {
            amount: value,
            currency: self.currency.clone(),
            context: self.context,
        })
    }

    /// Divides by a number; the exact quotient is re-applied through the
    /// context under `rounding`.
    pub fn divided_by(
        &self,
        divisor: impl Into<Amount>,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (divisor_numer, divisor_denom) = divisor.into().to_raw_rational()?;
        if divisor_numer.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        let (numer, denom) = decimal_to_raw(&self.amount);
        let mut quotient_numer = numer * divisor_denom;
        let mut quotient_denom = denom * divisor_numer;
        if quotient_denom.is_negative() {
            quotient_numer = -quotient_numer;
            quotient_denom = -quotient_denom;
        }
        let value =
            self.context
                .apply_to(&quotient_numer, &quotient_denom, &self.currency, rounding)?;
        Ok(Money {
            amount: value,
            currency: self.currency.clone(),
            context: self.context,
        })
    }

    /// The integer quotient of a division by a whole number.
    pub fn quotient(&self, divisor: impl Into<Amount>) -> Result<Money, MoneyError> {
        Ok(self.quotient_and_remainder(divisor)?.0)
    }

    /// The integer quotient and remainder of a division by a whole number,
    /// both landing on the context's step grid.
    ///
    /// The remainder's magnitude is always below `divisor * step` minor
    /// units. A non-integer divisor fails with
    /// [`MoneyError::RoundingNecessary`].
    pub fn quotient_and_remainder(
        &self,
        divisor: impl Into<Amount>,
    ) -> Result<(Money, Money), MoneyError> {
        let divisor = divisor
            .into()
            .to_integer()?
            .to_i128()
            .ok_or(MoneyError::Overflow)?;
        if divisor == 0 {
            return Err(MoneyError::DivisionByZero);
        }
        let step = i128::from(self.context.step());
        debug_assert_eq!(self.amount.mantissa() % step, 0);
        let units = self.amount.mantissa() / step;
        let scale = self.amount.scale();
        let quotient = self.with_unscaled((units / divisor) * step, scale)?;
        let remainder = self.with_unscaled((units % divisor) * step, scale)?;
        Ok((quotient, remainder))
    }

    /// The absolute value; context preserved.
    pub fn abs(&self) -> Money {
        Money {
            amount: self.amount.abs(),
            currency: self.currency.clone(),
            context: self.context,
        }
    }

    /// The negated value; context preserved.
    pub fn negated(&self) -> Money {
        Money {
            amount: -self.amount,
            currency: self.currency.clone(),
            context: self.context,
        }
    }

    /// Converts to another currency at the given rate, keeping this
    /// money's context.
    pub fn converted_to(
        &self,
        currency: Currency,
        rate: impl Into<Amount>,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let context = self.context;
        self.converted_to_with(currency, rate, context, rounding)
    }

    /// Converts to another currency at the given rate under an explicit
    /// context.
    pub fn converted_to_with(
        &self,
        currency: Currency,
        rate: impl Into<Amount>,
        context: Context,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        let (rate_numer, rate_denom) = rate.into().to_raw_rational()?;
        let (numer, denom) = decimal_to_raw(&self.amount);
        let value = context.apply_to(
            &(numer * rate_numer),
            &(denom * rate_denom),
            &currency,
            rounding,
        )?;
        Ok(Money {
            amount: value,
            currency,
            context,
        })
    }

    /// Compares amounts; the currencies must match.
    pub fn compare_to(&self, other: &Money) -> Result<Ordering, MoneyError> {
        self.check_same_currency(other.currency())?;
        Ok(self.amount.cmp(&other.amount))
    }

    /// Whether the amounts are equal; the currencies must match.
    pub fn is_equal_to(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)? == Ordering::Equal)
    }

    /// Whether this amount is strictly smaller; the currencies must match.
    pub fn is_less(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)? == Ordering::Less)
    }

    /// Whether this amount is smaller or equal; the currencies must match.
    pub fn is_less_or_equal(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)? != Ordering::Greater)
    }

    /// Whether this amount is strictly greater; the currencies must match.
    pub fn is_greater(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)? == Ordering::Greater)
    }

    /// Whether this amount is greater or equal; the currencies must match.
    pub fn is_greater_or_equal(&self, other: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare_to(other)? != Ordering::Less)
    }

    /// Whether amount and currency both match; never fails, a currency
    /// mismatch simply yields `false`.
    pub fn is_amount_and_currency_equal_to(&self, other: &Money) -> bool {
        self.currency == other.currency && self.amount == other.amount
    }

    /// The smallest of one or more monies; they must share a currency.
    pub fn min_of<'a>(monies: impl IntoIterator<Item = &'a Money>) -> Result<Money, MoneyError> {
        Money::fold_extremum(monies, "min_of", Ordering::Greater)
    }

    /// The largest of one or more monies; they must share a currency.
    pub fn max_of<'a>(monies: impl IntoIterator<Item = &'a Money>) -> Result<Money, MoneyError> {
        Money::fold_extremum(monies, "max_of", Ordering::Less)
    }

    fn fold_extremum<'a>(
        monies: impl IntoIterator<Item = &'a Money>,
        operation: &str,
        replace_when: Ordering,
    ) -> Result<Money, MoneyError> {
        let mut iter = monies.into_iter();
        let mut best = iter.next().ok_or_else(|| {
            MoneyError::InvalidArgument(format!("{operation}() requires at least one money"))
        })?;
        for candidate in iter {
            if best.compare_to(candidate)? == replace_when {
                best = candidate;
            }
        }
        Ok(best.clone())
    }

    /// The sum of one or more monies; currency and context must match, as
    /// for [`Money::plus`].
    pub fn total<'a>(monies: impl IntoIterator<Item = &'a Money>) -> Result<Money, MoneyError> {
        let mut iter = monies.into_iter();
        let first = iter.next().ok_or_else(|| {
            MoneyError::InvalidArgument("total() requires at least one money".to_string())
        })?;
        let mut sum = first.clone();
        for money in iter {
            sum = sum.plus(money)?;
        }
        Ok(sum)
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

    /// Rebuilds a money from an unscaled value known to respect the
    /// context's invariants.
    pub(crate) fn with_unscaled(&self, unscaled: i128, scale: u32) -> Result<Money, MoneyError> {
        let amount =
            Decimal::try_from_i128_with_scale(unscaled, scale).map_err(|_| MoneyError::Overflow)?;
        Ok(Money {
            amount,
            currency: self.currency.clone(),
            context: self.context,
        })
    }
}

impl MonetaryValue for Money {
    fn currency(&self) -> &Currency {
        &self.currency
    }

    fn rational_amount(&self) -> BigRational {
        let (numer, denom) = decimal_to_raw(&self.amount);
        BigRational::new(numer, denom)
    }
}

impl MoneyContainer for Money {
    fn amounts(&self) -> Vec<(String, BigRational)> {
        vec![(self.currency.code().to_string(), self.rational_amount())]
    }
}

impl fmt::Display for Money {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.currency, self.amount)
    }
}

impl Serialize for Money {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut state = serializer.serialize_struct("Money", 2)?;
        state.serialize_field("amount", &self.amount.to_string())?;
        state.serialize_field("currency", self.currency.code())?;
        state.end()
    }
}

impl<'de> Deserialize<'de> for Money {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            amount: String,
            currency: String,
        }

        let raw = Raw::deserialize(deserializer)?;
        let currency = Currency::of(&raw.currency).map_err(D::Error::custom)?;
        let amount = Decimal::from_str_exact(&raw.amount).map_err(D::Error::custom)?;
        let context = if amount.scale() == currency.fraction_digits() {
            Context::DEFAULT
        } else {
            Context::custom(amount.scale()).map_err(D::Error::custom)?
        };
        Money::of_with(amount, currency, context, RoundingMode::Unnecessary)
            .map_err(D::Error::custom)
    }
}
