//! Cross-currency comparison without pre-rounding

use std::cmp::Ordering;

use money_core::{MonetaryValue, Money, MoneyError};

use crate::provider::ExchangeRateProvider;

/// Compares monies across currencies by converting the first operand into
/// the second's currency in exact rational space.
///
/// The direction matters: `compare(a, b)` looks up the rate from `a`'s
/// currency to `b`'s, so the result is only symmetric when the provider's
/// rates are reciprocal.
#[derive(Debug)]
pub struct MoneyComparator<P> {
    provider: P,
}

impl<P: ExchangeRateProvider> MoneyComparator<P> {
    /// Builds a comparator over `provider`.
    pub fn new(provider: P) -> MoneyComparator<P> {
        MoneyComparator { provider }
    }

    /// Compares `a` to `b`, converting `a` into `b`'s currency when they
    /// differ; same-currency comparison never consults the provider.
    pub fn compare(&self, a: &Money, b: &Money) -> Result<Ordering, MoneyError> {
        if a.currency() == b.currency() {
            return a.compare_to(b);
        }
        let rate = self
            .provider
            .exchange_rate(a.currency().code(), b.currency().code())?;
        let lhs = a.rational_amount() * rate;
        Ok(lhs.cmp(&b.rational_amount()))
    }

    /// Whether the two monies are worth the same.
    pub fn is_equal(&self, a: &Money, b: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare(a, b)? == Ordering::Equal)
    }

    /// Whether `a` is worth strictly less than `b`.
    pub fn is_less(&self, a: &Money, b: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare(a, b)? == Ordering::Less)
    }

    /// Whether `a` is worth at most `b`.
    pub fn is_less_or_equal(&self, a: &Money, b: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare(a, b)? != Ordering::Greater)
    }

    /// Whether `a` is worth strictly more than `b`.
    pub fn is_greater(&self, a: &Money, b: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare(a, b)? == Ordering::Greater)
    }

    /// Whether `a` is worth at least `b`.
    pub fn is_greater_or_equal(&self, a: &Money, b: &Money) -> Result<bool, MoneyError> {
        Ok(self.compare(a, b)? != Ordering::Less)
    }

    /// The cheapest of `first` and `others`, folding left.
    pub fn min<'a>(
        &self,
        first: &'a Money,
        others: impl IntoIterator<Item = &'a Money>,
    ) -> Result<Money, MoneyError> {
        let mut best = first;
        for candidate in others {
            if self.compare(best, candidate)? == Ordering::Greater {
                best = candidate;
            }
        }
        Ok(best.clone())
    }

    /// The dearest of `first` and `others`, folding left.
    pub fn max<'a>(
        &self,
        first: &'a Money,
        others: impl IntoIterator<Item = &'a Money>,
    ) -> Result<Money, MoneyError> {
        let mut best = first;
        for candidate in others {
            if self.compare(best, candidate)? == Ordering::Less {
                best = candidate;
            }
        }
        Ok(best.clone())
    }
}
