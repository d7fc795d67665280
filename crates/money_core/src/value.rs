//! Shared monetary algebra
//!
//! [`MonetaryValue`] carries the sign predicates common to fixed-scale and
//! rational money; [`MoneyContainer`] is the seam the bag and the currency
//! converter consume: anything exposing per-currency amounts.

use num_rational::BigRational;
use num_traits::{Signed, Zero};

use crate::currency::Currency;

/// Predicates and projections shared by every monetary value kind.
pub trait MonetaryValue {
    /// The currency this value is denominated in.
    fn currency(&self) -> &Currency;

    /// The amount as an exact ratio.
    fn rational_amount(&self) -> BigRational;

    /// The sign of the amount: -1, 0 or +1.
    fn sign(&self) -> i32 {
        let amount = self.rational_amount();
        if amount.is_zero() {
            0
        } else if amount.is_negative() {
            -1
        } else {
            1
        }
    }

    /// Whether the amount is exactly zero.
    fn is_zero(&self) -> bool {
        self.sign() == 0
    }

    /// Whether the amount is strictly positive.
    fn is_positive(&self) -> bool {
        self.sign() > 0
    }

    /// Whether the amount is positive or zero.
    fn is_positive_or_zero(&self) -> bool {
        self.sign() >= 0
    }

    /// Whether the amount is strictly negative.
    fn is_negative(&self) -> bool {
        self.sign() < 0
    }

    /// Whether the amount is negative or zero.
    fn is_negative_or_zero(&self) -> bool {
        self.sign() <= 0
    }
}

/// Anything holding amounts in one or more currencies.
///
/// Keys are the values' own alpha codes, verbatim; a fixed-scale or
/// rational money yields a single entry, a bag yields one per currency.
pub trait MoneyContainer {
    /// The per-currency amounts as exact ratios.
    fn amounts(&self) -> Vec<(String, BigRational)>;
}
