//! Custom Test Assertions
//!
//! Specialized assertion helpers for monetary types that give more
//! meaningful error messages than standard assertions.

use money_core::{MonetaryValue, Money};

/// Asserts that two monies agree on amount and currency.
///
/// # Panics
///
/// Panics with a per-field message when amount or currency differ.
pub fn assert_money_eq(actual: &Money, expected: &Money) {
    assert_eq!(
        actual.currency(),
        expected.currency(),
        "currency mismatch: actual={}, expected={}",
        actual.currency(),
        expected.currency()
    );
    assert_eq!(
        actual.amount(),
        expected.amount(),
        "amount mismatch: actual={}, expected={}",
        actual,
        expected
    );
}

/// Asserts that a money is strictly positive.
pub fn assert_money_positive(money: &Money) {
    assert!(money.is_positive(), "expected positive money, got {money}");
}

/// Asserts that a money is exactly zero.
pub fn assert_money_zero(money: &Money) {
    assert!(money.is_zero(), "expected zero money, got {money}");
}

/// Asserts that a money is strictly negative.
pub fn assert_money_negative(money: &Money) {
    assert!(money.is_negative(), "expected negative money, got {money}");
}

/// Asserts that `parts` sum to `total` exactly, sharing its currency and
/// context.
///
/// # Panics
///
/// Panics when the sum differs, or when a part disagrees on currency or
/// context.
pub fn assert_money_sum_equals(parts: &[Money], total: &Money) {
    for part in parts {
        assert_eq!(
            part.currency(),
            total.currency(),
            "part {part} is not in {}",
            total.currency()
        );
        assert_eq!(
            part.context(),
            total.context(),
            "part {part} carries a different context"
        );
    }
    let sum = Money::total(parts).expect("parts must sum");
    assert_eq!(
        sum.amount(),
        total.amount(),
        "sum of parts ({sum}) does not equal the total ({total})"
    );
}

/// Asserts that a result is Ok and returns the value
#[macro_export]
macro_rules! assert_ok {
    ($result:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("Expected Ok, got Err: {:?}", e),
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => value,
            Err(e) => panic!("{}: {:?}", $msg, e),
        }
    };
}

/// Asserts that a result is Err and returns the error
#[macro_export]
macro_rules! assert_err {
    ($result:expr) => {
        match $result {
            Ok(value) => panic!("Expected Err, got Ok: {:?}", value),
            Err(e) => e,
        }
    };
    ($result:expr, $msg:expr) => {
        match $result {
            Ok(value) => panic!("{}: got Ok({:?})", $msg, value),
            Err(e) => e,
        }
    };
}

/// Asserts that an error matches a specific variant
#[macro_export]
macro_rules! assert_err_variant {
    ($result:expr, $pattern:pat) => {
        match $result {
            Ok(value) => panic!(
                "Expected Err matching {}, got Ok({:?})",
                stringify!($pattern),
                value
            ),
            Err(ref e) => {
                assert!(
                    matches!(e, $pattern),
                    "Error {:?} does not match pattern {}",
                    e,
                    stringify!($pattern)
                );
            }
        }
    };
}
