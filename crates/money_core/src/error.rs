//! Error taxonomy for monetary operations
//!
//! Every fallible operation in the workspace surfaces one of these
//! variants; nothing is silently coerced or swallowed.

use thiserror::Error;

use crate::currency::Currency;

/// Errors that can occur during monetary operations
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum MoneyError {
    /// A caller-supplied argument was rejected (bad ratios, bad context
    /// parameters, invalid provider configuration)
    #[error("{0}")]
    InvalidArgument(String),

    /// `RoundingMode::Unnecessary` was requested but the value cannot be
    /// represented without rounding
    #[error("rounding is necessary to represent the result of the operation at this scale")]
    RoundingNecessary,

    /// A textual amount could not be parsed as a number
    #[error("invalid number format: {0}")]
    NumberFormat(String),

    /// The divisor of a division is zero
    #[error("division by zero")]
    DivisionByZero,

    /// The currency code or country code is not in the catalogue
    #[error("unknown currency: {0}")]
    UnknownCurrency(String),

    /// Two monies in different currencies were combined or compared
    #[error("currency mismatch: expected {expected}, got {actual}")]
    MismatchedCurrency {
        expected: Currency,
        actual: Currency,
    },

    /// Two monies with different contexts were combined; the operand must
    /// be promoted to a rational money first
    #[error("context mismatch: cannot {operation}() money with a different context; use {operation}(that.to_rational())")]
    MismatchedContext { operation: &'static str },

    /// No exchange rate is available for the requested currency pair
    #[error("no exchange rate available to convert {} to {}{}", .source_code, .target_code, .detail.as_deref().map(|d| format!(": {d}")).unwrap_or_default())]
    CurrencyConversion {
        source_code: String,
        target_code: String,
        detail: Option<String>,
    },

    /// The exact result does not fit the fixed-scale decimal representation
    #[error("overflow: the result does not fit a 96-bit decimal at the requested scale")]
    Overflow,
}

impl MoneyError {
    /// Shorthand for a conversion failure without extra detail.
    pub fn conversion(source: impl Into<String>, target: impl Into<String>) -> Self {
        MoneyError::CurrencyConversion {
            source_code: source.into(),
            target_code: target.into(),
            detail: None,
        }
    }

    /// Shorthand for a conversion failure with a human-readable detail.
    pub fn conversion_detail(
        source: impl Into<String>,
        target: impl Into<String>,
        detail: impl Into<String>,
    ) -> Self {
        MoneyError::CurrencyConversion {
            source_code: source.into(),
            target_code: target.into(),
            detail: Some(detail.into()),
        }
    }
}
