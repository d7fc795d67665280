//! The exchange-rate provider contract and the in-memory table
//!
//! Every rate source answers one question: the exact rate from a source
//! alpha code to a target alpha code. Rates are exact rationals so that
//! downstream arithmetic never loses precision.

use std::collections::HashMap;

use num_rational::BigRational;
use tracing::debug;

use money_core::{Amount, MoneyError};

/// A source of exchange rates.
///
/// Implementations fail with [`MoneyError::CurrencyConversion`] carrying
/// the requested pair when no rate is available.
pub trait ExchangeRateProvider {
    /// The exchange rate from `source` to `target` (both alpha codes).
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError>;
}

impl<P: ExchangeRateProvider + ?Sized> ExchangeRateProvider for &P {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        (**self).exchange_rate(source, target)
    }
}

impl ExchangeRateProvider for Box<dyn ExchangeRateProvider> {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        (**self).exchange_rate(source, target)
    }
}

/// An in-memory rate table keyed by `(source, target)`.
#[derive(Debug, Clone, Default)]
pub struct ConfigurableProvider {
    rates: HashMap<(String, String), BigRational>,
}

impl ConfigurableProvider {
    /// An empty rate table.
    pub fn new() -> ConfigurableProvider {
        ConfigurableProvider::default()
    }

    /// Sets the rate for a currency pair, replacing any previous value.
    pub fn set_exchange_rate(
        &mut self,
        source: impl Into<String>,
        target: impl Into<String>,
        rate: impl Into<Amount>,
    ) -> Result<(), MoneyError> {
        let rate = rate.into().to_rational()?;
        self.rates.insert((source.into(), target.into()), rate);
        Ok(())
    }

    /// Removes the rate for a currency pair.
    pub fn remove_exchange_rate(&mut self, source: &str, target: &str) -> Option<BigRational> {
        self.rates
            .remove(&(source.to_string(), target.to_string()))
    }
}

impl ExchangeRateProvider for ConfigurableProvider {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        debug!(source, target, "looking up configured exchange rate");
        self.rates
            .get(&(source.to_string(), target.to_string()))
            .cloned()
            .ok_or_else(|| MoneyError::conversion(source, target))
    }
}
