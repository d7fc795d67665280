//! Ordered fallback chain of providers

use num_rational::BigRational;
use tracing::debug;

use money_core::MoneyError;

use crate::provider::ExchangeRateProvider;

/// Tries an ordered list of providers and returns the first success.
///
/// Failures from non-terminal providers are swallowed; only the last
/// provider's failure propagates. An empty chain always fails.
#[derive(Default)]
pub struct ChainProvider {
    providers: Vec<Box<dyn ExchangeRateProvider>>,
}

impl ChainProvider {
    /// An empty chain.
    pub fn new() -> ChainProvider {
        ChainProvider::default()
    }

    /// Appends a provider to the end of the chain.
    pub fn add_provider(&mut self, provider: impl ExchangeRateProvider + 'static) {
        self.providers.push(Box::new(provider));
    }

    /// Removes and returns the provider at `index`, shifting the rest up.
    pub fn remove_provider(&mut self, index: usize) -> Option<Box<dyn ExchangeRateProvider>> {
        if index < self.providers.len() {
            Some(self.providers.remove(index))
        } else {
            None
        }
    }

    /// The number of providers in the chain.
    pub fn len(&self) -> usize {
        self.providers.len()
    }

    /// Whether the chain holds no providers.
    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }
}

impl ExchangeRateProvider for ChainProvider {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        let mut last_error = None;
        for (index, provider) in self.providers.iter().enumerate() {
            match provider.exchange_rate(source, target) {
                Ok(rate) => return Ok(rate),
                Err(error) => {
                    debug!(source, target, index, "chain provider missed, trying next");
                    last_error = Some(error);
                }
            }
        }
        Err(last_error.unwrap_or_else(|| MoneyError::conversion(source, target)))
    }
}
