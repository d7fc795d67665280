//! Cross rates derived from a single base currency
//!
//! Many feeds quote every currency against one base (e.g. EUR). This
//! wrapper answers arbitrary pairs from such a feed: pass-through from the
//! base, exact reciprocal to the base, and an exact cross rate otherwise.

use num_rational::BigRational;
use num_traits::Zero;
use tracing::debug;

use money_core::MoneyError;

use crate::provider::ExchangeRateProvider;

/// Derives arbitrary pairs from a provider quoting only `base -> x` rates.
#[derive(Debug)]
pub struct BaseCurrencyProvider<P> {
    base: String,
    inner: P,
}

impl<P: ExchangeRateProvider> BaseCurrencyProvider<P> {
    /// Wraps `inner`, which must quote rates from `base` to other
    /// currencies.
    pub fn new(base: impl Into<String>, inner: P) -> BaseCurrencyProvider<P> {
        BaseCurrencyProvider {
            base: base.into(),
            inner,
        }
    }

    /// The designated base currency code.
    pub fn base(&self) -> &str {
        &self.base
    }

    fn nonzero(&self, rate: BigRational, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        if rate.is_zero() {
            Err(MoneyError::conversion_detail(
                source,
                target,
                "the underlying provider quoted a zero rate",
            ))
        } else {
            Ok(rate)
        }
    }
}

impl<P: ExchangeRateProvider> ExchangeRateProvider for BaseCurrencyProvider<P> {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        if source == self.base {
            return self.inner.exchange_rate(source, target);
        }
        if target == self.base {
            // Quote base -> source and take the exact reciprocal.
            let rate = self.inner.exchange_rate(target, source)?;
            return Ok(self.nonzero(rate, source, target)?.recip());
        }
        debug!(source, target, base = %self.base, "deriving cross rate through the base currency");
        let base_to_target = self.inner.exchange_rate(&self.base, target)?;
        let base_to_source = self.inner.exchange_rate(&self.base, source)?;
        let base_to_source = self.nonzero(base_to_source, source, target)?;
        Ok(base_to_target / base_to_source)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use num_bigint::BigInt;

    use crate::provider::ConfigurableProvider;

    fn ratio(numer: i64, denom: i64) -> BigRational {
        BigRational::new(BigInt::from(numer), BigInt::from(denom))
    }

    fn eur_base() -> BaseCurrencyProvider<ConfigurableProvider> {
        let mut inner = ConfigurableProvider::new();
        inner.set_exchange_rate("EUR", "USD", "1.1").unwrap();
        inner.set_exchange_rate("EUR", "GBP", "0.9").unwrap();
        BaseCurrencyProvider::new("EUR", inner)
    }

    #[test]
    fn test_pass_through_from_base() {
        let provider = eur_base();
        assert_eq!(provider.exchange_rate("EUR", "USD").unwrap(), ratio(11, 10));
    }

    #[test]
    fn test_reciprocal_to_base_is_exact() {
        let provider = eur_base();
        assert_eq!(provider.exchange_rate("USD", "EUR").unwrap(), ratio(10, 11));
    }

    #[test]
    fn test_reciprocity_multiplies_to_one() {
        let provider = eur_base();
        let forward = provider.exchange_rate("EUR", "USD").unwrap();
        let backward = provider.exchange_rate("USD", "EUR").unwrap();
        assert_eq!(forward * backward, ratio(1, 1));
    }

    #[test]
    fn test_cross_rate_through_base() {
        let provider = eur_base();
        // USD -> GBP = (EUR -> GBP) / (EUR -> USD) = 0.9 / 1.1 = 9/11
        assert_eq!(provider.exchange_rate("USD", "GBP").unwrap(), ratio(9, 11));
    }

    #[test]
    fn test_unquoted_currency_fails() {
        let provider = eur_base();
        assert!(provider.exchange_rate("USD", "CHF").is_err());
    }
}
