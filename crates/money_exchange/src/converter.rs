//! Currency conversion of monies and bags

use num_rational::BigRational;
use num_traits::Zero;
use tracing::debug;

use money_core::{
    Context, CurrencySelector, Money, MoneyContainer, MoneyError, RationalMoney, RoundingMode,
};

use crate::provider::ExchangeRateProvider;

/// Converts any money container into a target currency using an
/// exchange-rate provider.
///
/// Multiplication happens in exact rational space; provider failures
/// propagate untouched.
#[derive(Debug)]
pub struct CurrencyConverter<P> {
    provider: P,
}

impl<P: ExchangeRateProvider> CurrencyConverter<P> {
    /// Builds a converter over `provider`.
    pub fn new(provider: P) -> CurrencyConverter<P> {
        CurrencyConverter { provider }
    }

    /// The underlying rate provider.
    pub fn provider(&self) -> &P {
        &self.provider
    }

    /// Converts every amount of `container` into `currency` and sums them
    /// exactly, without any rounding.
    pub fn convert_to_rational(
        &self,
        container: &impl MoneyContainer,
        currency: impl Into<CurrencySelector>,
    ) -> Result<RationalMoney, MoneyError> {
        let target = currency.into().resolve()?;
        let mut total = BigRational::zero();
        for (code, amount) in container.amounts() {
            if code == target.code() {
                total += amount;
            } else {
                let rate = self.provider.exchange_rate(&code, target.code())?;
                debug!(source = %code, target = %target.code(), "converting amount");
                total += amount * rate;
            }
        }
        RationalMoney::of(total, target)
    }

    /// Converts `container` into `currency` and projects the exact sum
    /// through `context` under `rounding`.
    pub fn convert(
        &self,
        container: &impl MoneyContainer,
        currency: impl Into<CurrencySelector>,
        context: Context,
        rounding: RoundingMode,
    ) -> Result<Money, MoneyError> {
        self.convert_to_rational(container, currency)?
            .to(context, rounding)
    }
}
