//! Multi-currency accumulator
//!
//! A [`MoneyBag`] holds one exact rational amount per currency code and
//! never complains about mixing currencies; that is its purpose. Keys are
//! taken verbatim from the added values' alpha codes, so non-ISO codes
//! work too.

use std::collections::HashMap;

use num_rational::BigRational;
use num_traits::Zero;

use crate::currency::{Currency, CurrencySelector};
use crate::error::MoneyError;
use crate::value::MoneyContainer;

/// A mutable per-currency accumulator of exact amounts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MoneyBag {
    amounts: HashMap<String, BigRational>,
}

impl MoneyBag {
    /// An empty bag.
    pub fn new() -> MoneyBag {
        MoneyBag::default()
    }

    /// Whether nothing has been accumulated yet.
    pub fn is_empty(&self) -> bool {
        self.amounts.is_empty()
    }

    /// The amount held for a currency, zero when absent.
    ///
    /// Numeric selectors are resolved through the catalogue to their alpha
    /// code before lookup, so `get_amount(978)` reads the `"EUR"` entry.
    pub fn get_amount(
        &self,
        currency: impl Into<CurrencySelector>,
    ) -> Result<BigRational, MoneyError> {
        let code = match currency.into() {
            CurrencySelector::Code(code) => code,
            CurrencySelector::Numeric(numeric) => {
                Currency::of_numeric(numeric)?.code().to_string()
            }
            CurrencySelector::Currency(currency) => currency.code().to_string(),
        };
        Ok(self
            .amounts
            .get(&code)
            .cloned()
            .unwrap_or_else(BigRational::zero))
    }

    /// The full currency-code to amount map.
    pub fn get_amounts(&self) -> &HashMap<String, BigRational> {
        &self.amounts
    }

    /// Accumulates every amount of `container` into this bag.
    pub fn add(&mut self, container: &impl MoneyContainer) {
        for (code, amount) in container.amounts() {
            let entry = self.amounts.entry(code).or_insert_with(BigRational::zero);
            *entry += amount;
        }
    }

    /// Subtracts every amount of `container` from this bag.
    pub fn subtract(&mut self, container: &impl MoneyContainer) {
        for (code, amount) in container.amounts() {
            let entry = self.amounts.entry(code).or_insert_with(BigRational::zero);
            *entry -= amount;
        }
    }
}

impl MoneyContainer for MoneyBag {
    fn amounts(&self) -> Vec<(String, BigRational)> {
        self.amounts
            .iter()
            .map(|(code, amount)| (code.clone(), amount.clone()))
            .collect()
    }
}
