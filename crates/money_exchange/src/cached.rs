//! Memoising provider wrapper

use std::cell::RefCell;
use std::collections::HashMap;

use num_rational::BigRational;
use tracing::{debug, trace};

use money_core::MoneyError;

use crate::provider::ExchangeRateProvider;

/// Caches another provider's answers per `(source, target)` pair until
/// [`CachedProvider::invalidate`] is called.
///
/// Failures are never cached: a pair that errored is retried on the next
/// lookup. Not thread-safe; share behind external synchronisation only.
#[derive(Debug)]
pub struct CachedProvider<P> {
    inner: P,
    cache: RefCell<HashMap<(String, String), BigRational>>,
}

impl<P: ExchangeRateProvider> CachedProvider<P> {
    /// Wraps `inner` with an empty cache.
    pub fn new(inner: P) -> CachedProvider<P> {
        CachedProvider {
            inner,
            cache: RefCell::new(HashMap::new()),
        }
    }

    /// Drops every cached rate; the next lookups hit the inner provider
    /// again.
    pub fn invalidate(&mut self) {
        debug!("invalidating exchange-rate cache");
        self.cache.get_mut().clear();
    }

    /// The wrapped provider.
    pub fn inner(&self) -> &P {
        &self.inner
    }
}

impl<P: ExchangeRateProvider> ExchangeRateProvider for CachedProvider<P> {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        let key = (source.to_string(), target.to_string());
        if let Some(rate) = self.cache.borrow().get(&key) {
            trace!(source, target, "exchange-rate cache hit");
            return Ok(rate.clone());
        }
        let rate = self.inner.exchange_rate(source, target)?;
        self.cache.borrow_mut().insert(key, rate.clone());
        Ok(rate)
    }
}
