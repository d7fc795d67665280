//! Money Exchange - rate providers, conversion and comparison
//!
//! This crate bridges currencies for the `money_core` value types:
//! - [`ExchangeRateProvider`] implementations: an in-memory table, a
//!   memoising cache, an ordered fallback chain, base-currency cross
//!   rates, and a query-backed table provider
//! - [`CurrencyConverter`]: converts monies and bags into a target
//!   currency in exact rational space
//! - [`MoneyComparator`]: cross-currency compare/min/max without
//!   pre-rounding

pub mod base_currency;
pub mod cached;
pub mod chain;
pub mod comparator;
pub mod converter;
pub mod provider;
pub mod table;

pub use base_currency::BaseCurrencyProvider;
pub use cached::CachedProvider;
pub use chain::ChainProvider;
pub use comparator::MoneyComparator;
pub use converter::CurrencyConverter;
pub use provider::{ConfigurableProvider, ExchangeRateProvider};
pub use table::{QueryExecutor, TableProvider, TableProviderConfig};
