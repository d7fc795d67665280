//! Query-backed exchange-rate provider
//!
//! Reads rates from an external table through a thin parameterised-query
//! contract, keeping the storage engine out of this crate. Each side of
//! the pair is either a column filtered at query time or a fixed code the
//! provider exclusively quotes.

use num_rational::BigRational;
use rust_decimal::Decimal;
use tracing::debug;

use money_core::{Amount, MoneyError};

use crate::provider::ExchangeRateProvider;

/// The external query contract: run a positional-parameter query and
/// return the first row's rate column, if any.
pub trait QueryExecutor {
    fn select_first(
        &self,
        sql: &str,
        parameters: &[&str],
    ) -> Result<Option<Decimal>, Box<dyn std::error::Error + Send + Sync>>;
}

/// Configuration for a [`TableProvider`].
///
/// Exactly one of `source_column` / `source_code` must be set, and the
/// same for the target side; source and target cannot both be fixed
/// codes. Extra conditions are appended to the `WHERE` clause verbatim as
/// `column = value` filters.
#[derive(Debug, Clone, Default)]
pub struct TableProviderConfig {
    pub table: String,
    pub rate_column: String,
    pub source_column: Option<String>,
    pub source_code: Option<String>,
    pub target_column: Option<String>,
    pub target_code: Option<String>,
    pub extra_conditions: Vec<(String, String)>,
}

impl TableProviderConfig {
    fn validate(&self) -> Result<(), MoneyError> {
        if self.table.is_empty() || self.rate_column.is_empty() {
            return Err(MoneyError::InvalidArgument(
                "table name and rate column must be set".to_string(),
            ));
        }
        if self.source_column.is_some() == self.source_code.is_some() {
            return Err(MoneyError::InvalidArgument(
                "exactly one of source column and source currency code must be set".to_string(),
            ));
        }
        if self.target_column.is_some() == self.target_code.is_some() {
            return Err(MoneyError::InvalidArgument(
                "exactly one of target column and target currency code must be set".to_string(),
            ));
        }
        if self.source_code.is_some() && self.target_code.is_some() {
            return Err(MoneyError::InvalidArgument(
                "source and target cannot both be fixed currency codes".to_string(),
            ));
        }
        Ok(())
    }
}

/// Reads exchange rates from a table through a [`QueryExecutor`].
#[derive(Debug)]
pub struct TableProvider<E> {
    config: TableProviderConfig,
    executor: E,
}

impl<E: QueryExecutor> TableProvider<E> {
    /// Validates the configuration and builds the provider.
    pub fn new(config: TableProviderConfig, executor: E) -> Result<TableProvider<E>, MoneyError> {
        config.validate()?;
        Ok(TableProvider { config, executor })
    }
}

impl<E: QueryExecutor> ExchangeRateProvider for TableProvider<E> {
    fn exchange_rate(&self, source: &str, target: &str) -> Result<BigRational, MoneyError> {
        if let Some(code) = &self.config.source_code {
            if code != source {
                return Err(MoneyError::conversion_detail(
                    source,
                    target,
                    format!("this provider only quotes rates from {code}"),
                ));
            }
        }
        if let Some(code) = &self.config.target_code {
            if code != target {
                return Err(MoneyError::conversion_detail(
                    source,
                    target,
                    format!("this provider only quotes rates to {code}"),
                ));
            }
        }

        let mut conditions = Vec::new();
        let mut parameters: Vec<&str> = Vec::new();
        for (column, value) in &self.config.extra_conditions {
            conditions.push(format!("{column} = ?"));
            parameters.push(value);
        }
        if let Some(column) = &self.config.source_column {
            conditions.push(format!("{column} = ?"));
            parameters.push(source);
        }
        if let Some(column) = &self.config.target_column {
            conditions.push(format!("{column} = ?"));
            parameters.push(target);
        }

        let sql = format!(
            "SELECT {} FROM {} WHERE {}",
            self.config.rate_column,
            self.config.table,
            conditions.join(" AND ")
        );
        debug!(source, target, %sql, "querying exchange-rate table");

        let row = self
            .executor
            .select_first(&sql, &parameters)
            .map_err(|error| MoneyError::conversion_detail(source, target, error.to_string()))?;
        match row {
            Some(rate) => Amount::from(rate).to_rational(),
            None => Err(MoneyError::conversion(source, target)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use rust_decimal_macros::dec;

    /// Records the queries it receives and replays canned rows.
    struct RecordingExecutor {
        rows: Vec<(Vec<String>, Decimal)>,
        queries: RefCell<Vec<(String, Vec<String>)>>,
    }

    impl RecordingExecutor {
        fn new(rows: Vec<(Vec<String>, Decimal)>) -> RecordingExecutor {
            RecordingExecutor {
                rows,
                queries: RefCell::new(Vec::new()),
            }
        }
    }

    impl QueryExecutor for RecordingExecutor {
        fn select_first(
            &self,
            sql: &str,
            parameters: &[&str],
        ) -> Result<Option<Decimal>, Box<dyn std::error::Error + Send + Sync>> {
            let parameters: Vec<String> = parameters.iter().map(|p| p.to_string()).collect();
            self.queries
                .borrow_mut()
                .push((sql.to_string(), parameters.clone()));
            Ok(self
                .rows
                .iter()
                .find(|(key, _)| key == &parameters)
                .map(|(_, rate)| *rate))
        }
    }

    fn column_config() -> TableProviderConfig {
        TableProviderConfig {
            table: "exchange_rate".to_string(),
            rate_column: "rate".to_string(),
            source_column: Some("source_code".to_string()),
            target_column: Some("target_code".to_string()),
            ..TableProviderConfig::default()
        }
    }

    #[test]
    fn test_both_sides_fixed_is_rejected() {
        let config = TableProviderConfig {
            table: "exchange_rate".to_string(),
            rate_column: "rate".to_string(),
            source_code: Some("EUR".to_string()),
            target_code: Some("USD".to_string()),
            ..TableProviderConfig::default()
        };
        let result = TableProvider::new(config, RecordingExecutor::new(vec![]));
        assert!(matches!(result, Err(MoneyError::InvalidArgument(_))));
    }

    #[test]
    fn test_source_needs_exactly_one_of_column_and_code() {
        let mut config = column_config();
        config.source_code = Some("EUR".to_string());
        assert!(TableProvider::new(config, RecordingExecutor::new(vec![])).is_err());

        let mut config = column_config();
        config.source_column = None;
        assert!(TableProvider::new(config, RecordingExecutor::new(vec![])).is_err());
    }

    #[test]
    fn test_query_shape_and_result() {
        let executor = RecordingExecutor::new(vec![(
            vec!["EUR".to_string(), "USD".to_string()],
            dec!(1.1),
        )]);
        let provider = TableProvider::new(column_config(), executor).unwrap();
        let rate = provider.exchange_rate("EUR", "USD").unwrap();
        assert_eq!(rate, Amount::from(dec!(1.1)).to_rational().unwrap());

        let queries = provider.executor.queries.borrow();
        assert_eq!(
            queries[0].0,
            "SELECT rate FROM exchange_rate WHERE source_code = ? AND target_code = ?"
        );
        assert_eq!(queries[0].1, ["EUR", "USD"]);
    }

    #[test]
    fn test_extra_conditions_come_first() {
        let mut config = column_config();
        config.extra_conditions = vec![("provider".to_string(), "ecb".to_string())];
        let provider = TableProvider::new(
            config,
            RecordingExecutor::new(vec![(
                vec!["ecb".to_string(), "EUR".to_string(), "USD".to_string()],
                dec!(1.1),
            )]),
        )
        .unwrap();
        provider.exchange_rate("EUR", "USD").unwrap();
        let queries = provider.executor.queries.borrow();
        assert_eq!(
            queries[0].0,
            "SELECT rate FROM exchange_rate WHERE provider = ? AND source_code = ? AND target_code = ?"
        );
    }

    #[test]
    fn test_no_row_is_a_conversion_failure() {
        let provider =
            TableProvider::new(column_config(), RecordingExecutor::new(vec![])).unwrap();
        let error = provider.exchange_rate("EUR", "USD").unwrap_err();
        assert_eq!(error, MoneyError::conversion("EUR", "USD"));
    }

    #[test]
    fn test_fixed_source_code_only_quotes_that_source() {
        let config = TableProviderConfig {
            table: "exchange_rate".to_string(),
            rate_column: "rate".to_string(),
            source_code: Some("EUR".to_string()),
            target_column: Some("target_code".to_string()),
            ..TableProviderConfig::default()
        };
        let executor = RecordingExecutor::new(vec![(vec!["USD".to_string()], dec!(1.1))]);
        let provider = TableProvider::new(config, executor).unwrap();
        assert!(provider.exchange_rate("EUR", "USD").is_ok());
        assert!(matches!(
            provider.exchange_rate("GBP", "USD"),
            Err(MoneyError::CurrencyConversion { .. })
        ));
    }
}
