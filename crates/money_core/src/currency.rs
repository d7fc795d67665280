//! Currency metadata and the process-wide ISO-4217 catalogue
//!
//! Catalogued currencies are canonical entries in a lazily initialised
//! static table; `Currency::of` hands out cheap clones backed by `'static`
//! data. Custom (non-ISO) currencies can be built with [`Currency::new`]
//! and behave like any other currency, but are never registered.

use std::borrow::Cow;
use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::hash::{Hash, Hasher};
use std::sync::OnceLock;

use serde::de::Error as _;
use serde::{Deserialize, Deserializer, Serialize, Serializer};

use crate::error::MoneyError;
use crate::iso;

/// The highest decimal scale the amount representation supports.
pub(crate) const MAX_SCALE: u32 = 28;

/// A currency: an alpha code, a numeric code, a display name and a default
/// number of fraction digits.
///
/// Equality and hashing consider the alpha code only, so a custom currency
/// compares equal to a catalogued one with the same code.
#[derive(Debug, Clone, Eq)]
pub struct Currency {
    code: Cow<'static, str>,
    numeric_code: i32,
    name: Cow<'static, str>,
    fraction_digits: u32,
}

impl Currency {
    /// Creates a custom (non-catalogued) currency, e.g. for crypto or
    /// loyalty points. Negative numeric codes are allowed as sentinels.
    pub fn new(
        code: impl Into<String>,
        numeric_code: i32,
        name: impl Into<String>,
        fraction_digits: u32,
    ) -> Result<Self, MoneyError> {
        let code = code.into();
        if code.is_empty() {
            return Err(MoneyError::InvalidArgument(
                "currency code must not be empty".to_string(),
            ));
        }
        if fraction_digits > MAX_SCALE {
            return Err(MoneyError::InvalidArgument(format!(
                "fraction digits must be at most {MAX_SCALE}, got {fraction_digits}"
            )));
        }
        Ok(Currency {
            code: Cow::Owned(code),
            numeric_code,
            name: Cow::Owned(name.into()),
            fraction_digits,
        })
    }

    /// Resolves an alpha code against the catalogue.
    pub fn of(code: &str) -> Result<Currency, MoneyError> {
        catalogue()
            .by_code
            .get(code)
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(code.to_string()))
    }

    /// Resolves an ISO numeric code against the catalogue.
    pub fn of_numeric(numeric_code: i32) -> Result<Currency, MoneyError> {
        catalogue()
            .by_numeric
            .get(&numeric_code)
            .and_then(|code| catalogue().by_code.get(code))
            .cloned()
            .ok_or_else(|| MoneyError::UnknownCurrency(numeric_code.to_string()))
    }

    /// Resolves an ISO-3166-1 alpha-2 country code to its single
    /// circulating currency.
    ///
    /// Fails when the country is unknown, has no currency, or has more
    /// than one.
    pub fn of_country(country_code: &str) -> Result<Currency, MoneyError> {
        match catalogue().by_country.get(country_code) {
            Some(codes) if codes.len() == 1 => Currency::of(codes[0]),
            _ => Err(MoneyError::UnknownCurrency(country_code.to_string())),
        }
    }

    /// All catalogued currencies, keyed by alpha code.
    pub fn available() -> BTreeMap<&'static str, Currency> {
        catalogue()
            .by_code
            .iter()
            .map(|(code, currency)| (*code, currency.clone()))
            .collect()
    }

    /// The alpha code, e.g. `"USD"`.
    pub fn code(&self) -> &str {
        &self.code
    }

    /// The ISO numeric code, e.g. `840`; negative for custom sentinels.
    pub fn numeric_code(&self) -> i32 {
        self.numeric_code
    }

    /// The display name, e.g. `"US Dollar"`.
    pub fn name(&self) -> &str {
        &self.name
    }

    /// The default number of fraction digits, e.g. `2` for USD, `0` for JPY.
    pub fn fraction_digits(&self) -> u32 {
        self.fraction_digits
    }

    /// Returns true when this currency matches the selector: an alpha
    /// code, a numeric code, or another currency.
    pub fn is(&self, selector: impl Into<CurrencySelector>) -> bool {
        match selector.into() {
            CurrencySelector::Code(code) => self.code == code,
            CurrencySelector::Numeric(numeric) => self.numeric_code == numeric,
            CurrencySelector::Currency(other) => self.code == other.code,
        }
    }
}

impl PartialEq for Currency {
    fn eq(&self, other: &Self) -> bool {
        self.code == other.code
    }
}

impl Hash for Currency {
    fn hash<H: Hasher>(&self, state: &mut H) {
        self.code.hash(state);
    }
}

impl fmt::Display for Currency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.code)
    }
}

impl Serialize for Currency {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.code)
    }
}

impl<'de> Deserialize<'de> for Currency {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let code = String::deserialize(deserializer)?;
        Currency::of(&code).map_err(D::Error::custom)
    }
}

/// Designates a currency by alpha code, numeric code, or value.
///
/// Used wherever an operation accepts "a currency" loosely: predicates,
/// bag lookups, conversion targets.
#[derive(Debug, Clone)]
pub enum CurrencySelector {
    Code(String),
    Numeric(i32),
    Currency(Currency),
}

impl CurrencySelector {
    /// Resolves the selector to a concrete currency, consulting the
    /// catalogue for codes.
    pub fn resolve(self) -> Result<Currency, MoneyError> {
        match self {
            CurrencySelector::Code(code) => Currency::of(&code),
            CurrencySelector::Numeric(numeric) => Currency::of_numeric(numeric),
            CurrencySelector::Currency(currency) => Ok(currency),
        }
    }
}

impl From<&str> for CurrencySelector {
    fn from(code: &str) -> Self {
        CurrencySelector::Code(code.to_string())
    }
}

impl From<String> for CurrencySelector {
    fn from(code: String) -> Self {
        CurrencySelector::Code(code)
    }
}

impl From<i32> for CurrencySelector {
    fn from(numeric: i32) -> Self {
        CurrencySelector::Numeric(numeric)
    }
}

impl From<&Currency> for CurrencySelector {
    fn from(currency: &Currency) -> Self {
        CurrencySelector::Currency(currency.clone())
    }
}

impl From<Currency> for CurrencySelector {
    fn from(currency: Currency) -> Self {
        CurrencySelector::Currency(currency)
    }
}

struct Catalogue {
    by_code: HashMap<&'static str, Currency>,
    by_numeric: HashMap<i32, &'static str>,
    by_country: HashMap<&'static str, Vec<&'static str>>,
}

static CATALOGUE: OnceLock<Catalogue> = OnceLock::new();

fn catalogue() -> &'static Catalogue {
    CATALOGUE.get_or_init(|| {
        let mut by_code = HashMap::with_capacity(iso::CURRENCIES.len());
        let mut by_numeric = HashMap::with_capacity(iso::CURRENCIES.len());
        for &(code, numeric_code, name, fraction_digits) in iso::CURRENCIES {
            by_code.insert(
                code,
                Currency {
                    code: Cow::Borrowed(code),
                    numeric_code,
                    name: Cow::Borrowed(name),
                    fraction_digits,
                },
            );
            by_numeric.insert(numeric_code, code);
        }
        let mut by_country: HashMap<&'static str, Vec<&'static str>> = HashMap::new();
        for &(country, code) in iso::COUNTRY_CURRENCIES {
            by_country.entry(country).or_default().push(code);
        }
        Catalogue {
            by_code,
            by_numeric,
            by_country,
        }
    })
}
