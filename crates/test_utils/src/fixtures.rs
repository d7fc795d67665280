//! Pre-built Test Fixtures
//!
//! Ready-to-use monetary values for common scenarios. These fixtures are
//! consistent and predictable so tests can focus on behaviour.

use money_core::{Context, Currency, Money, RationalMoney, RoundingMode};

/// Fixture for catalogued currencies
pub struct CurrencyFixtures;

impl CurrencyFixtures {
    pub fn usd() -> Currency {
        Currency::of("USD").expect("USD is catalogued")
    }

    pub fn eur() -> Currency {
        Currency::of("EUR").expect("EUR is catalogued")
    }

    pub fn chf() -> Currency {
        Currency::of("CHF").expect("CHF is catalogued")
    }

    /// A zero-decimal currency
    pub fn jpy() -> Currency {
        Currency::of("JPY").expect("JPY is catalogued")
    }

    /// A three-decimal currency
    pub fn bhd() -> Currency {
        Currency::of("BHD").expect("BHD is catalogued")
    }

    /// A custom, non-catalogued currency with eight fraction digits
    pub fn bitcoin() -> Currency {
        Currency::new("XBT", -1, "Bitcoin", 8).expect("valid custom currency")
    }
}

/// Fixture for Money test data
pub struct MoneyFixtures;

impl MoneyFixtures {
    /// A standard USD amount
    pub fn usd_100() -> Money {
        Money::of(100, CurrencyFixtures::usd()).expect("valid amount")
    }

    /// An amount that does not divide evenly in two
    pub fn usd_99_99() -> Money {
        Money::of("99.99", CurrencyFixtures::usd()).expect("valid amount")
    }

    /// A zero amount
    pub fn usd_zero() -> Money {
        Money::zero(CurrencyFixtures::usd())
    }

    /// A EUR amount for currency-mismatch tests
    pub fn eur_100() -> Money {
        Money::of(100, CurrencyFixtures::eur()).expect("valid amount")
    }

    /// A CHF amount in a five-centime cash context
    pub fn chf_cash_100() -> Money {
        Money::of_with(
            100,
            CurrencyFixtures::chf(),
            Context::cash(5).expect("valid cash step"),
            RoundingMode::Unnecessary,
        )
        .expect("valid amount")
    }

    /// A negative amount for refund scenarios
    pub fn usd_refund() -> Money {
        Money::of("-50.00", CurrencyFixtures::usd()).expect("valid amount")
    }

    /// An exact third of a dollar, representable only as a fraction
    pub fn usd_third() -> RationalMoney {
        RationalMoney::of(1, CurrencyFixtures::usd())
            .expect("valid amount")
            .divided_by(3)
            .expect("nonzero divisor")
    }
}
