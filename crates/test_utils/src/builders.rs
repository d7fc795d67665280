//! Test Data Builders
//!
//! Builder patterns for constructing monetary test data with sensible
//! defaults, so tests specify only the fields they care about.

use money_core::{Context, Currency, Money, MoneyBag, MoneyError, RationalMoney, RoundingMode};

/// Builder for fixed-scale monies
pub struct TestMoneyBuilder {
    amount: String,
    currency: Currency,
    context: Context,
    rounding: RoundingMode,
}

impl Default for TestMoneyBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TestMoneyBuilder {
    /// Creates a builder producing `USD 100.00` in the default context.
    pub fn new() -> Self {
        Self {
            amount: "100.00".to_string(),
            currency: Currency::of("USD").expect("USD is catalogued"),
            context: Context::DEFAULT,
            rounding: RoundingMode::Unnecessary,
        }
    }

    /// Sets the amount from its decimal string form.
    pub fn with_amount(mut self, amount: impl Into<String>) -> Self {
        self.amount = amount.into();
        self
    }

    /// Sets the currency by alpha code.
    pub fn with_currency(mut self, code: &str) -> Self {
        self.currency = Currency::of(code).expect("catalogued currency");
        self
    }

    /// Sets the context.
    pub fn with_context(mut self, context: Context) -> Self {
        self.context = context;
        self
    }

    /// Sets the rounding mode used at construction.
    pub fn with_rounding(mut self, rounding: RoundingMode) -> Self {
        self.rounding = rounding;
        self
    }

    /// Builds the money, surfacing construction errors.
    pub fn try_build(self) -> Result<Money, MoneyError> {
        Money::of_with(
            self.amount.as_str(),
            self.currency,
            self.context,
            self.rounding,
        )
    }

    /// Builds the money, panicking on invalid input.
    pub fn build(self) -> Money {
        self.try_build().expect("builder produced an invalid money")
    }
}

/// Builder for multi-currency bags
#[derive(Default)]
pub struct TestBagBuilder {
    bag: MoneyBag,
}

impl TestBagBuilder {
    /// Creates an empty bag builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a fixed-scale amount by code and decimal string.
    pub fn with(mut self, code: &str, amount: &str) -> Self {
        let currency = Currency::of(code).expect("catalogued currency");
        let money = Money::of(amount, currency).expect("valid amount");
        self.bag.add(&money);
        self
    }

    /// Adds an exact fraction by code.
    pub fn with_fraction(mut self, code: &str, numerator: i64, denominator: i64) -> Self {
        let currency = Currency::of(code).expect("catalogued currency");
        let money = RationalMoney::from_fraction(numerator, denominator, currency)
            .expect("nonzero denominator");
        self.bag.add(&money);
        self
    }

    /// Builds the bag.
    pub fn build(self) -> MoneyBag {
        self.bag
    }
}
