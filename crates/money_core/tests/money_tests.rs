//! Comprehensive unit tests for the fixed-scale money type
//!
//! Tests cover construction through the context gate, arithmetic,
//! quotients, comparisons, aggregation and projections.

use money_core::{Context, Currency, MonetaryValue, Money, MoneyError, RoundingMode};
use rust_decimal_macros::dec;

fn usd() -> Currency {
    Currency::of("USD").unwrap()
}

fn eur() -> Currency {
    Currency::of("EUR").unwrap()
}

mod creation {
    use super::*;

    #[test]
    fn test_of_accepts_strings_ints_floats_and_decimals() {
        assert_eq!(Money::of("12.34", usd()).unwrap().amount(), dec!(12.34));
        assert_eq!(Money::of(12, usd()).unwrap().amount(), dec!(12.00));
        assert_eq!(Money::of(12.34_f64, usd()).unwrap().amount(), dec!(12.34));
        assert_eq!(Money::of(dec!(12.34), usd()).unwrap().amount(), dec!(12.34));
    }

    #[test]
    fn test_of_malformed_string() {
        assert_eq!(
            Money::of("twelve", usd()),
            Err(MoneyError::NumberFormat("twelve".to_string()))
        );
    }

    #[test]
    fn test_of_too_precise_without_rounding() {
        assert_eq!(Money::of("1.005", usd()), Err(MoneyError::RoundingNecessary));
    }

    #[test]
    fn test_of_with_explicit_rounding() {
        let money =
            Money::of_with("1.005", usd(), Context::DEFAULT, RoundingMode::HalfEven).unwrap();
        assert_eq!(money.amount(), dec!(1.00));
    }

    #[test]
    fn test_of_minor_uses_currency_fraction_digits() {
        assert_eq!(Money::of_minor(1234, usd()).unwrap().amount(), dec!(12.34));
        let bhd = Currency::of("BHD").unwrap();
        assert_eq!(
            Money::of_minor(1234, bhd).unwrap().to_string(),
            "BHD 1.234"
        );
    }

    #[test]
    fn test_zero_in_cash_context() {
        let chf = Currency::of("CHF").unwrap();
        let zero = Money::zero_in(chf, Context::cash(5).unwrap());
        assert!(zero.is_zero());
        assert_eq!(zero.to_string(), "CHF 0.00");
    }

    #[test]
    fn test_scale_follows_the_currency() {
        assert_eq!(Money::of(5, Currency::of("JPY").unwrap()).unwrap().to_string(), "JPY 5");
        assert_eq!(Money::of(5, Currency::of("CLF").unwrap()).unwrap().to_string(), "CLF 5.0000");
    }
}

mod arithmetic {
    use super::*;

    #[test]
    fn test_plus_and_minus_are_exact_within_a_context() {
        let a = Money::of("10.10", usd()).unwrap();
        let b = Money::of("0.90", usd()).unwrap();
        assert_eq!(a.plus(&b).unwrap().amount(), dec!(11.00));
        assert_eq!(a.minus(&b).unwrap().amount(), dec!(9.20));
    }

    #[test]
    fn test_plus_number_needs_no_rounding_when_representable() {
        let money = Money::of("10.10", usd()).unwrap();
        assert_eq!(money.plus(5).unwrap().amount(), dec!(15.10));
    }

    #[test]
    fn test_plus_with_rounds_the_reapplied_result() {
        let money = Money::of("10.10", usd()).unwrap();
        let sum = money.plus_with("0.005", RoundingMode::Down).unwrap();
        assert_eq!(sum.amount(), dec!(10.10));
    }

    #[test]
    fn test_cross_currency_addition_is_refused() {
        let error = Money::of(1, usd())
            .unwrap()
            .plus(&Money::of(1, eur()).unwrap())
            .unwrap_err();
        match error {
            MoneyError::MismatchedCurrency { expected, actual } => {
                assert_eq!(expected.code(), "USD");
                assert_eq!(actual.code(), "EUR");
            }
            other => panic!("unexpected error: {other:?}"),
        }
    }

    #[test]
    fn test_cross_context_addition_is_refused() {
        let default = Money::of("1.00", usd()).unwrap();
        let cash = Money::of_with("1.00", usd(), Context::custom_step(2, 5).unwrap(), RoundingMode::Unnecessary)
            .unwrap();
        assert_eq!(
            default.plus(&cash).unwrap_err(),
            MoneyError::MismatchedContext { operation: "plus" }
        );
        assert_eq!(
            default.minus(&cash).unwrap_err(),
            MoneyError::MismatchedContext { operation: "minus" }
        );
    }

    #[test]
    fn test_auto_context_addition_reapplies_the_gate() {
        let a = Money::of_with("1.5", usd(), Context::AUTO, RoundingMode::Unnecessary).unwrap();
        let b = Money::of_with("0.5", usd(), Context::AUTO, RoundingMode::Unnecessary).unwrap();
        let sum = a.plus(&b).unwrap();
        assert_eq!(sum.to_string(), "USD 2");
    }

    #[test]
    fn test_multiplication_and_division_round_through_the_context() {
        let money = Money::of("10.00", usd()).unwrap();
        assert_eq!(
            money.multiplied_by("0.333", RoundingMode::HalfUp).unwrap().amount(),
            dec!(3.33)
        );
        assert_eq!(
            money.divided_by(3, RoundingMode::Floor).unwrap().amount(),
            dec!(3.33)
        );
        assert_eq!(
            money.divided_by(3, RoundingMode::Ceiling).unwrap().amount(),
            dec!(3.34)
        );
    }

    #[test]
    fn test_division_by_a_negative_number() {
        let money = Money::of("10.00", usd()).unwrap();
        let result = money.divided_by(-4, RoundingMode::Unnecessary).unwrap();
        assert_eq!(result.amount(), dec!(-2.50));
    }

    #[test]
    fn test_division_keeps_exact_results_exact() {
        let money = Money::of("10.00", usd()).unwrap();
        let result = money.divided_by(4, RoundingMode::Unnecessary).unwrap();
        assert_eq!(result.amount(), dec!(2.50));
    }
}

mod quotients {
    use super::*;

    #[test]
    fn test_quotient_and_remainder_reassemble() {
        let money = Money::of("123.45", usd()).unwrap();
        let (quotient, remainder) = money.quotient_and_remainder(7).unwrap();
        assert_eq!(quotient.amount(), dec!(17.63));
        assert_eq!(remainder.amount(), dec!(0.04));
        let reassembled = quotient
            .multiplied_by(7, RoundingMode::Unnecessary)
            .unwrap()
            .plus(&remainder)
            .unwrap();
        assert_eq!(reassembled, money);
    }

    #[test]
    fn test_quotient_respects_cash_steps() {
        let chf = Currency::of("CHF").unwrap();
        let money = Money::of_with("1.00", chf, Context::cash(5).unwrap(), RoundingMode::Unnecessary)
            .unwrap();
        let (quotient, remainder) = money.quotient_and_remainder(3).unwrap();
        assert_eq!(quotient.to_string(), "CHF 0.30");
        assert_eq!(remainder.to_string(), "CHF 0.10");
    }

    #[test]
    fn test_quotient_by_zero() {
        let money = Money::of(1, usd()).unwrap();
        assert_eq!(money.quotient(0), Err(MoneyError::DivisionByZero));
    }
}

mod comparison {
    use super::*;
    use std::cmp::Ordering;

    #[test]
    fn test_ordering_of_amounts() {
        let small = Money::of("1.00", usd()).unwrap();
        let large = Money::of("2.00", usd()).unwrap();
        assert_eq!(small.compare_to(&large).unwrap(), Ordering::Less);
        assert!(small.is_less(&large).unwrap());
        assert!(small.is_less_or_equal(&large).unwrap());
        assert!(large.is_greater(&small).unwrap());
        assert!(large.is_greater_or_equal(&small).unwrap());
        assert!(!small.is_equal_to(&large).unwrap());
    }

    #[test]
    fn test_amount_and_currency_equality_never_fails() {
        let a = Money::of("1.00", usd()).unwrap();
        let b = Money::of("1.00", eur()).unwrap();
        assert!(!a.is_amount_and_currency_equal_to(&b));
        assert!(a.is_amount_and_currency_equal_to(&a.clone()));
    }

    #[test]
    fn test_comparison_ignores_context_but_not_currency() {
        let default = Money::of("1.00", usd()).unwrap();
        let wide = Money::of_with("1.0000", usd(), Context::custom(4).unwrap(), RoundingMode::Unnecessary)
            .unwrap();
        assert!(default.is_equal_to(&wide).unwrap());
    }
}

mod aggregation {
    use super::*;

    #[test]
    fn test_total_requires_matching_context() {
        let default = Money::of("1.00", usd()).unwrap();
        let wide = Money::of_with("1.0000", usd(), Context::custom(4).unwrap(), RoundingMode::Unnecessary)
            .unwrap();
        assert!(matches!(
            Money::total(&[default, wide]),
            Err(MoneyError::MismatchedContext { .. })
        ));
    }

    #[test]
    fn test_min_max_of_empty_input() {
        assert!(matches!(
            Money::min_of(&[]),
            Err(MoneyError::InvalidArgument(_))
        ));
        assert!(matches!(
            Money::max_of(&[]),
            Err(MoneyError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_min_max_cross_currency_fails() {
        let monies = [Money::of(1, usd()).unwrap(), Money::of(2, eur()).unwrap()];
        assert!(matches!(
            Money::min_of(&monies),
            Err(MoneyError::MismatchedCurrency { .. })
        ));
    }
}

mod projections {
    use super::*;

    #[test]
    fn test_minor_amount_on_plain_context() {
        let money = Money::of("12.34", usd()).unwrap();
        assert_eq!(money.minor_amount().unwrap(), dec!(1234));
    }

    #[test]
    fn test_minor_amount_on_zero_digit_currency() {
        let money = Money::of(1234, Currency::of("JPY").unwrap()).unwrap();
        assert_eq!(money.minor_amount().unwrap(), dec!(1234));
    }

    #[test]
    fn test_round_trip_through_rational_for_every_context() {
        let contexts = [
            Context::DEFAULT,
            Context::AUTO,
            Context::cash(5).unwrap(),
            Context::custom(6).unwrap(),
        ];
        for context in contexts {
            let money =
                Money::of_with("19.95", Currency::of("CHF").unwrap(), context, RoundingMode::Unnecessary)
                    .unwrap();
            let back = money
                .to_rational()
                .to(context, RoundingMode::Unnecessary)
                .unwrap();
            assert_eq!(back, money, "round trip failed for {context:?}");
        }
    }

    #[test]
    fn test_sign_invariants() {
        let money = Money::of("-3.21", usd()).unwrap();
        assert!(money.abs().sign() >= 0);
        assert_eq!(money.negated().negated(), money);
        assert_eq!(money.is_zero(), money.sign() == 0);
    }
}

mod serialization {
    use super::*;

    #[test]
    fn test_json_shape() {
        let money = Money::of("1.50", usd()).unwrap();
        assert_eq!(
            serde_json::to_string(&money).unwrap(),
            r#"{"amount":"1.50","currency":"USD"}"#
        );
    }

    #[test]
    fn test_json_round_trip_default_context() {
        let money = Money::of("19.99", usd()).unwrap();
        let back: Money = serde_json::from_str(&serde_json::to_string(&money).unwrap()).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn test_json_round_trip_custom_scale() {
        let money = Money::of_with("3.888923", Currency::of("GBP").unwrap(), Context::custom(8).unwrap(), RoundingMode::Unnecessary)
            .unwrap();
        let json = serde_json::to_string(&money).unwrap();
        assert_eq!(json, r#"{"amount":"3.88892300","currency":"GBP"}"#);
        let back: Money = serde_json::from_str(&json).unwrap();
        assert_eq!(back, money);
    }

    #[test]
    fn test_json_unknown_currency_is_rejected() {
        let result: Result<Money, _> = serde_json::from_str(r#"{"amount":"1.00","currency":"ZZZ"}"#);
        assert!(result.is_err());
    }
}
