//! Allocation of a money across integer ratios
//!
//! Both algorithms conserve the total exactly and keep every part on the
//! context's scale and step grid. `allocate` spreads the rounding loss one
//! step at a time from the front; `allocate_with_remainder` keeps the
//! loss in an explicit trailing remainder entry.

use crate::error::MoneyError;
use crate::money::Money;

impl Money {
    /// Splits this money proportionally to `ratios`, one part per ratio,
    /// so that the parts sum back to this money exactly.
    ///
    /// The remainder left by integer division is distributed one step at a
    /// time into the parts from the front, with the money's own sign.
    pub fn allocate(&self, ratios: &[i64]) -> Result<Vec<Money>, MoneyError> {
        let total = check_ratios(ratios, "allocate")?;
        let step = i128::from(self.context().step());
        let units = self.unscaled_amount() / step;
        let scale = self.amount().scale();

        let mut part_units = Vec::with_capacity(ratios.len());
        for &ratio in ratios {
            let scaled = units
                .checked_mul(i128::from(ratio))
                .ok_or(MoneyError::Overflow)?;
            part_units.push(scaled / total);
        }

        let allocated: i128 = part_units.iter().sum();
        let mut remainder = units - allocated;
        let unit = if remainder >= 0 { 1 } else { -1 };
        let mut index = 0;
        while remainder != 0 {
            part_units[index] += unit;
            remainder -= unit;
            index += 1;
        }

        part_units
            .into_iter()
            .map(|part| self.with_unscaled(part * step, scale))
            .collect()
    }

    /// Splits this money proportionally to `ratios` without touching the
    /// parts' exact shares, returning the undistributable remainder as an
    /// extra final entry.
    ///
    /// Ratios are first reduced by their GCD, so scaling all ratios by a
    /// common factor never changes the result.
    pub fn allocate_with_remainder(&self, ratios: &[i64]) -> Result<Vec<Money>, MoneyError> {
        check_ratios(ratios, "allocateWithRemainder")?;
        let gcd = ratios
            .iter()
            .fold(0i64, |accumulated, &ratio| num_integer::gcd(accumulated, ratio));
        let simplified: Vec<i128> = ratios
            .iter()
            .map(|&ratio| i128::from(ratio / gcd))
            .collect();
        let total: i128 = simplified.iter().sum();

        let step = i128::from(self.context().step());
        let units = self.unscaled_amount() / step;
        let scale = self.amount().scale();

        let remainder_units = units % total;
        let share = (units - remainder_units) / total;

        let mut parts = Vec::with_capacity(simplified.len() + 1);
        for ratio in simplified {
            let part = share.checked_mul(ratio).ok_or(MoneyError::Overflow)?;
            parts.push(self.with_unscaled(part * step, scale)?);
        }
        parts.push(self.with_unscaled(remainder_units * step, scale)?);
        Ok(parts)
    }

    /// Splits this money into `parts` equal shares; equivalent to
    /// `allocate(1, ..., 1)`.
    pub fn split(&self, parts: usize) -> Result<Vec<Money>, MoneyError> {
        if parts < 1 {
            return Err(MoneyError::InvalidArgument(
                "Cannot split() into less than 1 part.".to_string(),
            ));
        }
        self.allocate(&vec![1; parts])
    }

    /// Splits this money into `parts` equal shares plus a trailing
    /// remainder; equivalent to `allocate_with_remainder(1, ..., 1)`.
    pub fn split_with_remainder(&self, parts: usize) -> Result<Vec<Money>, MoneyError> {
        if parts < 1 {
            return Err(MoneyError::InvalidArgument(
                "Cannot splitWithRemainder() into less than 1 part.".to_string(),
            ));
        }
        self.allocate_with_remainder(&vec![1; parts])
    }
}

fn check_ratios(ratios: &[i64], operation: &str) -> Result<i128, MoneyError> {
    if ratios.is_empty() {
        return Err(MoneyError::InvalidArgument(format!(
            "Cannot {operation}() an empty list of ratios."
        )));
    }
    if ratios.iter().any(|&ratio| ratio < 0) {
        return Err(MoneyError::InvalidArgument(format!(
            "Cannot {operation}() negative ratios."
        )));
    }
    let total: i128 = ratios.iter().map(|&ratio| i128::from(ratio)).sum();
    if total == 0 {
        return Err(MoneyError::InvalidArgument(format!(
            "Cannot {operation}() to zero ratios only."
        )));
    }
    Ok(total)
}

#[cfg(test)]
mod tests {
    use crate::context::Context;
    use crate::currency::Currency;
    use crate::error::MoneyError;
    use crate::money::Money;
    use crate::rounding::RoundingMode;

    fn usd(amount: &str) -> Money {
        Money::of(amount, Currency::of("USD").unwrap()).unwrap()
    }

    #[test]
    fn test_allocate_even_and_uneven() {
        let parts = usd("99.99").allocate(&[100, 100]).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["USD 50.00", "USD 49.99"]);
    }

    #[test]
    fn test_allocate_ratio_mix() {
        let parts = usd("100.00").allocate(&[30, 20, 40, 40]).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["USD 23.08", "USD 15.39", "USD 30.77", "USD 30.76"]);
    }

    #[test]
    fn test_allocate_with_remainder() {
        let parts = usd("99.99").allocate_with_remainder(&[100, 100]).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["USD 49.99", "USD 49.99", "USD 0.01"]);
    }

    #[test]
    fn test_split_on_cash_context() {
        let money = Money::of_with(
            100,
            Currency::of("CHF").unwrap(),
            Context::cash(5).unwrap(),
            RoundingMode::Unnecessary,
        )
        .unwrap();
        let parts = money.split(3).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["CHF 33.35", "CHF 33.35", "CHF 33.30"]);
    }

    #[test]
    fn test_error_messages_are_exact() {
        let money = usd("1.00");
        assert_eq!(
            money.allocate(&[]),
            Err(MoneyError::InvalidArgument(
                "Cannot allocate() an empty list of ratios.".to_string()
            ))
        );
        assert_eq!(
            money.allocate(&[1, -2]),
            Err(MoneyError::InvalidArgument(
                "Cannot allocate() negative ratios.".to_string()
            ))
        );
        assert_eq!(
            money.allocate(&[0, 0]),
            Err(MoneyError::InvalidArgument(
                "Cannot allocate() to zero ratios only.".to_string()
            ))
        );
        assert_eq!(
            money.allocate_with_remainder(&[]),
            Err(MoneyError::InvalidArgument(
                "Cannot allocateWithRemainder() an empty list of ratios.".to_string()
            ))
        );
        assert_eq!(
            money.split(0),
            Err(MoneyError::InvalidArgument(
                "Cannot split() into less than 1 part.".to_string()
            ))
        );
        assert_eq!(
            money.split_with_remainder(0),
            Err(MoneyError::InvalidArgument(
                "Cannot splitWithRemainder() into less than 1 part.".to_string()
            ))
        );
    }

    #[test]
    fn test_allocate_negative_amount_conserves_sign() {
        let parts = usd("-99.99").allocate(&[100, 100]).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["USD -50.00", "USD -49.99"]);
        assert_eq!(Money::total(&parts).unwrap(), usd("-99.99"));
    }

    #[test]
    fn test_allocate_with_remainder_is_ratio_scale_invariant() {
        let money = usd("123.45");
        let small = money.allocate_with_remainder(&[2, 3, 5]).unwrap();
        let large = money.allocate_with_remainder(&[20, 30, 50]).unwrap();
        assert_eq!(small, large);
    }

    #[test]
    fn test_zero_ratio_parts_stay_zero_in_remainder_variant() {
        let parts = usd("10.00").allocate_with_remainder(&[0, 1]).unwrap();
        let rendered: Vec<String> = parts.iter().map(ToString::to_string).collect();
        assert_eq!(rendered, ["USD 0.00", "USD 10.00", "USD 0.00"]);
    }
}

#[cfg(test)]
mod proptests {
    use proptest::prelude::*;

    use crate::currency::Currency;
    use crate::money::Money;

    proptest! {
        #[test]
        fn allocation_conserves_the_total(
            minor in -1_000_000_000i64..1_000_000_000i64,
            ratios in proptest::collection::vec(0i64..1_000, 1..12),
        ) {
            prop_assume!(ratios.iter().sum::<i64>() > 0);
            let money = Money::of_minor(minor, Currency::of("USD").unwrap()).unwrap();
            let parts = money.allocate(&ratios).unwrap();
            prop_assert_eq!(parts.len(), ratios.len());
            prop_assert_eq!(Money::total(&parts).unwrap(), money.clone());
            for part in &parts {
                prop_assert_eq!(part.currency(), money.currency());
                prop_assert_eq!(part.context(), money.context());
            }
        }

        #[test]
        fn allocation_with_remainder_conserves_the_total(
            minor in -1_000_000_000i64..1_000_000_000i64,
            ratios in proptest::collection::vec(0i64..1_000, 1..12),
        ) {
            prop_assume!(ratios.iter().sum::<i64>() > 0);
            let money = Money::of_minor(minor, Currency::of("USD").unwrap()).unwrap();
            let parts = money.allocate_with_remainder(&ratios).unwrap();
            prop_assert_eq!(parts.len(), ratios.len() + 1);
            prop_assert_eq!(Money::total(&parts).unwrap(), money);
        }
    }
}
