//! Formatting seams
//!
//! Human-facing rendering is a collaborator concern: [`MoneyFormatter`] is
//! the delegation seam for an external currency-aware formatter, and
//! [`Money::format_to`] offers a small locale-driven rendering with the
//! fraction digits pinned to the amount's scale.

use crate::money::Money;

/// An external formatter receiving the amount as a double and the
/// currency's alpha code.
pub trait MoneyFormatter {
    fn format(&self, amount: f64, currency_code: &str) -> String;
}

/// Number-rendering conventions: separators and where the currency code
/// goes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Locale {
    decimal_separator: char,
    grouping_separator: Option<char>,
    code_first: bool,
}

impl Locale {
    /// `USD 1,234.56`
    pub const EN_US: Locale = Locale {
        decimal_separator: '.',
        grouping_separator: Some(','),
        code_first: true,
    };

    /// `1.234,56 EUR`
    pub const DE_DE: Locale = Locale {
        decimal_separator: ',',
        grouping_separator: Some('.'),
        code_first: false,
    };

    /// `1 234,56 EUR`
    pub const FR_FR: Locale = Locale {
        decimal_separator: ',',
        grouping_separator: Some(' '),
        code_first: false,
    };

    /// A locale with explicit separators; the currency code trails.
    pub fn new(decimal_separator: char, grouping_separator: Option<char>) -> Locale {
        Locale {
            decimal_separator,
            grouping_separator,
            code_first: false,
        }
    }

    /// Moves the currency code in front of the number.
    pub fn with_leading_code(mut self) -> Locale {
        self.code_first = true;
        self
    }
}

impl Money {
    /// Delegates rendering to an external formatter.
    pub fn format_with(&self, formatter: &impl MoneyFormatter) -> String {
        use num_traits::ToPrimitive;
        let amount = self.amount().to_f64().unwrap_or_default();
        formatter.format(amount, self.currency().code())
    }

    /// Renders under `locale` with as many fraction digits as the amount's
    /// scale; with `allow_whole_number`, a zero fraction is dropped
    /// entirely.
    pub fn format_to(&self, locale: Locale, allow_whole_number: bool) -> String {
        let unscaled = self.unscaled_amount();
        let negative = unscaled < 0;
        let scale = self.amount().scale() as usize;

        let digits = unscaled.unsigned_abs().to_string();
        let padded = format!("{digits:0>width$}", width = scale + 1);
        let (int_digits, frac_digits) = padded.split_at(padded.len() - scale);
        let frac_digits = if allow_whole_number && frac_digits.bytes().all(|b| b == b'0') {
            ""
        } else {
            frac_digits
        };

        let mut number = String::new();
        if negative {
            number.push('-');
        }
        match locale.grouping_separator {
            Some(separator) => {
                let len = int_digits.len();
                for (index, digit) in int_digits.chars().enumerate() {
                    if index > 0 && (len - index) % 3 == 0 {
                        number.push(separator);
                    }
                    number.push(digit);
                }
            }
            None => number.push_str(int_digits),
        }
        if !frac_digits.is_empty() {
            number.push(locale.decimal_separator);
            number.push_str(frac_digits);
        }

        if locale.code_first {
            format!("{} {}", self.currency().code(), number)
        } else {
            format!("{} {}", number, self.currency().code())
        }
    }
}
