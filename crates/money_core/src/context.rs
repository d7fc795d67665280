//! Monetary contexts: scale and cash-step rules
//!
//! A context decides how an exact amount becomes a fixed-scale decimal for
//! a given currency: at which scale, in which cash increments, and - via
//! the caller-supplied [`RoundingMode`] - how remainders are resolved. The
//! closed set of variants is `Default`, `Cash`, `Custom` and `Auto`.

use num_bigint::BigInt;
use num_integer::Integer;
use num_traits::{One, Zero};
use rust_decimal::Decimal;

use crate::currency::{Currency, MAX_SCALE};
use crate::error::MoneyError;
use crate::rounding::{decimal_from_unscaled, pow10, round_to_scale, RoundingMode};

/// How amounts are scaled and stepped for a currency.
///
/// Equality is structural: `Context::cash(5) == Context::cash(5)`, and
/// `Context::DEFAULT` never equals a custom context that happens to pick
/// the same scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct Context {
    kind: ContextKind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
enum ContextKind {
    Default,
    Cash { step: u32 },
    Custom { scale: u32, step: u32 },
    Auto,
}

impl Context {
    /// Scale = the currency's default fraction digits, step = 1.
    pub const DEFAULT: Context = Context {
        kind: ContextKind::Default,
    };

    /// No fixed scale: trailing zeros are stripped and only
    /// [`RoundingMode::Unnecessary`] is accepted.
    pub const AUTO: Context = Context {
        kind: ContextKind::Auto,
    };

    /// Scale = the currency's default fraction digits, amounts in `step`
    /// minor-unit increments (e.g. step 5 for CHF cash: 0.00, 0.05, 0.10).
    pub fn cash(step: u32) -> Result<Context, MoneyError> {
        validate_step(step)?;
        Ok(Context {
            kind: ContextKind::Cash { step },
        })
    }

    /// An explicit scale with step 1.
    pub fn custom(scale: u32) -> Result<Context, MoneyError> {
        Context::custom_step(scale, 1)
    }

    /// An explicit scale and minor-unit step.
    pub fn custom_step(scale: u32, step: u32) -> Result<Context, MoneyError> {
        if scale > MAX_SCALE {
            return Err(MoneyError::InvalidArgument(format!(
                "scale must be at most {MAX_SCALE}, got {scale}"
            )));
        }
        validate_step(step)?;
        Ok(Context {
            kind: ContextKind::Custom { scale, step },
        })
    }

    /// The minor-unit step; 1 for every context without cash rounding.
    pub fn step(&self) -> u32 {
        match self.kind {
            ContextKind::Cash { step } | ContextKind::Custom { step, .. } => step,
            ContextKind::Default | ContextKind::Auto => 1,
        }
    }

    /// Whether all amounts produced by this context share one scale.
    pub fn has_fixed_scale(&self) -> bool {
        !matches!(self.kind, ContextKind::Auto)
    }

    /// The scale this context prescribes for `currency`, or `None` for the
    /// auto context.
    pub fn scale_for(&self, currency: &Currency) -> Option<u32> {
        match self.kind {
            ContextKind::Default | ContextKind::Cash { .. } => Some(currency.fraction_digits()),
            ContextKind::Custom { scale, .. } => Some(scale),
            ContextKind::Auto => None,
        }
    }

    /// Applies the exact fraction `numer / denom` to `currency` under this
    /// context, producing the validated fixed-scale amount.
    pub fn apply_to(
        &self,
        numer: &BigInt,
        denom: &BigInt,
        currency: &Currency,
        mode: RoundingMode,
    ) -> Result<Decimal, MoneyError> {
        match self.kind {
            ContextKind::Default => round_to_scale(numer, denom, currency.fraction_digits(), mode),
            ContextKind::Cash { step } => {
                apply_stepped(numer, denom, currency.fraction_digits(), step, mode)
            }
            ContextKind::Custom { scale, step } => apply_stepped(numer, denom, scale, step, mode),
            ContextKind::Auto => apply_auto(numer, denom, mode),
        }
    }
}

impl Default for Context {
    fn default() -> Self {
        Context::DEFAULT
    }
}

fn validate_step(step: u32) -> Result<(), MoneyError> {
    if step == 0 {
        return Err(MoneyError::InvalidArgument(
            "cash step must be positive".to_string(),
        ));
    }
    let mut rest = step;
    for factor in [2u32, 5] {
        while rest % factor == 0 {
            rest /= factor;
        }
    }
    if rest == 1 {
        Ok(())
    } else {
        Err(MoneyError::InvalidArgument(format!(
            "cash step must factor into 2s and 5s only, got {step}"
        )))
    }
}

/// Rounds `numer / denom / step` to `scale`, then scales back by `step`,
/// so the result lands on a step boundary.
fn apply_stepped(
    numer: &BigInt,
    denom: &BigInt,
    scale: u32,
    step: u32,
    mode: RoundingMode,
) -> Result<Decimal, MoneyError> {
    if step == 1 {
        return round_to_scale(numer, denom, scale, mode);
    }
    let stepped_denom = denom * step;
    let rounded = round_to_scale(numer, &stepped_denom, scale, mode)?;
    let mantissa = rounded
        .mantissa()
        .checked_mul(i128::from(step))
        .ok_or(MoneyError::Overflow)?;
    Decimal::try_from_i128_with_scale(mantissa, scale).map_err(|_| MoneyError::Overflow)
}

/// Exact decimal expansion with trailing zeros stripped; fails when the
/// reduced denominator has prime factors other than 2 and 5.
fn apply_auto(numer: &BigInt, denom: &BigInt, mode: RoundingMode) -> Result<Decimal, MoneyError> {
    if mode != RoundingMode::Unnecessary {
        return Err(MoneyError::InvalidArgument(
            "the auto context only supports RoundingMode::Unnecessary".to_string(),
        ));
    }
    if numer.is_zero() {
        return Ok(Decimal::ZERO);
    }

    let gcd = numer.gcd(denom);
    let reduced_numer = numer / &gcd;
    let mut reduced_denom = denom / &gcd;

    let mut twos = 0u32;
    let two = BigInt::from(2);
    while (&reduced_denom % &two).is_zero() {
        reduced_denom /= &two;
        twos += 1;
    }
    let mut fives = 0u32;
    let five = BigInt::from(5);
    while (&reduced_denom % &five).is_zero() {
        reduced_denom /= &five;
        fives += 1;
    }
    if !reduced_denom.is_one() {
        return Err(MoneyError::RoundingNecessary);
    }

    let scale = twos.max(fives);
    if scale > MAX_SCALE {
        return Err(MoneyError::Overflow);
    }
    // reduced_numer * 10^scale / (2^twos * 5^fives), exact by construction
    let unscaled = reduced_numer * pow10(scale)
        / (num_traits::pow(two, twos as usize) * num_traits::pow(five, fives as usize));
    decimal_from_unscaled(&unscaled, scale)
}
