//! Exact decimal inputs and rounding modes.
//!
//! CRITICAL: binary floats never take part in arithmetic. A float is first
//! rendered through its shortest round-trip text form and that text is
//! parsed as a decimal, so `19.995_f64` becomes exactly `19.995`.

use std::str::FromStr;

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Serialize};

use crate::error::{MoneyError, MoneyResult};

/// Rounding applied when an amount is quantized to a currency's precision.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum RoundingMode {
    /// Round half away from zero: 2.5 -> 3, -2.5 -> -3.
    #[default]
    HalfUp,
    /// Truncate toward zero: 2.59 -> 2.5 at one digit.
    Down,
    /// Banker's rounding: 2.5 -> 2, 3.5 -> 4.
    HalfEven,
}

impl RoundingMode {
    /// The matching `rust_decimal` strategy.
    #[must_use]
    pub const fn strategy(self) -> RoundingStrategy {
        match self {
            Self::HalfUp => RoundingStrategy::MidpointAwayFromZero,
            Self::Down => RoundingStrategy::ToZero,
            Self::HalfEven => RoundingStrategy::MidpointNearestEven,
        }
    }

    /// Rounds `value` to exactly `decimals` fractional digits.
    ///
    /// The scale of the result is always `decimals`, so `20` quantized to two
    /// digits displays as `20.00`.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if `value` is too large to carry `decimals`
    /// fractional digits.
    pub fn quantize(self, value: Decimal, decimals: u32) -> MoneyResult<Decimal> {
        let mut rounded = value.round_dp_with_strategy(decimals, self.strategy());
        // rescale stops at the largest scale the mantissa can hold
        rounded.rescale(decimals);
        if rounded.scale() != decimals {
            return Err(MoneyError::Overflow);
        }
        if rounded.is_zero() {
            // -0.001 rounds to -0.00; keep zero unsigned
            rounded.set_sign_positive(true);
        }
        Ok(rounded)
    }
}

/// Conversion of a raw numeric input into an exact decimal.
pub trait IntoAmount {
    /// Converts `self` without going through binary floating-point arithmetic.
    fn into_amount(self) -> MoneyResult<Decimal>;
}

fn parse_amount(text: &str) -> MoneyResult<Decimal> {
    let text = text.trim();
    Decimal::from_str(text)
        .or_else(|_| Decimal::from_scientific(text))
        .map_err(|_| MoneyError::InvalidAmount(text.to_string()))
}

impl IntoAmount for Decimal {
    fn into_amount(self) -> MoneyResult<Decimal> {
        Ok(self)
    }
}

impl IntoAmount for &Decimal {
    fn into_amount(self) -> MoneyResult<Decimal> {
        Ok(*self)
    }
}

impl IntoAmount for &str {
    fn into_amount(self) -> MoneyResult<Decimal> {
        parse_amount(self)
    }
}

impl IntoAmount for String {
    fn into_amount(self) -> MoneyResult<Decimal> {
        parse_amount(&self)
    }
}

impl IntoAmount for &String {
    fn into_amount(self) -> MoneyResult<Decimal> {
        parse_amount(self)
    }
}

macro_rules! float_into_amount {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> MoneyResult<Decimal> {
                    if !self.is_finite() {
                        return Err(MoneyError::InvalidAmount(self.to_string()));
                    }
                    parse_amount(&self.to_string())
                }
            }
        )*
    };
}

float_into_amount!(f32, f64);

macro_rules! int_into_amount {
    ($($t:ty),*) => {
        $(
            impl IntoAmount for $t {
                fn into_amount(self) -> MoneyResult<Decimal> {
                    Ok(Decimal::from(self))
                }
            }
        )*
    };
}

int_into_amount!(i8, i16, i32, i64, isize, u8, u16, u32, u64, usize);
