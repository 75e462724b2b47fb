//! Time value of money, percentages, and discounts.
//!
//! Intermediate products keep full decimal precision; only the final
//! Money result is rounded to the currency.

use rust_decimal::{Decimal, MathematicalOps};
use serde::Serialize;

use coinage_shared::{Money, MoneyError, MoneyResult, RoundingMode};

/// Result of [`apply_discount`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Discount {
    /// Price after the discount.
    pub discounted: Money,
    /// Amount taken off.
    pub discount: Money,
}

/// `(1 + rate)^periods`
fn growth_factor(rate: Decimal, periods: i64) -> MoneyResult<Decimal> {
    Decimal::ONE
        .checked_add(rate)
        .and_then(|base| base.checked_powi(periods))
        .ok_or(MoneyError::Overflow)
}

/// Interest earned on `money` compounded once per period.
///
/// Returns `money * ((1 + rate)^periods - 1)`; zero when `periods <= 0`.
pub fn compound_interest(money: &Money, rate: Decimal, periods: i64) -> MoneyResult<Money> {
    if periods <= 0 {
        return Ok(Money::zero(money.currency()));
    }
    let factor = growth_factor(rate, periods)?;
    let grown = money
        .amount()
        .checked_mul(factor)
        .ok_or(MoneyError::Overflow)?;
    let interest = grown
        .checked_sub(money.amount())
        .ok_or(MoneyError::Overflow)?;
    Money::from_decimal(interest, money.currency())
}

/// Principal plus compound interest: `money * (1 + rate)^periods`.
///
/// Returns `money` unchanged when `periods <= 0`.
pub fn future_value(money: &Money, rate: Decimal, periods: i64) -> MoneyResult<Money> {
    if periods <= 0 {
        return Ok(*money);
    }
    let factor = growth_factor(rate, periods)?;
    money
        .amount()
        .checked_mul(factor)
        .ok_or(MoneyError::Overflow)
        .and_then(|grown| Money::from_decimal(grown, money.currency()))
}

/// Today's value of `money` received after `periods`: `money / (1 + rate)^periods`.
///
/// Returns `money` unchanged when `periods <= 0`.
pub fn present_value(money: &Money, rate: Decimal, periods: i64) -> MoneyResult<Money> {
    if periods <= 0 {
        return Ok(*money);
    }
    let factor = growth_factor(rate, periods)?;
    if factor.is_zero() {
        return Err(MoneyError::DivisionByZero);
    }
    money
        .amount()
        .checked_div(factor)
        .ok_or(MoneyError::Overflow)
        .and_then(|discounted| Money::from_decimal(discounted, money.currency()))
}

/// What percentage `money` is of `total`, to two decimal places.
///
/// Rounds with banker's rounding. A zero `total` yields `0`.
///
/// # Errors
///
/// Returns `IncompatibleCurrency` if the currencies differ.
pub fn percentage_of(money: &Money, total: &Money) -> MoneyResult<Decimal> {
    if !money.same_currency(total) {
        return Err(MoneyError::incompatible(money.code(), total.code()));
    }
    if total.is_zero() {
        return Ok(Decimal::ZERO);
    }
    money
        .amount()
        .checked_div(total.amount())
        .and_then(|ratio| ratio.checked_mul(Decimal::ONE_HUNDRED))
        .ok_or(MoneyError::Overflow)
        .and_then(|percent| RoundingMode::HalfEven.quantize(percent, 2))
}

/// Takes `rate` (e.g. `0.20` for 20%) off `money`.
///
/// The discount is rounded first and the discounted price is derived from
/// it, so `discounted + discount == money` always holds.
pub fn apply_discount(money: &Money, rate: Decimal) -> MoneyResult<Discount> {
    let discount = money.try_mul(rate)?;
    let discounted = money.try_sub(discount)?;
    Ok(Discount {
        discounted,
        discount,
    })
}
