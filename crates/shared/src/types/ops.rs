//! Currency-checked arithmetic and comparison on `Money`.
//!
//! Fallible operators are named methods returning `MoneyResult` instead of
//! `std::ops` impls: mixing currencies, dividing by zero and decimal overflow
//! are reported, never coerced. Every Money result is re-quantized half up.

use std::cmp::Ordering;

use rust_decimal::Decimal;

use super::money::Money;
use crate::error::{MoneyError, MoneyResult};

/// Right-hand side of a Money operator.
///
/// Integers and decimals convert implicitly. Floats and strings do not: build
/// a `Money` or a `Decimal` from them explicitly.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Operand {
    /// Another amount; must share the currency.
    Money(Money),
    /// A dimensionless number applied to the amount directly.
    Number(Decimal),
}

impl From<Money> for Operand {
    fn from(money: Money) -> Self {
        Self::Money(money)
    }
}

impl From<&Money> for Operand {
    fn from(money: &Money) -> Self {
        Self::Money(*money)
    }
}

impl From<Decimal> for Operand {
    fn from(number: Decimal) -> Self {
        Self::Number(number)
    }
}

macro_rules! int_operand {
    ($($t:ty),*) => {
        $(
            impl From<$t> for Operand {
                fn from(number: $t) -> Self {
                    Self::Number(Decimal::from(number))
                }
            }
        )*
    };
}

int_operand!(i32, i64, u32, u64, usize);

/// Result of a division.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Quotient {
    /// Money divided by a number.
    Money(Money),
    /// Money divided by Money of the same currency.
    Ratio(Decimal),
}

impl Quotient {
    /// The Money result, if the divisor was a number.
    #[must_use]
    pub const fn money(self) -> Option<Money> {
        match self {
            Self::Money(money) => Some(money),
            Self::Ratio(_) => None,
        }
    }

    /// The ratio, if the divisor was Money.
    #[must_use]
    pub const fn ratio(self) -> Option<Decimal> {
        match self {
            Self::Ratio(ratio) => Some(ratio),
            Self::Money(_) => None,
        }
    }
}

impl Money {
    fn ensure_same_currency(&self, other: &Money) -> MoneyResult<()> {
        if self.same_currency(other) {
            Ok(())
        } else {
            Err(MoneyError::incompatible(self.code(), other.code()))
        }
    }

    /// Raw amount of the operand after the currency check.
    fn operand_amount(&self, rhs: Operand) -> MoneyResult<Decimal> {
        match rhs {
            Operand::Money(other) => {
                self.ensure_same_currency(&other)?;
                Ok(other.amount())
            }
            Operand::Number(number) => Ok(number),
        }
    }

    fn nonzero_divisor(&self, rhs: Operand) -> MoneyResult<Decimal> {
        let divisor = self.operand_amount(rhs)?;
        if divisor.is_zero() {
            return Err(MoneyError::DivisionByZero);
        }
        Ok(divisor)
    }

    /// `self + rhs`.
    pub fn try_add(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let rhs = self.operand_amount(rhs.into())?;
        self.amount()
            .checked_add(rhs)
            .ok_or(MoneyError::Overflow)
            .and_then(|sum| self.with_amount(sum))
    }

    /// `self - rhs`.
    pub fn try_sub(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let rhs = self.operand_amount(rhs.into())?;
        self.amount()
            .checked_sub(rhs)
            .ok_or(MoneyError::Overflow)
            .and_then(|difference| self.with_amount(difference))
    }

    /// `minuend - self`, in the currency of `self`.
    pub fn subtract_from(&self, minuend: impl Into<Decimal>) -> MoneyResult<Money> {
        minuend
            .into()
            .checked_sub(self.amount())
            .ok_or(MoneyError::Overflow)
            .and_then(|difference| self.with_amount(difference))
    }

    /// `self * rhs`; the factor must be a number.
    pub fn try_mul(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let factor = match rhs.into() {
            Operand::Money(_) => return Err(MoneyError::CannotMultiplyMoneyByMoney),
            Operand::Number(number) => number,
        };
        self.amount()
            .checked_mul(factor)
            .ok_or(MoneyError::Overflow)
            .and_then(|product| self.with_amount(product))
    }

    /// `self / rhs`: Money for a numeric divisor, a ratio for a Money divisor.
    pub fn try_div(&self, rhs: impl Into<Operand>) -> MoneyResult<Quotient> {
        let rhs = rhs.into();
        let divisor = self.nonzero_divisor(rhs)?;
        let quotient = self
            .amount()
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?;
        Ok(match rhs {
            Operand::Money(_) => Quotient::Ratio(quotient),
            Operand::Number(_) => Quotient::Money(self.with_amount(quotient)?),
        })
    }

    /// Integer part of `self / rhs`, truncated toward zero.
    pub fn try_floor_div(&self, rhs: impl Into<Operand>) -> MoneyResult<Quotient> {
        let rhs = rhs.into();
        let divisor = self.nonzero_divisor(rhs)?;
        let quotient = self
            .amount()
            .checked_div(divisor)
            .ok_or(MoneyError::Overflow)?
            .trunc();
        Ok(match rhs {
            Operand::Money(_) => Quotient::Ratio(quotient),
            Operand::Number(_) => Quotient::Money(self.with_amount(quotient)?),
        })
    }

    /// Remainder of `self / rhs`, carrying the sign of `self`.
    pub fn try_rem(&self, rhs: impl Into<Operand>) -> MoneyResult<Money> {
        let divisor = self.nonzero_divisor(rhs.into())?;
        self.amount()
            .checked_rem(divisor)
            .ok_or(MoneyError::Overflow)
            .and_then(|remainder| self.with_amount(remainder))
    }

    /// Absolute value.
    #[must_use]
    pub fn abs(&self) -> Money {
        self.with_exact_amount(self.amount().abs())
    }

    /// Orders two amounts of the same currency.
    ///
    /// # Errors
    ///
    /// - `TypeMismatch` if `rhs` is a number.
    /// - `IncompatibleCurrency` if the currencies differ.
    pub fn try_cmp(&self, rhs: impl Into<Operand>) -> MoneyResult<Ordering> {
        let other = self.comparable(rhs.into())?;
        Ok(self.amount().cmp(&other.amount()))
    }

    fn comparable(&self, rhs: Operand) -> MoneyResult<Money> {
        match rhs {
            Operand::Money(other) => {
                self.ensure_same_currency(&other)?;
                Ok(other)
            }
            Operand::Number(_) => Err(MoneyError::TypeMismatch(
                "cannot compare Money with non-Money".to_string(),
            )),
        }
    }

    /// `self == rhs`, same currency required.
    pub fn try_eq(&self, rhs: impl Into<Operand>) -> MoneyResult<bool> {
        let other = self.comparable(rhs.into())?;
        Ok(self.amount() == other.amount())
    }

    /// `self < rhs`.
    pub fn try_lt(&self, rhs: impl Into<Operand>) -> MoneyResult<bool> {
        Ok(self.try_cmp(rhs)? == Ordering::Less)
    }

    /// `self < rhs || self == rhs`.
    pub fn try_le(&self, rhs: impl Into<Operand>) -> MoneyResult<bool> {
        let rhs = rhs.into();
        Ok(self.try_lt(rhs)? || self.try_eq(rhs)?)
    }

    /// `self > rhs`.
    pub fn try_gt(&self, rhs: impl Into<Operand>) -> MoneyResult<bool> {
        Ok(self.try_cmp(rhs)? == Ordering::Greater)
    }

    /// `self > rhs || self == rhs`.
    pub fn try_ge(&self, rhs: impl Into<Operand>) -> MoneyResult<bool> {
        let rhs = rhs.into();
        Ok(self.try_gt(rhs)? || self.try_eq(rhs)?)
    }
}

impl std::ops::Neg for Money {
    type Output = Money;

    fn neg(self) -> Money {
        self.with_exact_amount(-self.amount())
    }
}
