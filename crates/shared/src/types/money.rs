//! Money type with decimal precision and currency.
//!
//! CRITICAL: Never use floating-point for money calculations.
//! This type wraps `rust_decimal::Decimal` and is always quantized to the
//! precision of its currency.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use serde::{Deserialize, Serialize};
use tracing::trace;

use super::amount::{IntoAmount, RoundingMode};
use super::currency::{self, Currency, CurrencyRegistry};
use crate::error::{MoneyError, MoneyResult};

/// Represents a monetary amount with currency.
///
/// Invariant: `amount` has exactly `currency.decimals()` fractional digits.
/// Values are immutable; every operation returns a new `Money`.
#[derive(Clone, Copy, Serialize, Deserialize)]
#[serde(try_from = "MoneyRepr", into = "MoneyRepr")]
pub struct Money {
    amount: Decimal,
    currency: &'static Currency,
}

impl Money {
    /// Creates Money in a currency of the global registry, rounding half up.
    ///
    /// ```
    /// use coinage_shared::Money;
    ///
    /// let price = Money::new("19.995", "USD").unwrap();
    /// assert_eq!(price.to_string(), "$20.00");
    /// ```
    pub fn new(amount: impl IntoAmount, code: &str) -> MoneyResult<Self> {
        currency::global().money(amount, code)
    }

    /// Creates Money in a currency of the global registry with an explicit rounding mode.
    pub fn with_rounding(
        amount: impl IntoAmount,
        code: &str,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let currency = currency::global().lookup(code)?;
        Self::quantized(amount.into_amount()?, currency, mode)
    }

    /// Creates Money from a decimal in an already resolved currency.
    ///
    /// # Errors
    ///
    /// Returns `Overflow` if the amount cannot carry the currency's
    /// fractional digits.
    pub fn from_decimal(amount: Decimal, currency: &'static Currency) -> MoneyResult<Self> {
        Self::quantized(amount, currency, RoundingMode::HalfUp)
    }

    /// Creates Money from a count of minor units (e.g. cents).
    #[must_use]
    pub fn from_minor_units(units: i64, currency: &'static Currency) -> Self {
        Self {
            amount: Decimal::new(units, currency.decimals()),
            currency,
        }
    }

    /// Creates a zero amount in the specified currency.
    #[must_use]
    pub fn zero(currency: &'static Currency) -> Self {
        Self::from_minor_units(0, currency)
    }

    pub(crate) fn quantized(
        amount: Decimal,
        currency: &'static Currency,
        mode: RoundingMode,
    ) -> MoneyResult<Self> {
        let rounded = mode.quantize(amount, currency.decimals())?;
        if rounded != amount {
            trace!(%amount, %rounded, currency = currency.code(), "amount quantized");
        }
        Ok(Self {
            amount: rounded,
            currency,
        })
    }

    /// Same currency, new amount.
    pub(crate) fn with_amount(&self, amount: Decimal) -> MoneyResult<Self> {
        Self::from_decimal(amount, self.currency)
    }

    /// Same currency, an amount already at the currency's scale.
    pub(crate) fn with_exact_amount(&self, mut amount: Decimal) -> Self {
        debug_assert_eq!(amount.scale(), self.currency.decimals());
        if amount.is_zero() {
            amount.set_sign_positive(true);
        }
        Self {
            amount,
            currency: self.currency,
        }
    }

    /// The quantized amount.
    #[must_use]
    pub const fn amount(&self) -> Decimal {
        self.amount
    }

    /// The registry record of this amount's currency.
    #[must_use]
    pub const fn currency(&self) -> &'static Currency {
        self.currency
    }

    /// The currency code (e.g. "USD").
    #[must_use]
    pub fn code(&self) -> &'static str {
        self.currency.code()
    }

    /// The amount expressed in minor units (e.g. `19.95 USD` is `1995`).
    pub fn minor_units(&self) -> MoneyResult<i64> {
        self.amount
            .checked_mul(self.currency.minor_units_per_major())
            .and_then(|units| units.trunc().to_i64())
            .ok_or(MoneyError::Overflow)
    }

    /// Returns true if the amount is zero.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.amount.is_zero()
    }

    /// Returns true if the amount is negative.
    #[must_use]
    pub fn is_negative(&self) -> bool {
        self.amount.is_sign_negative() && !self.amount.is_zero()
    }

    /// Returns true if the amount is strictly positive.
    #[must_use]
    pub fn is_positive(&self) -> bool {
        self.amount.is_sign_positive() && !self.amount.is_zero()
    }

    /// Returns true if both values share a currency record.
    ///
    /// Records from different registries only match if code, symbol and
    /// precision all agree.
    #[must_use]
    pub fn same_currency(&self, other: &Self) -> bool {
        std::ptr::eq(self.currency, other.currency) || self.currency == other.currency
    }
}

impl CurrencyRegistry {
    /// Creates Money in a currency of this registry, rounding half up.
    pub fn money(&'static self, amount: impl IntoAmount, code: &str) -> MoneyResult<Money> {
        let currency = self.lookup(code)?;
        Money::from_decimal(amount.into_amount()?, currency)
    }
}

impl PartialEq for Money {
    fn eq(&self, other: &Self) -> bool {
        self.same_currency(other) && self.amount == other.amount
    }
}

impl Eq for Money {}

impl std::hash::Hash for Money {
    fn hash<H: std::hash::Hasher>(&self, state: &mut H) {
        self.code().hash(state);
        self.amount.hash(state);
    }
}

/// Amounts of different currencies are unordered.
impl PartialOrd for Money {
    fn partial_cmp(&self, other: &Self) -> Option<std::cmp::Ordering> {
        if self.same_currency(other) {
            Some(self.amount.cmp(&other.amount))
        } else {
            None
        }
    }
}

impl std::fmt::Display for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}{}", self.currency.symbol(), self.amount)
    }
}

impl std::fmt::Debug for Money {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Money")
            .field("amount", &format_args!("{}", self.amount))
            .field("currency", &self.code())
            .finish()
    }
}

/// Wire form: `{"amount": "19.95", "currency": "USD"}`.
#[derive(Serialize, Deserialize)]
struct MoneyRepr {
    #[serde(with = "rust_decimal::serde::str")]
    amount: Decimal,
    currency: String,
}

impl From<Money> for MoneyRepr {
    fn from(money: Money) -> Self {
        Self {
            amount: money.amount,
            currency: money.code().to_string(),
        }
    }
}

impl TryFrom<MoneyRepr> for Money {
    type Error = MoneyError;

    fn try_from(repr: MoneyRepr) -> Result<Self, Self::Error> {
        Money::new(repr.amount, &repr.currency)
    }
}
