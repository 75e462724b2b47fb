//! Money error types.

use thiserror::Error;

/// Result type alias using `MoneyError`.
pub type MoneyResult<T> = Result<T, MoneyError>;

/// Errors raised by money construction and arithmetic.
///
/// Every variant is a programmer or input error reported at the offending
/// call. Nothing is retried and no partial result is produced.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MoneyError {
    /// Currency code is not in the registry.
    #[error("Invalid currency: {0}")]
    InvalidCurrency(String),

    /// Operation between two amounts of different currencies.
    #[error("Incompatible currencies: {left} and {right}")]
    IncompatibleCurrency {
        /// Currency of the left operand.
        left: String,
        /// Currency of the right operand.
        right: String,
    },

    /// Argument outside the accepted domain (split count, ratios, ...).
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    /// Operand of the wrong kind for the operation.
    #[error("Type mismatch: {0}")]
    TypeMismatch(String),

    /// Money multiplied by Money.
    #[error("Cannot multiply Money by Money")]
    CannotMultiplyMoneyByMoney,

    /// Amount could not be converted to an exact decimal.
    #[error("Invalid amount: {0}")]
    InvalidAmount(String),

    /// Division or remainder by zero.
    #[error("Division by zero")]
    DivisionByZero,

    /// Result does not fit the decimal representation.
    #[error("Arithmetic overflow")]
    Overflow,
}

impl MoneyError {
    /// Builds an `IncompatibleCurrency` error from two currency codes.
    pub fn incompatible(left: impl Into<String>, right: impl Into<String>) -> Self {
        Self::IncompatibleCurrency {
            left: left.into(),
            right: right.into(),
        }
    }

    /// Returns true for errors caused by an operand of the wrong kind.
    #[must_use]
    pub const fn is_type_mismatch(&self) -> bool {
        matches!(self, Self::TypeMismatch(_) | Self::CannotMultiplyMoneyByMoney)
    }

    /// Returns the stable error code for this error.
    #[must_use]
    pub const fn error_code(&self) -> &'static str {
        match self {
            Self::InvalidCurrency(_) => "INVALID_CURRENCY",
            Self::IncompatibleCurrency { .. } => "INCOMPATIBLE_CURRENCY",
            Self::InvalidArgument(_) => "INVALID_ARGUMENT",
            Self::TypeMismatch(_) | Self::CannotMultiplyMoneyByMoney => "TYPE_MISMATCH",
            Self::InvalidAmount(_) => "INVALID_AMOUNT",
            Self::DivisionByZero => "DIVISION_BY_ZERO",
            Self::Overflow => "OVERFLOW",
        }
    }
}
