//! Money and currency types.

pub mod amount;
pub mod currency;
pub mod money;
pub mod ops;

pub use amount::{IntoAmount, RoundingMode};
pub use currency::{Currency, CurrencyRegistry, CurrencyRegistryBuilder};
pub use money::Money;
pub use ops::{Operand, Quotient};
