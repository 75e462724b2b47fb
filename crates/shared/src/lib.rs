//! Shared money types, errors, and configuration for Coinage.
//!
//! This crate provides the value type every other crate builds on:
//! - `Money` with exact decimal precision, quantized to its currency
//! - The currency registry consulted at construction
//! - Currency-checked arithmetic and comparison
//! - The `MoneyError` taxonomy
//! - Configuration management

pub mod config;
pub mod error;
pub mod types;

pub use config::AppConfig;
pub use error::{MoneyError, MoneyResult};
pub use types::currency::{global as global_registry, install as install_registry};
pub use types::{
    Currency, CurrencyRegistry, IntoAmount, Money, Operand, Quotient, RoundingMode,
};
