//! Money operations for Coinage built on `coinage_shared::Money`.
//!
//! This crate contains pure functions with ZERO I/O dependencies.
//!
//! # Modules
//!
//! - `allocation` - Equal splits and ratio allocation that conserve totals
//! - `financial` - Compound interest, present value, percentages, discounts
//! - `aggregate` - Sum, max, and min over lists of Money

pub mod aggregate;
pub mod allocation;
pub mod financial;

#[cfg(test)]
mod props;

pub use allocation::{allocate, split, split_with};
pub use financial::{
    Discount, apply_discount, compound_interest, future_value, percentage_of, present_value,
};
