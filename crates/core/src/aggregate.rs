//! Aggregates over lists of Money.
//!
//! An empty list has no currency to anchor a zero, so every aggregate
//! returns `Ok(None)` for it instead of a zero amount or an error.

use std::cmp::Ordering;

use coinage_shared::{Money, MoneyResult};

/// Sum of `amounts`, folded left to right.
///
/// # Errors
///
/// Returns `IncompatibleCurrency` if the list mixes currencies.
pub fn sum(amounts: &[Money]) -> MoneyResult<Option<Money>> {
    let Some((first, rest)) = amounts.split_first() else {
        return Ok(None);
    };
    rest.iter()
        .try_fold(*first, |total, money| total.try_add(money))
        .map(Some)
}

/// Largest amount; the first one wins a tie.
pub fn max(amounts: &[Money]) -> MoneyResult<Option<Money>> {
    extreme(amounts, Ordering::Greater)
}

/// Smallest amount; the first one wins a tie.
pub fn min(amounts: &[Money]) -> MoneyResult<Option<Money>> {
    extreme(amounts, Ordering::Less)
}

fn extreme(amounts: &[Money], wanted: Ordering) -> MoneyResult<Option<Money>> {
    let Some((first, rest)) = amounts.split_first() else {
        return Ok(None);
    };
    rest.iter()
        .try_fold(*first, |best, money| -> MoneyResult<Money> {
            Ok(if best.try_cmp(money)? == wanted.reverse() {
                *money
            } else {
                best
            })
        })
        .map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;
    use coinage_shared::MoneyError;

    fn usd(amount: &str) -> Money {
        Money::new(amount, "USD").unwrap()
    }

    fn expenses() -> Vec<Money> {
        ["45.67", "123.89", "67.23", "234.56", "89.01"]
            .into_iter()
            .map(usd)
            .collect()
    }

    #[test]
    fn test_sum() {
        assert_eq!(sum(&expenses()).unwrap(), Some(usd("560.36")));
        assert_eq!(sum(&[usd("1.50")]).unwrap(), Some(usd("1.50")));
    }

    #[test]
    fn test_max_and_min() {
        assert_eq!(max(&expenses()).unwrap(), Some(usd("234.56")));
        assert_eq!(min(&expenses()).unwrap(), Some(usd("45.67")));
    }

    #[test]
    fn test_ties_keep_the_first_value() {
        let first = usd("5.00");
        let amounts = [first, usd("1.00"), usd("5.00")];
        assert_eq!(max(&amounts).unwrap(), Some(first));
        assert_eq!(min(&[usd("1"), usd("1.00")]).unwrap(), Some(usd("1")));
    }

    #[test]
    fn test_empty_list_has_no_value() {
        assert_eq!(sum(&[]).unwrap(), None);
        assert_eq!(max(&[]).unwrap(), None);
        assert_eq!(min(&[]).unwrap(), None);
    }

    #[test]
    fn test_mixed_currencies_fail() {
        let mixed = vec![usd("1"), Money::new("2", "EUR").unwrap()];
        assert_eq!(
            sum(&mixed).unwrap_err(),
            MoneyError::incompatible("USD", "EUR")
        );
        assert_eq!(
            max(&mixed).unwrap_err(),
            MoneyError::incompatible("USD", "EUR")
        );
        assert_eq!(
            min(&mixed).unwrap_err(),
            MoneyError::incompatible("USD", "EUR")
        );
    }
}
