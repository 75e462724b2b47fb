//! Property-based tests for money operations.
//!
//! - Property 1: Construction Rounding
//! - Property 2: Split Conservation
//! - Property 3: Allocation Conservation
//! - Property 4: Arithmetic Identities
//! - Property 5: Percentages of a Partition

use proptest::prelude::*;
use rust_decimal::Decimal;

use coinage_shared::{Currency, Money, RoundingMode, global_registry};

use super::aggregate;
use super::allocation::{allocate, split};
use super::financial::{compound_interest, percentage_of};

fn usd() -> &'static Currency {
    global_registry().lookup("USD").unwrap()
}

/// Strategy to generate signed USD amounts (-1,000,000.00 to 1,000,000.00).
fn signed_money() -> impl Strategy<Value = Money> {
    (-100_000_000i64..100_000_000i64).prop_map(|cents| Money::from_minor_units(cents, usd()))
}

/// Strategy to generate positive USD amounts (0.01 to 1,000,000.00).
fn positive_money() -> impl Strategy<Value = Money> {
    (1i64..100_000_000i64).prop_map(|cents| Money::from_minor_units(cents, usd()))
}

/// Strategy to generate raw decimals with up to 6 fractional digits.
fn raw_amount() -> impl Strategy<Value = Decimal> {
    (-1_000_000_000_000i64..1_000_000_000_000i64).prop_map(|v| Decimal::new(v, 6))
}

/// Strategy to generate split counts (1 to 100).
fn split_count() -> impl Strategy<Value = usize> {
    1usize..100
}

/// Strategy to generate positive integer ratios.
fn ratios() -> impl Strategy<Value = Vec<u32>> {
    prop::collection::vec(1u32..1000, 1..10)
}

proptest! {
    #![proptest_config(ProptestConfig::with_cases(100))]

    // =========================================================================
    // Property 1: Construction Rounding
    // =========================================================================

    /// Property 1.1: Construction always yields exactly two fractional digits.
    #[test]
    fn prop_construction_quantizes_to_currency(amount in raw_amount()) {
        let money = Money::from_decimal(amount, usd()).unwrap();
        prop_assert_eq!(money.amount().scale(), 2);
        prop_assert_eq!(money.amount(), RoundingMode::HalfUp.quantize(amount, 2).unwrap());
    }

    /// Property 1.2: Rounding moves an amount by at most half a minor unit.
    #[test]
    fn prop_construction_error_is_bounded(amount in raw_amount()) {
        let money = Money::from_decimal(amount, usd()).unwrap();
        let error = (money.amount() - amount).abs();
        prop_assert!(error <= Decimal::new(5, 3), "error {} too large", error);
    }

    /// Property 1.3: Re-constructing a Money value changes nothing.
    #[test]
    fn prop_construction_is_idempotent(money in signed_money()) {
        prop_assert_eq!(Money::from_decimal(money.amount(), usd()).unwrap(), money);
    }

    // =========================================================================
    // Property 2: Split Conservation
    // =========================================================================

    /// Property 2.1: The shares of a split sum exactly to the original.
    #[test]
    fn prop_split_sum_invariant(money in signed_money(), parts in split_count()) {
        let shares = split(&money, parts).unwrap();
        prop_assert_eq!(shares.len(), parts);
        prop_assert_eq!(aggregate::sum(&shares).unwrap(), Some(money));
    }

    /// Property 2.2: Shares differ by at most one minor unit, larger ones first.
    #[test]
    fn prop_split_shares_are_even(money in signed_money(), parts in split_count()) {
        let shares = split(&money, parts).unwrap();
        let first = shares[0].amount().abs();
        let last = shares[parts - 1].amount().abs();
        prop_assert!(first - last <= Decimal::new(1, 2));
        for pair in shares.windows(2) {
            prop_assert!(pair[0].amount().abs() >= pair[1].amount().abs());
        }
    }

    // =========================================================================
    // Property 3: Allocation Conservation
    // =========================================================================

    /// Property 3.1: The shares of an allocation sum exactly to the original.
    #[test]
    fn prop_allocate_sum_invariant(money in signed_money(), ratios in ratios()) {
        let shares = allocate(&money, ratios.as_slice()).unwrap();
        prop_assert_eq!(shares.len(), ratios.len());
        prop_assert_eq!(aggregate::sum(&shares).unwrap(), Some(money));
    }

    /// Property 3.2: Leading shares of a positive amount are never overpaid.
    #[test]
    fn prop_allocate_truncates_leading_shares(money in positive_money(), ratios in ratios()) {
        let shares = allocate(&money, ratios.as_slice()).unwrap();
        let total_ratio: Decimal = ratios.iter().map(|r| Decimal::from(*r)).sum();
        for (share, ratio) in shares.iter().zip(&ratios).take(ratios.len() - 1) {
            let exact = money.amount() * Decimal::from(*ratio) / total_ratio;
            prop_assert!(share.amount() <= exact);
            prop_assert!(share.amount() >= Decimal::ZERO);
        }
    }

    // =========================================================================
    // Property 4: Arithmetic Identities
    // =========================================================================

    /// Property 4.1: `(a + b) - b == a`.
    #[test]
    fn prop_add_sub_identity(a in signed_money(), b in signed_money()) {
        prop_assert_eq!(a.try_add(b).unwrap().try_sub(b).unwrap(), a);
    }

    /// Property 4.2: Negation is its own inverse and preserves the magnitude.
    #[test]
    fn prop_negation(a in signed_money()) {
        prop_assert_eq!(-(-a), a);
        prop_assert_eq!((-a).abs(), a.abs());
    }

    /// Property 4.3: Compound interest over zero periods is zero for any rate.
    #[test]
    fn prop_compound_interest_zero_periods(
        money in signed_money(),
        rate in (0i64..10_000).prop_map(|v| Decimal::new(v, 4)),
    ) {
        prop_assert!(compound_interest(&money, rate, 0).unwrap().is_zero());
    }

    // =========================================================================
    // Property 5: Percentages of a Partition
    // =========================================================================

    /// Property 5.1: Percentages of allocated shares add up to ~100.
    ///
    /// Each percentage is off by at most 0.005, so the total is within
    /// `0.005 * shares` of 100.
    #[test]
    fn prop_percentages_sum_to_hundred(money in positive_money(), ratios in ratios()) {
        let shares = allocate(&money, ratios.as_slice()).unwrap();
        let total: Decimal = shares
            .iter()
            .map(|share| percentage_of(share, &money).unwrap())
            .sum();
        let tolerance = Decimal::new(5, 3) * Decimal::from(shares.len());
        prop_assert!(
            (total - Decimal::ONE_HUNDRED).abs() <= tolerance,
            "percentages sum to {}",
            total
        );
    }
}

#[cfg(test)]
mod unit_tests {
    use super::*;

    /// Specific example: 19.995 rounds half up to 20.00.
    #[test]
    fn test_half_up_example() {
        let money = Money::new("19.995", "USD").unwrap();
        assert_eq!(money.amount(), Decimal::new(2000, 2));
    }

    /// Specific example: the demo's percentage breakdown totals 100.00.
    #[test]
    fn test_expense_breakdown_totals_hundred() {
        let expenses: Vec<Money> = ["45.67", "123.89", "67.23", "234.56", "89.01"]
            .into_iter()
            .map(|a| Money::new(a, "USD").unwrap())
            .collect();
        let total = aggregate::sum(&expenses).unwrap().unwrap();
        let percentages: Decimal = expenses
            .iter()
            .map(|e| percentage_of(e, &total).unwrap())
            .sum();
        assert_eq!(percentages, Decimal::ONE_HUNDRED);
    }
}
