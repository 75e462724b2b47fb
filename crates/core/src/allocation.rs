//! Splitting and ratio allocation that never lose or create a minor unit.
//!
//! Both operations guarantee that the shares sum EXACTLY to the input:
//! - `split` works in integer minor units and hands the leftover units out
//!   one by one, first shares first.
//! - `allocate` truncates every share but the last, and the last share takes
//!   whatever is left.

use rust_decimal::Decimal;
use rust_decimal::prelude::ToPrimitive;
use tracing::debug;

use coinage_shared::{Money, MoneyError, MoneyResult, RoundingMode};

/// Splits `money` into `parts` equal shares, rounding half up.
///
/// # Example
///
/// ```
/// use coinage_core::allocation::split;
/// use coinage_shared::Money;
///
/// let bill = Money::new("127.83", "USD").unwrap();
/// let shares: Vec<String> = split(&bill, 5).unwrap().iter().map(ToString::to_string).collect();
/// assert_eq!(shares, ["$25.57", "$25.57", "$25.57", "$25.56", "$25.56"]);
/// ```
pub fn split(money: &Money, parts: usize) -> MoneyResult<Vec<Money>> {
    split_with(money, parts, RoundingMode::HalfUp)
}

/// Splits `money` into `parts` equal shares.
///
/// `mode` rounds the amount to a whole number of minor units before
/// dividing. A `Money` is always quantized to its currency, so that step is
/// exact and every mode yields the same shares. The first `remainder` shares
/// receive one extra minor unit (one less for a negative amount).
///
/// # Errors
///
/// - `InvalidArgument` if `parts` is zero.
/// - `Overflow` if the amount cannot be expressed in minor units.
pub fn split_with(money: &Money, parts: usize, mode: RoundingMode) -> MoneyResult<Vec<Money>> {
    if parts == 0 {
        return Err(MoneyError::InvalidArgument(
            "cannot split into zero parts".to_string(),
        ));
    }

    let currency = money.currency();
    let unit = currency.minor_unit();
    let count = Decimal::from(parts);

    let units = money
        .amount()
        .checked_mul(currency.minor_units_per_major())
        .ok_or(MoneyError::Overflow)
        .and_then(|units| mode.quantize(units, 0))?;

    let base = units
        .checked_div(count)
        .ok_or(MoneyError::Overflow)?
        .trunc();
    let remainder = units - base * count;

    // |remainder| < parts, so it always fits
    let extra_count = remainder.abs().to_usize().unwrap_or(0);
    let step = if remainder.is_sign_negative() {
        -unit
    } else {
        unit
    };
    let base_share = base * unit;

    let shares = (0..parts)
        .map(|i| {
            let share = if i < extra_count {
                base_share + step
            } else {
                base_share
            };
            Money::from_decimal(share, currency)
        })
        .collect::<MoneyResult<Vec<_>>>()?;

    debug!(
        total = %money,
        parts,
        extra_units = extra_count,
        "split amount"
    );

    Ok(shares)
}

/// Allocates `money` proportionally to `ratios`.
///
/// Every share but the last is `amount * ratio / sum(ratios)` truncated to the
/// currency's minor unit; the last share is the amount left over. Earlier
/// shares are therefore never overpaid.
///
/// # Example
///
/// ```
/// use coinage_core::allocation::allocate;
/// use coinage_shared::Money;
///
/// let investment = Money::new("10000.00", "USD").unwrap();
/// let shares = allocate(&investment, &[60, 25, 15]).unwrap();
/// assert_eq!(shares[0], Money::new("6000.00", "USD").unwrap());
/// assert_eq!(shares[2], Money::new("1500.00", "USD").unwrap());
/// ```
///
/// # Errors
///
/// - `InvalidArgument` if `ratios` is empty, has no positive ratio, or sums
///   to zero.
/// - `Overflow` if an intermediate product does not fit.
pub fn allocate<R>(money: &Money, ratios: &[R]) -> MoneyResult<Vec<Money>>
where
    R: Copy + Into<Decimal>,
{
    let ratios: Vec<Decimal> = ratios.iter().map(|r| (*r).into()).collect();
    let Some((_, leading)) = ratios.split_last() else {
        return Err(MoneyError::InvalidArgument(
            "at least one ratio is required".to_string(),
        ));
    };
    if ratios.iter().all(|r| *r <= Decimal::ZERO) {
        return Err(MoneyError::InvalidArgument(
            "all ratios must be positive".to_string(),
        ));
    }

    let total_ratio = ratios
        .iter()
        .try_fold(Decimal::ZERO, |acc, r| acc.checked_add(*r))
        .ok_or(MoneyError::Overflow)?;
    if total_ratio.is_zero() {
        return Err(MoneyError::InvalidArgument(
            "ratios must not sum to zero".to_string(),
        ));
    }

    let currency = money.currency();
    let mut remaining = money.amount();
    let mut shares = Vec::with_capacity(ratios.len());

    for ratio in leading {
        let exact = money
            .amount()
            .checked_mul(*ratio)
            .and_then(|product| product.checked_div(total_ratio))
            .ok_or(MoneyError::Overflow)?;
        let share = RoundingMode::Down.quantize(exact, currency.decimals())?;
        remaining = remaining.checked_sub(share).ok_or(MoneyError::Overflow)?;
        shares.push(Money::from_decimal(share, currency)?);
    }
    shares.push(Money::from_decimal(remaining, currency)?);

    debug!(
        total = %money,
        ratios = ratios.len(),
        last_share = %remaining,
        "allocated amount by ratios"
    );

    Ok(shares)
}
