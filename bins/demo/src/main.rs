//! Coinage walkthrough.
//!
//! Prints a tour of money arithmetic, bill splitting, ratio allocation,
//! compound interest, discounts, and expense analysis.
//!
//! Usage: cargo run --bin coinage-demo

use anyhow::{Context, anyhow};
use rust_decimal::Decimal;
use tracing::{info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use coinage_core::{aggregate, allocate, apply_discount, compound_interest, percentage_of};
use coinage_core::{future_value, present_value, split};
use coinage_shared::{AppConfig, CurrencyRegistry, Money, MoneyError, install_registry};

fn main() -> anyhow::Result<()> {
    // Load environment variables from .env file
    dotenvy::dotenv().ok();

    let config = AppConfig::load().context("Failed to load configuration")?;

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| config.demo.log_filter.as_str().into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let registry = CurrencyRegistry::from_config(&config.currencies)?;
    let registry = install_registry(registry)?;
    let code = registry.lookup(&config.demo.currency)?.code();
    let other = registry
        .codes()
        .find(|c| *c != code)
        .ok_or_else(|| anyhow!("the walkthrough needs at least two currencies"))?;
    info!(currency = code, other, "starting walkthrough");

    arithmetic(code, other)?;
    bill_splitting(code)?;
    allocation(code)?;
    time_value(code)?;
    discount(code)?;
    expense_analysis(code)?;

    info!("walkthrough complete");
    Ok(())
}

fn money(amount: &str, code: &str) -> anyhow::Result<Money> {
    Money::new(amount, code).with_context(|| format!("invalid amount {amount} {code}"))
}

fn arithmetic(code: &str, other: &str) -> anyhow::Result<()> {
    println!("=== Money Arithmetic ===");

    let price1 = money("19.95", code)?;
    let price2 = money("5.00", code)?;
    let tax_rate = Decimal::new(8, 2);
    println!("Price 1: {price1}");
    println!("Price 2: {price2}");

    let subtotal = price1.try_add(price2)?;
    println!("Subtotal: {price1} + {price2} = {subtotal}");

    let tax = subtotal.try_mul(tax_rate)?;
    println!("Tax (8%): {subtotal} * {tax_rate} = {tax}");

    let total = subtotal.try_add(tax)?;
    println!("Total: {subtotal} + {tax} = {total}");

    if let Some(unit_price) = total.try_div(3)?.money() {
        println!("Unit price (total / 3): {unit_price}");
    }

    println!("\n=== Comparisons ===");
    let expensive = money("100.00", code)?;
    let cheap = money("5.00", code)?;
    println!("{expensive} > {cheap}: {}", expensive.try_gt(cheap)?);
    println!("{cheap} < {expensive}: {}", cheap.try_lt(expensive)?);

    println!("\n=== Error Handling ===");
    let foreign = money("20.00", other)?;
    match price1.try_add(foreign) {
        Err(err @ MoneyError::IncompatibleCurrency { .. }) => println!("Currency error: {err}"),
        other_result => warn!(?other_result, "mixing currencies did not fail"),
    }
    match price1.try_gt(Decimal::ONE) {
        Err(err) if err.is_type_mismatch() => println!("Type error: {err}"),
        other_result => warn!(?other_result, "comparing with a number did not fail"),
    }
    Ok(())
}

fn bill_splitting(code: &str) -> anyhow::Result<()> {
    println!("\n=== Bill Splitting ===");
    let bill = money("127.83", code)?;
    println!("Total dinner bill: {bill}");

    let shares = split(&bill, 5)?;
    let rendered: Vec<String> = shares.iter().map(ToString::to_string).collect();
    println!("Split 5 ways: {rendered:?}");
    if let Some(check) = aggregate::sum(&shares)? {
        println!("Verification: {check}");
    }
    Ok(())
}

fn allocation(code: &str) -> anyhow::Result<()> {
    println!("\n=== Investment Allocation ===");
    let investment = money("10000.00", code)?;
    println!("Total investment: {investment}");

    let categories = ["Stocks (60%)", "Bonds (25%)", "Cash (15%)"];
    let shares = allocate(&investment, &[60, 25, 15])?;
    for (category, share) in categories.iter().zip(&shares) {
        let percentage = percentage_of(share, &investment)?;
        println!("{category}: {share} ({percentage}%)");
    }
    Ok(())
}

fn time_value(code: &str) -> anyhow::Result<()> {
    let rate = Decimal::new(5, 2);
    let years = 10;
    let percent = rate * Decimal::ONE_HUNDRED;

    println!("\n=== Compound Interest ===");
    let principal = money("1000.00", code)?;
    let interest = compound_interest(&principal, rate, years)?;
    let final_value = future_value(&principal, rate, years)?;
    println!("Principal: {principal}");
    println!("Rate: {percent}% per year");
    println!("Years: {years}");
    println!("Interest earned: {interest}");
    println!("Final value: {final_value}");

    let target = money("1500.00", code)?;
    let pv = present_value(&target, rate, years)?;
    println!("\nPresent value of {target} in {years} years at {percent}%: {pv}");
    Ok(())
}

fn discount(code: &str) -> anyhow::Result<()> {
    println!("\n=== Discount Application ===");
    let original = money("299.99", code)?;
    let result = apply_discount(&original, Decimal::new(20, 2))?;
    println!("Original price: {original}");
    println!("Discount (20%): -{}", result.discount);
    println!("Final price: {}", result.discounted);
    Ok(())
}

fn expense_analysis(code: &str) -> anyhow::Result<()> {
    println!("\n=== Expense Analysis ===");
    let expenses = ["45.67", "123.89", "67.23", "234.56", "89.01"]
        .into_iter()
        .map(|amount| money(amount, code))
        .collect::<anyhow::Result<Vec<_>>>()?;
    let rendered: Vec<String> = expenses.iter().map(ToString::to_string).collect();
    println!("Individual expenses: {rendered:?}");

    let (Some(total), Some(highest), Some(lowest)) = (
        aggregate::sum(&expenses)?,
        aggregate::max(&expenses)?,
        aggregate::min(&expenses)?,
    ) else {
        return Ok(());
    };
    println!("Total expenses: {total}");
    println!("Highest expense: {highest}");
    println!("Lowest expense: {lowest}");

    println!("\nExpense breakdown:");
    for (i, expense) in expenses.iter().enumerate() {
        let percentage = percentage_of(expense, &total)?;
        println!("Expense {}: {expense} ({percentage}%)", i + 1);
    }
    Ok(())
}
