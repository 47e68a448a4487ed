//! Fee calculator
//!
//! Pure computation of the amount owed for one fee type given a usage
//! quantity. No state, no I/O; independent invocations need no ordering.
//!
//! # Numeric semantics
//!
//! Quantities are whole units of the fee type's unit of measure; amounts are
//! i64 minor currency units. Everything is integer arithmetic with checked
//! overflow, so no rounding happens anywhere in the computation and binary
//! floating point never touches a money value.
//!
//! # Progressive billing
//!
//! Graduated (tiered) billing: the units falling inside each band are
//! charged at that band's own price. A table
//! `[0–50 @2000, 51–100 @2500, 101–200 @3000, 201–∞ @3500]` charges the
//! first 50 units at 2000, the next 50 at 2500, and so on; units above the
//! last band's upper bound are charged at the last band's price rather than
//! silently dropped.

use crate::models::fee_type::{CalculationMethod, FeeType, Tier};
use thiserror::Error;

/// Errors that can occur while computing an amount
#[derive(Debug, Error, PartialEq)]
pub enum CalculationError {
    /// Quantity below zero makes no sense for any strategy
    #[error("Quantity must be non-negative, got {0}")]
    NegativeQuantity(i64),

    /// The computed amount does not fit in i64 minor units
    #[error("Computed amount overflows i64 minor units")]
    AmountOverflow,
}

/// Compute the amount owed for `quantity` units of a fee type
///
/// For `Fixed` and `Area` the amount is `quantity * price`; for
/// `Progressive` it is the graduated sum over the rate table. A quantity of
/// zero yields zero for every strategy.
///
/// # Arguments
/// * `fee_type` - A validated fee type (see [`crate::FeeRegistry`])
/// * `quantity` - Consumed units, or the stall area for area-priced fees
///
/// # Example
/// ```
/// use market_billing_core_rs::{compute_amount, CalculationMethod, FeeType, FeeTypeInput};
///
/// let input = FeeTypeInput::new(
///     "Electricity",
///     "kWh",
///     CalculationMethod::Fixed { unit_price: 3500 },
/// );
/// let fee_type = FeeType::new("fee-elec".to_string(), input).unwrap();
///
/// assert_eq!(compute_amount(&fee_type, 12).unwrap(), 42_000);
/// assert_eq!(compute_amount(&fee_type, 0).unwrap(), 0);
/// ```
pub fn compute_amount(fee_type: &FeeType, quantity: i64) -> Result<i64, CalculationError> {
    if quantity < 0 {
        return Err(CalculationError::NegativeQuantity(quantity));
    }

    match fee_type.method() {
        CalculationMethod::Fixed { unit_price } => charge(quantity, *unit_price),
        CalculationMethod::Area { area_price } => charge(quantity, *area_price),
        CalculationMethod::Progressive { rates } => compute_progressive(rates, quantity),
    }
}

/// Graduated sum over an ordered, contiguous rate table
///
/// Walks the bands keeping a `covered` watermark of units already billed.
/// Each band bills `min(quantity, band.to) - covered` units at its price.
/// Units beyond the last band's upper bound are billed at the last band's
/// price.
fn compute_progressive(rates: &[Tier], quantity: i64) -> Result<i64, CalculationError> {
    let mut covered: i64 = 0;
    let mut total: i64 = 0;

    for tier in rates {
        if quantity <= covered {
            break;
        }
        let upper = quantity.min(tier.to);
        let units = upper - covered;
        if units > 0 {
            total = add(total, charge(units, tier.price)?)?;
            covered = upper;
        }
    }

    // Consumption above the final band's ceiling stays billable at the final
    // band's price; it must never be truncated.
    if let Some(last) = rates.last() {
        if quantity > last.to {
            let excess = quantity - last.to;
            total = add(total, charge(excess, last.price)?)?;
        }
    }

    Ok(total)
}

fn charge(units: i64, price: i64) -> Result<i64, CalculationError> {
    units
        .checked_mul(price)
        .ok_or(CalculationError::AmountOverflow)
}

fn add(a: i64, b: i64) -> Result<i64, CalculationError> {
    a.checked_add(b).ok_or(CalculationError::AmountOverflow)
}
