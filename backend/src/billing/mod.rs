//! Billing line aggregator
//!
//! Sums the amounts of the lines selected in a payment and settles the
//! payment against the merchant's outstanding debt. Amounts for metered
//! lines come from the [`calculator`](crate::calculator); stored invoice
//! lines carry their amount as-is.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use crate::calculator::{compute_amount, CalculationError};
use crate::models::billing_line::BillingLine;
use crate::schema::{FeeRegistry, RegistryError};
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while aggregating a payment
#[derive(Debug, Error, PartialEq)]
pub enum BillingError {
    /// The payment flow requires at least one selected line
    #[error("No invoice lines selected")]
    NoLinesSelected,

    /// A stored invoice line carried a negative amount
    #[error("Stored invoice amount must be non-negative, got {0}")]
    NegativeStoredAmount(i64),

    /// The caller-supplied payment amount is negative
    #[error("Payment amount must be non-negative, got {0}")]
    NegativePayment(i64),

    /// The merchant's prior debt is negative
    #[error("Prior debt must be non-negative, got {0}")]
    NegativeDebt(i64),

    /// The total does not fit in i64 minor units
    #[error("Total due overflows i64 minor units")]
    TotalOverflow,

    /// A line referenced an unknown fee type
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// A metered line failed to compute
    #[error(transparent)]
    Calculation(#[from] CalculationError),
}

/// Result of aggregating a payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentBreakdown {
    /// Sum of all selected line amounts (i64 minor units)
    pub total_due: i64,

    /// Debt left after the payment, clamped at zero (i64 minor units)
    pub remaining_debt: i64,
}

/// Sum the amounts of the selected lines
///
/// Metered lines are computed against the registry; stored lines contribute
/// their amount unchanged.
///
/// # Errors
/// `NoLinesSelected` for an empty selection (the payment wizard blocks
/// proceeding with zero invoices); `Registry(NotFound)` for an unknown fee
/// type id; calculation errors propagate from [`compute_amount`].
pub fn total_due(registry: &FeeRegistry, lines: &[BillingLine]) -> Result<i64, BillingError> {
    if lines.is_empty() {
        return Err(BillingError::NoLinesSelected);
    }

    let mut total: i64 = 0;
    for line in lines {
        let amount = match line {
            BillingLine::FeeUsage {
                fee_type_id,
                quantity,
            } => {
                let fee_type = registry
                    .get(fee_type_id)
                    .ok_or_else(|| RegistryError::NotFound(fee_type_id.clone()))?;
                compute_amount(fee_type, *quantity)?
            }
            BillingLine::Stored { amount } => {
                if *amount < 0 {
                    return Err(BillingError::NegativeStoredAmount(*amount));
                }
                *amount
            }
        };
        total = total
            .checked_add(amount)
            .ok_or(BillingError::TotalOverflow)?;
    }
    Ok(total)
}

/// Debt remaining after a payment, clamped at zero
///
/// The payment amount is caller-supplied and may differ from the total due
/// (partial payment, or over-payment that clears the debt). The remainder
/// never goes negative.
pub fn settle_debt(prior_debt: i64, payment_amount: i64) -> Result<i64, BillingError> {
    if prior_debt < 0 {
        return Err(BillingError::NegativeDebt(prior_debt));
    }
    if payment_amount < 0 {
        return Err(BillingError::NegativePayment(payment_amount));
    }
    Ok((prior_debt - payment_amount).max(0))
}

/// Aggregate a payment: total the selected lines and settle the debt
///
/// # Example
/// ```
/// use market_billing_core_rs::{
///     aggregate, BillingLine, CalculationMethod, FeeRegistry, FeeTypeInput,
/// };
///
/// let mut registry = FeeRegistry::new();
/// let water = registry
///     .add_fee_type(FeeTypeInput::new(
///         "Water",
///         "m³",
///         CalculationMethod::Fixed { unit_price: 10_000 },
///     ))
///     .unwrap();
///
/// let lines = vec![
///     BillingLine::fee_usage(water.id(), 3),
///     BillingLine::stored(20_000),
/// ];
/// let breakdown = aggregate(&registry, &lines, 80_000, 50_000).unwrap();
///
/// assert_eq!(breakdown.total_due, 50_000);
/// assert_eq!(breakdown.remaining_debt, 30_000);
/// ```
pub fn aggregate(
    registry: &FeeRegistry,
    lines: &[BillingLine],
    prior_debt: i64,
    payment_amount: i64,
) -> Result<PaymentBreakdown, BillingError> {
    let total = total_due(registry, lines)?;
    let remaining = settle_debt(prior_debt, payment_amount)?;
    Ok(PaymentBreakdown {
        total_due: total,
        remaining_debt: remaining,
    })
}
