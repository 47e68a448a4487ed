//! Billing line model
//!
//! One selectable line on a payment: either a metered usage of a configured
//! fee type (amount computed by the calculator) or an invoice amount already
//! stored by the excluded invoice subsystem.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use serde::{Deserialize, Serialize};

/// A single line item selected for payment
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum BillingLine {
    /// Metered usage of a configured fee type
    FeeUsage {
        /// Id of the fee type in the registry
        fee_type_id: String,

        /// Consumed units (or area, for area-priced fee types)
        quantity: i64,
    },

    /// Precomputed amount carried over from a stored invoice
    Stored {
        /// Invoice amount (i64 minor units, non-negative)
        amount: i64,
    },
}

impl BillingLine {
    /// Convenience constructor for a metered usage line
    pub fn fee_usage(fee_type_id: impl Into<String>, quantity: i64) -> Self {
        BillingLine::FeeUsage {
            fee_type_id: fee_type_id.into(),
            quantity,
        }
    }

    /// Convenience constructor for a stored invoice line
    pub fn stored(amount: i64) -> Self {
        BillingLine::Stored { amount }
    }
}
