//! Market Billing Core - Rust Engine
//!
//! Billing core of a traditional-market management system: fee schema
//! registry, fee calculation, and payment aggregation.
//!
//! # Architecture
//!
//! - **models**: Domain types (FeeType, Merchant, BillingLine)
//! - **schema**: Fee type registry and seed schedules
//! - **calculator**: Pure amount computation per pricing strategy
//! - **billing**: Line aggregation and debt settlement
//! - **wizard**: Payment recording flow state machine
//!
//! # Critical Invariants
//!
//! 1. All money values are i64 (minor currency units); no floats in money paths
//! 2. Every stored fee type has passed validation; the registry mints all ids
//! 3. The calculator is pure; all errors surface synchronously as Results

// Module declarations
pub mod billing;
pub mod calculator;
pub mod models;
pub mod schema;
pub mod wizard;

// Re-exports for convenience
pub use billing::{aggregate, settle_debt, total_due, BillingError, PaymentBreakdown};
pub use calculator::{compute_amount, CalculationError};
pub use models::{
    billing_line::BillingLine,
    fee_type::{CalculationMethod, FeeType, FeeTypeInput, Tier, ValidationError, TIER_CEILING},
    merchant::Merchant,
};
pub use schema::{FeeRegistry, FeeScheduleDef, RegistryError};
pub use wizard::{PaymentRecord, PaymentWizard, WizardError, WizardStep};
