//! Domain models for the market billing core

pub mod billing_line;
pub mod fee_type;
pub mod merchant;

// Re-exports
pub use billing_line::BillingLine;
pub use fee_type::{CalculationMethod, FeeType, FeeTypeInput, Tier, ValidationError, TIER_CEILING};
pub use merchant::Merchant;
