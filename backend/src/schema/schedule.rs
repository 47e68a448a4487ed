//! Seed fee schedules
//!
//! JSON-definable fee schedules for seeding a registry. The demo data that
//! the dashboard used to hard-code lives outside the core and is injected
//! through this format instead.
//!
//! # Format
//!
//! ```json
//! {
//!   "version": "1.0",
//!   "description": "Ben Thanh market 2026 schedule",
//!   "fee_types": [
//!     { "name": "Electricity", "unit": "kWh", "method": "progressive",
//!       "rates": [
//!         { "from": 0, "to": 50, "price": 2000 },
//!         { "from": 51, "to": 100, "price": 2500 }
//!       ] },
//!     { "name": "Stall rent", "unit": "m²", "method": "area", "area_price": 150000 }
//!   ]
//! }
//! ```

use crate::models::fee_type::FeeTypeInput;
use serde::{Deserialize, Serialize};

/// A complete fee schedule definition
///
/// Deserialized from JSON and loaded via
/// [`FeeRegistry::load_schedule`](crate::FeeRegistry::load_schedule), which
/// runs the same validation as interactive adds.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FeeScheduleDef {
    /// Schema version (currently "1.0")
    pub version: String,

    /// Optional human-readable description
    #[serde(default)]
    pub description: Option<String>,

    /// Fee type definitions, in display order
    pub fee_types: Vec<FeeTypeInput>,
}

impl FeeScheduleDef {
    /// Parse a schedule from JSON
    ///
    /// Only the shape is checked here; semantic validation (prices, tier
    /// contiguity) happens at load time.
    pub fn from_json(json: &str) -> Result<Self, serde_json::Error> {
        serde_json::from_str(json)
    }
}
