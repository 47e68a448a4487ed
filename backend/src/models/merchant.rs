//! Merchant model
//!
//! A merchant (tiểu thương) rents a stall and owes fees. The merchant and
//! stall subsystems are out of scope for this core; callers supply merchant
//! records (from persistence or seed fixtures) wherever billing needs one.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use serde::{Deserialize, Serialize};

/// A merchant record as supplied by the surrounding application
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Merchant {
    /// Unique merchant identifier
    pub id: String,

    /// Display name
    pub name: String,

    /// Identifier of the rented stall
    pub stall_id: String,

    /// Outstanding debt carried into the current payment (i64 minor units)
    pub outstanding_debt: i64,
}

impl Merchant {
    /// Create a merchant record
    pub fn new(
        id: impl Into<String>,
        name: impl Into<String>,
        stall_id: impl Into<String>,
        outstanding_debt: i64,
    ) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            stall_id: stall_id.into(),
            outstanding_debt,
        }
    }
}
