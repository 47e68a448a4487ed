//! Fee schema registry
//!
//! Owns the mapping from fee type id to [`FeeType`] and enforces schema
//! validity on every mutation. The registry is the only place fee type ids
//! are minted.
//!
//! # Critical Invariants
//!
//! 1. **Validity**: every stored fee type has passed [`FeeTypeInput::validate`]
//! 2. **Id stability**: an id never changes after creation; updates replace
//!    the other fields in place
//! 3. **Display order**: `list` returns fee types in insertion order
//!    (display order matters for the presentation layer, not for calculation)
//!
//! # Concurrency
//!
//! All operations are synchronous in-memory mutations. When embedded in a
//! server, writers must be serialized per registry instance (single-writer
//! lock or actor queue); readers may work from a cloned snapshot.

pub mod schedule;

use crate::models::fee_type::{FeeType, FeeTypeInput, ValidationError};
use std::collections::HashMap;
use thiserror::Error;
use uuid::Uuid;

pub use schedule::FeeScheduleDef;

/// Errors that can occur during registry operations
#[derive(Debug, Error, PartialEq)]
pub enum RegistryError {
    /// The supplied fee type definition is malformed
    #[error(transparent)]
    Validation(#[from] ValidationError),

    /// The operation references an unknown fee type id
    #[error("Fee type not found: {0}")]
    NotFound(String),
}

/// In-memory registry of configured fee types
///
/// # Example
/// ```
/// use market_billing_core_rs::{CalculationMethod, FeeRegistry, FeeTypeInput};
///
/// let mut registry = FeeRegistry::new();
/// let created = registry
///     .add_fee_type(FeeTypeInput::new(
///         "Electricity",
///         "kWh",
///         CalculationMethod::Fixed { unit_price: 3500 },
///     ))
///     .unwrap();
///
/// assert_eq!(registry.len(), 1);
/// assert!(registry.get(created.id()).is_some());
/// ```
#[derive(Debug, Clone, Default)]
pub struct FeeRegistry {
    /// All fee types, indexed by id
    fee_types: HashMap<String, FeeType>,

    /// Fee type ids in insertion order (display order)
    order: Vec<String>,
}

impl FeeRegistry {
    /// Create an empty registry
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a new fee type
    ///
    /// Validates the input, mints a fresh uuid and inserts the fee type at
    /// the end of the display order.
    ///
    /// # Returns
    /// The created fee type (including its assigned id).
    pub fn add_fee_type(&mut self, input: FeeTypeInput) -> Result<FeeType, RegistryError> {
        let id = Uuid::new_v4().to_string();
        let fee_type = FeeType::new(id.clone(), input)?;
        self.order.push(id.clone());
        self.fee_types.insert(id, fee_type.clone());
        Ok(fee_type)
    }

    /// Replace the fields of an existing fee type
    ///
    /// Same validation as [`add_fee_type`](Self::add_fee_type). The id and
    /// the display position are preserved.
    ///
    /// # Errors
    /// `NotFound` if `id` is absent; `Validation` if the input is malformed.
    pub fn update_fee_type(
        &mut self,
        id: &str,
        input: FeeTypeInput,
    ) -> Result<FeeType, RegistryError> {
        if !self.fee_types.contains_key(id) {
            return Err(RegistryError::NotFound(id.to_string()));
        }
        let fee_type = FeeType::new(id.to_string(), input)?;
        self.fee_types.insert(id.to_string(), fee_type.clone());
        Ok(fee_type)
    }

    /// Remove a fee type
    ///
    /// Deletion is deliberately not idempotent: removing an id that is
    /// already gone fails with `NotFound` instead of succeeding silently, so
    /// a stale screen acting on an outdated list gets a visible error.
    ///
    /// # Returns
    /// The removed fee type.
    pub fn remove_fee_type(&mut self, id: &str) -> Result<FeeType, RegistryError> {
        let removed = self
            .fee_types
            .remove(id)
            .ok_or_else(|| RegistryError::NotFound(id.to_string()))?;
        self.order.retain(|existing| existing != id);
        Ok(removed)
    }

    /// Get a fee type by id
    pub fn get(&self, id: &str) -> Option<&FeeType> {
        self.fee_types.get(id)
    }

    /// All fee types in insertion order
    pub fn list(&self) -> Vec<&FeeType> {
        self.order
            .iter()
            .filter_map(|id| self.fee_types.get(id))
            .collect()
    }

    /// Number of configured fee types
    pub fn len(&self) -> usize {
        self.fee_types.len()
    }

    /// True if no fee types are configured
    pub fn is_empty(&self) -> bool {
        self.fee_types.is_empty()
    }

    /// Load a seed schedule into the registry
    ///
    /// Validates every entry before inserting any, so a schedule with one
    /// bad entry leaves the registry untouched.
    ///
    /// # Returns
    /// The number of fee types added.
    pub fn load_schedule(&mut self, def: FeeScheduleDef) -> Result<usize, RegistryError> {
        for input in &def.fee_types {
            input.validate()?;
        }
        let count = def.fee_types.len();
        for input in def.fee_types {
            self.add_fee_type(input)?;
        }
        Ok(count)
    }
}
