//! Fee type model
//!
//! Represents a billable category in the market (electricity, water,
//! sanitation, stall rent). Each fee type has:
//! - A stable unique identifier (assigned by the registry, immutable)
//! - Display name and unit of measure
//! - Exactly one pricing strategy (fixed, area-based, or progressive)
//!
//! The pricing strategy is a tagged union: the strategy-specific price data
//! lives inside the variant, so a fee type can never carry a unit price and a
//! rate table at the same time.
//!
//! CRITICAL: All money values are i64 (minor currency units)

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Sentinel upper bound for the last tier of a progressive rate table.
///
/// Consumption has no natural ceiling, so the last tier conventionally runs
/// to "infinity". The calculator charges any excess above the last tier's
/// upper bound at the last tier's price, so a smaller ceiling is also safe.
pub const TIER_CEILING: i64 = i64::MAX;

/// Errors produced when validating a fee type definition
#[derive(Debug, Error, PartialEq)]
pub enum ValidationError {
    #[error("Fee type name must not be empty")]
    EmptyName,

    #[error("Unit of measure must not be empty")]
    EmptyUnit,

    #[error("Price must be non-negative, got {0}")]
    NegativePrice(i64),

    #[error("Tier {index}: price must be non-negative, got {price}")]
    NegativeTierPrice { index: usize, price: i64 },

    #[error("Progressive rate table must contain at least one tier")]
    EmptyRateTable,

    #[error("Tier {index}: lower bound {from} exceeds upper bound {to}")]
    InvertedTier { index: usize, from: i64, to: i64 },

    #[error("First tier must start at 0, got {0}")]
    FirstTierNotZero(i64),

    #[error("Tier {index}: expected lower bound {expected}, got {found} (tiers must be ascending and contiguous)")]
    NonContiguousTiers {
        index: usize,
        expected: i64,
        found: i64,
    },

    #[error("Tier {index}: previous tier is unbounded, no tier may follow it")]
    TierAfterUnbounded { index: usize },
}

/// A consumption band in a progressive rate table
///
/// Covers the units above the previous tier's `to` up to and including this
/// tier's `to`. The first tier starts at `from = 0` and covers units
/// `1..=to`; each following tier starts at the previous `to + 1`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Tier {
    /// Lower bound of the band (0 for the first tier, prev.to + 1 after)
    pub from: i64,

    /// Upper bound of the band, inclusive ([`TIER_CEILING`] = unbounded)
    pub to: i64,

    /// Price per unit within this band (i64 minor units)
    pub price: i64,
}

impl Tier {
    /// Create a tier covering `from..=to` at `price` per unit
    pub fn new(from: i64, to: i64, price: i64) -> Self {
        Self { from, to, price }
    }
}

/// Pricing strategy for a fee type
///
/// Closed set of three strategies. The strategy-specific price field lives in
/// the variant, giving compile-time exhaustiveness wherever an amount is
/// computed.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "method", rename_all = "snake_case")]
pub enum CalculationMethod {
    /// Flat price per consumed unit (e.g. per kWh)
    Fixed {
        /// Price per unit (i64 minor units)
        unit_price: i64,
    },

    /// Flat price per unit of stall area (e.g. per m²)
    ///
    /// Same arithmetic shape as `Fixed`, but the quantity passed to the
    /// calculator is an area reading, not a consumption reading.
    Area {
        /// Price per unit area (i64 minor units)
        area_price: i64,
    },

    /// Graduated tiered pricing (utility-style)
    ///
    /// Consumption in each band is charged at that band's own rate, never
    /// the marginal band's rate for the whole quantity.
    Progressive {
        /// Ordered, contiguous consumption bands
        rates: Vec<Tier>,
    },
}

impl CalculationMethod {
    /// Validate the strategy's price data
    ///
    /// Checks non-negative prices for all strategies; for `Progressive`,
    /// additionally checks the rate table is non-empty, every band is
    /// well-formed (`from <= to`), the first band starts at 0, and bands are
    /// ascending and contiguous (`from == prev.to + 1`) with no gaps or
    /// overlaps.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            CalculationMethod::Fixed { unit_price } => {
                if *unit_price < 0 {
                    return Err(ValidationError::NegativePrice(*unit_price));
                }
                Ok(())
            }
            CalculationMethod::Area { area_price } => {
                if *area_price < 0 {
                    return Err(ValidationError::NegativePrice(*area_price));
                }
                Ok(())
            }
            CalculationMethod::Progressive { rates } => validate_rate_table(rates),
        }
    }
}

/// Validate a progressive rate table (ordering, contiguity, prices)
fn validate_rate_table(rates: &[Tier]) -> Result<(), ValidationError> {
    if rates.is_empty() {
        return Err(ValidationError::EmptyRateTable);
    }

    for (index, tier) in rates.iter().enumerate() {
        if tier.price < 0 {
            return Err(ValidationError::NegativeTierPrice {
                index,
                price: tier.price,
            });
        }
        if tier.from > tier.to {
            return Err(ValidationError::InvertedTier {
                index,
                from: tier.from,
                to: tier.to,
            });
        }
        if index == 0 {
            if tier.from != 0 {
                return Err(ValidationError::FirstTierNotZero(tier.from));
            }
        } else {
            // A non-final tier ending at the ceiling leaves nothing for the
            // next band to cover; checked_add keeps the validator itself
            // from overflowing on such a table.
            let expected = rates[index - 1]
                .to
                .checked_add(1)
                .ok_or(ValidationError::TierAfterUnbounded { index })?;
            if tier.from != expected {
                return Err(ValidationError::NonContiguousTiers {
                    index,
                    expected,
                    found: tier.from,
                });
            }
        }
    }

    Ok(())
}

/// Un-identified fee type definition, as supplied by a form or seed schedule
///
/// The registry is the only place ids are minted; callers describe the fee
/// type with this input and receive a [`FeeType`] back.
///
/// # Example
/// ```
/// use market_billing_core_rs::{CalculationMethod, FeeTypeInput};
///
/// let input = FeeTypeInput::new(
///     "Electricity",
///     "kWh",
///     CalculationMethod::Fixed { unit_price: 3500 },
/// )
/// .with_description("Metered stall electricity");
///
/// assert!(input.validate().is_ok());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeTypeInput {
    /// Display label (non-empty)
    pub name: String,

    /// Unit of measure, e.g. "kWh", "m²" (non-empty)
    ///
    /// For fractional meter resolutions the collaborator scales readings to
    /// whole subunits and records the resolution here (e.g. "0.1 kWh").
    pub unit: String,

    /// Pricing strategy with its price data
    #[serde(flatten)]
    pub method: CalculationMethod,

    /// Optional free-text description
    #[serde(default)]
    pub description: Option<String>,
}

impl FeeTypeInput {
    /// Create an input with no description
    pub fn new(
        name: impl Into<String>,
        unit: impl Into<String>,
        method: CalculationMethod,
    ) -> Self {
        Self {
            name: name.into(),
            unit: unit.into(),
            method,
            description: None,
        }
    }

    /// Attach a description (builder style)
    pub fn with_description(mut self, description: impl Into<String>) -> Self {
        self.description = Some(description.into());
        self
    }

    /// Validate the input
    ///
    /// Name and unit must be non-empty after trimming; the strategy's price
    /// data must pass [`CalculationMethod::validate`].
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.name.trim().is_empty() {
            return Err(ValidationError::EmptyName);
        }
        if self.unit.trim().is_empty() {
            return Err(ValidationError::EmptyUnit);
        }
        self.method.validate()
    }
}

/// A configured fee type
///
/// Constructed from a validated [`FeeTypeInput`] plus an id. The id is stable
/// and immutable after creation; edits replace every other field.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FeeType {
    /// Unique identifier (stable, immutable after creation)
    id: String,

    /// Display label
    name: String,

    /// Unit of measure
    unit: String,

    /// Pricing strategy
    #[serde(flatten)]
    method: CalculationMethod,

    /// Optional free-text description
    #[serde(default)]
    description: Option<String>,
}

impl FeeType {
    /// Create a fee type from an input, validating it first
    ///
    /// # Arguments
    /// * `id` - Unique identifier (the registry mints uuids; tests may pass
    ///   any non-empty string)
    /// * `input` - Fee type definition
    ///
    /// # Example
    /// ```
    /// use market_billing_core_rs::{CalculationMethod, FeeType, FeeTypeInput};
    ///
    /// let input = FeeTypeInput::new(
    ///     "Stall rent",
    ///     "m²",
    ///     CalculationMethod::Area { area_price: 150_000 },
    /// );
    /// let fee_type = FeeType::new("fee-rent".to_string(), input).unwrap();
    /// assert_eq!(fee_type.name(), "Stall rent");
    /// ```
    pub fn new(id: String, input: FeeTypeInput) -> Result<Self, ValidationError> {
        input.validate()?;
        Ok(Self {
            id,
            name: input.name,
            unit: input.unit,
            method: input.method,
            description: input.description,
        })
    }

    /// Unique identifier
    pub fn id(&self) -> &str {
        &self.id
    }

    /// Display label
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Unit of measure
    pub fn unit(&self) -> &str {
        &self.unit
    }

    /// Pricing strategy
    pub fn method(&self) -> &CalculationMethod {
        &self.method
    }

    /// Optional description
    pub fn description(&self) -> Option<&str> {
        self.description.as_deref()
    }
}
