//! Payment recording wizard
//!
//! The dashboard records a payment in four screens:
//! search merchant → input lines → verify amounts → confirm. Instead of the
//! scattered per-screen flags the old UI kept, the flow is an explicit state
//! machine: every advance validates first, and an action fired from the
//! wrong screen is an error rather than silent weirdness.
//!
//! The wizard owns no money logic of its own; verification delegates to the
//! [`billing`](crate::billing) aggregator.

use crate::billing::{self, BillingError, PaymentBreakdown};
use crate::models::billing_line::BillingLine;
use crate::models::merchant::Merchant;
use crate::schema::FeeRegistry;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Screens of the payment recording flow, in order
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WizardStep {
    /// Pick the merchant to record a payment for
    Search,

    /// Select invoice lines and enter meter readings
    Input,

    /// Review computed totals, optionally adjust the payment amount
    Verify,

    /// Payment confirmed; terminal
    Confirm,
}

/// Errors that can occur while driving the wizard
#[derive(Debug, Error, PartialEq)]
pub enum WizardError {
    #[error("Action not allowed in step {found:?} (expected {expected:?})")]
    InvalidStep {
        expected: WizardStep,
        found: WizardStep,
    },

    #[error("Cannot go back from step {0:?}")]
    NoPreviousStep(WizardStep),

    /// Verification failed; the wizard stays on the Input screen
    #[error(transparent)]
    Billing(#[from] BillingError),
}

/// The confirmed outcome, handed to the payments subsystem to persist
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentRecord {
    /// Merchant the payment was recorded for
    pub merchant_id: String,

    /// Sum of the selected line amounts (i64 minor units)
    pub total_due: i64,

    /// Amount actually paid (i64 minor units, may differ from total_due)
    pub payment_amount: i64,

    /// Merchant debt remaining after the payment (i64 minor units)
    pub remaining_debt: i64,
}

/// State machine for one pass through the payment recording flow
///
/// # Example
/// ```
/// use market_billing_core_rs::{
///     BillingLine, CalculationMethod, FeeRegistry, FeeTypeInput, Merchant,
///     PaymentWizard, WizardStep,
/// };
///
/// let mut registry = FeeRegistry::new();
/// let rent = registry
///     .add_fee_type(FeeTypeInput::new(
///         "Stall rent",
///         "m²",
///         CalculationMethod::Area { area_price: 150_000 },
///     ))
///     .unwrap();
///
/// let mut wizard = PaymentWizard::new();
/// wizard
///     .select_merchant(Merchant::new("M-001", "Ba Lan", "A-12", 200_000))
///     .unwrap();
/// wizard.add_line(BillingLine::fee_usage(rent.id(), 4)).unwrap();
/// wizard.review(&registry).unwrap();
///
/// assert_eq!(wizard.step(), WizardStep::Verify);
/// let record = wizard.confirm().unwrap();
/// assert_eq!(record.total_due, 600_000);
/// assert_eq!(record.remaining_debt, 0);
/// ```
#[derive(Debug, Clone)]
pub struct PaymentWizard {
    /// Current screen
    step: WizardStep,

    /// Merchant selected on the Search screen
    ///
    /// Invariant: `Some` whenever `step` is past Search.
    merchant: Option<Merchant>,

    /// Working line selection (Input screen)
    lines: Vec<BillingLine>,

    /// Payment amount; defaults to the total due at review time
    payment_amount: i64,

    /// Totals computed at review time
    breakdown: Option<PaymentBreakdown>,
}

impl Default for PaymentWizard {
    fn default() -> Self {
        Self::new()
    }
}

impl PaymentWizard {
    /// Start a fresh flow on the Search screen
    pub fn new() -> Self {
        Self {
            step: WizardStep::Search,
            merchant: None,
            lines: Vec::new(),
            payment_amount: 0,
            breakdown: None,
        }
    }

    /// Current screen
    pub fn step(&self) -> WizardStep {
        self.step
    }

    /// Merchant selected so far, if any
    pub fn merchant(&self) -> Option<&Merchant> {
        self.merchant.as_ref()
    }

    /// Working line selection
    pub fn lines(&self) -> &[BillingLine] {
        &self.lines
    }

    /// Totals computed at review time, if the flow reached Verify
    pub fn breakdown(&self) -> Option<&PaymentBreakdown> {
        self.breakdown.as_ref()
    }

    /// Search → Input: pick the merchant to record a payment for
    pub fn select_merchant(&mut self, merchant: Merchant) -> Result<(), WizardError> {
        self.require(WizardStep::Search)?;
        self.merchant = Some(merchant);
        self.step = WizardStep::Input;
        Ok(())
    }

    /// Add a line to the selection (Input screen only)
    pub fn add_line(&mut self, line: BillingLine) -> Result<(), WizardError> {
        self.require(WizardStep::Input)?;
        self.lines.push(line);
        Ok(())
    }

    /// Drop the whole selection (Input screen only)
    pub fn clear_lines(&mut self) -> Result<(), WizardError> {
        self.require(WizardStep::Input)?;
        self.lines.clear();
        Ok(())
    }

    /// Input → Verify: compute totals for the selection
    ///
    /// Runs the billing aggregator against the merchant's outstanding debt
    /// with a provisional payment amount equal to the total due. Any billing
    /// error (zero lines selected, unknown fee type, negative quantity)
    /// keeps the wizard on the Input screen.
    ///
    /// # Panics
    /// Panics if the Search → Input invariant is broken (no merchant while
    /// past Search); this cannot happen through the public API.
    pub fn review(&mut self, registry: &FeeRegistry) -> Result<&PaymentBreakdown, WizardError> {
        self.require(WizardStep::Input)?;
        let merchant = self
            .merchant
            .as_ref()
            .expect("merchant is set before entering the Input step");

        let total = billing::total_due(registry, &self.lines)?;
        let remaining = billing::settle_debt(merchant.outstanding_debt, total)?;

        self.payment_amount = total;
        self.step = WizardStep::Verify;
        Ok(self.breakdown.insert(PaymentBreakdown {
            total_due: total,
            remaining_debt: remaining,
        }))
    }

    /// Adjust the payment amount on the Verify screen (partial payment)
    ///
    /// Re-derives the remaining debt; a negative amount is rejected and the
    /// previous figures stand.
    pub fn set_payment_amount(&mut self, amount: i64) -> Result<(), WizardError> {
        self.require(WizardStep::Verify)?;
        let merchant = self
            .merchant
            .as_ref()
            .expect("merchant is set before entering the Verify step");

        let remaining = billing::settle_debt(merchant.outstanding_debt, amount)?;
        self.payment_amount = amount;
        if let Some(breakdown) = &mut self.breakdown {
            breakdown.remaining_debt = remaining;
        }
        Ok(())
    }

    /// Verify → Confirm: finalize and emit the record to persist
    pub fn confirm(&mut self) -> Result<PaymentRecord, WizardError> {
        self.require(WizardStep::Verify)?;
        let merchant = self
            .merchant
            .as_ref()
            .expect("merchant is set before entering the Verify step");
        let breakdown = self
            .breakdown
            .as_ref()
            .expect("breakdown is computed before entering the Verify step");

        let record = PaymentRecord {
            merchant_id: merchant.id.clone(),
            total_due: breakdown.total_due,
            payment_amount: self.payment_amount,
            remaining_debt: breakdown.remaining_debt,
        };
        self.step = WizardStep::Confirm;
        Ok(record)
    }

    /// Step back one screen
    ///
    /// Verify → Input discards the computed totals; Input → Search discards
    /// the merchant and the selection. Search has nothing before it and
    /// Confirm is terminal.
    pub fn back(&mut self) -> Result<(), WizardError> {
        match self.step {
            WizardStep::Verify => {
                self.breakdown = None;
                self.payment_amount = 0;
                self.step = WizardStep::Input;
                Ok(())
            }
            WizardStep::Input => {
                self.merchant = None;
                self.lines.clear();
                self.step = WizardStep::Search;
                Ok(())
            }
            step => Err(WizardError::NoPreviousStep(step)),
        }
    }

    fn require(&self, expected: WizardStep) -> Result<(), WizardError> {
        if self.step == expected {
            Ok(())
        } else {
            Err(WizardError::InvalidStep {
                expected,
                found: self.step,
            })
        }
    }
}
