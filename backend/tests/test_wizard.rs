//! Tests for the payment recording wizard
//!
//! The flow is Search → Input → Verify → Confirm; every advance validates
//! first and out-of-order actions are errors.

use market_billing_core_rs::{
    BillingError, BillingLine, CalculationMethod, FeeRegistry, FeeTypeInput, Merchant,
    PaymentWizard, WizardError, WizardStep,
};

fn registry() -> (FeeRegistry, String) {
    let mut registry = FeeRegistry::new();
    let water = registry
        .add_fee_type(FeeTypeInput::new(
            "Water",
            "m³",
            CalculationMethod::Fixed { unit_price: 10_000 },
        ))
        .unwrap();
    (registry, water.id().to_string())
}

fn merchant() -> Merchant {
    Merchant::new("M-001", "Ba Lan", "A-12", 80_000)
}

#[test]
fn test_happy_path_matches_aggregator() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();
    assert_eq!(wizard.step(), WizardStep::Search);

    wizard.select_merchant(merchant()).unwrap();
    assert_eq!(wizard.step(), WizardStep::Input);

    wizard.add_line(BillingLine::fee_usage(&water, 3)).unwrap();
    wizard.add_line(BillingLine::stored(20_000)).unwrap();

    let breakdown = wizard.review(&registry).unwrap().clone();
    assert_eq!(wizard.step(), WizardStep::Verify);
    assert_eq!(breakdown.total_due, 50_000);
    // Provisional payment equals total due: 80_000 debt - 50_000
    assert_eq!(breakdown.remaining_debt, 30_000);

    let record = wizard.confirm().unwrap();
    assert_eq!(wizard.step(), WizardStep::Confirm);
    assert_eq!(record.merchant_id, "M-001");
    assert_eq!(record.total_due, 50_000);
    assert_eq!(record.payment_amount, 50_000);
    assert_eq!(record.remaining_debt, 30_000);
}

#[test]
fn test_partial_payment_adjustment() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();
    wizard.select_merchant(merchant()).unwrap();
    wizard.add_line(BillingLine::fee_usage(&water, 3)).unwrap();
    wizard.review(&registry).unwrap();

    wizard.set_payment_amount(10_000).unwrap();
    let record = wizard.confirm().unwrap();

    assert_eq!(record.total_due, 30_000);
    assert_eq!(record.payment_amount, 10_000);
    assert_eq!(record.remaining_debt, 70_000);
}

#[test]
fn test_review_with_no_lines_blocks_advance() {
    let (registry, _) = registry();
    let mut wizard = PaymentWizard::new();
    wizard.select_merchant(merchant()).unwrap();

    let err = wizard.review(&registry).unwrap_err();
    assert_eq!(err, WizardError::Billing(BillingError::NoLinesSelected));
    // Still on the Input screen
    assert_eq!(wizard.step(), WizardStep::Input);
}

#[test]
fn test_actions_rejected_on_wrong_step() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();

    // Everything but select_merchant is invalid on the Search screen
    assert_eq!(
        wizard.add_line(BillingLine::fee_usage(&water, 1)),
        Err(WizardError::InvalidStep {
            expected: WizardStep::Input,
            found: WizardStep::Search,
        })
    );
    assert!(wizard.confirm().is_err());
    assert!(wizard.set_payment_amount(100).is_err());

    wizard.select_merchant(merchant()).unwrap();
    assert_eq!(
        wizard.select_merchant(merchant()),
        Err(WizardError::InvalidStep {
            expected: WizardStep::Search,
            found: WizardStep::Input,
        })
    );
}

#[test]
fn test_negative_payment_rejected_and_figures_stand() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();
    wizard.select_merchant(merchant()).unwrap();
    wizard.add_line(BillingLine::fee_usage(&water, 3)).unwrap();
    wizard.review(&registry).unwrap();

    let err = wizard.set_payment_amount(-5).unwrap_err();
    assert_eq!(err, WizardError::Billing(BillingError::NegativePayment(-5)));

    let record = wizard.confirm().unwrap();
    assert_eq!(record.payment_amount, 30_000);
    assert_eq!(record.remaining_debt, 50_000);
}

#[test]
fn test_back_walks_the_flow_in_reverse() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();

    assert_eq!(
        wizard.back(),
        Err(WizardError::NoPreviousStep(WizardStep::Search))
    );

    wizard.select_merchant(merchant()).unwrap();
    wizard.add_line(BillingLine::fee_usage(&water, 3)).unwrap();
    wizard.review(&registry).unwrap();

    // Verify → Input discards the computed totals
    wizard.back().unwrap();
    assert_eq!(wizard.step(), WizardStep::Input);
    assert!(wizard.breakdown().is_none());
    assert_eq!(wizard.lines().len(), 1);

    // Input → Search discards merchant and selection
    wizard.back().unwrap();
    assert_eq!(wizard.step(), WizardStep::Search);
    assert!(wizard.merchant().is_none());
    assert!(wizard.lines().is_empty());
}

#[test]
fn test_confirm_is_terminal() {
    let (registry, water) = registry();
    let mut wizard = PaymentWizard::new();
    wizard.select_merchant(merchant()).unwrap();
    wizard.add_line(BillingLine::fee_usage(&water, 1)).unwrap();
    wizard.review(&registry).unwrap();
    wizard.confirm().unwrap();

    assert!(wizard.confirm().is_err());
    assert_eq!(
        wizard.back(),
        Err(WizardError::NoPreviousStep(WizardStep::Confirm))
    );
}
