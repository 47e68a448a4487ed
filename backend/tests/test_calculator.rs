//! Tests for the fee calculator
//!
//! The progressive vectors pin down graduated billing semantics: each band
//! bills its own units at its own price (band "0–50" bills 50 units, band
//! "51–100" the next 50, and so on).
//!
//! CRITICAL: All money values are i64 (minor currency units)

use market_billing_core_rs::{
    compute_amount, CalculationError, CalculationMethod, FeeType, FeeTypeInput, Tier, TIER_CEILING,
};

fn fee(name: &str, method: CalculationMethod) -> FeeType {
    FeeType::new(
        format!("fee-{}", name.to_lowercase()),
        FeeTypeInput::new(name, "kWh", method),
    )
    .unwrap()
}

/// The reference table from the dashboard's electricity configuration
fn progressive_fee() -> FeeType {
    fee(
        "Electricity",
        CalculationMethod::Progressive {
            rates: vec![
                Tier::new(0, 50, 2000),
                Tier::new(51, 100, 2500),
                Tier::new(101, 200, 3000),
                Tier::new(201, TIER_CEILING, 3500),
            ],
        },
    )
}

#[test]
fn test_fixed_is_quantity_times_price() {
    let ft = fee("Water", CalculationMethod::Fixed { unit_price: 10_000 });
    assert_eq!(compute_amount(&ft, 0).unwrap(), 0);
    assert_eq!(compute_amount(&ft, 1).unwrap(), 10_000);
    assert_eq!(compute_amount(&ft, 37).unwrap(), 370_000);
}

#[test]
fn test_area_is_area_times_price() {
    let ft = fee("Rent", CalculationMethod::Area { area_price: 150_000 });
    assert_eq!(compute_amount(&ft, 0).unwrap(), 0);
    assert_eq!(compute_amount(&ft, 12).unwrap(), 1_800_000);
}

#[test]
fn test_progressive_reference_vectors() {
    let ft = progressive_fee();
    assert_eq!(compute_amount(&ft, 0).unwrap(), 0);
    assert_eq!(compute_amount(&ft, 50).unwrap(), 100_000);
    assert_eq!(compute_amount(&ft, 100).unwrap(), 225_000);
    assert_eq!(compute_amount(&ft, 150).unwrap(), 375_000);
    assert_eq!(compute_amount(&ft, 250).unwrap(), 700_000);
}

#[test]
fn test_progressive_single_unit_into_second_band() {
    let ft = progressive_fee();
    // 51st unit is the first one billed at 2500
    assert_eq!(compute_amount(&ft, 51).unwrap(), 100_000 + 2500);
}

#[test]
fn test_progressive_deep_into_sentinel_band() {
    let ft = progressive_fee();
    // 1000 units: 50@2000 + 50@2500 + 100@3000 + 800@3500
    assert_eq!(
        compute_amount(&ft, 1000).unwrap(),
        100_000 + 125_000 + 300_000 + 800 * 3500
    );
}

#[test]
fn test_negative_quantity_rejected_for_every_method() {
    let fixed = fee("Water", CalculationMethod::Fixed { unit_price: 10_000 });
    let area = fee("Rent", CalculationMethod::Area { area_price: 150_000 });
    let progressive = progressive_fee();

    for ft in [&fixed, &area, &progressive] {
        assert_eq!(
            compute_amount(ft, -1),
            Err(CalculationError::NegativeQuantity(-1))
        );
    }
}

#[test]
fn test_overflow_is_an_error_not_a_wrap() {
    let ft = fee("Water", CalculationMethod::Fixed {
        unit_price: i64::MAX,
    });
    assert_eq!(compute_amount(&ft, 2), Err(CalculationError::AmountOverflow));
}
