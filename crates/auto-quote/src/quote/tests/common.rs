use crate::quote::domain::{
    DiscountSelection, DriverFactors, LocationFactors, PolicyChoice, QuoteInputs, VehicleFactors,
};
use crate::quote::weights::{AddOnKey, CoverageType};
use std::collections::BTreeSet;

pub(super) const TOLERANCE: f64 = 1e-9;

pub(super) fn assert_close(actual: f64, expected: f64) {
    assert!(
        (actual - expected).abs() < TOLERANCE,
        "expected {expected}, got {actual}"
    );
}

pub(super) fn driver() -> DriverFactors {
    DriverFactors {
        at_fault_major: 1,
        at_fault_minor: 1,
        no_fault: 2,
        hit_n_runs: 0,
        duis: 0,
        age: 23,
        years_clean: 5,
        violations: 1,
    }
}

pub(super) fn clean_driver(years_clean: i32) -> DriverFactors {
    DriverFactors {
        at_fault_major: 0,
        at_fault_minor: 0,
        no_fault: 0,
        hit_n_runs: 0,
        duis: 0,
        age: 45,
        years_clean,
        violations: 0,
    }
}

pub(super) fn vehicle() -> VehicleFactors {
    VehicleFactors {
        brand_type_score: 3,
        repair_complexity_score: 2,
        parts_score: 4,
        vehicle_age: 15,
        theft_score: 5,
        anti_theft_feature_score: 2,
        crash_test_rating: 4,
        active_safety_features: 2,
        passive_safety_features: 3,
    }
}

pub(super) fn location() -> LocationFactors {
    LocationFactors {
        crime_level_factor: 4,
        anti_theft_adjustment: 2,
    }
}

pub(super) fn policy() -> PolicyChoice {
    PolicyChoice::new(
        CoverageType::FullCoverage,
        [AddOnKey::RoadsideAssistance, AddOnKey::RentalReimbursement],
    )
}

pub(super) fn discounts() -> DiscountSelection {
    DiscountSelection {
        multi_policy: true,
        safe_driver: true,
        low_mileage: false,
        anti_theft: true,
    }
}

pub(super) fn inputs() -> QuoteInputs {
    QuoteInputs::new(driver(), vehicle(), location(), policy(), discounts())
}

/// Discount flags from the low four bits, in field order.
pub(super) fn selection_from_mask(mask: u8) -> DiscountSelection {
    DiscountSelection {
        multi_policy: mask & 0b0001 != 0,
        safe_driver: mask & 0b0010 != 0,
        low_mileage: mask & 0b0100 != 0,
        anti_theft: mask & 0b1000 != 0,
    }
}

/// Add-on subset from the low four bits over `AddOnKey::ALL`.
pub(super) fn add_ons_from_mask(mask: u8) -> BTreeSet<AddOnKey> {
    AddOnKey::ALL
        .into_iter()
        .enumerate()
        .filter(|(index, _)| mask & (1 << index) != 0)
        .map(|(_, key)| key)
        .collect()
}
