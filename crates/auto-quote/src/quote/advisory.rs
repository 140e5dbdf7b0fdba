use serde::Serialize;

use super::domain::{active_discount_keys, QuoteInputs};
use super::error::QuoteSection;

const MIN_DRIVING_AGE: i32 = 16;
const MAX_PLAUSIBLE_AGE: i32 = 100;
const MAX_VEHICLE_SCORE: i32 = 5;

/// Implausible-but-accepted input worth surfacing to whoever built the snapshot.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct InputAdvisory {
    pub section: QuoteSection,
    pub field: &'static str,
    pub detail: String,
}

impl InputAdvisory {
    fn new(section: QuoteSection, field: &'static str, detail: impl Into<String>) -> Self {
        Self {
            section,
            field,
            detail: detail.into(),
        }
    }

    pub fn path(&self) -> String {
        format!("{}.{}", self.section, self.field)
    }
}

/// Flag values the scorers will clamp or that look like unset form fields.
/// Advisories never block a quote.
pub fn review_inputs(inputs: &QuoteInputs) -> Vec<InputAdvisory> {
    let mut advisories = Vec::new();

    let driver = &inputs.driver;
    for (field, value) in [
        ("at_fault_major", driver.at_fault_major),
        ("at_fault_minor", driver.at_fault_minor),
        ("no_fault", driver.no_fault),
        ("hit_n_runs", driver.hit_n_runs),
        ("duis", driver.duis),
        ("years_clean", driver.years_clean),
        ("violations", driver.violations),
    ] {
        if value < 0 {
            advisories.push(InputAdvisory::new(
                QuoteSection::Driver,
                field,
                format!("negative count {value}"),
            ));
        }
    }

    if !(MIN_DRIVING_AGE..=MAX_PLAUSIBLE_AGE).contains(&driver.age) {
        advisories.push(InputAdvisory::new(
            QuoteSection::Driver,
            "age",
            format!(
                "age {} outside {MIN_DRIVING_AGE}..={MAX_PLAUSIBLE_AGE}",
                driver.age
            ),
        ));
    } else if driver.years_clean > driver.age - MIN_DRIVING_AGE {
        advisories.push(InputAdvisory::new(
            QuoteSection::Driver,
            "years_clean",
            format!(
                "{} clean years exceeds {} possible driving years",
                driver.years_clean,
                driver.age - MIN_DRIVING_AGE
            ),
        ));
    }

    let vehicle = &inputs.vehicle;
    for (field, value) in [
        ("brand_type_score", vehicle.brand_type_score),
        ("repair_complexity_score", vehicle.repair_complexity_score),
        ("parts_score", vehicle.parts_score),
        ("theft_score", vehicle.theft_score),
        ("anti_theft_feature_score", vehicle.anti_theft_feature_score),
        ("crash_test_rating", vehicle.crash_test_rating),
    ] {
        if !(0..=MAX_VEHICLE_SCORE).contains(&value) {
            advisories.push(InputAdvisory::new(
                QuoteSection::Vehicle,
                field,
                format!("score {value} outside 0..={MAX_VEHICLE_SCORE}"),
            ));
        }
    }
    for (field, value) in [
        ("vehicle_age", vehicle.vehicle_age),
        ("active_safety_features", vehicle.active_safety_features),
        ("passive_safety_features", vehicle.passive_safety_features),
    ] {
        if value < 0 {
            advisories.push(InputAdvisory::new(
                QuoteSection::Vehicle,
                field,
                format!("negative value {value}"),
            ));
        }
    }

    let location = &inputs.location;
    for (field, value) in [
        ("crime_level_factor", location.crime_level_factor),
        ("anti_theft_adjustment", location.anti_theft_adjustment),
    ] {
        if value < 0 {
            advisories.push(InputAdvisory::new(
                QuoteSection::Location,
                field,
                format!("negative value {value}"),
            ));
        }
    }

    if inputs.policy.add_ons.is_empty() {
        advisories.push(InputAdvisory::new(
            QuoteSection::Policy,
            "add_ons",
            "no add-ons selected",
        ));
    }

    if active_discount_keys(&inputs.discounts).is_empty() {
        advisories.push(InputAdvisory::new(
            QuoteSection::Discounts,
            "flags",
            "no discounts selected",
        ));
    }

    advisories
}
