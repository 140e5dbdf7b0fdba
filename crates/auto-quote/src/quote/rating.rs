use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::error::RatingConfigError;
use super::weights::{AddOnKey, CoverageType, DiscountKey};

const DEFAULT_BASE_RATE: f64 = 320.0;

/// Rate sheet and scoring coefficients applied by the quote engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RatingConfig {
    pub base_rate: f64,
    #[serde(default)]
    pub minimum_premium: f64,
    #[serde(default = "default_discount_cap")]
    pub max_discount_ratio: f64,
    #[serde(default)]
    pub driver: DriverCoefficients,
    #[serde(default)]
    pub vehicle: VehicleCoefficients,
    #[serde(default)]
    pub location: LocationCoefficients,
    /// Sheet-wide add-on weights, used when a coverage does not price the add-on itself.
    #[serde(default = "default_add_on_weights")]
    pub add_ons: BTreeMap<AddOnKey, f64>,
    pub coverages: BTreeMap<CoverageType, CoverageRates>,
}

fn default_discount_cap() -> f64 {
    1.0
}

fn default_add_on_weights() -> BTreeMap<AddOnKey, f64> {
    AddOnKey::ALL
        .into_iter()
        .map(|key| (key, key.weight()))
        .collect()
}

/// Per-coverage weights: the tier's base weight, its own add-on prices, and
/// the discounts it honors.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CoverageRates {
    pub weight: f64,
    #[serde(default)]
    pub add_ons: BTreeMap<AddOnKey, f64>,
    #[serde(default)]
    pub discounts: BTreeMap<DiscountKey, f64>,
}

impl CoverageRates {
    /// Standard sheet entry for a coverage tier.
    pub fn standard(coverage: CoverageType) -> Self {
        Self {
            weight: coverage.base_weight(),
            add_ons: coverage
                .offered_add_ons()
                .iter()
                .map(|key| (*key, key.weight()))
                .collect(),
            discounts: coverage
                .offered_discounts()
                .iter()
                .map(|key| (*key, key.weight()))
                .collect(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverCoefficients {
    pub at_fault_major_points: f64,
    pub at_fault_minor_points: f64,
    pub no_fault_points: f64,
    pub hit_and_run_points: f64,
    pub dui_points: f64,
    pub accident_weight: f64,
    pub violation_points_per_count: f64,
    pub violation_base_points: f64,
    pub violation_weight: f64,
    pub years_clean_credit: f64,
    /// Drivers younger than this pay the young driver surcharge.
    pub young_driver_age: i32,
    pub young_driver_surcharge: f64,
    /// Drivers at or above this age pay the senior driver surcharge.
    pub senior_driver_age: i32,
    pub senior_driver_surcharge: f64,
}

impl Default for DriverCoefficients {
    fn default() -> Self {
        Self {
            at_fault_major_points: 3.0,
            at_fault_minor_points: 1.5,
            no_fault_points: 0.5,
            hit_and_run_points: 4.0,
            dui_points: 5.0,
            accident_weight: 0.02,
            violation_points_per_count: 0.01,
            violation_base_points: 0.005,
            violation_weight: 0.015,
            years_clean_credit: 0.01,
            young_driver_age: 25,
            young_driver_surcharge: 0.15,
            senior_driver_age: 65,
            senior_driver_surcharge: 0.10,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct VehicleCoefficients {
    pub brand_type_weight: f64,
    pub repair_complexity_weight: f64,
    pub parts_weight: f64,
    pub theft_weight: f64,
    pub anti_theft_credit: f64,
    pub crash_test_weight: f64,
    pub active_safety_weight: f64,
    pub passive_safety_weight: f64,
    /// Divides the combined sub-scores into a risk weight.
    pub score_divisor: f64,
    pub age_threshold_years: i32,
    pub age_surcharge_per_year: f64,
}

impl Default for VehicleCoefficients {
    fn default() -> Self {
        Self {
            brand_type_weight: 1.0,
            repair_complexity_weight: 1.0,
            parts_weight: 1.0,
            theft_weight: 1.0,
            anti_theft_credit: 1.0,
            crash_test_weight: 1.0,
            active_safety_weight: 2.0,
            passive_safety_weight: 1.0,
            score_divisor: 100.0,
            age_threshold_years: 0,
            age_surcharge_per_year: 0.005,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LocationCoefficients {
    pub crime_weight: f64,
}

impl Default for LocationCoefficients {
    fn default() -> Self {
        Self {
            crime_weight: 0.025,
        }
    }
}

impl Default for RatingConfig {
    fn default() -> Self {
        Self {
            base_rate: DEFAULT_BASE_RATE,
            minimum_premium: 0.0,
            max_discount_ratio: default_discount_cap(),
            driver: DriverCoefficients::default(),
            vehicle: VehicleCoefficients::default(),
            location: LocationCoefficients::default(),
            add_ons: default_add_on_weights(),
            coverages: CoverageType::ALL
                .into_iter()
                .map(|coverage| (coverage, CoverageRates::standard(coverage)))
                .collect(),
        }
    }
}

impl RatingConfig {
    pub fn coverage(&self, coverage: CoverageType) -> Option<&CoverageRates> {
        self.coverages.get(&coverage)
    }

    /// Reject sheets that could make a weight negative or the quote undefined.
    pub fn validate(&self) -> Result<(), RatingConfigError> {
        if !(self.base_rate.is_finite() && self.base_rate > 0.0) {
            return Err(RatingConfigError::InvalidBaseRate(self.base_rate));
        }
        if !(0.0..=1.0).contains(&self.max_discount_ratio) {
            return Err(RatingConfigError::InvalidDiscountCap(self.max_discount_ratio));
        }
        if self.coverages.is_empty() {
            return Err(RatingConfigError::EmptyRateSheet);
        }

        non_negative("minimum_premium", self.minimum_premium)?;

        let driver = &self.driver;
        for (field, value) in [
            ("driver.at_fault_major_points", driver.at_fault_major_points),
            ("driver.at_fault_minor_points", driver.at_fault_minor_points),
            ("driver.no_fault_points", driver.no_fault_points),
            ("driver.hit_and_run_points", driver.hit_and_run_points),
            ("driver.dui_points", driver.dui_points),
            ("driver.accident_weight", driver.accident_weight),
            ("driver.violation_points_per_count", driver.violation_points_per_count),
            ("driver.violation_base_points", driver.violation_base_points),
            ("driver.violation_weight", driver.violation_weight),
            ("driver.years_clean_credit", driver.years_clean_credit),
            ("driver.young_driver_surcharge", driver.young_driver_surcharge),
            ("driver.senior_driver_surcharge", driver.senior_driver_surcharge),
        ] {
            non_negative(field, value)?;
        }

        let vehicle = &self.vehicle;
        for (field, value) in [
            ("vehicle.brand_type_weight", vehicle.brand_type_weight),
            ("vehicle.repair_complexity_weight", vehicle.repair_complexity_weight),
            ("vehicle.parts_weight", vehicle.parts_weight),
            ("vehicle.theft_weight", vehicle.theft_weight),
            ("vehicle.anti_theft_credit", vehicle.anti_theft_credit),
            ("vehicle.crash_test_weight", vehicle.crash_test_weight),
            ("vehicle.active_safety_weight", vehicle.active_safety_weight),
            ("vehicle.passive_safety_weight", vehicle.passive_safety_weight),
            ("vehicle.age_surcharge_per_year", vehicle.age_surcharge_per_year),
        ] {
            non_negative(field, value)?;
        }
        if !(vehicle.score_divisor.is_finite() && vehicle.score_divisor > 0.0) {
            return Err(RatingConfigError::InvalidWeight {
                field: "vehicle.score_divisor".to_string(),
                value: vehicle.score_divisor,
            });
        }

        non_negative("location.crime_weight", self.location.crime_weight)?;

        for (key, weight) in &self.add_ons {
            non_negative(&format!("add_ons.{key}"), *weight)?;
        }

        for (coverage, rates) in &self.coverages {
            non_negative(&format!("coverages.{coverage}.weight"), rates.weight)?;
            for (key, weight) in &rates.add_ons {
                non_negative(&format!("coverages.{coverage}.add_ons.{key}"), *weight)?;
            }
            for (key, weight) in &rates.discounts {
                non_negative(&format!("coverages.{coverage}.discounts.{key}"), *weight)?;
            }
        }

        Ok(())
    }
}

fn non_negative(field: &str, value: f64) -> Result<(), RatingConfigError> {
    if value.is_finite() && value >= 0.0 {
        Ok(())
    } else {
        Err(RatingConfigError::InvalidWeight {
            field: field.to_string(),
            value,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn standard_sheet_is_valid_and_covers_every_tier() {
        let config = RatingConfig::default();
        config.validate().expect("standard sheet validates");
        for coverage in CoverageType::ALL {
            assert!(config.coverage(coverage).is_some(), "{coverage} missing");
        }
        assert_eq!(config.base_rate, 320.0);
        for add_on in AddOnKey::ALL {
            assert_eq!(config.add_ons.get(&add_on), Some(&add_on.weight()));
        }
    }

    #[test]
    fn rejects_negative_add_on_weight() {
        let mut config = RatingConfig::default();
        config
            .coverages
            .get_mut(&CoverageType::Liability)
            .expect("liability present")
            .add_ons
            .insert(AddOnKey::GlassCoverage, -0.05);

        match config.validate() {
            Err(RatingConfigError::InvalidWeight { field, .. }) => {
                assert_eq!(field, "coverages.liability.add_ons.glass_coverage");
            }
            other => panic!("expected invalid weight, got {other:?}"),
        }
    }

    #[test]
    fn rejects_discount_cap_above_one() {
        let config = RatingConfig {
            max_discount_ratio: 1.5,
            ..RatingConfig::default()
        };
        assert_eq!(
            config.validate(),
            Err(RatingConfigError::InvalidDiscountCap(1.5))
        );
    }

    #[test]
    fn partial_json_sheet_fills_coefficient_defaults() {
        let raw = r#"{
            "base_rate": 400.0,
            "coverages": {
                "liability": { "weight": 1.1, "add_ons": { "glass_coverage": 0.04 } }
            }
        }"#;

        let config: RatingConfig = serde_json::from_str(raw).expect("sheet parses");

        assert_eq!(config.base_rate, 400.0);
        assert_eq!(config.max_discount_ratio, 1.0);
        assert_eq!(config.driver, DriverCoefficients::default());
        assert_eq!(config.add_ons.len(), AddOnKey::ALL.len());
        let liability = config
            .coverage(CoverageType::Liability)
            .expect("liability present");
        assert!(liability.discounts.is_empty());
        assert!(config.coverage(CoverageType::FullCoverage).is_none());
        config.validate().expect("partial sheet validates");
    }
}
