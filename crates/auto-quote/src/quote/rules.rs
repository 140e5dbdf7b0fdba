use super::domain::{DriverFactors, LocationFactors, VehicleFactors};
use super::rating::{DriverCoefficients, LocationCoefficients, VehicleCoefficients};
use super::VehicleScores;

/// Vehicle risk weight together with the sub-scores it was derived from.
#[derive(Debug, Clone, Copy, PartialEq)]
pub(crate) struct VehicleAssessment {
    pub risk: f64,
    pub scores: VehicleScores,
}

pub(crate) fn accident_points(driver: &DriverFactors, coefficients: &DriverCoefficients) -> f64 {
    f64::from(driver.at_fault_major) * coefficients.at_fault_major_points
        + f64::from(driver.at_fault_minor) * coefficients.at_fault_minor_points
        + f64::from(driver.no_fault) * coefficients.no_fault_points
        + f64::from(driver.hit_n_runs) * coefficients.hit_and_run_points
        + f64::from(driver.duis) * coefficients.dui_points
}

pub(crate) fn violation_points(driver: &DriverFactors, coefficients: &DriverCoefficients) -> f64 {
    f64::from(driver.violations) * coefficients.violation_points_per_count
        + coefficients.violation_base_points
}

fn age_surcharge(age: i32, coefficients: &DriverCoefficients) -> f64 {
    if age < coefficients.young_driver_age {
        coefficients.young_driver_surcharge
    } else if age >= coefficients.senior_driver_age {
        coefficients.senior_driver_surcharge
    } else {
        0.0
    }
}

pub(crate) fn driver_risk(driver: &DriverFactors, coefficients: &DriverCoefficients) -> f64 {
    let accidents = coefficients.accident_weight * accident_points(driver, coefficients);
    let violations = coefficients.violation_weight * violation_points(driver, coefficients);
    let clean_credit = f64::from(driver.years_clean) * coefficients.years_clean_credit;

    (accidents + violations + age_surcharge(driver.age, coefficients) - clean_credit).max(0.0)
}

pub(crate) fn vehicle_risk(
    vehicle: &VehicleFactors,
    coefficients: &VehicleCoefficients,
) -> VehicleAssessment {
    let repair_score = (f64::from(vehicle.brand_type_score) * coefficients.brand_type_weight
        + f64::from(vehicle.repair_complexity_score) * coefficients.repair_complexity_weight
        + f64::from(vehicle.parts_score) * coefficients.parts_weight)
        .max(0.0);

    let theft_score = (f64::from(vehicle.theft_score) * coefficients.theft_weight
        - f64::from(vehicle.anti_theft_feature_score) * coefficients.anti_theft_credit)
        .max(0.0);

    let safety_score = (f64::from(vehicle.crash_test_rating) * coefficients.crash_test_weight
        + f64::from(vehicle.active_safety_features) * coefficients.active_safety_weight
        + f64::from(vehicle.passive_safety_features) * coefficients.passive_safety_weight)
        .max(0.0);

    let combined =
        ((repair_score + theft_score - safety_score) / coefficients.score_divisor).max(0.0);

    // Only the years beyond the threshold are surcharged.
    let surcharged_years = vehicle
        .vehicle_age
        .saturating_sub(coefficients.age_threshold_years)
        .max(0);
    let age_surcharge = f64::from(surcharged_years) * coefficients.age_surcharge_per_year;

    VehicleAssessment {
        risk: combined + age_surcharge,
        scores: VehicleScores {
            repair_score,
            theft_score,
            safety_score,
        },
    }
}

pub(crate) fn location_risk(location: &LocationFactors, coefficients: &LocationCoefficients) -> f64 {
    let crime_score = location
        .crime_level_factor
        .saturating_sub(location.anti_theft_adjustment)
        .max(0);
    f64::from(crime_score) * coefficients.crime_weight
}
