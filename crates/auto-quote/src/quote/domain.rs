use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use super::error::{QuoteError, QuoteSection};
use super::weights::{AddOnKey, CoverageType, DiscountKey};

/// Driving history and demographics that drive the driver risk weight.
///
/// Counts are signed so out-of-range values from upstream forms reach the
/// scorers, which clamp them instead of rejecting the quote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DriverFactors {
    pub at_fault_major: i32,
    pub at_fault_minor: i32,
    pub no_fault: i32,
    pub hit_n_runs: i32,
    pub duis: i32,
    pub age: i32,
    pub years_clean: i32,
    pub violations: i32,
}

/// Vehicle characteristics, each score typically on a 0-5 scale.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct VehicleFactors {
    pub brand_type_score: i32,
    pub repair_complexity_score: i32,
    pub parts_score: i32,
    pub vehicle_age: i32,
    pub theft_score: i32,
    pub anti_theft_feature_score: i32,
    pub crash_test_rating: i32,
    pub active_safety_features: i32,
    pub passive_safety_features: i32,
}

/// Garaging location crime exposure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct LocationFactors {
    pub crime_level_factor: i32,
    pub anti_theft_adjustment: i32,
}

/// Selected coverage tier plus add-ons. Duplicate add-ons collapse.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PolicyChoice {
    pub coverage_type: CoverageType,
    #[serde(default)]
    pub add_ons: BTreeSet<AddOnKey>,
}

impl PolicyChoice {
    pub fn new(coverage_type: CoverageType, add_ons: impl IntoIterator<Item = AddOnKey>) -> Self {
        Self {
            coverage_type,
            add_ons: add_ons.into_iter().collect(),
        }
    }

    pub fn with_add_on(mut self, add_on: AddOnKey) -> Self {
        self.add_ons.insert(add_on);
        self
    }
}

/// Eligibility flags collected from the applicant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct DiscountSelection {
    pub multi_policy: bool,
    pub safe_driver: bool,
    pub low_mileage: bool,
    pub anti_theft: bool,
}

/// Discount keys switched on by the selection's flags.
pub fn active_discount_keys(selection: &DiscountSelection) -> BTreeSet<DiscountKey> {
    [
        (selection.multi_policy, DiscountKey::MultiPolicy),
        (selection.safe_driver, DiscountKey::SafeDriver),
        (selection.low_mileage, DiscountKey::LowMileage),
        (selection.anti_theft, DiscountKey::AntiTheft),
    ]
    .into_iter()
    .filter_map(|(active, key)| active.then_some(key))
    .collect()
}

/// Complete, immutable snapshot consumed by the quote engine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct QuoteInputs {
    pub driver: DriverFactors,
    pub vehicle: VehicleFactors,
    pub location: LocationFactors,
    pub policy: PolicyChoice,
    pub discounts: DiscountSelection,
}

impl QuoteInputs {
    pub fn new(
        driver: DriverFactors,
        vehicle: VehicleFactors,
        location: LocationFactors,
        policy: PolicyChoice,
        discounts: DiscountSelection,
    ) -> Self {
        Self {
            driver,
            vehicle,
            location,
            policy,
            discounts,
        }
    }

    pub fn builder() -> QuoteInputsBuilder {
        QuoteInputsBuilder::default()
    }
}

/// Staging area for callers that collect sub-records piecemeal, e.g. from a
/// JSON payload where any section may be absent.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QuoteInputsBuilder {
    pub driver: Option<DriverFactors>,
    pub vehicle: Option<VehicleFactors>,
    pub location: Option<LocationFactors>,
    pub policy: Option<PolicyChoice>,
    pub discounts: Option<DiscountSelection>,
}

impl QuoteInputsBuilder {
    pub fn driver(mut self, driver: DriverFactors) -> Self {
        self.driver = Some(driver);
        self
    }

    pub fn vehicle(mut self, vehicle: VehicleFactors) -> Self {
        self.vehicle = Some(vehicle);
        self
    }

    pub fn location(mut self, location: LocationFactors) -> Self {
        self.location = Some(location);
        self
    }

    pub fn policy(mut self, policy: PolicyChoice) -> Self {
        self.policy = Some(policy);
        self
    }

    pub fn discounts(mut self, discounts: DiscountSelection) -> Self {
        self.discounts = Some(discounts);
        self
    }

    /// Finalize the snapshot, naming the first missing sub-record.
    pub fn build(self) -> Result<QuoteInputs, QuoteError> {
        let missing = QuoteError::IncompleteQuoteInput;
        Ok(QuoteInputs {
            driver: self.driver.ok_or(missing(QuoteSection::Driver))?,
            vehicle: self.vehicle.ok_or(missing(QuoteSection::Vehicle))?,
            location: self.location.ok_or(missing(QuoteSection::Location))?,
            policy: self.policy.ok_or(missing(QuoteSection::Policy))?,
            discounts: self.discounts.ok_or(missing(QuoteSection::Discounts))?,
        })
    }
}

impl From<QuoteInputs> for QuoteInputsBuilder {
    fn from(inputs: QuoteInputs) -> Self {
        Self {
            driver: Some(inputs.driver),
            vehicle: Some(inputs.vehicle),
            location: Some(inputs.location),
            policy: Some(inputs.policy),
            discounts: Some(inputs.discounts),
        }
    }
}
