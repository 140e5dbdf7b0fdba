//! Premium scoring: risk weights for the driver, vehicle, and location, policy
//! and discount aggregation, and the quote formula composing them.
//!
//! `original_quote = base_rate * (1 + driver + vehicle + location + policy)`;
//! the discount weight removes a fraction of that amount.

mod advisory;
pub mod domain;
mod error;
mod policy;
pub mod rating;
mod rules;
pub mod weights;

#[cfg(test)]
mod tests;

pub use advisory::{review_inputs, InputAdvisory};
pub use domain::{
    active_discount_keys, DiscountSelection, DriverFactors, LocationFactors, PolicyChoice,
    QuoteInputs, QuoteInputsBuilder, VehicleFactors,
};
pub use error::{QuoteError, QuoteSection, RatingConfigError};
pub use rating::{
    CoverageRates, DriverCoefficients, LocationCoefficients, RatingConfig, VehicleCoefficients,
};
pub use weights::{AddOnKey, CoverageType, DiscountKey};

use std::sync::OnceLock;

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

static STANDARD_ENGINE: OnceLock<QuoteEngine> = OnceLock::new();

/// Process-wide engine over the standard rate sheet, built on first use.
pub fn standard_engine() -> &'static QuoteEngine {
    STANDARD_ENGINE.get_or_init(QuoteEngine::standard)
}

/// Quote the snapshot against the standard rate sheet.
pub fn calculate_quote_api(inputs: &QuoteInputs) -> Result<QuoteResult, QuoteError> {
    standard_engine().quote(inputs)
}

/// Stateless engine applying one rate sheet to any number of snapshots.
#[derive(Debug, Clone)]
pub struct QuoteEngine {
    rating: RatingConfig,
}

impl Default for QuoteEngine {
    fn default() -> Self {
        Self::standard()
    }
}

impl QuoteEngine {
    pub fn new(rating: RatingConfig) -> Result<Self, RatingConfigError> {
        rating.validate()?;
        Ok(Self { rating })
    }

    pub fn standard() -> Self {
        Self {
            rating: RatingConfig::default(),
        }
    }

    pub fn rating(&self) -> &RatingConfig {
        &self.rating
    }

    /// Finalize a staged snapshot and quote it.
    pub fn quote_builder(&self, builder: QuoteInputsBuilder) -> Result<QuoteResult, QuoteError> {
        let inputs = builder.build()?;
        self.quote(&inputs)
    }

    pub fn quote(&self, inputs: &QuoteInputs) -> Result<QuoteResult, QuoteError> {
        for advisory in review_inputs(inputs) {
            warn!(field = %advisory.path(), detail = %advisory.detail, "implausible quote input");
        }

        let rating = &self.rating;
        let driver_risk = rules::driver_risk(&inputs.driver, &rating.driver);
        let vehicle = rules::vehicle_risk(&inputs.vehicle, &rating.vehicle);
        let location_risk = rules::location_risk(&inputs.location, &rating.location);
        let policy_adjustment = policy::policy_adjustment(&inputs.policy, rating)?;
        let discount = policy::discount_weight(
            inputs.policy.coverage_type,
            &inputs.discounts,
            rating,
        )?;

        debug!(
            base_rate = rating.base_rate,
            driver_risk,
            vehicle_risk = vehicle.risk,
            location_risk,
            policy_adjustment,
            discount,
            "computed quote weights"
        );

        let original_quote = rating.base_rate
            * (1.0 + driver_risk + vehicle.risk + location_risk + policy_adjustment);
        let mut total_discount = original_quote * discount.min(rating.max_discount_ratio);
        let mut quote = original_quote - total_discount;

        let floor = rating.minimum_premium.min(original_quote);
        if quote < floor {
            quote = floor;
            total_discount = original_quote - quote;
        }

        info!(
            coverage = %inputs.policy.coverage_type,
            original_quote,
            total_discount,
            quote,
            "quote calculated"
        );

        Ok(QuoteResult {
            base_rate: rating.base_rate,
            original_quote,
            total_discount,
            quote,
            weights: QuoteWeights {
                driver_risk,
                vehicle_risk: vehicle.risk,
                location_risk,
                policy_adjustment,
                discount,
            },
            scores: vehicle.scores,
        })
    }
}

/// Weights combined by the quote formula.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteWeights {
    pub driver_risk: f64,
    pub vehicle_risk: f64,
    pub location_risk: f64,
    pub policy_adjustment: f64,
    pub discount: f64,
}

/// Vehicle sub-scores behind the vehicle risk weight.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct VehicleScores {
    pub repair_score: f64,
    pub theft_score: f64,
    pub safety_score: f64,
}

/// Quote plus the weights that justify it.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct QuoteResult {
    pub base_rate: f64,
    pub original_quote: f64,
    pub total_discount: f64,
    pub quote: f64,
    pub weights: QuoteWeights,
    pub scores: VehicleScores,
}
