use tracing::{debug, warn};

use super::domain::{active_discount_keys, DiscountSelection, PolicyChoice};
use super::error::QuoteError;
use super::rating::{CoverageRates, RatingConfig};
use super::weights::CoverageType;

fn coverage_rates(
    rating: &RatingConfig,
    coverage: CoverageType,
) -> Result<&CoverageRates, QuoteError> {
    rating
        .coverage(coverage)
        .ok_or_else(|| QuoteError::UnknownCoverageType(coverage.to_string()))
}

/// Coverage base weight plus the weight of every selected add-on.
///
/// An add-on resolves against the coverage's own table first, then the
/// sheet-wide table. Only a key missing from both fails the quote.
pub(crate) fn policy_adjustment(
    policy: &PolicyChoice,
    rating: &RatingConfig,
) -> Result<f64, QuoteError> {
    let coverage = policy.coverage_type;
    let rates = coverage_rates(rating, coverage)?;

    policy.add_ons.iter().try_fold(rates.weight, |total, add_on| {
        if let Some(weight) = rates.add_ons.get(add_on) {
            return Ok(total + weight);
        }
        match rating.add_ons.get(add_on) {
            Some(weight) => {
                debug!(%add_on, %coverage, weight, "add-on rated from sheet-wide table");
                Ok(total + weight)
            }
            None => Err(QuoteError::UnknownAddOnKey {
                key: add_on.to_string(),
                coverage: Some(coverage),
            }),
        }
    })
}

/// Sum of the weights of every discount the selection activates. Uncapped.
/// Discounts the coverage does not offer contribute nothing.
pub(crate) fn discount_weight(
    coverage: CoverageType,
    selection: &DiscountSelection,
    rating: &RatingConfig,
) -> Result<f64, QuoteError> {
    let rates = coverage_rates(rating, coverage)?;

    Ok(active_discount_keys(selection)
        .into_iter()
        .fold(0.0, |total, key| match rates.discounts.get(&key) {
            Some(weight) => total + weight,
            None => {
                warn!(discount = %key, %coverage, "discount not offered for coverage, skipped");
                total
            }
        }))
}
