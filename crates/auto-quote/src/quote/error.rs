use std::fmt;

use serde::{Deserialize, Serialize};

use super::weights::CoverageType;

/// Sub-records that make up a complete quote input snapshot.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum QuoteSection {
    Driver,
    Vehicle,
    Location,
    Policy,
    Discounts,
}

impl QuoteSection {
    pub const fn label(self) -> &'static str {
        match self {
            QuoteSection::Driver => "driver",
            QuoteSection::Vehicle => "vehicle",
            QuoteSection::Location => "location",
            QuoteSection::Policy => "policy",
            QuoteSection::Discounts => "discounts",
        }
    }
}

impl fmt::Display for QuoteSection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// Failures that abort a quote before any result is produced.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum QuoteError {
    #[error("quote input is missing the {0} sub-record")]
    IncompleteQuoteInput(QuoteSection),
    #[error("coverage type '{0}' has no entry in the rate sheet")]
    UnknownCoverageType(String),
    #[error("add-on '{key}' is not rated{}", scope(.coverage))]
    UnknownAddOnKey {
        key: String,
        coverage: Option<CoverageType>,
    },
    #[error("discount '{key}' is not offered{}", scope(.coverage))]
    UnknownDiscountKey {
        key: String,
        coverage: Option<CoverageType>,
    },
}

fn scope(coverage: &Option<CoverageType>) -> String {
    match coverage {
        Some(coverage) => format!(" for {coverage} coverage"),
        None => String::new(),
    }
}

/// Rejections raised while validating a rate sheet.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RatingConfigError {
    #[error("base rate must be a positive finite number (found {0})")]
    InvalidBaseRate(f64),
    #[error("{field} must be a non-negative finite number (found {value})")]
    InvalidWeight { field: String, value: f64 },
    #[error("max discount ratio must lie within 0..=1 (found {0})")]
    InvalidDiscountCap(f64),
    #[error("rate sheet does not define any coverage types")]
    EmptyRateSheet,
}
