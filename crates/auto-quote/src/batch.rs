//! Flat CSV decoding for batch quoting. Each row carries one complete snapshot;
//! a section with any blank column is treated as missing so the engine reports
//! it rather than quoting against zeros.

use std::collections::BTreeSet;
use std::io::Read;

use serde::Deserialize;

use crate::quote::{
    AddOnKey, CoverageType, DiscountSelection, DriverFactors, LocationFactors, PolicyChoice,
    QuoteError, QuoteInputs, QuoteInputsBuilder, VehicleFactors,
};

/// Why a single row could not be turned into quote inputs.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum RowError {
    #[error("malformed row: {0}")]
    Malformed(String),
    #[error("column '{column}' expects true/false, found '{value}'")]
    InvalidFlag { column: &'static str, value: String },
    #[error(transparent)]
    Quote(#[from] QuoteError),
}

/// One decoded row, keyed by its line in the source file.
#[derive(Debug, Clone, PartialEq)]
pub struct QuoteRow {
    pub line: u64,
    pub quote_id: Option<String>,
    pub inputs: Result<QuoteInputs, RowError>,
}

/// Decode every row. Only structural CSV or I/O failures abort the read; row-level
/// problems are returned alongside the rows that did decode.
pub fn read_quote_rows<R: Read>(reader: R) -> Result<Vec<QuoteRow>, csv::Error> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let headers = csv_reader.headers()?.clone();
    let mut rows = Vec::new();

    for record in csv_reader.records() {
        let record = record?;
        let line = record.position().map(|position| position.line()).unwrap_or(0);

        let row = match record.deserialize::<QuoteCsvRow>(Some(&headers)) {
            Ok(row) => QuoteRow {
                line,
                quote_id: row.quote_id.clone(),
                inputs: row.into_inputs(),
            },
            Err(err) => QuoteRow {
                line,
                quote_id: None,
                inputs: Err(RowError::Malformed(err.to_string())),
            },
        };
        rows.push(row);
    }

    Ok(rows)
}

#[derive(Debug, Deserialize)]
struct QuoteCsvRow {
    #[serde(default)]
    quote_id: Option<String>,

    at_fault_major: Option<i32>,
    at_fault_minor: Option<i32>,
    no_fault: Option<i32>,
    hit_n_runs: Option<i32>,
    duis: Option<i32>,
    age: Option<i32>,
    years_clean: Option<i32>,
    violations: Option<i32>,

    brand_type_score: Option<i32>,
    repair_complexity_score: Option<i32>,
    parts_score: Option<i32>,
    vehicle_age: Option<i32>,
    theft_score: Option<i32>,
    anti_theft_feature_score: Option<i32>,
    crash_test_rating: Option<i32>,
    active_safety_features: Option<i32>,
    passive_safety_features: Option<i32>,

    crime_level_factor: Option<i32>,
    anti_theft_adjustment: Option<i32>,

    coverage_type: Option<String>,
    #[serde(default)]
    add_ons: Option<String>,

    multi_policy: Option<String>,
    safe_driver: Option<String>,
    low_mileage: Option<String>,
    anti_theft: Option<String>,
}

impl QuoteCsvRow {
    fn into_inputs(self) -> Result<QuoteInputs, RowError> {
        let mut builder = QuoteInputsBuilder::default();

        if let (
            Some(at_fault_major),
            Some(at_fault_minor),
            Some(no_fault),
            Some(hit_n_runs),
            Some(duis),
            Some(age),
            Some(years_clean),
            Some(violations),
        ) = (
            self.at_fault_major,
            self.at_fault_minor,
            self.no_fault,
            self.hit_n_runs,
            self.duis,
            self.age,
            self.years_clean,
            self.violations,
        ) {
            builder = builder.driver(DriverFactors {
                at_fault_major,
                at_fault_minor,
                no_fault,
                hit_n_runs,
                duis,
                age,
                years_clean,
                violations,
            });
        }

        if let (
            Some(brand_type_score),
            Some(repair_complexity_score),
            Some(parts_score),
            Some(vehicle_age),
            Some(theft_score),
            Some(anti_theft_feature_score),
            Some(crash_test_rating),
            Some(active_safety_features),
            Some(passive_safety_features),
        ) = (
            self.brand_type_score,
            self.repair_complexity_score,
            self.parts_score,
            self.vehicle_age,
            self.theft_score,
            self.anti_theft_feature_score,
            self.crash_test_rating,
            self.active_safety_features,
            self.passive_safety_features,
        ) {
            builder = builder.vehicle(VehicleFactors {
                brand_type_score,
                repair_complexity_score,
                parts_score,
                vehicle_age,
                theft_score,
                anti_theft_feature_score,
                crash_test_rating,
                active_safety_features,
                passive_safety_features,
            });
        }

        if let (Some(crime_level_factor), Some(anti_theft_adjustment)) =
            (self.crime_level_factor, self.anti_theft_adjustment)
        {
            builder = builder.location(LocationFactors {
                crime_level_factor,
                anti_theft_adjustment,
            });
        }

        if let Some(coverage) = self.coverage_type.as_deref() {
            let coverage_type: CoverageType = coverage.parse()?;
            let add_ons = parse_add_ons(self.add_ons.as_deref().unwrap_or_default())?;
            builder = builder.policy(PolicyChoice {
                coverage_type,
                add_ons,
            });
        }

        if let (Some(multi_policy), Some(safe_driver), Some(low_mileage), Some(anti_theft)) = (
            self.multi_policy.as_deref(),
            self.safe_driver.as_deref(),
            self.low_mileage.as_deref(),
            self.anti_theft.as_deref(),
        ) {
            builder = builder.discounts(DiscountSelection {
                multi_policy: parse_flag("multi_policy", multi_policy)?,
                safe_driver: parse_flag("safe_driver", safe_driver)?,
                low_mileage: parse_flag("low_mileage", low_mileage)?,
                anti_theft: parse_flag("anti_theft", anti_theft)?,
            });
        }

        Ok(builder.build()?)
    }
}

fn parse_add_ons(raw: &str) -> Result<BTreeSet<AddOnKey>, QuoteError> {
    raw.split(';')
        .map(str::trim)
        .filter(|key| !key.is_empty())
        .map(str::parse::<AddOnKey>)
        .collect()
}

fn parse_flag(column: &'static str, raw: &str) -> Result<bool, RowError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "true" | "yes" | "y" | "1" => Ok(true),
        "false" | "no" | "n" | "0" => Ok(false),
        _ => Err(RowError::InvalidFlag {
            column,
            value: raw.to_string(),
        }),
    }
}
