use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::error::QuoteError;

/// Base policy tiers a quote can be written against.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum CoverageType {
    Liability,
    FullCoverage,
    CollisionOnly,
}

impl CoverageType {
    pub const ALL: [CoverageType; 3] = [
        CoverageType::Liability,
        CoverageType::FullCoverage,
        CoverageType::CollisionOnly,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            CoverageType::Liability => "liability",
            CoverageType::FullCoverage => "full_coverage",
            CoverageType::CollisionOnly => "collision_only",
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            CoverageType::Liability => "Liability",
            CoverageType::FullCoverage => "Full Coverage",
            CoverageType::CollisionOnly => "Collision Only",
        }
    }

    /// Default base weight applied before any add-ons.
    pub const fn base_weight(self) -> f64 {
        match self {
            CoverageType::Liability => 1.0,
            CoverageType::FullCoverage => 1.5,
            CoverageType::CollisionOnly => 1.2,
        }
    }

    /// Add-ons written under this coverage on the standard rate sheet.
    pub const fn offered_add_ons(self) -> &'static [AddOnKey] {
        match self {
            CoverageType::Liability => &[
                AddOnKey::RoadsideAssistance,
                AddOnKey::RentalReimbursement,
                AddOnKey::GlassCoverage,
            ],
            CoverageType::FullCoverage => &[
                AddOnKey::RoadsideAssistance,
                AddOnKey::RentalReimbursement,
                AddOnKey::GapCoverage,
                AddOnKey::GlassCoverage,
            ],
            CoverageType::CollisionOnly => {
                &[AddOnKey::RentalReimbursement, AddOnKey::GlassCoverage]
            }
        }
    }

    /// Discounts honored under this coverage on the standard rate sheet.
    pub const fn offered_discounts(self) -> &'static [DiscountKey] {
        match self {
            CoverageType::Liability => &[DiscountKey::MultiPolicy, DiscountKey::LowMileage],
            CoverageType::FullCoverage => &[
                DiscountKey::MultiPolicy,
                DiscountKey::SafeDriver,
                DiscountKey::AntiTheft,
            ],
            CoverageType::CollisionOnly => &[DiscountKey::SafeDriver, DiscountKey::LowMileage],
        }
    }
}

impl fmt::Display for CoverageType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<String> for CoverageType {
    type Error = QuoteError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl FromStr for CoverageType {
    type Err = QuoteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        CoverageType::ALL
            .into_iter()
            .find(|coverage| coverage.key() == normalized)
            .ok_or_else(|| QuoteError::UnknownCoverageType(raw.trim().to_string()))
    }
}

/// Optional coverage enhancements layered on top of the base policy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum AddOnKey {
    RoadsideAssistance,
    RentalReimbursement,
    GlassCoverage,
    GapCoverage,
}

impl AddOnKey {
    pub const ALL: [AddOnKey; 4] = [
        AddOnKey::RoadsideAssistance,
        AddOnKey::RentalReimbursement,
        AddOnKey::GlassCoverage,
        AddOnKey::GapCoverage,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            AddOnKey::RoadsideAssistance => "roadside_assistance",
            AddOnKey::RentalReimbursement => "rental_reimbursement",
            AddOnKey::GlassCoverage => "glass_coverage",
            AddOnKey::GapCoverage => "gap_coverage",
        }
    }

    pub const fn weight(self) -> f64 {
        match self {
            AddOnKey::RoadsideAssistance => 0.15,
            AddOnKey::RentalReimbursement => 0.1,
            AddOnKey::GlassCoverage => 0.05,
            AddOnKey::GapCoverage => 0.05,
        }
    }
}

impl fmt::Display for AddOnKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<String> for AddOnKey {
    type Error = QuoteError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl FromStr for AddOnKey {
    type Err = QuoteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        AddOnKey::ALL
            .into_iter()
            .find(|add_on| add_on.key() == normalized)
            .ok_or_else(|| QuoteError::UnknownAddOnKey {
                key: raw.trim().to_string(),
                coverage: None,
            })
    }
}

/// Discount programs a policyholder may qualify for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", try_from = "String")]
pub enum DiscountKey {
    MultiPolicy,
    SafeDriver,
    LowMileage,
    AntiTheft,
}

impl DiscountKey {
    pub const ALL: [DiscountKey; 4] = [
        DiscountKey::MultiPolicy,
        DiscountKey::SafeDriver,
        DiscountKey::LowMileage,
        DiscountKey::AntiTheft,
    ];

    pub const fn key(self) -> &'static str {
        match self {
            DiscountKey::MultiPolicy => "multi_policy",
            DiscountKey::SafeDriver => "safe_driver",
            DiscountKey::LowMileage => "low_mileage",
            DiscountKey::AntiTheft => "anti_theft",
        }
    }

    /// Fraction of the pre-discount quote removed when the discount applies.
    pub const fn weight(self) -> f64 {
        match self {
            DiscountKey::MultiPolicy => 0.1,
            DiscountKey::SafeDriver => 0.12,
            DiscountKey::LowMileage => 0.05,
            DiscountKey::AntiTheft => 0.03,
        }
    }
}

impl fmt::Display for DiscountKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

impl TryFrom<String> for DiscountKey {
    type Error = QuoteError;

    fn try_from(raw: String) -> Result<Self, Self::Error> {
        raw.parse()
    }
}

impl FromStr for DiscountKey {
    type Err = QuoteError;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let normalized = raw.trim().to_ascii_lowercase();
        DiscountKey::ALL
            .into_iter()
            .find(|discount| discount.key() == normalized)
            .ok_or_else(|| QuoteError::UnknownDiscountKey {
                key: raw.trim().to_string(),
                coverage: None,
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keys_round_trip_through_from_str() {
        for coverage in CoverageType::ALL {
            assert_eq!(coverage.key().parse::<CoverageType>().ok(), Some(coverage));
        }
        assert_eq!(
            " Roadside_Assistance ".parse::<AddOnKey>().ok(),
            Some(AddOnKey::RoadsideAssistance)
        );
    }

    #[test]
    fn unknown_strings_map_to_named_errors() {
        match "platinum".parse::<CoverageType>() {
            Err(QuoteError::UnknownCoverageType(raw)) => assert_eq!(raw, "platinum"),
            other => panic!("expected unknown coverage, got {other:?}"),
        }
        assert!(matches!(
            "pet_coverage".parse::<AddOnKey>(),
            Err(QuoteError::UnknownAddOnKey { coverage: None, .. })
        ));
        assert!(matches!(
            "loyalty".parse::<DiscountKey>(),
            Err(QuoteError::UnknownDiscountKey { coverage: None, .. })
        ));
    }

    #[test]
    fn json_keys_deserialize_through_named_errors() {
        let parsed: CoverageType = serde_json::from_str("\"collision_only\"").expect("known key");
        assert_eq!(parsed, CoverageType::CollisionOnly);
        assert_eq!(
            serde_json::to_string(&AddOnKey::GapCoverage).expect("serializes"),
            "\"gap_coverage\""
        );

        let err = serde_json::from_str::<AddOnKey>("\"teleportation\"").expect_err("unknown key");
        assert!(
            err.to_string().contains("add-on 'teleportation' is not rated"),
            "{err}"
        );
        let err = serde_json::from_str::<DiscountKey>("\"loyalty\"").expect_err("unknown key");
        assert!(err.to_string().contains("discount 'loyalty' is not offered"), "{err}");
    }

    #[test]
    fn offered_keys_are_unique_per_coverage() {
        for coverage in CoverageType::ALL {
            let add_ons = coverage.offered_add_ons();
            for (index, key) in add_ons.iter().enumerate() {
                assert!(!add_ons[index + 1..].contains(key), "{coverage} repeats {key}");
            }
        }
    }
}
