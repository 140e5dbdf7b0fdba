use super::common::*;
use crate::quote::domain::{active_discount_keys, DiscountSelection, PolicyChoice};
use crate::quote::policy::{discount_weight, policy_adjustment};
use crate::quote::rating::RatingConfig;
use crate::quote::weights::{AddOnKey, CoverageType, DiscountKey};
use crate::quote::QuoteError;

#[test]
fn policy_adjustment_adds_add_ons_to_coverage_base() {
    let rating = RatingConfig::default();

    let adjustment = policy_adjustment(&policy(), &rating).expect("policy rated");

    assert_close(adjustment, 1.5 + 0.15 + 0.1);
}

#[test]
fn duplicate_add_ons_count_once() {
    let rating = RatingConfig::default();
    let duplicated = PolicyChoice::new(
        CoverageType::CollisionOnly,
        [
            AddOnKey::GlassCoverage,
            AddOnKey::GlassCoverage,
            AddOnKey::GlassCoverage,
        ],
    );

    assert_eq!(duplicated.add_ons.len(), 1);
    let adjustment = policy_adjustment(&duplicated, &rating).expect("policy rated");
    assert_close(adjustment, 1.2 + 0.05);
}

#[test]
fn adding_an_add_on_never_decreases_adjustment() {
    let rating = RatingConfig::default();

    for coverage in CoverageType::ALL {
        let mut selected = PolicyChoice::new(coverage, []);
        let mut previous = policy_adjustment(&selected, &rating).expect("base rated");
        for add_on in coverage.offered_add_ons() {
            selected = selected.with_add_on(*add_on);
            let current = policy_adjustment(&selected, &rating).expect("add-on rated");
            assert!(current >= previous, "{add_on} lowered {coverage}");
            previous = current;
        }
    }
}

#[test]
fn add_on_outside_coverage_table_uses_sheet_wide_weight() {
    let rating = RatingConfig::default();
    let policy = PolicyChoice::new(CoverageType::Liability, [AddOnKey::GapCoverage]);

    let adjustment = policy_adjustment(&policy, &rating).expect("gap rated sheet-wide");

    assert_close(adjustment, 1.0 + AddOnKey::GapCoverage.weight());
}

#[test]
fn coverage_table_price_wins_over_sheet_wide_weight() {
    let mut rating = RatingConfig::default();
    rating
        .coverages
        .get_mut(&CoverageType::CollisionOnly)
        .expect("collision present")
        .add_ons
        .insert(AddOnKey::GlassCoverage, 0.2);
    let policy = PolicyChoice::new(CoverageType::CollisionOnly, [AddOnKey::GlassCoverage]);

    let adjustment = policy_adjustment(&policy, &rating).expect("glass rated");

    assert_close(adjustment, 1.2 + 0.2);
}

#[test]
fn add_on_missing_from_every_table_is_rejected() {
    let mut rating = RatingConfig::default();
    rating.add_ons.remove(&AddOnKey::GapCoverage);
    let policy = PolicyChoice::new(CoverageType::Liability, [AddOnKey::GapCoverage]);

    match policy_adjustment(&policy, &rating) {
        Err(QuoteError::UnknownAddOnKey { key, coverage }) => {
            assert_eq!(key, "gap_coverage");
            assert_eq!(coverage, Some(CoverageType::Liability));
        }
        other => panic!("expected unknown add-on, got {other:?}"),
    }
}

#[test]
fn coverage_missing_from_sheet_is_rejected() {
    let mut rating = RatingConfig::default();
    rating.coverages.remove(&CoverageType::CollisionOnly);
    let policy = PolicyChoice::new(CoverageType::CollisionOnly, []);

    assert_eq!(
        policy_adjustment(&policy, &rating),
        Err(QuoteError::UnknownCoverageType("collision_only".to_string()))
    );
}

#[test]
fn active_keys_follow_flags() {
    let keys = active_discount_keys(&discounts());

    assert_eq!(
        keys.into_iter().collect::<Vec<_>>(),
        vec![
            DiscountKey::MultiPolicy,
            DiscountKey::SafeDriver,
            DiscountKey::AntiTheft
        ]
    );
    assert!(active_discount_keys(&DiscountSelection::default()).is_empty());
}

#[test]
fn discount_weight_sums_active_keys() {
    let rating = RatingConfig::default();

    let weight = discount_weight(CoverageType::FullCoverage, &discounts(), &rating)
        .expect("discounts rated");

    assert_close(weight, 0.1 + 0.12 + 0.03);
}

#[test]
fn discount_weight_follows_active_keys_for_every_selection() {
    let rating = RatingConfig::default();

    for coverage in CoverageType::ALL {
        let offered = &rating.coverage(coverage).expect("coverage present").discounts;
        for mask in 0u8..16 {
            let selection = selection_from_mask(mask);
            let keys = active_discount_keys(&selection);
            assert_eq!(keys.len(), mask.count_ones() as usize);

            let expected: f64 = keys
                .iter()
                .map(|key| offered.get(key).copied().unwrap_or(0.0))
                .sum();
            let weight =
                discount_weight(coverage, &selection, &rating).expect("discounts rated");

            assert_close(weight, expected);
        }
    }
}

#[test]
fn discount_not_offered_for_coverage_contributes_nothing() {
    let rating = RatingConfig::default();
    let selection = DiscountSelection {
        safe_driver: true,
        low_mileage: true,
        ..DiscountSelection::default()
    };

    let weight =
        discount_weight(CoverageType::Liability, &selection, &rating).expect("discounts rated");

    assert_close(weight, DiscountKey::LowMileage.weight());
}
