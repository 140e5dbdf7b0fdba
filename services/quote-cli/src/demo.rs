use crate::infra::print_json;
use auto_quote::error::AppError;
use auto_quote::quote::{
    review_inputs, AddOnKey, CoverageType, DiscountSelection, DriverFactors, InputAdvisory,
    LocationFactors, PolicyChoice, QuoteEngine, QuoteInputs, QuoteResult, VehicleFactors,
};
use clap::Args;
use serde::Serialize;

#[derive(Args, Debug, Default)]
pub(crate) struct DemoArgs {
    /// Emit the demo quote as JSON instead of a readable breakdown.
    #[arg(long)]
    pub(crate) json: bool,
}

#[derive(Serialize)]
struct DemoOutput<'a> {
    inputs: &'a QuoteInputs,
    result: &'a QuoteResult,
    advisories: &'a [InputAdvisory],
}

pub(crate) fn run_demo(engine: &QuoteEngine, args: DemoArgs) -> Result<(), AppError> {
    let inputs = reference_inputs();
    let result = engine.quote(&inputs)?;
    let advisories = review_inputs(&inputs);

    if args.json {
        return print_json(
            &DemoOutput {
                inputs: &inputs,
                result: &result,
                advisories: &advisories,
            },
            false,
        );
    }

    println!("{}", render_quote(&inputs, &result, &advisories));
    Ok(())
}

/// A 23-year-old driver with a mixed record, a 15-year-old vehicle, and full coverage.
pub(crate) fn reference_inputs() -> QuoteInputs {
    QuoteInputs::new(
        DriverFactors {
            at_fault_major: 1,
            at_fault_minor: 1,
            no_fault: 2,
            hit_n_runs: 0,
            duis: 0,
            age: 23,
            years_clean: 5,
            violations: 1,
        },
        VehicleFactors {
            brand_type_score: 3,
            repair_complexity_score: 2,
            parts_score: 4,
            vehicle_age: 15,
            theft_score: 5,
            anti_theft_feature_score: 2,
            crash_test_rating: 4,
            active_safety_features: 2,
            passive_safety_features: 3,
        },
        LocationFactors {
            crime_level_factor: 4,
            anti_theft_adjustment: 2,
        },
        PolicyChoice::new(
            CoverageType::FullCoverage,
            [AddOnKey::RoadsideAssistance, AddOnKey::RentalReimbursement],
        ),
        DiscountSelection {
            multi_policy: true,
            safe_driver: true,
            low_mileage: false,
            anti_theft: true,
        },
    )
}

pub(crate) fn render_quote(
    inputs: &QuoteInputs,
    result: &QuoteResult,
    advisories: &[InputAdvisory],
) -> String {
    let add_ons = if inputs.policy.add_ons.is_empty() {
        "none".to_string()
    } else {
        inputs
            .policy
            .add_ons
            .iter()
            .map(|add_on| add_on.key())
            .collect::<Vec<_>>()
            .join(", ")
    };

    let mut lines = vec![
        "Auto Quote".to_string(),
        "==========".to_string(),
        format!("Coverage: {}", inputs.policy.coverage_type.label()),
        format!("Add-ons: {add_ons}"),
        String::new(),
        "Weights".to_string(),
        format!("  driver risk       {:>10.6}", result.weights.driver_risk),
        format!("  vehicle risk      {:>10.6}", result.weights.vehicle_risk),
        format!("  location risk     {:>10.6}", result.weights.location_risk),
        format!("  policy adjustment {:>10.6}", result.weights.policy_adjustment),
        format!("  discount          {:>10.6}", result.weights.discount),
        String::new(),
        "Vehicle scores".to_string(),
        format!("  repair {:.1}", result.scores.repair_score),
        format!("  theft  {:.1}", result.scores.theft_score),
        format!("  safety {:.1}", result.scores.safety_score),
        String::new(),
        format!("Base rate:      {:>10.2}", result.base_rate),
        format!("Original quote: {:>10.2}", result.original_quote),
        format!("Discount:       {:>10.2}", result.total_discount),
        format!("Quote:          {:>10.2}", result.quote),
    ];

    if !advisories.is_empty() {
        lines.push(String::new());
        lines.push("Advisories".to_string());
        lines.extend(
            advisories
                .iter()
                .map(|advisory| format!("  - {}: {}", advisory.path(), advisory.detail)),
        );
    }

    lines.join("\n")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn reference_demo_renders_breakdown() {
        let inputs = reference_inputs();
        let result = QuoteEngine::standard().quote(&inputs).expect("demo quotes");
        let advisories = review_inputs(&inputs);

        let rendered = render_quote(&inputs, &result, &advisories);

        assert!(rendered.contains("Coverage: Full Coverage"));
        assert!(rendered.contains("Add-ons: roadside_assistance, rental_reimbursement"));
        assert!(rendered.contains("Original quote:     990.47"));
        assert!(rendered.contains("Quote:              742.85"));
        assert!(!rendered.contains("Advisories"));
    }

    #[test]
    fn advisories_are_listed_when_present() {
        let mut inputs = reference_inputs();
        inputs.driver.age = 12;
        let result = QuoteEngine::standard().quote(&inputs).expect("quotes anyway");
        let advisories = review_inputs(&inputs);

        let rendered = render_quote(&inputs, &result, &advisories);

        assert!(rendered.contains("Advisories"));
        assert!(rendered.contains("driver.age"));
    }
}
