use crate::infra::print_json;
use auto_quote::batch::{read_quote_rows, QuoteRow};
use auto_quote::error::AppError;
use auto_quote::quote::{QuoteEngine, QuoteResult};
use clap::Args;
use serde::Serialize;
use std::fs::File;
use std::path::PathBuf;
use tracing::{info, warn};

#[derive(Args, Debug)]
pub(crate) struct BatchArgs {
    /// CSV file with one quote snapshot per row
    #[arg(long)]
    pub(crate) csv: PathBuf,
}

/// One output line per input row; exactly one of `result` or `error` is set.
#[derive(Debug, Serialize)]
pub(crate) struct BatchLine {
    pub(crate) line: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) quote_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) result: Option<QuoteResult>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub(crate) error: Option<String>,
}

pub(crate) fn run_batch(engine: &QuoteEngine, args: BatchArgs) -> Result<(), AppError> {
    let file = File::open(&args.csv)?;
    let rows = read_quote_rows(file)?;
    let lines = quote_rows(engine, rows);

    let failed = lines.iter().filter(|line| line.error.is_some()).count();
    for line in &lines {
        print_json(line, true)?;
    }

    info!(
        file = %args.csv.display(),
        rows = lines.len(),
        quoted = lines.len() - failed,
        failed,
        "batch complete"
    );
    Ok(())
}

/// Rows are quoted independently; a bad row never stops the rest.
pub(crate) fn quote_rows(engine: &QuoteEngine, rows: Vec<QuoteRow>) -> Vec<BatchLine> {
    rows.into_iter()
        .map(|row| {
            let outcome = match row.inputs {
                Ok(inputs) => engine.quote(&inputs).map_err(|err| err.to_string()),
                Err(err) => Err(err.to_string()),
            };
            if let Err(err) = &outcome {
                warn!(line = row.line, error = %err, "batch row rejected");
            }
            let (result, error) = match outcome {
                Ok(result) => (Some(result), None),
                Err(err) => (None, Some(err)),
            };
            BatchLine {
                line: row.line,
                quote_id: row.quote_id,
                result,
                error,
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn fixture_lines() -> Vec<BatchLine> {
        let rows = read_quote_rows(include_str!("../fixtures/batch.csv").as_bytes())
            .expect("fixture reads");
        quote_rows(&QuoteEngine::standard(), rows)
    }

    #[test]
    fn quotes_valid_rows_and_reports_bad_ones() {
        let lines = fixture_lines();

        assert_eq!(lines.len(), 5);
        let first = lines[0].result.as_ref().expect("reference row quotes");
        assert!((first.quote - 742.854).abs() < 1e-6);
        assert!(lines[1].result.is_some());
        assert_eq!(
            lines[2].error.as_deref(),
            Some("add-on 'towing' is not rated")
        );
        assert_eq!(
            lines[3].error.as_deref(),
            Some("quote input is missing the location sub-record")
        );
    }

    #[test]
    fn lines_serialize_with_only_the_relevant_outcome() {
        let lines = fixture_lines();

        let ok = serde_json::to_value(&lines[0]).expect("serializes");
        assert_eq!(ok["quote_id"], "Q-100");
        assert_eq!(ok["line"], 2);
        assert!(ok.get("error").is_none());

        let rejected = serde_json::to_value(&lines[3]).expect("serializes");
        assert!(rejected.get("result").is_none());
        assert!(rejected["error"].is_string());
    }

    #[test]
    fn selections_outside_the_coverage_tables_still_quote() {
        let lines = fixture_lines();

        let gap = lines[4].result.as_ref().expect("liability gap row quotes");
        assert_eq!(lines[4].quote_id.as_deref(), Some("Q-104"));
        assert!((gap.weights.policy_adjustment - 1.05).abs() < 1e-9);
        assert!((gap.weights.discount - 0.05).abs() < 1e-9);
    }
}
