use auto_quote::error::AppError;
use auto_quote::quote::QuoteInputsBuilder;
use serde::Serialize;
use std::fs;
use std::io::{self, Read, Write};
use std::path::Path;

/// Read a quote request from a file, or stdin when the path is `-`.
pub(crate) fn read_quote_request(path: &Path) -> Result<QuoteInputsBuilder, AppError> {
    let raw = if path == Path::new("-") {
        let mut buffer = String::new();
        io::stdin().read_to_string(&mut buffer)?;
        buffer
    } else {
        fs::read_to_string(path)?
    };
    parse_quote_request(&raw)
}

/// Sections left out of the document stay unset so the engine can name them.
pub(crate) fn parse_quote_request(raw: &str) -> Result<QuoteInputsBuilder, AppError> {
    Ok(serde_json::from_str(raw)?)
}

pub(crate) fn print_json<T: Serialize + ?Sized>(value: &T, compact: bool) -> Result<(), AppError> {
    let rendered = if compact {
        serde_json::to_string(value)?
    } else {
        serde_json::to_string_pretty(value)?
    };
    let mut stdout = io::stdout().lock();
    writeln!(stdout, "{rendered}")?;
    Ok(())
}
