mod batch;
mod cli;
mod demo;
mod infra;

use auto_quote::error::AppError;

pub fn run() -> Result<(), AppError> {
    cli::run()
}
