use std::env;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};

use crate::quote::{QuoteEngine, RatingConfig, RatingConfigError};

/// Distinguishes runtime behavior for different stages of the tool.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AppEnvironment {
    Development,
    Test,
    Production,
}

impl AppEnvironment {
    fn from_str(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "prod" | "production" => Self::Production,
            "test" | "ci" => Self::Test,
            _ => Self::Development,
        }
    }
}

/// Top-level configuration for the application.
#[derive(Debug, Clone)]
pub struct AppConfig {
    pub environment: AppEnvironment,
    pub telemetry: TelemetryConfig,
    pub rating: RatingSettings,
}

impl AppConfig {
    pub fn load() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok();

        let environment = AppEnvironment::from_str(
            &env::var("APP_ENV").unwrap_or_else(|_| "development".to_string()),
        );

        let log_level = env::var("APP_LOG_LEVEL").unwrap_or_else(|_| "info".to_string());

        let rating_path = match env::var("QUOTE_RATING_PATH") {
            Ok(raw) if raw.trim().is_empty() => return Err(ConfigError::EmptyRatingPath),
            Ok(raw) => Some(PathBuf::from(raw.trim())),
            Err(_) => None,
        };

        Ok(Self {
            environment,
            telemetry: TelemetryConfig { log_level },
            rating: RatingSettings { path: rating_path },
        })
    }
}

/// Tracing controls.
#[derive(Debug, Clone)]
pub struct TelemetryConfig {
    pub log_level: String,
}

/// Where the rate sheet comes from; the standard sheet when no path is set.
#[derive(Debug, Clone, Default)]
pub struct RatingSettings {
    pub path: Option<PathBuf>,
}

impl RatingSettings {
    pub fn load(&self) -> Result<RatingConfig, ConfigError> {
        match &self.path {
            Some(path) => load_rating_file(path),
            None => Ok(RatingConfig::default()),
        }
    }

    pub fn engine(&self) -> Result<QuoteEngine, ConfigError> {
        let rating = self.load()?;
        QuoteEngine::new(rating).map_err(|source| ConfigError::InvalidRating {
            path: self.path.clone(),
            source,
        })
    }
}

/// Read and validate a JSON rate sheet.
pub fn load_rating_file(path: &Path) -> Result<RatingConfig, ConfigError> {
    let raw = fs::read_to_string(path).map_err(|source| ConfigError::RatingFile {
        path: path.to_path_buf(),
        source,
    })?;

    let rating: RatingConfig =
        serde_json::from_str(&raw).map_err(|source| ConfigError::RatingFormat {
            path: path.to_path_buf(),
            source,
        })?;

    rating
        .validate()
        .map_err(|source| ConfigError::InvalidRating {
            path: Some(path.to_path_buf()),
            source,
        })?;

    Ok(rating)
}

#[derive(Debug)]
pub enum ConfigError {
    EmptyRatingPath,
    RatingFile {
        path: PathBuf,
        source: std::io::Error,
    },
    RatingFormat {
        path: PathBuf,
        source: serde_json::Error,
    },
    InvalidRating {
        path: Option<PathBuf>,
        source: RatingConfigError,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConfigError::EmptyRatingPath => {
                write!(f, "QUOTE_RATING_PATH is set but empty")
            }
            ConfigError::RatingFile { path, .. } => {
                write!(f, "unable to read rate sheet {}", path.display())
            }
            ConfigError::RatingFormat { path, source } => {
                write!(f, "rate sheet {} is not valid JSON: {}", path.display(), source)
            }
            ConfigError::InvalidRating {
                path: Some(path),
                source,
            } => write!(f, "rate sheet {} rejected: {}", path.display(), source),
            ConfigError::InvalidRating { path: None, source } => {
                write!(f, "standard rate sheet rejected: {}", source)
            }
        }
    }
}

impl std::error::Error for ConfigError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            ConfigError::EmptyRatingPath => None,
            ConfigError::RatingFile { source, .. } => Some(source),
            ConfigError::RatingFormat { source, .. } => Some(source),
            ConfigError::InvalidRating { source, .. } => Some(source),
        }
    }
}
