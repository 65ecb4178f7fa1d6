//! Error types for joballoc

use chrono::NaiveDate;
use thiserror::Error;

/// Configuration-related errors
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration directory not found")]
    NotFound,
}

#[derive(Debug, Error)]
pub enum Error {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Invalid date in report {report}, row {row}: {value:?}")]
    MalformedDate {
        report: String,
        row: usize,
        value: String,
    },

    #[error("Invalid number in report {report}, row {row}, column {column}: {value:?}")]
    MalformedNumber {
        report: String,
        row: usize,
        column: String,
        value: String,
    },

    #[error("Report {report} is missing required column {column:?}")]
    MissingColumn { report: String, column: String },

    #[error("Asset {asset}: arrival {arrival} is after departure {departure}")]
    InvalidDateRange {
        asset: String,
        arrival: NaiveDate,
        departure: NaiveDate,
    },

    #[error("No report files found in {dir}")]
    EmptyInput { dir: String },

    #[error("Excel export error: {0}")]
    Excel(String),
}

pub type Result<T> = std::result::Result<T, Error>;
