//! Error types for tally

use thiserror::Error;

#[derive(Error, Debug)]
pub enum Error {
    /// A present date-bearing field matched none of the supported formats,
    /// or no date-bearing field was present at all.
    #[error("Unable to parse date: {0}")]
    DateParse(String),

    /// A monetary field could not be converted to an exact decimal. Never
    /// defaulted: a silently zeroed balance would corrupt downstream math.
    #[error("Unable to parse amount: {0}")]
    NumericConversion(String),

    #[error("CSV parsing error: {0}")]
    Csv(#[from] csv::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
