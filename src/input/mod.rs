//! Login history sources

pub mod csv_source;

pub use csv_source::CsvLoginSource;

use crate::models::EventError;
use thiserror::Error;

/// Errors that can occur while loading a login history
#[derive(Error, Debug)]
pub enum InputError {
    #[error("Failed to open {path}: {source}")]
    Open {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid record at row {row}: {source}")]
    InvalidRecord {
        row: usize,
        #[source]
        source: EventError,
    },
}
