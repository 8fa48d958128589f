//! Error types for the ingestion crate.

use thiserror::Error;

/// Errors that can occur during ingestion.
#[derive(Error, Debug)]
pub enum IngestionError {
    #[error("Failed to read file: {0}")]
    FileRead(#[from] std::io::Error),

    #[error("Failed to parse CSV: {0}")]
    Csv(#[from] csv::Error),

    #[error("Invalid timestamp '{0}', expected e.g. '01-Mar-20 13'")]
    InvalidTimestamp(String),

    #[error("Unknown pollutant: {0}")]
    UnknownPollutant(String),

    #[error("No stations to build series for")]
    NoStations,
}

/// Result type for ingestion operations.
pub type Result<T> = std::result::Result<T, IngestionError>;
