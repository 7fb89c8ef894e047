//! Error types shared by the reporting and monitoring components.

use thiserror::Error;

#[derive(Error, Debug)]
pub enum AquaError {
    #[error("The input list is empty, this operation cannot be performed")]
    EmptyInput,

    #[error("Non-numerical value presented at position {index}: {value}")]
    NonNumericInput { index: usize, value: String },

    #[error("Invalid date {input}: {reason}")]
    InvalidDate { input: String, reason: String },

    #[error("Invalid selection: {0}")]
    InvalidSelection(String),

    #[error("Transport error: {0}")]
    Transport(String),

    #[error("Malformed response: {0}")]
    MalformedResponse(String),

    #[error("Invalid value in row {row}, column {column}: {value:?}")]
    InvalidCell {
        row: usize,
        column: String,
        value: String,
    },

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),
}

pub type Result<T> = std::result::Result<T, AquaError>;
