//! Error types for the plan boundary (parsing, editing, loading and storage)
//!
//! The projection engine itself is infallible; everything that can fail sits
//! around it.

use thiserror::Error;

/// Failure to turn raw user input into a number
#[derive(Error, Debug, Clone, PartialEq)]
pub enum ParseError {
    #[error("empty value")]
    Empty,

    #[error("'{0}' is not a number")]
    NotANumber(String),

    #[error("'{0}' is not a finite number")]
    NotFinite(String),

    #[error("{0} must not be negative")]
    Negative(f64),
}

#[derive(Error, Debug)]
pub enum PlannerError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("CSV error: {0}")]
    Csv(#[from] csv::Error),

    #[error("Serialization error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid number: {0}")]
    Parse(#[from] ParseError),

    #[error("Invalid timeframe: {0} months (expected 12, 24, 36, 48 or 60)")]
    InvalidTimeframe(u32),

    #[error("Unknown scenario '{0}' (expected optimistic, realistic or pessimistic)")]
    UnknownScenario(String),

    #[error("No entry with id {0}")]
    UnknownId(u32),

    #[error("At least one entry must remain")]
    LastEntry,

    #[error("A plan needs at least one revenue stream and one expense category")]
    EmptyPlan,

    #[error("Invalid storage key '{0}'")]
    InvalidKey(String),
}

pub type Result<T> = std::result::Result<T, PlannerError>;
