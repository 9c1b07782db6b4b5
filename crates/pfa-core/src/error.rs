//! # Error Hierarchy
//!
//! Structured error types shared across the workspace, built with
//! `thiserror`. No `Box<dyn Error>`, no `.unwrap()` outside tests.
//!
//! The scoring engine itself never fails; these errors only arise at
//! boundaries where raw input becomes a domain primitive.

use thiserror::Error;

/// Top-level error type for the Private Fund Architect.
#[derive(Error, Debug)]
pub enum PfaError {
    /// Domain primitive validation failure.
    #[error("validation error: {0}")]
    Validation(#[from] ValidationError),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

/// Validation failures for domain primitives.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Jurisdiction identifier is empty or whitespace-only.
    #[error("invalid jurisdiction ID: must be non-empty")]
    InvalidJurisdictionId,

    /// Strategy string is not one of the four supported strategies.
    #[error(
        "unknown strategy: \"{0}\" (expected private-equity, real-estate, venture-capital or private-credit)"
    )]
    UnknownStrategy(String),
}
