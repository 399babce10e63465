//! Error types for affectlog

use thiserror::Error;

/// Errors that can occur while loading or querying measurement data
#[derive(Debug, Error)]
pub enum AnalyticsError {
    /// The dataset could not be loaded as a whole. Partial loads are never
    /// served; the previously active store (if any) stays in place.
    #[error("Failed to load dataset: {0}")]
    DataSource(String),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid JSON: {0}")]
    Json(#[from] serde_json::Error),

    /// A query named a shift that is not part of the configured schedule.
    /// Shifts are a closed set; lookups never fall back to a default.
    #[error("Unknown shift: {0}")]
    UnknownShift(String),

    /// Caller-supplied bounds could not be resolved into two ordered
    /// datetime bounds.
    #[error("Invalid time range: {0}")]
    InvalidRange(String),
}
