//! Store error types (thiserror-based).

use thiserror::Error;

/// Errors surfaced by `ProjectStore` operations.
#[derive(Error, Debug)]
pub enum StoreError {
    #[error("Decode error: {0}")]
    Decode(#[from] al_decode::DecodeError),

    #[error("Project error: {0}")]
    Project(#[from] al_project::ProjectError),

    #[error("Time map error: {0}")]
    TimeMap(#[from] al_timemap::TimeMapError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Referenced a track id absent from the index.
    #[error("Track not found: {id}")]
    TrackNotFound { id: String },

    /// Referenced a series id absent from the index.
    #[error("Series not found: {id}")]
    SeriesNotFound { id: String },

    /// A load intent named a file whose suffix does not match the intent.
    #[error("Expected a {expected} source, got: {path}")]
    WrongSourceKind { expected: String, path: String },

    /// Alignment edit with inverted reference bounds.
    #[error("Invalid reference bounds for series {id}: end {end} < start {start}")]
    InvalidBounds { id: String, start: f64, end: f64 },

    /// Label with an inverted interval.
    #[error("Invalid label interval: end {end} < start {start}")]
    InvalidLabel { start: f64, end: f64 },

    /// Label index out of range.
    #[error("No label at index {index}")]
    LabelNotFound { index: usize },
}

/// Convenience Result type for store operations.
pub type StoreResult<T> = Result<T, StoreError>;
