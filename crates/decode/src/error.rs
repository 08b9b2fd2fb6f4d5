//! Decode error types (thiserror-based).

use thiserror::Error;

/// Errors that can occur while decoding a source file.
#[derive(Error, Debug)]
pub enum DecodeError {
    #[error("IO error reading {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Parse error in {path} at line {line}: {reason}")]
    Parse {
        path: String,
        line: usize,
        reason: String,
    },

    #[error("Sensor file {path} contains no data rows")]
    Empty { path: String },

    #[error("Unsupported source file: {path}")]
    UnsupportedSource { path: String },

    #[error("Video probe failed for {path}: {reason}")]
    VideoProbe { path: String, reason: String },
}

/// Convenience Result type for decode operations.
pub type DecodeResult<T> = Result<T, DecodeError>;
