//! Error types for the project crate (thiserror-based).

use thiserror::Error;

/// Errors that can occur during project file operations.
#[derive(Error, Debug)]
pub enum ProjectError {
    /// File I/O error (read, write, path resolution).
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Project file is missing required fields or is internally inconsistent.
    #[error("Invalid project file: {reason}")]
    InvalidProject { reason: String },

    /// The project file path does not exist or is not a file.
    #[error("Project file not found: {path}")]
    NotFound { path: String },
}

/// Convenience Result type for project operations.
pub type ProjectResult<T> = Result<T, ProjectError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn error_display_messages() {
        let err = ProjectError::InvalidProject {
            reason: "series walk-0 references unknown track".into(),
        };
        assert!(err.to_string().contains("unknown track"));

        let err = ProjectError::NotFound {
            path: "/tmp/missing.alp".into(),
        };
        assert!(err.to_string().contains("missing.alp"));
    }

    #[test]
    fn io_error_conversion() {
        let io_err = std::io::Error::new(std::io::ErrorKind::NotFound, "file not found");
        let proj_err: ProjectError = io_err.into();
        assert!(matches!(proj_err, ProjectError::Io(_)));
    }

    #[test]
    fn json_error_conversion() {
        let result: Result<crate::types::SavedProject, _> = serde_json::from_str("not json");
        let proj_err: ProjectError = result.unwrap_err().into();
        assert!(matches!(proj_err, ProjectError::Json(_)));
    }
}
