//! Error types for Structura.
//!
//! A single error enum covers configuration, archive access, artifact
//! resolution and serialization failures across the workspace.

use thiserror::Error;

/// Unified error type for Structura.
///
/// Library functions return `Result<T, AppError>` and never panic on bad
/// input; the caller decides whether a failure is fatal.
#[derive(Error, Debug)]
pub enum AppError {
    /// Unknown mode, bad flag value, unreadable config file
    #[error("Invalid configuration: {0}")]
    InvalidConfiguration(String),

    /// An entry referenced by the structure is not in the archive
    #[error("Artifact not found in archive: {0}")]
    ArtifactNotFound(String),

    /// A table artifact that could not be parsed at all
    #[error("Malformed tabular data in {path}: {reason}")]
    MalformedTabularData { path: String, reason: String },

    /// Unreadable archive or missing structure entry
    #[error("Archive error: {0}")]
    Archive(String),

    /// I/O and filesystem errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Serialization/deserialization errors
    #[error("Serialization error: {0}")]
    Serialization(String),

    /// Generic errors
    #[error("{0}")]
    Other(String),
}

impl From<serde_json::Error> for AppError {
    fn from(err: serde_json::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

impl From<serde_yaml::Error> for AppError {
    fn from(err: serde_yaml::Error) -> Self {
        AppError::Serialization(err.to_string())
    }
}

/// Convenience type alias for Results with AppError.
pub type AppResult<T> = Result<T, AppError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_display_messages() {
        let err = AppError::ArtifactNotFound("figures/fileoutpart0.png".to_string());
        assert_eq!(
            err.to_string(),
            "Artifact not found in archive: figures/fileoutpart0.png"
        );

        let err = AppError::MalformedTabularData {
            path: "tables/fileoutpart1.csv".to_string(),
            reason: "no header columns".to_string(),
        };
        assert!(err.to_string().contains("tables/fileoutpart1.csv"));
    }

    #[test]
    fn test_from_serde_json() {
        let err: AppError = serde_json::from_str::<serde_json::Value>("{not json")
            .unwrap_err()
            .into();
        assert!(matches!(err, AppError::Serialization(_)));
    }
}
