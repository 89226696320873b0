//! Settings error types.

use std::path::PathBuf;

use thiserror::Error;

use crate::types::DurationError;

/// Errors that can occur while loading the duration settings.
#[derive(Debug, Error)]
pub enum SettingsError {
    /// The settings file could not be read.
    #[error("failed to read settings file {}: {source}", .path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The settings file is not valid JSON for the expected shape.
    #[error("invalid settings file {}: {source}", .path.display())]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// A configured duration is not a positive number of minutes.
    #[error("invalid duration in settings: {0}")]
    InvalidDuration(#[from] DurationError),
}

impl SettingsError {
    /// Returns a user-friendly suggestion for resolving this error.
    #[must_use]
    pub fn suggestion(&self) -> &'static str {
        match self {
            Self::Read { .. } => "check the path passed to --config",
            Self::Parse { .. } => {
                r#"expected JSON like {"work": 25, "short_break": 5, "long_break": 15}"#
            }
            Self::InvalidDuration(_) => "durations must be 1 minute or more",
        }
    }
}
