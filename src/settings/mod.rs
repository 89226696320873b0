//! Duration settings source.
//!
//! Durations come from three layers, later ones winning:
//! 1. Built-in defaults (25/5/15 minutes)
//! 2. A JSON settings file, missing fields falling back to defaults
//! 3. Command-line overrides
//!
//! The file is only read, never written. Without `--config` the default
//! location under the user's config directory is used when it exists.

mod error;

use std::fs;
use std::path::{Path, PathBuf};

use tracing::debug;

pub use error::SettingsError;

use crate::types::Durations;

/// Directory name under the platform config directory.
pub const APP_DIR_NAME: &str = "pomodoro-dashboard";

/// Settings file name.
pub const SETTINGS_FILE_NAME: &str = "settings.json";

/// Per-field overrides, typically from command-line flags.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct DurationOverrides {
    pub work: Option<u32>,
    pub short_break: Option<u32>,
    pub long_break: Option<u32>,
}

impl DurationOverrides {
    /// Applies every present override on top of `durations`.
    pub fn apply(&self, mut durations: Durations) -> Durations {
        if let Some(minutes) = self.work {
            durations.work = minutes;
        }
        if let Some(minutes) = self.short_break {
            durations.short_break = minutes;
        }
        if let Some(minutes) = self.long_break {
            durations.long_break = minutes;
        }
        durations
    }
}

/// Returns the default settings file location, if the platform has one.
pub fn default_settings_path() -> Option<PathBuf> {
    dirs::config_dir().map(|dir| dir.join(APP_DIR_NAME).join(SETTINGS_FILE_NAME))
}

/// Loads and validates durations from a JSON settings file.
pub fn load_file(path: &Path) -> Result<Durations, SettingsError> {
    let contents = fs::read_to_string(path).map_err(|source| SettingsError::Read {
        path: path.to_path_buf(),
        source,
    })?;
    let durations: Durations =
        serde_json::from_str(&contents).map_err(|source| SettingsError::Parse {
            path: path.to_path_buf(),
            source,
        })?;
    durations.validate()?;

    debug!(path = %path.display(), ?durations, "Loaded settings file");
    Ok(durations)
}

/// Resolves the effective durations.
///
/// An explicit `config` path must exist. The default location is optional
/// and silently skipped when absent.
pub fn resolve(
    config: Option<&Path>,
    overrides: DurationOverrides,
) -> Result<Durations, SettingsError> {
    let base = match config {
        Some(path) => load_file(path)?,
        None => match default_settings_path() {
            Some(path) if path.is_file() => load_file(&path)?,
            _ => {
                debug!("No settings file, using default durations");
                Durations::default()
            }
        },
    };

    let durations = overrides.apply(base);
    durations.validate()?;
    Ok(durations)
}
