//! Persisted report settings and platform paths for the bugshake host.

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::PathBuf;

/// Report settings persisted between sessions.
///
/// Stored as JSON in the user's config directory
/// (e.g., `~/.config/bugshake/settings.json` on Linux).
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize)]
pub struct Settings {
    /// Addresses that receive bug reports.
    #[serde(default)]
    pub recipients: Vec<String>,
    /// Prefilled subject line.
    #[serde(default)]
    pub subject: Option<String>,
    /// Prefilled body text.
    #[serde(default)]
    pub body: Option<String>,
}

impl Settings {
    /// Returns the path to the settings file.
    ///
    /// Creates the config directory if it doesn't exist.
    fn config_path() -> Option<PathBuf> {
        project_dirs().map(|dirs| {
            let config_dir = dirs.config_dir();
            if !config_dir.exists() {
                let _ = fs::create_dir_all(config_dir);
            }
            config_dir.join("settings.json")
        })
    }

    /// Loads settings from disk, falling back to defaults if not found.
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| fs::read_to_string(&path).ok())
            .and_then(|content| serde_json::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Persists settings to disk.
    ///
    /// # Errors
    /// Returns an error if serialization or file writing fails.
    pub fn save(&self) -> Result<()> {
        if let Some(path) = Self::config_path() {
            let json =
                serde_json::to_string_pretty(self).context("Failed to serialize settings")?;
            fs::write(&path, json)
                .with_context(|| format!("Failed to write {}", path.display()))?;
        }
        Ok(())
    }
}

fn project_dirs() -> Option<ProjectDirs> {
    ProjectDirs::from("", "", "bugshake")
}

/// Directory under which outgoing report attachments are staged.
pub fn staging_root() -> Option<PathBuf> {
    project_dirs().map(|dirs| dirs.data_dir().join("reports"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_fall_back_to_defaults() {
        let settings: Settings = serde_json::from_str("{}").unwrap();
        assert_eq!(settings, Settings::default());
    }
}
