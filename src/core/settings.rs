/*!
# Viewer Settings

Settings for discovery, display and watch mode, loaded from TOML.
Every field has a default, so an empty file (or no file at all)
yields the stock behaviour.

```toml
[discovery]
max_configuration_files = 10
max_files_per_type = 100
detection_threshold = 2
exclude_dirs = ["node_modules"]

[display]
synonym_language = "ru"

[watch]
poll_interval_ms = 1000
```
*/

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use super::errors::{Result, ViewerError};

/// Name of the per-workspace settings file
pub const WORKSPACE_SETTINGS_FILE: &str = ".onec-viewer.toml";

/// Complete settings tree
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ViewerSettings {
    #[serde(default)]
    pub discovery: DiscoverySettings,

    #[serde(default)]
    pub display: DisplaySettings,

    #[serde(default)]
    pub watch: WatchSettings,
}

/// Limits and heuristics used while looking for configurations
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiscoverySettings {
    /// Maximum number of `Configuration.xml` files taken from the workspace
    #[serde(default = "default_max_configuration_files")]
    pub max_configuration_files: usize,

    /// Maximum number of XML files inspected per object-type folder
    /// during heuristic detection
    #[serde(default = "default_max_files_per_type")]
    pub max_files_per_type: usize,

    /// Minimum number of known object-type folders a directory must
    /// contain to be accepted as a configuration root
    #[serde(default = "default_detection_threshold")]
    pub detection_threshold: usize,

    /// Directory names skipped by workspace searches
    #[serde(default = "default_exclude_dirs")]
    pub exclude_dirs: Vec<String>,
}

/// Presentation preferences
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DisplaySettings {
    /// Language code preferred when a synonym has several translations
    #[serde(default = "default_synonym_language")]
    pub synonym_language: String,
}

/// Watch mode
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WatchSettings {
    #[serde(default = "default_poll_interval_ms")]
    pub poll_interval_ms: u64,
}

fn default_max_configuration_files() -> usize {
    10
}

fn default_max_files_per_type() -> usize {
    100
}

fn default_detection_threshold() -> usize {
    2
}

fn default_exclude_dirs() -> Vec<String> {
    vec!["node_modules".to_string()]
}

fn default_synonym_language() -> String {
    "ru".to_string()
}

fn default_poll_interval_ms() -> u64 {
    1000
}

impl Default for DiscoverySettings {
    fn default() -> Self {
        Self {
            max_configuration_files: default_max_configuration_files(),
            max_files_per_type: default_max_files_per_type(),
            detection_threshold: default_detection_threshold(),
            exclude_dirs: default_exclude_dirs(),
        }
    }
}

impl Default for DisplaySettings {
    fn default() -> Self {
        Self {
            synonym_language: default_synonym_language(),
        }
    }
}

impl Default for WatchSettings {
    fn default() -> Self {
        Self {
            poll_interval_ms: default_poll_interval_ms(),
        }
    }
}

impl ViewerSettings {
    /// Parses settings from TOML text
    pub fn from_toml_str(content: &str) -> Result<Self> {
        toml::from_str(content).map_err(|e| ViewerError::settings(e.to_string()))
    }

    /// Loads settings from a file
    pub fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).map_err(|e| ViewerError::io(path, e))?;
        let settings = Self::from_toml_str(&content)?;
        tracing::debug!("Loaded settings from {}", path.display());
        Ok(settings)
    }

    /// Resolves settings for a workspace.
    ///
    /// Order: explicit file, `.onec-viewer.toml` in the first workspace
    /// folder, the per-user settings file, built-in defaults.
    pub fn resolve(explicit: Option<&Path>, workspace_folders: &[PathBuf]) -> Result<Self> {
        if let Some(path) = explicit {
            return Self::load_from_file(path);
        }

        if let Some(first) = workspace_folders.first() {
            let local = first.join(WORKSPACE_SETTINGS_FILE);
            if local.is_file() {
                return Self::load_from_file(&local);
            }
        }

        if let Some(user) = Self::user_settings_path() {
            if user.is_file() {
                return Self::load_from_file(&user);
            }
        }

        Ok(Self::default())
    }

    /// `<config dir>/onec-viewer/settings.toml`
    pub fn user_settings_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("onec-viewer").join("settings.toml"))
    }

    /// Serializes settings back to TOML
    pub fn to_toml_string(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| ViewerError::settings(e.to_string()))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    #[test]
    fn test_empty_file_gives_defaults() {
        let settings = ViewerSettings::from_toml_str("").unwrap();
        assert_eq!(settings, ViewerSettings::default());
        assert_eq!(settings.discovery.max_configuration_files, 10);
        assert_eq!(settings.discovery.max_files_per_type, 100);
        assert_eq!(settings.discovery.detection_threshold, 2);
        assert_eq!(settings.display.synonym_language, "ru");
    }

    #[test]
    fn test_partial_override() {
        let settings = ViewerSettings::from_toml_str(
            "[discovery]\ndetection_threshold = 3\n\n[display]\nsynonym_language = \"en\"\n",
        )
        .unwrap();
        assert_eq!(settings.discovery.detection_threshold, 3);
        assert_eq!(settings.discovery.max_configuration_files, 10);
        assert_eq!(settings.discovery.exclude_dirs, vec!["node_modules".to_string()]);
        assert_eq!(settings.display.synonym_language, "en");
    }

    #[test]
    fn test_invalid_toml_is_settings_error() {
        let err = ViewerSettings::from_toml_str("[discovery\n").unwrap_err();
        assert!(matches!(err, ViewerError::Settings(_)));
    }

    #[test]
    fn test_workspace_file_takes_precedence_over_defaults() {
        let temp_dir = TempDir::new().unwrap();
        std::fs::write(
            temp_dir.path().join(WORKSPACE_SETTINGS_FILE),
            "[watch]\npoll_interval_ms = 250\n",
        )
        .unwrap();

        let settings =
            ViewerSettings::resolve(None, &[temp_dir.path().to_path_buf()]).unwrap();
        assert_eq!(settings.watch.poll_interval_ms, 250);
    }

    #[test]
    fn test_round_trip_through_toml() {
        let text = ViewerSettings::default().to_toml_string().unwrap();
        assert!(text.contains("detection_threshold = 2"));
        assert_eq!(
            ViewerSettings::from_toml_str(&text).unwrap(),
            ViewerSettings::default()
        );
    }
}
