//! User settings for Bookshelf
//!
//! Manages file names and console preferences.

use serde::{Deserialize, Serialize};

use super::paths::LibraryPaths;
use crate::error::LibraryError;

/// User settings for Bookshelf
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Settings {
    /// File name of the primary data file, relative to the base directory
    #[serde(default = "default_data_file")]
    pub data_file: String,

    /// File name of the CSV export, relative to the base directory
    #[serde(default = "default_export_file")]
    pub export_file: String,

    /// Whether the console prints the welcome banner on start
    #[serde(default = "default_show_welcome")]
    pub show_welcome: bool,
}

fn default_data_file() -> String {
    "books.json".to_string()
}

fn default_export_file() -> String {
    "books.csv".to_string()
}

fn default_show_welcome() -> bool {
    true
}

impl Default for Settings {
    fn default() -> Self {
        Self {
            data_file: default_data_file(),
            export_file: default_export_file(),
            show_welcome: default_show_welcome(),
        }
    }
}

impl Settings {
    /// Load settings from disk, or create default settings if file doesn't exist
    pub fn load_or_create(paths: &LibraryPaths) -> Result<Self, LibraryError> {
        let settings_path = paths.settings_file();

        if settings_path.exists() {
            let contents = std::fs::read_to_string(&settings_path).map_err(|e| {
                LibraryError::Io(format!("Failed to read settings file: {}", e))
            })?;

            let settings: Settings = serde_json::from_str(&contents).map_err(|e| {
                LibraryError::Config(format!("Failed to parse settings file: {}", e))
            })?;

            log::debug!("Loaded settings from {}", settings_path.display());
            Ok(settings)
        } else {
            // Not persisted until the caller asks
            Ok(Settings::default())
        }
    }

    /// Save settings to disk
    pub fn save(&self, paths: &LibraryPaths) -> Result<(), LibraryError> {
        paths.ensure_directories()?;

        let settings_path = paths.settings_file();
        let contents = serde_json::to_string_pretty(self)?;

        std::fs::write(&settings_path, contents).map_err(|e| {
            LibraryError::Io(format!("Failed to write settings file: {}", e))
        })?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_settings() {
        let settings = Settings::default();
        assert_eq!(settings.data_file, "books.json");
        assert_eq!(settings.export_file, "books.csv");
        assert!(settings.show_welcome);
    }

    #[test]
    fn test_missing_file_gives_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let settings = Settings::load_or_create(&paths).unwrap();
        assert_eq!(settings.data_file, "books.json");
        assert!(!paths.settings_file().exists());
    }

    #[test]
    fn test_save_and_load() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());

        let mut settings = Settings::default();
        settings.data_file = "shelf.json".into();
        settings.show_welcome = false;
        settings.save(&paths).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.data_file, "shelf.json");
        assert!(!loaded.show_welcome);
    }

    #[test]
    fn test_partial_file_fills_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), r#"{"export_file": "out.csv"}"#).unwrap();

        let loaded = Settings::load_or_create(&paths).unwrap();
        assert_eq!(loaded.export_file, "out.csv");
        assert_eq!(loaded.data_file, "books.json");
    }

    #[test]
    fn test_save_creates_base_directory() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().join("new").join("shelf"));

        Settings::default().save(&paths).unwrap();
        assert!(paths.settings_file().exists());

        let raw = std::fs::read_to_string(paths.settings_file()).unwrap();
        assert!(raw.contains("\n  \"show_welcome\": true"));
    }

    #[test]
    fn test_unknown_fields_are_ignored() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(
            paths.settings_file(),
            r#"{"schema_version": 1, "show_welcome": false}"#,
        )
        .unwrap();

        assert!(!Settings::load_or_create(&paths).unwrap().show_welcome);
    }

    #[test]
    fn test_invalid_file_is_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let paths = LibraryPaths::with_base_dir(temp_dir.path().to_path_buf());
        std::fs::write(paths.settings_file(), "not json").unwrap();

        let err = Settings::load_or_create(&paths).unwrap_err();
        assert!(matches!(err, LibraryError::Config(_)));
    }
}
