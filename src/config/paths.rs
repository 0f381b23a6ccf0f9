//! Path management for Bookshelf
//!
//! ## Path Resolution Order
//!
//! 1. An explicit directory passed on the command line (`--data-dir`)
//! 2. `BOOKSHELF_DATA_DIR` environment variable (if set)
//! 3. The current working directory

use std::path::PathBuf;

use crate::error::LibraryError;

use super::settings::Settings;

/// Environment variable that overrides the data directory
pub const DATA_DIR_ENV: &str = "BOOKSHELF_DATA_DIR";

/// Manages all paths used by Bookshelf
#[derive(Debug, Clone)]
pub struct LibraryPaths {
    /// Base directory holding the settings, data, and export files
    base_dir: PathBuf,
}

impl LibraryPaths {
    /// Create a new LibraryPaths instance from the environment
    ///
    /// # Errors
    ///
    /// Returns an error if the current directory cannot be determined.
    pub fn new() -> Result<Self, LibraryError> {
        let base_dir = if let Ok(custom) = std::env::var(DATA_DIR_ENV) {
            PathBuf::from(custom)
        } else {
            std::env::current_dir().map_err(|e| {
                LibraryError::Config(format!("Could not determine current directory: {}", e))
            })?
        };

        Ok(Self { base_dir })
    }

    /// Create LibraryPaths with a custom base directory
    pub fn with_base_dir(base_dir: PathBuf) -> Self {
        Self { base_dir }
    }

    /// Resolve paths, preferring an explicit directory when given
    pub fn resolve(explicit: Option<PathBuf>) -> Result<Self, LibraryError> {
        match explicit {
            Some(dir) => Ok(Self::with_base_dir(dir)),
            None => Self::new(),
        }
    }

    /// Get the base directory
    pub fn base_dir(&self) -> &PathBuf {
        &self.base_dir
    }

    /// Get the path to the settings file
    pub fn settings_file(&self) -> PathBuf {
        self.base_dir.join("bookshelf.json")
    }

    /// Get the path to the primary book data file
    pub fn books_file(&self, settings: &Settings) -> PathBuf {
        self.base_dir.join(&settings.data_file)
    }

    /// Get the path to the CSV export file
    pub fn export_file(&self, settings: &Settings) -> PathBuf {
        self.base_dir.join(&settings.export_file)
    }

    /// Ensure the base directory exists
    pub fn ensure_directories(&self) -> Result<(), LibraryError> {
        std::fs::create_dir_all(&self.base_dir)
            .map_err(|e| LibraryError::Io(format!("Failed to create base directory: {}", e)))
    }
}
