//! Centralized runtime options with TOML preset support.
//!
//! All tweakable settings (camera projection, path-following tuning)
//! are consolidated here. Options serialize to/from TOML so a debug panel
//! or preset file can override individual sections.

mod camera;
mod path;

use std::path::Path;

pub use camera::CameraOptions;
pub use path::PathOptions;
use serde::{Deserialize, Serialize};

use crate::error::MotorcadeError;

/// Top-level options container. All sub-structs use `#[serde(default)]` so
/// partial TOML files (e.g. only overriding `[path]`) work correctly.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Options {
    /// Camera projection parameters.
    pub camera: CameraOptions,
    /// Path-following tuning.
    pub path: PathOptions,
}

impl Options {
    /// Load options from a TOML file. Missing fields use defaults.
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::Io`] on read failure and
    /// [`MotorcadeError::OptionsParse`] on malformed TOML.
    pub fn load(path: &Path) -> Result<Self, MotorcadeError> {
        let content = std::fs::read_to_string(path).map_err(MotorcadeError::Io)?;
        toml::from_str(&content)
            .map_err(|e| MotorcadeError::OptionsParse(e.to_string()))
    }

    /// Save options to a TOML file (pretty-printed).
    ///
    /// # Errors
    ///
    /// Returns [`MotorcadeError::OptionsParse`] on serialization failure
    /// and [`MotorcadeError::Io`] on write failure.
    pub fn save(&self, path: &Path) -> Result<(), MotorcadeError> {
        let content = toml::to_string_pretty(self)
            .map_err(|e| MotorcadeError::OptionsParse(e.to_string()))?;
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(MotorcadeError::Io)?;
        }
        std::fs::write(path, content).map_err(MotorcadeError::Io)
    }

    /// List available preset names (TOML file stems) in a directory.
    #[must_use]
    pub fn list_presets(dir: &Path) -> Vec<String> {
        let mut names = Vec::new();
        if let Ok(entries) = std::fs::read_dir(dir) {
            for entry in entries.flatten() {
                let path = entry.path();
                if path.extension().is_some_and(|ext| ext == "toml") {
                    if let Some(stem) =
                        path.file_stem().and_then(|s| s.to_str())
                    {
                        names.push(stem.to_owned());
                    }
                }
            }
        }
        names.sort();
        names
    }
}
