//! Scene configuration resource.
//!
//! Settings for scene file handling, loaded from an INI file. Defaults are
//! safe to run with when no file exists.
//!
//! # Configuration File Format
//!
//! ```ini
//! [scene]
//! config_root = ./data/configs/
//! indent = 2
//! fixed_step = 0.016666668
//! ```

use configparser::ini::Ini;
use log::info;
use std::path::{Path, PathBuf};

/// Default safe values for startup
const DEFAULT_CONFIG_ROOT: &str = "./data/configs/";
const DEFAULT_INDENT: usize = 2;
const DEFAULT_FIXED_STEP: f32 = 1.0 / 60.0;
const DEFAULT_CONFIG_PATH: &str = "./scene.ini";

/// Scene configuration.
///
/// Scene documents are read from and written to paths relative to
/// `config_root`.
#[derive(Debug, Clone)]
pub struct SceneConfig {
    /// Directory scene document paths are relative to.
    pub config_root: PathBuf,
    /// Spaces per indentation level when writing scene documents.
    pub indent: usize,
    /// Seconds per fixed update step.
    pub fixed_step: f32,
    /// Path to the configuration file.
    pub config_path: PathBuf,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self::new()
    }
}

impl SceneConfig {
    /// Create a new configuration with safe default values.
    pub fn new() -> Self {
        Self {
            config_root: PathBuf::from(DEFAULT_CONFIG_ROOT),
            indent: DEFAULT_INDENT,
            fixed_step: DEFAULT_FIXED_STEP,
            config_path: PathBuf::from(DEFAULT_CONFIG_PATH),
        }
    }

    /// Create a new configuration with a custom config file path.
    pub fn with_path(path: impl Into<PathBuf>) -> Self {
        Self {
            config_path: path.into(),
            ..Self::new()
        }
    }

    /// Create a default configuration reading scene documents from `root`.
    pub fn with_root(root: impl Into<PathBuf>) -> Self {
        Self {
            config_root: root.into(),
            ..Self::new()
        }
    }

    /// Load configuration from the INI file.
    ///
    /// Missing values retain their current (default) values.
    /// Returns an error if the file cannot be read or parsed.
    pub fn load_from_file(&mut self) -> Result<(), String> {
        let mut config = Ini::new();
        config
            .load(&self.config_path)
            .map_err(|e| format!("Failed to load config file: {}", e))?;

        if let Some(root) = config.get("scene", "config_root") {
            self.config_root = PathBuf::from(root);
        }
        if let Some(indent) = config.getuint("scene", "indent").ok().flatten() {
            self.indent = indent as usize;
        }
        if let Some(step) = config.getfloat("scene", "fixed_step").ok().flatten() {
            if step > 0.0 {
                self.fixed_step = step as f32;
            }
        }

        info!(
            "Loaded config: root={:?}, indent={}, fixed_step={}",
            self.config_root, self.indent, self.fixed_step
        );

        Ok(())
    }

    /// Save configuration to the INI file.
    ///
    /// Creates the file if it doesn't exist.
    pub fn save_to_file(&self) -> Result<(), String> {
        let mut config = Ini::new();

        config.set(
            "scene",
            "config_root",
            Some(self.config_root.to_string_lossy().into_owned()),
        );
        config.set("scene", "indent", Some(self.indent.to_string()));
        config.set("scene", "fixed_step", Some(self.fixed_step.to_string()));

        config
            .write(&self.config_path)
            .map_err(|e| format!("Failed to save config file: {}", e))?;

        info!("Saved config to {:?}", self.config_path);

        Ok(())
    }

    /// `path` resolved against the config root.
    pub fn full_path(&self, path: impl AsRef<Path>) -> PathBuf {
        self.config_root.join(path)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    #[test]
    fn test_defaults() {
        let config = SceneConfig::new();
        assert_eq!(config.config_root, PathBuf::from("./data/configs/"));
        assert_eq!(config.indent, 2);
        assert!((config.fixed_step - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_full_path_joins_root() {
        let config = SceneConfig::with_root("/tmp/scenes");
        assert_eq!(
            config.full_path("menu/main.json"),
            PathBuf::from("/tmp/scenes/menu/main.json")
        );
    }

    #[test]
    fn test_load_missing_file_is_err() {
        let mut config = SceneConfig::with_path("/nonexistent/dir/scene.ini");
        assert!(config.load_from_file().is_err());
        assert_eq!(config.indent, 2);
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ini");
        fs::write(&path, "[scene]\nindent = 4\n").unwrap();

        let mut config = SceneConfig::with_path(&path);
        config.load_from_file().unwrap();
        assert_eq!(config.indent, 4);
        assert_eq!(config.config_root, PathBuf::from("./data/configs/"));
        assert!((config.fixed_step - 1.0 / 60.0).abs() < 1e-6);
    }

    #[test]
    fn test_save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("scene.ini");

        let mut saved = SceneConfig::with_path(&path);
        saved.config_root = PathBuf::from("assets/scenes");
        saved.indent = 3;
        saved.fixed_step = 0.02;
        saved.save_to_file().unwrap();

        let mut loaded = SceneConfig::with_path(&path);
        loaded.load_from_file().unwrap();
        assert_eq!(loaded.config_root, PathBuf::from("assets/scenes"));
        assert_eq!(loaded.indent, 3);
        assert!((loaded.fixed_step - 0.02).abs() < 1e-6);
    }
}
