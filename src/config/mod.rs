//! Configuration management for Bookshelf

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use directories::ProjectDirs;
use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::shelf::storage::DEFAULT_KEY;
use crate::theme::Theme;

/// Application configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Config {
    /// Selected theme name
    pub theme: String,

    /// Custom theme overrides (if any)
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub custom_theme: Option<Theme>,

    /// Storage key the bookshelf is saved under
    #[serde(default = "default_storage_key")]
    pub storage_key: String,

    /// Directory for persisted data, overriding the platform default
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub data_dir: Option<PathBuf>,

    /// Ask before deleting a book
    #[serde(default = "default_true")]
    pub confirm_delete: bool,

    /// Vim mode enabled (hjkl navigation on the shelves)
    #[serde(default = "default_true")]
    pub vim_mode: bool,
}

fn default_storage_key() -> String {
    DEFAULT_KEY.to_string()
}

fn default_true() -> bool {
    true
}

impl Default for Config {
    fn default() -> Self {
        Self {
            theme: "Tokyo Night".to_string(),
            custom_theme: None,
            storage_key: default_storage_key(),
            data_dir: None,
            confirm_delete: true,
            vim_mode: true,
        }
    }
}

impl Config {
    /// Load configuration from disk, or create default if not exists
    pub fn load() -> Result<Self> {
        Self::load_from(&Self::config_path()?)
    }

    /// Load configuration from `path`, writing the default there if missing
    pub fn load_from(path: &Path) -> Result<Self> {
        if path.exists() {
            let contents = std::fs::read_to_string(path)
                .with_context(|| format!("Failed to read config from {:?}", path))?;
            serde_json::from_str(&contents).with_context(|| "Failed to parse config.json")
        } else {
            let config = Self::default();
            config.save_to(path)?;
            Ok(config)
        }
    }

    /// Save configuration to `path`
    pub fn save_to(&self, path: &Path) -> Result<()> {
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create config directory {:?}", parent))?;
        }

        let contents =
            serde_json::to_string_pretty(self).with_context(|| "Failed to serialize config")?;

        std::fs::write(path, contents)
            .with_context(|| format!("Failed to write config to {:?}", path))?;

        Ok(())
    }

    /// Get the path to the config file
    pub fn config_path() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "bookshelf").context("Failed to determine config directory")?;
        Ok(proj_dirs.config_dir().join("config.json"))
    }

    /// Get the platform data directory path
    pub fn default_data_dir() -> Result<PathBuf> {
        let proj_dirs =
            ProjectDirs::from("", "", "bookshelf").context("Failed to determine data directory")?;
        Ok(proj_dirs.data_dir().to_path_buf())
    }

    /// Directory the bookshelf is stored in
    pub fn data_dir(&self) -> Result<PathBuf> {
        match &self.data_dir {
            Some(dir) => Ok(dir.clone()),
            None => Self::default_data_dir(),
        }
    }

    /// Path of the log file written while the TUI is running
    pub fn log_path(&self) -> Result<PathBuf> {
        Ok(self.data_dir()?.join("bookshelf.log"))
    }

    /// Get the active theme: the custom theme if set, else the named one
    pub fn active_theme(&self) -> Theme {
        if let Some(theme) = &self.custom_theme {
            return theme.clone();
        }
        Theme::by_name(&self.theme).unwrap_or_else(|| {
            warn!(theme = %self.theme, "Unknown theme, using Tokyo Night");
            Theme::tokyo_night()
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn default_config_uses_books_key() {
        let config = Config::default();
        assert_eq!(config.storage_key, "books");
        assert!(config.confirm_delete);
    }

    #[test]
    fn default_config_has_vim_mode_enabled() {
        let config = Config::default();
        assert!(config.vim_mode);
    }

    #[test]
    fn config_deserializes_with_defaults() {
        let json = r#"{"theme":"Custom","vim_mode":false}"#;
        let config: Config = serde_json::from_str(json).unwrap();
        assert_eq!(config.theme, "Custom");
        assert_eq!(config.storage_key, "books");
        assert!(config.confirm_delete);
        assert!(!config.vim_mode);
    }

    #[test]
    fn data_dir_override_wins() {
        let config = Config { data_dir: Some(PathBuf::from("/tmp/shelf")), ..Default::default() };
        assert_eq!(config.data_dir().unwrap(), PathBuf::from("/tmp/shelf"));
        assert_eq!(config.log_path().unwrap(), PathBuf::from("/tmp/shelf/bookshelf.log"));
    }

    #[test]
    fn load_from_creates_default_file() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("nested").join("config.json");

        let config = Config::load_from(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn save_to_then_load_from_round_trips() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("config.json");
        let config = Config {
            storage_key: "reading-list".into(),
            confirm_delete: false,
            ..Default::default()
        };

        config.save_to(&path).unwrap();
        assert_eq!(Config::load_from(&path).unwrap(), config);
    }

    #[test]
    fn active_theme_resolves_by_name() {
        let config = Config { theme: "tokyo night".into(), ..Default::default() };
        assert_eq!(config.active_theme().name, "Tokyo Night");

        let unknown = Config { theme: "Solarized".into(), ..Default::default() };
        assert_eq!(unknown.active_theme(), Theme::tokyo_night());
    }

    #[test]
    fn custom_theme_wins_over_name() {
        let custom = Theme { name: "Mine".into(), ..Theme::tokyo_night() };
        let config = Config { custom_theme: Some(custom.clone()), ..Default::default() };
        assert_eq!(config.active_theme(), custom);
    }
}
