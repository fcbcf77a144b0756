//! Configuration file loading and parsing
//!
//! Loads configuration from `~/.config/tabnav/config.toml`

use serde::Deserialize;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::core::{EngineConfig, DEFAULT_JUMPLIST_SIZE};

/// Main configuration file structure
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct ConfigFile {
    /// Mode timeouts
    pub timeouts: TimeoutConfig,
    /// Navigation history
    pub jumplist: JumpListConfig,
    /// Navigation behaviour
    pub navigation: NavigationConfig,
}

/// Timeouts in milliseconds
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct TimeoutConfig {
    /// Root mode gives up after this long
    pub root_ms: u64,
    /// Absolute jump auto-executes after the last digit
    pub jump_ms: u64,
    /// Window for the double-press "first" key
    pub double_key_ms: u64,
    /// Browse distance count auto-executes after the last digit
    pub count_ms: u64,
}

impl Default for TimeoutConfig {
    fn default() -> Self {
        Self {
            root_ms: 2000,
            jump_ms: 1000,
            double_key_ms: 400,
            count_ms: 800,
        }
    }
}

/// Jump list settings
#[derive(Debug, Deserialize)]
#[serde(default)]
pub struct JumpListConfig {
    /// Oldest entries are evicted past this length
    pub max_size: usize,
}

impl Default for JumpListConfig {
    fn default() -> Self {
        Self {
            max_size: DEFAULT_JUMPLIST_SIZE,
        }
    }
}

/// Navigation behaviour
#[derive(Debug, Default, Deserialize)]
#[serde(default)]
pub struct NavigationConfig {
    /// "First" lands on the first unpinned tab
    pub first_skips_pinned: bool,
}

impl ConfigFile {
    /// Get the config directory path (~/.config/tabnav)
    pub fn config_dir() -> Option<PathBuf> {
        dirs::config_dir().map(|p| p.join("tabnav"))
    }

    /// Get the config file path (~/.config/tabnav/config.toml)
    pub fn config_path() -> Option<PathBuf> {
        Self::config_dir().map(|p| p.join("config.toml"))
    }

    /// Load configuration from file
    ///
    /// Returns default config if file doesn't exist or can't be parsed
    pub fn load() -> Self {
        Self::config_path()
            .and_then(|path| {
                if path.exists() {
                    fs::read_to_string(&path).ok()
                } else {
                    None
                }
            })
            .and_then(|content| toml::from_str(&content).ok())
            .unwrap_or_default()
    }

    /// Load configuration from a specific path
    pub fn load_from(path: &Path) -> anyhow::Result<Self> {
        let content = fs::read_to_string(path)?;
        let config: ConfigFile = toml::from_str(&content)?;
        Ok(config)
    }

    /// Engine tunables described by this file
    pub fn engine_config(&self) -> EngineConfig {
        EngineConfig {
            root_timeout: Duration::from_millis(self.timeouts.root_ms),
            jump_timeout: Duration::from_millis(self.timeouts.jump_ms),
            double_key_timeout: Duration::from_millis(self.timeouts.double_key_ms),
            count_timeout: Duration::from_millis(self.timeouts.count_ms),
            jumplist_max: self.jumplist.max_size.max(1),
            first_skips_pinned: self.navigation.first_skips_pinned,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_default_config_matches_engine_defaults() {
        let config = ConfigFile::default();
        assert_eq!(config.timeouts.root_ms, 2000);
        assert_eq!(config.jumplist.max_size, 100);
        assert!(!config.navigation.first_skips_pinned);
        assert_eq!(config.engine_config(), EngineConfig::default());
    }

    #[test]
    fn test_parse_partial_config() {
        let toml_content = r#"
[timeouts]
count_ms = 1500

[navigation]
first_skips_pinned = true
"#;
        let config: ConfigFile = toml::from_str(toml_content).unwrap();
        assert_eq!(config.timeouts.count_ms, 1500);
        assert_eq!(config.timeouts.jump_ms, 1000); // default
        let engine = config.engine_config();
        assert_eq!(engine.count_timeout, Duration::from_millis(1500));
        assert!(engine.first_skips_pinned);
    }

    #[test]
    fn test_zero_jumplist_size_is_raised() {
        let config: ConfigFile = toml::from_str("[jumplist]\nmax_size = 0\n").unwrap();
        assert_eq!(config.engine_config().jumplist_max, 1);
    }

    #[test]
    fn test_load_from_file() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(
            file,
            r#"
[timeouts]
root_ms = 500
"#
        )
        .unwrap();

        let config = ConfigFile::load_from(file.path()).unwrap();
        assert_eq!(config.timeouts.root_ms, 500);
    }

    #[test]
    fn test_invalid_toml_returns_error() {
        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "invalid toml {{{{").unwrap();

        let result = ConfigFile::load_from(file.path());
        assert!(result.is_err());
    }
}
