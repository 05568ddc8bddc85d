// Configuration loading for the tasklist CLI

use crate::models::SeedTask;
use crate::store::StoreConfig;
use eyre::{Context, Result, eyre};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

/// Largest accepted `overdue_threshold_days` (about a century)
pub const MAX_OVERDUE_THRESHOLD_DAYS: i64 = 36_500;

/// File-backed settings, all optional
///
/// ```yaml
/// high_priority_cap: 10
/// overdue_threshold_days: 2
/// seed:
///   - text: Review pull requests
///     priority: high
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub high_priority_cap: usize,
    pub overdue_threshold_days: i64,
    pub seed: Vec<SeedTask>,
}

impl Default for Config {
    fn default() -> Self {
        let store = StoreConfig::default();
        Self {
            high_priority_cap: store.high_priority_cap,
            overdue_threshold_days: store.overdue_threshold_days,
            seed: Vec::new(),
        }
    }
}

impl Config {
    /// Default config file location (`<config dir>/tasklist/config.yaml`)
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("tasklist").join("config.yaml"))
    }

    /// Load config from an explicit path, else the default location, else defaults
    ///
    /// An explicit path that does not exist is an error; a missing default file is not.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            if !path.exists() {
                return Err(eyre!("Config file not found: {}", path.display()));
            }
            return Self::load_from(path);
        }

        match Self::default_path() {
            Some(path) if path.exists() => Self::load_from(&path),
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// Parse a YAML config file
    pub fn load_from(path: &Path) -> Result<Self> {
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read config file {}", path.display()))?;
        let config: Config = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse config file {}", path.display()))?;
        config.validate()?;

        info!(path = %path.display(), "Loaded config");
        Ok(config)
    }

    fn validate(&self) -> Result<()> {
        if self.overdue_threshold_days < 0 {
            return Err(eyre!(
                "overdue_threshold_days must not be negative (got {})",
                self.overdue_threshold_days
            ));
        }
        if self.overdue_threshold_days > MAX_OVERDUE_THRESHOLD_DAYS {
            return Err(eyre!(
                "overdue_threshold_days must be at most {} (got {})",
                MAX_OVERDUE_THRESHOLD_DAYS,
                self.overdue_threshold_days
            ));
        }
        Ok(())
    }

    pub fn store_config(&self) -> StoreConfig {
        StoreConfig {
            high_priority_cap: self.high_priority_cap,
            overdue_threshold_days: self.overdue_threshold_days,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Priority;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.high_priority_cap, 10);
        assert_eq!(config.overdue_threshold_days, 2);
        assert!(config.seed.is_empty());
        assert_eq!(config.store_config(), StoreConfig::default());
    }

    #[test]
    fn test_load_from_yaml() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(
            &path,
            "high_priority_cap: 3\nseed:\n  - text: Review pull requests\n    priority: high\n  - text: Water plants\n    completed: true\n",
        )
        .unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.high_priority_cap, 3);
        // Unset fields keep their defaults
        assert_eq!(config.overdue_threshold_days, 2);
        assert_eq!(config.seed.len(), 2);
        assert_eq!(config.seed[0].priority, Priority::High);
        assert_eq!(config.seed[1].priority, Priority::Medium);
        assert!(config.seed[1].completed);
    }

    #[test]
    fn test_load_missing_explicit_path() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("nope.yaml");
        assert!(Config::load(Some(&path)).is_err());
    }

    #[test]
    fn test_load_invalid_priority() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "seed:\n  - text: Something\n    priority: urgent\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }

    #[test]
    fn test_load_huge_threshold() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "overdue_threshold_days: 200000000000\n").unwrap();
        let err = Config::load(Some(&path)).unwrap_err();
        assert!(format!("{:#}", err).contains("at most"));

        fs::write(&path, format!("overdue_threshold_days: {}\n", MAX_OVERDUE_THRESHOLD_DAYS)).unwrap();
        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.overdue_threshold_days, MAX_OVERDUE_THRESHOLD_DAYS);
    }

    #[test]
    fn test_load_negative_threshold() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("config.yaml");
        fs::write(&path, "overdue_threshold_days: -1\n").unwrap();
        assert!(Config::load_from(&path).is_err());
    }
}
