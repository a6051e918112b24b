// Configuration loaded from YAML

use eyre::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::{debug, info};

const PROJECT_NAME: &str = "tox";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    /// Directory holding the database file
    pub data_dir: PathBuf,

    /// Database file name inside `data_dir`
    pub db_file: String,

    /// How long to wait on a database locked by another process
    pub busy_timeout_ms: u64,
}

impl Default for Config {
    fn default() -> Self {
        let data_dir = dirs::home_dir()
            .map(|home| home.join(".tox"))
            .unwrap_or_else(|| PathBuf::from(".tox"));

        Self {
            data_dir,
            db_file: "todos.db".to_string(),
            busy_timeout_ms: 5000,
        }
    }
}

impl Config {
    /// Load configuration
    ///
    /// An explicit path must exist. Otherwise `<config_dir>/tox/tox.yml` is
    /// used when present, falling back to defaults.
    pub fn load(config_path: Option<&Path>) -> Result<Self> {
        if let Some(path) = config_path {
            return Self::load_from_file(path).with_context(|| format!("Failed to load config from {}", path.display()));
        }

        if let Some(path) = Self::default_path().filter(|p| p.exists()) {
            return Self::load_from_file(&path);
        }

        info!("No config file found, using defaults");
        Ok(Self::default())
    }

    /// Location of the per-user config file, if a config dir is known
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join(PROJECT_NAME).join(format!("{}.yml", PROJECT_NAME)))
    }

    fn load_from_file(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path).context("Failed to read config file")?;
        let config: Self = serde_yaml::from_str(&content).context("Failed to parse config file")?;
        debug!(path = %path.display(), ?config, "Loaded config");
        Ok(config)
    }

    /// Full path of the database file
    pub fn db_path(&self) -> PathBuf {
        self.data_dir.join(&self.db_file)
    }

    pub fn busy_timeout(&self) -> Duration {
        Duration::from_millis(self.busy_timeout_ms)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_default_config() {
        let config = Config::default();
        assert_eq!(config.db_file, "todos.db");
        assert_eq!(config.busy_timeout(), Duration::from_secs(5));
        assert!(config.db_path().ends_with(".tox/todos.db"));
    }

    #[test]
    fn test_load_partial_file_keeps_defaults() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tox.yml");
        fs::write(&path, "data_dir: /tmp/tox-data\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.data_dir, PathBuf::from("/tmp/tox-data"));
        assert_eq!(config.db_file, "todos.db");
        assert_eq!(config.busy_timeout_ms, 5000);
        assert_eq!(config.db_path(), PathBuf::from("/tmp/tox-data/todos.db"));
    }

    #[test]
    fn test_load_full_file() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tox.yml");
        fs::write(&path, "data_dir: /srv/todo\ndb_file: work.db\nbusy_timeout_ms: 250\n").unwrap();

        let config = Config::load(Some(&path)).unwrap();
        assert_eq!(config.db_path(), PathBuf::from("/srv/todo/work.db"));
        assert_eq!(config.busy_timeout(), Duration::from_millis(250));
    }

    #[test]
    fn test_load_missing_explicit_path_fails() {
        let temp = TempDir::new().unwrap();
        let result = Config::load(Some(&temp.path().join("absent.yml")));
        assert!(result.is_err());
    }

    #[test]
    fn test_load_invalid_yaml_fails() {
        let temp = TempDir::new().unwrap();
        let path = temp.path().join("tox.yml");
        fs::write(&path, "busy_timeout_ms: [not, a, number]\n").unwrap();

        assert!(Config::load(Some(&path)).is_err());
    }
}
