//! User preferences stored as JSON under the application home directory.

use serde::{Deserialize, Serialize};
use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use crate::core::errors::{Result, TrackerError};
use crate::utils::paths;

const TMP_SUFFIX: &str = "tmp";

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Config {
    #[serde(default = "Config::default_currency_symbol")]
    pub currency_symbol: String,
    #[serde(default = "Config::default_enabled")]
    pub color_output: bool,
    #[serde(default = "Config::default_enabled")]
    pub confirm_deletes: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    /// Optional custom directory for the record files. Defaults to `<home>/data`.
    pub data_dir: Option<PathBuf>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            currency_symbol: Self::default_currency_symbol(),
            color_output: Self::default_enabled(),
            confirm_deletes: Self::default_enabled(),
            data_dir: None,
        }
    }
}

impl Config {
    pub fn default_currency_symbol() -> String {
        "$".into()
    }

    pub fn default_enabled() -> bool {
        true
    }

    /// Names accepted by [`Config::set`].
    pub const KEYS: [&'static str; 4] =
        ["currency_symbol", "color_output", "confirm_deletes", "data_dir"];

    /// Updates one field from its textual form. An empty `data_dir` clears it.
    pub fn set(&mut self, key: &str, value: &str) -> Result<()> {
        let value = value.trim();
        match key {
            "currency_symbol" => self.currency_symbol = value.to_string(),
            "color_output" => self.color_output = parse_flag(key, value)?,
            "confirm_deletes" => self.confirm_deletes = parse_flag(key, value)?,
            "data_dir" => {
                self.data_dir = (!value.is_empty()).then(|| PathBuf::from(value));
            }
            other => {
                return Err(TrackerError::Config(format!(
                    "unknown setting `{other}` (expected one of: {})",
                    Self::KEYS.join(", ")
                )))
            }
        }
        Ok(())
    }

    /// `key = value` lines for every setting.
    pub fn entries(&self) -> Vec<(&'static str, String)> {
        vec![
            ("currency_symbol", self.currency_symbol.clone()),
            ("color_output", self.color_output.to_string()),
            ("confirm_deletes", self.confirm_deletes.to_string()),
            (
                "data_dir",
                self.data_dir
                    .as_ref()
                    .map_or_else(|| "(default)".to_string(), |dir| dir.display().to_string()),
            ),
        ]
    }

    pub fn resolve_data_dir(&self, home: &Path) -> PathBuf {
        match &self.data_dir {
            Some(path) => path.clone(),
            None => paths::data_dir_in(home),
        }
    }
}

/// Handles loading and saving [`Config`] for one home directory.
#[derive(Debug, Clone)]
pub struct ConfigManager {
    path: PathBuf,
}

impl ConfigManager {
    pub fn with_base_dir(base: &Path) -> Result<Self> {
        let config_root = paths::config_dir_in(base);
        fs::create_dir_all(&config_root)?;
        Ok(Self {
            path: paths::config_file_in(base),
        })
    }

    /// Reads the config file, or returns defaults when none exists yet.
    pub fn load(&self) -> Result<Config> {
        if !self.path.exists() {
            return Ok(Config::default());
        }
        let data = fs::read_to_string(&self.path)?;
        serde_json::from_str(&data).map_err(|err| {
            TrackerError::Config(format!("{}: {err}", self.path.display()))
        })
    }

    pub fn save(&self, config: &Config) -> Result<()> {
        let json = serde_json::to_string_pretty(config)
            .map_err(|err| TrackerError::Config(err.to_string()))?;
        let tmp = tmp_path(&self.path);
        write_atomic(&tmp, &json)?;
        fs::rename(&tmp, &self.path)?;
        Ok(())
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

fn parse_flag(key: &str, value: &str) -> Result<bool> {
    match value.to_ascii_lowercase().as_str() {
        "true" | "yes" | "on" | "1" => Ok(true),
        "false" | "no" | "off" | "0" => Ok(false),
        _ => Err(TrackerError::Config(format!(
            "`{key}` expects true or false, got `{value}`"
        ))),
    }
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{existing}.{TMP_SUFFIX}"),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn missing_file_yields_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        assert_eq!(manager.load().unwrap(), Config::default());
        assert!(manager.path().ends_with("config/config.json"));
    }

    #[test]
    fn save_then_load_roundtrips() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        let config = Config {
            currency_symbol: "€".into(),
            color_output: false,
            confirm_deletes: false,
            data_dir: Some(dir.path().join("elsewhere")),
        };
        manager.save(&config).unwrap();
        assert_eq!(manager.load().unwrap(), config);
        assert_eq!(config.resolve_data_dir(dir.path()), dir.path().join("elsewhere"));
    }

    #[test]
    fn partial_file_fills_in_defaults() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.path(), r#"{"color_output": false}"#).unwrap();
        let config = manager.load().unwrap();
        assert!(!config.color_output);
        assert_eq!(config.currency_symbol, "$");
        assert!(config.confirm_deletes);
        assert_eq!(config.resolve_data_dir(dir.path()), dir.path().join("data"));
    }

    #[test]
    fn invalid_file_is_a_config_error() {
        let dir = tempdir().unwrap();
        let manager = ConfigManager::with_base_dir(dir.path()).unwrap();
        fs::write(manager.path(), "not json").unwrap();
        assert!(matches!(manager.load(), Err(TrackerError::Config(_))));
    }

    #[test]
    fn set_updates_fields_from_text() {
        let mut config = Config::default();
        config.set("confirm_deletes", "off").unwrap();
        config.set("currency_symbol", " € ").unwrap();
        config.set("data_dir", "/tmp/ledger").unwrap();
        assert!(!config.confirm_deletes);
        assert_eq!(config.currency_symbol, "€");
        assert_eq!(config.data_dir, Some(PathBuf::from("/tmp/ledger")));
        config.set("data_dir", "").unwrap();
        assert_eq!(config.data_dir, None);

        assert!(matches!(config.set("color_output", "maybe"), Err(TrackerError::Config(_))));
        assert!(matches!(config.set("theme", "dark"), Err(TrackerError::Config(_))));
        assert!(config.color_output);
    }
}
