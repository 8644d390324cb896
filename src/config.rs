use anyhow::{Context, Result};
use serde_json::Value;
use std::collections::HashMap;
use std::path::{Path, PathBuf};

/// Configuration keys enum
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ConfigKey {
    Username,
    ApiBaseUrl,
}

impl ConfigKey {
    pub fn as_str(&self) -> &'static str {
        match self {
            ConfigKey::Username => "username",
            ConfigKey::ApiBaseUrl => "api_base_url",
        }
    }

    /// Environment variable that overrides this key.
    pub fn env_var(&self) -> &'static str {
        match self {
            ConfigKey::Username => "GH_KANBAN_USERNAME",
            ConfigKey::ApiBaseUrl => "GH_KANBAN_API_URL",
        }
    }

    /// Get all config keys
    pub fn all() -> &'static [ConfigKey] {
        &[ConfigKey::Username, ConfigKey::ApiBaseUrl]
    }
}

/// Filename of the configuration inside the data directory.
pub const CONFIG_FILENAME: &str = "config.json";
/// Data directory name under `$HOME`.
pub const DATA_DIR_NAME: &str = ".gh-kanban";
/// Overrides the data directory location.
pub const DATA_DIR_ENV: &str = "GH_KANBAN_HOME";

pub const DEFAULT_USERNAME: &str = "inqbarna";
pub const DEFAULT_API_BASE_URL: &str = "https://api.github.com";

/// Parses a JSON configuration file content into a map of configuration values.
///
/// - Returns an empty map if `content` is empty or contains only whitespace.
/// - Unknown keys are skipped.
/// - Returns an `Err` if the content is not valid JSON or not a JSON object.
pub fn parse_config(content: &[u8]) -> Result<HashMap<ConfigKey, Value>> {
    if content.iter().all(|b| b.is_ascii_whitespace()) {
        return Ok(HashMap::new());
    }

    let value: Value = serde_json::from_slice(content).context("Failed to parse config JSON")?;

    let Value::Object(map) = &value else {
        return Err(anyhow::anyhow!("Config must be a JSON object"));
    };

    Ok(ConfigKey::all()
        .iter()
        .filter_map(|key| map.get(key.as_str()).map(|val| (*key, val.clone())))
        .collect())
}

/// Merges `updates` into `base_config` and returns a new configuration map.
///
/// If a key exists in both, the value from `updates` wins.
pub fn update_config(
    base_config: &HashMap<ConfigKey, Value>,
    updates: &HashMap<ConfigKey, Value>,
) -> HashMap<ConfigKey, Value> {
    let mut new_config = base_config.clone();
    for (key, value) in updates {
        new_config.insert(*key, value.clone());
    }
    new_config
}

/// Collects overrides from the environment through `lookup`.
pub fn env_overrides<F>(lookup: F) -> HashMap<ConfigKey, Value>
where
    F: Fn(&str) -> Option<String>,
{
    ConfigKey::all()
        .iter()
        .filter_map(|key| {
            lookup(key.env_var())
                .filter(|value| !value.trim().is_empty())
                .map(|value| (*key, Value::String(value)))
        })
        .collect()
}

/// Resolves the data directory: `$GH_KANBAN_HOME`, else `$HOME/.gh-kanban`.
pub fn data_dir() -> Result<PathBuf> {
    if let Some(dir) = std::env::var_os(DATA_DIR_ENV).filter(|d| !d.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    std::env::var_os("HOME")
        .map(|home| PathBuf::from(home).join(DATA_DIR_NAME))
        .context("HOME environment variable not set")
}

/// Effective runtime settings.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Settings {
    pub username: String,
    pub api_base_url: String,
    pub data_dir: PathBuf,
}

impl Settings {
    /// Builds settings from a merged configuration map, falling back to defaults.
    pub fn from_config(data_dir: &Path, config: &HashMap<ConfigKey, Value>) -> Result<Self> {
        let string_value = |key: ConfigKey, default: &str| -> Result<String> {
            match config.get(&key) {
                None => Ok(default.to_string()),
                Some(Value::String(value)) => Ok(value.clone()),
                Some(other) => Err(anyhow::anyhow!(
                    "Config key `{}` must be a string, got {}",
                    key.as_str(),
                    other
                )),
            }
        };

        Ok(Settings {
            username: string_value(ConfigKey::Username, DEFAULT_USERNAME)?,
            api_base_url: string_value(ConfigKey::ApiBaseUrl, DEFAULT_API_BASE_URL)?,
            data_dir: data_dir.to_path_buf(),
        })
    }

    /// Layers defaults, `<data_dir>/config.json` and environment overrides.
    pub fn resolve() -> Result<Self> {
        let data_dir = data_dir()?;
        let config_path = data_dir.join(CONFIG_FILENAME);
        let file_config = if config_path.exists() {
            let content = std::fs::read(&config_path)
                .with_context(|| format!("Failed to read {}", config_path.display()))?;
            parse_config(&content)
                .with_context(|| format!("Invalid config in {}", config_path.display()))?
        } else {
            HashMap::new()
        };

        let merged = update_config(&file_config, &env_overrides(|name| std::env::var(name).ok()));
        Self::from_config(&data_dir, &merged)
    }
}
