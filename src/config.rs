use crate::convert::ConvertOptions;
use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs::{self, File};
use std::io::{Read, Write};
use std::path::{Path, PathBuf};

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Config {
    pub backend: BackendConfig,
    #[serde(default)]
    pub convert: ConvertOptions,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct BackendConfig {
    /// Base URL of the prompt, version, template and test endpoints.
    pub api_url: String,
    /// Full URL of the A/B execution endpoint.
    pub abtest_url: String,
    pub timeout_secs: u64,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            backend: BackendConfig {
                api_url: "http://localhost:8001".to_string(),
                abtest_url: "http://127.0.0.1:8000/api/abtest".to_string(),
                timeout_secs: 60,
            },
            convert: ConvertOptions::default(),
        }
    }
}

#[derive(Debug, Default)]
pub struct ConfigUpdate {
    pub api_url: Option<String>,
    pub abtest_url: Option<String>,
    pub timeout_secs: Option<u64>,
    pub escape_xml: Option<bool>,
}

pub fn default_config_path() -> PathBuf {
    dirs::config_dir()
        .unwrap_or_else(|| PathBuf::from("."))
        .join("promptbox/config.toml")
}

pub fn load_or_create_config(config_path: &Path) -> Result<Config> {
    if !config_path.exists() {
        let config = Config::default();
        save_config(config_path, &config)?;
        return Ok(config);
    }

    let mut file = File::open(config_path)
        .with_context(|| format!("Failed to open config file: {}", config_path.display()))?;
    let mut contents = String::new();
    file.read_to_string(&mut contents)?;

    let config: Config = toml::from_str(&contents).context("Failed to parse config file")?;

    Ok(config)
}

pub fn save_config(config_path: &Path, config: &Config) -> Result<()> {
    if let Some(config_dir) = config_path.parent() {
        fs::create_dir_all(config_dir).with_context(|| {
            format!("Failed to create config directory: {}", config_dir.display())
        })?;
    }

    let toml_string = toml::to_string_pretty(config)?;
    let mut file = File::create(config_path)
        .with_context(|| format!("Failed to write config file: {}", config_path.display()))?;
    file.write_all(toml_string.as_bytes())?;

    Ok(())
}

pub fn update_config(config_path: &Path, update: &ConfigUpdate) -> Result<Config> {
    let mut config = load_or_create_config(config_path)?;

    if let Some(url) = &update.api_url {
        config.backend.api_url = url.trim_end_matches('/').to_string();
    }

    if let Some(url) = &update.abtest_url {
        config.backend.abtest_url = url.clone();
    }

    if let Some(timeout) = update.timeout_secs {
        config.backend.timeout_secs = timeout;
    }

    if let Some(escape) = update.escape_xml {
        config.convert.escape_xml = escape;
    }

    save_config(config_path, &config)?;

    Ok(config)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn creates_default_config_on_first_load() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("nested/config.toml");

        let config = load_or_create_config(&path).unwrap();
        assert_eq!(config, Config::default());
        assert!(path.exists());
    }

    #[test]
    fn update_persists_changes() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");

        let update = ConfigUpdate {
            api_url: Some("http://prompts.internal:9000/".to_string()),
            escape_xml: Some(true),
            ..ConfigUpdate::default()
        };
        update_config(&path, &update).unwrap();

        let reloaded = load_or_create_config(&path).unwrap();
        assert_eq!(reloaded.backend.api_url, "http://prompts.internal:9000");
        assert!(reloaded.convert.escape_xml);
        assert_eq!(reloaded.convert.paragraph_width, 50);
    }

    #[test]
    fn convert_section_is_optional() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(
            &path,
            "[backend]\napi_url = \"http://x\"\nabtest_url = \"http://y\"\ntimeout_secs = 5\n",
        )
        .unwrap();

        let config = load_or_create_config(&path).unwrap();
        assert_eq!(config.convert, ConvertOptions::default());
        assert_eq!(config.backend.timeout_secs, 5);
    }

    #[test]
    fn rejects_malformed_config() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        fs::write(&path, "backend = 3").unwrap();

        let err = load_or_create_config(&path).unwrap_err();
        assert!(err.to_string().contains("Failed to parse config file"));
    }
}
