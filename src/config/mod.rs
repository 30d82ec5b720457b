//! Runtime configuration.
//!
//! Layering, lowest to highest priority:
//! 1. built-in defaults
//! 2. optional TOML file named by `LYRICIST_CONFIG`
//! 3. `LYRICIST_MODEL` / `LYRICIST_API_BASE`
//!
//! The API key is deliberately absent: the generation client reads it from
//! the environment on every call.

use serde::{Deserialize, Serialize};
use std::path::Path;
use thiserror::Error;
use tracing::info;
use url::Url;

pub const CONFIG_PATH_VAR: &str = "LYRICIST_CONFIG";
pub const MODEL_VAR: &str = "LYRICIST_MODEL";
pub const API_BASE_VAR: &str = "LYRICIST_API_BASE";

pub const DEFAULT_API_BASE: &str = "https://generativelanguage.googleapis.com/v1beta/";
pub const DEFAULT_MODEL: &str = "gemini-3-flash-preview";
pub const DEFAULT_TEMPERATURE: f32 = 0.9;

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config file {path}: {source}")]
    Read {
        path: String,
        source: std::io::Error,
    },
    #[error("Failed to parse config file: {0}")]
    Parse(#[from] toml::de::Error),
    #[error("Invalid API base URL {value:?}: {source}")]
    InvalidUrl {
        value: String,
        source: url::ParseError,
    },
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
pub struct GenerationConfig {
    pub api_base: Url,
    pub model: String,
    pub temperature: f32,
    /// Environment variables checked, in order, for the API key.
    pub key_vars: Vec<String>,
}

impl Default for GenerationConfig {
    fn default() -> Self {
        Self {
            api_base: Url::parse(DEFAULT_API_BASE).expect("default API base is a valid URL"),
            model: DEFAULT_MODEL.to_string(),
            temperature: DEFAULT_TEMPERATURE,
            key_vars: vec!["API_KEY".to_string(), "GEMINI_API_KEY".to_string()],
        }
    }
}

#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Default)]
pub struct AppConfig {
    pub generation: GenerationConfig,
}

#[derive(Deserialize, Debug, Default)]
struct FileConfig {
    #[serde(default)]
    generation: FileGeneration,
}

#[derive(Deserialize, Debug, Default)]
struct FileGeneration {
    api_base: Option<String>,
    model: Option<String>,
    temperature: Option<f32>,
    key_vars: Option<Vec<String>>,
}

impl AppConfig {
    /// Defaults, then the config file, then environment overrides.
    pub fn load() -> Result<Self, ConfigError> {
        let mut config = Self::default();

        if let Ok(path) = std::env::var(CONFIG_PATH_VAR) {
            config.merge_file(Path::new(&path))?;
            info!(path = %path, "Loaded config file");
        }

        config.apply_overrides(
            std::env::var(MODEL_VAR).ok(),
            std::env::var(API_BASE_VAR).ok(),
        )?;

        Ok(config)
    }

    pub fn merge_file(&mut self, path: &Path) -> Result<(), ConfigError> {
        let raw = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.display().to_string(),
            source,
        })?;
        self.merge_toml(&raw)
    }

    pub fn merge_toml(&mut self, raw: &str) -> Result<(), ConfigError> {
        let file: FileConfig = toml::from_str(raw)?;
        let FileGeneration {
            api_base,
            model,
            temperature,
            key_vars,
        } = file.generation;

        self.apply_overrides(model, api_base)?;
        if let Some(temperature) = temperature {
            self.generation.temperature = temperature;
        }
        if let Some(key_vars) = key_vars {
            self.generation.key_vars = key_vars;
        }
        Ok(())
    }

    fn apply_overrides(
        &mut self,
        model: Option<String>,
        api_base: Option<String>,
    ) -> Result<(), ConfigError> {
        if let Some(model) = model.filter(|m| !m.trim().is_empty()) {
            self.generation.model = model.trim().to_string();
        }
        if let Some(value) = api_base.filter(|b| !b.trim().is_empty()) {
            self.generation.api_base = parse_base(&value)?;
        }
        Ok(())
    }
}

/// Parses a base URL, making sure it ends with `/` so joins keep the path.
pub fn parse_base(value: &str) -> Result<Url, ConfigError> {
    let trimmed = value.trim();
    let normalized = if trimmed.ends_with('/') {
        trimmed.to_string()
    } else {
        format!("{}/", trimmed)
    };
    Url::parse(&normalized).map_err(|source| ConfigError::InvalidUrl {
        value: value.to_string(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn defaults_point_at_gemini_flash() {
        let config = AppConfig::default();
        assert_eq!(config.generation.model, "gemini-3-flash-preview");
        assert_eq!(config.generation.temperature, 0.9);
        assert_eq!(
            config.generation.api_base.as_str(),
            "https://generativelanguage.googleapis.com/v1beta/"
        );
        assert_eq!(config.generation.key_vars, vec!["API_KEY", "GEMINI_API_KEY"]);
    }

    #[test]
    fn toml_overrides_only_present_keys() {
        let mut config = AppConfig::default();
        config
            .merge_toml(
                r#"
                [generation]
                model = "gemini-2.5-pro"
                temperature = 0.4
                "#,
            )
            .unwrap();

        assert_eq!(config.generation.model, "gemini-2.5-pro");
        assert_eq!(config.generation.temperature, 0.4);
        assert_eq!(config.generation.api_base.as_str(), DEFAULT_API_BASE);
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let mut config = AppConfig::default();
        config.merge_toml("").unwrap();
        assert_eq!(config, AppConfig::default());
    }

    #[test]
    fn file_on_disk_is_merged() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "[generation]\napi_base = \"http://localhost:9000/v1\"").unwrap();

        let mut config = AppConfig::default();
        config.merge_file(file.path()).unwrap();
        assert_eq!(config.generation.api_base.as_str(), "http://localhost:9000/v1/");
    }

    #[test]
    fn missing_file_is_reported() {
        let mut config = AppConfig::default();
        let err = config
            .merge_file(Path::new("/definitely/not/here/lyricist.toml"))
            .unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
    }

    #[test]
    fn bad_base_url_is_rejected() {
        let mut config = AppConfig::default();
        let err = config
            .merge_toml("[generation]\napi_base = \"not a url\"")
            .unwrap_err();
        assert!(matches!(err, ConfigError::InvalidUrl { .. }));
    }

    #[test]
    fn blank_overrides_are_ignored() {
        let mut config = AppConfig::default();
        config
            .apply_overrides(Some("  ".into()), Some(String::new()))
            .unwrap();
        assert_eq!(config, AppConfig::default());
    }
}
