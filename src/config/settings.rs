//! TOML-based configuration.
//!
//! Supports a config file (shorthand.toml) with environment variable expansion.
//!
//! Example configuration:
//! ```toml
//! [dialect]
//! name = "postgres"   # or "${SHORTHAND_DIALECT}"
//! ```

use serde::{Deserialize, Serialize};
use std::env;
use std::fs;
use std::path::{Path, PathBuf};

use crate::sql::builder::Builder;
use crate::sql::dialect::Dialect;

/// Error type for settings.
#[derive(Debug, thiserror::Error)]
pub enum SettingsError {
    #[error("Config file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read config file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse config file: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Missing environment variable: {0}")]
    MissingEnvVar(String),

    #[error("Unsupported dialect: {0}")]
    UnsupportedDialect(String),
}

/// Root configuration structure.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct Settings {
    pub dialect: DialectSettings,
}

/// Dialect selection.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct DialectSettings {
    /// Dialect name or alias (supports ${ENV_VAR} expansion).
    pub name: String,
}

impl Default for DialectSettings {
    fn default() -> Self {
        Self {
            name: Dialect::Generic.to_string(),
        }
    }
}

impl Settings {
    /// Load settings from a TOML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, SettingsError> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(SettingsError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        Ok(toml::from_str(&content)?)
    }

    /// Load settings from the default config file locations.
    ///
    /// Searches in order:
    /// 1. Environment variable `SHORTHAND_CONFIG`
    /// 2. `./shorthand.toml`
    /// 3. `~/.config/shorthand/config.toml`
    pub fn load() -> Result<Self, SettingsError> {
        if let Ok(path) = env::var("SHORTHAND_CONFIG") {
            return Self::from_file(&path);
        }

        let local_config = PathBuf::from("shorthand.toml");
        if local_config.exists() {
            return Self::from_file(&local_config);
        }

        if let Some(config_dir) = dirs::config_dir() {
            let user_config = config_dir.join("shorthand").join("config.toml");
            if user_config.exists() {
                return Self::from_file(&user_config);
            }
        }

        Ok(Settings::default())
    }

    /// Resolve the configured dialect name.
    pub fn dialect(&self) -> Result<Dialect, SettingsError> {
        let name = expand_env_vars(&self.dialect.name)?;
        Dialect::from_name(&name).ok_or(SettingsError::UnsupportedDialect(name))
    }

    /// A fresh builder for the configured dialect.
    pub fn builder(&self) -> Result<Builder, SettingsError> {
        Ok(Builder::new(self.dialect()?))
    }
}

/// Expand environment variables in a string.
///
/// Supports `${VAR}` and `$VAR` syntax. A lone `$` is kept.
pub fn expand_env_vars(s: &str) -> Result<String, SettingsError> {
    let lookup = |name: &str| env::var(name).map_err(|_| SettingsError::MissingEnvVar(name.to_string()));
    let mut result = String::with_capacity(s.len());
    let mut rest = s;

    while let Some(start) = rest.find('$') {
        result.push_str(&rest[..start]);
        let after = &rest[start + 1..];
        if let Some(braced) = after.strip_prefix('{') {
            let end = braced.find('}').unwrap_or(braced.len());
            result.push_str(&lookup(&braced[..end])?);
            rest = braced.get(end + 1..).unwrap_or("");
        } else {
            let end = after
                .find(|c: char| !(c.is_alphanumeric() || c == '_'))
                .unwrap_or(after.len());
            if end == 0 {
                result.push('$');
            } else {
                result.push_str(&lookup(&after[..end])?);
            }
            rest = &after[end..];
        }
    }
    result.push_str(rest);

    Ok(result)
}
