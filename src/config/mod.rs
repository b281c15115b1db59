//! Configuration module.
//!
//! Selects the default dialect from a TOML settings file.

mod settings;

pub use settings::{expand_env_vars, DialectSettings, Settings, SettingsError};
