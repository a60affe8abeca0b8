//! Application configuration with layered loading.
//!
//! This module provides configuration management using figment for layered
//! configuration loading from multiple sources:
//!
//! 1. Environment variables (BROADSHEET_*)
//! 2. TOML config file (if BROADSHEET_CONFIG_FILE set)
//! 3. Built-in defaults

use std::path::{Path, PathBuf};

use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

mod validation;

pub use validation::ConfigError;

/// What to do with a record whose date was captured but could not be normalized.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DatePolicy {
    /// Keep the captured working string as a raw date.
    #[default]
    KeepRaw,
    /// Keep the record with an explicit unknown date.
    Unknown,
    /// Fail the whole record.
    Strict,
}

/// Application configuration with layered loading.
///
/// Loading precedence (highest wins):
/// 1. Environment variables (BROADSHEET_*)
/// 2. TOML config file (if BROADSHEET_CONFIG_FILE set)
/// 3. Built-in defaults
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppConfig {
    /// Path to SQLite article database.
    ///
    /// Set via BROADSHEET_DB_PATH environment variable.
    #[serde(default = "default_db_path")]
    pub db_path: PathBuf,

    /// Path to the TOML file holding `[profiles.<id>]` tables.
    ///
    /// Set via BROADSHEET_PROFILES_PATH environment variable.
    #[serde(default)]
    pub profiles_path: Option<PathBuf>,

    /// Handling of dates that fail normalization.
    ///
    /// Set via BROADSHEET_DATE_POLICY (`keep_raw`, `unknown`, `strict`).
    #[serde(default)]
    pub date_policy: DatePolicy,

    /// Treat a missing author as an extraction error for every site.
    ///
    /// Set via BROADSHEET_REQUIRE_AUTHOR environment variable.
    #[serde(default)]
    pub require_author: bool,

    /// Extract and store paragraph citations by default.
    ///
    /// Set via BROADSHEET_EXTRACT_CITATIONS environment variable.
    #[serde(default)]
    pub extract_citations: bool,
}

fn default_db_path() -> PathBuf {
    PathBuf::from("./broadsheet.sqlite")
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: default_db_path(),
            profiles_path: None,
            date_policy: DatePolicy::default(),
            require_author: false,
            extract_citations: false,
        }
    }
}

impl AppConfig {
    /// Load configuration from all sources with layered precedence.
    ///
    /// Priority (highest wins):
    /// 1. Environment variables prefixed with `BROADSHEET_`
    /// 2. TOML file from `BROADSHEET_CONFIG_FILE` (if set)
    /// 3. Built-in defaults via `Default::default()`
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if:
    /// - Configuration file cannot be read
    /// - Environment variables cannot be parsed
    /// - Validation fails after loading
    pub fn load() -> Result<Self, ConfigError> {
        let mut figment = Figment::from(Serialized::defaults(Self::default()));

        if let Ok(config_path) = std::env::var("BROADSHEET_CONFIG_FILE") {
            figment = figment.merge(Toml::file(&config_path));
        }

        figment = figment.merge(
            Env::prefixed("BROADSHEET_")
                .ignore(&["CONFIG_FILE"])
                .map(|key| key.as_str().to_lowercase().into())
                .split("__"),
        );

        let config: Self = figment.extract().map_err(|e| ConfigError::LoadFailed(e.to_string()))?;

        config.validate()?;

        Ok(config)
    }

    /// Profiles file path, required before the server can build its profile set.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::Missing` if no profiles path is configured.
    pub fn require_profiles_path(&self) -> Result<&Path, ConfigError> {
        self.profiles_path.as_deref().ok_or_else(|| ConfigError::Missing {
            field: "profiles_path".into(),
            hint: "Set BROADSHEET_PROFILES_PATH environment variable".into(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use figment::Jail;

    #[test]
    fn test_default_config() {
        let config = AppConfig::default();
        assert_eq!(config.db_path, PathBuf::from("./broadsheet.sqlite"));
        assert!(config.profiles_path.is_none());
        assert_eq!(config.date_policy, DatePolicy::KeepRaw);
        assert!(!config.require_author);
        assert!(!config.extract_citations);
    }

    #[test]
    fn test_require_profiles_path_missing() {
        let config = AppConfig::default();
        let result = config.require_profiles_path();
        assert!(matches!(result, Err(ConfigError::Missing { .. })));
    }

    #[test]
    fn test_require_profiles_path_present() {
        let config = AppConfig { profiles_path: Some("profiles.toml".into()), ..Default::default() };
        assert_eq!(config.require_profiles_path().unwrap(), Path::new("profiles.toml"));
    }

    #[test]
    fn test_load_layers_file_then_env() {
        Jail::expect_with(|jail| {
            jail.create_file(
                "broadsheet.toml",
                r#"
                    db_path = "articles.sqlite"
                    profiles_path = "sites.toml"
                    date_policy = "unknown"
                "#,
            )?;
            jail.set_env("BROADSHEET_CONFIG_FILE", "broadsheet.toml");
            jail.set_env("BROADSHEET_DATE_POLICY", "strict");
            jail.set_env("BROADSHEET_EXTRACT_CITATIONS", "true");

            let config = AppConfig::load().expect("config should load");
            assert_eq!(config.db_path, PathBuf::from("articles.sqlite"));
            assert_eq!(config.profiles_path, Some(PathBuf::from("sites.toml")));
            assert_eq!(config.date_policy, DatePolicy::Strict);
            assert!(config.extract_citations);
            assert!(!config.require_author);
            Ok(())
        });
    }

    #[test]
    fn test_load_rejects_unknown_policy() {
        Jail::expect_with(|jail| {
            jail.set_env("BROADSHEET_DATE_POLICY", "sometimes");
            let result = AppConfig::load();
            assert!(matches!(result, Err(ConfigError::LoadFailed(_))));
            Ok(())
        });
    }
}
