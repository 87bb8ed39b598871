// src/infrastructure/config.rs
use crate::constants::{
    DEFAULT_BASE_URL, DEFAULT_DATE_FORMAT, DEFAULT_QUERY_KEY, DEFAULT_TOKEN_ENV, EXPORT_FILE_NAME,
};
use crate::domain::calendar::validate_date_format;
use crate::domain::{DayBoundary, DomainError};
use anyhow::{Context, Result};
use chrono::FixedOffset;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;
use tracing::debug;

/// TOML configuration for notedash
#[derive(Debug, Clone, Deserialize, PartialEq, Default)]
pub struct Config {
    #[serde(default)]
    pub api: ApiConfig,
    #[serde(default)]
    pub auth: AuthConfig,
    #[serde(default)]
    pub table: TableConfig,
    #[serde(default)]
    pub export: ExportConfig,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ApiConfig {
    #[serde(default = "default_base_url")]
    pub base_url: String,
    #[serde(default)]
    pub timeout_secs: Option<u64>,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct AuthConfig {
    #[serde(default = "default_token_env")]
    pub token_env: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct TableConfig {
    #[serde(default = "default_query_key")]
    pub default_query_key: String,
    /// e.g. `+02:00`; unset means the local zone.
    #[serde(default)]
    pub utc_offset: Option<String>,
    #[serde(default = "default_date_format")]
    pub date_format: String,
}

#[derive(Debug, Clone, Deserialize, PartialEq)]
pub struct ExportConfig {
    #[serde(default = "default_file_name")]
    pub file_name: String,
    /// Unset means the current directory.
    #[serde(default)]
    pub directory: Option<PathBuf>,
}

// Default value functions
fn default_base_url() -> String { DEFAULT_BASE_URL.to_string() }
fn default_token_env() -> String { DEFAULT_TOKEN_ENV.to_string() }
fn default_query_key() -> String { DEFAULT_QUERY_KEY.to_string() }
fn default_date_format() -> String { DEFAULT_DATE_FORMAT.to_string() }
fn default_file_name() -> String { EXPORT_FILE_NAME.to_string() }

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            base_url: default_base_url(),
            timeout_secs: None,
        }
    }
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            token_env: default_token_env(),
        }
    }
}

impl Default for TableConfig {
    fn default() -> Self {
        Self {
            default_query_key: default_query_key(),
            utc_offset: None,
            date_format: default_date_format(),
        }
    }
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            file_name: default_file_name(),
            directory: None,
        }
    }
}

impl Config {
    /// Load configuration from TOML file
    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let content = std::fs::read_to_string(path.as_ref())
            .with_context(|| format!("Failed to read config file {}", path.as_ref().display()))?;

        let config: Config = toml::from_str(&content)
            .context("Failed to parse TOML config")?;

        Ok(config)
    }

    /// Load `path` when given (must exist), else the default location if
    /// present, else built-in defaults.
    pub fn resolve(path: Option<&Path>) -> Result<Self> {
        if let Some(path) = path {
            return Self::load(path);
        }
        match Self::default_path() {
            Some(path) if path.exists() => {
                debug!(?path, "Loading config from default location");
                Self::load(path)
            }
            _ => {
                debug!("No config file found, using defaults");
                Ok(Self::default())
            }
        }
    }

    /// `{config_dir}/notedash/config.toml`
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("notedash").join("config.toml"))
    }

    /// Check values that are only interpreted later, at display time.
    pub fn validate(&self) -> Result<(), DomainError> {
        validate_date_format(&self.table.date_format)?;
        self.day_boundary()?;
        Ok(())
    }

    pub fn day_boundary(&self) -> Result<DayBoundary, DomainError> {
        match &self.table.utc_offset {
            None => Ok(DayBoundary::Local),
            Some(raw) => parse_utc_offset(raw).map(DayBoundary::Fixed),
        }
    }

    pub fn timeout(&self) -> Option<Duration> {
        self.api.timeout_secs.map(Duration::from_secs)
    }

    /// Where an export lands when no explicit output path is given.
    pub fn export_path(&self) -> PathBuf {
        self.export
            .directory
            .clone()
            .unwrap_or_else(|| PathBuf::from("."))
            .join(&self.export.file_name)
    }
}

/// Accepts `Z`, `UTC` and `±HH:MM`.
pub fn parse_utc_offset(raw: &str) -> Result<FixedOffset, DomainError> {
    let raw = raw.trim();
    if raw.eq_ignore_ascii_case("z") || raw.eq_ignore_ascii_case("utc") {
        return FixedOffset::east_opt(0)
            .ok_or_else(|| DomainError::Config("invalid zero offset".to_string()));
    }
    raw.parse::<FixedOffset>()
        .map_err(|e| DomainError::Config(format!("invalid UTC offset '{raw}': {e}")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::TempDir;

    #[test]
    fn given_defaults_when_building_config_then_matches_production_endpoint() {
        let config = Config::default();

        assert_eq!(config.api.base_url, "https://backscan.tfdatamaster.com");
        assert_eq!(config.table.default_query_key, "100.100.6SN6.R");
        assert_eq!(config.export.file_name, "checkout_data.pdf");
        assert_eq!(config.auth.token_env, "NOTEDASH_TOKEN");
        assert_eq!(config.timeout(), None);
        assert_eq!(config.day_boundary().unwrap(), DayBoundary::Local);
    }

    #[test]
    fn given_toml_file_when_loading_then_reads_values() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("config.toml");

        let toml_content = r#"
[api]
base_url = "http://localhost:4000"
timeout_secs = 15

[auth]
token_env = "SCAN_TOKEN"

[table]
default_query_key = "200.1.A"
utc_offset = "+02:00"
date_format = "%d.%m.%Y"

[export]
file_name = "notes.pdf"
directory = "/tmp/exports"
"#;
        fs::write(&config_path, toml_content).unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.api.base_url, "http://localhost:4000");
        assert_eq!(config.timeout(), Some(Duration::from_secs(15)));
        assert_eq!(config.auth.token_env, "SCAN_TOKEN");
        assert_eq!(config.table.default_query_key, "200.1.A");
        assert_eq!(config.table.date_format, "%d.%m.%Y");
        assert_eq!(config.export_path(), PathBuf::from("/tmp/exports/notes.pdf"));
        assert_eq!(
            config.day_boundary().unwrap(),
            DayBoundary::Fixed(FixedOffset::east_opt(2 * 3600).unwrap())
        );
    }

    #[test]
    fn given_partial_toml_when_loading_then_uses_defaults() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("partial.toml");
        fs::write(&config_path, "[table]\ndefault_query_key = \"X\"\n").unwrap();

        let config = Config::load(&config_path).unwrap();

        assert_eq!(config.table.default_query_key, "X");
        assert_eq!(config.table.date_format, "%-m/%-d/%Y");
        assert_eq!(config.api.base_url, "https://backscan.tfdatamaster.com");
        assert_eq!(config.export_path(), PathBuf::from("./checkout_data.pdf"));
    }

    #[test]
    fn given_nonexistent_file_when_loading_then_returns_error() {
        let result = Config::load("/nonexistent/path/config.toml");

        assert!(result.is_err());
    }

    #[test]
    fn given_explicit_missing_path_when_resolving_then_returns_error() {
        let result = Config::resolve(Some(Path::new("/nonexistent/notedash.toml")));

        assert!(result.is_err());
    }

    #[test]
    fn given_defaults_when_validating_then_ok() {
        assert!(Config::default().validate().is_ok());
    }

    #[test]
    fn given_bad_date_format_when_validating_then_config_error() {
        let temp_dir = TempDir::new().unwrap();
        let config_path = temp_dir.path().join("bad_format.toml");
        fs::write(&config_path, "[table]\ndate_format = \"%m/%Q\"\n").unwrap();
        let config = Config::load(&config_path).unwrap();

        let result = config.validate();

        assert!(matches!(result, Err(DomainError::Config(msg)) if msg.contains("%m/%Q")));
    }

    #[test]
    fn given_bad_offset_in_file_when_validating_then_config_error() {
        let mut config = Config::default();
        config.table.utc_offset = Some("noon".to_string());

        assert!(matches!(config.validate(), Err(DomainError::Config(_))));
    }

    #[test]
    fn given_offset_forms_when_parsing_then_accepts_each() {
        assert_eq!(parse_utc_offset("Z").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("utc").unwrap().local_minus_utc(), 0);
        assert_eq!(parse_utc_offset("+02:00").unwrap().local_minus_utc(), 7200);
        assert_eq!(parse_utc_offset("-05:30").unwrap().local_minus_utc(), -19800);
    }

    #[test]
    fn given_bad_offset_when_parsing_then_config_error() {
        assert!(matches!(parse_utc_offset("soon"), Err(DomainError::Config(_))));
    }
}
