//! Application configuration management.

use std::path::PathBuf;

use serde::Deserialize;

/// Environment variable prefix, e.g. `SPLITLEDGER__LEDGER__SNAPSHOT_PATH`.
pub const ENV_PREFIX: &str = "SPLITLEDGER";

/// Application configuration.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Ledger document configuration.
    #[serde(default)]
    pub ledger: LedgerConfig,
    /// Logging configuration.
    #[serde(default)]
    pub log: LogConfig,
}

/// Ledger document configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LedgerConfig {
    /// Path of the JSON state document to read.
    #[serde(default = "default_snapshot_path")]
    pub snapshot_path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            snapshot_path: default_snapshot_path(),
        }
    }
}

fn default_snapshot_path() -> PathBuf {
    PathBuf::from("splitledger.json")
}

/// Logging configuration.
#[derive(Debug, Clone, Deserialize)]
pub struct LogConfig {
    /// `tracing` filter directive used when `RUST_LOG` is not set.
    #[serde(default = "default_log_filter")]
    pub filter: String,
    /// Emit JSON log lines instead of human-readable ones.
    #[serde(default)]
    pub json: bool,
}

impl Default for LogConfig {
    fn default() -> Self {
        Self {
            filter: default_log_filter(),
            json: false,
        }
    }
}

fn default_log_filter() -> String {
    "splitledger=info".to_string()
}

impl AppConfig {
    /// Loads configuration from environment and config files.
    ///
    /// Sources, later ones winning: `config/default`, `config/{RUN_MODE}`,
    /// then `SPLITLEDGER__*` environment variables.
    ///
    /// # Errors
    ///
    /// Returns an error if configuration cannot be loaded.
    pub fn load() -> Result<Self, config::ConfigError> {
        let run_mode = std::env::var("RUN_MODE").unwrap_or_else(|_| "development".to_string());

        let config = config::Config::builder()
            .add_source(config::File::with_name("config/default").required(false))
            .add_source(config::File::with_name(&format!("config/{run_mode}")).required(false))
            .add_source(config::Environment::with_prefix(ENV_PREFIX).separator("__"))
            .build()?;

        config.try_deserialize()
    }

    /// Parses configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the TOML is malformed or has the wrong shape.
    pub fn from_toml(source: &str) -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::File::from_str(source, config::FileFormat::Toml))
            .build()?
            .try_deserialize()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = AppConfig::default();
        assert_eq!(config.ledger.snapshot_path, PathBuf::from("splitledger.json"));
        assert_eq!(config.log.filter, "splitledger=info");
        assert!(!config.log.json);
    }

    #[test]
    fn test_empty_toml_uses_defaults() {
        let config = AppConfig::from_toml("").unwrap();
        assert_eq!(config.ledger.snapshot_path, PathBuf::from("splitledger.json"));
        assert_eq!(config.log.filter, "splitledger=info");
    }

    #[test]
    fn test_toml_overrides() {
        let config = AppConfig::from_toml(
            r#"
            [ledger]
            snapshot_path = "data/gastos_bkp.json"

            [log]
            filter = "splitledger=debug"
            json = true
            "#,
        )
        .unwrap();
        assert_eq!(
            config.ledger.snapshot_path,
            PathBuf::from("data/gastos_bkp.json")
        );
        assert_eq!(config.log.filter, "splitledger=debug");
        assert!(config.log.json);
    }

    #[test]
    fn test_partial_section_keeps_other_defaults() {
        let config = AppConfig::from_toml("[log]\njson = true\n").unwrap();
        assert!(config.log.json);
        assert_eq!(config.log.filter, "splitledger=info");
    }

    #[test]
    fn test_environment_overrides() {
        let config = temp_env::with_vars(
            [
                ("SPLITLEDGER__LEDGER__SNAPSHOT_PATH", Some("/tmp/ledger.json")),
                ("SPLITLEDGER__LOG__FILTER", Some("splitledger=trace")),
            ],
            AppConfig::load,
        )
        .unwrap();
        assert_eq!(config.ledger.snapshot_path, PathBuf::from("/tmp/ledger.json"));
        assert_eq!(config.log.filter, "splitledger=trace");
    }

    #[test]
    fn test_malformed_toml_is_rejected() {
        assert!(AppConfig::from_toml("[ledger\nsnapshot_path = 1").is_err());
    }
}
