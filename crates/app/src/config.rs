// Configuration from the environment

use anyhow::{Context, Result};
use autocare_infra_sqlite::DEFAULT_CHANGE_FEED_CAPACITY;
use std::path::{Path, PathBuf};

pub const DEFAULT_DB_PATH: &str = "~/.autocare/autocare.db";

const IN_MEMORY_URL: &str = "sqlite::memory:";

/// Log output format
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum LogFormat {
    /// Development: pretty formatting with colors
    #[default]
    Pretty,
    /// Production: JSON structured logging
    Json,
}

impl LogFormat {
    /// Unknown values fall back to `Pretty`
    pub fn parse(value: &str) -> Self {
        match value.trim().to_ascii_lowercase().as_str() {
            "json" => LogFormat::Json,
            _ => LogFormat::Pretty,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    /// Database file path (tilde-expanded) or `sqlite::memory:`
    pub db_path: String,
    pub log_format: LogFormat,
    pub change_feed_capacity: usize,
}

impl Default for AppConfig {
    fn default() -> Self {
        Self {
            db_path: shellexpand::tilde(DEFAULT_DB_PATH).into_owned(),
            log_format: LogFormat::default(),
            change_feed_capacity: DEFAULT_CHANGE_FEED_CAPACITY,
        }
    }
}

impl AppConfig {
    /// Load from `AUTOCARE_*` environment variables
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    /// Load using `lookup` in place of the process environment
    pub fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let db_path = lookup("AUTOCARE_DB_PATH")
            .map(|path| shellexpand::tilde(&path).into_owned())
            .unwrap_or_else(|| shellexpand::tilde(DEFAULT_DB_PATH).into_owned());

        let log_format = lookup("AUTOCARE_LOG_FORMAT")
            .map(|value| LogFormat::parse(&value))
            .unwrap_or_default();

        let change_feed_capacity = match lookup("AUTOCARE_CHANGE_FEED_CAPACITY") {
            Some(value) => value
                .trim()
                .parse::<usize>()
                .ok()
                .filter(|capacity| *capacity > 0)
                .with_context(|| {
                    format!("AUTOCARE_CHANGE_FEED_CAPACITY must be a positive integer, got {value:?}")
                })?,
            None => DEFAULT_CHANGE_FEED_CAPACITY,
        };

        Ok(Self {
            db_path,
            log_format,
            change_feed_capacity,
        })
    }

    /// Config for a throwaway in-memory database
    pub fn in_memory() -> Self {
        Self {
            db_path: IN_MEMORY_URL.to_string(),
            ..Self::default()
        }
    }

    pub fn is_in_memory(&self) -> bool {
        self.db_path.contains(":memory:") || self.db_path.contains("mode=memory")
    }

    /// Connection URL handed to the SQLite adapter
    pub fn database_url(&self) -> String {
        if self.db_path.starts_with("sqlite:") {
            self.db_path.clone()
        } else {
            format!("sqlite://{}", self.db_path)
        }
    }

    /// Directory that must exist before a file database is opened
    pub fn db_parent_dir(&self) -> Option<PathBuf> {
        if self.is_in_memory() {
            return None;
        }
        let path = self
            .db_path
            .trim_start_matches("sqlite://")
            .trim_start_matches("sqlite:");
        Path::new(path)
            .parent()
            .filter(|parent| !parent.as_os_str().is_empty())
            .map(Path::to_path_buf)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let vars: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |key| vars.get(key).cloned()
    }

    #[test]
    fn test_defaults() {
        let config = AppConfig::from_lookup(lookup_from(&[])).unwrap();

        assert!(config.db_path.ends_with(".autocare/autocare.db"));
        assert_eq!(config.log_format, LogFormat::Pretty);
        assert_eq!(config.change_feed_capacity, DEFAULT_CHANGE_FEED_CAPACITY);
    }

    #[test]
    fn test_overrides() {
        let config = AppConfig::from_lookup(lookup_from(&[
            ("AUTOCARE_DB_PATH", "/var/lib/autocare/garage.db"),
            ("AUTOCARE_LOG_FORMAT", "JSON"),
            ("AUTOCARE_CHANGE_FEED_CAPACITY", "32"),
        ]))
        .unwrap();

        assert_eq!(config.db_path, "/var/lib/autocare/garage.db");
        assert_eq!(config.log_format, LogFormat::Json);
        assert_eq!(config.change_feed_capacity, 32);
        assert_eq!(config.database_url(), "sqlite:///var/lib/autocare/garage.db");
        assert_eq!(
            config.db_parent_dir(),
            Some(PathBuf::from("/var/lib/autocare"))
        );
    }

    #[test]
    fn test_invalid_capacity_rejected() {
        for bad in ["zero", "0", "-4"] {
            let result =
                AppConfig::from_lookup(lookup_from(&[("AUTOCARE_CHANGE_FEED_CAPACITY", bad)]));
            tokio_test::assert_err!(result, "{bad} should be rejected");
        }
    }

    #[test]
    fn test_in_memory_has_no_parent_dir() {
        let config = AppConfig::in_memory();
        assert!(config.is_in_memory());
        assert_eq!(config.database_url(), "sqlite::memory:");
        assert_eq!(config.db_parent_dir(), None);
    }

    #[test]
    fn test_unknown_log_format_is_pretty() {
        assert_eq!(LogFormat::parse("logfmt"), LogFormat::Pretty);
        assert_eq!(LogFormat::parse(" json "), LogFormat::Json);
    }
}
