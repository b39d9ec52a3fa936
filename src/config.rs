//! Dashboard Configuration Module
//! Loads optional JSON settings; every field falls back to a default.

use crate::report::{InvestorMatch, ReportOptions};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

/// Settings file looked up in the working directory.
pub const CONFIG_FILE: &str = "funding_dashboard.json";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config: {0}")]
    Io(#[from] std::io::Error),
    #[error("Invalid config: {0}")]
    Json(#[from] serde_json::Error),
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub data_path: PathBuf,
    pub top_n: usize,
    pub recent_limit: usize,
    pub investor_match: InvestorMatch,
    pub window_size: [f32; 2],
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            data_path: PathBuf::from("cleaned_startup_data.csv"),
            top_n: 5,
            recent_limit: 5,
            investor_match: InvestorMatch::default(),
            window_size: [1400.0, 800.0],
        }
    }
}

impl DashboardConfig {
    /// Parse a config from JSON text.
    pub fn from_json(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Load config from `path`, or defaults if the file does not exist.
    pub fn load_or_default(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        if !path.exists() {
            return Ok(Self::default());
        }
        let contents = fs::read_to_string(path)?;
        Self::from_json(&contents)
    }

    /// Apply command-line overrides (first positional argument is the CSV path).
    pub fn with_args<I: IntoIterator<Item = String>>(mut self, args: I) -> Self {
        if let Some(path) = args.into_iter().next() {
            self.data_path = PathBuf::from(path);
        }
        self
    }

    pub fn report_options(&self) -> ReportOptions {
        ReportOptions {
            top_n: self.top_n.max(1),
            recent_limit: self.recent_limit,
            investor_match: self.investor_match,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let config = DashboardConfig::from_json(r#"{"top_n": 3, "investor_match": "token"}"#)
            .expect("valid config");
        assert_eq!(config.top_n, 3);
        assert_eq!(config.investor_match, InvestorMatch::Token);
        assert_eq!(config.recent_limit, 5);
        assert_eq!(config.data_path, PathBuf::from("cleaned_startup_data.csv"));
    }

    #[test]
    fn test_first_arg_overrides_data_path() {
        let config = DashboardConfig::default().with_args(vec!["other.csv".to_string()]);
        assert_eq!(config.data_path, PathBuf::from("other.csv"));

        let unchanged = DashboardConfig::default().with_args(Vec::new());
        assert_eq!(unchanged, DashboardConfig::default());
    }

    #[test]
    fn test_missing_file_yields_defaults() {
        let config = DashboardConfig::load_or_default("does/not/exist.json").expect("defaults");
        assert_eq!(config, DashboardConfig::default());
    }

    #[test]
    fn test_report_options_never_zero_top_n() {
        let config = DashboardConfig {
            top_n: 0,
            ..Default::default()
        };
        assert_eq!(config.report_options().top_n, 1);
    }

    #[test]
    fn test_unknown_keys_are_ignored() {
        let config = DashboardConfig::from_json(r#"{"top_n": 4, "export_dir": "exports"}"#)
            .expect("valid config");
        assert_eq!(config.top_n, 4);
        assert_eq!(
            serde_json::to_value(&config).expect("serialize").get("export_dir"),
            None
        );
    }

    #[test]
    fn test_malformed_json_is_error() {
        assert!(matches!(
            DashboardConfig::from_json("{not json"),
            Err(ConfigError::Json(_))
        ));
    }
}
