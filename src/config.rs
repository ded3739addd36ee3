//! Configuration Module
//! Command-line settings and the optional JSON dashboard config.

use clap::Parser;
use serde::Deserialize;
use std::path::{Path, PathBuf};
use thiserror::Error;

pub const DEFAULT_REPORT_YEAR: i32 = 2025;
pub const DEFAULT_CSV_PATH: &str = "data/localization_portfolio_clean_data.csv";

#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Failed to read config {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Localization project ledger dashboard
#[derive(Parser, Debug, Clone)]
#[command(name = "l10n-dashboard", version)]
pub struct Settings {
    /// Ledger CSV to load at startup
    #[arg(long, default_value = DEFAULT_CSV_PATH)]
    pub csv: PathBuf,

    /// JSON dashboard config
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Year appended to "M/D" dates (overrides the config file)
    #[arg(long, env = "L10N_REPORT_YEAR")]
    pub report_year: Option<i32>,

    /// Log level or tracing filter directive
    #[arg(long, default_value = "info")]
    pub log_level: String,
}

/// Domain conventions of the ledger. Every field may be omitted from the file.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub report_year: i32,
    pub in_house_prefix: String,
    pub vendor_assignees: Vec<String>,
    pub translation_type: String,
    pub lqa_type: String,
}

impl Default for DashboardConfig {
    fn default() -> Self {
        Self {
            report_year: DEFAULT_REPORT_YEAR,
            in_house_prefix: "Trans_".to_string(),
            vendor_assignees: vec!["Vendor_M".to_string(), "Vendor_E".to_string()],
            translation_type: "Trans".to_string(),
            lqa_type: "LQA".to_string(),
        }
    }
}

impl DashboardConfig {
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Resolve the config for a run: file (if any), then CLI overrides.
    pub fn resolve(settings: &Settings) -> Result<Self, ConfigError> {
        let mut config = match &settings.config {
            Some(path) => Self::load_from(path)?,
            None => Self::default(),
        };
        if let Some(year) = settings.report_year {
            config.report_year = year;
        }
        Ok(config)
    }

    pub fn is_in_house(&self, assignee: &str) -> bool {
        assignee.starts_with(&self.in_house_prefix)
    }

    pub fn is_vendor(&self, assignee: &str) -> bool {
        self.vendor_assignees.iter().any(|v| v == assignee)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    fn settings(config: Option<PathBuf>, report_year: Option<i32>) -> Settings {
        Settings {
            csv: PathBuf::from(DEFAULT_CSV_PATH),
            config,
            report_year,
            log_level: "info".to_string(),
        }
    }

    #[test]
    fn test_defaults_without_file() {
        let config = DashboardConfig::resolve(&settings(None, None)).unwrap();
        assert_eq!(config, DashboardConfig::default());
        assert_eq!(config.report_year, 2025);
    }

    #[test]
    fn test_partial_file_keeps_defaults() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"report_year": 2026, "vendor_assignees": ["Acme"]}}"#).unwrap();

        let config = DashboardConfig::load_from(file.path()).unwrap();
        assert_eq!(config.report_year, 2026);
        assert_eq!(config.vendor_assignees, vec!["Acme".to_string()]);
        assert_eq!(config.in_house_prefix, "Trans_");
        assert_eq!(config.lqa_type, "LQA");
    }

    #[test]
    fn test_cli_year_overrides_file() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, r#"{{"report_year": 2026}}"#).unwrap();

        let config =
            DashboardConfig::resolve(&settings(Some(file.path().to_path_buf()), Some(2024)))
                .unwrap();
        assert_eq!(config.report_year, 2024);
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let err = DashboardConfig::load_from(Path::new("/no/such/config.json")).unwrap_err();
        assert!(matches!(err, ConfigError::Read { .. }));
        assert!(err.to_string().contains("/no/such/config.json"));
    }

    #[test]
    fn test_malformed_file_is_parse_error() {
        let mut file = NamedTempFile::new().unwrap();
        write!(file, "{{not json").unwrap();
        let err = DashboardConfig::load_from(file.path()).unwrap_err();
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn test_assignee_conventions() {
        let config = DashboardConfig::default();
        assert!(config.is_in_house("Trans_3"));
        assert!(!config.is_in_house("Vendor_M"));
        assert!(config.is_vendor("Vendor_E"));
        assert!(!config.is_vendor("Vendor_X"));
    }
}
