pub mod cli;
pub mod toml_config;

pub use toml_config::DashboardConfig;

#[cfg(feature = "cli")]
use crate::utils::error::Result;
#[cfg(feature = "cli")]
use clap::{Parser, ValueEnum};
#[cfg(feature = "cli")]
use std::path::PathBuf;

#[cfg(feature = "cli")]
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum LogFormat {
    #[default]
    Compact,
    Json,
}

/// 命令列參數；未指定的值沿用設定檔或預設值
#[cfg(feature = "cli")]
#[derive(Debug, Clone, Default, Parser)]
#[command(name = "dashboard-etl")]
#[command(about = "Build an HTML sales dashboard from a ledger, a customer sheet and a live FX rate")]
pub struct CliConfig {
    /// Path to a TOML configuration file
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// CSV ledger with `status` and `amount` columns
    #[arg(long)]
    pub ledger_path: Option<PathBuf>,

    /// Name of the customer spreadsheet
    #[arg(long)]
    pub collection_name: Option<String>,

    /// Service account key file for the spreadsheet service
    #[arg(long)]
    pub credentials_path: Option<PathBuf>,

    #[arg(long)]
    pub drive_api_base: Option<String>,

    #[arg(long)]
    pub sheets_api_base: Option<String>,

    /// Base URL of the exchange-rate API
    #[arg(long)]
    pub rate_api_base: Option<String>,

    #[arg(long)]
    pub base_currency: Option<String>,

    /// Directory the report is written to
    #[arg(long)]
    pub output_path: Option<PathBuf>,

    #[arg(long)]
    pub output_file: Option<String>,

    /// Abort when the ledger or directory cannot be read
    #[arg(long)]
    pub strict: bool,

    #[arg(short, long, help = "Enable verbose output")]
    pub verbose: bool,

    #[arg(long, value_enum, default_value_t = LogFormat::Compact)]
    pub log_format: LogFormat,

    /// Show the resolved configuration without fetching anything
    #[arg(long)]
    pub dry_run: bool,
}

#[cfg(feature = "cli")]
impl CliConfig {
    /// 載入設定檔（若有）並套用命令列覆蓋
    pub fn resolve(&self) -> Result<DashboardConfig> {
        let mut config = match &self.config {
            Some(path) => DashboardConfig::from_file(path)?,
            None => DashboardConfig::default(),
        };

        if let Some(path) = &self.ledger_path {
            config.ledger.path = path.clone();
        }
        if let Some(name) = &self.collection_name {
            config.directory.collection_name = name.clone();
        }
        if let Some(path) = &self.credentials_path {
            config.directory.credentials_path = path.clone();
        }
        if let Some(base) = &self.drive_api_base {
            config.directory.drive_api_base = base.clone();
        }
        if let Some(base) = &self.sheets_api_base {
            config.directory.sheets_api_base = base.clone();
        }
        if let Some(base) = &self.rate_api_base {
            config.rates.api_base = base.clone();
        }
        if let Some(currency) = &self.base_currency {
            config.rates.base_currency = currency.to_uppercase();
        }
        if let Some(path) = &self.output_path {
            config.report.output_path = path.clone();
        }
        if let Some(file) = &self.output_file {
            config.report.file_name = file.clone();
        }
        if self.strict {
            config.run.strict = true;
        }

        Ok(config)
    }
}

#[cfg(all(test, feature = "cli"))]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::NamedTempFile;

    #[test]
    fn test_parse_defaults() {
        let cli = CliConfig::parse_from(["dashboard-etl"]);
        let config = cli.resolve().unwrap();

        assert_eq!(config, DashboardConfig::default());
        assert_eq!(cli.log_format, LogFormat::Compact);
    }

    #[test]
    fn test_flags_override_file() {
        let mut temp_file = NamedTempFile::new().unwrap();
        temp_file
            .write_all(b"[ledger]\npath = \"from_file.csv\"\n\n[rates]\nbase_currency = \"GBP\"\n")
            .unwrap();

        let cli = CliConfig::parse_from([
            "dashboard-etl",
            "--config",
            temp_file.path().to_str().unwrap(),
            "--ledger-path",
            "from_flag.csv",
            "--strict",
            "--log-format",
            "json",
        ]);
        let config = cli.resolve().unwrap();

        assert_eq!(config.ledger.path, PathBuf::from("from_flag.csv"));
        assert_eq!(config.rates.base_currency, "GBP");
        assert!(config.run.strict);
        assert_eq!(cli.log_format, LogFormat::Json);
    }

    #[test]
    fn test_missing_config_file_fails() {
        let cli = CliConfig::parse_from(["dashboard-etl", "--config", "/definitely/not/here.toml"]);
        assert!(cli.resolve().is_err());
    }
}
