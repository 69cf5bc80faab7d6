use crate::adapters::rates::DEFAULT_RATE_API_BASE;
use crate::adapters::sheets::{DirectoryEndpoints, DEFAULT_DRIVE_API_BASE, DEFAULT_SHEETS_API_BASE};
use crate::core::report::DEFAULT_REPORT_FILE;
use crate::core::ConfigProvider;
use crate::utils::error::{DashboardError, Result};
use crate::utils::validation::{self, Validate};
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// 儀表板的完整設定，建立後傳入 pipeline
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DashboardConfig {
    pub ledger: LedgerConfig,
    pub directory: DirectoryConfig,
    pub rates: RatesConfig,
    pub report: ReportConfig,
    pub run: RunConfig,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LedgerConfig {
    pub path: PathBuf,
}

impl Default for LedgerConfig {
    fn default() -> Self {
        Self {
            path: PathBuf::from("sales_data.csv"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DirectoryConfig {
    pub collection_name: String,
    pub credentials_path: PathBuf,
    pub drive_api_base: String,
    pub sheets_api_base: String,
}

impl Default for DirectoryConfig {
    fn default() -> Self {
        Self {
            collection_name: "Customer List".to_string(),
            credentials_path: PathBuf::from("credentials.json"),
            drive_api_base: DEFAULT_DRIVE_API_BASE.to_string(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RatesConfig {
    pub api_base: String,
    pub base_currency: String,
}

impl Default for RatesConfig {
    fn default() -> Self {
        Self {
            api_base: DEFAULT_RATE_API_BASE.to_string(),
            base_currency: "USD".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub output_path: PathBuf,
    pub file_name: String,
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            output_path: PathBuf::from("."),
            file_name: DEFAULT_REPORT_FILE.to_string(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RunConfig {
    /// Abort when the ledger or directory fetch fails instead of rendering zeroes.
    pub strict: bool,
}

impl DashboardConfig {
    /// 從 TOML 檔案載入配置
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(DashboardError::IoError)?;
        Self::from_toml_str(&content)
    }

    /// 從 TOML 字串解析配置
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| DashboardError::ConfigValidationError {
            field: "toml_parsing".to_string(),
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// 替換環境變數 (例如 ${SHEETS_CREDENTIALS})，未設定的變數保留原樣
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").map_err(|e| DashboardError::ConfigError {
            message: e.to_string(),
        })?;

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn directory_endpoints(&self) -> DirectoryEndpoints {
        DirectoryEndpoints {
            drive_api_base: self.directory.drive_api_base.clone(),
            sheets_api_base: self.directory.sheets_api_base.clone(),
        }
    }

    pub fn output_path(&self) -> &Path {
        &self.report.output_path
    }
}

impl ConfigProvider for DashboardConfig {
    fn ledger_path(&self) -> &Path {
        &self.ledger.path
    }

    fn collection_name(&self) -> &str {
        &self.directory.collection_name
    }

    fn credentials_path(&self) -> &Path {
        &self.directory.credentials_path
    }

    fn base_currency(&self) -> &str {
        &self.rates.base_currency
    }

    fn output_file_name(&self) -> &str {
        &self.report.file_name
    }

    fn strict(&self) -> bool {
        self.run.strict
    }
}

fn path_str<'a>(field_name: &str, path: &'a Path) -> Result<&'a str> {
    path.to_str().ok_or_else(|| DashboardError::InvalidConfigValueError {
        field: field_name.to_string(),
        value: path.display().to_string(),
        reason: "Path is not valid UTF-8".to_string(),
    })
}

impl Validate for DashboardConfig {
    fn validate(&self) -> Result<()> {
        validation::validate_path("ledger.path", path_str("ledger.path", &self.ledger.path)?)?;

        validation::validate_non_empty_string(
            "directory.collection_name",
            &self.directory.collection_name,
        )?;
        validation::validate_path(
            "directory.credentials_path",
            path_str("directory.credentials_path", &self.directory.credentials_path)?,
        )?;
        validation::validate_url("directory.drive_api_base", &self.directory.drive_api_base)?;
        validation::validate_url("directory.sheets_api_base", &self.directory.sheets_api_base)?;

        validation::validate_url("rates.api_base", &self.rates.api_base)?;
        validation::validate_currency_code("rates.base_currency", &self.rates.base_currency)?;

        validation::validate_path(
            "report.output_path",
            path_str("report.output_path", &self.report.output_path)?,
        )?;
        validation::validate_file_name("report.file_name", &self.report.file_name)?;

        Ok(())
    }
}
