use thiserror::Error;

#[derive(Error, Debug)]
pub enum DashboardError {
    #[error("HTTP request failed: {0}")]
    HttpError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Credential signing error: {0}")]
    JwtError(#[from] jsonwebtoken::errors::Error),

    #[error("Ledger error: {message}")]
    LedgerError { message: String },

    #[error("Directory error: {message}")]
    DirectoryError { message: String },

    #[error("Exchange rate error: {message}")]
    RateError { message: String },

    #[error("Render error: {message}")]
    RenderError { message: String },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Configuration validation failed for '{field}': {message}")]
    ConfigValidationError { field: String, message: String },

    #[error("Invalid value '{value}' for '{field}': {reason}")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },
}

/// 錯誤分類，用於日誌與修復建議
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Network,
    Data,
    Storage,
    Authentication,
    Configuration,
}

impl DashboardError {
    pub fn category(&self) -> ErrorCategory {
        match self {
            DashboardError::HttpError(_) | DashboardError::RateError { .. } => {
                ErrorCategory::Network
            }
            DashboardError::CsvError(_)
            | DashboardError::SerializationError(_)
            | DashboardError::LedgerError { .. }
            | DashboardError::RenderError { .. } => ErrorCategory::Data,
            DashboardError::IoError(_) => ErrorCategory::Storage,
            DashboardError::JwtError(_) | DashboardError::DirectoryError { .. } => {
                ErrorCategory::Authentication
            }
            DashboardError::ConfigError { .. }
            | DashboardError::ConfigValidationError { .. }
            | DashboardError::InvalidConfigValueError { .. } => ErrorCategory::Configuration,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            DashboardError::HttpError(e) if e.is_connect() => {
                "Could not connect to the remote service".to_string()
            }
            DashboardError::IoError(e) if e.kind() == std::io::ErrorKind::NotFound => {
                format!("File not found: {}", e)
            }
            DashboardError::JwtError(_) => {
                "The service account private key could not be used to sign a token".to_string()
            }
            DashboardError::InvalidConfigValueError { field, reason, .. } => {
                format!("Invalid setting '{}': {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self.category() {
            ErrorCategory::Network => "Check network connectivity and the API base URL",
            ErrorCategory::Data => "Check that the input file has the expected columns and values",
            ErrorCategory::Storage => "Check that the path exists and is readable/writable",
            ErrorCategory::Authentication => {
                "Check the service account credential file and that the spreadsheet is shared with it"
            }
            ErrorCategory::Configuration => "Check the configuration file and command line flags",
        }
    }
}

pub type Result<T> = std::result::Result<T, DashboardError>;
