//! Customer directory backed by a Google spreadsheet.
//!
//! Authentication uses a service-account key: a signed RS256 assertion is
//! exchanged for a bearer token, the spreadsheet is located by name through
//! the Drive API, and the first sheet's rows are read through the Sheets API.

use crate::domain::model::CustomerCount;
use crate::domain::ports::DirectorySource;
use crate::utils::error::{DashboardError, Result};
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::{Client, Response};
use serde::{Deserialize, Serialize};
use std::path::Path;
use url::Url;

pub const DEFAULT_TOKEN_URI: &str = "https://oauth2.googleapis.com/token";
pub const DEFAULT_DRIVE_API_BASE: &str = "https://www.googleapis.com";
pub const DEFAULT_SHEETS_API_BASE: &str = "https://sheets.googleapis.com";

pub const SCOPES: [&str; 2] = [
    "https://www.googleapis.com/auth/spreadsheets",
    "https://www.googleapis.com/auth/drive",
];

const JWT_BEARER_GRANT: &str = "urn:ietf:params:oauth:grant-type:jwt-bearer";
const SPREADSHEET_MIME_TYPE: &str = "application/vnd.google-apps.spreadsheet";
const ASSERTION_LIFETIME_SECS: i64 = 3600;

/// The fields of a service-account key file this client needs.
#[derive(Debug, Clone, Deserialize)]
pub struct ServiceAccountKey {
    pub client_email: String,
    pub private_key: String,
    #[serde(default)]
    pub private_key_id: Option<String>,
    #[serde(default = "default_token_uri")]
    pub token_uri: String,
}

fn default_token_uri() -> String {
    DEFAULT_TOKEN_URI.to_string()
}

impl ServiceAccountKey {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }
}

#[derive(Debug, Serialize)]
struct AssertionClaims<'a> {
    iss: &'a str,
    scope: String,
    aud: &'a str,
    iat: i64,
    exp: i64,
}

/// 產生向 token 端點換取存取權杖的 JWT assertion
pub fn sign_assertion(key: &ServiceAccountKey, now: DateTime<Utc>) -> Result<String> {
    let iat = now.timestamp();
    let claims = AssertionClaims {
        iss: &key.client_email,
        scope: SCOPES.join(" "),
        aud: &key.token_uri,
        iat,
        exp: iat + ASSERTION_LIFETIME_SECS,
    };

    let mut header = Header::new(Algorithm::RS256);
    header.kid = key.private_key_id.clone();

    let encoding_key = EncodingKey::from_rsa_pem(key.private_key.as_bytes())?;
    Ok(jsonwebtoken::encode(&header, &claims, &encoding_key)?)
}

/// Drive query literals escape backslashes and single quotes.
pub fn drive_name_query(name: &str) -> String {
    let escaped = name.replace('\\', "\\\\").replace('\'', "\\'");
    format!(
        "name = '{}' and mimeType = '{}' and trashed = false",
        escaped, SPREADSHEET_MIME_TYPE
    )
}

/// A1 notation for a whole sheet: the quoted sheet title.
pub fn sheet_range(title: &str) -> String {
    format!("'{}'", title.replace('\'', "''"))
}

#[derive(Debug, Deserialize)]
struct TokenResponse {
    access_token: String,
}

#[derive(Debug, Deserialize)]
struct FileList {
    #[serde(default)]
    files: Vec<DriveFile>,
}

#[derive(Debug, Deserialize)]
struct DriveFile {
    id: String,
}

#[derive(Debug, Deserialize)]
struct SpreadsheetMeta {
    #[serde(default)]
    sheets: Vec<SheetMeta>,
}

#[derive(Debug, Deserialize)]
struct SheetMeta {
    properties: SheetProperties,
}

#[derive(Debug, Deserialize)]
struct SheetProperties {
    title: String,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<serde_json::Value>>,
}

#[derive(Debug, Clone)]
pub struct DirectoryEndpoints {
    pub drive_api_base: String,
    pub sheets_api_base: String,
}

impl Default for DirectoryEndpoints {
    fn default() -> Self {
        Self {
            drive_api_base: DEFAULT_DRIVE_API_BASE.to_string(),
            sheets_api_base: DEFAULT_SHEETS_API_BASE.to_string(),
        }
    }
}

pub struct SheetsDirectoryClient {
    client: Client,
    endpoints: DirectoryEndpoints,
}

impl SheetsDirectoryClient {
    pub fn new(endpoints: DirectoryEndpoints) -> Self {
        Self {
            client: Client::new(),
            endpoints,
        }
    }

    pub async fn authorize(&self, key: &ServiceAccountKey) -> Result<String> {
        let assertion = sign_assertion(key, Utc::now())?;

        tracing::debug!("Requesting access token from: {}", key.token_uri);
        let response = self
            .client
            .post(&key.token_uri)
            .form(&[("grant_type", JWT_BEARER_GRANT), ("assertion", assertion.as_str())])
            .send()
            .await?;

        let token: TokenResponse = checked(response, "token exchange").await?.json().await?;
        Ok(token.access_token)
    }

    pub async fn find_spreadsheet(&self, token: &str, name: &str) -> Result<String> {
        let url = self.api_url(&self.endpoints.drive_api_base, &["drive", "v3", "files"])?;
        let query = drive_name_query(name);

        tracing::debug!("Searching Drive for spreadsheet '{}'", name);
        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[
                ("q", query.as_str()),
                ("fields", "files(id,name)"),
                ("supportsAllDrives", "true"),
                ("includeItemsFromAllDrives", "true"),
            ])
            .send()
            .await?;

        let list: FileList = checked(response, "spreadsheet lookup").await?.json().await?;
        list.files
            .into_iter()
            .next()
            .map(|file| file.id)
            .ok_or_else(|| DashboardError::DirectoryError {
                message: format!("collection '{}' not found", name),
            })
    }

    pub async fn first_sheet_title(&self, token: &str, spreadsheet_id: &str) -> Result<String> {
        let url = self.api_url(
            &self.endpoints.sheets_api_base,
            &["v4", "spreadsheets", spreadsheet_id],
        )?;

        let response = self
            .client
            .get(url)
            .bearer_auth(token)
            .query(&[("fields", "sheets.properties")])
            .send()
            .await?;

        let meta: SpreadsheetMeta = checked(response, "spreadsheet metadata").await?.json().await?;
        meta.sheets
            .into_iter()
            .next()
            .map(|sheet| sheet.properties.title)
            .ok_or_else(|| DashboardError::DirectoryError {
                message: format!("spreadsheet '{}' has no sheets", spreadsheet_id),
            })
    }

    /// Rows below the header row of `sheet_title`.
    pub async fn record_count(&self, token: &str, spreadsheet_id: &str, sheet_title: &str) -> Result<u64> {
        let range = sheet_range(sheet_title);
        let url = self.api_url(
            &self.endpoints.sheets_api_base,
            &["v4", "spreadsheets", spreadsheet_id, "values", range.as_str()],
        )?;

        let response = self.client.get(url).bearer_auth(token).send().await?;
        let values: ValueRange = checked(response, "sheet values").await?.json().await?;

        Ok(values.values.len().saturating_sub(1) as u64)
    }

    fn api_url(&self, base: &str, segments: &[&str]) -> Result<Url> {
        let mut url = Url::parse(base).map_err(|e| DashboardError::ConfigError {
            message: format!("invalid API base '{}': {}", base, e),
        })?;
        url.path_segments_mut()
            .map_err(|_| DashboardError::ConfigError {
                message: format!("API base '{}' cannot have a path", base),
            })?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }
}

#[async_trait]
impl DirectorySource for SheetsDirectoryClient {
    async fn count(&self, collection_name: &str, credentials_path: &Path) -> Result<CustomerCount> {
        let key = ServiceAccountKey::from_file(credentials_path)?;
        let token = self.authorize(&key).await?;

        let spreadsheet_id = self.find_spreadsheet(&token, collection_name).await?;
        let title = self.first_sheet_title(&token, &spreadsheet_id).await?;
        let count = self.record_count(&token, &spreadsheet_id, &title).await?;

        tracing::debug!(
            "Directory '{}' sheet '{}' holds {} records",
            collection_name,
            title,
            count
        );
        Ok(CustomerCount { count })
    }
}

/// 非 2xx 回應轉成帶有回應內容的錯誤
async fn checked(response: Response, step: &str) -> Result<Response> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    Err(DashboardError::DirectoryError {
        message: format!("{} failed with status {}: {}", step, status, body.trim()),
    })
}
