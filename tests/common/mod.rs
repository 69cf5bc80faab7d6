#![allow(dead_code)]

use httpmock::prelude::*;
use httpmock::Mock;
use std::path::{Path, PathBuf};

pub const TEST_KEY_PEM: &str = include_str!("../fixtures/test_service_account_key.pem");
pub const ACCESS_TOKEN: &str = "test-token";
pub const SPREADSHEET_ID: &str = "sheet-123";

/// 寫入指向 mock token 端點的 service account 憑證
pub fn write_credentials(dir: &Path, server: &MockServer) -> PathBuf {
    let path = dir.join("credentials.json");
    let credentials = serde_json::json!({
        "type": "service_account",
        "project_id": "dashboard-test",
        "private_key_id": "test-key-1",
        "private_key": TEST_KEY_PEM,
        "client_email": "reporter@dashboard-test.iam.gserviceaccount.com",
        "token_uri": server.url("/token"),
    });
    std::fs::write(&path, serde_json::to_vec_pretty(&credentials).unwrap()).unwrap();
    path
}

pub fn write_ledger(dir: &Path, content: &str) -> PathBuf {
    let path = dir.join("sales_data.csv");
    std::fs::write(&path, content).unwrap();
    path
}

pub fn mock_token(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(POST)
            .path("/token")
            .body_contains("grant-type%3Ajwt-bearer")
            .body_contains("assertion=");
        then.status(200).json_body(serde_json::json!({
            "access_token": ACCESS_TOKEN,
            "expires_in": 3599,
            "token_type": "Bearer"
        }));
    })
}

pub fn mock_drive_lookup(server: &MockServer, files: serde_json::Value) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path("/drive/v3/files")
            .query_param_exists("q")
            .header("authorization", format!("Bearer {}", ACCESS_TOKEN));
        then.status(200).json_body(serde_json::json!({ "files": files }));
    })
}

pub fn mock_sheet_metadata(server: &MockServer) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path(format!("/v4/spreadsheets/{}", SPREADSHEET_ID))
            .header("authorization", format!("Bearer {}", ACCESS_TOKEN));
        then.status(200).json_body(serde_json::json!({
            "sheets": [
                {"properties": {"sheetId": 0, "title": "Sheet1", "index": 0}},
                {"properties": {"sheetId": 1, "title": "Archive", "index": 1}}
            ]
        }));
    })
}

pub fn mock_sheet_values(server: &MockServer, values: serde_json::Value) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET)
            .path_contains(format!("/v4/spreadsheets/{}/values/", SPREADSHEET_ID))
            .path_contains("Sheet1");
        then.status(200).json_body(serde_json::json!({
            "range": "Sheet1!A1:Z1000",
            "majorDimension": "ROWS",
            "values": values
        }));
    })
}

/// Complete directory flow: token, lookup, metadata and values.
pub fn mock_directory(server: &MockServer, values: serde_json::Value) {
    mock_token(server);
    mock_drive_lookup(
        server,
        serde_json::json!([{"id": SPREADSHEET_ID, "name": "Customer List"}]),
    );
    mock_sheet_metadata(server);
    mock_sheet_values(server, values);
}

pub fn mock_rate(server: &MockServer, eur: f64) -> Mock<'_> {
    server.mock(|when, then| {
        when.method(GET).path("/v4/latest/USD");
        then.status(200)
            .header("Content-Type", "application/json")
            .json_body(serde_json::json!({
                "provider": "https://www.exchangerate-api.com",
                "base": "USD",
                "date": "2026-10-19",
                "rates": {"USD": 1, "EUR": eur, "GBP": 0.79, "JPY": 151.2}
            }));
    })
}

pub fn customer_rows(count: usize) -> serde_json::Value {
    let mut rows = vec![serde_json::json!(["name", "email", "plan"])];
    for i in 0..count {
        rows.push(serde_json::json!([
            format!("Customer {}", i + 1),
            format!("customer{}@example.com", i + 1),
            "pro"
        ]));
    }
    serde_json::Value::Array(rows)
}
