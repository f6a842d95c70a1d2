//! # Google Sheets Backend
//!
//! Talks to the Sheets v4 REST API with blocking HTTP calls.
//!
//! - read: `GET values/'{sheet}'!A:{last}`
//! - append: `POST values/'{sheet}'!A1:append`
//! - insert: `batchUpdate` insertDimension, then `PUT values/'{sheet}'!A{row}`
//! - delete: `batchUpdate` deleteDimension
//!
//! Credentials are an OAuth bearer token obtained outside this crate;
//! the API performs the credential check.

use std::time::Duration;

use reqwest::blocking::{Client, RequestBuilder};
use reqwest::Url;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

use super::backend::{select_columns, SheetBackend, SheetOp};
use super::errors::{StoreError, StoreResult};

pub const SHEETS_API_BASE: &str = "https://sheets.googleapis.com/v4/spreadsheets/";

/// Rightmost column read when no column subset is configured (`Z`)
const DEFAULT_LAST_COLUMN: usize = 25;

/// Connection settings for one worksheet
#[derive(Debug, Clone)]
pub struct GoogleSheetConfig {
    pub spreadsheet_id: String,
    /// Worksheet (tab) name used in A1 ranges
    pub worksheet: String,
    /// Numeric sheet id (`gid`) used by row insert/delete requests
    pub sheet_gid: i64,
    pub access_token: String,
    pub api_base: String,
    pub timeout: Duration,
}

impl GoogleSheetConfig {
    pub fn new(
        spreadsheet_id: impl Into<String>,
        worksheet: impl Into<String>,
        sheet_gid: i64,
        access_token: impl Into<String>,
    ) -> Self {
        Self {
            spreadsheet_id: spreadsheet_id.into(),
            worksheet: worksheet.into(),
            sheet_gid,
            access_token: access_token.into(),
            api_base: SHEETS_API_BASE.to_string(),
            timeout: Duration::from_secs(30),
        }
    }
}

/// Worksheet of a Google spreadsheet
#[derive(Debug)]
pub struct GoogleSheet {
    config: GoogleSheetConfig,
    client: Client,
}

#[derive(Debug, Deserialize)]
struct ValueRange {
    #[serde(default)]
    values: Vec<Vec<Value>>,
}

impl GoogleSheet {
    pub fn new(config: GoogleSheetConfig) -> StoreResult<Self> {
        let client = Client::builder()
            .timeout(config.timeout)
            .build()
            .map_err(|e| StoreError::Unavailable(format!("HTTP client setup failed: {}", e)))?;

        Ok(Self { config, client })
    }

    /// `{base}/{spreadsheet_id}{suffix}/{segments...}?{query}`
    fn url(&self, id_suffix: &str, segments: &[&str], query: &[(&str, &str)]) -> StoreResult<Url> {
        let mut url = Url::parse(&self.config.api_base)
            .map_err(|e| StoreError::Unavailable(format!("invalid API base: {}", e)))?;

        {
            let mut path = url
                .path_segments_mut()
                .map_err(|_| StoreError::Unavailable("API base cannot hold a path".into()))?;
            path.pop_if_empty();
            path.push(&format!("{}{}", self.config.spreadsheet_id, id_suffix));
            path.extend(segments);
        }

        if !query.is_empty() {
            url.query_pairs_mut().extend_pairs(query);
        }

        Ok(url)
    }

    fn send(&self, op: SheetOp, request: RequestBuilder) -> StoreResult<String> {
        let response = request
            .bearer_auth(&self.config.access_token)
            .send()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        let status = response.status();
        let body = response
            .text()
            .map_err(|e| StoreError::Unavailable(e.to_string()))?;

        debug!(op = %op, status = status.as_u16(), "sheets api call");

        if status.is_success() {
            Ok(body)
        } else {
            Err(status_error(status.as_u16(), &body))
        }
    }

    fn batch_update(&self, op: SheetOp, request: Value) -> StoreResult<()> {
        let url = self.url(":batchUpdate", &[], &[])?;
        let body = json!({ "requests": [request] });
        self.send(op, self.client.post(url).json(&body))?;
        Ok(())
    }
}

impl SheetBackend for GoogleSheet {
    fn read_rows(&self, columns: Option<&[usize]>) -> StoreResult<Vec<Vec<String>>> {
        let range = read_range(&self.config.worksheet, columns);
        let url = self.url("", &["values", range.as_str()], &[("majorDimension", "ROWS")])?;
        let body = self.send(SheetOp::Read, self.client.get(url))?;
        Ok(select_columns(parse_value_range(&body)?, columns))
    }

    fn append_row(&self, row: &[String]) -> StoreResult<()> {
        let range = format!("{}:append", a1_range(&self.config.worksheet, "A1"));
        let url = self.url(
            "",
            &["values", range.as_str()],
            &[
                ("valueInputOption", "USER_ENTERED"),
                ("insertDataOption", "INSERT_ROWS"),
            ],
        )?;
        let body = json!({ "values": [row] });
        self.send(SheetOp::Append, self.client.post(url).json(&body))?;
        Ok(())
    }

    fn insert_row(&self, row: &[String], store_row: usize) -> StoreResult<()> {
        if store_row == 0 {
            return Err(StoreError::RowOutOfRange(store_row));
        }

        self.batch_update(
            SheetOp::Insert,
            insert_dimension_request(self.config.sheet_gid, store_row),
        )?;

        let range = a1_range(&self.config.worksheet, &format!("A{}", store_row));
        let url = self.url(
            "",
            &["values", range.as_str()],
            &[("valueInputOption", "USER_ENTERED")],
        )?;
        let body = json!({ "range": range, "majorDimension": "ROWS", "values": [row] });
        self.send(SheetOp::Insert, self.client.put(url).json(&body))?;
        Ok(())
    }

    fn delete_row(&self, store_row: usize) -> StoreResult<()> {
        if store_row == 0 {
            return Err(StoreError::RowOutOfRange(store_row));
        }

        self.batch_update(
            SheetOp::Delete,
            delete_dimension_request(self.config.sheet_gid, store_row),
        )
    }
}

/// Spreadsheet column letter for a 0-based index (`0 → A`, `26 → AA`).
pub fn column_letter(index: usize) -> String {
    let mut n = index + 1;
    let mut letters = Vec::new();
    while n > 0 {
        let rem = (n - 1) % 26;
        letters.push(char::from(b'A' + rem as u8));
        n = (n - 1) / 26;
    }
    letters.iter().rev().collect()
}

/// `cells` on `worksheet` in A1 notation.
///
/// The sheet name is always quoted, with embedded quotes doubled, so
/// names with spaces or punctuation resolve to the worksheet.
pub fn a1_range(worksheet: &str, cells: &str) -> String {
    format!("'{}'!{}", worksheet.replace('\'', "''"), cells)
}

/// A1 range covering every column up to the highest one needed.
pub fn read_range(worksheet: &str, columns: Option<&[usize]>) -> String {
    let last = columns
        .and_then(|c| c.iter().max().copied())
        .unwrap_or(DEFAULT_LAST_COLUMN);
    a1_range(worksheet, &format!("A:{}", column_letter(last)))
}

fn dimension_range(sheet_gid: i64, store_row: usize) -> Value {
    json!({
        "sheetId": sheet_gid,
        "dimension": "ROWS",
        "startIndex": store_row - 1,
        "endIndex": store_row,
    })
}

/// batchUpdate request making room for `store_row` (1-based)
pub fn insert_dimension_request(sheet_gid: i64, store_row: usize) -> Value {
    json!({
        "insertDimension": {
            "range": dimension_range(sheet_gid, store_row),
            "inheritFromBefore": store_row > 1,
        }
    })
}

/// batchUpdate request removing `store_row` (1-based)
pub fn delete_dimension_request(sheet_gid: i64, store_row: usize) -> Value {
    json!({
        "deleteDimension": {
            "range": dimension_range(sheet_gid, store_row),
        }
    })
}

/// Rows of a `ValueRange` body; non-string cells are rendered as text.
pub fn parse_value_range(body: &str) -> StoreResult<Vec<Vec<String>>> {
    let range: ValueRange = serde_json::from_str(body)?;
    Ok(range
        .values
        .into_iter()
        .map(|row| {
            row.into_iter()
                .map(|cell| match cell {
                    Value::String(s) => s,
                    Value::Null => String::new(),
                    other => other.to_string(),
                })
                .collect()
        })
        .collect())
}

/// Maps a non-success HTTP status to a store error.
pub fn status_error(status: u16, body: &str) -> StoreError {
    match status {
        401 | 403 => StoreError::Unauthorized,
        429 => StoreError::QuotaExceeded,
        _ => StoreError::Http {
            status,
            message: api_error_message(body),
        },
    }
}

fn api_error_message(body: &str) -> String {
    serde_json::from_str::<Value>(body)
        .ok()
        .and_then(|v| v["error"]["message"].as_str().map(str::to_string))
        .unwrap_or_else(|| body.trim().chars().take(200).collect())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sheet() -> GoogleSheet {
        GoogleSheet::new(GoogleSheetConfig::new("sheet-123", "Vendor List", 7, "token")).unwrap()
    }

    #[test]
    fn test_column_letters() {
        assert_eq!(column_letter(0), "A");
        assert_eq!(column_letter(5), "F");
        assert_eq!(column_letter(25), "Z");
        assert_eq!(column_letter(26), "AA");
        assert_eq!(column_letter(701), "ZZ");
        assert_eq!(column_letter(702), "AAA");
    }

    #[test]
    fn test_read_range() {
        assert_eq!(read_range("Vendors", Some(&[0, 1, 2, 3, 4, 5])), "'Vendors'!A:F");
        assert_eq!(read_range("Vendors", None), "'Vendors'!A:Z");
    }

    #[test]
    fn test_sheet_names_are_quoted() {
        assert_eq!(a1_range("Q1-2024", "A5"), "'Q1-2024'!A5");
        assert_eq!(a1_range("Bob's Vendors", "A1"), "'Bob''s Vendors'!A1");
        assert_eq!(read_range("Vendor List", None), "'Vendor List'!A:Z");
    }

    #[test]
    fn test_urls_are_encoded() {
        let sheet = sheet();
        let url = sheet
            .url("", &["values", "'Vendor List'!A:F"], &[("majorDimension", "ROWS")])
            .unwrap();
        assert_eq!(
            url.as_str(),
            "https://sheets.googleapis.com/v4/spreadsheets/sheet-123/values/'Vendor%20List'!A:F?majorDimension=ROWS"
        );

        let batch = sheet.url(":batchUpdate", &[], &[]).unwrap();
        assert!(batch.as_str().ends_with("/spreadsheets/sheet-123:batchUpdate"));
    }

    #[test]
    fn test_dimension_requests_use_zero_based_half_open_ranges() {
        let insert = insert_dimension_request(7, 2);
        assert_eq!(insert["insertDimension"]["range"]["startIndex"], 1);
        assert_eq!(insert["insertDimension"]["range"]["endIndex"], 2);
        assert_eq!(insert["insertDimension"]["range"]["sheetId"], 7);
        assert_eq!(insert["insertDimension"]["inheritFromBefore"], true);

        let delete = delete_dimension_request(7, 4);
        assert_eq!(delete["deleteDimension"]["range"]["startIndex"], 3);
        assert_eq!(delete["deleteDimension"]["range"]["dimension"], "ROWS");
    }

    #[test]
    fn test_parse_value_range() {
        let body = r#"{"range": "Vendors!A1:C3", "majorDimension": "ROWS",
                       "values": [["Company Name", "Years"], ["Acme", 12], []]}"#;
        let rows = parse_value_range(body).unwrap();
        assert_eq!(rows[1], vec!["Acme".to_string(), "12".to_string()]);
        assert!(rows[2].is_empty());

        assert!(parse_value_range(r#"{"range": "Vendors!A1:F1"}"#)
            .unwrap()
            .is_empty());
        assert!(parse_value_range("<html>").is_err());
    }

    #[test]
    fn test_status_errors() {
        assert_eq!(status_error(401, ""), StoreError::Unauthorized);
        assert_eq!(status_error(403, ""), StoreError::Unauthorized);
        assert_eq!(status_error(429, ""), StoreError::QuotaExceeded);
        assert_eq!(
            status_error(400, r#"{"error": {"code": 400, "message": "Unable to parse range"}}"#),
            StoreError::Http {
                status: 400,
                message: "Unable to parse range".into()
            }
        );
    }
}
