//! Google Sheets v4 payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /v4/spreadsheets`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CreateSpreadsheetRequest {
    pub properties: SpreadsheetProperties,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpreadsheetProperties {
    pub title: String,
}

impl CreateSpreadsheetRequest {
    pub fn titled(title: impl Into<String>) -> Self {
        Self {
            properties: SpreadsheetProperties {
                title: title.into(),
            },
        }
    }
}

/// The part of a created spreadsheet later calls depend on.
///
/// Everything else the API returns (sheets, locale, ...) is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Spreadsheet {
    pub spreadsheet_id: String,
    pub spreadsheet_url: String,
}

/// How the API should interpret appended cell values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum ValueInputOption {
    /// Stored exactly as given.
    #[default]
    Raw,
    /// Parsed as if typed into the UI (numbers, dates, formulas).
    UserEntered,
}

/// Body of `POST /v4/spreadsheets/{id}/values/{range}:append`.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppendValuesRequest {
    pub values: Vec<Vec<String>>,
    pub value_input_option: ValueInputOption,
}

impl AppendValuesRequest {
    pub fn raw(values: Vec<Vec<String>>) -> Self {
        Self {
            values,
            value_input_option: ValueInputOption::Raw,
        }
    }
}
