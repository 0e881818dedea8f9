//! Google Sheets through the gateway, and the BTC dashboard built on it.

use chrono::{NaiveDate, NaiveDateTime};
use maton_common::{AppendValuesRequest, CreateSpreadsheetRequest, Spreadsheet};
use serde_json::Value;

use crate::client::{GatewayClient, Method};
use crate::error::{Error, Result};

const SPREADSHEETS: [&str; 3] = ["google-sheets", "v4", "spreadsheets"];

/// Header row of the dashboard sheet.
pub const DASHBOARD_HEADERS: [&str; 6] = [
    "Timestamp",
    "BTC Price (USD)",
    "Volume (BTC)",
    "Spread (%)",
    "Signal",
    "Notes",
];

const TIMESTAMP_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

/// Create an empty spreadsheet titled `title`.
pub async fn create_spreadsheet(client: &GatewayClient, title: &str) -> Result<Spreadsheet> {
    let request = CreateSpreadsheetRequest::titled(title);
    let sheet: Spreadsheet = client
        .request_as(Method::Post, &SPREADSHEETS, Some(&request))
        .await?;

    if sheet.spreadsheet_id.is_empty() {
        return Err(Error::InvalidResponse("spreadsheetId is empty".to_string()));
    }

    tracing::info!(spreadsheet_id = %sheet.spreadsheet_id, "Created spreadsheet");
    Ok(sheet)
}

/// Append `request.values` after the table found at `range` (e.g. `A1`).
pub async fn append_values(
    client: &GatewayClient,
    spreadsheet_id: &str,
    range: &str,
    request: &AppendValuesRequest,
) -> Result<Value> {
    let action = format!("{}:append", range);
    let [api, version, collection] = SPREADSHEETS;
    let segments = [api, version, collection, spreadsheet_id, "values", action.as_str()];

    let response = client.post(&segments, request).await?;
    tracing::info!(
        spreadsheet_id = %spreadsheet_id,
        range = %range,
        rows = request.values.len(),
        "Appended rows"
    );
    Ok(response)
}

pub fn dashboard_title(date: NaiveDate) -> String {
    format!("BTC Analysis Dashboard - {}", date.format("%Y-%m-%d"))
}

pub fn header_row() -> Vec<String> {
    DASHBOARD_HEADERS.iter().map(|h| h.to_string()).collect()
}

/// Example rows stamped with `now`.
pub fn sample_rows(now: NaiveDateTime) -> Vec<Vec<String>> {
    let ts = now.format(TIMESTAMP_FORMAT).to_string();
    let rows: [[&str; 5]; 2] = [
        ["69305.49", "44254.75", "0.02", "HOLD", "Normal market conditions"],
        [
            "69500.00",
            "52000.00",
            "0.05",
            "🐋 WHALE WALL",
            "Large sell wall detected at $69,500",
        ],
    ];

    rows.iter()
        .map(|row| {
            std::iter::once(ts.clone())
                .chain(row.iter().map(|cell| cell.to_string()))
                .collect::<Vec<String>>()
        })
        .collect()
}

/// Progress of [`create_btc_dashboard`], reported after each completed call.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DashboardStep {
    Created(Spreadsheet),
    HeadersAdded,
    SampleDataAdded,
}

/// Create the dashboard spreadsheet, then add headers and sample rows.
///
/// Stops at the first failure. Earlier steps are not undone.
pub async fn create_btc_dashboard<F>(
    client: &GatewayClient,
    now: NaiveDateTime,
    mut on_step: F,
) -> Result<Spreadsheet>
where
    F: FnMut(&DashboardStep),
{
    let sheet = create_spreadsheet(client, &dashboard_title(now.date())).await?;
    on_step(&DashboardStep::Created(sheet.clone()));

    let headers = AppendValuesRequest::raw(vec![header_row()]);
    append_values(client, &sheet.spreadsheet_id, "A1", &headers).await?;
    on_step(&DashboardStep::HeadersAdded);

    let samples = AppendValuesRequest::raw(sample_rows(now));
    append_values(client, &sheet.spreadsheet_id, "A2", &samples).await?;
    on_step(&DashboardStep::SampleDataAdded);

    Ok(sheet)
}
