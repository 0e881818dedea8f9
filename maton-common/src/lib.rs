//! Maton Common Types
//!
//! Request and response payloads for the downstream APIs reached through the
//! Maton gateway.

pub mod sheets;
pub mod slack;

pub use sheets::{
    AppendValuesRequest, CreateSpreadsheetRequest, Spreadsheet, SpreadsheetProperties,
    ValueInputOption,
};
pub use slack::{PostMessageRequest, PostMessageResponse};
