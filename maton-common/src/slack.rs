//! Slack Web API payloads.

use serde::{Deserialize, Serialize};

/// Body of `POST /api/chat.postMessage`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageRequest {
    pub channel: String,
    pub text: String,
}

/// Response of `chat.postMessage`.
///
/// Slack answers 200 even on failure; `ok` tells the two apart and `error`
/// carries the reason (e.g. `channel_not_found`).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PostMessageResponse {
    pub ok: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub ts: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
