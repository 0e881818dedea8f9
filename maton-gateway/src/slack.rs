//! Slack messages through the gateway.

use maton_common::{PostMessageRequest, PostMessageResponse};

use crate::client::{GatewayClient, Method};
use crate::error::{Error, Result};

const POST_MESSAGE: [&str; 3] = ["slack", "api", "chat.postMessage"];

/// A message Slack accepted.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PostedMessage {
    pub channel: String,
    /// Slack's message timestamp, which doubles as its id.
    pub ts: String,
}

/// Post `text` to `channel`.
///
/// `ok: false` becomes [`Error::Application`] carrying Slack's error code.
pub async fn post_message(client: &GatewayClient, channel: &str, text: &str) -> Result<PostedMessage> {
    let request = PostMessageRequest {
        channel: channel.to_string(),
        text: text.to_string(),
    };

    let response: PostMessageResponse = client
        .request_as(Method::Post, &POST_MESSAGE, Some(&request))
        .await?;

    if !response.ok {
        let error = response
            .error
            .unwrap_or_else(|| "unknown_error".to_string());
        tracing::debug!(channel = %channel, error = %error, "Slack rejected message");
        return Err(Error::Application { error });
    }

    let ts = response
        .ts
        .ok_or_else(|| Error::InvalidResponse("missing field `ts`".to_string()))?;

    tracing::info!(channel = %channel, ts = %ts, "Message posted");
    Ok(PostedMessage {
        channel: channel.to_string(),
        ts,
    })
}
