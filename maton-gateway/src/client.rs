//! Authenticated HTTP client for the Maton gateway.

use reqwest::header::CONTENT_TYPE;
use reqwest::{Client, Url};
use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::config::{parse_base_url, ApiKey, GatewayConfig};
use crate::error::{Error, Result};

/// Methods the gateway integrations use.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Method {
    Get,
    Post,
}

impl From<Method> for reqwest::Method {
    fn from(method: Method) -> Self {
        match method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
        }
    }
}

/// Gateway HTTP client.
///
/// Every request carries `Authorization: Bearer <key>` and
/// `Content-Type: application/json`. Requests are sent one at a time by the
/// callers; nothing is retried.
pub struct GatewayClient {
    http_client: Client,
    base_url: Url,
    api_key: ApiKey,
}

impl GatewayClient {
    pub fn new(config: &GatewayConfig) -> Result<Self> {
        let base_url = parse_base_url(config.base_url.as_str())?;

        Ok(Self {
            http_client: Client::new(),
            base_url,
            api_key: config.api_key.clone(),
        })
    }

    pub fn base_url(&self) -> &Url {
        &self.base_url
    }

    /// Build the URL for `segments` under the base URL.
    ///
    /// Each segment is percent-encoded on its own, so an identifier holding
    /// `/` or `?` stays a single path segment on the gateway host.
    pub fn endpoint(&self, segments: &[&str]) -> Result<Url> {
        if let Some(bad) = segments
            .iter()
            .find(|s| s.is_empty() || **s == "." || **s == "..")
        {
            return Err(Error::InvalidUrl(format!("invalid path segment '{}'", bad)));
        }

        let mut url = self.base_url.clone();
        url.path_segments_mut()
            .map_err(|_| Error::InvalidUrl(self.base_url.to_string()))?
            .pop_if_empty()
            .extend(segments);

        Ok(url)
    }

    /// Send a request and return the decoded JSON body.
    pub async fn request<B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        let url = self.endpoint(segments)?;
        let payload = body
            .map(serde_json::to_vec)
            .transpose()
            .map_err(|e| Error::Serialization(e.to_string()))?;

        tracing::debug!(method = ?method, url = %url, "Sending gateway request");

        let mut builder = self
            .http_client
            .request(method.into(), url)
            .bearer_auth(self.api_key.expose())
            .header(CONTENT_TYPE, "application/json");
        if let Some(payload) = payload {
            builder = builder.body(payload);
        }

        let response = builder
            .send()
            .await
            .map_err(|e| Error::Transport(e.to_string()))?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            tracing::debug!(status = status.as_u16(), body = %body, "Gateway returned an error");
            return Err(Error::Gateway {
                status: status.as_u16(),
                body,
            });
        }

        response
            .json::<Value>()
            .await
            .map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    /// Like [`GatewayClient::request`], then decode into `T`.
    ///
    /// A missing required field is reported as `InvalidResponse`.
    pub async fn request_as<T, B>(
        &self,
        method: Method,
        segments: &[&str],
        body: Option<&B>,
    ) -> Result<T>
    where
        T: DeserializeOwned,
        B: Serialize + ?Sized,
    {
        let value = self.request(method, segments, body).await?;
        serde_json::from_value(value).map_err(|e| Error::InvalidResponse(e.to_string()))
    }

    pub async fn get(&self, segments: &[&str]) -> Result<Value> {
        self.request::<Value>(Method::Get, segments, None).await
    }

    pub async fn post<B>(&self, segments: &[&str], body: &B) -> Result<Value>
    where
        B: Serialize + ?Sized,
    {
        self.request(Method::Post, segments, Some(body)).await
    }
}
