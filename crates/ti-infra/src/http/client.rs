use std::time::Duration;

use anyhow::Context;
use reqwest::{multipart::Form, Client, RequestBuilder};
use serde_json::Value;
use tracing::{debug, warn};

use ti_core::{classify, AppConfig, ClassifiedResponse, RemoteCallError};

/// Characters of a raw body written to the debug log.
const BODY_LOG_PREFIX: usize = 200;

/// Shared HTTP client bound to the backend base URL.
///
/// Cloning is cheap; the underlying connection pool is shared.
#[derive(Debug, Clone)]
pub struct RemoteEndpoint {
    client: Client,
    base_url: String,
}

impl RemoteEndpoint {
    /// Builds the client with the configured timeouts. A zero timeout is left unbounded.
    pub fn from_config(config: &AppConfig) -> anyhow::Result<Self> {
        let mut builder = Client::builder();
        if config.request_timeout_secs > 0 {
            builder = builder.timeout(Duration::from_secs(config.request_timeout_secs));
        }
        if config.connect_timeout_secs > 0 {
            builder = builder.connect_timeout(Duration::from_secs(config.connect_timeout_secs));
        }
        let client = builder.build().context("failed to build HTTP client")?;

        Ok(Self::with_client(client, &config.base_url))
    }

    pub fn with_client(client: Client, base_url: &str) -> Self {
        Self {
            client,
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Joins `path` onto the base URL.
    pub fn url(&self, path: &str) -> String {
        format!("{}/{}", self.base_url, path.trim_start_matches('/'))
    }

    pub async fn get(&self, path: &str) -> Result<ClassifiedResponse, RemoteCallError> {
        self.execute(path, self.client.get(self.url(path))).await
    }

    pub async fn post_json(
        &self,
        path: &str,
        body: &Value,
    ) -> Result<ClassifiedResponse, RemoteCallError> {
        self.execute(path, self.client.post(self.url(path)).json(body))
            .await
    }

    pub async fn post_multipart(
        &self,
        path: &str,
        form: Form,
    ) -> Result<ClassifiedResponse, RemoteCallError> {
        self.execute(path, self.client.post(self.url(path)).multipart(form))
            .await
    }

    /// Sends the request and classifies whatever came back.
    ///
    /// Only a missing response is an `Err` here; every received body,
    /// whatever its status, goes through [`classify`].
    async fn execute(
        &self,
        path: &str,
        request: RequestBuilder,
    ) -> Result<ClassifiedResponse, RemoteCallError> {
        debug!(endpoint = path, "sending request");

        let response = request.send().await.map_err(|e| transport_error(path, e))?;
        let status = response.status();
        let body = response.text().await.map_err(|e| transport_error(path, e))?;

        debug!(
            endpoint = path,
            status = status.as_u16(),
            body = %body_prefix(&body),
            "received response"
        );

        let classified = classify(&body, status.is_success());
        debug!(endpoint = path, kind = ?classified.kind(), "response classified");
        Ok(classified)
    }
}

fn transport_error(path: &str, err: reqwest::Error) -> RemoteCallError {
    let detail = if err.is_timeout() {
        "request timed out".to_string()
    } else {
        err.to_string()
    };
    warn!(endpoint = path, error = %err, "no response from server");
    RemoteCallError::NetworkUnreachable(detail)
}

fn body_prefix(body: &str) -> String {
    body.chars().take(BODY_LOG_PREFIX).collect()
}

/// Non-empty string value of `key` in an object payload.
pub(crate) fn string_field(payload: &Value, key: &str) -> Option<String> {
    payload
        .get(key)
        .and_then(Value::as_str)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}
