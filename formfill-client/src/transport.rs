use async_trait::async_trait;
use serde_json::Value;
use tracing::debug;

use crate::{ClientConfig, ClientError};

const MAX_ERROR_BODY: usize = 200;

/// Sends a JSON body to a service path and returns the decoded JSON reply.
#[async_trait]
pub trait Transport: Send + Sync {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError>;
}

/// `Transport` over HTTP.
///
/// Replies are decoded as JSON whatever their status, since the form
/// service reports business failures as `{success: false, message}` with
/// 4xx/5xx codes.
#[derive(Debug, Clone)]
pub struct ReqwestTransport {
    config: ClientConfig,
    client: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let client = reqwest::Client::builder()
            .user_agent(config.user_agent.as_str())
            .build()
            .map_err(|err| {
                ClientError::Configuration(format!("failed to initialize HTTP client: {err}"))
            })?;

        Ok(Self {
            config: config.clone(),
            client,
        })
    }
}

#[async_trait]
impl Transport for ReqwestTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        let url = self.config.url(path);
        debug!(%url, "posting form request");

        let response = self
            .client
            .post(&url)
            .json(&body)
            .send()
            .await
            .map_err(ClientError::transport)?;

        let status = response.status();
        let text = response.text().await.map_err(ClientError::transport)?;

        match serde_json::from_str::<Value>(&text) {
            Ok(value) => {
                debug!(%url, status = status.as_u16(), "form service replied");
                Ok(value)
            }
            Err(_) if !status.is_success() => Err(ClientError::Status {
                status: status.as_u16(),
                body: truncate_for_error(&text),
            }),
            Err(err) => Err(ClientError::Decode(format!(
                "reply from {url} is not JSON: {err}"
            ))),
        }
    }
}

fn truncate_for_error(body: &str) -> String {
    match body.char_indices().nth(MAX_ERROR_BODY) {
        Some((end, _)) => format!("{}...", &body[..end]),
        None => body.to_owned(),
    }
}
