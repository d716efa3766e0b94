use std::sync::Arc;

use formfill::{MissingField, SavePayload, SubmitPayload};
use serde::Deserialize;
use serde::de::DeserializeOwned;
use tracing::{debug, info, warn};

use crate::{ClientConfig, ClientError, ReqwestTransport, Transport};

/// How the server answered a save.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SaveOutcome {
    Saved,
    Rejected { message: Option<String> },
}

/// How the server answered a submit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    Submitted {
        email_sent: bool,
        message: Option<String>,
    },
    Rejected {
        message: Option<String>,
        missing_fields: Vec<MissingField>,
    },
}

#[derive(Debug, Deserialize)]
struct SaveReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct SubmitReply {
    success: bool,
    #[serde(default)]
    email_sent: bool,
    #[serde(default)]
    message: Option<String>,
    #[serde(default)]
    missing_fields: Vec<MissingField>,
}

/// Save and submit calls for one form response.
#[derive(Clone)]
pub struct FormClient {
    transport: Arc<dyn Transport>,
    response_id: String,
}

impl std::fmt::Debug for FormClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FormClient")
            .field("response_id", &self.response_id)
            .finish_non_exhaustive()
    }
}

impl FormClient {
    /// Create a client talking HTTP to the configured service.
    pub fn new(config: &ClientConfig, response_id: impl Into<String>) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport), response_id))
    }

    pub fn with_transport(transport: Arc<dyn Transport>, response_id: impl Into<String>) -> Self {
        Self {
            transport,
            response_id: response_id.into(),
        }
    }

    pub fn response_id(&self) -> &str {
        &self.response_id
    }

    pub fn save_path(&self) -> String {
        format!("/forms/response/{}/save", self.response_id)
    }

    pub fn submit_path(&self) -> String {
        format!("/forms/response/{}/submit", self.response_id)
    }

    /// Persist the current answers. Never retried.
    pub async fn save(&self, payload: &SavePayload) -> Result<SaveOutcome, ClientError> {
        debug!(response_id = %self.response_id, answers = payload.answers.len(), "saving progress");
        let reply: SaveReply = self.post(&self.save_path(), payload).await?;

        if reply.success {
            info!(response_id = %self.response_id, "progress saved");
            Ok(SaveOutcome::Saved)
        } else {
            warn!(
                response_id = %self.response_id,
                message = reply.message.as_deref().unwrap_or_default(),
                "save rejected"
            );
            Ok(SaveOutcome::Rejected {
                message: reply.message,
            })
        }
    }

    /// Finalize the response.
    pub async fn submit(&self, payload: &SubmitPayload) -> Result<SubmitOutcome, ClientError> {
        debug!(response_id = %self.response_id, "submitting form");
        let reply: SubmitReply = self.post(&self.submit_path(), payload).await?;

        if reply.success {
            info!(
                response_id = %self.response_id,
                email_sent = reply.email_sent,
                "form submitted"
            );
            Ok(SubmitOutcome::Submitted {
                email_sent: reply.email_sent,
                message: reply.message,
            })
        } else {
            warn!(
                response_id = %self.response_id,
                missing = reply.missing_fields.len(),
                "submit rejected"
            );
            Ok(SubmitOutcome::Rejected {
                message: reply.message,
                missing_fields: reply.missing_fields,
            })
        }
    }

    async fn post<B, R>(&self, path: &str, body: &B) -> Result<R, ClientError>
    where
        B: serde::Serialize,
        R: DeserializeOwned,
    {
        let body = serde_json::to_value(body)
            .map_err(|err| ClientError::Decode(format!("failed to encode request: {err}")))?;
        let reply = self.transport.post_json(path, body).await?;
        serde_json::from_value(reply)
            .map_err(|err| ClientError::Decode(format!("unexpected reply from {path}: {err}")))
    }
}
