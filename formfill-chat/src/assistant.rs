use std::sync::Arc;

use formfill_client::{ClientConfig, ClientError, ReqwestTransport, Transport};
use serde::Deserialize;
use serde_json::{Value, json};
use tracing::{debug, info, warn};

use crate::{MessageContent, MessageId, Sender, Source, Transcript, dedupe_sources};

pub const QUERY_PATH: &str = "/policies/assistant/query";
pub const REBUILD_PATH: &str = "/policies/assistant/rebuild-vector-db";

const CONNECTION_ERROR: &str =
    "Sorry, there was a problem connecting to the server. Please try again.";

/// A query whose reply has not arrived yet.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PendingQuery {
    pub query: String,
    pub placeholder: MessageId,
}

/// How the server answered an index rebuild.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RebuildOutcome {
    Rebuilt { message: Option<String> },
    Rejected { message: Option<String> },
}

#[derive(Debug, Deserialize)]
struct QueryReply {
    success: bool,
    #[serde(default)]
    answer: String,
    #[serde(default)]
    sources: Vec<Source>,
    #[serde(default)]
    message: Option<String>,
}

#[derive(Debug, Deserialize)]
struct RebuildReply {
    success: bool,
    #[serde(default)]
    message: Option<String>,
}

/// The policy assistant: a transcript plus the calls that feed it.
pub struct PolicyAssistant {
    transport: Arc<dyn Transport>,
    transcript: Transcript,
}

impl std::fmt::Debug for PolicyAssistant {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PolicyAssistant")
            .field("transcript", &self.transcript)
            .finish_non_exhaustive()
    }
}

impl PolicyAssistant {
    pub fn new(config: &ClientConfig) -> Result<Self, ClientError> {
        let transport = ReqwestTransport::new(config)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn Transport>) -> Self {
        Self {
            transport,
            transcript: Transcript::new(),
        }
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Record the user's question and a loading placeholder.
    ///
    /// Blank input is ignored.
    pub fn begin_query(&mut self, text: &str) -> Option<PendingQuery> {
        let query = text.trim();
        if query.is_empty() {
            return None;
        }
        self.transcript
            .push(Sender::User, MessageContent::Text(query.to_owned()));
        let placeholder = self
            .transcript
            .push(Sender::Assistant, MessageContent::Loading);
        Some(PendingQuery {
            query: query.to_owned(),
            placeholder,
        })
    }

    /// Replace the placeholder of `pending` with the reply.
    pub fn complete(
        &mut self,
        pending: &PendingQuery,
        reply: Result<Value, ClientError>,
    ) -> MessageId {
        let content = match reply.and_then(decode::<QueryReply>) {
            Ok(reply) if reply.success => {
                debug!(sources = reply.sources.len(), "assistant answered");
                MessageContent::Answer {
                    text: reply.answer,
                    sources: dedupe_sources(&reply.sources),
                }
            }
            Ok(reply) => {
                let message = reply.message.unwrap_or_else(|| "Unknown error".to_owned());
                warn!(reason = %message, "assistant query rejected");
                MessageContent::Error(format!("Sorry, I encountered an error: {message}"))
            }
            Err(error) => {
                warn!(error = %error, "assistant query failed");
                MessageContent::Error(CONNECTION_ERROR.to_owned())
            }
        };

        self.transcript.replace(&pending.placeholder, content);
        pending.placeholder.clone()
    }

    /// Ask a question and wait for the reply.
    ///
    /// Returns the id of the message that holds the reply, or `None` for
    /// blank input.
    pub async fn ask(&mut self, text: &str) -> Option<MessageId> {
        let pending = self.begin_query(text)?;
        let reply = self
            .transport
            .post_json(QUERY_PATH, json!({ "query": pending.query }))
            .await;
        Some(self.complete(&pending, reply))
    }

    /// Ask the service to rebuild its document index.
    pub async fn rebuild_index(&self) -> Result<RebuildOutcome, ClientError> {
        let reply: RebuildReply = decode(self.transport.post_json(REBUILD_PATH, json!({})).await?)?;
        if reply.success {
            info!("policy index rebuilt");
            Ok(RebuildOutcome::Rebuilt {
                message: reply.message,
            })
        } else {
            warn!(reason = reply.message.as_deref().unwrap_or_default(), "index rebuild rejected");
            Ok(RebuildOutcome::Rejected {
                message: reply.message,
            })
        }
    }
}

fn decode<T: serde::de::DeserializeOwned>(value: Value) -> Result<T, ClientError> {
    serde_json::from_value(value).map_err(|err| ClientError::Decode(err.to_string()))
}
