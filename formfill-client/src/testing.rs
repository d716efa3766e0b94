use std::collections::VecDeque;
use std::sync::Arc;

use anyhow::anyhow;
use async_trait::async_trait;
use serde_json::Value;
use tokio::sync::{Mutex, Notify};

use crate::{ClientError, Transport};

/// Records requests and replays queued replies. An empty queue is a
/// transport failure.
#[derive(Debug, Default)]
pub(crate) struct StubTransport {
    requests: Mutex<Vec<(String, Value)>>,
    responses: Mutex<VecDeque<Value>>,
    gate: Option<Arc<Notify>>,
}

impl StubTransport {
    /// A stub whose replies wait for a permit on the returned `Notify`.
    pub(crate) fn gated() -> (Self, Arc<Notify>) {
        let gate = Arc::new(Notify::new());
        let stub = Self {
            gate: Some(Arc::clone(&gate)),
            ..Self::default()
        };
        (stub, gate)
    }

    pub(crate) async fn push_response(&self, value: Value) {
        self.responses.lock().await.push_back(value);
    }

    pub(crate) async fn request_count(&self) -> usize {
        self.requests.lock().await.len()
    }

    pub(crate) async fn requests(&self) -> Vec<(String, Value)> {
        self.requests.lock().await.clone()
    }
}

#[async_trait]
impl Transport for StubTransport {
    async fn post_json(&self, path: &str, body: Value) -> Result<Value, ClientError> {
        self.requests.lock().await.push((path.to_owned(), body));
        if let Some(gate) = &self.gate {
            gate.notified().await;
        }
        let mut responses = self.responses.lock().await;
        if let Some(response) = responses.pop_front() {
            return Ok(response);
        }

        Err(ClientError::Transport(anyhow!(
            "stub transport has no more queued responses"
        )))
    }
}
