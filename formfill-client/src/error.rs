use formfill::FormError;

/// Error type for requests against the form service.
#[derive(Debug, thiserror::Error)]
pub enum ClientError {
    /// The request never produced a reply (connection refused, reset, etc.)
    #[error("Transport error: {0}")]
    Transport(#[from] anyhow::Error),

    /// The reply was not JSON and carried a failure status.
    #[error("Server returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    /// The reply was not in the expected shape.
    #[error("Malformed reply: {0}")]
    Decode(String),

    #[error("Configuration error: {0}")]
    Configuration(String),

    #[error(transparent)]
    Form(#[from] FormError),
}

impl ClientError {
    /// Create a transport error from any error type.
    pub fn transport(err: impl Into<anyhow::Error>) -> Self {
        Self::Transport(err.into())
    }

    /// Check if the request failed before the server answered.
    pub fn is_network(&self) -> bool {
        matches!(self, Self::Transport(_))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn only_transport_failures_are_network_errors() {
        assert!(ClientError::transport(anyhow::anyhow!("connection refused")).is_network());
        assert!(
            !ClientError::Status {
                status: 502,
                body: "Bad Gateway".into()
            }
            .is_network()
        );
        assert!(!ClientError::Decode("not JSON".into()).is_network());
    }
}
