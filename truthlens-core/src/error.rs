use std::time::Duration;

/// Failure of a single outbound provider call.
#[derive(Debug, thiserror::Error)]
pub enum ProviderError {
    /// Elapsed deadline. Carries the budget when the worker pool enforced it.
    #[error("provider call timed out{}", timeout_suffix(.0))]
    Timeout(Option<Duration>),

    #[error("provider rejected credentials (HTTP {status}): {body}")]
    Auth { status: u16, body: String },

    #[error("provider rejected request (HTTP 400): {body}")]
    BadRequest { body: String },

    #[error("provider returned HTTP {status}: {body}")]
    Status { status: u16, body: String },

    #[error("transport error: {0}")]
    Transport(String),

    #[error("malformed provider reply: {0}")]
    Malformed(String),

    #[error("worker pool is closed")]
    PoolClosed,
}

fn timeout_suffix(budget: &Option<Duration>) -> String {
    budget.map(|d| format!(" after {d:?}")).unwrap_or_default()
}

impl ProviderError {
    /// Map a non-success HTTP status into the matching error kind.
    pub fn from_status(status: u16, body: impl Into<String>) -> Self {
        let body = body.into();
        match status {
            401 | 403 => ProviderError::Auth { status, body },
            400 => ProviderError::BadRequest { body },
            _ => ProviderError::Status { status, body },
        }
    }

    /// Credential or request-shape rejection, as opposed to a transient failure.
    pub fn is_auth_or_config(&self) -> bool {
        matches!(
            self,
            ProviderError::Auth { .. } | ProviderError::BadRequest { .. }
        )
    }
}

impl From<reqwest::Error> for ProviderError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            return ProviderError::Timeout(None);
        }
        if err.is_decode() {
            return ProviderError::Malformed(err.to_string());
        }
        ProviderError::Transport(err.to_string())
    }
}

impl From<async_openai::error::OpenAIError> for ProviderError {
    fn from(err: async_openai::error::OpenAIError) -> Self {
        use async_openai::error::OpenAIError;
        match err {
            OpenAIError::Reqwest(e) => e.into(),
            OpenAIError::JSONDeserialize(e) => ProviderError::Malformed(e.to_string()),
            OpenAIError::ApiError(api) => {
                ProviderError::Transport(format!("api error: {}", api.message))
            }
            other => ProviderError::Transport(other.to_string()),
        }
    }
}

/// Errors surfaced by the media-check operation.
#[derive(Debug, thiserror::Error)]
pub enum MediaCheckError {
    #[error("media detection is not configured: {0}")]
    NotConfigured(String),

    #[error("detector rejected the request: {0}")]
    ProviderRejected(ProviderError),

    #[error("invalid media URL: {0}")]
    InvalidMediaUrl(String),

    #[error("media check failed: {0}")]
    Upstream(ProviderError),
}

impl MediaCheckError {
    /// Status code the transport layer should report for this failure.
    pub fn status_code(&self) -> u16 {
        match self {
            MediaCheckError::NotConfigured(_) | MediaCheckError::ProviderRejected(_) => 503,
            // Malformed input is the caller's fault, so it is reported as a
            // bad request rather than as the service being unavailable (503).
            MediaCheckError::InvalidMediaUrl(_) => 400,
            MediaCheckError::Upstream(_) => 500,
        }
    }
}

impl From<ProviderError> for MediaCheckError {
    fn from(err: ProviderError) -> Self {
        if err.is_auth_or_config() {
            MediaCheckError::ProviderRejected(err)
        } else {
            MediaCheckError::Upstream(err)
        }
    }
}

/// Invalid or missing configuration detected at startup.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("{0} is required")]
    Missing(&'static str),

    #[error("{key} has an invalid value {value:?}: {reason}")]
    Invalid {
        key: &'static str,
        value: String,
        reason: String,
    },

    #[error("configuration errors: {}", .0.join(", "))]
    Multiple(Vec<String>),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_classification() {
        assert!(matches!(
            ProviderError::from_status(401, "nope"),
            ProviderError::Auth { status: 401, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(403, "nope"),
            ProviderError::Auth { status: 403, .. }
        ));
        assert!(matches!(
            ProviderError::from_status(400, "bad"),
            ProviderError::BadRequest { .. }
        ));
        assert!(matches!(
            ProviderError::from_status(502, "gateway"),
            ProviderError::Status { status: 502, .. }
        ));
    }

    #[test]
    fn media_error_kinds_map_to_status_codes() {
        let auth: MediaCheckError = ProviderError::from_status(403, "").into();
        assert_eq!(auth.status_code(), 503);
        let bad: MediaCheckError = ProviderError::from_status(400, "").into();
        assert_eq!(bad.status_code(), 503);
        let upstream: MediaCheckError = ProviderError::Timeout(Some(Duration::from_secs(1))).into();
        assert_eq!(upstream.status_code(), 500);
        assert_eq!(
            MediaCheckError::NotConfigured("AIORNOT_API_KEY".into()).status_code(),
            503
        );
        assert_eq!(
            MediaCheckError::InvalidMediaUrl("ftp://x".into()).status_code(),
            400
        );
    }

    #[tokio::test]
    async fn reqwest_timeout_is_classified_as_timeout() {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        // Accept and hold the connection without ever answering.
        let silent = tokio::spawn(async move {
            let (_socket, _) = listener.accept().await.unwrap();
            tokio::time::sleep(Duration::from_secs(5)).await;
        });

        let err = reqwest::Client::new()
            .get(format!("http://{addr}/"))
            .timeout(Duration::from_millis(50))
            .send()
            .await
            .unwrap_err();
        let err = ProviderError::from(err);
        assert!(matches!(err, ProviderError::Timeout(None)));
        assert_eq!(err.to_string(), "provider call timed out");
        silent.abort();
    }
}
