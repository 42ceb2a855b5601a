use thiserror::Error;
use todo_shared::TodoId;

/// Failure of a single round trip to the todo service.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("network error calling {path}: {message}")]
    Network { path: String, message: String },

    #[error("server returned {status} for {path}: {body}")]
    Server {
        path: String,
        status: u16,
        body: String,
    },

    #[error("todo {id} not found")]
    NotFound { id: TodoId },

    #[error("failed to decode response from {path}: {source}")]
    Decode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("failed to encode request for {path}: {source}")]
    Encode {
        path: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("invalid service url {url}: {source}")]
    InvalidUrl {
        url: String,
        #[source]
        source: url::ParseError,
    },
}

impl GatewayError {
    pub fn network(path: impl Into<String>, message: impl ToString) -> Self {
        Self::Network {
            path: path.into(),
            message: message.to_string(),
        }
    }
}
