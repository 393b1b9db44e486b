use derive_more::Display;
use serde::Deserialize;

#[derive(Debug, Display, Clone, PartialEq)]
pub enum ClientError {
    #[display("Invalid backend URL: {_0}")]
    InvalidUrl(String),

    #[display("Request failed: {_0}")]
    Transport(String),

    /// Non-2xx reply; `message` is the backend's `error` field when present.
    #[display("{message} (HTTP {status})")]
    Status { status: u16, message: String },

    #[display("Backend did not answer within {_0:?}")]
    Timeout(std::time::Duration),

    #[display("Unexpected response body: {_0}")]
    Decode(String),

    #[display("Preferences unavailable: {_0}")]
    Storage(String),
}

impl std::error::Error for ClientError {}

impl ClientError {
    pub fn is_unauthorized(&self) -> bool {
        matches!(self, ClientError::Status { status: 401, .. })
    }

    /// The text shown inline next to a form.
    pub fn user_message(&self) -> String {
        match self {
            ClientError::Status { message, .. } => message.clone(),
            other => other.to_string(),
        }
    }
}

impl From<reqwest::Error> for ClientError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_decode() {
            ClientError::Decode(err.to_string())
        } else {
            ClientError::Transport(err.to_string())
        }
    }
}

impl From<url::ParseError> for ClientError {
    fn from(err: url::ParseError) -> Self {
        ClientError::InvalidUrl(err.to_string())
    }
}

impl From<std::io::Error> for ClientError {
    fn from(err: std::io::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

impl From<serde_json::Error> for ClientError {
    fn from(err: serde_json::Error) -> Self {
        ClientError::Storage(err.to_string())
    }
}

/// `{"error": "..."}` body returned by every failing endpoint.
#[derive(Debug, Deserialize)]
pub(crate) struct ErrorBody {
    pub error: String,
}
