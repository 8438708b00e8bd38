use reqwest::StatusCode;
use serde_json::Value;
use thiserror::Error;

const MAX_MESSAGE_CHARS: usize = 512;

#[derive(Error, Debug)]
pub enum ClientError {
    #[error("Request to inference backend failed: {0}")]
    Network(#[from] reqwest::Error),
    #[error("Inference backend unavailable (HTTP {status}){}", describe(.message))]
    Unavailable {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Inference backend reported a failure (HTTP {status}){}", describe(.message))]
    Server {
        status: StatusCode,
        message: Option<String>,
    },
    #[error("Failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),
    #[error("Invalid request: {0}")]
    Validation(String),
}

/// Coarse classification callers branch on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    Network,
    Server,
    Decode,
    Validation,
}

impl ErrorKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            ErrorKind::Network => "network",
            ErrorKind::Server => "server",
            ErrorKind::Decode => "decode",
            ErrorKind::Validation => "validation",
        }
    }
}

impl ClientError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            ClientError::Network(_) | ClientError::Unavailable { .. } => ErrorKind::Network,
            ClientError::Server { .. } => ErrorKind::Server,
            ClientError::Decode(_) => ErrorKind::Decode,
            ClientError::Validation(_) => ErrorKind::Validation,
        }
    }

    pub fn status(&self) -> Option<StatusCode> {
        match self {
            ClientError::Network(e) => e.status(),
            ClientError::Unavailable { status, .. } | ClientError::Server { status, .. } => {
                Some(*status)
            }
            _ => None,
        }
    }

    pub fn backend_message(&self) -> Option<&str> {
        match self {
            ClientError::Unavailable { message, .. } | ClientError::Server { message, .. } => {
                message.as_deref()
            }
            _ => None,
        }
    }
}

fn describe(message: &Option<String>) -> String {
    match message {
        Some(message) => format!(": {}", message),
        None => String::new(),
    }
}

/// Pulls a human readable message out of an error body.
///
/// Structured bodies win: the first string among `error`, `detail` and
/// `message`. Otherwise a non-empty text body is used, truncated.
pub(crate) fn extract_backend_message(body: &[u8]) -> Option<String> {
    if let Ok(Value::Object(fields)) = serde_json::from_slice::<Value>(body) {
        for key in ["error", "detail", "message"] {
            if let Some(Value::String(message)) = fields.get(key) {
                return Some(message.clone());
            }
        }
    }

    let text = String::from_utf8_lossy(body);
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    Some(text.chars().take(MAX_MESSAGE_CHARS).collect())
}
