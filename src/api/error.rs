use std::fmt;

use serde::Deserialize;

/// Errors surfaced by [`CompletionClient`](super::client::CompletionClient)
/// operations. Variants carry enough info to determine retryability
/// (future use). API keys never appear in messages.
#[derive(Debug)]
pub enum ClientError {
    /// Client misconfigured (missing API key or base URL). The user must
    /// fix settings before retrying.
    Config(String),
    /// API returned a non-2xx response. `message` is the server-supplied
    /// error text when the body was parseable, else synthesized from the
    /// status code.
    Api { status: u16, message: String },
    /// A 2xx response whose body does not match the expected schema.
    /// Treated as a provider incompatibility, not retried.
    Format(String),
    /// Network-level failure or a stream aborted mid-read.
    Transport(String),
    /// Caller abandoned the request (dropped the chunk receiver).
    Cancelled,
}

impl fmt::Display for ClientError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ClientError::Config(msg) => write!(f, "config error: {msg}"),
            ClientError::Api { status, message } => {
                write!(f, "API error (HTTP {status}): {message}")
            }
            ClientError::Format(msg) => write!(f, "unexpected response format: {msg}"),
            ClientError::Transport(msg) => write!(f, "transport error: {msg}"),
            ClientError::Cancelled => write!(f, "request cancelled"),
        }
    }
}

impl std::error::Error for ClientError {}

/// Error body shape returned by OpenAI-compatible endpoints. Some providers
/// nest the message under `error`, others put it at the top level.
#[derive(Deserialize)]
struct ErrorBody {
    error: Option<ErrorDetail>,
    message: Option<String>,
}

#[derive(Deserialize)]
struct ErrorDetail {
    message: Option<String>,
}

/// Builds the [`ClientError::Api`] for a non-2xx response, preferring the
/// server's own message over a synthesized one.
pub(crate) fn api_error(status: u16, body: &str) -> ClientError {
    let message = serde_json::from_str::<ErrorBody>(body)
        .ok()
        .and_then(|b| b.error.and_then(|e| e.message).or(b.message))
        .unwrap_or_else(|| format!("request failed: {status}"));
    ClientError::Api { status, message }
}
