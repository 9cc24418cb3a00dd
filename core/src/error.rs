//! Error types for the remote API client.
//!
//! # Design
//! `ClientError` is the only error an operation reports. Its variants keep
//! the failure source structured (target URL, status, cause, raw body) so
//! callers can branch on the kind instead of parsing messages.

use thiserror::Error;

/// Errors returned by `RemoteClient` parse methods and the client facades.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ClientError {
    /// The exchange did not complete, or the server answered with a
    /// non-success status. `status` is set in the latter case and `cause`
    /// then holds the response body text.
    #[error("request to {url} failed: {}", describe_transport(.status, .cause))]
    Transport {
        url: String,
        status: Option<u16>,
        cause: String,
    },

    /// The exchange completed but the body did not match the expected shape.
    /// `body` is the received content as text; invalid UTF-8 shows as U+FFFD.
    #[error("could not decode response from {url}: {cause}{}", describe_body(.body))]
    Decode {
        url: String,
        cause: String,
        body: Option<String>,
    },

    /// The request payload could not be serialized to JSON; nothing was sent.
    #[error("could not encode request body for {url}: {cause}")]
    Encode { url: String, cause: String },
}

impl ClientError {
    /// The URL of the request that failed.
    pub fn url(&self) -> &str {
        match self {
            ClientError::Transport { url, .. }
            | ClientError::Decode { url, .. }
            | ClientError::Encode { url, .. } => url,
        }
    }

    pub fn is_transport(&self) -> bool {
        matches!(self, ClientError::Transport { .. })
    }

    pub fn is_decode(&self) -> bool {
        matches!(self, ClientError::Decode { .. })
    }

    /// The HTTP status, when the server answered with a non-success one.
    pub fn status(&self) -> Option<u16> {
        match self {
            ClientError::Transport { status, .. } => *status,
            _ => None,
        }
    }
}

fn describe_transport(status: &Option<u16>, cause: &str) -> String {
    match status {
        Some(status) => format!("HTTP {status}: {cause}"),
        None => cause.to_string(),
    }
}

fn describe_body(body: &Option<String>) -> String {
    match body {
        Some(body) => format!(" (content: {body})"),
        None => String::new(),
    }
}
