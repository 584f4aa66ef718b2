//! Error types for the request helper.
//!
//! # Design
//! `TransportError` describes what went wrong while bytes were on the wire;
//! `HelperError` is what ends up in `RequestResult::error`. A non-2xx status
//! is not a transport failure, so it gets its own `Status` variant carrying
//! the code the server actually returned.

use thiserror::Error;

/// Failures reported by a [`Transport`](crate::transport::Transport).
#[derive(Debug, Error)]
pub enum TransportError {
    /// The connection could not be established or was dropped.
    #[error("connection error: {0}")]
    Connection(String),

    /// The transport gave up waiting for the server.
    #[error("request timeout")]
    Timeout,

    /// The request could not be built, e.g. a header value the transport
    /// refuses to send.
    #[error("invalid request: {0}")]
    InvalidRequest(String),

    #[error("{0}")]
    Other(String),
}

/// Errors captured in a [`RequestResult`](crate::result::RequestResult).
#[derive(Debug, Error)]
pub enum HelperError {
    /// Base URL and path did not combine into a valid absolute URL.
    #[error("invalid url {url}: {reason}")]
    InvalidUrl { url: String, reason: String },

    #[error(transparent)]
    Transport(#[from] TransportError),

    /// A result carried neither a response nor an error.
    #[error("no response received")]
    NoResponse,

    /// The server answered with a status outside 200..=299.
    #[error("HTTP {status}")]
    Status { status: u16 },

    /// The request payload could not be serialized to JSON.
    #[error("serialization failed: {0}")]
    Serialization(String),

    /// The response body could not be deserialized into the expected type.
    #[error("deserialization failed: {0}")]
    Deserialization(String),

    /// Reading the response body or writing a download target failed.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    /// A configuration document could not be parsed.
    #[error("invalid configuration: {0}")]
    Config(String),
}

impl HelperError {
    /// Status code carried by a `Status` error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            HelperError::Status { status } => Some(*status),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn status_error_display() {
        let err = HelperError::Status { status: 404 };
        assert_eq!(err.to_string(), "HTTP 404");
        assert_eq!(err.status(), Some(404));
    }

    #[test]
    fn transport_error_is_transparent() {
        let err: HelperError = TransportError::Connection("refused".to_string()).into();
        assert_eq!(err.to_string(), "connection error: refused");
        assert_eq!(err.status(), None);
    }

    #[test]
    fn io_error_converts() {
        let io = std::io::Error::new(std::io::ErrorKind::NotFound, "missing dir");
        let err: HelperError = io.into();
        assert!(matches!(err, HelperError::Io(_)));
        assert!(err.to_string().contains("missing dir"));
    }
}
