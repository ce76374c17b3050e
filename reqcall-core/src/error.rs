//! Errors returned by the client factory and the request executor.
//!
//! Failures raised before a response exists (URL parsing, request building,
//! transport, body reading) are transparent: their message is the underlying
//! error's message, untouched. Failures tied to a response render the
//! `{"status_code": .., "body": ".."}` message shape with the raw body
//! interpolated verbatim, so the text is not guaranteed to be valid JSON.

use thiserror::Error;

/// Error type crossing the transport seam.
pub type BoxError = Box<dyn std::error::Error + Send + Sync>;

/// Everything a single call can fail with.
#[derive(Error, Debug)]
pub enum Error {
    /// The request path is not an absolute URL.
    #[error(transparent)]
    MalformedUrl(#[from] url::ParseError),

    /// Invalid method, URI or header, or a body stream that could not be read.
    #[error(transparent)]
    RequestConstruction(BoxError),

    /// Whatever the transport reported: connection refused, timeout, TLS...
    #[error(transparent)]
    Transport(BoxError),

    /// The response body stream could not be drained.
    #[error(transparent)]
    BodyRead(std::io::Error),

    /// Status did not match and the body did not decode into the error target.
    #[error(r#"{{"status_code": {status}, "body": "{body}", "error": "{source}"}}"#)]
    ErrorBodyDecode {
        status: u16,
        body: String,
        source: serde_json::Error,
    },

    /// Status matched but the body did not decode into the success target.
    #[error(r#"{{"status_code": {status}, "body": "{body}", "error": "{source}"}}"#)]
    SuccessBodyDecode {
        status: u16,
        body: String,
        source: serde_json::Error,
    },

    /// Status did not match the expected one.
    #[error(r#"{{"status_code": {status}, "body": "{body}"}}"#)]
    UnexpectedStatus { status: u16, body: String },

    /// The reqwest client could not be constructed.
    #[error(transparent)]
    ClientBuild(reqwest::Error),
}

impl Error {
    /// Response status, for the variants raised after a response arrived.
    pub fn status(&self) -> Option<u16> {
        match self {
            Error::ErrorBodyDecode { status, .. }
            | Error::SuccessBodyDecode { status, .. }
            | Error::UnexpectedStatus { status, .. } => Some(*status),
            _ => None,
        }
    }

    /// Raw response body, for the variants raised after a response arrived.
    pub fn body(&self) -> Option<&str> {
        match self {
            Error::ErrorBodyDecode { body, .. }
            | Error::SuccessBodyDecode { body, .. }
            | Error::UnexpectedStatus { body, .. } => Some(body),
            _ => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, Error>;
