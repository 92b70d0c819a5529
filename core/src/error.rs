//! Error types for the esa API client.
//!
//! # Design
//! Three failure classes cover a single GET round trip: the request never
//! completed (`Transport`), the server answered with something other than
//! 200 (`HttpStatus`), or the 200 body did not match the expected schema
//! (`Decode`). Non-200 bodies are dropped; only the status and its reason
//! phrase reach the caller.

use thiserror::Error;

/// Errors returned by `EsaClient` parse methods and the `Esa` services.
#[derive(Debug, Error)]
pub enum EsaError {
    /// The HTTP round trip could not be completed (DNS, connect, timeout,
    /// body read).
    #[error("transport error: {0}")]
    Transport(String),

    /// The server responded with a status other than 200.
    #[error("HTTP {status}: {reason}")]
    HttpStatus { status: u16, reason: String },

    /// The 200 response body could not be decoded into the expected type.
    #[error("decode failed: {0}")]
    Decode(String),
}

impl EsaError {
    /// Build an `HttpStatus` error with the canonical reason phrase for
    /// `status`.
    pub fn from_status(status: u16) -> Self {
        let reason = ureq::http::StatusCode::from_u16(status)
            .ok()
            .and_then(|code| code.canonical_reason())
            .unwrap_or("Unknown Status")
            .to_string();
        EsaError::HttpStatus { status, reason }
    }

    /// The HTTP status carried by this error, if any.
    pub fn status(&self) -> Option<u16> {
        match self {
            EsaError::HttpStatus { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// Errors raised while loading `ClientConfig` from the environment.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("environment variable {0} is not set or empty")]
    MissingToken(&'static str),
}
