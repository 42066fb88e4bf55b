//! Error types for the sevdesk API client.
//!
//! # Design
//! Exactly two failure classes reach callers: a non-2xx HTTP status and a
//! JSON (de)serialization problem. Client errors and server errors are not
//! told apart — `Http` carries the raw status and whatever body text was
//! recovered, and the caller decides what to do. Nothing is retried.

use std::fmt;

/// Errors returned by `SevdeskClient` build and parse methods.
#[derive(Debug)]
pub enum ApiError {
    /// The server answered with a status outside 200–299. `body` is the
    /// recovered response text, `None` when nothing could be read.
    Http {
        route: String,
        status: u16,
        body: Option<String>,
    },

    /// The request payload could not be serialized to JSON.
    Serialization(String),

    /// The response body was not valid JSON or did not carry the expected
    /// envelope field.
    Deserialization(String),
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::Http {
                route,
                status,
                body: Some(text),
            } => {
                write!(f, "request to {route} failed (Status {status}; {text})")
            }
            ApiError::Http {
                route,
                status,
                body: None,
            } => {
                write!(f, "request to {route} failed (Status {status})")
            }
            ApiError::Serialization(msg) => {
                write!(f, "serialization failed: {msg}")
            }
            ApiError::Deserialization(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
