//! Error types for the todo API client.
//!
//! # Design
//! A 401 is deliberately absent here: it surfaces as
//! [`Reply::LoginRequired`](crate::client::Reply) and the `Api` wrapper turns
//! it into a navigation. Every other non-2xx response lands in `HttpError`
//! with the raw status code and body.

use std::fmt;

/// Errors returned by the client, the transport and the `Api` wrapper.
#[derive(Debug)]
pub enum ApiError {
    /// The server returned a non-2xx status other than 401.
    HttpError { status: u16, body: String },

    /// The request never produced a response (connection refused, DNS, ...).
    Transport(String),

    /// The response body could not be deserialized into the expected type.
    DeserializationError(String),

    /// The request payload could not be serialized to JSON.
    SerializationError(String),
}

impl ApiError {
    /// Status code carried by the error, if the server answered at all.
    pub fn status(&self) -> Option<u16> {
        match self {
            ApiError::HttpError { status, .. } => Some(*status),
            _ => None,
        }
    }
}

impl fmt::Display for ApiError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ApiError::HttpError { status, .. } => {
                write!(f, "HTTP error! status: {status}")
            }
            ApiError::Transport(msg) => write!(f, "transport failed: {msg}"),
            ApiError::DeserializationError(msg) => {
                write!(f, "deserialization failed: {msg}")
            }
            ApiError::SerializationError(msg) => {
                write!(f, "serialization failed: {msg}")
            }
        }
    }
}

impl std::error::Error for ApiError {}
