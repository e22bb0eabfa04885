//! Error types for the dispatch server

use thiserror::Error;

use crate::protocol::{INTERNAL_ERROR, METHOD_NOT_FOUND};

/// Result type alias for dispatch operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while loading the catalog or dispatching a tool call
#[derive(Debug, Error)]
pub enum Error {
    /// Error during JSON serialization/deserialization
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Requested tool name is not in the catalog
    #[error("Unknown tool '{0}'")]
    UnknownTool(String),

    /// Tool is in the catalog but no handler has been registered for it
    #[error("No handler implemented for tool '{0}'")]
    NotImplemented(String),

    /// Parameter bag did not bind to the handler's expected arguments
    #[error("invalid params: {0}")]
    InvalidParams(String),

    /// Handler raised a domain-specific failure
    #[error("{0}")]
    Handler(String),

    /// Request carried a jsonrpc tag other than "2.0"
    #[error("invalid JSON-RPC version: expected \"2.0\"")]
    VersionMismatch,
}

impl Error {
    /// JSON-RPC error code this failure maps to when it reaches the response
    /// envelope.
    ///
    /// Unknown and unimplemented tools share the conventional method-not-found
    /// code; callers tell them apart from the message text only. Everything
    /// else that escapes a handler is an internal error.
    pub fn rpc_code(&self) -> i32 {
        match self {
            Error::UnknownTool(_) | Error::NotImplemented(_) => METHOD_NOT_FOUND,
            _ => INTERNAL_ERROR,
        }
    }
}
