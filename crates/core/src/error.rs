//! Unified error types for mdroute.
//!
//! Every variant is recovered inside the content loader; they only surface to
//! callers through the MCP tool layer.

use rmcp::model::{ErrorCode, ErrorData as McpError};

/// Unified error types for the router.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// Invalid input parameters (e.g., a malformed fragment).
    #[error("INVALID_INPUT: {0}")]
    InvalidInput(String),

    /// Existence probe reported the resource as missing.
    #[error("NOT_FOUND: {0}")]
    NotFound(String),

    /// Validator probe could not be completed.
    #[error("PROBE_FAILED: {0}")]
    ProbeFailed(String),

    /// Transport-level failure (connection, body read).
    #[error("TRANSPORT_ERROR: {0}")]
    Transport(String),

    /// Non-success HTTP status on a full retrieval.
    #[error("HTTP_ERROR: status {status} for {path}")]
    HttpStatus { status: u16, path: String },

    /// Resource path could not be turned into a request URL.
    #[error("INVALID_URL: {0}")]
    InvalidUrl(String),

    /// Display target does not exist on the page.
    #[error("RENDER_TARGET_MISSING: {0}")]
    RenderTargetMissing(String),

    /// Markdown conversion or sanitization failed.
    #[error("RENDER_FAILED: {0}")]
    RenderFailed(String),

    /// Response body exceeded the configured size limit.
    #[error("FETCH_TOO_LARGE: {0}")]
    FetchTooLarge(String),
}

impl From<Error> for McpError {
    fn from(err: Error) -> Self {
        let (code, message) = match &err {
            Error::InvalidInput(msg) => (-32602, msg.clone()),
            Error::NotFound(msg) => (-32001, msg.clone()),
            Error::ProbeFailed(msg) => (-32002, msg.clone()),
            Error::Transport(msg) => (-32003, msg.clone()),
            Error::HttpStatus { .. } => (-32004, err.to_string()),
            Error::InvalidUrl(msg) => (-32005, msg.clone()),
            Error::RenderTargetMissing(msg) => (-32006, msg.clone()),
            Error::RenderFailed(msg) => (-32007, msg.clone()),
            Error::FetchTooLarge(msg) => (-32008, msg.clone()),
        };

        McpError { code: ErrorCode(code), message: message.into(), data: None }
    }
}
