//! Error types for gridasm

use thiserror::Error;

use crate::emu::ParseError;

/// Gridasm error type
#[derive(Debug, Error)]
pub enum GridasmError {
    /// A node program failed to parse
    #[error("parse error: {0}")]
    Parse(#[from] ParseError),

    /// The machine hit an unrecoverable fault mid-run
    #[error("runtime error: {0}")]
    Runtime(String),

    /// Streams or node programs do not fit the machine
    #[error("shape error: {0}")]
    Shape(String),

    /// IO error
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON encode/decode error
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),
}

pub type Result<T> = std::result::Result<T, GridasmError>;
