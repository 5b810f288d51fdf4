//! Error types for rewind-client
//!
//! Provides a unified error type for all operations.

use thiserror::Error;

/// Result type alias using RewindError
pub type Result<T> = std::result::Result<T, RewindError>;

/// Unified error type for rewind-client operations
#[derive(Debug, Error)]
pub enum RewindError {
    // -------------------------------------------------------------------------
    // I/O Errors
    // -------------------------------------------------------------------------
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    // -------------------------------------------------------------------------
    // Transport Errors
    // -------------------------------------------------------------------------
    #[error("Cannot connect to viewer at {addr}: {source}")]
    Connect {
        addr: String,
        #[source]
        source: std::io::Error,
    },

    #[error("Frame write failed: {0}")]
    Write(#[source] std::io::Error),

    #[error("Viewer connection is no longer usable")]
    Disconnected,

    // -------------------------------------------------------------------------
    // Encoding Errors
    // -------------------------------------------------------------------------
    #[error("Message too long: {len} bytes (max {max})")]
    MessageTooLong { len: usize, max: usize },

    #[error("Frame too large: {len} bytes (max {max})")]
    FrameTooLarge { len: usize, max: usize },

    // -------------------------------------------------------------------------
    // Decoding Errors
    // -------------------------------------------------------------------------
    #[error("Protocol error: {0}")]
    Protocol(String),

    // -------------------------------------------------------------------------
    // Configuration Errors
    // -------------------------------------------------------------------------
    #[error("Configuration error: {0}")]
    Config(String),
}
