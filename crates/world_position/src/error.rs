//! Error types for the position crate.
//!
//! Geometric queries are total and never fail. Only decoding from a byte
//! stream and loading bounds configuration can produce a [`PositionError`].

use thiserror::Error;

/// Errors raised while decoding positions or loading world bounds.
#[derive(Debug, Error)]
pub enum PositionError {
    /// A read ran past the end of the byte stream.
    #[error("buffer underflow: needed {needed} bytes, {remaining} remaining")]
    BufferUnderflow {
        /// Bytes required by the read
        needed: usize,
        /// Bytes left in the stream
        remaining: usize,
    },
    /// The bounds configuration could not be parsed.
    #[error("invalid bounds configuration: {0}")]
    Config(#[from] toml::de::Error),
    /// The bounds configuration could not be rendered.
    #[error("failed to render bounds configuration: {0}")]
    ConfigWrite(#[from] toml::ser::Error),
    /// The bounds configuration could not be read.
    #[error("failed to read bounds configuration: {0}")]
    Io(#[from] std::io::Error),
}

/// Convenience alias used across the crate.
pub type Result<T> = std::result::Result<T, PositionError>;
