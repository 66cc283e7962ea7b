//! Error types for the SVG debug canvas
//!
//! Construction can fail (bad canvas, bad region, unwritable destination).
//! Drawing only fails on I/O errors or when the document is already closed.

use thiserror::Error;

/// Error type for canvas operations
#[derive(Error, Debug)]
pub enum CanvasError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Invalid canvas: {0}")]
    InvalidCanvas(String),

    #[error("Invalid region: {0}")]
    InvalidRegion(String),

    #[error("Config error: {0}")]
    Config(String),

    #[error("Document is already closed")]
    Closed,
}

/// Result type alias for canvas operations
pub type CanvasResult<T> = Result<T, CanvasError>;

/// Helper to convert serde_json errors
impl From<serde_json::Error> for CanvasError {
    fn from(err: serde_json::Error) -> Self {
        CanvasError::Config(err.to_string())
    }
}
