//! Error types for the editor core

use thiserror::Error;

/// Main error type for the editor core
#[derive(Debug, Error)]
pub enum Error {
    #[error("Coordinate ({x}, {y}, {z}) is outside the grid")]
    OutOfBounds { x: i32, y: i32, z: i32 },

    #[error("Invalid extent {width}x{height}x{depth}")]
    InvalidExtent { width: u32, height: u32, depth: u32 },

    #[error("Format error: {0}")]
    Format(String),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Unsupported operation: {0}")]
    Unsupported(String),

    #[error("Unknown tool: {0}")]
    UnknownTool(String),

    #[error("Tool already registered: {0}")]
    DuplicateTool(String),

    #[error("Unknown codec: {0}")]
    UnknownCodec(String),

    #[error("Config error: {0}")]
    Config(String),
}

impl Error {
    /// Shorthand for a [`Error::Format`] with a formatted message.
    pub fn format(msg: impl Into<String>) -> Self {
        Error::Format(msg.into())
    }
}
