//! Error types for devenv-config

use std::path::PathBuf;

/// Result type for devenv-config operations
pub type Result<T> = std::result::Result<T, Error>;

/// Errors that can occur while resolving configuration
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// A source file existed but could not be parsed
    #[error("Failed to parse {format} source {path}: {message}")]
    SourceParse {
        path: PathBuf,
        format: String,
        message: String,
    },

    /// A source file has an extension no parser is registered for
    #[error("Unsupported source format: .{extension}")]
    UnsupportedFormat { extension: String },

    /// Standard I/O error
    #[error(transparent)]
    Io(#[from] std::io::Error),

    /// JSON serialization error
    #[error(transparent)]
    Json(#[from] serde_json::Error),
}
