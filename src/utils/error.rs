//! Error types for the entire application.
//!
//! We use `thiserror` for library-style errors with custom types,
//! and `anyhow` for application-level error propagation in main.rs and commands.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while reading a tensor file header
#[derive(Error, Debug)]
pub enum ReadError {
    #[error("Failed to read {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("Unsupported file type: {} (expected a .safetensors file)", .0.display())]
    UnsupportedExtension(PathBuf),

    #[error("Invalid safetensors header: {0}")]
    InvalidHeader(String),

    #[error("Header JSON deserialization failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid entry for tensor '{name}': {reason}")]
    InvalidTensor { name: String, reason: String },
}

/// Errors that can occur while building the name hierarchy
#[derive(Error, Debug, PartialEq, Eq)]
pub enum HierarchyError {
    #[error("Tensor '{name}' conflicts at segment '{segment}': a name cannot be both a parameter and a module prefix")]
    PathConflict { name: String, segment: String },
}

/// Errors surfaced at the load boundary (read + build)
#[derive(Error, Debug)]
pub enum LoadError {
    #[error(transparent)]
    Read(#[from] ReadError),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),
}

/// Errors that can occur during file output
#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Failed to write file: {0}")]
    WriteFailed(#[from] std::io::Error),

    #[error("Failed to serialize JSON: {0}")]
    SerializationFailed(#[from] serde_json::Error),

    #[error("Invalid output path: {0}")]
    InvalidPath(String),
}

/// Errors found while validating a JSON tree report
#[derive(Error, Debug, PartialEq, Eq)]
pub enum ReportError {
    #[error("Unsupported report version: {0}")]
    UnsupportedVersion(String),

    #[error("Inconsistent parameter count at '{path}': recorded {recorded}, computed {computed}")]
    CountMismatch {
        path: String,
        recorded: u64,
        computed: u64,
    },

    #[error("Malformed node at '{0}'")]
    MalformedNode(String),
}
