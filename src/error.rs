//! Error types for costered operations.

use std::path::PathBuf;

use thiserror::Error;

/// Errors that can occur while loading configuration, reading content or
/// persisting compiled stylesheets.
///
/// The pure style and grid modules never produce errors; malformed input there
/// degrades to absence instead.
#[derive(Error, Debug)]
pub enum Error {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Failed to persist stylesheet: {0}")]
    Persist(#[from] tempfile::PersistError),

    #[error("Missing directory: {}", .0.display())]
    MissingDirectory(PathBuf),

    #[error("Invalid scope id: {0:?}")]
    InvalidScope(String),

    #[error("Render failed for node {node}: {reason}")]
    Render { node: String, reason: String },
}

pub type Result<T> = std::result::Result<T, Error>;
