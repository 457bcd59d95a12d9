//! Typed error definitions for pdfhub.
//! Provides a small set of well-known failure modes for better logs and tests.

use std::path::PathBuf;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum HubError {
    #[error("Source file not found: {0}")]
    SourceNotFound(PathBuf),

    #[error("Source is not a regular file: {0}")]
    NotAFile(PathBuf),

    #[error("Destination directory does not exist: {0}")]
    DestinationMissing(PathBuf),

    #[error("Cannot read directory {path}: {context}")]
    UnreadableDirectory { path: PathBuf, context: String },

    #[error("git not found on PATH; install git and restart the shell")]
    GitUnavailable,

    #[error("git {op} failed with exit status {status}")]
    GitFailed { op: String, status: i32 },

    #[error("nothing committed yet; add or change a file, then run again")]
    EmptyHistory,
}
