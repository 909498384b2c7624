//! Error types for the command-line front end.

use std::path::PathBuf;

use oxide_obsql_core::{BuildError, ParseError};

/// Errors that stop a command before it produces output.
#[derive(Debug, thiserror::Error)]
pub enum CliError {
    /// The input file could not be read.
    #[error("Failed to read '{path}': {source}")]
    Read {
        /// Path of the input file.
        path: PathBuf,
        /// Underlying IO error.
        source: std::io::Error,
    },

    /// Standard input or output failed.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// The input is not valid SQL for the selected dialect.
    #[error("Parse error: {0}")]
    Parse(#[from] ParseError),

    /// The reduction was interrupted.
    #[error("Build error: {0}")]
    Build(#[from] BuildError),

    /// JSON rendering failed.
    #[error("Failed to render JSON: {0}")]
    Json(#[from] serde_json::Error),
}
