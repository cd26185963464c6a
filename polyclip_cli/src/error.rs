use polyclip::error::BatchError;
use std::{io, path::PathBuf};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum CliError {
    #[error("unable to open file {path:?}: {source}")]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
    #[error(transparent)]
    Io(#[from] io::Error),
    #[error("line {line}: {message}")]
    Parse { line: usize, message: String },
    #[error("failed to write result json: {0}")]
    Json(#[from] serde_json::Error),
    #[error(transparent)]
    Batch(#[from] BatchError),
    #[error("usage: polyclip <input-file> <operation> [--out <dir>]")]
    Usage,
}
