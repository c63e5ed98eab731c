use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Everything that can go wrong at the crate's I/O boundary.
///
/// Sampling and arithmetic never fail; these variants cover argument
/// validation, file access, and the text/binary/JSON formats.
#[derive(Debug, Error)]
pub enum FractalError {
    #[error("grid needs at least one row and one column (got {rows}x{cols})")]
    EmptyGrid { rows: usize, cols: usize },

    #[error("grid of {rows}x{cols} cells is too large")]
    GridTooLarge { rows: usize, cols: usize },

    #[error("max iterations must be at least 1")]
    ZeroIterations,

    #[error("zoom factor must be positive and finite (got {0})")]
    InvalidZoom(f64),

    #[error("failed to write {}", path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("failed to read {}", path.display())]
    Read {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("malformed grid file, line {line}: {reason}")]
    Parse { line: usize, reason: String },

    #[error("invalid config: {0}")]
    Config(#[from] serde_json::Error),

    #[error("failed to encode snapshot: {0}")]
    Encode(#[from] bincode::error::EncodeError),

    #[error("failed to decode snapshot: {0}")]
    Decode(#[from] bincode::error::DecodeError),
}

pub type Result<T> = std::result::Result<T, FractalError>;

impl FractalError {
    pub(crate) fn parse(line: usize, reason: impl Into<String>) -> Self {
        FractalError::Parse { line, reason: reason.into() }
    }
}
