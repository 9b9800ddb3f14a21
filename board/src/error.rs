use std::path::PathBuf;

use kiosk_engine::font::FontError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum BoardError {
    #[error(
        "a {columns}x{rows} door grid does not evenly divide the {width}x{height} display"
    )]
    GridMismatch {
        width: u32,
        height: u32,
        columns: u32,
        rows: u32,
    },
    #[error("door grid must have at least one row and one column (got {columns}x{rows})")]
    EmptyGrid { columns: u32, rows: u32 },
    #[error("{needed} doors need {needed} distinct activities, but only {available} were provided")]
    NotEnoughActivities { needed: usize, available: usize },
    #[error("failed to read {}: {source}", path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("invalid configuration {}: {source}", path.display())]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error(transparent)]
    Font(#[from] FontError),
    #[error("audio unavailable: {0}")]
    Audio(String),
}

pub type Result<T> = std::result::Result<T, BoardError>;
