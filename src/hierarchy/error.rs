// Mon Jan 19 2026 - Alex

use std::path::PathBuf;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HierarchyError {
    #[error("Cannot read hierarchy file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed hierarchy entry at line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}
