// Mon Jan 19 2026 - Alex

use crate::merge::MergeError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum OutputError {
    #[error("Write failed: {0}")]
    Io(#[from] std::io::Error),

    #[error("Inheritance merge failed: {0}")]
    Merge(#[from] MergeError),
}
