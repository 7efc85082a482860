// Mon Jan 19 2026 - Alex

use crate::model::ModelError;
use std::path::PathBuf;
use thiserror::Error;

/// Failures that abort the merge of a class and with it the whole run.
#[derive(Error, Debug)]
pub enum MergeError {
    #[error("Couldn't locate header file {header} for superclass {class}")]
    HeaderNotFound { class: String, header: String },
    #[error("Couldn't open header file {header:?}: {source}")]
    HeaderUnreadable {
        header: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to parse header file {header:?}: {source}")]
    ParseFailed { header: PathBuf, source: ModelError },
    #[error("Cyclic inheritance: {class} re-entered via {chain}")]
    CyclicInheritance { class: String, chain: String },
}
