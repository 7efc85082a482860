// Mon Jan 19 2026 - Alex

pub mod config;
pub mod hierarchy;
pub mod hints;
pub mod merge;
pub mod model;
pub mod output;
pub mod properties;
pub mod ui;
pub mod utils;

pub use config::Config;
pub use hierarchy::{HierarchyIndex, IncludePath};
pub use hints::Hints;
pub use merge::{MergeError, MergeInfo, SuperclassResolver};
pub use model::FileInfo;
pub use output::{render, OutputMode, XmlWriter};
pub use properties::{NamingClassifier, PropertyClassifier};
