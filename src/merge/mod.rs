// Mon Jan 19 2026 - Alex

pub mod engine;
pub mod error;
pub mod info;
pub mod resolver;

pub use engine::merge;
pub use error::MergeError;
pub use info::MergeInfo;
pub use resolver::{DeclarationLoader, JsonDeclarationLoader, SuperclassResolver};
