// Mon Jan 19 2026 - Alex

//! XML rendering of declaration trees.

pub mod encode;
pub mod error;
pub mod escape;
pub mod serializer;
pub mod writer;

pub use error::OutputError;
pub use escape::Escaper;
pub use serializer::ModelSerializer;
pub use writer::{OutputMode, XmlWriter};

use crate::merge::SuperclassResolver;
use crate::model::FileInfo;
use crate::properties::PropertyClassifier;

/// Renders a whole file into memory. Nothing is returned unless every
/// class, including lazily loaded ancestors, was merged successfully.
pub fn render(
    file: &FileInfo,
    mode: OutputMode,
    resolver: &mut SuperclassResolver,
    classifier: &dyn PropertyClassifier,
) -> Result<String, OutputError> {
    let writer = XmlWriter::new(Vec::new(), mode);
    let mut serializer = ModelSerializer::new(writer, resolver, classifier);
    serializer.write_file(file)?;
    let bytes = serializer.into_writer().into_inner();
    Ok(String::from_utf8_lossy(&bytes).into_owned())
}
