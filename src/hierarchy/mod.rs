// Mon Jan 19 2026 - Alex

//! Type hierarchy index: which header declares which class.
//!
//! One class per line:
//!
//! ```text
//! vtkObject : vtkObjectBase ; vtkObject.h ; Common
//! ```
//!
//! The superclass list and the trailing module are optional. Blank lines
//! and `#` comments are skipped.

pub mod error;
pub mod include;

pub use error::HierarchyError;
pub use include::IncludePath;

use indexmap::IndexMap;
use std::fs;
use std::path::Path;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HierarchyEntry {
    pub name: String,
    pub super_classes: Vec<String>,
    pub header_file: String,
    pub module: Option<String>,
}

#[derive(Debug, Clone, Default)]
pub struct HierarchyIndex {
    entries: IndexMap<String, HierarchyEntry>,
}

impl HierarchyIndex {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HierarchyError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HierarchyError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let index = Self::parse(&text)?;
        log::debug!("Loaded {} hierarchy entries from {:?}", index.len(), path);
        Ok(index)
    }

    pub fn parse(text: &str) -> Result<Self, HierarchyError> {
        let mut index = Self::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let entry = parse_entry(line).map_err(|reason| HierarchyError::ParseError {
                line: i + 1,
                reason,
            })?;
            index.insert(entry);
        }
        Ok(index)
    }

    /// Later entries for the same class replace earlier ones in place.
    pub fn insert(&mut self, entry: HierarchyEntry) {
        self.entries.insert(entry.name.clone(), entry);
    }

    pub fn find_entry(&self, name: &str) -> Option<&HierarchyEntry> {
        self.entries.get(name)
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn entries(&self) -> impl Iterator<Item = &HierarchyEntry> {
        self.entries.values()
    }
}

fn parse_entry(line: &str) -> Result<HierarchyEntry, String> {
    let mut fields = line.split(';').map(str::trim);

    let head = fields.next().unwrap_or("");
    let (name, supers) = match head.split_once(':') {
        Some((name, supers)) => (name.trim(), supers),
        None => (head, ""),
    };
    if name.is_empty() {
        return Err("missing class name".to_string());
    }

    let super_classes = supers
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect();

    let header_file = match fields.next() {
        Some(h) if !h.is_empty() => h.to_string(),
        _ => return Err(format!("no header file for {}", name)),
    };

    let module = fields.next().filter(|m| !m.is_empty()).map(str::to_string);

    Ok(HierarchyEntry {
        name: name.to_string(),
        super_classes,
        header_file,
        module,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_entries() {
        let text = "\
# generated
vtkObjectBase ; vtkObjectBase.h ; Common

vtkObject : vtkObjectBase ; vtkObject.h ; Common
vtkMixed : vtkObject, vtkOther ; sub/vtkMixed.h
";
        let index = HierarchyIndex::parse(text).unwrap();
        assert_eq!(index.len(), 3);

        let base = index.find_entry("vtkObjectBase").unwrap();
        assert!(base.super_classes.is_empty());
        assert_eq!(base.module.as_deref(), Some("Common"));

        let mixed = index.find_entry("vtkMixed").unwrap();
        assert_eq!(mixed.super_classes, vec!["vtkObject", "vtkOther"]);
        assert_eq!(mixed.header_file, "sub/vtkMixed.h");
        assert!(mixed.module.is_none());

        let names: Vec<_> = index.entries().map(|e| e.name.as_str()).collect();
        assert_eq!(names, vec!["vtkObjectBase", "vtkObject", "vtkMixed"]);
    }

    #[test]
    fn test_missing_header_is_an_error() {
        let err = HierarchyIndex::parse("vtkA : vtkB\n").unwrap_err();
        match err {
            HierarchyError::ParseError { line, .. } => assert_eq!(line, 1),
            other => panic!("unexpected error: {}", other),
        }
        assert!(HierarchyIndex::parse(" : vtkB ; x.h").is_err());
    }
}
