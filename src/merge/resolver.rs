// Mon Jan 19 2026 - Alex

use super::engine;
use super::error::MergeError;
use super::info::MergeInfo;
use crate::hierarchy::{HierarchyIndex, IncludePath};
use crate::hints::Hints;
use crate::model::{ClassInfo, FileInfo, ModelError, NamespaceInfo};
use std::collections::HashMap;
use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::rc::Rc;

/// Produces the declaration tree of a header found on the include path.
pub trait DeclarationLoader {
    fn locate(&self, include_path: &IncludePath, header: &str) -> Option<PathBuf> {
        include_path.find(header)
    }

    fn load(&self, path: &Path) -> Result<FileInfo, ModelError>;
}

/// Reads trees the header grammar dumped as JSON, either the path itself
/// when it ends in `.json` or a `<header>.json` file next to the header.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonDeclarationLoader;

impl JsonDeclarationLoader {
    pub fn tree_path(path: &Path) -> PathBuf {
        if path.extension().is_some_and(|ext| ext == "json") {
            return path.to_path_buf();
        }
        let mut name = OsString::from(path.as_os_str());
        name.push(".json");
        PathBuf::from(name)
    }
}

impl DeclarationLoader for JsonDeclarationLoader {
    fn locate(&self, include_path: &IncludePath, header: &str) -> Option<PathBuf> {
        include_path
            .find(header)
            .or_else(|| include_path.find(&format!("{}.json", header)))
    }

    fn load(&self, path: &Path) -> Result<FileInfo, ModelError> {
        let mut file = FileInfo::load(Self::tree_path(path))?;
        if file.file_name.is_none() {
            file.file_name = Some(path.display().to_string());
        }
        Ok(file)
    }
}

/// Drives the merge across the whole superclass graph of a class, loading
/// the headers of ancestors declared elsewhere on first use.
pub struct SuperclassResolver {
    hierarchy: Option<HierarchyIndex>,
    include_path: IncludePath,
    hints: Option<Hints>,
    loader: Box<dyn DeclarationLoader>,
    loaded: HashMap<PathBuf, Rc<FileInfo>>,
}

impl SuperclassResolver {
    pub fn new() -> Self {
        Self {
            hierarchy: None,
            include_path: IncludePath::new(),
            hints: None,
            loader: Box::new(JsonDeclarationLoader),
            loaded: HashMap::new(),
        }
    }

    pub fn with_hierarchy(mut self, hierarchy: HierarchyIndex) -> Self {
        self.hierarchy = Some(hierarchy);
        self
    }

    pub fn with_include_path(mut self, include_path: IncludePath) -> Self {
        self.include_path = include_path;
        self
    }

    pub fn with_hints(mut self, hints: Hints) -> Self {
        self.hints = Some(hints);
        self
    }

    pub fn with_loader<L: DeclarationLoader + 'static>(mut self, loader: L) -> Self {
        self.loader = Box::new(loader);
        self
    }

    pub fn loaded_count(&self) -> usize {
        self.loaded.len()
    }

    /// Merges every ancestor of `target` into it. `scope` is the namespace
    /// the target was declared in; ancestors are looked up there first.
    pub fn merge_superclasses(
        &mut self,
        scope: &NamespaceInfo,
        target: &mut ClassInfo,
    ) -> Result<MergeInfo, MergeError> {
        let mut info = MergeInfo::new(target);
        let mut visiting = vec![target.name.clone()];
        let supers = target.super_classes.clone();
        for name in &supers {
            self.merge_helper(scope, name, &mut info, target, &mut visiting)?;
        }
        log::debug!(
            "Merged {} ancestors into {} ({} methods)",
            info.class_count() - 1,
            target.name,
            target.functions.len()
        );
        Ok(info)
    }

    fn merge_helper(
        &mut self,
        scope: &NamespaceInfo,
        name: &str,
        info: &mut MergeInfo,
        target: &mut ClassInfo,
        visiting: &mut Vec<String>,
    ) -> Result<(), MergeError> {
        if visiting.iter().any(|v| v == name) {
            return Err(MergeError::CyclicInheritance {
                class: name.to_string(),
                chain: visiting.join(" -> "),
            });
        }

        if let Some(class) = scope.find_class(name) {
            return self.merge_class(scope, class, info, target, visiting);
        }

        let file = match self.load_declaring_file(name)? {
            Some(file) => file,
            None => {
                log::warn!("Superclass {} of {} not found, skipping", name, target.name);
                return Ok(());
            }
        };

        match file.contents.find_class(name) {
            Some(class) => self.merge_class(&file.contents, class, info, target, visiting),
            None => {
                log::warn!(
                    "Header {} does not declare {}, skipping",
                    file.file_name.as_deref().unwrap_or("?"),
                    name
                );
                Ok(())
            }
        }
    }

    fn merge_class(
        &mut self,
        scope: &NamespaceInfo,
        class: &ClassInfo,
        info: &mut MergeInfo,
        target: &mut ClassInfo,
        visiting: &mut Vec<String>,
    ) -> Result<(), MergeError> {
        let depth = engine::merge(info, target, class);
        log::trace!("{} merged into {} at depth {}", class.name, target.name, depth);

        visiting.push(class.name.clone());
        for name in &class.super_classes {
            self.merge_helper(scope, name, info, target, visiting)?;
        }
        visiting.pop();
        Ok(())
    }

    fn load_declaring_file(&mut self, name: &str) -> Result<Option<Rc<FileInfo>>, MergeError> {
        let entry = match self.hierarchy.as_ref().and_then(|h| h.find_entry(name)) {
            Some(entry) => entry,
            None => return Ok(None),
        };

        let path = self
            .loader
            .locate(&self.include_path, &entry.header_file)
            .ok_or_else(|| MergeError::HeaderNotFound {
                class: name.to_string(),
                header: entry.header_file.clone(),
            })?;

        if let Some(file) = self.loaded.get(&path) {
            return Ok(Some(Rc::clone(file)));
        }

        log::debug!("Loading {:?} for superclass {}", path, name);
        let mut file = self.loader.load(&path).map_err(|err| match err {
            ModelError::Io { source, .. } => MergeError::HeaderUnreadable {
                header: path.clone(),
                source,
            },
            other => MergeError::ParseFailed {
                header: path.clone(),
                source: other,
            },
        })?;

        if let Some(hints) = &self.hints {
            hints.apply(&mut file);
        }

        let file = Rc::new(file);
        self.loaded.insert(path, Rc::clone(&file));
        Ok(Some(file))
    }
}

impl Default for SuperclassResolver {
    fn default() -> Self {
        Self::new()
    }
}
