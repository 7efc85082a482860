// Mon Jan 19 2026 - Alex

use crate::model::ClassInfo;

/// Bookkeeping for one class while its superclasses are merged in.
///
/// `class_names[0]` is the target class; every later entry is an ancestor,
/// indexed by the depth at which it was first met. Slot `i` mirrors
/// `functions[i]` of the (growing) target and lists the ancestor depths that
/// declare the same signature.
#[derive(Debug, Clone, Default)]
pub struct MergeInfo {
    class_names: Vec<String>,
    overrides: Vec<Vec<usize>>,
}

impl MergeInfo {
    /// Seeds the target class and one empty slot per declared method.
    pub fn new(target: &ClassInfo) -> Self {
        let mut info = Self::default();
        info.push_class(&target.name);
        for _ in &target.functions {
            info.push_function_slot(0);
        }
        info
    }

    pub fn push_class(&mut self, name: &str) -> usize {
        if let Some(depth) = self.class_names.iter().position(|n| n == name) {
            return depth;
        }
        self.class_names.push(name.to_string());
        self.class_names.len() - 1
    }

    /// Depth 0 is the target itself and never counts as a contributor.
    pub fn push_function_slot(&mut self, depth: usize) -> usize {
        let contributors = if depth == 0 { Vec::new() } else { vec![depth] };
        self.overrides.push(contributors);
        self.overrides.len() - 1
    }

    pub fn push_override(&mut self, slot: usize, depth: usize) {
        if depth == 0 {
            return;
        }
        if let Some(contributors) = self.overrides.get_mut(slot) {
            if !contributors.contains(&depth) {
                contributors.push(depth);
            }
        }
    }

    pub fn class_names(&self) -> &[String] {
        &self.class_names
    }

    pub fn class_name(&self, depth: usize) -> Option<&str> {
        self.class_names.get(depth).map(String::as_str)
    }

    pub fn class_count(&self) -> usize {
        self.class_names.len()
    }

    pub fn function_count(&self) -> usize {
        self.overrides.len()
    }

    pub fn overrides(&self, slot: usize) -> &[usize] {
        self.overrides.get(slot).map(Vec::as_slice).unwrap_or(&[])
    }

    /// Name of the first ancestor recorded for a slot.
    ///
    /// Depths are handed out in visiting order and a class only records
    /// contributors while it is being visited, so during a merge walk the
    /// first recorded depth is also the lowest one.
    pub fn context(&self, slot: usize) -> Option<&str> {
        self.overrides(slot).first().and_then(|&depth| self.class_name(depth))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::FunctionInfo;

    #[test]
    fn test_push_class_is_idempotent() {
        let mut info = MergeInfo::new(&ClassInfo::new("vtkDerived"));
        assert_eq!(info.push_class("vtkBase"), 1);
        assert_eq!(info.push_class("vtkObject"), 2);
        assert_eq!(info.push_class("vtkBase"), 1);
        assert_eq!(info.push_class("vtkDerived"), 0);
        assert_eq!(info.class_count(), 3);
    }

    #[test]
    fn test_seeded_slots_have_no_contributors() {
        let mut class = ClassInfo::new("vtkDerived");
        class.add_function(FunctionInfo::new("Foo"));
        class.add_function(FunctionInfo::new("Bar"));
        let info = MergeInfo::new(&class);
        assert_eq!(info.function_count(), 2);
        assert!(info.overrides(0).is_empty());
        assert!(info.context(1).is_none());
    }

    #[test]
    fn test_overrides_are_deduplicated_and_ordered() {
        let mut info = MergeInfo::new(&ClassInfo::new("vtkDerived"));
        let base = info.push_class("vtkBase");
        let root = info.push_class("vtkRoot");
        let slot = info.push_function_slot(root);
        info.push_override(slot, base);
        info.push_override(slot, root);
        info.push_override(slot, 0);
        info.push_override(slot, base);
        assert_eq!(info.overrides(slot), &[root, base]);
        // record order, not depth order; a real walk never records out of order
        assert_eq!(info.context(slot), Some("vtkRoot"));
        assert!(info.overrides(42).is_empty());
    }
}
