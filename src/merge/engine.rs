// Mon Jan 19 2026 - Alex

use super::info::MergeInfo;
use crate::model::{ClassInfo, FunctionInfo};

/// Folds the methods declared directly on `ancestor` into `target`.
///
/// A method whose signature already exists on the target is an override: the
/// target copy picks up the ancestor's comment when it has none, becomes
/// virtual if the ancestor's is, and records the ancestor's depth. Any other
/// method is copied over into a new slot. Constructors and destructors are
/// never inherited.
///
/// Returns the ancestor's depth so the caller can continue with its own
/// superclasses using the same `MergeInfo`.
pub fn merge(info: &mut MergeInfo, target: &mut ClassInfo, ancestor: &ClassInfo) -> usize {
    let depth = info.push_class(&ancestor.name);

    for func in &ancestor.functions {
        if func.name.is_none() || ancestor.is_constructor(func) || ancestor.is_destructor(func) {
            continue;
        }

        match target.functions.iter().position(|f| f.matches_signature(func)) {
            Some(slot) => {
                merge_function(&mut target.functions[slot], func);
                info.push_override(slot, depth);
            }
            None => {
                target.functions.push(func.clone());
                info.push_function_slot(depth);
            }
        }
    }

    depth
}

fn merge_function(merged: &mut FunctionInfo, func: &FunctionInfo) {
    if func.is_virtual {
        merged.is_virtual = true;
    }
    if merged.comment.is_none() {
        merged.comment = func.comment.clone();
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeCode, ValueInfo};

    fn int_arg() -> ValueInfo {
        ValueInfo::new(TypeCode::new(TypeCode::INT), "int")
    }

    fn double_arg() -> ValueInfo {
        ValueInfo::new(TypeCode::new(TypeCode::DOUBLE), "double")
    }

    #[test]
    fn test_override_merges_comment_and_virtual() {
        let mut derived = ClassInfo::new("Derived").with_super("Base");
        derived.add_function(FunctionInfo::new("Foo").with_argument(int_arg()));

        let mut base = ClassInfo::new("Base");
        base.add_function(
            FunctionInfo::new("Foo")
                .with_argument(int_arg())
                .with_virtual()
                .with_comment("Base doc"),
        );

        let mut info = MergeInfo::new(&derived);
        let depth = merge(&mut info, &mut derived, &base);

        assert_eq!(depth, 1);
        assert_eq!(derived.functions.len(), 1);
        assert!(derived.functions[0].is_virtual);
        assert_eq!(derived.functions[0].comment.as_deref(), Some("Base doc"));
        assert_eq!(info.context(0), Some("Base"));
    }

    #[test]
    fn test_existing_comment_and_virtual_are_kept() {
        let mut derived = ClassInfo::new("Derived");
        derived.add_function(FunctionInfo::new("Foo").with_virtual().with_comment("mine"));
        let mut base = ClassInfo::new("Base");
        base.add_function(FunctionInfo::new("Foo").with_comment("theirs"));

        let mut info = MergeInfo::new(&derived);
        merge(&mut info, &mut derived, &base);

        assert!(derived.functions[0].is_virtual);
        assert_eq!(derived.functions[0].comment.as_deref(), Some("mine"));
    }

    #[test]
    fn test_overloads_and_new_methods_are_copied() {
        let mut derived = ClassInfo::new("Derived");
        derived.add_function(FunctionInfo::new("Foo").with_argument(int_arg()));

        let mut base = ClassInfo::new("Base");
        base.add_function(FunctionInfo::new("Base"));
        base.add_function(FunctionInfo::new("~Base"));
        base.add_function(FunctionInfo::new("Foo").with_argument(double_arg()));
        base.add_function(FunctionInfo::new("Bar").with_comment("bar"));

        let mut info = MergeInfo::new(&derived);
        let depth = merge(&mut info, &mut derived, &base);

        let names: Vec<_> = derived.functions.iter().map(|f| f.name()).collect();
        assert_eq!(names, vec!["Foo", "Foo", "Bar"]);
        assert_eq!(info.function_count(), 3);
        assert!(info.overrides(0).is_empty());
        assert_eq!(info.overrides(1), &[depth]);
        assert_eq!(info.overrides(2), &[depth]);
        // declared items are untouched
        assert_eq!(derived.items.len(), 1);
    }

    #[test]
    fn test_two_ancestors_leave_one_entry_per_signature() {
        let mut derived = ClassInfo::new("Derived");
        derived.add_function(FunctionInfo::new("Foo").with_argument(int_arg()));

        let mut middle = ClassInfo::new("Middle");
        middle.add_function(FunctionInfo::new("Foo").with_argument(int_arg()));
        middle.add_function(FunctionInfo::new("Bar"));

        let mut root = ClassInfo::new("Root");
        root.add_function(FunctionInfo::new("Foo").with_argument(int_arg()).with_virtual());
        root.add_function(FunctionInfo::new("Bar").with_virtual());
        root.add_function(FunctionInfo::new("Baz"));

        let mut info = MergeInfo::new(&derived);
        let middle_depth = merge(&mut info, &mut derived, &middle);
        let root_depth = merge(&mut info, &mut derived, &root);

        assert_eq!(derived.functions.len(), 3);
        for (i, a) in derived.functions.iter().enumerate() {
            for b in &derived.functions[i + 1..] {
                assert!(!a.matches_signature(b));
            }
        }
        assert_eq!(info.overrides(0), &[middle_depth, root_depth]);
        assert_eq!(info.overrides(1), &[middle_depth, root_depth]);
        assert_eq!(info.overrides(2), &[root_depth]);
        assert!(derived.functions[1].is_virtual);

        // merging the same ancestor again changes nothing
        merge(&mut info, &mut derived, &root);
        assert_eq!(derived.functions.len(), 3);
        assert_eq!(info.overrides(0), &[middle_depth, root_depth]);
        assert_eq!(info.class_count(), 3);
    }
}
