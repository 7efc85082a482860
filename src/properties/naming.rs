// Mon Jan 19 2026 - Alex

use super::{ClassProperties, MethodKind, PropertyClassifier, PropertyInfo};
use crate::model::{Access, ClassInfo, FunctionInfo};
use indexmap::IndexMap;
use std::collections::HashSet;

/// Groups accessors by naming convention.
///
/// A group exists for every stem `X` with a `SetX` or `GetX` method. The
/// satellite accessors `XOn`, `XOff`, `GetXMinValue`, `GetXMaxValue`,
/// `SetXToConst`, `AddX`, `RemoveX`, `RemoveAllXs` and `GetNumberOfXs` join
/// an existing group but never start one.
#[derive(Debug, Clone, Copy, Default)]
pub struct NamingClassifier;

struct Accessor {
    stem: String,
    kind: MethodKind,
    enum_constant: Option<String>,
}

impl Accessor {
    fn new(stem: &str, kind: MethodKind) -> Option<Self> {
        if !stem.starts_with(|c: char| c.is_ascii_uppercase()) {
            return None;
        }
        Some(Self {
            stem: stem.to_string(),
            kind,
            enum_constant: None,
        })
    }
}

fn plural_stem(stem: &str) -> &str {
    if stem.len() > 1 {
        stem.strip_suffix('s').unwrap_or(stem)
    } else {
        stem
    }
}

/// Stems of the plain `SetX` (with arguments) and `GetX` methods of a class.
#[derive(Default)]
struct Anchors<'a> {
    setters: HashSet<&'a str>,
    getters: HashSet<&'a str>,
}

impl<'a> Anchors<'a> {
    fn collect(funcs: impl Iterator<Item = &'a FunctionInfo>) -> Self {
        let mut anchors = Self::default();
        for func in funcs {
            match plain_accessor(func) {
                Some((stem, kind)) if kind == MethodKind::SET => {
                    anchors.setters.insert(stem);
                }
                Some((stem, _)) => {
                    anchors.getters.insert(stem);
                }
                None => {}
            }
        }
        anchors
    }

    fn contains(&self, stem: &str) -> bool {
        self.setters.contains(stem) || self.getters.contains(stem)
    }

    fn has_pair(&self, stem: &str, kind: MethodKind) -> bool {
        if kind == MethodKind::SET {
            self.getters.contains(stem)
        } else {
            self.setters.contains(stem)
        }
    }
}

fn plain_accessor(func: &FunctionInfo) -> Option<(&str, MethodKind)> {
    let name = func.name();
    if !func.arguments.is_empty() {
        if let Some(rest) = name.strip_prefix("Set") {
            return Some((rest, MethodKind::SET));
        }
    }
    name.strip_prefix("Get").map(|rest| (rest, MethodKind::GET))
}

/// Reads `name` as a satellite of an anchored stem.
fn satellite(name: &str, nargs: usize, anchors: &Anchors) -> Option<Accessor> {
    let anchored = |stem: &str, kind: MethodKind| {
        if anchors.contains(stem) {
            Accessor::new(stem, kind)
        } else {
            None
        }
    };

    if nargs == 0 {
        if let Some(rest) = name.strip_prefix("GetNumberOf") {
            if let Some(acc) = anchored(plural_stem(rest), MethodKind::GET_NUMBER_OF) {
                return Some(acc);
            }
        }
        if let Some(rest) = name.strip_prefix("RemoveAll") {
            if let Some(acc) = anchored(plural_stem(rest), MethodKind::REMOVE_ALL) {
                return Some(acc);
            }
        }
        if let Some(rest) = name.strip_prefix("Get") {
            if let Some(stem) = rest.strip_suffix("MinValue") {
                if let Some(acc) = anchored(stem, MethodKind::GET_MIN_VALUE) {
                    return Some(acc);
                }
            }
            if let Some(stem) = rest.strip_suffix("MaxValue") {
                if let Some(acc) = anchored(stem, MethodKind::GET_MAX_VALUE) {
                    return Some(acc);
                }
            }
        }
        if let Some(rest) = name.strip_prefix("Set") {
            // the stem itself may contain "To", so try every split
            for (at, _) in rest.match_indices("To") {
                let (stem, constant) = (&rest[..at], &rest[at + 2..]);
                if !constant.starts_with(|c: char| c.is_ascii_uppercase()) {
                    continue;
                }
                if let Some(mut acc) = anchored(stem, MethodKind::SET_VALUE_TO) {
                    acc.enum_constant = Some(constant.to_string());
                    return Some(acc);
                }
            }
        }
        if let Some(stem) = name.strip_suffix("On") {
            if let Some(acc) = anchored(stem, MethodKind::BOOLEAN_ON) {
                return Some(acc);
            }
        }
        if let Some(stem) = name.strip_suffix("Off") {
            if let Some(acc) = anchored(stem, MethodKind::BOOLEAN_OFF) {
                return Some(acc);
            }
        }
    }

    if nargs == 1 {
        if let Some(rest) = name.strip_prefix("Add") {
            if let Some(acc) = anchored(rest, MethodKind::ADD) {
                return Some(acc);
            }
        }
        if let Some(rest) = name.strip_prefix("Remove") {
            if let Some(acc) = anchored(rest, MethodKind::REMOVE) {
                return Some(acc);
            }
        }
    }

    None
}

/// Resolves one method. A complete `SetX`/`GetX` pair wins over a satellite
/// reading of the same name; an unanchored satellite falls back to the plain
/// accessor with the full stem.
fn accessor(func: &FunctionInfo, anchors: &Anchors) -> Option<Accessor> {
    let plain = plain_accessor(func);
    if let Some((stem, kind)) = plain {
        if anchors.has_pair(stem, kind) {
            return Accessor::new(stem, kind);
        }
    }
    satellite(func.name(), func.arguments.len(), anchors)
        .or_else(|| plain.and_then(|(stem, kind)| Accessor::new(stem, kind)))
}

fn record_type(prop: &mut PropertyInfo, func: &FunctionInfo, kind: MethodKind) {
    if prop.type_code.bits() != 0 || prop.class_name.is_some() {
        return;
    }
    let value = if kind == MethodKind::SET {
        func.arguments.first()
    } else if kind == MethodKind::GET && func.arguments.is_empty() {
        func.return_value.as_ref().filter(|v| !v.type_code.is_void())
    } else {
        None
    };
    let Some(value) = value else {
        return;
    };

    prop.type_code = value.type_code;
    prop.class_name = value.class_name.clone();
    prop.count = if kind == MethodKind::SET && func.arguments.len() > 1 {
        func.arguments.len()
    } else {
        value
            .dimensions
            .first()
            .and_then(|d| d.parse().ok())
            .unwrap_or(0)
    };
}

impl PropertyClassifier for NamingClassifier {
    fn classify(&self, class: &ClassInfo) -> ClassProperties {
        let special = |f: &FunctionInfo| {
            class.is_constructor(f) || class.is_destructor(f) || f.is_operator
        };
        let anchors = Anchors::collect(class.functions.iter().filter(|&f| !special(f)));

        let accessors: Vec<Option<Accessor>> = class
            .functions
            .iter()
            .map(|f| if special(f) { None } else { accessor(f, &anchors) })
            .collect();

        let mut groups: IndexMap<String, PropertyInfo> = IndexMap::new();
        let mut method_property = Vec::with_capacity(class.functions.len());

        for (func, acc) in class.functions.iter().zip(&accessors) {
            let acc = match acc {
                Some(acc) => acc,
                None => {
                    method_property.push(None);
                    continue;
                }
            };

            let entry = groups.entry(acc.stem.clone());
            let index = entry.index();
            let prop = entry.or_insert_with(|| {
                let mut prop = PropertyInfo::new(&acc.stem);
                prop.is_static = true;
                prop
            });

            match func.access {
                Access::Public => prop.public_methods |= acc.kind,
                Access::Protected => prop.protected_methods |= acc.kind,
                Access::Private => prop.private_methods |= acc.kind,
            }
            if func.is_legacy {
                prop.legacy_methods |= acc.kind;
            }
            prop.is_static &= func.is_static;
            if prop.comment.is_none() {
                prop.comment = func.comment.clone();
            }
            if let Some(constant) = &acc.enum_constant {
                if !prop.enum_constant_names.contains(constant) {
                    prop.enum_constant_names.push(constant.clone());
                }
            }
            record_type(prop, func, acc.kind);

            method_property.push(Some(index));
        }

        ClassProperties::new(groups.into_values().collect(), method_property)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{TypeCode, ValueInfo};

    fn double() -> ValueInfo {
        ValueInfo::new(TypeCode::new(TypeCode::DOUBLE), "double")
    }

    fn int() -> ValueInfo {
        ValueInfo::new(TypeCode::new(TypeCode::INT), "int")
    }

    #[test]
    fn test_set_get_clamp_group() {
        let mut class = ClassInfo::new("vtkSphereSource");
        class.add_function(FunctionInfo::new("vtkSphereSource"));
        class.add_function(FunctionInfo::new("SetRadius").with_argument(double()));
        class.add_function(FunctionInfo::new("GetRadiusMinValue").with_return(double()));
        class.add_function(FunctionInfo::new("GetRadius").with_return(double()).with_comment("Radius"));
        class.add_function(FunctionInfo::new("GetRadiusMaxValue").with_return(double()));
        class.add_function(FunctionInfo::new("Update"));

        let props = NamingClassifier.classify(&class);
        assert_eq!(props.properties().len(), 1);

        let radius = &props.properties()[0];
        assert_eq!(radius.name, "Radius");
        assert_eq!(radius.public_methods.to_bitfield_string(), "Set|Get|SetClamp");
        assert_eq!(radius.class_name.as_deref(), Some("double"));
        assert_eq!(radius.comment.as_deref(), Some("Radius"));
        assert!(!radius.is_static);

        assert!(props.property_of(0).is_none());
        assert!(props.is_first_occurrence(1));
        assert!(!props.is_first_occurrence(3));
        assert!(props.property_of(5).is_none());
    }

    #[test]
    fn test_satellites_need_an_anchor() {
        let mut class = ClassInfo::new("vtkThing");
        class.add_function(FunctionInfo::new("DebugOn"));
        class.add_function(FunctionInfo::new("DebugOff"));
        class.add_function(FunctionInfo::new("ScalarVisibilityOn"));
        class.add_function(FunctionInfo::new("SetScalarVisibility").with_argument(int()));
        class.add_function(FunctionInfo::new("ScalarVisibilityOff"));

        let props = NamingClassifier.classify(&class);
        assert_eq!(props.properties().len(), 1);
        assert!(props.property_of(0).is_none());
        assert!(props.is_first_occurrence(2));
        assert_eq!(
            props.properties()[0].public_methods.to_bitfield_string(),
            "Set|SetBool"
        );
    }

    #[test]
    fn test_enum_constants_and_vector_setter() {
        let mut class = ClassInfo::new("vtkThing");
        class.add_function(FunctionInfo::new("SetColorMode").with_argument(int()));
        class.add_function(FunctionInfo::new("SetColorModeToDefault"));
        class.add_function(FunctionInfo::new("SetColorModeToMapScalars"));
        class.add_function(
            FunctionInfo::new("SetCenter")
                .with_argument(double())
                .with_argument(double())
                .with_argument(double()),
        );

        let props = NamingClassifier.classify(&class);
        let mode = &props.properties()[0];
        assert_eq!(mode.enum_constant_names, vec!["Default", "MapScalars"]);
        assert_eq!(mode.public_methods, MethodKind::SET | MethodKind::SET_VALUE_TO);

        let center = &props.properties()[1];
        assert_eq!(center.name, "Center");
        assert_eq!(center.count, 3);
    }

    #[test]
    fn test_number_of_pair_forms_its_own_group() {
        let mut class = ClassInfo::new("vtkDataArray");
        class.add_function(FunctionInfo::new("SetNumberOfComponents").with_argument(int()));
        class.add_function(FunctionInfo::new("GetNumberOfComponents").with_return(int()));
        class.add_function(FunctionInfo::new("SetPoint").with_argument(int()).with_argument(double()));
        class.add_function(FunctionInfo::new("GetPoint").with_argument(int()).with_return(double()));
        class.add_function(FunctionInfo::new("GetNumberOfPoints").with_return(int()));
        class.add_function(FunctionInfo::new("GetNumberOfTuples").with_return(int()));

        let props = NamingClassifier.classify(&class);
        let names: Vec<&str> = props.properties().iter().map(|p| p.name.as_str()).collect();
        assert_eq!(names, vec!["NumberOfComponents", "Point", "NumberOfTuples"]);

        let components = &props.properties()[0];
        assert_eq!(components.public_methods, MethodKind::SET | MethodKind::GET);
        assert_eq!(props.property_of(1).map(|p| p.name.as_str()), Some("NumberOfComponents"));

        let point = &props.properties()[1];
        assert!(point.public_methods.contains(MethodKind::GET_NUMBER_OF));
        assert_eq!(props.property_of(4).map(|p| p.name.as_str()), Some("Point"));

        // no Tuple anchor, so the getter keeps its full stem
        assert_eq!(props.properties()[2].public_methods, MethodKind::GET);
    }

    #[test]
    fn test_set_to_constant_with_to_in_stem() {
        let mut class = ClassInfo::new("vtkLocator");
        class.add_function(FunctionInfo::new("SetTolerance").with_argument(double()));
        class.add_function(FunctionInfo::new("GetTolerance").with_return(double()));
        class.add_function(FunctionInfo::new("SetToleranceToDefault"));
        class.add_function(FunctionInfo::new("SetAutomatic").with_argument(int()));
        class.add_function(FunctionInfo::new("SetAutomaticToOn"));

        let props = NamingClassifier.classify(&class);
        assert_eq!(props.properties().len(), 2);

        let tolerance = &props.properties()[0];
        assert_eq!(tolerance.name, "Tolerance");
        assert_eq!(
            tolerance.public_methods,
            MethodKind::SET | MethodKind::GET | MethodKind::SET_VALUE_TO
        );
        assert_eq!(tolerance.enum_constant_names, vec!["Default"]);
        assert_eq!(props.property_of(2).map(|p| p.name.as_str()), Some("Tolerance"));

        let automatic = &props.properties()[1];
        assert_eq!(automatic.enum_constant_names, vec!["On"]);
    }
}
