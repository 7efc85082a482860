// Mon Jan 19 2026 - Alex

//! Property groups: clusters of accessor methods (`SetX`, `GetX`, `XOn`, ...)
//! that together describe one logical property of a class.

pub mod naming;

pub use naming::NamingClassifier;

use crate::model::{ClassInfo, TypeCode};
use bitflags::bitflags;

bitflags! {
    /// Kinds of accessor methods attached to a property.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct MethodKind: u32 {
        const SET = 1 << 0;
        const GET = 1 << 1;
        const GET_MIN_VALUE = 1 << 2;
        const GET_MAX_VALUE = 1 << 3;
        const BOOLEAN_ON = 1 << 4;
        const BOOLEAN_OFF = 1 << 5;
        const SET_VALUE_TO = 1 << 6;
        const ADD = 1 << 7;
        const REMOVE = 1 << 8;
        const REMOVE_ALL = 1 << 9;
        const GET_NUMBER_OF = 1 << 10;

        const SET_CLAMP = Self::GET_MIN_VALUE.bits() | Self::GET_MAX_VALUE.bits();
        const SET_BOOL = Self::BOOLEAN_ON.bits() | Self::BOOLEAN_OFF.bits();
    }
}

const KIND_NAMES: &[(MethodKind, &str)] = &[
    (MethodKind::SET, "Set"),
    (MethodKind::GET, "Get"),
    (MethodKind::GET_MIN_VALUE, "GetMinValue"),
    (MethodKind::GET_MAX_VALUE, "GetMaxValue"),
    (MethodKind::BOOLEAN_ON, "BooleanOn"),
    (MethodKind::BOOLEAN_OFF, "BooleanOff"),
    (MethodKind::SET_VALUE_TO, "SetValueTo"),
    (MethodKind::ADD, "Add"),
    (MethodKind::REMOVE, "Remove"),
    (MethodKind::REMOVE_ALL, "RemoveAll"),
    (MethodKind::GET_NUMBER_OF, "GetNumberOf"),
];

impl MethodKind {
    /// Token list for a bitfield, lowest bit first. A complete clamp or
    /// boolean pair collapses into `SetClamp` / `SetBool`.
    pub fn tokens(self) -> Vec<&'static str> {
        let mut remaining = self;
        let mut out = Vec::new();

        for &(flag, name) in KIND_NAMES {
            if !remaining.contains(flag) {
                continue;
            }
            if MethodKind::SET_CLAMP.contains(flag) && remaining.contains(MethodKind::SET_CLAMP) {
                out.push("SetClamp");
                remaining.remove(MethodKind::SET_CLAMP);
            } else if MethodKind::SET_BOOL.contains(flag) && remaining.contains(MethodKind::SET_BOOL) {
                out.push("SetBool");
                remaining.remove(MethodKind::SET_BOOL);
            } else {
                out.push(name);
                remaining.remove(flag);
            }
        }

        out
    }

    pub fn to_bitfield_string(self) -> String {
        self.tokens().join("|")
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct PropertyInfo {
    pub name: String,
    pub type_code: TypeCode,
    pub class_name: Option<String>,
    /// Element count for fixed-size array properties, zero otherwise.
    pub count: usize,
    pub is_static: bool,
    pub comment: Option<String>,
    pub enum_constant_names: Vec<String>,
    pub public_methods: MethodKind,
    pub protected_methods: MethodKind,
    pub private_methods: MethodKind,
    pub legacy_methods: MethodKind,
}

impl PropertyInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn all_methods(&self) -> MethodKind {
        self.public_methods | self.protected_methods | self.private_methods
    }

    /// True when every accessor of the property is a legacy method.
    pub fn is_legacy(&self) -> bool {
        (self.all_methods() - self.legacy_methods).is_empty()
    }

    pub fn access(&self) -> Option<&'static str> {
        if !self.public_methods.is_empty() {
            Some("public")
        } else if !self.protected_methods.is_empty() {
            Some("protected")
        } else if !self.private_methods.is_empty() {
            Some("private")
        } else {
            None
        }
    }
}

/// Property groups of one class, indexed by the class's function list.
#[derive(Debug, Clone, Default)]
pub struct ClassProperties {
    properties: Vec<PropertyInfo>,
    method_property: Vec<Option<usize>>,
}

impl ClassProperties {
    pub fn empty(function_count: usize) -> Self {
        Self {
            properties: Vec::new(),
            method_property: vec![None; function_count],
        }
    }

    pub fn new(properties: Vec<PropertyInfo>, method_property: Vec<Option<usize>>) -> Self {
        Self {
            properties,
            method_property,
        }
    }

    pub fn properties(&self) -> &[PropertyInfo] {
        &self.properties
    }

    pub fn property_of(&self, function: usize) -> Option<&PropertyInfo> {
        self.method_property
            .get(function)
            .copied()
            .flatten()
            .and_then(|p| self.properties.get(p))
    }

    /// True if no earlier function belongs to the same property.
    pub fn is_first_occurrence(&self, function: usize) -> bool {
        let property = match self.method_property.get(function).copied().flatten() {
            Some(p) => p,
            None => return false,
        };
        !self.method_property[..function].contains(&Some(property))
    }
}

/// Groups the (already merged) methods of a class into properties.
pub trait PropertyClassifier {
    fn classify(&self, class: &ClassInfo) -> ClassProperties;
}

/// Classifier that never forms a property.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoProperties;

impl PropertyClassifier for NoProperties {
    fn classify(&self, class: &ClassInfo) -> ClassProperties {
        ClassProperties::empty(class.functions.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_bitfield_tokens() {
        let kinds = MethodKind::SET | MethodKind::GET | MethodKind::GET_MIN_VALUE | MethodKind::GET_MAX_VALUE;
        assert_eq!(kinds.to_bitfield_string(), "Set|Get|SetClamp");

        let half = MethodKind::GET_MIN_VALUE | MethodKind::BOOLEAN_ON | MethodKind::BOOLEAN_OFF;
        assert_eq!(half.tokens(), vec!["GetMinValue", "SetBool"]);

        assert_eq!(MethodKind::empty().to_bitfield_string(), "");
    }

    #[test]
    fn test_first_occurrence() {
        let props = ClassProperties::new(
            vec![PropertyInfo::new("Radius")],
            vec![None, Some(0), None, Some(0)],
        );
        assert!(!props.is_first_occurrence(0));
        assert!(props.is_first_occurrence(1));
        assert!(!props.is_first_occurrence(3));
        assert_eq!(props.property_of(3).map(|p| p.name.as_str()), Some("Radius"));
        assert!(props.property_of(9).is_none());
    }

    #[test]
    fn test_legacy_and_access() {
        let mut prop = PropertyInfo::new("Radius");
        prop.protected_methods = MethodKind::SET | MethodKind::GET;
        prop.legacy_methods = MethodKind::SET;
        assert!(!prop.is_legacy());
        assert_eq!(prop.access(), Some("protected"));
        prop.legacy_methods |= MethodKind::GET;
        assert!(prop.is_legacy());
    }
}
