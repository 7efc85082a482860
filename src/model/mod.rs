// Mon Jan 19 2026 - Alex

//! Declaration tree for one parsed header.
//!
//! The tree is produced by the external header grammar and handed over as
//! JSON. Every scope keeps per-kind member lists plus an `items` list that
//! records the original declaration order across all kinds.

pub mod error;
pub mod types;

pub use error::ModelError;
pub use types::{Indirection, PointerDecl, TypeCode};

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// C++ access level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Access {
    #[default]
    Public,
    Protected,
    Private,
}

impl Access {
    pub fn as_str(self) -> &'static str {
        match self {
            Access::Public => "public",
            Access::Protected => "protected",
            Access::Private => "private",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ClassKind {
    #[default]
    Class,
    Struct,
    Union,
}

impl ClassKind {
    pub fn element_name(self) -> &'static str {
        match self {
            ClassKind::Class => "Class",
            ClassKind::Struct => "Struct",
            ClassKind::Union => "Union",
        }
    }
}

/// Position of one declaration within its scope's per-kind lists.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "index", rename_all = "lowercase")]
pub enum ItemRef {
    Variable(usize),
    Constant(usize),
    Enum(usize),
    Function(usize),
    Typedef(usize),
    Using(usize),
    Class(usize),
    Namespace(usize),
}

impl ItemRef {
    pub fn index(self) -> usize {
        match self {
            ItemRef::Variable(i)
            | ItemRef::Constant(i)
            | ItemRef::Enum(i)
            | ItemRef::Function(i)
            | ItemRef::Typedef(i)
            | ItemRef::Using(i)
            | ItemRef::Class(i)
            | ItemRef::Namespace(i) => i,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateArg {
    pub name: Option<String>,
    /// Zero for `typename`/`class` parameters.
    pub type_code: TypeCode,
    pub class_name: Option<String>,
    pub value: Option<String>,
    pub template: Option<TemplateArgs>,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateArgs {
    pub arguments: Vec<TemplateArg>,
}

/// A typed value: variable, constant, typedef, argument or return value.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ValueInfo {
    pub name: Option<String>,
    pub type_code: TypeCode,
    pub class_name: Option<String>,
    /// Array dimensions, outermost first. An empty entry is sized at runtime.
    pub dimensions: Vec<String>,
    pub function: Option<Box<FunctionInfo>>,
    pub value: Option<String>,
    pub comment: Option<String>,
    pub access: Access,
    pub is_enum: bool,
}

impl ValueInfo {
    pub fn new(type_code: TypeCode, class_name: &str) -> Self {
        Self {
            type_code,
            class_name: Some(class_name.to_string()),
            ..Self::default()
        }
    }

    pub fn named(mut self, name: &str) -> Self {
        self.name = Some(name.to_string());
        self
    }

    pub fn with_dimensions(mut self, dims: &[&str]) -> Self {
        self.dimensions = dims.iter().map(|d| d.to_string()).collect();
        self
    }

    pub fn with_value(mut self, value: &str) -> Self {
        self.value = Some(value.to_string());
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FunctionInfo {
    pub name: Option<String>,
    pub signature: Option<String>,
    pub comment: Option<String>,
    pub arguments: Vec<ValueInfo>,
    pub return_value: Option<ValueInfo>,
    /// Owning class of a pointer-to-member function type.
    pub class_name: Option<String>,
    pub template: Option<TemplateArgs>,
    pub access: Access,
    pub is_static: bool,
    pub is_virtual: bool,
    pub is_pure_virtual: bool,
    pub is_const: bool,
    pub is_explicit: bool,
    pub is_operator: bool,
    pub is_variadic: bool,
    pub is_legacy: bool,
}

impl FunctionInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: Some(name.to_string()),
            ..Self::default()
        }
    }

    pub fn name(&self) -> &str {
        self.name.as_deref().unwrap_or("")
    }

    pub fn with_argument(mut self, arg: ValueInfo) -> Self {
        self.arguments.push(arg);
        self
    }

    pub fn with_return(mut self, value: ValueInfo) -> Self {
        self.return_value = Some(value);
        self
    }

    pub fn with_comment(mut self, comment: &str) -> Self {
        self.comment = Some(comment.to_string());
        self
    }

    pub fn with_signature(mut self, signature: &str) -> Self {
        self.signature = Some(signature.to_string());
        self
    }

    pub fn with_virtual(mut self) -> Self {
        self.is_virtual = true;
        self
    }

    pub fn with_access(mut self, access: Access) -> Self {
        self.access = access;
        self
    }

    /// Same name, same arity, pairwise identical argument type codes.
    /// Argument class names are not compared.
    pub fn matches_signature(&self, other: &FunctionInfo) -> bool {
        self.name.is_some()
            && self.name == other.name
            && self.arguments.len() == other.arguments.len()
            && self
                .arguments
                .iter()
                .zip(&other.arguments)
                .all(|(a, b)| a.type_code == b.type_code)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct EnumInfo {
    pub name: String,
    pub comment: Option<String>,
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct UsingInfo {
    /// `None` for `using namespace`.
    pub name: Option<String>,
    pub scope: Option<String>,
    pub comment: Option<String>,
    pub access: Access,
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ClassInfo {
    pub name: String,
    pub kind: ClassKind,
    pub super_classes: Vec<String>,
    pub items: Vec<ItemRef>,
    pub variables: Vec<ValueInfo>,
    pub constants: Vec<ValueInfo>,
    pub enums: Vec<EnumInfo>,
    pub functions: Vec<FunctionInfo>,
    pub typedefs: Vec<ValueInfo>,
    pub usings: Vec<UsingInfo>,
    pub classes: Vec<ClassInfo>,
    pub template: Option<TemplateArgs>,
    pub comment: Option<String>,
    pub access: Access,
    pub is_abstract: bool,
}

impl ClassInfo {
    pub fn new(name: &str) -> Self {
        Self {
            name: name.to_string(),
            ..Self::default()
        }
    }

    pub fn with_super(mut self, name: &str) -> Self {
        self.super_classes.push(name.to_string());
        self
    }

    pub fn add_function(&mut self, func: FunctionInfo) -> usize {
        let index = self.functions.len();
        self.functions.push(func);
        self.items.push(ItemRef::Function(index));
        index
    }

    pub fn add_variable(&mut self, var: ValueInfo) -> usize {
        let index = self.variables.len();
        self.variables.push(var);
        self.items.push(ItemRef::Variable(index));
        index
    }

    pub fn add_class(&mut self, class: ClassInfo) -> usize {
        let index = self.classes.len();
        self.classes.push(class);
        self.items.push(ItemRef::Class(index));
        index
    }

    pub fn is_constructor(&self, func: &FunctionInfo) -> bool {
        func.name() == self.name
    }

    pub fn is_destructor(&self, func: &FunctionInfo) -> bool {
        func.name().strip_prefix('~') == Some(self.name.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct NamespaceInfo {
    pub name: Option<String>,
    pub items: Vec<ItemRef>,
    pub variables: Vec<ValueInfo>,
    pub constants: Vec<ValueInfo>,
    pub enums: Vec<EnumInfo>,
    pub functions: Vec<FunctionInfo>,
    pub typedefs: Vec<ValueInfo>,
    pub usings: Vec<UsingInfo>,
    pub classes: Vec<ClassInfo>,
    pub namespaces: Vec<NamespaceInfo>,
}

impl NamespaceInfo {
    pub fn find_class(&self, name: &str) -> Option<&ClassInfo> {
        self.classes.iter().find(|c| c.name == name)
    }

    pub fn find_class_mut(&mut self, name: &str) -> Option<&mut ClassInfo> {
        self.classes.iter_mut().find(|c| c.name == name)
    }

    pub fn add_class(&mut self, class: ClassInfo) -> usize {
        let index = self.classes.len();
        self.classes.push(class);
        self.items.push(ItemRef::Class(index));
        index
    }

    pub fn add_function(&mut self, func: FunctionInfo) -> usize {
        let index = self.functions.len();
        self.functions.push(func);
        self.items.push(ItemRef::Function(index));
        index
    }

    pub fn add_namespace(&mut self, namespace: NamespaceInfo) -> usize {
        let index = self.namespaces.len();
        self.namespaces.push(namespace);
        self.items.push(ItemRef::Namespace(index));
        index
    }

    /// Visits every class in this scope, nested classes and nested
    /// namespaces included.
    pub fn for_each_class_mut<F: FnMut(&mut ClassInfo)>(&mut self, f: &mut F) {
        for class in &mut self.classes {
            visit_class_mut(class, f);
        }
        for ns in &mut self.namespaces {
            ns.for_each_class_mut(f);
        }
    }
}

fn visit_class_mut<F: FnMut(&mut ClassInfo)>(class: &mut ClassInfo, f: &mut F) {
    f(class);
    for inner in &mut class.classes {
        visit_class_mut(inner, f);
    }
}

/// One parsed header.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct FileInfo {
    pub file_name: Option<String>,
    pub name_comment: Option<String>,
    pub description: Option<String>,
    pub caveats: Option<String>,
    pub see_also: Option<String>,
    /// Name of the class the header is built around.
    pub main_class: Option<String>,
    pub contents: NamespaceInfo,
}

impl FileInfo {
    pub fn from_json_str(text: &str) -> Result<Self, ModelError> {
        Ok(serde_json::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ModelError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| ModelError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| ModelError::Decode {
            path: path.to_path_buf(),
            source,
        })
    }

    pub fn main_class_mut(&mut self) -> Option<&mut ClassInfo> {
        let name = self.main_class.clone()?;
        self.contents.find_class_mut(&name)
    }
}
