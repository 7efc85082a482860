// Mon Jan 19 2026 - Alex

use super::encode::{file_base_name, is_blank, operator_name, pointer_text, signature_text, type_name};
use super::error::OutputError;
use super::writer::XmlWriter;
use crate::merge::{MergeInfo, SuperclassResolver};
use crate::model::{
    ClassInfo, EnumInfo, FileInfo, FunctionInfo, ItemRef, NamespaceInfo, TemplateArgs, UsingInfo,
    ValueInfo,
};
use crate::properties::{ClassProperties, PropertyClassifier, PropertyInfo};
use log::{trace, warn};
use std::borrow::Cow;
use std::io::Write;

/// Longest See-also token that is kept.
const MAX_SEE_ALSO_TOKEN: usize = 400;

type Result<T> = std::result::Result<T, OutputError>;

/// Walks a declaration tree depth first and drives an [`XmlWriter`].
///
/// Classes with superclasses are merged on a private copy before their
/// members are written, so the tree itself is never modified.
pub struct ModelSerializer<'r, W: Write> {
    writer: XmlWriter<W>,
    resolver: &'r mut SuperclassResolver,
    classifier: &'r dyn PropertyClassifier,
}

impl<'r, W: Write> ModelSerializer<'r, W> {
    pub fn new(
        writer: XmlWriter<W>,
        resolver: &'r mut SuperclassResolver,
        classifier: &'r dyn PropertyClassifier,
    ) -> Self {
        Self {
            writer,
            resolver,
            classifier,
        }
    }

    pub fn into_writer(self) -> XmlWriter<W> {
        self.writer
    }

    pub fn write_file(&mut self, file: &FileInfo) -> Result<()> {
        self.writer.open_tag("File")?;
        if let Some(name) = &file.file_name {
            self.writer.attribute("name", file_base_name(name))?;
        }
        self.file_doc(file)?;
        self.body(&file.contents)?;
        self.writer.close_tag("File")?;
        self.writer.flush()?;
        Ok(())
    }

    fn file_doc(&mut self, file: &FileInfo) -> Result<()> {
        if is_blank(file.name_comment.as_deref())
            && is_blank(file.description.as_deref())
            && is_blank(file.caveats.as_deref())
            && is_blank(file.see_also.as_deref())
        {
            return Ok(());
        }

        self.writer.open_tag("Comment")?;
        self.writer.body()?;

        if let Some(name) = &file.name_comment {
            self.writer.text_line(&format!(".NAME {}", name.trim_start_matches(' ')))?;
        }

        if let Some(description) = &file.description {
            self.section("Description", description)?;
        }

        if let Some(caveats) = file.caveats.as_deref().filter(|c| !c.is_empty()) {
            self.section("Caveats", caveats)?;
        }

        if let Some(see_also) = file.see_also.as_deref().filter(|s| !s.is_empty()) {
            self.writer.blank_line()?;
            self.writer.text_line(".SECTION See also")?;
            let mut rest = see_also.trim_start();
            while !rest.is_empty() {
                // trailing sections are kept as written
                if rest.starts_with(".SECTION") {
                    self.writer.blank_line()?;
                    self.writer.multi_line_text(rest)?;
                    break;
                }
                let end = rest.find(char::is_whitespace).unwrap_or(rest.len());
                if end < MAX_SEE_ALSO_TOKEN {
                    self.writer.text_line(&rest[..end])?;
                }
                rest = rest[end..].trim_start();
            }
        }

        self.writer.close_tag("Comment")?;
        Ok(())
    }

    fn section(&mut self, title: &str, text: &str) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.text_line(&format!(".SECTION {}", title))?;
        self.writer.multi_line_text(text)?;
        Ok(())
    }

    /// Items of a file or namespace, in declaration order.
    fn body(&mut self, scope: &NamespaceInfo) -> Result<()> {
        for item in &scope.items {
            match *item {
                ItemRef::Variable(_) => {
                    if let Some(var) = lookup(&scope.variables, item) {
                        self.variable(var, false)?;
                    }
                }
                ItemRef::Constant(_) => {
                    if let Some(con) = lookup(&scope.constants, item) {
                        self.constant(con, false)?;
                    }
                }
                ItemRef::Typedef(_) => {
                    if let Some(typedef) = lookup(&scope.typedefs, item) {
                        self.typedef(typedef, false)?;
                    }
                }
                ItemRef::Using(_) => {
                    if let Some(using) = lookup(&scope.usings, item) {
                        self.using(using)?;
                    }
                }
                ItemRef::Enum(_) => {
                    if let Some(item) = lookup(&scope.enums, item) {
                        self.enum_item(item, false)?;
                    }
                }
                ItemRef::Class(_) => {
                    if let Some(class) = lookup(&scope.classes, item) {
                        self.class(scope, class, false)?;
                    }
                }
                ItemRef::Function(_) => {
                    if let Some(func) = lookup(&scope.functions, item) {
                        self.function(func)?;
                    }
                }
                ItemRef::Namespace(_) => {
                    if let Some(namespace) = lookup(&scope.namespaces, item) {
                        self.namespace(namespace)?;
                    }
                }
            }
        }
        Ok(())
    }

    fn namespace(&mut self, namespace: &NamespaceInfo) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Namespace")?;
        if let Some(name) = &namespace.name {
            self.writer.attribute("name", name)?;
        }
        self.body(namespace)?;
        self.writer.close_tag("Namespace")?;
        Ok(())
    }

    /// `scope` is the namespace the class was declared in. Nested classes
    /// resolve their ancestors there too.
    fn class(&mut self, scope: &NamespaceInfo, class: &ClassInfo, nested: bool) -> Result<()> {
        let element = class.kind.element_name();
        trace!("Writing {} {}", element, class.name);

        self.writer.blank_line()?;
        self.writer.open_tag(element)?;
        self.writer.attribute("name", &class.name)?;
        if nested {
            self.writer.attribute("access", class.access.as_str())?;
        }
        if class.is_abstract {
            self.writer.flag("abstract")?;
        }
        if let Some(template) = &class.template {
            self.writer.flag("template")?;
            self.template(template)?;
        }
        self.comment(class.comment.as_deref())?;

        for name in &class.super_classes {
            self.writer.open_tag("SuperClass")?;
            self.writer.attribute("name", name)?;
            self.writer.attribute("access", "public")?;
            self.writer.close_tag("SuperClass")?;
        }

        let mut merged = Cow::Borrowed(class);
        let merge = if class.super_classes.is_empty() {
            None
        } else {
            Some(self.resolver.merge_superclasses(scope, merged.to_mut())?)
        };
        if let Some(info) = &merge {
            self.writer.blank_line()?;
            self.resolution_order(info)?;
        }

        let properties = self.classifier.classify(&merged);

        for item in &class.items {
            match *item {
                ItemRef::Variable(_) => {
                    if let Some(var) = lookup(&class.variables, item) {
                        self.variable(var, true)?;
                    }
                }
                ItemRef::Constant(_) => {
                    if let Some(con) = lookup(&class.constants, item) {
                        self.constant(con, true)?;
                    }
                }
                ItemRef::Enum(_) => {
                    if let Some(item) = lookup(&class.enums, item) {
                        self.enum_item(item, true)?;
                    }
                }
                ItemRef::Function(index) => {
                    // declared methods keep their index in the merged list
                    if lookup(&merged.functions, item).is_some() {
                        self.method_helper(&merged, index, merge.as_ref(), &properties)?;
                    }
                }
                ItemRef::Typedef(_) => {
                    if let Some(typedef) = lookup(&class.typedefs, item) {
                        self.typedef(typedef, true)?;
                    }
                }
                ItemRef::Using(_) => {
                    if let Some(using) = lookup(&class.usings, item) {
                        self.using(using)?;
                    }
                }
                ItemRef::Class(_) => {
                    if let Some(inner) = lookup(&class.classes, item) {
                        self.class(scope, inner, true)?;
                    }
                }
                ItemRef::Namespace(_) => {}
            }
        }

        self.writer.close_tag(element)?;
        Ok(())
    }

    fn resolution_order(&mut self, info: &MergeInfo) -> Result<()> {
        self.writer.open_tag("ResolutionOrder")?;
        self.writer.body()?;
        for name in info.class_names() {
            self.writer.open_tag("Context")?;
            self.writer.attribute("name", name)?;
            self.writer.attribute("access", "public")?;
            self.writer.close_tag("Context")?;
        }
        self.writer.close_tag("ResolutionOrder")?;
        Ok(())
    }

    /// Writes the method at `index` of the merged class, preceded by its
    /// property block when it is the first method of that property.
    fn method_helper(
        &mut self,
        class: &ClassInfo,
        index: usize,
        merge: Option<&MergeInfo>,
        properties: &ClassProperties,
    ) -> Result<()> {
        let func = &class.functions[index];
        let context = merge.and_then(|m| m.context(index));
        let property = properties.property_of(index);

        if let Some(property) = property {
            if properties.is_first_occurrence(index) {
                self.property(property, context)?;
            }
        }

        self.class_method(class, func, context, property.map(|p| p.name.as_str()))
    }

    fn class_method(
        &mut self,
        class: &ClassInfo,
        func: &FunctionInfo,
        context: Option<&str>,
        property: Option<&str>,
    ) -> Result<()> {
        let (element, name) = if class.is_constructor(func) {
            ("Constructor", None)
        } else if class.is_destructor(func) {
            ("Destructor", None)
        } else if func.is_operator {
            ("Operator", Some(operator_name(func.name())))
        } else {
            ("Method", Some(func.name()))
        };

        self.writer.blank_line()?;
        self.writer.open_tag(element)?;
        if let Some(name) = name {
            self.writer.attribute("name", name)?;
        }
        if let Some(context) = context {
            self.writer.attribute("context", context)?;
        }
        if let Some(property) = property {
            self.writer.attribute("property", property)?;
        }
        self.writer.attribute("access", func.access.as_str())?;

        let flags = [
            ("const", func.is_const),
            ("virtual", func.is_virtual),
            ("pure", func.is_pure_virtual),
            ("explicit", func.is_explicit),
        ];
        for (flag, set) in flags {
            if set {
                self.writer.flag(flag)?;
            }
        }

        self.function_flags(func)?;
        self.function_children(func, name.is_some())?;
        self.writer.close_tag(element)?;
        Ok(())
    }

    fn function(&mut self, func: &FunctionInfo) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Function")?;
        self.writer.attribute("name", func.name())?;
        self.function_flags(func)?;
        self.function_children(func, true)?;
        self.writer.close_tag("Function")?;
        Ok(())
    }

    fn function_flags(&mut self, func: &FunctionInfo) -> Result<()> {
        let flags = [
            ("template", func.template.is_some()),
            ("static", func.is_static),
            ("variadic", func.is_variadic),
            ("legacy", func.is_legacy),
        ];
        for (flag, set) in flags {
            if set {
                self.writer.flag(flag)?;
            }
        }
        Ok(())
    }

    fn function_children(&mut self, func: &FunctionInfo, with_return: bool) -> Result<()> {
        if let Some(template) = &func.template {
            self.template(template)?;
        }

        if let Some(signature) = &func.signature {
            self.writer.open_tag("Signature")?;
            self.writer.text_line(signature_text(signature))?;
            self.writer.close_tag("Signature")?;
        }

        self.comment(func.comment.as_deref())?;

        if with_return {
            if let Some(value) = &func.return_value {
                self.writer.open_tag("Return")?;
                self.type_attributes(value)?;
                self.type_elements(value)?;
                self.writer.close_tag("Return")?;
            }
        }

        for arg in &func.arguments {
            self.writer.open_tag("Arg")?;
            if let Some(name) = &arg.name {
                self.writer.attribute("name", name)?;
            }
            if let Some(value) = &arg.value {
                self.writer.attribute("value", value)?;
            }
            self.type_attributes(arg)?;
            self.type_elements(arg)?;
            self.writer.close_tag("Arg")?;
        }
        Ok(())
    }

    fn type_attributes(&mut self, value: &ValueInfo) -> Result<()> {
        self.writer.attribute("type", &type_name(value))?;
        if value.type_code.is_reference() {
            self.writer.flag("reference")?;
        }
        if let Some(pointer) = pointer_text(value) {
            self.writer.attribute("pointer", &pointer)?;
        }
        self.writer.list_attribute("size", &value.dimensions)?;
        Ok(())
    }

    /// Function-typed values nest their function. Pointers to members are
    /// written as a `Method` with the owning class as context.
    fn type_elements(&mut self, value: &ValueInfo) -> Result<()> {
        let func = match &value.function {
            Some(func) => func,
            None => return Ok(()),
        };
        let element = if func.class_name.is_some() { "Method" } else { "Function" };
        self.writer.open_tag(element)?;
        if let Some(class) = &func.class_name {
            self.writer.attribute("context", class)?;
        }
        self.function_flags(func)?;
        self.function_children(func, true)?;
        self.writer.close_tag(element)?;
        Ok(())
    }

    fn variable(&mut self, var: &ValueInfo, in_class: bool) -> Result<()> {
        let element = if in_class { "Member" } else { "Variable" };
        self.writer.blank_line()?;
        self.writer.open_tag(element)?;
        if let Some(name) = &var.name {
            self.writer.attribute("name", name)?;
        }
        if in_class {
            self.writer.attribute("access", var.access.as_str())?;
        }
        self.type_attributes(var)?;
        if let Some(value) = &var.value {
            self.writer.attribute("value", value)?;
        }
        self.comment(var.comment.as_deref())?;
        self.type_elements(var)?;
        self.writer.close_tag(element)?;
        Ok(())
    }

    fn constant(&mut self, con: &ValueInfo, in_class: bool) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Constant")?;
        if in_class {
            self.writer.attribute("access", con.access.as_str())?;
        }
        if con.is_enum {
            self.writer.flag("enum")?;
        }
        let typed = con.type_code.bits() != 0 && con.class_name.as_deref().is_some_and(|c| !c.is_empty());
        if typed {
            self.type_attributes(con)?;
        }
        if let Some(name) = &con.name {
            self.writer.attribute("name", name)?;
        }
        if let Some(value) = &con.value {
            self.writer.attribute("value", value)?;
        }
        self.comment(con.comment.as_deref())?;
        self.type_elements(con)?;
        self.writer.close_tag("Constant")?;
        Ok(())
    }

    fn enum_item(&mut self, item: &EnumInfo, in_class: bool) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Enum")?;
        if in_class {
            self.writer.attribute("access", item.access.as_str())?;
        }
        self.writer.attribute("name", &item.name)?;
        self.comment(item.comment.as_deref())?;
        self.writer.close_tag("Enum")?;
        Ok(())
    }

    fn typedef(&mut self, typedef: &ValueInfo, in_class: bool) -> Result<()> {
        let typed = typedef.type_code.bits() != 0;
        self.writer.blank_line()?;
        self.writer.open_tag("Typedef")?;
        if in_class {
            self.writer.attribute("access", typedef.access.as_str())?;
        }
        if typed {
            self.type_attributes(typedef)?;
        }
        if let Some(name) = &typedef.name {
            self.writer.attribute("name", name)?;
        }
        self.comment(typedef.comment.as_deref())?;
        if typed {
            self.type_elements(typedef)?;
        }
        self.writer.close_tag("Typedef")?;
        Ok(())
    }

    fn using(&mut self, using: &UsingInfo) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Using")?;
        self.writer.attribute("name", using.name.as_deref().unwrap_or("namespace"))?;
        if let Some(scope) = &using.scope {
            self.writer.attribute("scope", scope)?;
        }
        self.comment(using.comment.as_deref())?;
        self.writer.close_tag("Using")?;
        Ok(())
    }

    fn template(&mut self, args: &TemplateArgs) -> Result<()> {
        for arg in &args.arguments {
            self.writer.open_tag("TemplateArg")?;
            if let Some(name) = &arg.name {
                self.writer.attribute("name", name)?;
            }
            let kind = if arg.template.is_some() {
                "template"
            } else if arg.type_code.bits() != 0 {
                arg.class_name.as_deref().unwrap_or("")
            } else {
                "typename"
            };
            self.writer.attribute("type", kind)?;
            if let Some(value) = &arg.value {
                self.writer.attribute("value", value)?;
            }
            if let Some(nested) = &arg.template {
                self.writer.flag("template")?;
                self.template(nested)?;
            }
            self.writer.close_tag("TemplateArg")?;
        }
        Ok(())
    }

    fn property(&mut self, property: &PropertyInfo, context: Option<&str>) -> Result<()> {
        self.writer.blank_line()?;
        self.writer.open_tag("Property")?;
        self.writer.attribute("name", &property.name)?;
        if let Some(context) = context {
            self.writer.attribute("context", context)?;
        }
        if let Some(access) = property.access() {
            self.writer.attribute("access", access)?;
        }
        if property.is_static {
            self.writer.flag("static")?;
        }
        if property.is_legacy() {
            self.writer.flag("legacy")?;
        }

        let mut value = ValueInfo {
            type_code: property.type_code,
            class_name: property.class_name.clone(),
            ..ValueInfo::default()
        };
        if property.count > 0 {
            value.dimensions.push(property.count.to_string());
        }
        self.type_attributes(&value)?;
        self.comment(property.comment.as_deref())?;

        for name in &property.enum_constant_names {
            self.writer.open_tag("SetValueTo")?;
            self.writer.attribute("name", name)?;
            self.writer.close_tag("SetValueTo")?;
        }

        let groups = [
            ("PublicMethods", property.public_methods),
            ("ProtectedMethods", property.protected_methods),
            ("PrivateMethods", property.private_methods),
            ("LegacyMethods", property.legacy_methods),
        ];
        for (element, kinds) in groups {
            if kinds.is_empty() {
                continue;
            }
            self.writer.open_tag(element)?;
            self.writer.attribute("bitfield", &kinds.to_bitfield_string())?;
            self.writer.close_tag(element)?;
        }

        self.writer.close_tag("Property")?;
        Ok(())
    }

    fn comment(&mut self, comment: Option<&str>) -> Result<()> {
        if let Some(text) = comment.filter(|c| !c.is_empty()) {
            self.writer.open_tag("Comment")?;
            self.writer.multi_line_text(text)?;
            self.writer.close_tag("Comment")?;
        }
        Ok(())
    }
}

/// Resolves an item reference, warning about indexes past the list end.
fn lookup<'a, T>(list: &'a [T], item: &ItemRef) -> Option<&'a T> {
    let index = item.index();
    let found = list.get(index);
    if found.is_none() {
        warn!("Skipping {:?}: only {} entries", item, list.len());
    }
    found
}
