// Mon Jan 19 2026 - Alex

//! Text forms of types, signatures and names as they appear in the output.

use crate::model::{PointerDecl, ValueInfo};

/// Upper bound on the raw signature text that is kept.
pub const MAX_SIGNATURE_LEN: usize = 400;

/// Indirection of a value as `*`, `*const` and `*array` tokens, outermost
/// first. Values with dimensions carry their outermost level in the size
/// list instead. `None` when the value is not a pointer at all.
pub fn pointer_text(value: &ValueInfo) -> Option<String> {
    match value.type_code.pointer_levels(!value.dimensions.is_empty()) {
        PointerDecl::Unknown => Some("unknown".to_string()),
        PointerDecl::Levels(levels) if levels.is_empty() => None,
        PointerDecl::Levels(levels) => Some(levels.iter().map(|l| l.as_str()).collect()),
    }
}

/// The `type` text of a value. Const values are prefixed with `const `.
pub fn type_name(value: &ValueInfo) -> String {
    let class = value.class_name.as_deref().unwrap_or("");
    if value.type_code.is_const() {
        format!("const {}", class)
    } else {
        class.to_string()
    }
}

/// Signature text up to the first `;` outside any bracket pair, capped at
/// [`MAX_SIGNATURE_LEN`] characters.
pub fn signature_text(signature: &str) -> &str {
    let mut depth = 0usize;
    let mut end = signature.len();
    for (count, (i, c)) in signature.char_indices().enumerate() {
        if count == MAX_SIGNATURE_LEN {
            end = i;
            break;
        }
        match c {
            '(' | '{' | '[' => depth += 1,
            ')' | '}' | ']' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                end = i;
                break;
            }
            _ => {}
        }
    }
    signature[..end].trim_end()
}

/// Operator name without the `operator` keyword, e.g. `+=` for
/// `operator +=`.
pub fn operator_name(name: &str) -> &str {
    match name.strip_prefix("operator") {
        Some(rest) => rest.trim_start(),
        None => name,
    }
}

/// Final path component, split on `/`, `\` and `:`.
pub fn file_base_name(path: &str) -> &str {
    match path.rfind(['/', '\\', ':']) {
        Some(i) => &path[i + 1..],
        None => path,
    }
}

/// True for absent, empty or all-whitespace text.
pub fn is_blank(text: Option<&str>) -> bool {
    text.map_or(true, |t| t.trim().is_empty())
}
