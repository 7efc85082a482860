// Mon Jan 19 2026 - Alex

//! Array-size hints for methods that return pointers.
//!
//! Each line reads `ClassName MethodName 0xTYPE COUNT`: every method of
//! `ClassName` named `MethodName` whose return type code is `TYPE` returns
//! `COUNT` elements.

use crate::model::{ClassInfo, FileInfo, TypeCode};
use std::fs;
use std::path::{Path, PathBuf};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum HintsError {
    #[error("Cannot read hints file {path:?}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Malformed hint at line {line}: {reason}")]
    ParseError { line: usize, reason: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hint {
    pub class_name: String,
    pub method_name: String,
    pub return_type: TypeCode,
    pub count: u64,
}

#[derive(Debug, Clone, Default)]
pub struct Hints {
    hints: Vec<Hint>,
}

impl Hints {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, HintsError> {
        let path = path.as_ref();
        let text = fs::read_to_string(path).map_err(|source| HintsError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::parse(&text)
    }

    pub fn parse(text: &str) -> Result<Self, HintsError> {
        let mut hints = Vec::new();
        for (i, raw) in text.lines().enumerate() {
            let line = raw.trim();
            if line.is_empty() || line.starts_with('#') {
                continue;
            }
            let hint = parse_hint(line).map_err(|reason| HintsError::ParseError {
                line: i + 1,
                reason,
            })?;
            hints.push(hint);
        }
        Ok(Self { hints })
    }

    pub fn len(&self) -> usize {
        self.hints.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hints.is_empty()
    }

    /// Returns the number of methods that received a size.
    pub fn apply(&self, file: &mut FileInfo) -> usize {
        let mut applied = 0;
        file.contents.for_each_class_mut(&mut |class: &mut ClassInfo| {
            for hint in self.hints.iter().filter(|h| h.class_name == class.name) {
                for func in &mut class.functions {
                    if func.name() != hint.method_name {
                        continue;
                    }
                    if let Some(ret) = func.return_value.as_mut() {
                        if ret.type_code == hint.return_type {
                            ret.dimensions = vec![hint.count.to_string()];
                            applied += 1;
                        }
                    }
                }
            }
        });
        if applied > 0 {
            log::debug!("Applied {} size hints", applied);
        }
        applied
    }
}

fn parse_hint(line: &str) -> Result<Hint, String> {
    let fields: Vec<&str> = line.split_whitespace().collect();
    if fields.len() != 4 {
        return Err(format!("expected 4 fields, found {}", fields.len()));
    }

    let type_text = fields[2];
    let digits = type_text
        .strip_prefix("0x")
        .or_else(|| type_text.strip_prefix("0X"))
        .ok_or_else(|| format!("type code must be hexadecimal: {}", type_text))?;
    let return_type = u32::from_str_radix(digits, 16)
        .map_err(|e| format!("bad type code {}: {}", type_text, e))?;

    let count = fields[3]
        .parse::<u64>()
        .map_err(|e| format!("bad count {}: {}", fields[3], e))?;

    Ok(Hint {
        class_name: fields[0].to_string(),
        method_name: fields[1].to_string(),
        return_type: TypeCode::new(return_type),
        count,
    })
}
