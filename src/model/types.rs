// Mon Jan 19 2026 - Alex

use serde::{Deserialize, Serialize};
use std::fmt;

/// Packed type code of a parsed value.
///
/// Bit layout:
/// - `0x0000_00FF` base type
/// - `0x0000_0100` reference
/// - `0x0000_FE00` indirection levels, two bits each, outermost level lowest
/// - `0x0001_0000` const
/// - `0x0002_0000` static
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeCode(pub u32);

/// One level of pointer indirection.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Indirection {
    Pointer,
    ConstPointer,
    Array,
}

impl Indirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Indirection::Pointer => "*",
            Indirection::ConstPointer => "*const",
            Indirection::Array => "*array",
        }
    }
}

/// Result of decoding the indirection field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PointerDecl {
    Levels(Vec<Indirection>),
    Unknown,
}

impl TypeCode {
    pub const BASE_TYPE: u32 = 0x0000_00FF;
    pub const REF: u32 = 0x0000_0100;
    pub const POINTER_MASK: u32 = 0x0000_FE00;
    pub const POINTER_LOWMASK: u32 = 0x0000_0600;
    pub const POINTER: u32 = 0x0000_0200;
    pub const CONST_POINTER: u32 = 0x0000_0400;
    pub const ARRAY: u32 = 0x0000_0600;
    pub const BAD_INDIRECT: u32 = Self::POINTER_MASK;
    pub const CONST: u32 = 0x0001_0000;
    pub const STATIC: u32 = 0x0002_0000;

    pub const VOID: u32 = 0x02;
    pub const CHAR: u32 = 0x03;
    pub const INT: u32 = 0x04;
    pub const FLOAT: u32 = 0x05;
    pub const DOUBLE: u32 = 0x06;
    pub const BOOL: u32 = 0x0E;
    pub const STRING: u32 = 0x21;
    pub const OBJECT: u32 = 0x25;
    pub const UNKNOWN: u32 = 0x08;

    pub fn new(bits: u32) -> Self {
        Self(bits)
    }

    pub fn bits(self) -> u32 {
        self.0
    }

    pub fn base_type(self) -> u32 {
        self.0 & Self::BASE_TYPE
    }

    pub fn is_const(self) -> bool {
        self.0 & Self::CONST != 0
    }

    pub fn is_reference(self) -> bool {
        self.0 & Self::REF != 0
    }

    pub fn is_static(self) -> bool {
        self.0 & Self::STATIC != 0
    }

    pub fn is_void(self) -> bool {
        self.0 == Self::VOID
    }

    pub fn indirection(self) -> u32 {
        self.0 & Self::POINTER_MASK
    }

    /// Appends one indirection level outside the existing ones.
    pub fn with_indirection(self, level: Indirection) -> Self {
        let bits = match level {
            Indirection::Pointer => Self::POINTER,
            Indirection::ConstPointer => Self::CONST_POINTER,
            Indirection::Array => Self::ARRAY,
        };
        let shifted = (self.indirection() << 2) & Self::POINTER_MASK;
        Self((self.0 & !Self::POINTER_MASK) | shifted | bits)
    }

    /// Decodes the indirection field, outermost level first.
    ///
    /// With `skip_outer` set, the outermost level is dropped: values that
    /// carry explicit dimensions encode the array level in their size list.
    pub fn pointer_levels(self, skip_outer: bool) -> PointerDecl {
        if self.indirection() == Self::BAD_INDIRECT {
            return PointerDecl::Unknown;
        }

        let mut bits = self.indirection();
        if skip_outer {
            bits = (bits >> 2) & Self::POINTER_MASK;
        }

        let mut levels = Vec::new();
        while bits != 0 {
            let low = bits & Self::POINTER_LOWMASK;
            bits = (bits >> 2) & Self::POINTER_MASK;
            levels.push(match low {
                Self::ARRAY => Indirection::Array,
                Self::CONST_POINTER => Indirection::ConstPointer,
                _ => Indirection::Pointer,
            });
        }
        PointerDecl::Levels(levels)
    }
}

impl From<u32> for TypeCode {
    fn from(bits: u32) -> Self {
        Self(bits)
    }
}

impl fmt::Display for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "0x{:x}", self.0)
    }
}

impl fmt::LowerHex for TypeCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::LowerHex::fmt(&self.0, f)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_plain_pointer() {
        let code = TypeCode::new(TypeCode::INT).with_indirection(Indirection::Pointer);
        assert_eq!(code.pointer_levels(false), PointerDecl::Levels(vec![Indirection::Pointer]));
        assert_eq!(code.base_type(), TypeCode::INT);
    }

    #[test]
    fn test_nested_levels_outermost_first() {
        let code = TypeCode::new(TypeCode::CHAR)
            .with_indirection(Indirection::Pointer)
            .with_indirection(Indirection::ConstPointer);
        assert_eq!(
            code.pointer_levels(false),
            PointerDecl::Levels(vec![Indirection::ConstPointer, Indirection::Pointer])
        );
        assert_eq!(code.pointer_levels(true), PointerDecl::Levels(vec![Indirection::Pointer]));
    }

    #[test]
    fn test_bad_indirection() {
        let code = TypeCode::new(TypeCode::INT | TypeCode::BAD_INDIRECT);
        assert_eq!(code.pointer_levels(false), PointerDecl::Unknown);
        assert_eq!(code.pointer_levels(true), PointerDecl::Unknown);
    }

    #[test]
    fn test_flags() {
        let code = TypeCode::new(TypeCode::DOUBLE | TypeCode::CONST | TypeCode::REF);
        assert!(code.is_const());
        assert!(code.is_reference());
        assert!(!code.is_static());
        assert_eq!(code.pointer_levels(false), PointerDecl::Levels(Vec::new()));
    }
}
