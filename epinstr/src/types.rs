//! Value types understood by the IR.
//!
//! The type system is a single flat enum: scalar integers, scalar floats and
//! an opaque pointer. There are no aggregates and therefore no registry;
//! every site that needs a type stores a [`Type`] by value. Void is not a
//! type — functions model it as `Option<Type>::None` on their return slot.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

/// A scalar IR type.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Type {
    I1,
    I8,
    I16,
    I32,
    I64,
    F32,
    F64,
    /// Opaque pointer. Pointees are untyped; string constants are passed
    /// around as `Ptr` values.
    Ptr,
}

impl Type {
    /// Creates a [`Type`] from its textual mnemonic.
    pub fn from_str(s: &str) -> Option<Self> {
        Type::iter().find(|ty| ty.to_str() == s)
    }

    /// Returns the textual mnemonic for this type.
    pub fn to_str(&self) -> &'static str {
        match self {
            Type::I1 => "i1",
            Type::I8 => "i8",
            Type::I16 => "i16",
            Type::I32 => "i32",
            Type::I64 => "i64",
            Type::F32 => "f32",
            Type::F64 => "f64",
            Type::Ptr => "ptr",
        }
    }

    /// Returns true for the integer types (including `i1`).
    pub const fn is_int(&self) -> bool {
        matches!(self, Type::I1 | Type::I8 | Type::I16 | Type::I32 | Type::I64)
    }

    /// Returns true for the floating-point types.
    pub const fn is_fp(&self) -> bool {
        matches!(self, Type::F32 | Type::F64)
    }

    /// Maximum representable value for integer types, `None` otherwise.
    pub const fn max_value(&self) -> Option<u64> {
        match self {
            Type::I1 => Some(1),
            Type::I8 => Some(u8::MAX as u64),
            Type::I16 => Some(u16::MAX as u64),
            Type::I32 => Some(u32::MAX as u64),
            Type::I64 => Some(u64::MAX),
            _ => None,
        }
    }
}

impl std::fmt::Display for Type {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mnemonics_roundtrip() {
        for ty in Type::iter() {
            assert_eq!(Type::from_str(ty.to_str()), Some(ty));
        }
    }

    #[test]
    fn classification() {
        assert!(Type::I64.is_int());
        assert!(!Type::I64.is_fp());
        assert!(Type::F32.is_fp());
        assert!(!Type::Ptr.is_int());
        assert_eq!(Type::I8.max_value(), Some(255));
        assert_eq!(Type::Ptr.max_value(), None);
    }
}
