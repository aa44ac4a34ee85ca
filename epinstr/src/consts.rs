//! Immediate constants.
//!
//! Integer constants carry their type and a `u64` payload (values never
//! exceed 64 bits; wider integers would be built from smaller parts).
//! Floating-point constants store the raw bit pattern of the value so that
//! constants stay `Eq`/`Hash` without depending on float comparison
//! semantics.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::types::Type;

/// An integer constant with a specific type and value.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct IConst {
    pub ty: Type,
    pub value: u64,
}

impl IConst {
    /// Builds an integer constant, checking that `value` fits in `ty`.
    /// Returns `None` for non-integer types or out-of-range values.
    #[inline]
    pub const fn new(ty: Type, value: u64) -> Option<Self> {
        if !ty.is_int() {
            return None;
        }
        match ty.max_value() {
            Some(max) if value > max => None,
            _ => Some(Self { ty, value }),
        }
    }
}

/// A floating-point constant stored as raw bits of its IEEE-754 encoding.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct FConst {
    pub ty: Type,
    pub bits: u64,
}

impl FConst {
    pub fn from_f64(value: f64) -> Self {
        Self {
            ty: Type::F64,
            bits: value.to_bits(),
        }
    }

    pub fn from_f32(value: f32) -> Self {
        Self {
            ty: Type::F32,
            bits: value.to_bits() as u64,
        }
    }
}

/// Any immediate constant.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum AnyConst {
    Int(IConst),
    Fp(FConst),
}

impl AnyConst {
    pub const fn ty(&self) -> Type {
        match self {
            AnyConst::Int(c) => c.ty,
            AnyConst::Fp(c) => c.ty,
        }
    }
}

impl From<IConst> for AnyConst {
    fn from(value: IConst) -> Self {
        AnyConst::Int(value)
    }
}

impl From<FConst> for AnyConst {
    fn from(value: FConst) -> Self {
        AnyConst::Fp(value)
    }
}

impl std::fmt::Display for AnyConst {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            AnyConst::Int(c) => write!(f, "{} {}", c.ty, c.value),
            AnyConst::Fp(c) if c.ty == Type::F32 => {
                write!(f, "{} {}", c.ty, f32::from_bits(c.bits as u32))
            }
            AnyConst::Fp(c) => write!(f, "{} {}", c.ty, f64::from_bits(c.bits)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn iconst_range_checked() {
        assert!(IConst::new(Type::I8, 255).is_some());
        assert!(IConst::new(Type::I8, 256).is_none());
        assert!(IConst::new(Type::Ptr, 0).is_none());
    }

    #[test]
    fn fconst_bits_are_stable() {
        let a = FConst::from_f64(1.5);
        let b = FConst::from_f64(1.5);
        assert_eq!(a, b);
        assert_eq!(AnyConst::from(a).ty(), Type::F64);
    }
}
