//! Integer instructions.
//!
//! Arithmetic and comparisons over integer values. Each instruction carries
//! its destination [`Name`], its operand [`Type`] and its inputs; overflow
//! behavior and signedness are explicit parameters where relevant.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumIter, IntoEnumIterator};

use crate::{
    modules::{
        Instruction,
        operand::{Name, Operand},
    },
    types::Type,
};

/// Overflow policies for integer arithmetic.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum OverflowPolicy {
    /// Wrap around on overflow.
    Wrap,
    /// Trap on overflow.
    Panic,
}

/// Signedness for integer operations.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum IntegerSignedness {
    Signed,
    Unsigned,
}

/// Integer comparison operations.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, EnumIter)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum ICmpVariant {
    /// Equal
    Eq,
    /// Not equal
    Ne,
    /// Unsigned greater than
    Ugt,
    /// Unsigned less than
    Ult,
    /// Signed greater than
    Sgt,
    /// Signed less than
    Slt,
}

impl ICmpVariant {
    /// Creates an [`ICmpVariant`] from its string representation.
    pub fn from_str(s: &str) -> Option<Self> {
        ICmpVariant::iter().find(|op| op.to_str() == s)
    }

    /// Returns the string representation of the [`ICmpVariant`].
    pub fn to_str(&self) -> &'static str {
        match self {
            ICmpVariant::Eq => "eq",
            ICmpVariant::Ne => "ne",
            ICmpVariant::Ugt => "ugt",
            ICmpVariant::Ult => "ult",
            ICmpVariant::Sgt => "sgt",
            ICmpVariant::Slt => "slt",
        }
    }
}

macro_rules! define_int_arith {
    ($(#[$doc:meta])* $name:ident) => {
        $(#[$doc])*
        #[derive(Debug, Clone, Hash, PartialEq, Eq)]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub struct $name {
            pub dest: Name,
            pub ty: Type,
            pub lhs: Operand,
            pub rhs: Operand,
            pub signedness: IntegerSignedness,
            pub overflow: OverflowPolicy,
        }

        impl Instruction for $name {
            fn operands(&self) -> impl Iterator<Item = &Operand> {
                [&self.lhs, &self.rhs].into_iter()
            }

            fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
                [&mut self.lhs, &mut self.rhs].into_iter()
            }

            fn destination(&self) -> Option<Name> {
                Some(self.dest)
            }
        }
    };
}

define_int_arith!(
    /// Integer addition.
    IAdd
);
define_int_arith!(
    /// Integer subtraction.
    ISub
);
define_int_arith!(
    /// Integer multiplication.
    IMul
);

/// Integer comparison producing an `i1` result.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ICmp {
    pub dest: Name,
    pub variant: ICmpVariant,
    pub ty: Type,
    pub lhs: Operand,
    pub rhs: Operand,
}

impl Instruction for ICmp {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        [&self.lhs, &self.rhs].into_iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        [&mut self.lhs, &mut self.rhs].into_iter()
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }
}
