//! Memory operations.
//!
//! Loads, stores and stack allocation. `volatile` accesses are protected
//! from removal or merging by optimizations; atomic orderings are out of
//! scope for this IR.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    modules::{
        Instruction,
        operand::{Name, Operand},
    },
    types::Type,
};

/// Load from memory into a destination SSA name.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MLoad {
    pub dest: Name,
    pub ty: Type,
    pub addr: Operand,
    pub volatile: bool,
}

impl Instruction for MLoad {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        std::iter::once(&self.addr)
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        std::iter::once(&mut self.addr)
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }
}

/// Store a value to memory.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MStore {
    pub addr: Operand,
    pub value: Operand,
    pub volatile: bool,
}

impl Instruction for MStore {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        [&self.addr, &self.value].into_iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        [&mut self.addr, &mut self.value].into_iter()
    }
}

/// Allocate a stack slot for one value of the given type, yielding its
/// address as a `Ptr`.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct MAlloca {
    pub dest: Name,
    pub ty: Type,
}

impl Instruction for MAlloca {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        std::iter::empty()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        std::iter::empty()
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }
}
