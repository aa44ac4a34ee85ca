//! Call and phi instructions.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::{
    modules::{
        Instruction,
        operand::{Label, Name, Operand},
        symbol::FunctionPointer,
    },
    types::Type,
};

/// Call instruction.
///
/// Invokes a function, internal or external, with an ordered argument list.
/// A call with `dest: None` discards the callee's result (or the callee
/// returns void).
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Call {
    /// The callee symbol.
    pub function: FunctionPointer,

    /// The argument operands to pass to the function.
    pub args: Vec<Operand>,

    /// The destination SSA name for the return value, if captured.
    pub dest: Option<Name>,

    /// The return type of the callee. `None` for `void` functions.
    pub ty: Option<Type>,
}

impl Instruction for Call {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        self.args.iter()
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.args.iter_mut()
    }

    fn destination(&self) -> Option<Name> {
        self.dest
    }
}

/// Phi instruction.
///
/// Selects a value based on the predecessor block control flow arrived
/// from. Phi instructions must lead their basic block: once a non-phi
/// instruction appears, no further phi may follow.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Phi {
    /// The destination SSA name for the selected value.
    pub dest: Name,

    /// The type of the value being selected.
    pub ty: Type,

    /// The incoming values and their corresponding predecessor blocks.
    pub values: Vec<(Label, Operand)>,
}

impl Instruction for Phi {
    fn operands(&self) -> impl Iterator<Item = &Operand> {
        self.values.iter().map(|(_, op)| op)
    }

    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
        self.values.iter_mut().map(|(_, op)| op)
    }

    fn destination(&self) -> Option<Name> {
        Some(self.dest)
    }
}
