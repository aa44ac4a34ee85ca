//! Control flow terminators.
//!
//! Every basic block ends in exactly one terminator: a conditional branch,
//! an unconditional jump, a return, or a trap. Terminators are the only
//! place control flow is expressed; ordinary instructions fall through.
use auto_enums::auto_enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

use crate::modules::{
    Module,
    operand::{Label, Operand},
};

/// Conditional branch instruction.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct CBranch {
    /// The condition operand; should evaluate to an `i1` value.
    pub cond: Operand,
    /// The label to jump to if the condition is true.
    pub target_true: Label,
    /// The label to jump to if the condition is false.
    pub target_false: Label,
}

/// Unconditional jump instruction.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Jump {
    /// The label to jump to.
    pub target: Label,
}

/// Return from function instruction. Optionally returns a value.
///
/// If `value` is `None`, it indicates a `void` return.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Ret {
    pub value: Option<Operand>,
}

/// Trap instruction indicating an unrecoverable error condition.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Trap;

/// Control flow terminator instructions.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Terminator {
    CBranch(CBranch),
    Jump(Jump),
    Ret(Ret),
    Trap(Trap),
}

impl Terminator {
    pub fn fmt<'a>(&'a self, module: Option<&'a Module>) -> impl std::fmt::Display + 'a {
        struct Fmt<'a> {
            terminator: &'a Terminator,
            module: Option<&'a Module>,
        }

        impl std::fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.terminator {
                    Terminator::CBranch(cbranch) => write!(
                        f,
                        "branch {}, {:#}, {:#}",
                        cbranch.cond.fmt(self.module),
                        cbranch.target_true,
                        cbranch.target_false
                    ),
                    Terminator::Jump(jump) => {
                        write!(f, "jump {}", jump.target)
                    }
                    Terminator::Ret(ret) => {
                        if let Some(value) = &ret.value {
                            write!(f, "ret {}", value.fmt(self.module))
                        } else {
                            write!(f, "ret void")
                        }
                    }
                    Terminator::Trap(_) => {
                        write!(f, "trap")
                    }
                }
            }
        }

        Fmt {
            terminator: self,
            module,
        }
    }

    #[auto_enum(Iterator)]
    pub fn operands(&self) -> impl Iterator<Item = &Operand> {
        match self {
            Terminator::CBranch(cbranch) => std::iter::once(&cbranch.cond),
            Terminator::Jump(_) => std::iter::empty(),
            Terminator::Ret(ret) => ret.value.iter(),
            Terminator::Trap(_) => std::iter::empty(),
        }
    }

    /// Iterate over the successor block labels of this terminator.
    #[auto_enum(Iterator)]
    pub fn iter_targets(&self) -> impl Iterator<Item = Label> + '_ {
        match self {
            Terminator::CBranch(cbranch) => {
                [cbranch.target_true, cbranch.target_false].into_iter()
            }
            Terminator::Jump(jump) => [jump.target].into_iter(),
            Terminator::Ret(_) => std::iter::empty(),
            Terminator::Trap(_) => std::iter::empty(),
        }
    }
}
