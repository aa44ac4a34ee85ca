//! Shared operand types for instructions.
//!
//! An instruction operand is a reference to another SSA value (`Reg`), an
//! immediate constant (`Imm`) or a pointer to an interned string constant of
//! the enclosing module (`Str`). Code labels never appear as instruction
//! operands; control flow lives exclusively in block terminators.
use crate::{consts::AnyConst, modules::Module};
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumIs;

/// SSA value identifier used to name the destination or reference another
/// instruction's result.
pub type Name = u32;

/// A code label identifying a basic block within its function.
///
/// Labels are function-local; control flow may not cross function
/// boundaries.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Label(pub u32);

impl Label {
    /// Reserved label of the function entry block.
    pub const ENTRY: Label = Label(0);

    /// Returns true if this is the entry-block label.
    pub fn is_entry(&self) -> bool {
        self == &Label::ENTRY
    }
}

impl std::fmt::Display for Label {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if f.alternate() {
            write!(f, "label %block_{}", self.0)
        } else {
            write!(f, "%block_{}", self.0)
        }
    }
}

/// Index of an interned string constant inside a [`Module`]'s string table.
#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct StrId(pub u32);

impl std::fmt::Display for StrId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// Instruction operand.
#[derive(Clone, Debug, PartialEq, Eq, Hash, EnumIs)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum Operand {
    /// Reference to a previously defined SSA value.
    Reg(Name),
    /// Immediate literal (integer or floating-point).
    Imm(AnyConst),
    /// Pointer to a string constant interned in the module.
    Str(StrId),
}

impl Operand {
    /// Formatting helper. When a module is supplied, string operands render
    /// their interned contents instead of the bare table index.
    pub fn fmt<'a>(&'a self, module: Option<&'a Module>) -> impl std::fmt::Display + 'a {
        pub struct Fmt<'a> {
            operand: &'a Operand,
            module: Option<&'a Module>,
        }

        impl std::fmt::Display for Fmt<'_> {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                match self.operand {
                    Operand::Reg(name) => write!(f, "%{}", name),
                    Operand::Imm(constant) => write!(f, "{}", constant),
                    Operand::Str(id) => match self.module.and_then(|m| m.str_value(*id)) {
                        Some(value) => write!(f, "str {:?}", value),
                        None => write!(f, "str #{}", id.0),
                    },
                }
            }
        }

        Fmt {
            operand: self,
            module,
        }
    }
}
