use strum::EnumIs;
use thiserror::Error;
use uuid::Uuid;

use crate::modules::operand::{Label, StrId};

#[derive(Debug, Clone, PartialEq, Eq, EnumIs, Error)]
pub enum Error {
    /// Two symbols of the unit share a name.
    #[error(
        "A defined or external function named `{name}` appears more than once in the unit. Symbol names must be unique within a compilation unit."
    )]
    DuplicateSymbol { name: String },

    /// A defined function has no basic blocks.
    #[error(
        "Function `{function}` is defined but has no basic blocks. Every defined function must own an entry block."
    )]
    MissingEntryBlock { function: String },

    /// Phi instructions must lead their basic block.
    #[error(
        "Phi instructions must be the first instructions in a basic block or follow other phi instructions. Block `{block}` of function `{function}` contains a phi after a non-phi instruction."
    )]
    PhiNotFirstInstruction { function: String, block: Label },

    /// A call references an internal function that is not defined within the module.
    #[error(
        "An instruction of function `{function}` refers to an internal function `{undefined}` that is not defined within the module."
    )]
    UndefinedInternalFunction { function: String, undefined: Uuid },

    /// A call references an external function that is not declared within the module.
    #[error(
        "An instruction of function `{function}` refers to an external function `{undefined}` that is not declared within the module."
    )]
    UndefinedExternalFunction { function: String, undefined: Uuid },

    /// A string operand points outside the module's string table.
    #[error(
        "An instruction of function `{function}` references string constant {id}, which does not exist in the unit's string table."
    )]
    UndefinedStringConstant { function: String, id: StrId },

    /// A terminator targets a block the enclosing function does not define.
    #[error(
        "The basic block `{label}` referenced in function `{function}` is not defined within the function."
    )]
    UndefinedBasicBlock { function: String, label: Label },
}
