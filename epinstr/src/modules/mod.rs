//! Instruction IR modules.
//!
//! This module groups the structural types of the IR. A [`Module`] is one
//! compilation unit: an ordered set of defined [`Function`]s, an ordered set
//! of [`ExternalFunction`] declarations and a table of interned string
//! constants. Submodules contain families of operations:
//!
//! - `int`: integer arithmetic and comparisons
//! - `mem`: memory loads, stores and stack allocation
//! - `misc`: calls and phi nodes
//! - `control_flow`: block terminators
//! - `operand`: shared operand types
//! - `symbol`: external declarations and function references
//!
//! You typically manipulate instructions via the [`instructions::Instr`]
//! enum, which is a tagged union of all concrete instruction forms.
use log::debug;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::{
    modules::{
        control_flow::Terminator,
        instructions::Instr,
        operand::{Label, Name, Operand},
        symbol::{ExternalFunction, FunctionPointer},
    },
    types::Type,
    utils::Error,
};

pub mod control_flow;
pub mod fmt;
pub mod instructions;
pub mod int;
pub mod mem;
pub mod misc;
pub mod operand;
pub mod symbol;

/// Common interface implemented by every instruction node.
///
/// Provides lightweight iteration over an instruction's input operands and
/// exposes its optional destination SSA name when present.
pub trait Instruction {
    /// Iterate over all input operands for this instruction.
    fn operands(&self) -> impl Iterator<Item = &Operand>;

    /// Mutably iterate over all input operands for this instruction.
    fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand>;

    /// Return the destination SSA name if the instruction produces a result.
    fn destination(&self) -> Option<Name> {
        None
    }

    /// Convenience iterator over referenced SSA names (i.e., register
    /// operands). Immediates and string constants are ignored.
    fn name_dependencies(&self) -> impl Iterator<Item = Name> {
        self.operands().filter_map(|op| match op {
            Operand::Reg(reg) => Some(*reg),
            _ => None,
        })
    }
}

/// A basic block within a function: an ordered instruction sequence ending
/// with a control flow terminator.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct BasicBlock {
    pub label: Label,
    pub instructions: Vec<Instr>,
    pub terminator: Terminator,
}

impl BasicBlock {
    pub fn new(label: Label, terminator: Terminator) -> Self {
        Self {
            label,
            instructions: Vec::new(),
            terminator,
        }
    }

    /// Index of the first instruction that is not a phi node. If the block
    /// holds only phis (or nothing), this is the block's instruction count,
    /// i.e. the position just before the terminator.
    pub fn first_non_phi(&self) -> usize {
        self.instructions
            .iter()
            .position(|instr| !instr.is_phi())
            .unwrap_or(self.instructions.len())
    }
}

/// A function defined within the module, made of basic blocks.
///
/// By convention `blocks[0]` is the entry block, where execution begins.
/// Parameters are `(Name, Type)` pairs; a `return_type` of `None` means the
/// function returns void.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Function {
    pub uuid: Uuid,
    pub name: String,
    pub params: Vec<(Name, Type)>,
    pub return_type: Option<Type>,
    pub blocks: Vec<BasicBlock>,
}

impl Function {
    pub fn new(
        name: impl Into<String>,
        params: Vec<(Name, Type)>,
        return_type: Option<Type>,
        blocks: Vec<BasicBlock>,
    ) -> Self {
        Self {
            uuid: Uuid::new_v4(),
            name: name.into(),
            params,
            return_type,
            blocks,
        }
    }

    /// The entry block, if the function has a body at all.
    pub fn entry_block(&self) -> Option<&BasicBlock> {
        self.blocks.first()
    }

    pub fn entry_block_mut(&mut self) -> Option<&mut BasicBlock> {
        self.blocks.first_mut()
    }

    /// Returns true if this definition has exactly the given signature.
    pub fn matches_signature(&self, param_types: &[Type], return_type: Option<Type>) -> bool {
        self.return_type == return_type
            && self.params.len() == param_types.len()
            && self
                .params
                .iter()
                .zip(param_types)
                .all(|((_, ty), expected)| ty == expected)
    }

    fn block(&self, label: Label) -> Option<&BasicBlock> {
        self.blocks.iter().find(|bb| bb.label == label)
    }
}

/// A module containing defined functions and references to external ones.
///
/// `Module` acts as the compilation unit boundary for symbol visibility.
/// Functions keep their declaration order; passes that visit "every function
/// in the unit" iterate `functions` front to back. The string table holds
/// interned constants referenced by `Operand::Str`; identical strings share
/// one slot.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Module {
    /// Identity of the unit, used when reporting unit-level failures.
    pub name: String,
    pub functions: Vec<Function>,
    pub external_functions: Vec<ExternalFunction>,
    pub strings: Vec<String>,
}

impl Module {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            functions: Vec::new(),
            external_functions: Vec::new(),
            strings: Vec::new(),
        }
    }

    /// Append a defined function, returning its identity.
    pub fn define_function(&mut self, function: Function) -> Uuid {
        let uuid = function.uuid;
        self.functions.push(function);
        uuid
    }

    /// Append an external declaration, returning its identity.
    pub fn declare_external(
        &mut self,
        name: impl Into<String>,
        param_types: Vec<Type>,
        return_type: Option<Type>,
    ) -> Uuid {
        let external = ExternalFunction {
            uuid: Uuid::new_v4(),
            name: name.into(),
            param_types,
            return_type,
        };
        let uuid = external.uuid;
        debug!("unit `{}`: declared external `{}`", self.name, external.name);
        self.external_functions.push(external);
        uuid
    }

    pub fn function(&self, uuid: Uuid) -> Option<&Function> {
        self.functions.iter().find(|f| f.uuid == uuid)
    }

    pub fn external(&self, uuid: Uuid) -> Option<&ExternalFunction> {
        self.external_functions.iter().find(|e| e.uuid == uuid)
    }

    pub fn function_by_name(&self, name: &str) -> Option<&Function> {
        self.functions.iter().find(|f| f.name == name)
    }

    pub fn external_by_name(&self, name: &str) -> Option<&ExternalFunction> {
        self.external_functions.iter().find(|e| e.name == name)
    }

    /// Resolve a function pointer to the referenced symbol's name.
    pub fn symbol_name(&self, pointer: FunctionPointer) -> Option<&str> {
        match pointer {
            FunctionPointer::Internal(uuid) => self.function(uuid).map(|f| f.name.as_str()),
            FunctionPointer::External(uuid) => self.external(uuid).map(|e| e.name.as_str()),
        }
    }

    /// Intern a string constant, reusing the slot of an identical one.
    pub fn intern_str(&mut self, value: &str) -> operand::StrId {
        if let Some(index) = self.strings.iter().position(|s| s == value) {
            return operand::StrId(index as u32);
        }
        self.strings.push(value.to_string());
        operand::StrId((self.strings.len() - 1) as u32)
    }

    pub fn str_value(&self, id: operand::StrId) -> Option<&str> {
        self.strings.get(id.0 as usize).map(String::as_str)
    }

    /// Verify the structural invariants of the unit:
    /// 1. Symbol names are unique across defined and external functions.
    /// 2. Every defined function has an entry block.
    /// 3. Phi instructions lead their basic block.
    /// 4. Call targets and string operands resolve within the unit.
    /// 5. Terminator targets reference blocks of the enclosing function.
    pub fn verify(&self) -> Result<(), Error> {
        let mut seen = std::collections::BTreeSet::new();
        for name in self
            .functions
            .iter()
            .map(|f| &f.name)
            .chain(self.external_functions.iter().map(|e| &e.name))
        {
            if !seen.insert(name) {
                return Err(Error::DuplicateSymbol { name: name.clone() });
            }
        }

        for function in &self.functions {
            if function.blocks.is_empty() {
                return Err(Error::MissingEntryBlock {
                    function: function.name.clone(),
                });
            }

            for bb in &function.blocks {
                let leading_phis = bb.first_non_phi();
                if bb.instructions[leading_phis..].iter().any(Instr::is_phi) {
                    return Err(Error::PhiNotFirstInstruction {
                        function: function.name.clone(),
                        block: bb.label,
                    });
                }

                for instr in &bb.instructions {
                    self.check_instr(function, instr)?;
                }

                for target in bb.terminator.iter_targets() {
                    if function.block(target).is_none() {
                        return Err(Error::UndefinedBasicBlock {
                            function: function.name.clone(),
                            label: target,
                        });
                    }
                }
            }
        }

        debug!("unit `{}`: verification passed", self.name);
        Ok(())
    }

    fn check_instr(&self, function: &Function, instr: &Instr) -> Result<(), Error> {
        if let Instr::Call(call) = instr {
            match call.function {
                FunctionPointer::Internal(uuid) if self.function(uuid).is_none() => {
                    return Err(Error::UndefinedInternalFunction {
                        function: function.name.clone(),
                        undefined: uuid,
                    });
                }
                FunctionPointer::External(uuid) if self.external(uuid).is_none() => {
                    return Err(Error::UndefinedExternalFunction {
                        function: function.name.clone(),
                        undefined: uuid,
                    });
                }
                _ => {}
            }
        }

        for op in instr.operands() {
            if let Operand::Str(id) = op {
                if self.str_value(*id).is_none() {
                    return Err(Error::UndefinedStringConstant {
                        function: function.name.clone(),
                        id: *id,
                    });
                }
            }
        }

        Ok(())
    }
}
