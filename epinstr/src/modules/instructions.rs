//! The instruction union.
//!
//! [`Instr`] is a tagged union of all concrete instruction forms. Use it to
//! store heterogeneous instruction streams and to pattern-match on specific
//! operations; the generated [`InstrKind`] discriminant (via `strum`) is
//! handy for fast classification.
use auto_enums::auto_enum;
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::{EnumDiscriminants, EnumIs, EnumTryAs};

use crate::modules::{
    Instruction, int, mem, misc,
    operand::{Name, Operand},
};

macro_rules! define_instructions {
    ($($variant:ident($typ:ty)),+ $(,)?) => {
        /// Discriminated union covering all instruction kinds.
        #[derive(Debug, Clone, Hash, PartialEq, Eq, EnumIs, EnumTryAs, EnumDiscriminants)]
        #[strum_discriminants(name(InstrKind))]
        #[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
        pub enum Instr {
            $($variant($typ),)+
        }

        impl Instruction for Instr {
            #[auto_enum(Iterator)]
            fn operands(&self) -> impl Iterator<Item = &Operand> {
                match self {
                    $(Instr::$variant(instr) => instr.operands(),)+
                }
            }

            #[auto_enum(Iterator)]
            fn operands_mut(&mut self) -> impl Iterator<Item = &mut Operand> {
                match self {
                    $(Instr::$variant(instr) => instr.operands_mut(),)+
                }
            }

            fn destination(&self) -> Option<Name> {
                match self {
                    $(Instr::$variant(instr) => instr.destination(),)+
                }
            }
        }

        $(
            impl From<$typ> for Instr {
                fn from(inst: $typ) -> Self {
                    Instr::$variant(inst)
                }
            }
        )+
    };
}

define_instructions!(
    // Integer instructions
    IAdd(int::IAdd),
    ISub(int::ISub),
    IMul(int::IMul),
    ICmp(int::ICmp),
    // Memory instructions
    MLoad(mem::MLoad),
    MStore(mem::MStore),
    MAlloca(mem::MAlloca),
    // Misc instructions
    Call(misc::Call),
    Phi(misc::Phi),
);

impl InstrKind {
    /// Return the canonical mnemonic used when printing this instruction.
    pub fn opname(&self) -> &'static str {
        match self {
            InstrKind::IAdd => "iadd",
            InstrKind::ISub => "isub",
            InstrKind::IMul => "imul",
            InstrKind::ICmp => "icmp",
            InstrKind::MLoad => "load",
            InstrKind::MStore => "store",
            InstrKind::MAlloca => "alloca",
            InstrKind::Call => "call",
            InstrKind::Phi => "phi",
        }
    }
}
