//! External symbols and function references.
//!
//! An [`ExternalFunction`] declares the signature of a routine defined
//! outside the current module; the linker resolves it against another
//! object. [`FunctionPointer`] is how call instructions name their callee,
//! internal or external.
#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};
use strum::EnumDiscriminants;
use uuid::Uuid;

use crate::types::Type;

/// Declaration of an externally linked function.
///
/// External functions have no body and are never instrumented; they only
/// contribute a symbol and a signature to the module.
#[derive(Debug, Clone, Hash, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct ExternalFunction {
    /// Unique identifier used to reference the declaration within the module.
    pub uuid: Uuid,

    /// The symbol name as it appears in the linking context.
    pub name: String,

    /// Parameter types, in order.
    pub param_types: Vec<Type>,

    /// Return type. `None` indicates a `void` return.
    pub return_type: Option<Type>,
}

impl ExternalFunction {
    /// Returns true if this declaration has exactly the given signature.
    pub fn matches_signature(&self, param_types: &[Type], return_type: Option<Type>) -> bool {
        self.param_types == param_types && self.return_type == return_type
    }
}

/// A reference to a function symbol, internal or external.
#[derive(Debug, Clone, Copy, Hash, PartialEq, Eq, PartialOrd, Ord, EnumDiscriminants)]
#[strum_discriminants(name(FunctionPointerType))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub enum FunctionPointer {
    /// Reference to a function defined within the current module.
    Internal(Uuid),

    /// Reference to an external declaration of the current module.
    External(Uuid),
}

impl FunctionPointer {
    /// Get the UUID of the referenced symbol, regardless of its kind.
    pub fn uuid(&self) -> Uuid {
        match self {
            FunctionPointer::Internal(uuid) => *uuid,
            FunctionPointer::External(uuid) => *uuid,
        }
    }
}

impl std::fmt::Display for FunctionPointerType {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FunctionPointerType::Internal => write!(f, "internal"),
            FunctionPointerType::External => write!(f, "external"),
        }
    }
}
