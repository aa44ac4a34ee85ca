//! Signature declarator.
//!
//! Before any call is injected, the unit must carry declarations for the
//! two logging-runtime routines. An already-present symbol with the right
//! signature is reused, whether it is an external declaration or a function
//! defined inside the unit; a symbol with the wrong signature is a fatal
//! conflict. Missing declarations are created as externals. The whole
//! operation is idempotent.
use epinstr::{
    modules::{Module, symbol::FunctionPointer},
    types::Type,
};
use log::debug;

use crate::error::PassError;

/// Symbol name of the call-logger routine: `(ptr) -> void`.
pub const LOG_FUNCTION_NAME: &str = "log_function_call";

/// Symbol name of the logging-subsystem initializer: `() -> i64`.
pub const INIT_FUNCTION_NAME: &str = "init";

pub(crate) const LOG_FUNCTION_PARAMS: &[Type] = &[Type::Ptr];
pub(crate) const LOG_FUNCTION_RETURN: Option<Type> = None;
pub(crate) const INIT_FUNCTION_PARAMS: &[Type] = &[];
pub(crate) const INIT_FUNCTION_RETURN: Option<Type> = Some(Type::I64);

/// Resolved handles to the two runtime routines within one unit.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Declarations {
    pub log_fn: FunctionPointer,
    pub init_fn: FunctionPointer,
}

enum Resolution {
    Found(FunctionPointer),
    Missing,
}

/// Guarantee both runtime routine declarations exist in the unit.
///
/// Both names are resolved before anything is inserted, so a conflict on
/// either name leaves the unit untouched.
pub fn ensure_declared(unit: &mut Module) -> Result<Declarations, PassError> {
    let log_fn = resolve(unit, LOG_FUNCTION_NAME, LOG_FUNCTION_PARAMS, LOG_FUNCTION_RETURN)?;
    let init_fn = resolve(
        unit,
        INIT_FUNCTION_NAME,
        INIT_FUNCTION_PARAMS,
        INIT_FUNCTION_RETURN,
    )?;

    let log_fn = materialize(unit, LOG_FUNCTION_NAME, LOG_FUNCTION_PARAMS, LOG_FUNCTION_RETURN, log_fn);
    let init_fn = materialize(
        unit,
        INIT_FUNCTION_NAME,
        INIT_FUNCTION_PARAMS,
        INIT_FUNCTION_RETURN,
        init_fn,
    );

    Ok(Declarations { log_fn, init_fn })
}

fn resolve(
    unit: &Module,
    name: &str,
    param_types: &[Type],
    return_type: Option<Type>,
) -> Result<Resolution, PassError> {
    if let Some(function) = unit.function_by_name(name) {
        if function.matches_signature(param_types, return_type) {
            debug!("unit `{}`: reusing defined `{}`", unit.name, name);
            return Ok(Resolution::Found(FunctionPointer::Internal(function.uuid)));
        }
        let found: Vec<Type> = function.params.iter().map(|(_, ty)| *ty).collect();
        return Err(conflict(unit, name, param_types, return_type, &found, function.return_type));
    }

    if let Some(external) = unit.external_by_name(name) {
        if external.matches_signature(param_types, return_type) {
            debug!("unit `{}`: reusing declared `{}`", unit.name, name);
            return Ok(Resolution::Found(FunctionPointer::External(external.uuid)));
        }
        return Err(conflict(
            unit,
            name,
            param_types,
            return_type,
            &external.param_types,
            external.return_type,
        ));
    }

    Ok(Resolution::Missing)
}

fn materialize(
    unit: &mut Module,
    name: &str,
    param_types: &[Type],
    return_type: Option<Type>,
    resolution: Resolution,
) -> FunctionPointer {
    match resolution {
        Resolution::Found(pointer) => pointer,
        Resolution::Missing => {
            FunctionPointer::External(unit.declare_external(name, param_types.to_vec(), return_type))
        }
    }
}

fn conflict(
    unit: &Module,
    name: &str,
    expected_params: &[Type],
    expected_return: Option<Type>,
    found_params: &[Type],
    found_return: Option<Type>,
) -> PassError {
    PassError::SignatureConflict {
        unit: unit.name.clone(),
        name: name.to_string(),
        expected: render_signature(expected_params, expected_return),
        found: render_signature(found_params, found_return),
    }
}

fn render_signature(param_types: &[Type], return_type: Option<Type>) -> String {
    let params: Vec<&str> = param_types.iter().map(Type::to_str).collect();
    let ret = return_type.map_or("void", |ty| ty.to_str());
    format!("({}) -> {}", params.join(", "), ret)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn signatures_render_readably() {
        assert_eq!(render_signature(&[Type::Ptr], None), "(ptr) -> void");
        assert_eq!(render_signature(&[], Some(Type::I64)), "() -> i64");
    }
}
