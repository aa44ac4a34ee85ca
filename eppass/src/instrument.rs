//! Call injection.
//!
//! Both injections share one discipline: build a call instruction and
//! insert it at the entry block's first non-phi position. Everything after
//! that position, including the function's original instruction sequence,
//! stays untouched.
use epinstr::{
    modules::{Module, misc::Call, operand::Operand, symbol::FunctionPointer},
    utils::Error,
};
use log::debug;

use crate::declare::INIT_FUNCTION_RETURN;

/// Prepend a call-logger invocation to the function at `index`, passing the
/// function's own name as an interned string constant.
pub fn instrument_function(
    unit: &mut Module,
    index: usize,
    log_fn: FunctionPointer,
) -> Result<(), Error> {
    let name = unit.functions[index].name.clone();
    let id = unit.intern_str(&name);

    let function = &mut unit.functions[index];
    let entry = function
        .entry_block_mut()
        .ok_or_else(|| Error::MissingEntryBlock {
            function: name.clone(),
        })?;
    let at = entry.first_non_phi();
    entry.instructions.insert(
        at,
        Call {
            function: log_fn,
            args: vec![Operand::Str(id)],
            dest: None,
            ty: None,
        }
        .into(),
    );

    debug!("unit `{}`: instrumented `{}`", unit.name, name);
    Ok(())
}

/// Prepend a zero-argument initializer call to the entry-point function at
/// `index`. The initializer's `i64` status is deliberately discarded: the
/// call is fire-and-forget.
pub fn initialize_entry(
    unit: &mut Module,
    index: usize,
    init_fn: FunctionPointer,
) -> Result<(), Error> {
    let name = unit.functions[index].name.clone();

    let function = &mut unit.functions[index];
    let entry = function
        .entry_block_mut()
        .ok_or_else(|| Error::MissingEntryBlock {
            function: name.clone(),
        })?;
    let at = entry.first_non_phi();
    entry.instructions.insert(
        at,
        Call {
            function: init_fn,
            args: vec![],
            dest: None,
            ty: INIT_FUNCTION_RETURN,
        }
        .into(),
    );

    debug!("unit `{}`: initialized entry `{}`", unit.name, name);
    Ok(())
}
