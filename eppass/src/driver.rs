//! Pass driver.
//!
//! Runs the transformation over one compilation unit: declare the runtime
//! routines once, then visit every defined function exactly once, in the
//! unit's declaration order. Functions declared by the declarator itself
//! are externals and have no body, so the visit inherently skips them.
use epinstr::modules::Module;
use log::info;

use crate::{
    config::InstrumentConfig,
    declare,
    error::PassError,
    instrument::{initialize_entry, instrument_function},
};

/// A configured instrumentation pass, reusable across units.
#[derive(Debug, Clone)]
pub struct InstrumentationPass {
    config: InstrumentConfig,
}

/// What one pass run did to one unit.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PassReport {
    /// Identity of the transformed unit.
    pub unit: String,
    /// Names of the instrumented functions, in visit order.
    pub instrumented: Vec<String>,
    /// Whether the entry-point initializer was injected.
    pub entry_initialized: bool,
}

impl InstrumentationPass {
    pub fn new(config: InstrumentConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &InstrumentConfig {
        &self.config
    }

    /// Transform `unit` in place.
    ///
    /// On error the unit must be discarded by the caller: a signature
    /// conflict is detected before any mutation, but there is no partial
    /// instrumentation guarantee in general.
    pub fn run(&self, unit: &mut Module) -> Result<PassReport, PassError> {
        let declarations = declare::ensure_declared(unit)?;

        let mut report = PassReport {
            unit: unit.name.clone(),
            instrumented: Vec::new(),
            entry_initialized: false,
        };

        for index in 0..unit.functions.len() {
            let name = unit.functions[index].name.clone();

            if self.config.is_target(&name) {
                instrument_function(unit, index, declarations.log_fn)?;
                report.instrumented.push(name.clone());
            }

            // Initializing after instrumenting places the initializer call
            // ahead of the log call when the entry function is itself a
            // target: the logging backend must be set up before the entry
            // function's own record is emitted.
            if name == self.config.entry_name() {
                initialize_entry(unit, index, declarations.init_fn)?;
                report.entry_initialized = true;
            }
        }

        info!(
            "unit `{}`: instrumented {} function(s), entry {}",
            report.unit,
            report.instrumented.len(),
            if report.entry_initialized {
                "initialized"
            } else {
                "absent"
            }
        );
        Ok(report)
    }
}
