//! Function-entry instrumentation pass.
//!
//! The pass rewrites one compilation unit at a time so that every defined
//! function whose name belongs to a configured target set logs its own
//! invocation: a call to the external `log_function_call` routine is
//! prepended to the function's entry block, passing the function's name as a
//! string constant. The unit's entry-point function additionally receives a
//! call to the logging-subsystem initializer.
//!
//! The pass is a pure, single-threaded, in-memory transformation. It never
//! removes or reorders existing instructions; it only prepends calls and, if
//! needed, adds the two external declarations. The only fatal per-unit
//! failure is a signature conflict: a symbol already present under one of
//! the runtime routine names with an incompatible signature, which would
//! make the instrumented unit unlinkable.

pub mod config;
pub mod declare;
pub mod driver;
pub mod error;
pub mod instrument;

pub use config::InstrumentConfig;
pub use driver::{InstrumentationPass, PassReport};
pub use error::PassError;
