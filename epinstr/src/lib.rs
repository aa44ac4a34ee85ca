//! In-memory instruction IR for the entryprobe instrumentation toolchain.
//!
//! The crate models one compilation unit ([`modules::Module`]) as an ordered
//! collection of defined functions and external declarations. Functions own
//! basic blocks; blocks own instructions and end in a control-flow
//! terminator. The representation is deliberately mutable in place: the
//! instrumentation pass in `eppass` rewrites units by inserting call
//! instructions and external declarations, never by rebuilding them.

pub mod consts;
pub mod modules;
pub mod types;
pub mod utils;
