use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PassError {
    /// The configuration carried no target function names.
    #[error(
        "no target functions were configured; instrumentation requires at least one function name"
    )]
    NoTargets,

    /// A symbol required by the instrumentation runtime already exists in
    /// the unit with a different signature. Proceeding would produce a unit
    /// that cannot link against the logging runtime.
    #[error(
        "unit `{unit}`: symbol `{name}` already exists with signature `{found}`, but the instrumentation runtime requires `{expected}`"
    )]
    SignatureConflict {
        unit: String,
        name: String,
        expected: String,
        found: String,
    },

    /// The unit violates a structural invariant of the IR.
    #[error("malformed unit: {0}")]
    Malformed(#[from] epinstr::utils::Error),
}
