//! Pass configuration.
//!
//! The target set is fixed at construction and immutable for the pass's
//! lifetime. Membership is exact string equality; no wildcards, no
//! demangling. The reserved entry-point name is a configuration field
//! rather than a hardcoded literal, since library-style units may use a
//! different convention.
use std::collections::HashSet;

use crate::error::PassError;

/// Conventional name of a standalone program's entry function.
pub const DEFAULT_ENTRY_NAME: &str = "main";

/// Immutable configuration of one instrumentation pass.
#[derive(Debug, Clone)]
pub struct InstrumentConfig {
    targets: HashSet<String>,
    entry_name: String,
}

impl InstrumentConfig {
    /// Build a configuration from an ordered list of target function names.
    /// Duplicates collapse; an empty list is a configuration error, since
    /// instrumentation without targets is meaningless.
    pub fn new<I, S>(targets: I) -> Result<Self, PassError>
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let targets: HashSet<String> = targets.into_iter().map(Into::into).collect();
        if targets.is_empty() {
            return Err(PassError::NoTargets);
        }
        Ok(Self {
            targets,
            entry_name: DEFAULT_ENTRY_NAME.to_string(),
        })
    }

    /// Override the reserved entry-point name.
    pub fn with_entry_name(mut self, name: impl Into<String>) -> Self {
        self.entry_name = name.into();
        self
    }

    /// Exact-match membership test against the target set.
    pub fn is_target(&self, name: &str) -> bool {
        self.targets.contains(name)
    }

    /// The configured entry-point name.
    pub fn entry_name(&self) -> &str {
        &self.entry_name
    }

    /// Iterate the configured target names (unordered).
    pub fn targets(&self) -> impl Iterator<Item = &str> {
        self.targets.iter().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_target_list_is_rejected() {
        let err = InstrumentConfig::new(Vec::<String>::new()).unwrap_err();
        assert_eq!(err, PassError::NoTargets);
    }

    #[test]
    fn duplicates_collapse() {
        let config = InstrumentConfig::new(["foo", "bar", "foo"]).unwrap();
        assert_eq!(config.targets().count(), 2);
        assert!(config.is_target("foo"));
        assert!(config.is_target("bar"));
        assert!(!config.is_target("baz"));
    }

    #[test]
    fn entry_name_defaults_and_overrides() {
        let config = InstrumentConfig::new(["foo"]).unwrap();
        assert_eq!(config.entry_name(), "main");
        let config = config.with_entry_name("module_start");
        assert_eq!(config.entry_name(), "module_start");
    }
}
