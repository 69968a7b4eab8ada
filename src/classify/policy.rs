//! Upgrade policy configuration
//!
//! This module provides the UpgradePolicy struct that encapsulates
//! all options the classifier needs to select applications.

use crate::domain::UpgradeLevel;
use std::collections::BTreeSet;

/// Identifiers upgraded whenever winget lists them
pub const DEFAULT_ALLOW_LIST: &[&str] = &["Python.Python.3"];

/// Identifiers never upgraded automatically
pub const DEFAULT_BLOCK_LIST: &[&str] = &[
    "EvanCzaplicki.Elm",
    "VMware.WorkstationPro",
    "CoreyButler.NVMforWindows",
];

/// Policy deciding which listed applications get upgraded
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct UpgradePolicy {
    /// Version-delta magnitudes that qualify
    pub level: UpgradeLevel,
    /// Also upgrade applications whose installed version is "Unknown"
    pub include_unknown_versions: bool,
    /// Identifiers always included when listed
    pub allow_list: BTreeSet<String>,
    /// Identifiers always excluded, even when allow-listed
    pub block_list: BTreeSet<String>,
}

impl UpgradePolicy {
    /// Create a policy with the default level and empty lists
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a policy with the built-in allow and block lists
    pub fn builtin() -> Self {
        Self::new()
            .with_allow_list(DEFAULT_ALLOW_LIST.iter().copied())
            .with_block_list(DEFAULT_BLOCK_LIST.iter().copied())
    }

    /// Set the upgrade level
    pub fn with_level(mut self, level: UpgradeLevel) -> Self {
        self.level = level;
        self
    }

    /// Set whether unknown installed versions are upgraded
    pub fn with_unknown_versions(mut self, include: bool) -> Self {
        self.include_unknown_versions = include;
        self
    }

    /// Replace the allow-list
    pub fn with_allow_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.allow_list = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Replace the block-list
    pub fn with_block_list<I, S>(mut self, ids: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.block_list = ids.into_iter().map(Into::into).collect();
        self
    }

    /// Check if an identifier is force-included
    pub fn is_allowed(&self, id: &str) -> bool {
        self.allow_list.contains(id)
    }

    /// Check if an identifier is force-excluded
    pub fn is_blocked(&self, id: &str) -> bool {
        self.block_list.contains(id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_policy() {
        let policy = UpgradePolicy::new();
        assert_eq!(policy.level, UpgradeLevel::Patch);
        assert!(!policy.include_unknown_versions);
        assert!(policy.allow_list.is_empty());
        assert!(policy.block_list.is_empty());
    }

    #[test]
    fn test_builtin_lists() {
        let policy = UpgradePolicy::builtin();
        assert!(policy.is_allowed("Python.Python.3"));
        assert!(policy.is_blocked("VMware.WorkstationPro"));
        assert!(policy.is_blocked("EvanCzaplicki.Elm"));
        assert!(policy.is_blocked("CoreyButler.NVMforWindows"));
        assert!(!policy.is_blocked("Python.Python.3"));
    }

    #[test]
    fn test_chained_builders() {
        let policy = UpgradePolicy::new()
            .with_level(UpgradeLevel::Major)
            .with_unknown_versions(true)
            .with_allow_list(["A.A"])
            .with_block_list(vec!["B.B".to_string()]);

        assert_eq!(policy.level, UpgradeLevel::Major);
        assert!(policy.include_unknown_versions);
        assert!(policy.is_allowed("A.A"));
        assert!(policy.is_blocked("B.B"));
        assert!(!policy.is_allowed("B.B"));
    }

    #[test]
    fn test_lists_are_replaced_not_merged() {
        let policy = UpgradePolicy::builtin().with_block_list(["Only.This"]);
        assert!(policy.is_blocked("Only.This"));
        assert!(!policy.is_blocked("VMware.WorkstationPro"));
        assert!(policy.is_allowed("Python.Python.3"));
    }

    #[test]
    fn test_identifiers_are_case_sensitive() {
        let policy = UpgradePolicy::new().with_block_list(["Foo.Bar"]);
        assert!(!policy.is_blocked("foo.bar"));
    }
}
