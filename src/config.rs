//! Policy configuration
//!
//! Builds the [`UpgradePolicy`] from the level string, the unknown-versions
//! switch, and an optional TOML policy file:
//!
//! ```toml
//! allow = ["Python.Python.3"]
//! block = ["VMware.WorkstationPro"]
//! ```
//!
//! A key missing from the file keeps the built-in list for that side.

use crate::classify::UpgradePolicy;
use crate::domain::UpgradeLevel;
use crate::error::PolicyError;
use serde::Deserialize;
use std::path::Path;

/// Contents of a policy file
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PolicyFile {
    /// Replacement allow-list
    pub allow: Option<Vec<String>>,
    /// Replacement block-list
    pub block: Option<Vec<String>>,
}

impl PolicyFile {
    /// Parse policy file contents
    pub fn from_toml(path: &Path, content: &str) -> Result<Self, PolicyError> {
        toml::from_str(content).map_err(|e| PolicyError::parse_file(path, e.to_string()))
    }

    /// Read and parse a policy file
    pub fn load(path: &Path) -> Result<Self, PolicyError> {
        let content =
            std::fs::read_to_string(path).map_err(|e| PolicyError::read_file(path, e))?;
        Self::from_toml(path, &content)
    }

    /// Overlay the lists present in this file onto `policy`
    pub fn apply(self, mut policy: UpgradePolicy) -> UpgradePolicy {
        if let Some(allow) = self.allow {
            policy = policy.with_allow_list(allow);
        }
        if let Some(block) = self.block {
            policy = policy.with_block_list(block);
        }
        policy
    }
}

/// Build the run's policy
///
/// An unrecognized level is an error rather than an empty selection.
pub fn build_policy(
    level: &str,
    include_unknown_versions: bool,
    policy_file: Option<&Path>,
) -> Result<UpgradePolicy, PolicyError> {
    let level: UpgradeLevel = level.parse()?;
    let policy = UpgradePolicy::builtin()
        .with_level(level)
        .with_unknown_versions(include_unknown_versions);

    match policy_file {
        Some(path) => Ok(PolicyFile::load(path)?.apply(policy)),
        None => Ok(policy),
    }
}
