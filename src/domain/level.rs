//! Upgrade level and the reason an application was selected

use crate::error::PolicyError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Which version-delta magnitudes qualify for automatic upgrade
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum UpgradeLevel {
    /// Everything winget lists, no version filtering
    All,
    /// Major, minor and patch bumps
    Major,
    /// Minor and patch bumps
    Minor,
    /// Patch bumps only
    #[default]
    Patch,
}

impl UpgradeLevel {
    pub fn as_str(&self) -> &'static str {
        match self {
            UpgradeLevel::All => "all",
            UpgradeLevel::Major => "major",
            UpgradeLevel::Minor => "minor",
            UpgradeLevel::Patch => "patch",
        }
    }
}

impl FromStr for UpgradeLevel {
    type Err = PolicyError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "all" => Ok(UpgradeLevel::All),
            "major" => Ok(UpgradeLevel::Major),
            "minor" => Ok(UpgradeLevel::Minor),
            "patch" => Ok(UpgradeLevel::Patch),
            _ => Err(PolicyError::invalid_level(s)),
        }
    }
}

impl fmt::Display for UpgradeLevel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why the classifier selected an application
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum UpgradeKind {
    /// Same major and minor, higher patch
    Patch,
    /// Same major, higher minor
    Minor,
    /// Higher major
    Major,
    /// Installed version reported as "Unknown"
    UnknownVersion,
    /// Identifier is on the allow-list
    AllowListed,
    /// Level `all` selects without looking at versions
    Unfiltered,
}

impl UpgradeKind {
    pub fn label(&self) -> &'static str {
        match self {
            UpgradeKind::Patch => "patch",
            UpgradeKind::Minor => "minor",
            UpgradeKind::Major => "major",
            UpgradeKind::UnknownVersion => "unknown",
            UpgradeKind::AllowListed => "allowed",
            UpgradeKind::Unfiltered => "all",
        }
    }
}

impl fmt::Display for UpgradeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}
