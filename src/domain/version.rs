//! Strict three-component semantic versions
//!
//! winget prints versions in whatever scheme the publisher uses ("2024.1",
//! "1.2.3.4", "< 5.0", "Unknown"). Only values that are exactly
//! `major.minor.patch` take part in level-based classification.

use regex::Regex;
use serde::{Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

// Anchored, ASCII digits only, no pre-release or build metadata
static SEMVER_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([0-9]+)\.([0-9]+)\.([0-9]+)$").unwrap());

/// A `major.minor.patch` version backed by [`semver::Version`]
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub struct SemanticVersion(semver::Version);

impl SemanticVersion {
    /// Creates a version from its components
    pub fn new(major: u64, minor: u64, patch: u64) -> Self {
        Self(semver::Version::new(major, minor, patch))
    }

    /// Parses a value that matches `^\d+\.\d+\.\d+$` exactly
    ///
    /// Returns `None` for anything else, including surrounding whitespace,
    /// suffixes, and components too large for a `u64`.
    pub fn parse(value: &str) -> Option<Self> {
        let caps = SEMVER_RE.captures(value)?;
        let major = caps[1].parse().ok()?;
        let minor = caps[2].parse().ok()?;
        let patch = caps[3].parse().ok()?;
        Some(Self::new(major, minor, patch))
    }

    pub fn major(&self) -> u64 {
        self.0.major
    }

    pub fn minor(&self) -> u64 {
        self.0.minor
    }

    pub fn patch(&self) -> u64 {
        self.0.patch
    }
}

impl fmt::Display for SemanticVersion {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl Serialize for SemanticVersion {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}
