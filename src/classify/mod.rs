//! Upgrade classification for listed applications
//!
//! This module provides:
//! - Upgrade policy configuration (level, unknown versions, allow/block lists)
//! - The classifier that turns parsed table records into the ordered list
//!   of applications to upgrade
//!
//! Selection order is fixed: version categories (major, then minor, then
//! patch, as far as the level reaches), then unknown installed versions,
//! then allow-listed records. Blocked identifiers are removed last, so a
//! block always beats an allow.

mod policy;

pub use policy::{UpgradePolicy, DEFAULT_ALLOW_LIST, DEFAULT_BLOCK_LIST};

use crate::domain::{AppRecord, SemanticVersion, Selection, UpgradeKind, UpgradeLevel};
use std::collections::BTreeSet;

/// Installed version value winget prints when it cannot tell
const UNKNOWN_VERSION: &str = "unknown";

/// A record with whichever of its versions parsed as semver
struct Annotated<'a> {
    /// Row position in the parsed table
    row: usize,
    record: &'a AppRecord,
    current: Option<SemanticVersion>,
    available: Option<SemanticVersion>,
}

impl<'a> Annotated<'a> {
    fn new(row: usize, record: &'a AppRecord) -> Self {
        Self {
            row,
            record,
            current: SemanticVersion::parse(record.version()),
            available: SemanticVersion::parse(record.available()),
        }
    }

    fn uses_semver(&self) -> bool {
        self.current.is_some() || self.available.is_some()
    }

    fn delta(&self) -> Option<UpgradeKind> {
        match (&self.current, &self.available) {
            (Some(current), Some(available)) => version_delta(current, available),
            _ => None,
        }
    }

    fn has_unknown_version(&self) -> bool {
        self.record.version().eq_ignore_ascii_case(UNKNOWN_VERSION)
    }

    fn select(&self, kind: UpgradeKind) -> (usize, Selection) {
        (self.row, Selection::new(self.record.clone(), kind))
    }
}

/// Classify the step from `current` to `available`
///
/// Returns `None` when the available version is not higher in the component
/// that differs first, so equal versions never qualify.
pub fn version_delta(current: &SemanticVersion, available: &SemanticVersion) -> Option<UpgradeKind> {
    if current.major() == available.major()
        && current.minor() == available.minor()
        && current.patch() < available.patch()
    {
        Some(UpgradeKind::Patch)
    } else if current.major() == available.major() && current.minor() < available.minor() {
        Some(UpgradeKind::Minor)
    } else if current.major() < available.major() {
        Some(UpgradeKind::Major)
    } else {
        None
    }
}

/// Version categories a level selects, in output order
fn categories(level: UpgradeLevel) -> &'static [UpgradeKind] {
    match level {
        UpgradeLevel::All => &[],
        UpgradeLevel::Patch => &[UpgradeKind::Patch],
        UpgradeLevel::Minor => &[UpgradeKind::Minor, UpgradeKind::Patch],
        UpgradeLevel::Major => &[UpgradeKind::Major, UpgradeKind::Minor, UpgradeKind::Patch],
    }
}

/// Select the applications to upgrade, keeping the reason for each
pub fn classify_detailed(records: &[AppRecord], policy: &UpgradePolicy) -> Vec<Selection> {
    let annotated: Vec<Annotated<'_>> = records
        .iter()
        .enumerate()
        .map(|(row, record)| Annotated::new(row, record))
        .collect();

    let mut selected: Vec<(usize, Selection)> = if policy.level == UpgradeLevel::All {
        annotated
            .iter()
            .map(|a| a.select(UpgradeKind::Unfiltered))
            .collect()
    } else {
        let semver: Vec<&Annotated<'_>> = annotated.iter().filter(|a| a.uses_semver()).collect();

        let mut selected = Vec::new();
        for kind in categories(policy.level) {
            selected.extend(
                semver
                    .iter()
                    .filter(|a| a.delta() == Some(*kind))
                    .map(|a| a.select(*kind)),
            );
        }

        if policy.include_unknown_versions {
            selected.extend(
                semver
                    .iter()
                    .filter(|a| a.has_unknown_version())
                    .map(|a| a.select(UpgradeKind::UnknownVersion)),
            );
        }
        selected
    };

    selected.extend(
        annotated
            .iter()
            .filter(|a| policy.is_allowed(a.record.id()))
            .map(|a| a.select(UpgradeKind::AllowListed)),
    );

    selected.retain(|(_, s)| !policy.is_blocked(s.id()));
    dedup_rows(selected)
}

/// Select the applications to upgrade
///
/// Composable with the table parser as `classify(&parse(raw)?, &policy)`.
pub fn classify(records: &[AppRecord], policy: &UpgradePolicy) -> Vec<AppRecord> {
    classify_detailed(records, policy)
        .into_iter()
        .map(|s| s.record)
        .collect()
}

/// Keep the first selection of each table row
fn dedup_rows(selected: Vec<(usize, Selection)>) -> Vec<Selection> {
    let mut seen = BTreeSet::new();
    selected
        .into_iter()
        .filter(|(row, _)| seen.insert(*row))
        .map(|(_, selection)| selection)
        .collect()
}
