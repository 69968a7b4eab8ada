//! Selection and run result types
//!
//! Provides structures for tracking what was selected and what happened to
//! each selected application during a run.

use super::{AppRecord, UpgradeKind, UpgradeLevel};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

/// A record chosen by the classifier, with the reason it was chosen
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Selection {
    /// The parsed table row
    pub record: AppRecord,
    /// Why it was selected
    pub kind: UpgradeKind,
}

impl Selection {
    pub fn new(record: AppRecord, kind: UpgradeKind) -> Self {
        Self { record, kind }
    }

    /// Package identifier of the selected record
    pub fn id(&self) -> &str {
        self.record.id()
    }
}

/// What happened to one selected application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", content = "reason", rename_all = "snake_case")]
pub enum UpgradeStatus {
    /// winget reported success
    Upgraded,
    /// Dry run, nothing invoked
    Planned,
    /// winget failed for this application
    Failed(String),
}

impl fmt::Display for UpgradeStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UpgradeStatus::Upgraded => write!(f, "upgraded"),
            UpgradeStatus::Planned => write!(f, "planned"),
            UpgradeStatus::Failed(reason) => write!(f, "failed: {}", reason),
        }
    }
}

/// Result for a single application
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UpgradeOutcome {
    #[serde(flatten)]
    pub selection: Selection,
    #[serde(flatten)]
    pub status: UpgradeStatus,
}

impl UpgradeOutcome {
    pub fn new(selection: Selection, status: UpgradeStatus) -> Self {
        Self { selection, status }
    }

    pub fn is_failure(&self) -> bool {
        matches!(self.status, UpgradeStatus::Failed(_))
    }
}

/// Overall result of one run
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RunReport {
    /// When the run started
    pub started_at: DateTime<Utc>,
    /// When the last upgrade finished
    pub finished_at: Option<DateTime<Utc>>,
    /// Whether upgrades were only planned
    pub dry_run: bool,
    /// Level the policy used
    pub level: UpgradeLevel,
    /// Number of applications winget listed
    pub listed: usize,
    /// One entry per selected application, in upgrade order
    pub outcomes: Vec<UpgradeOutcome>,
}

impl RunReport {
    /// Creates a report stamped with the current time
    pub fn new(level: UpgradeLevel, dry_run: bool) -> Self {
        Self {
            started_at: Utc::now(),
            finished_at: None,
            dry_run,
            level,
            listed: 0,
            outcomes: Vec::new(),
        }
    }

    pub fn add_outcome(&mut self, outcome: UpgradeOutcome) {
        self.outcomes.push(outcome);
    }

    /// Stamps the finish time
    pub fn finish(&mut self) {
        self.finished_at = Some(Utc::now());
    }

    pub fn upgraded_count(&self) -> usize {
        self.count(|s| matches!(s, UpgradeStatus::Upgraded))
    }

    pub fn planned_count(&self) -> usize {
        self.count(|s| matches!(s, UpgradeStatus::Planned))
    }

    pub fn failed_count(&self) -> usize {
        self.count(|s| matches!(s, UpgradeStatus::Failed(_)))
    }

    /// Returns true if any upgrade failed
    pub fn has_failures(&self) -> bool {
        self.outcomes.iter().any(UpgradeOutcome::is_failure)
    }

    /// Returns failed outcomes
    pub fn failures(&self) -> impl Iterator<Item = &UpgradeOutcome> {
        self.outcomes.iter().filter(|o| o.is_failure())
    }

    fn count(&self, pred: impl Fn(&UpgradeStatus) -> bool) -> usize {
        self.outcomes.iter().filter(|o| pred(&o.status)).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_selection(id: &str, kind: UpgradeKind) -> Selection {
        Selection::new(
            AppRecord::from_pairs([
                ("Name", "Sample"),
                ("Id", id),
                ("Version", "1.0.0"),
                ("Available", "1.0.1"),
            ]),
            kind,
        )
    }

    #[test]
    fn test_report_new() {
        let report = RunReport::new(UpgradeLevel::Minor, true);
        assert!(report.dry_run);
        assert_eq!(report.level, UpgradeLevel::Minor);
        assert!(report.outcomes.is_empty());
        assert!(report.finished_at.is_none());
        assert!(!report.has_failures());
    }

    #[test]
    fn test_report_counts() {
        let mut report = RunReport::new(UpgradeLevel::Patch, false);
        report.add_outcome(UpgradeOutcome::new(
            sample_selection("A.A", UpgradeKind::Patch),
            UpgradeStatus::Upgraded,
        ));
        report.add_outcome(UpgradeOutcome::new(
            sample_selection("B.B", UpgradeKind::AllowListed),
            UpgradeStatus::Failed("exit 1".to_string()),
        ));
        report.add_outcome(UpgradeOutcome::new(
            sample_selection("C.C", UpgradeKind::Patch),
            UpgradeStatus::Planned,
        ));

        assert_eq!(report.upgraded_count(), 1);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.planned_count(), 1);
        assert!(report.has_failures());
        assert_eq!(report.failures().next().unwrap().selection.id(), "B.B");
    }

    #[test]
    fn test_report_finish() {
        let mut report = RunReport::new(UpgradeLevel::Patch, false);
        report.finish();
        assert!(report.finished_at.unwrap() >= report.started_at);
    }

    #[test]
    fn test_outcome_serialization() {
        let outcome = UpgradeOutcome::new(
            sample_selection("A.A", UpgradeKind::Patch),
            UpgradeStatus::Failed("timed out".to_string()),
        );
        let json = serde_json::to_value(&outcome).unwrap();
        assert_eq!(json["record"]["Id"], "A.A");
        assert_eq!(json["kind"], "patch");
        assert_eq!(json["status"], "failed");
        assert_eq!(json["reason"], "timed out");
    }

    #[test]
    fn test_status_display() {
        assert_eq!(UpgradeStatus::Upgraded.to_string(), "upgraded");
        assert_eq!(UpgradeStatus::Planned.to_string(), "planned");
        assert_eq!(
            UpgradeStatus::Failed("boom".to_string()).to_string(),
            "failed: boom"
        );
    }
}
