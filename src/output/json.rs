//! JSON output formatter for machine processing
//!
//! This module provides:
//! - JSON serialization of the run report
//! - Per-application records with selection reason and result

use crate::domain::{RunReport, UpgradeLevel, UpgradeOutcome};
use crate::output::{OutputFormatter, Verbosity};
use chrono::{DateTime, Utc};
use serde::Serialize;
use std::io::Write;

/// JSON formatter for machine-readable output
pub struct JsonFormatter {
    /// Quiet mode drops the per-application list
    verbosity: Verbosity,
}

impl JsonFormatter {
    /// Create a new JSON formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self { verbosity }
    }
}

/// JSON representation of the full report
#[derive(Serialize)]
struct JsonOutput<'a> {
    /// Whether this was a dry-run
    dry_run: bool,
    /// Level the policy used
    level: UpgradeLevel,
    /// Run start time
    started_at: DateTime<Utc>,
    /// Run end time
    #[serde(skip_serializing_if = "Option::is_none")]
    finished_at: Option<DateTime<Utc>>,
    /// Summary statistics
    summary: JsonSummary,
    /// Per-application results
    #[serde(skip_serializing_if = "Option::is_none")]
    outcomes: Option<&'a [UpgradeOutcome]>,
}

/// JSON representation of summary statistics
#[derive(Serialize)]
struct JsonSummary {
    /// Applications winget listed
    listed: usize,
    /// Applications the policy selected
    selected: usize,
    upgraded: usize,
    planned: usize,
    failed: usize,
}

impl JsonSummary {
    fn from_report(report: &RunReport) -> Self {
        Self {
            listed: report.listed,
            selected: report.outcomes.len(),
            upgraded: report.upgraded_count(),
            planned: report.planned_count(),
            failed: report.failed_count(),
        }
    }
}

fn write_json<T: Serialize>(value: &T, writer: &mut dyn Write) -> std::io::Result<()> {
    let json = serde_json::to_string_pretty(value).map_err(std::io::Error::other)?;
    writeln!(writer, "{}", json)
}

impl OutputFormatter for JsonFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let outcomes = if self.verbosity == Verbosity::Quiet {
            None
        } else {
            Some(report.outcomes.as_slice())
        };

        let output = JsonOutput {
            dry_run: report.dry_run,
            level: report.level,
            started_at: report.started_at,
            finished_at: report.finished_at,
            summary: JsonSummary::from_report(report),
            outcomes,
        };

        write_json(&output, writer)
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        write_json(&JsonSummary::from_report(report), writer)
    }

    fn format_outcome(
        &self,
        outcome: &UpgradeOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        write_json(outcome, writer)
    }
}
