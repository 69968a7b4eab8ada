//! Text output formatter for human-readable display
//!
//! This module provides:
//! - One line per selected application with its version change
//! - Selection reason (major/minor/patch/unknown/allowed) and result
//! - Summary with upgraded/failed counts

use crate::domain::{RunReport, UpgradeKind, UpgradeOutcome, UpgradeStatus};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Minimum width of the identifier column
const MIN_ID_WIDTH: usize = 20;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
    /// Identifier column width used by `format_outcome`
    id_width: usize,
}

impl TextFormatter {
    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self {
            verbosity,
            color,
            id_width: MIN_ID_WIDTH,
        }
    }

    /// Formatter sharing this one's settings, aligned to the report's identifiers
    fn aligned_to(&self, report: &RunReport) -> Self {
        let id_width = report
            .outcomes
            .iter()
            .map(|o| o.selection.id().chars().count())
            .max()
            .unwrap_or(0)
            .max(MIN_ID_WIDTH);
        Self {
            verbosity: self.verbosity,
            color: self.color,
            id_width,
        }
    }

    /// Get the dry-run prefix if applicable
    fn dry_run_prefix(&self, dry_run: bool) -> String {
        if !dry_run {
            String::new()
        } else if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Get the selection reason label
    fn kind_label(&self, kind: UpgradeKind) -> String {
        let label = kind.label();
        if !self.color {
            return label.to_string();
        }
        match kind {
            UpgradeKind::Major => label.red().bold().to_string(),
            UpgradeKind::Minor => label.yellow().to_string(),
            UpgradeKind::Patch => label.green().to_string(),
            UpgradeKind::UnknownVersion => label.dimmed().to_string(),
            UpgradeKind::AllowListed => label.cyan().to_string(),
            UpgradeKind::Unfiltered => label.to_string(),
        }
    }

    /// Get the result marker for an outcome
    fn status_marker(&self, status: &UpgradeStatus) -> String {
        match (status, self.color) {
            (UpgradeStatus::Upgraded, true) => "✓".green().to_string(),
            (UpgradeStatus::Upgraded, false) => "ok".to_string(),
            (UpgradeStatus::Planned, true) => "(planned)".dimmed().to_string(),
            (UpgradeStatus::Planned, false) => "(planned)".to_string(),
            (UpgradeStatus::Failed(reason), true) => {
                format!("{} {}", "✗".red(), reason.red())
            }
            (UpgradeStatus::Failed(reason), false) => format!("failed: {}", reason),
        }
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        // In quiet mode, only show summary
        if self.verbosity == Verbosity::Quiet {
            return self.format_summary(report, writer);
        }

        if !report.outcomes.is_empty() {
            let prefix = self.dry_run_prefix(report.dry_run);
            if self.color {
                writeln!(
                    writer,
                    "{}{} {}",
                    prefix,
                    "Upgrades".bold(),
                    format!("(level: {})", report.level).dimmed()
                )?;
            } else {
                writeln!(writer, "{}Upgrades (level: {})", prefix, report.level)?;
            }

            let aligned = self.aligned_to(report);
            for outcome in &report.outcomes {
                aligned.format_outcome(outcome, writer)?;
            }
            writeln!(writer)?;
        }

        self.format_summary(report, writer)
    }

    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()> {
        let prefix = self.dry_run_prefix(report.dry_run);
        let done = if report.dry_run {
            report.planned_count()
        } else {
            report.upgraded_count()
        };
        let verb = if report.dry_run { "planned" } else { "upgraded" };
        let failed = report.failed_count();

        if self.verbosity == Verbosity::Quiet {
            if report.outcomes.is_empty() {
                if self.color {
                    writeln!(writer, "{}{}", prefix, "Nothing to upgrade".dimmed())?;
                } else {
                    writeln!(writer, "{}Nothing to upgrade", prefix)?;
                }
            } else if self.color {
                write!(writer, "{}{} {}", prefix, done.to_string().green(), verb)?;
                if failed > 0 {
                    write!(writer, ", {} failed", failed.to_string().red())?;
                }
                writeln!(writer)?;
            } else {
                write!(writer, "{}{} {}", prefix, done, verb)?;
                if failed > 0 {
                    write!(writer, ", {} failed", failed)?;
                }
                writeln!(writer)?;
            }
            return Ok(());
        }

        if self.color {
            writeln!(writer, "{}{}:", prefix, "Summary".bold())?;
        } else {
            writeln!(writer, "{}Summary:", prefix)?;
        }

        if report.outcomes.is_empty() {
            if self.color {
                writeln!(writer, "  {}", "Nothing to upgrade".dimmed())?;
            } else {
                writeln!(writer, "  Nothing to upgrade")?;
            }
        } else if self.color {
            writeln!(
                writer,
                "  {} application(s) {}",
                done.to_string().green(),
                verb
            )?;
            if failed > 0 {
                writeln!(writer, "  {} application(s) failed", failed.to_string().red())?;
            }
        } else {
            writeln!(writer, "  {} application(s) {}", done, verb)?;
            if failed > 0 {
                writeln!(writer, "  {} application(s) failed", failed)?;
            }
        }

        if self.verbosity == Verbosity::Verbose {
            let elapsed = report
                .finished_at
                .map(|end| (end - report.started_at).num_milliseconds() as f64 / 1000.0);
            let line = match elapsed {
                Some(secs) => format!(
                    "  {} listed, {} selected in {:.1}s",
                    report.listed,
                    report.outcomes.len(),
                    secs
                ),
                None => format!(
                    "  {} listed, {} selected",
                    report.listed,
                    report.outcomes.len()
                ),
            };
            if self.color {
                writeln!(writer, "{}", line.dimmed())?;
            } else {
                writeln!(writer, "{}", line)?;
            }
        }

        Ok(())
    }

    fn format_outcome(
        &self,
        outcome: &UpgradeOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        let record = &outcome.selection.record;
        let kind = self.kind_label(outcome.selection.kind);
        let marker = self.status_marker(&outcome.status);

        if self.color {
            let id_display = format!("{:width$}", record.id(), width = self.id_width);
            writeln!(
                writer,
                "  {} {} {} {} [{}] {}",
                id_display,
                record.version().dimmed(),
                "→".dimmed(),
                record.available().bright_white().bold(),
                kind,
                marker
            )
        } else {
            writeln!(
                writer,
                "  {:width$} {} -> {} [{}] {}",
                record.id(),
                record.version(),
                record.available(),
                kind,
                marker,
                width = self.id_width
            )
        }
    }
}
