//! Output formatting for run reports
//!
//! This module provides:
//! - Text output for human-readable display
//! - JSON output for machine processing

mod json;
mod text;

pub use json::JsonFormatter;
pub use text::TextFormatter;

use crate::domain::{RunReport, UpgradeOutcome};
use std::io::Write;

/// Output format options
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum OutputFormat {
    /// Human-readable text output
    #[default]
    Text,
    /// JSON output for machine processing
    Json,
}

/// Output verbosity level
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Verbosity {
    /// Summary line only
    Quiet,
    /// One line per selected application plus a summary
    #[default]
    Normal,
    /// Adds listing counts and timing
    Verbose,
}

/// Configuration for output formatting
#[derive(Debug, Clone)]
pub struct OutputConfig {
    /// Output format (text, json)
    pub format: OutputFormat,
    /// Verbosity level
    pub verbosity: Verbosity,
    /// Whether to use colors (when supported)
    pub color: bool,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            format: OutputFormat::default(),
            verbosity: Verbosity::default(),
            color: true,
        }
    }
}

impl OutputConfig {
    /// Create a new output configuration
    pub fn new(format: OutputFormat, verbosity: Verbosity) -> Self {
        Self {
            format,
            verbosity,
            color: true,
        }
    }

    /// Create configuration from CLI arguments
    ///
    /// Debug mode is reported verbosely; quiet wins over debug.
    pub fn from_cli(json: bool, quiet: bool, debug: bool) -> Self {
        let format = if json {
            OutputFormat::Json
        } else {
            OutputFormat::Text
        };

        let verbosity = if quiet {
            Verbosity::Quiet
        } else if debug {
            Verbosity::Verbose
        } else {
            Verbosity::Normal
        };

        Self::new(format, verbosity)
    }

    /// Set whether the text report uses ANSI colors
    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }
}

/// Trait for output formatters
pub trait OutputFormatter {
    /// Format and write the whole run report
    fn format(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write just the summary
    fn format_summary(&self, report: &RunReport, writer: &mut dyn Write) -> std::io::Result<()>;

    /// Format and write a single application outcome
    fn format_outcome(
        &self,
        outcome: &UpgradeOutcome,
        writer: &mut dyn Write,
    ) -> std::io::Result<()>;
}

/// Create an output formatter based on configuration
pub fn create_formatter(config: OutputConfig) -> Box<dyn OutputFormatter> {
    match config.format {
        OutputFormat::Text => Box::new(TextFormatter::with_color(config.verbosity, config.color)),
        OutputFormat::Json => Box::new(JsonFormatter::new(config.verbosity)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_output_format_default() {
        assert_eq!(OutputFormat::default(), OutputFormat::Text);
    }

    #[test]
    fn test_verbosity_default() {
        assert_eq!(Verbosity::default(), Verbosity::Normal);
    }

    #[test]
    fn test_output_config_default() {
        let config = OutputConfig::default();
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Normal);
        assert!(config.color);
    }

    #[test]
    fn test_output_config_from_cli_json() {
        let config = OutputConfig::from_cli(true, false, false);
        assert_eq!(config.format, OutputFormat::Json);
        assert_eq!(config.verbosity, Verbosity::Normal);
    }

    #[test]
    fn test_output_config_from_cli_debug() {
        let config = OutputConfig::from_cli(false, false, true);
        assert_eq!(config.format, OutputFormat::Text);
        assert_eq!(config.verbosity, Verbosity::Verbose);
    }

    #[test]
    fn test_output_config_quiet_wins() {
        let config = OutputConfig::from_cli(false, true, true);
        assert_eq!(config.verbosity, Verbosity::Quiet);
    }

    #[test]
    fn test_output_config_without_color() {
        let config = OutputConfig::from_cli(false, false, false).with_color(false);
        assert!(!config.color);
    }

    #[test]
    fn test_plain_text_has_no_escapes() {
        use crate::domain::{
            AppRecord, Selection, UpgradeKind, UpgradeLevel, UpgradeOutcome, UpgradeStatus,
        };

        let mut report = RunReport::new(UpgradeLevel::Patch, false);
        report.add_outcome(UpgradeOutcome::new(
            Selection::new(
                AppRecord::from_pairs([
                    ("Id", "Foo.Foo"),
                    ("Version", "1.0.0"),
                    ("Available", "1.0.1"),
                ]),
                UpgradeKind::Patch,
            ),
            UpgradeStatus::Upgraded,
        ));

        let config = OutputConfig::from_cli(false, false, false).with_color(false);
        let formatter = create_formatter(config);
        let mut output = Vec::new();
        formatter.format(&report, &mut output).unwrap();
        let text = String::from_utf8(output).unwrap();
        assert!(text.contains("Foo.Foo"));
        assert!(!text.contains('\u{1b}'));
    }

    #[test]
    fn test_create_formatter_writes() {
        use crate::domain::UpgradeLevel;

        let report = RunReport::new(UpgradeLevel::Patch, false);
        for format in [OutputFormat::Text, OutputFormat::Json] {
            let mut config = OutputConfig::new(format, Verbosity::Normal);
            config.color = false;
            let formatter = create_formatter(config);
            let mut output = Vec::new();
            formatter.format(&report, &mut output).unwrap();
            assert!(!output.is_empty());
        }
    }
}
