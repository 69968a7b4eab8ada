//! CLI argument parsing module for wingup
//!
//! Every option can also come from the environment, which is how the tool
//! is usually configured when run as a scheduled task.

use crate::classify::UpgradePolicy;
use crate::config;
use crate::error::PolicyError;
use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Parse a boolean switch the way the environment variables are documented:
/// only `true` (any case) is true
fn parse_env_bool(s: &str) -> Result<bool, String> {
    Ok(s.trim().eq_ignore_ascii_case("true"))
}

/// Policy-driven winget auto-updater
#[derive(Parser, Debug, Clone)]
#[command(name = "wingup", version, about = "Policy-driven winget auto-updater")]
pub struct CliArgs {
    /// Debug logging; list what would be upgraded without upgrading
    #[arg(
        long,
        env = "WINGET_DEBUG",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_env_bool,
        action = ArgAction::Set
    )]
    pub debug: bool,

    /// Upgrade level: all, major, minor or patch
    #[arg(long, env = "WINGET_UPGRADE_LEVEL", default_value = "patch")]
    pub level: String,

    /// Also upgrade applications whose installed version is unknown
    #[arg(
        long,
        env = "WINGET_UPGRADE_UNKNOWN_VERSIONS",
        default_value = "false",
        num_args = 0..=1,
        default_missing_value = "true",
        value_parser = parse_env_bool,
        action = ArgAction::Set
    )]
    pub upgrade_unknown: bool,

    /// Path to winget.exe (default: search the WindowsApps directory)
    #[arg(long, env = "WINGET_PATH")]
    pub winget: Option<PathBuf>,

    /// TOML file with `allow` and `block` identifier lists
    #[arg(long, env = "WINGET_POLICY_FILE")]
    pub policy: Option<PathBuf>,

    /// Output the run report in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long)]
    pub quiet: bool,

    /// Never use ANSI colors in the text report
    #[arg(long)]
    pub no_color: bool,
}

impl CliArgs {
    /// Build the upgrade policy from the arguments
    pub fn policy(&self) -> Result<UpgradePolicy, PolicyError> {
        config::build_policy(&self.level, self.upgrade_unknown, self.policy.as_deref())
    }

    /// Whether upgrades are only listed
    pub fn dry_run(&self) -> bool {
        self.debug
    }

    /// Whether to draw spinners and bars
    pub fn show_progress(&self) -> bool {
        !self.quiet && !self.debug
    }

    /// Whether the text report may use colors on a stdout that is `is_terminal`
    pub fn color(&self, is_terminal: bool) -> bool {
        !self.no_color && is_terminal
    }
}
