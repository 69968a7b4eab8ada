//! winget integration for listing and applying upgrades
//!
//! This module provides:
//! - The `PackageManager` seam the runner talks to
//! - Location of the winget executable inside the WindowsApps directory
//! - Execution of winget commands with per-command timeouts

use crate::error::WingetError;
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::process::Stdio;
use std::time::Duration;
use tokio::process::Command;
use tracing::{debug, warn};

/// Directory holding the App Installer package that ships winget
pub const WINDOWS_APPS_DIR: &str = r"C:\Program Files\WindowsApps";

const INSTALLER_PREFIX: &str = "Microsoft.DesktopAppInstaller";
const INSTALLER_SUFFIX: &str = "x64__8wekyb3d8bbwe";
const EXECUTABLE_NAME: &str = "winget.exe";

/// Trait for the package manager the runner drives
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Return the raw table printed by the upgrade-listing command
    async fn list_upgradable(&self) -> Result<String, WingetError>;

    /// Upgrade a single application by identifier
    async fn upgrade(&self, id: &str) -> Result<(), WingetError>;
}

/// Time limits for each winget invocation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Timeouts {
    /// `winget list` run to accept source agreements
    pub prime: Duration,
    /// `winget upgrade` listing
    pub list: Duration,
    /// `winget upgrade --id <id>`
    pub upgrade: Duration,
}

impl Default for Timeouts {
    fn default() -> Self {
        Self {
            prime: Duration::from_secs(15),
            list: Duration::from_secs(120),
            upgrade: Duration::from_secs(250),
        }
    }
}

/// Package manager backed by a real winget executable
#[derive(Debug, Clone)]
pub struct Winget {
    executable: PathBuf,
    timeouts: Timeouts,
}

impl Winget {
    /// Use the executable at `path`
    pub fn new(executable: impl Into<PathBuf>) -> Self {
        Self {
            executable: executable.into(),
            timeouts: Timeouts::default(),
        }
    }

    /// Find winget under `apps_dir` (normally [`WINDOWS_APPS_DIR`])
    pub fn locate(apps_dir: &Path) -> Result<Self, WingetError> {
        locate_winget(apps_dir).map(Self::new)
    }

    /// Override the default timeouts
    pub fn with_timeouts(mut self, timeouts: Timeouts) -> Self {
        self.timeouts = timeouts;
        self
    }

    pub fn executable(&self) -> &Path {
        &self.executable
    }

    /// Arguments that make winget accept source agreements up front, so the
    /// listing that follows prints a plain table
    fn prime_args() -> Vec<String> {
        to_args(&["list", "--accept-source-agreements", "-n", "1"])
    }

    fn list_args() -> Vec<String> {
        to_args(&["upgrade"])
    }

    fn upgrade_args(id: &str) -> Vec<String> {
        to_args(&[
            "upgrade",
            "--silent",
            "--id",
            id,
            "--accept-package-agreements",
            "--accept-source-agreements",
        ])
    }

    fn describe(&self, args: &[String]) -> String {
        format!("{} {}", self.executable.display(), args.join(" "))
    }

    /// Run winget and return its standard output
    async fn run(&self, args: &[String], timeout: Duration) -> Result<String, WingetError> {
        let command = self.describe(args);
        debug!(%command, timeout_secs = timeout.as_secs(), "running winget");

        let child = Command::new(&self.executable)
            .args(args)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true)
            .spawn()
            .map_err(|e| WingetError::from_spawn(&command, &self.executable, e))?;

        let output = tokio::time::timeout(timeout, child.wait_with_output())
            .await
            .map_err(|_| WingetError::timeout(&command, timeout))?
            .map_err(|source| WingetError::Io {
                command: command.clone(),
                source,
            })?;

        if !output.status.success() {
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            return Err(WingetError::non_zero_exit(
                &command,
                output.status.code().unwrap_or(-1),
                stderr,
            ));
        }

        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }
}

#[async_trait]
impl PackageManager for Winget {
    async fn list_upgradable(&self) -> Result<String, WingetError> {
        if let Err(e) = self.run(&Self::prime_args(), self.timeouts.prime).await {
            warn!(error = %e, "could not accept source agreements, listing anyway");
        }
        self.run(&Self::list_args(), self.timeouts.list).await
    }

    async fn upgrade(&self, id: &str) -> Result<(), WingetError> {
        self.run(&Self::upgrade_args(id), self.timeouts.upgrade)
            .await
            .map(|_| ())
    }
}

/// Locate `winget.exe` inside the App Installer package directory
///
/// When several App Installer versions are present the last by name wins.
pub fn locate_winget(apps_dir: &Path) -> Result<PathBuf, WingetError> {
    let entries = std::fs::read_dir(apps_dir).map_err(|e| match e.kind() {
        std::io::ErrorKind::PermissionDenied => WingetError::permission_denied(apps_dir),
        _ => WingetError::not_found(format!("cannot read {}: {}", apps_dir.display(), e)),
    })?;

    let mut candidates: Vec<String> = entries
        .filter_map(Result::ok)
        .map(|entry| entry.file_name().to_string_lossy().into_owned())
        .filter(|name| name.starts_with(INSTALLER_PREFIX) && name.ends_with(INSTALLER_SUFFIX))
        .collect();
    candidates.sort();

    let dir = candidates.pop().ok_or_else(|| {
        WingetError::not_found(format!(
            "no {}*{} directory in {}",
            INSTALLER_PREFIX,
            INSTALLER_SUFFIX,
            apps_dir.display()
        ))
    })?;

    Ok(apps_dir.join(dir).join(EXECUTABLE_NAME))
}

fn to_args(args: &[&str]) -> Vec<String> {
    args.iter().map(|a| a.to_string()).collect()
}
