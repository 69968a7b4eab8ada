//! Upgrade runner coordinating the whole workflow
//!
//! This module provides:
//! - Workflow coordination: list → parse → classify → upgrade
//! - Dry-run mode that only reports what would be upgraded
//! - Sequential upgrades where one failure never stops the rest

use crate::classify::{classify_detailed, UpgradePolicy};
use crate::domain::{RunReport, UpgradeOutcome, UpgradeStatus};
use crate::error::AppError;
use crate::progress::UpgradeProgress;
use crate::table;
use crate::winget::PackageManager;
use tracing::{debug, error, info};

/// Runner for one upgrade pass
pub struct Upgrader<P: PackageManager> {
    /// Package manager to list and upgrade with
    manager: P,
    /// Selection policy
    policy: UpgradePolicy,
    /// Only report what would be upgraded
    dry_run: bool,
    /// Draw progress on stderr
    show_progress: bool,
}

impl<P: PackageManager> Upgrader<P> {
    /// Create a runner that upgrades for real, without progress display
    pub fn new(manager: P, policy: UpgradePolicy) -> Self {
        Self {
            manager,
            policy,
            dry_run: false,
            show_progress: false,
        }
    }

    /// Set dry-run mode
    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    /// Set whether progress is displayed
    pub fn with_progress(mut self, show_progress: bool) -> Self {
        self.show_progress = show_progress;
        self
    }

    /// Run the upgrade workflow
    ///
    /// Listing and parsing failures abort the run. Upgrade failures are
    /// recorded in the report and the remaining applications still run.
    pub async fn run(&self) -> Result<RunReport, AppError> {
        let mut progress = UpgradeProgress::new(self.show_progress);
        let mut report = RunReport::new(self.policy.level, self.dry_run);

        debug!("listing applications with upgrades available");
        progress.listing();
        let listed = self.manager.list_upgradable().await;
        progress.clear();
        let raw = listed?;

        debug!("parsing upgrade table");
        let records = table::parse(&raw)?;
        report.listed = records.len();

        debug!(
            level = %self.policy.level,
            include_unknown_versions = self.policy.include_unknown_versions,
            allow = self.policy.allow_list.len(),
            block = self.policy.block_list.len(),
            "selecting applications to upgrade"
        );
        let selections = classify_detailed(&records, &self.policy);
        info!(
            listed = records.len(),
            selected = selections.len(),
            "classified available upgrades"
        );

        if self.dry_run {
            debug!("applications that would have been upgraded:");
            for selection in selections {
                match serde_json::to_string_pretty(&selection.record) {
                    Ok(json) => debug!(kind = %selection.kind, "{}", json),
                    Err(e) => debug!(id = selection.id(), error = %e, "could not render record"),
                }
                report.add_outcome(UpgradeOutcome::new(selection, UpgradeStatus::Planned));
            }
            report.finish();
            return Ok(report);
        }

        progress.upgrading(selections.len());
        for selection in selections {
            let id = selection.id().to_string();
            progress.installing(&id);
            info!(kind = %selection.kind, "upgrading {}", selection.record);

            let status = match self.manager.upgrade(&id).await {
                Ok(()) => {
                    info!(id = %id, "upgrade finished");
                    UpgradeStatus::Upgraded
                }
                Err(e) => {
                    error!(id = %id, error = %e, "upgrade failed");
                    UpgradeStatus::Failed(e.to_string())
                }
            };
            report.add_outcome(UpgradeOutcome::new(selection, status));
            progress.handled();
        }
        progress.clear();

        report.finish();
        Ok(report)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UpgradeLevel;
    use crate::error::{TableError, WingetError};
    use async_trait::async_trait;
    use std::sync::Mutex;
    use std::time::Duration;

    const TABLE: &str = concat!(
        "Name          Id            Version  Available Source\r\n",
        "-----------------------------------------------------\r\n",
        "Patchy        Patch.App     1.2.3    1.2.4     winget\r\n",
        "Minorly       Minor.App     1.2.3    1.3.0     winget\r\n",
        "Broken        Broken.App    2.0.0    2.0.1     winget\r\n",
        "Vim           Vim.Vim       9.0.1    10.0.0    winget\r\n",
        "4 upgrades available.\r\n",
        "",
    );

    /// Mock package manager for testing
    struct MockPackageManager {
        table: Result<String, ()>,
        failing: Vec<&'static str>,
        calls: Mutex<Vec<String>>,
    }

    impl MockPackageManager {
        fn new(table: &str) -> Self {
            Self {
                table: Ok(table.to_string()),
                failing: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn unavailable() -> Self {
            Self {
                table: Err(()),
                failing: Vec::new(),
                calls: Mutex::new(Vec::new()),
            }
        }

        fn failing(mut self, ids: &[&'static str]) -> Self {
            self.failing = ids.to_vec();
            self
        }

        fn calls(&self) -> Vec<String> {
            self.calls.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl PackageManager for MockPackageManager {
        async fn list_upgradable(&self) -> Result<String, WingetError> {
            self.table
                .clone()
                .map_err(|_| WingetError::timeout("winget upgrade", Duration::from_secs(120)))
        }

        async fn upgrade(&self, id: &str) -> Result<(), WingetError> {
            self.calls.lock().unwrap().push(id.to_string());
            if self.failing.contains(&id) {
                Err(WingetError::non_zero_exit("winget upgrade", 1, "installer failed"))
            } else {
                Ok(())
            }
        }
    }

    fn policy(level: UpgradeLevel) -> UpgradePolicy {
        UpgradePolicy::new().with_level(level)
    }

    #[tokio::test]
    async fn test_run_upgrades_selected_in_order() {
        let upgrader = Upgrader::new(MockPackageManager::new(TABLE), policy(UpgradeLevel::Minor));
        let report = upgrader.run().await.unwrap();

        assert_eq!(upgrader.manager.calls(), vec!["Minor.App", "Patch.App", "Broken.App"]);
        assert_eq!(report.listed, 4);
        assert_eq!(report.upgraded_count(), 3);
        assert!(!report.has_failures());
        assert!(report.finished_at.is_some());
    }

    #[tokio::test]
    async fn test_run_continues_after_failure() {
        let manager = MockPackageManager::new(TABLE).failing(&["Patch.App"]);
        let upgrader = Upgrader::new(manager, policy(UpgradeLevel::Patch));
        let report = upgrader.run().await.unwrap();

        assert_eq!(upgrader.manager.calls(), vec!["Patch.App", "Broken.App"]);
        assert_eq!(report.failed_count(), 1);
        assert_eq!(report.upgraded_count(), 1);
        let failure = report.failures().next().unwrap();
        assert_eq!(failure.selection.id(), "Patch.App");
        assert!(matches!(&failure.status, UpgradeStatus::Failed(msg) if msg.contains("installer failed")));
    }

    #[tokio::test]
    async fn test_dry_run_never_upgrades() {
        let upgrader = Upgrader::new(MockPackageManager::new(TABLE), policy(UpgradeLevel::Major))
            .with_dry_run(true);
        let report = upgrader.run().await.unwrap();

        assert!(upgrader.manager.calls().is_empty());
        assert!(report.dry_run);
        assert_eq!(report.planned_count(), 4);
    }

    #[tokio::test]
    async fn test_block_list_applies_to_run() {
        let upgrader = Upgrader::new(
            MockPackageManager::new(TABLE),
            policy(UpgradeLevel::All).with_block_list(["Broken.App"]),
        );
        upgrader.run().await.unwrap();
        assert_eq!(
            upgrader.manager.calls(),
            vec!["Patch.App", "Minor.App", "Vim.Vim"]
        );
    }

    #[tokio::test]
    async fn test_listing_failure_aborts() {
        let upgrader = Upgrader::new(MockPackageManager::unavailable(), policy(UpgradeLevel::All));
        let err = upgrader.run().await.unwrap_err();
        assert!(matches!(err, AppError::Winget(WingetError::Timeout { .. })));
        assert!(upgrader.manager.calls().is_empty());
    }

    #[tokio::test]
    async fn test_malformed_table_aborts() {
        let upgrader = Upgrader::new(MockPackageManager::new(""), policy(UpgradeLevel::All));
        let err = upgrader.run().await.unwrap_err();
        assert!(matches!(err, AppError::Table(TableError::Malformed { .. })));
    }

    #[tokio::test]
    async fn test_nothing_selected() {
        let upgrader = Upgrader::new(
            MockPackageManager::new(TABLE),
            policy(UpgradeLevel::Patch).with_block_list(["Patch.App", "Broken.App"]),
        );
        let report = upgrader.run().await.unwrap();
        assert!(report.outcomes.is_empty());
        assert!(upgrader.manager.calls().is_empty());
    }
}
