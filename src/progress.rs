//! Terminal feedback while winget works
//!
//! Listing shows a spinner; upgrading shows a bar over the selected
//! applications with the identifier currently being installed. Nothing is
//! drawn when disabled, and indicatif hides the bar when stderr is not a
//! terminal.

use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

const LISTING_MESSAGE: &str = "Listing available upgrades...";
const SPINNER_TICKS: &str = "⠋⠙⠹⠸⠼⠴⠦⠧⠇⠏";

/// Progress display for one upgrade run
pub struct UpgradeProgress {
    enabled: bool,
    bar: Option<ProgressBar>,
}

impl UpgradeProgress {
    pub fn new(enabled: bool) -> Self {
        Self { enabled, bar: None }
    }

    /// Spin while winget prints its upgrade table
    pub fn listing(&mut self) {
        if !self.enabled {
            return;
        }
        let spinner = ProgressBar::new_spinner();
        if let Ok(style) = ProgressStyle::default_spinner()
            .tick_chars(SPINNER_TICKS)
            .template("{spinner:.cyan} {msg}")
        {
            spinner.set_style(style);
        }
        spinner.set_message(LISTING_MESSAGE);
        spinner.enable_steady_tick(Duration::from_millis(80));
        self.replace(spinner);
    }

    /// Switch to a bar over `total` applications; nothing to draw for zero
    pub fn upgrading(&mut self, total: usize) {
        self.clear();
        if !self.enabled || total == 0 {
            return;
        }
        let bar = ProgressBar::new(total as u64);
        if let Ok(style) = ProgressStyle::default_bar()
            .tick_chars(SPINNER_TICKS)
            .template("{spinner:.cyan} {msg:30} [{bar:30.cyan/blue}] {pos}/{len} ({elapsed})")
        {
            bar.set_style(style.progress_chars("█▓▒░"));
        }
        bar.enable_steady_tick(Duration::from_millis(100));
        self.replace(bar);
    }

    /// Show which application winget is installing
    pub fn installing(&self, id: &str) {
        if let Some(bar) = &self.bar {
            bar.set_message(id.to_string());
        }
    }

    /// Count one application as handled, whatever its result
    pub fn handled(&self) {
        if let Some(bar) = &self.bar {
            bar.inc(1);
        }
    }

    /// Remove whatever is drawn
    pub fn clear(&mut self) {
        if let Some(bar) = self.bar.take() {
            bar.finish_and_clear();
        }
    }

    fn replace(&mut self, bar: ProgressBar) {
        self.clear();
        self.bar = Some(bar);
    }
}

impl Drop for UpgradeProgress {
    fn drop(&mut self) {
        self.clear();
    }
}
