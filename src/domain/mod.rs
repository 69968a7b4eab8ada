//! Core domain models for wingup
//!
//! This module contains the fundamental types used throughout the application:
//! - Application records parsed from winget's upgrade table
//! - Strict semantic versions
//! - Upgrade levels and selection reasons
//! - Selection, outcome and run report structures

mod level;
mod record;
mod report;
mod version;

pub use level::{UpgradeKind, UpgradeLevel};
pub use record::{AppRecord, AVAILABLE_COLUMN, ID_COLUMN, NAME_COLUMN, VERSION_COLUMN};
pub use report::{RunReport, Selection, UpgradeOutcome, UpgradeStatus};
pub use version::SemanticVersion;
