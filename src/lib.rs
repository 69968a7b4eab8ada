//! wingup - Policy-driven winget auto-updater library
//!
//! This library provides the pieces of an unattended upgrade run:
//! - Fixed-width table parsing of `winget upgrade` output
//! - Semantic-version classification against an upgrade policy
//! - Running winget for the selected applications
//! - Text and JSON run reports

pub mod classify;
pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod logging;
pub mod output;
pub mod progress;
pub mod runner;
pub mod table;
pub mod winget;
