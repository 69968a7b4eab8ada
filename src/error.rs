//! Application error types using thiserror
//!
//! Error hierarchy:
//! - TableError: Issues with the fixed-width table printed by winget
//! - PolicyError: Issues with the upgrade policy (level, policy file)
//! - WingetError: Failures locating or running the winget executable

use std::path::PathBuf;
use std::time::Duration;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Table parsing errors
    #[error(transparent)]
    Table(#[from] TableError),

    /// Policy configuration errors
    #[error(transparent)]
    Policy(#[from] PolicyError),

    /// Package manager invocation errors
    #[error(transparent)]
    Winget(#[from] WingetError),
}

/// Errors raised while parsing winget's tabular output
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum TableError {
    /// The text has no usable header/row structure
    #[error("malformed table: {reason}")]
    Malformed { reason: String },
}

/// Errors related to the upgrade policy
#[derive(Error, Debug)]
pub enum PolicyError {
    /// Unrecognized upgrade level
    #[error("invalid upgrade level '{value}': expected 'all', 'major', 'minor' or 'patch'")]
    InvalidLevel { value: String },

    /// Policy file could not be read
    #[error("failed to read policy file {path}: {source}")]
    ReadFile {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Policy file is not valid TOML
    #[error("failed to parse policy file {path}: {message}")]
    ParseFile { path: PathBuf, message: String },
}

/// Errors raised by the winget collaborator
#[derive(Error, Debug)]
pub enum WingetError {
    /// The executable could not be found
    #[error("winget executable not found: {detail}")]
    ExecutableNotFound { detail: String },

    /// The executable or its directory could not be accessed
    #[error("permission denied while accessing {path}; try rerunning in a system context")]
    PermissionDenied { path: PathBuf },

    /// The process exited unsuccessfully
    #[error("'{command}' exited with code {code}: {stderr}")]
    NonZeroExit {
        command: String,
        code: i32,
        stderr: String,
    },

    /// The process did not finish in time
    #[error("'{command}' timed out after {}s", timeout.as_secs())]
    Timeout { command: String, timeout: Duration },

    /// Any other IO failure while spawning or waiting
    #[error("IO error running '{command}': {source}")]
    Io {
        command: String,
        #[source]
        source: std::io::Error,
    },
}

impl TableError {
    /// Creates a new Malformed error
    pub fn malformed(reason: impl Into<String>) -> Self {
        TableError::Malformed {
            reason: reason.into(),
        }
    }
}

impl PolicyError {
    /// Creates a new InvalidLevel error
    pub fn invalid_level(value: impl Into<String>) -> Self {
        PolicyError::InvalidLevel {
            value: value.into(),
        }
    }

    /// Creates a new ReadFile error
    pub fn read_file(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        PolicyError::ReadFile {
            path: path.into(),
            source,
        }
    }

    /// Creates a new ParseFile error
    pub fn parse_file(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        PolicyError::ParseFile {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl WingetError {
    /// Creates a new ExecutableNotFound error
    pub fn not_found(detail: impl Into<String>) -> Self {
        WingetError::ExecutableNotFound {
            detail: detail.into(),
        }
    }

    /// Creates a new PermissionDenied error
    pub fn permission_denied(path: impl Into<PathBuf>) -> Self {
        WingetError::PermissionDenied { path: path.into() }
    }

    /// Creates a new NonZeroExit error
    pub fn non_zero_exit(command: impl Into<String>, code: i32, stderr: impl Into<String>) -> Self {
        WingetError::NonZeroExit {
            command: command.into(),
            code,
            stderr: stderr.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(command: impl Into<String>, timeout: Duration) -> Self {
        WingetError::Timeout {
            command: command.into(),
            timeout,
        }
    }

    /// Maps a spawn failure to the matching variant
    pub fn from_spawn(command: impl Into<String>, path: impl Into<PathBuf>, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => {
                let path = path.into();
                WingetError::not_found(path.display().to_string())
            }
            std::io::ErrorKind::PermissionDenied => WingetError::permission_denied(path),
            _ => WingetError::Io {
                command: command.into(),
                source: err,
            },
        }
    }
}
