// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                 AgentError (caller-facing)
//!                          |
//!     +-------------+------+--------+----------------+
//!     |             |               |                |
//!     v             v               v                v
//! Initialization  NotBound    VcsOperation     NamingExhausted
//!  path + Box                 op + Box<GitError>  base + attempts
//!                             + rollback: Option<Box<GitError>>
//!
//! GitError (engine level)
//!   CommandFailed, GitNotFound, CloneFailed, CheckoutFailed,
//!   BranchNotFound, RemoteNotFound, DetachedHead, InvalidPath,
//!   UnexpectedOutput, Io, Gix(GixError)
//!
//! ConfigError   InvalidValue, MissingKey, ParseError
//! ```
//!
//! Library code returns [`AgentResult`] / [`GitResult`]; binary glue uses
//! the [`Result`] alias (`anyhow`).

use std::path::PathBuf;
use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`AgentError`].
pub type AgentResult<T> = std::result::Result<T, AgentError>;

/// Result type using [`GitError`].
pub type GitResult<T> = std::result::Result<T, GitError>;

/// Errors surfaced by [`crate::agent::RepositoryAgent`] operations.
///
/// Engine failures are always carried as the boxed [`GitError`] source so the
/// original cause stays reachable through [`std::error::Error::source`].
#[derive(Debug, Error)]
pub enum AgentError {
    /// Binding to an existing repository failed.
    #[error("failed to initialize repository at {}: {source}", .path.display())]
    Initialization {
        path: PathBuf,
        #[source]
        source: Box<GitError>,
    },

    /// Operation requires a bound repository.
    #[error("no repository initialized")]
    NotBound,

    /// A version-control primitive failed.
    ///
    /// `rollback` holds the failure of the compensating action, if one was
    /// attempted and did not succeed.
    #[error("failed to {operation}: {source}{}", rollback_suffix(.rollback.as_deref()))]
    VcsOperation {
        operation: &'static str,
        #[source]
        source: Box<GitError>,
        rollback: Option<Box<GitError>>,
    },

    /// No free branch name was found within the attempt limit.
    #[error("no free branch name for '{base}' after {attempts} attempts")]
    NamingExhausted { base: String, attempts: usize },
}

fn rollback_suffix(rollback: Option<&GitError>) -> String {
    rollback.map_or_else(String::new, |err| format!(" (rollback also failed: {err})"))
}

impl AgentError {
    /// Wrap an engine error for `operation`, without rollback information.
    #[must_use]
    pub fn vcs(operation: &'static str, source: GitError) -> Self {
        Self::VcsOperation {
            operation,
            source: Box::new(source),
            rollback: None,
        }
    }

    /// Adapter for `map_err` that wraps an engine error for `operation`.
    pub fn wrap(operation: &'static str) -> impl FnOnce(GitError) -> Self {
        move |source| Self::vcs(operation, source)
    }

    /// The engine error behind this failure, if any.
    #[must_use]
    pub fn git_error(&self) -> Option<&GitError> {
        match self {
            Self::Initialization { source, .. } | Self::VcsOperation { source, .. } => {
                Some(source.as_ref())
            }
            Self::NotBound | Self::NamingExhausted { .. } => None,
        }
    }

    /// The failure of a compensating action, if one occurred.
    #[must_use]
    pub fn rollback_error(&self) -> Option<&GitError> {
        match self {
            Self::VcsOperation { rollback, .. } => rollback.as_deref(),
            _ => None,
        }
    }
}

// --- Gix Errors ---

/// Wrapper for gix-specific errors.
///
/// Large error types are boxed to keep enum size manageable.
#[derive(Debug, Error)]
pub enum GixError {
    /// Failed to open repository.
    #[error("failed to open repository: {0}")]
    Open(#[from] Box<gix::open::Error>),

    /// Failed to get HEAD reference.
    #[error("failed to get head reference: {0}")]
    Head(#[from] gix::reference::find::existing::Error),

    /// Failed to iterate references.
    #[error("failed to iterate references: {0}")]
    References(#[source] Box<dyn std::error::Error + Send + Sync>),

    /// Repository has no worktree (bare repository).
    #[error("repository has no worktree (bare repository)")]
    BareRepository,
}

// --- Git Errors ---

/// Errors raised by the version-control engine.
#[derive(Debug, Error)]
pub enum GitError {
    /// Git command execution failed.
    #[error("git command failed: {command} - {message}")]
    CommandFailed { command: String, message: String },

    /// The git executable could not be located.
    #[error("git executable not found: {0}")]
    GitNotFound(String),

    /// Error from gix library.
    #[error("gix error: {0}")]
    Gix(#[from] GixError),

    /// Clone operation failed.
    #[error("failed to clone {url}: {message}")]
    CloneFailed { url: String, message: String },

    /// Checkout operation failed.
    #[error("failed to checkout {what}: {message}")]
    CheckoutFailed { what: String, message: String },

    /// Branch not found.
    #[error("branch not found: {branch}")]
    BranchNotFound { branch: String },

    /// Remote not found.
    #[error("remote not found: {remote}")]
    RemoteNotFound { remote: String },

    /// HEAD does not point at a named branch.
    #[error("HEAD is detached")]
    DetachedHead,

    /// Path cannot be passed to git.
    #[error("invalid path: {0}")]
    InvalidPath(String),

    /// Git produced output that could not be interpreted.
    #[error("unexpected output from {command}: {output}")]
    UnexpectedOutput { command: String, output: String },

    /// I/O error while running git.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),
}

impl From<gix::open::Error> for GitError {
    fn from(err: gix::open::Error) -> Self {
        Self::Gix(GixError::Open(Box::new(err)))
    }
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse a configuration value.
    #[error("failed to parse config value '{key}': {message}")]
    ParseError { key: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

#[cfg(test)]
mod tests;
