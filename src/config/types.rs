// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections.
//!
//! ```text
//! Config: GlobalConfig, AgentConfig, CloneConfig, CommitConfig, GitConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::agent::naming::DEFAULT_MAX_ATTEMPTS;
use crate::error::ConfigError;
use crate::git::CommitIdentity;
use crate::logging::LogLevel;

/// Logging options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for stderr output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Log file; file logging is off when unset.
    pub log_file: Option<PathBuf>,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: None,
        }
    }
}

/// Defaults for agent operations.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct AgentConfig {
    /// Working directory of the agent; current directory when unset.
    pub path: Option<PathBuf>,
    /// Branch new branches start from when none is given.
    pub default_base_branch: String,
    /// Remote pushed to when none is given.
    pub default_remote: String,
    /// Candidates probed before branch naming gives up.
    pub max_branch_attempts: usize,
}

impl Default for AgentConfig {
    fn default() -> Self {
        Self {
            path: None,
            default_base_branch: "main".to_string(),
            default_remote: "origin".to_string(),
            max_branch_attempts: DEFAULT_MAX_ATTEMPTS,
        }
    }
}

impl AgentConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        for (key, value) in [
            ("default_base_branch", &self.default_base_branch),
            ("default_remote", &self.default_remote),
        ] {
            if value.trim().is_empty() {
                return Err(ConfigError::InvalidValue {
                    section: "agent".to_string(),
                    key: key.to_string(),
                    message: "must not be empty".to_string(),
                });
            }
        }
        if self.max_branch_attempts == 0 {
            return Err(ConfigError::InvalidValue {
                section: "agent".to_string(),
                key: "max_branch_attempts".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CloneConfig {
    /// Shallow clone depth; full history when unset.
    pub depth: Option<u32>,
}

impl CloneConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        if self.depth == Some(0) {
            return Err(ConfigError::InvalidValue {
                section: "clone".to_string(),
                key: "depth".to_string(),
                message: "must be at least 1".to_string(),
            });
        }
        Ok(())
    }
}

/// Commit author override. Both fields or neither.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CommitConfig {
    pub author_name: Option<String>,
    pub author_email: Option<String>,
}

impl CommitConfig {
    pub(super) fn validate(&self) -> Result<(), ConfigError> {
        match (&self.author_name, &self.author_email) {
            (Some(_), None) => Err(ConfigError::MissingKey {
                section: "commit".to_string(),
                key: "author_email".to_string(),
            }),
            (None, Some(_)) => Err(ConfigError::MissingKey {
                section: "commit".to_string(),
                key: "author_name".to_string(),
            }),
            _ => Ok(()),
        }
    }

    /// Identity passed to every commit, if configured.
    #[must_use]
    pub fn identity(&self) -> Option<CommitIdentity> {
        match (&self.author_name, &self.author_email) {
            (Some(name), Some(email)) => Some(CommitIdentity {
                name: name.clone(),
                email: email.clone(),
            }),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GitConfig {
    /// Git binary; looked up on `PATH` when unset.
    pub executable: Option<PathBuf>,
}
