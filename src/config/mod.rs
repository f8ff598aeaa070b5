// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low → high)
//! 1. defaults
//! 2. repo-agent.toml (cwd, optional)
//! 3. --config FILE (repeatable)
//! 4. REPO_AGENT_* env vars
//! 5. --set section.key=value
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! REPO_AGENT_AGENT__DEFAULT_REMOTE=upstream → agent.default_remote
//! REPO_AGENT_CLONE__DEPTH=1                 → clone.depth
//! REPO_AGENT_GLOBAL__OUTPUT_LOG_LEVEL=4     → global.output_log_level
//! ```

pub mod loader;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::agent::AgentSettings;
use crate::error::Result;

use loader::ConfigLoader;
use types::{AgentConfig, CloneConfig, CommitConfig, GitConfig, GlobalConfig};

/// File picked up from the working directory when present.
pub const LOCAL_CONFIG_FILE: &str = "repo-agent.toml";

/// Prefix of environment overrides.
pub const ENV_PREFIX: &str = "REPO_AGENT";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    pub global: GlobalConfig,
    pub agent: AgentConfig,
    pub clone: CloneConfig,
    pub commit: CommitConfig,
    pub git: GitConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use repo_agent::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("repo-agent.toml")
    ///     .with_env_prefix("REPO_AGENT")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, is not valid TOML, or
    /// fails validation.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or fails validation.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Check cross-field constraints.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError` naming the offending key.
    pub fn validate(&self) -> Result<()> {
        self.agent.validate()?;
        self.clone.validate()?;
        self.commit.validate()?;
        Ok(())
    }

    /// Operation defaults handed to the agent.
    #[must_use]
    pub fn agent_settings(&self) -> AgentSettings {
        AgentSettings::builder()
            .with_default_base_branch(self.agent.default_base_branch.clone())
            .with_default_remote(self.agent.default_remote.clone())
            .with_max_branch_attempts(self.agent.max_branch_attempts)
            .maybe_with_clone_depth(self.clone.depth)
            .build()
    }

    /// Effective settings as `key = value` lines, sorted by key.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let fmt = |p: &Option<PathBuf>| {
            p.as_ref()
                .map_or_else(String::new, |p| p.display().to_string())
        };

        let mut options: BTreeMap<&str, String> = BTreeMap::new();
        options.insert(
            "global.output_log_level",
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level",
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert("global.log_file", fmt(&self.global.log_file));
        options.insert("agent.path", fmt(&self.agent.path));
        options.insert(
            "agent.default_base_branch",
            self.agent.default_base_branch.clone(),
        );
        options.insert("agent.default_remote", self.agent.default_remote.clone());
        options.insert(
            "agent.max_branch_attempts",
            self.agent.max_branch_attempts.to_string(),
        );
        options.insert(
            "clone.depth",
            self.clone.depth.map_or_else(String::new, |d| d.to_string()),
        );
        options.insert(
            "commit.author_name",
            self.commit.author_name.clone().unwrap_or_default(),
        );
        options.insert(
            "commit.author_email",
            self.commit.author_email.clone().unwrap_or_default(),
        );
        options.insert("git.executable", fmt(&self.git.executable));

        let max_key_len = options.keys().map(|k| k.len()).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }
}
