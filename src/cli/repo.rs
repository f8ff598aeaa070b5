// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command arguments.
//!
//! ```text
//! clone URL [-b BRANCH] [-d DEST] [--depth N]
//!   → clone, bind, print path
//! branch BASE [-f FROM]
//!   → print created branch name
//! commit -m MESSAGE [FILES...]
//!   → print commit id
//! push [BRANCH] [-r REMOTE]
//! status [--format text|json]
//! ```

use clap::{Args, ValueEnum};
use std::path::PathBuf;

/// Arguments for the `clone` command.
#[derive(Debug, Clone, Args)]
pub struct CloneArgs {
    /// Repository URL (anything git accepts).
    pub url: String,

    /// Branch to check out after cloning.
    #[arg(short = 'b', long)]
    pub branch: Option<String>,

    /// Destination directory (defaults to the agent path).
    #[arg(short = 'd', long = "dest", value_name = "DIR")]
    pub destination: Option<PathBuf>,

    /// Shallow clone depth, overrides clone.depth.
    #[arg(long, value_parser = clap::value_parser!(u32).range(1..))]
    pub depth: Option<u32>,
}

/// Arguments for the `branch` command.
#[derive(Debug, Clone, Args)]
pub struct BranchArgs {
    /// Desired branch name; a numeric suffix is added on collision.
    pub base_name: String,

    /// Branch to start from (defaults to agent.default_base_branch).
    #[arg(short = 'f', long = "from", value_name = "BRANCH")]
    pub from: Option<String>,
}

/// Arguments for the `commit` command.
#[derive(Debug, Clone, Args)]
pub struct CommitArgs {
    /// Commit message.
    #[arg(short = 'm', long)]
    pub message: String,

    /// Files to stage, relative to the current directory; everything is
    /// staged when omitted.
    pub files: Vec<PathBuf>,
}

/// Arguments for the `push` command.
#[derive(Debug, Clone, Args)]
pub struct PushArgs {
    /// Branch to push (defaults to the current branch).
    pub branch: Option<String>,

    /// Remote to push to (defaults to agent.default_remote).
    #[arg(short = 'r', long)]
    pub remote: Option<String>,
}

/// Output format for `status`.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, ValueEnum)]
pub enum StatusFormat {
    #[default]
    Text,
    Json,
}

/// Arguments for the `status` command.
#[derive(Debug, Clone, Args)]
pub struct StatusArgs {
    #[arg(long, value_enum, default_value_t = StatusFormat::Text)]
    pub format: StatusFormat,
}
