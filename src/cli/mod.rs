// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command-line interface (clap derive).
//!
//! # Command Structure
//!
//! ```text
//! repo-agent [global options] <command>
//! clone URL [-b BRANCH] [-d DEST] [--depth N]
//! branch BASE [-f FROM]
//! commit -m MESSAGE [FILES...]
//! push [BRANCH] [-r REMOTE]
//! status [--format text|json]
//! options | inis | version
//! ```

pub mod global;
pub mod repo;

#[cfg(test)]
mod tests;

use crate::cli::global::GlobalOptions;
use crate::cli::repo::{BranchArgs, CloneArgs, CommitArgs, PushArgs, StatusArgs};
use clap::{Parser, Subcommand};

/// Repository automation agent.
///
/// Clones repositories, creates collision-free branches, commits and pushes
/// on behalf of automated workflows.
#[derive(Debug, Parser)]
#[command(
    name = "repo-agent",
    author,
    version,
    about = "Repository Automation Agent",
    long_about = "repo-agent Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Drives a git repository for automated workflows: clone,\n\
                  create a uniquely named branch, commit, push and report\n\
                  status. Every command works on the repository given by -C\n\
                  (default: the current directory).",
    after_help = "CONFIG FILES:\n\n\
                  repo-agent reads `repo-agent.toml` from the current directory\n\
                  if it exists, then every file given with --config in order.\n\
                  REPO_AGENT_SECTION__KEY environment variables and --set\n\
                  section.key=value override values from files."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their effective values.
    Options,

    /// Lists the configuration files that were loaded.
    Inis,

    /// Clones a repository and binds to it.
    Clone(CloneArgs),

    /// Creates and checks out a uniquely named branch.
    Branch(BranchArgs),

    /// Stages and commits changes.
    Commit(CommitArgs),

    /// Pushes a branch and sets its upstream.
    Push(PushArgs),

    /// Shows the repository status.
    Status(StatusArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version
/// information was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
