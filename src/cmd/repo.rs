// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository command handlers.
//!
//! Each handler builds a [`RepositoryAgent`] from the effective
//! configuration, runs one operation and prints its result on stdout.

use anyhow::Context;

use crate::agent::RepositoryAgent;
use crate::cli::repo::{BranchArgs, CloneArgs, CommitArgs, PushArgs, StatusArgs, StatusFormat};
use crate::config::Config;
use crate::error::Result;
use crate::git::GitEngine;

/// Resolve git and bind an agent to `agent.path`.
///
/// # Errors
///
/// Returns an error if git cannot be found or an existing repository at the
/// configured path cannot be opened.
pub fn build_agent(config: &Config) -> Result<RepositoryAgent> {
    let engine = GitEngine::resolve(config.git.executable.as_deref(), config.commit.identity())
        .context("failed to locate git")?;
    let agent = RepositoryAgent::new(
        engine,
        config.agent.path.as_deref(),
        config.agent_settings(),
    )?;
    Ok(agent)
}

/// Clone and print the bound working tree path.
///
/// # Errors
///
/// Returns an error if the clone fails.
pub fn run_clone_command(args: &CloneArgs, config: &Config) -> Result<()> {
    let mut config = config.clone();
    if args.depth.is_some() {
        config.clone.depth = args.depth;
    }

    let mut agent = build_agent(&config)?;
    let handle = agent.clone_repository(
        &args.url,
        args.branch.as_deref(),
        args.destination.as_deref(),
    )?;
    println!("{}", handle.path().display());
    Ok(())
}

/// Create a unique branch and print its name.
///
/// # Errors
///
/// Returns an error if no repository is bound or branch creation fails.
pub fn run_branch_command(args: &BranchArgs, config: &Config) -> Result<()> {
    let agent = build_agent(config)?;
    let name = agent.create_unique_branch(&args.base_name, args.from.as_deref())?;
    println!("{name}");
    Ok(())
}

/// Commit and print the new commit id.
///
/// FILES are resolved against the shell's working directory, so they name
/// the same files with or without `-C`.
///
/// # Errors
///
/// Returns an error if no repository is bound, a path cannot be resolved,
/// staging fails or there is nothing to commit.
pub fn run_commit_command(args: &CommitArgs, config: &Config) -> Result<()> {
    let agent = build_agent(config)?;
    let files = args
        .files
        .iter()
        .map(|path| {
            std::path::absolute(path)
                .with_context(|| format!("failed to resolve path: {}", path.display()))
        })
        .collect::<Result<Vec<_>>>()?;
    let id = agent.commit_changes(&args.message, Some(files.as_slice()))?;
    println!("{id}");
    Ok(())
}

/// Push a branch with upstream tracking.
///
/// # Errors
///
/// Returns an error if no repository is bound, HEAD is detached with no
/// branch given, the remote is unknown or the push is rejected.
pub fn run_push_command(args: &PushArgs, config: &Config) -> Result<()> {
    let agent = build_agent(config)?;
    agent.push_branch(args.branch.as_deref(), args.remote.as_deref())?;
    Ok(())
}

/// Print repository status as text or JSON.
///
/// # Errors
///
/// Returns an error if no repository is bound or a status query fails.
pub fn run_status_command(args: &StatusArgs, config: &Config) -> Result<()> {
    let agent = build_agent(config)?;
    let status = agent.repository_status()?;
    match args.format {
        StatusFormat::Text => {
            for line in status.to_lines() {
                println!("{line}");
            }
        }
        StatusFormat::Json => {
            println!("{}", serde_json::to_string_pretty(&status)?);
        }
    }
    Ok(())
}
