// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Repository agent.
//!
//! ```text
//! caller --> RepositoryAgent::op(args)
//!               |  bound? (NotBound, no engine calls)
//!               v
//!            VcsEngine calls, fixed order
//!               |  failure -> compensating checkout (branch only)
//!               v
//!            value | AgentError
//! ```
//!
//! The agent owns at most one [`RepositoryHandle`]. Only construction and
//! [`RepositoryAgent::clone_repository`] change it; every other operation
//! reads it and leaves the binding alone.

pub mod branch;
pub mod naming;
pub mod status;


use bon::Builder;
use std::collections::BTreeSet;
use std::path::{Path, PathBuf};
use tracing::{debug, info};

use crate::error::{AgentError, AgentResult, GitError};
use crate::git::{CloneOptions, GitEngine, RepositoryHandle, VcsEngine};

use branch::BranchWorkflow;
pub use status::{CurrentBranch, DETACHED_HEAD, RepositoryStatus};

/// Defaults applied when an operation argument is omitted.
#[derive(Debug, Clone, Builder)]
pub struct AgentSettings {
    #[builder(setters(name = with_default_base_branch), default = "main".to_string())]
    default_base_branch: String,
    #[builder(setters(name = with_default_remote), default = "origin".to_string())]
    default_remote: String,
    #[builder(setters(name = with_max_branch_attempts), default = naming::DEFAULT_MAX_ATTEMPTS)]
    max_branch_attempts: usize,
    #[builder(setters(name = with_clone_depth))]
    clone_depth: Option<u32>,
}

impl Default for AgentSettings {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl AgentSettings {
    #[must_use]
    pub fn default_base_branch(&self) -> &str {
        &self.default_base_branch
    }

    #[must_use]
    pub fn default_remote(&self) -> &str {
        &self.default_remote
    }

    #[must_use]
    pub const fn max_branch_attempts(&self) -> usize {
        self.max_branch_attempts
    }

    #[must_use]
    pub const fn clone_depth(&self) -> Option<u32> {
        self.clone_depth
    }
}

/// Orchestrates clone/branch/commit/push/status over a [`VcsEngine`].
pub struct RepositoryAgent<E: VcsEngine = GitEngine> {
    engine: E,
    path: PathBuf,
    repo: Option<RepositoryHandle>,
    settings: AgentSettings,
}

fn absolute(path: Option<&Path>) -> std::io::Result<PathBuf> {
    match path {
        Some(path) => std::path::absolute(path),
        None => std::env::current_dir(),
    }
}

impl<E: VcsEngine> RepositoryAgent<E> {
    /// Construct an agent for `path` (current directory when `None`).
    ///
    /// If `path` contains a metadata directory the repository is opened
    /// immediately; otherwise the agent starts unbound.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::Initialization` if the path cannot be resolved or
    /// an existing repository cannot be opened.
    pub fn new(engine: E, path: Option<&Path>, settings: AgentSettings) -> AgentResult<Self> {
        let path = absolute(path).map_err(|e| AgentError::Initialization {
            path: path.map(Path::to_path_buf).unwrap_or_default(),
            source: Box::new(GitError::Io(e)),
        })?;

        let repo = if path.join(E::METADATA_DIR).exists() {
            let handle = engine
                .open(&path)
                .map_err(|e| AgentError::Initialization {
                    path: path.clone(),
                    source: Box::new(e),
                })?;
            info!(repo = %path.display(), "bound to existing repository");
            Some(handle)
        } else {
            debug!(path = %path.display(), "no repository found, starting unbound");
            None
        };

        Ok(Self {
            engine,
            path,
            repo,
            settings,
        })
    }

    /// Configured path (clone destination default).
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Currently bound repository, if any.
    #[must_use]
    pub const fn handle(&self) -> Option<&RepositoryHandle> {
        self.repo.as_ref()
    }

    #[must_use]
    pub const fn is_bound(&self) -> bool {
        self.repo.is_some()
    }

    #[must_use]
    pub const fn settings(&self) -> &AgentSettings {
        &self.settings
    }

    #[must_use]
    pub const fn engine(&self) -> &E {
        &self.engine
    }

    fn bound(&self) -> AgentResult<&RepositoryHandle> {
        self.repo.as_ref().ok_or(AgentError::NotBound)
    }

    /// Clone `url` and bind to the result.
    ///
    /// `destination` defaults to the configured path. On failure the previous
    /// binding is kept.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::VcsOperation` if the clone fails.
    pub fn clone_repository(
        &mut self,
        url: &str,
        branch: Option<&str>,
        destination: Option<&Path>,
    ) -> AgentResult<&RepositoryHandle> {
        let destination = match destination {
            Some(dest) => {
                std::path::absolute(dest).map_err(|e| AgentError::vcs("clone", e.into()))?
            }
            None => self.path.clone(),
        };
        let options = CloneOptions::builder()
            .maybe_with_branch(branch.map(str::to_string))
            .maybe_with_depth(self.settings.clone_depth)
            .build();

        info!(url, dest = %destination.display(), branch, "cloning repository");
        let handle = self
            .engine
            .clone_from(url, &destination, &options)
            .map_err(AgentError::wrap("clone"))?;

        Ok(self.repo.insert(handle))
    }

    /// Create and check out a branch named after `base_name` that does not
    /// collide with any local branch.
    ///
    /// The branch starts at `from_branch` (default base branch when `None`).
    /// On failure the original checkout is restored, best-effort.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotBound`, `AgentError::NamingExhausted`, or
    /// `AgentError::VcsOperation` (with any rollback failure attached).
    pub fn create_unique_branch(
        &self,
        base_name: &str,
        from_branch: Option<&str>,
    ) -> AgentResult<String> {
        let repo = self.bound()?;
        let from = from_branch.unwrap_or(&self.settings.default_base_branch);

        let existing: BTreeSet<String> = self
            .engine
            .list_local_branches(repo)
            .map_err(AgentError::wrap("list branches"))?
            .into_iter()
            .collect();
        let name =
            naming::unique_branch_name(base_name, &existing, self.settings.max_branch_attempts)?;
        debug!(base = base_name, branch = %name, "allocated branch name");

        BranchWorkflow::new(&self.engine, repo, from, &name).run()?;

        info!(branch = %name, from, "created branch");
        Ok(name)
    }

    /// Stage and commit.
    ///
    /// With `files`, exactly those paths are staged; otherwise (or when the
    /// list is empty) every change in the working tree is staged. Relative
    /// paths are taken relative to the repository root; absolute paths must
    /// lie inside the working tree.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotBound`, or `AgentError::VcsOperation` if
    /// staging fails, nothing is staged, or the message is rejected.
    pub fn commit_changes(&self, message: &str, files: Option<&[PathBuf]>) -> AgentResult<String> {
        let repo = self.bound()?;

        match files {
            Some(files) if !files.is_empty() => {
                debug!(count = files.len(), "staging paths");
                self.engine
                    .stage_paths(repo, files)
                    .map_err(AgentError::wrap("stage changes"))?;
            }
            _ => {
                debug!("staging all changes");
                self.engine
                    .stage_all(repo)
                    .map_err(AgentError::wrap("stage changes"))?;
            }
        }

        let id = self
            .engine
            .commit(repo, message)
            .map_err(AgentError::wrap("commit changes"))?;
        info!(commit = %id, "committed changes");
        Ok(id)
    }

    /// Push `branch` (current branch when `None`) to the same-named branch on
    /// `remote` (default remote when `None`) and set it as upstream.
    ///
    /// Never forces; a diverged remote is reported as an error.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotBound`, or `AgentError::VcsOperation` for a
    /// detached HEAD, an unknown remote, or a rejected push.
    pub fn push_branch(&self, branch: Option<&str>, remote: Option<&str>) -> AgentResult<()> {
        let repo = self.bound()?;
        let remote = remote.unwrap_or(&self.settings.default_remote);

        let branch = match branch {
            Some(branch) => branch.to_string(),
            None => self
                .engine
                .current_branch(repo)
                .map_err(AgentError::wrap("resolve current branch"))?
                .ok_or_else(|| AgentError::vcs("resolve current branch", GitError::DetachedHead))?,
        };

        let remotes = self
            .engine
            .list_remotes(repo)
            .map_err(AgentError::wrap("list remotes"))?;
        if !remotes.iter().any(|r| r == remote) {
            return Err(AgentError::vcs(
                "push",
                GitError::RemoteNotFound {
                    remote: remote.to_string(),
                },
            ));
        }

        info!(branch = %branch, remote, "pushing branch");
        self.engine
            .push(repo, remote, &branch, &branch, true)
            .map_err(AgentError::wrap("push"))
    }

    /// Snapshot of the repository's current state.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotBound`, or `AgentError::VcsOperation` if any
    /// query fails.
    pub fn repository_status(&self) -> AgentResult<RepositoryStatus> {
        let repo = self.bound()?;
        let wrap = || AgentError::wrap("get repository status");

        let tree = self.engine.working_tree_status(repo).map_err(wrap())?;
        Ok(RepositoryStatus {
            current_branch: self.engine.current_branch(repo).map_err(wrap())?.into(),
            is_dirty: tree.is_dirty(),
            untracked_files: tree.untracked,
            modified_files: tree.unstaged,
            staged_files: tree.staged,
            remotes: self.engine.list_remotes(repo).map_err(wrap())?,
            branches: self.engine.list_local_branches(repo).map_err(wrap())?,
        })
    }

    /// Full message of commit `id`.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::NotBound`, or `AgentError::VcsOperation` if the
    /// commit cannot be read.
    pub fn commit_message(&self, id: &str) -> AgentResult<String> {
        let repo = self.bound()?;
        self.engine
            .commit_message(repo, id)
            .map_err(AgentError::wrap("read commit"))
    }
}
