// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-control engine abstraction.
//!
//! ```text
//! VcsEngine (trait)  --> GitEngine
//!   reads   ........ gix (open, HEAD, branches, remotes)
//!   writes  ........ git CLI (clone, checkout, branch, add, commit, push)
//!   status ......... git CLI (status --porcelain=v1 -z), one read per call
//! ```

use bon::Builder;
use std::path::{Path, PathBuf};
use tracing::{debug, trace};

use super::porcelain::{self, PorcelainStatus};
use crate::error::{GitError, GitResult, GixError};

/// Opaque reference to a bound, on-disk repository.
///
/// Only the working tree path is stored. Branch and status information is
/// always read from the repository when requested.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryHandle {
    path: PathBuf,
}

impl RepositoryHandle {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    /// Working tree path.
    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Options for [`VcsEngine::clone_from`].
#[derive(Debug, Clone, Default, Builder)]
pub struct CloneOptions {
    /// Branch to check out instead of the remote HEAD.
    #[builder(setters(name = with_branch))]
    branch: Option<String>,
    /// Shallow clone depth.
    #[builder(setters(name = with_depth))]
    depth: Option<u32>,
}

impl CloneOptions {
    #[must_use]
    pub fn branch(&self) -> Option<&str> {
        self.branch.as_deref()
    }

    #[must_use]
    pub const fn depth(&self) -> Option<u32> {
        self.depth
    }
}

/// Author/committer identity passed to git as `user.name` / `user.email`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitIdentity {
    pub name: String,
    pub email: String,
}

// --- Engine Trait ---

/// Primitive version-control operations the agent is built on.
///
/// Every method is a single blocking call. Implementors must not cache
/// repository state between calls.
pub trait VcsEngine {
    /// Name of the metadata directory that marks a working tree.
    const METADATA_DIR: &'static str = ".git";

    /// Open an existing repository.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the path is not a usable repository.
    fn open(&self, path: &Path) -> GitResult<RepositoryHandle>;

    /// Clone `url` into `destination`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` on network, authentication or destination failures.
    fn clone_from(
        &self,
        url: &str,
        destination: &Path,
        options: &CloneOptions,
    ) -> GitResult<RepositoryHandle>;

    /// Local branch names, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if references cannot be read.
    fn list_local_branches(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>>;

    /// Current branch name (None if HEAD is detached).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved.
    fn current_branch(&self, repo: &RepositoryHandle) -> GitResult<Option<String>>;

    /// Commit id HEAD points at (None on an unborn branch).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved.
    fn head_commit(&self, repo: &RepositoryHandle) -> GitResult<Option<String>>;

    /// Checkout a branch or commit.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the checkout fails.
    fn checkout(&self, repo: &RepositoryHandle, what: &str) -> GitResult<()>;

    /// Create branch `name` at the tip of `from` without checking it out.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the branch exists or `from` cannot be resolved.
    fn create_branch(&self, repo: &RepositoryHandle, name: &str, from: &str) -> GitResult<()>;

    /// Stage exactly the given paths.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if any path cannot be staged.
    fn stage_paths(&self, repo: &RepositoryHandle, paths: &[PathBuf]) -> GitResult<()>;

    /// Stage every change in the working tree (new, modified, deleted).
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if staging fails.
    fn stage_all(&self, repo: &RepositoryHandle) -> GitResult<()>;

    /// Commit the index and return the new commit id.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if nothing is staged or the commit is rejected.
    fn commit(&self, repo: &RepositoryHandle, message: &str) -> GitResult<String>;

    /// Full message of commit `id`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the commit cannot be found.
    fn commit_message(&self, repo: &RepositoryHandle, id: &str) -> GitResult<String>;

    /// Configured remote names, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the configuration cannot be read.
    fn list_remotes(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>>;

    /// Push `local_branch` to `remote_branch` on `remote`.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` on network, authentication or non-fast-forward
    /// failures.
    fn push(
        &self,
        repo: &RepositoryHandle,
        remote: &str,
        local_branch: &str,
        remote_branch: &str,
        set_upstream: bool,
    ) -> GitResult<()>;

    /// Whether tracked files differ from HEAD in the index or working tree.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn is_dirty(&self, repo: &RepositoryHandle) -> GitResult<bool>;

    /// Untracked paths, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn untracked_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>>;

    /// Paths modified in the working tree but not staged, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn unstaged_modified_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>>;

    /// Paths staged relative to HEAD, sorted.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn staged_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>>;

    /// Staged, unstaged and untracked paths from a single status read.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if the status check fails.
    fn working_tree_status(&self, repo: &RepositoryHandle) -> GitResult<PorcelainStatus> {
        Ok(PorcelainStatus {
            staged: self.staged_files(repo)?,
            unstaged: self.unstaged_modified_files(repo)?,
            untracked: self.untracked_files(repo)?,
        })
    }
}

// --- GitEngine Implementation ---

/// Git engine: gix for queries, the git executable for everything else.
///
/// The git CLI is used for mutations so that credential helpers, SSH
/// configuration and hooks behave exactly as they do for a developer.
#[derive(Debug, Clone, Builder)]
pub struct GitEngine {
    #[builder(setters(name = with_executable))]
    executable: PathBuf,
    #[builder(setters(name = with_identity))]
    identity: Option<CommitIdentity>,
}

impl GitEngine {
    /// Build an engine using `executable`, or `git` from PATH when `None`.
    ///
    /// # Errors
    ///
    /// Returns `GitError::GitNotFound` if no executable is given and `git` is
    /// not in PATH.
    pub fn resolve(executable: Option<&Path>, identity: Option<CommitIdentity>) -> GitResult<Self> {
        let executable = match executable {
            Some(path) => path.to_path_buf(),
            None => which::which("git").map_err(|e| GitError::GitNotFound(e.to_string()))?,
        };
        debug!(git = %executable.display(), "using git executable");
        Ok(Self::builder()
            .with_executable(executable)
            .maybe_with_identity(identity)
            .build())
    }

    #[must_use]
    pub fn executable(&self) -> &Path {
        &self.executable
    }

    #[must_use]
    pub const fn identity(&self) -> Option<&CommitIdentity> {
        self.identity.as_ref()
    }

    /// Run git and return raw stdout. Sets `GCM_INTERACTIVE=never` and
    /// `GIT_TERMINAL_PROMPT=0`.
    fn run(&self, args: &[&str], cwd: &Path) -> GitResult<String> {
        use std::process::Command;

        let mut command = Command::new(&self.executable);
        if let Some(identity) = &self.identity {
            command
                .arg("-c")
                .arg(format!("user.name={}", identity.name))
                .arg("-c")
                .arg(format!("user.email={}", identity.email));
        }
        command
            .args(args)
            .current_dir(cwd)
            .env("GCM_INTERACTIVE", "never")
            .env("GIT_TERMINAL_PROMPT", "0");

        trace!(?args, cwd = %cwd.display(), "running git");
        let output = command
            .output()
            .map_err(|e| std::io::Error::new(e.kind(), format!("failed to execute git: {e}")))?;

        if !output.status.success() {
            // "nothing to commit" and similar notices go to stdout
            let stderr = String::from_utf8_lossy(&output.stderr).trim().to_string();
            let message = if stderr.is_empty() {
                String::from_utf8_lossy(&output.stdout).trim().to_string()
            } else {
                stderr
            };
            return Err(GitError::CommandFailed {
                command: format!("git {}", args.join(" ")),
                message,
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    /// Run git and return trimmed stdout.
    fn git_command(&self, args: &[&str], cwd: &Path) -> GitResult<String> {
        Ok(self.run(args, cwd)?.trim().to_string())
    }

    fn open_repo(repo: &RepositoryHandle) -> GitResult<gix::Repository> {
        Ok(gix::open(repo.path())?)
    }

    fn porcelain_status(&self, repo: &RepositoryHandle) -> GitResult<PorcelainStatus> {
        let output = self.run(
            &["status", "--porcelain=v1", "-z", "--untracked-files=all"],
            repo.path(),
        )?;
        Ok(porcelain::parse(&output))
    }
}

fn path_arg(path: &Path) -> GitResult<&str> {
    path.to_str()
        .ok_or_else(|| GitError::InvalidPath(path.display().to_string()))
}

fn is_commit_id(id: &str) -> bool {
    matches!(id.len(), 40 | 64) && id.bytes().all(|b| b.is_ascii_hexdigit())
}

impl VcsEngine for GitEngine {
    fn open(&self, path: &Path) -> GitResult<RepositoryHandle> {
        let repo = gix::open(path)?;
        if repo.workdir().is_none() {
            return Err(GixError::BareRepository.into());
        }
        debug!(repo = %path.display(), "opened repository");
        Ok(RepositoryHandle::new(path))
    }

    fn clone_from(
        &self,
        url: &str,
        destination: &Path,
        options: &CloneOptions,
    ) -> GitResult<RepositoryHandle> {
        let dest = destination.to_str().ok_or_else(|| GitError::CloneFailed {
            url: url.to_string(),
            message: "invalid destination path".to_string(),
        })?;

        let depth = options.depth().map(|d| d.to_string());
        let mut args = vec!["clone", "--quiet", "-c", "advice.detachedHead=false"];
        if let Some(depth) = &depth {
            args.extend(["--depth", depth.as_str()]);
        }
        if let Some(branch) = options.branch() {
            args.extend(["--branch", branch]);
        }
        args.extend(["--", url, dest]);

        // Relative local URLs resolve against the caller's directory.
        let cwd = std::env::current_dir()?;
        self.run(&args, &cwd).map_err(|e| match e {
            GitError::CommandFailed { message, .. } => GitError::CloneFailed {
                url: url.to_string(),
                message,
            },
            other => other,
        })?;

        self.open(destination)
    }

    fn list_local_branches(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>> {
        let repo = Self::open_repo(repo)?;
        let references = repo
            .references()
            .map_err(|e| GixError::References(Box::new(e)))?;
        let mut names = Vec::new();
        for reference in references
            .local_branches()
            .map_err(|e| GixError::References(Box::new(e)))?
        {
            let reference = reference.map_err(GixError::References)?;
            names.push(reference.name().shorten().to_string());
        }
        names.sort();
        Ok(names)
    }

    fn current_branch(&self, repo: &RepositoryHandle) -> GitResult<Option<String>> {
        let repo = Self::open_repo(repo)?;
        let head = repo.head_name().map_err(GixError::Head)?;
        Ok(head.map(|name| name.shorten().to_string()))
    }

    fn head_commit(&self, repo: &RepositoryHandle) -> GitResult<Option<String>> {
        let repo = Self::open_repo(repo)?;
        let head = repo.head().map_err(GixError::Head)?;
        Ok(head.id().map(|id| id.to_string()))
    }

    fn checkout(&self, repo: &RepositoryHandle, what: &str) -> GitResult<()> {
        self.git_command(
            &["-c", "advice.detachedHead=false", "checkout", "-q", what, "--"],
            repo.path(),
        )
        .map_err(|e| match e {
            GitError::CommandFailed { message, .. } => GitError::CheckoutFailed {
                what: what.to_string(),
                message,
            },
            other => other,
        })?;
        Ok(())
    }

    fn create_branch(&self, repo: &RepositoryHandle, name: &str, from: &str) -> GitResult<()> {
        self.git_command(&["branch", name, from], repo.path())
            .map_err(|e| match e {
                GitError::CommandFailed { message, .. }
                    if message.contains("not a valid object name") =>
                {
                    GitError::BranchNotFound {
                        branch: from.to_string(),
                    }
                }
                other => other,
            })?;
        Ok(())
    }

    fn stage_paths(&self, repo: &RepositoryHandle, paths: &[PathBuf]) -> GitResult<()> {
        let mut args = vec!["add", "--"];
        for path in paths {
            args.push(path_arg(path)?);
        }
        self.git_command(&args, repo.path())?;
        Ok(())
    }

    fn stage_all(&self, repo: &RepositoryHandle) -> GitResult<()> {
        self.git_command(&["add", "-A"], repo.path())?;
        Ok(())
    }

    fn commit(&self, repo: &RepositoryHandle, message: &str) -> GitResult<String> {
        self.git_command(&["commit", "-q", "-m", message], repo.path())?;
        let id = self.git_command(&["rev-parse", "HEAD"], repo.path())?;
        if !is_commit_id(&id) {
            return Err(GitError::UnexpectedOutput {
                command: "git rev-parse HEAD".to_string(),
                output: id,
            });
        }
        Ok(id)
    }

    fn commit_message(&self, repo: &RepositoryHandle, id: &str) -> GitResult<String> {
        self.git_command(&["log", "-1", "--format=%B", id], repo.path())
    }

    fn list_remotes(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>> {
        let repo = Self::open_repo(repo)?;
        let mut names: Vec<String> = repo
            .remote_names()
            .into_iter()
            .map(|name| name.to_string())
            .collect();
        names.sort();
        Ok(names)
    }

    fn push(
        &self,
        repo: &RepositoryHandle,
        remote: &str,
        local_branch: &str,
        remote_branch: &str,
        set_upstream: bool,
    ) -> GitResult<()> {
        let refspec = format!("refs/heads/{local_branch}:refs/heads/{remote_branch}");
        let mut args = vec!["push", "--quiet"];
        if set_upstream {
            args.push("--set-upstream");
        }
        args.extend([remote, refspec.as_str()]);
        self.git_command(&args, repo.path())?;
        Ok(())
    }

    fn is_dirty(&self, repo: &RepositoryHandle) -> GitResult<bool> {
        Ok(self.porcelain_status(repo)?.is_dirty())
    }

    fn untracked_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>> {
        Ok(self.porcelain_status(repo)?.untracked)
    }

    fn unstaged_modified_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>> {
        Ok(self.porcelain_status(repo)?.unstaged)
    }

    fn staged_files(&self, repo: &RepositoryHandle) -> GitResult<Vec<String>> {
        Ok(self.porcelain_status(repo)?.staged)
    }

    fn working_tree_status(&self, repo: &RepositoryHandle) -> GitResult<PorcelainStatus> {
        self.porcelain_status(repo)
    }
}

#[cfg(test)]
mod tests;
