// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Branch creation workflow with rollback.
//!
//! ```text
//! RememberOrigin --> CheckoutBase --> CreateBranch --> CheckoutNew --> Done
//!                         |                |                |
//!                         +-------+--------+----------------+
//!                                 | failure
//!                                 v
//!                          rollback: checkout origin (once)
//! ```
//!
//! A failure during `RememberOrigin` has nothing to restore. Any later failure
//! triggers one rollback attempt; its error is attached to the primary one.

use tracing::{debug, info, warn};

use crate::error::{AgentError, AgentResult, GitError, GitResult};
use crate::git::{RepositoryHandle, VcsEngine};

/// Steps of [`BranchWorkflow`], in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BranchStep {
    RememberOrigin,
    CheckoutBase,
    CreateBranch,
    CheckoutNew,
    Done,
}

impl BranchStep {
    /// Operation name used in error messages.
    #[must_use]
    pub const fn operation(self) -> &'static str {
        match self {
            Self::RememberOrigin => "resolve current branch",
            Self::CheckoutBase => "checkout base branch",
            Self::CreateBranch => "create branch",
            Self::CheckoutNew => "checkout new branch",
            Self::Done => "finish branch creation",
        }
    }
}

/// Where HEAD was before the workflow started.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Origin {
    /// On a named branch.
    Branch(String),
    /// Detached at a commit.
    Detached(String),
    /// Detached with no commit to return to.
    Unborn,
}

impl Origin {
    /// Capture the current HEAD position.
    ///
    /// # Errors
    ///
    /// Returns a `GitError` if HEAD cannot be resolved.
    pub fn capture<E: VcsEngine>(engine: &E, repo: &RepositoryHandle) -> GitResult<Self> {
        if let Some(branch) = engine.current_branch(repo)? {
            return Ok(Self::Branch(branch));
        }
        Ok(engine
            .head_commit(repo)?
            .map_or(Self::Unborn, Self::Detached))
    }

    /// Ref to check out to return here, if any.
    #[must_use]
    pub fn checkout_target(&self) -> Option<&str> {
        match self {
            Self::Branch(name) | Self::Detached(name) => Some(name.as_str()),
            Self::Unborn => None,
        }
    }
}

/// Check out `origin` again. Attempted once; never retried.
///
/// # Errors
///
/// Returns the checkout error if restoring fails.
pub fn rollback<E: VcsEngine>(
    engine: &E,
    repo: &RepositoryHandle,
    origin: &Origin,
) -> GitResult<()> {
    let Some(target) = origin.checkout_target() else {
        debug!("no origin to restore");
        return Ok(());
    };
    info!(branch = target, "restoring original checkout");
    engine.checkout(repo, target)
}

/// Explicit state machine for creating and checking out a branch.
pub struct BranchWorkflow<'a, E: VcsEngine> {
    engine: &'a E,
    repo: &'a RepositoryHandle,
    base: &'a str,
    name: &'a str,
    step: BranchStep,
    origin: Option<Origin>,
}

impl<'a, E: VcsEngine> BranchWorkflow<'a, E> {
    pub const fn new(
        engine: &'a E,
        repo: &'a RepositoryHandle,
        base: &'a str,
        name: &'a str,
    ) -> Self {
        Self {
            engine,
            repo,
            base,
            name,
            step: BranchStep::RememberOrigin,
            origin: None,
        }
    }

    /// Step that runs next (or `Done`).
    #[must_use]
    pub const fn step(&self) -> BranchStep {
        self.step
    }

    /// Origin captured by the first step.
    #[must_use]
    pub const fn origin(&self) -> Option<&Origin> {
        self.origin.as_ref()
    }

    /// Execute the current step and move to the next one.
    ///
    /// # Errors
    ///
    /// Returns the engine error of the failing step; `step()` still reports
    /// that step afterwards.
    pub fn advance(&mut self) -> GitResult<BranchStep> {
        let next = match self.step {
            BranchStep::RememberOrigin => {
                self.origin = Some(Origin::capture(self.engine, self.repo)?);
                BranchStep::CheckoutBase
            }
            BranchStep::CheckoutBase => {
                self.engine.checkout(self.repo, self.base)?;
                BranchStep::CreateBranch
            }
            BranchStep::CreateBranch => {
                self.engine.create_branch(self.repo, self.name, self.base)?;
                BranchStep::CheckoutNew
            }
            BranchStep::CheckoutNew => {
                self.engine.checkout(self.repo, self.name)?;
                BranchStep::Done
            }
            BranchStep::Done => BranchStep::Done,
        };
        debug!(from = ?self.step, to = ?next, branch = self.name, "branch workflow step");
        self.step = next;
        Ok(next)
    }

    /// Run every remaining step, rolling back on failure.
    ///
    /// # Errors
    ///
    /// Returns `AgentError::VcsOperation` naming the failing step. If the
    /// rollback also failed, its error is attached as `rollback`.
    pub fn run(mut self) -> AgentResult<()> {
        loop {
            match self.advance() {
                Ok(BranchStep::Done) => return Ok(()),
                Ok(_) => {}
                Err(err) => return Err(self.fail(err)),
            }
        }
    }

    fn fail(&self, source: GitError) -> AgentError {
        warn!(
            step = ?self.step,
            branch = self.name,
            error = %source,
            "branch creation failed"
        );
        let rollback_error = self.origin.as_ref().and_then(|origin| {
            rollback(self.engine, self.repo, origin)
                .inspect_err(|e| warn!(error = %e, "rollback failed"))
                .err()
                .map(Box::new)
        });
        AgentError::VcsOperation {
            operation: self.step.operation(),
            source: Box::new(source),
            rollback: rollback_error,
        }
    }
}
