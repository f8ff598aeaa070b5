// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Version-control engine.
//!
//! ```text
//!        RepositoryAgent
//!               |
//!               v
//!      ,-------------------,
//!      | VcsEngine (trait) |
//!      '---------+---------'
//!                |
//!                v
//!           GitEngine
//!        /             \
//!   gix (read)        git CLI (write)
//!   .open             .clone / .checkout
//!   .current_branch   .branch / .add
//!   .local_branches   .commit / .push
//!   .remotes          .status --porcelain
//!                     .log
//! ```
//!
//! **gix**: pure Rust, no subprocess, read-only queries.
//! **git CLI**: credentials, transport and every mutation.

pub mod backend;
pub mod porcelain;

pub use backend::{CloneOptions, CommitIdentity, GitEngine, RepositoryHandle, VcsEngine};
pub use porcelain::PorcelainStatus;
