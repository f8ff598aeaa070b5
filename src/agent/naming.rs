// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Collision-free branch naming.
//!
//! ```text
//! base        taken?  -> base-1  taken? -> base-2 ... (linear probe)
//! ```
//!
//! Suffixes are probed in order; a deleted intermediate suffix is only reused
//! when it is the next probe.

use std::collections::BTreeSet;

use crate::error::{AgentError, AgentResult};

/// Default probe limit for [`unique_branch_name`].
pub const DEFAULT_MAX_ATTEMPTS: usize = 1000;

/// Pick the first name in `base, base-1, base-2, ...` not in `existing`.
///
/// `max_attempts` counts every candidate, including `base` itself.
///
/// # Errors
///
/// Returns `AgentError::NamingExhausted` if no free name is found within
/// `max_attempts` candidates.
pub fn unique_branch_name(
    base: &str,
    existing: &BTreeSet<String>,
    max_attempts: usize,
) -> AgentResult<String> {
    let candidates =
        std::iter::once(base.to_string()).chain((1..).map(|n| format!("{base}-{n}")));

    candidates
        .take(max_attempts)
        .find(|candidate| !existing.contains(candidate))
        .ok_or_else(|| AgentError::NamingExhausted {
            base: base.to_string(),
            attempts: max_attempts,
        })
}
