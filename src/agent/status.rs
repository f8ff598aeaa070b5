// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Point-in-time repository status.

use serde::{Serialize, Serializer};
use std::fmt;

/// Sentinel reported when HEAD is not on a named branch.
pub const DETACHED_HEAD: &str = "DETACHED_HEAD";

/// Current HEAD position as reported by status.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CurrentBranch {
    Named(String),
    Detached,
}

impl CurrentBranch {
    /// Branch name, or None when detached.
    #[must_use]
    pub fn name(&self) -> Option<&str> {
        match self {
            Self::Named(name) => Some(name.as_str()),
            Self::Detached => None,
        }
    }
}

impl From<Option<String>> for CurrentBranch {
    fn from(branch: Option<String>) -> Self {
        branch.map_or(Self::Detached, Self::Named)
    }
}

impl fmt::Display for CurrentBranch {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name().unwrap_or(DETACHED_HEAD))
    }
}

impl Serialize for CurrentBranch {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        serializer.serialize_str(self.name().unwrap_or(DETACHED_HEAD))
    }
}

/// Read-only snapshot of repository state, recomputed on every query.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct RepositoryStatus {
    pub current_branch: CurrentBranch,
    pub is_dirty: bool,
    pub untracked_files: Vec<String>,
    /// Modified in the working tree but not staged.
    pub modified_files: Vec<String>,
    pub staged_files: Vec<String>,
    pub remotes: Vec<String>,
    pub branches: Vec<String>,
}

impl RepositoryStatus {
    /// Human-readable multi-line summary.
    #[must_use]
    pub fn to_lines(&self) -> Vec<String> {
        let mut lines = vec![
            format!("branch:   {}", self.current_branch),
            format!("dirty:    {}", if self.is_dirty { "yes" } else { "no" }),
            format!("remotes:  {}", self.remotes.join(", ")),
            format!("branches: {}", self.branches.join(", ")),
        ];
        for (title, files) in [
            ("staged", &self.staged_files),
            ("modified", &self.modified_files),
            ("untracked", &self.untracked_files),
        ] {
            if files.is_empty() {
                continue;
            }
            lines.push(format!("{title}:"));
            lines.extend(files.iter().map(|f| format!("  {f}")));
        }
        lines
    }
}
