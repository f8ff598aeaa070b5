// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parser for `git status --porcelain=v1 -z`.
//!
//! ```text
//! XY<space>PATH\0                 ordinary entry
//! XY<space>NEW\0ORIG\0            rename / copy (X or Y is R/C)
//!
//! X = index vs HEAD      -> staged
//! Y = worktree vs index  -> unstaged
//! ?? = untracked, !! = ignored (skipped)
//! ```

/// Files grouped by their state in the index and working tree.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PorcelainStatus {
    pub staged: Vec<String>,
    pub unstaged: Vec<String>,
    pub untracked: Vec<String>,
}

impl PorcelainStatus {
    /// Tracked changes in the index or working tree. Untracked files do not
    /// count.
    #[must_use]
    pub const fn is_dirty(&self) -> bool {
        !self.staged.is_empty() || !self.unstaged.is_empty()
    }
}

const fn is_change(code: char) -> bool {
    !matches!(code, ' ' | '?' | '!')
}

/// Parse NUL-separated porcelain v1 output.
///
/// Each list is sorted. Malformed entries (shorter than `XY PATH`) are
/// skipped.
#[must_use]
pub fn parse(output: &str) -> PorcelainStatus {
    let mut status = PorcelainStatus::default();
    let mut entries = output.split('\0').filter(|e| !e.is_empty());

    while let Some(entry) = entries.next() {
        let mut chars = entry.chars();
        let (Some(x), Some(y)) = (chars.next(), chars.next()) else {
            continue;
        };
        let Some(path) = entry.get(3..).filter(|p| !p.is_empty()) else {
            continue;
        };

        // Renames and copies carry the original path as a separate entry.
        if matches!(x, 'R' | 'C') || matches!(y, 'R' | 'C') {
            entries.next();
        }

        match (x, y) {
            ('?', '?') => status.untracked.push(path.to_string()),
            ('!', '!') => {}
            _ => {
                if is_change(x) {
                    status.staged.push(path.to_string());
                }
                if is_change(y) {
                    status.unstaged.push(path.to_string());
                }
            }
        }
    }

    status.staged.sort();
    status.unstaged.sort();
    status.untracked.sort();
    status
}
