// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{AgentError, AgentResult, ConfigError, GitError};
use std::error::Error as _;
use std::path::PathBuf;

fn command_failed(message: &str) -> GitError {
    GitError::CommandFailed {
        command: "git branch feature main".to_string(),
        message: message.to_string(),
    }
}

#[test]
fn test_config_error_display() {
    let err = ConfigError::MissingKey {
        section: "agent".to_string(),
        key: "default_remote".to_string(),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"missing required config key 'default_remote' in section '[agent]'"
    );
}

#[test]
fn test_vcs_operation_display_without_rollback() {
    let err = AgentError::vcs("create branch", command_failed("already exists"));
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to create branch: git command failed: git branch feature main - already exists"
    );
}

#[test]
fn test_vcs_operation_display_with_rollback() {
    let err = AgentError::VcsOperation {
        operation: "create branch",
        source: Box::new(command_failed("already exists")),
        rollback: Some(Box::new(GitError::BranchNotFound {
            branch: "dev".to_string(),
        })),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to create branch: git command failed: git branch feature main - already exists (rollback also failed: branch not found: dev)"
    );
    assert!(matches!(
        err.rollback_error(),
        Some(GitError::BranchNotFound { .. })
    ));
}

#[test]
fn test_vcs_operation_keeps_source_chain() {
    let err = AgentError::vcs("push", GitError::RemoteNotFound {
        remote: "upstream".to_string(),
    });
    let source = err.source().expect("source should be attached");
    assert_eq!(source.to_string(), "remote not found: upstream");
    assert!(matches!(
        err.git_error(),
        Some(GitError::RemoteNotFound { .. })
    ));
}

#[test]
fn test_initialization_display() {
    let err = AgentError::Initialization {
        path: PathBuf::from("/srv/repo"),
        source: Box::new(GitError::InvalidPath("/srv/repo".to_string())),
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"failed to initialize repository at /srv/repo: invalid path: /srv/repo"
    );
}

#[test]
fn test_naming_exhausted_display() {
    let err = AgentError::NamingExhausted {
        base: "feature".to_string(),
        attempts: 3,
    };
    insta::assert_snapshot!(
        err.to_string(),
        @"no free branch name for 'feature' after 3 attempts"
    );
    assert!(err.git_error().is_none());
}

#[test]
fn test_agent_result_size() {
    // Engine errors are boxed, so the caller-facing result stays small.
    let size = std::mem::size_of::<AgentResult<()>>();
    assert!(size <= 48, "AgentResult<()> is {size} bytes, expected <= 48");
}
