// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use crate::cli::repo::StatusFormat;
use crate::cli::{Cli, Command};
use clap::Parser;
use std::path::PathBuf;

#[test]
fn test_parse_version() {
    let cli = Cli::try_parse_from(["repo-agent", "version"]).unwrap();
    assert!(matches!(cli.command, Some(Command::Version)));
}

#[test]
fn test_parse_no_command() {
    let cli = Cli::try_parse_from(["repo-agent"]).unwrap();
    assert!(cli.command.is_none());
}

#[test]
fn test_parse_global_options() {
    let cli = Cli::try_parse_from([
        "repo-agent",
        "-C",
        "/tmp/work",
        "-l",
        "5",
        "-i",
        "a.toml",
        "--config",
        "b.toml",
        "-s",
        "agent.default_remote=upstream",
        "status",
    ])
    .unwrap();

    assert_eq!(cli.global.repo, Some(PathBuf::from("/tmp/work")));
    assert_eq!(cli.global.log_level, Some(5));
    assert_eq!(
        cli.global.configs,
        vec![PathBuf::from("a.toml"), PathBuf::from("b.toml")]
    );
    assert_eq!(cli.global.options, vec!["agent.default_remote=upstream"]);
}

#[test]
fn test_global_options_after_subcommand() {
    let cli = Cli::try_parse_from(["repo-agent", "status", "-l", "4"]).unwrap();
    assert_eq!(cli.global.log_level, Some(4));
}

#[test]
fn test_log_level_out_of_range() {
    assert!(Cli::try_parse_from(["repo-agent", "-l", "7", "version"]).is_err());
}

#[test]
fn test_config_overrides_order() {
    let cli = Cli::try_parse_from([
        "repo-agent",
        "-s",
        "clone.depth=2",
        "-l",
        "4",
        "--log-file",
        "agent.log",
        "-C",
        "work",
        "options",
    ])
    .unwrap();

    assert_eq!(
        cli.global.to_config_overrides(),
        vec![
            "clone.depth=2",
            "global.output_log_level=4",
            "global.file_log_level=4",
            "global.log_file=agent.log",
            "agent.path=work",
        ]
    );
}

#[test]
fn test_file_log_level_independent() {
    let cli = Cli::try_parse_from(["repo-agent", "--file-log-level", "6", "options"]).unwrap();
    assert_eq!(
        cli.global.to_config_overrides(),
        vec!["global.file_log_level=6"]
    );
}

#[test]
fn test_parse_clone() {
    let cli = Cli::try_parse_from([
        "repo-agent",
        "clone",
        "https://example.com/repo.git",
        "-b",
        "dev",
        "-d",
        "out",
        "--depth",
        "1",
    ])
    .unwrap();

    let Some(Command::Clone(args)) = cli.command else {
        panic!("expected clone command");
    };
    assert_eq!(args.url, "https://example.com/repo.git");
    assert_eq!(args.branch.as_deref(), Some("dev"));
    assert_eq!(args.destination, Some(PathBuf::from("out")));
    assert_eq!(args.depth, Some(1));
}

#[test]
fn test_parse_clone_zero_depth_rejected() {
    assert!(Cli::try_parse_from(["repo-agent", "clone", "url", "--depth", "0"]).is_err());
}

#[test]
fn test_parse_branch() {
    let cli = Cli::try_parse_from(["repo-agent", "branch", "feature", "--from", "dev"]).unwrap();

    let Some(Command::Branch(args)) = cli.command else {
        panic!("expected branch command");
    };
    assert_eq!(args.base_name, "feature");
    assert_eq!(args.from.as_deref(), Some("dev"));
}

#[test]
fn test_parse_commit() {
    let cli =
        Cli::try_parse_from(["repo-agent", "commit", "-m", "update", "a.txt", "b/c.txt"]).unwrap();

    let Some(Command::Commit(args)) = cli.command else {
        panic!("expected commit command");
    };
    assert_eq!(args.message, "update");
    assert_eq!(
        args.files,
        vec![PathBuf::from("a.txt"), PathBuf::from("b/c.txt")]
    );
}

#[test]
fn test_parse_commit_requires_message() {
    assert!(Cli::try_parse_from(["repo-agent", "commit"]).is_err());
}

#[test]
fn test_parse_push_defaults() {
    let cli = Cli::try_parse_from(["repo-agent", "push"]).unwrap();

    let Some(Command::Push(args)) = cli.command else {
        panic!("expected push command");
    };
    assert!(args.branch.is_none());
    assert!(args.remote.is_none());
}

#[test]
fn test_parse_status_format() {
    let cli = Cli::try_parse_from(["repo-agent", "status", "--format", "json"]).unwrap();

    let Some(Command::Status(args)) = cli.command else {
        panic!("expected status command");
    };
    assert_eq!(args.format, StatusFormat::Json);

    let cli = Cli::try_parse_from(["repo-agent", "status"]).unwrap();
    let Some(Command::Status(args)) = cli.command else {
        panic!("expected status command");
    };
    assert_eq!(args.format, StatusFormat::Text);
}
