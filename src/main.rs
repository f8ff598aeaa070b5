// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> load config --> Logging --> Command Dispatch
//!   Clone | Branch | Commit | Push | Status | Options | Inis | Version
//! ```

use std::process::ExitCode;

use repo_agent::cli::{self, Command};
use repo_agent::cmd::config::{config_loader, load_config, run_inis_command, run_options_command};
use repo_agent::cmd::repo::{
    run_branch_command, run_clone_command, run_commit_command, run_push_command,
    run_status_command,
};
use repo_agent::config::Config;
use repo_agent::logging::{LogConfig, init_logging};

use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() -> ExitCode {
    let cli = cli::parse();

    let config = match load_config(&cli.global) {
        Ok(config) => config,
        Err(e) => {
            eprintln!("Failed to load config: {e:#}");
            return ExitCode::FAILURE;
        }
    };

    let _log_guard = match init_logging(&build_log_config(&config)) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, &config)
}

fn build_log_config(config: &Config) -> LogConfig {
    LogConfig::builder()
        .with_console_level(config.global.output_log_level)
        .with_file_level(config.global.file_log_level)
        .maybe_with_log_file(config.global.log_file.clone())
        .build()
}

fn dispatch_command(cli: &cli::Cli, config: &Config) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            println!("{}", env!("CARGO_PKG_VERSION"));
            Ok(())
        }
        Some(Command::Options) => {
            run_options_command(config);
            Ok(())
        }
        Some(Command::Inis) => {
            config_loader(&cli.global).map(|loader| run_inis_command(&loader))
        }
        Some(Command::Clone(args)) => run_clone_command(args, config),
        Some(Command::Branch(args)) => run_branch_command(args, config),
        Some(Command::Commit(args)) => run_commit_command(args, config),
        Some(Command::Push(args)) => run_push_command(args, config),
        Some(Command::Status(args)) => run_status_command(args, config),
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(anyhow::anyhow!("No command specified"))
        }
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            eprintln!("Error: {e:#}");
            ExitCode::FAILURE
        }
    }
}
