// repo-agent: Repository Automation Agent
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Config loading for the binary plus the `options` and `inis` commands.

use crate::cli::global::GlobalOptions;
use crate::config::loader::ConfigLoader;
use crate::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use crate::error::Result;

/// Layer every configuration source named by the global options.
///
/// # Errors
///
/// Returns an error if an override is not `section.key=value`.
pub fn config_loader(global: &GlobalOptions) -> Result<ConfigLoader> {
    let mut loader = ConfigLoader::new().add_toml_file_optional(LOCAL_CONFIG_FILE);
    for path in &global.configs {
        loader = loader.add_toml_file(path);
    }
    loader = loader.with_env_prefix(ENV_PREFIX);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    Ok(loader)
}

/// Load and validate the effective configuration.
///
/// # Errors
///
/// Returns an error if any source is invalid.
pub fn load_config(global: &GlobalOptions) -> Result<Config> {
    config_loader(global)?.build()
}

/// Print every effective setting as `key = value`.
pub fn run_options_command(config: &Config) {
    config
        .format_options()
        .iter()
        .for_each(|line| println!("{line}"));
}

/// Print the configuration files `loader` picked up, in load order.
pub fn run_inis_command(loader: &ConfigLoader) {
    let files = loader.format_loaded_files();
    if files.is_empty() {
        println!("no configuration files loaded");
    }
    for line in files {
        println!("{line}");
    }
}
