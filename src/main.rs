// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Entry point.
//!
//! ```text
//! cli::parse() --> Config --> Logging --> Command Dispatch
//!   Validate | Scan | Check | Merge | Install | List | Catalog | Config
//! ```

use std::process::ExitCode;

use baba_mods::cli::global::GlobalOptions;
use baba_mods::cli::{self, Command};
use baba_mods::cmd::catalog::run_catalog_command;
use baba_mods::cmd::config::{run_inis_command, run_options_command};
use baba_mods::cmd::install::run_install_command;
use baba_mods::cmd::list::run_list_command;
use baba_mods::cmd::merge::{run_check_command, run_merge_command};
use baba_mods::cmd::scan::run_scan_command;
use baba_mods::cmd::validate::run_validate_command;
use baba_mods::config::loader::ConfigLoader;
use baba_mods::config::{Config, ENV_PREFIX, LOCAL_CONFIG_FILE};
use baba_mods::error::{Result, bail_out};
use baba_mods::logging::init_logging;
use baba_mods::logging::{LogConfig, LogLevel};

use anyhow::Context;
use mimalloc::MiMalloc;

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

#[tokio::main]
async fn main() -> ExitCode {
    let cli = cli::parse();
    let config = load_config(&cli.global);

    let log_config = config.as_ref().map_or_else(
        |_| build_log_config(&cli.global),
        |config| LogConfig::from_global(&config.global),
    );
    let _log_guard = match init_logging(&log_config) {
        Ok(guard) => guard,
        Err(e) => {
            eprintln!("Failed to initialize logging: {e}");
            return ExitCode::FAILURE;
        }
    };

    dispatch_command(&cli, config).await
}

/// Logging from the CLI flags alone, used when the config does not load.
fn build_log_config(global: &GlobalOptions) -> LogConfig {
    let console_level = global
        .log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(LogLevel::INFO);

    let file_level = global
        .file_log_level
        .and_then(LogLevel::from_u8)
        .unwrap_or(console_level);

    LogConfig::builder()
        .with_console_level(console_level)
        .with_file_level(file_level)
        .maybe_with_log_file(global.log_file.clone())
        .with_json_file(global.log_json)
        .build()
}

async fn dispatch_command(cli: &cli::Cli, config: Result<Config>) -> ExitCode {
    let result = match &cli.command {
        Some(Command::Version) => {
            handle_version_command();
            Ok(())
        }
        Some(Command::Options) => config.map(|config| run_options_command(&config)),
        Some(Command::Inis) => {
            let loader = build_config_loader(&cli.global);
            run_inis_command(&loader.format_loaded_files());
            Ok(())
        }
        Some(Command::Validate(args)) => run_validate_command(args),
        Some(Command::Scan(args)) => config.and_then(|config| run_scan_command(args, &config)),
        Some(Command::Check(args)) => config.and_then(|config| run_check_command(args, &config)),
        Some(Command::Merge(args)) => config.and_then(|config| run_merge_command(args, &config)),
        Some(Command::Install(args)) => match config {
            Ok(config) => run_install_command(args, &config).await,
            Err(e) => Err(e),
        },
        Some(Command::List(args)) => config.and_then(|config| run_list_command(args, &config)),
        Some(Command::Catalog(args)) => {
            config.and_then(|config| run_catalog_command(args, &config))
        }
        None => {
            eprintln!("No command specified. Use --help for usage information.");
            Err(bail_out("no command specified").into())
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

fn handle_version_command() {
    println!("{}", env!("CARGO_PKG_VERSION"));
}

fn build_config_loader(global: &GlobalOptions) -> ConfigLoader {
    let mut loader = ConfigLoader::new();
    if !global.no_default_inis {
        loader = loader.add_toml_file_optional(LOCAL_CONFIG_FILE);
    }
    for ini_path in &global.inis {
        loader = loader.add_toml_file(ini_path);
    }
    loader.with_env_prefix(ENV_PREFIX)
}

/// Config files, env, then `--set` and the dedicated flags on top.
fn load_config(global: &GlobalOptions) -> Result<Config> {
    let mut loader = build_config_loader(global);
    for assignment in global.to_config_overrides() {
        loader = loader.set_assignment(&assignment)?;
    }
    loader.build().context("failed to load config")
}
