// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! CLI module for babamm using clap derive.
//!
//! # Command Structure
//!
//! ```text
//! babamm [global options] <command>
//! validate <PATH>...
//! scan <MOD>
//! check <A> <B>
//! merge <A> <B> [-o TARGET] [--id ID] [--no-init] [--overwrite]
//! install <MOD> [--levelpack NAME] [--force]
//! list [--levelpack NAME | --levelpacks] [--overrides] [PATTERN]
//! catalog [NAME...] [--from-game] [--write FILE]
//! options | inis | version
//! ```

pub mod global;
pub mod merge;
pub mod mods;


use crate::cli::global::GlobalOptions;
use crate::cli::merge::{CheckArgs, InstallArgs, MergeArgs};
use crate::cli::mods::{CatalogArgs, ListArgs, ScanArgs, ValidateArgs};
use clap::{Parser, Subcommand};

/// Baba Is You Mod Manager
///
/// Validates, inspects, merges and installs Baba Is You Lua mods.
#[derive(Debug, Parser)]
#[command(
    name = "babamm",
    author,
    version,
    about = "Baba Is You Mod Manager",
    long_about = "baba-mods Copyright (C) 2026 Romeo Ahmed\n\
                  This program comes with ABSOLUTELY NO WARRANTY\n\
                  This is free software, and you are welcome to redistribute it\n\
                  under certain conditions; see LICENSE for details.\n\n\
                  Validates, inspects, merges and installs Baba Is You Lua mods.\n\n\
                  Two mods can be merged when they do not override the same\n\
                  game function; `babamm check A B` tells whether they can.\n\
                  See `babamm <command> --help` for more information about a command.",
    after_help = "CONFIG FILES:\n\n\
                  babamm reads `babamm.toml` from the current directory if present,\n\
                  then every --ini file in order, then BABAMM_<SECTION>__<KEY>\n\
                  environment variables, then --set overrides. Use --no-default-inis\n\
                  to skip babamm.toml. `babamm options` prints the result."
)]
pub struct Cli {
    /// Global options shared by all commands
    #[command(flatten)]
    pub global: GlobalOptions,

    /// Command to execute
    #[command(subcommand)]
    pub command: Option<Command>,
}

/// Available commands.
#[derive(Debug, Subcommand)]
pub enum Command {
    /// Shows the version.
    #[command(visible_alias = "-v")]
    Version,

    /// Lists all options and their values.
    Options,

    /// Lists the config files used by babamm.
    Inis,

    /// Validates Config.json files.
    Validate(ValidateArgs),

    /// Shows which game functions a mod overrides.
    Scan(ScanArgs),

    /// Tells whether two mods can be merged.
    Check(CheckArgs),

    /// Merges two mods into one.
    Merge(MergeArgs),

    /// Installs a mod into the game.
    Install(InstallArgs),

    /// Lists installed mods or levelpacks.
    List(ListArgs),

    /// Shows or rebuilds the function catalog.
    Catalog(CatalogArgs),
}

/// Parses command-line arguments.
#[must_use]
pub fn parse() -> Cli {
    Cli::parse()
}

/// Parses command-line arguments from an iterator.
pub fn parse_from<I, T>(iter: I) -> Cli
where
    I: IntoIterator<Item = T>,
    T: Into<std::ffi::OsString> + Clone,
{
    Cli::parse_from(iter)
}

/// Tries to parse command-line arguments, returning an error on failure.
///
/// # Errors
///
/// Returns a `clap::Error` if the arguments are invalid or if help/version information
/// was requested.
pub fn try_parse() -> Result<Cli, clap::Error> {
    Cli::try_parse()
}
