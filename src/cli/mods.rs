// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the inspection commands.
//!
//! ```text
//! <MOD> is a mod directory path, or a modid / folder name looked up in
//! the game's Lua/ (or the levelpack's Lua/ with --levelpack).
//! ```

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `validate` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ValidateArgs {
    /// Config.json files or mod directories.
    #[arg(value_name = "PATH", required = true)]
    pub paths: Vec<PathBuf>,
}

/// Arguments for the `scan` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ScanArgs {
    /// Mod to scan.
    #[arg(value_name = "MOD")]
    pub target: String,

    /// Look the mod up in this levelpack.
    #[arg(short = 'p', long = "levelpack", value_name = "NAME")]
    pub levelpack: Option<String>,

    /// Print each override's source text.
    #[arg(short = 'b', long)]
    pub bodies: bool,
}

/// Arguments for the `list` command.
#[derive(Debug, Clone, Default, Args)]
pub struct ListArgs {
    /// List the mods of this levelpack instead of the global ones.
    #[arg(short = 'p', long = "levelpack", value_name = "NAME", conflicts_with = "levelpacks")]
    pub levelpack: Option<String>,

    /// List levelpacks instead of mods.
    #[arg(long)]
    pub levelpacks: bool,

    /// Include the game's own levelpacks with --levelpacks.
    #[arg(short = 'a', long)]
    pub all: bool,

    /// Also show the functions each mod overrides.
    #[arg(short = 'o', long)]
    pub overrides: bool,

    /// Only mods whose modid or folder matches this glob.
    #[arg(value_name = "PATTERN")]
    pub pattern: Option<String>,
}

/// Arguments for the `catalog` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CatalogArgs {
    /// Check these names instead of listing the catalog.
    #[arg(value_name = "NAME")]
    pub names: Vec<String>,

    /// Build the catalog from the game's Data/*.lua instead.
    #[arg(long = "from-game")]
    pub from_game: bool,

    /// Write the catalog to FILE in data file format.
    #[arg(short = 'w', long = "write", value_name = "FILE")]
    pub write: Option<PathBuf>,
}
