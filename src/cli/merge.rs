// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Arguments of the commands that combine or install mods.
//!
//! # Flag Effects
//!
//! ```text
//! merge --no-init    no <modid>_init.lua, parents' init files not copied
//! merge --overwrite  replace an earlier merge with the same modid
//! install --force    replace an installed mod with the same modid
//! ```
//!
//! `merge` flags override the `[merge]` config section.

use clap::Args;
use std::path::PathBuf;

/// Arguments for the `check` command.
#[derive(Debug, Clone, Default, Args)]
pub struct CheckArgs {
    /// First mod.
    #[arg(value_name = "A")]
    pub first: String,

    /// Second mod.
    #[arg(value_name = "B")]
    pub second: String,

    /// Look the mods up in this levelpack.
    #[arg(short = 'p', long = "levelpack", value_name = "NAME")]
    pub levelpack: Option<String>,
}

/// Arguments for the `merge` command.
#[derive(Debug, Clone, Default, Args)]
pub struct MergeArgs {
    /// First mod; its init runs first.
    #[arg(value_name = "A")]
    pub first: String,

    /// Second mod.
    #[arg(value_name = "B")]
    pub second: String,

    /// Lua directory to write the merged mod into
    /// (defaults to the directory holding A).
    #[arg(short = 'o', long = "output", value_name = "TARGET")]
    pub output: Option<PathBuf>,

    /// Modid of the merged mod (defaults to A+B).
    #[arg(long = "id", value_name = "ID")]
    pub id: Option<String>,

    /// Do not generate an init file.
    #[arg(long = "no-init")]
    pub no_init: bool,

    /// Replace an existing merged mod.
    #[arg(long)]
    pub overwrite: bool,

    /// Look the mods up in this levelpack.
    #[arg(short = 'p', long = "levelpack", value_name = "NAME")]
    pub levelpack: Option<String>,
}

/// Arguments for the `install` command.
#[derive(Debug, Clone, Default, Args)]
pub struct InstallArgs {
    /// Mod directory to install.
    #[arg(value_name = "MOD")]
    pub path: PathBuf,

    /// Install into this levelpack instead of the global Lua/.
    #[arg(short = 'p', long = "levelpack", value_name = "NAME")]
    pub levelpack: Option<String>,

    /// Replace an installed mod with the same modid.
    #[arg(short = 'f', long)]
    pub force: bool,
}
