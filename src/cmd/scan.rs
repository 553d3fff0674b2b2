// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Scan command implementation.

use crate::cli::mods::ScanArgs;
use crate::cmd::context::{load_catalog, resolve_mod};
use crate::config::Config;
use crate::error::Result;
use crate::lua::OverrideScanner;

/// Main handler for scan command.
///
/// # Errors
///
/// Returns an error if the mod or catalog cannot be loaded, or the mod
/// overrides a function twice.
pub fn run_scan_command(args: &ScanArgs, config: &Config) -> Result<()> {
    let item = resolve_mod(&args.target, args.levelpack.as_deref(), config)?;
    let catalog = load_catalog(config)?;
    let set = OverrideScanner::new(&catalog).scan_mod(&item)?;

    if set.is_empty() {
        println!("{} overrides no game function", item.modid());
    } else {
        println!("{} overrides {} game function(s):", item.modid(), set.len());
    }
    let width = set.names().map(str::len).max().unwrap_or(0);
    for entry in set.iter() {
        println!("  {:<width$}  {}", entry.name, entry.location);
        if args.bodies {
            for line in entry.body.lines() {
                println!("    | {line}");
            }
        }
    }

    if !set.hooks().is_empty() {
        println!("hooks:");
        for hook in set.hooks() {
            println!("  {} = {}  {}", hook.alias, hook.target, hook.location);
        }
    }
    Ok(())
}
