// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! List command implementation for babamm.
//!
//! ```text
//! list                 mods in Lua/
//! list -p NAME         mods in Data/Worlds/NAME/Lua/
//! list --overrides     + scanned functions and pairwise conflicts
//! list --levelpacks    levelpacks (game packs hidden unless --all)
//! ```

use std::collections::BTreeSet;

use crate::cli::mods::ListArgs;
use crate::cmd::context::{load_catalog, locate_game};
use crate::config::Config;
use crate::error::Result;
use crate::game::ModLibrary;
use crate::lua::OverrideSet;
use crate::mods::BabaMod;

/// Main handler for list command.
///
/// # Errors
///
/// Returns an error if the game, levelpack or catalog cannot be found, or
/// the pattern is not a valid glob.
pub fn run_list_command(args: &ListArgs, config: &Config) -> Result<()> {
    let game = locate_game(config)?;

    if args.levelpacks {
        let packs = game.levelpacks(config.game.respect_reserved_packs && !args.all)?;
        if packs.is_empty() {
            println!("No levelpacks found");
        }
        for pack in &packs {
            println!("{:<16} {pack}", pack.dir_name());
        }
        return Ok(());
    }

    let lua_dir = match &args.levelpack {
        Some(name) => game.levelpack(name)?.lua_dir(),
        None => game.global_mods_dir(),
    };
    let library = ModLibrary::discover(&lua_dir)?;

    let shown: BTreeSet<&str> = match &args.pattern {
        Some(pattern) => library.matching(pattern)?.into_iter().map(BabaMod::modid).collect(),
        None => library.mods().iter().map(BabaMod::modid).collect(),
    };

    if shown.is_empty() {
        println!("No mods found in {}", lua_dir.display());
    }

    let scans = if args.overrides {
        let catalog = load_catalog(config)?;
        Some(library.index(&catalog))
    } else {
        None
    };

    let mut scanned: Vec<(&str, &OverrideSet)> = Vec::new();
    for (index, item) in library.mods().iter().enumerate() {
        if !shown.contains(item.modid()) {
            continue;
        }
        println!("{}", format_mod(item));
        let Some(scans) = &scans else {
            continue;
        };
        match &scans[index] {
            Ok(set) if set.is_empty() => println!("    overrides nothing"),
            Ok(set) => {
                println!("    overrides {}", set.names().collect::<Vec<_>>().join(", "));
                scanned.push((item.modid(), set));
            }
            Err(e) => println!("    scan failed: {e}"),
        }
    }

    for (i, (left, left_set)) in scanned.iter().enumerate() {
        for (right, right_set) in &scanned[i + 1..] {
            let shared = left_set.conflicts_with(right_set);
            if !shared.is_empty() {
                println!("conflict: {left} <-> {right}: {}", shared.join(", "));
            }
        }
    }

    for rejected in library.rejected() {
        println!("invalid  {}: {}", rejected.dir.display(), rejected.error);
    }
    for loose in library.unmanaged() {
        println!("unmanaged  {}", loose.display());
    }
    Ok(())
}

/// One line per mod: modid, folder, scope and effective tags.
#[must_use]
pub fn format_mod(item: &BabaMod) -> String {
    let descriptor = item.descriptor();
    let scope = if descriptor.global { "global" } else { "levelpack" };
    let line = format!("{:<24} {:<20} {scope}", item.modid(), item.name());
    let tags = descriptor.effective_tags();
    if tags.is_empty() {
        line
    } else {
        format!("{line}  [{}]", tags.join(", "))
    }
}
