// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Install command implementation.

use crate::cli::merge::InstallArgs;
use crate::cmd::context::locate_game;
use crate::config::Config;
use crate::error::Result;
use crate::game::Installer;
use crate::mods::BabaMod;

/// Main handler for install command.
///
/// # Errors
///
/// Returns an error if the mod is invalid, the game or levelpack is not
/// found, or the mod is already installed without `--force`.
pub async fn run_install_command(args: &InstallArgs, config: &Config) -> Result<()> {
    let item = BabaMod::open(&args.path)?;
    let game = locate_game(config)?;
    let levelpack = args
        .levelpack
        .as_deref()
        .map(|name| game.levelpack(name))
        .transpose()?;

    let target = Installer::target_for(&item, levelpack.as_ref())?;
    let report = Installer::new(&game)
        .with_force(args.force)
        .install(&item, target)
        .await?;

    println!("installed {} to {}", item.modid(), report.mod_dir.display());
    if let Some(init) = &report.init {
        println!("  init    {}", init.display());
    }
    for sprite in &report.sprites {
        println!("  sprite  {}", sprite.display());
    }
    Ok(())
}
