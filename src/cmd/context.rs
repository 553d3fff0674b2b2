// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lookups shared by the command handlers.
//!
//! ```text
//! <MOD> argument
//!   existing directory      -> BabaMod::open(dir)
//!   path to a Config.json   -> BabaMod::open(parent)
//!   otherwise               -> modid / folder in Lua/ (or <pack>/Lua/)
//! ```

use std::path::Path;

use anyhow::Context;
use tracing::debug;

use crate::catalog::FunctionCatalog;
use crate::config::Config;
use crate::error::Result;
use crate::game::{GameInstall, ModLibrary};
use crate::mods::{BabaMod, CONFIG_FILE_NAME};

/// Loads `catalog.file`, or else the packaged catalog plus the functions
/// of the installed game's sources when `catalog.game_sources` is on and
/// the game is found.
///
/// # Errors
///
/// Returns the catalog load error.
pub fn load_catalog(config: &Config) -> Result<FunctionCatalog> {
    let catalog = match &config.catalog.file {
        Some(path) => FunctionCatalog::from_file(path)?,
        None if config.catalog.game_sources => {
            let packaged = FunctionCatalog::packaged()?;
            match game_catalog(config) {
                Ok(game) => packaged.union(game),
                Err(e) => {
                    debug!(error = %format!("{e:#}"), "using the packaged catalog only");
                    packaged
                }
            }
        }
        None => FunctionCatalog::packaged()?,
    };
    debug!(origin = catalog.origin(), functions = catalog.len(), "catalog ready");
    Ok(catalog)
}

fn game_catalog(config: &Config) -> Result<FunctionCatalog> {
    let game = locate_game(config)?;
    FunctionCatalog::from_game_sources(&game.data_dir())
}

/// Finds the game installation from `[game]`.
///
/// # Errors
///
/// Returns `GameError::InstallNotFound` if there is none.
pub fn locate_game(config: &Config) -> Result<GameInstall> {
    GameInstall::locate(&config.game)
}

/// Resolves a `<MOD>` argument.
///
/// # Errors
///
/// Returns the mod's open error, a game lookup error, or an error if no
/// installed mod has that modid or folder name.
pub fn resolve_mod(spec: &str, levelpack: Option<&str>, config: &Config) -> Result<BabaMod> {
    let path = Path::new(spec);
    if path.is_dir() {
        return Ok(BabaMod::open(path)?);
    }
    if path.is_file()
        && path.file_name().is_some_and(|name| name == CONFIG_FILE_NAME)
        && let Some(parent) = path.parent()
    {
        return Ok(BabaMod::open(parent)?);
    }

    let game = locate_game(config)?;
    let lua_dir = match levelpack {
        Some(name) => game.levelpack(name)?.lua_dir(),
        None => game.global_mods_dir(),
    };
    let library = ModLibrary::discover(&lua_dir)?;
    library
        .find(spec)
        .cloned()
        .with_context(|| format!("no mod '{spec}' in {}", lua_dir.display()))
}
