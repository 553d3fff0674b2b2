// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Catalog command implementation.

use anyhow::{Context, bail};
use tracing::info;

use crate::catalog::FunctionCatalog;
use crate::cli::mods::CatalogArgs;
use crate::cmd::context::{load_catalog, locate_game};
use crate::config::Config;
use crate::error::Result;

/// Main handler for catalog command.
///
/// With names, reports whether each is overridable and fails if one is
/// not. Otherwise lists the catalog or writes it with `--write`.
///
/// # Errors
///
/// Returns an error if the catalog cannot be loaded or written, or a
/// queried name is not in it.
pub fn run_catalog_command(args: &CatalogArgs, config: &Config) -> Result<()> {
    let catalog = if args.from_game {
        let game = locate_game(config)?;
        FunctionCatalog::from_game_sources(&game.data_dir())?
    } else {
        load_catalog(config)?
    };

    if !args.names.is_empty() {
        let missing: Vec<&str> = args
            .names
            .iter()
            .map(String::as_str)
            .filter(|name| !catalog.is_overridable(name))
            .collect();
        for name in &args.names {
            let status = if catalog.is_overridable(name) { "overridable" } else { "not in catalog" };
            println!("{name}: {status}");
        }
        if !missing.is_empty() {
            bail!("not in catalog {}: {}", catalog.origin(), missing.join(", "));
        }
        return Ok(());
    }

    if let Some(path) = &args.write {
        std::fs::write(path, catalog.to_data_file())
            .with_context(|| format!("failed to write {}", path.display()))?;
        info!(path = %path.display(), functions = catalog.len(), "wrote catalog");
        println!("wrote {} functions to {}", catalog.len(), path.display());
        return Ok(());
    }

    println!("# {} functions from {}", catalog.len(), catalog.origin());
    for name in catalog.iter() {
        println!("{name}");
    }
    Ok(())
}
