// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Check and merge command implementations.
//!
//! ```text
//! resolve A, B --> scan both --> check_compatibility --> report
//!                            \-> merge_plan --> write_merged
//! ```

use tracing::info;

use crate::cli::merge::{CheckArgs, MergeArgs};
use crate::cmd::context::{load_catalog, resolve_mod};
use crate::config::Config;
use crate::error::{MergeConflictError, ModsError, Result};
use crate::lua::OverrideScanner;
use crate::merge::{CompatibilityReport, MergeInput, MergeOptions, check_compatibility, merge_plan, write_merged};

/// Main handler for check command.
///
/// # Errors
///
/// Returns `MergeConflictError` if the mods override a common function,
/// or a lookup/scan error.
pub fn run_check_command(args: &CheckArgs, config: &Config) -> Result<()> {
    let a = resolve_mod(&args.first, args.levelpack.as_deref(), config)?;
    let b = resolve_mod(&args.second, args.levelpack.as_deref(), config)?;
    let catalog = load_catalog(config)?;
    let scanner = OverrideScanner::new(&catalog);

    let left = MergeInput::scan(&a, &scanner)?;
    let right = MergeInput::scan(&b, &scanner)?;
    let report = check_compatibility(&left, &right);

    for line in format_report(&report) {
        println!("{line}");
    }

    if report.is_mergeable() {
        println!("{} and {} can be merged", a.modid(), b.modid());
        Ok(())
    } else {
        Err(ModsError::from(MergeConflictError {
            left: a.modid().to_string(),
            right: b.modid().to_string(),
            functions: report.functions,
        })
        .into())
    }
}

/// Lines describing every overlap in `report`.
#[must_use]
pub fn format_report(report: &CompatibilityReport) -> Vec<String> {
    let mut lines = Vec::new();
    if !report.functions.is_empty() {
        lines.push(format!("both override: {}", report.functions.join(", ")));
    }
    if !report.sprites.is_empty() {
        lines.push(format!("both replace sprites: {}", report.sprites.join(", ")));
    }
    if !report.files.is_empty() {
        lines.push(format!("both list files: {}", report.files.join(", ")));
    }
    if report.is_compatible() {
        lines.push("no overlap".to_string());
    }
    lines
}

/// Main handler for merge command.
///
/// The target defaults to the Lua directory holding A. `--no-init` and
/// `--overwrite` take precedence over `[merge]`.
///
/// # Errors
///
/// Returns the conflict, lookup, scan or write error. Nothing is written
/// when the mods conflict.
pub fn run_merge_command(args: &MergeArgs, config: &Config) -> Result<()> {
    let a = resolve_mod(&args.first, args.levelpack.as_deref(), config)?;
    let b = resolve_mod(&args.second, args.levelpack.as_deref(), config)?;
    let catalog = load_catalog(config)?;
    let scanner = OverrideScanner::new(&catalog);

    let left = MergeInput::scan(&a, &scanner)?;
    let right = MergeInput::scan(&b, &scanner)?;

    let target = args
        .output
        .clone()
        .unwrap_or_else(|| a.lua_dir().to_path_buf());
    let options = MergeOptions::builder()
        .with_target(target)
        .maybe_with_modid(args.id.clone())
        .with_include_init(config.merge.include_init && !args.no_init)
        .with_overwrite(config.merge.overwrite || args.overwrite)
        .build();

    let merged = merge_plan(&left, &right, &options)?;
    let dir = write_merged(&merged, &options)?;

    info!(modid = merged.modid(), overrides = merged.overrides().len(), "merge complete");
    println!("merged {} and {} into {}", a.modid(), b.modid(), dir.display());
    if merged.init_lua().is_some() {
        println!("init: {}", merged.init_path_in(options.target()).display());
    }
    Ok(())
}
