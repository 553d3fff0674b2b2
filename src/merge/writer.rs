// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use super::init::parent_init_name;
use super::{MergeOptions, MergedMod};
use crate::error::{FsError, GameError, ModsError, ModsResult};
use crate::mods::CONFIG_FILE_NAME;
use crate::utility::fs::copy::copy_dir_contents;
use crate::utility::fs::same_path;

/// Writes a planned merge under `options.target()`.
///
/// The tree is built in a temporary directory inside the target and moved
/// into place at the end. If anything fails before that, the target is
/// left as it was. Returns the merged mod's directory.
///
/// # Errors
///
/// - `FsError::AlreadyExists` if the merged mod or its init file exists
///   and `overwrite` is off.
/// - `GameError::ReplacesSource` if the merged mod or its init file would
///   land on a parent's directory or init file.
/// - `FsError` for any failed copy or write.
pub fn write_merged(merged: &MergedMod, options: &MergeOptions) -> ModsResult<PathBuf> {
    let target = options.target();
    fs::create_dir_all(target).map_err(|e| FsError::io(target, e))?;

    let mod_dir = merged.dir_in(target);
    let init_file = merged.init_path_in(target);
    refuse_replacing_parents(merged, &mod_dir, &init_file)?;
    if !options.overwrite() {
        for existing in [&mod_dir, &init_file] {
            if existing.exists() {
                return Err(FsError::AlreadyExists(existing.display().to_string()).into());
            }
        }
    }

    let staging = tempfile::Builder::new()
        .prefix(".babamm-merge-")
        .tempdir_in(target)
        .map_err(|e| FsError::io(target, e))?;
    let staged_dir = staging.path().join(merged.modid());
    let staged_init = staging.path().join(parent_init_name(merged.modid()));
    debug!(staging = %staging.path().display(), "staging merged mod");

    stage_tree(merged, &staged_dir)?;
    if let Some(text) = merged.init_lua() {
        fs::write(&staged_init, text).map_err(|e| FsError::io(&staged_init, e))?;
    }

    if options.overwrite() {
        remove_existing(&mod_dir, &init_file)?;
    }
    fs::rename(&staged_dir, &mod_dir).map_err(|e| FsError::io(&mod_dir, e))?;
    if merged.init_lua().is_some()
        && let Err(e) = fs::rename(&staged_init, &init_file)
    {
        if let Err(cleanup) = fs::remove_dir_all(&mod_dir) {
            warn!(dir = %mod_dir.display(), error = %cleanup, "could not remove partial merge");
        }
        return Err(FsError::io(&init_file, e).into());
    }

    info!(modid = merged.modid(), dir = %mod_dir.display(), "wrote merged mod");
    Ok(mod_dir)
}

fn refuse_replacing_parents(merged: &MergedMod, mod_dir: &Path, init_file: &Path) -> ModsResult<()> {
    for parent in merged.parents() {
        let hits_dir = same_path(mod_dir, &parent.dir)
            || parent.dir.starts_with(mod_dir)
            || same_path(init_file, &parent.dir);
        let hits_init = parent
            .init
            .as_ref()
            .is_some_and(|init| same_path(init_file, init) || same_path(mod_dir, init));
        if hits_dir || hits_init {
            return Err(GameError::ReplacesSource {
                modid: parent.modid.clone(),
                path: mod_dir.display().to_string(),
            }
            .into());
        }
    }
    Ok(())
}

fn stage_tree(merged: &MergedMod, staged_dir: &Path) -> ModsResult<()> {
    fs::create_dir_all(staged_dir).map_err(|e| FsError::io(staged_dir, e))?;

    let config = staged_dir.join(CONFIG_FILE_NAME);
    let json = merged
        .descriptor()
        .to_json()
        .map_err(|e| ModsError::Other(e.to_string().into_boxed_str()))?;
    fs::write(&config, json).map_err(|e| FsError::io(&config, e))?;

    for parent in merged.parents() {
        let dest = staged_dir.join(&parent.modid);
        copy_dir_contents(&parent.dir, &dest).map_err(|e| FsError::CopyFailed {
            from: parent.dir.display().to_string(),
            to: dest.display().to_string(),
            message: format!("{e:#}"),
        })?;

        if merged.init_lua().is_some()
            && let Some(init) = &parent.init
        {
            let dest = staged_dir.join(parent_init_name(&parent.modid));
            fs::copy(init, &dest).map_err(|e| FsError::io(init, e))?;
        }
        debug!(parent = %parent.modid, "staged parent");
    }
    Ok(())
}

fn remove_existing(mod_dir: &Path, init_file: &Path) -> ModsResult<()> {
    if mod_dir.is_dir() {
        fs::remove_dir_all(mod_dir).map_err(|e| FsError::io(mod_dir, e))?;
    }
    if init_file.is_file() {
        fs::remove_file(init_file).map_err(|e| FsError::io(init_file, e))?;
    }
    Ok(())
}
