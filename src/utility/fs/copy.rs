// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Copying mod trees.
//!
//! Both copies walk the source with [`WalkOptions::for_mod_tree`], so VCS
//! metadata and hidden files stay behind. Existing files at the
//! destination are overwritten.

use super::walk::{WalkOptions, WalkResult, parallel_walk};
use crate::error::Result;
use anyhow::Context;
use std::path::{Path, PathBuf};
use tokio::fs;

type CopyPlan = (Vec<PathBuf>, Vec<(PathBuf, PathBuf)>);

/// Destination of every directory and file of `tree`, rooted at `dst`.
fn plan(src: &Path, dst: &Path, tree: &WalkResult) -> Result<CopyPlan> {
    let relocate = |path: &Path| -> Result<PathBuf> {
        let relative = path
            .strip_prefix(src)
            .with_context(|| format!("{} is outside {}", path.display(), src.display()))?;
        Ok(dst.join(relative))
    };

    let mut dirs = vec![dst.to_path_buf()];
    for dir in tree.directories() {
        dirs.push(relocate(dir)?);
    }
    let files = tree
        .files()
        .iter()
        .map(|file| Ok((file.clone(), relocate(file)?)))
        .collect::<Result<Vec<_>>>()?;
    Ok((dirs, files))
}

/// Copies everything under `src` into `dst`, creating `dst`.
///
/// # Example
/// ```no_run
/// use baba_mods::utility::fs::copy::copy_dir_contents_async;
/// use std::path::Path;
///
/// # async fn example() -> anyhow::Result<()> {
/// copy_dir_contents_async(Path::new("mods/Glitter"), Path::new("Baba Is You/Lua/Glitter")).await?;
/// # Ok(())
/// # }
/// ```
///
/// # Errors
///
/// Fails when `src` cannot be walked or any directory or file cannot be
/// written.
pub async fn copy_dir_contents_async(src: &Path, dst: &Path) -> Result<()> {
    let root = src.to_path_buf();
    let tree =
        tokio::task::spawn_blocking(move || parallel_walk(&root, &WalkOptions::for_mod_tree()))
            .await??;
    let (dirs, files) = plan(src, dst, &tree)?;

    for dir in &dirs {
        fs::create_dir_all(dir)
            .await
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    for (from, to) in &files {
        fs::copy(from, to)
            .await
            .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}

/// Copies one file, creating the destination's parent directories.
///
/// # Errors
///
/// Fails when the parent cannot be created or the copy fails.
pub async fn copy_file_async(src: &Path, dst: &Path) -> Result<()> {
    if let Some(parent) = dst.parent() {
        fs::create_dir_all(parent)
            .await
            .with_context(|| format!("failed to create directory {}", parent.display()))?;
    }
    fs::copy(src, dst)
        .await
        .with_context(|| format!("failed to copy {} to {}", src.display(), dst.display()))?;
    Ok(())
}

/// Blocking counterpart of [`copy_dir_contents_async`].
///
/// # Errors
///
/// Same as [`copy_dir_contents_async`].
pub fn copy_dir_contents(src: &Path, dst: &Path) -> Result<()> {
    let tree = parallel_walk(src, &WalkOptions::for_mod_tree())?;
    let (dirs, files) = plan(src, dst, &tree)?;

    for dir in &dirs {
        std::fs::create_dir_all(dir)
            .with_context(|| format!("failed to create directory {}", dir.display()))?;
    }
    for (from, to) in &files {
        std::fs::copy(from, to)
            .with_context(|| format!("failed to copy {} to {}", from.display(), to.display()))?;
    }
    Ok(())
}
