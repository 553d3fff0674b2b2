// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Parallel traversal of mod trees.
//!
//! `ignore` workers push every entry through one flume channel; the
//! collecting side splits files from directories and sorts both, so two
//! walks of the same tree always list paths in the same order.

use crate::error::Result;
use bon::Builder;
use ignore::{DirEntry, WalkBuilder, WalkState};
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// VCS metadata that never belongs to a mod.
const VCS_DIRS: [&str; 3] = [".git", ".hg", ".svn"];

/// What a walk visits.
#[derive(Debug, Clone, Builder)]
pub struct WalkOptions {
    /// Deepest level below the root to visit; unlimited when unset.
    #[builder(setters(name = with_max_depth))]
    max_depth: Option<usize>,
    #[builder(setters(name = with_include_hidden), default = false)]
    include_hidden: bool,
    /// Honour `.gitignore` and `.ignore` files found in the tree.
    #[builder(setters(name = with_respect_ignore_files), default = true)]
    respect_ignore_files: bool,
    /// Directory names never descended into.
    #[builder(setters(name = with_skip_dirs), default)]
    skip_dirs: Vec<String>,
}

impl Default for WalkOptions {
    fn default() -> Self {
        Self::builder().build()
    }
}

impl WalkOptions {
    /// Every file a mod ships counts, so ignore files are not honoured.
    #[must_use]
    pub fn for_mod_tree() -> Self {
        Self::builder()
            .with_respect_ignore_files(false)
            .with_skip_dirs(VCS_DIRS.iter().map(ToString::to_string).collect())
            .build()
    }

    #[must_use]
    pub const fn max_depth(&self) -> Option<usize> {
        self.max_depth
    }

    #[must_use]
    pub const fn include_hidden(&self) -> bool {
        self.include_hidden
    }

    #[must_use]
    pub const fn respect_ignore_files(&self) -> bool {
        self.respect_ignore_files
    }

    #[must_use]
    pub fn skip_dirs(&self) -> &[String] {
        &self.skip_dirs
    }

    fn skips(&self, entry: &DirEntry) -> bool {
        entry.file_type().is_some_and(|ft| ft.is_dir())
            && entry
                .file_name()
                .to_str()
                .is_some_and(|name| self.skip_dirs.iter().any(|skip| skip == name))
    }

    fn walker(&self, root: &Path) -> WalkBuilder {
        let mut builder = WalkBuilder::new(root);
        builder
            .max_depth(self.max_depth)
            .hidden(!self.include_hidden)
            .ignore(self.respect_ignore_files)
            .git_ignore(self.respect_ignore_files)
            .git_global(self.respect_ignore_files)
            .git_exclude(self.respect_ignore_files)
            .parents(self.respect_ignore_files);

        if !self.skip_dirs.is_empty() {
            let options = self.clone();
            builder.filter_entry(move |entry| !options.skips(entry));
        }
        builder
    }
}

/// Sorted paths found by [`parallel_walk`].
#[derive(Debug, Default)]
pub struct WalkResult {
    files: Vec<PathBuf>,
    directories: Vec<PathBuf>,
    unreadable: usize,
}

impl WalkResult {
    #[must_use]
    pub fn files(&self) -> &[PathBuf] {
        &self.files
    }

    /// Directories below the root; the root itself is not listed.
    #[must_use]
    pub fn directories(&self) -> &[PathBuf] {
        &self.directories
    }

    /// Entries that could not be read and were left out.
    #[must_use]
    pub const fn unreadable(&self) -> usize {
        self.unreadable
    }

    #[must_use]
    pub fn into_files(self) -> Vec<PathBuf> {
        self.files
    }
}

enum Visit {
    File(PathBuf),
    Dir(PathBuf),
    Unreadable,
}

/// Walks `root` on all cores.
///
/// # Errors
///
/// Fails when `root` does not exist.
///
/// # Example
/// ```no_run
/// use baba_mods::utility::fs::walk::{parallel_walk, WalkOptions};
///
/// let tree = parallel_walk("Lua/Glitter", &WalkOptions::for_mod_tree())?;
/// println!("{} files", tree.files().len());
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn parallel_walk<P: AsRef<Path>>(root: P, options: &WalkOptions) -> Result<WalkResult> {
    let root = root.as_ref();
    if !root.exists() {
        anyhow::bail!("root directory does not exist: {}", root.display());
    }

    // Nothing drains the channel until run() returns.
    let (tx, rx) = flume::unbounded::<Visit>();

    options.walker(root).build_parallel().run(|| {
        let tx = tx.clone();
        Box::new(move |entry| {
            let visit = match entry {
                Ok(entry) if entry.depth() == 0 => return WalkState::Continue,
                Ok(entry) => match entry.file_type() {
                    Some(ft) if ft.is_dir() => Visit::Dir(entry.into_path()),
                    Some(ft) if ft.is_file() => Visit::File(entry.into_path()),
                    _ => return WalkState::Continue,
                },
                Err(e) => {
                    warn!(error = %e, "skipping unreadable entry");
                    Visit::Unreadable
                }
            };
            let _ = tx.send(visit);
            WalkState::Continue
        })
    });
    drop(tx);

    let mut result = WalkResult::default();
    for visit in rx.iter() {
        match visit {
            Visit::File(path) => result.files.push(path),
            Visit::Dir(path) => result.directories.push(path),
            Visit::Unreadable => result.unreadable += 1,
        }
    }
    result.files.sort();
    result.directories.sort();

    debug!(
        root = %root.display(),
        files = result.files.len(),
        directories = result.directories.len(),
        "walked"
    );
    Ok(result)
}

/// Files under `root` whose root-relative path matches the `wax` glob
/// `pattern`, sorted.
///
/// # Errors
///
/// Fails when `root` does not exist or `pattern` is not a valid glob.
///
/// # Example
/// ```no_run
/// use baba_mods::utility::fs::walk::{find_files, WalkOptions};
///
/// for source in find_files("Lua/Glitter", "**/*.lua", &WalkOptions::for_mod_tree())? {
///     println!("{}", source.display());
/// }
/// # Ok::<(), anyhow::Error>(())
/// ```
pub fn find_files<P: AsRef<Path>>(
    root: P,
    pattern: &str,
    options: &WalkOptions,
) -> Result<Vec<PathBuf>> {
    use wax::{Glob, Program};

    let root = root.as_ref();
    let glob =
        Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;

    let mut files = parallel_walk(root, options)?.into_files();
    files.retain(|path| {
        path.strip_prefix(root)
            .is_ok_and(|relative| glob.is_match(relative))
    });
    Ok(files)
}
