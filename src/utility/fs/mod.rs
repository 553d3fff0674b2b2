// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Filesystem utilities with parallel traversal and async copy.
//!
//! ```text
//! walk:  parallel_walk()  ignore::WalkParallel (multi-core), sorted output
//!        find_files()     wax glob over a walk
//!        WalkOptions      max_depth, hidden, ignore files, skip_dirs
//! copy:  copy_dir_contents_async() recursive directory copy (tokio::fs)
//!        copy_file_async()         single file, parents created
//!        copy_dir_contents()       blocking recursive copy
//! same_path()                      compares canonical paths
//! ```

pub mod copy;
pub mod walk;

use std::path::Path;

/// True if both paths name the same file or directory. Paths that do not
/// exist are compared as written.
#[must_use]
pub fn same_path(a: &Path, b: &Path) -> bool {
    match (a.canonicalize(), b.canonicalize()) {
        (Ok(a), Ok(b)) => a == b,
        _ => a == b,
    }
}
