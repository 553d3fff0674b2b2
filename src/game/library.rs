// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mods found in one `Lua/` directory.
//!
//! ```text
//! Lua/
//! ├── Glitter/Config.json  ─► mods        (valid, unique modid)
//! ├── Broken/              ─► rejected    (with the reason)
//! ├── Glitter_init.lua     ─► belongs to Glitter, not listed
//! └── loose.lua            ─► unmanaged   (listed, never merged)
//!
//! index(): one scoped thread per core, work and results over flume
//!          channels, only &FunctionCatalog shared
//! ```

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use tracing::{debug, info, warn};

use crate::catalog::FunctionCatalog;
use crate::error::{FsError, GameError, ModsError, ModsResult, Result};
use crate::lua::{OverrideScanner, OverrideSet};
use crate::mods::BabaMod;

/// A directory that did not open as a mod.
#[derive(Debug)]
pub struct RejectedMod {
    pub dir: PathBuf,
    pub error: ModsError,
}

/// Contents of a `Lua/` directory.
#[derive(Debug, Default)]
pub struct ModLibrary {
    lua_dir: PathBuf,
    mods: Vec<BabaMod>,
    rejected: Vec<RejectedMod>,
    unmanaged: Vec<PathBuf>,
}

impl ModLibrary {
    /// Lists the mods in `lua_dir`, sorted by folder name.
    ///
    /// A missing directory is an empty library. Hidden entries are skipped.
    /// When two mods share a modid the later one is rejected with
    /// `GameError::DuplicateModId`.
    ///
    /// # Errors
    ///
    /// Returns `FsError` if the directory exists but cannot be read.
    pub fn discover(lua_dir: impl AsRef<Path>) -> ModsResult<Self> {
        let lua_dir = lua_dir.as_ref();
        let mut library = Self {
            lua_dir: lua_dir.to_path_buf(),
            ..Self::default()
        };
        if !lua_dir.is_dir() {
            debug!(dir = %lua_dir.display(), "no Lua directory");
            return Ok(library);
        }

        let mut paths = Vec::new();
        for entry in std::fs::read_dir(lua_dir).map_err(|e| FsError::io(lua_dir, e))? {
            let path = entry.map_err(|e| FsError::io(lua_dir, e))?.path();
            if !is_hidden(&path) {
                paths.push(path);
            }
        }
        paths.sort();

        let mut seen: BTreeMap<String, PathBuf> = BTreeMap::new();
        for path in &paths {
            if path.is_dir() {
                match BabaMod::open(path) {
                    Ok(item) => {
                        if let Some(first) = seen.get(item.modid()) {
                            let error = GameError::DuplicateModId {
                                modid: item.modid().to_string(),
                                first: first.display().to_string(),
                                second: path.display().to_string(),
                            };
                            warn!(%error, "duplicate modid");
                            library.rejected.push(RejectedMod {
                                dir: path.clone(),
                                error: error.into(),
                            });
                        } else {
                            seen.insert(item.modid().to_string(), path.clone());
                            library.mods.push(item);
                        }
                    }
                    Err(error) => {
                        debug!(dir = %path.display(), %error, "rejected mod");
                        library.rejected.push(RejectedMod {
                            dir: path.clone(),
                            error,
                        });
                    }
                }
            } else if path.extension().is_some_and(|ext| ext == "lua")
                && !is_init_of_listed_dir(path, &paths)
            {
                library.unmanaged.push(path.clone());
            }
        }

        info!(
            dir = %lua_dir.display(),
            mods = library.mods.len(),
            rejected = library.rejected.len(),
            unmanaged = library.unmanaged.len(),
            "discovered mods"
        );
        Ok(library)
    }

    #[must_use]
    pub fn lua_dir(&self) -> &Path {
        &self.lua_dir
    }

    #[must_use]
    pub fn mods(&self) -> &[BabaMod] {
        &self.mods
    }

    #[must_use]
    pub fn rejected(&self) -> &[RejectedMod] {
        &self.rejected
    }

    /// Standalone `.lua` files with no mod directory.
    #[must_use]
    pub fn unmanaged(&self) -> &[PathBuf] {
        &self.unmanaged
    }

    /// Finds a mod by modid, falling back to its folder name.
    #[must_use]
    pub fn find(&self, key: &str) -> Option<&BabaMod> {
        self.mods
            .iter()
            .find(|item| item.modid() == key)
            .or_else(|| self.mods.iter().find(|item| item.name() == key))
    }

    /// Mods whose modid or folder name matches a glob.
    ///
    /// # Errors
    ///
    /// Returns an error for an invalid pattern.
    pub fn matching(&self, pattern: &str) -> Result<Vec<&BabaMod>> {
        use wax::{Glob, Program};

        let glob =
            Glob::new(pattern).map_err(|e| anyhow::anyhow!("invalid glob pattern '{pattern}': {e}"))?;
        Ok(self
            .mods
            .iter()
            .filter(|item| glob.is_match(Path::new(item.modid())) || glob.is_match(Path::new(item.name())))
            .collect())
    }

    /// Scans every mod concurrently. Results are in [`Self::mods`] order.
    #[must_use]
    pub fn index(&self, catalog: &FunctionCatalog) -> Vec<ModsResult<OverrideSet>> {
        if self.mods.is_empty() {
            return Vec::new();
        }
        let workers = std::thread::available_parallelism()
            .map(std::num::NonZeroUsize::get)
            .unwrap_or(4)
            .min(self.mods.len());

        let (job_tx, job_rx) = flume::unbounded::<usize>();
        let (result_tx, result_rx) = flume::unbounded();
        for index in 0..self.mods.len() {
            let _ = job_tx.send(index);
        }
        drop(job_tx);

        std::thread::scope(|scope| {
            for _ in 0..workers {
                let job_rx = job_rx.clone();
                let result_tx = result_tx.clone();
                scope.spawn(move || {
                    let scanner = OverrideScanner::new(catalog);
                    for index in job_rx.iter() {
                        let result = scanner.scan_mod(&self.mods[index]);
                        if result_tx.send((index, result)).is_err() {
                            break;
                        }
                    }
                });
            }
        });
        drop(result_tx);

        let mut slots: Vec<Option<ModsResult<OverrideSet>>> =
            std::iter::repeat_with(|| None).take(self.mods.len()).collect();
        for (index, result) in result_rx.iter() {
            slots[index] = Some(result);
        }
        debug!(mods = slots.len(), workers, "indexed library");

        slots
            .into_iter()
            .map(|slot| {
                slot.unwrap_or_else(|| Err(ModsError::Other("mod was not scanned".into())))
            })
            .collect()
    }
}

fn is_hidden(path: &Path) -> bool {
    path.file_name()
        .is_some_and(|name| name.to_string_lossy().starts_with('.'))
}

/// `Foo_init.lua` next to a `Foo/` directory.
fn is_init_of_listed_dir(path: &Path, paths: &[PathBuf]) -> bool {
    let Some(stem) = path
        .file_name()
        .and_then(|name| name.to_str())
        .and_then(|name| name.strip_suffix("_init.lua"))
    else {
        return false;
    };
    let dir = path.with_file_name(stem);
    paths.iter().any(|p| *p == dir && p.is_dir())
}
