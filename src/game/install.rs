// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::levelpack::{Levelpack, RESERVED_PACK_NAMES};
use crate::config::paths::GameConfig;
use crate::error::{FsError, GameError, ModsResult, Result};

/// A game installation: the directory holding `Data/` and `Lua/`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GameInstall {
    root: PathBuf,
}

impl GameInstall {
    /// Opens the installation at `root`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InstallNotFound` if `root` has no `Data/` folder.
    pub fn open(root: impl AsRef<Path>) -> ModsResult<Self> {
        let root = root.as_ref();
        if !root.join("Data").is_dir() {
            return Err(GameError::InstallNotFound {
                path: root.display().to_string(),
            }
            .into());
        }
        Ok(Self {
            root: root.to_path_buf(),
        })
    }

    /// Opens the configured installation, probing Steam when unset.
    ///
    /// # Errors
    ///
    /// Returns an error if no installation is found.
    pub fn locate(config: &GameConfig) -> Result<Self> {
        let root = config.resolve_root()?;
        debug!(root = %root.display(), "using game installation");
        Ok(Self::open(root)?)
    }

    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// `Data/`, which also holds the game's own Lua sources.
    #[must_use]
    pub fn data_dir(&self) -> PathBuf {
        self.root.join("Data")
    }

    /// `Lua/`, for mods active in every levelpack.
    #[must_use]
    pub fn global_mods_dir(&self) -> PathBuf {
        self.root.join("Lua")
    }

    /// `Data/Sprites/`, for sprites of global mods.
    #[must_use]
    pub fn sprites_dir(&self) -> PathBuf {
        self.data_dir().join("Sprites")
    }

    #[must_use]
    pub fn levelpacks_dir(&self) -> PathBuf {
        self.data_dir().join("Worlds")
    }

    /// All readable levelpacks, sorted by folder name.
    ///
    /// Folders that fail to parse are skipped with a warning.
    ///
    /// # Errors
    ///
    /// Returns `FsError` if `Data/Worlds/` cannot be read.
    pub fn levelpacks(&self, respect_reserved: bool) -> ModsResult<Vec<Levelpack>> {
        let dir = self.levelpacks_dir();
        let entries = std::fs::read_dir(&dir).map_err(|e| FsError::io(&dir, e))?;

        let mut paths: Vec<PathBuf> = entries
            .filter_map(std::result::Result::ok)
            .map(|entry| entry.path())
            .filter(|path| path.is_dir())
            .collect();
        paths.sort();

        let mut packs = Vec::with_capacity(paths.len());
        for path in paths {
            let reserved = path
                .file_name()
                .is_some_and(|name| RESERVED_PACK_NAMES.iter().any(|r| name == *r));
            if respect_reserved && reserved {
                continue;
            }
            match Levelpack::open(&path) {
                Ok(pack) => packs.push(pack),
                Err(err) => warn!(path = %path.display(), error = %err, "skipping levelpack"),
            }
        }
        Ok(packs)
    }

    /// The levelpack in `Data/Worlds/<name>`.
    ///
    /// # Errors
    ///
    /// Returns `GameError::LevelpackNotFound` for an unknown name.
    pub fn levelpack(&self, name: &str) -> ModsResult<Levelpack> {
        let path = self.levelpacks_dir().join(name);
        if !path.is_dir() {
            return Err(GameError::LevelpackNotFound {
                name: name.to_string(),
            }
            .into());
        }
        Levelpack::open(path)
    }
}
