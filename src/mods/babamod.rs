// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use tracing::{debug, warn};

use super::CONFIG_FILE_NAME;
use super::descriptor::ModDescriptor;
use super::validate::validate_config_str;
use crate::error::{FsError, GameError, ModsResult};
use crate::utility::encoding::decode_source;
use crate::utility::fs::walk::{WalkOptions, find_files};

/// A mod directory on disk: `Lua/<ModName>/Config.json` plus its sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BabaMod {
    dir: PathBuf,
    name: String,
    descriptor: ModDescriptor,
}

impl BabaMod {
    /// Opens and validates the mod in `dir`.
    ///
    /// # Errors
    ///
    /// - `GameError::NotAMod` if `dir` is not a directory.
    /// - `GameError::MissingConfig` if it has no `Config.json`.
    /// - `ModsError::Schema` if `Config.json` is invalid.
    pub fn open(dir: impl AsRef<Path>) -> ModsResult<Self> {
        let dir = dir.as_ref();
        if !dir.is_dir() {
            return Err(GameError::NotAMod {
                path: dir.display().to_string(),
            }
            .into());
        }

        let config = dir.join(CONFIG_FILE_NAME);
        if !config.is_file() {
            return Err(GameError::MissingConfig {
                path: dir.display().to_string(),
            }
            .into());
        }

        let bytes = std::fs::read(&config).map_err(|e| FsError::io(&config, e))?;
        let (text, _) = decode_source(&bytes);
        let descriptor = validate_config_str(&text)?;
        debug!(modid = %descriptor.modid, dir = %dir.display(), "opened mod");

        Ok(Self::from_parts(dir, descriptor))
    }

    /// Wraps an already validated descriptor.
    #[must_use]
    pub fn from_parts(dir: impl AsRef<Path>, descriptor: ModDescriptor) -> Self {
        let dir = dir.as_ref().to_path_buf();
        let name = dir
            .file_name()
            .map_or_else(|| descriptor.modid.clone(), |n| n.to_string_lossy().into_owned());
        Self {
            dir,
            name,
            descriptor,
        }
    }

    /// Directory name, which the game uses as the mod's name.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn modid(&self) -> &str {
        &self.descriptor.modid
    }

    #[must_use]
    pub const fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// The `Lua/` directory holding this mod.
    #[must_use]
    pub fn lua_dir(&self) -> &Path {
        self.dir.parent().unwrap_or(&self.dir)
    }

    /// `Sprites/` next to the `Lua/` directory.
    #[must_use]
    pub fn sprites_dir(&self) -> PathBuf {
        self.lua_dir()
            .parent()
            .unwrap_or_else(|| self.lua_dir())
            .join("Sprites")
    }

    /// Every `.lua` file inside the mod directory, sorted.
    ///
    /// # Errors
    ///
    /// Returns `FsError::WalkFailed` if the directory cannot be walked.
    pub fn lua_files(&self) -> ModsResult<Vec<PathBuf>> {
        find_files(&self.dir, "**/*.lua", &WalkOptions::for_mod_tree()).map_err(|e| {
            FsError::WalkFailed {
                path: self.dir.display().to_string(),
                message: format!("{e:#}"),
            }
            .into()
        })
    }

    /// External init file in the Lua directory, if present.
    ///
    /// Uses the declared `init` entry, else `<ModName>_init.lua`.
    #[must_use]
    pub fn init_path(&self) -> Option<PathBuf> {
        if let Some(init) = &self.descriptor.init {
            let path = self.lua_dir().join(init);
            if path.is_file() {
                return Some(path);
            }
            warn!(modid = self.modid(), init = %init, "declared init file is missing");
            return None;
        }
        let fallback = self.lua_dir().join(format!("{}_init.lua", self.name));
        fallback.is_file().then_some(fallback)
    }

    /// Files in `sprites_dir` belonging to the sprites this mod lists, sorted.
    ///
    /// A file belongs to sprite `s` when its name is `s` or starts with
    /// `s_` or `s.` (animation frames such as `ice_0_1.png`).
    ///
    /// # Errors
    ///
    /// Returns an error if `sprites_dir` exists but cannot be read.
    pub fn sprite_files(&self, sprites_dir: &Path) -> ModsResult<Vec<PathBuf>> {
        if self.descriptor.sprites.is_empty() || !sprites_dir.is_dir() {
            return Ok(Vec::new());
        }

        let entries = std::fs::read_dir(sprites_dir).map_err(|e| FsError::io(sprites_dir, e))?;
        let mut found = Vec::new();
        for entry in entries {
            let entry = entry.map_err(|e| FsError::io(sprites_dir, e))?;
            let file_name = entry.file_name();
            let file_name = file_name.to_string_lossy();
            if entry.path().is_file()
                && self
                    .descriptor
                    .sprites
                    .iter()
                    .any(|sprite| sprite_matches(sprite, &file_name))
            {
                found.push(entry.path());
            }
        }
        found.sort();
        Ok(found)
    }
}

fn sprite_matches(sprite: &str, file_name: &str) -> bool {
    file_name
        .strip_prefix(sprite)
        .is_some_and(|rest| rest.is_empty() || rest.starts_with(['_', '.']))
}
