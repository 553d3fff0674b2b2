// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::PathBuf;

use anyhow::Context;
use tracing::{debug, info};

use super::install::GameInstall;
use super::levelpack::Levelpack;
use super::library::ModLibrary;
use crate::error::{GameError, Result};
use crate::mods::{BabaMod, folder_name_problem};
use crate::utility::fs::copy::{copy_dir_contents_async, copy_file_async};
use crate::utility::fs::same_path;

/// Where a mod goes.
#[derive(Debug, Clone, Copy)]
pub enum InstallTarget<'a> {
    /// The installation's `Lua/`, active in every levelpack.
    Global,
    /// One levelpack's `Lua/`.
    Levelpack(&'a Levelpack),
}

/// Files written by an install.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    pub mod_dir: PathBuf,
    pub init: Option<PathBuf>,
    pub sprites: Vec<PathBuf>,
}

/// Copies mods into a game installation.
#[derive(Debug, Clone)]
pub struct Installer<'a> {
    game: &'a GameInstall,
    force: bool,
}

impl<'a> Installer<'a> {
    #[must_use]
    pub const fn new(game: &'a GameInstall) -> Self {
        Self { game, force: false }
    }

    /// Replace an installed mod with the same modid.
    #[must_use]
    pub const fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    /// Picks the target from the mod's `global` flag when no levelpack is
    /// given.
    ///
    /// # Errors
    ///
    /// Returns an error for a levelpack-only mod without a levelpack.
    pub fn target_for<'p>(item: &BabaMod, levelpack: Option<&'p Levelpack>) -> Result<InstallTarget<'p>> {
        match levelpack {
            Some(pack) => Ok(InstallTarget::Levelpack(pack)),
            None if item.descriptor().global => Ok(InstallTarget::Global),
            None => anyhow::bail!(
                "mod '{}' is not global; choose a levelpack with --levelpack",
                item.modid()
            ),
        }
    }

    fn dirs(&self, target: InstallTarget<'_>) -> (PathBuf, PathBuf) {
        match target {
            InstallTarget::Global => (self.game.global_mods_dir(), self.game.sprites_dir()),
            InstallTarget::Levelpack(pack) => (pack.lua_dir(), pack.sprites_dir()),
        }
    }

    /// Copies the mod directory, its init file and its sprites.
    ///
    /// The directory is copied into a staging folder inside the target
    /// `Lua/` first; a forced install removes the old mod only once the
    /// copy is complete.
    ///
    /// # Errors
    ///
    /// Returns `GameError::AlreadyInstalled` if the modid or folder is taken
    /// and `force` is off, `GameError::UnusableModId` if the mod's folder
    /// name cannot be used, or the copy error otherwise.
    pub async fn install(&self, item: &BabaMod, target: InstallTarget<'_>) -> Result<InstallReport> {
        if let Some(message) = folder_name_problem(item.name()) {
            return Err(GameError::UnusableModId {
                modid: item.name().to_string(),
                message: message.to_string(),
            }
            .into());
        }
        let (lua_dir, sprites_dir) = self.dirs(target);
        let mod_dir = lua_dir.join(item.name());

        let installed = ModLibrary::discover(&lua_dir)?;
        let existing = installed
            .mods()
            .iter()
            .find(|other| other.modid() == item.modid())
            .map(|other| other.dir().to_path_buf())
            .or_else(|| mod_dir.exists().then(|| mod_dir.clone()));

        if let Some(existing) = &existing {
            if same_path(existing, item.dir()) {
                anyhow::bail!("mod '{}' is already in {}", item.modid(), lua_dir.display());
            }
            if !self.force {
                return Err(GameError::AlreadyInstalled {
                    modid: item.modid().to_string(),
                    path: existing.display().to_string(),
                }
                .into());
            }
        }

        tokio::fs::create_dir_all(&lua_dir)
            .await
            .with_context(|| format!("failed to create {}", lua_dir.display()))?;
        let staging = tempfile::Builder::new()
            .prefix(".babamm-install-")
            .tempdir_in(&lua_dir)
            .with_context(|| format!("failed to stage in {}", lua_dir.display()))?;
        let staged = staging.path().join(item.name());
        copy_dir_contents_async(item.dir(), &staged).await?;

        for old in existing.iter().chain(std::iter::once(&mod_dir)) {
            if old.exists() {
                info!(modid = item.modid(), path = %old.display(), "replacing installed mod");
                tokio::fs::remove_dir_all(old)
                    .await
                    .with_context(|| format!("failed to remove {}", old.display()))?;
            }
        }
        tokio::fs::rename(&staged, &mod_dir)
            .await
            .with_context(|| format!("failed to move the mod into {}", mod_dir.display()))?;
        drop(staging);

        let mut report = InstallReport {
            mod_dir,
            ..InstallReport::default()
        };

        if let Some(init) = item.init_path()
            && let Some(file_name) = init.file_name()
        {
            let dest = lua_dir.join(file_name);
            copy_file_async(&init, &dest).await?;
            report.init = Some(dest);
        }

        for sprite in item.sprite_files(&item.sprites_dir())? {
            if let Some(file_name) = sprite.file_name() {
                let dest = sprites_dir.join(file_name);
                copy_file_async(&sprite, &dest).await?;
                debug!(sprite = %dest.display(), "installed sprite");
                report.sprites.push(dest);
            }
        }

        info!(
            modid = item.modid(),
            dir = %report.mod_dir.display(),
            sprites = report.sprites.len(),
            "installed mod"
        );
        Ok(report)
    }
}
