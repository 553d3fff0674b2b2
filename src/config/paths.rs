// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Game installation path configuration.
//!
//! ```text
//! [game] path set?  --yes-->  use it
//!        |
//!        no
//!        v
//! probe Steam library defaults (first existing wins)
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::error::{GameError, Result};

/// Steam's folder name for the game.
pub const STEAM_GAME_DIR: &str = "steamapps/common/Baba Is You";

/// Game installation options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GameConfig {
    /// Installation root (the directory holding `Data/` and `Lua/`).
    #[serde(skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// Hide the levelpacks shipped with the game.
    pub respect_reserved_packs: bool,
}

impl Default for GameConfig {
    fn default() -> Self {
        Self {
            path: None,
            respect_reserved_packs: true,
        }
    }
}

impl GameConfig {
    /// Resolve the installation root.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InstallNotFound` if no path is configured and
    /// none of the default Steam locations exists.
    pub fn resolve_root(&self) -> Result<PathBuf> {
        if let Some(path) = &self.path {
            return Ok(path.clone());
        }

        let candidates = default_install_candidates();
        candidates
            .iter()
            .find(|candidate| candidate.is_dir())
            .cloned()
            .ok_or_else(|| {
                let probed = candidates
                    .iter()
                    .map(|p| p.display().to_string())
                    .collect::<Vec<_>>()
                    .join(", ");
                GameError::InstallNotFound { path: probed }.into()
            })
    }
}

/// Default Steam install locations for the current platform.
#[must_use]
pub fn default_install_candidates() -> Vec<PathBuf> {
    let mut candidates = Vec::new();

    if cfg!(windows) {
        for steam in [r"C:\Program Files (x86)\Steam", r"C:\Program Files\Steam"] {
            candidates.push(Path::new(steam).join(STEAM_GAME_DIR.replace('/', r"\")));
        }
    } else if let Some(home) = std::env::var_os("HOME") {
        let home = PathBuf::from(home);
        if cfg!(target_os = "macos") {
            candidates.push(
                home.join("Library/Application Support/Steam")
                    .join(STEAM_GAME_DIR),
            );
        } else {
            candidates.push(home.join(".local/share/Steam").join(STEAM_GAME_DIR));
            candidates.push(home.join(".steam/steam").join(STEAM_GAME_DIR));
        }
    }

    candidates
}
