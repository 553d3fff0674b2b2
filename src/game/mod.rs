// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! The game installation and what lives in it.
//!
//! ```text
//! <root>/
//! ├── Lua/                 global mods        GameInstall::global_mods_dir()
//! └── Data/                game Lua sources   GameInstall::data_dir()
//!     ├── Sprites/         global sprites
//!     └── Worlds/<pack>/   Levelpack
//!         ├── world_data.txt
//!         ├── Lua/         levelpack mods     (used when mods=1)
//!         └── Sprites/
//! ```

pub mod install;
pub mod installer;
pub mod levelpack;
pub mod library;

pub use install::GameInstall;
pub use installer::{InstallReport, InstallTarget, Installer};
pub use levelpack::{Levelpack, RESERVED_PACK_NAMES, WORLD_DATA_FILE_NAME, fetch_field};
pub use library::{ModLibrary, RejectedMod};
