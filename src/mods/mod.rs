// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Mod descriptors and mods on disk.
//!
//! ```text
//! Lua/
//! ├── Glitter/                 BabaMod::open()
//! │   ├── Config.json   ──►    validate_config_str() ─► ModDescriptor
//! │   └── *.lua         ──►    lua_files()
//! └── Glitter_init.lua  ──►    init_path()
//! Sprites/glitter_*.png ──►    sprite_files()
//! ```

pub mod babamod;
pub mod descriptor;
pub mod validate;

pub use babamod::BabaMod;
pub use descriptor::ModDescriptor;
pub use validate::{
    folder_name_problem, is_contained_path, validate_config_str, validate_config_value,
};

/// Descriptor file name inside a mod directory.
pub const CONFIG_FILE_NAME: &str = "Config.json";

/// Tags beyond this many are kept but not shown.
pub const MAX_EFFECTIVE_TAGS: usize = 4;

#[cfg(test)]
mod tests;
