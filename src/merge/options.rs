// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::path::{Path, PathBuf};

use bon::Builder;

/// Settings for one merge.
///
/// # Example
/// ```
/// use baba_mods::merge::MergeOptions;
///
/// let options = MergeOptions::builder()
///     .with_target("Baba Is You/Lua")
///     .with_modid("glitter_and_sink")
///     .build();
/// assert!(options.include_init());
/// assert!(!options.overwrite());
/// ```
#[derive(Debug, Clone, PartialEq, Eq, Builder)]
pub struct MergeOptions {
    /// Lua directory that receives the merged mod.
    #[builder(setters(name = with_target), into)]
    target: PathBuf,
    /// Replaces the generated `<a>+<b>` modid.
    #[builder(setters(name = with_modid), into)]
    modid: Option<String>,
    /// Generate and write `<modid>_init.lua`.
    #[builder(setters(name = with_include_init), default = true)]
    include_init: bool,
    /// Replace an existing merged mod with the same modid.
    #[builder(setters(name = with_overwrite), default = false)]
    overwrite: bool,
}

impl MergeOptions {
    #[must_use]
    pub fn target(&self) -> &Path {
        &self.target
    }

    #[must_use]
    pub fn modid(&self) -> Option<&str> {
        self.modid.as_deref()
    }

    #[must_use]
    pub const fn include_init(&self) -> bool {
        self.include_init
    }

    #[must_use]
    pub const fn overwrite(&self) -> bool {
        self.overwrite
    }
}
