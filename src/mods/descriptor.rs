// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use bon::Builder;
use serde::{Deserialize, Serialize};

use super::MAX_EFFECTIVE_TAGS;

/// Contents of a mod's `Config.json`.
///
/// Field order matches the file layout the game's mod menu expects, and is
/// the order fields are written back out.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, Builder)]
pub struct ModDescriptor {
    #[builder(setters(name = with_modid), into)]
    pub modid: String,

    #[builder(setters(name = with_authors), default)]
    pub authors: Vec<String>,

    #[builder(setters(name = with_description), into, default)]
    pub description: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setters(name = with_icon_url), into)]
    pub icon_url: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setters(name = with_banner_url), into)]
    pub banner_url: Option<String>,

    #[builder(setters(name = with_global), default = false)]
    pub global: bool,

    /// All tags as written. Only [`Self::effective_tags`] are shown.
    #[serde(default)]
    #[builder(setters(name = with_tags), default)]
    pub tags: Vec<String>,

    #[serde(default)]
    #[builder(setters(name = with_links), default)]
    pub links: Vec<String>,

    /// Files of the mod, relative to the mod directory.
    #[serde(default)]
    #[builder(setters(name = with_files), default)]
    pub files: Vec<String>,

    /// External init file, relative to the Lua directory holding the mod.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    #[builder(setters(name = with_init), into)]
    pub init: Option<String>,

    #[serde(default)]
    #[builder(setters(name = with_sprites), default)]
    pub sprites: Vec<String>,
}

impl ModDescriptor {
    /// The first four tags, in their original order.
    #[must_use]
    pub fn effective_tags(&self) -> &[String] {
        &self.tags[..self.tags.len().min(MAX_EFFECTIVE_TAGS)]
    }

    /// Renders the descriptor as `Config.json` text.
    ///
    /// Pretty-printed with a trailing newline; the same descriptor always
    /// renders to the same bytes.
    ///
    /// # Errors
    ///
    /// Returns an error if serialization fails.
    pub fn to_json(&self) -> serde_json::Result<String> {
        let mut text = serde_json::to_string_pretty(self)?;
        text.push('\n');
        Ok(text)
    }
}
