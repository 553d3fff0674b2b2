// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration management for babamm.
//!
//! # Configuration Hierarchy
//!
//! ```text
//! Priority (low -> high)
//! 1. defaults
//! 2. babamm.toml (cwd, optional)
//! 3. --ini FILE (repeatable)
//! 4. BABAMM_* env vars
//! 5. --set section.key=value
//! 6. dedicated CLI flags (-g, --catalog, -l, ...)
//! ```
//!
//! # Environment Variable Mapping
//!
//! ```text
//! BABAMM_GAME__PATH=/games/baba       -> game.path = "/games/baba"
//! BABAMM_MERGE__INCLUDE_INIT=false    -> merge.include_init = false
//! BABAMM_GLOBAL__OUTPUT_LOG_LEVEL=4   -> global.output_log_level = 4
//! ```

pub mod loader;
pub mod paths;
pub mod types;


use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use crate::error::{ConfigError, Result};

use loader::ConfigLoader;
use paths::GameConfig;
use types::{CatalogConfig, GlobalConfig, MergeConfig};

/// File name of the per-directory settings file.
pub const LOCAL_CONFIG_FILE: &str = "babamm.toml";

/// Prefix of the environment variables read by the loader.
pub const ENV_PREFIX: &str = "BABAMM";

/// Complete application configuration.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Config {
    /// Global options.
    pub global: GlobalConfig,
    /// Game installation.
    pub game: GameConfig,
    /// Function catalog source.
    pub catalog: CatalogConfig,
    /// Merge defaults.
    pub merge: MergeConfig,
}

impl Config {
    /// Create a new configuration builder.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use baba_mods::config::Config;
    ///
    /// let config = Config::builder()
    ///     .add_toml_file_optional("babamm.toml")
    ///     .with_env_prefix("BABAMM")
    ///     .build()?;
    /// # Ok::<(), anyhow::Error>(())
    /// ```
    #[must_use]
    pub fn builder() -> ConfigLoader {
        ConfigLoader::new()
    }

    /// Load configuration from a single TOML file.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be read, contains invalid TOML, or
    /// does not match the `Config` structure.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        Self::builder().add_toml_file(path).build()
    }

    /// Load configuration from a TOML string.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not valid TOML or does not match the
    /// `Config` structure.
    pub fn parse(content: &str) -> Result<Self> {
        Self::builder().add_toml_str(content).build()
    }

    /// Normalize empty values and validate the configuration.
    ///
    /// # Errors
    ///
    /// Returns a `ConfigError::InvalidValue` if `game.path` points at a
    /// file rather than a directory.
    pub fn resolve_and_validate(&mut self) -> Result<()> {
        if self
            .game
            .path
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.game.path = None;
        }
        if self
            .catalog
            .file
            .as_ref()
            .is_some_and(|p| p.as_os_str().is_empty())
        {
            self.catalog.file = None;
        }

        if let Some(path) = &self.game.path
            && path.is_file()
        {
            return Err(ConfigError::InvalidValue {
                section: "game".to_string(),
                key: "path".to_string(),
                message: format!("{} is a file, expected the game directory", path.display()),
            }
            .into());
        }
        Ok(())
    }

    /// Format configuration options for display.
    ///
    /// Output is deterministically ordered using `BTreeMap`.
    #[must_use]
    pub fn format_options(&self) -> Vec<String> {
        let mut options = BTreeMap::new();
        self.format_global_options(&mut options);
        self.format_game_options(&mut options);
        self.format_catalog_options(&mut options);
        self.format_merge_options(&mut options);

        let max_key_len = options.keys().map(String::len).max().unwrap_or(0);

        options
            .into_iter()
            .map(|(key, value)| format!("{key:<max_key_len$} = {value}"))
            .collect()
    }

    fn format_global_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "global.output_log_level".into(),
            self.global.output_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.file_log_level".into(),
            self.global.file_log_level.as_u8().to_string(),
        );
        options.insert(
            "global.log_file".into(),
            self.global.log_file.display().to_string(),
        );
        options.insert("global.log_json".into(), self.global.log_json.to_string());
    }

    fn format_game_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("game.path".into(), fmt_path(self.game.path.as_ref()));
        options.insert(
            "game.respect_reserved_packs".into(),
            self.game.respect_reserved_packs.to_string(),
        );
    }

    fn format_catalog_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert("catalog.file".into(), fmt_path(self.catalog.file.as_ref()));
        options.insert(
            "catalog.game_sources".into(),
            self.catalog.game_sources.to_string(),
        );
    }

    fn format_merge_options(&self, options: &mut BTreeMap<String, String>) {
        options.insert(
            "merge.include_init".into(),
            self.merge.include_init.to_string(),
        );
        options.insert("merge.overwrite".into(), self.merge.overwrite.to_string());
    }
}

fn fmt_path(path: Option<&PathBuf>) -> String {
    path.map_or_else(String::new, |p| p.display().to_string())
}
