// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Configuration sections other than `[game]`.
//!
//! ```text
//! Config: GlobalConfig, GameConfig, CatalogConfig, MergeConfig
//! ```

use serde::{Deserialize, Serialize};
use std::path::PathBuf;

use crate::logging::LogLevel;

/// Global configuration options.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct GlobalConfig {
    /// Log level for console output (0-6).
    pub output_log_level: LogLevel,
    /// Log level for file output (0-6).
    pub file_log_level: LogLevel,
    /// Path to log file. Empty disables file logging.
    pub log_file: PathBuf,
    /// Write the log file as JSON lines.
    pub log_json: bool,
}

impl Default for GlobalConfig {
    fn default() -> Self {
        Self {
            output_log_level: LogLevel::INFO,
            file_log_level: LogLevel::TRACE,
            log_file: PathBuf::new(),
            log_json: false,
        }
    }
}

/// Function catalog source.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct CatalogConfig {
    /// Catalog data file replacing the packaged one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub file: Option<PathBuf>,
    /// Add the functions defined in the installed game's `Data/*.lua` to
    /// the packaged catalog. Ignored when `file` is set.
    pub game_sources: bool,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            file: None,
            game_sources: true,
        }
    }
}

/// Defaults for the `merge` command.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct MergeConfig {
    /// Generate an init file that runs both parents.
    pub include_init: bool,
    /// Replace an existing merged mod at the target.
    pub overwrite: bool,
}

impl Default for MergeConfig {
    fn default() -> Self {
        Self {
            include_init: true,
            overwrite: false,
        }
    }
}
