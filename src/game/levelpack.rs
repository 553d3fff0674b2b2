// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;

use tracing::trace;

use crate::error::{FsError, GameError, ModsResult};
use crate::utility::encoding::decode_source;

/// Levelpack metadata file.
pub const WORLD_DATA_FILE_NAME: &str = "world_data.txt";

/// Levelpacks shipped with the game.
pub const RESERVED_PACK_NAMES: [&str; 5] = ["baba", "debug", "museum", "new_adv", "levels"];

/// Reads `field` from one `key=value` line of `world_data.txt`.
///
/// Returns `None` when the line holds a different key (or no `=`).
///
/// # Example
/// ```
/// use baba_mods::game::fetch_field;
///
/// assert_eq!(fetch_field::<usize>("prize_max", "prize_max=12"), Some(Ok(12)));
/// assert_eq!(fetch_field::<usize>("prize_max", "name=Pack"), None);
/// ```
pub fn fetch_field<T: FromStr>(field: &str, line: &str) -> Option<Result<T, T::Err>> {
    let (key, value) = line.split_once('=')?;
    (key.trim() == field).then(|| value.trim().parse())
}

/// A levelpack under `Data/Worlds/`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Levelpack {
    path: PathBuf,
    name: String,
    author: String,
    prize_max: usize,
    clear_max: usize,
    bonus_max: usize,
    mods_enabled: bool,
}

impl Levelpack {
    /// Reads the levelpack in `path`.
    ///
    /// # Errors
    ///
    /// - `GameError::LevelpackNotFound` if `path` is not a directory.
    /// - `FsError` if `world_data.txt` cannot be read.
    /// - `GameError::MalformedWorldData` for a non-numeric count.
    pub fn open(path: impl AsRef<Path>) -> ModsResult<Self> {
        let path = path.as_ref();
        if !path.is_dir() {
            return Err(GameError::LevelpackNotFound {
                name: path.display().to_string(),
            }
            .into());
        }

        let data_file = path.join(WORLD_DATA_FILE_NAME);
        let bytes = std::fs::read(&data_file).map_err(|e| FsError::io(&data_file, e))?;
        let (text, _) = decode_source(&bytes);

        let mut pack = Self {
            path: path.to_path_buf(),
            ..Self::default()
        };
        let malformed = |line: &str| GameError::MalformedWorldData {
            path: data_file.display().to_string(),
            message: format!("'{line}' is not a number"),
        };

        for line in text.lines() {
            if let Some(name) = fetch_field::<String>("name", line) {
                pack.name = name.unwrap_or_default();
            } else if let Some(author) = fetch_field::<String>("author", line) {
                pack.author = author.unwrap_or_default();
            } else if let Some(value) = fetch_field("prize_max", line) {
                pack.prize_max = value.map_err(|_| malformed(line))?;
            } else if let Some(value) = fetch_field("clear_max", line) {
                pack.clear_max = value.map_err(|_| malformed(line))?;
            } else if let Some(value) = fetch_field("bonus_max", line) {
                pack.bonus_max = value.map_err(|_| malformed(line))?;
            } else if let Some(value) = fetch_field::<usize>("mods", line) {
                pack.mods_enabled = value.map_err(|_| malformed(line))? != 0;
            }
        }

        trace!(pack = %pack.dir_name(), mods = pack.mods_enabled, "read levelpack");
        Ok(pack)
    }

    /// Folder name under `Data/Worlds/`.
    #[must_use]
    pub fn dir_name(&self) -> String {
        self.path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default()
    }

    #[must_use]
    pub fn path(&self) -> &Path {
        &self.path
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn author(&self) -> &str {
        &self.author
    }

    #[must_use]
    pub const fn prize_max(&self) -> usize {
        self.prize_max
    }

    #[must_use]
    pub const fn clear_max(&self) -> usize {
        self.clear_max
    }

    #[must_use]
    pub const fn bonus_max(&self) -> usize {
        self.bonus_max
    }

    /// `mods=1` in `world_data.txt`.
    #[must_use]
    pub const fn mods_enabled(&self) -> bool {
        self.mods_enabled
    }

    #[must_use]
    pub fn lua_dir(&self) -> PathBuf {
        self.path.join("Lua")
    }

    #[must_use]
    pub fn sprites_dir(&self) -> PathBuf {
        self.path.join("Sprites")
    }

    /// True for the levelpacks the game ships with.
    #[must_use]
    pub fn is_reserved(&self) -> bool {
        RESERVED_PACK_NAMES.contains(&self.dir_name().as_str())
    }
}

impl fmt::Display for Levelpack {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} by {} (spores {}, clears {}, bonus {}, mods {})",
            self.name,
            self.author,
            self.prize_max,
            self.clear_max,
            self.bonus_max,
            if self.mods_enabled { "on" } else { "off" }
        )
    }
}
