// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Function catalog: the base-game functions a mod may override.
//!
//! ```text
//! data/functions.txt (packaged)  ─┐
//! [catalog] file / --catalog     ─┼─► parse() ─► FunctionCatalog (immutable)
//! Data/<file>.lua (game sources) ─┘                  │
//!                                  &FunctionCatalog ─┴─► scanner, merge, library
//! ```
//!
//! Data file format: one name per line, `#` starts a comment, blank lines
//! are ignored. A name is `ident` or `table.ident`.

use std::collections::BTreeSet;
use std::path::Path;

use tracing::{debug, info};

use crate::error::{CatalogLoadError, Result};
use crate::lua::top_level;
use crate::utility::encoding::read_source;

/// Packaged catalog contents.
pub const PACKAGED_CATALOG: &str = include_str!("../../data/functions.txt");

/// Origin label of the packaged catalog in errors.
pub const PACKAGED_ORIGIN: &str = "<packaged>";

/// Game source files (under `Data/`) holding overridable functions.
pub const BABA_LUA_FILE_NAMES: [&str; 27] = [
    "blocks",
    "changes",
    "clears",
    "colours",
    "conditions",
    "constants",
    "convert",
    "debug",
    "dynamictiling",
    "effects",
    "ending",
    "features",
    "letterunits",
    "load",
    "map",
    "mapcursor",
    "menu",
    "metadata",
    "movement",
    "rules",
    "syntax",
    "tools",
    "undo",
    "update",
    "utf_decoder",
    "values",
    "vision",
];

fn is_identifier(part: &str) -> bool {
    let mut chars = part.chars();
    chars
        .next()
        .is_some_and(|first| first.is_ascii_alphabetic() || first == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

/// True if `name` can appear in a catalog: `ident` or `table.ident`.
#[must_use]
pub fn is_identifier_path(name: &str) -> bool {
    match name.split_once('.') {
        Some((table, field)) => is_identifier(table) && is_identifier(field),
        None => is_identifier(name),
    }
}

/// Immutable set of overridable function names.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FunctionCatalog {
    names: BTreeSet<String>,
    origin: String,
}

impl FunctionCatalog {
    /// Loads the catalog compiled into the binary.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError` if the packaged data is malformed.
    pub fn packaged() -> std::result::Result<Self, CatalogLoadError> {
        Self::parse(PACKAGED_CATALOG, PACKAGED_ORIGIN)
    }

    /// Loads a catalog data file.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::NotFound` for a missing file,
    /// `CatalogLoadError::Read` if it cannot be read, and the errors of
    /// [`Self::parse`] otherwise.
    pub fn from_file(path: &Path) -> std::result::Result<Self, CatalogLoadError> {
        let display = path.display().to_string();
        let content = std::fs::read_to_string(path).map_err(|source| {
            if source.kind() == std::io::ErrorKind::NotFound {
                CatalogLoadError::NotFound {
                    path: display.clone(),
                }
            } else {
                CatalogLoadError::Read {
                    path: display.clone(),
                    source,
                }
            }
        })?;
        Self::parse(&content, &display)
    }

    /// Parses catalog data. `origin` names the source in errors.
    ///
    /// # Errors
    ///
    /// Returns `CatalogLoadError::Malformed` for an invalid or repeated name
    /// and `CatalogLoadError::Empty` if no names remain.
    pub fn parse(content: &str, origin: &str) -> std::result::Result<Self, CatalogLoadError> {
        let mut names = BTreeSet::new();

        for (index, raw) in content.lines().enumerate() {
            let line = raw.split_once('#').map_or(raw, |(before, _)| before).trim();
            if line.is_empty() {
                continue;
            }
            let malformed = |message: String| CatalogLoadError::Malformed {
                origin: origin.to_string(),
                line: index + 1,
                message,
            };
            if !is_identifier_path(line) {
                return Err(malformed(format!("'{line}' is not a function name")));
            }
            if !names.insert(line.to_string()) {
                return Err(malformed(format!("'{line}' is listed twice")));
            }
        }

        if names.is_empty() {
            return Err(CatalogLoadError::Empty {
                origin: origin.to_string(),
            });
        }

        debug!(origin, functions = names.len(), "loaded function catalog");
        Ok(Self {
            names,
            origin: origin.to_string(),
        })
    }

    /// Builds a catalog from names without validation.
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self {
            names: names.into_iter().map(Into::into).collect(),
            origin: "<memory>".to_string(),
        }
    }

    /// Builds a catalog from the top-level functions of the game's own
    /// `Data/*.lua` sources. Missing files are skipped.
    ///
    /// # Errors
    ///
    /// Returns an error if a present file cannot be read or no function is
    /// found at all.
    pub fn from_game_sources(data_dir: &Path) -> Result<Self> {
        let mut names = BTreeSet::new();
        for file in BABA_LUA_FILE_NAMES {
            let path = data_dir.join(format!("{file}.lua"));
            if !path.is_file() {
                debug!(path = %path.display(), "game source missing, skipped");
                continue;
            }
            let src = read_source(&path)?;
            let before = names.len();
            names.extend(
                top_level(&src)
                    .definitions
                    .into_iter()
                    .map(|def| def.name)
                    .filter(|name| is_identifier_path(name)),
            );
            debug!(file, added = names.len() - before, "collected game functions");
        }

        let origin = data_dir.display().to_string();
        if names.is_empty() {
            return Err(CatalogLoadError::Empty { origin }.into());
        }
        info!(functions = names.len(), "built catalog from game sources");
        Ok(Self { names, origin })
    }

    /// Every name of both catalogs.
    #[must_use]
    pub fn union(mut self, other: Self) -> Self {
        self.names.extend(other.names);
        self.origin = format!("{} + {}", self.origin, other.origin);
        self
    }

    #[must_use]
    pub fn is_overridable(&self, name: &str) -> bool {
        self.names.contains(name)
    }

    /// True if every name is in the catalog.
    pub fn contains_all<'n, I>(&self, names: I) -> bool
    where
        I: IntoIterator<Item = &'n str>,
    {
        names.into_iter().all(|name| self.is_overridable(name))
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.names.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }

    /// Names in sorted order.
    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.names.iter().map(String::as_str)
    }

    #[must_use]
    pub fn origin(&self) -> &str {
        &self.origin
    }

    /// Renders the catalog in the data file format.
    #[must_use]
    pub fn to_data_file(&self) -> String {
        let mut out = format!(
            "# Overridable Baba Is You functions ({} entries)\n# source: {}\n",
            self.names.len(),
            self.origin
        );
        for name in &self.names {
            out.push_str(name);
            out.push('\n');
        }
        out
    }
}

#[cfg(test)]
mod tests;
