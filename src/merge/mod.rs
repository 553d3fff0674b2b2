// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Merging two mods into one.
//!
//! ```text
//!  BabaMod A ─scan─► MergeInput A ─┐
//!                                  ├─► merge_plan() ─► MergedMod ─► write_merged()
//!  BabaMod B ─scan─► MergeInput B ─┘        │                          │
//!                                 shared overrides?          staged in a temp dir,
//!                                   MergeConflictError       renamed into <target>
//! ```
//!
//! Planning does no I/O; writing happens only after a plan exists, so a
//! conflicting pair never touches the target directory.
//!
//! Output layout:
//!
//! ```text
//! <target>/<modid>/Config.json
//! <target>/<modid>/<parent modid>/...      parent mod files
//! <target>/<modid>/<parent modid>_init.lua parent init files
//! <target>/<modid>_init.lua                generated init
//! ```

pub mod init;
pub mod options;
pub mod writer;

use std::collections::BTreeSet;
use std::path::{Path, PathBuf};

use bitflags::bitflags;
use tracing::{info, warn};

use crate::error::{GameError, MergeConflictError, ModsResult};
use crate::lua::{OverrideScanner, OverrideSet};
use crate::mods::{BabaMod, MAX_EFFECTIVE_TAGS, ModDescriptor, folder_name_problem};

pub use options::MergeOptions;
pub use writer::write_merged;

/// One side of a merge: a mod and what it overrides.
#[derive(Debug, Clone)]
pub struct MergeInput<'a> {
    item: &'a BabaMod,
    overrides: OverrideSet,
    lua_files: Vec<String>,
    init: Option<PathBuf>,
}

impl<'a> MergeInput<'a> {
    /// Pairs a mod with an already computed override set.
    ///
    /// No files are read; the generated init will not load any of this
    /// mod's files unless [`Self::with_lua_files`] is used.
    #[must_use]
    pub const fn new(item: &'a BabaMod, overrides: OverrideSet) -> Self {
        Self {
            item,
            overrides,
            lua_files: Vec::new(),
            init: None,
        }
    }

    /// Scans `item` and records its Lua files and init file.
    ///
    /// # Errors
    ///
    /// Returns the scanner's errors.
    pub fn scan(item: &'a BabaMod, scanner: &OverrideScanner<'_>) -> ModsResult<Self> {
        let overrides = scanner.scan_mod(item)?;
        let lua_files = item
            .lua_files()?
            .iter()
            .filter_map(|path| path.strip_prefix(item.dir()).ok())
            .map(|path| path.to_string_lossy().replace('\\', "/"))
            .collect();
        Ok(Self {
            item,
            overrides,
            lua_files,
            init: item.init_path(),
        })
    }

    /// Sets the mod's Lua files, relative to its directory.
    #[must_use]
    pub fn with_lua_files(mut self, files: Vec<String>) -> Self {
        self.lua_files = files;
        self
    }

    #[must_use]
    pub const fn item(&self) -> &'a BabaMod {
        self.item
    }

    #[must_use]
    pub const fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    #[must_use]
    pub fn modid(&self) -> &str {
        self.item.modid()
    }
}

/// A parent of a merged mod, as far as writing needs it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergeParent {
    pub modid: String,
    pub dir: PathBuf,
    pub init: Option<PathBuf>,
    pub lua_files: Vec<String>,
}

impl From<&MergeInput<'_>> for MergeParent {
    fn from(input: &MergeInput<'_>) -> Self {
        Self {
            modid: input.modid().to_string(),
            dir: input.item.dir().to_path_buf(),
            init: input.init.clone(),
            lua_files: input.lua_files.clone(),
        }
    }
}

/// The result of planning a merge: everything that will be written.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MergedMod {
    descriptor: ModDescriptor,
    overrides: OverrideSet,
    init_lua: Option<String>,
    parents: Vec<MergeParent>,
}

impl MergedMod {
    #[must_use]
    pub const fn descriptor(&self) -> &ModDescriptor {
        &self.descriptor
    }

    #[must_use]
    pub fn modid(&self) -> &str {
        &self.descriptor.modid
    }

    #[must_use]
    pub const fn overrides(&self) -> &OverrideSet {
        &self.overrides
    }

    /// Generated init file, unless init generation was turned off.
    #[must_use]
    pub fn init_lua(&self) -> Option<&str> {
        self.init_lua.as_deref()
    }

    /// Parents in the order they were supplied.
    #[must_use]
    pub fn parents(&self) -> &[MergeParent] {
        &self.parents
    }

    /// Directory the merged mod occupies under `target`.
    #[must_use]
    pub fn dir_in(&self, target: &Path) -> PathBuf {
        target.join(&self.descriptor.modid)
    }

    /// Path of the generated init file under `target`.
    #[must_use]
    pub fn init_path_in(&self, target: &Path) -> PathBuf {
        target.join(init::parent_init_name(&self.descriptor.modid))
    }
}

/// Plans the merge of `a` and `b`. Does not touch the filesystem.
///
/// # Errors
///
/// - `MergeConflictError` naming every function both override.
/// - `GameError::DuplicateModId` if both sides have the same modid.
/// - `GameError::UnusableModId` if the merged modid or a parent modid
///   cannot be a folder name.
pub fn merge_plan(a: &MergeInput<'_>, b: &MergeInput<'_>, options: &MergeOptions) -> ModsResult<MergedMod> {
    let conflicts = a.overrides.conflicts_with(&b.overrides);
    if !conflicts.is_empty() {
        warn!(left = a.modid(), right = b.modid(), ?conflicts, "merge refused");
        return Err(MergeConflictError {
            left: a.modid().to_string(),
            right: b.modid().to_string(),
            functions: conflicts,
        }
        .into());
    }
    if a.modid() == b.modid() {
        return Err(GameError::DuplicateModId {
            modid: a.modid().to_string(),
            first: a.item.dir().display().to_string(),
            second: b.item.dir().display().to_string(),
        }
        .into());
    }

    let shared_sprites = shared(&a.item.descriptor().sprites, &b.item.descriptor().sprites);
    if !shared_sprites.is_empty() {
        warn!(
            left = a.modid(),
            right = b.modid(),
            sprites = ?shared_sprites,
            "both mods replace the same sprites"
        );
    }

    let modid = options
        .modid()
        .map_or_else(|| format!("{}+{}", a.modid(), b.modid()), str::to_string);
    for name in [a.modid(), b.modid(), modid.as_str()] {
        usable_folder_name(name)?;
    }
    let parents = vec![MergeParent::from(a), MergeParent::from(b)];
    let init_lua = options
        .include_init()
        .then(|| init::render_init(&modid, &parents));
    let descriptor = merged_descriptor(&modid, a, b, options.include_init());
    let overrides = a.overrides.clone().union(b.overrides.clone());

    info!(
        modid = %modid,
        overrides = overrides.len(),
        "planned merge of {} and {}",
        a.modid(),
        b.modid()
    );

    Ok(MergedMod {
        descriptor,
        overrides,
        init_lua,
        parents,
    })
}

fn merged_descriptor(modid: &str, a: &MergeInput<'_>, b: &MergeInput<'_>, with_init: bool) -> ModDescriptor {
    let left = a.item.descriptor();
    let right = b.item.descriptor();

    let mut description = format!("Merged from {} and {}.", left.modid, right.modid);
    for text in [&left.description, &right.description] {
        if !text.is_empty() {
            description.push('\n');
            description.push_str(text);
        }
    }

    let mut tags = dedup(left.effective_tags().iter().chain(right.effective_tags()));
    tags.truncate(MAX_EFFECTIVE_TAGS);

    let files = [left, right]
        .into_iter()
        .flat_map(|d| d.files.iter().map(move |f| format!("{}/{f}", d.modid)))
        .collect();

    ModDescriptor {
        modid: modid.to_string(),
        authors: dedup(left.authors.iter().chain(&right.authors)),
        description,
        icon_url: left.icon_url.clone().or_else(|| right.icon_url.clone()),
        banner_url: left.banner_url.clone().or_else(|| right.banner_url.clone()),
        global: left.global && right.global,
        tags,
        links: dedup(left.links.iter().chain(&right.links)),
        files,
        init: with_init.then(|| init::parent_init_name(modid)),
        sprites: dedup(left.sprites.iter().chain(&right.sprites)),
    }
}

fn usable_folder_name(modid: &str) -> ModsResult<()> {
    match folder_name_problem(modid) {
        Some(message) => Err(GameError::UnusableModId {
            modid: modid.to_string(),
            message: message.to_string(),
        }
        .into()),
        None => Ok(()),
    }
}

/// Keeps the first occurrence of each value.
fn dedup<'s>(items: impl Iterator<Item = &'s String>) -> Vec<String> {
    let mut seen = BTreeSet::new();
    items
        .filter(|item| seen.insert(item.as_str()))
        .cloned()
        .collect()
}

fn shared(left: &[String], right: &[String]) -> Vec<String> {
    let left: BTreeSet<&String> = left.iter().collect();
    let right: BTreeSet<&String> = right.iter().collect();
    left.intersection(&right).map(|s| (*s).clone()).collect()
}

bitflags! {
    /// Reasons two mods do not fit together.
    #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
    pub struct Incompatibility: u8 {
        /// Both override a catalog function. Blocks merging.
        const FUNCTIONS = 0x01;
        /// Both replace a sprite. The later one wins in game.
        const SPRITES = 0x02;
        /// Both list the same relative file.
        const FILES = 0x04;
    }
}

/// Outcome of [`check_compatibility`].
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompatibilityReport {
    pub flags: Incompatibility,
    pub functions: Vec<String>,
    pub sprites: Vec<String>,
    pub files: Vec<String>,
}

impl CompatibilityReport {
    /// No overlap of any kind.
    #[must_use]
    pub const fn is_compatible(&self) -> bool {
        self.flags.is_empty()
    }

    /// Merging would succeed.
    #[must_use]
    pub const fn is_mergeable(&self) -> bool {
        !self.flags.contains(Incompatibility::FUNCTIONS)
    }
}

/// Compares two mods without planning or writing anything.
#[must_use]
pub fn check_compatibility(a: &MergeInput<'_>, b: &MergeInput<'_>) -> CompatibilityReport {
    let left = a.item.descriptor();
    let right = b.item.descriptor();

    let functions = a.overrides.conflicts_with(&b.overrides);
    let sprites = shared(&left.sprites, &right.sprites);
    let files = shared(&left.files, &right.files);

    let mut flags = Incompatibility::empty();
    flags.set(Incompatibility::FUNCTIONS, !functions.is_empty());
    flags.set(Incompatibility::SPRITES, !sprites.is_empty());
    flags.set(Incompatibility::FILES, !files.is_empty());

    CompatibilityReport {
        flags,
        functions,
        sprites,
        files,
    }
}
