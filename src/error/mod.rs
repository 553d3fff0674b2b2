// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Error handling module.
//!
//! ```text
//!                  ModsError (~24 bytes)
//!                         |
//!   +-------+------+------+------+------+-----+----+
//!   |       |      |      |      |      |     |    |
//!   v       v      v      v      v      v     v    v
//! Catalog Schema  Dup  Conflict Cfg   Game   Fs  Io/Other
//!   Box    Box    Box    Box    Box    Box   Box  Box<str>
//!
//! Sub-errors (unboxed internally):
//!   Catalog   NotFound, Read, Malformed, Empty
//!   Schema    InvalidJson, MissingField, WrongType, UnsafePath
//!   Dup       one function defined twice inside a mod
//!   Conflict  every function both merge parents override
//!   Game      InstallNotFound, LevelpackNotFound, DuplicateModId,
//!             UnusableModId, ReplacesSource
//! ```
//!
//! Nothing in the pipeline is retried or patched up: a mod that fails
//! validation is rejected and a colliding merge is aborted.

use std::fmt;
use std::path::{Path, PathBuf};

use thiserror::Error;

/// Convenience alias for `anyhow::Result`.
pub type Result<T> = anyhow::Result<T>;

/// Result type using [`ModsError`].
pub type ModsResult<T> = std::result::Result<T, ModsError>;

/// Top-level error type for the mod pipeline.
///
/// All sub-errors are boxed to keep this enum at ~24 bytes on the stack.
#[derive(Debug, Error)]
pub enum ModsError {
    /// Fatal error that should terminate the application.
    #[error("fatal error: {0}")]
    Bailed(Box<str>),

    /// The function catalog could not be loaded.
    #[error("catalog error: {0}")]
    Catalog(Box<CatalogLoadError>),

    /// A Config.json failed schema validation.
    #[error("invalid Config.json: {0}")]
    Schema(Box<SchemaValidationError>),

    /// A mod defines the same override more than once.
    #[error("scan error: {0}")]
    DuplicateOverride(Box<DuplicateOverrideError>),

    /// Two mods override the same function.
    #[error("merge error: {0}")]
    MergeConflict(Box<MergeConflictError>),

    /// Tool configuration error.
    #[error("config error: {0}")]
    Config(Box<ConfigError>),

    /// Game installation or levelpack error.
    #[error("game error: {0}")]
    Game(Box<GameError>),

    /// Filesystem error.
    #[error("filesystem error: {0}")]
    Fs(Box<FsError>),

    /// I/O error.
    #[error("io error: {0}")]
    Io(Box<std::io::Error>),

    /// Generic error with message.
    #[error("{0}")]
    Other(Box<str>),
}

/// Create a fatal [`ModsError::Bailed`] that terminates the application.
pub fn bail_out(message: impl Into<String>) -> ModsError {
    ModsError::Bailed(message.into().into_boxed_str())
}

// --- From implementations for boxing ---

/// Macro to generate `From` implementations that box the source error.
macro_rules! impl_from_boxed {
    ($($error:ty => $variant:ident),+ $(,)?) => {
        $(
            impl From<$error> for ModsError {
                fn from(err: $error) -> Self {
                    ModsError::$variant(Box::new(err))
                }
            }
        )+
    };
}

impl_from_boxed! {
    CatalogLoadError => Catalog,
    SchemaValidationError => Schema,
    DuplicateOverrideError => DuplicateOverride,
    MergeConflictError => MergeConflict,
    ConfigError => Config,
    GameError => Game,
    FsError => Fs,
    std::io::Error => Io,
}

// --- Catalog Errors ---

/// Failure to load the list of overridable base-game functions.
#[derive(Debug, Error)]
pub enum CatalogLoadError {
    /// The catalog data file does not exist.
    #[error("catalog file not found: {path}")]
    NotFound { path: String },

    /// The catalog data file could not be read.
    #[error("failed to read catalog '{path}': {source}")]
    Read {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// An entry is not a valid function name, or is listed twice.
    #[error("malformed catalog '{origin}' at line {line}: {message}")]
    Malformed {
        origin: String,
        line: usize,
        message: String,
    },

    /// The catalog holds no names at all.
    #[error("catalog '{origin}' contains no function names")]
    Empty { origin: String },
}

// --- Schema Errors ---

/// A Config.json that does not match the mod descriptor schema.
///
/// Always names the offending field so the mod author can fix it.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum SchemaValidationError {
    /// The document is not JSON at all.
    #[error("not valid JSON: {message}")]
    InvalidJson { message: String },

    /// The document is JSON but not an object.
    #[error("top level value must be an object")]
    NotAnObject,

    /// A required field is absent.
    #[error("missing required field '{field}'")]
    MissingField { field: &'static str },

    /// A field has the wrong JSON type.
    #[error("field '{field}' must be {expected}")]
    WrongType {
        field: &'static str,
        expected: &'static str,
    },

    /// A required field is present but empty.
    #[error("field '{field}' must not be empty")]
    EmptyField { field: &'static str },

    /// A path entry escapes the mod directory.
    #[error("field '{field}' contains '{path}', which does not stay inside the mod directory")]
    UnsafePath { field: &'static str, path: String },
}

impl SchemaValidationError {
    /// Name of the field the error is about, if any.
    #[must_use]
    pub const fn field(&self) -> Option<&'static str> {
        match self {
            Self::InvalidJson { .. } | Self::NotAnObject => None,
            Self::MissingField { field }
            | Self::WrongType { field, .. }
            | Self::EmptyField { field }
            | Self::UnsafePath { field, .. } => Some(*field),
        }
    }
}

// --- Override Errors ---

/// Position of a definition inside a mod's sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SourceLocation {
    /// File path, relative to the mod's Lua directory when possible.
    pub file: PathBuf,
    /// 1-based line number.
    pub line: usize,
}

impl SourceLocation {
    #[must_use]
    pub fn new(file: impl AsRef<Path>, line: usize) -> Self {
        Self {
            file: file.as_ref().to_path_buf(),
            line,
        }
    }
}

impl fmt::Display for SourceLocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{}:{}",
            self.file.to_string_lossy().replace('\\', "/"),
            self.line
        )
    }
}

/// A mod redefines the same catalog function twice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("mod '{modid}' overrides '{function}' twice ({first} and {second})")]
pub struct DuplicateOverrideError {
    pub modid: String,
    pub function: String,
    pub first: SourceLocation,
    pub second: SourceLocation,
}

// --- Merge Errors ---

/// Two mods override at least one common function.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("'{left}' and '{right}' both override: {}", .functions.join(", "))]
pub struct MergeConflictError {
    pub left: String,
    pub right: String,
    /// Every colliding function name, sorted.
    pub functions: Vec<String>,
}

// --- Config Errors ---

/// Configuration-related errors.
#[derive(Debug, Error)]
pub enum ConfigError {
    /// Failed to parse configuration file.
    #[error("failed to parse config file '{path}': {message}")]
    ParseError { path: String, message: String },

    /// Missing required configuration key.
    #[error("missing required config key '{key}' in section '[{section}]'")]
    MissingKey { section: String, key: String },

    /// Invalid configuration value.
    #[error("invalid value for '{key}' in section '[{section}]': {message}")]
    InvalidValue {
        section: String,
        key: String,
        message: String,
    },
}

// --- Game Errors ---

/// Errors about the game installation, levelpacks and installed mods.
#[derive(Debug, Error)]
pub enum GameError {
    /// No game installation at the configured or probed location.
    #[error("no Baba Is You installation found at {path}")]
    InstallNotFound { path: String },

    /// The requested levelpack does not exist.
    #[error("levelpack not found: {name}")]
    LevelpackNotFound { name: String },

    /// A `world_data.txt` line could not be parsed.
    #[error("malformed world_data.txt in {path}: {message}")]
    MalformedWorldData { path: String, message: String },

    /// The path is not a mod directory.
    #[error("not a mod directory: {path}")]
    NotAMod { path: String },

    /// A mod directory has no Config.json.
    #[error("mod directory {path} has no Config.json")]
    MissingConfig { path: String },

    /// Two mods in one Lua directory share a modid.
    #[error("modid '{modid}' is used by both {first} and {second}")]
    DuplicateModId {
        modid: String,
        first: String,
        second: String,
    },

    /// A mod with this modid is already installed.
    #[error("mod '{modid}' is already installed at {path}")]
    AlreadyInstalled { modid: String, path: String },

    /// A modid that cannot name the merged mod's directory.
    #[error("modid '{modid}' cannot be used as a folder name: {message}")]
    UnusableModId { modid: String, message: String },

    /// Writing the merged mod would replace one of its parents.
    #[error("merging into {path} would replace the source mod '{modid}'")]
    ReplacesSource { modid: String, path: String },
}

// --- Filesystem Errors ---

/// Filesystem operation errors.
#[derive(Debug, Error)]
pub enum FsError {
    /// Path not found.
    #[error("path not found: {0}")]
    NotFound(String),

    /// Destination already exists.
    #[error("destination already exists: {0}")]
    AlreadyExists(String),

    /// A directory walk failed.
    #[error("failed to walk '{path}': {message}")]
    WalkFailed { path: String, message: String },

    /// A recursive copy failed.
    #[error("failed to copy '{from}' to '{to}': {message}")]
    CopyFailed {
        from: String,
        to: String,
        message: String,
    },

    /// General I/O error.
    #[error("I/O error on '{path}': {source}")]
    IoError {
        path: String,
        #[source]
        source: std::io::Error,
    },
}

impl FsError {
    /// Wrap an I/O error with the path it happened on.
    pub fn io(path: impl AsRef<Path>, source: std::io::Error) -> Self {
        Self::IoError {
            path: path.as_ref().display().to_string(),
            source,
        }
    }
}
