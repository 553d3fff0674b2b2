// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! `Config.json` validation.
//!
//! ```text
//! text ─► JSON? ─► object? ─► required: modid authors description global
//!                             optional: icon_url banner_url tags links
//!                                       files init sprites
//!                             paths:    files init sprites stay inside
//!        first failure wins ─► SchemaValidationError{field}
//! ```
//!
//! Nothing is defaulted or repaired. A descriptor is only produced once
//! every check has passed.

use serde_json::{Map, Value};

use super::descriptor::ModDescriptor;
use crate::error::SchemaValidationError;

type Object = Map<String, Value>;

const A_STRING: &str = "a string";
const A_BOOLEAN: &str = "a boolean";
const STRING_LIST: &str = "an array of strings";

/// Validates `Config.json` text and returns the parsed descriptor.
///
/// # Errors
///
/// Returns `SchemaValidationError::InvalidJson` for unparsable text and the
/// errors of [`validate_config_value`] otherwise.
///
/// # Example
/// ```
/// use baba_mods::mods::validate_config_str;
///
/// let err = validate_config_str(r#"{"modid": "glitter", "authors": ["Hempuli"]}"#).unwrap_err();
/// assert_eq!(err.field(), Some("description"));
/// ```
pub fn validate_config_str(text: &str) -> Result<ModDescriptor, SchemaValidationError> {
    let text = text.strip_prefix('\u{feff}').unwrap_or(text);
    let value: Value =
        serde_json::from_str(text).map_err(|e| SchemaValidationError::InvalidJson {
            message: e.to_string(),
        })?;
    validate_config_value(&value)
}

/// Validates an already parsed `Config.json`.
///
/// Required fields are checked in the order `modid`, `authors`,
/// `description`, `global`; the first failure is returned.
///
/// # Errors
///
/// Returns the first `SchemaValidationError` found.
pub fn validate_config_value(value: &Value) -> Result<ModDescriptor, SchemaValidationError> {
    let object = value.as_object().ok_or(SchemaValidationError::NotAnObject)?;

    let modid = required(object, "modid")?
        .as_str()
        .ok_or(SchemaValidationError::WrongType {
            field: "modid",
            expected: A_STRING,
        })?;
    if modid.is_empty() {
        return Err(SchemaValidationError::EmptyField { field: "modid" });
    }

    let authors = string_list(object, "authors")?.unwrap_or_default();
    if authors.is_empty() {
        return Err(SchemaValidationError::EmptyField { field: "authors" });
    }

    if !required(object, "description")?.is_string() {
        return Err(SchemaValidationError::WrongType {
            field: "description",
            expected: A_STRING,
        });
    }
    if !required(object, "global")?.is_boolean() {
        return Err(SchemaValidationError::WrongType {
            field: "global",
            expected: A_BOOLEAN,
        });
    }

    optional_string(object, "icon_url")?;
    optional_string(object, "banner_url")?;
    string_list(object, "tags")?;
    string_list(object, "links")?;
    for file in string_list(object, "files")?.unwrap_or_default() {
        check_relative("files", file)?;
    }
    if let Some(init) = optional_string(object, "init")? {
        check_relative("init", init)?;
    }
    for sprite in string_list(object, "sprites")?.unwrap_or_default() {
        check_relative("sprites", sprite)?;
    }

    serde_json::from_value(value.clone()).map_err(|e| SchemaValidationError::InvalidJson {
        message: e.to_string(),
    })
}

fn required<'v>(object: &'v Object, field: &'static str) -> Result<&'v Value, SchemaValidationError> {
    object
        .get(field)
        .ok_or(SchemaValidationError::MissingField { field })
}

/// `null` counts as absent.
fn optional_string<'v>(
    object: &'v Object,
    field: &'static str,
) -> Result<Option<&'v str>, SchemaValidationError> {
    match object.get(field) {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(s)) => Ok(Some(s)),
        Some(_) => Err(SchemaValidationError::WrongType {
            field,
            expected: A_STRING,
        }),
    }
}

/// Checks an array-of-strings field. `authors` is the only required one;
/// for it a missing field is reported before anything else.
fn string_list<'v>(
    object: &'v Object,
    field: &'static str,
) -> Result<Option<Vec<&'v str>>, SchemaValidationError> {
    let value = if field == "authors" {
        required(object, field)?
    } else {
        match object.get(field) {
            None => return Ok(None),
            Some(value) => value,
        }
    };
    let wrong_type = SchemaValidationError::WrongType {
        field,
        expected: STRING_LIST,
    };
    value
        .as_array()
        .ok_or_else(|| wrong_type.clone())?
        .iter()
        .map(|item| item.as_str().ok_or_else(|| wrong_type.clone()))
        .collect::<Result<Vec<_>, _>>()
        .map(Some)
}

fn check_relative(field: &'static str, path: &str) -> Result<(), SchemaValidationError> {
    if is_contained_path(path) {
        Ok(())
    } else {
        Err(SchemaValidationError::UnsafePath {
            field,
            path: path.to_string(),
        })
    }
}

/// True if `path` is relative and never climbs out of its base directory.
///
/// Both separators are accepted since mods are authored on Windows.
#[must_use]
pub fn is_contained_path(path: &str) -> bool {
    if path.is_empty() || path.starts_with(['/', '\\']) {
        return false;
    }
    let bytes = path.as_bytes();
    if bytes.len() >= 2 && bytes[0].is_ascii_alphabetic() && bytes[1] == b':' {
        return false;
    }
    path.split(['/', '\\']).all(|part| part != "..")
}

/// Why `name` cannot be a single folder inside a `Lua/` directory, if it
/// cannot.
///
/// Merging uses modids as folder names, so a merged modid and both parent
/// modids must pass this check.
///
/// ```
/// use baba_mods::mods::folder_name_problem;
///
/// assert_eq!(folder_name_problem("glitter+sink"), None);
/// assert!(folder_name_problem("../glitter").is_some());
/// ```
#[must_use]
pub fn folder_name_problem(name: &str) -> Option<&'static str> {
    if name.trim().is_empty() {
        Some("it is empty")
    } else if name == "." || name == ".." {
        Some("it names a directory itself")
    } else if name.contains(['/', '\\', ':']) {
        Some("it contains a path separator")
    } else if name.chars().any(char::is_control) {
        Some("it contains a control character")
    } else if name != name.trim_end_matches([' ', '.']) {
        Some("it ends with a space or a dot")
    } else {
        None
    }
}
