// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for Config.json validation and mod loading.

use std::fs;

use baba_mods::error::{GameError, ModsError, SchemaValidationError};
use baba_mods::mods::{BabaMod, validate_config_str};
use tempfile::TempDir;

const FULL_CONFIG: &str = r#"{
    "modid": "glitter",
    "authors": ["Plasma", "Hempuli"],
    "description": "Makes everything sparkle.\nWorks with any levelpack.",
    "icon_url": "https://example.com/icon.png",
    "banner_url": null,
    "global": true,
    "tags": ["visual", "particles", "fun", "qol", "ignored"],
    "links": ["https://example.com/glitter"],
    "files": ["rules.lua", "effects/sparkle.lua"],
    "init": "Glitter_init.lua",
    "sprites": ["glitter", "glitter_big"]
}"#;

// =============================================================================
// Schema
// =============================================================================

#[test]
fn validate_full_config() {
    let descriptor = validate_config_str(FULL_CONFIG).unwrap();
    assert_eq!(descriptor.modid, "glitter");
    assert_eq!(descriptor.icon_url.as_deref(), Some("https://example.com/icon.png"));
    assert_eq!(descriptor.banner_url, None);
    assert_eq!(descriptor.tags.len(), 5);
    assert_eq!(descriptor.effective_tags(), ["visual", "particles", "fun", "qol"]);
    assert_eq!(descriptor.init.as_deref(), Some("Glitter_init.lua"));
    assert_eq!(descriptor.sprites, ["glitter", "glitter_big"]);
}

#[test]
fn validate_descriptor_json_round_trips_through_validator() {
    let descriptor = validate_config_str(FULL_CONFIG).unwrap();
    let written = descriptor.to_json().unwrap();
    assert!(!written.contains("banner_url"));
    assert_eq!(validate_config_str(&written).unwrap(), descriptor);
}

#[test]
fn validate_rejects_escaping_paths() {
    for (field, bad) in [
        ("files", r#"["../Other/rules.lua"]"#),
        ("files", r#"["C:\\Games\\evil.lua"]"#),
        ("sprites", r#"["/abs/sprite"]"#),
        ("init", r#""..\\Other_init.lua""#),
    ] {
        let text = format!(
            r#"{{"modid": "m", "authors": ["a"], "description": "", "global": true, "{field}": {bad}}}"#
        );
        let err = validate_config_str(&text).unwrap_err();
        assert!(
            matches!(err, SchemaValidationError::UnsafePath { field: f, .. } if f == field),
            "{field} = {bad} gave {err:?}"
        );
    }
}

#[test]
fn validate_accepts_any_non_empty_modid() {
    for modid in ["  ", "a/b", "pack\\mod", "../m", "Glitter + Sink"] {
        let text = serde_json::json!({
            "modid": modid,
            "authors": ["a"],
            "description": "",
            "global": true
        })
        .to_string();
        let descriptor = validate_config_str(&text).unwrap_or_else(|e| panic!("{modid:?}: {e}"));
        assert_eq!(descriptor.modid, modid);
    }
}

#[test]
fn validate_error_messages() {
    let cases = [
        ("[1, 2]", "top level value must be an object"),
        (r#"{"modid": ""}"#, "field 'modid' must not be empty"),
        (r#"{"modid": "m", "authors": []}"#, "field 'authors' must not be empty"),
        (
            r#"{"modid": "m", "authors": ["a"], "description": 1}"#,
            "field 'description' must be a string",
        ),
        (
            r#"{"modid": "m", "authors": ["a"], "description": "", "global": true, "files": ["../m.lua"]}"#,
            "field 'files' contains '../m.lua', which does not stay inside the mod directory",
        ),
    ];
    for (text, message) in cases {
        assert_eq!(validate_config_str(text).unwrap_err().to_string(), message, "{text}");
    }
    assert!(matches!(
        validate_config_str("{ not json"),
        Err(SchemaValidationError::InvalidJson { .. })
    ));
}

// =============================================================================
// Mod directories
// =============================================================================

#[test]
fn open_mod_with_declared_init() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Glitter");
    fs::create_dir_all(dir.join("effects")).unwrap();
    fs::write(dir.join("Config.json"), FULL_CONFIG).unwrap();
    fs::write(dir.join("rules.lua"), "").unwrap();
    fs::write(dir.join("effects/sparkle.lua"), "").unwrap();
    fs::write(tmp.path().join("Glitter_init.lua"), "").unwrap();

    let item = BabaMod::open(&dir).unwrap();
    assert_eq!(item.name(), "Glitter");
    assert_eq!(item.init_path(), Some(tmp.path().join("Glitter_init.lua")));
    assert_eq!(
        item.lua_files().unwrap(),
        [dir.join("effects/sparkle.lua"), dir.join("rules.lua")]
    );
}

#[test]
fn open_rejects_non_mods() {
    let tmp = TempDir::new().unwrap();

    let err = BabaMod::open(tmp.path().join("missing")).unwrap_err();
    assert!(matches!(err, ModsError::Game(ref e) if matches!(**e, GameError::NotAMod { .. })));

    let empty = tmp.path().join("Empty");
    fs::create_dir_all(&empty).unwrap();
    let err = BabaMod::open(&empty).unwrap_err();
    assert!(matches!(err, ModsError::Game(ref e) if matches!(**e, GameError::MissingConfig { .. })));

    let broken = tmp.path().join("Broken");
    fs::create_dir_all(&broken).unwrap();
    fs::write(broken.join("Config.json"), r#"{"modid": "b", "authors": "me"}"#).unwrap();
    let err = BabaMod::open(&broken).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid Config.json: field 'authors' must be an array of strings");
}

#[test]
fn open_accepts_bom_prefixed_config() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Bom");
    fs::create_dir_all(&dir).unwrap();
    let mut bytes = vec![0xEF, 0xBB, 0xBF];
    bytes.extend_from_slice(br#"{"modid": "bom", "authors": ["a"], "description": "", "global": false}"#);
    fs::write(dir.join("Config.json"), bytes).unwrap();

    let item = BabaMod::open(&dir).unwrap();
    assert_eq!(item.modid(), "bom");
    assert!(!item.descriptor().global);
}
