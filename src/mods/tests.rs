// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;

use serde_json::json;

use super::{
    BabaMod, ModDescriptor, folder_name_problem, is_contained_path, validate_config_str,
    validate_config_value,
};
use crate::error::{GameError, ModsError, SchemaValidationError};

fn valid() -> serde_json::Value {
    json!({
        "modid": "glitter",
        "authors": ["Hempuli", "Plasmaflare"],
        "description": "Shiny particles.",
        "global": true
    })
}

#[test]
fn test_minimal_config_is_accepted() {
    let descriptor = validate_config_value(&valid()).unwrap();
    assert_eq!(descriptor.modid, "glitter");
    assert_eq!(descriptor.authors, vec!["Hempuli", "Plasmaflare"]);
    assert!(descriptor.global);
    assert!(descriptor.tags.is_empty());
    assert!(descriptor.files.is_empty());
    assert_eq!(descriptor.init, None);
}

#[test]
fn test_missing_required_fields_are_named_in_order() {
    for field in ["modid", "authors", "description", "global"] {
        let mut value = valid();
        value.as_object_mut().unwrap().remove(field);
        let err = validate_config_value(&value).unwrap_err();
        assert_eq!(err, SchemaValidationError::MissingField { field });
    }

    let err = validate_config_value(&json!({})).unwrap_err();
    assert_eq!(err.field(), Some("modid"));

    let err = validate_config_value(&json!({"modid": "x", "global": 1})).unwrap_err();
    assert_eq!(err.field(), Some("authors"));
}

#[test]
fn test_wrong_types() {
    let cases = [
        ("modid", json!(3), "a string"),
        ("authors", json!("Hempuli"), "an array of strings"),
        ("authors", json!(["ok", 2]), "an array of strings"),
        ("description", json!(null), "a string"),
        ("global", json!("yes"), "a boolean"),
        ("tags", json!("fun"), "an array of strings"),
        ("icon_url", json!(false), "a string"),
        ("sprites", json!([1]), "an array of strings"),
    ];
    for (field, bad, expected) in cases {
        let mut value = valid();
        value[field] = bad;
        let err = validate_config_value(&value).unwrap_err();
        assert_eq!(err, SchemaValidationError::WrongType { field, expected });
    }
}

#[test]
fn test_empty_required_fields() {
    let mut value = valid();
    value["modid"] = json!("");
    assert_eq!(
        validate_config_value(&value).unwrap_err(),
        SchemaValidationError::EmptyField { field: "modid" }
    );

    let mut value = valid();
    value["authors"] = json!([]);
    assert_eq!(
        validate_config_value(&value).unwrap_err(),
        SchemaValidationError::EmptyField { field: "authors" }
    );
}

#[test]
fn test_unsafe_paths_rejected() {
    let cases = [
        ("files", json!(["ok.lua", "../escape.lua"])),
        ("files", json!(["/etc/passwd"])),
        ("files", json!(["C:\\Windows\\x.lua"])),
        ("init", json!("..\\x_init.lua")),
        ("sprites", json!(["sub/../../x"])),
    ];
    for (field, bad) in cases {
        let mut value = valid();
        value[field] = bad;
        let err = validate_config_value(&value).unwrap_err();
        assert_eq!(err.field(), Some(field), "{err}");
        assert!(matches!(err, SchemaValidationError::UnsafePath { .. }));
    }

}

#[test]
fn test_modid_is_any_non_empty_string() {
    for modid in ["  ", "a/b", "pack\\mod", ".."] {
        let mut value = valid();
        value["modid"] = json!(modid);
        assert_eq!(validate_config_value(&value).unwrap().modid, modid);
    }
}

#[test]
fn test_folder_name_problems() {
    assert_eq!(folder_name_problem("glitter+sink"), None);
    assert_eq!(folder_name_problem("Baba Mod"), None);
    assert_eq!(folder_name_problem(""), Some("it is empty"));
    assert_eq!(folder_name_problem("   "), Some("it is empty"));
    assert_eq!(folder_name_problem(".."), Some("it names a directory itself"));
    assert_eq!(folder_name_problem("a/b"), Some("it contains a path separator"));
    assert_eq!(folder_name_problem("a\\b"), Some("it contains a path separator"));
    assert_eq!(folder_name_problem("C:x"), Some("it contains a path separator"));
    assert_eq!(folder_name_problem("tab\there"), Some("it contains a control character"));
    assert_eq!(folder_name_problem("mod."), Some("it ends with a space or a dot"));
}

#[test]
fn test_contained_paths() {
    assert!(is_contained_path("Glitter/rules.lua"));
    assert!(is_contained_path("sub\\file.lua"));
    assert!(is_contained_path("..hidden"));
    assert!(!is_contained_path(""));
    assert!(!is_contained_path("a/../../b"));
}

#[test]
fn test_invalid_json_and_non_object() {
    let err = validate_config_str("{ not json").unwrap_err();
    assert!(matches!(err, SchemaValidationError::InvalidJson { .. }));
    assert_eq!(err.field(), None);

    let err = validate_config_str("[1, 2]").unwrap_err();
    assert_eq!(err, SchemaValidationError::NotAnObject);
}

#[test]
fn test_bom_and_null_optionals_accepted() {
    let text = "\u{feff}{\"modid\":\"a\",\"authors\":[\"x\"],\"description\":\"\",\"global\":false,\"icon_url\":null}";
    let descriptor = validate_config_str(text).unwrap();
    assert_eq!(descriptor.icon_url, None);
}

#[test]
fn test_validation_is_repeatable() {
    let text = valid().to_string();
    assert_eq!(validate_config_str(&text), validate_config_str(&text));
}

#[test]
fn test_effective_tags_keep_first_four() {
    let descriptor = ModDescriptor::builder()
        .with_modid("tags")
        .with_tags(
            ["a", "b", "c", "d", "e", "f"]
                .into_iter()
                .map(String::from)
                .collect(),
        )
        .build();
    assert_eq!(descriptor.effective_tags(), ["a", "b", "c", "d"]);
    assert_eq!(descriptor.tags.len(), 6);

    let short = ModDescriptor::builder().with_modid("short").build();
    assert!(short.effective_tags().is_empty());
}

#[test]
fn test_to_json_field_order() {
    let descriptor = ModDescriptor::builder()
        .with_modid("glitter")
        .with_authors(vec!["Hempuli".to_string()])
        .with_description("Shiny.")
        .with_global(true)
        .with_init("Glitter_init.lua")
        .build();
    let text = descriptor.to_json().unwrap();
    assert!(text.ends_with("}\n"));
    insta::assert_snapshot!(text.trim_end(), @r#"
    {
      "modid": "glitter",
      "authors": [
        "Hempuli"
      ],
      "description": "Shiny.",
      "global": true,
      "tags": [],
      "links": [],
      "files": [],
      "init": "Glitter_init.lua",
      "sprites": []
    }
    "#);
}

fn write_mod(lua: &std::path::Path, name: &str, config: &serde_json::Value) -> std::path::PathBuf {
    let dir = lua.join(name);
    fs::create_dir_all(&dir).unwrap();
    fs::write(dir.join("Config.json"), config.to_string()).unwrap();
    dir
}

#[test]
fn test_open_mod_directory() {
    let root = tempfile::tempdir().unwrap();
    let lua = root.path().join("Lua");
    let dir = write_mod(&lua, "Glitter", &valid());
    fs::write(dir.join("rules.lua"), "function code() end\n").unwrap();
    fs::create_dir_all(dir.join("sub")).unwrap();
    fs::write(dir.join("sub").join("extra.lua"), "").unwrap();
    fs::write(dir.join("notes.txt"), "").unwrap();
    fs::write(lua.join("Glitter_init.lua"), "").unwrap();

    let item = BabaMod::open(&dir).unwrap();
    assert_eq!(item.name(), "Glitter");
    assert_eq!(item.modid(), "glitter");
    assert_eq!(item.lua_dir(), lua.as_path());
    assert_eq!(
        item.lua_files().unwrap(),
        vec![dir.join("rules.lua"), dir.join("sub").join("extra.lua")]
    );
    assert_eq!(item.init_path(), Some(lua.join("Glitter_init.lua")));
    assert_eq!(item.sprites_dir(), root.path().join("Sprites"));
}

#[test]
fn test_declared_init_must_exist() {
    let root = tempfile::tempdir().unwrap();
    let mut config = valid();
    config["init"] = json!("custom_init.lua");
    let dir = write_mod(root.path(), "Glitter", &config);
    fs::write(root.path().join("Glitter_init.lua"), "").unwrap();

    let item = BabaMod::open(&dir).unwrap();
    assert_eq!(item.init_path(), None);

    fs::write(root.path().join("custom_init.lua"), "").unwrap();
    assert_eq!(item.init_path(), Some(root.path().join("custom_init.lua")));
}

#[test]
fn test_open_errors() {
    let root = tempfile::tempdir().unwrap();

    let err = BabaMod::open(root.path().join("missing")).unwrap_err();
    assert!(matches!(err, ModsError::Game(ref e) if matches!(**e, GameError::NotAMod { .. })));

    let empty = root.path().join("Empty");
    fs::create_dir_all(&empty).unwrap();
    let err = BabaMod::open(&empty).unwrap_err();
    assert!(matches!(err, ModsError::Game(ref e) if matches!(**e, GameError::MissingConfig { .. })));

    let dir = write_mod(root.path(), "Broken", &json!({"modid": "broken"}));
    let err = BabaMod::open(&dir).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid Config.json: missing required field 'authors'");
}

#[test]
fn test_sprite_files_match_prefix() {
    let root = tempfile::tempdir().unwrap();
    let mut config = valid();
    config["sprites"] = json!(["ice", "glow"]);
    let dir = write_mod(&root.path().join("Lua"), "Glitter", &config);
    let sprites = root.path().join("Sprites");
    fs::create_dir_all(&sprites).unwrap();
    for name in ["ice_0_1.png", "ice_0_2.png", "icecream_0_1.png", "glow.png", "other.png"] {
        fs::write(sprites.join(name), "").unwrap();
    }

    let item = BabaMod::open(&dir).unwrap();
    let names: Vec<String> = item
        .sprite_files(&item.sprites_dir())
        .unwrap()
        .iter()
        .map(|p| p.file_name().unwrap().to_string_lossy().into_owned())
        .collect();
    assert_eq!(names, vec!["glow.png", "ice_0_1.png", "ice_0_2.png"]);
}
