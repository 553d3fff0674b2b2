// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use std::fs;
use std::path::Path;

use tempfile::TempDir;

use crate::cli::merge::{CheckArgs, MergeArgs};
use crate::cli::mods::{CatalogArgs, ValidateArgs};
use crate::cmd::catalog::run_catalog_command;
use crate::cmd::context::{load_catalog, resolve_mod};
use crate::cmd::list::format_mod;
use crate::cmd::merge::{format_report, run_check_command, run_merge_command};
use crate::cmd::validate::{run_validate_command, validate_file};
use crate::config::Config;
use crate::config::paths::GameConfig;
use crate::config::types::CatalogConfig;
use crate::error::{MergeConflictError, ModsError};
use crate::merge::{CompatibilityReport, Incompatibility};
use crate::mods::BabaMod;

const CATALOG: &str = "MOVE\nWIN\nSINK\n";

fn write_mod(lua: &Path, folder: &str, modid: &str, functions: &[&str]) {
    let dir = lua.join(folder);
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Config.json"),
        format!(
            r#"{{"modid": "{modid}", "authors": ["Tester"], "description": "", "global": true, "tags": ["a", "b", "c", "d", "e"]}}"#
        ),
    )
    .unwrap();
    let body: String = functions
        .iter()
        .map(|name| format!("function {name}()\nend\n"))
        .collect();
    fs::write(dir.join("main.lua"), body).unwrap();
}

/// A game root with `Data/`, two compatible mods and one that collides.
fn game() -> (TempDir, Config) {
    let root = TempDir::new().unwrap();
    fs::create_dir_all(root.path().join("Data")).unwrap();
    let lua = root.path().join("Lua");
    write_mod(&lua, "Alpha", "alpha", &["MOVE", "WIN"]);
    write_mod(&lua, "Beta", "beta", &["SINK"]);
    write_mod(&lua, "Gamma", "gamma", &["MOVE"]);
    fs::write(root.path().join("catalog.txt"), CATALOG).unwrap();

    let config = Config {
        game: GameConfig {
            path: Some(root.path().to_path_buf()),
            ..GameConfig::default()
        },
        catalog: CatalogConfig {
            file: Some(root.path().join("catalog.txt")),
            ..CatalogConfig::default()
        },
        ..Config::default()
    };
    (root, config)
}

#[test]
fn test_resolve_mod_by_path_config_and_modid() {
    let (root, config) = game();
    let alpha = root.path().join("Lua/Alpha");

    let by_dir = resolve_mod(&alpha.display().to_string(), None, &config).unwrap();
    let by_file = resolve_mod(&alpha.join("Config.json").display().to_string(), None, &config).unwrap();
    let by_id = resolve_mod("alpha", None, &config).unwrap();
    let by_folder = resolve_mod("Alpha", None, &config).unwrap();

    assert_eq!(by_dir, by_file);
    assert_eq!(by_id.modid(), "alpha");
    assert_eq!(by_folder.modid(), "alpha");

    let err = resolve_mod("delta", None, &config).unwrap_err();
    assert!(err.to_string().starts_with("no mod 'delta' in"));
}

#[test]
fn test_load_catalog_from_config() {
    let (_root, config) = game();
    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog.iter().collect::<Vec<_>>(), ["MOVE", "SINK", "WIN"]);

    let packaged = load_catalog(&Config {
        catalog: CatalogConfig {
            game_sources: false,
            ..CatalogConfig::default()
        },
        ..Config::default()
    })
    .unwrap();
    assert!(packaged.is_overridable("movecommand"));
    assert!(!packaged.is_overridable("MOVE"));
}

#[test]
fn test_load_catalog_adds_game_sources() {
    let (root, mut config) = game();
    config.catalog.file = None;
    fs::write(
        root.path().join("Data/rules.lua"),
        "function code(alreadyrun_)
end

function levelrules_extra()
end
",
    )
    .unwrap();

    let catalog = load_catalog(&config).unwrap();
    assert!(catalog.is_overridable("levelrules_extra"), "{}", catalog.origin());
    assert!(catalog.is_overridable("movecommand"), "packaged names stay");

    config.catalog.game_sources = false;
    assert!(!load_catalog(&config).unwrap().is_overridable("levelrules_extra"));
}

#[test]
fn test_load_catalog_without_game_sources_falls_back() {
    let (_root, mut config) = game();
    config.catalog.file = None;

    // Data/ holds no game sources
    let catalog = load_catalog(&config).unwrap();
    assert_eq!(catalog.origin(), "<packaged>");
}

#[test]
fn test_validate_file_and_command() {
    let (root, _config) = game();
    let alpha = root.path().join("Lua/Alpha");
    assert_eq!(validate_file(&alpha.join("Config.json")).unwrap().modid, "alpha");

    let broken = root.path().join("broken.json");
    fs::write(&broken, r#"{"modid": "x"}"#).unwrap();
    let err = validate_file(&broken).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"invalid Config.json: missing required field 'authors'");

    let ok = ValidateArgs { paths: vec![alpha] };
    run_validate_command(&ok).unwrap();

    let mixed = ValidateArgs {
        paths: vec![root.path().join("Lua/Beta"), broken],
    };
    let err = run_validate_command(&mixed).unwrap_err();
    insta::assert_snapshot!(err.to_string(), @"1 of 2 Config.json files are invalid");
}

#[test]
fn test_check_command_fails_on_conflict() {
    let (_root, config) = game();
    let compatible = CheckArgs {
        first: "alpha".into(),
        second: "beta".into(),
        levelpack: None,
    };
    run_check_command(&compatible, &config).unwrap();

    let colliding = CheckArgs {
        first: "alpha".into(),
        second: "gamma".into(),
        levelpack: None,
    };
    let err = run_check_command(&colliding, &config).unwrap_err();
    let Some(ModsError::MergeConflict(conflict)) = err.downcast_ref::<ModsError>() else {
        panic!("expected a merge conflict, got {err:#}");
    };
    assert_eq!(conflict.functions, ["MOVE"]);
}

#[test]
fn test_merge_command_writes_next_to_first_mod() {
    let (root, config) = game();
    let args = MergeArgs {
        first: "alpha".into(),
        second: "beta".into(),
        ..MergeArgs::default()
    };
    run_merge_command(&args, &config).unwrap();

    let merged = BabaMod::open(root.path().join("Lua/alpha+beta")).unwrap();
    assert_eq!(merged.modid(), "alpha+beta");
    assert!(root.path().join("Lua/alpha+beta_init.lua").is_file());

    // same modid again without --overwrite
    assert!(run_merge_command(&args, &config).is_err());
    let again = MergeArgs {
        overwrite: true,
        ..args
    };
    run_merge_command(&again, &config).unwrap();
}

#[test]
fn test_merge_command_conflict_writes_nothing() {
    let (root, config) = game();
    let out = root.path().join("out");
    let args = MergeArgs {
        first: "alpha".into(),
        second: "gamma".into(),
        output: Some(out.clone()),
        ..MergeArgs::default()
    };
    let err = run_merge_command(&args, &config).unwrap_err();
    assert!(err.downcast_ref::<ModsError>().is_some());
    assert!(!out.join("alpha+gamma").exists());
}

#[test]
fn test_catalog_membership() {
    let (_root, config) = game();
    let known = CatalogArgs {
        names: vec!["MOVE".into(), "WIN".into()],
        ..CatalogArgs::default()
    };
    run_catalog_command(&known, &config).unwrap();

    let unknown = CatalogArgs {
        names: vec!["MOVE".into(), "DEFEAT".into()],
        ..CatalogArgs::default()
    };
    let err = run_catalog_command(&unknown, &config).unwrap_err();
    assert!(err.to_string().ends_with(": DEFEAT"));
}

#[test]
fn test_catalog_write() {
    let (root, config) = game();
    let out = root.path().join("written.txt");
    let args = CatalogArgs {
        write: Some(out.clone()),
        ..CatalogArgs::default()
    };
    run_catalog_command(&args, &config).unwrap();

    let text = fs::read_to_string(&out).unwrap();
    assert!(text.ends_with("MOVE\nSINK\nWIN\n"));
}

#[test]
fn test_format_report() {
    let report = CompatibilityReport {
        flags: Incompatibility::FUNCTIONS | Incompatibility::SPRITES,
        functions: vec!["MOVE".into()],
        sprites: vec!["baba".into()],
        files: Vec::new(),
    };
    insta::assert_debug_snapshot!(format_report(&report), @r#"
    [
        "both override: MOVE",
        "both replace sprites: baba",
    ]
    "#);
    assert_eq!(format_report(&CompatibilityReport::default()), ["no overlap"]);
}

#[test]
fn test_format_mod_shows_effective_tags() {
    let (root, _config) = game();
    let item = BabaMod::open(root.path().join("Lua/Beta")).unwrap();
    let line = format_mod(&item);
    assert!(line.starts_with("beta"));
    assert!(line.ends_with("global  [a, b, c, d]"));
}

#[test]
fn test_conflict_error_message() {
    let err = MergeConflictError {
        left: "alpha".into(),
        right: "gamma".into(),
        functions: vec!["MOVE".into(), "WIN".into()],
    };
    insta::assert_snapshot!(ModsError::from(err).to_string(), @"merge error: 'alpha' and 'gamma' both override: MOVE, WIN");
}
