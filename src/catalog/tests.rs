// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{FunctionCatalog, is_identifier_path};
use crate::error::CatalogLoadError;

#[test]
fn test_packaged_catalog_loads() {
    let catalog = FunctionCatalog::packaged().expect("packaged catalog must parse");
    assert!(catalog.len() > 100);
    assert!(catalog.is_overridable("getunitswitheffect"));
    assert!(catalog.is_overridable("mapcursor_set"));
    assert!(catalog.is_overridable("movecommand"));
    assert!(catalog.is_overridable("code"));
    assert!(catalog.is_overridable("hasfeature"));
    assert!(!catalog.is_overridable("print"));
    assert!(!catalog.is_overridable("MoveCommand"), "lookup is case sensitive");
}

#[test]
fn test_parse_ignores_comments_and_blanks() {
    let catalog = FunctionCatalog::parse(
        "# header\n\nmovecommand\n  trypush   # pushing\nmenufuncs.enter\n",
        "test",
    )
    .unwrap();
    assert_eq!(
        catalog.iter().collect::<Vec<_>>(),
        vec!["menufuncs.enter", "movecommand", "trypush"]
    );
    assert!(catalog.contains_all(["movecommand", "trypush"]));
    assert!(!catalog.contains_all(["movecommand", "win"]));
}

#[test]
fn test_parse_rejects_invalid_name() {
    let err = FunctionCatalog::parse("movecommand\nfoo bar\n", "test").unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"malformed catalog 'test' at line 2: 'foo bar' is not a function name"
    );
}

#[test]
fn test_parse_rejects_duplicates() {
    let err = FunctionCatalog::parse("code\n\ncode\n", "test").unwrap_err();
    assert!(matches!(err, CatalogLoadError::Malformed { line: 3, .. }));
}

#[test]
fn test_parse_rejects_empty() {
    let err = FunctionCatalog::parse("# nothing here\n\n", "test").unwrap_err();
    assert!(matches!(err, CatalogLoadError::Empty { .. }));
}

#[test]
fn test_from_file_missing() {
    let dir = tempfile::tempdir().unwrap();
    let err = FunctionCatalog::from_file(&dir.path().join("functions.txt")).unwrap_err();
    assert!(matches!(err, CatalogLoadError::NotFound { .. }));
}

#[test]
fn test_identifier_paths() {
    assert!(is_identifier_path("movecommand"));
    assert!(is_identifier_path("_private"));
    assert!(is_identifier_path("menufuncs.enter"));
    assert!(!is_identifier_path("a.b.c"));
    assert!(!is_identifier_path("1abc"));
    assert!(!is_identifier_path("a:b"));
    assert!(!is_identifier_path(""));
    assert!(!is_identifier_path(".enter"));
    assert!(!is_identifier_path("menufuncs."));
    assert!(!is_identifier_path("café"));
}

#[test]
fn test_from_game_sources() {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(
        dir.path().join("movement.lua"),
        "function movecommand(ox, oy, dir_, playerid_)\n  local function helper() end\nend\n\nfunction trypush(unitid)\n  return 0\nend\n",
    )
    .unwrap();
    std::fs::write(
        dir.path().join("rules.lua"),
        "code = function(alreadyrun_)\nend\nlocal cache = {}\n",
    )
    .unwrap();
    std::fs::write(dir.path().join("unrelated.lua"), "function ignored() end\n").unwrap();

    let catalog = FunctionCatalog::from_game_sources(dir.path()).unwrap();
    assert_eq!(
        catalog.iter().collect::<Vec<_>>(),
        vec!["code", "movecommand", "trypush"]
    );

    let reparsed = FunctionCatalog::parse(&catalog.to_data_file(), "regenerated").unwrap();
    assert_eq!(
        reparsed.iter().collect::<Vec<_>>(),
        catalog.iter().collect::<Vec<_>>()
    );
}

#[test]
fn test_from_game_sources_without_files() {
    let dir = tempfile::tempdir().unwrap();
    assert!(FunctionCatalog::from_game_sources(dir.path()).is_err());
}

#[test]
fn test_union_keeps_both_sides() {
    let packaged = FunctionCatalog::from_names(["movecommand", "code"]);
    let game = FunctionCatalog::parse("code\nlevelrules_extra\n", "Data").unwrap();

    let both = packaged.union(game);
    assert_eq!(
        both.iter().collect::<Vec<_>>(),
        ["code", "levelrules_extra", "movecommand"]
    );
    assert_eq!(both.origin(), "<memory> + Data");
}
