// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Integration tests for the override scanner against the packaged catalog.

use std::fs;
use std::path::Path;

use baba_mods::catalog::FunctionCatalog;
use baba_mods::error::ModsError;
use baba_mods::game::ModLibrary;
use baba_mods::lua::OverrideScanner;
use baba_mods::mods::BabaMod;
use tempfile::TempDir;

const RULES_LUA: &str = r#"-- Glitter: shiny rules
--[[
function code()
  -- commented out, not an override
end
]]

local old_trypush = trypush

function trypush(unitid, ox, oy, dir, pulling, x_, y_, reason, pusherid)
  local text = "function movecommand() end"
  local nested = function() return 1 end
  if unitid ~= nil then
    for i = 1, 3 do
      repeat
        ox = ox + 1
      until ox > 2
    end
  end
  return old_trypush(unitid, ox, oy, dir, pulling, x_, y_, reason, pusherid)
end

local function helper()
end

function glitter_sparkle(unitid)
end
"#;

const INIT_LUA: &str = "\
table.insert(mod_hook_functions[\"level_start\"], function() end)

function movecommand(ox, oy, dir_, playerid_, dir_2, no3d_)
end
";

fn write_glitter(lua: &Path) -> BabaMod {
    let dir = lua.join("Glitter");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Config.json"),
        r#"{"modid": "glitter", "authors": ["Plasma"], "description": "", "global": true}"#,
    )
    .unwrap();
    fs::write(dir.join("rules.lua"), RULES_LUA).unwrap();
    fs::write(lua.join("Glitter_init.lua"), INIT_LUA).unwrap();
    BabaMod::open(&dir).unwrap()
}

#[test]
fn scanner_finds_only_real_top_level_overrides() {
    let tmp = TempDir::new().unwrap();
    let item = write_glitter(tmp.path());
    let catalog = FunctionCatalog::packaged().unwrap();

    let set = OverrideScanner::new(&catalog).scan_mod(&item).unwrap();

    assert_eq!(set.names().collect::<Vec<_>>(), ["movecommand", "trypush"]);
    let trypush = set.get("trypush").unwrap();
    assert_eq!(trypush.location.to_string(), "Glitter/rules.lua:10");
    assert!(trypush.body.starts_with("function trypush("));
    assert!(trypush.body.ends_with("pusherid)\nend"));

    let movecommand = set.get("movecommand").unwrap();
    assert_eq!(movecommand.location.to_string(), "Glitter_init.lua:3");

    let hooks: Vec<(&str, &str)> = set
        .hooks()
        .iter()
        .map(|hook| (hook.alias.as_str(), hook.target.as_str()))
        .collect();
    assert_eq!(hooks, [("old_trypush", "trypush")]);
}

#[test]
fn scanner_ignores_non_catalog_functions() {
    let catalog = FunctionCatalog::packaged().unwrap();
    assert!(!catalog.is_overridable("glitter_sparkle"));
    assert!(!catalog.is_overridable("helper"));
}

#[test]
fn scanner_reads_windows_1252_sources() {
    let tmp = TempDir::new().unwrap();
    let dir = tmp.path().join("Accent");
    fs::create_dir_all(&dir).unwrap();
    fs::write(
        dir.join("Config.json"),
        r#"{"modid": "accent", "authors": ["Zoe"], "description": "", "global": true}"#,
    )
    .unwrap();
    // "-- café" in Windows-1252
    let mut source = b"-- caf\xe9\nfunction code()\nend\n".to_vec();
    source.extend_from_slice(b"function undo()\nend\n");
    fs::write(dir.join("accent.lua"), source).unwrap();

    let item = BabaMod::open(&dir).unwrap();
    let catalog = FunctionCatalog::packaged().unwrap();
    let set = OverrideScanner::new(&catalog).scan_mod(&item).unwrap();
    assert_eq!(set.names().collect::<Vec<_>>(), ["code", "undo"]);
}

#[test]
fn scanner_duplicate_across_mod_files_is_an_error() {
    let tmp = TempDir::new().unwrap();
    let item = write_glitter(tmp.path());
    fs::write(item.dir().join("more.lua"), "\n-- again\ntrypush = function() end\n").unwrap();

    let catalog = FunctionCatalog::packaged().unwrap();
    let err = OverrideScanner::new(&catalog).scan_mod(&item).unwrap_err();
    insta::assert_snapshot!(
        err.to_string(),
        @"scan error: mod 'glitter' overrides 'trypush' twice (Glitter/more.lua:3 and Glitter/rules.lua:10)"
    );
}

#[test]
fn library_index_matches_single_scans() {
    let tmp = TempDir::new().unwrap();
    write_glitter(tmp.path());
    let other = tmp.path().join("Other");
    fs::create_dir_all(&other).unwrap();
    fs::write(
        other.join("Config.json"),
        r#"{"modid": "other", "authors": ["Zoe"], "description": "", "global": false}"#,
    )
    .unwrap();
    fs::write(other.join("o.lua"), "function code()\nend\n").unwrap();

    let catalog = FunctionCatalog::packaged().unwrap();
    let library = ModLibrary::discover(tmp.path()).unwrap();
    let scanner = OverrideScanner::new(&catalog);
    let indexed = library.index(&catalog);

    assert_eq!(indexed.len(), 2);
    for (item, result) in library.mods().iter().zip(indexed) {
        let expected = scanner.scan_mod(item).unwrap();
        let actual: Result<_, ModsError> = result;
        assert_eq!(actual.unwrap(), expected);
    }
}
