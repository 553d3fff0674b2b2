// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Generated `<modid>_init.lua` for merged mods.

use std::fmt::Write as _;

use super::MergeParent;

const HEADER: &str = r#"local here = debug.getinfo(1, "S").source:match("^@?(.*[/\\])") or ""
"#;

/// File name a parent's own init file is copied to inside the merged mod.
#[must_use]
pub fn parent_init_name(parent_modid: &str) -> String {
    format!("{parent_modid}_init.lua")
}

/// Lua file paths, relative to the merged mod directory, that start `parent`.
#[must_use]
pub fn entry_points(parent: &MergeParent) -> Vec<String> {
    if parent.init.is_some() {
        vec![parent_init_name(&parent.modid)]
    } else {
        parent
            .lua_files
            .iter()
            .map(|file| format!("{}/{file}", parent.modid))
            .collect()
    }
}

/// Renders the init file. Output depends only on the arguments.
#[must_use]
pub fn render_init(modid: &str, parents: &[MergeParent]) -> String {
    let names: Vec<&str> = parents.iter().map(|p| p.modid.as_str()).collect();

    let mut out = String::new();
    let _ = writeln!(out, "-- {modid}: merged from {} by babamm.", names.join(" and "));
    out.push_str("-- Generated file. Merge again instead of editing it.\n\n");
    out.push_str(HEADER);
    let _ = writeln!(out, "local root = here .. \"{}/\"", lua_escape(modid));

    for parent in parents {
        let _ = writeln!(out, "\n-- {}", parent.modid);
        let entries = entry_points(parent);
        if entries.is_empty() {
            out.push_str("-- no Lua files\n");
        }
        for entry in entries {
            let _ = writeln!(out, "dofile(root .. \"{}\")", lua_escape(&entry));
        }
    }
    out
}

fn lua_escape(text: &str) -> String {
    text.replace('\\', "\\\\").replace('"', "\\\"")
}
