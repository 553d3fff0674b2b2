// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Top-level definition finder and the override scanner built on it.
//!
//! ```text
//! tokens ──► depth 0, outside () {} [] ?
//!              function a.b(   ─┐
//!              function a:b(    ├─► Definition (body runs to matching `end`)
//!              a = function(   ─┘
//!              local f = code  ───► Capture
//!            depth += function do if repeat
//!            depth -= end until
//! ```
//!
//! `local function` and `local x = function` never count as definitions.

use std::ops::Range;
use std::path::{Path, PathBuf};

use tracing::{debug, trace};

use super::lexer::{Lexer, Token, TokenKind};
use super::overrides::{Hook, Override, OverrideSet};
use crate::catalog::FunctionCatalog;
use crate::error::{DuplicateOverrideError, FsError, ModsResult, SourceLocation};
use crate::mods::BabaMod;
use crate::utility::encoding::decode_source;

/// Syntax used for a top-level definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DefinitionForm {
    /// `function name(...)` or `function t.name(...)`
    Function,
    /// `function t:name(...)`
    Method,
    /// `name = function(...)`
    Assignment,
}

/// A global function defined at the top level of a file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Definition {
    pub name: String,
    pub form: DefinitionForm,
    pub line: usize,
    pub span: Range<usize>,
}

/// A top-level `alias = target` where `target` is a plain name path.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Capture {
    pub alias: String,
    pub target: String,
    pub line: usize,
}

/// Everything found at the top level of one source.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TopLevel {
    pub definitions: Vec<Definition>,
    pub captures: Vec<Capture>,
}

struct Pending {
    name: String,
    form: DefinitionForm,
    line: usize,
    start: usize,
}

impl Pending {
    fn finish(self, end: usize) -> Definition {
        Definition {
            name: self.name,
            form: self.form,
            line: self.line,
            span: self.start..end,
        }
    }
}

/// Collects top-level definitions and captures from Lua source.
#[must_use]
pub fn top_level(src: &str) -> TopLevel {
    let tokens = Lexer::tokenize(src);
    let mut out = TopLevel::default();
    let mut depth = 0usize;
    let mut nest = 0usize;
    let mut pending: Option<Pending> = None;
    let mut i = 0;

    while i < tokens.len() {
        let tok = &tokens[i];

        if depth == 0 && nest == 0 {
            if let Some((name, form, next)) = match_function_statement(&tokens, i) {
                trace!(name = %name, line = tok.line, "function statement");
                pending = Some(Pending {
                    name,
                    form,
                    line: tok.line,
                    start: tok.span.start,
                });
                depth = 1;
                i = next;
                continue;
            }
            if let Some((name, next)) = match_function_assignment(&tokens, i) {
                trace!(name = %name, line = tok.line, "function assignment");
                pending = Some(Pending {
                    name,
                    form: DefinitionForm::Assignment,
                    line: tok.line,
                    start: tok.span.start,
                });
                depth = 1;
                i = next;
                continue;
            }
            if let Some((capture, next)) = match_capture(&tokens, i) {
                out.captures.push(capture);
                i = next;
                continue;
            }
        }

        match tok.kind {
            TokenKind::Keyword => match tok.text {
                "function" | "do" | "if" | "repeat" => depth += 1,
                "end" | "until" => {
                    depth = depth.saturating_sub(1);
                    if depth == 0
                        && let Some(def) = pending.take()
                    {
                        out.definitions.push(def.finish(tok.span.end));
                    }
                }
                _ => {}
            },
            TokenKind::Symbol => match tok.text {
                "(" | "{" | "[" => nest += 1,
                ")" | "}" | "]" => nest = nest.saturating_sub(1),
                _ => {}
            },
            _ => {}
        }
        i += 1;
    }

    // unterminated definition runs to end of source
    if let Some(def) = pending.take() {
        out.definitions.push(def.finish(src.len()));
    }

    out
}

fn prev_blocks_statement(tokens: &[Token<'_>], i: usize) -> bool {
    i.checked_sub(1).is_some_and(|p| {
        let prev = &tokens[p];
        prev.is_keyword("local")
            || prev.is_symbol(".")
            || prev.is_symbol(":")
            || prev.is_symbol(",")
    })
}

/// Parses `Name ('.' Name)*` starting at `i`. Returns the dotted path and the
/// index after it.
fn name_path(tokens: &[Token<'_>], i: usize) -> Option<(String, usize)> {
    let first = tokens.get(i).filter(|t| t.kind == TokenKind::Name)?;
    let mut path = first.text.to_string();
    let mut j = i + 1;
    while tokens.get(j).is_some_and(|t| t.is_symbol("."))
        && let Some(part) = tokens.get(j + 1).filter(|t| t.kind == TokenKind::Name)
    {
        path.push('.');
        path.push_str(part.text);
        j += 2;
    }
    Some((path, j))
}

/// `function a.b:c (` not preceded by `local`.
fn match_function_statement(
    tokens: &[Token<'_>],
    i: usize,
) -> Option<(String, DefinitionForm, usize)> {
    if !tokens[i].is_keyword("function") || prev_blocks_statement(tokens, i) {
        return None;
    }
    let (mut name, mut j) = name_path(tokens, i + 1)?;
    let mut form = DefinitionForm::Function;
    if tokens.get(j).is_some_and(|t| t.is_symbol(":"))
        && let Some(method) = tokens.get(j + 1).filter(|t| t.kind == TokenKind::Name)
    {
        name.push('.');
        name.push_str(method.text);
        form = DefinitionForm::Method;
        j += 2;
    }
    tokens
        .get(j)
        .is_some_and(|t| t.is_symbol("("))
        .then_some((name, form, j))
}

/// `a.b = function`, not preceded by `local`.
fn match_function_assignment(tokens: &[Token<'_>], i: usize) -> Option<(String, usize)> {
    if prev_blocks_statement(tokens, i) {
        return None;
    }
    let (name, j) = name_path(tokens, i)?;
    let is_assignment = tokens.get(j).is_some_and(|t| t.is_symbol("="))
        && tokens.get(j + 1).is_some_and(|t| t.is_keyword("function"));
    is_assignment.then_some((name, j + 2))
}

/// `local alias = a.b` or `alias = a.b`, where the right side is a plain
/// reference (not a call, index or expression).
fn match_capture(tokens: &[Token<'_>], i: usize) -> Option<(Capture, usize)> {
    let is_local = tokens[i].is_keyword("local");
    let lhs_index = if is_local { i + 1 } else { i };
    if !is_local && prev_blocks_statement(tokens, i) {
        return None;
    }

    let alias = tokens.get(lhs_index).filter(|t| t.kind == TokenKind::Name)?;
    if !tokens.get(lhs_index + 1).is_some_and(|t| t.is_symbol("=")) {
        return None;
    }
    let (target, next) = name_path(tokens, lhs_index + 2)?;

    let ends_statement = tokens.get(next).is_none_or(|t| match t.kind {
        TokenKind::Name => true,
        TokenKind::Keyword => !matches!(t.text, "and" | "or"),
        TokenKind::Symbol => t.text == ";",
        TokenKind::String | TokenKind::Number => false,
    });

    ends_statement.then(|| {
        (
            Capture {
                alias: alias.text.to_string(),
                target,
                line: tokens[i].line,
            },
            next,
        )
    })
}

/// Overrides and hooks found in one file.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FileScan {
    pub overrides: Vec<Override>,
    pub hooks: Vec<Hook>,
}

/// Finds catalog functions a mod redefines.
///
/// Holds the catalog by shared reference only, so one catalog can serve
/// scanners on several threads.
#[derive(Debug, Clone, Copy)]
pub struct OverrideScanner<'a> {
    catalog: &'a FunctionCatalog,
}

impl<'a> OverrideScanner<'a> {
    #[must_use]
    pub const fn new(catalog: &'a FunctionCatalog) -> Self {
        Self { catalog }
    }

    #[must_use]
    pub const fn catalog(&self) -> &'a FunctionCatalog {
        self.catalog
    }

    /// Scans one source. `file` is only used for locations.
    #[must_use]
    pub fn scan_source(&self, src: &str, file: &Path) -> FileScan {
        let found = top_level(src);

        let overrides = found
            .definitions
            .into_iter()
            .filter(|def| self.catalog.is_overridable(&def.name))
            .map(|def| Override {
                location: SourceLocation::new(file, def.line),
                body: src[def.span].to_string(),
                name: def.name,
            })
            .collect();

        let hooks = found
            .captures
            .into_iter()
            .filter(|cap| self.catalog.is_overridable(&cap.target))
            .map(|cap| Hook {
                location: SourceLocation::new(file, cap.line),
                alias: cap.alias,
                target: cap.target,
            })
            .collect();

        FileScan { overrides, hooks }
    }

    /// Folds several sources of one mod into its `OverrideSet`.
    ///
    /// # Errors
    ///
    /// Returns `DuplicateOverrideError` when a name is defined twice, in the
    /// same file or across files.
    pub fn scan_sources<I, S>(&self, modid: &str, sources: I) -> Result<OverrideSet, DuplicateOverrideError>
    where
        I: IntoIterator<Item = (PathBuf, S)>,
        S: AsRef<str>,
    {
        let mut set = OverrideSet::new();
        for (file, src) in sources {
            let scan = self.scan_source(src.as_ref(), &file);
            for item in scan.overrides {
                debug!(modid, function = %item.name, location = %item.location, "override");
                set.insert(modid, item)?;
            }
            for hook in scan.hooks {
                debug!(modid, alias = %hook.alias, target = %hook.target, "hook");
                set.add_hook(hook);
            }
        }
        Ok(set)
    }

    /// Scans every Lua file of a mod plus its external init file.
    ///
    /// Locations are relative to the Lua directory holding the mod.
    ///
    /// # Errors
    ///
    /// Returns `ModsError::Fs` if a file cannot be read and
    /// `ModsError::DuplicateOverride` for a name defined twice.
    pub fn scan_mod(&self, item: &BabaMod) -> ModsResult<OverrideSet> {
        let mut files = item.lua_files()?;
        if let Some(init) = item.init_path()
            && !files.contains(&init)
        {
            files.push(init);
        }

        let mut sources = Vec::with_capacity(files.len());
        for path in files {
            let bytes = std::fs::read(&path).map_err(|e| FsError::io(&path, e))?;
            let (text, _) = decode_source(&bytes);
            let shown = path
                .strip_prefix(item.lua_dir())
                .map_or_else(|_| path.clone(), Path::to_path_buf);
            sources.push((shown, text.into_owned()));
        }

        let set = self.scan_sources(item.modid(), sources)?;
        debug!(
            modid = item.modid(),
            overrides = set.len(),
            hooks = set.hooks().len(),
            "scanned mod"
        );
        Ok(set)
    }
}
