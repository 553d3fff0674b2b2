// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Command implementations.
//!
//! ```text
//! CLI args --> cmd::run_* handlers
//!   validate, scan, check, merge, install, list, catalog, options, inis
//! ```

pub mod catalog;
pub mod config;
pub mod context;
pub mod install;
pub mod list;
pub mod merge;
pub mod scan;
pub mod validate;

#[cfg(test)]
mod tests;
