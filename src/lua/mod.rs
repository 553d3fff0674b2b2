// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lua source analysis.
//!
//! ```text
//! lexer      source -> tokens (comments/strings aware)
//! scanner    tokens -> top-level definitions + captures
//!            OverrideScanner: filter by catalog, fold per mod
//! overrides  OverrideSet: name -> Override, plus hooks
//! ```

pub mod lexer;
pub mod overrides;
pub mod scanner;

pub use overrides::{Hook, Override, OverrideSet};
pub use scanner::{OverrideScanner, top_level};
