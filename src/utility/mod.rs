// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Utility modules.
//!
//! ```text
//! encoding
//!   decode_source()  UTF-8/BOM/UTF-16/CP1252 --> UTF-8
//!   read_source()    read + decode a file
//! fs
//!   walk:  parallel_walk(), find_files(), WalkOptions
//!   copy:  copy_dir_contents_async(), copy_file_async(), copy_dir_contents()
//! ```

pub mod encoding;
pub mod fs;
