// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Validate command implementation.

use std::path::{Path, PathBuf};

use anyhow::bail;
use tracing::warn;

use crate::cli::mods::ValidateArgs;
use crate::error::{ModsError, Result};
use crate::mods::{CONFIG_FILE_NAME, MAX_EFFECTIVE_TAGS, ModDescriptor, is_contained_path, validate_config_str};
use crate::utility::encoding::read_source;

/// Main handler for validate command.
///
/// Every path is checked; the command fails if any of them is invalid.
///
/// # Errors
///
/// Returns an error naming the number of invalid files.
pub fn run_validate_command(args: &ValidateArgs) -> Result<()> {
    let mut failed = 0usize;
    for path in &args.paths {
        let file = config_file(path);
        match validate_file(&file) {
            Ok(descriptor) => {
                println!("ok    {} ({})", file.display(), descriptor.modid);
                report_warnings(&file, &descriptor);
            }
            Err(e) => {
                failed += 1;
                println!("FAIL  {}: {e:#}", file.display());
            }
        }
    }

    if failed > 0 {
        bail!("{failed} of {} Config.json files are invalid", args.paths.len());
    }
    Ok(())
}

/// A mod directory stands for its `Config.json`.
fn config_file(path: &Path) -> PathBuf {
    if path.is_dir() {
        path.join(CONFIG_FILE_NAME)
    } else {
        path.to_path_buf()
    }
}

/// Reads and validates one `Config.json`.
///
/// # Errors
///
/// Returns a read error or the schema violation.
pub fn validate_file(path: &Path) -> Result<ModDescriptor> {
    let text = read_source(path)?;
    Ok(validate_config_str(&text).map_err(ModsError::from)?)
}

/// Non-fatal findings: ignored tags and declared files missing on disk.
fn report_warnings(file: &Path, descriptor: &ModDescriptor) {
    if descriptor.tags.len() > MAX_EFFECTIVE_TAGS {
        warn!(
            file = %file.display(),
            ignored = ?&descriptor.tags[MAX_EFFECTIVE_TAGS..],
            "only the first {MAX_EFFECTIVE_TAGS} tags are used"
        );
    }

    let Some(dir) = file.parent() else {
        return;
    };
    for listed in &descriptor.files {
        if is_contained_path(listed) && !dir.join(listed).exists() {
            warn!(file = %file.display(), missing = %listed, "listed file does not exist");
        }
    }
}
