// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Text decoding for mod sources and game data files.
//!
//! ```text
//! bytes --detect--> Utf8Bom   strip EF BB BF, UTF-8
//!                   Utf16Le   strip FF FE, UTF-16 LE
//!                   Utf8      valid UTF-8 (borrowed)
//!                   Ansi      Windows-1252 fallback
//! ```
//!
//! Uses `encoding_rs`. Invalid sequences become U+FFFD.

use anyhow::Context;
use encoding_rs::{UTF_16LE, WINDOWS_1252};
use std::borrow::Cow;
use std::path::Path;

use crate::error::Result;

const UTF8_BOM: &[u8] = b"\xEF\xBB\xBF";
const UTF16_LE_BOM: &[u8] = b"\xFF\xFE";

/// Encoding a source file was found in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SourceEncoding {
    /// Plain UTF-8 (also covers ASCII).
    #[default]
    Utf8,
    /// UTF-8 with a byte order mark.
    Utf8Bom,
    /// UTF-16 little endian with a byte order mark.
    Utf16Le,
    /// Windows-1252, used by older editors on Windows.
    Ansi,
}

impl SourceEncoding {
    /// Guess the encoding of `bytes`.
    #[must_use]
    pub fn detect(bytes: &[u8]) -> Self {
        if bytes.starts_with(UTF8_BOM) {
            Self::Utf8Bom
        } else if bytes.starts_with(UTF16_LE_BOM) {
            Self::Utf16Le
        } else if std::str::from_utf8(bytes).is_ok() {
            Self::Utf8
        } else {
            Self::Ansi
        }
    }
}

/// Decodes `bytes` to UTF-8, returning the text and the detected encoding.
///
/// # Example
/// ```
/// use baba_mods::utility::encoding::{decode_source, SourceEncoding};
///
/// let (text, encoding) = decode_source(b"caf\xe9");
/// assert_eq!(text, "café");
/// assert_eq!(encoding, SourceEncoding::Ansi);
/// ```
#[must_use]
pub fn decode_source(bytes: &[u8]) -> (Cow<'_, str>, SourceEncoding) {
    let encoding = SourceEncoding::detect(bytes);
    let text = match encoding {
        SourceEncoding::Utf8 => String::from_utf8_lossy(bytes),
        SourceEncoding::Utf8Bom => String::from_utf8_lossy(&bytes[UTF8_BOM.len()..]),
        SourceEncoding::Utf16Le => {
            let (text, _had_errors) =
                UTF_16LE.decode_without_bom_handling(&bytes[UTF16_LE_BOM.len()..]);
            text
        }
        SourceEncoding::Ansi => {
            let (text, _had_errors) = WINDOWS_1252.decode_without_bom_handling(bytes);
            text
        }
    };
    (text, encoding)
}

/// Reads a text file and decodes it with [`decode_source`].
///
/// # Errors
///
/// Returns an error if the file cannot be read.
pub fn read_source(path: &Path) -> Result<String> {
    let bytes =
        std::fs::read(path).with_context(|| format!("failed to read {}", path.display()))?;
    let (text, encoding) = decode_source(&bytes);
    if encoding != SourceEncoding::Utf8 {
        tracing::debug!(path = %path.display(), ?encoding, "decoded non UTF-8 source");
    }
    Ok(text.into_owned())
}

#[cfg(test)]
mod tests;
