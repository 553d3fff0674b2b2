// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

use super::{SourceEncoding, decode_source, read_source};
use std::borrow::Cow;

#[test]
fn test_utf8_passthrough_borrows() {
    let input = "function movecommand() end -- 世界";
    let (text, encoding) = decode_source(input.as_bytes());
    assert_eq!(encoding, SourceEncoding::Utf8);
    assert!(matches!(text, Cow::Borrowed(_)));
    assert_eq!(text, input);
}

#[test]
fn test_utf8_bom_stripped() {
    let (text, encoding) = decode_source(b"\xEF\xBB\xBFfunction code() end");
    assert_eq!(encoding, SourceEncoding::Utf8Bom);
    insta::assert_snapshot!(text, @"function code() end");
}

#[test]
fn test_windows_1252_fallback() {
    let (text, encoding) = decode_source(b"-- caf\xe9");
    assert_eq!(encoding, SourceEncoding::Ansi);
    insta::assert_snapshot!(text, @"-- café");
}

#[test]
fn test_utf16_le_with_bom() {
    let (text, encoding) = decode_source(b"\xFF\xFEH\x00i\x00");
    assert_eq!(encoding, SourceEncoding::Utf16Le);
    insta::assert_snapshot!(text, @"Hi");
}

#[test]
fn test_read_source_from_disk() {
    let dir = tempfile::tempdir().expect("failed to create temp dir");
    let path = dir.path().join("rules.lua");
    std::fs::write(&path, b"\xEF\xBB\xBFlocal x = 1\n").expect("failed to write");

    let text = read_source(&path).expect("read should succeed");
    assert_eq!(text, "local x = 1\n");
    assert!(read_source(&dir.path().join("missing.lua")).is_err());
}
