// baba-mods: Baba Is You Mod Manager
//
// SPDX-FileCopyrightText: 2026 Romeo Ahmed
// SPDX-License-Identifier: GPL-3.0-or-later

//! Lua tokenizer.
//!
//! Produces names, keywords, literals and symbols with byte spans and
//! 1-based line numbers. Comments and whitespace are skipped. The lexer
//! never fails: an unterminated string or long bracket runs to the end of
//! its line (short strings) or of the source (long forms).

use std::ops::Range;

/// Lua 5.x reserved words.
pub const KEYWORDS: [&str; 22] = [
    "and", "break", "do", "else", "elseif", "end", "false", "for", "function", "goto", "if", "in",
    "local", "nil", "not", "or", "repeat", "return", "then", "true", "until", "while",
];

/// Multi-character operators, longest first.
const LONG_SYMBOLS: [&str; 10] = ["...", "..", "==", "~=", "<=", ">=", "::", "//", "<<", ">>"];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TokenKind {
    Name,
    Keyword,
    String,
    Number,
    Symbol,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Token<'a> {
    pub kind: TokenKind,
    pub text: &'a str,
    pub span: Range<usize>,
    pub line: usize,
}

impl Token<'_> {
    /// True if this is the keyword `word`.
    #[must_use]
    pub fn is_keyword(&self, word: &str) -> bool {
        self.kind == TokenKind::Keyword && self.text == word
    }

    /// True if this is the symbol `symbol`.
    #[must_use]
    pub fn is_symbol(&self, symbol: &str) -> bool {
        self.kind == TokenKind::Symbol && self.text == symbol
    }
}

pub struct Lexer<'a> {
    src: &'a str,
    pos: usize,
    line: usize,
}

impl<'a> Lexer<'a> {
    #[must_use]
    pub const fn new(src: &'a str) -> Self {
        Self {
            src,
            pos: 0,
            line: 1,
        }
    }

    /// Tokenize the whole source.
    #[must_use]
    pub fn tokenize(src: &'a str) -> Vec<Token<'a>> {
        Self::new(src).collect()
    }

    fn bytes(&self) -> &'a [u8] {
        self.src.as_bytes()
    }

    fn peek(&self, offset: usize) -> Option<u8> {
        self.bytes().get(self.pos + offset).copied()
    }

    fn advance_to(&mut self, end: usize) {
        let end = end.min(self.src.len());
        self.line += self.bytes()[self.pos..end]
            .iter()
            .filter(|&&b| b == b'\n')
            .count();
        self.pos = end;
    }

    /// Skips whitespace and comments.
    fn skip_trivia(&mut self) {
        while let Some(b) = self.peek(0) {
            if b.is_ascii_whitespace() {
                self.advance_to(self.pos + 1);
            } else if b == b'-' && self.peek(1) == Some(b'-') {
                self.advance_to(self.pos + 2);
                if let Some(level) = self.long_bracket_level() {
                    let end = self.long_bracket_end(level);
                    self.advance_to(end);
                } else {
                    let end = self.src[self.pos..]
                        .find('\n')
                        .map_or(self.src.len(), |i| self.pos + i);
                    self.advance_to(end);
                }
            } else {
                break;
            }
        }
    }

    /// At `[`, returns the level of a long bracket opener (`[[` = 0, `[==[` = 2).
    fn long_bracket_level(&self) -> Option<usize> {
        if self.peek(0) != Some(b'[') {
            return None;
        }
        let mut level = 0;
        while self.peek(1 + level) == Some(b'=') {
            level += 1;
        }
        (self.peek(1 + level) == Some(b'[')).then_some(level)
    }

    /// End offset (exclusive) of the long bracket starting at `pos`.
    fn long_bracket_end(&self, level: usize) -> usize {
        let body_start = self.pos + level + 2;
        let closer = format!("]{}]", "=".repeat(level));
        self.src
            .get(body_start..)
            .and_then(|rest| rest.find(&closer))
            .map_or(self.src.len(), |i| body_start + i + closer.len())
    }

    fn short_string_end(&self, quote: u8) -> usize {
        let bytes = self.bytes();
        let mut i = self.pos + 1;
        while i < bytes.len() {
            match bytes[i] {
                b'\\' => i += 2,
                b'\n' => return i,
                b if b == quote => return i + 1,
                _ => i += 1,
            }
        }
        bytes.len()
    }

    fn name_end(&self) -> usize {
        let bytes = self.bytes();
        let mut i = self.pos;
        while i < bytes.len() && (bytes[i].is_ascii_alphanumeric() || bytes[i] == b'_') {
            i += 1;
        }
        i
    }

    fn number_end(&self) -> usize {
        let bytes = self.bytes();
        let mut i = self.pos;
        while i < bytes.len() {
            let b = bytes[i];
            if b.is_ascii_alphanumeric() || b == b'.' || b == b'_' {
                i += 1;
            } else if (b == b'+' || b == b'-')
                && matches!(bytes[i - 1], b'e' | b'E' | b'p' | b'P')
            {
                i += 1;
            } else {
                break;
            }
        }
        i
    }

    fn symbol_end(&self) -> usize {
        let rest = &self.src[self.pos..];
        LONG_SYMBOLS
            .iter()
            .find(|sym| rest.starts_with(*sym))
            .map_or_else(
                || self.pos + rest.chars().next().map_or(1, char::len_utf8),
                |sym| self.pos + sym.len(),
            )
    }
}

impl<'a> Iterator for Lexer<'a> {
    type Item = Token<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        self.skip_trivia();
        let b = self.peek(0)?;
        let start = self.pos;
        let line = self.line;

        let (kind, end) = if b.is_ascii_alphabetic() || b == b'_' {
            let end = self.name_end();
            let word = &self.src[start..end];
            let kind = if KEYWORDS.contains(&word) {
                TokenKind::Keyword
            } else {
                TokenKind::Name
            };
            (kind, end)
        } else if b.is_ascii_digit() || (b == b'.' && self.peek(1).is_some_and(|n| n.is_ascii_digit()))
        {
            (TokenKind::Number, self.number_end())
        } else if b == b'"' || b == b'\'' {
            (TokenKind::String, self.short_string_end(b))
        } else if let Some(level) = self.long_bracket_level() {
            (TokenKind::String, self.long_bracket_end(level))
        } else {
            (TokenKind::Symbol, self.symbol_end())
        };

        self.advance_to(end);
        Some(Token {
            kind,
            text: &self.src[start..end],
            span: start..end,
            line,
        })
    }
}
