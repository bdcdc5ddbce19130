//! Module `scanner` implements a one‑pass, streaming lexer for tgoc sources.
//!
//! It transforms a byte slice (`&[u8]`) into a sequence of `Token<'a>`s, skipping whitespace
//! and comments, and emitting exactly one `EOF` token at the end. Designed as a `FusedIterator`,
//! it can be chained safely with other iterator adapters.
//!
//! # Public API
//!
//! - `Scanner::new(src: &'a [u8]) -> Scanner<'a>`
//!   Create a new lexer over the input buffer.
//!
//! - `impl Iterator for Scanner<'a>`
//!   Yields `Result<Token<'a>, CompileError>` on each `.next()`. A lexical error does not
//!   stop the iterator; the caller decides whether to keep going.
//!
//! - `tokenize(src: &'a str) -> Result<Vec<Token<'a>>>`
//!   Collect the whole stream, stopping at the first lexical error.
//!
//! # Token Recognition (`scan_token`)
//!
//! - Single‑character tokens: `(`, `)`, `{`, `}`, `;`, `+`, `-`, `*`, `/`, `%`, `^`.
//! - Greedy two‑character operators: `<<`, `>>`, `<=`, `>=`, `==`, `!=`, `&&`, `||`, `&^`, `:=`.
//! - Integer literals: runs of ASCII digits.
//! - Identifiers/keywords: alphanumeric/_ sequences, resolved via a perfect‑hash `KEYWORDS` map.
//! - `//` comments are skipped with `memchr`.

use crate::error::{CompileError, Result};
use crate::token::{Token, TokenKind};
use log::{debug, info};
use memchr::memchr;
use phf::phf_map;
use std::iter::FusedIterator;

// ─────────────────────────────────────────────────────────────────────────────
// Static keyword map (compile‑time perfect hash)
// ─────────────────────────────────────────────────────────────────────────────

static KEYWORDS: phf::Map<&'static [u8], TokenKind> = phf_map! {
    b"else"   => TokenKind::ELSE,
    b"false"  => TokenKind::FALSE,
    b"for"    => TokenKind::FOR,
    b"if"     => TokenKind::IF,
    b"return" => TokenKind::RETURN,
    b"true"   => TokenKind::TRUE,
};

/// A single pass **scanner / lexer** that converts raw bytes into a
/// sequence of [`Token`]s.  The lifetime `'a` ties every emitted token’s
/// `lexeme` slice back to the original source buffer.
pub struct Scanner<'a> {
    src: &'a [u8],              // entire source text
    start: usize,               // index of the *first* byte of the current lexeme
    curr: usize,                // index *one past* the last byte examined
    line: usize,                // 1‑based line counter (\n increments)
    pending: Option<TokenKind>, // recognised token kind waiting to be emitted
}

impl<'a> Scanner<'a> {
    /// Create a new lexer over `src`.
    #[inline]
    pub fn new(src: &'a [u8]) -> Self {
        info!("Scanner created over {} bytes", src.len());

        Self {
            src,
            start: 0,
            curr: 0,
            line: 1,
            pending: None,
        }
    }

    // ───────────────────────────── primitive helpers ────────────────────────

    #[inline(always)]
    const fn len(&self) -> usize {
        self.src.len()
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.curr >= self.len()
    }

    /// Advance one byte and return it.  Callers guard with [`is_at_end`].
    #[inline(always)]
    fn advance(&mut self) -> u8 {
        let b = self.src[self.curr];
        self.curr += 1;
        b
    }

    /// Peek at the current byte without consuming it.  Returns `0` past EOF.
    #[inline(always)]
    fn peek(&self) -> u8 {
        if self.is_at_end() {
            0
        } else {
            self.src[self.curr]
        }
    }

    /// Conditionally consume a byte **iff** it matches `expected`.
    #[inline(always)]
    fn match_byte(&mut self, expected: u8) -> bool {
        if !self.is_at_end() && self.peek() == expected {
            self.advance();
            true
        } else {
            false
        }
    }

    /// Pick `long` when the next byte is `second`, otherwise `short`.
    #[inline(always)]
    fn either(&mut self, second: u8, long: TokenKind, short: TokenKind) -> TokenKind {
        if self.match_byte(second) {
            long
        } else {
            short
        }
    }

    /// The lexeme between `start` and `curr`.
    fn lexeme(&self) -> Result<&'a str> {
        let src: &'a [u8] = self.src;

        std::str::from_utf8(&src[self.start..self.curr])
            .map_err(|e| CompileError::lex(self.line, format!("Invalid UTF-8: {}", e)))
    }

    // ───────────────────────────── core lexing ─────────────────────────────

    /// Scan a *single* token starting at `self.curr`.  If the lexeme produces an
    /// actual token the kind is stored in `self.pending`.  Whitespace and
    /// comments are skipped by returning `Ok(())` with `pending = None`.
    fn scan_token(&mut self) -> Result<()> {
        let b = self.advance();

        let kind: TokenKind = match b {
            // ── single‑character punctuators ──────────────────────────────
            b'(' => TokenKind::LPAREN,
            b')' => TokenKind::RPAREN,
            b'{' => TokenKind::LBRACE,
            b'}' => TokenKind::RBRACE,
            b';' => TokenKind::SEMICOLON,
            b'+' => TokenKind::ADD,
            b'-' => TokenKind::SUB,
            b'*' => TokenKind::MUL,
            b'%' => TokenKind::REM,
            b'^' => TokenKind::BXOR,

            // ── one‑ or two‑character operators ──────────────────────────
            b'!' => self.either(b'=', TokenKind::NQ, TokenKind::NOT),
            b'=' => self.either(b'=', TokenKind::EQ, TokenKind::ASSIGN),
            b'|' => self.either(b'|', TokenKind::COR, TokenKind::BOR),

            b'<' => {
                if self.match_byte(b'<') {
                    TokenKind::LSHIFT
                } else {
                    self.either(b'=', TokenKind::LTE, TokenKind::LT)
                }
            }

            b'>' => {
                if self.match_byte(b'>') {
                    TokenKind::RSHIFT
                } else {
                    self.either(b'=', TokenKind::GTE, TokenKind::GT)
                }
            }

            b'&' => {
                if self.match_byte(b'&') {
                    TokenKind::CAND
                } else {
                    self.either(b'^', TokenKind::BCLR, TokenKind::BAND)
                }
            }

            b':' => {
                if self.match_byte(b'=') {
                    TokenKind::SVDECL
                } else {
                    return Err(CompileError::lex(self.line, "Expected '=' after ':'"));
                }
            }

            // ── whitespace / newline ─────────────────────────────────────
            b' ' | b'\r' | b'\t' => {
                return Ok(());
            }

            b'\n' => {
                self.line += 1;

                return Ok(());
            }

            // ── comments (// … until newline) ────────────────────────────
            b'/' => {
                if self.match_byte(b'/') {
                    if let Some(pos) = memchr(b'\n', &self.src[self.curr..]) {
                        self.curr += pos;
                    } else {
                        self.curr = self.len();
                    }

                    return Ok(());
                }

                TokenKind::DIV
            }

            b'0'..=b'9' => self.scan_integer(),

            b'a'..=b'z' | b'A'..=b'Z' | b'_' => self.scan_identifier(),

            _ => {
                return Err(CompileError::lex(
                    self.line,
                    format!("Unexpected character: {}", b as char),
                ));
            }
        };

        self.pending = Some(kind);

        Ok(())
    }

    /// Consume the rest of a digit run.  Range checking is left to the parser.
    fn scan_integer(&mut self) -> TokenKind {
        while self.peek().is_ascii_digit() {
            self.advance();
        }

        TokenKind::INT
    }

    /// Scan an identifier and decide if it is a **keyword** or a generic
    /// `IDENT` token.
    fn scan_identifier(&mut self) -> TokenKind {
        while {
            let c: u8 = self.peek();
            c.is_ascii_alphanumeric() || c == b'_'
        } {
            self.advance();
        }

        let slice: &[u8] = &self.src[self.start..self.curr];

        KEYWORDS.get(slice).copied().unwrap_or(TokenKind::IDENT)
    }
}

// ───────────────────────── Iterator implementation ─────────────────────────

impl<'a> Iterator for Scanner<'a> {
    type Item = Result<Token<'a>>;

    fn next(&mut self) -> Option<Self::Item> {
        while self.curr <= self.len() {
            // Emit exactly one EOF, then terminate.
            if self.curr == self.len() {
                self.curr += 1;
                return Some(Ok(Token::eof(self.line)));
            }

            self.start = self.curr;
            self.pending = None;

            if let Err(e) = self.scan_token() {
                return Some(Err(e));
            }

            if let Some(kind) = self.pending.take() {
                let lexeme: &'a str = match self.lexeme() {
                    Ok(lexeme) => lexeme,
                    Err(e) => return Some(Err(e)),
                };

                debug!("Scanned token ({}) on line {}", kind, self.line);

                return Some(Ok(Token::new(kind, lexeme, self.line)));
            }
            // Otherwise it was whitespace / comment → continue loop.
        }

        None
    }
}

impl<'a> FusedIterator for Scanner<'a> {}

/// Scan all of `src`, stopping at the first lexical error.
///
/// On success the last token is always `EOF`.
pub fn tokenize(src: &str) -> Result<Vec<Token<'_>>> {
    let tokens: Vec<Token<'_>> = Scanner::new(src.as_bytes()).collect::<Result<_>>()?;

    info!("Tokenized {} tokens", tokens.len());

    Ok(tokens)
}
