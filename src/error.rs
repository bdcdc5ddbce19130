//! Centralised error hierarchy for the **tgoc compiler**.
//!
//! The scanner, parser and code generator all convert their failure modes into
//! one of the variants defined here. Every condition is fatal: the first one
//! raised aborts the current phase and is handed back to the caller, which
//! decides how to report it.
//!
//! The module **does not** print diagnostics itself.

use std::io;
use thiserror::Error;

use log::info;

use crate::token::{Token, TokenKind};

/// Canonical error type used throughout the compiler.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum CompileError {
    /// Lexical (scanner) error with source line information.
    #[error("[line {line}] Error: {message}")]
    Lex {
        /// Human‑readable description.
        message: String,

        /// 1‑based line where the error occurred.
        line: usize,
    },

    /// The current token matches no grammar alternative at this position.
    #[error("[line {line}] Error: unexpected token {kind} '{literal}'")]
    UnexpectedToken {
        kind: TokenKind,
        literal: String,
        line: usize,
    },

    /// A name was read or assigned before any declaration established it.
    #[error("[line {line}] Error: undeclared identifier: {name}")]
    UndeclaredIdentifier { name: String, line: usize },

    /// A `(` or `{` was never closed.
    #[error("[line {line}] Error: expected {expected}, but got {kind} '{literal}'")]
    UnmatchedDelimiter {
        /// The closing delimiter that was looked for.
        expected: TokenKind,
        kind: TokenKind,
        literal: String,
        line: usize,
    },

    /// An integer literal that does not fit in 64 signed bits.
    #[error("[line {line}] Error: integer literal out of range: {literal}")]
    IntegerOverflow { literal: String, line: usize },

    /// Expression or block nesting went past the configured limit.
    #[error("[line {line}] Error: nesting deeper than {limit} levels")]
    NestingTooDeep { limit: usize, line: usize },

    /// The code generator met a tree it cannot lower.
    #[error("Codegen error: {0}")]
    Codegen(String),

    /// Formatting into the assembly buffer failed.
    #[error(transparent)]
    Fmt(#[from] std::fmt::Error),

    /// Wrapper around `std::io::Error` (transparent).  Enables `?` on I/O ops.
    #[error(transparent)]
    Io(#[from] io::Error),

    /// UTF‑8 decoding failure when ingesting external text.
    #[error(transparent)]
    Utf8(#[from] std::string::FromUtf8Error),
}

impl CompileError {
    /// Helper constructor for the **scanner**.
    pub fn lex<S: Into<String>>(line: usize, msg: S) -> Self {
        let message: String = msg.into();

        info!("Creating Lex error: line={}, msg={}", line, message);

        CompileError::Lex { message, line }
    }

    /// `UnexpectedToken` naming the offending token.
    pub fn unexpected(token: &Token<'_>) -> Self {
        info!(
            "Creating UnexpectedToken error: kind={}, literal={}, line={}",
            token.kind, token.lexeme, token.line
        );

        CompileError::UnexpectedToken {
            kind: token.kind,
            literal: token.lexeme.to_owned(),
            line: token.line,
        }
    }

    /// `UndeclaredIdentifier` for `name`, reported at `line`.
    pub fn undeclared<S: Into<String>>(line: usize, name: S) -> Self {
        let name: String = name.into();

        info!("Creating UndeclaredIdentifier error: line={}, name={}", line, name);

        CompileError::UndeclaredIdentifier { name, line }
    }

    /// `UnmatchedDelimiter`: `expected` was looked for but `found` was current.
    pub fn unmatched(expected: TokenKind, found: &Token<'_>) -> Self {
        info!(
            "Creating UnmatchedDelimiter error: expected={}, found={}, line={}",
            expected, found.kind, found.line
        );

        CompileError::UnmatchedDelimiter {
            expected,
            kind: found.kind,
            literal: found.lexeme.to_owned(),
            line: found.line,
        }
    }

    /// The source line the error points at, when it has one.
    pub fn line(&self) -> Option<usize> {
        match self {
            CompileError::Lex { line, .. }
            | CompileError::UnexpectedToken { line, .. }
            | CompileError::UndeclaredIdentifier { line, .. }
            | CompileError::UnmatchedDelimiter { line, .. }
            | CompileError::IntegerOverflow { line, .. }
            | CompileError::NestingTooDeep { line, .. } => Some(*line),
            CompileError::Codegen(_)
            | CompileError::Fmt(_)
            | CompileError::Io(_)
            | CompileError::Utf8(_) => None,
        }
    }
}

/// Crate‑wide `Result` alias.
pub type Result<T> = std::result::Result<T, CompileError>;
