use log::debug;
use serde::Serialize;
use std::fmt;

/// The different kinds of tokens recognized by the tgoc scanner.
///
/// Kinds carry no payload: the literal text of a token lives in
/// [`Token::lexeme`], so two kinds compare equal exactly when they name the
/// same variant.
#[allow(non_camel_case_types, clippy::upper_case_acronyms)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum TokenKind {
    /// Integer literal, e.g. `20` or `255`
    INT,

    /// A user‑defined identifier
    IDENT,

    /// 'true'
    TRUE,

    /// 'false'
    FALSE,

    /// '+'
    ADD,

    /// '-'
    SUB,

    /// '*'
    MUL,

    /// '/'
    DIV,

    /// '%'
    REM,

    /// '<<'
    LSHIFT,

    /// '>>'
    RSHIFT,

    /// '&'
    BAND,

    /// '&^' (bit clear)
    BCLR,

    /// '|'
    BOR,

    /// '^'
    BXOR,

    /// '=='
    EQ,

    /// '!='
    NQ,

    /// '<'
    LT,

    /// '>'
    GT,

    /// '<='
    LTE,

    /// '>='
    GTE,

    /// '&&'
    CAND,

    /// '||'
    COR,

    /// '!'
    NOT,

    /// ':=' short variable declaration
    SVDECL,

    /// '='
    ASSIGN,

    /// '('
    LPAREN,

    /// ')'
    RPAREN,

    /// '{'
    LBRACE,

    /// '}'
    RBRACE,

    /// ';'
    SEMICOLON,

    /// 'if'
    IF,

    /// 'else'
    ELSE,

    /// 'for'
    FOR,

    /// 'return'
    RETURN,

    /// End‑of‑input marker
    EOF,
}

impl TokenKind {
    /// Upper‑case name of the kind, as printed by `tgoc tokenize`.
    pub const fn name(self) -> &'static str {
        match self {
            TokenKind::INT => "INT",
            TokenKind::IDENT => "IDENT",
            TokenKind::TRUE => "TRUE",
            TokenKind::FALSE => "FALSE",
            TokenKind::ADD => "ADD",
            TokenKind::SUB => "SUB",
            TokenKind::MUL => "MUL",
            TokenKind::DIV => "DIV",
            TokenKind::REM => "REM",
            TokenKind::LSHIFT => "LSHIFT",
            TokenKind::RSHIFT => "RSHIFT",
            TokenKind::BAND => "BAND",
            TokenKind::BCLR => "BCLR",
            TokenKind::BOR => "BOR",
            TokenKind::BXOR => "BXOR",
            TokenKind::EQ => "EQ",
            TokenKind::NQ => "NQ",
            TokenKind::LT => "LT",
            TokenKind::GT => "GT",
            TokenKind::LTE => "LTE",
            TokenKind::GTE => "GTE",
            TokenKind::CAND => "CAND",
            TokenKind::COR => "COR",
            TokenKind::NOT => "NOT",
            TokenKind::SVDECL => "SVDECL",
            TokenKind::ASSIGN => "ASSIGN",
            TokenKind::LPAREN => "LPAREN",
            TokenKind::RPAREN => "RPAREN",
            TokenKind::LBRACE => "LBRACE",
            TokenKind::RBRACE => "RBRACE",
            TokenKind::SEMICOLON => "SEMICOLON",
            TokenKind::IF => "IF",
            TokenKind::ELSE => "ELSE",
            TokenKind::FOR => "FOR",
            TokenKind::RETURN => "RETURN",
            TokenKind::EOF => "EOF",
        }
    }
}

impl fmt::Display for TokenKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// A scanned token: its kind, the original lexeme, and the line number where
/// it was found. Tokens are never mutated once produced.
#[derive(Debug, Clone, Copy, Serialize, PartialEq, Eq)]
pub struct Token<'a> {
    /// The category of this token.
    pub kind: TokenKind,

    /// The exact substring from the source that produced this token.
    pub lexeme: &'a str,

    /// 1‑based line number in the source.
    pub line: usize,
}

impl<'a> Token<'a> {
    /// Create a new Token with the given kind, lexeme, and line.
    pub fn new(kind: TokenKind, lexeme: &'a str, line: usize) -> Self {
        debug!(
            "Creating new token: kind={}, lexeme={}, line={}",
            kind, lexeme, line
        );

        Self { kind, lexeme, line }
    }

    /// Shorthand for tokens that do not come from a source buffer.
    pub fn synthetic(kind: TokenKind, lexeme: &'a str) -> Self {
        Self::new(kind, lexeme, 1)
    }

    /// The end‑of‑input marker on `line`.
    pub fn eof(line: usize) -> Self {
        Self::new(TokenKind::EOF, "", line)
    }
}

impl<'a> fmt::Display for Token<'a> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {}", self.kind, self.lexeme)
    }
}
