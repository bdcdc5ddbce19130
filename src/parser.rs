/*!
Recursive‑descent parser turning a token sequence into a [`Program`].

Time & Space
------------
* **n** = number of tokens (including the sole EOF).
* Every token is consumed once through `advance()`; there is no backtracking,
  one token of lookahead (two for `IDENT :=` / `IDENT =`) decides every
  production.  **Overall: Θ(n).**
* Call‑stack depth grows with syntactic nesting and is capped by
  [`ParserConfig::max_depth`].  Each left fold of a binary tier also counts
  as one level, so the depth of the finished tree stays under the same cap.

### Logging Policy

| Location                     | Level  | Purpose                                   |
|------------------------------|--------|-------------------------------------------|
| `Parser::new`, `parse`       | `info` | Lifecycle milestones.                     |
| `parse_statement`, `block`   | `debug`| High‑level descent into grammar branches. |

--------------------------------------------------------------------------------
Grammar (EBNF)
--------------

```text
program     → statement* EOF ;
statement   → ( declStmt | assignStmt | returnStmt
              | ifStmt | forStmt | expression ) ";"? ;
declStmt    → IDENT ":=" expression ;
assignStmt  → IDENT "=" expression ;
returnStmt  → "return" expression ;
ifStmt      → "if" expression block ( "else" block )? ;
forStmt     → "for" expression block ;
block       → "{" statement* "}" ;
expression  → logic_or ;
logic_or    → logic_and ( "||" logic_and )* ;
logic_and   → comparison ( "&&" comparison )* ;
comparison  → additive ( ( "==" | "!=" | "<" | ">" | "<=" | ">=" ) additive )* ;
additive    → multiplicative ( ( "+" | "-" | "|" | "^" ) multiplicative )* ;
multiplicative → unary ( ( "*" | "/" | "%" | "<<" | ">>" | "&" | "&^" ) unary )* ;
unary       → ( "-" | "!" | "+" ) unary | primary ;
primary     → INT | "true" | "false" | IDENT | "(" expression ")" ;
```

Every binary tier folds to the left.  Names must be declared before they are
read; a reference captures the binding current at that point.  The first
error ends the parse: there is no recovery.
*/

use crate::ast::{BinaryOp, Expr, LogicalOp, Program, Stmt, UnaryOp};
use crate::error::{CompileError, Result};
use crate::symbols::{BindingId, SymbolTable};
use crate::token::{Token, TokenKind};

use log::{debug, info};

/// Tunables for a single parse.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ParserConfig {
    /// Maximum nesting of parenthesised expressions, unary chains, blocks
    /// and chained binary operators.
    pub max_depth: usize,
}

impl ParserConfig {
    pub const DEFAULT_MAX_DEPTH: usize = 256;
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            max_depth: Self::DEFAULT_MAX_DEPTH,
        }
    }
}

/// Top‑level parser over an immutable slice of tokens.
///
/// The parser owns only its cursor and the symbol table it fills; the tokens
/// stay with the caller.
pub struct Parser<'a> {
    tokens: &'a [Token<'a>],
    current: usize,
    symbols: SymbolTable,
    config: ParserConfig,
    depth: usize,
}

impl<'a> Parser<'a> {
    /// Construct a new parser with the default configuration.
    pub fn new(tokens: &'a [Token<'a>]) -> Self {
        Self::with_config(tokens, ParserConfig::default())
    }

    pub fn with_config(tokens: &'a [Token<'a>], config: ParserConfig) -> Self {
        info!(
            "Parser created with {} tokens (max depth {})",
            tokens.len(),
            config.max_depth
        );

        Self {
            tokens,
            current: 0,
            symbols: SymbolTable::new(),
            config,
            depth: 0,
        }
    }

    // ───────────────────────── public API ─────────────────────────

    /// Parse an entire program: statements until the end‑of‑input marker.
    pub fn parse(mut self) -> Result<Program> {
        info!("Beginning parse phase");

        let mut statements: Vec<Stmt> = Vec::new();

        while !self.is_at_end() {
            statements.push(self.parse_statement()?);
        }

        info!(
            "Parsed {} top-level statement(s), {} name(s) declared",
            statements.len(),
            self.symbols.len()
        );

        Ok(Program {
            statements,
            symbols: self.symbols,
        })
    }

    /// The symbol table as built so far.
    pub fn symbols(&self) -> &SymbolTable {
        &self.symbols
    }

    /// Parse one statement, consuming an optional trailing `;`.
    pub fn parse_statement(&mut self) -> Result<Stmt> {
        let token: Token<'a> = self.peek();

        debug!("Entering statement at {} '{}'", token.kind, token.lexeme);

        let stmt: Stmt = match token.kind {
            TokenKind::IDENT if self.peek_next().kind == TokenKind::SVDECL => {
                self.declaration()?
            }
            TokenKind::IDENT if self.peek_next().kind == TokenKind::ASSIGN => {
                self.assignment()?
            }
            TokenKind::RETURN => self.return_statement()?,
            TokenKind::IF => self.if_statement()?,
            TokenKind::FOR => self.for_statement()?,
            _ => Stmt::Expr(self.parse_expression()?),
        };

        self.matches(TokenKind::SEMICOLON);

        Ok(stmt)
    }

    /// Parse one expression starting at the cursor.
    pub fn parse_expression(&mut self) -> Result<Expr> {
        self.nested(Self::logical_or)
    }

    // ───────────────────────── statement rules ────────────────────

    fn declaration(&mut self) -> Result<Stmt> {
        let name: &'a str = self.advance().lexeme;
        self.advance(); // ':='

        let value: Expr = self.parse_expression()?;
        let binding: BindingId = self.symbols.declare(name, value.clone());

        Ok(Stmt::Decl {
            name: name.to_owned(),
            value,
            binding,
        })
    }

    fn assignment(&mut self) -> Result<Stmt> {
        let target: Token<'a> = self.peek();

        // The target must exist before its value is even looked at.
        if !self.symbols.contains(target.lexeme) {
            return Err(CompileError::undeclared(target.line, target.lexeme));
        }

        self.advance();
        self.advance(); // '='

        let value: Expr = self.parse_expression()?;
        let binding: BindingId = self
            .symbols
            .assign(target.lexeme, value.clone(), target.line)?;

        Ok(Stmt::Assign {
            name: target.lexeme.to_owned(),
            value,
            binding,
        })
    }

    fn return_statement(&mut self) -> Result<Stmt> {
        self.advance();

        Ok(Stmt::Return(self.parse_expression()?))
    }

    fn if_statement(&mut self) -> Result<Stmt> {
        self.advance();

        let cond: Expr = self.parse_expression()?;
        let consequent: Vec<Stmt> = self.block()?;
        let alternate: Option<Vec<Stmt>> = if self.matches(TokenKind::ELSE) {
            Some(self.block()?)
        } else {
            None
        };

        Ok(Stmt::If {
            cond,
            consequent,
            alternate,
        })
    }

    /// Only the single‑condition loop form exists.
    fn for_statement(&mut self) -> Result<Stmt> {
        self.advance();

        let cond: Expr = self.parse_expression()?;
        let body: Vec<Stmt> = self.block()?;

        Ok(Stmt::ForSingle { cond, body })
    }

    /// `{ statement* }`.  Blocks open no scope.
    fn block(&mut self) -> Result<Vec<Stmt>> {
        self.nested(|parser| {
            let open: Token<'a> = parser.peek();

            if !parser.matches(TokenKind::LBRACE) {
                return Err(CompileError::unexpected(&open));
            }

            debug!("Entering block opened on line {}", open.line);

            let mut statements: Vec<Stmt> = Vec::new();

            while !parser.check(TokenKind::RBRACE) {
                if parser.is_at_end() {
                    return Err(CompileError::unmatched(TokenKind::RBRACE, &parser.peek()));
                }

                statements.push(parser.parse_statement()?);
            }

            parser.advance();

            Ok(statements)
        })
    }

    // ─────────────────────── expression rules ─────────────────────

    fn logical_or(&mut self) -> Result<Expr> {
        self.fold_left(
            Self::logical_and,
            |kind| (kind == TokenKind::COR).then_some(LogicalOp::Or),
            Expr::logical,
        )
    }

    fn logical_and(&mut self) -> Result<Expr> {
        self.fold_left(
            Self::comparison,
            |kind| (kind == TokenKind::CAND).then_some(LogicalOp::And),
            Expr::logical,
        )
    }

    fn comparison(&mut self) -> Result<Expr> {
        self.fold_left(Self::additive, LogicalOp::comparison, Expr::logical)
    }

    fn additive(&mut self) -> Result<Expr> {
        self.fold_left(Self::multiplicative, BinaryOp::additive, Expr::binary)
    }

    fn multiplicative(&mut self) -> Result<Expr> {
        self.fold_left(Self::unary, BinaryOp::multiplicative, Expr::binary)
    }

    fn unary(&mut self) -> Result<Expr> {
        if let Some(op) = UnaryOp::from_token(self.peek().kind) {
            self.advance();
            let operand: Expr = self.nested(Self::unary)?;

            return Ok(Expr::unary(op, operand));
        }

        // Unary plus is accepted and leaves no trace in the tree.
        if self.matches(TokenKind::ADD) {
            return self.nested(Self::unary);
        }

        self.primary()
    }

    fn primary(&mut self) -> Result<Expr> {
        let token: Token<'a> = self.peek();

        match token.kind {
            TokenKind::IDENT => {
                let binding: BindingId = self
                    .symbols
                    .lookup(token.lexeme)
                    .ok_or_else(|| CompileError::undeclared(token.line, token.lexeme))?;

                self.advance();

                Ok(Expr::Identifier {
                    name: token.lexeme.to_owned(),
                    binding,
                })
            }

            TokenKind::TRUE => {
                self.advance();
                Ok(Expr::Boolean(true))
            }

            TokenKind::FALSE => {
                self.advance();
                Ok(Expr::Boolean(false))
            }

            TokenKind::INT => {
                let value: i64 =
                    token
                        .lexeme
                        .parse::<i64>()
                        .map_err(|_| CompileError::IntegerOverflow {
                            literal: token.lexeme.to_owned(),
                            line: token.line,
                        })?;

                self.advance();

                Ok(Expr::Integer(value))
            }

            TokenKind::LPAREN => {
                self.advance();

                let expr: Expr = self.parse_expression()?;

                if !self.matches(TokenKind::RPAREN) {
                    return Err(CompileError::unmatched(TokenKind::RPAREN, &self.peek()));
                }

                Ok(expr)
            }

            _ => Err(CompileError::unexpected(&token)),
        }
    }

    // ────────────────────── utility helpers ───────────────────────

    /// `operand ( operator operand )*`, folded to the left.
    ///
    /// Every fold puts the tree one level deeper, so each one counts against
    /// the nesting limit until the tier returns.
    fn fold_left<Op>(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr>,
        operator: fn(TokenKind) -> Option<Op>,
        build: fn(Op, Expr, Expr) -> Expr,
    ) -> Result<Expr> {
        let entry: usize = self.depth;
        let result: Result<Expr> = self.fold_chain(operand, operator, build);
        self.depth = entry;

        result
    }

    fn fold_chain<Op>(
        &mut self,
        operand: fn(&mut Self) -> Result<Expr>,
        operator: fn(TokenKind) -> Option<Op>,
        build: fn(Op, Expr, Expr) -> Expr,
    ) -> Result<Expr> {
        let mut expr: Expr = operand(self)?;

        while let Some(op) = operator(self.peek().kind) {
            self.deepen()?;
            self.advance();
            let right: Expr = operand(self)?;
            expr = build(op, expr, right);
        }

        Ok(expr)
    }

    /// Run `production` one nesting level deeper, failing past the limit.
    fn nested<T>(&mut self, production: impl FnOnce(&mut Self) -> Result<T>) -> Result<T> {
        self.deepen()?;
        let result: Result<T> = production(self);
        self.depth -= 1;

        result
    }

    fn deepen(&mut self) -> Result<()> {
        if self.depth >= self.config.max_depth {
            return Err(CompileError::NestingTooDeep {
                limit: self.config.max_depth,
                line: self.peek().line,
            });
        }

        self.depth += 1;

        Ok(())
    }

    #[inline(always)]
    fn matches(&mut self, kind: TokenKind) -> bool {
        if self.check(kind) {
            self.advance();

            return true;
        }

        false
    }

    #[inline(always)]
    fn check(&self, kind: TokenKind) -> bool {
        self.peek().kind == kind
    }

    /// Step past the current token and return it.  Never moves past EOF.
    #[inline(always)]
    fn advance(&mut self) -> Token<'a> {
        let token: Token<'a> = self.peek();

        if !self.is_at_end() {
            self.current += 1;
        }

        token
    }

    #[inline(always)]
    fn is_at_end(&self) -> bool {
        self.check(TokenKind::EOF)
    }

    /// The current token.  A slice missing its EOF marker behaves as if it
    /// had one.
    #[inline(always)]
    fn peek(&self) -> Token<'a> {
        self.token_at(self.current)
    }

    #[inline(always)]
    fn peek_next(&self) -> Token<'a> {
        self.token_at(self.current + 1)
    }

    fn token_at(&self, index: usize) -> Token<'a> {
        match self.tokens.get(index) {
            Some(token) => *token,
            None => Token::eof(self.tokens.last().map_or(1, |last| last.line)),
        }
    }
}

/// Parse a complete token sequence with the default configuration.
pub fn parse(tokens: &[Token<'_>]) -> Result<Program> {
    Parser::new(tokens).parse()
}
