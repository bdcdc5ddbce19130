//! Abstract‑syntax‑tree node definitions produced by the [`Parser`](crate::parser::Parser).
//!
//! Every interior node owns its children exclusively through `Box`/`Vec`.
//! The one cross‑link in the tree is [`Expr::Identifier::binding`], a
//! [`BindingId`] into the program's [`SymbolTable`] captured when the name was
//! parsed.

use serde::Serialize;

use crate::symbols::{BindingId, SymbolTable};
use crate::token::TokenKind;

/// Prefix operators.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnaryOp {
    /// `-x`
    Neg,

    /// `!x`
    Not,
}

impl UnaryOp {
    pub fn from_token(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::SUB => Some(UnaryOp::Neg),
            TokenKind::NOT => Some(UnaryOp::Not),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            UnaryOp::Neg => "-",
            UnaryOp::Not => "!",
        }
    }
}

/// Arithmetic and bitwise infix operators.
///
/// `Add`, `Sub`, `Or` and `Xor` share the additive tier; the rest bind at the
/// multiplicative tier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum BinaryOp {
    Add,
    Sub,
    Or,
    Xor,
    Mul,
    Div,
    Rem,
    Shl,
    Shr,
    And,
    AndNot,
}

impl BinaryOp {
    /// Operators of the additive tier (`+ - | ^`).
    pub fn additive(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::ADD => Some(BinaryOp::Add),
            TokenKind::SUB => Some(BinaryOp::Sub),
            TokenKind::BOR => Some(BinaryOp::Or),
            TokenKind::BXOR => Some(BinaryOp::Xor),
            _ => None,
        }
    }

    /// Operators of the multiplicative tier (`* / % << >> & &^`).
    pub fn multiplicative(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::MUL => Some(BinaryOp::Mul),
            TokenKind::DIV => Some(BinaryOp::Div),
            TokenKind::REM => Some(BinaryOp::Rem),
            TokenKind::LSHIFT => Some(BinaryOp::Shl),
            TokenKind::RSHIFT => Some(BinaryOp::Shr),
            TokenKind::BAND => Some(BinaryOp::And),
            TokenKind::BCLR => Some(BinaryOp::AndNot),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            BinaryOp::Add => "+",
            BinaryOp::Sub => "-",
            BinaryOp::Or => "|",
            BinaryOp::Xor => "^",
            BinaryOp::Mul => "*",
            BinaryOp::Div => "/",
            BinaryOp::Rem => "%",
            BinaryOp::Shl => "<<",
            BinaryOp::Shr => ">>",
            BinaryOp::And => "&",
            BinaryOp::AndNot => "&^",
        }
    }
}

/// Comparisons and boolean connectives; all of them yield a boolean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum LogicalOp {
    Eq,
    Ne,
    Lt,
    Gt,
    Le,
    Ge,
    And,
    Or,
}

impl LogicalOp {
    /// The six comparison operators, which share one tier.
    pub fn comparison(kind: TokenKind) -> Option<Self> {
        match kind {
            TokenKind::EQ => Some(LogicalOp::Eq),
            TokenKind::NQ => Some(LogicalOp::Ne),
            TokenKind::LT => Some(LogicalOp::Lt),
            TokenKind::GT => Some(LogicalOp::Gt),
            TokenKind::LTE => Some(LogicalOp::Le),
            TokenKind::GTE => Some(LogicalOp::Ge),
            _ => None,
        }
    }

    pub const fn symbol(self) -> &'static str {
        match self {
            LogicalOp::Eq => "==",
            LogicalOp::Ne => "!=",
            LogicalOp::Lt => "<",
            LogicalOp::Gt => ">",
            LogicalOp::Le => "<=",
            LogicalOp::Ge => ">=",
            LogicalOp::And => "&&",
            LogicalOp::Or => "||",
        }
    }
}

/// **Abstract‑Syntax‑Tree node** for every kind of *expression*.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Expr {
    /// Integer literal, e.g. `42`.
    Integer(i64),

    /// `true` or `false`.
    Boolean(bool),

    /// A reference to a declared name.
    Identifier {
        name: String,

        /// The binding that was current for `name` when this reference was
        /// parsed.  Later re‑declarations or assignments create new bindings
        /// and leave this one untouched.
        binding: BindingId,
    },

    /// Prefix operator expression, e.g. `-x` or `!ok`.
    Unary { op: UnaryOp, operand: Box<Expr> },

    /// Arithmetic/bitwise infix expression, e.g. `a + b`, `x &^ mask`.
    Binary {
        op: BinaryOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },

    /// Comparison or boolean connective, e.g. `a < b`, `p && q`.
    Logical {
        op: LogicalOp,
        left: Box<Expr>,
        right: Box<Expr>,
    },
}

impl Expr {
    pub fn unary(op: UnaryOp, operand: Expr) -> Self {
        Expr::Unary {
            op,
            operand: Box::new(operand),
        }
    }

    pub fn binary(op: BinaryOp, left: Expr, right: Expr) -> Self {
        Expr::Binary {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }

    pub fn logical(op: LogicalOp, left: Expr, right: Expr) -> Self {
        Expr::Logical {
            op,
            left: Box::new(left),
            right: Box::new(right),
        }
    }
}

/// **Abstract‑Syntax‑Tree node** for *statements*.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub enum Stmt {
    /// Bare expression evaluated for its value.
    Expr(Expr),

    /// `name := value`: introduces or silently replaces a binding.
    Decl {
        name: String,
        value: Expr,
        /// The binding this declaration created.
        binding: BindingId,
    },

    /// `name = value`: overwrites an existing binding.
    Assign {
        name: String,
        value: Expr,
        /// The binding this assignment created.
        binding: BindingId,
    },

    /// `return expr`
    Return(Expr),

    /// `if cond { … } else { … }`
    If {
        cond: Expr,
        consequent: Vec<Stmt>,
        /// `None` when there was no `else`; `Some(vec![])` for `else {}`.
        alternate: Option<Vec<Stmt>>,
    },

    /// `for cond { … }`
    ForSingle { cond: Expr, body: Vec<Stmt> },
}

/// A parsed program: its top‑level statements plus the symbol table the
/// parse built, so that every [`BindingId`] in the tree stays resolvable.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Program {
    pub statements: Vec<Stmt>,
    pub symbols: SymbolTable,
}

impl Program {
    /// Number of top‑level statements.
    pub fn len(&self) -> usize {
        self.statements.len()
    }

    pub fn is_empty(&self) -> bool {
        self.statements.is_empty()
    }
}
