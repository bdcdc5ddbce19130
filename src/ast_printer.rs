use crate::ast::{Expr, Program, Stmt};

/// Renders the AST in prefix (S‑expression) form, e.g. `1 + 2 * 3` becomes
/// `(+ 1 (* 2 3))`.
pub struct AstPrinter;

impl AstPrinter {
    pub fn expr(expr: &Expr) -> String {
        match expr {
            // ── leaves ──────────────────────────────────────────────────
            Expr::Integer(n) => n.to_string(),

            Expr::Boolean(b) => b.to_string(),

            Expr::Identifier { name, .. } => name.clone(),

            // ── operators ───────────────────────────────────────────────
            Expr::Unary { op, operand } => format!("({} {})", op.symbol(), Self::expr(operand)),

            Expr::Binary { op, left, right } => format!(
                "({} {} {})",
                op.symbol(),
                Self::expr(left),
                Self::expr(right)
            ),

            Expr::Logical { op, left, right } => format!(
                "({} {} {})",
                op.symbol(),
                Self::expr(left),
                Self::expr(right)
            ),
        }
    }

    pub fn stmt(stmt: &Stmt) -> String {
        match stmt {
            Stmt::Expr(expr) => format!("(expr {})", Self::expr(expr)),

            Stmt::Decl { name, value, .. } => format!("(:= {} {})", name, Self::expr(value)),

            Stmt::Assign { name, value, .. } => format!("(= {} {})", name, Self::expr(value)),

            Stmt::Return(expr) => format!("(return {})", Self::expr(expr)),

            Stmt::If {
                cond,
                consequent,
                alternate,
            } => {
                let mut s = format!("(if {} {}", Self::expr(cond), Self::block(consequent));
                if let Some(alternate) = alternate {
                    s.push_str(&format!(" (else {})", Self::block(alternate)));
                }
                s.push(')');
                s
            }

            Stmt::ForSingle { cond, body } => {
                format!("(for {} {})", Self::expr(cond), Self::block(body))
            }
        }
    }

    /// One top‑level statement per line.
    pub fn program(program: &Program) -> String {
        program
            .statements
            .iter()
            .map(Self::stmt)
            .collect::<Vec<_>>()
            .join("\n")
    }

    fn block(statements: &[Stmt]) -> String {
        let mut s = String::from("(block");
        for stmt in statements {
            s.push(' ');
            s.push_str(&Self::stmt(stmt));
        }
        s.push(')');
        s
    }
}
