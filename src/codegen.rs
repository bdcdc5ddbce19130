//! Lowers a parsed [`Program`] to x86‑64 assembly (GNU `as`, Intel syntax).
//!
//! The generated entry function keeps every declared name in its own 8‑byte
//! stack slot below `rbp` and evaluates expressions into `rax` with a simple
//! push/pop stack machine.  Booleans are `0`/`1`.  An expression statement
//! leaves its value in `rax`, so a program that never executes `return` exits
//! with the value of the last expression it evaluated.

use std::collections::HashMap;
use std::fmt::Write;

use log::{debug, info};

use crate::ast::{BinaryOp, Expr, LogicalOp, Program, Stmt, UnaryOp};
use crate::error::{CompileError, Result};
use crate::symbols::BindingId;

/// Output options for the code generator.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodegenConfig {
    /// Global label of the generated function, e.g. `main` or `_main`.
    pub entry_symbol: String,
}

impl Default for CodegenConfig {
    fn default() -> Self {
        Self {
            entry_symbol: String::from("main"),
        }
    }
}

const RETURN_LABEL: &str = ".Lreturn";

/// Single‑use assembly writer for one program.
pub struct Codegen<'p> {
    config: CodegenConfig,
    program: Option<&'p Program>,
    out: String,
    slots: HashMap<&'p str, usize>,
    labels: usize,
}

impl<'p> Codegen<'p> {
    pub fn new(config: CodegenConfig) -> Self {
        Self {
            config,
            program: None,
            out: String::new(),
            slots: HashMap::new(),
            labels: 0,
        }
    }

    /// Emit the whole program and return the assembly text.
    pub fn generate(mut self, program: &'p Program) -> Result<String> {
        info!(
            "Generating code for {} statement(s), entry '{}'",
            program.len(),
            self.config.entry_symbol
        );

        self.program = Some(program);

        for (index, name) in program.symbols.names().into_iter().enumerate() {
            self.slots.insert(name, (index + 1) * 8);
        }

        let frame: usize = (self.slots.len() * 8).next_multiple_of(16);

        self.prologue(frame)?;

        for stmt in &program.statements {
            self.stmt(stmt)?;
        }

        self.epilogue()?;

        info!("Generated {} bytes of assembly", self.out.len());

        Ok(self.out)
    }

    // ───────────────────────── function frame ─────────────────────────

    fn prologue(&mut self, frame: usize) -> Result<()> {
        let entry: &str = &self.config.entry_symbol;

        writeln!(self.out, ".intel_syntax noprefix")?;
        writeln!(self.out, ".globl {}", entry)?;
        writeln!(self.out, "{}:", entry)?;
        writeln!(self.out, "  push rbp")?;
        writeln!(self.out, "  mov rbp, rsp")?;

        if frame > 0 {
            let mut buf = itoa::Buffer::new();
            writeln!(self.out, "  sub rsp, {}", buf.format(frame))?;
        }

        writeln!(self.out, "  mov rax, 0")?;

        Ok(())
    }

    fn epilogue(&mut self) -> Result<()> {
        writeln!(self.out, "{}:", RETURN_LABEL)?;
        writeln!(self.out, "  mov rsp, rbp")?;
        writeln!(self.out, "  pop rbp")?;
        writeln!(self.out, "  ret")?;

        Ok(())
    }

    // ───────────────────────── statements ─────────────────────────────

    fn stmt(&mut self, stmt: &Stmt) -> Result<()> {
        match stmt {
            Stmt::Expr(expr) => self.expr(expr),

            Stmt::Decl { name, value, .. } | Stmt::Assign { name, value, .. } => {
                self.expr(value)?;
                let slot: String = self.slot(name)?;
                writeln!(self.out, "  mov {}, rax", slot)?;
                Ok(())
            }

            Stmt::Return(expr) => {
                self.expr(expr)?;
                writeln!(self.out, "  jmp {}", RETURN_LABEL)?;
                Ok(())
            }

            Stmt::If {
                cond,
                consequent,
                alternate,
            } => {
                let else_label: String = self.label("else");
                let end_label: String = self.label("end");

                self.expr(cond)?;
                writeln!(self.out, "  cmp rax, 0")?;
                writeln!(self.out, "  je {}", else_label)?;
                self.block(consequent)?;
                writeln!(self.out, "  jmp {}", end_label)?;
                writeln!(self.out, "{}:", else_label)?;
                if let Some(alternate) = alternate {
                    self.block(alternate)?;
                }
                writeln!(self.out, "{}:", end_label)?;
                Ok(())
            }

            Stmt::ForSingle { cond, body } => {
                let begin_label: String = self.label("begin");
                let end_label: String = self.label("end");

                writeln!(self.out, "{}:", begin_label)?;
                self.expr(cond)?;
                writeln!(self.out, "  cmp rax, 0")?;
                writeln!(self.out, "  je {}", end_label)?;
                self.block(body)?;
                writeln!(self.out, "  jmp {}", begin_label)?;
                writeln!(self.out, "{}:", end_label)?;
                Ok(())
            }
        }
    }

    fn block(&mut self, statements: &[Stmt]) -> Result<()> {
        debug!("Lowering block of {} statement(s)", statements.len());

        for stmt in statements {
            self.stmt(stmt)?;
        }

        Ok(())
    }

    // ───────────────────────── expressions ────────────────────────────

    fn expr(&mut self, expr: &Expr) -> Result<()> {
        match expr {
            Expr::Integer(n) => {
                let mut buf = itoa::Buffer::new();
                writeln!(self.out, "  mov rax, {}", buf.format(*n))?;
            }

            Expr::Boolean(b) => {
                writeln!(self.out, "  mov rax, {}", u8::from(*b))?;
            }

            Expr::Identifier { name, binding } => {
                self.check_binding(name, *binding)?;
                let slot: String = self.slot(name)?;
                writeln!(self.out, "  mov rax, {}", slot)?;
            }

            Expr::Unary { op, operand } => {
                self.expr(operand)?;
                match op {
                    UnaryOp::Neg => writeln!(self.out, "  neg rax")?,
                    UnaryOp::Not => {
                        writeln!(self.out, "  cmp rax, 0")?;
                        writeln!(self.out, "  sete al")?;
                        writeln!(self.out, "  movzx rax, al")?;
                    }
                }
            }

            Expr::Binary { op, left, right } => {
                self.operands(left, right)?;
                self.binary(*op)?;
            }

            Expr::Logical { op, left, right } => {
                let set: &str = match op {
                    LogicalOp::And => return self.short_circuit(left, right, "je", 0),
                    LogicalOp::Or => return self.short_circuit(left, right, "jne", 1),
                    LogicalOp::Eq => "sete",
                    LogicalOp::Ne => "setne",
                    LogicalOp::Lt => "setl",
                    LogicalOp::Gt => "setg",
                    LogicalOp::Le => "setle",
                    LogicalOp::Ge => "setge",
                };
                self.operands(left, right)?;
                writeln!(self.out, "  cmp rax, rdi")?;
                writeln!(self.out, "  {} al", set)?;
                writeln!(self.out, "  movzx rax, al")?;
            }
        }

        Ok(())
    }

    /// Evaluate `left` into `rax` and `right` into `rdi`, left first.
    fn operands(&mut self, left: &Expr, right: &Expr) -> Result<()> {
        self.expr(left)?;
        writeln!(self.out, "  push rax")?;
        self.expr(right)?;
        writeln!(self.out, "  mov rdi, rax")?;
        writeln!(self.out, "  pop rax")?;

        Ok(())
    }

    fn binary(&mut self, op: BinaryOp) -> Result<()> {
        match op {
            BinaryOp::Add => writeln!(self.out, "  add rax, rdi")?,
            BinaryOp::Sub => writeln!(self.out, "  sub rax, rdi")?,
            BinaryOp::Or => writeln!(self.out, "  or rax, rdi")?,
            BinaryOp::Xor => writeln!(self.out, "  xor rax, rdi")?,
            BinaryOp::Mul => writeln!(self.out, "  imul rax, rdi")?,
            BinaryOp::Div => {
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  idiv rdi")?;
            }
            BinaryOp::Rem => {
                writeln!(self.out, "  cqo")?;
                writeln!(self.out, "  idiv rdi")?;
                writeln!(self.out, "  mov rax, rdx")?;
            }
            BinaryOp::Shl => {
                writeln!(self.out, "  mov rcx, rdi")?;
                writeln!(self.out, "  shl rax, cl")?;
            }
            BinaryOp::Shr => {
                writeln!(self.out, "  mov rcx, rdi")?;
                writeln!(self.out, "  sar rax, cl")?;
            }
            BinaryOp::And => writeln!(self.out, "  and rax, rdi")?,
            BinaryOp::AndNot => {
                writeln!(self.out, "  not rdi")?;
                writeln!(self.out, "  and rax, rdi")?;
            }
        }

        Ok(())
    }

    /// `&&` / `||`: skip `right` as soon as `left` decides the result.
    /// `jump` leaves for the short path, whose value is `decided`.
    fn short_circuit(&mut self, left: &Expr, right: &Expr, jump: &str, decided: u8) -> Result<()> {
        let short_label: String = self.label("short");
        let end_label: String = self.label("end");

        self.expr(left)?;
        writeln!(self.out, "  cmp rax, 0")?;
        writeln!(self.out, "  {} {}", jump, short_label)?;
        self.expr(right)?;
        writeln!(self.out, "  cmp rax, 0")?;
        writeln!(self.out, "  {} {}", jump, short_label)?;
        writeln!(self.out, "  mov rax, {}", 1 - decided)?;
        writeln!(self.out, "  jmp {}", end_label)?;
        writeln!(self.out, "{}:", short_label)?;
        writeln!(self.out, "  mov rax, {}", decided)?;
        writeln!(self.out, "{}:", end_label)?;

        Ok(())
    }

    // ───────────────────────── helpers ────────────────────────────────

    fn label(&mut self, kind: &str) -> String {
        let mut buf = itoa::Buffer::new();
        let label: String = format!(".L{}{}", kind, buf.format(self.labels));
        self.labels += 1;
        label
    }

    /// Memory operand of `name`'s stack slot.
    fn slot(&self, name: &str) -> Result<String> {
        let offset: usize = *self
            .slots
            .get(name)
            .ok_or_else(|| CompileError::Codegen(format!("no stack slot for '{}'", name)))?;

        let mut buf = itoa::Buffer::new();

        Ok(format!("QWORD PTR [rbp-{}]", buf.format(offset)))
    }

    /// A reference must point at a binding of the same name in this program.
    fn check_binding(&self, name: &str, binding: BindingId) -> Result<()> {
        let resolved = self
            .program
            .and_then(|program| program.symbols.resolve(binding));

        match resolved {
            Some(found) if found.name == name => Ok(()),
            _ => Err(CompileError::Codegen(format!(
                "dangling binding #{} for '{}'",
                binding.index(),
                name
            ))),
        }
    }
}

/// Lower `program` with the default configuration.
pub fn generate(program: &Program) -> Result<String> {
    Codegen::new(CodegenConfig::default()).generate(program)
}
