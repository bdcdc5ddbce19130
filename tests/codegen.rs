#[cfg(test)]
mod codegen_tests {
    use tgoc::ast::{Expr, Program, Stmt};
    use tgoc::codegen::{Codegen, CodegenConfig};
    use tgoc::error::CompileError;
    use tgoc::symbols::SymbolTable;

    fn compile(source: &str) -> String {
        match tgoc::compile(source) {
            Ok(asm) => asm,
            Err(e) => panic!("failed to compile {:?}: {}", source, e),
        }
    }

    fn assert_contains(asm: &str, lines: &[&str]) {
        for line in lines {
            assert!(
                asm.lines().any(|l| l == *line),
                "missing line {:?} in:\n{}",
                line,
                asm
            );
        }
    }

    #[test]
    fn test_addition_program() {
        let expected = [
            ".intel_syntax noprefix",
            ".globl main",
            "main:",
            "  push rbp",
            "  mov rbp, rsp",
            "  mov rax, 0",
            "  mov rax, 1",
            "  push rax",
            "  mov rax, 2",
            "  mov rdi, rax",
            "  pop rax",
            "  add rax, rdi",
            ".Lreturn:",
            "  mov rsp, rbp",
            "  pop rbp",
            "  ret",
            "",
        ]
        .join("\n");

        assert_eq!(compile("1+2"), expected);
    }

    #[test]
    fn test_custom_entry_symbol() {
        let program = tgoc::parse_source("5").unwrap();
        let config = CodegenConfig {
            entry_symbol: String::from("_main"),
        };

        let asm = Codegen::new(config).generate(&program).unwrap();

        assert!(asm.starts_with(".intel_syntax noprefix\n.globl _main\n_main:\n"));
    }

    #[test]
    fn test_variables_get_stack_slots() {
        let asm = compile("x := 5; y := x; x = 7; return x + y");

        assert_contains(
            &asm,
            &[
                "  sub rsp, 16",
                "  mov QWORD PTR [rbp-8], rax",
                "  mov QWORD PTR [rbp-16], rax",
                "  mov rax, QWORD PTR [rbp-8]",
                "  mov rax, QWORD PTR [rbp-16]",
                "  jmp .Lreturn",
            ],
        );
    }

    #[test]
    fn test_frame_is_16_byte_aligned() {
        let asm = compile("a := 1; b := 2; c := 3");

        assert_contains(&asm, &["  sub rsp, 32"]);
    }

    #[test]
    fn test_redeclared_name_shares_a_slot() {
        let asm = compile("x := 1; x := 2");

        assert_contains(&asm, &["  sub rsp, 16"]);
        assert!(!asm.contains("[rbp-16]"));
    }

    #[test]
    fn test_if_else_lowering() {
        let asm = compile("if 1 < 2 { 3 } else { 4 }");

        assert_contains(
            &asm,
            &[
                "  setl al",
                "  movzx rax, al",
                "  je .Lelse0",
                "  jmp .Lend1",
                ".Lelse0:",
                "  mov rax, 4",
                ".Lend1:",
            ],
        );
    }

    #[test]
    fn test_for_lowering() {
        let asm = compile("i := 0; for i < 10 { i = i + 1 }; return i");

        assert_contains(
            &asm,
            &[
                ".Lbegin0:",
                "  je .Lend1",
                "  jmp .Lbegin0",
                ".Lend1:",
            ],
        );
    }

    #[test]
    fn test_short_circuit_lowering() {
        let and = compile("true && false");
        assert_contains(&and, &["  je .Lshort0", "  mov rax, 1", ".Lshort0:", "  mov rax, 0", ".Lend1:"]);

        let or = compile("false || true");
        assert_contains(&or, &["  jne .Lshort0", ".Lshort0:", "  mov rax, 1"]);
    }

    #[test]
    fn test_every_operator_is_lowered() {
        let asm = compile("a := 7; a * 2 / 3 % 4 << 1 >> 1 & 5 &^ 2 | 1 ^ 3 - 1; -a; !true; a == 1; a != 1; a > 1; a <= 1; a >= 1");

        assert_contains(
            &asm,
            &[
                "  imul rax, rdi",
                "  cqo",
                "  idiv rdi",
                "  mov rax, rdx",
                "  shl rax, cl",
                "  sar rax, cl",
                "  and rax, rdi",
                "  not rdi",
                "  or rax, rdi",
                "  xor rax, rdi",
                "  sub rax, rdi",
                "  neg rax",
                "  sete al",
                "  setne al",
                "  setg al",
                "  setle al",
                "  setge al",
            ],
        );
    }

    #[test]
    fn test_stack_stays_balanced() {
        let asm = compile("x := (1 + 2) * (3 - 4); if x > 0 && x < 10 { x = x << 2 } else { x = -x }");
        let pushes = asm.lines().filter(|l| *l == "  push rax").count();
        let pops = asm.lines().filter(|l| *l == "  pop rax").count();

        assert_eq!(pushes, pops);
        assert!(pushes > 0);
    }

    #[test]
    fn test_negative_literal_value() {
        let asm = compile("-9223372036854775807");

        assert_contains(&asm, &["  mov rax, 9223372036854775807", "  neg rax"]);
    }

    #[test]
    fn test_dangling_binding_is_rejected() {
        let mut elsewhere = SymbolTable::new();
        let binding = elsewhere.declare("ghost", Expr::Integer(1));

        let program = Program {
            statements: vec![Stmt::Expr(Expr::Identifier {
                name: String::from("ghost"),
                binding,
            })],
            symbols: SymbolTable::new(),
        };

        assert!(matches!(
            tgoc::codegen::generate(&program),
            Err(CompileError::Codegen(_))
        ));
    }

    #[test]
    fn test_parse_errors_surface_from_compile() {
        assert!(matches!(
            tgoc::compile("y = 1"),
            Err(CompileError::UndeclaredIdentifier { .. })
        ));
    }
}
