#[cfg(test)]
mod scanner_tests {
    use tgoc::error::CompileError;
    use tgoc::scanner::*;
    use tgoc::token::*;

    fn assert_token_sequence(source: &str, expected: &[(TokenKind, &str)]) {
        let scanner = Scanner::new(source.as_bytes());
        let tokens: Vec<_> = scanner.filter_map(Result::ok).collect();

        assert_eq!(tokens.len(), expected.len(), "tokens: {:?}", tokens);

        for (actual, (expected_kind, expected_lexeme)) in tokens.iter().zip(expected.iter()) {
            assert_eq!(actual.kind, *expected_kind);
            assert_eq!(actual.lexeme, *expected_lexeme);
        }
    }

    #[test]
    fn test_scanner_01_symbols() {
        assert_token_sequence(
            "({*+-;})",
            &[
                (TokenKind::LPAREN, "("),
                (TokenKind::LBRACE, "{"),
                (TokenKind::MUL, "*"),
                (TokenKind::ADD, "+"),
                (TokenKind::SUB, "-"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::RBRACE, "}"),
                (TokenKind::RPAREN, ")"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_02_two_char_operators() {
        assert_token_sequence(
            "<< >> <= >= == != && || &^ := < > & | ^ ! = / %",
            &[
                (TokenKind::LSHIFT, "<<"),
                (TokenKind::RSHIFT, ">>"),
                (TokenKind::LTE, "<="),
                (TokenKind::GTE, ">="),
                (TokenKind::EQ, "=="),
                (TokenKind::NQ, "!="),
                (TokenKind::CAND, "&&"),
                (TokenKind::COR, "||"),
                (TokenKind::BCLR, "&^"),
                (TokenKind::SVDECL, ":="),
                (TokenKind::LT, "<"),
                (TokenKind::GT, ">"),
                (TokenKind::BAND, "&"),
                (TokenKind::BOR, "|"),
                (TokenKind::BXOR, "^"),
                (TokenKind::NOT, "!"),
                (TokenKind::ASSIGN, "="),
                (TokenKind::DIV, "/"),
                (TokenKind::REM, "%"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_03_keywords_and_identifiers() {
        assert_token_sequence(
            "if else for return true false iffy _x1",
            &[
                (TokenKind::IF, "if"),
                (TokenKind::ELSE, "else"),
                (TokenKind::FOR, "for"),
                (TokenKind::RETURN, "return"),
                (TokenKind::TRUE, "true"),
                (TokenKind::FALSE, "false"),
                (TokenKind::IDENT, "iffy"),
                (TokenKind::IDENT, "_x1"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_scanner_04_statement_without_spaces() {
        assert_token_sequence(
            "x:=20+255;x=x&^3",
            &[
                (TokenKind::IDENT, "x"),
                (TokenKind::SVDECL, ":="),
                (TokenKind::INT, "20"),
                (TokenKind::ADD, "+"),
                (TokenKind::INT, "255"),
                (TokenKind::SEMICOLON, ";"),
                (TokenKind::IDENT, "x"),
                (TokenKind::ASSIGN, "="),
                (TokenKind::IDENT, "x"),
                (TokenKind::BCLR, "&^"),
                (TokenKind::INT, "3"),
                (TokenKind::EOF, ""),
            ],
        );
    }

    #[test]
    fn test_comments_and_lines() {
        let tokens = tokenize("1 // one\n// nothing\n2").unwrap();

        assert_eq!(tokens.len(), 3);
        assert_eq!((tokens[0].lexeme, tokens[0].line), ("1", 1));
        assert_eq!((tokens[1].lexeme, tokens[1].line), ("2", 3));
        assert_eq!(tokens[2].kind, TokenKind::EOF);
    }

    #[test]
    fn test_empty_source_is_just_eof() {
        let tokens = tokenize("").unwrap();

        assert_eq!(tokens, vec![Token::eof(1)]);
    }

    #[test]
    fn test_unexpected_chars_token_sequence() {
        let source = "+$(#";
        let results: Vec<_> = Scanner::new(source.as_bytes()).collect();

        // ADD, error '$', LPAREN, error '#', EOF
        assert_eq!(results.len(), 5, "Expected 5 items in result");

        assert_eq!(results[0].as_ref().map(|t| t.kind).ok(), Some(TokenKind::ADD));
        assert_eq!(results[2].as_ref().map(|t| t.kind).ok(), Some(TokenKind::LPAREN));
        assert_eq!(results[4].as_ref().map(|t| t.kind).ok(), Some(TokenKind::EOF));

        let errors: Vec<String> = results
            .iter()
            .filter_map(|r| r.as_ref().err())
            .map(|e| e.to_string())
            .collect();

        assert_eq!(errors.len(), 2, "Expected 2 error messages");

        for err in &errors {
            assert!(
                err.contains("Unexpected character"),
                "Error message should contain 'Unexpected character', got: {}",
                err
            );
        }
    }

    #[test]
    fn test_tokenize_stops_at_first_error() {
        let err = tokenize("x : 1").unwrap_err();

        assert!(matches!(err, CompileError::Lex { line: 1, .. }));
    }

    #[test]
    fn test_scanner_is_fused() {
        let mut scanner = Scanner::new(b"1");

        assert!(scanner.next().is_some());
        assert!(scanner.next().is_some());
        assert!(scanner.next().is_none());
        assert!(scanner.next().is_none());
    }

    #[test]
    fn test_token_display() {
        let token = Token::synthetic(TokenKind::SVDECL, ":=");

        assert_eq!(token.to_string(), "SVDECL :=");
    }
}
