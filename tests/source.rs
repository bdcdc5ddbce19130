#[cfg(test)]
mod source_tests {
    use std::fs;
    use std::path::PathBuf;

    use tgoc::error::CompileError;

    fn temp_path(name: &str) -> PathBuf {
        std::env::temp_dir().join(format!("tgoc-{}-{}", std::process::id(), name))
    }

    #[test]
    fn test_read_source_and_compile() {
        let path = temp_path("ok.go");
        fs::write(&path, "x := 2\nreturn x * 21\n").unwrap();

        let source = tgoc::read_source(&path).unwrap();
        let asm = tgoc::compile(&source).unwrap();
        fs::remove_file(&path).unwrap();

        assert!(asm.contains("  imul rax, rdi"));
    }

    #[test]
    fn test_missing_file_is_io_error() {
        let path = temp_path("does-not-exist.go");

        assert!(matches!(tgoc::read_source(&path), Err(CompileError::Io(_))));
    }

    #[test]
    fn test_invalid_utf8_is_rejected() {
        let path = temp_path("bad.go");
        fs::write(&path, [b'1', 0xff, 0xfe]).unwrap();

        let result = tgoc::read_source(&path);
        fs::remove_file(&path).unwrap();

        assert!(matches!(result, Err(CompileError::Utf8(_))));
    }
}
