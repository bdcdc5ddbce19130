pub mod ast;
pub mod ast_printer;
pub mod codegen;
pub mod error;
pub mod parser;
pub mod scanner;
pub mod symbols;
pub mod token;

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::info;

use ast::Program;
use error::Result;
use parser::{Parser, ParserConfig};

/// Read a UTF‑8 source file into memory.
pub fn read_source(path: &Path) -> Result<String> {
    info!("Reading file: {:?}", path);

    let mut reader = BufReader::new(File::open(path)?);
    let mut buf: Vec<u8> = Vec::new();
    let bytes: usize = reader.read_to_end(&mut buf)?;

    info!("Read {} bytes from {:?}", bytes, path);

    Ok(String::from_utf8(buf)?)
}

/// Scan and parse `source` into a [`Program`].
pub fn parse_source(source: &str) -> Result<Program> {
    parse_source_with(source, ParserConfig::default())
}

pub fn parse_source_with(source: &str, config: ParserConfig) -> Result<Program> {
    let tokens = scanner::tokenize(source)?;

    let program: Program = Parser::with_config(&tokens, config).parse()?;

    Ok(program)
}

/// Scan, parse and lower `source` to assembly with default settings.
pub fn compile(source: &str) -> Result<String> {
    let program: Program = parse_source(source)?;

    codegen::generate(&program)
}
