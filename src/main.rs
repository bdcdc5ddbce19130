use std::fs::File;
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::Parser as ClapParser;
use clap::{Args, Subcommand};
use env_logger::Builder;
use log::{debug, info};

use tgoc::ast::Program;
use tgoc::ast_printer::AstPrinter;
use tgoc::codegen::{Codegen, CodegenConfig};
use tgoc::parser::ParserConfig;
use tgoc::scanner::Scanner;

/// Exit status for lexical and syntax errors.
const EXIT_PARSE: i32 = 65;

/// Exit status for failures while lowering a parsed program.
const EXIT_CODEGEN: i32 = 70;

#[derive(ClapParser, Debug)]
#[command(version, about = "Toy Go-flavoured compiler emitting x86-64 assembly", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    commands: Commands,

    /// Treat SOURCE as a path to read instead of program text
    #[arg(long, global = true)]
    file: bool,

    /// Maximum nesting of parentheses, unary operators and blocks
    #[arg(long, global = true, default_value_t = ParserConfig::DEFAULT_MAX_DEPTH)]
    max_depth: usize,

    /// Enable logging to app.log
    #[arg(long, global = true)]
    log: bool,
}

#[derive(Args, Debug)]
struct Source {
    /// Program text (or a path, with --file)
    source: String,
}

#[derive(Subcommand, Debug)]
enum Commands {
    /// Tokenizes the input, printing each token
    Tokenize(Source),

    /// Parses the input and prints its AST
    Parse {
        #[command(flatten)]
        input: Source,

        /// Print the AST as JSON instead of S-expressions
        #[arg(long)]
        json: bool,
    },

    /// Compiles the input and prints x86-64 assembly
    Compile {
        #[command(flatten)]
        input: Source,

        /// Global symbol of the generated entry function
        #[arg(long, default_value = "main")]
        entry: String,
    },
}

/// Reads the contents of a file into a String
fn read_file(filename: &Path) -> Result<String> {
    tgoc::read_source(filename).context(format!("Failed to read file {:?}", filename))
}

fn load(input: &Source, from_file: bool) -> Result<String> {
    if from_file {
        read_file(&PathBuf::from(&input.source))
    } else {
        Ok(input.source.clone())
    }
}

fn init_logger() -> Result<()> {
    let log_file = File::create("app.log").context("Failed to create app.log")?;

    Builder::new()
        .format(|buf, record| {
            // Strip 'tgoc::' from module path
            let module = record
                .module_path()
                .unwrap_or("<unnamed>")
                .strip_prefix("tgoc::")
                .unwrap_or(record.module_path().unwrap_or("<unnamed>"));
            writeln!(
                buf,
                "[{}:{}] - {}",
                module,
                record.line().unwrap_or(0),
                record.args()
            )
        })
        .target(env_logger::Target::Pipe(Box::new(log_file)))
        .filter(None, log::LevelFilter::Debug) // Default to Debug, override with RUST_LOG
        .parse_default_env()
        .init();

    info!("Logger initialized, writing to app.log");
    Ok(())
}

/// Scan and parse, exiting with [`EXIT_PARSE`] on any error.
fn parse_or_exit(source: &str, config: ParserConfig) -> Program {
    match tgoc::parse_source_with(source, config) {
        Ok(program) => {
            info!("Program parsed successfully");
            program
        }

        Err(e) => {
            debug!("Parse debug: {:?}", e);
            eprintln!("{}", e);
            std::process::exit(EXIT_PARSE);
        }
    }
}

fn main() -> Result<()> {
    let args: Cli = Cli::parse();

    if args.log {
        init_logger()?;
    } else {
        env_logger::Builder::new()
            .filter_level(log::LevelFilter::Off)
            .init();
    }

    info!("CLI arguments: {:?}", args);

    let config = ParserConfig {
        max_depth: args.max_depth,
    };

    match &args.commands {
        Commands::Tokenize(input) => {
            info!("Running Tokenize subcommand");
            let source: String = load(input, args.file)?;
            let mut tokenized = true;

            for token in Scanner::new(source.as_bytes()) {
                match token {
                    Ok(token) => {
                        debug!("Scanned token: {}", token);
                        println!("{}", token);
                    }

                    Err(e) => {
                        tokenized = false;
                        debug!("Tokenization debug: {}", e);
                        eprintln!("{}", e);
                    }
                }
            }

            if !tokenized {
                debug!("Tokenization failed, exiting with code {}", EXIT_PARSE);
                std::process::exit(EXIT_PARSE);
            }

            info!("Tokenization completed successfully");
        }

        Commands::Parse { input, json } => {
            info!("Running Parse subcommand");
            let source: String = load(input, args.file)?;
            let program: Program = parse_or_exit(&source, config);

            if *json {
                let rendered = serde_json::to_string_pretty(&program)
                    .context("Failed to serialize the AST")?;
                println!("{}", rendered);
            } else {
                println!("{}", AstPrinter::program(&program));
            }

            info!("Parse subcommand completed");
        }

        Commands::Compile { input, entry } => {
            info!("Running Compile subcommand");
            let source: String = load(input, args.file)?;
            let program: Program = parse_or_exit(&source, config);

            let codegen = Codegen::new(CodegenConfig {
                entry_symbol: entry.clone(),
            });

            match codegen.generate(&program) {
                Ok(asm) => print!("{}", asm),

                Err(e) => {
                    debug!("Codegen debug: {:?}", e);
                    eprintln!("{}", e);
                    std::process::exit(EXIT_CODEGEN);
                }
            }

            info!("Compile subcommand completed");
        }
    }

    Ok(())
}
