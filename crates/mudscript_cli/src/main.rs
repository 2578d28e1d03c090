//! mudscript: Command-line front end for the mudscript lexer and parser.
//!
//! Usage:
//!   mudscript tokens FILE [--json] [--no-trivia]
//!   mudscript tree FILE [--json]
//!   mudscript check FILE [--json]

use clap::{Parser as ClapParser, Subcommand};
use miette::{IntoDiagnostic, Result, WrapErr};
use std::path::{Path, PathBuf};
use std::process;
use tracing_subscriber::EnvFilter;

use mudscript_diagnostics::get_diagnostics;
use mudscript_lexer::Lexer;
use mudscript_parser::parse_source_document;

mod diagnostic;
mod output;

use diagnostic::SyntaxDiagnostic;

#[derive(ClapParser, Debug)]
#[command(
    name = "mudscript",
    version,
    about = "mudscript - lexer, parser and syntax checker for MUD class scripts"
)]
struct Cli {
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Print the token stream of a file
    Tokens {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print tokens as JSON
        #[arg(long)]
        json: bool,

        /// Leave out whitespace, comments and directives
        #[arg(long = "no-trivia")]
        no_trivia: bool,
    },

    /// Print the syntax tree of a file
    Tree {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print the tree as JSON
        #[arg(long)]
        json: bool,
    },

    /// Report syntax errors in a file
    Check {
        #[arg(value_name = "FILE")]
        file: PathBuf,

        /// Print diagnostics as JSON records
        #[arg(long)]
        json: bool,
    },
}

fn main() {
    init_tracing();
    let cli = Cli::parse();

    let result = match cli.command {
        Command::Tokens {
            file,
            json,
            no_trivia,
        } => run_tokens(&file, json, !no_trivia),
        Command::Tree { file, json } => run_tree(&file, json),
        Command::Check { file, json } => run_check(&file, json),
    };

    match result {
        Ok(code) => process::exit(code),
        Err(e) => {
            eprintln!("{e:?}");
            process::exit(2);
        }
    }
}

/// Log filter from `MUDSCRIPT_LOG`, then `RUST_LOG`, then `warn`.
fn init_tracing() {
    let filter = EnvFilter::try_from_env("MUDSCRIPT_LOG")
        .or_else(|_| EnvFilter::try_from_default_env())
        .unwrap_or_else(|_| EnvFilter::new("warn"));
    let _ = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .try_init();
}

fn read_source(path: &Path) -> Result<String> {
    std::fs::read_to_string(path)
        .into_diagnostic()
        .wrap_err_with(|| format!("failed to read {}", path.display()))
}

fn run_tokens(path: &Path, json: bool, include_trivia: bool) -> Result<i32> {
    let source = read_source(path)?;
    let mut tokens = Lexer::new(&source).tokenize();
    tracing::debug!(count = tokens.len(), "lexed file");

    if json {
        if !include_trivia {
            for token in &mut tokens {
                token.trivia.clear();
            }
        }
        let text = serde_json::to_string_pretty(&tokens).into_diagnostic()?;
        println!("{text}");
    } else {
        print!("{}", output::render_tokens(&tokens, &source, include_trivia));
    }
    Ok(0)
}

fn run_tree(path: &Path, json: bool) -> Result<i32> {
    let source = read_source(path)?;
    let tree = parse_source_document(&source);

    if json {
        let text = serde_json::to_string_pretty(&tree).into_diagnostic()?;
        println!("{text}");
    } else {
        print!("{}", output::render_tree(&tree, &source));
    }
    Ok(0)
}

fn run_check(path: &Path, json: bool) -> Result<i32> {
    let source = read_source(path)?;
    let tree = parse_source_document(&source);
    let diagnostics = get_diagnostics(&tree, &source);
    let has_errors = diagnostics.iter().any(|d| d.is_error());

    if json {
        let text = serde_json::to_string_pretty(&diagnostics).into_diagnostic()?;
        println!("{text}");
    } else {
        let name = path.display().to_string();
        for diagnostic in &diagnostics {
            let report = miette::Report::new(SyntaxDiagnostic::new(diagnostic, &name, &source));
            eprintln!("{report:?}");
        }
        match diagnostics.len() {
            0 => eprintln!("{name}: no syntax errors"),
            1 => eprintln!("{name}: 1 syntax error"),
            n => eprintln!("{name}: {n} syntax errors"),
        }
    }
    Ok(if has_errors { 1 } else { 0 })
}
