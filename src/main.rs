//! CLI tool to inspect how Maho source files are lexed and parsed.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::{ArgAction, Args, Parser, Subcommand};
use maho_syntax::{SourceText, diagnostics, format_tokens, format_tree, lex, parse};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "maho", about = "Lex and parse Maho source")]
struct Cli {
    /// Increase logging verbosity (-v: debug, -vv+: trace)
    #[arg(short, long, action = ArgAction::Count, global = true)]
    verbose: u8,

    #[command(subcommand)]
    command: Command,
}

#[derive(Debug, Subcommand)]
enum Command {
    /// Print the token stream with spans and trivia
    Tokens(Input),
    /// Print the syntax tree
    Tree(Input),
    /// Report diagnostics and fail if there are any
    Check(Input),
}

#[derive(Debug, Args)]
struct Input {
    /// Source files to read
    files: Vec<PathBuf>,

    /// Program text to use instead of (or before) the files
    #[arg(short = 'e', long = "eval", value_name = "PROGRAM")]
    program: Option<String>,
}

fn main() -> ExitCode {
    let cli = Cli::parse();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(directive_for_verbosity(cli.verbose))),
        )
        .with_writer(std::io::stderr)
        .init();

    let (Command::Tokens(input) | Command::Tree(input) | Command::Check(input)) = &cli.command;

    if input.files.is_empty() && input.program.is_none() {
        eprintln!("Error: no input, pass files or --eval <PROGRAM>");
        return ExitCode::from(2);
    }

    let mut sources = Vec::new();
    if let Some(program) = &input.program {
        sources.push(("<eval>".to_string(), program.clone()));
    }

    let mut had_error = false;

    for path in &input.files {
        match fs::read_to_string(path) {
            Ok(content) => sources.push((path.display().to_string(), content)),
            Err(e) => {
                eprintln!("{}: {e}", path.display());
                had_error = true;
            }
        }
    }

    for (name, content) in sources {
        let source = SourceText::new(content);
        tracing::debug!(
            input = %name,
            bytes = source.len(),
            lines = source.lines().len(),
            "read source"
        );

        let tokens = lex(&source);

        match &cli.command {
            Command::Tokens(_) => print!("{}", format_tokens(&tokens)),
            Command::Tree(_) => {
                let tree = parse(&tokens);
                print!("{}", format_tree(&tree));
                for error in diagnostics(&tokens, &tree) {
                    let position = source.line_position(error.span().start);
                    eprintln!("{name}:{position}: {error}");
                }
            }
            Command::Check(_) => {
                let tree = parse(&tokens);
                let errors = diagnostics(&tokens, &tree);
                if errors.is_empty() {
                    let statements = tree.statements.len();
                    eprintln!("{name}: ok ({statements} statement(s))");
                } else {
                    for error in &errors {
                        let position = source.line_position(error.span().start);
                        eprintln!("{name}:{position}: {error}");
                    }
                    had_error = true;
                }
            }
        }
    }

    if had_error {
        ExitCode::FAILURE
    } else {
        ExitCode::SUCCESS
    }
}

fn directive_for_verbosity(v: u8) -> &'static str {
    // Targets are module paths: the binary logs as `maho`, the library as
    // `maho_syntax`.
    match v {
        0 => "maho=info,maho_syntax=warn",
        1 => "maho=debug,maho_syntax=debug",
        _ => "maho=trace,maho_syntax=trace",
    }
}
