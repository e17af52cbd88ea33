//! # adac
//!
//! Command-line driver combining the scanner and parser into a single
//! analysis pass over one source file.

use std::fs;
use std::path::PathBuf;
use std::process::ExitCode;

use ada_frontend::adapter::{self, AdapterConfig};
use clap::Parser as CParser;
use log::error;

#[derive(CParser, Debug)]
#[command(author, version, about)]
struct Cli {
    /// Source file to analyze.
    file: PathBuf,

    /// Print the parse tree alongside the token and error listing.
    #[arg(long)]
    tree: bool,

    /// Halt at the first scanner or parser error instead of recovering.
    #[arg(long)]
    stop_on_error: bool,

    /// Resynchronise on a default token set after a parse error instead of
    /// leaving the cursor in place.
    #[arg(long)]
    panic_recover: bool,

    /// Emit the report as JSON instead of the human-readable listing.
    #[arg(long)]
    json: bool,

    /// Logging verbosity passed straight to the backend.
    #[arg(long, value_enum, default_value_t = Verbosity::Warn)]
    verbosity: Verbosity,
}

#[derive(Debug, Clone, Copy, clap::ValueEnum)]
enum Verbosity {
    Error,
    Warn,
    Info,
    Debug,
    Trace,
}

impl From<Verbosity> for log::Level {
    fn from(value: Verbosity) -> Self {
        match value {
            Verbosity::Error => log::Level::Error,
            Verbosity::Warn => log::Level::Warn,
            Verbosity::Info => log::Level::Info,
            Verbosity::Debug => log::Level::Debug,
            Verbosity::Trace => log::Level::Trace,
        }
    }
}

fn main() -> ExitCode {
    let args = Cli::parse();
    simple_logger::init_with_level(args.verbosity.into()).unwrap();

    let source = match fs::read_to_string(&args.file) {
        Ok(content) => content,
        Err(io_error) => {
            error!("could not read file '{}': {io_error}", args.file.to_string_lossy());
            return ExitCode::FAILURE;
        }
    };

    let config = AdapterConfig {
        stop_on_error: args.stop_on_error,
        panic_mode_recover: args.panic_recover,
        build_parse_tree: args.tree,
    };

    let report = match adapter::analyze_source(&source, config) {
        Ok(report) => report,
        Err(halt_error) => {
            error!("{halt_error}");
            return ExitCode::FAILURE;
        }
    };

    if args.json {
        match serde_json::to_string_pretty(&report) {
            Ok(json) => println!("{json}"),
            Err(e) => {
                error!("failed to serialize report: {e}");
                return ExitCode::FAILURE;
            }
        }
    } else {
        for token in &report.tokens {
            println!("<{}, {}>", token.kind, token.lexeme);
        }
        if let Some(tree) = &report.tree {
            println!("{tree}");
        }
        for error_message in &report.errors {
            println!("{error_message}");
        }
        println!("{}", if report.success { "Parsing completed with no errors." } else { "Parsing completed with errors." });
    }

    if report.success { ExitCode::SUCCESS } else { ExitCode::FAILURE }
}
