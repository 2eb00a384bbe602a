//! elang interpreter CLI.

use std::io::IsTerminal;
use std::process;

use elang_diagnostic::emitter::{ColorMode, DiagnosticEmitter, TerminalEmitter};
use elang_diagnostic::Diagnostic;
use elang_eval::{stdout_handler, Completion};
use elangc::{lex_file, parse_file, run_file, tracing_setup, Command, Config};

fn main() {
    tracing_setup::init_tracing();

    let config = match Config::from_env() {
        Ok(config) => config,
        Err(err) => {
            eprintln!("error: {err}");
            eprintln!();
            eprint_usage();
            process::exit(1);
        }
    };

    let Some(path) = config.file.clone() else {
        match config.command {
            Command::Version => print_version(),
            _ => print_usage(),
        }
        return;
    };

    match config.command {
        Command::Run => match run_file(&path, &config, stdout_handler()) {
            Ok(Completion::Finished) => {}
            Ok(Completion::Exit(code)) => process::exit(code),
            Err(diag) => fail(&diag),
        },
        Command::Lex => print_or_fail(lex_file(&path)),
        Command::Parse => print_or_fail(parse_file(&path)),
        Command::Help => print_usage(),
        Command::Version => print_version(),
    }
}

fn print_or_fail(result: Result<String, Diagnostic>) {
    match result {
        Ok(text) => print!("{text}"),
        Err(diag) => fail(&diag),
    }
}

fn fail(diag: &Diagnostic) -> ! {
    let is_tty = std::io::stderr().is_terminal();
    let mut emitter = TerminalEmitter::stderr(ColorMode::Auto, is_tty);
    emitter.emit(diag);
    emitter.flush();
    process::exit(1);
}

fn print_version() {
    println!("elang {}", env!("CARGO_PKG_VERSION"));
}

const USAGE: &str = "\
Usage: elang [command] <file> [options]

Commands:
  run <file>      Evaluate a program (default)
  lex <file>      Print the token stream
  parse <file>    Print the syntax tree
  help            Show this help message
  version         Show version information

Options:
  --native=<path>              Shared library for native calls
  --no-builtins                Disable the print and exit builtins
  --arena-region-size=<bytes>  Region size of each scope arena (default 2048)

Environment:
  ELANG_NATIVE_LIB         Same as --native
  ELANG_ARENA_REGION_SIZE  Same as --arena-region-size
  RUST_LOG                 Enable tracing output on stderr";

fn print_usage() {
    println!("{USAGE}");
}

fn eprint_usage() {
    eprintln!("{USAGE}");
}
