//! Kest command-line driver.

use std::path::Path;
use std::process::ExitCode;

use kest_eval::stdout_handler;
use kestc::{lex_source, parse_source, read_source, run_source, Error, Options};

/// Environment variable holding the log filter, e.g. `KEST_LOG=kest_eval=debug`.
const LOG_ENV: &str = "KEST_LOG";

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
enum Command {
    Run,
    Lex,
    Parse,
}

fn main() -> ExitCode {
    init_tracing();

    let args: Vec<String> = std::env::args().skip(1).collect();
    let Some(first) = args.first() else {
        print_usage();
        return ExitCode::FAILURE;
    };

    let (command, rest) = match first.as_str() {
        "run" => (Command::Run, &args[1..]),
        "lex" => (Command::Lex, &args[1..]),
        "parse" => (Command::Parse, &args[1..]),
        "help" | "--help" | "-h" => {
            print_usage();
            return ExitCode::SUCCESS;
        }
        "version" | "--version" | "-V" => {
            println!("kest {}", env!("CARGO_PKG_VERSION"));
            return ExitCode::SUCCESS;
        }
        // A bare path runs the script.
        _ => (Command::Run, &args[..]),
    };

    let mut options = Options::default();
    let mut dump_env = false;
    let mut path = None;
    for arg in rest {
        match arg.as_str() {
            "--threaded-lexer" => options.threaded_lexer = true,
            "--dump-env" => dump_env = true,
            flag if flag.starts_with('-') => {
                eprintln!("error: unknown option '{flag}'");
                return ExitCode::FAILURE;
            }
            file if path.is_none() => path = Some(file),
            extra => {
                eprintln!("error: unexpected argument '{extra}'");
                return ExitCode::FAILURE;
            }
        }
    }

    let Some(path) = path else {
        eprintln!("error: missing file path");
        print_usage();
        return ExitCode::FAILURE;
    };

    match execute(command, Path::new(path), &options, dump_env) {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => {
            eprintln!("{}", err.render(path));
            ExitCode::FAILURE
        }
    }
}

fn execute(command: Command, path: &Path, options: &Options, dump_env: bool) -> Result<(), Error> {
    let source = read_source(path)?;
    match command {
        Command::Run => {
            let output = run_source(&source, options, stdout_handler())?;
            if dump_env {
                for (name, value) in &output.globals {
                    println!("{name} = {value}");
                }
            }
        }
        Command::Lex => {
            for token in lex_source(&source, options)? {
                println!(
                    "{}:{}\t{:<12}\t{:?}",
                    token.position.line,
                    token.position.column,
                    token.kind.display_name(),
                    token.text
                );
            }
        }
        Command::Parse => {
            let program = parse_source(&source, options)?;
            println!("{} statement(s)", program.len());
            for stmt in &program.statements {
                println!("{stmt:#?}");
            }
        }
    }
    Ok(())
}

/// Install a hierarchical subscriber on stderr when `KEST_LOG` is set.
fn init_tracing() {
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    if std::env::var_os(LOG_ENV).is_none() {
        return;
    }
    let filter = EnvFilter::from_env(LOG_ENV);
    let tree = tracing_tree::HierarchicalLayer::new(2)
        .with_writer(std::io::stderr)
        .with_targets(true)
        .with_bracketed_fields(true);
    tracing_subscriber::registry().with(filter).with(tree).init();
}

fn print_usage() {
    println!("Kest interpreter");
    println!();
    println!("Usage: kest [command] <file.kest> [options]");
    println!();
    println!("Commands:");
    println!("  run <file>      Run a script (default when only a path is given)");
    println!("  lex <file>      Print the token stream");
    println!("  parse <file>    Print the syntax tree");
    println!("  help            Show this help message");
    println!("  version         Show version information");
    println!();
    println!("Options:");
    println!("  --threaded-lexer  Scan on a dedicated producer thread");
    println!("  --dump-env        After `run`, print the top-level bindings");
    println!();
    println!("Logging:");
    println!("  {LOG_ENV}=<filter>  e.g. {LOG_ENV}=debug or {LOG_ENV}=kest_eval=trace");
}
