// minicalc: interactive expression evaluator

use std::io::{self, BufRead, Write};

use crossterm::style::Stylize;

use minicalc::{Diagnostics, Interpreter, Outcome, StatementError};

const PROMPT: &str = "> ";

/// Command-line options
#[derive(Debug, Default, PartialEq)]
struct Options {
    /// Print the AST before each result
    show_ast: bool,
    /// Evaluate this statement and exit instead of starting the REPL
    eval: Option<String>,
    help: bool,
}

fn parse_args(args: &[String]) -> Result<Options, String> {
    let mut options = Options::default();
    let mut iter = args.iter();

    while let Some(arg) = iter.next() {
        match arg.as_str() {
            "--ast" => options.show_ast = true,
            "-e" | "--eval" => {
                let expr = iter
                    .next()
                    .ok_or_else(|| format!("'{}' requires an expression", arg))?;
                options.eval = Some(expr.clone());
            }
            "-h" | "--help" => options.help = true,
            other => return Err(format!("Unknown argument '{}'", other)),
        }
    }

    Ok(options)
}

fn print_usage(program_name: &str) {
    eprintln!("Usage: {} [--ast] [-e <expr>]", program_name);
    eprintln!();
    eprintln!("Options:");
    eprintln!("  --ast            Print the syntax tree of each statement");
    eprintln!("  -e, --eval EXPR  Evaluate one statement and exit");
    eprintln!("  -h, --help       Show this message");
    eprintln!();
    eprintln!("Set RUST_LOG (e.g. RUST_LOG=minicalc=debug) for diagnostic logs.");
}

/// Install a stderr subscriber, only when RUST_LOG is set
fn init_tracing() {
    use tracing_subscriber::{fmt, prelude::*, EnvFilter};

    if std::env::var("RUST_LOG").is_ok() {
        tracing_subscriber::registry()
            .with(fmt::layer().with_writer(io::stderr).with_target(true))
            .with(EnvFilter::from_default_env())
            .init();
    }
}

fn report_diagnostics(diagnostics: &Diagnostics) {
    for message in diagnostics.messages() {
        eprintln!("{}", message.yellow());
    }
}

fn report_outcome(outcome: &Outcome, show_ast: bool) {
    report_diagnostics(&outcome.diagnostics);
    if show_ast {
        println!("AST:");
        print!("{}", outcome.ast);
    }
    println!("Result: {:.6}", outcome.value);
}

fn report_statement_error(error: &StatementError) {
    report_diagnostics(&error.diagnostics);
    eprintln!("{}", error.to_string().red());
}

fn run_repl(interpreter: &mut Interpreter, show_ast: bool) -> io::Result<()> {
    let stdin = io::stdin();
    let mut stdout = io::stdout();

    println!("{}", "Simple Expression Parser".bold());
    println!("Type an expression (e.g., 2 + 3 * 4), 'vars' to list variables, or 'exit' to quit:");

    let mut line = String::new();
    loop {
        print!("{}", PROMPT);
        stdout.flush()?;

        line.clear();
        if stdin.lock().read_line(&mut line)? == 0 {
            break;
        }

        match line.trim() {
            "" => continue,
            "exit" | "quit" => break,
            "vars" => {
                for (name, value) in interpreter.environment().sorted() {
                    println!("{} = {}", name, value);
                }
                continue;
            }
            _ => {}
        }

        match interpreter.run(&line) {
            Ok(outcome) => report_outcome(&outcome, show_ast),
            Err(e) => report_statement_error(&e),
        }
    }

    Ok(())
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    init_tracing();

    let args: Vec<String> = std::env::args().collect();
    let program_name = args.first().map(|s| s.as_str()).unwrap_or("minicalc");

    let options = match parse_args(args.get(1..).unwrap_or(&[])) {
        Ok(options) => options,
        Err(message) => {
            eprintln!("Error: {}", message);
            eprintln!();
            print_usage(program_name);
            std::process::exit(1);
        }
    };

    if options.help {
        print_usage(program_name);
        return Ok(());
    }

    let mut interpreter = Interpreter::new();

    if let Some(expr) = &options.eval {
        match interpreter.run(expr) {
            Ok(outcome) => report_outcome(&outcome, options.show_ast),
            Err(e) => {
                report_statement_error(&e);
                std::process::exit(1);
            }
        }
        return Ok(());
    }

    run_repl(&mut interpreter, options.show_ast)?;
    Ok(())
}
