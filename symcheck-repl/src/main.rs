mod options;

use ariadne::Source;
use clap::Parser;
use options::Options;
use rustyline::{error::ReadlineError, DefaultEditor};
use std::io::{self, IsTerminal, Read};
use symcheck_parser::{cleanup_string, parse_expr_diagnostic, prepare_input};
use tracing::Level;

/// Cleans and parses the given input, printing the expression tree and its free symbols, or a
/// report of why the input was rejected.
fn check(input: &str, options: &Options) {
    if options.strict {
        if let Err(err) = cleanup_string(input, true) {
            eprintln!("error: {}", err);
            return;
        }
    }

    match parse_expr_diagnostic(input, None, options.hint_keys().as_slice()) {
        Ok(None) => (), // intentionally print nothing
        Ok(Some(expr)) => {
            println!("{}", expr);
            let symbols = expr.symbols();
            if !symbols.is_empty() {
                println!("symbols: {}", symbols.into_iter().collect::<Vec<_>>().join(", "));
            }
        },
        Err(err) => {
            // spans point into the text as the parser saw it
            let source = prepare_input(input);
            if err.build_report("input").eprint(("input", Source::from(source.as_str()))).is_err() {
                eprintln!("error: {}", err);
            }
        },
    }
}

fn main() {
    let options = Options::parse();

    tracing_subscriber::fmt()
        .with_max_level(if options.verbose { Level::DEBUG } else { Level::WARN })
        .with_writer(io::stderr)
        .init();

    if let Some(expr) = options.expr() {
        check(&expr, &options);
    } else if !io::stdin().is_terminal() {
        // check each line of stdin
        let mut input = String::new();
        if let Err(err) = io::stdin().read_to_string(&mut input) {
            eprintln!("error: {}", err);
            std::process::exit(1);
        }

        input.lines()
            .filter(|line| !line.trim().is_empty())
            .for_each(|line| check(line, &options));
    } else {
        // run the repl / interactive mode
        let mut rl = match DefaultEditor::new() {
            Ok(rl) => rl,
            Err(err) => {
                eprintln!("error: {}", err);
                std::process::exit(1);
            },
        };

        fn process_line(rl: &mut DefaultEditor, options: &Options) -> Result<(), ReadlineError> {
            let input = rl.readline("> ")?;
            if input.trim().is_empty() {
                return Ok(());
            }

            rl.add_history_entry(&input)?;

            check(&input, options);
            Ok(())
        }

        loop {
            if let Err(err) = process_line(&mut rl, &options) {
                match err {
                    ReadlineError::Eof | ReadlineError::Interrupted => (),
                    _ => eprintln!("{}", err),
                }
                break;
            }
        }
    }
}
