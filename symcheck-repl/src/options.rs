use clap::Parser;
use symcheck_parser::Hint;

/// Cleans and parses mathematical expressions, printing the expression tree and its free symbols.
///
/// Without an expression, each line of standard input is checked, or an interactive prompt is
/// started if standard input is a terminal.
#[derive(Debug, Parser, PartialEq)]
#[command(name = "symcheck-repl", version, long_about = None)]
pub struct Options {
    /// Reject input containing disallowed characters instead of blanking them out
    #[arg(long)]
    pub strict: bool,

    /// Parse with the given hint; can be repeated
    #[arg(long = "hint", value_name = "KEY")]
    pub hints: Vec<Hint>,

    /// Log debug information to stderr
    #[arg(short, long)]
    pub verbose: bool,

    /// The expression to check; its words are joined with spaces (use `--` before an expression
    /// starting with `-`)
    #[arg(value_name = "EXPRESSION")]
    pub words: Vec<String>,
}

impl Options {
    /// Returns the expression given on the command line, if any.
    pub fn expr(&self) -> Option<String> {
        (!self.words.is_empty()).then(|| self.words.join(" "))
    }

    /// Returns the keys of the selected hints.
    pub fn hint_keys(&self) -> Vec<&'static str> {
        self.hints.iter().map(|hint| hint.key()).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::error::ErrorKind;
    use pretty_assertions::assert_eq;

    fn parse(args: &[&str]) -> Result<Options, clap::Error> {
        Options::try_parse_from(std::iter::once("symcheck-repl").chain(args.iter().copied()))
    }

    #[test]
    fn flags_and_expression() {
        let options = parse(&["--strict", "--hint", "constant_pi", "2", "pi", "--verbose"]).unwrap();
        assert_eq!(options, Options {
            strict: true,
            hints: vec![Hint::ConstantPi],
            verbose: true,
            words: vec!["2".to_owned(), "pi".to_owned()],
        });
        assert_eq!(options.expr(), Some("2 pi".to_owned()));
        assert_eq!(options.hint_keys(), vec!["constant_pi"]);
    }

    #[test]
    fn repeated_hints() {
        let options = parse(&["--hint", "constant_e", "-v", "--hint", "imaginary_j"]).unwrap();
        assert_eq!(options.hints, vec![Hint::ConstantE, Hint::ImaginaryJ]);
        assert!(options.verbose);
        assert_eq!(options.expr(), None);
    }

    #[test]
    fn negative_expressions_after_separator() {
        let options = parse(&["--", "-x", "+", "1"]).unwrap();
        assert_eq!(options.expr(), Some("-x + 1".to_owned()));
    }

    #[test]
    fn usage_errors() {
        assert!(parse(&["--hint"]).is_err());
        assert_eq!(parse(&["--hint", "constant_tau"]).unwrap_err().kind(), ErrorKind::ValueValidation);
        assert_eq!(parse(&["--loud"]).unwrap_err().kind(), ErrorKind::UnknownArgument);
    }
}
