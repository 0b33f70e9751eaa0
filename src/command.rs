use crate::redirect::{self, Redirection};
use crate::tokenizer;

/// One parsed input line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Command {
    /// Full argument vector, program name included.
    pub argv: Vec<String>,
    pub redirection: Option<Redirection>,
}

impl Command {
    /// Returns `None` for a line that contains no words at all.
    pub fn parse(line: &str) -> Option<Self> {
        let tokens = tokenizer::tokenize(line);
        if tokens.is_empty() {
            return None;
        }
        let (argv, redirection) = redirect::extract(tokens);
        Some(Command { argv, redirection })
    }

    /// `None` when the line held only a redirection, e.g. `> file`.
    pub fn program(&self) -> Option<&str> {
        self.argv.first().map(String::as_str)
    }

    pub fn args(&self) -> &[String] {
        self.argv.get(1..).unwrap_or_default()
    }
}
