use std::collections::BTreeSet;
use std::fs;
use std::ops::Bound;

use rustyline::completion::{Completer, Pair};
use rustyline::highlight::Highlighter;
use rustyline::hint::Hinter;
use rustyline::validate::Validator;
use rustyline::{Context, Helper};
use tracing::debug;

use crate::path_utils::{is_executable, SearchPath};

/// Every command name the shell can run: builtins plus executables on the search path.
#[derive(Debug, Default, Clone)]
pub struct CommandIndex {
    names: BTreeSet<String>,
}

impl CommandIndex {
    pub fn from_names<I, S>(names: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandIndex {
            names: names.into_iter().map(Into::into).collect(),
        }
    }

    /// Lists each search-path directory once. Unreadable directories are skipped.
    pub fn scan(builtins: &[&str], search_path: &SearchPath) -> Self {
        let mut index = Self::from_names(builtins.iter().copied());
        for dir in search_path.dirs() {
            let entries = match fs::read_dir(dir) {
                Ok(entries) => entries,
                Err(err) => {
                    debug!(dir = dir.as_str(), %err, "skipping search path entry");
                    continue;
                }
            };
            for entry in entries.flatten() {
                if is_executable(&entry.path()) {
                    if let Some(name) = entry.file_name().to_str() {
                        index.names.insert(name.to_string());
                    }
                }
            }
        }
        debug!(commands = index.names.len(), "command index built");
        index
    }

    /// Names starting with `prefix`, sorted.
    pub fn candidates<'a>(&'a self, prefix: &'a str) -> impl Iterator<Item = &'a str> + 'a {
        self.names
            .range::<str, _>((Bound::Included(prefix), Bound::Unbounded))
            .take_while(move |name| name.starts_with(prefix))
            .map(String::as_str)
    }
}

/// Line-editor helper completing the command word at the start of the line.
pub struct CommandCompleter {
    index: CommandIndex,
}

impl CommandCompleter {
    pub fn new(index: CommandIndex) -> Self {
        CommandCompleter { index }
    }

    /// Returns the replacement start and the candidates for `line[..pos]`.
    pub fn complete_command(&self, line: &str, pos: usize) -> (usize, Vec<Pair>) {
        let before = &line[..pos];
        let word = before.trim_start();
        let start = pos - word.len();
        if word.contains(char::is_whitespace) {
            return (pos, Vec::new());
        }

        let names: Vec<&str> = self.index.candidates(word).collect();
        let unique = names.len() == 1;
        let pairs = names
            .into_iter()
            .map(|name| Pair {
                display: name.to_string(),
                replacement: if unique { format!("{name} ") } else { name.to_string() },
            })
            .collect();
        (start, pairs)
    }
}

impl Completer for CommandCompleter {
    type Candidate = Pair;

    fn complete(&self, line: &str, pos: usize, _ctx: &Context<'_>) -> rustyline::Result<(usize, Vec<Pair>)> {
        Ok(self.complete_command(line, pos))
    }
}

impl Hinter for CommandCompleter {
    type Hint = String;
}

impl Highlighter for CommandCompleter {}

impl Validator for CommandCompleter {}

impl Helper for CommandCompleter {}
