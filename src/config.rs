use std::env;
use std::path::PathBuf;

use crate::path_utils::SearchPath;

pub const DEFAULT_PROMPT: &str = "$ ";

/// Everything the shell reads from its environment, gathered once at startup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShellConfig {
    pub search_path: SearchPath,
    pub home: Option<PathBuf>,
    /// Loaded at startup and written back on exit.
    pub histfile: Option<PathBuf>,
    pub prompt: String,
}

impl ShellConfig {
    /// Reads `PATH`, `HOME` and `HISTFILE`.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let non_empty = |key: &str| lookup(key).filter(|value| !value.is_empty());
        ShellConfig {
            search_path: SearchPath::parse(&lookup("PATH").unwrap_or_default()),
            home: non_empty("HOME").map(PathBuf::from),
            histfile: non_empty("HISTFILE").map(PathBuf::from),
            prompt: DEFAULT_PROMPT.to_string(),
        }
    }

    pub fn with_histfile(mut self, histfile: Option<PathBuf>) -> Self {
        if histfile.is_some() {
            self.histfile = histfile;
        }
        self
    }

    pub fn with_prompt(mut self, prompt: Option<String>) -> Self {
        if let Some(prompt) = prompt {
            self.prompt = prompt;
        }
        self
    }
}
