use std::fs;
use std::io::Write;
use std::path::Path;

use crate::error::{Result, ShellError};

/// Lines entered in this session, plus anything loaded from history files.
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct History {
    entries: Vec<String>,
}

impl History {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, line: impl Into<String>) {
        self.entries.push(line.into());
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// The last `n` entries paired with their 1-based position in the whole history.
    pub fn tail(&self, n: usize) -> impl Iterator<Item = (usize, &str)> {
        let skip = self.entries.len().saturating_sub(n);
        self.entries
            .iter()
            .enumerate()
            .skip(skip)
            .map(|(i, line)| (i + 1, line.as_str()))
    }

    /// Appends every non-empty line of `path`. Returns how many were added.
    pub fn read_from(&mut self, path: &Path) -> Result<usize> {
        let contents = fs::read_to_string(path).map_err(|source| ShellError::HistoryFile {
            path: path.to_path_buf(),
            source,
        })?;
        let before = self.entries.len();
        self.entries.extend(
            contents
                .lines()
                .filter(|line| !line.is_empty())
                .map(str::to_owned),
        );
        Ok(self.entries.len() - before)
    }

    /// Overwrites `path` with one entry per line.
    pub fn write_to(&self, path: &Path) -> Result<()> {
        let to_error = |source| ShellError::HistoryFile {
            path: path.to_path_buf(),
            source,
        };
        let mut file = fs::File::create(path).map_err(to_error)?;
        for entry in &self.entries {
            writeln!(file, "{entry}").map_err(to_error)?;
        }
        file.flush().map_err(to_error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn history(lines: &[&str]) -> History {
        let mut history = History::new();
        for line in lines {
            history.push(*line);
        }
        history
    }

    #[test]
    fn test_tail_keeps_global_indices() {
        let history = history(&["ls", "pwd", "echo hi", "history 2"]);
        let tail: Vec<_> = history.tail(2).collect();
        assert_eq!(tail, vec![(3, "echo hi"), (4, "history 2")]);
    }

    #[test]
    fn test_tail_larger_than_history() {
        let history = history(&["ls"]);
        assert_eq!(history.tail(10).collect::<Vec<_>>(), vec![(1, "ls")]);
        assert_eq!(history.tail(0).count(), 0);
    }

    #[test]
    fn test_write_then_read_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histfile");
        let saved = history(&["echo a", "cd /tmp", "type ls"]);
        saved.write_to(&path).unwrap();
        assert_eq!(
            fs::read_to_string(&path).unwrap(),
            "echo a\ncd /tmp\ntype ls\n"
        );

        let mut loaded = history(&["pwd"]);
        assert_eq!(loaded.read_from(&path).unwrap(), 3);
        assert_eq!(loaded.entries(), &["pwd", "echo a", "cd /tmp", "type ls"]);
    }

    #[test]
    fn test_write_overwrites() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histfile");
        fs::write(&path, "stale\nlines\nhere\n").unwrap();
        history(&["fresh"]).write_to(&path).unwrap();
        assert_eq!(fs::read_to_string(&path).unwrap(), "fresh\n");
    }

    #[test]
    fn test_read_skips_blank_lines() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("histfile");
        fs::write(&path, "one\n\ntwo\n").unwrap();
        let mut history = History::new();
        assert_eq!(history.read_from(&path).unwrap(), 2);
        assert_eq!(history.entries(), &["one", "two"]);
    }

    #[test]
    fn test_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let mut history = History::new();
        let err = history.read_from(&dir.path().join("nope")).unwrap_err();
        assert!(matches!(err, ShellError::HistoryFile { .. }));
        assert!(history.is_empty());
    }
}
