use std::fs;
use std::os::unix::fs::PermissionsExt;
use std::path::{Path, PathBuf};

use anyhow::Context;

/// Ordered list of directories probed for external commands, parsed once from `PATH`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SearchPath {
    dirs: Vec<String>,
}

impl SearchPath {
    /// Splits a colon-separated `PATH` value. Empty entries are dropped.
    pub fn parse(value: &str) -> Self {
        SearchPath {
            dirs: value
                .split(':')
                .filter(|dir| !dir.is_empty())
                .map(str::to_owned)
                .collect(),
        }
    }

    pub fn from_dirs<I, S>(dirs: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        SearchPath {
            dirs: dirs.into_iter().map(Into::into).collect(),
        }
    }

    pub fn dirs(&self) -> &[String] {
        &self.dirs
    }

    /// Resolves a command name to an executable file, first match wins.
    ///
    /// Names containing a `/` are checked as given instead of being searched.
    pub fn find(&self, program_name: &str) -> Option<String> {
        if program_name.is_empty() {
            return None;
        }
        if program_name.contains('/') {
            return is_executable(Path::new(program_name)).then(|| program_name.to_string());
        }

        self.dirs
            .iter()
            .map(|dir| join_dir(dir, program_name))
            .find(|candidate| is_executable(Path::new(candidate)))
    }
}

/// `dir + "/" + name`, inserting the separator only when `dir` lacks one.
pub fn join_dir(dir: &str, name: &str) -> String {
    let mut joined = String::with_capacity(dir.len() + name.len() + 1);
    joined.push_str(dir);
    if !dir.ends_with('/') {
        joined.push('/');
    }
    joined.push_str(name);
    joined
}

pub fn is_executable(file_path: &Path) -> bool {
    match fs::metadata(file_path) {
        Ok(metadata) => metadata.is_file() && metadata.permissions().mode() & 0o111 != 0,
        Err(_) => false,
    }
}

/// Expands `~` and `~/...` against `home`. Other paths are returned as-is.
pub fn expand_tilde(path: &str, home: Option<&Path>) -> anyhow::Result<PathBuf> {
    if path == "~" {
        home.map(Path::to_path_buf)
            .context("HOME environment variable not set")
    } else if let Some(rest) = path.strip_prefix("~/") {
        let home = home.context("HOME environment variable not set")?;
        Ok(home.join(rest))
    } else {
        Ok(PathBuf::from(path))
    }
}
