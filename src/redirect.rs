use std::fs::{File, OpenOptions};
use std::io::{self, Write};
use std::os::fd::{AsRawFd, RawFd};
use std::os::unix::fs::OpenOptionsExt;
use std::path::PathBuf;

use nix::unistd::{close, dup, dup2};
use tracing::{debug, warn};

use crate::error::{Result, ShellError};

const REDIRECT_FILE_MODE: u32 = 0o644;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RedirectMode {
    /// `>`: create or truncate.
    Truncate,
    /// `>>`: create or append.
    Append,
}

/// Where one of the shell's output descriptors should point while a command runs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Redirection {
    pub fd: RawFd,
    pub path: PathBuf,
    pub mode: RedirectMode,
}

impl Redirection {
    pub fn open(&self) -> Result<File> {
        let mut options = OpenOptions::new();
        options.write(true).create(true).mode(REDIRECT_FILE_MODE);
        match self.mode {
            RedirectMode::Truncate => options.truncate(true),
            RedirectMode::Append => options.append(true),
        };
        options.open(&self.path).map_err(|source| ShellError::RedirectOpen {
            path: self.path.clone(),
            source,
        })
    }
}

/// Recognizes `>`, `1>`, `2>`, `>>`, `1>>` and `2>>`.
pub fn parse_operator(token: &str) -> Option<(RawFd, RedirectMode)> {
    match token {
        ">" | "1>" => Some((1, RedirectMode::Truncate)),
        "2>" => Some((2, RedirectMode::Truncate)),
        ">>" | "1>>" => Some((1, RedirectMode::Append)),
        "2>>" => Some((2, RedirectMode::Append)),
        _ => None,
    }
}

/// Removes every operator/target pair from `tokens`.
///
/// The last pair wins. An operator at the very end has no target and is left
/// in place as an ordinary argument.
pub fn extract(tokens: Vec<String>) -> (Vec<String>, Option<Redirection>) {
    let mut argv = Vec::with_capacity(tokens.len());
    let mut redirection = None;
    let mut tokens = tokens.into_iter();

    while let Some(token) = tokens.next() {
        if let Some((fd, mode)) = parse_operator(&token) {
            if let Some(target) = tokens.next() {
                redirection = Some(Redirection {
                    fd,
                    path: PathBuf::from(target),
                    mode,
                });
                continue;
            }
        }
        argv.push(token);
    }

    (argv, redirection)
}

fn flush_std_streams() {
    let _ = io::stdout().flush();
    let _ = io::stderr().flush();
}

/// Points `fd` at the redirection target until dropped, then restores the
/// original descriptor from a saved duplicate.
#[derive(Debug)]
pub struct RedirectGuard {
    fd: RawFd,
    saved: RawFd,
}

impl RedirectGuard {
    pub fn apply(redirection: &Redirection) -> Result<Self> {
        let fd = redirection.fd;
        let file = redirection.open()?;

        flush_std_streams();
        let saved = dup(fd).map_err(|source| ShellError::Descriptor { fd, source })?;
        if let Err(source) = dup2(file.as_raw_fd(), fd) {
            let _ = close(saved);
            return Err(ShellError::Descriptor { fd, source });
        }
        debug!(fd, path = %redirection.path.display(), mode = ?redirection.mode, "redirected");

        Ok(RedirectGuard { fd, saved })
    }
}

impl Drop for RedirectGuard {
    fn drop(&mut self) {
        flush_std_streams();
        if let Err(err) = dup2(self.saved, self.fd) {
            warn!(fd = self.fd, %err, "failed to restore descriptor");
        }
        let _ = close(self.saved);
        debug!(fd = self.fd, "descriptor restored");
    }
}
