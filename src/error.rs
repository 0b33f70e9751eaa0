use std::io;
use std::os::fd::RawFd;
use std::path::PathBuf;

use thiserror::Error;

/// Failures of the execution machinery. User-level mistakes inside builtins
/// are reported through `anyhow` instead.
#[derive(Debug, Error)]
pub enum ShellError {
    #[error("{}: {source}", path.display())]
    RedirectOpen {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot redirect file descriptor {fd}: {source}")]
    Descriptor {
        fd: RawFd,
        #[source]
        source: nix::Error,
    },

    #[error("{program}: {source}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program}: wait failed: {source}")]
    Wait {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{program}: output relay failed: {source}")]
    Relay {
        program: String,
        #[source]
        source: io::Error,
    },

    #[error("{}: {source}", path.display())]
    HistoryFile {
        path: PathBuf,
        #[source]
        source: io::Error,
    },
}

pub type Result<T> = std::result::Result<T, ShellError>;
