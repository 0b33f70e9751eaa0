//! shrub: a small interactive shell.
//!
//! A line goes through [`tokenizer`] (quote and escape handling), then
//! [`redirect`] pulls out an optional output redirection, and [`shell::Shell`]
//! dispatches the result to a builtin or to [`executor`], which spawns the
//! program and relays its output.

pub mod builtins;
pub mod command;
pub mod completion;
pub mod config;
pub mod error;
pub mod executor;
pub mod history;
pub mod logging;
pub mod path_utils;
pub mod redirect;
pub mod shell;
pub mod tokenizer;

pub use command::Command;
pub use config::ShellConfig;
pub use error::ShellError;
pub use shell::{Flow, Shell};
