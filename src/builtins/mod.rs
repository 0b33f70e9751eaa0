use std::io::Write;
use std::path::PathBuf;

use crate::builtins::cd::CdBuiltin;
use crate::builtins::echo::EchoBuiltin;
use crate::builtins::exit::ExitBuiltin;
use crate::builtins::history::HistoryBuiltin;
use crate::builtins::pwd::PwdBuiltin;
use crate::builtins::type_builtin::TypeBuiltin;
use crate::config::ShellConfig;
use crate::history::History;
use crate::path_utils::SearchPath;

mod cd;
mod echo;
mod exit;
mod history;
mod pwd;
mod type_builtin;

pub enum Builtin {
    Exit(ExitBuiltin),
    Echo(EchoBuiltin),
    Cd(CdBuiltin),
    Pwd(PwdBuiltin),
    Type(TypeBuiltin),
    History(HistoryBuiltin),
}

impl Execute for Builtin {
    fn execute(&self, args: &[String], out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()> {
        match self {
            Builtin::Exit(b) => b.execute(args, out, ctx),
            Builtin::Echo(b) => b.execute(args, out, ctx),
            Builtin::Cd(b) => b.execute(args, out, ctx),
            Builtin::Pwd(b) => b.execute(args, out, ctx),
            Builtin::Type(b) => b.execute(args, out, ctx),
            Builtin::History(b) => b.execute(args, out, ctx),
        }
    }
}

impl Builtin {
    pub fn from_name(name: &str) -> Option<Self> {
        match name {
            "exit" => Some(Builtin::Exit(ExitBuiltin {})),
            "echo" => Some(Builtin::Echo(EchoBuiltin {})),
            "cd" => Some(Builtin::Cd(CdBuiltin {})),
            "pwd" => Some(Builtin::Pwd(PwdBuiltin {})),
            "type" => Some(Builtin::Type(TypeBuiltin {})),
            "history" => Some(Builtin::History(HistoryBuiltin {})),
            _ => None,
        }
    }
}

pub const BUILTINS: &[&str] = &["exit", "echo", "type", "pwd", "cd", "history"];

/// State the builtins may read or change, owned by the shell for its whole lifetime.
pub struct ShellContext {
    pub search_path: SearchPath,
    pub builtin_names: &'static [&'static str],
    pub home: Option<PathBuf>,
    pub history: History,
    pub should_exit: bool,
}

impl ShellContext {
    pub fn new(config: &ShellConfig) -> Self {
        ShellContext {
            search_path: config.search_path.clone(),
            builtin_names: BUILTINS,
            home: config.home.clone(),
            history: History::new(),
            should_exit: false,
        }
    }

    pub fn is_builtin(&self, name: &str) -> bool {
        self.builtin_names.contains(&name)
    }
}

pub trait Execute {
    /// Runs in the shell's own process. Output goes to `out`; a returned error
    /// is printed by the caller as one line and the shell keeps going.
    fn execute(&self, args: &[String], out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()>;
}
