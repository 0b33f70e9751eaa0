use std::io::{self, Write};
use std::path::PathBuf;

use tracing::{debug, warn};

use crate::builtins::{Builtin, Execute, ShellContext};
use crate::command::Command;
use crate::config::ShellConfig;
use crate::executor;
use crate::history::History;
use crate::redirect::RedirectGuard;

/// What the read loop should do after a line has been handled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flow {
    Continue,
    Exit,
}

/// Parses and runs lines one at a time. Owns everything that outlives a line.
pub struct Shell {
    ctx: ShellContext,
    histfile: Option<PathBuf>,
}

impl Shell {
    pub fn new(config: &ShellConfig) -> Self {
        Shell {
            ctx: ShellContext::new(config),
            histfile: config.histfile.clone(),
        }
    }

    pub fn history(&self) -> &History {
        &self.ctx.history
    }

    /// Adds a non-blank line to the history.
    pub fn record(&mut self, line: &str) {
        if !line.trim().is_empty() {
            self.ctx.history.push(line);
        }
    }

    pub fn load_histfile(&mut self) {
        let Some(path) = &self.histfile else { return };
        if !path.exists() {
            return;
        }
        match self.ctx.history.read_from(path) {
            Ok(count) => debug!(count, path = %path.display(), "history loaded"),
            Err(err) => warn!(%err, "could not load history"),
        }
    }

    pub fn save_histfile(&self) {
        let Some(path) = &self.histfile else { return };
        if let Err(err) = self.ctx.history.write_to(path) {
            warn!(%err, "could not save history");
        }
    }

    /// Runs one line against the process's own stdout and stderr.
    pub fn run_line(&mut self, line: &str) -> Flow {
        self.run_line_to(line, &mut io::stdout(), &mut io::stderr())
    }

    /// Runs one line, sending command output to `out` and diagnostics to `err`.
    ///
    /// A redirection on the line swaps the process descriptor for the duration
    /// of the command, so it only takes effect when `out`/`err` are the real
    /// standard streams.
    pub fn run_line_to<O, E>(&mut self, line: &str, out: &mut O, err: &mut E) -> Flow
    where
        O: Write + Send,
        E: Write + Send,
    {
        let Some(command) = Command::parse(line) else {
            return Flow::Continue;
        };
        debug!(argv = ?command.argv, redirection = ?command.redirection, "parsed");

        let _guard = match &command.redirection {
            Some(redirection) => match RedirectGuard::apply(redirection) {
                Ok(guard) => Some(guard),
                Err(e) => {
                    let _ = writeln!(err, "shrub: {e}");
                    return Flow::Continue;
                }
            },
            None => None,
        };

        self.dispatch(&command, out, err);
        let _ = out.flush();
        let _ = err.flush();

        if self.ctx.should_exit {
            Flow::Exit
        } else {
            Flow::Continue
        }
    }

    fn dispatch<O, E>(&mut self, command: &Command, out: &mut O, err: &mut E)
    where
        O: Write + Send,
        E: Write + Send,
    {
        let Some(program) = command.program() else {
            return;
        };

        if let Some(builtin) = Builtin::from_name(program) {
            if let Err(e) = builtin.execute(command.args(), out, &mut self.ctx) {
                let _ = out.flush();
                let _ = writeln!(err, "{e:#}");
            }
            return;
        }

        match self.ctx.search_path.find(program) {
            Some(path) => {
                if let Err(e) = executor::run(&path, &command.argv, out, err) {
                    let _ = writeln!(err, "shrub: {e}");
                }
            }
            None => {
                let _ = writeln!(err, "{program}: command not found");
            }
        }
    }
}
