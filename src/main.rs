use std::io::{self, BufRead, IsTerminal};
use std::path::PathBuf;

use anyhow::Context;
use argh::FromArgs;
use rustyline::error::ReadlineError;
use rustyline::history::DefaultHistory;
use rustyline::Editor;
use tracing::debug;

use shrub::builtins::BUILTINS;
use shrub::completion::{CommandCompleter, CommandIndex};
use shrub::{logging, Flow, Shell, ShellConfig};

type LineEditor = Editor<CommandCompleter, DefaultHistory>;

#[derive(FromArgs)]
/// A minimal interactive shell.
struct Cli {
    /// history file loaded at startup and written on exit; defaults to $HISTFILE
    #[argh(option)]
    histfile: Option<PathBuf>,

    /// prompt printed before each line
    #[argh(option)]
    prompt: Option<String>,
}

fn main() -> anyhow::Result<()> {
    let cli: Cli = argh::from_env();
    logging::init();

    let config = ShellConfig::from_env()
        .with_histfile(cli.histfile)
        .with_prompt(cli.prompt);
    debug!(?config, "starting");

    let mut shell = Shell::new(&config);
    shell.load_histfile();

    let result = if io::stdin().is_terminal() {
        run_interactive(&mut shell, &config)
    } else {
        run_piped(&mut shell)
    };

    shell.save_histfile();
    result
}

fn handle_line(shell: &mut Shell, line: &str) -> Flow {
    shell.record(line);
    shell.run_line(line)
}

fn run_interactive(shell: &mut Shell, config: &ShellConfig) -> anyhow::Result<()> {
    let index = CommandIndex::scan(BUILTINS, &config.search_path);
    let mut rl = LineEditor::new().context("failed to initialize line editor")?;
    rl.set_helper(Some(CommandCompleter::new(index)));

    // entries the editor already knows about, for up-arrow recall
    let mut synced = 0;
    sync_editor_history(&mut rl, shell, &mut synced);

    loop {
        match rl.readline(&config.prompt) {
            Ok(line) => {
                let flow = handle_line(shell, &line);
                // also picks up anything `history -r` loaded
                sync_editor_history(&mut rl, shell, &mut synced);
                if flow == Flow::Exit {
                    return Ok(());
                }
            }
            Err(ReadlineError::Interrupted) => continue,
            Err(ReadlineError::Eof) => return Ok(()),
            Err(err) => return Err(err).context("failed to read line"),
        }
    }
}

/// Reads commands from a non-terminal stdin, one per line, without a prompt.
/// Bytes that are not valid UTF-8 are replaced rather than ending the session.
fn run_piped(shell: &mut Shell) -> anyhow::Result<()> {
    let mut stdin = io::stdin().lock();
    let mut buf = Vec::new();
    loop {
        buf.clear();
        if stdin.read_until(b'\n', &mut buf).context("failed to read line")? == 0 {
            return Ok(());
        }
        let line = String::from_utf8_lossy(&buf);
        let line = line.trim_end_matches(['\n', '\r']);
        if handle_line(shell, line) == Flow::Exit {
            return Ok(());
        }
    }
}

fn sync_editor_history(rl: &mut LineEditor, shell: &Shell, synced: &mut usize) {
    let entries = shell.history().entries();
    for entry in entries.iter().skip(*synced) {
        let _ = rl.add_history_entry(entry.as_str());
    }
    *synced = entries.len();
}
