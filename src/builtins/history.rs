use std::io::Write;
use std::path::Path;

use anyhow::Context;

use crate::builtins::{Execute, ShellContext};

pub struct HistoryBuiltin {
}

impl Execute for HistoryBuiltin {
    fn execute(&self, args: &[String], out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()> {
        match args {
            [] => print_entries(out, ctx, ctx.history.len()),
            [flag, file] if flag == "-r" => {
                ctx.history.read_from(Path::new(file)).context("history")?;
                Ok(())
            }
            [flag, file] if flag == "-w" => {
                ctx.history.write_to(Path::new(file)).context("history")?;
                Ok(())
            }
            [flag] if flag == "-r" || flag == "-w" => {
                anyhow::bail!("history: {}: option requires a file argument", flag)
            }
            [count] => match count.parse::<usize>() {
                Ok(n) => print_entries(out, ctx, n),
                Err(_) => anyhow::bail!("history: {}: numeric argument required", count),
            },
            [_, _] => anyhow::bail!("history: usage: history [n] | history -r <file> | history -w <file>"),
            _ => anyhow::bail!("history: too many arguments"),
        }
    }
}

fn print_entries(out: &mut dyn Write, ctx: &ShellContext, n: usize) -> anyhow::Result<()> {
    for (index, line) in ctx.history.tail(n) {
        writeln!(out, "    {}  {}", index, line)?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use crate::builtins::test_support::{context, run};
    use std::fs;

    fn seeded() -> crate::builtins::ShellContext {
        let mut ctx = context();
        for line in ["echo one", "pwd", "echo two"] {
            ctx.history.push(line);
        }
        ctx
    }

    #[test]
    fn test_history_prints_everything() {
        let mut ctx = seeded();
        assert_eq!(
            run(&mut ctx, "history", &[]).unwrap(),
            "    1  echo one\n    2  pwd\n    3  echo two\n"
        );
    }

    #[test]
    fn test_history_last_n() {
        let mut ctx = seeded();
        assert_eq!(
            run(&mut ctx, "history", &["2"]).unwrap(),
            "    2  pwd\n    3  echo two\n"
        );
        assert_eq!(run(&mut ctx, "history", &["0"]).unwrap(), "");
    }

    #[test]
    fn test_history_rejects_non_numeric() {
        let mut ctx = seeded();
        let err = run(&mut ctx, "history", &["abc"]).unwrap_err();
        assert_eq!(err.to_string(), "history: abc: numeric argument required");
        assert!(run(&mut ctx, "history", &["-3"]).is_err());
    }

    #[test]
    fn test_history_write_and_read() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("hist");
        let file_arg = file.to_string_lossy().to_string();

        let mut ctx = seeded();
        assert_eq!(run(&mut ctx, "history", &["-w", file_arg.as_str()]).unwrap(), "");
        assert_eq!(fs::read_to_string(&file).unwrap(), "echo one\npwd\necho two\n");

        let mut fresh = context();
        fresh.history.push("history -r hist");
        run(&mut fresh, "history", &["-r", file_arg.as_str()]).unwrap();
        assert_eq!(
            fresh.history.entries(),
            &["history -r hist", "echo one", "pwd", "echo two"]
        );
    }

    #[test]
    fn test_history_read_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("missing").to_string_lossy().to_string();
        let mut ctx = seeded();
        assert!(run(&mut ctx, "history", &["-r", missing.as_str()]).is_err());
        assert_eq!(ctx.history.len(), 3);
    }

    #[test]
    fn test_history_option_without_file() {
        let mut ctx = seeded();
        let err = run(&mut ctx, "history", &["-w"]).unwrap_err();
        assert_eq!(err.to_string(), "history: -w: option requires a file argument");
    }
}
