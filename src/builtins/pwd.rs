use std::env;
use std::io::Write;

use anyhow::Context;

use crate::builtins::{Execute, ShellContext};

pub struct PwdBuiltin {
}

impl Execute for PwdBuiltin {
    fn execute(&self, args: &[String], out: &mut dyn Write, _ctx: &mut ShellContext) -> anyhow::Result<()> {
        if !args.is_empty() {
            anyhow::bail!("pwd: too many arguments");
        }
        let path = env::current_dir().context("pwd: error getting current directory")?;
        writeln!(out, "{}", path.display())?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::test_support::{context, run};
    use std::env;

    #[test]
    fn test_pwd_prints_current_dir() {
        let mut ctx = context();
        let expected = format!("{}\n", env::current_dir().unwrap().display());
        assert_eq!(run(&mut ctx, "pwd", &[]).unwrap(), expected);
    }

    #[test]
    fn test_pwd_rejects_arguments() {
        let mut ctx = context();
        let err = run(&mut ctx, "pwd", &["extra"]).unwrap_err();
        assert_eq!(err.to_string(), "pwd: too many arguments");
    }
}
