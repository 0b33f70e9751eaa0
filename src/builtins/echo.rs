use std::io::Write;

use crate::builtins::{Execute, ShellContext};

pub struct EchoBuiltin {
}

impl Execute for EchoBuiltin {
    fn execute(&self, args: &[String], out: &mut dyn Write, _ctx: &mut ShellContext) -> anyhow::Result<()> {
        writeln!(out, "{}", args.join(" "))?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::test_support::{context, run};

    #[test]
    fn test_echo_joins_with_spaces() {
        let mut ctx = context();
        assert_eq!(run(&mut ctx, "echo", &["a", "b"]).unwrap(), "a b\n");
        assert_eq!(run(&mut ctx, "echo", &["a b", "", "c"]).unwrap(), "a b  c\n");
    }

    #[test]
    fn test_echo_without_args_prints_newline() {
        let mut ctx = context();
        assert_eq!(run(&mut ctx, "echo", &[]).unwrap(), "\n");
    }
}
