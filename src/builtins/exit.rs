use std::io::Write;

use crate::builtins::{Execute, ShellContext};

pub struct ExitBuiltin {
}

impl Execute for ExitBuiltin {
    // any arguments are accepted and ignored; the shell always exits with 0
    fn execute(&self, _args: &[String], _out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()> {
        ctx.should_exit = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use crate::builtins::test_support::{context, run};

    #[test]
    fn test_exit_sets_flag() {
        let mut ctx = context();
        assert_eq!(run(&mut ctx, "exit", &["0"]).unwrap(), "");
        assert!(ctx.should_exit);
    }
}
