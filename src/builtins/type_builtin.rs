use std::io::Write;

use crate::builtins::{Execute, ShellContext};

pub struct TypeBuiltin {
}

impl Execute for TypeBuiltin {
    fn execute(&self, args: &[String], out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()> {
        if args.is_empty() {
            anyhow::bail!("type: usage: type name [name ...]");
        }

        for program_name in args {
            if ctx.is_builtin(program_name) {
                writeln!(out, "{} is a shell builtin", program_name)?;
            } else {
                match ctx.search_path.find(program_name) {
                    Some(file_path) => writeln!(out, "{} is {}", program_name, file_path)?,
                    None => writeln!(out, "{} not found", program_name)?,
                }
            }
        }

        Ok(())
    }
}
