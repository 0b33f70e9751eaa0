use std::env;
use std::io::Write;

use crate::builtins::{Execute, ShellContext};
use crate::path_utils::expand_tilde;

pub struct CdBuiltin {
}

impl Execute for CdBuiltin {
    fn execute(&self, args: &[String], _out: &mut dyn Write, ctx: &mut ShellContext) -> anyhow::Result<()> {
        let target_dir = match args {
            [] => "~",
            [dir] => dir.as_str(),
            _ => anyhow::bail!("cd: too many arguments"),
        };

        let path = match expand_tilde(target_dir, ctx.home.as_deref()) {
            Ok(path) => path,
            Err(e) => anyhow::bail!("cd: {}", e),
        };

        // relative paths resolve against the process working directory
        if !path.is_dir() {
            anyhow::bail!("cd: {}: No such file or directory", target_dir)
        }
        if let Err(e) = env::set_current_dir(&path) {
            anyhow::bail!("cd: {}: {}", target_dir, e)
        }

        Ok(())
    }
}
