use std::io::{self, Read, Write};
use std::os::unix::process::CommandExt;
use std::process::{Command as Process, ExitStatus, Stdio};
use std::thread;

use tracing::debug;

use crate::error::{Result, ShellError};

/// Size of the chunks forwarded from a child's pipes.
pub const RELAY_BUFFER_SIZE: usize = 1024;

/// Copies `reader` to `writer` chunk by chunk, flushing after every chunk.
///
/// If the writer fails the reader is still drained to EOF so the child never
/// blocks on a full pipe; the first write error is returned at the end.
pub fn relay<R: Read, W: Write + ?Sized>(mut reader: R, writer: &mut W) -> io::Result<u64> {
    let mut buf = [0u8; RELAY_BUFFER_SIZE];
    let mut forwarded = 0u64;
    let mut write_error = None;

    loop {
        let n = match reader.read(&mut buf) {
            Ok(0) => break,
            Ok(n) => n,
            Err(err) if err.kind() == io::ErrorKind::Interrupted => continue,
            Err(err) => return Err(err),
        };
        if write_error.is_some() {
            continue;
        }
        match writer.write_all(&buf[..n]).and_then(|()| writer.flush()) {
            Ok(()) => forwarded += n as u64,
            Err(err) => write_error = Some(err),
        }
    }

    match write_error {
        Some(err) => Err(err),
        None => Ok(forwarded),
    }
}

/// Spawns `program` with `argv` (argv[0] included) and relays its stdout and
/// stderr into the given writers until both pipes close, then reaps it.
pub fn run<O, E>(program: &str, argv: &[String], stdout: &mut O, stderr: &mut E) -> Result<ExitStatus>
where
    O: Write + Send,
    E: Write + Send,
{
    let mut process = Process::new(program);
    if let Some((name, args)) = argv.split_first() {
        process.arg0(name).args(args);
    }
    process
        .stdin(Stdio::inherit())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped());

    let spawn_error = |source| ShellError::Spawn {
        program: program.to_string(),
        source,
    };
    let relay_error = |source| ShellError::Relay {
        program: program.to_string(),
        source,
    };

    let mut child = process.spawn().map_err(spawn_error)?;
    debug!(pid = child.id(), program, "spawned");

    let (Some(out_pipe), Some(err_pipe)) = (child.stdout.take(), child.stderr.take()) else {
        let _ = child.kill();
        let _ = child.wait();
        return Err(relay_error(io::Error::other("child pipes were not captured")));
    };

    let (out_result, err_result) = thread::scope(|scope| {
        let out_task = scope.spawn(move || relay(out_pipe, stdout));
        let err_task = scope.spawn(move || relay(err_pipe, stderr));
        (join_relay(out_task), join_relay(err_task))
    });

    let status = child.wait().map_err(|source| ShellError::Wait {
        program: program.to_string(),
        source,
    })?;
    debug!(program, ?status, "child exited");

    out_result.map_err(relay_error)?;
    err_result.map_err(relay_error)?;
    Ok(status)
}

fn join_relay(task: thread::ScopedJoinHandle<'_, io::Result<u64>>) -> io::Result<u64> {
    task.join()
        .unwrap_or_else(|_| Err(io::Error::other("relay thread panicked")))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;

    fn argv(words: &[&str]) -> Vec<String> {
        words.iter().map(|s| s.to_string()).collect()
    }

    struct FailingWriter;

    impl Write for FailingWriter {
        fn write(&mut self, _buf: &[u8]) -> io::Result<usize> {
            Err(io::Error::new(io::ErrorKind::BrokenPipe, "closed"))
        }

        fn flush(&mut self) -> io::Result<()> {
            Ok(())
        }
    }

    #[test]
    fn test_relay_copies_everything_in_order() {
        let input: Vec<u8> = (0..5000u32).map(|i| (i % 251) as u8).collect();
        let mut out = Vec::new();
        let n = relay(Cursor::new(input.clone()), &mut out).unwrap();
        assert_eq!(n, 5000);
        assert_eq!(out, input);
    }

    #[test]
    fn test_relay_drains_after_write_error() {
        let mut reader = Cursor::new(vec![b'x'; 3 * RELAY_BUFFER_SIZE]);
        let err = relay(&mut reader, &mut FailingWriter).unwrap_err();
        assert_eq!(err.kind(), io::ErrorKind::BrokenPipe);
        assert_eq!(reader.position(), 3 * RELAY_BUFFER_SIZE as u64);
    }

    #[test]
    fn test_run_captures_stdout() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run("/bin/sh", &argv(&["sh", "-c", "echo hello"]), &mut out, &mut err).unwrap();
        assert!(status.success());
        assert_eq!(out, b"hello\n");
        assert!(err.is_empty());
    }

    #[test]
    fn test_run_sets_argv0_to_typed_name() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        run("/bin/sh", &argv(&["custom-name", "-c", "echo $0"]), &mut out, &mut err).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), "custom-name\n");
    }

    #[test]
    fn test_run_reports_exit_status() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run("/bin/sh", &argv(&["sh", "-c", "exit 3"]), &mut out, &mut err).unwrap();
        assert_eq!(status.code(), Some(3));
    }

    #[test]
    fn test_interleaved_streams_keep_per_stream_order() {
        // chunks larger than the relay buffer, alternating between the streams
        let mut words = argv(&[
            "sh",
            "-c",
            r#"for c in "$@"; do case $c in E*) printf '%s' "$c" >&2;; *) printf '%s' "$c";; esac; done"#,
            "sh",
        ]);
        let mut expected_out = String::new();
        let mut expected_err = String::new();
        for i in 0..6 {
            let out_chunk = format!("O{i}:{}", "o".repeat(RELAY_BUFFER_SIZE * 3 + i));
            let err_chunk = format!("E{i}:{}", "e".repeat(RELAY_BUFFER_SIZE * 2 + 7 * i));
            expected_out.push_str(&out_chunk);
            expected_err.push_str(&err_chunk);
            words.push(out_chunk);
            words.push(err_chunk);
        }

        let mut out = Vec::new();
        let mut err = Vec::new();
        let status = run("/bin/sh", &words, &mut out, &mut err).unwrap();
        assert!(status.success());
        assert_eq!(String::from_utf8(out).unwrap(), expected_out);
        assert_eq!(String::from_utf8(err).unwrap(), expected_err);
    }

    #[test]
    fn test_spawn_failure() {
        let mut out = Vec::new();
        let mut err = Vec::new();
        let result = run("/nonexistent/program", &argv(&["program"]), &mut out, &mut err);
        assert!(matches!(result, Err(ShellError::Spawn { .. })));
    }
}
