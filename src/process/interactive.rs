//! Terminal passthrough for commands whose hooks may prompt the user.

use std::io::{self, BufRead, BufReader, Write};
use std::process::{Command, Stdio};
use std::thread;

use super::CommandOutput;

/// Whether a stderr line is informational output relayed from the server.
///
/// GitHub answers every push with `remote:` lines (the "Create a pull
/// request ... by visiting" hint and its URL); acp prints its own link.
pub fn is_remote_noise(line: &str) -> bool {
    line.trim_start().starts_with("remote:")
}

/// Run `cmd` with inherited stdin/stdout and a piped stderr.
///
/// Stderr is drained line by line on a helper thread while the child runs,
/// so a chatty hook can never fill the pipe while it waits on the terminal.
/// Every line is captured; only non-noise lines are echoed.
pub(super) fn run_passthrough(mut cmd: Command) -> io::Result<CommandOutput> {
    cmd.stdin(Stdio::inherit())
        .stdout(Stdio::inherit())
        .stderr(Stdio::piped());

    let mut child = cmd.spawn()?;
    let stderr = child.stderr.take();

    let drain = thread::spawn(move || {
        let mut captured = String::new();
        let Some(stderr) = stderr else {
            return captured;
        };

        let mut reader = BufReader::new(stderr);
        let mut echo = io::stderr();
        let mut buf = Vec::new();
        // Hooks may print non-UTF-8 bytes; keep draining until EOF regardless.
        loop {
            buf.clear();
            match reader.read_until(b'\n', &mut buf) {
                Ok(0) => break,
                Ok(_) => {}
                Err(e) if e.kind() == io::ErrorKind::Interrupted => continue,
                Err(_) => break,
            }
            let line = String::from_utf8_lossy(&buf);
            let line = line.trim_end_matches(['\n', '\r']);
            if !is_remote_noise(line) {
                let _ = writeln!(echo, "{}", line);
            }
            captured.push_str(line);
            captured.push('\n');
        }
        captured
    });

    let status = child.wait()?;
    let stderr = drain.join().unwrap_or_default();

    Ok(CommandOutput {
        status: status.code(),
        stdout: String::new(),
        stderr,
    })
}
