// src/ui/clipboard.rs
#![cfg(feature = "clipboard")]

use anyhow::{Context, Result};
use arboard::Clipboard;
use std::time::Duration;

/// Byte the daemon writes to stdout once it owns the clipboard.
#[cfg(target_os = "linux")]
const DAEMON_ACK: u8 = b'+';

/// How long the parent waits for the daemon to report ownership.
#[cfg(target_os = "linux")]
const DAEMON_ACK_TIMEOUT: Duration = Duration::from_secs(5);

/// Copies text to the system clipboard, using a daemon on Linux.
///
/// On Linux the daemon keeps the selection for `hold`, which should cover the
/// time the human needs to paste it.
pub fn copy_to_clipboard(text: &str, hold: Duration) -> Result<()> {
    #[cfg(target_os = "linux")]
    return spawn_clipboard_daemon(text, hold);

    #[cfg(not(target_os = "linux"))]
    {
        let _ = hold;
        let mut clipboard = Clipboard::new().context("Failed to initialize clipboard")?;
        clipboard
            .set_text(text.to_string())
            .context("Failed to copy to clipboard")
    }
}

/// X11 and Wayland drop the selection when its owner exits, so a detached copy
/// of this executable takes ownership and outlives the review run's prompt step.
#[cfg(target_os = "linux")]
fn spawn_clipboard_daemon(text: &str, hold: Duration) -> Result<()> {
    use std::io::Write;
    use std::process::{Command, Stdio};

    if std::env::var_os("DISPLAY").is_none() && std::env::var_os("WAYLAND_DISPLAY").is_none() {
        anyhow::bail!("No X11 or Wayland display available for the clipboard");
    }

    let mut child = Command::new(std::env::current_exe()?)
        .args(daemon_args(hold))
        .stdin(Stdio::piped())
        .stdout(Stdio::piped())
        .stderr(Stdio::null())
        .spawn()
        .context("Failed to spawn clipboard daemon")?;

    let handoff = child
        .stdin
        .take()
        .context("Failed to open clipboard daemon stdin")
        // Dropping stdin after the write gives the daemon its EOF.
        .and_then(|mut stdin| {
            stdin
                .write_all(text.as_bytes())
                .context("Failed to hand prompt to clipboard daemon")
        })
        .and_then(|()| {
            let stdout = child
                .stdout
                .take()
                .context("Failed to open clipboard daemon stdout")?;
            wait_for_ack(stdout, DAEMON_ACK_TIMEOUT)
        });

    if handoff.is_err() {
        let _ = child.kill();
        let _ = child.wait();
    }
    handoff
}

/// Arguments that start the daemon with the given hold time.
#[cfg(target_os = "linux")]
fn daemon_args(hold: Duration) -> Vec<String> {
    vec![
        "--clipboard-daemon".to_string(),
        "--timeout".to_string(),
        hold.as_secs().to_string(),
    ]
}

/// Blocks until the daemon writes its ack byte, closes its stdout, or `timeout` passes.
#[cfg(target_os = "linux")]
fn wait_for_ack<R>(mut reader: R, timeout: Duration) -> Result<()>
where
    R: std::io::Read + Send + 'static,
{
    let (tx, rx) = crossbeam_channel::bounded(1);
    std::thread::spawn(move || {
        let mut byte = [0u8; 1];
        let acked = reader
            .read(&mut byte)
            .map(|n| n == 1 && byte[0] == DAEMON_ACK);
        let _ = tx.send(acked);
    });

    match rx.recv_timeout(timeout) {
        Ok(Ok(true)) => Ok(()),
        Ok(Ok(false)) => anyhow::bail!("Clipboard daemon exited before taking the clipboard"),
        Ok(Err(e)) => Err(e).context("Failed to read from clipboard daemon"),
        Err(_) => anyhow::bail!(
            "Clipboard daemon did not take the clipboard within {}s",
            timeout.as_secs()
        ),
    }
}

/// Entry point of the `--clipboard-daemon` process: reads stdin, owns the clipboard for `hold`.
pub fn serve_clipboard_daemon(hold: Duration) -> Result<()> {
    use std::io::Read;

    let mut buffer = String::new();
    std::io::stdin().read_to_string(&mut buffer)?;

    let mut clipboard = Clipboard::new().context("Failed to initialize clipboard in daemon")?;
    clipboard
        .set_text(buffer)
        .context("Failed to set text in clipboard daemon")?;

    #[cfg(target_os = "linux")]
    {
        use std::io::Write;

        let mut stdout = std::io::stdout();
        // The parent may already be gone; keep the selection regardless.
        let _ = stdout.write_all(&[DAEMON_ACK]).and_then(|()| stdout.flush());
        std::thread::sleep(hold);
    }
    #[cfg(not(target_os = "linux"))]
    let _ = hold;

    Ok(())
}
