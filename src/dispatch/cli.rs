use std::io;
use std::os::unix::process::ExitStatusExt;
use std::process::{ExitStatus, Stdio};

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::Command;
use tokio::task::JoinError;

use crate::dispatch::CliOutput;
use crate::error::LlmError;

/// Combined stdout + stderr limit. Exceeding it fails the call.
pub const MAX_OUTPUT_BYTES: usize = 10 * 1024 * 1024; // 10MB

/// Per-stream read cap: one byte past the limit is enough to detect overflow.
const CAPTURE_LIMIT: u64 = MAX_OUTPUT_BYTES as u64 + 1;

pub struct CliDispatch;

impl Default for CliDispatch {
    fn default() -> Self {
        Self
    }
}

impl CliDispatch {
    pub fn new() -> Self {
        Self
    }

    /// Run `executable` with `args`, feed `input` on stdin, and capture output.
    ///
    /// - No shell interpolation (Command::new + args)
    /// - Environment inherited unmodified
    /// - kill_on_drop(true) so a dropped future does not leave the child running
    /// - Output bounded by MAX_OUTPUT_BYTES; the process group is killed on breach
    ///
    /// There is no timeout: the call waits until the child exits.
    pub async fn run(
        &self,
        executable: &str,
        args: &[String],
        input: &str,
    ) -> Result<CliOutput, LlmError> {
        let mut cmd = Command::new(executable);
        cmd.args(args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .process_group(0)
            .kill_on_drop(true);

        tracing::debug!(executable, ?args, "spawning CLI process");

        let mut child = cmd.spawn().map_err(|e| spawn_error(executable, e))?;

        let (Some(mut stdin), Some(stdout_pipe), Some(stderr_pipe)) =
            (child.stdin.take(), child.stdout.take(), child.stderr.take())
        else {
            return Err(LlmError::Execution(format!(
                "{executable}: stdio pipes unavailable"
            )));
        };

        // Write stdin concurrently with the pipe readers. Awaiting the write
        // first deadlocks once the prompt exceeds the OS pipe buffer and the
        // child starts producing output before it has drained its input.
        let prompt = input.to_owned();
        tokio::spawn(async move {
            if !prompt.is_empty() {
                let _ = stdin.write_all(prompt.as_bytes()).await;
            }
            // drop closes the pipe → child sees EOF
        });

        // process_group(0) makes the child its own group leader (pgid == pid).
        let child_pid = child.id();

        let mut stdout_handle = tokio::spawn(read_capped(stdout_pipe));
        let mut stderr_handle = tokio::spawn(read_capped(stderr_pipe));

        // Whichever stream finishes first: if it hit the cap (or its reader
        // failed), the child may be blocked writing. Kill the whole group so
        // the other reader sees EOF.
        let (stdout_read, stderr_read) = tokio::select! {
            result = &mut stdout_handle => {
                let first = reader_output("stdout", result);
                if first.as_ref().ok().is_none_or(|buf| buf.len() > MAX_OUTPUT_BYTES) {
                    kill_group(child_pid);
                }
                (first, reader_output("stderr", stderr_handle.await))
            }
            result = &mut stderr_handle => {
                let first = reader_output("stderr", result);
                if first.as_ref().ok().is_none_or(|buf| buf.len() > MAX_OUTPUT_BYTES) {
                    kill_group(child_pid);
                }
                (reader_output("stdout", stdout_handle.await), first)
            }
        };

        let (stdout_raw, stderr_raw) = match (stdout_read, stderr_read) {
            (Ok(out), Ok(err)) => (out, err),
            (Err(e), _) | (_, Err(e)) => {
                kill_group(child_pid);
                let _ = child.wait().await;
                return Err(LlmError::Execution(format!("{executable}: {e}")));
            }
        };

        let total = stdout_raw.len() + stderr_raw.len();
        if total > MAX_OUTPUT_BYTES {
            kill_group(child_pid);
            let _ = child.wait().await;
            tracing::warn!(executable, total, "CLI output exceeded buffer limit");
            return Err(LlmError::Execution(format!(
                "{executable} output exceeded {MAX_OUTPUT_BYTES} bytes"
            )));
        }

        let status = child
            .wait()
            .await
            .map_err(|e| LlmError::Execution(format!("failed to wait for {executable}: {e}")))?;

        let stdout = String::from_utf8_lossy(&stdout_raw).into_owned();
        let stderr = String::from_utf8_lossy(&stderr_raw).into_owned();

        if !status.success() {
            let reason = describe_status(status);
            tracing::warn!(executable, reason = %reason, "CLI process failed");
            let detail = stderr.trim();
            let message = if detail.is_empty() {
                format!("{executable} {reason}")
            } else {
                format!("{executable} {reason}: {detail}")
            };
            return Err(LlmError::Execution(message));
        }

        Ok(CliOutput { stdout, stderr })
    }
}

/// A missing executable is the one spawn failure with a known remedy.
fn spawn_error(executable: &str, e: io::Error) -> LlmError {
    if e.kind() == io::ErrorKind::NotFound {
        LlmError::ToolNotFound {
            executable: executable.to_string(),
        }
    } else {
        LlmError::Execution(format!("failed to spawn {executable}: {e}"))
    }
}

async fn read_capped<R: AsyncRead + Unpin>(pipe: R) -> io::Result<Vec<u8>> {
    let mut buf = Vec::with_capacity(64 * 1024);
    let mut capped = pipe.take(CAPTURE_LIMIT);
    capped.read_to_end(&mut buf).await?;
    Ok(buf)
}

/// Flatten a pipe reader's task result. A failed or panicked reader leaves a
/// truncated buffer, which must not be reported as the child's output.
fn reader_output(
    stream: &'static str,
    joined: Result<io::Result<Vec<u8>>, JoinError>,
) -> Result<Vec<u8>, String> {
    match joined {
        Ok(Ok(buf)) => Ok(buf),
        Ok(Err(e)) => {
            tracing::warn!(stream, "pipe read error: {e}");
            Err(format!("failed to read {stream}: {e}"))
        }
        Err(e) => {
            tracing::warn!(stream, "pipe reader task failed: {e}");
            Err(format!("{stream} reader failed: {e}"))
        }
    }
}

/// SIGKILL the child's process group. start_kill() would only reach the
/// leader; grandchildren holding the pipes open would keep readers blocked.
fn kill_group(pid: Option<u32>) {
    if let Some(pid) = pid {
        unsafe {
            libc::kill(-(pid as i32), libc::SIGKILL);
        }
    }
}

fn describe_status(status: ExitStatus) -> String {
    match (status.code(), status.signal()) {
        (Some(code), _) => format!("exited with code {code}"),
        (None, Some(signal)) => format!("terminated by signal {signal}"),
        (None, None) => "exited abnormally".to_string(),
    }
}
