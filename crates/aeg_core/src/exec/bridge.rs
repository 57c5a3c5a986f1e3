//! Runs a [`CommandInvocation`] as a child process.
//!
//! The argument vector goes to the OS as discrete arguments; no shell is
//! involved. Output is forwarded chunk by chunk while the tool runs and only a
//! bounded tail of each stream is kept for the final outcome. A chunk ends at
//! `\n` or `\r`, so progress bars that redraw in place are delivered as they
//! are drawn.

use std::process::Stdio;

use tokio::io::{AsyncBufReadExt, AsyncRead, BufReader};
use tokio::process::{Child, Command};
use tokio::sync::mpsc;

use crate::command::CommandInvocation;
use crate::models::OutputStream;

use super::errors::{ExecutionError, ExecutionResult};
use super::outcome::{ExecutionOutcome, OutputLine};
use super::tail::TailBuffer;

/// Lines kept per stream when no explicit size is configured.
pub const DEFAULT_TAIL_LINES: usize = 20;

/// Lines buffered between the pipe readers and the observer.
const OUTPUT_CHANNEL_CAPACITY: usize = 64;

/// Longest chunk forwarded in one piece; longer runs are split.
const MAX_CHUNK_BYTES: usize = 8 * 1024;

/// Launches the export tool and collects its outcome.
///
/// Holds no per-run state, so one bridge can serve any number of exports.
/// It does not serialize overlapping runs.
#[derive(Debug, Clone)]
pub struct ExecutionBridge {
    tail_lines: usize,
}

impl ExecutionBridge {
    pub fn new() -> Self {
        Self {
            tail_lines: DEFAULT_TAIL_LINES,
        }
    }

    /// Set how many lines of each stream are kept for the outcome.
    pub fn with_tail_lines(mut self, lines: usize) -> Self {
        self.tail_lines = lines.max(1);
        self
    }

    pub fn tail_lines(&self) -> usize {
        self.tail_lines
    }

    /// Run the invocation, discarding streamed output.
    pub async fn execute(&self, invocation: &CommandInvocation) -> ExecutionOutcome {
        self.execute_with(invocation, |_| {}).await
    }

    /// Run the invocation, passing each output line to `on_output` as it
    /// arrives.
    ///
    /// Lines of one stream arrive in the order the tool wrote them. The
    /// outcome is returned only after every line has been delivered.
    pub async fn execute_with<F>(
        &self,
        invocation: &CommandInvocation,
        mut on_output: F,
    ) -> ExecutionOutcome
    where
        F: FnMut(&OutputLine),
    {
        let program = invocation.program();

        let mut child = match spawn(invocation).await {
            Ok(child) => child,
            Err(cause) => return ExecutionOutcome::spawn_error(cause),
        };

        let (Some(stdout), Some(stderr)) = (child.stdout.take(), child.stderr.take()) else {
            let _ = child.kill().await;
            return ExecutionOutcome::spawn_error(ExecutionError::MissingPipe {
                program: program.to_string(),
            });
        };

        let (tx, mut rx) = mpsc::channel(OUTPUT_CHANNEL_CAPACITY);
        let stdout_reader = tokio::spawn(forward_lines(stdout, OutputStream::Stdout, tx.clone()));
        let stderr_reader = tokio::spawn(forward_lines(stderr, OutputStream::Stderr, tx));

        let mut stdout_tail = TailBuffer::new(self.tail_lines);
        let mut stderr_tail = TailBuffer::new(self.tail_lines);

        // Ends once both readers have hit EOF and dropped their senders.
        while let Some(line) = rx.recv().await {
            on_output(&line);
            match line.stream {
                OutputStream::Stdout => stdout_tail.push(line.text),
                OutputStream::Stderr => stderr_tail.push(line.text),
            }
        }

        for reader in [stdout_reader, stderr_reader] {
            if let Err(e) = reader.await {
                tracing::warn!("Output reader for {} stopped abnormally: {}", program, e);
            }
        }

        let status = match child.wait().await {
            Ok(status) => status,
            Err(source) => {
                tracing::error!("Failed to wait for {}: {}", program, source);
                return ExecutionOutcome::spawn_error(ExecutionError::wait(program, source));
            }
        };

        let exit_code = status.code().unwrap_or(-1);
        if exit_code == 0 {
            tracing::info!("{} finished successfully", program);
        } else {
            tracing::warn!("{} exited with code {}", program, exit_code);
        }

        ExecutionOutcome::from_exit(exit_code, stdout_tail.joined(), stderr_tail.joined())
    }
}

impl Default for ExecutionBridge {
    fn default() -> Self {
        Self::new()
    }
}

/// Create the output directory, then start the child with piped output.
async fn spawn(invocation: &CommandInvocation) -> ExecutionResult<Child> {
    let program = invocation.program();
    let output_dir = invocation.output_directory();

    tokio::fs::create_dir_all(output_dir).await.map_err(|source| {
        tracing::error!(
            "Could not create output directory {}: {}",
            output_dir.display(),
            source
        );
        ExecutionError::create_output_dir(output_dir, source)
    })?;

    let mut cmd = Command::new(program);
    cmd.args(invocation.args())
        .stdin(Stdio::null())
        .stdout(Stdio::piped())
        .stderr(Stdio::piped())
        .kill_on_drop(false);

    tracing::info!("Running: {}", invocation.preview());

    cmd.spawn().map_err(|source| {
        tracing::error!("Failed to launch {}: {}", program, source);
        ExecutionError::launch(program, source)
    })
}

/// Read `reader` in chunks ending at `\n` or `\r` and send each down `tx`.
///
/// A `\r\n` pair ends one chunk, and empty chunks left by `\r` redraws are
/// dropped. Chunks longer than [`MAX_CHUNK_BYTES`] are split.
async fn forward_lines<R>(reader: R, stream: OutputStream, tx: mpsc::Sender<OutputLine>)
where
    R: AsyncRead + Unpin,
{
    let mut reader = BufReader::new(reader);
    let mut chunk: Vec<u8> = Vec::new();
    let mut after_cr = false;

    loop {
        let available = match reader.fill_buf().await {
            Ok([]) => break,
            Ok(available) => available,
            Err(e) => {
                tracing::warn!("Error reading tool {}: {}", stream, e);
                break;
            }
        };

        let room = MAX_CHUNK_BYTES - chunk.len();
        let (used, terminator) = match available
            .iter()
            .take(room)
            .position(|b| *b == b'\n' || *b == b'\r')
        {
            Some(pos) => {
                chunk.extend_from_slice(&available[..pos]);
                (pos + 1, Some(available[pos]))
            }
            None => {
                let take = available.len().min(room);
                chunk.extend_from_slice(&available[..take]);
                (take, None)
            }
        };
        reader.consume(used);

        let send = match terminator {
            Some(b'\r') => {
                let send = !chunk.is_empty();
                after_cr = true;
                send
            }
            Some(_) => {
                let send = !(chunk.is_empty() && after_cr);
                after_cr = false;
                send
            }
            None if chunk.len() >= MAX_CHUNK_BYTES => {
                after_cr = false;
                true
            }
            None => continue,
        };

        let text = String::from_utf8_lossy(&chunk).into_owned();
        chunk.clear();
        if send && tx.send(OutputLine { stream, text }).await.is_err() {
            return;
        }
    }

    if !chunk.is_empty() {
        let text = String::from_utf8_lossy(&chunk).into_owned();
        let _ = tx.send(OutputLine { stream, text }).await;
    }
}
