//! Engine subprocess wrapper.
//!
//! Spawns the external playback engine with piped stdio and streams its
//! output through per-pipe [`LineFramer`]s into one ordered line channel.
//! Each pipe gets its own framer: interleaving raw chunks first would let
//! one pipe's partial line split the other's. Commands are written to the
//! engine's stdin, one per line, the engine's slave-mode convention.

use std::path::PathBuf;
use std::process::{ExitStatus, Stdio};
use std::time::Duration;

use tokio::io::{AsyncRead, AsyncReadExt, AsyncWriteExt};
use tokio::process::{Child, ChildStdin, Command};
use tokio::sync::mpsc;
use tokio::task::JoinHandle;

use ps_core::{Error, Result};

use crate::framer::LineFramer;

/// Builder for an engine invocation.
///
/// # Example
///
/// ```no_run
/// use ps_engine::Engine;
///
/// # async fn example() -> ps_core::Result<()> {
/// let mut engine = Engine::new("mplayer");
/// engine.arg("-slave").arg("-quiet").arg("/media/film.mkv");
/// let mut handle = engine.spawn()?;
/// while let Some(line) = handle.next_line().await {
///     println!("{line}");
/// }
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Engine {
    program: PathBuf,
    args: Vec<String>,
}

impl Engine {
    /// Create a builder for the given engine executable.
    pub fn new(program: impl Into<PathBuf>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
        }
    }

    /// Append a single argument.
    pub fn arg(&mut self, s: impl Into<String>) -> &mut Self {
        self.args.push(s.into());
        self
    }

    /// Append multiple arguments.
    pub fn args(&mut self, iter: impl IntoIterator<Item = impl Into<String>>) -> &mut Self {
        self.args.extend(iter.into_iter().map(Into::into));
        self
    }

    /// Spawn the engine, wiring both output pipes into one line stream.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tool`] if the process cannot be spawned.
    pub fn spawn(&self) -> Result<EngineHandle> {
        let tool = self
            .program
            .file_name()
            .map(|n| n.to_string_lossy().to_string())
            .unwrap_or_else(|| self.program.to_string_lossy().to_string());

        let mut cmd = Command::new(&self.program);
        cmd.args(&self.args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let mut child = cmd.spawn().map_err(|e| Error::Tool {
            tool: tool.clone(),
            message: format!("failed to spawn: {e}"),
        })?;

        let stdin = child.stdin.take();
        let (tx, rx) = mpsc::unbounded_channel();

        let mut readers = Vec::new();
        if let Some(stdout) = child.stdout.take() {
            readers.push(tokio::spawn(pump_lines(stdout, tx.clone())));
        }
        if let Some(stderr) = child.stderr.take() {
            readers.push(tokio::spawn(pump_lines(stderr, tx)));
        }

        tracing::debug!("Spawned {tool} (pid {:?})", child.id());

        Ok(EngineHandle {
            tool,
            child,
            stdin,
            lines: rx,
            readers,
        })
    }
}

/// Read one pipe to EOF, framing chunks into lines.
async fn pump_lines<R>(mut pipe: R, tx: mpsc::UnboundedSender<String>)
where
    R: AsyncRead + Unpin,
{
    let mut framer = LineFramer::new();
    let mut buf = [0u8; 8192];
    loop {
        match pipe.read(&mut buf).await {
            Ok(0) => break,
            Ok(n) => {
                for line in framer.feed(&buf[..n]) {
                    let text = String::from_utf8_lossy(&line).into_owned();
                    if tx.send(text).is_err() {
                        // Receiver gone; stop draining.
                        return;
                    }
                }
            }
            Err(e) => {
                tracing::debug!("Engine pipe read failed: {e}");
                break;
            }
        }
    }

    let dropped = framer.flush();
    if dropped > 0 {
        tracing::debug!("Dropped {dropped} unterminated bytes at engine exit");
    }
}

/// A running engine process and its line stream.
#[derive(Debug)]
pub struct EngineHandle {
    tool: String,
    child: Child,
    stdin: Option<ChildStdin>,
    lines: mpsc::UnboundedReceiver<String>,
    readers: Vec<JoinHandle<()>>,
}

impl EngineHandle {
    /// Next output line, in arrival order, or `None` once every pipe has
    /// closed and buffered lines are drained.
    pub async fn next_line(&mut self) -> Option<String> {
        self.lines.recv().await
    }

    /// Write a slave-mode command to the engine's stdin.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Tool`] when stdin is closed, or the underlying I/O
    /// error if the write fails.
    pub async fn send_command(&mut self, command: &str) -> Result<()> {
        let stdin = self.stdin.as_mut().ok_or_else(|| Error::Tool {
            tool: self.tool.clone(),
            message: "stdin is closed".to_string(),
        })?;
        stdin.write_all(command.as_bytes()).await?;
        stdin.write_all(b"\n").await?;
        stdin.flush().await?;
        Ok(())
    }

    /// Ask the engine to quit; kill it if it outlives `grace`.
    pub async fn quit(&mut self, grace: Duration) -> Result<ExitStatus> {
        if self.send_command("quit").await.is_ok() {
            if let Ok(Ok(status)) = tokio::time::timeout(grace, self.child.wait()).await {
                return Ok(status);
            }
        }
        tracing::warn!("{} did not quit within {grace:?}; killing", self.tool);
        self.child.kill().await?;
        Ok(self.child.wait().await?)
    }

    /// Wait for the engine to exit on its own and for its pipes to drain.
    pub async fn wait(&mut self) -> Result<ExitStatus> {
        let status = self.child.wait().await?;
        for reader in self.readers.drain(..) {
            let _ = reader.await;
        }
        Ok(status)
    }

    /// Engine process id while it is running.
    pub fn id(&self) -> Option<u32> {
        self.child.id()
    }
}
