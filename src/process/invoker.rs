//! Spawning external tools with piped stdin and captured or streamed stdout.
//!
//! The `CommandExecutor` trait enables full testability without external dependencies.

use crate::error::{Result, YomiageError};
use async_trait::async_trait;
use std::process::Stdio;
use tokio::io::AsyncWriteExt;
use tokio::process::Command;

/// One invocation of an external command.
///
/// Built per call and never mutated after it is handed to an executor.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProcessSpec {
    pub command: String,
    pub args: Vec<String>,
    /// Text written to the child's stdin (skipped when blank).
    pub stdin: Option<String>,
    /// Collect stdout instead of passing it through to our own stdout.
    pub capture_stdout: bool,
}

impl ProcessSpec {
    pub fn new(command: impl Into<String>) -> Self {
        Self {
            command: command.into(),
            args: Vec::new(),
            stdin: None,
            capture_stdout: true,
        }
    }

    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn stdin(mut self, body: impl Into<String>) -> Self {
        self.stdin = Some(body.into());
        self
    }

    /// Pass stdout straight through to the terminal.
    pub fn streamed(mut self) -> Self {
        self.capture_stdout = false;
        self
    }

    /// The stdin body, if it has anything besides whitespace.
    fn stdin_body(&self) -> Option<&str> {
        self.stdin.as_deref().filter(|body| !body.trim().is_empty())
    }
}

/// What a successful invocation produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StageOutput {
    /// Trimmed stdout of a captured invocation.
    Captured(String),
    /// Stdout went to the terminal; success is all there is to report.
    Streamed,
}

/// Result of a successful invocation together with the child's exit code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageResult {
    pub output: StageOutput,
    pub exit_code: i32,
}

impl StageResult {
    pub fn captured(text: impl Into<String>) -> Self {
        Self {
            output: StageOutput::Captured(text.into()),
            exit_code: 0,
        }
    }

    pub fn streamed() -> Self {
        Self {
            output: StageOutput::Streamed,
            exit_code: 0,
        }
    }

    /// Captured text, or an empty string for streamed invocations.
    pub fn into_text(self) -> String {
        match self.output {
            StageOutput::Captured(text) => text,
            StageOutput::Streamed => String::new(),
        }
    }
}

/// Trait for executing external commands.
///
/// Object-safe, Send + Sync so one executor can be shared by every stage.
/// Enables testability by allowing mock implementations.
#[async_trait]
pub trait CommandExecutor: Send + Sync {
    /// Run the command once and wait for it to exit.
    ///
    /// Fails with `Spawn` if the command cannot be started and with `Exit`
    /// if it exits non-zero.
    async fn execute(&self, spec: &ProcessSpec) -> Result<StageResult>;
}

/// Production command executor using tokio::process::Command.
///
/// stderr of the child is always inherited so tool diagnostics show up live.
#[derive(Debug, Clone, Default)]
pub struct SystemCommandExecutor;

impl SystemCommandExecutor {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl CommandExecutor for SystemCommandExecutor {
    async fn execute(&self, spec: &ProcessSpec) -> Result<StageResult> {
        let stdout = if spec.capture_stdout {
            Stdio::piped()
        } else {
            Stdio::inherit()
        };

        tracing::debug!(
            command = %spec.command,
            args = ?spec.args,
            capture = spec.capture_stdout,
            "spawning"
        );

        let mut child = Command::new(&spec.command)
            .args(&spec.args)
            .stdin(Stdio::piped())
            .stdout(stdout)
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|source| YomiageError::Spawn {
                command: spec.command.clone(),
                source,
            })?;

        // Feed stdin while waiting so a chatty child can't block on a full pipe.
        let stdin = child.stdin.take();
        let body = spec.stdin_body().map(str::to_owned);
        let feed = async move {
            if let Some(mut pipe) = stdin {
                if let Some(body) = body {
                    pipe.write_all(body.as_bytes()).await?;
                }
                pipe.shutdown().await?;
            }
            Ok::<(), std::io::Error>(())
        };

        let (fed, output) = tokio::join!(feed, child.wait_with_output());
        let output = output?;

        // Signal deaths have no exit code.
        let code = output.status.code().unwrap_or(-1);
        tracing::debug!(command = %spec.command, code, "exited");

        if !output.status.success() {
            return Err(YomiageError::Exit {
                command: spec.command.clone(),
                code,
            });
        }

        match fed {
            Err(e) if e.kind() != std::io::ErrorKind::BrokenPipe => return Err(e.into()),
            Err(_) => tracing::debug!(command = %spec.command, "child closed stdin early"),
            Ok(()) => {}
        }

        if spec.capture_stdout {
            let text = String::from_utf8_lossy(&output.stdout).trim().to_string();
            Ok(StageResult {
                output: StageOutput::Captured(text),
                exit_code: code,
            })
        } else {
            Ok(StageResult {
                output: StageOutput::Streamed,
                exit_code: code,
            })
        }
    }
}
