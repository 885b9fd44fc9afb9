//! Speech synthesis stage.
//!
//! The synthesis tool prints its own progress, so its stdout is streamed to
//! the terminal instead of captured. A zero exit status is taken as proof
//! that the audio file was written; the file itself is not inspected.

use super::DEBUG_DIR_FLAG;
use crate::config::TtsEngine;
use crate::error::Result;
use crate::process::{CommandExecutor, ProcessSpec};
use std::path::{Path, PathBuf};

/// Outcome of the synthesis stage.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Synthesis {
    /// The tool exited 0 after being asked to write this file.
    Written(PathBuf),
    /// There was no narration text, so the tool was never started.
    Skipped,
}

impl Synthesis {
    pub fn path(&self) -> Option<&Path> {
        match self {
            Synthesis::Written(path) => Some(path),
            Synthesis::Skipped => None,
        }
    }
}

pub struct AudioSynthesizer<'a, E: ?Sized> {
    executor: &'a E,
    command: &'a str,
    engine: TtsEngine,
    model: &'a str,
}

impl<'a, E: CommandExecutor + ?Sized> AudioSynthesizer<'a, E> {
    pub fn new(executor: &'a E, command: &'a str, engine: TtsEngine, model: &'a str) -> Self {
        Self {
            executor,
            command,
            engine,
            model,
        }
    }

    /// `<command> -o <audio> [--model <model>] [--debug-dir <dir>]`, streamed.
    ///
    /// Only the OpenAI engine takes a model; the Google tool picks its own voice.
    pub fn spec(&self, text: &str, audio_path: &Path, debug_dir: Option<&Path>) -> ProcessSpec {
        let mut spec = ProcessSpec::new(self.command)
            .args(["-o".to_string(), audio_path.display().to_string()])
            .stdin(text)
            .streamed();
        if self.engine == TtsEngine::Openai {
            spec = spec.args(["--model", self.model]);
        }
        if let Some(dir) = debug_dir {
            spec = spec.args([DEBUG_DIR_FLAG.to_string(), dir.display().to_string()]);
        }
        spec
    }

    pub async fn synthesize(
        &self,
        text: &str,
        audio_path: &Path,
        debug_dir: Option<&Path>,
    ) -> Result<Synthesis> {
        if text.trim().is_empty() {
            tracing::debug!("no narration text, skipping {}", self.command);
            return Ok(Synthesis::Skipped);
        }

        self.executor
            .execute(&self.spec(text, audio_path, debug_dir))
            .await?;
        Ok(Synthesis::Written(audio_path.to_path_buf()))
    }
}
