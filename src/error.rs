//! Error types for yomiage.

use crate::stages::Stage;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum YomiageError {
    // Configuration errors
    #[error("Configuration file not found at {path}")]
    ConfigFileNotFound { path: String },

    #[error("Configuration error: {0}")]
    Config(#[from] toml::de::Error),

    // Command-line usage errors
    #[error("Usage error: {message}")]
    Usage { message: String },

    // Subprocess errors
    #[error("Failed to start {command}: {source}")]
    Spawn {
        command: String,
        #[source]
        source: std::io::Error,
    },

    #[error("{command} exited with code {code}")]
    Exit { command: String, code: i32 },

    // Structured output recovery errors. `raw` keeps the full output; the
    // message only shows a one-line excerpt of it.
    #[error(
        "Could not recover JSON from extraction output ({message}): {}",
        excerpt(.raw)
    )]
    Parse { message: String, raw: String },

    // A failure tagged with the pipeline stage it happened in
    #[error("{stage} failed: {source}")]
    Stage {
        stage: Stage,
        #[source]
        source: Box<YomiageError>,
    },

    // General I/O errors
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl YomiageError {
    /// Tag this error with the stage it came from.
    pub fn in_stage(self, stage: Stage) -> Self {
        YomiageError::Stage {
            stage,
            source: Box::new(self),
        }
    }

    /// Exit code of the failing child process, looking through stage wrappers.
    pub fn exit_code(&self) -> Option<i32> {
        match self {
            YomiageError::Exit { code, .. } => Some(*code),
            YomiageError::Stage { source, .. } => source.exit_code(),
            _ => None,
        }
    }
}

/// Collapse whitespace and cap the length so tool output fits on one line.
fn excerpt(raw: &str) -> String {
    const MAX_CHARS: usize = 80;
    let flat = raw.split_whitespace().collect::<Vec<_>>().join(" ");
    if flat.is_empty() {
        return "<empty output>".to_string();
    }
    if flat.chars().count() <= MAX_CHARS {
        return flat;
    }
    let cut: String = flat.chars().take(MAX_CHARS).collect();
    format!("{cut}...")
}

// Type alias for convenience
pub type Result<T> = std::result::Result<T, YomiageError>;
