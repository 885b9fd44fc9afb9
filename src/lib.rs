//! yomiage - Japanese narration for web articles
//!
//! Chains three external tools (article extraction, translation, speech
//! synthesis) into one fail-fast pipeline.

// Enforce error handling discipline
#![warn(clippy::unwrap_used)]
#![warn(clippy::expect_used)]
#![warn(clippy::let_underscore_must_use)]

pub mod app;
#[cfg(feature = "cli")]
pub mod cli;
pub mod config;
pub mod defaults;
#[cfg(feature = "cli")]
pub mod diagnostics;
pub mod error;
pub mod layout;
pub mod output;
pub mod pipeline;
pub mod process;
pub mod stages;

// Process seam (ProcessSpec → executor → StageResult)
pub use process::{CommandExecutor, ProcessSpec, StageOutput, StageResult, SystemCommandExecutor};

// Pipeline
pub use pipeline::{JobReport, Pipeline, PipelineJob, TranslatedArticle};

// Stages
pub use stages::{Article, ArticleExtractor, AudioSynthesizer, Stage, Synthesis, Translator};

// Paths
pub use layout::{DebugRequest, JobLayout, LayoutRequest, sanitize};

// Error handling
pub use error::{Result, YomiageError};

// Config
pub use config::{Config, TtsEngine};

/// Build version string with optional git commit hash.
///
/// Returns `"0.1.0+abc1234"` when git hash is available, `"0.1.0"` otherwise.
pub fn version_string() -> String {
    let version = env!("CARGO_PKG_VERSION");
    match option_env!("GIT_HASH") {
        Some(hash) if !hash.is_empty() => format!("{}+{}", version, hash),
        _ => version.to_string(),
    }
}
