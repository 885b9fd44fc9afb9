//! Stage wrappers around the external tools.
//!
//! Each wrapper turns typed input into a [`ProcessSpec`](crate::process::ProcessSpec),
//! runs it through a [`CommandExecutor`](crate::process::CommandExecutor) and
//! turns the raw result back into typed output.

pub mod extract;
pub mod synthesize;
pub mod translate;

pub use extract::{Article, ArticleExtractor, recover_json};
pub use synthesize::{AudioSynthesizer, Synthesis};
pub use translate::{Translator, strip_banner_lines, title_prompt};

use std::fmt;

/// Flag every tool accepts for its raw per-stage transcripts.
pub const DEBUG_DIR_FLAG: &str = "--debug-dir";

/// The four pipeline stages, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Stage {
    Extraction,
    TitleTranslation,
    ContentTranslation,
    Synthesis,
}

impl Stage {
    pub const ALL: [Stage; 4] = [
        Stage::Extraction,
        Stage::TitleTranslation,
        Stage::ContentTranslation,
        Stage::Synthesis,
    ];

    /// Subdirectory of the debug root this stage's tool writes into.
    pub fn dir_name(self) -> &'static str {
        match self {
            Stage::Extraction => "extraction",
            Stage::TitleTranslation => "title-translation",
            Stage::ContentTranslation => "content-translation",
            Stage::Synthesis => "synthesis",
        }
    }
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Stage::Extraction => write!(f, "extraction"),
            Stage::TitleTranslation => write!(f, "title translation"),
            Stage::ContentTranslation => write!(f, "content translation"),
            Stage::Synthesis => write!(f, "synthesis"),
        }
    }
}
