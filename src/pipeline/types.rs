//! Data types flowing between pipeline stages.

use crate::config::Config;
use crate::error::{Result, YomiageError};
use crate::layout::{JobLayout, LayoutRequest};
use crate::stages::Article;
use chrono::{DateTime, Local};
use std::path::PathBuf;

/// One narration job: the URL plus every path it will touch.
///
/// Built once before the first stage runs and never changed afterwards.
#[derive(Debug, Clone)]
pub struct PipelineJob {
    pub url: String,
    pub layout: JobLayout,
    pub started_at: DateTime<Local>,
}

impl PipelineJob {
    /// Create a job starting now.
    pub fn start(url: &str, request: &LayoutRequest, config: &Config) -> Result<Self> {
        Self::new(url, request, config, Local::now())
    }

    /// Create a job with an explicit start time (all generated names use it).
    pub fn new(
        url: &str,
        request: &LayoutRequest,
        config: &Config,
        started_at: DateTime<Local>,
    ) -> Result<Self> {
        let url = url.trim();
        if url.is_empty() {
            return Err(YomiageError::Usage {
                message: "article URL must not be empty".to_string(),
            });
        }

        let layout = JobLayout::resolve(
            url,
            request,
            config.output.base_dir.as_deref(),
            &started_at,
        );
        Ok(Self {
            url: url.to_string(),
            layout,
            started_at,
        })
    }

    pub fn project_name(&self) -> &str {
        &self.layout.project_name
    }
}

/// Article after both translation calls.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TranslatedArticle {
    pub title: String,
    pub content: String,
    pub source: Article,
}

impl TranslatedArticle {
    /// Text handed to the synthesis tool: title and body, blank parts left out.
    pub fn narration(&self) -> String {
        [self.title.trim(), self.content.trim()]
            .into_iter()
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n")
    }

    /// Contents of the combined text artifact.
    pub fn text_artifact(&self) -> String {
        format!("Title: {}\n\n{}", self.title, self.content)
    }
}

/// Where a finished job left its artifacts.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct JobReport {
    pub text_path: Option<PathBuf>,
    pub title_path: Option<PathBuf>,
    pub content_path: Option<PathBuf>,
    /// `None` when synthesis was skipped.
    pub audio_path: Option<PathBuf>,
    pub debug_root: Option<PathBuf>,
}
