//! Narration application entry point.
//!
//! Wires the immutable config, the system process executor and the terminal
//! narrator into one pipeline run:
//! extract → translate → synthesize → persist

use crate::config::Config;
use crate::error::{Result, YomiageError};
use crate::layout::LayoutRequest;
use crate::output::Narrator;
use crate::pipeline::{JobReport, Pipeline, PipelineJob};
use crate::process::SystemCommandExecutor;

/// Run one narration job for `url`.
///
/// # Arguments
/// * `config` - Fully resolved configuration (file, environment and CLI)
/// * `url` - Article URL; `None` is a usage error
/// * `request` - Paths and names given on the command line
/// * `quiet` - Suppress progress output
///
/// # Returns
/// The artifact paths on success, or the first stage error
pub async fn run_narrate_command(
    config: &Config,
    url: Option<&str>,
    request: &LayoutRequest,
    quiet: bool,
) -> Result<JobReport> {
    let url = url.ok_or_else(|| YomiageError::Usage {
        message: "missing article URL (see --help)".to_string(),
    })?;

    let job = PipelineJob::start(url, request, config)?;
    tracing::debug!(layout = ?job.layout, "job layout resolved");

    let executor = SystemCommandExecutor::new();
    Pipeline::new(config, &executor, Narrator::new(quiet))
        .run(&job)
        .await
}
