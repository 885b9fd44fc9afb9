//! Output path resolution.
//!
//! All paths a job touches are decided once, up front, into an immutable
//! [`JobLayout`]. Every component reads its paths from that value instead of
//! recomputing directories or timestamps.
//!
//! Precedence, highest first:
//! 1. explicit path from the caller, used verbatim
//! 2. auto path under `--base-dir`
//! 3. auto path under `output.base_dir` from the config file
//! 4. auto path under `./output`

use crate::defaults;
use crate::error::Result;
use crate::stages::Stage;
use chrono::{DateTime, Local};
use std::fs;
use std::path::{Path, PathBuf};

/// Strip characters that are illegal in file names, collapse whitespace
/// runs into `_` and cap the result at 50 characters.
pub fn sanitize(name: &str) -> String {
    let cleaned: String = name
        .chars()
        .filter(|c| !defaults::ILLEGAL_NAME_CHARS.contains(c))
        .filter(|c| c.is_whitespace() || !c.is_control())
        .collect();

    cleaned
        .split_whitespace()
        .collect::<Vec<_>>()
        .join("_")
        .chars()
        .take(defaults::MAX_NAME_LEN)
        .collect()
}

/// Host part of a URL, without scheme, credentials, port or path.
pub fn url_host(url: &str) -> &str {
    let rest = url.split_once("://").map_or(url, |(_, rest)| rest);
    let authority = rest.split(['/', '?', '#']).next().unwrap_or(rest);
    let host = authority.rsplit_once('@').map_or(authority, |(_, host)| host);
    host.split(':').next().unwrap_or(host)
}

/// Project name for a job that wasn't given one: `example_com_142501`.
pub fn project_name_from_url(url: &str, now: &DateTime<Local>) -> String {
    let host = url_host(url);
    let host = host.strip_prefix("www.").unwrap_or(host);
    let stem: String = host
        .chars()
        .map(|c| if c.is_alphanumeric() { c } else { '_' })
        .collect();
    let stem = sanitize(&stem);
    let stem = if stem.is_empty() {
        "article".to_string()
    } else {
        // leave room for the `_HHMMSS` suffix
        stem.chars().take(defaults::MAX_NAME_LEN - 7).collect()
    };
    format!("{}_{}", stem, now.format("%H%M%S"))
}

/// Where the per-stage debug transcripts go.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub enum DebugRequest {
    #[default]
    Off,
    /// `<project dir>/debug`
    Auto,
    At(PathBuf),
}

/// Paths and names supplied by the caller; anything left `None` is generated.
#[derive(Debug, Clone, Default)]
pub struct LayoutRequest {
    pub name: Option<String>,
    pub base_dir: Option<PathBuf>,
    pub audio_output: Option<PathBuf>,
    pub text_output: Option<PathBuf>,
    pub title_output: Option<PathBuf>,
    pub content_output: Option<PathBuf>,
    pub debug: DebugRequest,
}

/// Every path one job reads or writes, resolved once at job start.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct JobLayout {
    pub project_name: String,
    /// `YYYYMMDD_HHMMSS`, shared by every generated file name of the job.
    pub timestamp: String,
    pub project_dir: PathBuf,
    /// Combined `Title: ...` text artifact.
    pub text_path: Option<PathBuf>,
    pub title_path: Option<PathBuf>,
    pub content_path: Option<PathBuf>,
    pub audio_path: PathBuf,
    pub debug_root: Option<PathBuf>,
}

impl JobLayout {
    /// Resolve all paths for a job on `url` started at `now`.
    ///
    /// `config_root` is `output.base_dir` from the config file; `--base-dir`
    /// in `request` wins over it. Nothing is created on disk here.
    pub fn resolve(
        url: &str,
        request: &LayoutRequest,
        config_root: Option<&Path>,
        now: &DateTime<Local>,
    ) -> Self {
        let timestamp = now.format(defaults::TIMESTAMP_FORMAT).to_string();

        let project_name = request
            .name
            .as_deref()
            .map(sanitize)
            .filter(|name| !name.is_empty())
            .unwrap_or_else(|| project_name_from_url(url, now));

        let root = request
            .base_dir
            .as_deref()
            .or(config_root)
            .map_or_else(|| PathBuf::from(defaults::OUTPUT_DIR), Path::to_path_buf);
        let project_dir = root.join(&project_name);

        let auto_path = |ext: &str| project_dir.join(format!("{project_name}_{timestamp}.{ext}"));

        let separate_text = request.title_output.is_some() || request.content_output.is_some();
        let text_path = match &request.text_output {
            Some(path) => Some(path.clone()),
            None if separate_text => None,
            None => Some(auto_path(defaults::TEXT_EXTENSION)),
        };

        let audio_path = request
            .audio_output
            .clone()
            .unwrap_or_else(|| auto_path(defaults::AUDIO_EXTENSION));

        let debug_root = match &request.debug {
            DebugRequest::Off => None,
            DebugRequest::Auto => Some(project_dir.join(defaults::DEBUG_DIR_NAME)),
            DebugRequest::At(path) => Some(path.clone()),
        };

        Self {
            project_name,
            timestamp,
            text_path,
            title_path: request.title_output.clone(),
            content_path: request.content_output.clone(),
            audio_path,
            debug_root,
            project_dir,
        }
    }

    /// Debug directory for one stage, if debugging is on.
    pub fn debug_dir(&self, stage: Stage) -> Option<PathBuf> {
        self.debug_root
            .as_ref()
            .map(|root| root.join(stage.dir_name()))
    }

    /// Create every directory the job will write into.
    ///
    /// Existing directories and their contents are left alone, so reruns
    /// into the same debug root keep earlier transcripts.
    pub fn prepare(&self) -> Result<()> {
        let artifacts = [
            self.text_path.as_deref(),
            self.title_path.as_deref(),
            self.content_path.as_deref(),
            Some(self.audio_path.as_path()),
        ];
        for path in artifacts.into_iter().flatten() {
            if let Some(parent) = path.parent()
                && !parent.as_os_str().is_empty()
            {
                fs::create_dir_all(parent)?;
            }
        }

        for stage in Stage::ALL {
            if let Some(dir) = self.debug_dir(stage) {
                fs::create_dir_all(&dir)?;
            }
        }
        Ok(())
    }
}
