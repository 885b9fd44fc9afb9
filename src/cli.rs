//! Command-line interface for yomiage
//!
//! Provides argument parsing using clap derive macros.

use crate::config::TtsEngine;
use crate::layout::{DebugRequest, LayoutRequest};
use clap::Parser;
use clap_complete::Shell;
use std::path::PathBuf;

/// Turn a web article into Japanese narration
#[derive(Parser, Debug)]
#[command(name = "yomiage", version, about = "Turn a web article into Japanese narration")]
pub struct Cli {
    /// Article URL
    #[arg(value_name = "URL")]
    pub url: Option<String>,

    /// Project name (default: derived from the URL host and time)
    #[arg(short, long, value_name = "NAME")]
    pub output: Option<String>,

    /// Audio output path
    #[arg(short, long = "mp3-output", value_name = "PATH")]
    pub mp3_output: Option<PathBuf>,

    /// Write the translated title to this file
    #[arg(short, long = "title-txt", value_name = "PATH")]
    pub title_txt: Option<PathBuf>,

    /// Write the translated content to this file
    #[arg(short, long = "content-txt", value_name = "PATH")]
    pub content_txt: Option<PathBuf>,

    /// Write "Title: ..." plus content to this file
    #[arg(long = "txt-output", value_name = "PATH")]
    pub txt_output: Option<PathBuf>,

    /// Keep raw per-stage transcripts (default location: <project>/debug)
    ///
    /// A path must be attached with `=` so a following URL is never taken as the path.
    #[arg(
        short,
        long = "debug-dir",
        value_name = "PATH",
        num_args = 0..=1,
        require_equals = true
    )]
    pub debug_dir: Option<Option<PathBuf>>,

    /// Speech synthesis engine
    #[arg(long, value_enum, value_name = "ENGINE")]
    pub tts: Option<TtsEngine>,

    /// Root directory for generated project folders
    #[arg(long = "base-dir", value_name = "PATH")]
    pub base_dir: Option<PathBuf>,

    /// Path to configuration file
    #[arg(long, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Suppress progress output
    #[arg(short, long)]
    pub quiet: bool,

    /// Verbose logging (-v: debug, -vv: trace)
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub verbose: u8,

    /// Check that the configured external tools are installed
    #[arg(long)]
    pub check: bool,

    /// Generate shell completions
    #[arg(long, value_name = "SHELL")]
    pub completions: Option<Shell>,
}

impl Cli {
    /// Paths and names given on the command line, for the path resolver.
    pub fn layout_request(&self) -> LayoutRequest {
        let debug = match &self.debug_dir {
            None => DebugRequest::Off,
            Some(None) => DebugRequest::Auto,
            Some(Some(path)) => DebugRequest::At(path.clone()),
        };
        LayoutRequest {
            name: self.output.clone(),
            base_dir: self.base_dir.clone(),
            audio_output: self.mp3_output.clone(),
            text_output: self.txt_output.clone(),
            title_output: self.title_txt.clone(),
            content_output: self.content_txt.clone(),
            debug,
        }
    }
}
