//! Progress narration for the terminal.
//!
//! Everything here goes to stderr. stdout is reserved for the audio path so
//! a calling script can capture it.

use crate::pipeline::types::JobReport;
use crate::stages::Stage;
use std::io::IsTerminal;
use std::path::Path;

const DIM: &str = "\x1b[2m";
const GREEN: &str = "\x1b[32m";
const YELLOW: &str = "\x1b[33m";
const RED: &str = "\x1b[31m";
const BOLD: &str = "\x1b[1m";
const RESET: &str = "\x1b[0m";

/// Writes human progress lines to stderr.
#[derive(Debug, Clone, Copy)]
pub struct Narrator {
    quiet: bool,
    color: bool,
}

impl Narrator {
    /// Narrator for the current terminal; colors only when stderr is a TTY.
    pub fn new(quiet: bool) -> Self {
        Self {
            quiet,
            color: std::io::stderr().is_terminal(),
        }
    }

    /// Narrator that prints nothing.
    pub fn quiet() -> Self {
        Self {
            quiet: true,
            color: false,
        }
    }

    fn paint(&self, color: &str, text: &str) -> String {
        if self.color {
            format!("{color}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    fn say(&self, line: &str) {
        if !self.quiet {
            eprintln!("{line}");
        }
    }

    pub fn job_started(&self, url: &str, project: &str) {
        self.say(&format!(
            "{} {} {}",
            self.paint(BOLD, "Narrating"),
            url,
            self.paint(DIM, &format!("(project {project})"))
        ));
    }

    pub fn stage_started(&self, stage: Stage) {
        self.say(&format!("{} {}...", self.paint(DIM, "→"), capitalize(&stage.to_string())));
    }

    pub fn stage_finished(&self, stage: Stage, detail: &str) {
        let label = capitalize(&stage.to_string());
        if detail.is_empty() {
            self.say(&format!("{} {label}", self.paint(GREEN, "✓")));
        } else {
            self.say(&format!("{} {label}: {detail}", self.paint(GREEN, "✓")));
        }
    }

    pub fn stage_skipped(&self, stage: Stage, reason: &str) {
        self.say(&format!(
            "{} {} skipped ({reason})",
            self.paint(YELLOW, "-"),
            capitalize(&stage.to_string())
        ));
    }

    pub fn artifacts(&self, report: &JobReport) {
        let line = |label: &str, path: &Path| {
            self.say(&format!("  {} {}", self.paint(DIM, label), path.display()));
        };
        self.say(&self.paint(GREEN, "Done."));
        if let Some(path) = &report.text_path {
            line("text:   ", path);
        }
        if let Some(path) = &report.title_path {
            line("title:  ", path);
        }
        if let Some(path) = &report.content_path {
            line("content:", path);
        }
        if let Some(path) = &report.audio_path {
            line("audio:  ", path);
        }
        if let Some(path) = &report.debug_root {
            line("debug:  ", path);
        }
    }

    /// One-line failure message. Printed even in quiet mode.
    pub fn failure(&self, message: &str) {
        eprintln!("{} {}", self.paint(RED, "Error:"), message);
    }
}

fn capitalize(text: &str) -> String {
    let mut chars = text.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("title translation"), "Title translation");
        assert_eq!(capitalize(""), "");
    }

    #[test]
    fn test_paint_without_color_is_plain() {
        let narrator = Narrator::quiet();
        assert_eq!(narrator.paint(GREEN, "ok"), "ok");

        let colored = Narrator {
            quiet: true,
            color: true,
        };
        assert_eq!(colored.paint(GREEN, "ok"), "\x1b[32mok\x1b[0m");
    }

    #[test]
    fn test_quiet_narrator_does_not_panic() {
        let narrator = Narrator::quiet();
        narrator.stage_started(Stage::Extraction);
        narrator.stage_skipped(Stage::Synthesis, "no narration text");
        narrator.artifacts(&JobReport::default());
    }
}
