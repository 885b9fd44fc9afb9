//! Translation stage.

use super::DEBUG_DIR_FLAG;
use crate::defaults;
use crate::error::Result;
use crate::process::{CommandExecutor, ProcessSpec};
use std::path::Path;

/// Wrap an article title in the instruction the translation tool expects.
pub fn title_prompt(title: &str) -> String {
    format!("{} {}", defaults::TITLE_PROMPT, title)
}

/// Drop every line that starts with `prefix`, then trim what is left.
///
/// Environment loaders print their banner wherever they get initialised,
/// not only on the first line.
pub fn strip_banner_lines(output: &str, prefix: &str) -> String {
    if prefix.is_empty() {
        return output.trim().to_string();
    }
    output
        .lines()
        .filter(|line| !line.starts_with(prefix))
        .collect::<Vec<_>>()
        .join("\n")
        .trim()
        .to_string()
}

/// Runs the translation tool over stdin.
pub struct Translator<'a, E: ?Sized> {
    executor: &'a E,
    command: &'a str,
    banner_prefix: &'a str,
}

impl<'a, E: CommandExecutor + ?Sized> Translator<'a, E> {
    pub fn new(executor: &'a E, command: &'a str, banner_prefix: &'a str) -> Self {
        Self {
            executor,
            command,
            banner_prefix,
        }
    }

    /// `<command> [--debug-dir <dir>]`, captured, text on stdin.
    pub fn spec(&self, text: &str, debug_dir: Option<&Path>) -> ProcessSpec {
        let mut spec = ProcessSpec::new(self.command).stdin(text);
        if let Some(dir) = debug_dir {
            spec = spec.args([DEBUG_DIR_FLAG.to_string(), dir.display().to_string()]);
        }
        spec
    }

    /// Translate `text`; blank input yields an empty string without running the tool.
    pub async fn translate(&self, text: &str, debug_dir: Option<&Path>) -> Result<String> {
        if text.trim().is_empty() {
            tracing::debug!("nothing to translate, skipping {}", self.command);
            return Ok(String::new());
        }

        let raw = self
            .executor
            .execute(&self.spec(text, debug_dir))
            .await?
            .into_text();
        Ok(strip_banner_lines(&raw, self.banner_prefix))
    }

    /// Translate an article title, wrapped in the title instruction.
    pub async fn translate_title(&self, title: &str, debug_dir: Option<&Path>) -> Result<String> {
        if title.trim().is_empty() {
            return Ok(String::new());
        }
        self.translate(&title_prompt(title), debug_dir).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockCommandExecutor;
    use std::path::PathBuf;

    const BANNER: &str = "[dotenv@";

    #[test]
    fn test_title_prompt() {
        assert_eq!(
            title_prompt("Rust 2024 released"),
            "translate this title to Japanese: Rust 2024 released"
        );
    }

    #[test]
    fn test_strip_banner_on_first_line() {
        let out = "[dotenv@16.4.5] injecting env (2) from .env\nこんにちは";
        assert_eq!(strip_banner_lines(out, BANNER), "こんにちは");
    }

    #[test]
    fn test_strip_banner_anywhere() {
        let out = "一行目\n[dotenv@16.4.5] injecting env\n二行目\n[dotenv@16.4.5] tip: use dotenvx\n";
        assert_eq!(strip_banner_lines(out, BANNER), "一行目\n二行目");
    }

    #[test]
    fn test_strip_banner_keeps_indented_or_inline_mentions() {
        let out = "  [dotenv@ is quoted here\ntext mentioning [dotenv@1]";
        assert_eq!(strip_banner_lines(out, BANNER), out.trim());
    }

    #[test]
    fn test_strip_banner_only_banner_is_empty() {
        assert_eq!(strip_banner_lines("[dotenv@1] x\n[dotenv@1] y", BANNER), "");
    }

    #[test]
    fn test_empty_prefix_only_trims() {
        assert_eq!(strip_banner_lines("  a\nb  ", ""), "a\nb");
    }

    #[test]
    fn test_spec_pipes_text_and_appends_debug_dir() {
        let executor = MockCommandExecutor::new();
        let translator = Translator::new(&executor, "translate-ja", BANNER);

        let dir = PathBuf::from("/tmp/dbg/content-translation");
        let spec = translator.spec("body", Some(&dir));
        assert_eq!(spec.command, "translate-ja");
        assert_eq!(spec.args, vec!["--debug-dir", "/tmp/dbg/content-translation"]);
        assert_eq!(spec.stdin.as_deref(), Some("body"));
        assert!(spec.capture_stdout);
    }

    #[tokio::test]
    async fn test_translate_strips_banner_from_output() {
        let executor =
            MockCommandExecutor::new().with_response("[dotenv@16.4.5] injecting env\n\n  翻訳  \n");
        let translator = Translator::new(&executor, "translate-ja", BANNER);

        let result = translator.translate("translation", None).await.unwrap();
        assert_eq!(result, "翻訳");
        assert_eq!(executor.call(0).unwrap().stdin.as_deref(), Some("translation"));
    }

    #[tokio::test]
    async fn test_empty_input_spawns_nothing() {
        let executor = MockCommandExecutor::new();
        let translator = Translator::new(&executor, "translate-ja", BANNER);

        assert_eq!(translator.translate("", None).await.unwrap(), "");
        assert_eq!(translator.translate(" \n ", None).await.unwrap(), "");
        assert_eq!(translator.translate_title("", None).await.unwrap(), "");
        assert_eq!(executor.call_count(), 0);
    }

    #[tokio::test]
    async fn test_translate_title_wraps_instruction() {
        let executor = MockCommandExecutor::new().with_response("タイトル");
        let translator = Translator::new(&executor, "translate-ja", BANNER);

        let result = translator.translate_title("Title", None).await.unwrap();
        assert_eq!(result, "タイトル");
        assert_eq!(
            executor.call(0).unwrap().stdin.as_deref(),
            Some("translate this title to Japanese: Title")
        );
    }

    #[tokio::test]
    async fn test_translate_propagates_exit_error() {
        let executor = MockCommandExecutor::new().with_exit("translate-ja", 1);
        let translator = Translator::new(&executor, "translate-ja", BANNER);

        let err = translator.translate("text", None).await.unwrap_err();
        assert_eq!(err.exit_code(), Some(1));
    }
}
