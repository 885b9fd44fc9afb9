//! Article extraction stage.
//!
//! The extraction tool prints its result as a JSON object, but its stdout is
//! shared with whatever the tool (and its environment loader) chooses to log.
//! [`recover_json`] digs the object back out.

use super::DEBUG_DIR_FLAG;
use crate::error::{Result, YomiageError};
use crate::layout::url_host;
use crate::process::{CommandExecutor, ProcessSpec};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Readable article as reported by the extraction tool.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Article {
    pub title: String,
    pub content: String,
    #[serde(default)]
    pub domain: String,
    #[serde(default)]
    pub url: String,
}

impl Article {
    /// Fill `url` and `domain` from the requested URL when the tool left them out.
    fn with_source(mut self, requested_url: &str) -> Self {
        if self.url.trim().is_empty() {
            self.url = requested_url.to_string();
        }
        if self.domain.trim().is_empty() {
            self.domain = url_host(&self.url).to_string();
        }
        self
    }
}

/// Best-effort recovery of one JSON object from noisy tool output.
///
/// The object starts at the first `{` whose next non-whitespace character is
/// `"` (so `{` in log lines like `{pid 12}` are skipped) and ends at the last
/// `}` anywhere in the text. Fails with `Parse`, carrying the raw output,
/// when either boundary is missing or the span is not valid JSON. Output that
/// logs a keyed `{"...` fragment before the payload, or a `}` after it,
/// defeats the heuristic.
pub fn recover_json(raw: &str) -> Result<serde_json::Value> {
    let parse_error = |message: String| YomiageError::Parse {
        message,
        raw: raw.to_string(),
    };

    let start = raw
        .match_indices('{')
        .map(|(i, _)| i)
        .find(|&i| raw[i + 1..].trim_start().starts_with('"'))
        .ok_or_else(|| parse_error("no JSON object start".to_string()))?;

    let end = raw
        .rfind('}')
        .filter(|&end| end > start)
        .ok_or_else(|| parse_error("no JSON object end".to_string()))?;

    serde_json::from_str(&raw[start..=end]).map_err(|e| parse_error(e.to_string()))
}

/// Runs the extraction tool and turns its output into an [`Article`].
pub struct ArticleExtractor<'a, E: ?Sized> {
    executor: &'a E,
    command: &'a str,
}

impl<'a, E: CommandExecutor + ?Sized> ArticleExtractor<'a, E> {
    pub fn new(executor: &'a E, command: &'a str) -> Self {
        Self { executor, command }
    }

    /// `<command> <url> [--debug-dir <dir>]`, captured, no stdin.
    pub fn spec(&self, url: &str, debug_dir: Option<&Path>) -> ProcessSpec {
        let mut spec = ProcessSpec::new(self.command).arg(url);
        if let Some(dir) = debug_dir {
            spec = spec.args([DEBUG_DIR_FLAG.to_string(), dir.display().to_string()]);
        }
        spec
    }

    pub async fn extract(&self, url: &str, debug_dir: Option<&Path>) -> Result<Article> {
        let raw = self
            .executor
            .execute(&self.spec(url, debug_dir))
            .await?
            .into_text();

        let value = recover_json(&raw)
            .inspect_err(|_| tracing::debug!(%raw, "unrecoverable extraction output"))?;
        let article: Article =
            serde_json::from_value(value).map_err(|e| YomiageError::Parse {
                message: format!("not an article: {e}"),
                raw: raw.clone(),
            })?;

        tracing::debug!(title = %article.title, chars = article.content.len(), "article extracted");
        Ok(article.with_source(url))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::process::mock::MockCommandExecutor;
    use serde_json::json;
    use std::path::PathBuf;

    #[test]
    fn test_recovers_object_between_log_lines() {
        let raw = "[env] booting\n{ \"title\": \"T\", \"content\": \"C\" }\ntrailer";
        let value = recover_json(raw).unwrap();
        assert_eq!(value, json!({"title": "T", "content": "C"}));
    }

    #[test]
    fn test_skips_braces_not_followed_by_a_key() {
        let raw = "worker {pid 42} ready\n{\n  \"title\": \"T\",\n  \"content\": \"C\"\n}";
        let value = recover_json(raw).unwrap();
        assert_eq!(value["title"], "T");
    }

    #[test]
    fn test_nested_objects_end_at_last_brace() {
        let raw = r#"{"title": "T", "content": "C", "meta": {"words": 3}} "#;
        let value = recover_json(raw).unwrap();
        assert_eq!(value["meta"]["words"], 3);
    }

    #[test]
    fn test_no_keyed_brace_is_parse_error() {
        let raw = "loading {config}\n{ }\nno payload here";
        let err = recover_json(raw).unwrap_err();
        match err {
            YomiageError::Parse { message, raw: kept } => {
                assert!(message.contains("start"));
                assert_eq!(kept, raw);
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[test]
    fn test_missing_closing_brace_is_parse_error() {
        let err = recover_json("{\"title\": \"T\"").unwrap_err();
        assert!(matches!(err, YomiageError::Parse { .. }));
    }

    #[test]
    fn test_closing_brace_only_before_start_is_parse_error() {
        let err = recover_json("} then {\"title\": ").unwrap_err();
        assert!(matches!(err, YomiageError::Parse { .. }));
    }

    #[test]
    fn test_trailing_brace_in_log_breaks_recovery() {
        let raw = "{\"title\": \"T\"}\ndone {ok}";
        let err = recover_json(raw).unwrap_err();
        assert!(err.to_string().contains("done {ok}"));
    }

    #[test]
    fn test_spec_appends_debug_dir_flag() {
        let executor = MockCommandExecutor::new();
        let extractor = ArticleExtractor::new(&executor, "article-extract");

        let spec = extractor.spec("https://example.com/post", None);
        assert_eq!(spec.args, vec!["https://example.com/post"]);
        assert!(spec.capture_stdout);
        assert_eq!(spec.stdin, None);

        let dir = PathBuf::from("/tmp/dbg/extraction");
        let spec = extractor.spec("https://example.com/post", Some(&dir));
        assert_eq!(
            spec.args,
            vec!["https://example.com/post", "--debug-dir", "/tmp/dbg/extraction"]
        );
    }

    #[tokio::test]
    async fn test_extract_builds_article_and_fills_source() {
        let executor = MockCommandExecutor::new()
            .with_response("[dotenv@16.4.5] injecting env\n{\"title\": \"Hello\", \"content\": \"Body\"}");
        let extractor = ArticleExtractor::new(&executor, "article-extract");

        let article = extractor
            .extract("https://www.example.com/post", None)
            .await
            .unwrap();

        assert_eq!(article.title, "Hello");
        assert_eq!(article.content, "Body");
        assert_eq!(article.url, "https://www.example.com/post");
        assert_eq!(article.domain, "www.example.com");
        assert_eq!(executor.call(0).unwrap().command, "article-extract");
    }

    #[tokio::test]
    async fn test_extract_keeps_reported_domain_and_url() {
        let executor = MockCommandExecutor::new().with_response(
            r#"{"title": "T", "content": "C", "domain": "news.example.org", "url": "https://news.example.org/a"}"#,
        );
        let extractor = ArticleExtractor::new(&executor, "article-extract");

        let article = extractor.extract("https://short.link/x", None).await.unwrap();
        assert_eq!(article.domain, "news.example.org");
        assert_eq!(article.url, "https://news.example.org/a");
    }

    #[tokio::test]
    async fn test_extract_without_article_fields_is_parse_error() {
        let executor = MockCommandExecutor::new().with_response(r#"{"status": "ok"}"#);
        let extractor = ArticleExtractor::new(&executor, "article-extract");

        let err = extractor.extract("https://example.com", None).await.unwrap_err();
        match err {
            YomiageError::Parse { message, raw } => {
                assert!(message.contains("not an article"));
                assert!(raw.contains("status"));
            }
            other => panic!("expected Parse, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_extract_propagates_exit_error() {
        let executor = MockCommandExecutor::new().with_exit("article-extract", 2);
        let extractor = ArticleExtractor::new(&executor, "article-extract");

        let err = extractor.extract("https://example.com", None).await.unwrap_err();
        assert_eq!(err.exit_code(), Some(2));
    }
}
