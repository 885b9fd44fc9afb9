//! Default configuration constants for yomiage.
//!
//! Shared by the configuration types, the path resolver and the stage
//! wrappers so every component agrees on tool names and layout rules.

/// Default extraction tool command.
///
/// Called as `<cmd> <url> [--debug-dir <path>]`; prints the article as a
/// JSON object, possibly surrounded by log lines.
pub const EXTRACT_COMMAND: &str = "article-extract";

/// Default translation tool command.
///
/// Reads text on stdin and prints the Japanese translation on stdout.
pub const TRANSLATE_COMMAND: &str = "translate-ja";

/// Default synthesis tool for the Google engine.
pub const GOOGLE_TTS_COMMAND: &str = "tts-google";

/// Default synthesis tool for the OpenAI engine.
pub const OPENAI_TTS_COMMAND: &str = "tts-openai";

/// Default voice model passed to the OpenAI synthesis tool.
pub const OPENAI_TTS_MODEL: &str = "gpt-4o-mini-tts";

/// Banner printed by the dotenv loader the tools are wrapped with.
///
/// Lines starting with this prefix are diagnostics, not translation output.
pub const ENV_BANNER_PREFIX: &str = "[dotenv@";

/// Instruction prepended to the article title before translation.
pub const TITLE_PROMPT: &str = "translate this title to Japanese:";

/// Output root used when neither `--base-dir` nor the config sets one.
pub const OUTPUT_DIR: &str = "output";

/// Name of the auto-generated debug root inside the project directory.
pub const DEBUG_DIR_NAME: &str = "debug";

/// Maximum length (in characters) of a sanitized file or project name.
pub const MAX_NAME_LEN: usize = 50;

/// Characters that are never allowed in generated file names.
pub const ILLEGAL_NAME_CHARS: &[char] = &['<', '>', ':', '"', '/', '\\', '|', '?', '*'];

/// `chrono` format of the per-job timestamp (`YYYYMMDD_HHMMSS`).
pub const TIMESTAMP_FORMAT: &str = "%Y%m%d_%H%M%S";

/// Extension of the combined text artifact.
pub const TEXT_EXTENSION: &str = "txt";

/// Extension of the audio artifact.
pub const AUDIO_EXTENSION: &str = "mp3";
