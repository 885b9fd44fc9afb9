use crate::defaults;
use crate::error::{Result, YomiageError};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

/// Root configuration structure
///
/// Built once at startup (file → environment → CLI) and then only shared by
/// reference; nothing mutates it while a job runs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct Config {
    pub tools: ToolsConfig,
    pub tts: TtsConfig,
    pub translation: TranslationConfig,
    pub output: OutputConfig,
}

/// External tool commands
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct ToolsConfig {
    pub extract: String,
    pub translate: String,
    pub tts_google: String,
    pub tts_openai: String,
}

/// Speech synthesis configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TtsConfig {
    pub engine: TtsEngine,
    /// Voice model, only passed to the OpenAI engine
    pub openai_model: String,
}

/// Translation configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct TranslationConfig {
    /// Lines of translator output starting with this prefix are dropped
    pub banner_prefix: String,
    /// Translate title and content concurrently
    pub parallel: bool,
}

/// Output location configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Default)]
#[serde(default)]
pub struct OutputConfig {
    pub base_dir: Option<PathBuf>,
}

/// Speech synthesis engine
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
#[cfg_attr(feature = "cli", derive(clap::ValueEnum))]
#[serde(rename_all = "lowercase")]
pub enum TtsEngine {
    #[default]
    Google,
    Openai,
}

impl fmt::Display for TtsEngine {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            TtsEngine::Google => write!(f, "google"),
            TtsEngine::Openai => write!(f, "openai"),
        }
    }
}

impl FromStr for TtsEngine {
    type Err = String;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "google" => Ok(TtsEngine::Google),
            "openai" => Ok(TtsEngine::Openai),
            other => Err(format!("unknown TTS engine '{other}' (expected google or openai)")),
        }
    }
}

impl Default for ToolsConfig {
    fn default() -> Self {
        Self {
            extract: defaults::EXTRACT_COMMAND.to_string(),
            translate: defaults::TRANSLATE_COMMAND.to_string(),
            tts_google: defaults::GOOGLE_TTS_COMMAND.to_string(),
            tts_openai: defaults::OPENAI_TTS_COMMAND.to_string(),
        }
    }
}

impl Default for TtsConfig {
    fn default() -> Self {
        Self {
            engine: TtsEngine::Google,
            openai_model: defaults::OPENAI_TTS_MODEL.to_string(),
        }
    }
}

impl Default for TranslationConfig {
    fn default() -> Self {
        Self {
            banner_prefix: defaults::ENV_BANNER_PREFIX.to_string(),
            parallel: false,
        }
    }
}

impl ToolsConfig {
    /// Synthesis command for the given engine.
    pub fn synthesis(&self, engine: TtsEngine) -> &str {
        match engine {
            TtsEngine::Google => &self.tts_google,
            TtsEngine::Openai => &self.tts_openai,
        }
    }
}

impl Config {
    /// Load configuration from a TOML file
    ///
    /// Missing fields use default values.
    pub fn load(path: &Path) -> Result<Self> {
        let contents = fs::read_to_string(path).map_err(|e| {
            if e.kind() == std::io::ErrorKind::NotFound {
                YomiageError::ConfigFileNotFound {
                    path: path.display().to_string(),
                }
            } else {
                YomiageError::Io(e)
            }
        })?;
        let config: Config = toml::from_str(&contents)?;
        Ok(config)
    }

    /// Load configuration from a file or return defaults if it doesn't exist
    ///
    /// Invalid TOML is still an error.
    pub fn load_or_default(path: &Path) -> Result<Self> {
        match Self::load(path) {
            Err(YomiageError::ConfigFileNotFound { .. }) => Ok(Self::default()),
            other => other,
        }
    }

    /// Apply environment variable overrides
    ///
    /// Supported environment variables:
    /// - YOMIAGE_TTS_ENGINE → tts.engine
    /// - YOMIAGE_OPENAI_MODEL → tts.openai_model
    /// - YOMIAGE_BASE_DIR → output.base_dir
    pub fn with_env_overrides(mut self) -> Self {
        if let Ok(engine) = std::env::var("YOMIAGE_TTS_ENGINE")
            && !engine.is_empty()
        {
            match engine.parse() {
                Ok(engine) => self.tts.engine = engine,
                Err(e) => tracing::warn!("ignoring YOMIAGE_TTS_ENGINE: {e}"),
            }
        }

        if let Ok(model) = std::env::var("YOMIAGE_OPENAI_MODEL")
            && !model.is_empty()
        {
            self.tts.openai_model = model;
        }

        if let Ok(dir) = std::env::var("YOMIAGE_BASE_DIR")
            && !dir.is_empty()
        {
            self.output.base_dir = Some(PathBuf::from(dir));
        }

        self
    }

    /// Get the default configuration file path
    ///
    /// Returns ~/.config/yomiage/config.toml on Linux, or `None` when the
    /// platform has no config directory.
    pub fn default_path() -> Option<PathBuf> {
        dirs::config_dir().map(|dir| dir.join("yomiage").join("config.toml"))
    }

    /// Synthesis command for the configured engine.
    pub fn synthesis_command(&self) -> &str {
        self.tools.synthesis(self.tts.engine)
    }
}
