//! System diagnostics and dependency checking.
//!
//! Verifies that the external tools named in the configuration can be found.
//! The tools are looked up on `PATH` rather than run, since running them
//! would start real extraction or synthesis work.

use crate::config::{Config, TtsEngine};
use owo_colors::OwoColorize;
use std::path::PathBuf;

/// Result of a dependency check.
#[derive(Debug, PartialEq)]
pub enum CheckResult {
    /// Tool resolved to this executable
    Ok(PathBuf),
    /// Tool is not found
    NotFound,
    /// Tool lookup failed for another reason
    Warning(String),
}

/// Resolve a command the way the process spawner will.
pub fn check_command(command: &str) -> CheckResult {
    match which::which(command) {
        Ok(path) => CheckResult::Ok(path),
        Err(which::Error::CannotFindBinaryPath) => CheckResult::NotFound,
        Err(e) => CheckResult::Warning(format!("Error checking '{}': {}", command, e)),
    }
}

/// Tools the current configuration would run, labelled for display.
///
/// The synthesis tool of the engine not in use is listed as optional.
pub fn required_tools(config: &Config) -> Vec<(&'static str, &str, bool)> {
    let engine = config.tts.engine;
    vec![
        ("extraction", config.tools.extract.as_str(), true),
        ("translation", config.tools.translate.as_str(), true),
        (
            "synthesis (google)",
            config.tools.tts_google.as_str(),
            engine == TtsEngine::Google,
        ),
        (
            "synthesis (openai)",
            config.tools.tts_openai.as_str(),
            engine == TtsEngine::Openai,
        ),
    ]
}

/// Run all dependency checks and print results.
///
/// Returns true when every tool the configured engine needs is available.
pub fn check_dependencies(config: &Config) -> bool {
    println!("yomiage {}", crate::version_string());
    println!("Checking external tools...\n");

    let mut all_ok = true;
    for (label, command, required) in required_tools(config) {
        print!("{label} [{command}]: ");
        match check_command(command) {
            CheckResult::Ok(path) => println!("{} {}", "✓ OK".green(), path.display()),
            CheckResult::NotFound if required => {
                all_ok = false;
                println!("{}", "✗ NOT FOUND".red());
            }
            CheckResult::NotFound => println!("{}", "- not found (engine not selected)".dimmed()),
            CheckResult::Warning(msg) => {
                if required {
                    all_ok = false;
                }
                println!("{} {}", "⚠ WARNING:".yellow(), msg);
            }
        }
    }

    println!();
    if all_ok {
        println!("All required tools found.");
    } else {
        println!("Some required tools are missing. Set their commands under [tools] in the config file.");
    }
    all_ok
}
