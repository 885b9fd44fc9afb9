use anyhow::Result;
use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;
use yomiage::app::run_narrate_command;
use yomiage::cli::Cli;
use yomiage::config::{Config, TtsEngine};
use yomiage::diagnostics::check_dependencies;
use yomiage::output::Narrator;

#[tokio::main]
async fn main() {
    // Usage errors exit 1 like every other failure; --help/--version exit 0.
    let cli = match Cli::try_parse() {
        Ok(cli) => cli,
        Err(e) if !e.use_stderr() => e.exit(),
        Err(e) => {
            eprint!("{e}");
            std::process::exit(1);
        }
    };

    let quiet = cli.quiet;
    if let Err(e) = run(cli).await {
        Narrator::new(quiet).failure(&e.to_string());
        std::process::exit(1);
    }
}

async fn run(cli: Cli) -> Result<()> {
    init_tracing(cli.verbose);

    if let Some(shell) = cli.completions {
        clap_complete::generate(shell, &mut Cli::command(), "yomiage", &mut std::io::stdout());
        return Ok(());
    }

    let config = load_config(cli.config.as_deref(), cli.tts)?;

    if cli.check {
        if !check_dependencies(&config) {
            std::process::exit(1);
        }
        return Ok(());
    }

    let report = run_narrate_command(
        &config,
        cli.url.as_deref(),
        &cli.layout_request(),
        cli.quiet,
    )
    .await?;

    // Last stdout line is the audio path, for calling scripts.
    if let Some(audio) = report.audio_path {
        println!("{}", audio.display());
    }

    Ok(())
}

/// Load configuration, then freeze it for the rest of the run.
///
/// Priority order (later wins):
/// 1. Built-in defaults
/// 2. Config file (--config, or ~/.config/yomiage/config.toml if present)
/// 3. Environment variable overrides
/// 4. Command-line flags
fn load_config(custom_path: Option<&std::path::Path>, tts: Option<TtsEngine>) -> Result<Config> {
    let config = if let Some(path) = custom_path {
        Config::load(path)?
    } else if let Some(default_path) = Config::default_path() {
        Config::load_or_default(&default_path)?
    } else {
        Config::default()
    };

    let mut config = config.with_env_overrides();
    if let Some(engine) = tts {
        config.tts.engine = engine;
    }
    Ok(config)
}

/// Route `tracing` output to stderr. `RUST_LOG` overrides `-v`.
fn init_tracing(verbosity: u8) {
    let default_filter = match verbosity {
        0 => "warn",
        1 => "yomiage=debug",
        _ => "yomiage=trace",
    };
    let filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_filter));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}
