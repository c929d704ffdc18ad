use std::io::{self, IsTerminal};
use std::path::PathBuf;

use admission_core::FormEngine;
use anyhow::{Context, Result};
use clap::Parser;
use tokio::io::BufReader;
use tracing::{debug, info};

use admission_ui::{logging, settings::Settings, terminal};

// ─── CLI definition ──────────────────────────────────────────────────────────

/// Admission aggregate calculator.
///
/// Enter matric, intermediate and entry test marks, then `submit` to get the
/// weighted aggregate. Type `help` once running for the list of commands.
#[derive(Debug, Parser)]
#[command(name = "admission-calc", version, about)]
struct Cli {
    /// Settings file (TOML).
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Simulated calculation delay in milliseconds.
    #[arg(long)]
    delay_ms: Option<u64>,

    /// Log filter, e.g. `debug` or `admission_core=trace`.
    #[arg(long)]
    log_level: Option<String>,

    /// Directory to append a log file to.
    #[arg(long)]
    log_dir: Option<PathBuf>,

    /// Do not echo log lines to the console.
    #[arg(short, long, default_value_t = false)]
    quiet: bool,
}

impl Cli {
    /// Flags win over the settings file.
    fn apply(
        &self,
        settings: &mut Settings,
    ) {
        if let Some(delay_ms) = self.delay_ms {
            settings.engine.delay_ms = delay_ms;
        }
        if let Some(level) = &self.log_level {
            settings.logging.level = level.clone();
        }
        if let Some(dir) = &self.log_dir {
            settings.logging.directory = Some(dir.clone());
        }
        if self.quiet {
            settings.logging.console = false;
        }
    }
}

// ─── entry point ─────────────────────────────────────────────────────────────

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut settings = match &cli.config {
        Some(path) => Settings::load(path)?,
        None => Settings::default(),
    };
    cli.apply(&mut settings);

    logging::init_default_logging(&settings.logging.level);
    if !settings.logging.console {
        logging::set_console_enabled(false)?;
    }
    if let Some(dir) = &settings.logging.directory {
        let path = dir.join(format!("{}.log", logging::app_name()));
        logging::enable_file_logging(&path)?;
        debug!(path = %path.display(), "file logging enabled");
    }

    let view = terminal::TerminalView::new(io::stdout()).with_prompt(io::stdin().is_terminal());
    let mut engine =
        FormEngine::new(settings.engine_config(), view).context("Invalid engine settings")?;
    info!(delay = ?engine.delay(), "admission calculator ready");

    terminal::run_session(&mut engine, BufReader::new(tokio::io::stdin())).await
}
