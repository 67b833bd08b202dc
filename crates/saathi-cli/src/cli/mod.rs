//! CLI entry and dispatch.

use anyhow::{Context, Result};
use clap::Parser;
use saathi_core::config::{self, Config};
use saathi_tui::runtime::TuiRuntime;
use saathi_tui::views::View;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "saathi")]
#[command(version = "0.1")]
#[command(about = "Swachh Saathi terminal client")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Start on a specific section (home, timing, route, ...)
    #[arg(long, value_name = "LABEL", default_value = "home")]
    section: String,
}

#[derive(clap::Subcommand)]
enum Commands {
    /// Manage configuration
    Config {
        #[command(subcommand)]
        command: ConfigCommands,
    },
}

#[derive(clap::Subcommand)]
enum ConfigCommands {
    /// Show the path to the config file
    Path,
    /// Initialize a default config file (if not present)
    Init,
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    match cli.command {
        Some(Commands::Config { command }) => match command {
            ConfigCommands::Path => {
                println!("{}", config::paths::config_path().display());
                Ok(())
            }
            ConfigCommands::Init => init_config(),
        },
        // Default to the TUI.
        None => run_tui(&cli.section),
    }
}

fn run_tui(section: &str) -> Result<()> {
    let _log_guard = init_logging().context("initialize logging")?;

    let config = Config::load().context("load config")?;
    let start_view = View::from_label(section);

    // one tokio runtime for everything
    let rt = tokio::runtime::Runtime::new().context("create tokio runtime")?;
    let _enter = rt.enter();

    let mut runtime = TuiRuntime::new(config, start_view)?;
    runtime.run()
}

fn init_config() -> Result<()> {
    let path = config::paths::config_path();
    if path.exists() {
        println!("config already exists at {}", path.display());
        return Ok(());
    }
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent)
            .with_context(|| format!("create directory {}", parent.display()))?;
    }
    let default = toml::to_string_pretty(&Config::default()).context("serialize defaults")?;
    std::fs::write(&path, default).with_context(|| format!("write {}", path.display()))?;
    println!("wrote {}", path.display());
    Ok(())
}

/// File-based logging: stdout belongs to the TUI.
fn init_logging() -> Result<tracing_appender::non_blocking::WorkerGuard> {
    let logs_dir = config::paths::logs_dir();
    std::fs::create_dir_all(&logs_dir)
        .with_context(|| format!("create log directory {}", logs_dir.display()))?;
    let appender = tracing_appender::rolling::daily(logs_dir, "saathi.log");
    let (writer, guard) = tracing_appender::non_blocking(appender);
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with_writer(writer)
        .with_ansi(false)
        .init();
    Ok(guard)
}
