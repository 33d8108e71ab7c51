use anyhow::Result;
use clap::Parser;
use std::path::PathBuf;
use todo_core::{init_tracing, Config};
use todo_tui::App;
use tracing::info;

/// Terminal to-do list editor
#[derive(Parser, Debug)]
#[command(author, version, about, long_about = None)]
struct Cli {
    /// Path to the config file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level or filter directives (e.g. `debug`, `todo_core=trace`)
    #[arg(long)]
    log_level: Option<String>,

    /// Placeholder shown in the empty new-todo field
    #[arg(long)]
    placeholder: Option<String>,
}

fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut config = Config::load(cli.config.as_deref())?;
    if let Some(placeholder) = cli.placeholder {
        config.ui.placeholder = placeholder;
    }

    let level = cli.log_level.or_else(|| config.logging.level.clone());
    let log_file = init_tracing(&config.log_dir(), level.as_deref())?;
    info!("Starting todo editor, logging to {}", log_file.display());

    App::new(&config)?.run()
}
