mod ui;

use anyhow::Result;
use arena_projects::cli::Session;
use arena_projects::store::{ProjectStore, StartupSource};
use arena_projects::Config;
use clap::Parser;
use std::io;
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    let config = Config::parse();
    init_tracing(&config);

    tracing::info!(version = arena_projects::VERSION, "starting ARENA project manager");

    // JSON snapshot first, text snapshot as fallback
    let mut store = ProjectStore::new();
    match store.load_or_import(&config.json_file, &config.text_file) {
        StartupSource::Json => println!(
            "Projects successfully loaded from {}",
            config.json_file.display()
        ),
        StartupSource::Text => println!(
            "Projects successfully loaded from {}",
            config.text_file.display()
        ),
        StartupSource::Empty => println!("No saved projects found. Starting with an empty list."),
    }

    let mut charts = ui::TerminalCharts::new(!config.no_charts && cfg!(feature = "tui"));

    let stdin = io::stdin();
    let mut session = Session::new(stdin.lock(), io::stdout());
    session.run(&mut store, &config, &mut charts)?;

    Ok(())
}

fn init_tracing(config: &Config) {
    let filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(&config.log_level))
        .unwrap_or_else(|_| EnvFilter::new("warn"));

    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .init();
}
