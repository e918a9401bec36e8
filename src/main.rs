mod aggregate;
mod categorize;
mod chart;
mod cli;
mod error;
mod export;
mod filter;
mod fmt;
mod normalize;
mod recent;
mod settings;
mod sheet;
mod table;

use clap::Parser;
use tracing_subscriber::EnvFilter;

use cli::{Cli, Commands};

fn main() {
    init_logger();
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Init => cli::init::run(),
        Commands::Sum {
            keywords,
            file,
            pick,
            export,
        } => cli::sum::run(&keywords, file.as_deref(), pick, export),
        Commands::Categories {
            file,
            pick,
            chart,
            export,
        } => cli::report::categories(file.as_deref(), pick, chart, export),
        Commands::Monthly {
            file,
            pick,
            chart,
            export,
        } => cli::report::monthly(file.as_deref(), pick, chart, export),
        Commands::Recent => cli::recent::run(),
        Commands::Status => cli::status::run(),
    };

    if let Err(e) = result {
        tracing::error!("{e}");
        eprintln!("Error: {e}");
        std::process::exit(1);
    }
}

/// Append plain-text log lines to the data-dir log file; stderr when the
/// file cannot be opened. RUST_LOG overrides the default level.
fn init_logger() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    let log_path = settings::log_path();
    if let Some(parent) = log_path.parent() {
        let _ = std::fs::create_dir_all(parent);
    }
    match std::fs::OpenOptions::new()
        .create(true)
        .append(true)
        .open(&log_path)
    {
        Ok(file) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_ansi(false)
            .with_writer(std::sync::Mutex::new(file))
            .init(),
        Err(_) => tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_writer(std::io::stderr)
            .init(),
    }
}
