//! Signage CLI
//!
//! Command-line interface for layouts and OAuth applications

use std::path::PathBuf;

use clap::{Parser, Subcommand};
use signage_core::logging_facility;
use signage_core_types::RequestContext;
use signage_store::db::open_and_migrate;

mod commands;
mod config;

use commands::Session;
use config::CliConfig;

#[derive(Debug, Parser)]
#[command(name = "signage")]
#[command(about = "Signage - layout and application management", long_about = None)]
struct Cli {
    /// TOML configuration file (defaults to ./signage.toml when present)
    #[arg(long, global = true, env = "SIGNAGE_CONFIG")]
    config: Option<PathBuf>,

    /// SQLite database, overriding the configured path
    #[arg(long, global = true, env = "SIGNAGE_DB")]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Layout operations
    Layout(commands::layout::LayoutArgs),
    /// OAuth application operations
    Application(commands::application::ApplicationArgs),
}

fn run(cli: Cli) -> commands::CommandResult {
    let mut config = CliConfig::load(cli.config.as_deref())?;
    if let Some(db) = cli.db {
        config.database_path = db;
    }
    logging_facility::init(config.log_profile);

    let ctx = RequestContext::new();
    tracing::debug!(
        request_id = %ctx.request_id,
        database = %config.database_path.display(),
        "cli invocation"
    );

    let mut session = Session {
        conn: open_and_migrate(&config.database_path)?,
        ctx,
        engine: config.engine_config(),
    };

    match cli.command {
        Commands::Layout(args) => commands::layout::execute(args, &mut session),
        Commands::Application(args) => commands::application::execute(args, &mut session),
    }
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}
