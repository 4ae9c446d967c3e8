//! rCompanion library root.
//! Exposes CLI parser, high-level run() function, and internal modules.

pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::Config;
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(&cli.command, cfg),
        Commands::Login { user } => commands::session::login(user, cli, cfg),
        Commands::Logout => commands::session::logout(cli, cfg),
        Commands::Whoami => commands::session::whoami(cli, cfg),
        Commands::Class { action } => commands::class::handle(action, cli, cfg),
        Commands::Assignment { action } => commands::assignment::handle(action, cli, cfg),
        Commands::Subject { action } => commands::subject::handle(action, cli, cfg),
        Commands::Notice { action } => commands::notice::handle(action, cli, cfg),
        Commands::List { .. } => commands::list::handle(cli, cfg),
        Commands::Scan { at } => commands::scan::handle(at.as_deref(), cli, cfg),
        Commands::Watch { interval, ticks } => {
            commands::watch::handle(*interval, *ticks, cli, cfg)
        }
        Commands::Log { .. } => commands::log::handle(&cli.command, cfg),
    }
}

/// Diagnostics go to stderr; RUST_LOG overrides the configured level.
fn init_logging(cfg: &Config) {
    let env = env_logger::Env::default().default_filter_or(cfg.log_level.as_str());
    let _ = env_logger::Builder::from_env(env).try_init();
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();

    let mut cfg = Config::load()?;
    init_logging(&cfg);
    cfg.check()?;

    // --db on the command line wins over the configured database
    if let Some(custom_db) = &cli.db {
        cfg.database = custom_db.clone();
    }

    dispatch(&cli, &cfg)
}
