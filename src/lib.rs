//! Caixa Tulsi library root.
//! Exposes the CLI parser, the high-level `run()` function, the HTTP API and
//! the aggregation core.

pub mod api;
pub mod cli;
pub mod config;
pub mod core;
pub mod db;
pub mod errors;
pub mod export;
pub mod logging;
pub mod models;
pub mod ui;
pub mod utils;

use clap::Parser;
use cli::commands;
use cli::parser::{Cli, Commands};
use config::{Config, StorageKind};
use errors::AppResult;

/// Central command dispatcher
pub fn dispatch(cli: &Cli, cfg: &Config) -> AppResult<()> {
    match &cli.command {
        Commands::Init => commands::init::handle(cli),
        Commands::Config { .. } => commands::config::handle(cli, cfg),
        Commands::Db { .. } => commands::db::handle(cli, cfg),
        Commands::Entry { .. } => commands::entry::handle(cli, cfg),
        Commands::Report { .. } => commands::report::handle(cli, cfg),
        Commands::Settings { .. } => commands::settings::handle(cli, cfg),
        Commands::User { .. } => commands::user::handle(cli, cfg),
        Commands::Log { .. } => commands::log::handle(cli, cfg),
        Commands::Export { .. } => commands::export::handle(cli, cfg),
        Commands::Serve { .. } => commands::serve::handle(cli, cfg),
    }
}

/// Entry point used by main.rs
pub fn run() -> AppResult<()> {
    let cli = Cli::parse();
    let mut cfg = Config::load()?;

    if let Some(custom_db) = &cli.db {
        cfg.database = Config::resolve_path(custom_db);
        cfg.storage = StorageKind::Sqlite;
    }
    if let Some(store) = &cli.json_store {
        cfg.json_store = Config::resolve_path(store);
        cfg.storage = StorageKind::Json;
    }

    logging::init(&cfg.log_level);
    dispatch(&cli, &cfg)
}
