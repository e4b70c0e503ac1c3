use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::core::log::LogLogic;
use crate::db::open_storage;
use crate::errors::AppResult;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Log { print: true, limit } = &cli.command {
        let store = open_storage(cfg)?;
        LogLogic::print_log(store.as_ref(), *limit)?;
    }

    Ok(())
}
