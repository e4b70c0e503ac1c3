use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::open_storage;
use crate::errors::AppResult;
use crate::export::ExportLogic;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        format,
        file,
        range,
        force,
    } = &cli.command
    {
        let mut store = open_storage(cfg)?;
        ExportLogic::export(
            store.as_mut(),
            *format,
            file,
            range.as_deref(),
            *force,
            &cli.username(cfg),
        )?;
    }
    Ok(())
}
