use crate::api;
use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::open_storage;
use crate::errors::AppResult;
use crate::ui::messages::info;

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Serve { host, port } = &cli.command {
        let mut cfg = cfg.clone();
        if let Some(h) = host {
            cfg.server_host = h.clone();
        }
        if let Some(p) = port {
            cfg.server_port = *p;
        }

        let store = open_storage(&cfg)?;
        info(format!(
            "Serving the API on http://{}:{} ({} storage)",
            cfg.server_host,
            cfg.server_port,
            store.backend()
        ));
        api::serve(&cfg, store)?;
    }
    Ok(())
}
