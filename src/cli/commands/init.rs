use crate::cli::parser::Cli;
use crate::config::{Config, StorageKind};
use crate::db::log::audit;
use crate::db::open_storage;
use crate::errors::AppResult;
use crate::ui::messages::warning;

/// Handle the `init` command
///
/// This initializes:
///  - the config directory and file (skipped in test mode)
///  - the storage (SQLite database or JSON file)
///  - all pending DB migrations
pub fn handle(cli: &Cli) -> AppResult<()> {
    let mut cfg = Config::init_all(cli.db.as_deref(), cli.test)?;
    if let Some(path) = &cli.json_store {
        cfg.json_store = Config::resolve_path(path);
        cfg.storage = StorageKind::Json;
    }

    println!("⚙️  Initializing Caixa Tulsi…");
    if !cli.test {
        println!("📄 Config file : {}", Config::config_file().display());
    }

    let mut store = open_storage(&cfg)?;
    let location = match store.backend() {
        "json" => cfg.json_store.clone(),
        _ => cfg.database.clone(),
    };
    println!("🗄️  Storage     : {} ({})", location, store.backend());

    if let Err(e) = audit(
        store.as_mut(),
        &cli.username(&cfg),
        "init",
        &format!("storage initialized at {location}"),
    ) {
        warning(format!("Failed to write audit log: {e}"));
    }

    println!("🎉 Caixa Tulsi initialization completed!");
    Ok(())
}
