use crate::cli::parser::{Cli, Commands};
use crate::config::Config;
use crate::db::SqliteStorage;
use crate::errors::AppResult;
use crate::utils::colors::{CYAN, GREEN, RED, RESET};

/// Maintenance of the SQLite database. Opening it already runs pending
/// migrations, so `--migrate` only reports the result.
pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        vacuum,
        info,
    } = &cli.command
    {
        if *migrate {
            println!("{}▶ Running migrations…{}", CYAN, RESET);
        }
        let store = SqliteStorage::open(&cfg.database)?;
        if *migrate {
            println!("{}✔ Migration completed.{}\n", GREEN, RESET);
        }

        if *info {
            let stats = store.stats()?;
            println!("🗄️  Database : {}", cfg.database);
            println!("   Entries   : {}", stats.entries);
            println!("   Settings  : {}", stats.settings);
            println!("   Users     : {}", stats.users);
            println!("   Audit log : {}", stats.audit_records);
            println!("   Migrations:");
            for version in &stats.migrations {
                println!("     - {version}");
            }
            println!();
        }

        if *check {
            println!("{}▶ Running integrity check…{}", CYAN, RESET);

            let integrity = store.integrity_check()?;
            if integrity == "ok" {
                println!("{}✔ Integrity check passed.{}\n", GREEN, RESET);
            } else {
                println!("{}✘ Integrity check failed:{} {}\n", RED, RESET, integrity);
            }
        }

        if *vacuum {
            println!("{}▶ Running VACUUM…{}", CYAN, RESET);
            store.vacuum()?;
            println!("{}✔ Vacuum completed.{}\n", GREEN, RESET);
        }
    }

    Ok(())
}
