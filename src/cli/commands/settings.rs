use crate::cli::parser::{Cli, Commands, SettingsCommands};
use crate::config::Config;
use crate::core::settings::SettingsLogic;
use crate::db::open_storage;
use crate::errors::AppResult;
use crate::ui::messages::{info, success};
use crate::utils::table::{Column, Table};
use serde_json::Value;

/// A value typed on the command line: JSON when it parses, a plain string
/// otherwise (so `settings set appName Tulsi` needs no quoting).
fn parse_value(raw: &str) -> Value {
    serde_json::from_str(raw).unwrap_or_else(|_| Value::String(raw.to_string()))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Settings { action } = &cli.command else {
        return Ok(());
    };
    let mut store = open_storage(cfg)?;

    match action {
        SettingsCommands::List => {
            let settings = SettingsLogic::list(store.as_ref())?;
            if settings.is_empty() {
                info("No settings stored.");
                return Ok(());
            }

            let mut table = Table::new(vec![Column::left("Key"), Column::left("Value")]);
            for (key, value) in &settings {
                table.add_row(vec![key.clone(), value.to_string()]);
            }
            print!("{}", table.render());
        }
        SettingsCommands::Get { key } => {
            let value = SettingsLogic::get(store.as_ref(), key)?;
            println!("{}", serde_json::to_string_pretty(&value)?);
        }
        SettingsCommands::Set { key, value } => {
            let value = parse_value(value);
            SettingsLogic::set(store.as_mut(), key, &value, &cli.username(cfg))?;
            success(format!("Setting '{}' saved.", key.trim()));
        }
    }

    Ok(())
}
