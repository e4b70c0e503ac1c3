use crate::cli::commands::parse_money;
use crate::cli::commands::report::print_entry_totals;
use crate::cli::parser::{Cli, Commands, EntryCommands};
use crate::config::Config;
use crate::core::entry::{EntryLogic, LineItem, NewSubEvent};
use crate::core::range::parse_day;
use crate::db::open_storage;
use crate::errors::{AppError, AppResult};
use crate::models::period::{EventLocation, FaturadoCategory};
use crate::models::period_id::PeriodId;
use crate::models::settings::{SETTING_FATURADO_CLIENTS, hidden_cards, string_list};
use crate::ui::messages::{header, info, success, warning};
use serde_json::Value;
use std::fs;
use std::io::{self, Read};

fn read_patch(file: &str) -> AppResult<Value> {
    let raw = if file == "-" {
        let mut buf = String::new();
        io::stdin().read_to_string(&mut buf)?;
        buf
    } else {
        fs::read_to_string(file)?
    };
    serde_json::from_str(&raw)
        .map_err(|e| AppError::InvalidInput(format!("entry patch is not valid JSON: {e}")))
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Entry { action } = &cli.command else {
        return Ok(());
    };
    let mut store = open_storage(cfg)?;
    let username = cli.username(cfg);

    match action {
        EntryCommands::Save { date, file } => {
            let date = parse_day(date)?;
            let patch = read_patch(file)?;
            let saved = EntryLogic::save_patch(store.as_mut(), date, &patch, &username)?;
            success(format!("Entry {} saved.", saved.id));
        }
        EntryCommands::Channel {
            date,
            period,
            channel,
            quantity,
            value,
            tab,
        } => {
            let date = parse_day(date)?;
            let period: PeriodId = period.parse()?;
            let value = value.as_deref().map(parse_money).transpose()?;
            let saved = EntryLogic::set_channel(
                store.as_mut(),
                date,
                period,
                tab.as_deref(),
                channel,
                *quantity,
                value,
                &username,
            )?;
            success(format!("{} / {} saved for {}.", period.label(), channel.trim(), saved.id));
        }
        EntryCommands::Faturado {
            date,
            period,
            client,
            quantity,
            value,
            tab,
            category,
            note,
        } => {
            let date = parse_day(date)?;
            let period: PeriodId = period.parse()?;
            let item = LineItem {
                client_name: client.clone(),
                quantity: *quantity,
                value: parse_money(value)?,
                note: note.clone(),
                category: FaturadoCategory::from_code(category),
            };

            let known = string_list(&store.all_settings()?, SETTING_FATURADO_CLIENTS);
            if !known.is_empty() && !known.iter().any(|k| k == client.trim()) {
                warning(format!("'{}' is not a registered billed client.", client.trim()));
            }

            let saved =
                EntryLogic::add_faturado(store.as_mut(), date, period, tab.as_deref(), &item, &username)?;
            success(format!("Billed item for '{}' added to {}.", client.trim(), saved.id));
        }
        EntryCommands::Consumo {
            date,
            period,
            client,
            quantity,
            value,
            tab,
            note,
        } => {
            let date = parse_day(date)?;
            let period: PeriodId = period.parse()?;
            let item = LineItem {
                client_name: client.clone(),
                quantity: *quantity,
                value: parse_money(value)?,
                note: note.clone(),
                category: FaturadoCategory::Other,
            };
            let saved =
                EntryLogic::add_consumo(store.as_mut(), date, period, tab.as_deref(), &item, &username)?;
            success(format!(
                "Internal consumption for '{}' added to {}.",
                client.trim(),
                saved.id
            ));
        }
        EntryCommands::Event {
            date,
            name,
            location,
            service,
            quantity,
            value,
        } => {
            let date = parse_day(date)?;
            let location = EventLocation::from_code(location).ok_or_else(|| {
                AppError::InvalidInput(format!(
                    "invalid location '{location}', use on-site or off-site"
                ))
            })?;
            let sub = NewSubEvent {
                event_name: name.clone(),
                location,
                service_type: service.clone(),
                quantity: *quantity,
                value: parse_money(value)?,
            };
            let saved = EntryLogic::add_event(store.as_mut(), date, &sub, &username)?;
            success(format!("Event '{}' updated on {}.", name.trim(), saved.id));
        }
        EntryCommands::Show { date, json } => {
            let day = parse_day(date)?;
            let Some(totals) = EntryLogic::totals(store.as_ref(), day)? else {
                info(format!("No entry for {day}."));
                return Ok(());
            };

            if *json {
                println!("{}", serde_json::to_string_pretty(&totals)?);
                return Ok(());
            }

            header(format!("Caixa {}", totals.date));
            print_entry_totals(&totals, &hidden_cards(&store.all_settings()?));
        }
    }

    Ok(())
}
