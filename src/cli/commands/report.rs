use crate::cli::parser::{Cli, Commands, ReportCommands};
use crate::config::Config;
use crate::core::calculator::EntryTotals;
use crate::core::calculator::consumo_interno::ConsumoInternoTotals;
use crate::core::range::DateRange;
use crate::core::report::person::PersonSummary;
use crate::core::report::{
    GeneralReport, PeriodReport, PersonFilter, PersonReport, general_report, period_report,
    person_report,
};
use crate::db::open_storage;
use crate::errors::AppResult;
use crate::models::period_id::PeriodId;
use crate::models::settings::{AggregationConfig, SummaryCategory, app_name};
use crate::models::totals::QtdValor;
use crate::ui::messages::{header, info};
use crate::utils::colors::{RESET, color_for_adjustment, colorize_amount};
use crate::utils::formatting::bold;
use crate::utils::table::{Column, Table};
use crate::utils::{brl, qtd_valor};
use chrono::{Datelike, Local};
use rust_decimal::Decimal;
use serde::Serialize;

/// `--range` value, or the current month.
fn resolve_range(range: Option<&str>) -> AppResult<DateRange> {
    match range {
        Some(r) => DateRange::parse(r),
        None => {
            let today = Local::now().date_naive();
            DateRange::month(&format!("{:04}-{:02}", today.year(), today.month()))
        }
    }
}

fn print_json<T: Serialize>(value: &T) -> AppResult<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

fn amount_cell(qv: &QtdValor) -> String {
    colorize_amount(&qtd_valor(qv), qv.is_zero())
}

fn money_cell(v: Decimal) -> String {
    colorize_amount(&brl(v), v.is_zero())
}

pub fn handle(cli: &Cli, cfg: &Config) -> AppResult<()> {
    let Commands::Report { action } = &cli.command else {
        return Ok(());
    };
    let store = open_storage(cfg)?;

    match action {
        ReportCommands::General { range, json } => {
            let range = resolve_range(range.as_deref())?;
            let entries = store.get_all_entries(Some(&range))?;
            let settings = store.all_settings()?;
            let report = general_report(
                &entries,
                &range,
                &AggregationConfig::from_settings(&settings),
            );

            if *json {
                return print_json(&report);
            }
            header(format!("{}: {}", app_name(&settings), range));
            print_general(&report);
        }
        ReportCommands::Period {
            period,
            range,
            json,
        } => {
            let period: PeriodId = period.parse()?;
            let range = resolve_range(range.as_deref())?;
            let entries = store.get_all_entries(Some(&range))?;
            let cfg = AggregationConfig::from_settings(&store.all_settings()?);
            let report = period_report(&entries, &range, period, &cfg);

            if *json {
                return print_json(&report);
            }
            header(format!("{}: {}", period.label(), range));
            print_period(&report);
        }
        ReportCommands::Person {
            range,
            client,
            json,
        } => {
            let range = resolve_range(range.as_deref())?;
            let entries = store.get_all_entries(Some(&range))?;
            let filter = PersonFilter {
                client: client.clone(),
            };
            let report = person_report(&entries, &range, &filter);

            if *json {
                return print_json(&report);
            }
            header(format!("Faturado e consumo interno: {}", range));
            print_person(&report, client.is_some());
        }
    }

    Ok(())
}

fn print_general(report: &GeneralReport) {
    if report.daily_breakdown.is_empty() {
        info("No entries found for selected range.");
        return;
    }

    let mut days = Table::new(vec![
        Column::left("Data"),
        Column::right("Café"),
        Column::right("Almoço"),
        Column::right("Jantar"),
        Column::right("Cozinhas"),
        Column::right("Room service"),
        Column::right("Frigobar"),
        Column::right("Eventos"),
        Column::right("CI"),
        Column::right("Total s/ CI"),
        Column::right("Total c/ CI"),
    ]);
    for d in &report.daily_breakdown {
        days.add_row(vec![
            d.date.clone(),
            money_cell(d.cafe_da_manha.total.valor),
            money_cell(d.almoco.valor),
            money_cell(d.jantar.total.valor),
            money_cell(d.cuisine.total().valor),
            money_cell(d.room_service.valor),
            money_cell(d.frigobar.total.valor),
            money_cell(d.eventos.total.valor),
            money_cell(d.consumo_interno.total.valor),
            money_cell(d.grand_total_sem_ci.valor),
            money_cell(d.grand_total_com_ci.valor),
        ]);
    }
    println!("{}", days.render());

    let summary = &report.summary;
    let mut totals = Table::new(vec![Column::left("Categoria"), Column::right("Qtd / Valor")]);
    for category in SummaryCategory::ALL {
        let amount = summary
            .period_totals
            .get(&category)
            .copied()
            .unwrap_or_default();
        totals.add_row(vec![category.label().to_string(), amount_cell(&amount)]);
    }
    println!("{}", totals.render());

    print_grand_totals(
        &summary.consumo_interno,
        &summary.grand_total_sem_ci,
        &summary.grand_total_com_ci,
    );
    println!("\nDias com lançamento: {}", summary.days_with_entries);
}

/// Internal consumption, its adjustment and both grand totals.
pub(crate) fn print_grand_totals(ci: &ConsumoInternoTotals, sem_ci: &QtdValor, com_ci: &QtdValor) {
    let adj_color = color_for_adjustment(ci.adjustment);
    println!("Consumo interno : {}", qtd_valor(&ci.total));
    println!(
        "Ajuste CI       : {}{}{}",
        adj_color,
        brl(ci.adjustment),
        RESET
    );
    println!("{}", bold(&format!("TOTAL sem CI    : {}", qtd_valor(sem_ci))));
    println!("{}", bold(&format!("TOTAL com CI    : {}", qtd_valor(com_ci))));
}

/// Category lines of one day, skipping categories whose periods are all hidden.
pub(crate) fn print_entry_totals(totals: &EntryTotals, hidden: &[String]) {
    let mut table = Table::new(vec![Column::left("Categoria"), Column::right("Qtd / Valor")]);
    for category in SummaryCategory::ALL {
        let all_hidden = category
            .periods()
            .iter()
            .all(|p| hidden.iter().any(|h| h == p.as_str()));
        if all_hidden {
            continue;
        }
        table.add_row(vec![
            category.label().to_string(),
            amount_cell(&totals.category(category)),
        ]);
    }
    println!("{}", table.render());

    print_grand_totals(
        &totals.consumo_interno,
        &totals.grand_total_sem_ci,
        &totals.grand_total_com_ci,
    );
}

fn print_period(report: &PeriodReport) {
    if report.days.is_empty() {
        info("No entries found for selected range.");
        return;
    }

    let mut days = Table::new(vec![
        Column::left("Data"),
        Column::right("Total"),
        Column::right("Faturado"),
        Column::right("Consumo interno"),
    ]);
    for d in &report.days {
        days.add_row(vec![
            d.date.clone(),
            amount_cell(&d.total),
            amount_cell(&d.faturado),
            amount_cell(&d.consumo_interno),
        ]);
    }
    println!("{}", days.render());

    let mut lines = Table::new(vec![Column::left("Canal"), Column::right("Qtd / Valor")]);
    for (key, amount) in &report.summary.lines {
        lines.add_row(vec![key.clone(), amount_cell(amount)]);
    }
    println!("{}", lines.render());

    println!("{}", bold(&format!("TOTAL : {}", qtd_valor(&report.summary.total))));
}

fn summary_table(rows: &[PersonSummary]) -> Table {
    let mut table = Table::new(vec![
        Column::left("Cliente"),
        Column::right("Lanç."),
        Column::right("Qtd"),
        Column::right("Valor"),
    ]);
    for s in rows {
        table.add_row(vec![
            s.client_name.clone(),
            s.transactions.to_string(),
            s.total_qtd.to_string(),
            brl(s.total_value),
        ]);
    }
    table
}

fn print_person(report: &PersonReport, with_transactions: bool) {
    if report.transactions.is_empty() {
        info("No billed or internal consumption items in the selected range.");
        return;
    }

    println!("Faturado\n{}", summary_table(&report.faturado).render());
    println!(
        "Consumo interno\n{}",
        summary_table(&report.consumo_interno).render()
    );

    if with_transactions {
        let mut table = Table::new(vec![
            Column::left("Data"),
            Column::left("Período"),
            Column::left("Tipo"),
            Column::right("Qtd"),
            Column::right("Valor"),
            Column::left("Obs."),
        ]);
        for t in &report.transactions {
            let period = match &t.tab {
                Some(tab) => format!("{}/{}", t.period_id, tab),
                None => t.period_id.to_string(),
            };
            table.add_row(vec![
                t.date.clone(),
                period,
                format!("{:?}", t.kind),
                t.quantity.to_string(),
                brl(t.value),
                t.note.clone(),
            ]);
        }
        println!("{}", table.render());
    }
}
