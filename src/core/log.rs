use crate::db::Storage;
use crate::errors::AppResult;
use crate::models::audit::AuditRecord;
use crate::ui::messages::info;
use crate::utils::formatting::strip_ansi;
use ansi_term::Colour;

const OP_WIDTH_MAX: usize = 40;
const DETAILS_MAX: usize = 80;

/// Colour of an audit action in the printout.
fn color_for_action(action: &str) -> Colour {
    match action {
        "init" => Colour::RGB(255, 153, 51),
        "migration_applied" => Colour::Purple,
        "settings_set" => Colour::Blue,
        "user_del" => Colour::Red,
        "user_save" => Colour::Cyan,
        "export" => Colour::Yellow,
        other if other.starts_with("entry_") => Colour::Green,
        _ => Colour::White,
    }
}

fn truncate(s: &str, max: usize) -> String {
    if s.chars().count() > max {
        let mut t: String = s.chars().take(max.saturating_sub(3)).collect();
        t.push_str("...");
        t
    } else {
        s.to_string()
    }
}

pub struct LogLogic;

impl LogLogic {
    /// Print the audit trail, oldest first, limited to the most recent
    /// `limit` records when given.
    pub fn print_log(store: &dyn Storage, limit: Option<usize>) -> AppResult<()> {
        let mut records = store.list_audit(limit)?;
        records.reverse();

        if records.is_empty() {
            info("The audit log is empty.");
            return Ok(());
        }

        println!("📜 Audit log:\n");
        for line in render(&records) {
            println!("{line}");
        }
        Ok(())
    }
}

fn render(records: &[AuditRecord]) -> Vec<String> {
    let id_w = records
        .iter()
        .map(|r| r.id.to_string().len())
        .max()
        .unwrap_or(1);
    let date_w = records.iter().map(|r| r.timestamp.len()).max().unwrap_or(10);
    let user_w = records.iter().map(|r| r.username.len()).max().unwrap_or(4);
    let op_w = records
        .iter()
        .map(|r| r.action.len())
        .max()
        .unwrap_or(4)
        .min(OP_WIDTH_MAX);

    records
        .iter()
        .map(|r| {
            let date = chrono::DateTime::parse_from_rfc3339(&r.timestamp)
                .map(|dt| dt.format("%FT%T%:z").to_string())
                .unwrap_or_else(|_| r.timestamp.clone());

            let action = truncate(&r.action, OP_WIDTH_MAX);
            let colored = color_for_action(&r.action).paint(action.as_str()).to_string();
            let padding = " ".repeat(op_w.saturating_sub(strip_ansi(&colored).chars().count()));

            format!(
                "{:>id_w$}: {:<date_w$} | {:<user_w$} | {}{} => {}",
                r.id,
                date,
                r.username,
                colored,
                padding,
                truncate(&r.details, DETAILS_MAX),
            )
        })
        .collect()
}
