//! Per-person report: billed and internal-consumption items grouped by the
//! client or sector name typed by the operator.

use crate::core::range::DateRange;
use crate::core::report::entries_in_range;
use crate::models::entry::DailyLogEntry;
use crate::models::period::FaturadoCategory;
use crate::models::period_id::PeriodId;
use rust_decimal::Decimal;
use serde::Serialize;
use std::collections::BTreeMap;

/// Group key for items whose name is blank.
pub const UNNAMED_CLIENT: &str = "(sem nome)";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum TransactionKind {
    Faturado,
    ConsumoInterno,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonTransaction {
    pub date: String,
    pub period_id: PeriodId,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub tab: Option<String>,
    pub kind: TransactionKind,
    pub client_name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub category: Option<FaturadoCategory>,
    pub quantity: i64,
    pub value: Decimal,
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonSummary {
    pub client_name: String,
    pub total_qtd: i64,
    pub total_value: Decimal,
    pub transactions: usize,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PersonReport {
    pub start_date: String,
    pub end_date: String,
    pub faturado: Vec<PersonSummary>,
    pub consumo_interno: Vec<PersonSummary>,
    pub transactions: Vec<PersonTransaction>,
}

#[derive(Debug, Clone, Default)]
pub struct PersonFilter {
    /// Exact (trimmed, case-sensitive) client name.
    pub client: Option<String>,
}

impl PersonFilter {
    fn accepts(&self, name: &str) -> bool {
        match &self.client {
            Some(c) => c.trim() == name,
            None => true,
        }
    }
}

/// Names are matched exactly after trimming; case and inner spacing matter.
fn group_key(raw: &str) -> String {
    let name = raw.trim();
    if name.is_empty() {
        UNNAMED_CLIENT.to_string()
    } else {
        name.to_string()
    }
}

fn summarize(transactions: &[PersonTransaction], kind: TransactionKind) -> Vec<PersonSummary> {
    let mut groups: BTreeMap<&str, PersonSummary> = BTreeMap::new();

    for t in transactions.iter().filter(|t| t.kind == kind) {
        let s = groups
            .entry(t.client_name.as_str())
            .or_insert_with(|| PersonSummary {
                client_name: t.client_name.clone(),
                ..Default::default()
            });
        s.total_qtd = s.total_qtd.saturating_add(t.quantity);
        s.total_value = s.total_value.saturating_add(t.value);
        s.transactions += 1;
    }

    groups.into_values().collect()
}

pub fn person_report(
    entries: &[DailyLogEntry],
    range: &DateRange,
    filter: &PersonFilter,
) -> PersonReport {
    let mut transactions = Vec::new();

    for entry in entries_in_range(entries, range) {
        for period_id in PeriodId::ALL.into_iter().filter(|p| !p.is_events()) {
            if !entry.has_period(period_id) {
                continue;
            }
            let data = entry.period(period_id);

            for (tab, item) in data.faturado() {
                let client_name = group_key(&item.client_name);
                if !filter.accepts(&client_name) {
                    continue;
                }
                transactions.push(PersonTransaction {
                    date: entry.id.clone(),
                    period_id,
                    tab: tab.map(str::to_string),
                    kind: TransactionKind::Faturado,
                    client_name,
                    category: Some(item.category),
                    quantity: item.quantity,
                    value: item.value,
                    note: item.note.clone(),
                });
            }

            for (tab, item) in data.consumo_interno() {
                let client_name = group_key(&item.client_name);
                if !filter.accepts(&client_name) {
                    continue;
                }
                transactions.push(PersonTransaction {
                    date: entry.id.clone(),
                    period_id,
                    tab: tab.map(str::to_string),
                    kind: TransactionKind::ConsumoInterno,
                    client_name,
                    category: None,
                    quantity: item.quantity,
                    value: item.value,
                    note: item.note.clone(),
                });
            }
        }
    }

    PersonReport {
        start_date: range.start_str(),
        end_date: range.end_str(),
        faturado: summarize(&transactions, TransactionKind::Faturado),
        consumo_interno: summarize(&transactions, TransactionKind::ConsumoInterno),
        transactions,
    }
}
