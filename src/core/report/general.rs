use crate::core::calculator::consumo_interno::ConsumoInternoTotals;
use crate::core::calculator::{EntryTotals, aggregate_entry};
use crate::core::range::DateRange;
use crate::core::report::entries_in_range;
use crate::models::entry::DailyLogEntry;
use crate::models::settings::{AggregationConfig, SummaryCategory};
use crate::models::totals::QtdValor;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralSummary {
    pub period_totals: BTreeMap<SummaryCategory, QtdValor>,
    pub almoco: QtdValor,
    pub consumo_interno: ConsumoInternoTotals,
    #[serde(rename = "grandTotalSemCI")]
    pub grand_total_sem_ci: QtdValor,
    #[serde(rename = "grandTotalComCI")]
    pub grand_total_com_ci: QtdValor,
    pub days_with_entries: usize,
}

impl GeneralSummary {
    fn add_day(&mut self, day: &EntryTotals) {
        for (category, amount) in day.categories() {
            *self.period_totals.entry(category).or_default() += amount;
        }
        self.almoco += day.almoco;
        self.consumo_interno.accumulate(&day.consumo_interno);
        self.grand_total_sem_ci += day.grand_total_sem_ci;
        self.grand_total_com_ci += day.grand_total_com_ci;
        self.days_with_entries += 1;
    }
}

/// General/monthly report: one row per day plus the running summary.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GeneralReport {
    pub start_date: String,
    pub end_date: String,
    pub daily_breakdown: Vec<EntryTotals>,
    pub summary: GeneralSummary,
}

pub fn general_report(
    entries: &[DailyLogEntry],
    range: &DateRange,
    cfg: &AggregationConfig,
) -> GeneralReport {
    let mut summary = GeneralSummary {
        period_totals: SummaryCategory::ALL
            .into_iter()
            .map(|c| (c, QtdValor::ZERO))
            .collect(),
        ..Default::default()
    };

    let daily_breakdown: Vec<EntryTotals> = entries_in_range(entries, range)
        .into_iter()
        .map(|e| aggregate_entry(e, cfg))
        .collect();

    for day in &daily_breakdown {
        summary.add_day(day);
    }

    GeneralReport {
        start_date: range.start_str(),
        end_date: range.end_str(),
        daily_breakdown,
        summary,
    }
}
