use crate::core::calculator::{EntryTotals, aggregate_entry};
use crate::core::range::DateRange;
use crate::core::report::entries_in_range;
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::settings::AggregationConfig;
use crate::models::totals::QtdValor;
use serde::Serialize;
use std::collections::BTreeMap;

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodDay {
    pub date: String,
    /// Channel-level breakdown. Sub-tab channels are keyed `tab/channel`,
    /// events `location/serviceType`.
    pub lines: BTreeMap<String, QtdValor>,
    pub faturado: QtdValor,
    pub consumo_interno: QtdValor,
    /// The category total the general report uses for this period.
    pub total: QtdValor,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodSummary {
    pub lines: BTreeMap<String, QtdValor>,
    pub faturado: QtdValor,
    pub consumo_interno: QtdValor,
    pub total: QtdValor,
}

/// One category's evolution across the days of a range.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodReport {
    pub period_id: PeriodId,
    pub start_date: String,
    pub end_date: String,
    pub days: Vec<PeriodDay>,
    pub summary: PeriodSummary,
}

fn period_total(totals: &EntryTotals, period: PeriodId) -> QtdValor {
    match period {
        PeriodId::CafeDaManhaHospedes => totals.cafe_da_manha.hospedes,
        PeriodId::CafeDaManhaAvulsos => totals.cafe_da_manha.avulsos,
        PeriodId::AlmocoPrimeiroTurno => totals.almoco_primeiro_turno.total,
        PeriodId::AlmocoSegundoTurno => totals.almoco_segundo_turno.total,
        PeriodId::Jantar => totals.jantar.total,
        PeriodId::ItalianoAlmoco => totals.cuisine.italiano_almoco,
        PeriodId::ItalianoJantar => totals.cuisine.italiano_jantar,
        PeriodId::IndianoAlmoco => totals.cuisine.indiano_almoco,
        PeriodId::IndianoJantar => totals.cuisine.indiano_jantar,
        PeriodId::RoomService => totals.room_service.as_qtd_valor(),
        PeriodId::Frigobar => totals.frigobar.total,
        PeriodId::Eventos => totals.eventos.total,
    }
}

fn breakdown(entry: &DailyLogEntry, period: PeriodId) -> PeriodDay {
    let mut day = PeriodDay {
        date: entry.id.clone(),
        ..Default::default()
    };

    if period.is_events() {
        for (_, sub) in entry.eventos().sub_events() {
            let key = format!("{}/{}", sub.location.as_str(), sub.service_type.trim());
            *day.lines.entry(key).or_default() += QtdValor::new(sub.quantity, sub.total_value);
        }
        return day;
    }

    let data = entry.period(period);
    for (tab, channel, ch) in data.all_channels() {
        let key = match tab {
            Some(t) => format!("{t}/{channel}"),
            None => channel.to_string(),
        };
        *day.lines.entry(key).or_default() += QtdValor::new(ch.quantity, ch.total_value);
    }
    day.faturado = data
        .faturado()
        .map(|(_, i)| QtdValor::new(i.quantity, i.value))
        .sum();
    day.consumo_interno = data
        .consumo_interno()
        .map(|(_, i)| QtdValor::new(i.quantity, i.value))
        .sum();

    day
}

pub fn period_report(
    entries: &[DailyLogEntry],
    range: &DateRange,
    period: PeriodId,
    cfg: &AggregationConfig,
) -> PeriodReport {
    let mut summary = PeriodSummary::default();
    let mut days = Vec::new();

    for entry in entries_in_range(entries, range) {
        let mut day = breakdown(entry, period);
        day.total = period_total(&aggregate_entry(entry, cfg), period);

        for (key, amount) in &day.lines {
            *summary.lines.entry(key.clone()).or_default() += *amount;
        }
        summary.faturado += day.faturado;
        summary.consumo_interno += day.consumo_interno;
        summary.total += day.total;

        days.push(day);
    }

    PeriodReport {
        period_id: period,
        start_date: range.start_str(),
        end_date: range.end_str(),
        days,
        summary,
    }
}
