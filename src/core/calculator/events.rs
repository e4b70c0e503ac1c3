use crate::models::entry::DailyLogEntry;
use crate::models::period::EventLocation;
use crate::models::totals::QtdValor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EventsTotals {
    pub on_site: QtdValor,
    pub off_site: QtdValor,
    pub total: QtdValor,
}

pub fn calculate(entry: &DailyLogEntry) -> EventsTotals {
    let mut totals = EventsTotals::default();

    for (_, sub) in entry.eventos().sub_events() {
        let amount = QtdValor::new(sub.quantity, sub.total_value);
        match sub.location {
            EventLocation::OnSite => totals.on_site += amount,
            EventLocation::OffSite => totals.off_site += amount,
        }
    }

    totals.total = totals.on_site + totals.off_site;
    totals
}
