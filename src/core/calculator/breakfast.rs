use crate::core::calculator::period::period_totals;
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::totals::QtdValor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct BreakfastTotals {
    /// Guests on the hotel list, including those billed to their rooms.
    pub hospedes: QtdValor,
    /// Walk-in customers.
    pub avulsos: QtdValor,
    pub total: QtdValor,
}

pub fn calculate(entry: &DailyLogEntry) -> BreakfastTotals {
    let guests = entry.period(PeriodId::CafeDaManhaHospedes);
    let billed: QtdValor = guests
        .faturado()
        .map(|(_, item)| QtdValor::new(item.quantity, item.value))
        .sum();
    let hospedes = period_totals(&guests) + billed;

    let avulsos = period_totals(&entry.period(PeriodId::CafeDaManhaAvulsos));

    BreakfastTotals {
        hospedes,
        avulsos,
        total: hospedes + avulsos,
    }
}
