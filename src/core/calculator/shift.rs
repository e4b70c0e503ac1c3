//! Lunch shifts and dinner: channels plus itemized billed and internal sales.

use crate::core::calculator::period::period_totals;
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::totals::QtdValor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ShiftTotals {
    pub channels: QtdValor,
    pub faturado: QtdValor,
    /// Internal consumption as reported on the items, not part of `total`.
    pub consumo_interno: QtdValor,
    /// Revenue of the shift: channels plus billed items.
    pub total: QtdValor,
}

pub fn calculate(entry: &DailyLogEntry, shift: PeriodId) -> ShiftTotals {
    let period = entry.period(shift);

    let channels = period_totals(&period);
    let faturado = period
        .faturado()
        .map(|(_, i)| QtdValor::new(i.quantity, i.value))
        .sum();
    let consumo_interno = period
        .consumo_interno()
        .map(|(_, i)| QtdValor::new(i.quantity, i.value))
        .sum();

    ShiftTotals {
        channels,
        faturado,
        consumo_interno,
        total: channels + faturado,
    }
}
