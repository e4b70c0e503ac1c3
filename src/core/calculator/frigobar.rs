use crate::core::calculator::period::named_channels;
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::totals::QtdValor;
use serde::Serialize;

pub const TAB_PRIMEIRO_TURNO: &str = "primeiroTurno";
pub const TAB_SEGUNDO_TURNO: &str = "segundoTurno";
pub const TAB_JANTAR: &str = "jantar";

/// Only these channels are minibar revenue; anything else on the tab is
/// informational.
pub const CHANNEL_PAG_RESTAURANTE: &str = "pagRestaurante";
pub const CHANNEL_PAG_HOTEL: &str = "pagHotel";

const REVENUE_CHANNELS: [&str; 2] = [CHANNEL_PAG_RESTAURANTE, CHANNEL_PAG_HOTEL];

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FrigobarTotals {
    pub primeiro_turno: QtdValor,
    pub segundo_turno: QtdValor,
    pub jantar: QtdValor,
    pub total: QtdValor,
}

pub fn calculate(entry: &DailyLogEntry) -> FrigobarTotals {
    let period = entry.period(PeriodId::Frigobar);
    let shift = |tab: &str| {
        period
            .tab(tab)
            .map(|t| named_channels(&t.channels, &REVENUE_CHANNELS))
            .unwrap_or_default()
    };

    let primeiro_turno = shift(TAB_PRIMEIRO_TURNO);
    let segundo_turno = shift(TAB_SEGUNDO_TURNO);
    let jantar = shift(TAB_JANTAR);

    FrigobarTotals {
        primeiro_turno,
        segundo_turno,
        jantar,
        total: primeiro_turno + segundo_turno + jantar,
    }
}
