use crate::models::entry::DailyLogEntry;
use crate::models::period::PeriodData;
use crate::models::period_id::PeriodId;
use crate::models::totals::QtdValor;
use rust_decimal::Decimal;
use serde::Serialize;

pub const CHANNEL_PAG_DEBITADO: &str = "pagDebitado";
pub const CHANNEL_PAG_NAO_DEBITADO: &str = "pagNaoDebitado";
pub const CHANNEL_QTD_PEDIDOS: &str = "qtdPedidos";
pub const CHANNEL_QTD_PRATOS: &str = "qtdPratos";

/// Night room service: value comes from the two payment channels, while
/// orders and dishes are plain counters.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomServiceTotals {
    pub pedidos: i64,
    pub pratos: i64,
    pub valor: Decimal,
}

impl RoomServiceTotals {
    /// Dishes are the quantity that counts towards summaries.
    pub fn as_qtd_valor(&self) -> QtdValor {
        QtdValor::new(self.pratos, self.valor)
    }
}

pub fn calculate(entry: &DailyLogEntry) -> RoomServiceTotals {
    let period = entry.period(PeriodId::RoomService);
    from_period(&period)
}

fn from_period(period: &PeriodData) -> RoomServiceTotals {
    let value = |id: &str| period.channel(id).map(|c| c.total_value).unwrap_or_default();
    let count = |id: &str| period.channel(id).map(|c| c.quantity).unwrap_or(0);

    RoomServiceTotals {
        pedidos: count(CHANNEL_QTD_PEDIDOS),
        pratos: count(CHANNEL_QTD_PRATOS),
        valor: value(CHANNEL_PAG_DEBITADO) + value(CHANNEL_PAG_NAO_DEBITADO),
    }
}
