//! Internal consumption (CI): staff and hotel sectors eating from the
//! restaurant, valued at the configured unit price.

use crate::core::calculator::shift::ShiftTotals;
use crate::models::settings::AggregationConfig;
use crate::models::totals::QtdValor;
use rust_decimal::Decimal;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumoInternoTotals {
    /// Lunch CI at valuation (quantity × lunch unit price).
    pub almoco: QtdValor,
    /// Dinner CI at valuation (quantity × dinner unit price).
    pub jantar: QtdValor,
    pub total: QtdValor,
    /// Sum of the values typed on the CI items.
    pub reported_value: Decimal,
    /// `reported_value - total.valor`.
    pub adjustment: Decimal,
}

/// Value `reported` at `unit_price`; without a price the reported value stands.
fn valuate(reported: QtdValor, unit_price: Option<Decimal>) -> QtdValor {
    match unit_price {
        Some(price) => QtdValor::new(reported.qtd, Decimal::from(reported.qtd).saturating_mul(price)),
        None => reported,
    }
}

pub fn calculate(
    almoco_pt: &ShiftTotals,
    almoco_st: &ShiftTotals,
    jantar: &ShiftTotals,
    cfg: &AggregationConfig,
) -> ConsumoInternoTotals {
    let lunch_reported = almoco_pt.consumo_interno + almoco_st.consumo_interno;
    let dinner_reported = jantar.consumo_interno;

    let almoco = valuate(lunch_reported, cfg.ci_unit_price_almoco);
    let jantar = valuate(dinner_reported, cfg.ci_unit_price_jantar);
    let total = almoco + jantar;
    let reported_value = lunch_reported.valor.saturating_add(dinner_reported.valor);

    ConsumoInternoTotals {
        almoco,
        jantar,
        total,
        reported_value,
        adjustment: reported_value.saturating_sub(total.valor),
    }
}

impl ConsumoInternoTotals {
    /// Add another day's CI into a running total.
    pub fn accumulate(&mut self, other: &ConsumoInternoTotals) {
        self.almoco += other.almoco;
        self.jantar += other.jantar;
        self.total += other.total;
        self.reported_value = self.reported_value.saturating_add(other.reported_value);
        self.adjustment = self.adjustment.saturating_add(other.adjustment);
    }
}
