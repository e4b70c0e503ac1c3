//! Aggregation of a whole daily entry.

use crate::core::calculator::breakfast::{self, BreakfastTotals};
use crate::core::calculator::consumo_interno::{self, ConsumoInternoTotals};
use crate::core::calculator::cuisine::{self, CuisineTotals};
use crate::core::calculator::events::{self, EventsTotals};
use crate::core::calculator::frigobar::{self, FrigobarTotals};
use crate::core::calculator::room_service::{self, RoomServiceTotals};
use crate::core::calculator::shift::{self, ShiftTotals};
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::settings::{AggregationConfig, SummaryCategory};
use crate::models::totals::QtdValor;
use serde::Serialize;
use std::collections::BTreeMap;

/// All derived totals of one day.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct EntryTotals {
    pub date: String,
    pub cafe_da_manha: BreakfastTotals,
    pub almoco_primeiro_turno: ShiftTotals,
    pub almoco_segundo_turno: ShiftTotals,
    /// Both lunch shifts together.
    pub almoco: QtdValor,
    pub jantar: ShiftTotals,
    pub cuisine: CuisineTotals,
    pub room_service: RoomServiceTotals,
    pub frigobar: FrigobarTotals,
    pub eventos: EventsTotals,
    pub consumo_interno: ConsumoInternoTotals,
    #[serde(rename = "grandTotalSemCI")]
    pub grand_total_sem_ci: QtdValor,
    #[serde(rename = "grandTotalComCI")]
    pub grand_total_com_ci: QtdValor,
}

impl EntryTotals {
    /// Total of one summary category, independent of whether it is
    /// included in the grand totals.
    pub fn category(&self, category: SummaryCategory) -> QtdValor {
        match category {
            SummaryCategory::CafeDaManha => self.cafe_da_manha.total,
            SummaryCategory::AlmocoPrimeiroTurno => self.almoco_primeiro_turno.total,
            SummaryCategory::AlmocoSegundoTurno => self.almoco_segundo_turno.total,
            SummaryCategory::Jantar => self.jantar.total,
            SummaryCategory::ItalianoAlmoco => self.cuisine.italiano_almoco,
            SummaryCategory::ItalianoJantar => self.cuisine.italiano_jantar,
            SummaryCategory::IndianoAlmoco => self.cuisine.indiano_almoco,
            SummaryCategory::IndianoJantar => self.cuisine.indiano_jantar,
            SummaryCategory::RoomService => self.room_service.as_qtd_valor(),
            SummaryCategory::Frigobar => self.frigobar.total,
            SummaryCategory::EventosDireto => self.eventos.on_site,
            SummaryCategory::EventosHotel => self.eventos.off_site,
        }
    }

    /// Every category total keyed by category.
    pub fn categories(&self) -> BTreeMap<SummaryCategory, QtdValor> {
        SummaryCategory::ALL
            .into_iter()
            .map(|c| (c, self.category(c)))
            .collect()
    }
}

/// Combine every calculator for `entry`.
///
/// Pure: the configuration is passed in, nothing is read from storage.
pub fn aggregate_entry(entry: &DailyLogEntry, cfg: &AggregationConfig) -> EntryTotals {
    let almoco_primeiro_turno = shift::calculate(entry, PeriodId::AlmocoPrimeiroTurno);
    let almoco_segundo_turno = shift::calculate(entry, PeriodId::AlmocoSegundoTurno);
    let jantar = shift::calculate(entry, PeriodId::Jantar);

    let consumo_interno = consumo_interno::calculate(
        &almoco_primeiro_turno,
        &almoco_segundo_turno,
        &jantar,
        cfg,
    );

    let mut totals = EntryTotals {
        date: entry.id.clone(),
        cafe_da_manha: breakfast::calculate(entry),
        almoco: almoco_primeiro_turno.total + almoco_segundo_turno.total,
        almoco_primeiro_turno,
        almoco_segundo_turno,
        jantar,
        cuisine: cuisine::calculate(entry),
        room_service: room_service::calculate(entry),
        frigobar: frigobar::calculate(entry),
        eventos: events::calculate(entry),
        consumo_interno,
        ..Default::default()
    };

    let sem_ci: QtdValor = SummaryCategory::ALL
        .into_iter()
        .filter(|c| cfg.includes(*c))
        .map(|c| totals.category(c))
        .sum();

    // com - sem == CI valuation + adjustment == reported CI value
    let ci = &totals.consumo_interno;
    let com_ci = QtdValor::new(
        sem_ci.qtd.saturating_add(ci.total.qtd),
        sem_ci.valor.saturating_add(ci.total.valor).saturating_add(ci.adjustment),
    );

    totals.grand_total_sem_ci = sem_ci;
    totals.grand_total_com_ci = com_ci;
    totals
}
