use crate::core::calculator::period::period_totals;
use crate::models::entry::DailyLogEntry;
use crate::models::period_id::PeriodId;
use crate::models::totals::QtdValor;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CuisineTotals {
    pub italiano_almoco: QtdValor,
    pub italiano_jantar: QtdValor,
    pub indiano_almoco: QtdValor,
    pub indiano_jantar: QtdValor,
}

impl CuisineTotals {
    pub fn total(&self) -> QtdValor {
        self.italiano_almoco + self.italiano_jantar + self.indiano_almoco + self.indiano_jantar
    }
}

pub fn calculate(entry: &DailyLogEntry) -> CuisineTotals {
    let of = |id| period_totals(&entry.period(id));

    CuisineTotals {
        italiano_almoco: of(PeriodId::ItalianoAlmoco),
        italiano_jantar: of(PeriodId::ItalianoJantar),
        indiano_almoco: of(PeriodId::IndianoAlmoco),
        indiano_jantar: of(PeriodId::IndianoJantar),
    }
}
