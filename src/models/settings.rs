//! Settings keys and the aggregation configuration derived from them.

use crate::models::lenient::decimal_from_value;
use crate::models::period_id::PeriodId;
use rust_decimal::Decimal;
use serde::Serialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

pub const SETTING_CI_UNIT_PRICE_ALMOCO: &str = "unitPriceConsumoInternoAlmoco";
pub const SETTING_CI_UNIT_PRICE_JANTAR: &str = "unitPriceConsumoInternoJantar";
pub const SETTING_SUMMARY_CARD_ITEMS: &str = "summaryCardItems";
pub const SETTING_CARD_VISIBILITY: &str = "cardVisibility";
pub const SETTING_CHANNEL_UNIT_PRICES: &str = "channelUnitPrices";
pub const SETTING_FATURADO_CLIENTS: &str = "faturadoClients";
pub const SETTING_NO_SHOW_CLIENTS: &str = "noShowClients";
pub const SETTING_APP_NAME: &str = "appName";

pub const DEFAULT_APP_NAME: &str = "Caixa Tulsi";

/// Categories that can feed the grand totals ("TOTAL FITA").
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(rename_all = "camelCase")]
pub enum SummaryCategory {
    CafeDaManha,
    AlmocoPrimeiroTurno,
    AlmocoSegundoTurno,
    Jantar,
    ItalianoAlmoco,
    ItalianoJantar,
    IndianoAlmoco,
    IndianoJantar,
    RoomService,
    Frigobar,
    EventosDireto,
    EventosHotel,
}

impl SummaryCategory {
    pub const ALL: [SummaryCategory; 12] = [
        SummaryCategory::CafeDaManha,
        SummaryCategory::AlmocoPrimeiroTurno,
        SummaryCategory::AlmocoSegundoTurno,
        SummaryCategory::Jantar,
        SummaryCategory::ItalianoAlmoco,
        SummaryCategory::ItalianoJantar,
        SummaryCategory::IndianoAlmoco,
        SummaryCategory::IndianoJantar,
        SummaryCategory::RoomService,
        SummaryCategory::Frigobar,
        SummaryCategory::EventosDireto,
        SummaryCategory::EventosHotel,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            SummaryCategory::CafeDaManha => "cafeDaManha",
            SummaryCategory::AlmocoPrimeiroTurno => "almocoPrimeiroTurno",
            SummaryCategory::AlmocoSegundoTurno => "almocoSegundoTurno",
            SummaryCategory::Jantar => "jantar",
            SummaryCategory::ItalianoAlmoco => "italianoAlmoco",
            SummaryCategory::ItalianoJantar => "italianoJantar",
            SummaryCategory::IndianoAlmoco => "indianoAlmoco",
            SummaryCategory::IndianoJantar => "indianoJantar",
            SummaryCategory::RoomService => "roomService",
            SummaryCategory::Frigobar => "frigobar",
            SummaryCategory::EventosDireto => "eventosDireto",
            SummaryCategory::EventosHotel => "eventosHotel",
        }
    }

    /// Name shown on reports.
    pub fn label(&self) -> &'static str {
        match self {
            SummaryCategory::CafeDaManha => "Café da manhã",
            SummaryCategory::AlmocoPrimeiroTurno => "Almoço 1º turno",
            SummaryCategory::AlmocoSegundoTurno => "Almoço 2º turno",
            SummaryCategory::Jantar => "Jantar",
            SummaryCategory::ItalianoAlmoco => "Italiano almoço",
            SummaryCategory::ItalianoJantar => "Italiano jantar",
            SummaryCategory::IndianoAlmoco => "Indiano almoço",
            SummaryCategory::IndianoJantar => "Indiano jantar",
            SummaryCategory::RoomService => "Room service",
            SummaryCategory::Frigobar => "Frigobar",
            SummaryCategory::EventosDireto => "Eventos direto",
            SummaryCategory::EventosHotel => "Eventos hotel",
        }
    }

    /// Periods whose records feed this category.
    pub fn periods(&self) -> &'static [PeriodId] {
        match self {
            SummaryCategory::CafeDaManha => {
                &[PeriodId::CafeDaManhaHospedes, PeriodId::CafeDaManhaAvulsos]
            }
            SummaryCategory::AlmocoPrimeiroTurno => &[PeriodId::AlmocoPrimeiroTurno],
            SummaryCategory::AlmocoSegundoTurno => &[PeriodId::AlmocoSegundoTurno],
            SummaryCategory::Jantar => &[PeriodId::Jantar],
            SummaryCategory::ItalianoAlmoco => &[PeriodId::ItalianoAlmoco],
            SummaryCategory::ItalianoJantar => &[PeriodId::ItalianoJantar],
            SummaryCategory::IndianoAlmoco => &[PeriodId::IndianoAlmoco],
            SummaryCategory::IndianoJantar => &[PeriodId::IndianoJantar],
            SummaryCategory::RoomService => &[PeriodId::RoomService],
            SummaryCategory::Frigobar => &[PeriodId::Frigobar],
            SummaryCategory::EventosDireto | SummaryCategory::EventosHotel => &[PeriodId::Eventos],
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        SummaryCategory::ALL
            .into_iter()
            .find(|c| c.as_str().eq_ignore_ascii_case(key.trim()))
    }
}

impl fmt::Display for SummaryCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Everything the aggregator needs from settings, read once per request.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct AggregationConfig {
    /// Unit price used to value internal consumption at lunch.
    /// `None` means the reported item values are the valuation.
    pub ci_unit_price_almoco: Option<Decimal>,
    pub ci_unit_price_jantar: Option<Decimal>,
    excluded: Vec<SummaryCategory>,
}

impl AggregationConfig {
    pub fn from_settings(settings: &BTreeMap<String, Value>) -> Self {
        let price = |key: &str| settings.get(key).and_then(decimal_from_value);

        let excluded = match settings.get(SETTING_SUMMARY_CARD_ITEMS) {
            Some(Value::Object(toggles)) => toggles
                .iter()
                .filter(|(_, on)| on.as_bool() == Some(false))
                .filter_map(|(k, _)| SummaryCategory::from_key(k))
                .collect(),
            _ => Vec::new(),
        };

        Self {
            ci_unit_price_almoco: price(SETTING_CI_UNIT_PRICE_ALMOCO),
            ci_unit_price_jantar: price(SETTING_CI_UNIT_PRICE_JANTAR),
            excluded,
        }
    }

    pub fn with_ci_prices(mut self, almoco: Option<Decimal>, jantar: Option<Decimal>) -> Self {
        self.ci_unit_price_almoco = almoco;
        self.ci_unit_price_jantar = jantar;
        self
    }

    /// Switch a category in or out of the grand totals.
    pub fn set_included(&mut self, category: SummaryCategory, included: bool) {
        self.excluded.retain(|c| *c != category);
        if !included {
            self.excluded.push(category);
        }
    }

    pub fn includes(&self, category: SummaryCategory) -> bool {
        !self.excluded.contains(&category)
    }
}

/// Period cards hidden by the administrator, as canonical period ids.
pub fn hidden_cards(settings: &BTreeMap<String, Value>) -> Vec<String> {
    match settings.get(SETTING_CARD_VISIBILITY) {
        Some(Value::Object(map)) => map
            .iter()
            .filter(|(_, v)| v.as_bool() == Some(false))
            .filter_map(|(k, _)| k.parse::<PeriodId>().ok())
            .map(|p| p.as_str().to_string())
            .collect(),
        _ => Vec::new(),
    }
}

pub fn channel_unit_price(settings: &BTreeMap<String, Value>, channel: &str) -> Option<Decimal> {
    settings
        .get(SETTING_CHANNEL_UNIT_PRICES)
        .and_then(|v| v.get(channel))
        .and_then(decimal_from_value)
}

pub fn string_list(settings: &BTreeMap<String, Value>, key: &str) -> Vec<String> {
    match settings.get(key) {
        Some(Value::Array(items)) => items
            .iter()
            .filter_map(|v| v.as_str().map(str::to_string))
            .collect(),
        _ => Vec::new(),
    }
}

pub fn app_name(settings: &BTreeMap<String, Value>) -> String {
    settings
        .get(SETTING_APP_NAME)
        .and_then(Value::as_str)
        .filter(|s| !s.trim().is_empty())
        .unwrap_or(DEFAULT_APP_NAME)
        .to_string()
}
