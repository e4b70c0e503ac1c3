//! Shapes of the per-period records stored inside a daily entry.
//!
//! All of them decode leniently: missing fields are defaults, malformed
//! numbers are zero, undecodable list items are skipped.

use crate::models::lenient::{
    lenient_decimal, lenient_map, lenient_qty, lenient_string, lenient_vec,
};
use rust_decimal::Decimal;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;

/// One sales channel of a period (e.g. "hospedes", "avulsos").
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelData {
    #[serde(default, deserialize_with = "lenient_qty")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_value: Decimal,
}

pub type ChannelMap = BTreeMap<String, ChannelData>;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum FaturadoCategory {
    Hotel,
    Employee,
    #[default]
    Other,
}

impl FaturadoCategory {
    pub fn from_code(code: &str) -> Self {
        match code.trim().to_ascii_lowercase().as_str() {
            "hotel" => FaturadoCategory::Hotel,
            "employee" | "funcionario" => FaturadoCategory::Employee,
            _ => FaturadoCategory::Other,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            FaturadoCategory::Hotel => "hotel",
            FaturadoCategory::Employee => "employee",
            FaturadoCategory::Other => "other",
        }
    }
}

impl<'de> Deserialize<'de> for FaturadoCategory {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(v.as_str()
            .map(FaturadoCategory::from_code)
            .unwrap_or_default())
    }
}

/// A sale billed to a named client or sector instead of paid on the spot.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FaturadoItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_name: String,
    #[serde(default)]
    pub category: FaturadoCategory,
    #[serde(default, deserialize_with = "lenient_qty")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

/// Goods consumed by staff or by a hotel sector.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsumoInternoItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub client_name: String,
    #[serde(default, deserialize_with = "lenient_qty")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub value: Decimal,
    #[serde(default, deserialize_with = "lenient_string")]
    pub note: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubTabData {
    #[serde(default, deserialize_with = "lenient_map")]
    pub channels: ChannelMap,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub faturado_items: Vec<FaturadoItem>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub consumo_interno_items: Vec<ConsumoInternoItem>,
}

/// Record of one service period.
///
/// Simple periods only fill `channels`; shift periods split their sales into
/// named `sub_tabs`. Item lists may appear at either level.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PeriodData {
    #[serde(default, deserialize_with = "lenient_map")]
    pub channels: ChannelMap,
    #[serde(default, deserialize_with = "lenient_map")]
    pub sub_tabs: BTreeMap<String, SubTabData>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub faturado_items: Vec<FaturadoItem>,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub consumo_interno_items: Vec<ConsumoInternoItem>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub period_observations: String,
}

impl PeriodData {
    pub fn channel(&self, id: &str) -> Option<&ChannelData> {
        self.channels.get(id)
    }

    pub fn tab(&self, id: &str) -> Option<&SubTabData> {
        self.sub_tabs.get(id)
    }

    /// Every channel of the period: top-level ones (tab `None`) first, then
    /// those of each sub-tab.
    pub fn all_channels(&self) -> impl Iterator<Item = (Option<&str>, &str, &ChannelData)> + '_ {
        let top = self
            .channels
            .iter()
            .map(|(id, ch)| (None::<&str>, id.as_str(), ch));
        let tabs = self.sub_tabs.iter().flat_map(|(tab, data)| {
            data.channels
                .iter()
                .map(move |(id, ch)| (Some(tab.as_str()), id.as_str(), ch))
        });
        top.chain(tabs)
    }

    pub fn faturado(&self) -> impl Iterator<Item = (Option<&str>, &FaturadoItem)> + '_ {
        let top = self.faturado_items.iter().map(|i| (None::<&str>, i));
        let tabs = self.sub_tabs.iter().flat_map(|(tab, data)| {
            data.faturado_items
                .iter()
                .map(move |i| (Some(tab.as_str()), i))
        });
        top.chain(tabs)
    }

    pub fn consumo_interno(&self) -> impl Iterator<Item = (Option<&str>, &ConsumoInternoItem)> + '_ {
        let top = self.consumo_interno_items.iter().map(|i| (None::<&str>, i));
        let tabs = self.sub_tabs.iter().flat_map(|(tab, data)| {
            data.consumo_interno_items
                .iter()
                .map(move |i| (Some(tab.as_str()), i))
        });
        top.chain(tabs)
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EventLocation {
    #[default]
    OnSite,
    OffSite,
}

impl EventLocation {
    pub fn from_code(code: &str) -> Option<Self> {
        match code.trim().to_ascii_lowercase().replace('_', "-").as_str() {
            "on-site" | "onsite" | "direto" => Some(EventLocation::OnSite),
            "off-site" | "offsite" | "hotel" => Some(EventLocation::OffSite),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            EventLocation::OnSite => "on-site",
            EventLocation::OffSite => "off-site",
        }
    }
}

impl<'de> Deserialize<'de> for EventLocation {
    fn deserialize<D: Deserializer<'de>>(d: D) -> Result<Self, D::Error> {
        let v = Value::deserialize(d)?;
        Ok(v.as_str()
            .and_then(EventLocation::from_code)
            .unwrap_or_default())
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubEvent {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default)]
    pub location: EventLocation,
    #[serde(default, deserialize_with = "lenient_string")]
    pub service_type: String,
    #[serde(default, deserialize_with = "lenient_qty")]
    pub quantity: i64,
    #[serde(default, deserialize_with = "lenient_decimal")]
    pub total_value: Decimal,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventItem {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub event_name: String,
    #[serde(default, deserialize_with = "lenient_vec")]
    pub sub_events: Vec<SubEvent>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EventosPeriodData {
    #[serde(default, deserialize_with = "lenient_vec")]
    pub items: Vec<EventItem>,
}

impl EventosPeriodData {
    pub fn sub_events(&self) -> impl Iterator<Item = (&EventItem, &SubEvent)> + '_ {
        self.items
            .iter()
            .flat_map(|ev| ev.sub_events.iter().map(move |s| (ev, s)))
    }
}
