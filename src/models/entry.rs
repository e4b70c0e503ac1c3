use crate::models::lenient::lenient_string;
use crate::models::period::{EventosPeriodData, PeriodData};
use crate::models::period_id::PeriodId;
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use tracing::warn;

/// One day of the register, keyed by its ISO date.
///
/// Period records are kept as raw JSON and decoded on read, so a record
/// written by an older schema (or damaged by hand) never prevents the rest
/// of the entry from being used. No totals are stored here.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyLogEntry {
    #[serde(default, deserialize_with = "lenient_string")]
    pub id: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub date: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub general_observations: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub created_at: String,
    #[serde(default, deserialize_with = "lenient_string")]
    pub last_modified_at: String,
    #[serde(flatten)]
    pub periods: BTreeMap<String, Value>,
}

impl DailyLogEntry {
    pub fn new(date: NaiveDate) -> Self {
        let id = date.format("%Y-%m-%d").to_string();
        Self {
            id: id.clone(),
            date: id,
            ..Default::default()
        }
    }

    /// Calendar date of the entry, taken from `id` (falls back to `date`).
    pub fn day(&self) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(&self.id, "%Y-%m-%d")
            .or_else(|_| NaiveDate::parse_from_str(&self.date, "%Y-%m-%d"))
            .ok()
    }

    pub fn has_period(&self, id: PeriodId) -> bool {
        matches!(self.periods.get(id.as_str()), Some(v) if !v.is_null())
    }

    /// Decoded record of a channel-based period; empty when absent or unreadable.
    pub fn period(&self, id: PeriodId) -> PeriodData {
        self.decode(id.as_str())
    }

    pub fn eventos(&self) -> EventosPeriodData {
        self.decode(PeriodId::Eventos.as_str())
    }

    fn decode<T: DeserializeOwned + Default>(&self, key: &str) -> T {
        match self.periods.get(key) {
            None | Some(Value::Null) => T::default(),
            Some(v) => T::deserialize(v).unwrap_or_else(|e| {
                warn!(entry = %self.id, period = key, error = %e, "unreadable period record, counted as empty");
                T::default()
            }),
        }
    }
}
