use crate::core::calculator::{EntryTotals, aggregate_entry};
use crate::core::settings::SettingsLogic;
use crate::db::Storage;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::entry::DailyLogEntry;
use crate::models::lenient::{MAX_QUANTITY, amount_in_range, quantity_in_range};
use crate::models::period::{EventLocation, FaturadoCategory};
use crate::models::period_id::PeriodId;
use crate::models::settings::channel_unit_price;
use chrono::{Local, NaiveDate};
use rust_decimal::Decimal;
use serde_json::{Map, Value, json};
use tracing::debug;

/// Top-level keys of an entry that a patch can never overwrite.
const PROTECTED_KEYS: [&str; 4] = ["id", "date", "createdAt", "lastModifiedAt"];

const KEY_GENERAL_OBSERVATIONS: &str = "generalObservations";

/// Merge `patch` into `target`: objects are merged key by key, anything else
/// (arrays included) replaces the old value, and `null` removes the key.
pub fn merge_patch(target: &mut Value, patch: &Value) {
    match (target, patch) {
        (Value::Object(t), Value::Object(p)) => {
            for (key, value) in p {
                if value.is_null() {
                    t.remove(key);
                    continue;
                }
                match t.get_mut(key) {
                    Some(existing) if existing.is_object() && value.is_object() => {
                        merge_patch(existing, value)
                    }
                    _ => {
                        t.insert(key.clone(), value.clone());
                    }
                }
            }
        }
        (t, p) => *t = p.clone(),
    }
}

/// A billed or internal-consumption line to append to a period.
#[derive(Debug, Clone)]
pub struct LineItem {
    pub client_name: String,
    pub quantity: i64,
    pub value: Decimal,
    pub note: String,
    /// Only meaningful for billed items.
    pub category: FaturadoCategory,
}

/// A sub-event to append to the events record of a day.
#[derive(Debug, Clone)]
pub struct NewSubEvent {
    pub event_name: String,
    pub location: EventLocation,
    pub service_type: String,
    pub quantity: i64,
    pub value: Decimal,
}

/// High-level operations on daily entries. Every write goes through
/// `Storage::update_entry` and leaves an audit record.
pub struct EntryLogic;

impl EntryLogic {
    /// Create the entry on first save, otherwise deep-merge `patch` into it.
    pub fn save_patch(
        store: &mut dyn Storage,
        date: NaiveDate,
        patch: &Value,
        username: &str,
    ) -> AppResult<DailyLogEntry> {
        let patch = validate_patch(patch)?;
        let keys: Vec<String> = patch.keys().cloned().collect();
        let patch = Value::Object(patch);

        let saved = store.update_entry(date, &mut |current| {
            apply_to_entry(current, date, |doc| {
                merge_patch(doc, &patch);
                Ok(())
            })
        })?;

        audit(
            store,
            username,
            "entry_save",
            &format!("{} [{}]", saved.id, keys.join(", ")),
        )?;
        Ok(saved)
    }

    /// Record the sales of one channel. Without an explicit value the
    /// configured unit price of the channel is used.
    #[allow(clippy::too_many_arguments)]
    pub fn set_channel(
        store: &mut dyn Storage,
        date: NaiveDate,
        period: PeriodId,
        tab: Option<&str>,
        channel: &str,
        quantity: i64,
        value: Option<Decimal>,
        username: &str,
    ) -> AppResult<DailyLogEntry> {
        if period.is_events() {
            return Err(AppError::InvalidInput(
                "events are recorded with sub-events, not channels".into(),
            ));
        }
        let channel = non_blank(channel, "channel")?;
        check_amounts(quantity, Decimal::ZERO)?;

        let value = match value {
            Some(v) => v,
            None => {
                let settings = store.all_settings()?;
                let price = channel_unit_price(&settings, channel).ok_or_else(|| {
                    AppError::InvalidInput(format!(
                        "no value given and no unit price configured for channel '{channel}'"
                    ))
                })?;
                price
                    .checked_mul(Decimal::from(quantity))
                    .ok_or_else(|| AppError::InvalidInput("channel value out of range".into()))?
            }
        };
        check_amounts(quantity, value)?;

        let data = json!({ "quantity": quantity, "totalValue": value });
        let period_patch = match tab {
            Some(tab) => {
                let tab = non_blank(tab, "tab")?;
                json!({ "subTabs": { tab: { "channels": { channel: data } } } })
            }
            None => json!({ "channels": { channel: data } }),
        };
        let patch = json!({ period.as_str(): period_patch });

        let saved = store.update_entry(date, &mut |current| {
            apply_to_entry(current, date, |doc| {
                merge_patch(doc, &patch);
                Ok(())
            })
        })?;

        audit(
            store,
            username,
            "entry_channel",
            &format!(
                "{} {}{}/{} qty={} value={}",
                saved.id,
                period,
                tab.map(|t| format!("/{t}")).unwrap_or_default(),
                channel,
                quantity,
                value
            ),
        )?;
        Ok(saved)
    }

    pub fn add_faturado(
        store: &mut dyn Storage,
        date: NaiveDate,
        period: PeriodId,
        tab: Option<&str>,
        item: &LineItem,
        username: &str,
    ) -> AppResult<DailyLogEntry> {
        validate_item(period, item)?;
        let value = json!({
            "id": new_item_id("fat"),
            "clientName": item.client_name.trim(),
            "category": item.category.as_str(),
            "quantity": item.quantity,
            "value": item.value,
            "note": item.note,
        });
        let saved = Self::push_item(store, date, period, tab, "faturadoItems", value)?;

        audit(
            store,
            username,
            "entry_faturado",
            &format!(
                "{} {} {} qty={} value={}",
                saved.id,
                period,
                item.client_name.trim(),
                item.quantity,
                item.value
            ),
        )?;
        Ok(saved)
    }

    pub fn add_consumo(
        store: &mut dyn Storage,
        date: NaiveDate,
        period: PeriodId,
        tab: Option<&str>,
        item: &LineItem,
        username: &str,
    ) -> AppResult<DailyLogEntry> {
        validate_item(period, item)?;
        let value = json!({
            "id": new_item_id("ci"),
            "clientName": item.client_name.trim(),
            "quantity": item.quantity,
            "value": item.value,
            "note": item.note,
        });
        let saved = Self::push_item(store, date, period, tab, "consumoInternoItems", value)?;

        audit(
            store,
            username,
            "entry_consumo",
            &format!(
                "{} {} {} qty={} value={}",
                saved.id,
                period,
                item.client_name.trim(),
                item.quantity,
                item.value
            ),
        )?;
        Ok(saved)
    }

    /// Append a sub-event, grouping it under the event with the same name.
    pub fn add_event(
        store: &mut dyn Storage,
        date: NaiveDate,
        sub: &NewSubEvent,
        username: &str,
    ) -> AppResult<DailyLogEntry> {
        let name = non_blank(&sub.event_name, "event name")?.to_string();
        let service = non_blank(&sub.service_type, "service type")?.to_string();
        check_amounts(sub.quantity, sub.value)?;

        let sub_event = json!({
            "id": new_item_id("sub"),
            "location": sub.location.as_str(),
            "serviceType": service,
            "quantity": sub.quantity,
            "totalValue": sub.value,
        });

        let saved = store.update_entry(date, &mut |current| {
            apply_to_entry(current, date, |doc| {
                let eventos = object_at(doc, PeriodId::Eventos.as_str());
                let items = array_at(eventos, "items");

                let existing = items.iter().position(|it| {
                    it.is_object()
                        && it.get("eventName").and_then(Value::as_str).map(str::trim)
                            == Some(name.as_str())
                });
                match existing {
                    Some(i) => array_at(&mut items[i], "subEvents").push(sub_event.clone()),
                    None => items.push(json!({
                        "id": new_item_id("evt"),
                        "eventName": name,
                        "subEvents": [sub_event.clone()],
                    })),
                }
                Ok(())
            })
        })?;

        audit(
            store,
            username,
            "entry_event",
            &format!(
                "{} {} {}/{} qty={} value={}",
                saved.id,
                name,
                sub.location.as_str(),
                service,
                sub.quantity,
                sub.value
            ),
        )?;
        Ok(saved)
    }

    /// Derived totals of the entry for `date`, with the current settings.
    pub fn totals(store: &dyn Storage, date: NaiveDate) -> AppResult<Option<EntryTotals>> {
        let cfg = SettingsLogic::aggregation_config(store)?;
        Ok(store
            .get_entry(date)?
            .map(|entry| aggregate_entry(&entry, &cfg)))
    }

    fn push_item(
        store: &mut dyn Storage,
        date: NaiveDate,
        period: PeriodId,
        tab: Option<&str>,
        list_key: &str,
        item: Value,
    ) -> AppResult<DailyLogEntry> {
        let tab = tab.map(|t| non_blank(t, "tab")).transpose()?;

        store.update_entry(date, &mut |current| {
            apply_to_entry(current, date, |doc| {
                let mut target = object_at(doc, period.as_str());
                if let Some(tab) = tab {
                    target = object_at(object_at(target, "subTabs"), tab);
                }
                array_at(target, list_key).push(item.clone());
                Ok(())
            })
        })
    }
}

/// Run `edit` on the JSON form of the current entry (or a fresh one) and
/// rebuild the entry, keeping its identity and timestamps consistent.
fn apply_to_entry<F>(
    current: Option<DailyLogEntry>,
    date: NaiveDate,
    edit: F,
) -> AppResult<DailyLogEntry>
where
    F: FnOnce(&mut Value) -> AppResult<()>,
{
    let now = Local::now().to_rfc3339();
    let base = current.unwrap_or_else(|| DailyLogEntry::new(date));
    let created_at = if base.created_at.is_empty() {
        now.clone()
    } else {
        base.created_at.clone()
    };

    let mut doc = serde_json::to_value(&base)?;
    edit(&mut doc)?;

    let mut entry: DailyLogEntry = serde_json::from_value(doc)?;
    let fresh = DailyLogEntry::new(date);
    entry.id = fresh.id;
    entry.date = fresh.date;
    entry.created_at = created_at;
    entry.last_modified_at = now;

    debug!(entry = %entry.id, periods = entry.periods.len(), "entry updated");
    Ok(entry)
}

fn validate_patch(patch: &Value) -> AppResult<Map<String, Value>> {
    let Value::Object(map) = patch else {
        return Err(AppError::InvalidInput("entry patch must be a JSON object".into()));
    };

    let mut clean = Map::new();
    for (key, value) in map {
        if PROTECTED_KEYS.contains(&key.as_str()) {
            continue;
        }
        let canonical = if key == KEY_GENERAL_OBSERVATIONS {
            if !(value.is_string() || value.is_null()) {
                return Err(AppError::InvalidInput(
                    "generalObservations must be a string".into(),
                ));
            }
            key.clone()
        } else {
            let period = key.parse::<PeriodId>()?;
            if !(value.is_object() || value.is_null()) {
                return Err(AppError::InvalidInput(format!(
                    "period '{key}' must be a JSON object"
                )));
            }
            period.as_str().to_string()
        };
        // stored keys are always the canonical period ids
        if clean.insert(canonical.clone(), value.clone()).is_some() {
            return Err(AppError::InvalidInput(format!(
                "entry patch sets '{canonical}' more than once"
            )));
        }
    }

    if clean.is_empty() {
        return Err(AppError::InvalidInput("entry patch has nothing to save".into()));
    }
    Ok(clean)
}

fn validate_item(period: PeriodId, item: &LineItem) -> AppResult<()> {
    if period.is_events() {
        return Err(AppError::InvalidInput(
            "events do not carry billed or internal consumption items".into(),
        ));
    }
    check_amounts(item.quantity, item.value)
}

fn check_amounts(quantity: i64, value: Decimal) -> AppResult<()> {
    if quantity < 0 || value.is_sign_negative() {
        return Err(AppError::InvalidInput(
            "quantity and value cannot be negative".into(),
        ));
    }
    if !quantity_in_range(quantity) || !amount_in_range(value) {
        return Err(AppError::InvalidInput(format!(
            "quantity above {MAX_QUANTITY} or value above R$ 10 trillion"
        )));
    }
    Ok(())
}

fn non_blank<'a>(s: &'a str, what: &str) -> AppResult<&'a str> {
    let trimmed = s.trim();
    if trimmed.is_empty() {
        return Err(AppError::InvalidInput(format!("{what} cannot be empty")));
    }
    Ok(trimmed)
}

fn new_item_id(prefix: &str) -> String {
    let now = Local::now();
    format!(
        "{prefix}-{}",
        now.timestamp_nanos_opt()
            .unwrap_or_else(|| now.timestamp_micros())
    )
}

/// Object map of `v`, replacing any non-object value with an empty object.
fn object_map(v: &mut Value) -> &mut Map<String, Value> {
    if !v.is_object() {
        *v = Value::Object(Map::new());
    }
    match v {
        Value::Object(map) => map,
        _ => unreachable!("value was just made an object"),
    }
}

fn object_at<'a>(v: &'a mut Value, key: &str) -> &'a mut Value {
    let slot = object_map(v)
        .entry(key.to_string())
        .or_insert_with(|| Value::Object(Map::new()));
    object_map(slot);
    slot
}

fn array_at<'a>(v: &'a mut Value, key: &str) -> &'a mut Vec<Value> {
    let slot = object_map(v)
        .entry(key.to_string())
        .or_insert_with(|| Value::Array(Vec::new()));
    if !slot.is_array() {
        *slot = Value::Array(Vec::new());
    }
    match slot {
        Value::Array(items) => items,
        _ => unreachable!("value was just made an array"),
    }
}
