use crate::db::Storage;
use crate::db::log::audit;
use crate::errors::{AppError, AppResult};
use crate::models::lenient::decimal_from_value;
use crate::models::period_id::PeriodId;
use crate::models::settings::{
    AggregationConfig, SETTING_APP_NAME, SETTING_CARD_VISIBILITY, SETTING_CHANNEL_UNIT_PRICES,
    SETTING_CI_UNIT_PRICE_ALMOCO, SETTING_CI_UNIT_PRICE_JANTAR, SETTING_FATURADO_CLIENTS,
    SETTING_NO_SHOW_CLIENTS, SETTING_SUMMARY_CARD_ITEMS, SummaryCategory,
};
use serde_json::{Map, Value};
use std::collections::BTreeMap;
use tracing::warn;

pub struct SettingsLogic;

impl SettingsLogic {
    pub fn list(store: &dyn Storage) -> AppResult<BTreeMap<String, Value>> {
        store.all_settings()
    }

    pub fn get(store: &dyn Storage, key: &str) -> AppResult<Value> {
        store
            .get_setting(key)?
            .ok_or_else(|| AppError::NotFound(format!("setting '{key}'")))
    }

    /// Validate and store a setting. Known keys must have the expected shape;
    /// unknown keys are stored as given.
    pub fn set(store: &mut dyn Storage, key: &str, value: &Value, username: &str) -> AppResult<()> {
        let key = key.trim();
        if key.is_empty() {
            return Err(AppError::InvalidInput("setting key cannot be empty".into()));
        }
        let value = validate(key, value)?;

        store.save_setting(key, &value)?;
        audit(store, username, "settings_set", &format!("{key} = {value}"))
    }

    /// Aggregation inputs, read once per request.
    pub fn aggregation_config(store: &dyn Storage) -> AppResult<AggregationConfig> {
        Ok(AggregationConfig::from_settings(&store.all_settings()?))
    }
}

/// Shape-check a setting. Toggle maps come back keyed by canonical ids.
fn validate(key: &str, value: &Value) -> AppResult<Value> {
    let invalid = |what: &str| AppError::InvalidInput(format!("setting '{key}' must be {what}"));
    let plain = |ok: bool, what: &str| {
        if ok {
            Ok(value.clone())
        } else {
            Err(invalid(what))
        }
    };

    match key {
        SETTING_CI_UNIT_PRICE_ALMOCO | SETTING_CI_UNIT_PRICE_JANTAR => {
            plain(
                value.is_null() || decimal_from_value(value).is_some_and(|p| !p.is_sign_negative()),
                "a non-negative number or null",
            )
        }
        SETTING_SUMMARY_CARD_ITEMS => {
            let map = value.as_object().ok_or_else(|| invalid("an object"))?;
            let mut canonical = Map::new();
            for (k, v) in map {
                let category = SummaryCategory::from_key(k).ok_or_else(|| {
                    AppError::InvalidInput(format!("unknown summary category '{k}'"))
                })?;
                if !v.is_boolean() {
                    return Err(invalid("an object of booleans"));
                }
                canonical.insert(category.as_str().to_string(), v.clone());
            }
            Ok(Value::Object(canonical))
        }
        SETTING_CARD_VISIBILITY => {
            let map = value.as_object().ok_or_else(|| invalid("an object"))?;
            let mut canonical = Map::new();
            for (k, v) in map {
                let period = k.parse::<PeriodId>()?;
                if !v.is_boolean() {
                    return Err(invalid("an object of booleans"));
                }
                canonical.insert(period.as_str().to_string(), v.clone());
            }
            Ok(Value::Object(canonical))
        }
        SETTING_CHANNEL_UNIT_PRICES => {
            let map = value.as_object().ok_or_else(|| invalid("an object"))?;
            plain(
                map.values()
                    .all(|v| decimal_from_value(v).is_some_and(|p| !p.is_sign_negative())),
                "an object of non-negative numbers",
            )
        }
        SETTING_FATURADO_CLIENTS | SETTING_NO_SHOW_CLIENTS => plain(
            matches!(value, Value::Array(items) if items.iter().all(Value::is_string)),
            "an array of strings",
        ),
        SETTING_APP_NAME => plain(
            matches!(value, Value::String(s) if !s.trim().is_empty()),
            "a non-empty string",
        ),
        other => {
            warn!(key = other, "storing unknown setting");
            Ok(value.clone())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn known_keys_are_shape_checked() {
        assert!(validate(SETTING_CI_UNIT_PRICE_ALMOCO, &json!(25)).is_ok());
        assert!(validate(SETTING_CI_UNIT_PRICE_ALMOCO, &json!("25,50")).is_ok());
        assert!(validate(SETTING_CI_UNIT_PRICE_ALMOCO, &json!(null)).is_ok());
        assert!(validate(SETTING_CI_UNIT_PRICE_JANTAR, &json!(-1)).is_err());

        assert!(validate(SETTING_SUMMARY_CARD_ITEMS, &json!({ "frigobar": false })).is_ok());
        assert!(validate(SETTING_SUMMARY_CARD_ITEMS, &json!({ "lanche": false })).is_err());
        assert!(validate(SETTING_CARD_VISIBILITY, &json!({ "jantar": "no" })).is_err());

        assert!(validate(SETTING_FATURADO_CLIENTS, &json!(["A", "B"])).is_ok());
        assert!(validate(SETTING_FATURADO_CLIENTS, &json!(["A", 1])).is_err());
        assert!(validate(SETTING_APP_NAME, &json!("  ")).is_err());
        assert!(validate("somethingElse", &json!(1)).is_ok());
    }

    #[test]
    fn toggle_maps_are_stored_with_canonical_ids() {
        assert_eq!(
            validate(SETTING_CARD_VISIBILITY, &json!({ "Jantar": false })).unwrap(),
            json!({ "jantar": false })
        );
        assert_eq!(
            validate(SETTING_SUMMARY_CARD_ITEMS, &json!({ "FRIGOBAR": false })).unwrap(),
            json!({ "frigobar": false })
        );
    }
}
