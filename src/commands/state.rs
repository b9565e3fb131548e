use crate::models::assumptions::ObjectiveMode;
use crate::models::channel::{ChannelCategory, ChannelDetails, ProspectingChannel};
use crate::models::state::AppState;
use crate::models::tracking::{MONTHS_PER_YEAR, WEEKS_PER_MONTH};
use chrono::NaiveDate;
use serde::de::DeserializeOwned;
use serde_json::{json, Map, Value};

const WEEK_FIELDS: [&str; 3] = ["actionsDone", "contactsObtained", "rdvObtained"];
const MANUAL_COUNT_FIELDS: [&str; 4] = ["manualSales", "manualOffers", "manualVisits", "manualMandates"];
const ASSUMPTION_AMOUNTS: [&str; 6] = [
    "monthlyNetSalaryGoal",
    "targetTurnover",
    "avgFee",
    "mandatesPerSale",
    "r1PerMandate",
    "visitsPerOffer",
];
const ASSUMPTION_COUNTS: [&str; 2] = ["targetSales", "monthsWorked"];

/// Decode a stored blob, filling gaps from defaults. Anything unreadable yields the default state.
pub fn decode_state(raw: &str) -> AppState {
    let original = match serde_json::from_str::<Value>(raw) {
        Ok(value) => value,
        Err(err) => {
            log::warn!("stored state is not valid JSON, starting fresh: {err}");
            return AppState::default();
        }
    };

    let migrated = migrate_state(original.clone());
    if migrated != original {
        log::info!("applied defaults to stored state");
    }

    serde_json::from_value(migrated).unwrap_or_else(|err| {
        log::warn!("stored state has an unexpected shape, starting fresh: {err}");
        AppState::default()
    })
}

pub fn encode_state(state: &AppState) -> Result<String, serde_json::Error> {
    serde_json::to_string(state)
}

pub(crate) fn default_state_value() -> Value {
    serde_json::to_value(AppState::default()).unwrap_or_else(|_| json!({}))
}

/// Bring a raw blob up to the current shape without touching valid values.
pub fn migrate_state(input: Value) -> Value {
    let defaults = default_state_value();
    let mut out = match input {
        Value::Object(map) => Value::Object(map),
        _ => Value::Object(Map::new()),
    };

    if let Some(obj) = out.as_object_mut() {
        if !obj.get("assumptions").is_some_and(Value::is_object) {
            obj.remove("assumptions");
        }
        let channels_valid = obj
            .get("assumptions")
            .and_then(|a| a.get("channels"))
            .is_some_and(Value::is_array);
        if !channels_valid {
            if let Some(assumptions) = obj.get_mut("assumptions").and_then(Value::as_object_mut) {
                assumptions.remove("channels");
            }
        }
    }

    deep_merge_defaults(&mut out, &defaults);
    ensure_key(&mut out, "isConfigured", json!(false));
    if let Some(obj) = out.as_object_mut() {
        if !obj.get("isConfigured").is_some_and(Value::is_boolean) {
            obj.insert("isConfigured".to_string(), json!(false));
        }
    }
    sanitize_assumptions(&mut out, &defaults);

    let channel_ids = channel_ids(&out);
    normalize_tracking(&mut out, &channel_ids);
    normalize_active_days(&mut out);

    out
}

fn deep_merge_defaults(target: &mut Value, defaults: &Value) {
    let (Some(target_obj), Some(default_obj)) = (target.as_object_mut(), defaults.as_object()) else {
        return;
    };

    for (key, default_value) in default_obj {
        match target_obj.get_mut(key) {
            Some(existing) => {
                if existing.is_object() && default_value.is_object() {
                    deep_merge_defaults(existing, default_value);
                }
            }
            None => {
                target_obj.insert(key.clone(), default_value.clone());
            }
        }
    }
}

fn ensure_key(target: &mut Value, key: &str, value: Value) {
    if let Some(obj) = target.as_object_mut() {
        obj.entry(key.to_string()).or_insert(value);
    }
}

fn parses_as<T: DeserializeOwned>(value: Option<&Value>) -> bool {
    value.is_some_and(|v| serde_json::from_value::<T>(v.clone()).is_ok())
}

fn finite_number(value: Option<&Value>) -> Option<f64> {
    value.and_then(Value::as_f64).filter(|v| v.is_finite())
}

/// Whole non-negative count within `u32`, or `None` when the value is not a number.
fn whole_count(value: Option<&Value>) -> Option<u64> {
    let value = value?;
    value
        .as_u64()
        .or_else(|| finite_number(Some(value)).map(|v| v.max(0.0).round() as u64))
        .map(|v| v.min(u32::MAX as u64))
}

/// Repair scalars a settings form can leave behind (`null` from an empty
/// field, fractional counts) and drop channel entries that cannot be read.
fn sanitize_assumptions(state: &mut Value, defaults: &Value) {
    let empty = Map::new();
    let fallback = defaults
        .get("assumptions")
        .and_then(Value::as_object)
        .unwrap_or(&empty);
    let Some(assumptions) = state.get_mut("assumptions").and_then(Value::as_object_mut) else {
        return;
    };
    if !parses_as::<ObjectiveMode>(assumptions.get("objectiveMode")) {
        reset_key(assumptions, fallback, "objectiveMode");
    }
    for key in ASSUMPTION_AMOUNTS {
        if finite_number(assumptions.get(key)).is_none() {
            reset_key(assumptions, fallback, key);
        }
    }
    for key in ASSUMPTION_COUNTS {
        match whole_count(assumptions.get(key)) {
            Some(count) => {
                assumptions.insert(key.to_string(), json!(count));
            }
            None => reset_key(assumptions, fallback, key),
        }
    }

    let catalog: &[Value] = fallback
        .get("channels")
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[]);
    let channels = match assumptions.remove("channels") {
        Some(Value::Array(channels)) => channels,
        _ => Vec::new(),
    };
    let channels: Vec<Value> = channels
        .into_iter()
        .filter_map(|channel| repair_channel(channel, catalog))
        .collect();
    assumptions.insert("channels".to_string(), Value::Array(channels));
}

fn reset_key(target: &mut Map<String, Value>, fallback: &Map<String, Value>, key: &str) {
    if let Some(value) = fallback.get(key) {
        target.insert(key.to_string(), value.clone());
    }
}

/// Fill unreadable channel fields from the catalog entry with the same id.
/// A cleared share becomes 0; entries without an id are dropped.
fn repair_channel(raw: Value, catalog: &[Value]) -> Option<Value> {
    let Value::Object(mut channel) = raw else {
        log::warn!("dropping stored channel that is not an object");
        return None;
    };
    let id = channel.get("id").and_then(Value::as_str)?.to_string();
    let seed = catalog
        .iter()
        .find(|c| c.get("id").and_then(Value::as_str) == Some(id.as_str()));
    let seeded = |key: &str, otherwise: Value| seed.and_then(|c| c.get(key)).cloned().unwrap_or(otherwise);

    if !channel.get("name").is_some_and(Value::is_string) {
        channel.insert("name".to_string(), seeded("name", json!(id)));
    }
    if !channel.get("enabled").is_some_and(Value::is_boolean) {
        channel.insert("enabled".to_string(), seeded("enabled", json!(false)));
    }
    let share = whole_count(channel.get("distributionPercent")).unwrap_or(0);
    channel.insert("distributionPercent".to_string(), json!(share));
    if finite_number(channel.get("actionsPerR1")).is_none() {
        channel.insert("actionsPerR1".to_string(), seeded("actionsPerR1", json!(0.0)));
    }
    if !channel.get("actionUnit").is_some_and(Value::is_string) {
        channel.insert("actionUnit".to_string(), seeded("actionUnit", json!("actions")));
    }
    if !parses_as::<ChannelCategory>(channel.get("category")) {
        channel.insert("category".to_string(), seeded("category", json!(ChannelCategory::Autre)));
    }
    if !parses_as::<Option<String>>(channel.get("description")) {
        channel.remove("description");
    }
    if !parses_as::<Option<ChannelDetails>>(channel.get("details")) {
        channel.remove("details");
    }

    let repaired = Value::Object(channel);
    match serde_json::from_value::<ProspectingChannel>(repaired.clone()) {
        Ok(_) => Some(repaired),
        Err(err) => {
            log::warn!("dropping unreadable stored channel {id}: {err}");
            None
        }
    }
}

fn channel_ids(state: &Value) -> Vec<String> {
    state
        .get("assumptions")
        .and_then(|a| a.get("channels"))
        .and_then(Value::as_array)
        .map(|channels| {
            channels
                .iter()
                .filter_map(|c| c.get("id").and_then(Value::as_str))
                .map(str::to_string)
                .collect()
        })
        .unwrap_or_default()
}

fn empty_month(month_index: usize, channel_ids: &[String]) -> Value {
    json!({
        "monthIndex": month_index,
        "channelTracking": channel_ids
            .iter()
            .map(|id| json!({ "channelId": id, "weeks": vec![empty_week(); WEEKS_PER_MONTH] }))
            .collect::<Vec<_>>(),
        "manualTurnover": 0,
        "manualSales": 0,
        "manualOffers": 0,
        "manualVisits": 0,
        "manualMandates": 0
    })
}

fn empty_week() -> Value {
    json!({ "actionsDone": 0, "contactsObtained": 0, "rdvObtained": 0 })
}

/// Exactly twelve months, numbered by position.
fn normalize_tracking(state: &mut Value, channel_ids: &[String]) {
    let Some(obj) = state.as_object_mut() else {
        return;
    };

    let mut months = match obj.remove("tracking") {
        Some(Value::Array(months)) => months,
        _ => Vec::new(),
    };
    months.truncate(MONTHS_PER_YEAR);
    while months.len() < MONTHS_PER_YEAR {
        months.push(empty_month(months.len(), channel_ids));
    }

    for (month_index, month) in months.iter_mut().enumerate() {
        if !month.is_object() {
            *month = empty_month(month_index, channel_ids);
        }
        if let Some(month_obj) = month.as_object_mut() {
            month_obj.insert("monthIndex".to_string(), json!(month_index));
            sanitize_month(month_obj);
        }
    }

    obj.insert("tracking".to_string(), Value::Array(months));
}

fn sanitize_month(month: &mut Map<String, Value>) {
    for key in MANUAL_COUNT_FIELDS {
        clamp_count(month, key);
    }
    let turnover = month
        .get("manualTurnover")
        .and_then(Value::as_f64)
        .filter(|v| v.is_finite())
        .unwrap_or(0.0)
        .max(0.0);
    month.insert("manualTurnover".to_string(), json!(turnover));

    let rows = match month.remove("channelTracking") {
        Some(Value::Array(rows)) => rows,
        _ => Vec::new(),
    };
    let rows: Vec<Value> = rows
        .into_iter()
        .filter_map(|row| {
            let channel_id = row.get("channelId").and_then(Value::as_str)?.to_string();
            let mut weeks = match row.get("weeks") {
                Some(Value::Array(weeks)) => weeks.clone(),
                _ => Vec::new(),
            };
            weeks.truncate(WEEKS_PER_MONTH);
            weeks.resize_with(WEEKS_PER_MONTH, empty_week);
            for week in &mut weeks {
                if !week.is_object() {
                    *week = empty_week();
                }
                if let Some(week_obj) = week.as_object_mut() {
                    for key in WEEK_FIELDS {
                        clamp_count(week_obj, key);
                    }
                }
            }
            Some(json!({ "channelId": channel_id, "weeks": weeks }))
        })
        .collect();
    month.insert("channelTracking".to_string(), Value::Array(rows));
}

/// Non-negative whole count; missing or malformed values become 0.
fn clamp_count(map: &mut Map<String, Value>, key: &str) {
    let value = whole_count(map.get(key)).unwrap_or(0);
    map.insert(key.to_string(), json!(value));
}

/// Keep valid `YYYY-MM-DD` entries once each, in stored order.
fn normalize_active_days(state: &mut Value) {
    let Some(obj) = state.as_object_mut() else {
        return;
    };

    let mut seen: Vec<NaiveDate> = Vec::new();
    if let Some(Value::Array(days)) = obj.get("activeDays") {
        for day in days.iter().filter_map(Value::as_str) {
            if let Ok(date) = NaiveDate::parse_from_str(day, "%Y-%m-%d") {
                if !seen.contains(&date) {
                    seen.push(date);
                }
            }
        }
    }

    let days: Vec<Value> = seen
        .iter()
        .map(|d| json!(d.format("%Y-%m-%d").to_string()))
        .collect();
    obj.insert("activeDays".to_string(), Value::Array(days));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::assumptions::ObjectiveMode;
    use crate::models::catalog::default_channels;

    #[test]
    fn empty_blob_becomes_default_state() {
        assert_eq!(decode_state("{}"), AppState::default());
        assert_eq!(decode_state("not json"), AppState::default());
        assert_eq!(decode_state("[1, 2]"), AppState::default());
    }

    #[test]
    fn missing_channels_and_visits_are_defaulted() {
        let raw = json!({
            "isConfigured": true,
            "assumptions": {
                "objectiveMode": "annualTurnover",
                "targetTurnover": 200000,
                "avgFee": 10000
            },
            "tracking": []
        });

        let state = decode_state(&raw.to_string());
        assert!(state.is_configured);
        assert_eq!(state.assumptions.objective_mode, ObjectiveMode::AnnualTurnover);
        assert_eq!(state.assumptions.target_turnover, 200000.0);
        assert_eq!(state.assumptions.visits_per_offer, 10.0);
        assert_eq!(state.assumptions.channels, default_channels());
        assert!(state.active_days.is_empty());
    }

    #[test]
    fn tracking_is_padded_and_renumbered() {
        let raw = json!({
            "assumptions": { "channels": [] },
            "tracking": [
                { "monthIndex": 7, "channelTracking": [], "manualSales": 2 },
                "garbage"
            ]
        });

        let state = decode_state(&raw.to_string());
        assert_eq!(state.tracking.len(), 12);
        assert_eq!(state.tracking[0].month_index, 0);
        assert_eq!(state.tracking[0].manual_sales, 2);
        assert_eq!(state.tracking[0].manual_offers, 0);
        assert_eq!(state.tracking[11].month_index, 11);
        assert!(state.assumptions.channels.is_empty());
    }

    #[test]
    fn extra_months_are_dropped() {
        let months: Vec<Value> = (0..14).map(|i| empty_month(i, &[])).collect();
        let migrated = migrate_state(json!({ "tracking": months }));
        assert_eq!(migrated["tracking"].as_array().map(Vec::len), Some(12));
    }

    #[test]
    fn short_week_lists_are_padded() {
        let raw = json!({
            "tracking": [{
                "channelTracking": [{
                    "channelId": "pige",
                    "weeks": [{ "actionsDone": 12, "contactsObtained": 3, "rdvObtained": 1 }]
                }]
            }]
        });

        let state = decode_state(&raw.to_string());
        let row = state.tracking[0].channel("pige").unwrap();
        assert_eq!(row.weeks[0].actions_done, 12);
        assert_eq!(row.weeks[3].rdv_obtained, 0);
    }

    #[test]
    fn negative_counts_are_clamped() {
        let raw = json!({
            "tracking": [{
                "manualSales": -3,
                "manualTurnover": -100,
                "channelTracking": [{
                    "channelId": "pige",
                    "weeks": [{ "actionsDone": -4 }, {}, {}, {}]
                }]
            }]
        });

        let state = decode_state(&raw.to_string());
        assert_eq!(state.tracking[0].manual_sales, 0);
        assert_eq!(state.tracking[0].manual_turnover, 0.0);
        assert_eq!(state.tracking[0].channel("pige").unwrap().weeks[0].actions_done, 0);
    }

    #[test]
    fn active_days_are_validated_and_deduplicated() {
        let raw = json!({
            "activeDays": ["2025-03-02", "2025-03-02", "yesterday", 42, "2025-02-30", "2025-03-04"]
        });

        let state = decode_state(&raw.to_string());
        assert_eq!(
            state.active_days,
            vec![
                NaiveDate::from_ymd_opt(2025, 3, 2).unwrap(),
                NaiveDate::from_ymd_opt(2025, 3, 4).unwrap(),
            ]
        );
    }

    fn configured_blob(edit: impl FnOnce(&mut Value)) -> String {
        let mut state = AppState::default();
        state.is_configured = true;
        state.tracking[2].manual_sales = 3;
        state.active_days.push(NaiveDate::from_ymd_opt(2025, 3, 5).unwrap());
        let mut raw = serde_json::to_value(&state).unwrap();
        edit(&mut raw["assumptions"]);
        raw.to_string()
    }

    #[test]
    fn cleared_amount_fields_fall_back_without_losing_tracking() {
        let raw = configured_blob(|assumptions| {
            assumptions["avgFee"] = Value::Null;
            assumptions["targetTurnover"] = Value::Null;
            assumptions["targetSales"] = Value::Null;
            assumptions["monthlyNetSalaryGoal"] = json!("");
        });

        let state = decode_state(&raw);
        assert!(state.is_configured);
        assert_eq!(state.tracking[2].manual_sales, 3);
        assert_eq!(state.active_days.len(), 1);
        assert_eq!(state.assumptions.avg_fee, 8500.0);
        assert_eq!(state.assumptions.target_turnover, 150_000.0);
        assert_eq!(state.assumptions.target_sales, 15);
        assert_eq!(state.assumptions.monthly_net_salary_goal, 3000.0);
    }

    #[test]
    fn fractional_counts_are_rounded() {
        let raw = configured_blob(|assumptions| {
            assumptions["monthsWorked"] = json!(9.6);
            assumptions["targetSales"] = json!(-2);
        });

        let state = decode_state(&raw);
        assert!(state.is_configured);
        assert_eq!(state.tracking[2].manual_sales, 3);
        assert_eq!(state.assumptions.months_worked, 10);
        assert_eq!(state.assumptions.target_sales, 0);
    }

    #[test]
    fn unknown_objective_mode_is_reset() {
        let raw = configured_blob(|assumptions| assumptions["objectiveMode"] = json!("weekly"));

        let state = decode_state(&raw);
        assert!(state.is_configured);
        assert_eq!(state.assumptions.objective_mode, ObjectiveMode::MonthlyIncome);
    }

    #[test]
    fn malformed_channels_are_repaired_or_dropped() {
        let raw = configured_blob(|assumptions| {
            let channels = assumptions["channels"].as_array_mut().unwrap();
            let pige = channels.iter_mut().find(|c| c["id"] == "pige").unwrap();
            pige["distributionPercent"] = Value::Null;
            pige["actionsPerR1"] = Value::Null;
            pige["category"] = Value::Null;
            pige["details"] = json!({ "horizon": 3 });
            channels.push(json!("garbage"));
            channels.push(json!({ "name": "Sans identifiant" }));
            channels.push(json!({ "id": "custom_1", "name": "Salon", "distributionPercent": 12.4 }));
        });

        let state = decode_state(&raw);
        assert!(state.is_configured);
        assert_eq!(state.tracking[2].manual_sales, 3);

        let catalog = default_channels();
        assert_eq!(state.assumptions.channels.len(), catalog.len() + 1);

        let pige = state.assumptions.channel("pige").unwrap();
        let seed = catalog.iter().find(|c| c.id == "pige").unwrap();
        assert_eq!(pige.distribution_percent, 0);
        assert_eq!(pige.actions_per_r1, seed.actions_per_r1);
        assert_eq!(pige.category, seed.category);
        assert!(pige.details.is_none());

        let custom = state.assumptions.channel("custom_1").unwrap();
        assert_eq!(custom.distribution_percent, 12);
        assert!(!custom.enabled);
        assert_eq!(custom.actions_per_r1, 0.0);
        assert_eq!(custom.category, ChannelCategory::Autre);
    }

    #[test]
    fn wrong_typed_configured_flag_is_cleared() {
        let raw = json!({ "isConfigured": "yes", "tracking": [{ "manualSales": 4 }] });

        let state = decode_state(&raw.to_string());
        assert!(!state.is_configured);
        assert_eq!(state.tracking[0].manual_sales, 4);
    }

    #[test]
    fn valid_state_survives_encode_and_decode() {
        let mut state = AppState::default();
        state.is_configured = true;
        state.tracking[3].manual_turnover = 8500.0;
        state.active_days.push(NaiveDate::from_ymd_opt(2025, 4, 1).unwrap());

        let raw = encode_state(&state).unwrap();
        assert!(raw.contains("\"isConfigured\":true"));
        assert!(raw.contains("\"activeDays\":[\"2025-04-01\"]"));
        assert_eq!(decode_state(&raw), state);
    }
}
