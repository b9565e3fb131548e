use crate::analysis::actuals::{aggregate_actuals, aggregate_month, weekly_series};
use crate::analysis::coaching::coach_report;
use crate::analysis::field_time::estimate_field_time;
use crate::analysis::regularity::analyze_consistency;
use crate::analysis::reporting::build_admin_report;
use crate::analysis::targets::{channels_by_category, compute_channel_targets, compute_global_targets};
use crate::commands::store::{AppStore, SharedStore};
use crate::commands::validation::validate_distribution;
use crate::error::StoreError;
use crate::models::assumptions::{Assumptions, GlobalTargets};
use crate::models::channel::{ChannelCategory, ChannelTarget};
use crate::models::report::{
    AdminReport, CategoryGroup, CoachReport, ConsistencyReport, MonthActuals, Totals, WeeklyPoint,
};
use crate::models::state::AppState;
use crate::models::tracking::{ManualFieldsPatch, TrackingField};
use chrono::{Datelike, NaiveDate};
use serde::{Deserialize, Serialize};
use std::sync::{Arc, MutexGuard};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewChannel {
    pub name: String,
    pub actions_per_r1: f64,
    pub action_unit: String,
    #[serde(default)]
    pub category: ChannelCategory,
}

fn lock(store: &SharedStore) -> Result<MutexGuard<'_, AppStore>, String> {
    store.lock().map_err(|_| "Store lock error".to_string())
}

fn read(store: &SharedStore) -> Result<(Arc<AppState>, NaiveDate), String> {
    let guard = lock(store)?;
    Ok((guard.snapshot(), guard.today()))
}

fn month_out_of_range(month_index: usize) -> String {
    StoreError::MonthOutOfRange(month_index).to_string()
}

fn reject_invalid(assumptions: &Assumptions) -> Result<(), String> {
    validate_distribution(assumptions).map_err(|err| {
        log::warn!("rejected assumptions: {err}");
        StoreError::from(err).to_string()
    })
}

pub async fn get_state(store: &SharedStore) -> Result<AppState, String> {
    let (state, _) = read(store)?;
    Ok(AppState::clone(&state))
}

pub async fn get_global_targets(store: &SharedStore) -> Result<GlobalTargets, String> {
    let (state, _) = read(store)?;
    Ok(compute_global_targets(&state.assumptions))
}

pub async fn get_channel_targets(store: &SharedStore) -> Result<Vec<ChannelTarget>, String> {
    let (state, _) = read(store)?;
    let globals = compute_global_targets(&state.assumptions);
    Ok(compute_channel_targets(globals.monthly_r1, &state.assumptions.channels))
}

/// Enabled channels with work to do, grouped by category.
pub async fn get_roadmap(store: &SharedStore) -> Result<Vec<CategoryGroup>, String> {
    let (state, _) = read(store)?;
    let globals = compute_global_targets(&state.assumptions);
    let targets = compute_channel_targets(globals.monthly_r1, &state.assumptions.channels);
    Ok(channels_by_category(&targets, &state.assumptions.channels))
}

pub async fn get_actuals(store: &SharedStore) -> Result<Totals, String> {
    let (state, _) = read(store)?;
    Ok(aggregate_actuals(&state.tracking))
}

pub async fn get_month_actuals(store: &SharedStore, month_index: usize) -> Result<MonthActuals, String> {
    let (state, _) = read(store)?;
    state
        .month(month_index)
        .map(aggregate_month)
        .ok_or_else(|| month_out_of_range(month_index))
}

pub async fn get_coach_report(store: &SharedStore) -> Result<CoachReport, String> {
    let (state, today) = read(store)?;
    Ok(coach_report(&state, today))
}

pub async fn get_admin_report(store: &SharedStore, month_index: usize) -> Result<AdminReport, String> {
    let (state, today) = read(store)?;
    build_admin_report(&state, month_index, today.year()).ok_or_else(|| month_out_of_range(month_index))
}

pub async fn get_consistency(store: &SharedStore, month_index: usize) -> Result<ConsistencyReport, String> {
    let (state, _) = read(store)?;
    state
        .month(month_index)
        .map(analyze_consistency)
        .ok_or_else(|| month_out_of_range(month_index))
}

pub async fn get_weekly_series(store: &SharedStore) -> Result<Vec<WeeklyPoint>, String> {
    let (state, today) = read(store)?;
    Ok(weekly_series(&state.tracking, today.month0() as usize))
}

pub async fn estimate_channel_time(actions: u32, channel_id: String) -> Result<String, String> {
    Ok(estimate_field_time(actions, &channel_id))
}

pub async fn save_assumptions(store: &SharedStore, assumptions: Assumptions) -> Result<AppState, String> {
    reject_invalid(&assumptions)?;
    let mut guard = lock(store)?;
    guard.replace_assumptions(assumptions);
    Ok(AppState::clone(&guard.snapshot()))
}

/// Commit the wizard's assumptions and leave setup mode.
pub async fn finish_wizard(store: &SharedStore, assumptions: Assumptions) -> Result<AppState, String> {
    reject_invalid(&assumptions)?;
    let mut guard = lock(store)?;
    guard.replace_assumptions(assumptions);
    guard.complete_wizard();
    log::info!("setup wizard completed");
    Ok(AppState::clone(&guard.snapshot()))
}

pub async fn update_month(
    store: &SharedStore,
    month_index: usize,
    patch: ManualFieldsPatch,
) -> Result<AppState, String> {
    let mut guard = lock(store)?;
    guard.patch_month(month_index, &patch).map_err(|e| e.to_string())?;
    Ok(AppState::clone(&guard.snapshot()))
}

pub async fn update_channel_tracking(
    store: &SharedStore,
    month_index: usize,
    channel_id: String,
    week_index: usize,
    field: TrackingField,
    value: u32,
) -> Result<AppState, String> {
    let mut guard = lock(store)?;
    guard
        .set_channel_cell(month_index, &channel_id, week_index, field, value)
        .map_err(|e| e.to_string())?;
    Ok(AppState::clone(&guard.snapshot()))
}

pub async fn reset_wizard(store: &SharedStore) -> Result<AppState, String> {
    let mut guard = lock(store)?;
    guard.reset_wizard();
    Ok(AppState::clone(&guard.snapshot()))
}

/// Add a user-defined channel to a draft. Nothing is persisted.
pub async fn add_custom_channel(mut draft: Assumptions, channel: NewChannel) -> Result<Assumptions, String> {
    draft
        .add_custom_channel(&channel.name, channel.actions_per_r1, &channel.action_unit, channel.category)
        .ok_or_else(|| StoreError::EmptyChannelName.to_string())?;
    Ok(draft)
}

/// Enable or disable a channel in a draft. Nothing is persisted.
pub async fn toggle_channel(mut draft: Assumptions, channel_id: String) -> Result<Assumptions, String> {
    if !draft.toggle_channel(&channel_id) {
        return Err(StoreError::UnknownChannel(channel_id).to_string());
    }
    Ok(draft)
}
