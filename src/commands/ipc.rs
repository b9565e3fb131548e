use crate::commands::dashboard::{self, NewChannel};
use crate::commands::store::SharedStore;
use crate::models::assumptions::{Assumptions, GlobalTargets};
use crate::models::channel::ChannelTarget;
use crate::models::report::{
    AdminReport, CategoryGroup, CoachReport, ConsistencyReport, MonthActuals, Totals, WeeklyPoint,
};
use crate::models::state::AppState;
use crate::models::tracking::{ManualFieldsPatch, TrackingField};
use tauri::State;

#[tauri::command]
pub async fn get_state(store: State<'_, SharedStore>) -> Result<AppState, String> {
    dashboard::get_state(store.inner()).await
}

#[tauri::command]
pub async fn get_global_targets(store: State<'_, SharedStore>) -> Result<GlobalTargets, String> {
    dashboard::get_global_targets(store.inner()).await
}

#[tauri::command]
pub async fn get_channel_targets(store: State<'_, SharedStore>) -> Result<Vec<ChannelTarget>, String> {
    dashboard::get_channel_targets(store.inner()).await
}

#[tauri::command]
pub async fn get_roadmap(store: State<'_, SharedStore>) -> Result<Vec<CategoryGroup>, String> {
    dashboard::get_roadmap(store.inner()).await
}

#[tauri::command]
pub async fn get_actuals(store: State<'_, SharedStore>) -> Result<Totals, String> {
    dashboard::get_actuals(store.inner()).await
}

#[tauri::command]
pub async fn get_month_actuals(
    store: State<'_, SharedStore>,
    month_index: usize,
) -> Result<MonthActuals, String> {
    dashboard::get_month_actuals(store.inner(), month_index).await
}

#[tauri::command]
pub async fn get_coach_report(store: State<'_, SharedStore>) -> Result<CoachReport, String> {
    dashboard::get_coach_report(store.inner()).await
}

#[tauri::command]
pub async fn get_admin_report(
    store: State<'_, SharedStore>,
    month_index: usize,
) -> Result<AdminReport, String> {
    dashboard::get_admin_report(store.inner(), month_index).await
}

#[tauri::command]
pub async fn get_consistency(
    store: State<'_, SharedStore>,
    month_index: usize,
) -> Result<ConsistencyReport, String> {
    dashboard::get_consistency(store.inner(), month_index).await
}

#[tauri::command]
pub async fn get_weekly_series(store: State<'_, SharedStore>) -> Result<Vec<WeeklyPoint>, String> {
    dashboard::get_weekly_series(store.inner()).await
}

#[tauri::command]
pub async fn estimate_channel_time(actions: u32, channel_id: String) -> Result<String, String> {
    dashboard::estimate_channel_time(actions, channel_id).await
}

#[tauri::command]
pub async fn save_assumptions(
    store: State<'_, SharedStore>,
    assumptions: Assumptions,
) -> Result<AppState, String> {
    dashboard::save_assumptions(store.inner(), assumptions).await
}

#[tauri::command]
pub async fn finish_wizard(
    store: State<'_, SharedStore>,
    assumptions: Assumptions,
) -> Result<AppState, String> {
    dashboard::finish_wizard(store.inner(), assumptions).await
}

#[tauri::command]
pub async fn update_month(
    store: State<'_, SharedStore>,
    month_index: usize,
    patch: ManualFieldsPatch,
) -> Result<AppState, String> {
    dashboard::update_month(store.inner(), month_index, patch).await
}

#[tauri::command]
pub async fn update_channel_tracking(
    store: State<'_, SharedStore>,
    month_index: usize,
    channel_id: String,
    week_index: usize,
    field: TrackingField,
    value: u32,
) -> Result<AppState, String> {
    dashboard::update_channel_tracking(store.inner(), month_index, channel_id, week_index, field, value).await
}

#[tauri::command]
pub async fn reset_wizard(store: State<'_, SharedStore>) -> Result<AppState, String> {
    dashboard::reset_wizard(store.inner()).await
}

#[tauri::command]
pub async fn add_custom_channel(draft: Assumptions, channel: NewChannel) -> Result<Assumptions, String> {
    dashboard::add_custom_channel(draft, channel).await
}

#[tauri::command]
pub async fn toggle_channel(draft: Assumptions, channel_id: String) -> Result<Assumptions, String> {
    dashboard::toggle_channel(draft, channel_id).await
}
