use crate::commands::state::{decode_state, encode_state};
use crate::commands::storage::{KeyValueStore, MemoryStore, STORAGE_KEY};
use crate::error::StoreError;
use crate::models::assumptions::Assumptions;
use crate::models::state::AppState;
use crate::models::tracking::{ManualFieldsPatch, TrackingField, MONTHS_PER_YEAR, WEEKS_PER_MONTH};
use chrono::NaiveDate;
use std::sync::{Arc, Mutex};

/// Source of "today" for the activity log and date-bound views.
pub trait Clock: Send {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        chrono::Utc::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

pub type SharedStore = Arc<Mutex<AppStore>>;

pub fn with_assumptions(state: &AppState, assumptions: Assumptions) -> AppState {
    AppState {
        assumptions,
        ..state.clone()
    }
}

pub fn with_configured(state: &AppState, is_configured: bool) -> AppState {
    AppState {
        is_configured,
        ..state.clone()
    }
}

pub fn with_month_patch(
    state: &AppState,
    month_index: usize,
    patch: &ManualFieldsPatch,
) -> Result<AppState, StoreError> {
    check_month(state, month_index)?;
    let mut next = state.clone();
    next.tracking[month_index].apply(patch);
    Ok(next)
}

/// Write one weekly cell. A channel known to the assumptions but missing from
/// the month gets a zeroed row first.
pub fn with_channel_cell(
    state: &AppState,
    month_index: usize,
    channel_id: &str,
    week_index: usize,
    field: TrackingField,
    value: u32,
) -> Result<AppState, StoreError> {
    check_month(state, month_index)?;
    if week_index >= WEEKS_PER_MONTH {
        return Err(StoreError::WeekOutOfRange(week_index));
    }
    let month = &state.tracking[month_index];
    if month.channel(channel_id).is_none() && state.assumptions.channel(channel_id).is_none() {
        return Err(StoreError::UnknownChannel(channel_id.to_string()));
    }

    let mut next = state.clone();
    next.tracking[month_index]
        .channel_mut_or_insert(channel_id)
        .weeks[week_index]
        .set(field, value);
    Ok(next)
}

/// Record activity on `day`. Returns `None` when the day is already logged.
pub fn with_activity(state: &AppState, day: NaiveDate) -> Option<AppState> {
    if state.was_active_on(day) {
        return None;
    }
    let mut next = state.clone();
    next.active_days.push(day);
    Some(next)
}

fn check_month(state: &AppState, month_index: usize) -> Result<(), StoreError> {
    if month_index >= MONTHS_PER_YEAR || month_index >= state.tracking.len() {
        return Err(StoreError::MonthOutOfRange(month_index));
    }
    Ok(())
}

/// Owns the current state snapshot and writes it through on every mutation.
pub struct AppStore {
    state: Arc<AppState>,
    storage: Box<dyn KeyValueStore + Send>,
    clock: Box<dyn Clock>,
    storage_key: String,
}

impl AppStore {
    pub fn open(storage: Box<dyn KeyValueStore + Send>, clock: Box<dyn Clock>, storage_key: &str) -> Self {
        let state = match storage.get(storage_key) {
            Some(raw) => decode_state(&raw),
            None => {
                log::info!("no stored state under {storage_key}, using defaults");
                AppState::default()
            }
        };

        Self {
            state: Arc::new(state),
            storage,
            clock,
            storage_key: storage_key.to_string(),
        }
    }

    /// Ephemeral store on the system clock.
    pub fn in_memory() -> Self {
        Self::open(Box::new(MemoryStore::new()), Box::new(SystemClock), STORAGE_KEY)
    }

    pub fn into_shared(self) -> SharedStore {
        Arc::new(Mutex::new(self))
    }

    pub fn snapshot(&self) -> Arc<AppState> {
        Arc::clone(&self.state)
    }

    pub fn today(&self) -> NaiveDate {
        self.clock.today()
    }

    pub fn replace_assumptions(&mut self, assumptions: Assumptions) {
        let next = with_assumptions(&self.state, assumptions);
        self.commit_active(next);
    }

    pub fn patch_month(&mut self, month_index: usize, patch: &ManualFieldsPatch) -> Result<(), StoreError> {
        let next = with_month_patch(&self.state, month_index, patch)?;
        self.commit_active(next);
        Ok(())
    }

    pub fn set_channel_cell(
        &mut self,
        month_index: usize,
        channel_id: &str,
        week_index: usize,
        field: TrackingField,
        value: u32,
    ) -> Result<(), StoreError> {
        let next = with_channel_cell(&self.state, month_index, channel_id, week_index, field, value)?;
        self.commit_active(next);
        Ok(())
    }

    pub fn complete_wizard(&mut self) {
        let next = with_configured(&self.state, true);
        self.commit_active(next);
    }

    /// Back to the setup wizard. Not counted as activity.
    pub fn reset_wizard(&mut self) {
        let next = with_configured(&self.state, false);
        self.commit(next);
    }

    /// Log today's activity if not already logged.
    pub fn touch(&mut self) {
        if let Some(next) = with_activity(&self.state, self.clock.today()) {
            self.commit(next);
        }
    }

    fn commit_active(&mut self, next: AppState) {
        let today = self.clock.today();
        let next = with_activity(&next, today).unwrap_or(next);
        self.commit(next);
    }

    fn commit(&mut self, next: AppState) {
        self.state = Arc::new(next);
        if let Err(err) = self.persist() {
            log::warn!("failed to persist state: {err}");
        }
    }

    fn persist(&mut self) -> Result<(), StoreError> {
        let raw = encode_state(&self.state)?;
        self.storage.set(&self.storage_key, &raw)?;
        Ok(())
    }
}
