use super::assumptions::Assumptions;
use super::catalog::{default_assumptions, initial_tracking};
use super::tracking::MonthlyTrackingData;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// Aggregate root persisted as a single blob.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AppState {
    pub is_configured: bool,
    pub assumptions: Assumptions,
    pub tracking: Vec<MonthlyTrackingData>,
    #[serde(default)]
    pub active_days: Vec<NaiveDate>,
}

impl Default for AppState {
    fn default() -> Self {
        let assumptions = default_assumptions();
        let tracking = initial_tracking(&assumptions.channels);
        Self {
            is_configured: false,
            assumptions,
            tracking,
            active_days: Vec::new(),
        }
    }
}

impl AppState {
    pub fn month(&self, month_index: usize) -> Option<&MonthlyTrackingData> {
        self.tracking.get(month_index)
    }

    pub fn was_active_on(&self, day: NaiveDate) -> bool {
        self.active_days.contains(&day)
    }
}
