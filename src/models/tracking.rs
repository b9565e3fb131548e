use serde::{Deserialize, Serialize};

pub const MONTHS_PER_YEAR: usize = 12;
pub const WEEKS_PER_MONTH: usize = 4;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyData {
    #[serde(default)]
    pub actions_done: u32,
    #[serde(default)]
    pub contacts_obtained: u32,
    #[serde(default)]
    pub rdv_obtained: u32,
}

/// One editable cell of a week.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum TrackingField {
    ActionsDone,
    ContactsObtained,
    RdvObtained,
}

impl WeeklyData {
    pub fn set(&mut self, field: TrackingField, value: u32) {
        match field {
            TrackingField::ActionsDone => self.actions_done = value,
            TrackingField::ContactsObtained => self.contacts_obtained = value,
            TrackingField::RdvObtained => self.rdv_obtained = value,
        }
    }

    pub fn get(&self, field: TrackingField) -> u32 {
        match field {
            TrackingField::ActionsDone => self.actions_done,
            TrackingField::ContactsObtained => self.contacts_obtained,
            TrackingField::RdvObtained => self.rdv_obtained,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTracking {
    pub channel_id: String,
    pub weeks: [WeeklyData; WEEKS_PER_MONTH],
}

impl ChannelTracking {
    pub fn empty(channel_id: &str) -> Self {
        Self {
            channel_id: channel_id.to_string(),
            weeks: [WeeklyData::default(); WEEKS_PER_MONTH],
        }
    }
}

/// Actuals logged for one calendar month.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyTrackingData {
    pub month_index: usize,
    #[serde(default)]
    pub channel_tracking: Vec<ChannelTracking>,
    #[serde(default)]
    pub manual_turnover: f64,
    #[serde(default)]
    pub manual_sales: u32,
    #[serde(default)]
    pub manual_offers: u32,
    #[serde(default)]
    pub manual_visits: u32,
    #[serde(default)]
    pub manual_mandates: u32,
}

impl MonthlyTrackingData {
    pub fn empty<'a>(month_index: usize, channel_ids: impl IntoIterator<Item = &'a str>) -> Self {
        Self {
            month_index,
            channel_tracking: channel_ids.into_iter().map(ChannelTracking::empty).collect(),
            manual_turnover: 0.0,
            manual_sales: 0,
            manual_offers: 0,
            manual_visits: 0,
            manual_mandates: 0,
        }
    }

    pub fn channel(&self, channel_id: &str) -> Option<&ChannelTracking> {
        self.channel_tracking.iter().find(|ct| ct.channel_id == channel_id)
    }

    /// Row for `channel_id`, created zeroed when missing.
    pub fn channel_mut_or_insert(&mut self, channel_id: &str) -> &mut ChannelTracking {
        let existing = self
            .channel_tracking
            .iter()
            .position(|ct| ct.channel_id == channel_id);
        let position = match existing {
            Some(position) => position,
            None => {
                self.channel_tracking.push(ChannelTracking::empty(channel_id));
                self.channel_tracking.len() - 1
            }
        };
        &mut self.channel_tracking[position]
    }

    pub fn apply(&mut self, patch: &ManualFieldsPatch) {
        if let Some(value) = patch.manual_turnover {
            self.manual_turnover = value.max(0.0);
        }
        if let Some(value) = patch.manual_sales {
            self.manual_sales = value;
        }
        if let Some(value) = patch.manual_offers {
            self.manual_offers = value;
        }
        if let Some(value) = patch.manual_visits {
            self.manual_visits = value;
        }
        if let Some(value) = patch.manual_mandates {
            self.manual_mandates = value;
        }
    }
}

/// Partial update of a month's manually entered results.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManualFieldsPatch {
    #[serde(default)]
    pub manual_turnover: Option<f64>,
    #[serde(default)]
    pub manual_sales: Option<u32>,
    #[serde(default)]
    pub manual_offers: Option<u32>,
    #[serde(default)]
    pub manual_visits: Option<u32>,
    #[serde(default)]
    pub manual_mandates: Option<u32>,
}
