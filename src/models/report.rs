use super::advice::CoachAdvice;
use super::channel::ChannelCategory;
use serde::{Deserialize, Serialize};

/// Year-to-date sums over every tracked month.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Totals {
    pub turnover: f64,
    pub sales: u32,
    pub offers: u32,
    pub visits: u32,
    pub mandates: u32,
    pub actions: u32,
    pub rdv: u32,
    pub contacts: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelActuals {
    pub channel_id: String,
    pub actions: u32,
    pub contacts: u32,
    pub rdv: u32,
    /// Actions per RDV, rounded. 0 without RDV.
    pub efficiency: u32,
    /// RDV per 100 actions. 0 without actions.
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthActuals {
    pub month_index: usize,
    pub actions: u32,
    pub contacts: u32,
    pub rdv: u32,
    pub turnover: f64,
    pub sales: u32,
    pub offers: u32,
    pub visits: u32,
    pub mandates: u32,
    pub channels: Vec<ChannelActuals>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PerformanceBand {
    Achieved,
    Close,
    Behind,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DailyObjectives {
    pub minimum: u32,
    pub standard: u32,
    pub challenge: u32,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachReport {
    pub month_index: usize,
    pub month_name: String,
    pub actual_actions: u32,
    pub target_actions: u32,
    pub actual_rdv: u32,
    pub target_rdv: u32,
    pub action_rate: u32,
    pub rdv_rate: u32,
    pub projected_rdv: u32,
    /// Target minus projection; negative when ahead.
    pub gap_rdv: i64,
    pub days_since_last_activity: i64,
    pub priority_lever: String,
    pub daily_objectives: DailyObjectives,
    pub advice: CoachAdvice,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ConsistencyReport {
    /// Weeks of the month with at least one action (0–4).
    pub score: u32,
    pub feedback: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EngagementScore {
    pub active_days: u32,
    pub volume_score: f64,
    pub regularity_score: f64,
    pub engagement: u32,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FeedbackStatus {
    Success,
    Warning,
    Danger,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ManagerFeedback {
    pub title: String,
    pub description: String,
    pub status: FeedbackStatus,
}

/// Funnel conversion percentages for one month.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FunnelRatios {
    pub actions_to_contacts: f64,
    pub contacts_to_rdv: f64,
    pub rdv_to_mandates: f64,
    pub mandates_to_sales: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelReportRow {
    pub channel_id: String,
    pub name: String,
    pub category: ChannelCategory,
    pub unit: String,
    pub target_actions: u32,
    pub actual_actions: u32,
    pub contacts: u32,
    pub rdv: u32,
    pub efficiency: u32,
    pub conversion_rate: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AdminReport {
    pub month_index: usize,
    pub actions: u32,
    pub contacts: u32,
    pub rdv: u32,
    pub mandates: u32,
    pub sales: u32,
    pub target_actions: u32,
    pub channels: Vec<ChannelReportRow>,
    pub funnel: FunnelRatios,
    pub benchmarks: FunnelRatios,
    pub previous_contacts_to_rdv: Option<f64>,
    pub previous: Option<MonthActuals>,
    pub engagement: EngagementScore,
    /// Headline driven by volume and engagement.
    pub summary: ManagerFeedback,
    /// Alignment of action progress with RDV progress.
    pub feedback: ManagerFeedback,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyPoint {
    /// 1-based position in the 48-week year.
    pub week_number: usize,
    pub month_index: usize,
    pub month_name: String,
    /// 1-based week inside the month.
    pub week_in_month: usize,
    pub actions: u32,
    pub rdv: u32,
    pub is_future: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryGroup {
    pub category: ChannelCategory,
    pub targets: Vec<super::channel::ChannelTarget>,
}
