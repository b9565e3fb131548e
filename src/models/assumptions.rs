use super::channel::{ChannelCategory, ProspectingChannel};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum ObjectiveMode {
    MonthlyIncome,
    AnnualTurnover,
    AnnualSales,
}

/// User goals, funnel ratios and channel mix.
///
/// Only one of the three goal fields is authoritative, selected by
/// `objective_mode`; the others are kept so switching modes does not lose input.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assumptions {
    pub objective_mode: ObjectiveMode,
    pub monthly_net_salary_goal: f64,
    pub target_turnover: f64,
    pub target_sales: u32,
    /// Average fee per sale, excluding tax.
    pub avg_fee: f64,
    pub mandates_per_sale: f64,
    pub r1_per_mandate: f64,
    pub visits_per_offer: f64,
    pub months_worked: u32,
    pub channels: Vec<ProspectingChannel>,
}

/// Targets derived from `Assumptions`. Never stored.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GlobalTargets {
    pub annual_turnover: f64,
    pub annual_sales: u32,
    pub annual_mandates: u32,
    pub annual_r1: u32,
    pub monthly_r1: u32,
    pub weekly_r1: f64,
}

impl Assumptions {
    pub fn channel(&self, channel_id: &str) -> Option<&ProspectingChannel> {
        self.channels.iter().find(|c| c.id == channel_id)
    }

    pub fn enabled_channels(&self) -> impl Iterator<Item = &ProspectingChannel> {
        self.channels.iter().filter(|c| c.enabled)
    }

    /// Sum of the distribution over enabled channels, saturating at `u32::MAX`.
    pub fn total_distribution(&self) -> u32 {
        self.enabled_channels()
            .fold(0, |total: u32, c| total.saturating_add(c.distribution_percent))
    }

    /// Append a user-defined channel. Returns the new channel id, or `None` for a blank name.
    pub fn add_custom_channel(
        &mut self,
        name: &str,
        actions_per_r1: f64,
        action_unit: &str,
        category: ChannelCategory,
    ) -> Option<String> {
        let name = name.trim();
        if name.is_empty() {
            return None;
        }

        let id = format!("custom_{}", uuid::Uuid::new_v4().simple());
        self.channels.push(ProspectingChannel {
            id: id.clone(),
            name: name.to_string(),
            category,
            description: Some("Levier personnalisé".to_string()),
            details: None,
            enabled: true,
            distribution_percent: 0,
            actions_per_r1: actions_per_r1.max(0.0),
            action_unit: action_unit.to_string(),
        });
        Some(id)
    }

    /// Flip a channel on or off. Its distribution restarts at 0 either way.
    pub fn toggle_channel(&mut self, channel_id: &str) -> bool {
        match self.channels.iter_mut().find(|c| c.id == channel_id) {
            Some(channel) => {
                channel.enabled = !channel.enabled;
                channel.distribution_percent = 0;
                true
            }
            None => false,
        }
    }
}
