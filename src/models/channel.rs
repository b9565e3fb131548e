use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ChannelCategory {
    Terrain,
    Relationnel,
    #[serde(rename = "Téléphone")]
    Telephone,
    Digital,
    #[serde(other)]
    Autre,
}

impl ChannelCategory {
    /// Display order used when grouping channels (roadmap, settings).
    pub const ALL: [ChannelCategory; 5] = [
        ChannelCategory::Relationnel,
        ChannelCategory::Terrain,
        ChannelCategory::Telephone,
        ChannelCategory::Digital,
        ChannelCategory::Autre,
    ];

    pub fn label(&self) -> &'static str {
        match self {
            Self::Terrain => "Terrain",
            Self::Relationnel => "Relationnel",
            Self::Telephone => "Téléphone",
            Self::Digital => "Digital",
            Self::Autre => "Autre",
        }
    }
}

impl Default for ChannelCategory {
    fn default() -> Self {
        Self::Autre
    }
}

/// Pedagogical content shown next to a channel.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelDetails {
    pub action_smart: String,
    #[serde(default)]
    pub indicators: Vec<String>,
    pub example: String,
    pub horizon: String,
    #[serde(default)]
    pub tips: Vec<String>,
}

/// A prospecting method and its conversion yield.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProspectingChannel {
    pub id: String,
    pub name: String,
    #[serde(default)]
    pub category: ChannelCategory,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub details: Option<ChannelDetails>,
    pub enabled: bool,
    /// Share of the monthly R1 target attributed to this channel (0–100).
    pub distribution_percent: u32,
    /// Actions needed to produce one R1.
    pub actions_per_r1: f64,
    pub action_unit: String,
}

/// Per-channel targets derived from the monthly R1 target.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ChannelTarget {
    pub channel_id: String,
    pub channel_name: String,
    pub monthly_action_target: u32,
    pub weekly_action_target: u32,
    pub monthly_r1_target: f64,
    pub action_unit: String,
}
