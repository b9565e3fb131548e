use serde::{Deserialize, Serialize};

/// Coaching situations, in rule-priority order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Scenario {
    StartStop,
    Break,
    Conversion,
    Volume,
    Growth,
    Focus,
    Default,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum AdviceLevel {
    Critical,
    Warning,
    Success,
    Info,
}

impl AdviceLevel {
    pub fn badge(&self) -> &'static str {
        match self {
            Self::Critical => "Urgence",
            Self::Warning => "Attention",
            Self::Success => "Top",
            Self::Info => "Info",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CoachAdvice {
    pub scenario: Scenario,
    pub level: AdviceLevel,
    pub title: String,
    pub diagnosis: String,
    pub strategy: String,
    pub action: String,
    pub quotes: Vec<String>,
    /// The quote picked for this evaluation.
    pub quote: String,
    pub ctas: Vec<String>,
}
