use crate::analysis::targets::ratio;
use crate::models::report::{ConsistencyReport, EngagementScore};
use crate::models::tracking::{MonthlyTrackingData, WEEKS_PER_MONTH};
use chrono::{Datelike, NaiveDate};

/// Active days in a month that count as a fully regular month.
pub const REGULAR_DAYS_PER_MONTH: f64 = 12.0;

const VOLUME_WEIGHT: f64 = 0.6;
const REGULARITY_WEIGHT: f64 = 0.4;

/// Count the weeks of a month with at least one action on any channel (0–4).
pub fn analyze_consistency(month: &MonthlyTrackingData) -> ConsistencyReport {
    let score = (0..WEEKS_PER_MONTH)
        .filter(|&week| {
            month
                .channel_tracking
                .iter()
                .any(|ct| ct.weeks[week].actions_done > 0)
        })
        .count() as u32;

    let feedback = match score {
        4 => "Excellent ! La régularité est la clé.",
        2 | 3 => "Bon début, essaye de ne rien lâcher la semaine prochaine.",
        _ => "La priorité est de reprendre un rythme hebdomadaire régulier.",
    };

    ConsistencyReport {
        score,
        feedback: feedback.to_string(),
    }
}

pub fn active_days_in_month(active_days: &[NaiveDate], year: i32, month_index: usize) -> u32 {
    active_days
        .iter()
        .filter(|d| d.year() == year && d.month0() as usize == month_index)
        .count() as u32
}

/// Whole days between the last logged day and `today`, or `fallback` with an empty log.
pub fn days_since_last_activity(active_days: &[NaiveDate], today: NaiveDate, fallback: i64) -> i64 {
    active_days
        .iter()
        .max()
        .map(|last| (today - *last).num_days().max(0))
        .unwrap_or(fallback)
}

/// Blend of volume against target (60 %) and active days against 12 (40 %).
pub fn engagement_score(actions: u32, target_actions: u32, active_days: u32) -> EngagementScore {
    let volume_score = (ratio(actions as f64, target_actions as f64) * 100.0).min(100.0);
    let regularity_score = (active_days as f64 / REGULAR_DAYS_PER_MONTH * 100.0).min(100.0);
    let engagement = (volume_score * VOLUME_WEIGHT + regularity_score * REGULARITY_WEIGHT).round() as u32;

    EngagementScore {
        active_days,
        volume_score,
        regularity_score,
        engagement,
    }
}
