use crate::analysis::actuals::{aggregate_month, conversion_rate, efficiency, saturating_sum, week_totals};
use crate::analysis::regularity::{active_days_in_month, engagement_score};
use crate::analysis::targets::{
    calculate_progress, compute_channel_targets, compute_global_targets, ratio, total_monthly_action_target,
};
use crate::models::report::{
    AdminReport, ChannelReportRow, EngagementScore, FeedbackStatus, FunnelRatios, ManagerFeedback,
};
use crate::models::state::AppState;

/// Market conversion rates the funnel is compared against, in percent.
pub const BENCHMARKS: FunnelRatios = FunnelRatios {
    actions_to_contacts: 30.0,
    contacts_to_rdv: 15.0,
    rdv_to_mandates: 25.0,
    mandates_to_sales: 70.0,
};

fn feedback(title: &str, description: impl Into<String>, status: FeedbackStatus) -> ManagerFeedback {
    ManagerFeedback {
        title: title.to_string(),
        description: description.into(),
        status,
    }
}

/// Diagnose how action progress and RDV progress line up.
pub fn manager_feedback(action_progress: u32, rdv_progress: u32) -> ManagerFeedback {
    match (action_progress, rdv_progress) {
        (a, r) if a > 80 && r > 80 => feedback(
            "Alignement Parfait",
            "L'effort paie. Continuez sur cette lancée.",
            FeedbackStatus::Success,
        ),
        (a, r) if a > 80 && r < 50 => feedback(
            "Problème de Conversion",
            "Gros volume d'actions mais peu de RDV. Travailler le discours, l'accroche ou la cible.",
            FeedbackStatus::Warning,
        ),
        (a, r) if a < 50 && r < 50 => feedback(
            "Déficit d'Activité",
            "Le volume d'actions est insuffisant pour espérer des résultats. Revoir la discipline.",
            FeedbackStatus::Danger,
        ),
        (a, r) if a < 50 && r > 80 => feedback(
            "Chance ou Talent ?",
            "Peu d'actions mais beaucoup de RDV. Attention à la durabilité de ces résultats.",
            FeedbackStatus::Warning,
        ),
        _ => feedback(
            "En construction",
            "Continuez à alimenter les données.",
            FeedbackStatus::Warning,
        ),
    }
}

pub fn funnel_ratios(actions: u32, contacts: u32, rdv: u32, mandates: u32, sales: u32) -> FunnelRatios {
    let pct = |n: u32, d: u32| ratio(n as f64, d as f64) * 100.0;
    FunnelRatios {
        actions_to_contacts: pct(contacts, actions),
        contacts_to_rdv: pct(rdv, contacts),
        rdv_to_mandates: pct(mandates, rdv),
        mandates_to_sales: pct(sales, mandates),
    }
}

/// Headline for the reporting view.
pub fn coach_summary(actions: u32, engagement: &EngagementScore) -> ManagerFeedback {
    if actions == 0 {
        feedback(
            "Arrêt total d'activité",
            "Aucune action enregistrée. Relancez la machine.",
            FeedbackStatus::Danger,
        )
    } else if engagement.engagement < 50 {
        feedback(
            "Manque de volume",
            format!(
                "Volume insuffisant ({}% de l'objectif). L'intensité doit doubler.",
                engagement.volume_score.round()
            ),
            FeedbackStatus::Warning,
        )
    } else {
        feedback(
            "Bonne dynamique",
            "Les voyants sont au vert. Continuez à maintenir ce rythme.",
            FeedbackStatus::Success,
        )
    }
}

/// Per-channel rows for the enabled channels, best RDV first.
fn channel_rows(state: &AppState, month_index: usize, monthly_r1: u32) -> Vec<ChannelReportRow> {
    let targets = compute_channel_targets(monthly_r1, &state.assumptions.channels);
    let month = state.month(month_index);

    let mut rows: Vec<ChannelReportRow> = state
        .assumptions
        .channels
        .iter()
        .filter(|c| c.enabled)
        .map(|channel| {
            let (actions, contacts, rdv) = month
                .and_then(|m| m.channel(&channel.id))
                .map(|ct| week_totals(&ct.weeks))
                .unwrap_or((0, 0, 0));
            let target_actions = targets
                .iter()
                .find(|t| t.channel_id == channel.id)
                .map(|t| t.monthly_action_target)
                .unwrap_or(0);

            ChannelReportRow {
                channel_id: channel.id.clone(),
                name: channel.name.clone(),
                category: channel.category,
                unit: channel.action_unit.clone(),
                target_actions,
                actual_actions: actions,
                contacts,
                rdv,
                efficiency: efficiency(actions, rdv),
                conversion_rate: conversion_rate(actions, rdv),
            }
        })
        .collect();

    rows.sort_by(|a, b| b.rdv.cmp(&a.rdv));
    rows
}

/// Strategic reporting for one month of `year`. `None` when the month is out of range.
pub fn build_admin_report(state: &AppState, month_index: usize, year: i32) -> Option<AdminReport> {
    let month = state.month(month_index)?;
    let globals = compute_global_targets(&state.assumptions);
    let target_actions =
        total_monthly_action_target(&compute_channel_targets(globals.monthly_r1, &state.assumptions.channels));

    let channels = channel_rows(state, month_index, globals.monthly_r1);
    let actions = saturating_sum(channels.iter().map(|c| c.actual_actions));
    let contacts = saturating_sum(channels.iter().map(|c| c.contacts));
    let rdv = saturating_sum(channels.iter().map(|c| c.rdv));
    let mandates = month.manual_mandates;
    let sales = month.manual_sales;

    let previous = month_index
        .checked_sub(1)
        .and_then(|prev| state.month(prev))
        .map(aggregate_month);
    let previous_contacts_to_rdv = previous
        .as_ref()
        .map(|p| ratio(p.rdv as f64, p.contacts as f64) * 100.0);

    let engagement = engagement_score(
        actions,
        target_actions,
        active_days_in_month(&state.active_days, year, month_index),
    );

    Some(AdminReport {
        month_index,
        actions,
        contacts,
        rdv,
        mandates,
        sales,
        target_actions,
        funnel: funnel_ratios(actions, contacts, rdv, mandates, sales),
        benchmarks: BENCHMARKS,
        previous_contacts_to_rdv,
        previous,
        summary: coach_summary(actions, &engagement),
        feedback: manager_feedback(
            calculate_progress(actions as f64, target_actions as f64),
            calculate_progress(rdv as f64, globals.monthly_r1 as f64),
        ),
        engagement,
        channels,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tracking::TrackingField;
    use chrono::NaiveDate;

    fn log(state: &mut AppState, month: usize, channel: &str, week: usize, field: TrackingField, value: u32) {
        state.tracking[month]
            .channel_mut_or_insert(channel)
            .weeks[week]
            .set(field, value);
    }

    #[test]
    fn alignment_thresholds() {
        assert_eq!(manager_feedback(90, 95).status, FeedbackStatus::Success);
        assert_eq!(manager_feedback(90, 20).title, "Problème de Conversion");
        assert_eq!(manager_feedback(10, 20).status, FeedbackStatus::Danger);
        assert_eq!(manager_feedback(30, 120).title, "Chance ou Talent ?");
        assert_eq!(manager_feedback(80, 80).title, "En construction");
        assert_eq!(manager_feedback(60, 40).title, "En construction");
    }

    #[test]
    fn funnel_ratios_guard_zero_stages() {
        let funnel = funnel_ratios(200, 50, 10, 4, 2);
        assert_eq!(funnel.actions_to_contacts, 25.0);
        assert_eq!(funnel.contacts_to_rdv, 20.0);
        assert_eq!(funnel.rdv_to_mandates, 40.0);
        assert_eq!(funnel.mandates_to_sales, 50.0);

        assert_eq!(funnel_ratios(0, 0, 0, 0, 0), FunnelRatios::default());
        assert_eq!(funnel_ratios(10, 0, 3, 0, 1).contacts_to_rdv, 0.0);
    }

    #[test]
    fn summary_tiers() {
        let low = engagement_score(20, 270, 1);
        assert_eq!(coach_summary(0, &low).title, "Arrêt total d'activité");
        assert_eq!(
            coach_summary(20, &low).description,
            "Volume insuffisant (7% de l'objectif). L'intensité doit doubler."
        );
        let high = engagement_score(270, 270, 12);
        assert_eq!(coach_summary(270, &high).status, FeedbackStatus::Success);
    }

    #[test]
    fn report_sorts_enabled_rows_by_rdv() {
        let mut state = AppState::default();
        log(&mut state, 4, "pige", 0, TrackingField::ActionsDone, 40);
        log(&mut state, 4, "pige", 0, TrackingField::ContactsObtained, 10);
        log(&mut state, 4, "pige", 1, TrackingField::RdvObtained, 1);
        log(&mut state, 4, "prescripteurs", 2, TrackingField::ActionsDone, 6);
        log(&mut state, 4, "prescripteurs", 2, TrackingField::ContactsObtained, 5);
        log(&mut state, 4, "prescripteurs", 2, TrackingField::RdvObtained, 3);
        state.tracking[4].manual_mandates = 2;
        state.tracking[4].manual_sales = 1;

        let report = build_admin_report(&state, 4, 2025).unwrap();
        let enabled = state.assumptions.enabled_channels().count();

        assert_eq!(report.channels.len(), enabled);
        assert_eq!(report.channels[0].channel_id, "prescripteurs");
        assert_eq!(report.channels[1].channel_id, "pige");
        assert_eq!(report.channels[1].efficiency, 40);
        assert!(report.channels[2..].iter().all(|row| row.rdv == 0));

        assert_eq!(report.actions, 46);
        assert_eq!(report.rdv, 4);
        assert_eq!(report.funnel.contacts_to_rdv, 4.0 / 15.0 * 100.0);
        assert_eq!(report.funnel.rdv_to_mandates, 50.0);
        assert_eq!(report.benchmarks, BENCHMARKS);
        assert!(report.previous.is_some());
        assert_eq!(report.previous_contacts_to_rdv, Some(0.0));
    }

    #[test]
    fn disabled_channels_are_left_out() {
        let mut state = AppState::default();
        state.assumptions.toggle_channel("pige");
        log(&mut state, 1, "pige", 0, TrackingField::ActionsDone, 30);

        let report = build_admin_report(&state, 1, 2025).unwrap();
        assert!(report.channels.iter().all(|row| row.channel_id != "pige"));
        assert_eq!(report.actions, 0);
        assert_eq!(report.summary.title, "Arrêt total d'activité");
    }

    #[test]
    fn january_has_no_previous_month() {
        let state = AppState::default();
        let report = build_admin_report(&state, 0, 2025).unwrap();
        assert!(report.previous.is_none());
        assert!(report.previous_contacts_to_rdv.is_none());
        assert!(build_admin_report(&state, 12, 2025).is_none());
    }

    #[test]
    fn engagement_counts_days_of_the_selected_month() {
        let mut state = AppState::default();
        let d = |m, day| NaiveDate::from_ymd_opt(2025, m, day).unwrap();
        state.active_days = vec![d(3, 3), d(3, 4), d(3, 5), d(2, 27)];

        let report = build_admin_report(&state, 2, 2025).unwrap();
        assert_eq!(report.engagement.active_days, 3);
        assert_eq!(report.engagement.regularity_score, 25.0);
    }
}
