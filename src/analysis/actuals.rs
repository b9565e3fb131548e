use crate::models::catalog::MONTH_NAMES;
use crate::models::report::{ChannelActuals, MonthActuals, Totals, WeeklyPoint};
use crate::models::tracking::{MonthlyTrackingData, WeeklyData, WEEKS_PER_MONTH};

/// Sum of counts, pinned at `u32::MAX` instead of wrapping.
pub fn saturating_sum(values: impl IntoIterator<Item = u32>) -> u32 {
    values.into_iter().fold(0, u32::saturating_add)
}

/// Actions, contacts and RDV over a run of weeks.
pub fn week_totals<'a>(weeks: impl IntoIterator<Item = &'a WeeklyData>) -> (u32, u32, u32) {
    weeks.into_iter().fold((0, 0, 0), |(a, c, r), w| {
        (
            a.saturating_add(w.actions_done),
            c.saturating_add(w.contacts_obtained),
            r.saturating_add(w.rdv_obtained),
        )
    })
}

/// Sum every month's manual results and channel activity.
pub fn aggregate_actuals(tracking: &[MonthlyTrackingData]) -> Totals {
    tracking.iter().fold(Totals::default(), |mut acc, month| {
        acc.turnover += month.manual_turnover;
        acc.sales = acc.sales.saturating_add(month.manual_sales);
        acc.offers = acc.offers.saturating_add(month.manual_offers);
        acc.visits = acc.visits.saturating_add(month.manual_visits);
        acc.mandates = acc.mandates.saturating_add(month.manual_mandates);

        let (actions, contacts, rdv) = week_totals(month.channel_tracking.iter().flat_map(|ct| ct.weeks.iter()));
        acc.actions = acc.actions.saturating_add(actions);
        acc.contacts = acc.contacts.saturating_add(contacts);
        acc.rdv = acc.rdv.saturating_add(rdv);

        acc
    })
}

/// Totals for a single month, with a row per tracked channel.
pub fn aggregate_month(month: &MonthlyTrackingData) -> MonthActuals {
    let channels: Vec<ChannelActuals> = month
        .channel_tracking
        .iter()
        .map(|ct| {
            let (actions, contacts, rdv) = week_totals(&ct.weeks);

            ChannelActuals {
                channel_id: ct.channel_id.clone(),
                actions,
                contacts,
                rdv,
                efficiency: efficiency(actions, rdv),
                conversion_rate: conversion_rate(actions, rdv),
            }
        })
        .collect();

    MonthActuals {
        month_index: month.month_index,
        actions: saturating_sum(channels.iter().map(|c| c.actions)),
        contacts: saturating_sum(channels.iter().map(|c| c.contacts)),
        rdv: saturating_sum(channels.iter().map(|c| c.rdv)),
        turnover: month.manual_turnover,
        sales: month.manual_sales,
        offers: month.manual_offers,
        visits: month.manual_visits,
        mandates: month.manual_mandates,
        channels,
    }
}

pub fn month_actions(month: &MonthlyTrackingData) -> u32 {
    saturating_sum(
        month
            .channel_tracking
            .iter()
            .flat_map(|ct| ct.weeks.iter())
            .map(|w| w.actions_done),
    )
}

pub fn month_rdv(month: &MonthlyTrackingData) -> u32 {
    saturating_sum(
        month
            .channel_tracking
            .iter()
            .flat_map(|ct| ct.weeks.iter())
            .map(|w| w.rdv_obtained),
    )
}

/// Actions needed per RDV, rounded. 0 without RDV.
pub fn efficiency(actions: u32, rdv: u32) -> u32 {
    if rdv == 0 {
        return 0;
    }
    (actions as f64 / rdv as f64).round() as u32
}

/// RDV obtained per 100 actions. 0 without actions.
pub fn conversion_rate(actions: u32, rdv: u32) -> f64 {
    if actions == 0 {
        return 0.0;
    }
    rdv as f64 / actions as f64 * 100.0
}

/// Actions and RDV summed across channels for each of the 48 weeks of the year.
pub fn weekly_series(tracking: &[MonthlyTrackingData], current_month: usize) -> Vec<WeeklyPoint> {
    let mut points = Vec::with_capacity(MONTH_NAMES.len() * WEEKS_PER_MONTH);

    for month_index in 0..MONTH_NAMES.len() {
        let month = tracking.iter().find(|m| m.month_index == month_index);
        for week in 0..WEEKS_PER_MONTH {
            let (actions, rdv) = month
                .map(|m| {
                    let (actions, _, rdv) = week_totals(m.channel_tracking.iter().map(|ct| &ct.weeks[week]));
                    (actions, rdv)
                })
                .unwrap_or((0, 0));

            points.push(WeeklyPoint {
                week_number: month_index * WEEKS_PER_MONTH + week + 1,
                month_index,
                month_name: MONTH_NAMES[month_index].to_string(),
                week_in_month: week + 1,
                actions,
                rdv,
                is_future: month_index > current_month,
            });
        }
    }

    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::tracking::{ChannelTracking, WeeklyData};

    fn week(actions_done: u32, contacts_obtained: u32, rdv_obtained: u32) -> WeeklyData {
        WeeklyData {
            actions_done,
            contacts_obtained,
            rdv_obtained,
        }
    }

    fn month(index: usize, rows: Vec<ChannelTracking>, sales: u32) -> MonthlyTrackingData {
        MonthlyTrackingData {
            month_index: index,
            channel_tracking: rows,
            manual_turnover: sales as f64 * 8500.0,
            manual_sales: sales,
            manual_offers: sales * 2,
            manual_visits: sales * 10,
            manual_mandates: sales * 5,
        }
    }

    fn sample_year() -> Vec<MonthlyTrackingData> {
        (0..12)
            .map(|i| {
                let n = i as u32;
                month(
                    i,
                    vec![
                        ChannelTracking {
                            channel_id: "pige".to_string(),
                            weeks: [week(n, 1, 0), week(10, n, 1), week(0, 0, 0), week(3, 2, n % 3)],
                        },
                        ChannelTracking {
                            channel_id: "porte_a_porte".to_string(),
                            weeks: [week(50, 6, 1), week(0, 0, 0), week(n * 7, 2, 0), week(1, 1, 1)],
                        },
                    ],
                    n % 2,
                )
            })
            .collect()
    }

    #[test]
    fn sums_manual_fields_and_channel_weeks() {
        let tracking = vec![
            month(
                0,
                vec![ChannelTracking {
                    channel_id: "pige".to_string(),
                    weeks: [week(10, 3, 1), week(5, 1, 0), week(0, 0, 0), week(2, 1, 1)],
                }],
                1,
            ),
            month(1, vec![ChannelTracking::empty("pige")], 0),
        ];

        let totals = aggregate_actuals(&tracking);
        assert_eq!(totals.actions, 17);
        assert_eq!(totals.contacts, 5);
        assert_eq!(totals.rdv, 2);
        assert_eq!(totals.sales, 1);
        assert_eq!(totals.turnover, 8500.0);
        assert_eq!(totals.mandates, 5);
        assert_eq!(totals.offers, 2);
        assert_eq!(totals.visits, 10);
    }

    #[test]
    fn aggregation_ignores_month_order() {
        let tracking = sample_year();
        let expected = aggregate_actuals(&tracking);

        let mut reversed = tracking.clone();
        reversed.reverse();
        assert_eq!(aggregate_actuals(&reversed), expected);

        let mut rotated = tracking.clone();
        rotated.rotate_left(5);
        assert_eq!(aggregate_actuals(&rotated), expected);

        let mut interleaved: Vec<_> = tracking.iter().step_by(2).cloned().collect();
        interleaved.extend(tracking.iter().skip(1).step_by(2).cloned());
        assert_eq!(aggregate_actuals(&interleaved), expected);
    }

    #[test]
    fn month_rows_compute_efficiency_and_conversion() {
        let data = month(
            4,
            vec![
                ChannelTracking {
                    channel_id: "pige".to_string(),
                    weeks: [week(30, 5, 1), week(20, 4, 1), week(10, 1, 1), week(0, 0, 0)],
                },
                ChannelTracking {
                    channel_id: "porte_a_porte".to_string(),
                    weeks: [week(40, 3, 0), week(0, 0, 0), week(0, 0, 0), week(0, 0, 0)],
                },
                ChannelTracking::empty("avis_google"),
            ],
            0,
        );

        let actuals = aggregate_month(&data);
        assert_eq!(actuals.month_index, 4);
        assert_eq!(actuals.actions, 100);
        assert_eq!(actuals.rdv, 3);

        let pige = &actuals.channels[0];
        assert_eq!(pige.efficiency, 20);
        assert!((pige.conversion_rate - 5.0).abs() < 1e-9);

        let pap = &actuals.channels[1];
        assert_eq!(pap.efficiency, 0);
        assert!((pap.conversion_rate - 0.0).abs() < 1e-9);

        let idle = &actuals.channels[2];
        assert_eq!(idle.efficiency, 0);
        assert_eq!(idle.conversion_rate, 0.0);
    }

    #[test]
    fn degenerate_ratios_are_zero() {
        assert_eq!(efficiency(25, 0), 0);
        assert_eq!(conversion_rate(0, 4), 0.0);
        assert_eq!(efficiency(25, 2), 13);
    }

    #[test]
    fn weekly_series_spans_the_year() {
        let tracking = sample_year();
        let series = weekly_series(&tracking, 3);

        assert_eq!(series.len(), 48);
        assert_eq!(series[0].week_number, 1);
        assert_eq!(series[47].week_number, 48);
        assert_eq!(series[5].month_index, 1);
        assert_eq!(series[5].week_in_month, 2);
        assert!(!series[15].is_future);
        assert!(series[16].is_future);

        // Month 2, week 3: pige 0 + porte_a_porte 14.
        assert_eq!(series[10].actions, 14);

        let total: u32 = series.iter().map(|p| p.actions).sum();
        assert_eq!(total, aggregate_actuals(&tracking).actions);
    }

    #[test]
    fn huge_counts_saturate_instead_of_overflowing() {
        let big = |index| {
            month(
                index,
                vec![
                    ChannelTracking {
                        channel_id: "pige".to_string(),
                        weeks: [week(3_000_000_000, u32::MAX, 2), week(3_000_000_000, 1, 0), week(0, 0, 0), week(0, 0, 0)],
                    },
                    ChannelTracking {
                        channel_id: "porte_a_porte".to_string(),
                        weeks: [week(u32::MAX, 0, u32::MAX), week(0, 0, 0), week(0, 0, 0), week(0, 0, 0)],
                    },
                ],
                0,
            )
        };
        let mut tracking = vec![big(0), big(1)];
        tracking[0].manual_sales = u32::MAX;
        tracking[1].manual_sales = 5;

        let totals = aggregate_actuals(&tracking);
        assert_eq!(totals.actions, u32::MAX);
        assert_eq!(totals.contacts, u32::MAX);
        assert_eq!(totals.rdv, u32::MAX);
        assert_eq!(totals.sales, u32::MAX);

        let month = aggregate_month(&tracking[0]);
        assert_eq!(month.channels[0].actions, u32::MAX);
        assert_eq!(month.channels[0].rdv, 2);
        assert_eq!(month.actions, u32::MAX);
        assert_eq!(month_actions(&tracking[0]), u32::MAX);
        assert_eq!(month_rdv(&tracking[0]), u32::MAX);

        let series = weekly_series(&tracking, 11);
        assert_eq!(series[0].actions, u32::MAX);
        assert_eq!(series[1].actions, 3_000_000_000);
    }
}
