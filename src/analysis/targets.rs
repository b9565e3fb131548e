use crate::models::assumptions::{Assumptions, GlobalTargets, ObjectiveMode};
use crate::models::channel::{ChannelCategory, ChannelTarget, ProspectingChannel};
use crate::models::report::{CategoryGroup, PerformanceBand};

/// Months used when `months_worked` is 0.
pub const DEFAULT_MONTHS_WORKED: u32 = 11;

/// Net monthly income → gross turnover multiplier (employer charges approximation).
const INCOME_TO_TURNOVER_FACTOR: f64 = 2.0;

const WEEKS_PER_MONTH: f64 = 4.0;

/// Derive the yearly funnel and R1 rhythm from the user's goal.
pub fn compute_global_targets(assumptions: &Assumptions) -> GlobalTargets {
    let (annual_turnover, annual_sales) = match assumptions.objective_mode {
        ObjectiveMode::MonthlyIncome => {
            let turnover = non_negative(
                assumptions.monthly_net_salary_goal * INCOME_TO_TURNOVER_FACTOR * 12.0,
            );
            (turnover, ceil_count(ratio(turnover, assumptions.avg_fee)))
        }
        ObjectiveMode::AnnualTurnover => {
            let turnover = non_negative(assumptions.target_turnover);
            (turnover, ceil_count(ratio(turnover, assumptions.avg_fee)))
        }
        ObjectiveMode::AnnualSales => {
            let sales = assumptions.target_sales;
            (non_negative(sales as f64 * assumptions.avg_fee), sales)
        }
    };

    let annual_mandates = ceil_count(annual_sales as f64 * assumptions.mandates_per_sale);
    let annual_r1 = ceil_count(annual_mandates as f64 * assumptions.r1_per_mandate);

    let months = if assumptions.months_worked == 0 {
        DEFAULT_MONTHS_WORKED
    } else {
        assumptions.months_worked
    };
    let monthly_r1 = ceil_count(ratio(annual_r1 as f64, months as f64));
    let weekly_r1 = round_to_tenth(monthly_r1 as f64 / WEEKS_PER_MONTH);

    GlobalTargets {
        annual_turnover,
        annual_sales,
        annual_mandates,
        annual_r1,
        monthly_r1,
        weekly_r1,
    }
}

/// Split the monthly R1 target across channels, one entry per channel in input order.
///
/// Distributions are taken as-is: a mix that does not sum to 100 scales the targets
/// proportionally.
pub fn compute_channel_targets(monthly_r1: u32, channels: &[ProspectingChannel]) -> Vec<ChannelTarget> {
    channels
        .iter()
        .map(|channel| {
            if !channel.enabled {
                return ChannelTarget {
                    channel_id: channel.id.clone(),
                    channel_name: channel.name.clone(),
                    monthly_action_target: 0,
                    weekly_action_target: 0,
                    monthly_r1_target: 0.0,
                    action_unit: channel.action_unit.clone(),
                };
            }

            let channel_r1 = monthly_r1 as f64 * (channel.distribution_percent as f64 / 100.0);
            let monthly_action_target = ceil_count(channel_r1 * channel.actions_per_r1);
            let weekly_action_target = ceil_count(monthly_action_target as f64 / WEEKS_PER_MONTH);

            ChannelTarget {
                channel_id: channel.id.clone(),
                channel_name: channel.name.clone(),
                monthly_action_target,
                weekly_action_target,
                monthly_r1_target: round_to_tenth(non_negative(channel_r1)),
                action_unit: channel.action_unit.clone(),
            }
        })
        .collect()
}

pub fn total_monthly_action_target(targets: &[ChannelTarget]) -> u32 {
    targets
        .iter()
        .fold(0, |total: u32, t| total.saturating_add(t.monthly_action_target))
}

/// Completion percentage, rounded. 0 when there is no target.
pub fn calculate_progress(actual: f64, target: f64) -> u32 {
    if target <= 0.0 {
        return 0;
    }
    let progress = (actual / target * 100.0).round();
    if progress.is_finite() && progress > 0.0 {
        progress as u32
    } else {
        0
    }
}

impl PerformanceBand {
    pub fn from_progress(percentage: u32) -> Self {
        if percentage >= 100 {
            Self::Achieved
        } else if percentage >= 60 {
            Self::Close
        } else {
            Self::Behind
        }
    }
}

/// Channel targets that ask for work this month, grouped by category.
pub fn channels_by_category(
    targets: &[ChannelTarget],
    channels: &[ProspectingChannel],
) -> Vec<CategoryGroup> {
    ChannelCategory::ALL
        .iter()
        .filter_map(|category| {
            let grouped: Vec<ChannelTarget> = targets
                .iter()
                .filter(|t| t.monthly_action_target > 0)
                .filter(|t| {
                    channels
                        .iter()
                        .find(|c| c.id == t.channel_id)
                        .is_some_and(|c| c.category == *category)
                })
                .cloned()
                .collect();

            if grouped.is_empty() {
                None
            } else {
                Some(CategoryGroup {
                    category: *category,
                    targets: grouped,
                })
            }
        })
        .collect()
}

pub(crate) fn ratio(numerator: f64, denominator: f64) -> f64 {
    if denominator == 0.0 {
        return 0.0;
    }
    let value = numerator / denominator;
    if value.is_finite() {
        value
    } else {
        0.0
    }
}

pub(crate) fn ceil_count(value: f64) -> u32 {
    if !value.is_finite() || value <= 0.0 {
        return 0;
    }
    value.ceil() as u32
}

pub(crate) fn round_to_tenth(value: f64) -> f64 {
    (value * 10.0).round() / 10.0
}

fn non_negative(value: f64) -> f64 {
    if value.is_finite() && value > 0.0 {
        value
    } else {
        0.0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::catalog::{default_assumptions, default_channels};

    fn income_assumptions(monthly_goal: f64) -> Assumptions {
        Assumptions {
            objective_mode: ObjectiveMode::MonthlyIncome,
            monthly_net_salary_goal: monthly_goal,
            avg_fee: 8500.0,
            mandates_per_sale: 5.0,
            r1_per_mandate: 2.0,
            months_worked: 11,
            ..default_assumptions()
        }
    }

    fn channel(id: &str, enabled: bool, distribution_percent: u32, actions_per_r1: f64) -> ProspectingChannel {
        ProspectingChannel {
            id: id.to_string(),
            name: id.to_string(),
            category: ChannelCategory::Terrain,
            description: None,
            details: None,
            enabled,
            distribution_percent,
            actions_per_r1,
            action_unit: "actions".to_string(),
        }
    }

    #[test]
    fn income_goal_scenario() {
        let targets = compute_global_targets(&income_assumptions(3000.0));

        assert_eq!(targets.annual_turnover, 72000.0);
        assert_eq!(targets.annual_sales, 9);
        assert_eq!(targets.annual_mandates, 45);
        assert_eq!(targets.annual_r1, 90);
        assert_eq!(targets.monthly_r1, 9);
        assert_eq!(targets.weekly_r1, 2.3);
    }

    #[test]
    fn sales_mode_derives_turnover() {
        let assumptions = Assumptions {
            objective_mode: ObjectiveMode::AnnualSales,
            target_sales: 12,
            ..income_assumptions(0.0)
        };
        let targets = compute_global_targets(&assumptions);

        assert_eq!(targets.annual_turnover, 102_000.0);
        assert_eq!(targets.annual_sales, 12);
        assert_eq!(targets.annual_mandates, 60);
        assert_eq!(targets.annual_r1, 120);
        assert_eq!(targets.monthly_r1, 11);
    }

    #[test]
    fn income_mode_is_monotonic() {
        let mut previous = compute_global_targets(&income_assumptions(0.0));
        for step in 1..=60 {
            let current = compute_global_targets(&income_assumptions(step as f64 * 250.0));
            assert!(current.annual_turnover >= previous.annual_turnover);
            assert!(current.annual_sales >= previous.annual_sales);
            assert!(current.annual_mandates >= previous.annual_mandates);
            assert!(current.annual_r1 >= previous.annual_r1);
            assert!(current.monthly_r1 >= previous.monthly_r1);
            previous = current;
        }
    }

    #[test]
    fn modes_agree_on_sales_for_equal_turnover() {
        let income = income_assumptions(3000.0);
        let turnover = Assumptions {
            objective_mode: ObjectiveMode::AnnualTurnover,
            target_turnover: 72000.0,
            ..income.clone()
        };
        let from_income = compute_global_targets(&income);
        let from_turnover = compute_global_targets(&turnover);
        assert_eq!(from_income.annual_turnover, from_turnover.annual_turnover);
        assert_eq!(from_income.annual_sales, from_turnover.annual_sales);

        // Sales mode lands on the same turnover when the fee divides it evenly.
        let sales = Assumptions {
            objective_mode: ObjectiveMode::AnnualSales,
            target_sales: 9,
            avg_fee: 8000.0,
            ..income.clone()
        };
        let turnover_even = Assumptions {
            objective_mode: ObjectiveMode::AnnualTurnover,
            target_turnover: 72000.0,
            avg_fee: 8000.0,
            ..income
        };
        let from_sales = compute_global_targets(&sales);
        let from_even = compute_global_targets(&turnover_even);
        assert_eq!(from_sales.annual_turnover, from_even.annual_turnover);
        assert_eq!(from_sales.annual_sales, from_even.annual_sales);
    }

    #[test]
    fn zero_months_worked_falls_back_to_eleven() {
        let assumptions = Assumptions {
            months_worked: 0,
            ..income_assumptions(3000.0)
        };
        assert_eq!(compute_global_targets(&assumptions).monthly_r1, 9);
    }

    #[test]
    fn zero_fee_yields_zero_sales() {
        let assumptions = Assumptions {
            avg_fee: 0.0,
            ..income_assumptions(3000.0)
        };
        let targets = compute_global_targets(&assumptions);
        assert_eq!(targets.annual_sales, 0);
        assert_eq!(targets.monthly_r1, 0);
        assert_eq!(targets.weekly_r1, 0.0);
    }

    #[test]
    fn single_channel_scenario() {
        let targets = compute_channel_targets(9, &[channel("pige", true, 100, 30.0)]);

        assert_eq!(targets.len(), 1);
        assert_eq!(targets[0].monthly_action_target, 270);
        assert_eq!(targets[0].weekly_action_target, 68);
        assert_eq!(targets[0].monthly_r1_target, 9.0);
    }

    #[test]
    fn disabled_channels_get_zero_targets() {
        let channels: Vec<_> = default_channels()
            .into_iter()
            .map(|mut c| {
                c.enabled = false;
                c.distribution_percent = 25;
                c
            })
            .collect();

        for monthly_r1 in [0, 1, 9, 40, 1000] {
            let targets = compute_channel_targets(monthly_r1, &channels);
            assert_eq!(targets.len(), channels.len());
            assert!(targets.iter().all(|t| t.monthly_action_target == 0
                && t.weekly_action_target == 0
                && t.monthly_r1_target == 0.0));
        }
    }

    #[test]
    fn channel_order_is_preserved() {
        let channels = default_channels();
        let targets = compute_channel_targets(9, &channels);
        let ids: Vec<_> = targets.iter().map(|t| t.channel_id.as_str()).collect();
        let expected: Vec<_> = channels.iter().map(|c| c.id.as_str()).collect();
        assert_eq!(ids, expected);
    }

    #[test]
    fn rounding_drift_is_bounded_by_enabled_channel_count() {
        let channels = default_channels();
        let enabled = channels.iter().filter(|c| c.enabled).count() as f64;

        for monthly_r1 in [1, 3, 7, 9, 13, 27] {
            let targets = compute_channel_targets(monthly_r1, &channels);
            let total = total_monthly_action_target(&targets) as f64;
            let expected: f64 = channels
                .iter()
                .filter(|c| c.enabled)
                .map(|c| monthly_r1 as f64 * c.distribution_percent as f64 / 100.0 * c.actions_per_r1)
                .sum();

            let drift = total - expected;
            assert!(drift > -1e-6, "targets under-promise by {drift}");
            assert!(drift <= enabled, "drift {drift} exceeds {enabled}");
        }
    }

    #[test]
    fn over_allocated_mix_scales_targets() {
        let targets = compute_channel_targets(10, &[channel("a", true, 150, 2.0)]);
        assert_eq!(targets[0].monthly_action_target, 30);
    }

    #[test]
    fn progress_handles_zero_target() {
        assert_eq!(calculate_progress(12.0, 0.0), 0);
        assert_eq!(calculate_progress(5.0, 8.0), 63);
        assert_eq!(PerformanceBand::from_progress(63), PerformanceBand::Close);
        assert_eq!(PerformanceBand::from_progress(100), PerformanceBand::Achieved);
        assert_eq!(PerformanceBand::from_progress(10), PerformanceBand::Behind);
    }

    #[test]
    fn grouping_skips_idle_channels_and_keeps_category_order() {
        let channels = default_channels();
        let targets = compute_channel_targets(9, &channels);
        let groups = channels_by_category(&targets, &channels);

        let categories: Vec<_> = groups.iter().map(|g| g.category).collect();
        assert_eq!(
            categories,
            vec![
                ChannelCategory::Relationnel,
                ChannelCategory::Terrain,
                ChannelCategory::Telephone,
                ChannelCategory::Digital,
            ]
        );
        assert!(groups
            .iter()
            .flat_map(|g| g.targets.iter())
            .all(|t| t.monthly_action_target > 0));
    }
}
