use tracing::debug;

use super::math::{Crossing, ForwardRun, RateSpec, percent_of};
use super::types::{
    ContributionTiming, ExpenseSensitivity, FireInputs, FireLevel, FireLevelKind, FirePoint,
    FireProjection, SavingsBand, SavingsSensitivity,
};

/// Fifty years.
pub const MAX_MONTHS: u32 = 600;

const LEVELS: [(FireLevelKind, f64); 5] = [
    (FireLevelKind::Lean, 0.5),
    (FireLevelKind::Flex, 0.75),
    (FireLevelKind::Full, 1.0),
    (FireLevelKind::Fat, 1.5),
    (FireLevelKind::Obese, 2.0),
];
const EXTRA_SAVINGS_STEPS: [f64; 5] = [0.0, 500.0, 1_000.0, 2_000.0, 5_000.0];
const EXPENSE_REDUCTION_STEPS: [f64; 4] = [0.0, 500.0, 1_000.0, 2_000.0];

/// Balance required for `monthly_expenses` to be covered by withdrawing
/// `withdrawal_rate` percent a year. Unreachable when the rate is not positive.
pub fn fire_target(monthly_expenses: f64, withdrawal_rate: f64) -> f64 {
    if withdrawal_rate <= 0.0 {
        return f64::INFINITY;
    }
    monthly_expenses * 12.0 / (withdrawal_rate / 100.0)
}

/// One forward search towards a (possibly inflation-indexed) target.
#[derive(Debug, Clone, Copy)]
struct TargetSearch {
    run: ForwardRun,
    monthly_expenses: f64,
    withdrawal_rate: f64,
    multiplier: f64,
    inflation_rate: Option<f64>,
}

impl TargetSearch {
    /// Target the balance after `month` growth steps is checked against.
    /// Months 1..=12 use the base target; month 13 is the first indexed one.
    fn target_at(&self, month: u32) -> f64 {
        let years_indexed = month.saturating_sub(1) / 12;
        let expenses = match self.inflation_rate {
            Some(rate) => self.monthly_expenses * (1.0 + rate / 100.0).powi(years_indexed as i32),
            None => self.monthly_expenses,
        };
        fire_target(expenses, self.withdrawal_rate) * self.multiplier
    }

    fn months(&self) -> Option<u32> {
        self.run
            .months_until_moving(|month| self.target_at(month), Crossing::Rising)
    }

    fn trajectory(&self, current_age: u32) -> Vec<FirePoint> {
        let mut points = Vec::new();
        if self.run.initial_balance >= self.target_at(0) {
            return points;
        }
        for (month, balance) in self.run.balances() {
            let target = self.target_at(month);
            points.push(FirePoint {
                month,
                age: current_age as f64 + month as f64 / 12.0,
                balance,
                target,
            });
            if balance >= target {
                break;
            }
        }
        points
    }

    fn with_savings(mut self, monthly_savings: f64) -> Self {
        self.run.monthly_flow = monthly_savings;
        self
    }
}

pub fn project_fire(inputs: &FireInputs) -> FireProjection {
    let monthly_savings = inputs.monthly_income - inputs.monthly_expenses;
    let savings_rate = percent_of(monthly_savings, inputs.monthly_income);
    let fire_expenses = inputs
        .fire_monthly_expenses
        .unwrap_or(inputs.monthly_expenses);
    let base_target = fire_target(fire_expenses, inputs.withdrawal_rate);

    let search = TargetSearch {
        run: ForwardRun {
            initial_balance: inputs.current_balance,
            monthly_rate: RateSpec::effective(inputs.annual_return).monthly,
            monthly_flow: monthly_savings,
            timing: ContributionTiming::EndOfMonth,
            cap: MAX_MONTHS,
        },
        monthly_expenses: fire_expenses,
        withdrawal_rate: inputs.withdrawal_rate,
        multiplier: 1.0,
        inflation_rate: inputs.inflation_rate,
    };

    let trajectory = search.trajectory(inputs.current_age);
    let months_to_fire = search.months();
    let (final_balance, final_target) = trajectory
        .last()
        .map_or((inputs.current_balance, base_target), |point| {
            (point.balance, point.target)
        });
    let years_to_fire = months_to_fire.map(|months| months as f64 / 12.0);

    let levels = LEVELS
        .iter()
        .map(|&(kind, multiplier)| {
            let target = base_target * multiplier;
            FireLevel {
                kind,
                multiplier,
                target,
                progress_pct: percent_of(inputs.current_balance, target),
                months: TargetSearch {
                    multiplier,
                    ..search
                }
                .months(),
            }
        })
        .collect();

    let savings_sensitivity = EXTRA_SAVINGS_STEPS
        .iter()
        .map(|&extra_savings| {
            let months = search.with_savings(monthly_savings + extra_savings).months();
            SavingsSensitivity {
                extra_savings,
                months,
                months_saved: months_to_fire
                    .zip(months)
                    .map(|(base, faster)| i64::from(base) - i64::from(faster)),
            }
        })
        .collect();

    let expense_sensitivity = EXPENSE_REDUCTION_STEPS
        .iter()
        .map(|&reduction| {
            let monthly_expenses = (fire_expenses - reduction).max(0.0);
            let reduced = TargetSearch {
                monthly_expenses,
                ..search.with_savings(monthly_savings + reduction)
            };
            ExpenseSensitivity {
                reduction,
                target: fire_target(monthly_expenses, inputs.withdrawal_rate),
                months: reduced.months(),
            }
        })
        .collect();

    debug!(
        months_to_fire = ?months_to_fire,
        base_target,
        final_target,
        indexed = inputs.inflation_rate.is_some(),
        "fire projection computed"
    );

    FireProjection {
        monthly_savings,
        savings_rate,
        savings_band: savings_band(savings_rate),
        base_target,
        final_target,
        progress_pct: percent_of(inputs.current_balance, final_target),
        months_to_fire,
        years_to_fire,
        age_at_fire: years_to_fire.map(|years| inputs.current_age as f64 + years),
        final_balance,
        passive_monthly_income: final_balance * inputs.withdrawal_rate / 100.0 / 12.0,
        trajectory,
        levels,
        savings_sensitivity,
        expense_sensitivity,
    }
}

fn savings_band(savings_rate: f64) -> SavingsBand {
    if savings_rate >= 50.0 {
        SavingsBand::Excellent
    } else if savings_rate >= 30.0 {
        SavingsBand::Good
    } else {
        SavingsBand::NeedsWork
    }
}
