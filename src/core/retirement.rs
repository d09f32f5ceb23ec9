use tracing::debug;

use super::growth::accumulate;
use super::math::{
    Crossing, ForwardRun, RateSpec, future_value_factor, present_value_of_annuity,
    sustainable_payment,
};
use super::types::{
    ContributionTiming, DrawdownPoint, PlanAdjustment, RetirementInputs, RetirementPlan,
};

pub fn plan_retirement(inputs: &RetirementInputs) -> RetirementPlan {
    let accumulation_rate = RateSpec::effective(inputs.accumulation_rate);
    let retirement_rate = RateSpec::effective(inputs.retirement_rate);
    let accumulation_months = inputs.retirement_age.saturating_sub(inputs.current_age) * 12;
    let drawdown_months = inputs.life_expectancy.saturating_sub(inputs.retirement_age) * 12;

    let accumulation = accumulate(
        inputs.current_balance,
        inputs.monthly_contribution,
        accumulation_rate.monthly,
        inputs.timing,
        accumulation_months,
        0.0,
    );
    let balance_at_retirement = accumulation[accumulation.len() - 1].balance;

    let required_balance = present_value_of_annuity(
        inputs.desired_monthly_income,
        retirement_rate.monthly,
        drawdown_months,
    );
    let balance_gap = balance_at_retirement - required_balance;
    let sustainable_monthly_income =
        sustainable_payment(balance_at_retirement, retirement_rate.monthly, drawdown_months);
    let income_gap = inputs.desired_monthly_income - sustainable_monthly_income;

    let run = ForwardRun {
        initial_balance: balance_at_retirement,
        monthly_rate: retirement_rate.monthly,
        monthly_flow: -inputs.desired_monthly_income,
        timing: ContributionTiming::EndOfMonth,
        cap: drawdown_months,
    };
    let drawdown: Vec<DrawdownPoint> = run
        .balances()
        .map(|(month, balance)| DrawdownPoint {
            month,
            age: inputs.retirement_age as f64 + month as f64 / 12.0,
            balance: balance.max(0.0),
            income_paid: if balance > 0.0 {
                inputs.desired_monthly_income
            } else {
                0.0
            },
        })
        .collect();
    let depleted_at_month = run.months_until(0.0, Crossing::Falling);

    let adjustment = if balance_gap < 0.0 {
        let required_monthly_contribution = required_contribution(
            inputs.current_balance,
            required_balance,
            accumulation_rate.monthly,
            accumulation_months,
            inputs.timing,
        );
        PlanAdjustment::Shortfall {
            required_monthly_contribution,
            additional_monthly_contribution: required_monthly_contribution
                .map(|required| required - inputs.monthly_contribution),
            extra_working_years: ratio(balance_gap.abs(), sustainable_monthly_income * 12.0),
        }
    } else {
        PlanAdjustment::Surplus {
            years_earlier: ratio(balance_gap, inputs.desired_monthly_income * 12.0),
            potential_bequest: drawdown
                .iter()
                .map(|point| point.balance)
                .fold(0.0, f64::max),
        }
    };

    debug!(
        accumulation_months,
        drawdown_months,
        balance_at_retirement,
        required_balance,
        depleted = depleted_at_month.is_some(),
        "retirement plan computed"
    );

    RetirementPlan {
        accumulation_months,
        drawdown_months,
        inflation_rate: inputs.inflation_rate,
        balance_at_retirement,
        required_balance,
        balance_gap,
        sustainable_monthly_income,
        income_gap,
        depleted_at_month,
        adjustment,
        accumulation,
        drawdown,
    }
}

/// Level monthly contribution that grows `current_balance` into
/// `target_balance` over `months`, deposited with the given timing.
fn required_contribution(
    current_balance: f64,
    target_balance: f64,
    monthly_rate: f64,
    months: u32,
    timing: ContributionTiming,
) -> Option<f64> {
    if months == 0 {
        return None;
    }
    let grown_balance = current_balance * (1.0 + monthly_rate).powi(months as i32);
    let factor = match timing {
        ContributionTiming::EndOfMonth => future_value_factor(monthly_rate, months),
        ContributionTiming::StartOfMonth => {
            future_value_factor(monthly_rate, months) * (1.0 + monthly_rate)
        }
    };
    Some((target_balance - grown_balance) / factor)
}

fn ratio(numerator: f64, denominator: f64) -> Option<f64> {
    (denominator != 0.0).then(|| numerator / denominator)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::math::annuity_payment;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs() -> RetirementInputs {
        RetirementInputs {
            current_age: 30,
            current_balance: 50_000.0,
            monthly_contribution: 1_000.0,
            retirement_age: 60,
            desired_monthly_income: 5_000.0,
            life_expectancy: 85,
            accumulation_rate: 8.0,
            retirement_rate: 5.0,
            inflation_rate: 4.0,
            timing: ContributionTiming::StartOfMonth,
        }
    }

    #[test]
    fn phases_have_expected_lengths() {
        let plan = plan_retirement(&sample_inputs());
        assert_eq!(plan.accumulation_months, 360);
        assert_eq!(plan.drawdown_months, 300);
        assert_eq!(plan.accumulation.len(), 361);
        assert_eq!(plan.drawdown.len(), 300);
        assert_eq!(plan.accumulation[0].balance, 50_000.0);
        assert_eq!(plan.drawdown[0].month, 1);
        assert_approx_tol(plan.drawdown[299].age, 85.0, 1e-12);
    }

    #[test]
    fn required_balance_funds_desired_income_exactly() {
        let plan = plan_retirement(&sample_inputs());
        let rate = RateSpec::effective(5.0).monthly;
        assert_approx_tol(
            annuity_payment(plan.required_balance, rate, 300),
            5_000.0,
            1e-6,
        );
        assert_approx_tol(
            plan.balance_gap,
            plan.balance_at_retirement - plan.required_balance,
            1e-9,
        );
    }

    #[test]
    fn surplus_plan_reports_bequest_and_early_retirement() {
        let plan = plan_retirement(&sample_inputs());
        assert!(plan.balance_gap > 0.0);
        assert!(plan.sustainable_monthly_income > 5_000.0);
        assert!(plan.income_gap < 0.0);
        assert!(plan.depleted_at_month.is_none());
        match plan.adjustment {
            PlanAdjustment::Surplus {
                years_earlier,
                potential_bequest,
            } => {
                let years = years_earlier.expect("desired income is positive");
                assert_approx_tol(years, plan.balance_gap / 60_000.0, 1e-9);
                assert!(potential_bequest >= plan.drawdown[299].balance);
            }
            other => panic!("expected surplus, got {other:?}"),
        }
    }

    #[test]
    fn shortfall_contribution_closes_the_gap() {
        let mut inputs = sample_inputs();
        inputs.monthly_contribution = 200.0;
        inputs.desired_monthly_income = 15_000.0;
        let plan = plan_retirement(&inputs);
        assert!(plan.balance_gap < 0.0);
        assert!(plan.depleted_at_month.is_some());

        let PlanAdjustment::Shortfall {
            required_monthly_contribution,
            additional_monthly_contribution,
            extra_working_years,
        } = plan.adjustment
        else {
            panic!("expected shortfall");
        };
        let required = required_monthly_contribution.expect("accumulation phase exists");
        assert_approx_tol(
            additional_monthly_contribution.expect("accumulation phase exists"),
            required - 200.0,
            1e-9,
        );
        assert!(extra_working_years.expect("sustainable income positive") > 0.0);

        inputs.monthly_contribution = required;
        let fixed = plan_retirement(&inputs);
        assert_approx_tol(fixed.balance_at_retirement, plan.required_balance, 1e-4);
    }

    #[test]
    fn end_of_month_timing_solves_with_ordinary_annuity() {
        let mut inputs = sample_inputs();
        inputs.timing = ContributionTiming::EndOfMonth;
        inputs.desired_monthly_income = 20_000.0;
        let plan = plan_retirement(&inputs);
        let PlanAdjustment::Shortfall {
            required_monthly_contribution: Some(required),
            ..
        } = plan.adjustment
        else {
            panic!("expected shortfall with a contribution");
        };
        inputs.monthly_contribution = required;
        let fixed = plan_retirement(&inputs);
        assert_approx_tol(fixed.balance_at_retirement, plan.required_balance, 1e-4);
    }

    #[test]
    fn drawdown_balance_is_clamped_and_income_stops_on_depletion() {
        let mut inputs = sample_inputs();
        inputs.monthly_contribution = 0.0;
        inputs.accumulation_rate = 0.0;
        inputs.retirement_rate = 0.0;
        inputs.current_age = 59;
        inputs.current_balance = 12_000.0;
        inputs.desired_monthly_income = 3_000.0;
        let plan = plan_retirement(&inputs);

        assert_eq!(plan.balance_at_retirement, 12_000.0);
        assert_eq!(plan.depleted_at_month, Some(4));
        assert_eq!(plan.drawdown[2].income_paid, 3_000.0);
        assert_eq!(plan.drawdown[3].income_paid, 0.0);
        assert!(plan.drawdown.iter().all(|point| point.balance >= 0.0));
        assert_eq!(plan.drawdown[10].balance, 0.0);
    }

    #[test]
    fn zero_rates_reduce_to_linear_algebra() {
        let mut inputs = sample_inputs();
        inputs.accumulation_rate = 0.0;
        inputs.retirement_rate = 0.0;
        let plan = plan_retirement(&inputs);
        assert_approx_tol(plan.balance_at_retirement, 50_000.0 + 1_000.0 * 360.0, 1e-6);
        assert_approx_tol(plan.required_balance, 5_000.0 * 300.0, 1e-9);
        assert_approx_tol(
            plan.sustainable_monthly_income,
            plan.balance_at_retirement / 300.0,
            1e-9,
        );
        let PlanAdjustment::Shortfall {
            required_monthly_contribution,
            ..
        } = plan.adjustment
        else {
            panic!("expected shortfall");
        };
        assert_approx_tol(
            required_monthly_contribution.expect("months > 0"),
            (1_500_000.0 - 50_000.0) / 360.0,
            1e-9,
        );
    }

    #[test]
    fn already_retired_has_no_required_contribution() {
        let mut inputs = sample_inputs();
        inputs.current_age = 60;
        inputs.current_balance = 1_000.0;
        let plan = plan_retirement(&inputs);
        assert_eq!(plan.accumulation_months, 0);
        assert_eq!(plan.accumulation.len(), 1);
        assert!(matches!(
            plan.adjustment,
            PlanAdjustment::Shortfall {
                required_monthly_contribution: None,
                additional_monthly_contribution: None,
                ..
            }
        ));
    }

    #[test]
    fn inflation_is_reported_but_not_applied() {
        let mut inputs = sample_inputs();
        let baseline = plan_retirement(&inputs);
        inputs.inflation_rate = 9.0;
        let inflated = plan_retirement(&inputs);
        assert_eq!(inflated.inflation_rate, 9.0);
        assert_eq!(inflated.balance_at_retirement, baseline.balance_at_retirement);
        assert_eq!(inflated.drawdown, baseline.drawdown);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_plan_is_deterministic_and_consistent(
            current_age in 20u32..60,
            working_years in 1u32..40,
            retired_years in 1u32..40,
            balance in 0u32..1_000_000,
            contribution in 0u32..10_000,
            income in 0u32..30_000,
            acc_bp in 0u32..1_500,
            ret_bp in 0u32..1_000
        ) {
            let inputs = RetirementInputs {
                current_age,
                current_balance: balance as f64,
                monthly_contribution: contribution as f64,
                retirement_age: current_age + working_years,
                desired_monthly_income: income as f64,
                life_expectancy: current_age + working_years + retired_years,
                accumulation_rate: acc_bp as f64 / 100.0,
                retirement_rate: ret_bp as f64 / 100.0,
                inflation_rate: 4.0,
                timing: ContributionTiming::StartOfMonth,
            };
            let plan = plan_retirement(&inputs);
            prop_assert_eq!(&plan, &plan_retirement(&inputs));
            for point in &plan.accumulation {
                prop_assert_eq!(point.gain, point.balance - point.contributed);
            }
            for point in &plan.drawdown {
                prop_assert!(point.balance >= 0.0);
            }
            if plan.balance_gap >= 0.0 {
                prop_assert!(plan.income_gap <= 1e-6 * (income as f64).max(1.0));
            }
        }
    }
}
