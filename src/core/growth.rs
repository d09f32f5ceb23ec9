use tracing::debug;

use super::math::{ForwardRun, RateSpec, deflate, monthly_rate, percent_of};
use super::types::{ContributionTiming, GrowthInputs, GrowthPoint, GrowthResult, Milestone};

const MILESTONES: [f64; 5] = [50_000.0, 100_000.0, 250_000.0, 500_000.0, 1_000_000.0];

pub fn simulate_compound_growth(inputs: &GrowthInputs) -> GrowthResult {
    let rate = RateSpec::effective(inputs.annual_rate);
    let months = inputs.years * 12;
    let points = accumulate(
        inputs.initial_balance,
        inputs.monthly_contribution,
        rate.monthly,
        inputs.timing,
        months,
        inputs.inflation_rate.map_or(0.0, monthly_rate),
    );

    let last = points[points.len() - 1];
    let milestones = MILESTONES
        .iter()
        .map(|&threshold| {
            let month = points
                .iter()
                .find(|point| point.balance >= threshold)
                .map(|point| point.month);
            Milestone {
                threshold,
                month,
                years: month.map(|m| m as f64 / 12.0),
            }
        })
        .collect();

    debug!(
        months,
        final_balance = last.balance,
        "compound growth simulated"
    );

    GrowthResult {
        monthly_rate: rate.monthly,
        final_balance: last.balance,
        final_real_balance: last.real_balance,
        total_contributed: last.contributed,
        total_gain: last.gain,
        return_pct: if last.contributed == 0.0 {
            0.0
        } else {
            percent_of(last.balance, last.contributed) - 100.0
        },
        milestones,
        points,
    }
}

/// Month-by-month accumulation series, month 0 being the untouched initial
/// balance. Shared with the retirement accumulation phase.
pub(crate) fn accumulate(
    initial_balance: f64,
    monthly_contribution: f64,
    monthly_rate: f64,
    timing: ContributionTiming,
    months: u32,
    monthly_inflation: f64,
) -> Vec<GrowthPoint> {
    let mut points = Vec::with_capacity(months as usize + 1);
    points.push(GrowthPoint {
        month: 0,
        year: 0.0,
        balance: initial_balance,
        contributed: initial_balance,
        gain: 0.0,
        real_balance: initial_balance,
    });

    let run = ForwardRun {
        initial_balance,
        monthly_rate,
        monthly_flow: monthly_contribution,
        timing,
        cap: months,
    };
    let mut contributed = initial_balance;
    for (month, balance) in run.balances() {
        contributed += monthly_contribution;
        points.push(GrowthPoint {
            month,
            year: month as f64 / 12.0,
            balance,
            contributed,
            gain: balance - contributed,
            real_balance: deflate(balance, monthly_inflation, month),
        });
    }
    points
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_approx_tol(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_inputs() -> GrowthInputs {
        GrowthInputs {
            initial_balance: 10_000.0,
            monthly_contribution: 500.0,
            annual_rate: 10.0,
            years: 10,
            timing: ContributionTiming::StartOfMonth,
            inflation_rate: None,
        }
    }

    #[test]
    fn start_of_month_reference_scenario() {
        let result = simulate_compound_growth(&sample_inputs());
        assert_eq!(result.points.len(), 121);
        assert_approx_tol(result.monthly_rate, 0.007_974_14, 1e-8);
        assert_approx_tol(result.final_balance, 126_666.224_188, 1e-3);
        assert_approx_tol(result.total_contributed, 70_000.0, 1e-9);
        assert_approx_tol(
            result.return_pct,
            (result.final_balance / 70_000.0 - 1.0) * 100.0,
            1e-9,
        );
    }

    #[test]
    fn end_of_month_contributions_earn_one_month_less() {
        let mut inputs = sample_inputs();
        inputs.timing = ContributionTiming::EndOfMonth;
        let end = simulate_compound_growth(&inputs);
        let start = simulate_compound_growth(&sample_inputs());
        assert_approx_tol(end.final_balance, 125_869.352_958, 1e-3);
        assert!(end.final_balance < start.final_balance);
        assert_eq!(end.total_contributed, start.total_contributed);
    }

    #[test]
    fn zero_horizon_returns_initial_point_only() {
        let mut inputs = sample_inputs();
        inputs.years = 0;
        let result = simulate_compound_growth(&inputs);
        assert_eq!(result.points.len(), 1);
        assert_eq!(result.final_balance, 10_000.0);
        assert_eq!(result.total_gain, 0.0);
        assert_eq!(result.return_pct, 0.0);
    }

    #[test]
    fn zero_rate_is_linear_accumulation() {
        let mut inputs = sample_inputs();
        inputs.annual_rate = 0.0;
        let result = simulate_compound_growth(&inputs);
        for point in &result.points {
            assert_approx_tol(point.balance, 10_000.0 + 500.0 * point.month as f64, 1e-9);
            assert_approx_tol(point.gain, 0.0, 1e-9);
        }
    }

    #[test]
    fn inflation_deflates_real_balance() {
        let mut inputs = sample_inputs();
        inputs.inflation_rate = Some(4.0);
        let result = simulate_compound_growth(&inputs);
        let last = result.points.last().expect("final point");
        assert_approx_tol(last.real_balance, last.balance / 1.04f64.powi(10), 1e-6);
        assert_eq!(result.points[0].real_balance, 10_000.0);
    }

    #[test]
    fn milestones_report_first_month_reached() {
        let result = simulate_compound_growth(&sample_inputs());
        let first = &result.milestones[0];
        assert_eq!(first.threshold, 50_000.0);
        let month = first.month.expect("50k reached");
        assert!(result.points[month as usize].balance >= 50_000.0);
        assert!(result.points[month as usize - 1].balance < 50_000.0);
        assert!(result.milestones[3].month.is_none());
        assert!(result.milestones[4].years.is_none());
    }

    #[test]
    fn milestone_already_met_is_month_zero() {
        let mut inputs = sample_inputs();
        inputs.initial_balance = 60_000.0;
        let result = simulate_compound_growth(&inputs);
        assert_eq!(result.milestones[0].month, Some(0));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_gain_is_balance_minus_contributed(
            initial in 0u32..500_000,
            contribution in 0u32..20_000,
            rate_bp in 0u32..2_500,
            years in 0u32..50,
            start in proptest::bool::ANY,
            inflation_bp in proptest::option::of(0u32..1_500)
        ) {
            let inputs = GrowthInputs {
                initial_balance: initial as f64,
                monthly_contribution: contribution as f64,
                annual_rate: rate_bp as f64 / 100.0,
                years,
                timing: if start { ContributionTiming::StartOfMonth } else { ContributionTiming::EndOfMonth },
                inflation_rate: inflation_bp.map(|bp| bp as f64 / 100.0),
            };
            let result = simulate_compound_growth(&inputs);
            prop_assert_eq!(result.points.len(), years as usize * 12 + 1);
            for (index, point) in result.points.iter().enumerate() {
                prop_assert_eq!(point.month as usize, index);
                prop_assert_eq!(point.gain, point.balance - point.contributed);
                prop_assert!(point.real_balance <= point.balance + 1e-9);
            }
        }

        #[test]
        fn prop_identical_inputs_give_identical_output(
            initial in 0u32..100_000,
            rate_bp in 0u32..2_000,
            years in 0u32..30
        ) {
            let mut inputs = sample_inputs();
            inputs.initial_balance = initial as f64;
            inputs.annual_rate = rate_bp as f64 / 100.0;
            inputs.years = years;
            inputs.inflation_rate = Some(3.0);
            prop_assert_eq!(simulate_compound_growth(&inputs), simulate_compound_growth(&inputs));
        }
    }
}
