use tracing::debug;

use super::math::{RateSpec, annuity_payment};
use super::types::{AmortizationSystem, LoanInputs, LoanSchedule, ScheduleRow};

pub fn build_amortization_schedule(inputs: &LoanInputs) -> LoanSchedule {
    let financed = (inputs.loan_amount - inputs.down_payment).max(0.0);
    let rate = RateSpec::nominal(inputs.annual_rate);
    let periods = inputs.years * 12;

    let rows = match inputs.system {
        AmortizationSystem::Price => price_rows(financed, rate.monthly, periods),
        AmortizationSystem::Sac => sac_rows(financed, rate.monthly, periods),
    };

    let total_paid = rows.iter().map(|row| row.installment).sum();
    let total_interest = rows.iter().map(|row| row.interest).sum();
    debug!(
        system = ?inputs.system,
        periods,
        financed,
        "amortization schedule built"
    );

    LoanSchedule {
        system: inputs.system,
        financed_amount: financed,
        monthly_rate: rate.monthly,
        first_installment: rows.first().map_or(0.0, |row| row.installment),
        last_installment: rows.last().map_or(0.0, |row| row.installment),
        total_paid,
        total_interest,
        rows,
    }
}

fn price_rows(financed: f64, rate: f64, periods: u32) -> Vec<ScheduleRow> {
    let installment = annuity_payment(financed, rate, periods);
    let mut balance = financed;
    (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            let principal = installment - interest;
            balance -= principal;
            ScheduleRow {
                period,
                installment,
                interest,
                principal,
                balance: balance.max(0.0),
            }
        })
        .collect()
}

fn sac_rows(financed: f64, rate: f64, periods: u32) -> Vec<ScheduleRow> {
    if periods == 0 {
        return Vec::new();
    }
    let principal = financed / periods as f64;
    let mut balance = financed;
    (1..=periods)
        .map(|period| {
            let interest = balance * rate;
            balance -= principal;
            ScheduleRow {
                period,
                installment: principal + interest,
                interest,
                principal,
                balance: balance.max(0.0),
            }
        })
        .collect()
}
