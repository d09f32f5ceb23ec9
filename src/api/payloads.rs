use serde::Deserialize;

use super::error::ValidationError;
use super::params::{CliSystem, CliTiming, FireArgs, GrowthArgs, LoanArgs, RetirementArgs};
use crate::core::{FireInputs, GrowthInputs, LoanInputs, RetirementInputs};

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum ApiTiming {
    #[serde(alias = "start", alias = "startOfMonth", alias = "start_of_month")]
    StartOfMonth,
    #[serde(alias = "end", alias = "endOfMonth", alias = "end_of_month")]
    EndOfMonth,
}

impl From<ApiTiming> for CliTiming {
    fn from(value: ApiTiming) -> Self {
        match value {
            ApiTiming::StartOfMonth => CliTiming::Start,
            ApiTiming::EndOfMonth => CliTiming::End,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ApiSystem {
    #[serde(alias = "PRICE", alias = "Price")]
    Price,
    #[serde(alias = "SAC", alias = "Sac")]
    Sac,
}

impl From<ApiSystem> for CliSystem {
    fn from(value: ApiSystem) -> Self {
        match value {
            ApiSystem::Price => CliSystem::Price,
            ApiSystem::Sac => CliSystem::Sac,
        }
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct GrowthPayload {
    initial: Option<f64>,
    monthly_contribution: Option<f64>,
    annual_rate: Option<f64>,
    years: Option<u32>,
    timing: Option<ApiTiming>,
    inflation_rate: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LoanPayload {
    loan_amount: Option<f64>,
    down_payment: Option<f64>,
    annual_rate: Option<f64>,
    years: Option<u32>,
    system: Option<ApiSystem>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct RetirementPayload {
    current_age: Option<u32>,
    current_balance: Option<f64>,
    monthly_contribution: Option<f64>,
    retirement_age: Option<u32>,
    desired_income: Option<f64>,
    life_expectancy: Option<u32>,
    accumulation_rate: Option<f64>,
    retirement_rate: Option<f64>,
    inflation_rate: Option<f64>,
    timing: Option<ApiTiming>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FirePayload {
    income: Option<f64>,
    expenses: Option<f64>,
    current_balance: Option<f64>,
    current_age: Option<u32>,
    annual_return: Option<f64>,
    withdrawal_rate: Option<f64>,
    fire_expenses: Option<f64>,
    #[serde(alias = "inflationAdjusted")]
    adjust_for_inflation: Option<bool>,
    inflation_rate: Option<f64>,
}

pub fn growth_inputs_from_payload(payload: GrowthPayload) -> Result<GrowthInputs, ValidationError> {
    let mut args = GrowthArgs::default();
    if let Some(v) = payload.initial {
        args.initial = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.annual_rate {
        args.annual_rate = v;
    }
    if let Some(v) = payload.years {
        args.years = v;
    }
    if let Some(v) = payload.timing {
        args.timing = v.into();
    }
    if payload.inflation_rate.is_some() {
        args.inflation_rate = payload.inflation_rate;
    }
    args.into_inputs()
}

pub fn loan_inputs_from_payload(payload: LoanPayload) -> Result<LoanInputs, ValidationError> {
    let mut args = LoanArgs::default();
    if let Some(v) = payload.loan_amount {
        args.loan_amount = v;
    }
    if let Some(v) = payload.down_payment {
        args.down_payment = v;
    }
    if let Some(v) = payload.annual_rate {
        args.annual_rate = v;
    }
    if let Some(v) = payload.years {
        args.years = v;
    }
    if let Some(v) = payload.system {
        args.system = v.into();
    }
    args.into_inputs()
}

pub fn retirement_inputs_from_payload(
    payload: RetirementPayload,
) -> Result<RetirementInputs, ValidationError> {
    let mut args = RetirementArgs::default();
    if let Some(v) = payload.current_age {
        args.current_age = v;
    }
    if let Some(v) = payload.current_balance {
        args.current_balance = v;
    }
    if let Some(v) = payload.monthly_contribution {
        args.monthly_contribution = v;
    }
    if let Some(v) = payload.retirement_age {
        args.retirement_age = v;
    }
    if let Some(v) = payload.desired_income {
        args.desired_income = v;
    }
    if let Some(v) = payload.life_expectancy {
        args.life_expectancy = v;
    }
    if let Some(v) = payload.accumulation_rate {
        args.accumulation_rate = v;
    }
    if let Some(v) = payload.retirement_rate {
        args.retirement_rate = v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    if let Some(v) = payload.timing {
        args.timing = v.into();
    }
    args.into_inputs()
}

pub fn fire_inputs_from_payload(payload: FirePayload) -> Result<FireInputs, ValidationError> {
    let mut args = FireArgs::default();
    if let Some(v) = payload.income {
        args.income = v;
    }
    if let Some(v) = payload.expenses {
        args.expenses = v;
    }
    if let Some(v) = payload.current_balance {
        args.current_balance = v;
    }
    if let Some(v) = payload.current_age {
        args.current_age = v;
    }
    if let Some(v) = payload.annual_return {
        args.annual_return = v;
    }
    if let Some(v) = payload.withdrawal_rate {
        args.withdrawal_rate = v;
    }
    if payload.fire_expenses.is_some() {
        args.fire_expenses = payload.fire_expenses;
    }
    if let Some(v) = payload.adjust_for_inflation {
        args.no_inflation = !v;
    }
    if let Some(v) = payload.inflation_rate {
        args.inflation_rate = v;
    }
    args.into_inputs()
}
