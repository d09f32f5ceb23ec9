use clap::{Args, ValueEnum};

use super::error::{ValidationError, non_negative, positive, within};
use crate::core::{
    AmortizationSystem, ContributionTiming, FireInputs, GrowthInputs, LoanInputs,
    RetirementInputs,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliTiming {
    Start,
    End,
}

impl From<CliTiming> for ContributionTiming {
    fn from(value: CliTiming) -> Self {
        match value {
            CliTiming::Start => ContributionTiming::StartOfMonth,
            CliTiming::End => ContributionTiming::EndOfMonth,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum CliSystem {
    Price,
    Sac,
}

impl From<CliSystem> for AmortizationSystem {
    fn from(value: CliSystem) -> Self {
        match value {
            CliSystem::Price => AmortizationSystem::Price,
            CliSystem::Sac => AmortizationSystem::Sac,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub struct GrowthArgs {
    #[arg(long, default_value_t = 10_000.0, help = "Starting balance")]
    pub initial: f64,
    #[arg(long, default_value_t = 500.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 10.0, help = "Annual return in percent")]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    pub years: u32,
    #[arg(long, value_enum, default_value_t = CliTiming::Start)]
    pub timing: CliTiming,
    #[arg(
        long,
        help = "Annual inflation in percent; enables the inflation-adjusted series"
    )]
    pub inflation_rate: Option<f64>,
}

impl Default for GrowthArgs {
    fn default() -> Self {
        Self {
            initial: 10_000.0,
            monthly_contribution: 500.0,
            annual_rate: 10.0,
            years: 10,
            timing: CliTiming::Start,
            inflation_rate: None,
        }
    }
}

impl GrowthArgs {
    pub fn into_inputs(self) -> Result<GrowthInputs, ValidationError> {
        Ok(GrowthInputs {
            initial_balance: non_negative("--initial", self.initial)?,
            monthly_contribution: non_negative(
                "--monthly-contribution",
                self.monthly_contribution,
            )?,
            annual_rate: non_negative("--annual-rate", self.annual_rate)?,
            years: within("--years", self.years, 0, 100)?,
            timing: self.timing.into(),
            inflation_rate: self
                .inflation_rate
                .map(|rate| non_negative("--inflation-rate", rate))
                .transpose()?,
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct LoanArgs {
    #[arg(long, default_value_t = 200_000.0)]
    pub loan_amount: f64,
    #[arg(long, default_value_t = 0.0)]
    pub down_payment: f64,
    #[arg(
        long,
        default_value_t = 9.0,
        help = "Nominal annual rate in percent, charged monthly as rate / 12"
    )]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 20)]
    pub years: u32,
    #[arg(long, value_enum, default_value_t = CliSystem::Price)]
    pub system: CliSystem,
}

impl Default for LoanArgs {
    fn default() -> Self {
        Self {
            loan_amount: 200_000.0,
            down_payment: 0.0,
            annual_rate: 9.0,
            years: 20,
            system: CliSystem::Price,
        }
    }
}

impl LoanArgs {
    pub fn into_inputs(self) -> Result<LoanInputs, ValidationError> {
        let loan_amount = non_negative("--loan-amount", self.loan_amount)?;
        let down_payment = non_negative("--down-payment", self.down_payment)?;
        if down_payment > loan_amount {
            return Err(ValidationError::OutOfRange {
                field: "--down-payment",
                reason: "cannot exceed --loan-amount".to_string(),
            });
        }
        Ok(LoanInputs {
            loan_amount,
            down_payment,
            annual_rate: non_negative("--annual-rate", self.annual_rate)?,
            years: within("--years", self.years, 1, 50)?,
            system: self.system.into(),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct RetirementArgs {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = 50_000.0)]
    pub current_balance: f64,
    #[arg(long, default_value_t = 1_000.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 60)]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 5_000.0)]
    pub desired_income: f64,
    #[arg(long, default_value_t = 85)]
    pub life_expectancy: u32,
    #[arg(
        long,
        default_value_t = 8.0,
        help = "Annual return while contributing, in percent"
    )]
    pub accumulation_rate: f64,
    #[arg(
        long,
        default_value_t = 5.0,
        help = "Annual return while drawing down, in percent"
    )]
    pub retirement_rate: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Expected annual inflation in percent (reported, not applied)"
    )]
    pub inflation_rate: f64,
    #[arg(long, value_enum, default_value_t = CliTiming::Start)]
    pub timing: CliTiming,
}

impl Default for RetirementArgs {
    fn default() -> Self {
        Self {
            current_age: 30,
            current_balance: 50_000.0,
            monthly_contribution: 1_000.0,
            retirement_age: 60,
            desired_income: 5_000.0,
            life_expectancy: 85,
            accumulation_rate: 8.0,
            retirement_rate: 5.0,
            inflation_rate: 4.0,
            timing: CliTiming::Start,
        }
    }
}

impl RetirementArgs {
    pub fn into_inputs(self) -> Result<RetirementInputs, ValidationError> {
        let current_age = within("--current-age", self.current_age, 18, 100)?;
        if self.retirement_age <= current_age {
            return Err(ValidationError::Ordering {
                field: "--retirement-age",
                other: "--current-age",
            });
        }
        if self.life_expectancy <= self.retirement_age {
            return Err(ValidationError::Ordering {
                field: "--life-expectancy",
                other: "--retirement-age",
            });
        }
        Ok(RetirementInputs {
            current_age,
            current_balance: non_negative("--current-balance", self.current_balance)?,
            monthly_contribution: non_negative(
                "--monthly-contribution",
                self.monthly_contribution,
            )?,
            retirement_age: self.retirement_age,
            desired_monthly_income: non_negative("--desired-income", self.desired_income)?,
            life_expectancy: within("--life-expectancy", self.life_expectancy, 19, 120)?,
            accumulation_rate: non_negative("--accumulation-rate", self.accumulation_rate)?,
            retirement_rate: non_negative("--retirement-rate", self.retirement_rate)?,
            inflation_rate: non_negative("--inflation-rate", self.inflation_rate)?,
            timing: self.timing.into(),
        })
    }
}

#[derive(Args, Debug, Clone)]
pub struct FireArgs {
    #[arg(long, default_value_t = 8_000.0, help = "Monthly net income")]
    pub income: f64,
    #[arg(long, default_value_t = 4_000.0, help = "Current monthly expenses")]
    pub expenses: f64,
    #[arg(long, default_value_t = 100_000.0)]
    pub current_balance: f64,
    #[arg(long, default_value_t = 28)]
    pub current_age: u32,
    #[arg(long, default_value_t = 8.0, help = "Annual return in percent")]
    pub annual_return: f64,
    #[arg(
        long,
        default_value_t = 4.0,
        help = "Annual withdrawal rate in percent of the balance"
    )]
    pub withdrawal_rate: f64,
    #[arg(long, help = "Monthly expenses after FIRE, defaults to --expenses")]
    pub fire_expenses: Option<f64>,
    #[arg(long, default_value_t = 4.0, help = "Annual inflation for target indexing")]
    pub inflation_rate: f64,
    #[arg(long, help = "Keep the target fixed instead of indexing it yearly")]
    pub no_inflation: bool,
}

impl Default for FireArgs {
    fn default() -> Self {
        Self {
            income: 8_000.0,
            expenses: 4_000.0,
            current_balance: 100_000.0,
            current_age: 28,
            annual_return: 8.0,
            withdrawal_rate: 4.0,
            fire_expenses: None,
            inflation_rate: 4.0,
            no_inflation: false,
        }
    }
}

impl FireArgs {
    pub fn into_inputs(self) -> Result<FireInputs, ValidationError> {
        let inflation_rate = non_negative("--inflation-rate", self.inflation_rate)?;
        Ok(FireInputs {
            monthly_income: non_negative("--income", self.income)?,
            monthly_expenses: non_negative("--expenses", self.expenses)?,
            current_balance: non_negative("--current-balance", self.current_balance)?,
            current_age: within("--current-age", self.current_age, 0, 120)?,
            annual_return: non_negative("--annual-return", self.annual_return)?,
            withdrawal_rate: positive("--withdrawal-rate", self.withdrawal_rate)?,
            fire_monthly_expenses: self
                .fire_expenses
                .map(|expenses| non_negative("--fire-expenses", expenses))
                .transpose()?,
            inflation_rate: (!self.no_inflation).then_some(inflation_rate),
        })
    }
}
