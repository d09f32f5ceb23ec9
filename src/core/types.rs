use serde::Serialize;

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum ContributionTiming {
    StartOfMonth,
    EndOfMonth,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum AmortizationSystem {
    Price,
    Sac,
}

#[derive(Debug, Clone)]
pub struct GrowthInputs {
    pub initial_balance: f64,
    pub monthly_contribution: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub timing: ContributionTiming,
    pub inflation_rate: Option<f64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthPoint {
    pub month: u32,
    pub year: f64,
    pub balance: f64,
    pub contributed: f64,
    pub gain: f64,
    pub real_balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Milestone {
    pub threshold: f64,
    pub month: Option<u32>,
    pub years: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GrowthResult {
    pub monthly_rate: f64,
    pub final_balance: f64,
    pub final_real_balance: f64,
    pub total_contributed: f64,
    pub total_gain: f64,
    pub return_pct: f64,
    pub milestones: Vec<Milestone>,
    pub points: Vec<GrowthPoint>,
}

#[derive(Debug, Clone)]
pub struct LoanInputs {
    pub loan_amount: f64,
    pub down_payment: f64,
    pub annual_rate: f64,
    pub years: u32,
    pub system: AmortizationSystem,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ScheduleRow {
    pub period: u32,
    pub installment: f64,
    pub interest: f64,
    pub principal: f64,
    pub balance: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LoanSchedule {
    pub system: AmortizationSystem,
    pub financed_amount: f64,
    pub monthly_rate: f64,
    pub first_installment: f64,
    pub last_installment: f64,
    pub total_paid: f64,
    pub total_interest: f64,
    pub rows: Vec<ScheduleRow>,
}

#[derive(Debug, Clone)]
pub struct RetirementInputs {
    pub current_age: u32,
    pub current_balance: f64,
    pub monthly_contribution: f64,
    pub retirement_age: u32,
    pub desired_monthly_income: f64,
    pub life_expectancy: u32,
    pub accumulation_rate: f64,
    pub retirement_rate: f64,
    /// Reported back to the caller only; neither phase is deflated by it.
    pub inflation_rate: f64,
    pub timing: ContributionTiming,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DrawdownPoint {
    pub month: u32,
    pub age: f64,
    pub balance: f64,
    pub income_paid: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum PlanAdjustment {
    #[serde(rename_all = "camelCase")]
    Shortfall {
        required_monthly_contribution: Option<f64>,
        additional_monthly_contribution: Option<f64>,
        extra_working_years: Option<f64>,
    },
    #[serde(rename_all = "camelCase")]
    Surplus {
        years_earlier: Option<f64>,
        potential_bequest: f64,
    },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementPlan {
    pub accumulation_months: u32,
    pub drawdown_months: u32,
    pub inflation_rate: f64,
    pub balance_at_retirement: f64,
    pub required_balance: f64,
    pub balance_gap: f64,
    pub sustainable_monthly_income: f64,
    pub income_gap: f64,
    pub depleted_at_month: Option<u32>,
    pub adjustment: PlanAdjustment,
    pub accumulation: Vec<GrowthPoint>,
    pub drawdown: Vec<DrawdownPoint>,
}

#[derive(Debug, Clone)]
pub struct FireInputs {
    pub monthly_income: f64,
    pub monthly_expenses: f64,
    pub current_balance: f64,
    pub current_age: u32,
    pub annual_return: f64,
    pub withdrawal_rate: f64,
    /// Falls back to `monthly_expenses` when unset.
    pub fire_monthly_expenses: Option<f64>,
    /// `Some` turns on yearly indexing of the target.
    pub inflation_rate: Option<f64>,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum SavingsBand {
    Excellent,
    Good,
    NeedsWork,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum FireLevelKind {
    Lean,
    Flex,
    Full,
    Fat,
    Obese,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FirePoint {
    pub month: u32,
    pub age: f64,
    pub balance: f64,
    pub target: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireLevel {
    pub kind: FireLevelKind,
    pub multiplier: f64,
    pub target: f64,
    pub progress_pct: f64,
    pub months: Option<u32>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SavingsSensitivity {
    pub extra_savings: f64,
    pub months: Option<u32>,
    pub months_saved: Option<i64>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseSensitivity {
    pub reduction: f64,
    pub target: f64,
    pub months: Option<u32>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct FireProjection {
    pub monthly_savings: f64,
    pub savings_rate: f64,
    pub savings_band: SavingsBand,
    pub base_target: f64,
    pub final_target: f64,
    /// Current balance as a percentage of `final_target`, the target in
    /// force when the projection stops.
    pub progress_pct: f64,
    pub months_to_fire: Option<u32>,
    pub years_to_fire: Option<f64>,
    pub age_at_fire: Option<f64>,
    pub final_balance: f64,
    pub passive_monthly_income: f64,
    pub trajectory: Vec<FirePoint>,
    pub levels: Vec<FireLevel>,
    pub savings_sensitivity: Vec<SavingsSensitivity>,
    pub expense_sensitivity: Vec<ExpenseSensitivity>,
}
