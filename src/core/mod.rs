mod fire;
mod growth;
mod loan;
pub mod math;
mod retirement;
mod types;

pub use fire::{MAX_MONTHS, fire_target, project_fire};
pub use growth::simulate_compound_growth;
pub use loan::build_amortization_schedule;
pub use retirement::plan_retirement;
pub use types::{
    AmortizationSystem, ContributionTiming, DrawdownPoint, ExpenseSensitivity, FireInputs,
    FireLevel, FireLevelKind, FirePoint, FireProjection, GrowthInputs, GrowthPoint, GrowthResult,
    LoanInputs, LoanSchedule, Milestone, PlanAdjustment, RetirementInputs, RetirementPlan,
    SavingsBand, SavingsSensitivity, ScheduleRow,
};
