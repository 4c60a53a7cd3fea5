mod cache;
mod compound;
mod engine;
mod retirement;
mod types;

pub use cache::{ProjectionCache, ProjectionKey};
pub use compound::compound_interest_series;
pub use engine::{
    ContributionPolicy, YearPhase, accumulate, project, retirement_snapshot, step_balance,
};
pub use retirement::{
    RETIREMENT_AGE_CEILING, SAFE_WITHDRAWAL_RATE, TARGET_AGES, additional_monthly_savings,
    analyze_retirement, balance_at_age, find_retirement_age, is_target_age_achievable,
    savings_rate, target_nest_egg,
};
pub use types::{
    CompoundInterestInput, CompoundInterestReport, CompoundYear, CompoundingFrequency,
    ProjectionInput, RetirementAgeInput, RetirementAgeReport, RetirementOutlook, TargetAgeCheck,
    YearRecord,
};
