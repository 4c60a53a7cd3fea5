use serde::Serialize;

/// Parameters for one projection run. Rates are plain percentages (7 = 7%).
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectionInput {
    pub current_age: u32,
    pub retirement_age: u32,
    pub current_assets: f64,
    pub monthly_contribution: f64,
    pub nominal_growth_rate: f64,
    pub inflation_rate: f64,
    pub fee_drag_rate: f64,
    pub annual_spending_at_start: f64,
    pub flat_supplemental_income: f64,
}

impl ProjectionInput {
    pub fn effective_nominal_rate(&self) -> f64 {
        (self.nominal_growth_rate - self.fee_drag_rate) / 100.0
    }

    pub fn effective_real_rate(&self) -> f64 {
        (self.nominal_growth_rate - self.inflation_rate - self.fee_drag_rate) / 100.0
    }

    pub fn annual_contribution(&self) -> f64 {
        self.monthly_contribution * 12.0
    }

    /// Last simulated age: twenty years past retirement, but never before 75.
    pub fn end_age(&self) -> u32 {
        self.retirement_age.saturating_add(20).max(75)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct YearRecord {
    pub age: u32,
    pub is_retired: bool,
    pub total_wealth_keep_contributing: f64,
    pub total_wealth_coast: f64,
    pub real_value: f64,
    pub yearly_growth: f64,
    pub yearly_withdrawal: f64,
    pub yearly_supplemental_income: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RetirementAgeInput {
    pub current_age: u32,
    pub current_savings: f64,
    pub monthly_contribution: f64,
    pub monthly_expenses: f64,
    pub expected_return_percent: f64,
}

impl RetirementAgeInput {
    pub fn annual_return(&self) -> f64 {
        self.expected_return_percent / 100.0
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum RetirementOutlook {
    Exceptional,
    Early,
    AheadOfSchedule,
    Traditional,
    NeedsAttention,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TargetAgeCheck {
    pub target_age: u32,
    pub achievable: bool,
    /// `None` when the target age has already passed and cannot be reached.
    pub additional_monthly_savings: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RetirementAgeReport {
    pub retirement_age: u32,
    pub years_to_retirement: u32,
    pub target_nest_egg: f64,
    pub projected_nest_egg: f64,
    pub savings_rate: f64,
    pub target_checks: Vec<TargetAgeCheck>,
    pub outlook: RetirementOutlook,
    pub recommendation: &'static str,
}

#[derive(Copy, Clone, Debug, Default, Eq, PartialEq, Hash, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum CompoundingFrequency {
    #[default]
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Daily,
}

impl CompoundingFrequency {
    pub fn periods_per_year(self) -> u32 {
        match self {
            CompoundingFrequency::Annually => 1,
            CompoundingFrequency::Semiannually => 2,
            CompoundingFrequency::Quarterly => 4,
            CompoundingFrequency::Monthly => 12,
            CompoundingFrequency::Daily => 365,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct CompoundInterestInput {
    pub initial_investment: f64,
    pub monthly_contribution: f64,
    pub annual_rate_percent: f64,
    pub years: u32,
    pub compounding_frequency: CompoundingFrequency,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundYear {
    pub year: u32,
    pub compound_balance: f64,
    pub simple_interest_balance: f64,
    pub contributions_only: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CompoundInterestReport {
    pub compounding_frequency: CompoundingFrequency,
    pub final_balance: f64,
    pub total_contributions: f64,
    pub total_interest: f64,
    pub years: Vec<CompoundYear>,
}
