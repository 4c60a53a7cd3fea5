use clap::{Args, ValueEnum};
use serde::Deserialize;

use super::error::InputError;
use crate::core::{
    CompoundInterestInput, CompoundingFrequency, ProjectionInput, RetirementAgeInput,
};

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub(crate) enum CliCompoundingFrequency {
    Annually,
    Semiannually,
    Quarterly,
    Monthly,
    Daily,
}

impl From<CliCompoundingFrequency> for CompoundingFrequency {
    fn from(value: CliCompoundingFrequency) -> Self {
        match value {
            CliCompoundingFrequency::Annually => CompoundingFrequency::Annually,
            CliCompoundingFrequency::Semiannually => CompoundingFrequency::Semiannually,
            CliCompoundingFrequency::Quarterly => CompoundingFrequency::Quarterly,
            CliCompoundingFrequency::Monthly => CompoundingFrequency::Monthly,
            CliCompoundingFrequency::Daily => CompoundingFrequency::Daily,
        }
    }
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub(crate) enum ApiCompoundingFrequency {
    #[serde(alias = "annual", alias = "yearly")]
    Annually,
    #[serde(alias = "semi-annually", alias = "semiAnnually", alias = "semi_annually")]
    Semiannually,
    #[serde(alias = "quarter")]
    Quarterly,
    #[serde(alias = "month")]
    Monthly,
    #[serde(alias = "day")]
    Daily,
}

impl From<ApiCompoundingFrequency> for CliCompoundingFrequency {
    fn from(value: ApiCompoundingFrequency) -> Self {
        match value {
            ApiCompoundingFrequency::Annually => CliCompoundingFrequency::Annually,
            ApiCompoundingFrequency::Semiannually => CliCompoundingFrequency::Semiannually,
            ApiCompoundingFrequency::Quarterly => CliCompoundingFrequency::Quarterly,
            ApiCompoundingFrequency::Monthly => CliCompoundingFrequency::Monthly,
            ApiCompoundingFrequency::Daily => CliCompoundingFrequency::Daily,
        }
    }
}

#[derive(Args, Debug, Clone)]
pub(crate) struct ProjectionArgs {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = 65)]
    pub retirement_age: u32,
    #[arg(long, default_value_t = 50_000.0)]
    pub current_assets: f64,
    #[arg(long, default_value_t = 1_000.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 7.0, help = "Expected annual growth in percent")]
    pub growth_rate: f64,
    #[arg(long, default_value_t = 3.0, help = "Annual inflation in percent")]
    pub inflation_rate: f64,
    #[arg(long, default_value_t = 0.0, help = "Annual fund fees in percent")]
    pub fee_drag: f64,
    #[arg(
        long,
        default_value_t = 48_000.0,
        help = "First-year retirement spending in today's money"
    )]
    pub annual_spending: f64,
    #[arg(
        long,
        default_value_t = 0.0,
        help = "Flat nominal income during retirement (not inflation adjusted)"
    )]
    pub supplemental_income: f64,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct RetirementArgs {
    #[arg(long, default_value_t = 30)]
    pub current_age: u32,
    #[arg(long, default_value_t = 50_000.0)]
    pub current_savings: f64,
    #[arg(long, default_value_t = 2_000.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 4_000.0)]
    pub monthly_expenses: f64,
    #[arg(long, default_value_t = 7.0, help = "Expected annual return in percent")]
    pub expected_return: f64,
}

#[derive(Args, Debug, Clone)]
pub(crate) struct CompoundArgs {
    #[arg(long, default_value_t = 10_000.0)]
    pub initial_investment: f64,
    #[arg(long, default_value_t = 500.0)]
    pub monthly_contribution: f64,
    #[arg(long, default_value_t = 7.0, help = "Annual interest rate in percent")]
    pub annual_rate: f64,
    #[arg(long, default_value_t = 10)]
    pub years: u32,
    #[arg(long, value_enum, default_value_t = CliCompoundingFrequency::Annually)]
    pub compounding_frequency: CliCompoundingFrequency,
}

pub(crate) fn default_projection_args() -> ProjectionArgs {
    ProjectionArgs {
        current_age: 30,
        retirement_age: 65,
        current_assets: 50_000.0,
        monthly_contribution: 1_000.0,
        growth_rate: 7.0,
        inflation_rate: 3.0,
        fee_drag: 0.0,
        annual_spending: 48_000.0,
        supplemental_income: 0.0,
    }
}

pub(crate) fn default_retirement_args() -> RetirementArgs {
    RetirementArgs {
        current_age: 30,
        current_savings: 50_000.0,
        monthly_contribution: 2_000.0,
        monthly_expenses: 4_000.0,
        expected_return: 7.0,
    }
}

pub(crate) fn default_compound_args() -> CompoundArgs {
    CompoundArgs {
        initial_investment: 10_000.0,
        monthly_contribution: 500.0,
        annual_rate: 7.0,
        years: 10,
        compounding_frequency: CliCompoundingFrequency::Annually,
    }
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct ProjectionPayload {
    current_age: Option<u32>,
    retirement_age: Option<u32>,
    #[serde(alias = "currentSavings")]
    current_assets: Option<f64>,
    monthly_contribution: Option<f64>,
    #[serde(alias = "expectedReturn", alias = "nominalGrowthRate")]
    growth_rate: Option<f64>,
    inflation_rate: Option<f64>,
    #[serde(alias = "feeDragRate", alias = "fees")]
    fee_drag: Option<f64>,
    #[serde(alias = "annualSpendingAtStart", alias = "annualExpenses")]
    annual_spending: Option<f64>,
    #[serde(alias = "flatSupplementalIncome", alias = "partTimeIncome")]
    supplemental_income: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct RetirementPayload {
    current_age: Option<u32>,
    current_savings: Option<f64>,
    monthly_contribution: Option<f64>,
    monthly_expenses: Option<f64>,
    #[serde(alias = "expectedReturnPercent")]
    expected_return: Option<f64>,
}

#[derive(Debug, Default, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub(crate) struct CompoundPayload {
    #[serde(alias = "principal")]
    initial_investment: Option<f64>,
    monthly_contribution: Option<f64>,
    #[serde(alias = "annualRatePercent", alias = "interestRate")]
    annual_rate: Option<f64>,
    years: Option<u32>,
    #[serde(alias = "frequency")]
    compounding_frequency: Option<ApiCompoundingFrequency>,
}

pub(crate) fn projection_args_from_payload(payload: ProjectionPayload) -> ProjectionArgs {
    let defaults = default_projection_args();
    ProjectionArgs {
        current_age: payload.current_age.unwrap_or(defaults.current_age),
        retirement_age: payload.retirement_age.unwrap_or(defaults.retirement_age),
        current_assets: payload.current_assets.unwrap_or(defaults.current_assets),
        monthly_contribution: payload
            .monthly_contribution
            .unwrap_or(defaults.monthly_contribution),
        growth_rate: payload.growth_rate.unwrap_or(defaults.growth_rate),
        inflation_rate: payload.inflation_rate.unwrap_or(defaults.inflation_rate),
        fee_drag: payload.fee_drag.unwrap_or(defaults.fee_drag),
        annual_spending: payload.annual_spending.unwrap_or(defaults.annual_spending),
        supplemental_income: payload
            .supplemental_income
            .unwrap_or(defaults.supplemental_income),
    }
}

pub(crate) fn retirement_args_from_payload(payload: RetirementPayload) -> RetirementArgs {
    let defaults = default_retirement_args();
    RetirementArgs {
        current_age: payload.current_age.unwrap_or(defaults.current_age),
        current_savings: payload.current_savings.unwrap_or(defaults.current_savings),
        monthly_contribution: payload
            .monthly_contribution
            .unwrap_or(defaults.monthly_contribution),
        monthly_expenses: payload.monthly_expenses.unwrap_or(defaults.monthly_expenses),
        expected_return: payload.expected_return.unwrap_or(defaults.expected_return),
    }
}

pub(crate) fn compound_args_from_payload(payload: CompoundPayload) -> CompoundArgs {
    let defaults = default_compound_args();
    CompoundArgs {
        initial_investment: payload
            .initial_investment
            .unwrap_or(defaults.initial_investment),
        monthly_contribution: payload
            .monthly_contribution
            .unwrap_or(defaults.monthly_contribution),
        annual_rate: payload.annual_rate.unwrap_or(defaults.annual_rate),
        years: payload.years.unwrap_or(defaults.years),
        compounding_frequency: payload
            .compounding_frequency
            .map(Into::into)
            .unwrap_or(defaults.compounding_frequency),
    }
}

fn finite(field: &'static str, value: f64) -> Result<f64, InputError> {
    if value.is_finite() {
        Ok(value)
    } else {
        Err(InputError::NotFinite { field })
    }
}

fn non_negative(field: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(field, value)? < 0.0 {
        return Err(InputError::Negative { field });
    }
    Ok(value)
}

fn rate(field: &'static str, value: f64) -> Result<f64, InputError> {
    if finite(field, value)? <= -100.0 {
        return Err(InputError::RateTooLow { field });
    }
    Ok(value)
}

fn age_within(field: &'static str, value: u32, min: u32, max: u32) -> Result<u32, InputError> {
    if !(min..=max).contains(&value) {
        return Err(InputError::OutOfRange { field, min, max });
    }
    Ok(value)
}

pub(crate) fn build_projection_input(args: &ProjectionArgs) -> Result<ProjectionInput, InputError> {
    let growth = rate("--growth-rate", args.growth_rate)?;
    let fee = non_negative("--fee-drag", args.fee_drag)?;
    rate("--growth-rate net of --fee-drag", growth - fee)?;

    Ok(ProjectionInput {
        current_age: age_within("--current-age", args.current_age, 0, 120)?,
        retirement_age: age_within("--retirement-age", args.retirement_age, 0, 120)?,
        current_assets: non_negative("--current-assets", args.current_assets)?,
        monthly_contribution: non_negative("--monthly-contribution", args.monthly_contribution)?,
        nominal_growth_rate: growth,
        inflation_rate: rate("--inflation-rate", args.inflation_rate)?,
        fee_drag_rate: fee,
        annual_spending_at_start: non_negative("--annual-spending", args.annual_spending)?,
        flat_supplemental_income: non_negative("--supplemental-income", args.supplemental_income)?,
    })
}

pub(crate) fn build_retirement_input(args: &RetirementArgs) -> Result<RetirementAgeInput, InputError> {
    Ok(RetirementAgeInput {
        current_age: age_within("--current-age", args.current_age, 18, 70)?,
        current_savings: non_negative("--current-savings", args.current_savings)?,
        monthly_contribution: non_negative("--monthly-contribution", args.monthly_contribution)?,
        monthly_expenses: non_negative("--monthly-expenses", args.monthly_expenses)?,
        expected_return_percent: rate("--expected-return", args.expected_return)?,
    })
}

pub(crate) fn build_compound_input(args: &CompoundArgs) -> Result<CompoundInterestInput, InputError> {
    Ok(CompoundInterestInput {
        initial_investment: non_negative("--initial-investment", args.initial_investment)?,
        monthly_contribution: non_negative("--monthly-contribution", args.monthly_contribution)?,
        annual_rate_percent: rate("--annual-rate", args.annual_rate)?,
        years: age_within("--years", args.years, 1, 100)?,
        compounding_frequency: args.compounding_frequency.into(),
    })
}
