use super::engine::accumulate;
use super::types::{RetirementAgeInput, RetirementAgeReport, RetirementOutlook, TargetAgeCheck};

/// Oldest age the search will consider.
pub const RETIREMENT_AGE_CEILING: u32 = 100;
pub const SAFE_WITHDRAWAL_RATE: f64 = 0.04;
pub const TARGET_AGES: [u32; 2] = [40, 50];

pub fn target_nest_egg(monthly_expenses: f64) -> f64 {
    monthly_expenses * 12.0 / SAFE_WITHDRAWAL_RATE
}

pub fn savings_rate(monthly_contribution: f64, monthly_expenses: f64) -> f64 {
    let outgoings = monthly_contribution + monthly_expenses;
    if outgoings <= 0.0 {
        return 0.0;
    }
    monthly_contribution / outgoings * 100.0
}

/// Steps forward a year at a time until the nest egg is reached, stopping at
/// the ceiling when it never is. Returns the age and the balance at that age.
pub fn find_retirement_age(input: &RetirementAgeInput) -> (u32, f64) {
    let target = target_nest_egg(input.monthly_expenses);
    let rate = input.annual_return();
    let annual_contribution = input.monthly_contribution * 12.0;

    let mut age = input.current_age;
    let mut balance = input.current_savings;
    while balance < target && age < RETIREMENT_AGE_CEILING {
        balance = accumulate(balance, rate, annual_contribution, 1);
        age += 1;
    }
    (age, balance)
}

pub fn balance_at_age(input: &RetirementAgeInput, target_age: u32) -> f64 {
    let years = target_age.saturating_sub(input.current_age);
    accumulate(
        input.current_savings,
        input.annual_return(),
        input.monthly_contribution * 12.0,
        years,
    )
}

pub fn is_target_age_achievable(input: &RetirementAgeInput, target_age: u32) -> bool {
    balance_at_age(input, target_age) >= target_nest_egg(input.monthly_expenses)
}

/// Extra monthly saving, on top of the current contribution, that reaches the
/// nest egg exactly at `target_age`. `None` when the target age is not in the
/// future and the savings already in hand fall short.
pub fn additional_monthly_savings(input: &RetirementAgeInput, target_age: u32) -> Option<f64> {
    let years = target_age.saturating_sub(input.current_age);
    let rate = input.annual_return();
    let future_savings = accumulate(input.current_savings, rate, 0.0, years);
    let remaining = target_nest_egg(input.monthly_expenses) - future_savings;
    if remaining <= 0.0 {
        return Some(0.0);
    }
    if years == 0 {
        return None;
    }

    // Contributions land once a year, so the annuity has to be annual as well
    // for the figure to agree with `is_target_age_achievable`.
    let annuity_factor = if rate.abs() < 1e-12 {
        years as f64
    } else {
        ((1.0 + rate).powi(years as i32) - 1.0) / rate
    };
    if !annuity_factor.is_finite() || annuity_factor <= 0.0 {
        return None;
    }
    let required_monthly = remaining / annuity_factor / 12.0;
    Some((required_monthly - input.monthly_contribution).max(0.0))
}

impl RetirementOutlook {
    pub fn for_age(retirement_age: u32) -> Self {
        match retirement_age {
            0..=40 => RetirementOutlook::Exceptional,
            41..=50 => RetirementOutlook::Early,
            51..=55 => RetirementOutlook::AheadOfSchedule,
            56..=65 => RetirementOutlook::Traditional,
            _ => RetirementOutlook::NeedsAttention,
        }
    }

    pub fn message(self) -> &'static str {
        match self {
            RetirementOutlook::Exceptional => {
                "Exceptional! You're on track for early financial independence. Keep it up and consider optimising for tax efficiency."
            }
            RetirementOutlook::Early => {
                "Great progress! You're on track to retire well before the traditional age. Small increases in savings could move it earlier still."
            }
            RetirementOutlook::AheadOfSchedule => {
                "You're ahead of schedule. Look for ways to raise your savings rate or cut expenses to reach independence sooner."
            }
            RetirementOutlook::Traditional => {
                "You're on track for a traditional retirement. Raising your contributions or investment returns could bring it forward significantly."
            }
            RetirementOutlook::NeedsAttention => {
                "Your current plan needs attention. Increase your savings rate, reduce expenses or look for additional income sources."
            }
        }
    }
}

pub fn analyze_retirement(input: &RetirementAgeInput) -> RetirementAgeReport {
    let (retirement_age, projected_nest_egg) = find_retirement_age(input);
    let target_checks = TARGET_AGES
        .iter()
        .map(|&target_age| TargetAgeCheck {
            target_age,
            achievable: is_target_age_achievable(input, target_age),
            additional_monthly_savings: additional_monthly_savings(input, target_age)
                .map(f64::round),
        })
        .collect();
    let outlook = RetirementOutlook::for_age(retirement_age);

    log::debug!(
        "retirement search from age {} settled on {} (nest egg {:.0})",
        input.current_age,
        retirement_age,
        projected_nest_egg
    );

    RetirementAgeReport {
        retirement_age,
        years_to_retirement: retirement_age.saturating_sub(input.current_age),
        target_nest_egg: target_nest_egg(input.monthly_expenses),
        projected_nest_egg,
        savings_rate: savings_rate(input.monthly_contribution, input.monthly_expenses),
        target_checks,
        outlook,
        recommendation: outlook.message(),
    }
}
