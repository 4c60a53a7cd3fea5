use super::engine::{ContributionPolicy, YearPhase, step_balance};
use super::types::{CompoundInterestInput, CompoundInterestReport, CompoundYear};

/// Compound, simple-interest and contributions-only balances for every year
/// from 0 to `input.years`.
///
/// Within a year the annual rate and the year's contributions are split
/// evenly across the compounding periods, so annual compounding adds the
/// whole year's contributions once, at the end of the year.
pub fn compound_interest_series(input: &CompoundInterestInput) -> CompoundInterestReport {
    let rate = input.annual_rate_percent / 100.0;
    let principal = input.initial_investment;
    let annual_contribution = input.monthly_contribution * 12.0;
    let periods = input.compounding_frequency.periods_per_year();
    let period_rate = rate / periods as f64;
    let period_contribution = annual_contribution / periods as f64;

    let mut years = Vec::with_capacity(input.years as usize + 1);
    years.push(CompoundYear {
        year: 0,
        compound_balance: principal,
        simple_interest_balance: principal,
        contributions_only: principal,
    });

    let mut balance = principal;
    for year in 1..=input.years {
        for _ in 0..periods {
            balance = step_balance(
                balance,
                period_rate,
                period_contribution,
                ContributionPolicy::PureAccumulation,
                YearPhase::Accumulating,
            );
        }
        let contributed = annual_contribution * year as f64;
        years.push(CompoundYear {
            year,
            compound_balance: balance,
            simple_interest_balance: principal + principal * rate * year as f64 + contributed,
            contributions_only: principal + contributed,
        });
    }

    let total_contributions = principal + annual_contribution * input.years as f64;
    CompoundInterestReport {
        compounding_frequency: input.compounding_frequency,
        final_balance: balance,
        total_contributions,
        total_interest: balance - total_contributions,
        years,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::CompoundingFrequency;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    fn assert_close(actual: f64, expected: f64, tol: f64) {
        assert!(
            (actual - expected).abs() <= tol,
            "expected {expected}, got {actual}, tolerance {tol}"
        );
    }

    fn sample_input() -> CompoundInterestInput {
        CompoundInterestInput {
            initial_investment: 10_000.0,
            monthly_contribution: 0.0,
            annual_rate_percent: 7.0,
            years: 10,
            compounding_frequency: CompoundingFrequency::Annually,
        }
    }

    #[test]
    fn lump_sum_grows_at_annual_rate() {
        let report = compound_interest_series(&sample_input());
        assert_eq!(report.years.len(), 11);
        assert_close(report.final_balance, 19_671.51, 0.01);
        assert_close(report.years[10].compound_balance, 10_000.0 * 1.07_f64.powi(10), 1e-6);
        assert_close(report.total_contributions, 10_000.0, 1e-9);
        assert_close(report.total_interest, 9_671.51, 0.01);
    }

    #[test]
    fn year_zero_is_the_starting_principal() {
        let mut input = sample_input();
        input.monthly_contribution = 500.0;
        let origin = &compound_interest_series(&input).years[0];
        assert_eq!(origin.year, 0);
        assert_eq!(origin.compound_balance, 10_000.0);
        assert_eq!(origin.simple_interest_balance, 10_000.0);
        assert_eq!(origin.contributions_only, 10_000.0);
    }

    #[test]
    fn annual_contributions_land_at_year_end() {
        let mut input = sample_input();
        input.monthly_contribution = 100.0;
        input.years = 2;

        let report = compound_interest_series(&input);
        assert_close(report.years[1].compound_balance, 10_700.0 + 1_200.0, 1e-9);
        assert_close(
            report.years[2].compound_balance,
            (10_700.0 + 1_200.0) * 1.07 + 1_200.0,
            1e-9,
        );
        assert_close(report.years[2].simple_interest_balance, 10_000.0 + 1_400.0 + 2_400.0, 1e-9);
        assert_close(report.years[2].contributions_only, 12_400.0, 1e-9);
        assert_close(report.total_contributions, 12_400.0, 1e-9);
    }

    #[test]
    fn monthly_compounding_beats_annual() {
        let annual = compound_interest_series(&sample_input());
        let mut input = sample_input();
        input.compounding_frequency = CompoundingFrequency::Monthly;
        let monthly = compound_interest_series(&input);

        assert_close(
            monthly.final_balance,
            10_000.0 * (1.0 + 0.07 / 12.0_f64).powi(120),
            1e-6,
        );
        assert!(monthly.final_balance > annual.final_balance);
        assert_eq!(monthly.compounding_frequency, CompoundingFrequency::Monthly);
    }

    #[test]
    fn zero_rate_only_accumulates_contributions() {
        let mut input = sample_input();
        input.annual_rate_percent = 0.0;
        input.monthly_contribution = 250.0;
        input.compounding_frequency = CompoundingFrequency::Quarterly;

        let report = compound_interest_series(&input);
        assert_close(report.final_balance, 40_000.0, 1e-6);
        assert_close(report.total_interest, 0.0, 1e-6);
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(32))]

        #[test]
        fn prop_compound_dominates_simple_and_contributions(
            principal in 0u32..500_000,
            monthly in 0u32..5_000,
            rate_bp in 0i32..1_500,
            years in 1u32..60,
            frequency_idx in 0usize..5,
        ) {
            let frequency = [
                CompoundingFrequency::Annually,
                CompoundingFrequency::Semiannually,
                CompoundingFrequency::Quarterly,
                CompoundingFrequency::Monthly,
                CompoundingFrequency::Daily,
            ][frequency_idx];
            let input = CompoundInterestInput {
                initial_investment: principal as f64,
                monthly_contribution: monthly as f64,
                annual_rate_percent: rate_bp as f64 / 100.0,
                years,
                compounding_frequency: frequency,
            };

            let report = compound_interest_series(&input);
            prop_assert_eq!(report.years.len(), years as usize + 1);
            for row in &report.years {
                let slack = 1e-6 + row.contributions_only * 1e-9;
                prop_assert!(row.compound_balance + slack >= row.contributions_only);
                prop_assert!(row.simple_interest_balance + slack >= row.contributions_only);
            }
            prop_assert!((report.final_balance - report.total_contributions - report.total_interest).abs() < 1e-6);
        }
    }
}
