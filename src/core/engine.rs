use super::types::{ProjectionInput, YearRecord};

/// How a balance is fed while the owner is still working, and whether it is
/// ever drawn down.
#[derive(Copy, Clone, Debug, Eq, PartialEq)]
pub enum ContributionPolicy {
    /// Contributions until retirement, withdrawals afterwards.
    KeepContributing,
    /// No contributions at all; withdrawals once retired.
    Coast,
    /// Contributions every step and never a withdrawal.
    PureAccumulation,
}

#[derive(Copy, Clone, Debug, PartialEq)]
pub enum YearPhase {
    Accumulating,
    Retired { withdrawal: f64 },
}

/// Advances one balance by a single step. Growth is applied to the balance as
/// it stood at the start of the step; contributions and withdrawals land at
/// the end. The result is never negative.
pub fn step_balance(
    balance: f64,
    rate: f64,
    contribution: f64,
    policy: ContributionPolicy,
    phase: YearPhase,
) -> f64 {
    let grown = balance * (1.0 + rate);
    let next = match (policy, phase) {
        (ContributionPolicy::PureAccumulation, _) => grown + contribution,
        (_, YearPhase::Retired { withdrawal }) => grown - withdrawal,
        (ContributionPolicy::Coast, YearPhase::Accumulating) => grown,
        (ContributionPolicy::KeepContributing, YearPhase::Accumulating) => grown + contribution,
    };
    next.max(0.0)
}

/// Runs `years` annual accumulation steps and returns the final balance.
pub fn accumulate(start: f64, rate: f64, annual_contribution: f64, years: u32) -> f64 {
    (0..years).fold(start, |balance, _| {
        step_balance(
            balance,
            rate,
            annual_contribution,
            ContributionPolicy::PureAccumulation,
            YearPhase::Accumulating,
        )
    })
}

/// Year-by-year projection of the keep-contributing and coast scenarios.
///
/// Each record holds the balances entering that age; the growth, withdrawal
/// and supplemental income on the record are what happens during the year.
pub fn project(input: &ProjectionInput) -> Vec<YearRecord> {
    let end_age = input.end_age();
    if input.current_age > end_age {
        return Vec::new();
    }

    let nominal_rate = input.effective_nominal_rate();
    let real_rate = input.effective_real_rate();
    let inflation_step = 1.0 + input.inflation_rate / 100.0;
    let annual_contribution = input.annual_contribution();
    let supplemental = input.flat_supplemental_income;
    // The real track is already in today's money, so it draws the un-inflated amount.
    let real_required_withdrawal = (input.annual_spending_at_start - supplemental).max(0.0);

    let mut keep_contributing = input.current_assets.max(0.0);
    let mut coast = keep_contributing;
    let mut real_value = keep_contributing;
    let mut inflation_factor = 1.0;

    let mut records = Vec::with_capacity((end_age - input.current_age + 1) as usize);
    for age in input.current_age..=end_age {
        let is_retired = age >= input.retirement_age;
        let current_spending = input.annual_spending_at_start * inflation_factor;
        let required_withdrawal = if is_retired {
            (current_spending - supplemental).max(0.0)
        } else {
            0.0
        };
        let yearly_growth = keep_contributing * nominal_rate;

        records.push(YearRecord {
            age,
            is_retired,
            total_wealth_keep_contributing: keep_contributing,
            total_wealth_coast: coast,
            real_value,
            yearly_growth: yearly_growth.max(0.0),
            yearly_withdrawal: required_withdrawal,
            yearly_supplemental_income: if is_retired { supplemental } else { 0.0 },
        });

        let (nominal_phase, real_phase) = if is_retired {
            (
                YearPhase::Retired {
                    withdrawal: required_withdrawal,
                },
                YearPhase::Retired {
                    withdrawal: real_required_withdrawal,
                },
            )
        } else {
            (YearPhase::Accumulating, YearPhase::Accumulating)
        };

        keep_contributing = step_balance(
            keep_contributing,
            nominal_rate,
            annual_contribution,
            ContributionPolicy::KeepContributing,
            nominal_phase,
        );
        coast = step_balance(
            coast,
            nominal_rate,
            annual_contribution,
            ContributionPolicy::Coast,
            nominal_phase,
        );
        real_value = step_balance(
            real_value,
            real_rate,
            annual_contribution,
            ContributionPolicy::KeepContributing,
            real_phase,
        );
        inflation_factor *= inflation_step;
    }

    records
}

/// The record for the first retired year, if the series reaches it.
pub fn retirement_snapshot(records: &[YearRecord]) -> Option<&YearRecord> {
    records.iter().find(|record| record.is_retired)
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::{prop_assert, prop_assert_eq, proptest};

    const EPS: f64 = 1e-6;

    fn assert_approx(actual: f64, expected: f64) {
        assert!(
            (actual - expected).abs() <= EPS,
            "expected {expected}, got {actual}"
        );
    }

    fn sample_input() -> ProjectionInput {
        ProjectionInput {
            current_age: 30,
            retirement_age: 65,
            current_assets: 50_000.0,
            monthly_contribution: 1_000.0,
            nominal_growth_rate: 7.0,
            inflation_rate: 3.0,
            fee_drag_rate: 0.0,
            annual_spending_at_start: 48_000.0,
            flat_supplemental_income: 0.0,
        }
    }

    fn record_at(records: &[YearRecord], age: u32) -> &YearRecord {
        records
            .iter()
            .find(|r| r.age == age)
            .unwrap_or_else(|| panic!("no record for age {age}"))
    }

    #[test]
    fn concrete_scenario_matches_expected_shape() {
        let records = project(&sample_input());

        let first = &records[0];
        assert_eq!(first.age, 30);
        assert!(!first.is_retired);
        assert_approx(first.total_wealth_keep_contributing, 50_000.0);
        assert_approx(first.total_wealth_coast, 50_000.0);
        assert_approx(first.yearly_withdrawal, 0.0);

        let at_retirement = record_at(&records, 65);
        assert!(at_retirement.is_retired);
        assert!(at_retirement.yearly_withdrawal > 0.0);
        assert!(at_retirement.total_wealth_coast < at_retirement.total_wealth_keep_contributing);

        assert_eq!(records.len(), 85 - 30 + 1);
        assert_eq!(records.last().map(|r| r.age), Some(85));
    }

    #[test]
    fn records_hold_start_of_year_balances() {
        let records = project(&sample_input());
        assert_approx(records[0].yearly_growth, 3_500.0);
        assert_approx(records[1].total_wealth_keep_contributing, 50_000.0 * 1.07 + 12_000.0);
        assert_approx(records[1].total_wealth_coast, 50_000.0 * 1.07);
        assert_approx(records[1].real_value, 50_000.0 * 1.04 + 12_000.0);
    }

    #[test]
    fn withdrawal_tracks_inflated_spending_from_retirement() {
        let records = project(&sample_input());
        let at_retirement = record_at(&records, 65);
        assert_approx(at_retirement.yearly_withdrawal, 48_000.0 * 1.03_f64.powi(35));
        assert_approx(at_retirement.yearly_supplemental_income, 0.0);
        assert_approx(record_at(&records, 64).yearly_withdrawal, 0.0);
    }

    #[test]
    fn first_year_spending_is_not_inflated() {
        let mut input = sample_input();
        input.retirement_age = 30;
        input.flat_supplemental_income = 8_000.0;

        let records = project(&input);
        assert!(records[0].is_retired);
        assert_approx(records[0].yearly_withdrawal, 40_000.0);
        assert_approx(records[1].yearly_withdrawal, 48_000.0 * 1.03 - 8_000.0);
    }

    #[test]
    fn supplemental_income_stays_flat_in_nominal_terms() {
        let mut input = sample_input();
        input.retirement_age = 60;
        input.flat_supplemental_income = 20_000.0;

        let records = project(&input);
        for record in records.iter().filter(|r| r.is_retired) {
            assert_approx(record.yearly_supplemental_income, 20_000.0);
        }
        let early = record_at(&records, 60).yearly_withdrawal;
        let late = record_at(&records, 80).yearly_withdrawal;
        assert!(late > early);
    }

    #[test]
    fn supplemental_income_covering_spending_means_no_withdrawal() {
        let mut input = sample_input();
        input.retirement_age = 30;
        input.inflation_rate = 0.0;
        input.annual_spending_at_start = 10_000.0;
        input.flat_supplemental_income = 15_000.0;

        let records = project(&input);
        for record in &records {
            assert_approx(record.yearly_withdrawal, 0.0);
        }
    }

    #[test]
    fn real_track_draws_todays_spending() {
        let mut input = sample_input();
        input.current_age = 65;
        input.retirement_age = 65;
        input.current_assets = 1_000_000.0;
        input.flat_supplemental_income = 8_000.0;

        let records = project(&input);
        assert_approx(records[1].real_value, 1_000_000.0 * 1.04 - 40_000.0);
        assert_approx(records[2].real_value, (1_000_000.0 * 1.04 - 40_000.0) * 1.04 - 40_000.0);
    }

    #[test]
    fn depleted_balances_stay_at_zero() {
        let mut input = sample_input();
        input.current_age = 60;
        input.retirement_age = 60;
        input.current_assets = 100_000.0;
        input.annual_spending_at_start = 80_000.0;

        let records = project(&input);
        let depleted_from = records
            .iter()
            .position(|r| r.total_wealth_keep_contributing == 0.0)
            .expect("portfolio should deplete");
        for record in &records[depleted_from..] {
            assert_eq!(record.total_wealth_keep_contributing, 0.0);
            assert_eq!(record.total_wealth_coast, 0.0);
            assert_eq!(record.yearly_growth, 0.0);
        }
    }

    #[test]
    fn negative_growth_is_recorded_as_zero() {
        let mut input = sample_input();
        input.nominal_growth_rate = -5.0;

        let records = project(&input);
        assert_eq!(records[0].yearly_growth, 0.0);
        assert_approx(records[1].total_wealth_coast, 47_500.0);
    }

    #[test]
    fn fee_drag_reduces_both_rates() {
        let mut input = sample_input();
        input.fee_drag_rate = 1.0;
        assert_approx(input.effective_nominal_rate(), 0.06);
        assert_approx(input.effective_real_rate(), 0.03);

        let records = project(&input);
        assert_approx(records[1].total_wealth_coast, 53_000.0);
    }

    #[test]
    fn retirement_before_current_age_retires_every_year() {
        let mut input = sample_input();
        input.current_age = 70;
        input.retirement_age = 50;

        let records = project(&input);
        assert_eq!(records.len(), 6);
        assert!(records.iter().all(|r| r.is_retired));
        assert_eq!(retirement_snapshot(&records).map(|r| r.age), Some(70));
    }

    #[test]
    fn current_age_past_horizon_yields_empty_series() {
        let mut input = sample_input();
        input.current_age = 90;
        input.retirement_age = 60;
        assert!(project(&input).is_empty());
    }

    #[test]
    fn pure_accumulation_ignores_withdrawals() {
        let next = step_balance(
            100.0,
            0.1,
            5.0,
            ContributionPolicy::PureAccumulation,
            YearPhase::Retired { withdrawal: 50.0 },
        );
        assert_approx(next, 115.0);
        assert_approx(accumulate(10_000.0, 0.07, 0.0, 10), 10_000.0 * 1.07_f64.powi(10));
    }

    proptest! {
        #![proptest_config(proptest::test_runner::Config::with_cases(48))]

        #[test]
        fn prop_series_length_covers_horizon(
            current_age in 18u32..80,
            retirement_age in 0u32..90,
        ) {
            let mut input = sample_input();
            input.current_age = current_age;
            input.retirement_age = retirement_age;

            let end_age = (retirement_age + 20).max(75);
            let expected = (end_age + 1).saturating_sub(current_age) as usize;
            let records = project(&input);
            prop_assert_eq!(records.len(), expected);
            for (idx, record) in records.iter().enumerate() {
                prop_assert_eq!(record.age, current_age + idx as u32);
                prop_assert_eq!(record.is_retired, record.age >= retirement_age);
            }
        }

        #[test]
        fn prop_balances_never_go_negative(
            current_age in 20u32..70,
            retire_offset in 0u32..30,
            assets in 0u32..2_000_000,
            monthly in 0u32..5_000,
            growth_bp in -3_000i32..1_500,
            inflation_bp in -200i32..1_500,
            fee_bp in 0u32..300,
            spending in 0u32..300_000,
            supplemental in 0u32..50_000,
        ) {
            let input = ProjectionInput {
                current_age,
                retirement_age: current_age + retire_offset,
                current_assets: assets as f64,
                monthly_contribution: monthly as f64,
                nominal_growth_rate: growth_bp as f64 / 100.0,
                inflation_rate: inflation_bp as f64 / 100.0,
                fee_drag_rate: fee_bp as f64 / 100.0,
                annual_spending_at_start: spending as f64,
                flat_supplemental_income: supplemental as f64,
            };

            for record in project(&input) {
                prop_assert!(record.total_wealth_keep_contributing >= 0.0);
                prop_assert!(record.total_wealth_coast >= 0.0);
                prop_assert!(record.real_value >= 0.0);
                prop_assert!(record.yearly_growth >= 0.0);
                prop_assert!(record.yearly_withdrawal >= 0.0);
                prop_assert!(record.yearly_supplemental_income >= 0.0);
            }
        }

        #[test]
        fn prop_more_contribution_never_lowers_balance(
            current_age in 20u32..60,
            retire_offset in 0u32..40,
            assets in 0u32..500_000,
            monthly in 0u32..3_000,
            extra in 1u32..3_000,
            growth_bp in -500i32..1_200,
            spending in 0u32..150_000,
        ) {
            let mut low = sample_input();
            low.current_age = current_age;
            low.retirement_age = current_age + retire_offset;
            low.current_assets = assets as f64;
            low.monthly_contribution = monthly as f64;
            low.nominal_growth_rate = growth_bp as f64 / 100.0;
            low.annual_spending_at_start = spending as f64;

            let mut high = low.clone();
            high.monthly_contribution += extra as f64;

            let low_records = project(&low);
            let high_records = project(&high);
            for (a, b) in low_records.iter().zip(&high_records) {
                prop_assert!(
                    b.total_wealth_keep_contributing + 1e-6 >= a.total_wealth_keep_contributing
                );
            }
        }

        #[test]
        fn prop_coast_never_exceeds_keep_contributing_before_retirement(
            current_age in 20u32..60,
            retire_offset in 0u32..40,
            assets in 0u32..500_000,
            monthly in 0u32..5_000,
            growth_bp in -1_000i32..1_500,
        ) {
            let mut input = sample_input();
            input.current_age = current_age;
            input.retirement_age = current_age + retire_offset;
            input.current_assets = assets as f64;
            input.monthly_contribution = monthly as f64;
            input.nominal_growth_rate = growth_bp as f64 / 100.0;

            for record in project(&input).iter().filter(|r| !r.is_retired) {
                prop_assert!(record.total_wealth_coast <= record.total_wealth_keep_contributing + 1e-6);
            }
        }
    }
}
