//! Memoization of projections keyed on the exact input record.
//!
//! `project` is pure, so two calls with bit-identical inputs always produce
//! the same series. The HTTP surface recomputes on every form change; the
//! cache lets repeated requests for the same inputs share one series.

use std::collections::HashMap;
use std::sync::{Arc, Mutex, PoisonError};

use super::engine::project;
use super::types::{ProjectionInput, YearRecord};

/// Hashable identity of a [`ProjectionInput`]. Floats are compared by bit
/// pattern, so `0.0` and `-0.0` are distinct keys.
#[derive(Debug, Clone, Copy, Eq, PartialEq, Hash)]
pub struct ProjectionKey {
    ages: (u32, u32),
    amounts: [u64; 7],
}

impl From<&ProjectionInput> for ProjectionKey {
    fn from(input: &ProjectionInput) -> Self {
        Self {
            ages: (input.current_age, input.retirement_age),
            amounts: [
                input.current_assets.to_bits(),
                input.monthly_contribution.to_bits(),
                input.nominal_growth_rate.to_bits(),
                input.inflation_rate.to_bits(),
                input.fee_drag_rate.to_bits(),
                input.annual_spending_at_start.to_bits(),
                input.flat_supplemental_income.to_bits(),
            ],
        }
    }
}

#[derive(Debug)]
pub struct ProjectionCache {
    capacity: usize,
    entries: Mutex<HashMap<ProjectionKey, Arc<Vec<YearRecord>>>>,
}

impl ProjectionCache {
    pub fn new(capacity: usize) -> Self {
        Self {
            capacity: capacity.max(1),
            entries: Mutex::new(HashMap::new()),
        }
    }

    /// Returns the cached series for `input`, computing and storing it on a
    /// miss. A full cache is emptied before the new entry goes in.
    pub fn get_or_compute(&self, input: &ProjectionInput) -> Arc<Vec<YearRecord>> {
        let key = ProjectionKey::from(input);
        let mut entries = self.entries.lock().unwrap_or_else(PoisonError::into_inner);

        if let Some(series) = entries.get(&key) {
            log::debug!("projection cache hit for age {}", input.current_age);
            return Arc::clone(series);
        }

        log::debug!(
            "projection cache miss ({} of {} entries in use)",
            entries.len(),
            self.capacity
        );
        if entries.len() >= self.capacity {
            entries.clear();
        }
        let series = Arc::new(project(input));
        entries.insert(key, Arc::clone(&series));
        series
    }

    pub fn len(&self) -> usize {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn clear(&self) {
        self.entries
            .lock()
            .unwrap_or_else(PoisonError::into_inner)
            .clear();
    }
}

impl Default for ProjectionCache {
    fn default() -> Self {
        Self::new(256)
    }
}
