//! Non-revenue cost schedule for clinical development

use crate::error::{NpvError, NpvResult};

use super::Assumptions;

/// Baseline R&D spend by development year (millions USD)
pub const BASELINE_RD_COSTS: [f64; 6] = [3.515, 3.789, 8.2, 10.8, 23.796, 2.2];

/// Development cost schedule keyed by projection year
///
/// Each development year costs the scaled baseline R&D spend plus the
/// clinical-development SG&A. No non-revenue cost is incurred after the
/// last development year.
#[derive(Debug, Clone)]
pub struct DevelopmentCostSchedule {
    /// Baseline R&D by development year (index 0 = projection year 0)
    baseline: Vec<f64>,
    /// Multiplier on baseline R&D
    rd_cost_scaler: f64,
    /// SG&A added to every development year
    clindev_sga: f64,
}

impl DevelopmentCostSchedule {
    /// Create from launch assumptions with the standard baseline
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self::new(
            BASELINE_RD_COSTS.to_vec(),
            assumptions.rd_cost_scaler,
            assumptions.clindev_sga,
        )
    }

    /// Create with a custom baseline
    pub fn new(baseline: Vec<f64>, rd_cost_scaler: f64, clindev_sga: f64) -> Self {
        Self {
            baseline,
            rd_cost_scaler,
            clindev_sga,
        }
    }

    /// Number of development years
    pub fn development_years(&self) -> usize {
        self.baseline.len()
    }

    /// Non-revenue cost for a projection year
    pub fn cost_for_year(&self, year: usize) -> f64 {
        match self.baseline.get(year) {
            Some(rd) => self.clindev_sga + self.rd_cost_scaler * rd,
            None => 0.0,
        }
    }

    /// Scaled R&D component only (excludes SG&A)
    pub fn rd_cost_for_year(&self, year: usize) -> f64 {
        self.baseline
            .get(year)
            .map(|rd| self.rd_cost_scaler * rd)
            .unwrap_or(0.0)
    }

    /// Cost for each of `n_years` projection years
    ///
    /// Years past development are zero-filled. A horizon shorter than the
    /// development period is rejected rather than truncated, since dropping
    /// development years would understate cost.
    pub fn for_horizon(&self, n_years: usize) -> NpvResult<Vec<f64>> {
        if n_years < self.development_years() {
            return Err(NpvError::ScheduleExceedsHorizon {
                schedule_years: self.development_years(),
                n_years,
            });
        }
        Ok((0..n_years).map(|year| self.cost_for_year(year)).collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_default_schedule_matches_thirty_year_layout() {
        let schedule = DevelopmentCostSchedule::from_assumptions(&Assumptions::default());
        let costs = schedule.for_horizon(30).unwrap();

        let expected_head = [4.015, 4.289, 8.7, 11.3, 24.296, 2.7];
        assert_eq!(costs.len(), 30);
        for (actual, expected) in costs.iter().zip(expected_head.iter()) {
            assert_relative_eq!(*actual, *expected, max_relative = 1e-12);
        }
        assert!(costs[6..].iter().all(|&c| c == 0.0));
    }

    #[test]
    fn test_scaler_only_touches_rd() {
        let schedule = DevelopmentCostSchedule::new(BASELINE_RD_COSTS.to_vec(), 2.0, 0.5);
        assert_relative_eq!(schedule.cost_for_year(4), 0.5 + 2.0 * 23.796, max_relative = 1e-12);
        assert_relative_eq!(schedule.rd_cost_for_year(4), 2.0 * 23.796, max_relative = 1e-12);
        assert_eq!(schedule.cost_for_year(6), 0.0);
        assert_eq!(schedule.rd_cost_for_year(6), 0.0);
    }

    #[test]
    fn test_exact_development_horizon() {
        let schedule = DevelopmentCostSchedule::from_assumptions(&Assumptions::default());
        assert_eq!(schedule.for_horizon(6).unwrap().len(), 6);
    }

    #[test]
    fn test_short_horizon_rejected() {
        let schedule = DevelopmentCostSchedule::from_assumptions(&Assumptions::default());
        assert_eq!(
            schedule.for_horizon(4),
            Err(NpvError::ScheduleExceedsHorizon { schedule_years: 6, n_years: 4 })
        );
    }
}
