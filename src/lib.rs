//! Pharma NPV - Net present value model for a pharmaceutical product launch
//!
//! This library provides:
//! - Population and flu-incidence projection for the addressable market
//! - Three-regime market penetration (pre-approval, Fisher-Pry adoption under
//!   patent exclusivity, flat post-patent share)
//! - Development cost schedule, revenue, cost of revenue and net income by year
//! - Discounting to NPV, with IRR and payback summaries
//! - Parallel batch evaluation of assumption scenarios

pub mod error;
pub mod assumptions;
pub mod projection;
pub mod scenario;

// Re-export commonly used types
pub use error::{NpvError, NpvResult};
pub use assumptions::{Assumptions, PenetrationRegime};
pub use projection::{ProjectionEngine, ProjectionResult, ProjectionSummary, YearRow};
pub use scenario::{Scenario, ScenarioOutcome, ScenarioRunner};

/// Net present value of the launch (millions USD)
///
/// Fails with a descriptive error when an assumption is outside its domain
/// or the penetration regimes do not span exactly `n_years`.
pub fn compute_npv(assumptions: &Assumptions) -> NpvResult<f64> {
    ProjectionEngine::new(assumptions.clone()).npv()
}

/// Net present value with every assumption at its default
pub fn compute_npv_default() -> NpvResult<f64> {
    compute_npv(&Assumptions::default())
}
