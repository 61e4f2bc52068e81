//! Projection engine: per-year launch cashflows, discounting and NPV

mod engine;
mod cashflows;
mod discount;
mod irr;

pub use engine::{net_income, patients_treated, revenue_and_cost, ProjectionEngine};
pub use cashflows::{ProjectionResult, ProjectionSummary, YearRow};
pub use discount::DiscountCurve;
pub use irr::calculate_irr;
