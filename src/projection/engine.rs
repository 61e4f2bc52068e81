//! Core projection engine for annual launch cashflows
//!
//! The projection is a straight pipeline over the projection years:
//! population and incidence, penetration, patients treated, development
//! costs, revenue and cost of revenue, net income, then discounting.

use crate::assumptions::{
    flu_incidence, project_population, Assumptions, DevelopmentCostSchedule, PenetrationCurve,
};
use crate::error::NpvResult;
use super::cashflows::{ProjectionResult, YearRow};
use super::discount::DiscountCurve;

/// Main projection engine
#[derive(Debug, Clone)]
pub struct ProjectionEngine {
    assumptions: Assumptions,
}

impl ProjectionEngine {
    /// Create a new projection engine with given assumptions
    pub fn new(assumptions: Assumptions) -> Self {
        Self { assumptions }
    }

    /// Run the full projection
    pub fn project(&self) -> NpvResult<ProjectionResult> {
        let a = &self.assumptions;
        a.validate()?;

        let n_years = a.n_years as usize;
        log::debug!(
            "projecting {} years (lead time {}, patent exclusivity {})",
            n_years,
            a.lead_time_years,
            a.patent_exclusive_years
        );

        let population = project_population(a.us_population, a.us_population_growth_rate, n_years);
        let incidence = flu_incidence(&population, a.flu_rate);
        let (regimes, penetration): (Vec<_>, Vec<_>) =
            PenetrationCurve::from_assumptions(a).build().into_iter().unzip();
        let patients = patients_treated(&penetration, &incidence);
        let non_revenue = DevelopmentCostSchedule::from_assumptions(a).for_horizon(n_years)?;
        let (revenue, revenue_cost) = revenue_and_cost(&patients, a.cost_per_unit, a.cost_of_revenue);
        let (total_cost, net) = net_income(&revenue, &non_revenue, &revenue_cost);

        let curve = DiscountCurve::single_rate(a.discount_rate);

        let rows: Vec<YearRow> = (0..n_years)
            .map(|i| {
                let discount_factor = curve.discount_to_year(i as u32);
                YearRow {
                    year: i as u32,
                    regime: regimes[i],
                    population: population[i],
                    flu_incidence: incidence[i],
                    market_penetration: penetration[i],
                    patients_treated: patients[i],
                    non_revenue_cost: non_revenue[i],
                    revenue: revenue[i],
                    revenue_cost: revenue_cost[i],
                    total_cost: total_cost[i],
                    net_income: net[i],
                    discount_factor,
                    discounted_cash_flow: net[i] * discount_factor,
                }
            })
            .collect();

        for row in &rows {
            log::trace!(
                "year {:>2} {:?}: revenue {:.4} net income {:.4} dcf {:.4}",
                row.year,
                row.regime,
                row.revenue,
                row.net_income,
                row.discounted_cash_flow
            );
        }

        let result = ProjectionResult::new(rows);
        log::debug!("npv {:.6} over {} years", result.npv, result.n_years());
        Ok(result)
    }

    /// Net present value only
    pub fn npv(&self) -> NpvResult<f64> {
        Ok(self.project()?.npv)
    }
}

/// Patients treated each year: penetration times incidence
pub fn patients_treated(penetration: &[f64], incidence: &[f64]) -> Vec<f64> {
    penetration
        .iter()
        .zip(incidence)
        .map(|(p, n)| p * n)
        .collect()
}

/// Revenue and cost of revenue each year
pub fn revenue_and_cost(patients: &[f64], cost_per_unit: f64, cost_of_revenue: f64) -> (Vec<f64>, Vec<f64>) {
    let revenue: Vec<f64> = patients.iter().map(|n| n * cost_per_unit).collect();
    let revenue_cost = revenue.iter().map(|r| r * cost_of_revenue).collect();
    (revenue, revenue_cost)
}

/// Total cost and net income each year
pub fn net_income(revenue: &[f64], non_revenue_cost: &[f64], revenue_cost: &[f64]) -> (Vec<f64>, Vec<f64>) {
    let total_cost: Vec<f64> = non_revenue_cost
        .iter()
        .zip(revenue_cost)
        .map(|(nr, rc)| nr + rc)
        .collect();
    let net = revenue
        .iter()
        .zip(&total_cost)
        .map(|(r, c)| r - c)
        .collect();
    (total_cost, net)
}
