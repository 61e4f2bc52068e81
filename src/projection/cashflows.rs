//! Cashflow output structures for projections

use serde::{Deserialize, Serialize};

use crate::assumptions::PenetrationRegime;
use super::irr::calculate_irr;

/// A single row of projection output for one year
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct YearRow {
    // Timing
    pub year: u32,
    pub regime: PenetrationRegime,

    // Market (millions of people)
    pub population: f64,
    pub flu_incidence: f64,
    pub market_penetration: f64,
    pub patients_treated: f64,

    // Income statement (millions USD)
    pub non_revenue_cost: f64,
    pub revenue: f64,
    pub revenue_cost: f64,
    pub total_cost: f64,
    pub net_income: f64,

    // Discounting
    pub discount_factor: f64,
    pub discounted_cash_flow: f64,
}

/// Complete projection result
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionResult {
    /// Annual rows, index = projection year
    pub rows: Vec<YearRow>,

    /// Sum of discounted cash flows (millions USD)
    pub npv: f64,
}

impl ProjectionResult {
    pub fn new(rows: Vec<YearRow>) -> Self {
        let npv = rows.iter().map(|r| r.discounted_cash_flow).sum();
        Self { rows, npv }
    }

    pub fn n_years(&self) -> usize {
        self.rows.len()
    }

    pub fn market_penetration(&self) -> Vec<f64> {
        self.column(|r| r.market_penetration)
    }

    pub fn patients_treated(&self) -> Vec<f64> {
        self.column(|r| r.patients_treated)
    }

    pub fn revenue(&self) -> Vec<f64> {
        self.column(|r| r.revenue)
    }

    pub fn non_revenue_costs(&self) -> Vec<f64> {
        self.column(|r| r.non_revenue_cost)
    }

    pub fn net_income(&self) -> Vec<f64> {
        self.column(|r| r.net_income)
    }

    pub fn discounted_cash_flows(&self) -> Vec<f64> {
        self.column(|r| r.discounted_cash_flow)
    }

    /// Present value of non-revenue costs alone
    pub fn pv_non_revenue_costs(&self) -> f64 {
        self.rows
            .iter()
            .map(|r| r.non_revenue_cost * r.discount_factor)
            .sum()
    }

    fn column(&self, f: impl Fn(&YearRow) -> f64) -> Vec<f64> {
        self.rows.iter().map(f).collect()
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.rows.iter().map(|r| r.revenue).sum();
        let total_cost: f64 = self.rows.iter().map(|r| r.total_cost).sum();
        let total_net_income: f64 = self.rows.iter().map(|r| r.net_income).sum();

        let (peak_revenue_year, peak_revenue) = self
            .rows
            .iter()
            .map(|r| (r.year, r.revenue))
            .fold((0, 0.0), |best, (year, revenue)| {
                if revenue > best.1 { (year, revenue) } else { best }
            });

        ProjectionSummary {
            n_years: self.rows.len() as u32,
            total_revenue,
            total_cost,
            total_net_income,
            peak_revenue,
            peak_revenue_year,
            npv: self.npv,
            payback_year: payback_year(self.rows.iter().map(|r| r.net_income)),
            discounted_payback_year: payback_year(self.rows.iter().map(|r| r.discounted_cash_flow)),
            irr: calculate_irr(&self.net_income()),
        }
    }
}

/// First year in which the cumulative cashflow is non-negative again after
/// having gone negative. `Some(0)` if it never goes negative.
fn payback_year(cashflows: impl Iterator<Item = f64>) -> Option<u32> {
    let mut cumulative = 0.0;
    let mut underwater = false;
    for (year, cf) in cashflows.enumerate() {
        cumulative += cf;
        if cumulative < 0.0 {
            underwater = true;
        } else if underwater {
            return Some(year as u32);
        }
    }
    if underwater { None } else { Some(0) }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProjectionSummary {
    pub n_years: u32,
    pub total_revenue: f64,
    pub total_cost: f64,
    pub total_net_income: f64,
    pub peak_revenue: f64,
    pub peak_revenue_year: u32,
    pub npv: f64,
    pub payback_year: Option<u32>,
    pub discounted_payback_year: Option<u32>,
    /// Annual IRR of net income, None without a sign change
    pub irr: Option<f64>,
}
