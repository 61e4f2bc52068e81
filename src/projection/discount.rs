//! Discounting of annual cashflows back to projection year 0

use serde::{Deserialize, Serialize};

/// Discount curve for annual cashflows
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DiscountCurve {
    /// Annual discount rate
    pub annual_rate: f64,
}

impl DiscountCurve {
    /// Create a flat curve at a single annual rate
    pub fn single_rate(annual_rate: f64) -> Self {
        Self { annual_rate }
    }

    /// Discount factor from the end of `years` back to year 0
    pub fn discount_to_year(&self, years: u32) -> f64 {
        1.0 / (1.0 + self.annual_rate).powi(years as i32)
    }

    /// Discount each annual cashflow back to year 0
    pub fn discount_stream(&self, cashflows: &[f64]) -> Vec<f64> {
        cashflows
            .iter()
            .enumerate()
            .map(|(year, cf)| cf * self.discount_to_year(year as u32))
            .collect()
    }

    /// Present value of a stream of annual cashflows, first one at year 0
    pub fn pv_stream(&self, cashflows: &[f64]) -> f64 {
        self.discount_stream(cashflows).iter().sum()
    }
}

impl Default for DiscountCurve {
    fn default() -> Self {
        Self::single_rate(0.35)
    }
}
