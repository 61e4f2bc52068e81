//! Market penetration curve
//!
//! Penetration runs through three regimes laid end to end along the
//! projection years:
//! - **Pre-approval**: zero for `lead_time_years`
//! - **Patent-exclusive**: Fisher-Pry (logistic) adoption for `patent_exclusive_years`
//! - **Post-patent**: flat at `penetration_upon_patent_loss` for `POST_PATENT_YEARS`
//!
//! The curve is indexed by projection year like every other per-year input,
//! so its length must equal the projection horizon.

use serde::{Deserialize, Serialize};

use super::Assumptions;

/// Years of generic competition modelled after patent expiry
pub const POST_PATENT_YEARS: u32 = 5;

/// Regulatory/patent regime a projection year falls into
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PenetrationRegime {
    /// Drug not yet approved
    PreApproval,
    /// Approved and protected by patent
    PatentExclusive,
    /// Generics on the market
    PostPatent,
}

/// Three-regime penetration curve
#[derive(Debug, Clone)]
pub struct PenetrationCurve {
    lead_time_years: u32,
    patent_exclusive_years: u32,
    max_penetration: f64,
    inflection_year: f64,
    hill_coefficient: f64,
    penetration_upon_patent_loss: f64,
}

impl PenetrationCurve {
    /// Build the curve from launch assumptions
    pub fn from_assumptions(assumptions: &Assumptions) -> Self {
        Self {
            lead_time_years: assumptions.lead_time_years,
            patent_exclusive_years: assumptions.patent_exclusive_years,
            max_penetration: assumptions.max_penetration,
            inflection_year: assumptions.inflection_year,
            hill_coefficient: assumptions.hill_coefficient,
            penetration_upon_patent_loss: assumptions.penetration_upon_patent_loss,
        }
    }

    /// Total years spanned by all three regimes
    pub fn horizon(&self) -> u32 {
        self.lead_time_years
            .saturating_add(self.patent_exclusive_years)
            .saturating_add(POST_PATENT_YEARS)
    }

    /// Regime of a projection year, or `None` past the end of the curve
    pub fn regime(&self, year: u32) -> Option<PenetrationRegime> {
        let approval = self.lead_time_years;
        let expiry = approval.saturating_add(self.patent_exclusive_years);

        if year < approval {
            Some(PenetrationRegime::PreApproval)
        } else if year < expiry {
            Some(PenetrationRegime::PatentExclusive)
        } else if year < self.horizon() {
            Some(PenetrationRegime::PostPatent)
        } else {
            None
        }
    }

    /// Fisher-Pry adoption `years_since_approval` years after approval
    ///
    /// max / (1 + exp(-hill * (j - inflection)))
    pub fn fisher_pry(&self, years_since_approval: f64) -> f64 {
        self.max_penetration
            / (1.0 + (-self.hill_coefficient * (years_since_approval - self.inflection_year)).exp())
    }

    /// Penetration in a projection year (zero past the end of the curve)
    pub fn penetration(&self, year: u32) -> f64 {
        match self.regime(year) {
            Some(PenetrationRegime::PreApproval) | None => 0.0,
            Some(PenetrationRegime::PatentExclusive) => {
                self.fisher_pry((year - self.lead_time_years) as f64)
            }
            Some(PenetrationRegime::PostPatent) => self.penetration_upon_patent_loss,
        }
    }

    /// Regime and penetration for every year of the curve
    pub fn build(&self) -> Vec<(PenetrationRegime, f64)> {
        (0..self.horizon())
            .filter_map(|year| self.regime(year).map(|r| (r, self.penetration(year))))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    fn default_curve() -> PenetrationCurve {
        PenetrationCurve::from_assumptions(&Assumptions::default())
    }

    #[test]
    fn test_curve_length_matches_regimes() {
        let curve = default_curve();
        assert_eq!(curve.horizon(), 30);
        assert_eq!(curve.build().len(), 30);
    }

    #[test]
    fn test_last_pre_approval_year_is_zero() {
        let curve = default_curve();
        assert_eq!(curve.regime(5), Some(PenetrationRegime::PreApproval));
        assert_eq!(curve.penetration(5), 0.0);
    }

    #[test]
    fn test_first_approved_year() {
        let curve = default_curve();
        assert_eq!(curve.regime(6), Some(PenetrationRegime::PatentExclusive));

        // j = 0
        let expected = 0.5 / (1.0 + (7.0_f64 * 1.5).exp());
        assert_relative_eq!(curve.penetration(6), expected, max_relative = 1e-12);
    }

    #[test]
    fn test_first_post_patent_year_is_flat() {
        let curve = default_curve();
        assert_eq!(curve.regime(25), Some(PenetrationRegime::PostPatent));
        assert_eq!(curve.penetration(25), 0.05);
        assert_eq!(curve.penetration(29), 0.05);
        assert_eq!(curve.regime(30), None);
    }

    #[test]
    fn test_midpoint_at_inflection() {
        let curve = default_curve();
        assert_relative_eq!(curve.fisher_pry(1.5), 0.25, max_relative = 1e-12);
    }

    #[test]
    fn test_adoption_is_monotone_during_exclusivity() {
        let curve = default_curve();
        let exclusive: Vec<f64> = curve
            .build()
            .into_iter()
            .filter(|(r, _)| *r == PenetrationRegime::PatentExclusive)
            .map(|(_, p)| p)
            .collect();
        assert_eq!(exclusive.len(), 19);
        for pair in exclusive.windows(2) {
            assert!(pair[1] >= pair[0]);
        }
        assert!(exclusive.iter().all(|&p| p <= 0.5));
    }

    #[test]
    fn test_steeper_curve_transitions_faster() {
        let gentle = PenetrationCurve::from_assumptions(&Assumptions {
            hill_coefficient: 1.0,
            ..Default::default()
        });
        let steep = default_curve();
        // Before the midpoint a steeper curve sits lower, after it sits higher
        assert!(steep.fisher_pry(0.0) < gentle.fisher_pry(0.0));
        assert!(steep.fisher_pry(3.0) > gentle.fisher_pry(3.0));
    }

    #[test]
    fn test_huge_year_counts_saturate() {
        let curve = PenetrationCurve::from_assumptions(&Assumptions {
            lead_time_years: u32::MAX,
            ..Default::default()
        });
        assert_eq!(curve.horizon(), u32::MAX);
        assert_eq!(curve.regime(0), Some(PenetrationRegime::PreApproval));
    }

    #[test]
    fn test_no_lead_time_starts_approved() {
        let curve = PenetrationCurve::from_assumptions(&Assumptions {
            lead_time_years: 0,
            ..Default::default()
        });
        assert_eq!(curve.regime(0), Some(PenetrationRegime::PatentExclusive));
        assert_eq!(curve.horizon(), 24);
    }
}
