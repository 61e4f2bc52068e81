//! Launch assumptions: market, clinical development and financial inputs
//!
//! All inputs are flat scalars with defaults matching the reference launch
//! scenario. The per-year input models (population, penetration curve and
//! development costs) are built from these scalars by the submodules.

mod market;
mod penetration;
mod costs;

pub use market::{flu_incidence, project_population};
pub use penetration::{PenetrationCurve, PenetrationRegime, POST_PATENT_YEARS};
pub use costs::{DevelopmentCostSchedule, BASELINE_RD_COSTS};

use serde::{Deserialize, Serialize};

use crate::error::{NpvError, NpvResult};

/// Container for all launch assumptions
///
/// Missing fields fall back to their defaults when deserialized, so a caller
/// only needs to name the assumptions that differ from the reference launch:
///
/// ```ignore
/// let assumptions = Assumptions {
///     cost_per_unit: 60.0,
///     ..Default::default()
/// };
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct Assumptions {
    /// US population in the base year (millions)
    pub us_population: f64,

    /// Annual US population growth rate (decimal)
    pub us_population_growth_rate: f64,

    /// Number of projection years
    pub n_years: u32,

    /// Fraction of the population contracting flu each year
    #[serde(alias = "get_flu_rate")]
    pub flu_rate: f64,

    /// Peak market penetration during patent exclusivity (decimal)
    pub max_penetration: f64,

    /// Years of patent exclusivity after approval
    pub patent_exclusive_years: u32,

    /// Flat penetration once generics enter (decimal)
    pub penetration_upon_patent_loss: f64,

    /// Years after approval at which penetration grows fastest
    pub inflection_year: f64,

    /// Fisher-Pry steepness
    pub hill_coefficient: f64,

    /// Remaining years before approval
    pub lead_time_years: u32,

    /// Multiplier applied to the baseline R&D cost by stage
    pub rd_cost_scaler: f64,

    /// SG&A during each year of clinical development (millions)
    pub clindev_sga: f64,

    /// Cost of revenue as a fraction of revenue
    pub cost_of_revenue: f64,

    /// Price of one dose (USD)
    pub cost_per_unit: f64,

    /// Annual discount rate (decimal)
    pub discount_rate: f64,
}

impl Default for Assumptions {
    fn default() -> Self {
        Self {
            us_population: 335.5,
            us_population_growth_rate: 0.007,
            n_years: 30,
            flu_rate: 0.14,
            max_penetration: 0.5,
            patent_exclusive_years: 19,
            penetration_upon_patent_loss: 0.05,
            inflection_year: 1.5,
            hill_coefficient: 7.0,
            lead_time_years: 6,
            rd_cost_scaler: 1.0,
            clindev_sga: 0.5,
            cost_of_revenue: 0.49,
            cost_per_unit: 45.0,
            discount_rate: 0.35,
        }
    }
}

impl Assumptions {
    /// Parse assumptions from a JSON document; absent fields take defaults
    pub fn from_json(json: &str) -> NpvResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Number of years covered by the penetration curve
    ///
    /// Pre-approval, patent-exclusive and post-patent regimes laid end to end.
    /// A consistent assumption set has `Some(n_years) == penetration_horizon()`.
    /// `None` when the year counts overflow `u32`.
    pub fn penetration_horizon(&self) -> Option<u32> {
        self.lead_time_years
            .checked_add(self.patent_exclusive_years)?
            .checked_add(POST_PATENT_YEARS)
    }

    /// Check every input against its domain
    pub fn validate(&self) -> NpvResult<()> {
        let result = self.check_domains().and_then(|_| self.check_horizon());
        if let Err(ref e) = result {
            log::warn!("rejected assumptions: {}", e);
        }
        result
    }

    fn check_domains(&self) -> NpvResult<()> {
        let scalars = [
            ("us_population", self.us_population),
            ("us_population_growth_rate", self.us_population_growth_rate),
            ("flu_rate", self.flu_rate),
            ("max_penetration", self.max_penetration),
            ("penetration_upon_patent_loss", self.penetration_upon_patent_loss),
            ("inflection_year", self.inflection_year),
            ("hill_coefficient", self.hill_coefficient),
            ("rd_cost_scaler", self.rd_cost_scaler),
            ("clindev_sga", self.clindev_sga),
            ("cost_of_revenue", self.cost_of_revenue),
            ("cost_per_unit", self.cost_per_unit),
            ("discount_rate", self.discount_rate),
        ];
        for (field, value) in scalars {
            if !value.is_finite() {
                return Err(invalid(field, value, "must be finite"));
            }
        }

        if self.n_years == 0 {
            return Err(invalid("n_years", 0.0, "must be at least one year"));
        }

        non_negative("us_population", self.us_population)?;
        if self.us_population_growth_rate <= -1.0 {
            return Err(invalid(
                "us_population_growth_rate",
                self.us_population_growth_rate,
                "must be greater than -100%",
            ));
        }

        fraction("flu_rate", self.flu_rate)?;
        fraction("max_penetration", self.max_penetration)?;
        fraction("penetration_upon_patent_loss", self.penetration_upon_patent_loss)?;

        non_negative("hill_coefficient", self.hill_coefficient)?;
        non_negative("rd_cost_scaler", self.rd_cost_scaler)?;
        non_negative("clindev_sga", self.clindev_sga)?;
        non_negative("cost_of_revenue", self.cost_of_revenue)?;
        non_negative("cost_per_unit", self.cost_per_unit)?;

        if self.discount_rate <= -1.0 {
            return Err(invalid(
                "discount_rate",
                self.discount_rate,
                "must be greater than -100%",
            ));
        }

        Ok(())
    }

    fn check_horizon(&self) -> NpvResult<()> {
        let penetration_years = self.penetration_horizon().ok_or_else(|| {
            invalid(
                "patent_exclusive_years",
                self.patent_exclusive_years as f64,
                "lead time plus patent exclusivity overflows the projection horizon",
            )
        })?;
        if penetration_years != self.n_years {
            return Err(NpvError::HorizonMismatch {
                n_years: self.n_years,
                penetration_years,
                lead_time_years: self.lead_time_years,
                patent_exclusive_years: self.patent_exclusive_years,
                post_patent_years: POST_PATENT_YEARS,
            });
        }
        Ok(())
    }
}

fn invalid(field: &'static str, value: f64, reason: &'static str) -> NpvError {
    NpvError::InvalidInput { field, value, reason }
}

fn non_negative(field: &'static str, value: f64) -> NpvResult<()> {
    if value < 0.0 {
        return Err(invalid(field, value, "must not be negative"));
    }
    Ok(())
}

fn fraction(field: &'static str, value: f64) -> NpvResult<()> {
    if !(0.0..=1.0).contains(&value) {
        return Err(invalid(field, value, "must be between 0 and 1"));
    }
    Ok(())
}
