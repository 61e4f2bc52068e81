//! Scenario runner for batch NPV evaluations
//!
//! Holds one set of base assumptions and evaluates many independent
//! variations of it. Each evaluation is a pure function of its assumptions,
//! so batches run in parallel with no effect on the results.

use rayon::prelude::*;
use serde::{Deserialize, Serialize};

use crate::assumptions::Assumptions;
use crate::error::{NpvError, NpvResult};
use crate::projection::{ProjectionEngine, ProjectionResult};

/// Named set of assumption overrides
///
/// `overrides` is a JSON object whose keys are assumption field names;
/// any field it omits keeps its base value.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Scenario {
    pub name: String,
    #[serde(default)]
    pub overrides: serde_json::Value,
}

impl Scenario {
    pub fn new(name: impl Into<String>, overrides: serde_json::Value) -> Self {
        Self {
            name: name.into(),
            overrides,
        }
    }
}

/// NPV of a single scenario
#[derive(Debug, Clone, PartialEq)]
pub struct ScenarioOutcome {
    pub name: String,
    pub npv: NpvResult<f64>,
}

/// Pre-loaded scenario runner for batch evaluations
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
///
/// let scenarios = vec![
///     Scenario::new("premium price", json!({ "cost_per_unit": 60.0 })),
///     Scenario::new("slow uptake", json!({ "hill_coefficient": 2.0 })),
/// ];
/// for outcome in runner.run_scenarios(&scenarios) {
///     println!("{}: {:?}", outcome.name, outcome.npv);
/// }
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    base_assumptions: Assumptions,
}

impl ScenarioRunner {
    /// Create runner with default assumptions
    pub fn new() -> Self {
        Self {
            base_assumptions: Assumptions::default(),
        }
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: Assumptions) -> Self {
        Self {
            base_assumptions: assumptions,
        }
    }

    /// Create runner from a JSON document of base assumptions
    pub fn from_json(json: &str) -> NpvResult<Self> {
        Ok(Self::with_assumptions(Assumptions::from_json(json)?))
    }

    /// Project the base assumptions
    pub fn run(&self) -> NpvResult<ProjectionResult> {
        ProjectionEngine::new(self.base_assumptions.clone()).project()
    }

    /// NPV for each assumption set, in input order
    pub fn run_batch(&self, batch: &[Assumptions]) -> Vec<NpvResult<f64>> {
        batch
            .par_iter()
            .map(|a| ProjectionEngine::new(a.clone()).npv())
            .collect()
    }

    /// Apply each scenario to the base assumptions and evaluate, in input order
    pub fn run_scenarios(&self, scenarios: &[Scenario]) -> Vec<ScenarioOutcome> {
        log::debug!("running {} scenarios", scenarios.len());
        scenarios
            .par_iter()
            .map(|scenario| ScenarioOutcome {
                name: scenario.name.clone(),
                npv: self
                    .apply(scenario)
                    .and_then(|a| ProjectionEngine::new(a).npv()),
            })
            .collect()
    }

    /// Base assumptions with a scenario's overrides applied
    ///
    /// The base is validated first, since non-finite values do not survive
    /// the JSON merge.
    pub fn apply(&self, scenario: &Scenario) -> NpvResult<Assumptions> {
        self.base_assumptions.validate()?;
        let mut merged = serde_json::to_value(&self.base_assumptions)?;

        match (&mut merged, &scenario.overrides) {
            (_, serde_json::Value::Null) => {}
            (serde_json::Value::Object(base), serde_json::Value::Object(overrides)) => {
                for (key, value) in overrides {
                    let key = if key == "get_flu_rate" { "flu_rate" } else { key.as_str() };
                    if !base.contains_key(key) {
                        return Err(NpvError::Parse(format!(
                            "scenario '{}' overrides unknown assumption '{}'",
                            scenario.name, key
                        )));
                    }
                    base.insert(key.to_string(), value.clone());
                }
            }
            _ => {
                return Err(NpvError::Parse(format!(
                    "scenario '{}' overrides must be a JSON object",
                    scenario.name
                )));
            }
        }

        Ok(serde_json::from_value(merged)?)
    }

    /// Get reference to base assumptions
    pub fn assumptions(&self) -> &Assumptions {
        &self.base_assumptions
    }

    /// Get mutable reference to base assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut Assumptions {
        &mut self.base_assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use serde_json::json;

    #[test]
    fn test_scenarios_keep_input_order() {
        let runner = ScenarioRunner::new();
        let scenarios: Vec<_> = [40.0, 45.0, 50.0]
            .iter()
            .map(|&price| Scenario::new(format!("price {}", price), json!({ "cost_per_unit": price })))
            .collect();

        let outcomes = runner.run_scenarios(&scenarios);
        assert_eq!(outcomes.len(), 3);
        assert_eq!(outcomes[1].name, "price 45");

        let npvs: Vec<f64> = outcomes.iter().map(|o| *o.npv.as_ref().unwrap()).collect();
        assert!(npvs[0] < npvs[1] && npvs[1] < npvs[2]);
        assert_relative_eq!(npvs[1], 178.07510502608292, max_relative = 1e-9);
    }

    #[test]
    fn test_batch_matches_single_runs() {
        let runner = ScenarioRunner::new();
        let batch: Vec<Assumptions> = [0.2, 0.35, 0.5]
            .iter()
            .map(|&r| Assumptions { discount_rate: r, ..Default::default() })
            .collect();

        let npvs = runner.run_batch(&batch);
        for (a, npv) in batch.iter().zip(&npvs) {
            let single = ProjectionEngine::new(a.clone()).npv().unwrap();
            assert_eq!(*npv.as_ref().unwrap(), single);
        }
    }

    #[test]
    fn test_invalid_scenario_reports_error() {
        let runner = ScenarioRunner::new();
        let outcomes = runner.run_scenarios(&[
            Scenario::new("bad rate", json!({ "discount_rate": -2.0 })),
            Scenario::new("typo", json!({ "cost_per_unti": 50.0 })),
            Scenario::new("not an object", json!([1, 2])),
        ]);

        assert!(matches!(
            outcomes[0].npv,
            Err(NpvError::InvalidInput { field: "discount_rate", .. })
        ));
        assert!(matches!(outcomes[1].npv, Err(NpvError::Parse(_))));
        assert!(matches!(outcomes[2].npv, Err(NpvError::Parse(_))));
    }

    #[test]
    fn test_non_finite_base_reports_field() {
        let runner = ScenarioRunner::with_assumptions(Assumptions {
            cost_per_unit: f64::NAN,
            ..Default::default()
        });
        let outcomes = runner.run_scenarios(&[Scenario::new("price", json!({ "cost_per_unit": 50.0 }))]);
        assert!(matches!(
            outcomes[0].npv,
            Err(NpvError::InvalidInput { field: "cost_per_unit", .. })
        ));
    }

    #[test]
    fn test_overrides_apply_on_custom_base() {
        let runner = ScenarioRunner::from_json(r#"{ "cost_per_unit": 60.0 }"#).unwrap();
        let applied = runner
            .apply(&Scenario::new("alias", json!({ "get_flu_rate": 0.1 })))
            .unwrap();
        assert_eq!(applied.cost_per_unit, 60.0);
        assert_eq!(applied.flu_rate, 0.1);
    }

    #[test]
    fn test_empty_overrides_is_base() {
        let runner = ScenarioRunner::new();
        let scenario: Scenario = serde_json::from_str(r#"{ "name": "base" }"#).unwrap();
        assert_eq!(runner.apply(&scenario).unwrap(), Assumptions::default());
        assert!(runner.run().is_ok());
    }
}
