//! Scenarios and the runner that projects a plan under them
//!
//! Holds the metric assumptions once, then runs any number of projections for
//! different plans, scenarios or years without reloading them.

use crate::assumptions::MetricAssumptions;
use crate::error::PlannerError;
use crate::plan::FinancialPlan;
use crate::projection::{ProjectionConfig, ProjectionEngine, ProjectionResult};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Planning scenario applied uniformly to every stream and category
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Scenario {
    Optimistic,
    Realistic,
    Pessimistic,
}

/// Scaling factors for one scenario
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Multipliers {
    pub revenue: f64,
    pub expenses: f64,
}

impl Scenario {
    /// Most to least favourable
    pub const ALL: [Scenario; 3] = [
        Scenario::Optimistic,
        Scenario::Realistic,
        Scenario::Pessimistic,
    ];

    pub fn multipliers(&self) -> Multipliers {
        match self {
            Scenario::Optimistic => Multipliers { revenue: 1.2, expenses: 0.9 },
            Scenario::Realistic => Multipliers { revenue: 1.0, expenses: 1.0 },
            Scenario::Pessimistic => Multipliers { revenue: 0.8, expenses: 1.1 },
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Scenario::Optimistic => "optimistic",
            Scenario::Realistic => "realistic",
            Scenario::Pessimistic => "pessimistic",
        }
    }
}

impl Default for Scenario {
    fn default() -> Self {
        Scenario::Realistic
    }
}

impl fmt::Display for Scenario {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Scenario {
    type Err = PlannerError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "optimistic" => Ok(Scenario::Optimistic),
            "realistic" => Ok(Scenario::Realistic),
            "pessimistic" => Ok(Scenario::Pessimistic),
            other => Err(PlannerError::UnknownScenario(other.to_string())),
        }
    }
}

/// The same plan projected under every scenario
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScenarioComparison {
    pub optimistic: ProjectionResult,
    pub realistic: ProjectionResult,
    pub pessimistic: ProjectionResult,
}

impl ScenarioComparison {
    pub fn get(&self, scenario: Scenario) -> &ProjectionResult {
        match scenario {
            Scenario::Optimistic => &self.optimistic,
            Scenario::Realistic => &self.realistic,
            Scenario::Pessimistic => &self.pessimistic,
        }
    }

    /// Results in optimistic, realistic, pessimistic order
    pub fn iter(&self) -> impl Iterator<Item = &ProjectionResult> {
        [&self.optimistic, &self.realistic, &self.pessimistic].into_iter()
    }
}

/// Pre-configured runner for repeated projections
///
/// # Example
/// ```ignore
/// let runner = ScenarioRunner::new();
/// let comparison = runner.compare(&plan, 2030);
/// println!("{}", comparison.pessimistic.metrics.runway);
/// ```
#[derive(Debug, Clone)]
pub struct ScenarioRunner {
    assumptions: MetricAssumptions,
}

impl ScenarioRunner {
    /// Create runner with default metric assumptions
    pub fn new() -> Self {
        Self {
            assumptions: MetricAssumptions::default(),
        }
    }

    /// Create runner by loading assumptions from CSV files
    pub fn from_csv() -> crate::error::Result<Self> {
        Ok(Self {
            assumptions: MetricAssumptions::from_csv()?,
        })
    }

    /// Create runner with pre-built assumptions
    pub fn with_assumptions(assumptions: MetricAssumptions) -> Self {
        Self { assumptions }
    }

    /// Project a plan under its own scenario
    pub fn run(&self, plan: &FinancialPlan, current_year: i32) -> ProjectionResult {
        self.run_scenario(plan, plan.scenario, current_year)
    }

    /// Project a plan under the given scenario, ignoring the plan's own choice
    pub fn run_scenario(
        &self,
        plan: &FinancialPlan,
        scenario: Scenario,
        current_year: i32,
    ) -> ProjectionResult {
        let mut config = ProjectionConfig::from_plan(plan, current_year, self.assumptions);
        config.scenario = scenario;
        ProjectionEngine::new(config).project_plan(plan)
    }

    /// Project a plan under all three scenarios
    pub fn compare(&self, plan: &FinancialPlan, current_year: i32) -> ScenarioComparison {
        let mut results: Vec<ProjectionResult> = Scenario::ALL
            .par_iter()
            .map(|&scenario| self.run_scenario(plan, scenario, current_year))
            .collect();

        log::info!(
            "Compared {} scenarios over {} months",
            results.len(),
            plan.timeframe.months()
        );

        // collect() preserves order: optimistic, realistic, pessimistic
        let pessimistic = results.remove(2);
        let realistic = results.remove(1);
        let optimistic = results.remove(0);
        ScenarioComparison {
            optimistic,
            realistic,
            pessimistic,
        }
    }

    /// Project many plans with the same settings
    pub fn run_batch(&self, plans: &[FinancialPlan], current_year: i32) -> Vec<ProjectionResult> {
        plans.par_iter().map(|plan| self.run(plan, current_year)).collect()
    }

    /// Get reference to the metric assumptions for inspection
    pub fn assumptions(&self) -> &MetricAssumptions {
        &self.assumptions
    }

    /// Get mutable reference to the metric assumptions for customization
    pub fn assumptions_mut(&mut self) -> &mut MetricAssumptions {
        &mut self.assumptions
    }
}

impl Default for ScenarioRunner {
    fn default() -> Self {
        Self::new()
    }
}
