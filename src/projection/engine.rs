//! Core projection engine for monthly revenue, expense and cash projections

use super::cashflows::{MonthlyProjection, ProjectionResult};
use super::metrics::{round_half_up, KeyMetrics};
use super::state::ProjectionState;
use crate::assumptions::MetricAssumptions;
use crate::plan::{finite_or_zero, ExpenseCategory, FinancialPlan, GrowthLine, RevenueStream};
use crate::scenario::Scenario;

/// Configuration for a projection run
#[derive(Debug, Clone)]
pub struct ProjectionConfig {
    /// Number of months to project
    pub projection_months: u32,

    /// Scenario multipliers applied to revenue and expenses
    pub scenario: Scenario,

    /// Cash on hand before month 1 (negative for existing debt)
    pub starting_cash: f64,

    /// Calendar year of month index 0. Supplied by the caller; the engine
    /// never reads the clock.
    pub current_year: i32,

    /// Constants behind the proxy metrics
    pub assumptions: MetricAssumptions,
}

impl ProjectionConfig {
    /// Three-year realistic projection with no starting cash
    pub fn for_year(current_year: i32) -> Self {
        Self {
            projection_months: 36,
            scenario: Scenario::Realistic,
            starting_cash: 0.0,
            current_year,
            assumptions: MetricAssumptions::default(),
        }
    }

    /// Take scenario, timeframe and starting cash from a stored plan
    pub fn from_plan(
        plan: &FinancialPlan,
        current_year: i32,
        assumptions: MetricAssumptions,
    ) -> Self {
        Self {
            projection_months: plan.timeframe.months(),
            scenario: plan.scenario,
            starting_cash: plan.starting_cash,
            current_year,
            assumptions,
        }
    }
}

/// Main projection engine
pub struct ProjectionEngine {
    config: ProjectionConfig,
}

impl ProjectionEngine {
    /// Create a new projection engine with the given config
    pub fn new(config: ProjectionConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &ProjectionConfig {
        &self.config
    }

    /// Project a plan's streams and categories under this engine's config
    pub fn project_plan(&self, plan: &FinancialPlan) -> ProjectionResult {
        self.project(&plan.revenue_streams, &plan.expense_categories)
    }

    /// Run the projection and derive key metrics.
    ///
    /// Pure: the same inputs and config always produce the same result.
    pub fn project(
        &self,
        streams: &[RevenueStream],
        categories: &[ExpenseCategory],
    ) -> ProjectionResult {
        let starting_cash = finite_or_zero(self.config.starting_cash);
        let mut result = ProjectionResult::new(self.config.scenario, starting_cash);
        let mut state = ProjectionState::from_starting_cash(starting_cash);

        log::debug!(
            "Projecting {} months ({:?}) for {} streams and {} categories",
            self.config.projection_months,
            self.config.scenario,
            streams.len(),
            categories.len()
        );

        for _month in 0..self.config.projection_months {
            let row = self.calculate_month(streams, categories, &mut state);
            result.add_row(row);
        }

        result.metrics = KeyMetrics::from_projections(
            &result.projections,
            starting_cash,
            &self.config.assumptions,
        );
        result
    }

    /// Calculate a single month and advance the running state
    fn calculate_month(
        &self,
        streams: &[RevenueStream],
        categories: &[ExpenseCategory],
        state: &mut ProjectionState,
    ) -> MonthlyProjection {
        let multipliers = self.config.scenario.multipliers();
        let idx = state.month_index;

        // Sum the unrounded lines first; rounding applies to the published totals only
        let revenue = finite_or_zero(sum_at(streams, idx) * multipliers.revenue);
        let expenses = finite_or_zero(sum_at(categories, idx) * multipliers.expenses);
        let cash_flow = finite_or_zero(revenue - expenses);

        let row = MonthlyProjection {
            month: state.calendar_month(),
            year: state.calendar_year(self.config.current_year),
            revenue: round_half_up(revenue),
            expenses: round_half_up(expenses),
            cash_flow: round_half_up(cash_flow),
            cumulative_cash_flow: state.record_cash_flow(cash_flow),
        };

        state.advance_month();
        row
    }
}

fn sum_at<L: GrowthLine>(lines: &[L], month_index: u32) -> f64 {
    lines.iter().map(|line| line.amount_at(month_index)).sum()
}

/// One-shot projection without building an engine
pub fn project(
    streams: &[RevenueStream],
    categories: &[ExpenseCategory],
    scenario: Scenario,
    timeframe_months: u32,
    starting_cash: f64,
    current_year: i32,
) -> ProjectionResult {
    let config = ProjectionConfig {
        projection_months: timeframe_months,
        scenario,
        starting_cash,
        current_year,
        assumptions: MetricAssumptions::default(),
    };
    ProjectionEngine::new(config).project(streams, categories)
}
