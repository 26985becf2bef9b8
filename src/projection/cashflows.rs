//! Projection output structures

use super::metrics::KeyMetrics;
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};

/// A single projected month. Money fields hold whole units.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MonthlyProjection {
    /// Calendar month (1-12)
    pub month: u32,
    pub year: i32,
    pub revenue: f64,
    pub expenses: f64,
    pub cash_flow: f64,
    /// Starting cash plus every unrounded cash flow up to and including this
    /// month, rounded once
    pub cumulative_cash_flow: f64,
}

/// Complete projection result
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionResult {
    /// Scenario the series was produced under
    pub scenario: Scenario,

    /// Starting cash as supplied (before rounding)
    pub starting_cash: f64,

    /// Monthly rows, one per month index
    pub projections: Vec<MonthlyProjection>,

    pub metrics: KeyMetrics,
}

impl ProjectionResult {
    pub fn new(scenario: Scenario, starting_cash: f64) -> Self {
        Self {
            scenario,
            starting_cash,
            projections: Vec::new(),
            metrics: KeyMetrics::default(),
        }
    }

    /// Add a projected month
    pub fn add_row(&mut self, row: MonthlyProjection) {
        self.projections.push(row);
    }

    /// Get summary statistics
    pub fn summary(&self) -> ProjectionSummary {
        let total_revenue: f64 = self.projections.iter().map(|r| r.revenue).sum();
        let total_expenses: f64 = self.projections.iter().map(|r| r.expenses).sum();
        let total_cash_flow: f64 = self.projections.iter().map(|r| r.cash_flow).sum();

        let opening_cash = super::metrics::round_half_up(self.starting_cash);
        let ending_cash = self
            .projections
            .last()
            .map(|r| r.cumulative_cash_flow)
            .unwrap_or(opening_cash);

        // Earliest month wins on ties
        let lowest = self
            .projections
            .iter()
            .enumerate()
            .fold(None, |lowest: Option<(usize, f64)>, (idx, r)| match lowest {
                Some((_, cash)) if cash <= r.cumulative_cash_flow => lowest,
                _ => Some((idx, r.cumulative_cash_flow)),
            });

        ProjectionSummary {
            total_months: self.projections.len() as u32,
            total_revenue,
            total_expenses,
            total_cash_flow,
            ending_cash,
            lowest_cash: lowest.map_or(opening_cash, |(_, cash)| cash),
            lowest_cash_month: lowest.map(|(idx, _)| idx as u32 + 1),
        }
    }

    /// Totals per calendar year, in projection order
    pub fn annual_totals(&self) -> Vec<AnnualTotals> {
        let mut years: Vec<AnnualTotals> = Vec::new();

        for row in &self.projections {
            match years.last_mut() {
                Some(current) if current.year == row.year => current.add(row),
                _ => {
                    let mut totals = AnnualTotals::empty(row.year);
                    totals.add(row);
                    years.push(totals);
                }
            }
        }

        years
    }
}

/// Summary statistics for a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectionSummary {
    pub total_months: u32,
    pub total_revenue: f64,
    pub total_expenses: f64,
    pub total_cash_flow: f64,
    pub ending_cash: f64,
    /// Lowest cumulative cash reached (starting cash if nothing was projected)
    pub lowest_cash: f64,
    /// 1-based month where the lowest cash occurs
    pub lowest_cash_month: Option<u32>,
}

/// One calendar year of a projection
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AnnualTotals {
    pub year: i32,
    /// Months of this year covered by the projection
    pub months: u32,
    pub revenue: f64,
    pub expenses: f64,
    pub cash_flow: f64,
    /// Cumulative cash at the last projected month of the year
    pub closing_cash: f64,
}

impl AnnualTotals {
    fn empty(year: i32) -> Self {
        Self {
            year,
            months: 0,
            revenue: 0.0,
            expenses: 0.0,
            cash_flow: 0.0,
            closing_cash: 0.0,
        }
    }

    fn add(&mut self, row: &MonthlyProjection) {
        self.months += 1;
        self.revenue += row.revenue;
        self.expenses += row.expenses;
        self.cash_flow += row.cash_flow;
        self.closing_cash = row.cumulative_cash_flow;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn result_with(rows: &[(u32, i32, f64, f64)], starting_cash: f64) -> ProjectionResult {
        let mut result = ProjectionResult::new(Scenario::Realistic, starting_cash);
        let mut cumulative = starting_cash;
        for &(month, year, revenue, expenses) in rows {
            cumulative += revenue - expenses;
            result.add_row(MonthlyProjection {
                month,
                year,
                revenue,
                expenses,
                cash_flow: revenue - expenses,
                cumulative_cash_flow: cumulative,
            });
        }
        result
    }

    #[test]
    fn test_summary_totals_and_low_point() {
        let result = result_with(
            &[(1, 2030, 100.0, 400.0), (2, 2030, 200.0, 400.0), (3, 2030, 900.0, 400.0)],
            1000.0,
        );
        let summary = result.summary();

        assert_eq!(summary.total_months, 3);
        assert_eq!(summary.total_revenue, 1200.0);
        assert_eq!(summary.total_expenses, 1200.0);
        assert_eq!(summary.total_cash_flow, 0.0);
        assert_eq!(summary.ending_cash, 1000.0);
        assert_eq!(summary.lowest_cash, 500.0);
        assert_eq!(summary.lowest_cash_month, Some(2));
    }

    #[test]
    fn test_summary_of_empty_result() {
        let result = ProjectionResult::new(Scenario::Realistic, 2500.4);
        let summary = result.summary();

        assert_eq!(summary.total_months, 0);
        assert_eq!(summary.ending_cash, 2500.0);
        assert_eq!(summary.lowest_cash, 2500.0);
        assert_eq!(summary.lowest_cash_month, None);
    }

    #[test]
    fn test_annual_totals_split_on_year() {
        let result = result_with(
            &[(11, 2030, 10.0, 5.0), (12, 2030, 10.0, 5.0), (1, 2031, 20.0, 5.0)],
            0.0,
        );
        let years = result.annual_totals();

        assert_eq!(years.len(), 2);
        assert_eq!(years[0].year, 2030);
        assert_eq!(years[0].months, 2);
        assert_eq!(years[0].cash_flow, 10.0);
        assert_eq!(years[0].closing_cash, 10.0);
        assert_eq!(years[1].year, 2031);
        assert_eq!(years[1].revenue, 20.0);
        assert_eq!(years[1].closing_cash, 25.0);
    }

    #[test]
    fn test_rows_serialize_with_camel_case_names() {
        let result = result_with(&[(1, 2030, 10.0, 5.0)], 0.0);
        let json = serde_json::to_value(&result.projections[0]).unwrap();
        assert_eq!(json["cashFlow"], 5.0);
        assert_eq!(json["cumulativeCashFlow"], 5.0);
    }
}
