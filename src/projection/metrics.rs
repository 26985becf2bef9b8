//! Key metrics derived from a full projection series

use super::cashflows::MonthlyProjection;
use crate::assumptions::MetricAssumptions;
use crate::plan::finite_or_zero;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Round to the nearest whole unit with halves going up (-2.5 becomes -2),
/// the convention the planner's stored reports were produced with.
/// Stays in `f64` so very large projections are not clamped.
pub fn round_half_up(value: f64) -> f64 {
    finite_or_zero((finite_or_zero(value) + 0.5).floor())
}

/// Round to one decimal place, halves going up
pub fn round_to_tenth(value: f64) -> f64 {
    round_half_up(value * 10.0) / 10.0
}

/// How long starting cash lasts at the average burn rate
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "months", rename_all = "lowercase")]
pub enum Runway {
    /// Not burning cash on average
    Unbounded,
    /// Whole months until starting cash runs out (negative when starting in debt)
    Months(i64),
}

impl Runway {
    pub fn months(&self) -> Option<i64> {
        match self {
            Runway::Unbounded => None,
            Runway::Months(n) => Some(*n),
        }
    }

    pub fn is_unbounded(&self) -> bool {
        matches!(self, Runway::Unbounded)
    }
}

impl fmt::Display for Runway {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Runway::Unbounded => write!(f, "unbounded"),
            Runway::Months(n) => write!(f, "{} months", n),
        }
    }
}

/// Summary metrics for one projection run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
    /// Average monthly expenses minus average monthly revenue (positive = burning)
    pub monthly_burn_rate: f64,
    pub runway: Runway,
    /// 1-based position of the first month with positive cumulative cash
    pub break_even_month: Option<u32>,
    /// Acquisition cost proxy
    pub cac: f64,
    /// Lifetime value proxy
    pub ltv: f64,
    pub ltv_cac_ratio: f64,
    /// Percent, one decimal
    pub gross_margin: f64,
    /// Percent, one decimal
    pub net_margin: f64,
}

impl Default for KeyMetrics {
    fn default() -> Self {
        Self {
            monthly_burn_rate: 0.0,
            runway: Runway::Unbounded,
            break_even_month: None,
            cac: 0.0,
            ltv: 0.0,
            ltv_cac_ratio: 0.0,
            gross_margin: 0.0,
            net_margin: 0.0,
        }
    }
}

impl KeyMetrics {
    /// Derive metrics from the stored (rounded) monthly series
    pub fn from_projections(
        projections: &[MonthlyProjection],
        starting_cash: f64,
        assumptions: &MetricAssumptions,
    ) -> Self {
        let avg_revenue = mean(projections.iter().map(|p| p.revenue));
        let avg_expenses = mean(projections.iter().map(|p| p.expenses));

        let burn_rate = avg_expenses - avg_revenue;
        let runway = if burn_rate <= 0.0 {
            Runway::Unbounded
        } else {
            Runway::Months((finite_or_zero(starting_cash) / burn_rate).floor() as i64)
        };

        let break_even_month = projections
            .iter()
            .position(|p| p.cumulative_cash_flow > 0.0)
            .map(|idx| idx as u32 + 1);

        let (gross_margin, net_margin) = if avg_revenue > 0.0 {
            (
                (avg_revenue - avg_expenses * assumptions.cogs_share) / avg_revenue * 100.0,
                (avg_revenue - avg_expenses) / avg_revenue * 100.0,
            )
        } else {
            (0.0, 0.0)
        };

        // Revenue in hundreds stands in for a customer count, floored at one
        let customer_proxy = (avg_revenue / 100.0).max(1.0);
        let cac = avg_expenses * assumptions.acquisition_share / customer_proxy;
        let ltv = avg_revenue / customer_proxy * assumptions.customer_lifetime_months;
        let ltv_cac_ratio = if cac > 0.0 { ltv / cac } else { 0.0 };

        Self {
            monthly_burn_rate: round_half_up(burn_rate),
            runway,
            break_even_month,
            cac: round_half_up(cac),
            ltv: round_half_up(ltv),
            ltv_cac_ratio: round_to_tenth(ltv_cac_ratio),
            gross_margin: round_to_tenth(gross_margin),
            net_margin: round_to_tenth(net_margin),
        }
    }
}

fn mean(values: impl Iterator<Item = f64>) -> f64 {
    let (sum, count) = values.fold((0.0, 0usize), |(sum, count), v| (sum + v, count + 1));
    if count == 0 {
        0.0
    } else {
        sum / count as f64
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn row(revenue: f64, expenses: f64, cumulative: f64) -> MonthlyProjection {
        MonthlyProjection {
            month: 1,
            year: 2030,
            revenue,
            expenses,
            cash_flow: revenue - expenses,
            cumulative_cash_flow: cumulative,
        }
    }

    #[test]
    fn test_round_half_up() {
        assert_eq!(round_half_up(2.5), 3.0);
        assert_eq!(round_half_up(-2.5), -2.0);
        assert_eq!(round_half_up(-2.6), -3.0);
        assert_eq!(round_half_up(f64::NAN), 0.0);
        assert_eq!(round_half_up(5.8e19), 5.8e19);
        assert_eq!(round_to_tenth(52.04), 52.0);
        assert_eq!(round_to_tenth(33.35), 33.4);
    }

    #[test]
    fn test_burning_plan_has_finite_runway() {
        let rows = vec![row(1000.0, 3000.0, 8000.0), row(1000.0, 3000.0, 6000.0)];
        let metrics = KeyMetrics::from_projections(&rows, 10_000.0, &MetricAssumptions::default());

        assert_eq!(metrics.monthly_burn_rate, 2000.0);
        assert_eq!(metrics.runway, Runway::Months(5));
        assert_eq!(metrics.break_even_month, Some(1));
    }

    #[test]
    fn test_runway_floors_partial_months() {
        let rows = vec![row(0.0, 3000.0, -3000.0)];
        let metrics = KeyMetrics::from_projections(&rows, 10_000.0, &MetricAssumptions::default());
        assert_eq!(metrics.runway, Runway::Months(3));
        assert_eq!(metrics.runway.months(), Some(3));
    }

    #[test]
    fn test_break_even_skips_non_positive_months() {
        let rows = vec![row(0.0, 100.0, -100.0), row(100.0, 100.0, 0.0), row(200.0, 100.0, 100.0)];
        let metrics = KeyMetrics::from_projections(&rows, 0.0, &MetricAssumptions::default());
        assert_eq!(metrics.break_even_month, Some(3));
    }

    #[test]
    fn test_empty_series_is_all_zero() {
        let metrics = KeyMetrics::from_projections(&[], 5000.0, &MetricAssumptions::default());
        assert_eq!(metrics, KeyMetrics::default());
        assert!(metrics.runway.is_unbounded());
        assert_eq!(metrics.runway.months(), None);
    }

    #[test]
    fn test_small_revenue_uses_unit_customer_floor() {
        let rows = vec![row(50.0, 100.0, -50.0)];
        let metrics = KeyMetrics::from_projections(&rows, 0.0, &MetricAssumptions::default());

        assert_eq!(metrics.cac, 30.0);
        assert_eq!(metrics.ltv, 600.0);
        assert_eq!(metrics.ltv_cac_ratio, 20.0);
        assert_eq!(metrics.net_margin, -100.0);
        assert_eq!(metrics.gross_margin, -20.0);
    }

    #[test]
    fn test_runway_serializes_tagged() {
        let json = serde_json::to_string(&Runway::Months(7)).unwrap();
        assert_eq!(json, r#"{"kind":"months","months":7}"#);
        let json = serde_json::to_string(&Runway::Unbounded).unwrap();
        assert_eq!(json, r#"{"kind":"unbounded"}"#);
        assert_eq!(Runway::Months(7).to_string(), "7 months");
    }
}
