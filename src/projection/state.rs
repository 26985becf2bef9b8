//! Running state carried from one projected month to the next

use super::metrics::round_half_up;
use crate::plan::finite_or_zero;

/// Position and running cash balance during a projection
#[derive(Debug, Clone)]
pub struct ProjectionState {
    /// Current month index (0-based)
    pub month_index: u32,

    /// Unrounded cumulative cash after the months recorded so far, starting
    /// cash included. Only published values are rounded.
    pub cumulative_cash_flow: f64,
}

impl ProjectionState {
    /// Initialize state before the first month
    pub fn from_starting_cash(starting_cash: f64) -> Self {
        Self {
            month_index: 0,
            cumulative_cash_flow: finite_or_zero(starting_cash),
        }
    }

    /// Calendar month (1-12) for the current index
    pub fn calendar_month(&self) -> u32 {
        self.month_index % 12 + 1
    }

    /// Calendar year for the current index, counting from `base_year` at index 0
    pub fn calendar_year(&self, base_year: i32) -> i32 {
        base_year.saturating_add((self.month_index / 12) as i32)
    }

    /// Add this month's unrounded cash flow to the running balance and return
    /// the balance as published (whole units)
    pub fn record_cash_flow(&mut self, cash_flow: f64) -> f64 {
        let total = self.cumulative_cash_flow + finite_or_zero(cash_flow);
        self.cumulative_cash_flow = finite_or_zero(total);
        round_half_up(self.cumulative_cash_flow)
    }

    /// Advance to next month
    pub fn advance_month(&mut self) {
        self.month_index += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_calendar_stamping() {
        let mut state = ProjectionState::from_starting_cash(0.0);
        assert_eq!(state.calendar_month(), 1);
        assert_eq!(state.calendar_year(2030), 2030);

        for _ in 0..13 {
            state.advance_month();
        }
        assert_eq!(state.month_index, 13);
        assert_eq!(state.calendar_month(), 2);
        assert_eq!(state.calendar_year(2030), 2031);
    }

    #[test]
    fn test_starting_cash_seeds_balance() {
        let mut state = ProjectionState::from_starting_cash(-2500.0);
        assert_eq!(state.cumulative_cash_flow, -2500.0);
        assert_eq!(state.record_cash_flow(1000.0), -1500.0);

        let state = ProjectionState::from_starting_cash(f64::NAN);
        assert_eq!(state.cumulative_cash_flow, 0.0);
    }

    #[test]
    fn test_fractions_accumulate_unrounded() {
        let mut state = ProjectionState::from_starting_cash(0.0);
        assert_eq!(state.record_cash_flow(0.4), 0.0);
        assert_eq!(state.record_cash_flow(0.4), 1.0);
        assert_eq!(state.record_cash_flow(0.4), 1.0);
        assert!((state.cumulative_cash_flow - 1.2).abs() < 1e-9);
    }
}
