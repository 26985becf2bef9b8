//! Funding round arithmetic: valuation, dilution and ownership over rounds

use crate::plan::{finite_or_zero, lenient_number};
use crate::projection::round_to_tenth;
use serde::{Deserialize, Serialize};

/// A priced equity round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FundingRound {
    pub name: String,

    /// Valuation before the investment
    #[serde(default, deserialize_with = "lenient_number")]
    pub pre_money: f64,

    #[serde(default, deserialize_with = "lenient_number")]
    pub investment: f64,
}

impl FundingRound {
    pub fn new(name: &str, pre_money: f64, investment: f64) -> Self {
        Self {
            name: name.to_string(),
            pre_money,
            investment,
        }
    }

    pub fn post_money(&self) -> f64 {
        post_money(self.pre_money, self.investment)
    }

    /// Percent of the company sold in this round
    pub fn dilution(&self) -> f64 {
        dilution(self.pre_money, self.investment)
    }
}

/// Existing holders' position after one round
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct OwnershipStep {
    pub round: String,
    pub post_money: f64,
    /// Percent sold in this round, one decimal
    pub dilution: f64,
    /// Founders' remaining ownership in percent, one decimal
    pub ownership: f64,
}

pub fn post_money(pre_money: f64, investment: f64) -> f64 {
    finite_or_zero(pre_money) + finite_or_zero(investment)
}

/// `investment / (pre_money + investment)` as a percent; 0 when the
/// post-money valuation is not positive
pub fn dilution(pre_money: f64, investment: f64) -> f64 {
    let post = post_money(pre_money, investment);
    if post <= 0.0 {
        return 0.0;
    }
    finite_or_zero(investment) / post * 100.0
}

/// Ownership percent left after selling a round's worth of new shares
pub fn apply_round(ownership_pct: f64, round: &FundingRound) -> f64 {
    finite_or_zero(ownership_pct) * (1.0 - round.dilution() / 100.0)
}

/// Founders' ownership after each round, starting from `initial_ownership` percent
pub fn dilution_path(initial_ownership: f64, rounds: &[FundingRound]) -> Vec<OwnershipStep> {
    let mut ownership = finite_or_zero(initial_ownership);

    rounds
        .iter()
        .map(|round| {
            ownership = apply_round(ownership, round);
            OwnershipStep {
                round: round.name.clone(),
                post_money: round.post_money(),
                dilution: round_to_tenth(round.dilution()),
                ownership: round_to_tenth(ownership),
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_single_round() {
        let seed = FundingRound::new("Seed", 4_000_000.0, 1_000_000.0);
        assert_eq!(seed.post_money(), 5_000_000.0);
        assert_relative_eq!(seed.dilution(), 20.0, epsilon = 1e-9);
        assert_relative_eq!(apply_round(100.0, &seed), 80.0, epsilon = 1e-9);
    }

    #[test]
    fn test_zero_valuation_has_no_dilution() {
        assert_eq!(dilution(0.0, 0.0), 0.0);
        assert_eq!(dilution(-500.0, 100.0), 0.0);
        assert_eq!(dilution(f64::NAN, 100.0), 100.0);
    }

    #[test]
    fn test_dilution_path_compounds() {
        let rounds = vec![
            FundingRound::new("Seed", 4_000_000.0, 1_000_000.0),
            FundingRound::new("Series A", 15_000_000.0, 5_000_000.0),
        ];
        let path = dilution_path(100.0, &rounds);

        assert_eq!(path.len(), 2);
        assert_eq!(path[0].ownership, 80.0);
        assert_eq!(path[1].dilution, 25.0);
        assert_eq!(path[1].ownership, 60.0);
        assert_eq!(path[1].post_money, 20_000_000.0);
    }
}
