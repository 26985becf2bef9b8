//! Sales funnel conversion rates

use crate::projection::round_to_tenth;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FunnelStage {
    pub name: String,
    #[serde(default)]
    pub count: u64,
}

impl FunnelStage {
    pub fn new(name: &str, count: u64) -> Self {
        Self {
            name: name.to_string(),
            count,
        }
    }
}

/// Conversion into one stage from the stage before it
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StageConversion {
    pub from: String,
    pub to: String,
    /// Percent, one decimal
    pub rate: f64,
}

fn percent(numerator: u64, denominator: u64) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        round_to_tenth(numerator as f64 / denominator as f64 * 100.0)
    }
}

/// Stage-to-stage conversion for every stage after the first
pub fn conversion_rates(stages: &[FunnelStage]) -> Vec<StageConversion> {
    stages
        .windows(2)
        .map(|pair| StageConversion {
            from: pair[0].name.clone(),
            to: pair[1].name.clone(),
            rate: percent(pair[1].count, pair[0].count),
        })
        .collect()
}

/// Share of the first stage that reaches the last, in percent
pub fn overall_conversion(stages: &[FunnelStage]) -> f64 {
    match (stages.first(), stages.last()) {
        (Some(first), Some(last)) => percent(last.count, first.count),
        _ => 0.0,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn funnel() -> Vec<FunnelStage> {
        vec![
            FunnelStage::new("Leads", 1_000),
            FunnelStage::new("Qualified", 250),
            FunnelStage::new("Proposal", 0),
            FunnelStage::new("Closed", 0),
        ]
    }

    #[test]
    fn test_conversion_rates() {
        let rates = conversion_rates(&funnel());

        assert_eq!(rates.len(), 3);
        assert_eq!(rates[0].from, "Leads");
        assert_eq!(rates[0].to, "Qualified");
        assert_eq!(rates[0].rate, 25.0);
        assert_eq!(rates[1].rate, 0.0);
        // Empty previous stage reports zero rather than dividing by zero
        assert_eq!(rates[2].rate, 0.0);
    }

    #[test]
    fn test_overall_conversion() {
        let stages = vec![FunnelStage::new("Visitors", 3_000), FunnelStage::new("Buyers", 45)];
        assert_eq!(overall_conversion(&stages), 1.5);
        assert_eq!(overall_conversion(&[]), 0.0);
        assert_eq!(overall_conversion(&[FunnelStage::new("Leads", 10)]), 100.0);
        assert!(conversion_rates(&[FunnelStage::new("Leads", 10)]).is_empty());
    }
}
