//! Tunable constants behind the proxy metrics
//!
//! No customer-count input exists anywhere in a plan, so CAC, LTV and gross
//! margin are approximated from average revenue and expenses. The shares used
//! for those approximations live here rather than inline in the engine.

pub mod loader;

use crate::error::Result;
use std::path::Path;

/// Constants used when deriving key metrics from a projection
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MetricAssumptions {
    /// Share of total expenses treated as cost of goods sold (gross margin)
    pub cogs_share: f64,

    /// Share of total expenses treated as acquisition spend (CAC)
    pub acquisition_share: f64,

    /// Assumed customer lifetime in months (LTV)
    pub customer_lifetime_months: f64,
}

impl Default for MetricAssumptions {
    fn default() -> Self {
        Self {
            cogs_share: 0.6,
            acquisition_share: 0.3,
            customer_lifetime_months: 12.0,
        }
    }
}

impl MetricAssumptions {
    /// Load overrides from CSV files in the default location (data/assumptions/)
    pub fn from_csv() -> Result<Self> {
        Self::from_csv_path(Path::new(loader::DEFAULT_ASSUMPTIONS_PATH))
    }

    /// Load overrides from `metric_assumptions.csv` in a specific directory.
    /// Terms missing from the file keep their default value.
    pub fn from_csv_path(path: &Path) -> Result<Self> {
        let terms = loader::load_metric_terms(path)?;
        let mut assumptions = Self::default();

        for (term, value) in terms {
            match term.as_str() {
                "cogs_share" => assumptions.cogs_share = value,
                "acquisition_share" => assumptions.acquisition_share = value,
                "customer_lifetime_months" | "lifetime_months" => {
                    assumptions.customer_lifetime_months = value
                }
                other => log::warn!("Ignoring unknown metric assumption '{}'", other),
            }
        }

        log::info!(
            "Loaded metric assumptions from {}: cogs={}, acquisition={}, lifetime={}",
            path.display(),
            assumptions.cogs_share,
            assumptions.acquisition_share,
            assumptions.customer_lifetime_months
        );
        Ok(assumptions)
    }
}
