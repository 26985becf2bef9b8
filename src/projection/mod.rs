//! Projection engine: monthly series plus derived key metrics

mod state;
mod engine;
mod cashflows;
mod metrics;

pub use state::ProjectionState;
pub use engine::{project, ProjectionConfig, ProjectionEngine};
pub use cashflows::{AnnualTotals, MonthlyProjection, ProjectionResult, ProjectionSummary};
pub use metrics::{round_half_up, round_to_tenth, KeyMetrics, Runway};
