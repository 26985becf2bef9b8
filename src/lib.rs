//! Venture Planner - Monthly financial projections for early-stage businesses
//!
//! This library provides:
//! - Plan inputs (revenue streams, expense categories) with a forgiving edit boundary
//! - Month-by-month revenue, expense and cash projections under planning scenarios
//! - Key metrics (burn rate, runway, break-even, margins, CAC/LTV proxies)
//! - Scenario comparison and key/value plan storage
//! - Funding dilution and sales funnel calculators

pub mod error;
pub mod plan;
pub mod assumptions;
pub mod projection;
pub mod scenario;
pub mod storage;
pub mod calculators;

// Re-export commonly used types
pub use error::{ParseError, PlannerError, Result};
pub use plan::{ExpenseCategory, ExpenseKind, FinancialPlan, RevenueStream, Timeframe};
pub use assumptions::MetricAssumptions;
pub use projection::{KeyMetrics, MonthlyProjection, ProjectionEngine, ProjectionResult, Runway};
pub use scenario::{Scenario, ScenarioRunner};
pub use storage::{FileStore, MemoryStore, PlanStore};
