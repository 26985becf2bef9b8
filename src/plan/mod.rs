//! Plan inputs: revenue streams, expense categories and the edit boundary

mod coerce;
mod data;
pub mod loader;

pub use coerce::{
    coerce_amount, coerce_non_negative, finite_or_zero, lenient_amount, lenient_number,
    non_negative_or_zero, parse_non_negative, parse_rate,
};
pub use data::{
    CategoryUpdate, ExpenseCategory, ExpenseKind, FinancialPlan, GrowthLine, RevenueStream,
    StreamUpdate, Timeframe,
};
pub use loader::{load_expense_categories, load_plan, load_plan_from_reader, load_revenue_streams};
