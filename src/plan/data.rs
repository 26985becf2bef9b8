//! Plan data structures matching the stored planner format

use super::coerce::{finite_or_zero, lenient_amount, lenient_number, non_negative_or_zero};
use crate::error::{PlannerError, Result};
use crate::scenario::Scenario;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Whether an expense is fixed overhead or scales with activity.
/// Informational only; the projection treats both the same way.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ExpenseKind {
    #[default]
    Fixed,
    Variable,
}

impl ExpenseKind {
    /// Parse the stored label, falling back to `Fixed` for anything unknown
    pub fn from_label(label: &str) -> Self {
        match label.trim().to_ascii_lowercase().as_str() {
            "variable" => ExpenseKind::Variable,
            _ => ExpenseKind::Fixed,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            ExpenseKind::Fixed => "fixed",
            ExpenseKind::Variable => "variable",
        }
    }
}

/// A source of monthly revenue
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RevenueStream {
    /// Stable identifier, unchanged by edits. `0` means not yet assigned.
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    /// Revenue at month index 0
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_amount: f64,

    /// Monthly growth in percent (may be negative)
    #[serde(default, deserialize_with = "lenient_number")]
    pub growth_rate: f64,
}

/// A category of monthly spend
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ExpenseCategory {
    #[serde(default)]
    pub id: u32,

    #[serde(default)]
    pub name: String,

    /// Spend at month index 0
    #[serde(default, deserialize_with = "lenient_amount")]
    pub monthly_amount: f64,

    /// Monthly growth in percent (may be negative)
    #[serde(default, deserialize_with = "lenient_number")]
    pub growth_rate: f64,

    #[serde(default)]
    pub category: ExpenseKind,
}

/// Anything that contributes a compounding monthly amount to the projection
pub trait GrowthLine {
    fn monthly_amount(&self) -> f64;
    fn growth_rate(&self) -> f64;

    /// Amount at month index `month_index`, compounded from month 0.
    /// Non-finite inputs contribute nothing.
    fn amount_at(&self, month_index: u32) -> f64 {
        let base = finite_or_zero(self.monthly_amount());
        let growth = finite_or_zero(self.growth_rate());
        let exponent = i32::try_from(month_index).unwrap_or(i32::MAX);
        finite_or_zero(base * (1.0 + growth / 100.0).powi(exponent))
    }
}

impl GrowthLine for RevenueStream {
    fn monthly_amount(&self) -> f64 {
        self.monthly_amount
    }

    fn growth_rate(&self) -> f64 {
        self.growth_rate
    }
}

impl GrowthLine for ExpenseCategory {
    fn monthly_amount(&self) -> f64 {
        self.monthly_amount
    }

    fn growth_rate(&self) -> f64 {
        self.growth_rate
    }
}

/// Projection horizon offered by the planner
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum Timeframe {
    Months12,
    Months24,
    Months36,
    Months48,
    Months60,
}

impl Timeframe {
    pub const ALL: [Timeframe; 5] = [
        Timeframe::Months12,
        Timeframe::Months24,
        Timeframe::Months36,
        Timeframe::Months48,
        Timeframe::Months60,
    ];

    pub fn months(&self) -> u32 {
        match self {
            Timeframe::Months12 => 12,
            Timeframe::Months24 => 24,
            Timeframe::Months36 => 36,
            Timeframe::Months48 => 48,
            Timeframe::Months60 => 60,
        }
    }
}

impl Default for Timeframe {
    fn default() -> Self {
        Timeframe::Months36
    }
}

impl TryFrom<u32> for Timeframe {
    type Error = PlannerError;

    fn try_from(months: u32) -> Result<Self> {
        Timeframe::ALL
            .into_iter()
            .find(|t| t.months() == months)
            .ok_or(PlannerError::InvalidTimeframe(months))
    }
}

impl From<Timeframe> for u32 {
    fn from(timeframe: Timeframe) -> Self {
        timeframe.months()
    }
}

impl fmt::Display for Timeframe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} months", self.months())
    }
}

/// Partial edit to a revenue stream; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct StreamUpdate {
    pub name: Option<String>,
    pub monthly_amount: Option<f64>,
    pub growth_rate: Option<f64>,
}

/// Partial edit to an expense category; `None` leaves the field unchanged
#[derive(Debug, Clone, Default)]
pub struct CategoryUpdate {
    pub name: Option<String>,
    pub monthly_amount: Option<f64>,
    pub growth_rate: Option<f64>,
    pub kind: Option<ExpenseKind>,
}

/// Everything the planner persists for one business
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct FinancialPlan {
    #[serde(default)]
    pub revenue_streams: Vec<RevenueStream>,

    #[serde(default)]
    pub expense_categories: Vec<ExpenseCategory>,

    #[serde(default)]
    pub scenario: Scenario,

    #[serde(default)]
    pub timeframe: Timeframe,

    /// Cash on hand at the start (negative for existing debt)
    #[serde(default, deserialize_with = "lenient_number")]
    pub starting_cash: f64,
}

impl Default for FinancialPlan {
    /// A blank plan with one empty stream and one empty category
    fn default() -> Self {
        Self {
            revenue_streams: vec![RevenueStream {
                id: 1,
                name: "Primary Revenue".to_string(),
                monthly_amount: 0.0,
                growth_rate: 0.0,
            }],
            expense_categories: vec![ExpenseCategory {
                id: 1,
                name: "Operating Expenses".to_string(),
                monthly_amount: 0.0,
                growth_rate: 0.0,
                category: ExpenseKind::Fixed,
            }],
            scenario: Scenario::Realistic,
            timeframe: Timeframe::default(),
            starting_cash: 0.0,
        }
    }
}

impl FinancialPlan {
    /// Add a revenue stream and return its new id
    pub fn add_revenue_stream(&mut self, name: &str, monthly_amount: f64, growth_rate: f64) -> u32 {
        let id = next_id(self.revenue_streams.iter().map(|s| s.id));
        self.revenue_streams.push(RevenueStream {
            id,
            name: name.to_string(),
            monthly_amount: non_negative_or_zero(monthly_amount),
            growth_rate: finite_or_zero(growth_rate),
        });
        id
    }

    pub fn update_revenue_stream(&mut self, id: u32, update: StreamUpdate) -> Result<()> {
        let stream = self
            .revenue_streams
            .iter_mut()
            .find(|s| s.id == id)
            .ok_or(PlannerError::UnknownId(id))?;

        if let Some(name) = update.name {
            stream.name = name;
        }
        if let Some(amount) = update.monthly_amount {
            stream.monthly_amount = non_negative_or_zero(amount);
        }
        if let Some(rate) = update.growth_rate {
            stream.growth_rate = finite_or_zero(rate);
        }
        Ok(())
    }

    /// Remove a revenue stream. The last remaining stream cannot be removed.
    pub fn remove_revenue_stream(&mut self, id: u32) -> Result<RevenueStream> {
        let idx = self
            .revenue_streams
            .iter()
            .position(|s| s.id == id)
            .ok_or(PlannerError::UnknownId(id))?;

        if self.revenue_streams.len() <= 1 {
            return Err(PlannerError::LastEntry);
        }
        Ok(self.revenue_streams.remove(idx))
    }

    /// Add an expense category and return its new id
    pub fn add_expense_category(
        &mut self,
        name: &str,
        monthly_amount: f64,
        growth_rate: f64,
        kind: ExpenseKind,
    ) -> u32 {
        let id = next_id(self.expense_categories.iter().map(|c| c.id));
        self.expense_categories.push(ExpenseCategory {
            id,
            name: name.to_string(),
            monthly_amount: non_negative_or_zero(monthly_amount),
            growth_rate: finite_or_zero(growth_rate),
            category: kind,
        });
        id
    }

    pub fn update_expense_category(&mut self, id: u32, update: CategoryUpdate) -> Result<()> {
        let category = self
            .expense_categories
            .iter_mut()
            .find(|c| c.id == id)
            .ok_or(PlannerError::UnknownId(id))?;

        if let Some(name) = update.name {
            category.name = name;
        }
        if let Some(amount) = update.monthly_amount {
            category.monthly_amount = non_negative_or_zero(amount);
        }
        if let Some(rate) = update.growth_rate {
            category.growth_rate = finite_or_zero(rate);
        }
        if let Some(kind) = update.kind {
            category.category = kind;
        }
        Ok(())
    }

    /// Remove an expense category. The last remaining category cannot be removed.
    pub fn remove_expense_category(&mut self, id: u32) -> Result<ExpenseCategory> {
        let idx = self
            .expense_categories
            .iter()
            .position(|c| c.id == id)
            .ok_or(PlannerError::UnknownId(id))?;

        if self.expense_categories.len() <= 1 {
            return Err(PlannerError::LastEntry);
        }
        Ok(self.expense_categories.remove(idx))
    }

    /// Check a plan read from storage: both lists need at least one entry,
    /// and entries without an id get the next free one
    pub fn normalized(mut self) -> Result<Self> {
        if self.revenue_streams.is_empty() || self.expense_categories.is_empty() {
            return Err(PlannerError::EmptyPlan);
        }

        let mut id = next_id(self.revenue_streams.iter().map(|s| s.id));
        for stream in self.revenue_streams.iter_mut().filter(|s| s.id == 0) {
            stream.id = id;
            id = id.saturating_add(1);
        }

        let mut id = next_id(self.expense_categories.iter().map(|c| c.id));
        for category in self.expense_categories.iter_mut().filter(|c| c.id == 0) {
            category.id = id;
            id = id.saturating_add(1);
        }

        Ok(self)
    }
}

fn next_id(existing: impl Iterator<Item = u32>) -> u32 {
    existing.max().map_or(1, |max| max.saturating_add(1))
}
