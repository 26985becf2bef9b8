//! Load revenue streams and expense categories from CSV, plans from JSON

use super::coerce::{coerce_amount, coerce_non_negative};
use super::data::{ExpenseCategory, ExpenseKind, FinancialPlan, RevenueStream};
use crate::error::Result;
use csv::Reader;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Raw CSV row for revenue.csv. Numeric cells are read as text and coerced,
/// so a blank cell means zero rather than a parse failure.
#[derive(Debug, serde::Deserialize)]
struct RevenueRow {
    #[serde(rename = "name", default)]
    name: String,
    #[serde(rename = "monthlyAmount", default)]
    monthly_amount: String,
    #[serde(rename = "growthRate", default)]
    growth_rate: String,
}

/// Raw CSV row for expenses.csv
#[derive(Debug, serde::Deserialize)]
struct ExpenseRow {
    #[serde(rename = "name", default)]
    name: String,
    #[serde(rename = "monthlyAmount", default)]
    monthly_amount: String,
    #[serde(rename = "growthRate", default)]
    growth_rate: String,
    #[serde(rename = "category", default)]
    category: String,
}

/// Load revenue streams from any reader; ids follow file order starting at 1
pub fn load_revenue_streams_from_reader<R: Read>(reader: R) -> Result<Vec<RevenueStream>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut streams = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: RevenueRow = result?;
        streams.push(RevenueStream {
            id: idx as u32 + 1,
            name: row.name.trim().to_string(),
            monthly_amount: coerce_non_negative(&row.monthly_amount),
            growth_rate: coerce_amount(&row.growth_rate),
        });
    }

    log::debug!("Loaded {} revenue streams", streams.len());
    Ok(streams)
}

/// Load expense categories from any reader; ids follow file order starting at 1
pub fn load_expense_categories_from_reader<R: Read>(reader: R) -> Result<Vec<ExpenseCategory>> {
    let mut csv_reader = Reader::from_reader(reader);
    let mut categories = Vec::new();

    for (idx, result) in csv_reader.deserialize().enumerate() {
        let row: ExpenseRow = result?;
        categories.push(ExpenseCategory {
            id: idx as u32 + 1,
            name: row.name.trim().to_string(),
            monthly_amount: coerce_non_negative(&row.monthly_amount),
            growth_rate: coerce_amount(&row.growth_rate),
            category: ExpenseKind::from_label(&row.category),
        });
    }

    log::debug!("Loaded {} expense categories", categories.len());
    Ok(categories)
}

pub fn load_revenue_streams<P: AsRef<Path>>(path: P) -> Result<Vec<RevenueStream>> {
    load_revenue_streams_from_reader(File::open(path)?)
}

pub fn load_expense_categories<P: AsRef<Path>>(path: P) -> Result<Vec<ExpenseCategory>> {
    load_expense_categories_from_reader(File::open(path)?)
}

/// Load a complete plan from JSON. Entries stored without an id get a fresh
/// one; a plan missing all streams or all categories is rejected.
pub fn load_plan_from_reader<R: Read>(reader: R) -> Result<FinancialPlan> {
    let plan: FinancialPlan = serde_json::from_reader(reader)?;
    plan.normalized()
}

pub fn load_plan<P: AsRef<Path>>(path: P) -> Result<FinancialPlan> {
    load_plan_from_reader(File::open(path)?)
}
