//! CSV-based assumption loader
//!
//! Loads metric assumptions from `metric_assumptions.csv` (columns `term,value`)

use crate::error::Result;
use std::collections::HashMap;
use std::fs::File;
use std::io::Read;
use std::path::Path;

/// Default path to assumptions directory
pub const DEFAULT_ASSUMPTIONS_PATH: &str = "data/assumptions";

/// File name looked up inside an assumptions directory
pub const METRIC_ASSUMPTIONS_FILE: &str = "metric_assumptions.csv";

/// Load term/value pairs from any reader
/// Returns HashMap<term_name, value>
pub fn load_terms_from_reader<R: Read>(reader: R) -> Result<HashMap<String, f64>> {
    let mut csv_reader = csv::Reader::from_reader(reader);
    let mut terms = HashMap::new();

    for result in csv_reader.records() {
        let record = result?;
        let term = record.get(0).unwrap_or_default().trim().to_string();
        let raw = record.get(1).unwrap_or_default();
        let value = crate::plan::parse_rate(raw)?;
        terms.insert(term, value);
    }

    Ok(terms)
}

/// Load term/value pairs from `metric_assumptions.csv` in the given directory
pub fn load_metric_terms(path: &Path) -> Result<HashMap<String, f64>> {
    let file = File::open(path.join(METRIC_ASSUMPTIONS_FILE))?;
    load_terms_from_reader(file)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::PlannerError;

    #[test]
    fn test_load_terms() {
        let data = "term,value\ncogs_share,0.55\nlifetime_months, 18\n";
        let terms = load_terms_from_reader(data.as_bytes()).unwrap();

        assert_eq!(terms.len(), 2);
        assert_eq!(terms["cogs_share"], 0.55);
        assert_eq!(terms["lifetime_months"], 18.0);
    }

    #[test]
    fn test_bad_value_is_parse_error() {
        let data = "term,value\ncogs_share,lots\n";
        let result = load_terms_from_reader(data.as_bytes());
        assert!(matches!(result, Err(PlannerError::Parse(_))));
    }
}
