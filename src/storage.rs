//! Key/value persistence for plans
//!
//! The planner saves each tool's state under a short key. Hosts plug in a
//! `PlanStore`; the projection engine never touches storage.

use crate::error::{PlannerError, Result};
use crate::plan::FinancialPlan;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};

/// Key the financial projections tool stores its plan under
pub const FINANCIAL_PLAN_KEY: &str = "financial-projections";

/// Raw blob storage keyed by short names
pub trait PlanStore {
    /// Fetch a blob; `Ok(None)` when nothing is stored under `key`
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>>;

    /// Store a blob, replacing any previous value
    fn save(&mut self, key: &str, blob: &[u8]) -> Result<()>;
}

/// A plan together with when it was written
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlanRecord {
    pub saved_at: DateTime<Utc>,
    pub plan: FinancialPlan,
}

/// Serialize and save a plan, stamped with the current time
pub fn save_plan<S: PlanStore + ?Sized>(
    store: &mut S,
    key: &str,
    plan: &FinancialPlan,
) -> Result<PlanRecord> {
    let record = PlanRecord {
        saved_at: Utc::now(),
        plan: plan.clone(),
    };
    let blob = serde_json::to_vec_pretty(&record)?;
    store.save(key, &blob)?;
    log::info!("Saved plan under '{}' ({} bytes)", key, blob.len());
    Ok(record)
}

/// Load and deserialize a plan saved with [`save_plan`]. The stored plan is
/// checked the same way as a plan file (see [`FinancialPlan::normalized`]).
pub fn load_plan<S: PlanStore + ?Sized>(store: &S, key: &str) -> Result<Option<PlanRecord>> {
    let blob = match store.load(key)? {
        Some(blob) => blob,
        None => return Ok(None),
    };

    let record: PlanRecord = serde_json::from_slice(&blob)?;
    Ok(Some(PlanRecord {
        saved_at: record.saved_at,
        plan: record.plan.normalized()?,
    }))
}

fn validate_key(key: &str) -> Result<()> {
    let valid = !key.is_empty()
        && key
            .chars()
            .all(|c| c.is_ascii_alphanumeric() || c == '-' || c == '_');
    if valid {
        Ok(())
    } else {
        Err(PlannerError::InvalidKey(key.to_string()))
    }
}

/// One `<key>.json` file per key under a root directory
#[derive(Debug, Clone)]
pub struct FileStore {
    root: PathBuf,
}

impl FileStore {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    /// Store under the platform data directory (falls back to the working directory)
    pub fn default_location() -> Self {
        let root = dirs::data_dir()
            .unwrap_or_else(|| PathBuf::from("."))
            .join("venture_planner");
        Self::new(root)
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    fn path_for(&self, key: &str) -> Result<PathBuf> {
        validate_key(key)?;
        Ok(self.root.join(format!("{}.json", key)))
    }
}

impl PlanStore for FileStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        let path = self.path_for(key)?;
        match fs::read(&path) {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e.into()),
        }
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<()> {
        let path = self.path_for(key)?;
        fs::create_dir_all(&self.root)?;
        fs::write(&path, blob)?;
        log::debug!("Wrote {}", path.display());
        Ok(())
    }
}

/// In-memory store for tests and embedding
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    entries: HashMap<String, Vec<u8>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl PlanStore for MemoryStore {
    fn load(&self, key: &str) -> Result<Option<Vec<u8>>> {
        validate_key(key)?;
        Ok(self.entries.get(key).cloned())
    }

    fn save(&mut self, key: &str, blob: &[u8]) -> Result<()> {
        validate_key(key)?;
        self.entries.insert(key.to_string(), blob.to_vec());
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::scenario::Scenario;

    #[test]
    fn test_memory_store_round_trip() {
        let mut store = MemoryStore::new();
        let mut plan = FinancialPlan::default();
        plan.scenario = Scenario::Pessimistic;
        plan.add_revenue_stream("Wholesale", 4_200.0, 1.5);

        save_plan(&mut store, FINANCIAL_PLAN_KEY, &plan).unwrap();
        let record = load_plan(&store, FINANCIAL_PLAN_KEY).unwrap().unwrap();

        assert_eq!(record.plan, plan);
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn test_missing_key_is_none() {
        let store = MemoryStore::new();
        assert!(load_plan(&store, "nothing-here").unwrap().is_none());
    }

    #[test]
    fn test_invalid_keys_rejected() {
        let mut store = MemoryStore::new();
        assert!(matches!(store.save("../escape", b"{}"), Err(PlannerError::InvalidKey(_))));
        assert!(matches!(store.load(""), Err(PlannerError::InvalidKey(_))));
    }

    #[test]
    fn test_corrupt_blob_is_json_error() {
        let mut store = MemoryStore::new();
        store.save("broken", b"{not json").unwrap();
        assert!(matches!(load_plan(&store, "broken"), Err(PlannerError::Json(_))));
    }

    #[test]
    fn test_stored_plan_without_entries_rejected() {
        let mut store = MemoryStore::new();
        let blob = br#"{"savedAt": "2030-01-01T00:00:00Z", "plan": {"revenueStreams": []}}"#;
        store.save("emptied", blob).unwrap();
        assert!(matches!(load_plan(&store, "emptied"), Err(PlannerError::EmptyPlan)));
    }

    #[test]
    fn test_stored_plan_gets_missing_ids() {
        let mut store = MemoryStore::new();
        let blob = br#"{
            "savedAt": "2030-01-01T00:00:00Z",
            "plan": {
                "revenueStreams": [{"name": "Sales", "monthlyAmount": 900}],
                "expenseCategories": [{"id": 2, "name": "Rent"}]
            }
        }"#;
        store.save("legacy", blob).unwrap();

        let record = load_plan(&store, "legacy").unwrap().unwrap();
        assert_eq!(record.plan.revenue_streams[0].id, 1);
        assert_eq!(record.plan.expense_categories[0].id, 2);
    }

    #[test]
    fn test_file_store_round_trip() {
        let dir = tempfile::tempdir().unwrap();
        let root = dir.path().join("plans");
        let mut store = FileStore::new(&root);

        assert!(store.load("plan").unwrap().is_none());

        let plan = FinancialPlan::default();
        save_plan(&mut store, "plan", &plan).unwrap();
        assert!(root.join("plan.json").exists());

        let record = load_plan(&store, "plan").unwrap().unwrap();
        assert_eq!(record.plan, plan);
    }
}
