use crate::error::{ProcessingError, Result};
use crate::reports::ReportOutput;
use crate::writers::{ResultSink, WriteMode};
use std::collections::BTreeMap;
use std::path::PathBuf;
use std::sync::Mutex;

/// Keeps persisted tables in memory, keyed by table name.
#[derive(Debug, Default)]
pub struct MemorySink {
    tables: Mutex<BTreeMap<String, ReportOutput>>,
}

impl MemorySink {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, table_name: &str) -> Option<ReportOutput> {
        self.tables
            .lock()
            .ok()
            .and_then(|tables| tables.get(table_name).cloned())
    }

    pub fn table_names(&self) -> Vec<String> {
        self.tables
            .lock()
            .map(|tables| tables.keys().cloned().collect())
            .unwrap_or_default()
    }
}

impl ResultSink for MemorySink {
    fn persist(&self, table_name: &str, rows: &ReportOutput, mode: WriteMode) -> Result<()> {
        let mut tables = self
            .tables
            .lock()
            .map_err(|_| ProcessingError::Sink("memory sink lock poisoned".to_string()))?;

        if mode == WriteMode::ErrorIfExists && tables.contains_key(table_name) {
            return Err(ProcessingError::OutputExists(PathBuf::from(table_name)));
        }

        tables.insert(table_name.to_string(), rows.clone());
        Ok(())
    }
}
