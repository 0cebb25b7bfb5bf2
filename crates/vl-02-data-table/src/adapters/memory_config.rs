//! # In-Memory Config Provider
//!
//! A `ConfigProvider` over a plain map, for tests and local wiring.

use crate::ports::outbound::{ConfigProvider, TableConfigRecord};
use shared_types::ConfigError;
use std::collections::HashMap;
use std::sync::Mutex;

/// In-memory configuration store keyed by table name.
#[derive(Default)]
pub struct InMemoryConfigProvider {
    records: Mutex<HashMap<String, TableConfigRecord>>,
}

impl InMemoryConfigProvider {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a record, e.g. before constructing a table in a test.
    pub fn seed(&self, table_name: impl Into<String>, record: TableConfigRecord) {
        self.records
            .lock()
            .expect("config store poisoned")
            .insert(table_name.into(), record);
    }

    /// Read back a record without going through the port.
    pub fn get(&self, table_name: &str) -> Option<TableConfigRecord> {
        self.records
            .lock()
            .expect("config store poisoned")
            .get(table_name)
            .cloned()
    }
}

#[async_trait::async_trait]
impl ConfigProvider for InMemoryConfigProvider {
    async fn load(&self, table_name: &str) -> Result<Option<TableConfigRecord>, ConfigError> {
        Ok(self
            .records
            .lock()
            .map_err(|e| ConfigError::Load(e.to_string()))?
            .get(table_name)
            .cloned())
    }

    async fn save(
        &self,
        table_name: &str,
        record: &TableConfigRecord,
    ) -> Result<(), ConfigError> {
        self.records
            .lock()
            .map_err(|e| ConfigError::Save(e.to_string()))?
            .insert(table_name.to_string(), record.clone());
        Ok(())
    }
}
