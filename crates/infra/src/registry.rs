//! Official registry doubles.

use std::collections::HashMap;

use async_trait::async_trait;

use contaflow_import::{LookupError, OfficialRecord, RegistryLookup};
use contaflow_taxid::Rut;

/// Registry backed by a fixed record set (tests/dev).
#[derive(Debug, Default)]
pub struct StaticRegistry {
    records: HashMap<String, OfficialRecord>,
}

impl StaticRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a record under its cleaned tax id.
    pub fn with_record(mut self, record: OfficialRecord) -> Self {
        self.records.insert(record.tax_id.clone(), record);
        self
    }
}

#[async_trait]
impl RegistryLookup for StaticRegistry {
    async fn lookup(&self, rut: &Rut) -> Result<Option<OfficialRecord>, LookupError> {
        Ok(self.records.get(rut.as_cleaned()).cloned())
    }
}

/// Registry that is always down (exercises the advisory warning path).
#[derive(Debug, Default)]
pub struct UnavailableRegistry;

#[async_trait]
impl RegistryLookup for UnavailableRegistry {
    async fn lookup(&self, _rut: &Rut) -> Result<Option<OfficialRecord>, LookupError> {
        Err(LookupError::Unavailable("service not reachable".to_string()))
    }
}
