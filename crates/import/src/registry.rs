//! Official registry (tax authority) lookup contract.
//!
//! The registry is an advisory corroboration source, not a gate: a failed or
//! empty lookup downgrades a row to a warning but never rejects it.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use thiserror::Error;

use contaflow_taxid::Rut;

/// Business data the registry holds for a tax id.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OfficialRecord {
    /// Cleaned tax id this record belongs to.
    pub tax_id: String,
    pub legal_name: String,
    pub activity: Option<String>,
    pub address: Option<String>,
}

#[derive(Debug, Error)]
pub enum LookupError {
    #[error("registry unavailable: {0}")]
    Unavailable(String),
}

/// Lookup against the authoritative registry.
///
/// `Ok(None)` means the tax id is unknown to the registry; both that and
/// `Err(_)` follow the advisory warning path in the reconciler.
#[async_trait]
pub trait RegistryLookup: Send + Sync {
    async fn lookup(&self, rut: &Rut) -> Result<Option<OfficialRecord>, LookupError>;
}

#[async_trait]
impl<R> RegistryLookup for Arc<R>
where
    R: RegistryLookup + ?Sized,
{
    async fn lookup(&self, rut: &Rut) -> Result<Option<OfficialRecord>, LookupError> {
        (**self).lookup(rut).await
    }
}
