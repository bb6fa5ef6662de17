//! Record store contract consumed by the reconciler.

use async_trait::async_trait;
use std::sync::Arc;
use thiserror::Error;

use contaflow_clients::{Client, NewClient};
use contaflow_core::TenantId;
use contaflow_taxid::Rut;

/// Client store operation error.
///
/// Infrastructure failures (constraint violations, connectivity) as opposed to
/// domain errors. The reconciler surfaces the detail in per-row messages.
#[derive(Debug, Error)]
pub enum StoreError {
    /// A record with the same tax id already exists in the tenant's scope.
    #[error("client with tax id {0} already exists")]
    Conflict(String),

    /// The store rejected the write (constraint violation, bad data).
    #[error("write rejected: {0}")]
    Rejected(String),

    /// The store could not be reached.
    #[error("store unavailable: {0}")]
    Unavailable(String),
}

/// Tenant-scoped client record store.
///
/// Lookups and inserts are keyed by the cleaned tax id within one tenant.
/// Implementations must never let one tenant see another's records.
#[async_trait]
pub trait ClientStore: Send + Sync {
    /// Find the tenant's client with this tax id, if any.
    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        rut: &Rut,
    ) -> Result<Option<Client>, StoreError>;

    /// Persist a new client, assigning its identity and timestamp.
    ///
    /// Must reject a duplicate `(tenant, tax id)` pair with
    /// [`StoreError::Conflict`] rather than silently overwriting.
    async fn insert(&self, new: NewClient) -> Result<Client, StoreError>;
}

#[async_trait]
impl<S> ClientStore for Arc<S>
where
    S: ClientStore + ?Sized,
{
    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        rut: &Rut,
    ) -> Result<Option<Client>, StoreError> {
        (**self).find_by_tax_id(tenant_id, rut).await
    }

    async fn insert(&self, new: NewClient) -> Result<Client, StoreError> {
        (**self).insert(new).await
    }
}
