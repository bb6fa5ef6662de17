//! In-memory client record store.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use chrono::Utc;

use contaflow_clients::{Client, NewClient};
use contaflow_core::{ClientId, TenantId};
use contaflow_import::{ClientStore, StoreError};
use contaflow_taxid::Rut;

/// Store key: cleaned tax id within one tenant.
type StoreKey = (TenantId, String);

/// In-memory, tenant-isolated client store.
///
/// Intended for tests/dev. Enforces the same uniqueness constraint a real
/// backend would: one client per `(tenant, tax id)`.
#[derive(Debug, Default)]
pub struct InMemoryClientStore {
    clients: RwLock<HashMap<StoreKey, Client>>,
}

impl InMemoryClientStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// All clients for a tenant, in no particular order.
    pub fn list(&self, tenant_id: TenantId) -> Vec<Client> {
        let map = match self.clients.read() {
            Ok(m) => m,
            Err(_) => return vec![],
        };
        map.iter()
            .filter(|((tenant, _), _)| *tenant == tenant_id)
            .map(|(_, client)| client.clone())
            .collect()
    }

    pub fn len(&self) -> usize {
        self.clients.read().map(|m| m.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[async_trait]
impl ClientStore for InMemoryClientStore {
    async fn find_by_tax_id(
        &self,
        tenant_id: TenantId,
        rut: &Rut,
    ) -> Result<Option<Client>, StoreError> {
        let map = self
            .clients
            .read()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;
        Ok(map.get(&(tenant_id, rut.as_cleaned().to_string())).cloned())
    }

    async fn insert(&self, new: NewClient) -> Result<Client, StoreError> {
        new.validate()
            .map_err(|e| StoreError::Rejected(e.to_string()))?;

        let key = (new.tenant_id, new.rut.as_cleaned().to_string());
        let mut map = self
            .clients
            .write()
            .map_err(|_| StoreError::Unavailable("lock poisoned".to_string()))?;

        if map.contains_key(&key) {
            return Err(StoreError::Conflict(new.rut.formatted()));
        }

        let client = Client::from_new(ClientId::new(), new, Utc::now());
        map.insert(key, client.clone());
        Ok(client)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use contaflow_clients::{ClientContact, ClientTier};

    fn new_client(tenant_id: TenantId, rut: &str, name: &str) -> NewClient {
        NewClient {
            tenant_id,
            rut: Rut::parse(rut).unwrap(),
            legal_name: name.to_string(),
            trade_name: None,
            contact: ClientContact::default(),
            activity: None,
            tax_regime: None,
            tier: ClientTier::Basic,
        }
    }

    #[tokio::test]
    async fn insert_then_find_round_trips() {
        let store = InMemoryClientStore::new();
        let tenant_id = TenantId::new();

        let inserted = store
            .insert(new_client(tenant_id, "12345678-5", "Empresa A"))
            .await
            .unwrap();

        let found = store
            .find_by_tax_id(tenant_id, &Rut::parse("12.345.678-5").unwrap())
            .await
            .unwrap()
            .unwrap();
        assert_eq!(found.id, inserted.id);
        assert_eq!(found.legal_name, "Empresa A");
    }

    #[tokio::test]
    async fn duplicate_insert_conflicts() {
        let store = InMemoryClientStore::new();
        let tenant_id = TenantId::new();

        store
            .insert(new_client(tenant_id, "12345678-5", "Empresa A"))
            .await
            .unwrap();
        let err = store
            .insert(new_client(tenant_id, "12345678-5", "Empresa A bis"))
            .await
            .unwrap_err();

        match err {
            StoreError::Conflict(rut) => assert_eq!(rut, "12.345.678-5"),
            other => panic!("expected Conflict, got {other:?}"),
        }
        assert_eq!(store.len(), 1);
    }

    #[tokio::test]
    async fn tenants_are_isolated() {
        let store = InMemoryClientStore::new();
        let tenant_a = TenantId::new();
        let tenant_b = TenantId::new();

        store
            .insert(new_client(tenant_a, "12345678-5", "Empresa A"))
            .await
            .unwrap();

        // Same tax id is free in another tenant, and invisible to it.
        let rut = Rut::parse("12345678-5").unwrap();
        assert!(store.find_by_tax_id(tenant_b, &rut).await.unwrap().is_none());
        store
            .insert(new_client(tenant_b, "12345678-5", "Empresa A"))
            .await
            .unwrap();

        assert_eq!(store.list(tenant_a).len(), 1);
        assert_eq!(store.list(tenant_b).len(), 1);
    }

    #[tokio::test]
    async fn insert_rejects_blank_legal_name() {
        let store = InMemoryClientStore::new();
        let err = store
            .insert(new_client(TenantId::new(), "12345678-5", "  "))
            .await
            .unwrap_err();
        match err {
            StoreError::Rejected(msg) => assert!(msg.contains("legal name")),
            other => panic!("expected Rejected, got {other:?}"),
        }
    }
}
