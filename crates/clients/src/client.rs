use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use contaflow_core::{ClientId, DomainError, DomainResult, TenantId};
use contaflow_taxid::Rut;

/// Classification tier assigned to a client (drives plan/feature gating
/// elsewhere; import assigns the configured default).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ClientTier {
    #[default]
    Basic,
    Standard,
    Premium,
}

/// Contact information for a client.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ClientContact {
    pub email: Option<String>,
    pub phone: Option<String>,
    pub address: Option<String>,
    /// Comuna / city.
    pub locality: Option<String>,
    pub region: Option<String>,
}

/// A client record ready to be persisted (no identity yet).
///
/// The store assigns the `ClientId` and timestamp on insert.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewClient {
    pub tenant_id: TenantId,
    pub rut: Rut,
    /// Razón social — the registered legal name. Required.
    pub legal_name: String,
    /// Nombre de fantasía — trading name, if different.
    pub trade_name: Option<String>,
    pub contact: ClientContact,
    /// Giro — declared business activity.
    pub activity: Option<String>,
    /// Régimen tributario.
    pub tax_regime: Option<String>,
    pub tier: ClientTier,
}

impl NewClient {
    /// Domain guard: a client must carry a non-blank legal name.
    ///
    /// The RUT needs no re-check here; holding a [`Rut`] already proves it.
    pub fn validate(&self) -> DomainResult<()> {
        if self.legal_name.trim().is_empty() {
            return Err(DomainError::validation("legal name cannot be empty"));
        }
        Ok(())
    }
}

/// A persisted client (company) record, scoped to one tenant.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Client {
    pub id: ClientId,
    pub tenant_id: TenantId,
    pub rut: Rut,
    pub legal_name: String,
    pub trade_name: Option<String>,
    pub contact: ClientContact,
    pub activity: Option<String>,
    pub tax_regime: Option<String>,
    pub tier: ClientTier,
    pub created_at: DateTime<Utc>,
}

impl Client {
    /// Materialize a persisted record from an insert request.
    pub fn from_new(id: ClientId, new: NewClient, created_at: DateTime<Utc>) -> Self {
        Self {
            id,
            tenant_id: new.tenant_id,
            rut: new.rut,
            legal_name: new.legal_name,
            trade_name: new.trade_name,
            contact: new.contact,
            activity: new.activity,
            tax_regime: new.tax_regime,
            tier: new.tier,
            created_at,
        }
    }
}
