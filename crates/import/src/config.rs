//! Import run policy.

use std::time::Duration;

use contaflow_clients::ClientTier;

/// Caller-supplied policy for one reconciliation run.
///
/// Passed explicitly into [`crate::Reconciler::reconcile`] (never read from
/// ambient environment), so runs are deterministic and testable with fakes.
/// Immutable for the duration of a run.
#[derive(Debug, Clone)]
pub struct ImportConfig {
    /// Cross-check each row against the official registry (advisory, never
    /// blocking — see the warning path in the row state machine).
    pub validate_externally: bool,
    /// Skip rows whose tax id already exists in the tenant's store.
    pub skip_duplicates: bool,
    /// Tier assigned to every client created by this run.
    pub default_tier: ClientTier,
    /// Start the onboarding workflow after each successful insert (best-effort).
    pub auto_onboard: bool,
    /// Send a welcome notification after each successful insert (best-effort).
    pub send_welcome: bool,
    /// Upper bound on each collaborator call (lookup, duplicate check, insert).
    /// Rows run sequentially, so one hung call would stall the whole batch.
    pub collaborator_timeout: Duration,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            validate_externally: false,
            skip_duplicates: true,
            default_tier: ClientTier::Basic,
            auto_onboard: false,
            send_welcome: false,
            collaborator_timeout: Duration::from_secs(10),
        }
    }
}

impl ImportConfig {
    pub fn with_external_validation(mut self, enabled: bool) -> Self {
        self.validate_externally = enabled;
        self
    }

    pub fn with_skip_duplicates(mut self, enabled: bool) -> Self {
        self.skip_duplicates = enabled;
        self
    }

    pub fn with_default_tier(mut self, tier: ClientTier) -> Self {
        self.default_tier = tier;
        self
    }

    pub fn with_auto_onboard(mut self, enabled: bool) -> Self {
        self.auto_onboard = enabled;
        self
    }

    pub fn with_send_welcome(mut self, enabled: bool) -> Self {
        self.send_welcome = enabled;
        self
    }

    pub fn with_collaborator_timeout(mut self, timeout: Duration) -> Self {
        self.collaborator_timeout = timeout;
        self
    }
}
