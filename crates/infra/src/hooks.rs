//! Post-commit hook doubles that record their invocations.

use std::sync::Mutex;

use async_trait::async_trait;
use tracing::info;

use contaflow_clients::Client;
use contaflow_core::ClientId;
use contaflow_import::{OnboardingTrigger, WelcomeNotifier};

/// Records every onboarding start (tests/dev stand-in for the workflow service).
#[derive(Debug, Default)]
pub struct RecordingOnboarding {
    started: Mutex<Vec<ClientId>>,
}

impl RecordingOnboarding {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn started(&self) -> Vec<ClientId> {
        self.started.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl OnboardingTrigger for RecordingOnboarding {
    async fn start(&self, client: &Client) -> anyhow::Result<()> {
        info!(client_id = %client.id, rut = %client.rut, "onboarding started");
        self.started
            .lock()
            .map_err(|_| anyhow::anyhow!("lock poisoned"))?
            .push(client.id);
        Ok(())
    }
}

/// Records every welcome notification (tests/dev stand-in for the mailer).
#[derive(Debug, Default)]
pub struct RecordingNotifier {
    sent: Mutex<Vec<ClientId>>,
}

impl RecordingNotifier {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn sent(&self) -> Vec<ClientId> {
        self.sent.lock().map(|v| v.clone()).unwrap_or_default()
    }
}

#[async_trait]
impl WelcomeNotifier for RecordingNotifier {
    async fn send_welcome(&self, client: &Client) -> anyhow::Result<()> {
        info!(client_id = %client.id, rut = %client.rut, "welcome notification sent");
        self.sent
            .lock()
            .map_err(|_| anyhow::anyhow!("lock poisoned"))?
            .push(client.id);
        Ok(())
    }
}
