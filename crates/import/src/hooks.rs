//! Best-effort post-commit side effects.
//!
//! Hooks run after a successful insert, each inside its own failure boundary:
//! a hook error is logged by the reconciler but never changes a row already
//! persisted, and one hook's failure does not stop another's.

use async_trait::async_trait;
use std::sync::Arc;

use contaflow_clients::Client;

/// Starts the onboarding workflow for a freshly imported client.
#[async_trait]
pub trait OnboardingTrigger: Send + Sync {
    async fn start(&self, client: &Client) -> anyhow::Result<()>;
}

/// Sends the welcome notification for a freshly imported client.
#[async_trait]
pub trait WelcomeNotifier: Send + Sync {
    async fn send_welcome(&self, client: &Client) -> anyhow::Result<()>;
}

#[async_trait]
impl<T> OnboardingTrigger for Arc<T>
where
    T: OnboardingTrigger + ?Sized,
{
    async fn start(&self, client: &Client) -> anyhow::Result<()> {
        (**self).start(client).await
    }
}

#[async_trait]
impl<T> WelcomeNotifier for Arc<T>
where
    T: WelcomeNotifier + ?Sized,
{
    async fn send_welcome(&self, client: &Client) -> anyhow::Result<()> {
        (**self).send_welcome(client).await
    }
}
